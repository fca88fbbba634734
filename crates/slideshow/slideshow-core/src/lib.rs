//! Slideshow Core (host-agnostic)
//!
//! Navigation and transition state machine for a widget that cycles through
//! pages in a container. The core owns the current page, the blocking flag,
//! autoplay and callback dispatch; rendering is delegated to a [`Host`]
//! (DOM adapter, native UI, or the headless [`RecordingHost`]).

pub mod autoplay;
pub mod callbacks;
pub mod config;
pub mod controller;
pub mod error;
pub mod host;
pub mod ids;
pub mod outputs;
pub mod page_set;
pub mod recording;
pub mod style;
pub mod transition;

// Re-exports for consumers (adapters)
pub use autoplay::{AutoplayStep, AutoplayTimer};
pub use callbacks::{PageCallbacks, PageEventKind, PageMatcher};
pub use config::{AutoplayDirection, Settings, SettingsOverrides, TransitionKind};
pub use controller::{ButtonSide, Slideshow};
pub use error::SlideshowError;
pub use host::{AnimationRequest, Animator, ContainerSize, Host, Stage, Timers};
pub use ids::{AnimationTicket, PageHandle, TimerHandle};
pub use outputs::{IgnoreReason, Navigation, NavigationState, Phase, SlideshowEvent};
pub use page_set::{Page, PageSet, PageSpec, PageTarget, Visibility};
pub use recording::{settle, RecordingHost};
pub use style::{Motion, Side, StyleMap, StyleTarget};
pub use transition::{
    Direction, DirectionHint, Launch, TransitionCtx, TransitionStatus, TransitionStrategy,
};
