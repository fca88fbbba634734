//! Capabilities the slideshow consumes from its host (DOM, native UI, tests).
//!
//! The core never calls back into itself through these traits: hosts report
//! animation completion and timer expiry later, through
//! [`crate::Slideshow::on_animation_complete`] and
//! [`crate::Slideshow::on_timer_fired`].

use serde::{Deserialize, Serialize};

use crate::ids::{AnimationTicket, PageHandle, TimerHandle};
use crate::page_set::PageSpec;
use crate::style::{Motion, StyleMap, StyleTarget};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

impl ContainerSize {
    pub fn is_definite(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// One animation: every track plays in lockstep and the host reports a
/// single completion for `ticket`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnimationRequest {
    pub ticket: AnimationTicket,
    pub duration_ms: u32,
    pub tracks: Vec<(PageHandle, Motion)>,
}

/// Layout and page discovery.
pub trait Stage {
    /// Current container extent, `None` when it cannot be determined.
    fn container_size(&self) -> Option<ContainerSize>;

    /// Pages already present in the container, in display order. The core
    /// assigns handles to them in this order starting at `PageHandle(0)`.
    fn discover_pages(&mut self) -> Vec<PageSpec>;

    fn apply_style(&mut self, target: StyleTarget, style: &StyleMap);

    /// Create a page from markup at the end of the container under `handle`.
    fn insert_page(&mut self, handle: PageHandle, markup: &str) -> Result<PageSpec, String>;
}

pub trait Animator {
    fn animate(&mut self, request: AnimationRequest);
}

pub trait Timers {
    fn schedule(&mut self, handle: TimerHandle, delay_ms: u32);
    fn cancel(&mut self, handle: TimerHandle);
}

/// Everything a slideshow needs from its environment.
pub trait Host: Stage + Animator + Timers {}

impl<T: Stage + Animator + Timers> Host for T {}
