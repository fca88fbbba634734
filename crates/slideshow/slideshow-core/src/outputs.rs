//! Command outcomes and the event log surfaced to adapters.

use serde::{Deserialize, Serialize};

use crate::transition::Direction;

/// Result of an accepted or dropped navigation command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Navigation {
    Launched {
        from: Option<usize>,
        to: usize,
        direction: Direction,
    },
    Ignored(IgnoreReason),
}

impl Navigation {
    pub fn launched(&self) -> bool {
        matches!(self, Navigation::Launched { .. })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// A transition is in flight.
    Blocked,
    /// The target is already displayed.
    AlreadyShown,
    /// No page carries the requested identifier.
    UnknownPage,
    /// Timer fire for a cancelled or superseded handle.
    StaleTimer,
}

/// Discrete signals recorded by the controller, drained with
/// [`crate::Slideshow::take_events`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum SlideshowEvent {
    PageHidden {
        index: usize,
        identifier: Option<String>,
    },
    TransitionStarted {
        from: Option<usize>,
        to: usize,
        direction: Direction,
    },
    TransitionSettled {
        index: usize,
    },
    PageShown {
        index: usize,
        identifier: Option<String>,
    },
    AutoplayArmed {
        delay_ms: u32,
        reverse: bool,
    },
    AutoplayStopped,
    PageAdded {
        index: usize,
        identifier: Option<String>,
    },
}

/// Lifecycle state of a slideshow.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No page has been displayed yet.
    Uninitialized,
    Idle,
    Transitioning,
}

/// Mutable navigation state. Only the controller writes it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    pub current_index: Option<usize>,
    pub blocking: bool,
    pub play_reverse: bool,
}
