//! Single-shot autoplay timer. At most one timer is live at any time.

use crate::host::Timers;
use crate::ids::{IdSequence, TimerHandle};

/// Navigation step issued when the live timer fires.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AutoplayStep {
    Next,
    Prev,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Armed {
    handle: TimerHandle,
    step: AutoplayStep,
}

#[derive(Debug, Default)]
pub struct AutoplayTimer {
    handles: IdSequence<TimerHandle>,
    live: Option<Armed>,
}

impl AutoplayTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule one step after `delay_ms`, replacing any live timer.
    pub fn arm(&mut self, delay_ms: u32, reverse: bool, timers: &mut dyn Timers) -> TimerHandle {
        self.cancel_live(timers);
        let handle = self.handles.next_id();
        let step = if reverse {
            AutoplayStep::Prev
        } else {
            AutoplayStep::Next
        };
        timers.schedule(handle, delay_ms);
        log::trace!("autoplay armed {:?}: {:?} in {}ms", handle, step, delay_ms);
        self.live = Some(Armed { handle, step });
        handle
    }

    /// Cancel `handle` if it is still live; otherwise do nothing.
    pub fn cancel(&mut self, handle: TimerHandle, timers: &mut dyn Timers) {
        if self.live.map(|a| a.handle) == Some(handle) {
            self.cancel_live(timers);
        }
    }

    pub fn cancel_live(&mut self, timers: &mut dyn Timers) {
        if let Some(armed) = self.live.take() {
            timers.cancel(armed.handle);
        }
    }

    /// Consume the live timer if `handle` is it. Fires for cancelled or
    /// superseded handles return `None`.
    pub fn fire(&mut self, handle: TimerHandle) -> Option<AutoplayStep> {
        match self.live {
            Some(armed) if armed.handle == handle => {
                self.live = None;
                Some(armed.step)
            }
            _ => None,
        }
    }

    pub fn live(&self) -> Option<TimerHandle> {
        self.live.map(|a| a.handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Book {
        scheduled: Vec<(TimerHandle, u32)>,
        cancelled: Vec<TimerHandle>,
    }

    impl Timers for Book {
        fn schedule(&mut self, handle: TimerHandle, delay_ms: u32) {
            self.scheduled.push((handle, delay_ms));
        }
        fn cancel(&mut self, handle: TimerHandle) {
            self.cancelled.push(handle);
        }
    }

    #[test]
    fn rearming_cancels_previous() {
        let mut book = Book::default();
        let mut timer = AutoplayTimer::new();
        let first = timer.arm(100, false, &mut book);
        let second = timer.arm(100, true, &mut book);
        assert_eq!(book.cancelled, vec![first]);
        assert_eq!(timer.live(), Some(second));
        assert_eq!(timer.fire(first), None);
        assert_eq!(timer.fire(second), Some(AutoplayStep::Prev));
        assert_eq!(timer.live(), None);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut book = Book::default();
        let mut timer = AutoplayTimer::new();
        let h = timer.arm(50, false, &mut book);
        timer.cancel(h, &mut book);
        timer.cancel(h, &mut book);
        timer.cancel_live(&mut book);
        assert_eq!(book.cancelled, vec![h]);
        assert_eq!(timer.fire(h), None);
    }

    #[test]
    fn fired_handle_cannot_be_cancelled() {
        let mut book = Book::default();
        let mut timer = AutoplayTimer::new();
        let h = timer.arm(50, false, &mut book);
        assert_eq!(timer.fire(h), Some(AutoplayStep::Next));
        timer.cancel(h, &mut book);
        assert!(book.cancelled.is_empty());
    }
}
