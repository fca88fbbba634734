//! Slideshow: navigation state machine and public command surface.
//!
//! Methods:
//! - new, with_callbacks, with_strategy, next_page, prev_page, go_to, start, stop, add_page
//! - on_animation_complete / on_timer_fired (host continuations)
//!
//! At most one transition is in flight. Commands issued while it runs are
//! dropped, not queued, and an in-flight transition cannot be cancelled.

use log::{debug, trace, warn};

use crate::autoplay::{AutoplayStep, AutoplayTimer};
use crate::callbacks::{PageCallbacks, PageEventKind};
use crate::config::{
    bounced_play_reverse, initial_play_reverse, Settings, SettingsOverrides, TransitionKind,
};
use crate::error::SlideshowError;
use crate::host::Host;
use crate::ids::{AnimationTicket, IdSequence, PageHandle, TimerHandle};
use crate::outputs::{IgnoreReason, Navigation, NavigationState, Phase, SlideshowEvent};
use crate::page_set::{PageSet, PageTarget, Visibility};
use crate::style::{container_style, page_style, StyleTarget};
use crate::transition::{
    strategy_for, DirectionHint, Launch, TransitionCtx, TransitionStatus,
    TransitionStrategy,
};

/// Left/right navigation buttons found inside a page.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ButtonSide {
    Left,
    Right,
}

#[derive(Debug)]
pub struct Slideshow<H: Host> {
    settings: Settings,
    state: NavigationState,
    /// Page leaving the view during the running transition.
    outgoing: Option<usize>,
    pages: PageSet,
    handles: IdSequence<PageHandle>,
    tickets: IdSequence<AnimationTicket>,
    strategy: Box<dyn TransitionStrategy>,
    autoplay: AutoplayTimer,
    callbacks: PageCallbacks,
    events: Vec<SlideshowEvent>,
    host: H,
}

impl<H: Host> Slideshow<H> {
    /// Discover pages, apply initial styles and pick the transition strategy.
    ///
    /// Carousel transitions require the container to report a definite size;
    /// otherwise this fails with [`SlideshowError::IndeterminateContainerSize`].
    pub fn new(settings: Settings, mut host: H) -> Result<Self, SlideshowError> {
        settings.validate()?;
        if settings.transition == TransitionKind::Carousel {
            let definite = host.container_size().is_some_and(|s| s.is_definite());
            if !definite {
                return Err(SlideshowError::IndeterminateContainerSize);
            }
        }

        host.apply_style(StyleTarget::Container, &container_style(settings.transition));

        let mut handles = IdSequence::new();
        let mut pages = PageSet::new();
        let style = page_style(settings.transition);
        for spec in host.discover_pages() {
            let handle = handles.next_id();
            host.apply_style(StyleTarget::Page(handle), &style);
            pages.append(handle, spec);
        }
        debug!(
            "slideshow: {} pages, {:?} transition",
            pages.size(),
            settings.transition
        );

        let state = NavigationState {
            current_index: None,
            blocking: false,
            play_reverse: initial_play_reverse(settings.auto_play_direction),
        };

        Ok(Self {
            strategy: strategy_for(settings.transition),
            settings,
            state,
            outgoing: None,
            pages,
            handles,
            tickets: IdSequence::new(),
            autoplay: AutoplayTimer::new(),
            callbacks: PageCallbacks::new(),
            events: Vec::new(),
            host,
        })
    }

    pub fn with_callbacks(mut self, callbacks: PageCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// Replace the strategy picked from the settings. Use before the first
    /// navigation; a strategy may settle straight from `launch`.
    pub fn with_strategy(mut self, strategy: Box<dyn TransitionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> NavigationState {
        self.state
    }

    pub fn pages(&self) -> &PageSet {
        &self.pages
    }

    pub fn current_index(&self) -> Option<usize> {
        self.state.current_index
    }

    pub fn phase(&self) -> Phase {
        if self.state.blocking {
            Phase::Transitioning
        } else if self.state.current_index.is_none() {
            Phase::Uninitialized
        } else {
            Phase::Idle
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Drain the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<SlideshowEvent> {
        std::mem::take(&mut self.events)
    }

    /// Advance by one page. Before anything is displayed this shows the first page.
    pub fn next_page(&mut self) -> Result<Navigation, SlideshowError> {
        let target = self.state.current_index.map_or(0, |c| c as i64 + 1);
        self.navigate(target, DirectionHint::Forward)
    }

    /// Go back by one page. Before anything is displayed this shows the last page.
    pub fn prev_page(&mut self) -> Result<Navigation, SlideshowError> {
        let target = self.state.current_index.map_or(-1, |c| c as i64 - 1);
        self.navigate(target, DirectionHint::Backward)
    }

    /// Navigate to an index (wrapped) or identifier. The hint defaults to forward.
    pub fn go_to(
        &mut self,
        target: impl Into<PageTarget>,
        hint: Option<DirectionHint>,
    ) -> Result<Navigation, SlideshowError> {
        let hint = hint.unwrap_or_default();
        match target.into() {
            PageTarget::Index(index) => self.navigate(index, hint),
            PageTarget::Id(id) => {
                if self.pages.is_empty() {
                    return Err(SlideshowError::EmptyPageSet);
                }
                match self.pages.index_of(&id) {
                    Some(index) => self.navigate(index as i64, hint),
                    None => {
                        warn!("slideshow: no page with identifier {id:?}");
                        Ok(Navigation::Ignored(IgnoreReason::UnknownPage))
                    }
                }
            }
        }
    }

    /// Wire a page button to the matching navigation command.
    pub fn button_pressed(&mut self, side: ButtonSide) -> Result<Navigation, SlideshowError> {
        match side {
            ButtonSide::Left => self.prev_page(),
            ButtonSide::Right => self.next_page(),
        }
    }

    /// Merge `overrides`, enable autoplay and arm the timer.
    pub fn start(&mut self, overrides: &SettingsOverrides) -> Result<(), SlideshowError> {
        let settings = self.settings.merged(overrides).with_auto_play(true);
        settings.validate()?;
        self.settings = settings;
        self.state.play_reverse = initial_play_reverse(self.settings.auto_play_direction);
        // A running transition arms the timer when it settles.
        if !self.state.blocking {
            self.rearm_autoplay();
        }
        Ok(())
    }

    /// Disable autoplay and cancel any pending timer.
    pub fn stop(&mut self) {
        self.settings = self.settings.with_auto_play(false);
        self.autoplay.cancel_live(&mut self.host);
        self.events.push(SlideshowEvent::AutoplayStopped);
    }

    /// Append a page built from `markup`. The displayed page is unaffected.
    pub fn add_page(&mut self, markup: &str) -> Result<PageHandle, SlideshowError> {
        let handle = self.handles.next_id();
        let spec = self
            .host
            .insert_page(handle, markup)
            .map_err(SlideshowError::Host)?;
        self.host
            .apply_style(StyleTarget::Page(handle), &page_style(self.settings.transition));
        let identifier = spec.identifier.clone();
        let index = self.pages.append(handle, spec);
        debug!("slideshow: added page {index} ({identifier:?})");
        self.events.push(SlideshowEvent::PageAdded { index, identifier });
        Ok(handle)
    }

    /// Host continuation: the animation identified by `ticket` finished.
    pub fn on_animation_complete(&mut self, ticket: AnimationTicket) -> TransitionStatus {
        if !self.state.blocking {
            trace!("slideshow: completion {ticket:?} with no transition running");
            return TransitionStatus::Stale;
        }
        let mut ctx = TransitionCtx {
            animator: &mut self.host,
            tickets: &mut self.tickets,
        };
        let status = self.strategy.advance(ticket, &mut ctx);
        match status {
            TransitionStatus::Settled => self.finish_transition(),
            TransitionStatus::Pending => {}
            TransitionStatus::Stale => trace!("slideshow: stale completion {ticket:?}"),
        }
        status
    }

    /// Host continuation: the autoplay timer `handle` expired.
    pub fn on_timer_fired(&mut self, handle: TimerHandle) -> Result<Navigation, SlideshowError> {
        let nav = match self.autoplay.fire(handle) {
            Some(AutoplayStep::Next) => self.next_page()?,
            Some(AutoplayStep::Prev) => self.prev_page()?,
            None => {
                trace!("slideshow: stale timer {handle:?}");
                return Ok(Navigation::Ignored(IgnoreReason::StaleTimer));
            }
        };
        // A single page never transitions, so nothing else would re-arm.
        if nav == Navigation::Ignored(IgnoreReason::AlreadyShown) && self.settings.auto_play {
            self.rearm_autoplay();
        }
        Ok(nav)
    }

    fn navigate(&mut self, raw: i64, hint: DirectionHint) -> Result<Navigation, SlideshowError> {
        if self.pages.is_empty() {
            return Err(SlideshowError::EmptyPageSet);
        }
        if self.state.blocking {
            debug!("slideshow: transition in flight, dropping navigation to {raw}");
            return Ok(Navigation::Ignored(IgnoreReason::Blocked));
        }
        let target = self.pages.normalize(raw)?;
        let current = self.state.current_index;
        if current == Some(target) {
            return Ok(Navigation::Ignored(IgnoreReason::AlreadyShown));
        }
        let incoming = self.pages.at(target as i64)?.handle;
        let outgoing = match current {
            Some(index) => Some(self.pages.at(index as i64)?.handle),
            None => None,
        };

        self.autoplay.cancel_live(&mut self.host);
        if let Some(index) = current {
            self.notify(PageEventKind::Hide, index);
        }

        let direction = hint.resolve(current, target, self.pages.size());
        self.state.current_index = Some(target);
        self.state.blocking = true;
        self.outgoing = current;
        debug!("slideshow: {current:?} -> {target} ({direction:?})");
        self.events.push(SlideshowEvent::TransitionStarted {
            from: current,
            to: target,
            direction,
        });

        let launch = Launch {
            direction,
            outgoing,
            incoming,
            duration_ms: self.settings.transition_duration,
        };
        let mut ctx = TransitionCtx {
            animator: &mut self.host,
            tickets: &mut self.tickets,
        };
        if self.strategy.launch(launch, &mut ctx) == TransitionStatus::Settled {
            self.finish_transition();
        }

        Ok(Navigation::Launched {
            from: current,
            to: target,
            direction,
        })
    }

    fn finish_transition(&mut self) {
        self.state.blocking = false;
        if let Some(out) = self.outgoing.take() {
            self.pages.set_visibility(out, Visibility::Hidden);
        }
        let Some(index) = self.state.current_index else {
            return;
        };
        self.pages.set_visibility(index, Visibility::Visible);
        debug!("slideshow: settled on page {index}");
        self.events.push(SlideshowEvent::TransitionSettled { index });
        self.notify(PageEventKind::Show, index);
        if self.settings.auto_play {
            self.rearm_autoplay();
        }
    }

    fn rearm_autoplay(&mut self) {
        if let Some(index) = self.state.current_index {
            self.state.play_reverse = bounced_play_reverse(
                self.state.play_reverse,
                self.settings.auto_play_direction,
                index,
                self.pages.size(),
            );
        }
        let delay_ms = self.settings.auto_play_delay;
        let reverse = self.state.play_reverse;
        self.autoplay.arm(delay_ms, reverse, &mut self.host);
        self.events.push(SlideshowEvent::AutoplayArmed { delay_ms, reverse });
    }

    fn notify(&mut self, kind: PageEventKind, index: usize) {
        let identifier = self
            .pages
            .at(index as i64)
            .ok()
            .and_then(|p| p.identifier.clone());
        self.callbacks.dispatch(kind, index, identifier.as_deref());
        self.events.push(match kind {
            PageEventKind::Show => SlideshowEvent::PageShown { index, identifier },
            PageEventKind::Hide => SlideshowEvent::PageHidden { index, identifier },
        });
    }
}
