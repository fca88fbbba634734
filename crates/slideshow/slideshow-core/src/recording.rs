//! Headless host that records every request and runs timers on a manual clock.
//!
//! Used by tests and by native embedders that drive rendering themselves:
//! pull pending animations with [`RecordingHost::take_animations`], report
//! them back, and move time forward with [`RecordingHost::advance`].

use std::collections::HashMap;

use crate::controller::Slideshow;
use crate::host::{Animator, AnimationRequest, ContainerSize, Stage, Timers};
use crate::ids::{AnimationTicket, PageHandle, TimerHandle};
use crate::page_set::PageSpec;
use crate::style::{StyleMap, StyleTarget};

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub size: Option<ContainerSize>,
    pub initial_pages: Vec<PageSpec>,
    /// Every style application, in order.
    pub styles: Vec<(StyleTarget, StyleMap)>,
    /// Every animation request, in order (including completed ones).
    pub history: Vec<AnimationRequest>,
    pending: Vec<AnimationRequest>,
    /// Markup passed to `insert_page`, keyed by handle.
    pub inserted: HashMap<PageHandle, String>,
    pub cancelled: Vec<TimerHandle>,
    timers: Vec<(TimerHandle, u64)>,
    now_ms: u64,
    pub reject_inserts: bool,
}

impl RecordingHost {
    /// Host whose container holds pages with the given identifiers.
    pub fn with_pages<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            size: Some(ContainerSize {
                width: 640.0,
                height: 480.0,
            }),
            initial_pages: ids.into_iter().map(PageSpec::named).collect(),
            ..Self::default()
        }
    }

    pub fn without_size(mut self) -> Self {
        self.size = None;
        self
    }

    pub fn pending_animations(&self) -> &[AnimationRequest] {
        &self.pending
    }

    pub fn take_animations(&mut self) -> Vec<AnimationRequest> {
        std::mem::take(&mut self.pending)
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Live timers as `(handle, due_ms)`.
    pub fn scheduled(&self) -> &[(TimerHandle, u64)] {
        &self.timers
    }

    /// Move the clock forward and return timers that came due, earliest first.
    pub fn advance(&mut self, ms: u64) -> Vec<TimerHandle> {
        self.now_ms += ms;
        let now = self.now_ms;
        let (mut due, live): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|(_, at)| *at <= now);
        self.timers = live;
        due.sort_by_key(|(_, at)| *at);
        due.into_iter().map(|(h, _)| h).collect()
    }
}

impl Stage for RecordingHost {
    fn container_size(&self) -> Option<ContainerSize> {
        self.size
    }

    fn discover_pages(&mut self) -> Vec<PageSpec> {
        self.initial_pages.clone()
    }

    fn apply_style(&mut self, target: StyleTarget, style: &StyleMap) {
        self.styles.push((target, style.clone()));
    }

    fn insert_page(&mut self, handle: PageHandle, markup: &str) -> Result<PageSpec, String> {
        if self.reject_inserts {
            return Err(format!("cannot insert {markup:?}"));
        }
        self.inserted.insert(handle, markup.to_string());
        Ok(PageSpec {
            identifier: markup_id(markup),
        })
    }
}

impl Animator for RecordingHost {
    fn animate(&mut self, request: AnimationRequest) {
        self.history.push(request.clone());
        self.pending.push(request);
    }
}

impl Timers for RecordingHost {
    fn schedule(&mut self, handle: TimerHandle, delay_ms: u32) {
        self.timers.push((handle, self.now_ms + u64::from(delay_ms)));
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|(h, _)| *h != handle);
        self.cancelled.push(handle);
    }
}

/// Pull an `id="..."` attribute out of page markup, if present.
fn markup_id(markup: &str) -> Option<String> {
    // `data-id="..."` and friends end in `id=` too; the attribute must stand alone.
    let (at, attr) = markup
        .match_indices("id=\"")
        .find(|(at, _)| markup[..*at].ends_with(char::is_whitespace))?;
    let start = at + attr.len();
    let len = markup[start..].find('"')?;
    let id = &markup[start..start + len];
    (!id.is_empty()).then(|| id.to_string())
}

/// Complete every pending animation (including ones issued as a result)
/// until the slideshow stops requesting more. Returns the tickets completed.
pub fn settle(slideshow: &mut Slideshow<RecordingHost>) -> Vec<AnimationTicket> {
    let mut done = Vec::new();
    loop {
        let batch = slideshow.host_mut().take_animations();
        if batch.is_empty() {
            return done;
        }
        for request in batch {
            slideshow.on_animation_complete(request.ticket);
            done.push(request.ticket);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_id_extraction() {
        assert_eq!(
            markup_id(r#"<div class="page" id="extra">x</div>"#).as_deref(),
            Some("extra")
        );
        assert_eq!(markup_id("<div class=\"page\"></div>"), None);
        assert_eq!(
            markup_id(r#"<div data-id="x" id="y"></div>"#).as_deref(),
            Some("y")
        );
        assert_eq!(markup_id(r#"<div data-id="x"></div>"#), None);
        assert_eq!(markup_id(r#"<div id=""></div>"#), None);
    }

    #[test]
    fn manual_clock_fires_due_timers_in_order() {
        let mut host = RecordingHost::default();
        host.schedule(TimerHandle(0), 300);
        host.schedule(TimerHandle(1), 100);
        host.schedule(TimerHandle(2), 500);
        host.cancel(TimerHandle(2));
        assert!(host.advance(50).is_empty());
        assert_eq!(host.advance(300), vec![TimerHandle(1), TimerHandle(0)]);
        assert!(host.advance(1000).is_empty());
        assert_eq!(host.now_ms(), 1350);
    }
}
