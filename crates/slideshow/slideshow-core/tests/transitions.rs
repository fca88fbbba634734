use std::cell::RefCell;
use std::rc::Rc;

use slideshow_core::{
    settle, AnimationTicket, Direction, DirectionHint, Launch, Motion, PageCallbacks, PageHandle,
    PageMatcher, Phase, RecordingHost, Settings, Side, Slideshow, SlideshowError, StyleTarget,
    TransitionCtx, TransitionKind, TransitionStatus, TransitionStrategy, Visibility,
};

/// Completes every transition inside `launch` without touching the animator.
#[derive(Debug, Default)]
struct Immediate {
    launches: Rc<RefCell<Vec<Launch>>>,
}

impl TransitionStrategy for Immediate {
    fn launch(&mut self, launch: Launch, _ctx: &mut TransitionCtx<'_>) -> TransitionStatus {
        self.launches.borrow_mut().push(launch);
        TransitionStatus::Settled
    }

    fn advance(
        &mut self,
        _ticket: AnimationTicket,
        _ctx: &mut TransitionCtx<'_>,
    ) -> TransitionStatus {
        TransitionStatus::Stale
    }
}

fn carousel() -> Settings {
    Settings {
        transition: TransitionKind::Carousel,
        transition_duration: 300,
        ..Settings::default()
    }
}

#[test]
fn carousel_requires_definite_container() {
    let host = RecordingHost::with_pages(["a", "b"]).without_size();
    assert_eq!(
        Slideshow::new(carousel(), host).unwrap_err(),
        SlideshowError::IndeterminateContainerSize
    );

    let mut host = RecordingHost::with_pages(["a", "b"]);
    host.size = Some(slideshow_core::ContainerSize {
        width: 0.0,
        height: 200.0,
    });
    assert!(Slideshow::new(carousel(), host).is_err());

    // cross-fade does not care
    let host = RecordingHost::with_pages(["a", "b"]).without_size();
    assert!(Slideshow::new(Settings::default(), host).is_ok());
}

#[test]
fn initial_styles_cover_container_and_pages() {
    let ss = Slideshow::new(carousel(), RecordingHost::with_pages(["a", "b"])).unwrap();
    let styles = &ss.host().styles;
    assert_eq!(styles.len(), 3);
    assert_eq!(styles[0].0, StyleTarget::Container);
    assert_eq!(styles[0].1["position"], "relative");
    assert_eq!(styles[0].1["overflow"], "hidden");
    for (i, (target, style)) in styles[1..].iter().enumerate() {
        assert_eq!(*target, StyleTarget::Page(PageHandle(i as u32)));
        assert_eq!(style["display"], "none");
        assert_eq!(style["width"], "100%");
        assert_eq!(style["position"], "absolute");
    }
}

#[test]
fn carousel_first_display_appears_without_sliding() {
    let mut ss = Slideshow::new(carousel(), RecordingHost::with_pages(["a", "b"])).unwrap();
    ss.go_to(1usize, None).unwrap();
    let pending = ss.host().pending_animations();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].duration_ms, 0);
    assert_eq!(pending[0].tracks, vec![(PageHandle(1), Motion::Appear)]);
}

#[test]
fn carousel_slides_in_direction_of_travel() {
    let mut ss = Slideshow::new(carousel(), RecordingHost::with_pages(["a", "b", "c"])).unwrap();
    ss.go_to(0usize, None).unwrap();
    settle(&mut ss);

    ss.next_page().unwrap();
    let req = ss.host_mut().take_animations().remove(0);
    assert_eq!(req.duration_ms, 300);
    assert_eq!(
        req.tracks,
        vec![
            (PageHandle(0), Motion::SlideOut { toward: Side::Left }),
            (PageHandle(1), Motion::SlideIn { from: Side::Right }),
        ]
    );
    assert_eq!(ss.on_animation_complete(req.ticket), TransitionStatus::Settled);

    ss.prev_page().unwrap();
    let req = ss.host_mut().take_animations().remove(0);
    assert_eq!(
        req.tracks,
        vec![
            (PageHandle(1), Motion::SlideOut { toward: Side::Right }),
            (PageHandle(0), Motion::SlideIn { from: Side::Left }),
        ]
    );
}

#[test]
fn crossfade_shows_only_after_fade_in_completes() {
    let shown = Rc::new(RefCell::new(Vec::new()));
    let sink = shown.clone();
    let callbacks =
        PageCallbacks::new().on_show(PageMatcher::Any, move |i, _| sink.borrow_mut().push(i));
    let mut ss = Slideshow::new(Settings::default(), RecordingHost::with_pages(["a", "b"]))
        .unwrap()
        .with_callbacks(callbacks);
    ss.go_to(0usize, None).unwrap();
    settle(&mut ss);
    shown.borrow_mut().clear();

    ss.next_page().unwrap();
    let fade_out = ss.host_mut().take_animations();
    assert_eq!(fade_out.len(), 1);
    assert_eq!(fade_out[0].tracks, vec![(PageHandle(0), Motion::FadeOut)]);
    assert_eq!(
        ss.on_animation_complete(fade_out[0].ticket),
        TransitionStatus::Pending
    );
    assert!(shown.borrow().is_empty());
    assert!(ss.state().blocking);

    let fade_in = ss.host_mut().take_animations();
    assert_eq!(fade_in[0].tracks, vec![(PageHandle(1), Motion::FadeIn)]);
    assert_eq!(fade_in[0].duration_ms, 400);
    assert_eq!(
        ss.on_animation_complete(fade_in[0].ticket),
        TransitionStatus::Settled
    );
    assert_eq!(*shown.borrow(), [1]);
    assert!(!ss.state().blocking);
}

#[test]
fn stale_or_duplicate_completions_are_ignored() {
    let mut ss = Slideshow::new(Settings::default(), RecordingHost::with_pages(["a", "b"])).unwrap();
    assert_eq!(
        ss.on_animation_complete(AnimationTicket(7)),
        TransitionStatus::Stale
    );
    ss.go_to(0usize, None).unwrap();
    let done = settle(&mut ss);
    assert_eq!(
        ss.on_animation_complete(done[0]),
        TransitionStatus::Stale
    );
    ss.next_page().unwrap();
    assert_eq!(
        ss.on_animation_complete(AnimationTicket(99)),
        TransitionStatus::Stale
    );
    assert!(ss.state().blocking);
}

#[test]
fn strategy_settling_on_launch_completes_the_command() {
    let shown = Rc::new(RefCell::new(Vec::new()));
    let sink = shown.clone();
    let strategy = Immediate::default();
    let launches = strategy.launches.clone();
    let settings = Settings {
        auto_play: true,
        ..Settings::default()
    };
    let mut ss = Slideshow::new(settings, RecordingHost::with_pages(["a", "b", "c"]))
        .unwrap()
        .with_strategy(Box::new(strategy))
        .with_callbacks(
            PageCallbacks::new().on_show(PageMatcher::Any, move |i, _| sink.borrow_mut().push(i)),
        );

    assert!(ss.next_page().unwrap().launched());
    assert_eq!(ss.phase(), Phase::Idle);
    assert_eq!(*shown.borrow(), [0]);
    assert!(ss.host().pending_animations().is_empty());
    assert_eq!(ss.host().scheduled().len(), 1);

    ss.go_to(2usize, Some(DirectionHint::Intelligent)).unwrap();
    assert!(!ss.state().blocking);
    assert_eq!(*shown.borrow(), [0, 2]);
    assert_eq!(ss.pages().at(0).unwrap().visibility, Visibility::Hidden);
    assert_eq!(ss.pages().at(2).unwrap().visibility, Visibility::Visible);
    assert_eq!(ss.host().scheduled().len(), 1);

    let launches = launches.borrow();
    assert_eq!(launches.len(), 2);
    assert_eq!(launches[1].outgoing, Some(PageHandle(0)));
    assert_eq!(launches[1].incoming, PageHandle(2));
    assert_eq!(launches[1].direction, Direction::Backward);
}
