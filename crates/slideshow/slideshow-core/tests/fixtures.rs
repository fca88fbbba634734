use slideshow_core::{
    settle, AutoplayDirection, PageSpec, RecordingHost, Settings, Slideshow, SlideshowError,
    TransitionKind,
};
use slideshow_test_fixtures::{page_sets, settings};

fn host_for(name: &str) -> RecordingHost {
    let mut host = RecordingHost::with_pages(Vec::<String>::new());
    host.initial_pages = page_sets::load::<Vec<PageSpec>>(name).unwrap();
    host
}

#[test]
fn settings_fixtures_parse() {
    let defaults = Settings::from_json(&settings::json("defaults").unwrap()).unwrap();
    assert_eq!(defaults, Settings::default());

    let carousel = Settings::from_json(&settings::json("carousel-backwards").unwrap()).unwrap();
    assert_eq!(carousel.transition, TransitionKind::Carousel);
    assert_eq!(carousel.transition_duration, 250);
    assert_eq!(carousel.auto_play_direction, AutoplayDirection::Backwards);

    let invalid = Settings::from_json(&settings::json("invalid-delay").unwrap());
    assert!(matches!(invalid, Err(SlideshowError::InvalidSettings(_))));
}

#[test]
fn gallery_resolves_named_and_anonymous_pages() {
    let ss = Slideshow::new(Settings::default(), host_for("gallery")).unwrap();
    let pages = ss.pages();
    assert_eq!(pages.size(), 5);
    assert_eq!(pages.index_of("sunset"), Some(2));
    assert_eq!(pages.index_of("credits"), Some(4));
    assert_eq!(pages.at(1).unwrap().identifier, None);
    assert_eq!(pages.at(3).unwrap().identifier, None);
}

#[test]
fn alternate_fixture_plays_on_first_display() {
    let cfg = Settings::from_json(&settings::json("alternate-fast").unwrap()).unwrap();
    let mut ss = Slideshow::new(cfg, host_for("abc")).unwrap();
    ss.go_to("c", None).unwrap();
    settle(&mut ss);
    assert!(ss.state().play_reverse);

    let due = ss.host_mut().advance(100);
    assert_eq!(due.len(), 1);
    ss.on_timer_fired(due[0]).unwrap();
    settle(&mut ss);
    assert_eq!(ss.current_index(), Some(1));
}
