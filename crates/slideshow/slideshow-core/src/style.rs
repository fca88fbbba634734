//! Declarative presentation styles and motion primitives.
//!
//! Hosts render these maps verbatim (CSS property -> value), so every host
//! produces the same initial layout and the same fade/slide effects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::TransitionKind;
use crate::ids::PageHandle;

/// Ordered property -> value map.
pub type StyleMap = IndexMap<String, String>;

fn style(pairs: &[(&str, &str)]) -> StyleMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleTarget {
    Container,
    Page(PageHandle),
}

/// Styles applied to the container once at construction.
pub fn container_style(kind: TransitionKind) -> StyleMap {
    let mut map = style(&[("position", "relative")]);
    if kind == TransitionKind::Carousel {
        map.insert("overflow".into(), "hidden".into());
    }
    map
}

/// Styles applied to every page at construction and on append.
pub fn page_style(kind: TransitionKind) -> StyleMap {
    let mut map = style(&[
        ("display", "none"),
        ("width", "100%"),
        ("top", "0px"),
        ("left", "0px"),
    ]);
    if kind == TransitionKind::Carousel {
        map.insert("position".into(), "absolute".into());
    }
    map
}

/// Horizontal side of the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn offset(self) -> &'static str {
        match self {
            Side::Left => "-100%",
            Side::Right => "100%",
        }
    }
}

/// One animated effect on one page.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Motion {
    FadeIn,
    FadeOut,
    /// Becomes visible in place without animating.
    Appear,
    SlideIn { from: Side },
    SlideOut { toward: Side },
}

impl Motion {
    /// Applied before the animation starts.
    pub fn start_style(&self) -> StyleMap {
        match self {
            Motion::FadeIn => style(&[("display", "block"), ("opacity", "0")]),
            Motion::FadeOut => StyleMap::new(),
            Motion::Appear => style(&[("display", "block"), ("left", "0px")]),
            Motion::SlideIn { from } => style(&[("display", "block"), ("left", from.offset())]),
            Motion::SlideOut { .. } => style(&[("display", "block"), ("left", "0px")]),
        }
    }

    /// Animation frames, first to last. Empty for [`Motion::Appear`].
    pub fn keyframes(&self) -> Vec<StyleMap> {
        match self {
            Motion::FadeIn => vec![style(&[("opacity", "0")]), style(&[("opacity", "1")])],
            Motion::FadeOut => vec![style(&[("opacity", "1")]), style(&[("opacity", "0")])],
            Motion::Appear => Vec::new(),
            Motion::SlideIn { from } => vec![
                style(&[("left", from.offset())]),
                style(&[("left", "0%")]),
            ],
            Motion::SlideOut { toward } => vec![
                style(&[("left", "0%")]),
                style(&[("left", toward.offset())]),
            ],
        }
    }

    /// Applied once the animation has finished.
    pub fn end_style(&self) -> StyleMap {
        match self {
            Motion::FadeIn => style(&[("opacity", "1")]),
            Motion::FadeOut => style(&[("display", "none"), ("opacity", "1")]),
            Motion::Appear => StyleMap::new(),
            Motion::SlideIn { .. } => style(&[("left", "0px")]),
            Motion::SlideOut { .. } => style(&[("display", "none"), ("left", "0px")]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carousel_adds_positioning() {
        assert!(!container_style(TransitionKind::CrossFade).contains_key("overflow"));
        assert_eq!(
            container_style(TransitionKind::Carousel).get("overflow").map(String::as_str),
            Some("hidden")
        );
        assert_eq!(
            page_style(TransitionKind::Carousel).get("position").map(String::as_str),
            Some("absolute")
        );
        let keys: Vec<_> = page_style(TransitionKind::CrossFade).into_keys().collect();
        assert_eq!(keys, ["display", "width", "top", "left"]);
    }

    #[test]
    fn slide_frames_follow_side() {
        let frames = Motion::SlideIn { from: Side::Left }.keyframes();
        assert_eq!(frames[0]["left"], "-100%");
        assert_eq!(frames[1]["left"], "0%");
        let frames = Motion::SlideOut { toward: Side::Right }.keyframes();
        assert_eq!(frames[1]["left"], "100%");
    }

    #[test]
    fn outgoing_motions_end_hidden() {
        assert_eq!(Motion::FadeOut.end_style()["display"], "none");
        assert_eq!(
            Motion::SlideOut { toward: Side::Left }.end_style()["display"],
            "none"
        );
        assert!(!Motion::SlideIn { from: Side::Left }.end_style().contains_key("display"));
        assert!(Motion::Appear.keyframes().is_empty());
    }
}
