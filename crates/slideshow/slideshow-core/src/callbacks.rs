//! Per-page show/hide callbacks.
//!
//! Each registration pairs a [`PageMatcher`] with a function of
//! `(index, identifier)`. Every matching registration runs once per event.
//! There are no implicit defaults.

use std::fmt;

pub type PageCallback = Box<dyn FnMut(usize, Option<&str>)>;
pub type PagePredicate = Box<dyn Fn(usize, Option<&str>) -> bool>;

pub enum PageMatcher {
    Any,
    Id(String),
    Predicate(PagePredicate),
}

impl PageMatcher {
    pub fn id(identifier: impl Into<String>) -> Self {
        let identifier = identifier.into();
        match identifier.strip_prefix('#') {
            Some(stripped) => PageMatcher::Id(stripped.to_string()),
            None => PageMatcher::Id(identifier),
        }
    }

    pub fn predicate(f: impl Fn(usize, Option<&str>) -> bool + 'static) -> Self {
        PageMatcher::Predicate(Box::new(f))
    }

    pub fn matches(&self, index: usize, identifier: Option<&str>) -> bool {
        match self {
            PageMatcher::Any => true,
            PageMatcher::Id(id) => identifier == Some(id.as_str()),
            PageMatcher::Predicate(f) => f(index, identifier),
        }
    }
}

impl fmt::Debug for PageMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMatcher::Any => f.write_str("Any"),
            PageMatcher::Id(id) => f.debug_tuple("Id").field(id).finish(),
            PageMatcher::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PageEventKind {
    Show,
    Hide,
}

#[derive(Default)]
pub struct PageCallbacks {
    show: Vec<(PageMatcher, PageCallback)>,
    hide: Vec<(PageMatcher, PageCallback)>,
}

impl PageCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_show(
        mut self,
        matcher: PageMatcher,
        f: impl FnMut(usize, Option<&str>) + 'static,
    ) -> Self {
        self.show.push((matcher, Box::new(f)));
        self
    }

    pub fn on_hide(
        mut self,
        matcher: PageMatcher,
        f: impl FnMut(usize, Option<&str>) + 'static,
    ) -> Self {
        self.hide.push((matcher, Box::new(f)));
        self
    }

    pub fn dispatch(&mut self, kind: PageEventKind, index: usize, identifier: Option<&str>) {
        let entries = match kind {
            PageEventKind::Show => &mut self.show,
            PageEventKind::Hide => &mut self.hide,
        };
        for (matcher, callback) in entries.iter_mut() {
            if matcher.matches(index, identifier) {
                callback(index, identifier);
            }
        }
    }
}

impl fmt::Debug for PageCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageCallbacks")
            .field("show", &self.show.iter().map(|(m, _)| m).collect::<Vec<_>>())
            .field("hide", &self.hide.iter().map(|(m, _)| m).collect::<Vec<_>>())
            .finish()
    }
}
