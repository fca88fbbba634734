//! Ordered, append-only collection of pages.

use serde::{Deserialize, Serialize};

use crate::error::SlideshowError;
use crate::ids::PageHandle;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Hidden,
    Visible,
}

/// What a host knows about a page when it is discovered or inserted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default)]
    pub identifier: Option<String>,
}

impl PageSpec {
    pub fn named(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    pub handle: PageHandle,
    pub identifier: Option<String>,
    pub visibility: Visibility,
}

/// Navigation target: a position or a page identifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageTarget {
    Index(i64),
    Id(String),
}

impl From<i64> for PageTarget {
    fn from(index: i64) -> Self {
        PageTarget::Index(index)
    }
}

impl From<usize> for PageTarget {
    fn from(index: usize) -> Self {
        PageTarget::Index(index as i64)
    }
}

impl From<&str> for PageTarget {
    fn from(id: &str) -> Self {
        PageTarget::Id(id.to_string())
    }
}

impl From<String> for PageTarget {
    fn from(id: String) -> Self {
        PageTarget::Id(id)
    }
}

/// Insertion order is display order is index order; indices stay contiguous.
#[derive(Clone, Debug, Default)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.pages.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Add a page at the end. Existing indices are unaffected.
    pub fn append(&mut self, handle: PageHandle, spec: PageSpec) -> usize {
        self.pages.push(Page {
            handle,
            identifier: spec.identifier,
            visibility: Visibility::Hidden,
        });
        self.pages.len() - 1
    }

    /// Index of the page with `identifier`. A leading `#` is ignored so
    /// selector-style ids (`"#intro"`) resolve too.
    pub fn index_of(&self, identifier: &str) -> Option<usize> {
        let wanted = identifier.strip_prefix('#').unwrap_or(identifier);
        self.pages
            .iter()
            .position(|p| p.identifier.as_deref() == Some(wanted))
    }

    /// Wrap any index (including negative) into `[0, size)`.
    pub fn normalize(&self, index: i64) -> Result<usize, SlideshowError> {
        if self.pages.is_empty() {
            return Err(SlideshowError::EmptyPageSet);
        }
        Ok(index.rem_euclid(self.pages.len() as i64) as usize)
    }

    /// Page at `index` modulo `size()`.
    pub fn at(&self, index: i64) -> Result<&Page, SlideshowError> {
        let idx = self.normalize(index)?;
        Ok(&self.pages[idx])
    }

    pub(crate) fn set_visibility(&mut self, index: usize, visibility: Visibility) {
        if let Some(page) = self.pages.get_mut(index) {
            page.visibility = visibility;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> PageSet {
        let mut set = PageSet::new();
        for (i, id) in ["a", "b", "c"].iter().enumerate() {
            set.append(PageHandle(i as u32), PageSpec::named(*id));
        }
        set
    }

    #[test]
    fn at_wraps_both_ways() {
        let set = abc();
        assert_eq!(set.at(3).unwrap().identifier.as_deref(), Some("a"));
        assert_eq!(set.at(-1).unwrap().identifier.as_deref(), Some("c"));
        assert_eq!(set.at(7).unwrap().handle, PageHandle(1));
    }

    #[test]
    fn index_of_accepts_selector_form() {
        let set = abc();
        assert_eq!(set.index_of("b"), Some(1));
        assert_eq!(set.index_of("#c"), Some(2));
        assert_eq!(set.index_of("missing"), None);
    }

    #[test]
    fn empty_set_is_rejected() {
        let set = PageSet::new();
        assert_eq!(set.normalize(0), Err(SlideshowError::EmptyPageSet));
        assert!(set.at(0).is_err());
    }

    #[test]
    fn append_keeps_existing_indices() {
        let mut set = abc();
        let idx = set.append(PageHandle(3), PageSpec::anonymous());
        assert_eq!(idx, 3);
        assert_eq!(set.index_of("a"), Some(0));
        assert_eq!(set.size(), 4);
        assert_eq!(set.at(3).unwrap().visibility, Visibility::Hidden);
    }
}
