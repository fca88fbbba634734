//! Error types for the slideshow core.

use thiserror::Error;

/// Errors surfaced by slideshow construction and navigation.
///
/// Dropped commands (blocked, unknown identifier, same page) are not errors;
/// they are reported as [`crate::Navigation::Ignored`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SlideshowError {
    /// Carousel transitions were configured on a container without a definite size.
    #[error("carousel transition requires a container with a definite size")]
    IndeterminateContainerSize,

    /// A navigation command was issued while the page set is empty.
    #[error("slideshow has no pages to navigate")]
    EmptyPageSet,

    /// Settings failed validation.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings JSON could not be parsed.
    #[error("settings parse error: {0}")]
    SettingsParse(String),

    /// The host rejected an operation (e.g. page insertion).
    #[error("host error: {0}")]
    Host(String),
}
