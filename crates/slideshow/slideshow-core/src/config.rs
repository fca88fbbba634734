//! Slideshow settings, overrides, and derived autoplay state.
//!
//! `Settings` is an immutable value: `start()` produces a new one through
//! [`Settings::merged`] and the derived `play_reverse` flag is recomputed from it.

use serde::{Deserialize, Serialize};

use crate::error::SlideshowError;

/// Default duration of one transition phase, in milliseconds.
pub const DEFAULT_TRANSITION_MS: u32 = 400;
/// Default delay between autoplay steps, in milliseconds.
pub const DEFAULT_AUTO_PLAY_DELAY_MS: u32 = 3000;

/// Visual handoff style, fixed for the lifetime of a slideshow.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    #[default]
    #[serde(rename = "x-fade", alias = "xfade", alias = "cross-fade")]
    CrossFade,
    #[serde(rename = "carousel")]
    Carousel,
}

/// Direction policy for autoplay.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoplayDirection {
    #[default]
    Forwards,
    Backwards,
    /// Reverse direction each time the first or last page is reached.
    Alternate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(rename = "transition_type")]
    pub transition: TransitionKind,
    /// Duration of one transition phase in milliseconds.
    pub transition_duration: u32,
    pub auto_play: bool,
    /// Milliseconds between a settled transition and the next autoplay step.
    pub auto_play_delay: u32,
    pub auto_play_direction: AutoplayDirection,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            transition: TransitionKind::CrossFade,
            transition_duration: DEFAULT_TRANSITION_MS,
            auto_play: false,
            auto_play_delay: DEFAULT_AUTO_PLAY_DELAY_MS,
            auto_play_direction: AutoplayDirection::Forwards,
        }
    }
}

/// Partial settings accepted by `start()`. Absent fields keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsOverrides {
    pub transition_duration: Option<u32>,
    pub auto_play: Option<bool>,
    pub auto_play_delay: Option<u32>,
    pub auto_play_direction: Option<AutoplayDirection>,
}

impl Settings {
    /// Parse settings from a JSON document; missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, SlideshowError> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| SlideshowError::SettingsParse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SlideshowError> {
        if self.auto_play_delay == 0 {
            return Err(SlideshowError::InvalidSettings(
                "auto_play_delay must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Return a copy with every present override applied.
    pub fn merged(&self, overrides: &SettingsOverrides) -> Settings {
        Settings {
            transition: self.transition,
            transition_duration: overrides
                .transition_duration
                .unwrap_or(self.transition_duration),
            auto_play: overrides.auto_play.unwrap_or(self.auto_play),
            auto_play_delay: overrides.auto_play_delay.unwrap_or(self.auto_play_delay),
            auto_play_direction: overrides
                .auto_play_direction
                .unwrap_or(self.auto_play_direction),
        }
    }

    pub fn with_auto_play(&self, auto_play: bool) -> Settings {
        Settings {
            auto_play,
            ..self.clone()
        }
    }
}

/// Autoplay direction implied by the configured mode before any bounce.
pub fn initial_play_reverse(direction: AutoplayDirection) -> bool {
    matches!(direction, AutoplayDirection::Backwards)
}

/// Flip the autoplay direction whenever an alternating slideshow lands on
/// its first or last page. Other modes keep the flag as is.
pub fn bounced_play_reverse(
    play_reverse: bool,
    direction: AutoplayDirection,
    index: usize,
    len: usize,
) -> bool {
    let boundary = index == 0 || index + 1 == len;
    if direction == AutoplayDirection::Alternate && boundary {
        !play_reverse
    } else {
        play_reverse
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_json() {
        let s = Settings::from_json("{}").unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.transition_duration, 400);
        assert_eq!(s.auto_play_delay, 3000);
    }

    #[test]
    fn parses_option_names() {
        let s = Settings::from_json(
            r#"{"transition_type":"carousel","auto_play":true,"auto_play_delay":250,"auto_play_direction":"alternate"}"#,
        )
        .unwrap();
        assert_eq!(s.transition, TransitionKind::Carousel);
        assert!(s.auto_play);
        assert_eq!(s.auto_play_delay, 250);
        assert_eq!(s.auto_play_direction, AutoplayDirection::Alternate);
    }

    #[test]
    fn rejects_zero_delay_and_bad_json() {
        assert!(matches!(
            Settings::from_json(r#"{"auto_play_delay":0}"#),
            Err(SlideshowError::InvalidSettings(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{"transition_type":"wipe"}"#),
            Err(SlideshowError::SettingsParse(_))
        ));
    }

    #[test]
    fn merge_is_pure() {
        let base = Settings::default();
        let merged = base.merged(&SettingsOverrides {
            auto_play_delay: Some(100),
            ..Default::default()
        });
        assert_eq!(base.auto_play_delay, 3000);
        assert_eq!(merged.auto_play_delay, 100);
        assert_eq!(merged.auto_play_direction, base.auto_play_direction);
    }

    #[test]
    fn reverse_derivation_and_bounce() {
        assert!(!initial_play_reverse(AutoplayDirection::Forwards));
        assert!(initial_play_reverse(AutoplayDirection::Backwards));
        assert!(!initial_play_reverse(AutoplayDirection::Alternate));

        let alt = AutoplayDirection::Alternate;
        assert!(bounced_play_reverse(false, alt, 2, 3));
        assert!(!bounced_play_reverse(true, alt, 2, 3));
        assert!(bounced_play_reverse(false, alt, 0, 3));
        assert!(!bounced_play_reverse(true, alt, 0, 3));
        assert!(bounced_play_reverse(true, alt, 1, 3));
        assert!(!bounced_play_reverse(false, alt, 1, 3));
        // one page is both ends
        assert!(bounced_play_reverse(false, alt, 0, 1));
        assert!(!bounced_play_reverse(false, AutoplayDirection::Forwards, 2, 3));
        assert!(bounced_play_reverse(true, AutoplayDirection::Backwards, 0, 3));
    }
}
