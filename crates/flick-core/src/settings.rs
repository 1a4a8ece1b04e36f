//! Keyboard preferences loaded from TOML.
//!
//! - `parse_settings_toml(toml)` parses and validates a user file
//! - `Settings::default()` clones the embedded defaults, parsed once
//! - Default values are embedded via `include_str!("default_settings.toml")`
//!
//! There is no process-wide mutable instance: whoever drives the keyboard owns
//! its `Settings` and hands the relevant parts to each component.

use std::sync::OnceLock;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

pub const PUNCTUATION_OPTION_COUNT: usize = 7;

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

fn embedded_defaults() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| match parse_settings_toml(DEFAULT_SETTINGS_TOML) {
        Ok(s) => s,
        // build.rs checks the syntax; the values are covered by tests.
        Err(e) => panic!("embedded default settings are invalid: {e}"),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    pub typing: TypingSettings,
    pub locale: LocaleSettings,
    pub suggestions: SuggestionSettings,
    pub gesture: GestureSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TypingSettings {
    pub autocorrect: bool,
    pub grammar_autocorrect: bool,
    pub autocapitalize: bool,
    pub punctuation: Vec<String>,
    pub sentence_end_ignore: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocaleSettings {
    pub enabled: Vec<String>,
    pub current: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuggestionSettings {
    pub history_depth: usize,
    pub max_suggestions: usize,
    pub learn_threshold: u32,
    pub context_window: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GestureSettings {
    pub long_press_ms: u64,
    pub repeat_ms: u64,
    pub swipe_fraction: f64,
    pub double_tap_ms: u64,
}

impl Settings {
    /// Characters that do not end a sentence. Entries are single characters
    /// after validation.
    pub fn sentence_end_ignore(&self) -> Vec<char> {
        self.typing
            .sentence_end_ignore
            .iter()
            .filter_map(|s| s.chars().next())
            .collect()
    }

    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string(self).map_err(|e| SettingsError::Parse(e.to_string()))
    }
}

impl GestureSettings {
    pub fn long_press(&self) -> Duration {
        Duration::from_millis(self.long_press_ms)
    }

    pub fn repeat(&self) -> Duration {
        Duration::from_millis(self.repeat_ms)
    }

    pub fn double_tap(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        embedded_defaults().clone()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.into(),
    }
}

pub fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(invalid(
                    concat!(stringify!($section), ".", stringify!($field)),
                    "must be positive",
                ));
            }
        };
    }

    let punctuation = &s.typing.punctuation;
    if punctuation.len() != PUNCTUATION_OPTION_COUNT {
        return Err(invalid(
            "typing.punctuation",
            format!("expected {PUNCTUATION_OPTION_COUNT} entries, got {}", punctuation.len()),
        ));
    }
    if let Some(bad) = punctuation.iter().find(|p| p.graphemes(true).count() != 1) {
        return Err(invalid(
            "typing.punctuation",
            format!("{bad:?} is not a single character"),
        ));
    }
    if let Some(bad) = s
        .typing
        .sentence_end_ignore
        .iter()
        .find(|p| p.chars().count() != 1)
    {
        return Err(invalid(
            "typing.sentence_end_ignore",
            format!("{bad:?} is not a single character"),
        ));
    }

    if s.locale.enabled.is_empty() {
        return Err(invalid("locale.enabled", "at least one locale is required"));
    }
    if !s.locale.enabled.contains(&s.locale.current) {
        return Err(invalid(
            "locale.current",
            format!("{:?} is not in locale.enabled", s.locale.current),
        ));
    }

    check_positive!(suggestions.history_depth);
    check_positive!(suggestions.max_suggestions);
    check_positive!(suggestions.learn_threshold);
    check_positive!(suggestions.context_window);

    check_positive!(gesture.long_press_ms);
    check_positive!(gesture.repeat_ms);
    check_positive!(gesture.double_tap_ms);
    let f = s.gesture.swipe_fraction;
    if !(f > 0.0 && f <= 1.0) {
        return Err(invalid("gesture.swipe_fraction", "must be in (0, 1]"));
    }

    Ok(())
}
