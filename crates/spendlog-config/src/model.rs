use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Stores user-configurable preferences for the tracker shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_first_weekday")]
    pub first_weekday: Weekday,
    #[serde(default = "Config::default_category_value")]
    pub default_category: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default)]
    pub notices: NoticeSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            first_weekday: Self::default_first_weekday(),
            default_category: Self::default_category_value(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            notices: NoticeSettings::default(),
        }
    }
}

impl Config {
    /// Keys accepted by [`Config::set`].
    pub const KEYS: [&'static str; 6] = [
        "currency",
        "week-start",
        "default-category",
        "color",
        "added-notice-ms",
        "undo-window-ms",
    ];

    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_first_weekday() -> Weekday {
        Weekday::Sun
    }

    pub fn default_category_value() -> String {
        "Other".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    /// Updates one setting from its textual form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = || ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
        };
        let trimmed = value.trim();
        match key.to_ascii_lowercase().as_str() {
            "currency" if !trimmed.is_empty() => self.currency_symbol = trimmed.to_string(),
            "week-start" => self.first_weekday = trimmed.parse().map_err(|_| invalid())?,
            "default-category" if !trimmed.is_empty() => {
                self.default_category = trimmed.to_string()
            }
            "color" => self.ui_color_enabled = parse_flag(trimmed).ok_or_else(invalid)?,
            "added-notice-ms" => {
                self.notices.added_notice_ms =
                    NoticeSettings::parse_duration(trimmed).ok_or_else(invalid)?
            }
            "undo-window-ms" => {
                self.notices.undo_window_ms =
                    NoticeSettings::parse_duration(trimmed).ok_or_else(invalid)?
            }
            other if Self::KEYS.contains(&other) => return Err(invalid()),
            other => return Err(ConfigError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    /// Lists every setting with its current value, in [`Config::KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency", self.currency_symbol.clone()),
            ("week-start", self.first_weekday.to_string()),
            ("default-category", self.default_category.clone()),
            ("color", if self.ui_color_enabled { "on" } else { "off" }.into()),
            ("added-notice-ms", self.notices.added_notice_ms.to_string()),
            ("undo-window-ms", self.notices.undo_window_ms.to_string()),
        ]
    }
}

/// How long transient notices stay visible, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeSettings {
    #[serde(default = "NoticeSettings::default_added_notice_ms")]
    pub added_notice_ms: u64,
    #[serde(default = "NoticeSettings::default_undo_window_ms")]
    pub undo_window_ms: u64,
}

impl NoticeSettings {
    /// Longest accepted notice duration: one hour.
    pub const MAX_MS: u64 = 3_600_000;

    pub fn default_added_notice_ms() -> u64 {
        2_500
    }

    pub fn default_undo_window_ms() -> u64 {
        5_000
    }

    fn parse_duration(value: &str) -> Option<u64> {
        value.parse().ok().filter(|ms| *ms <= Self::MAX_MS)
    }
}

impl Default for NoticeSettings {
    fn default() -> Self {
        Self {
            added_notice_ms: Self::default_added_notice_ms(),
            undo_window_ms: Self::default_undo_window_ms(),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
