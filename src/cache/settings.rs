//! Persisted user settings.

use serde::{Deserialize, Serialize};

/// Theme applied when none was chosen.
pub const DEFAULT_THEME: &str = "duolingo";

/// The `settings` record.
///
/// Missing fields fall back to their defaults when an older record is read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Cache lookups automatically. Honoured by the lookup orchestrator.
    pub auto_save: bool,

    /// Advisory maximum entry age in days. Nothing is evicted automatically.
    pub max_cache_age: u32,

    /// Presentation theme identifier; opaque to the cache.
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_save: true,
            max_cache_age: 30,
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

/// Partial update for [`Settings`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_save: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_cache_age: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl SettingsPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.auto_save.is_none() && self.max_cache_age.is_none() && self.theme.is_none()
    }

    /// Merge this patch over `settings`.
    #[must_use]
    pub fn apply(self, mut settings: Settings) -> Settings {
        if let Some(auto_save) = self.auto_save {
            settings.auto_save = auto_save;
        }
        if let Some(max_cache_age) = self.max_cache_age {
            settings.max_cache_age = max_cache_age;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
        settings
    }
}
