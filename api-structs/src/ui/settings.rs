use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const SETTINGS_STORAGE_KEY: &str = "glint-settings";
pub const THEME_STORAGE_KEY: &str = "glint-theme";

pub const DEFAULT_REFRESH_INTERVAL_MS: u32 = 30_000;
pub const REFRESH_INTERVAL_OPTIONS_MS: [u32; 4] = [5_000, 10_000, 30_000, 60_000];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(alias = "autoRefresh")]
    pub auto_refresh: bool,
    #[serde(alias = "refreshInterval")]
    pub refresh_interval_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_refresh: false,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Reads whatever was stored, partial objects keep defaults for missing fields.
    pub fn from_stored(stored: Option<&str>) -> Self {
        let Some(stored) = stored else {
            return Self::default();
        };
        match serde_json::from_str::<Settings>(stored) {
            Ok(settings) => settings.sanitized(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored settings");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn sanitized(mut self) -> Self {
        if self.refresh_interval_ms == 0 {
            self.refresh_interval_ms = DEFAULT_REFRESH_INTERVAL_MS;
        }
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Theme actually drawn once the system preference is known.
    pub fn resolve(&self, system_prefers_dark: bool) -> Theme {
        match self {
            Theme::System if system_prefers_dark => Theme::Dark,
            Theme::System => Theme::Light,
            other => *other,
        }
    }

    pub fn from_stored(stored: Option<&str>) -> Self {
        stored.and_then(|s| s.parse().ok()).unwrap_or_default()
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_or_broken_settings_fall_back_to_defaults() {
        assert_eq!(Settings::from_stored(None), Settings::default());
        assert_eq!(Settings::from_stored(Some("{not json")), Settings::default());
        assert_eq!(
            Settings::from_stored(Some(r#"{"refresh_interval_ms": 0}"#)),
            Settings::default()
        );
    }

    #[test]
    fn partial_settings_keep_defaults_for_missing_fields() {
        let settings = Settings::from_stored(Some(r#"{"auto_refresh": true}"#));
        assert!(settings.auto_refresh);
        assert_eq!(settings.refresh_interval_ms, 30_000);

        let stored = Settings {
            auto_refresh: true,
            refresh_interval_ms: 5_000,
        };
        assert_eq!(Settings::from_stored(Some(&stored.to_json())), stored);
    }

    #[test]
    fn theme_parsing_and_resolution() {
        assert_eq!(Theme::from_stored(Some("dark")), Theme::Dark);
        assert_eq!(Theme::from_stored(Some("neon")), Theme::System);
        assert_eq!(Theme::from_stored(None), Theme::System);
        assert_eq!(Theme::System.resolve(true), Theme::Dark);
        assert_eq!(Theme::System.resolve(false), Theme::Light);
        assert_eq!(Theme::Light.resolve(true), Theme::Light);
    }
}
