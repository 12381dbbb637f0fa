// Airmap Settings Module
// User-tunable timing and feature toggles for the keymap engine

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default tapping term in milliseconds
pub const DEFAULT_TAPPING_TERM_MS: u64 = 200;
/// Default chord-combo window in milliseconds
pub const DEFAULT_COMBO_TERM_MS: u64 = 50;
/// Default auto-shift hold threshold in milliseconds
pub const DEFAULT_AUTO_SHIFT_TIMEOUT_MS: u64 = 175;
/// Default caps-word idle timeout in milliseconds
pub const DEFAULT_CAPS_WORD_IDLE_MS: u64 = 5000;

/// Settings loaded from a TOML file (default:
/// ~/.config/airmap/settings.toml).
#[derive(Debug, Clone)]
pub struct Settings {
    tapping_term_ms: u64,
    combo_term_ms: u64,
    auto_shift_timeout_ms: u64,
    caps_word_idle_ms: u64,
    auto_shift: bool,
    game_mode: bool,

    /// Path the settings came from (for reload)
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, serde::Deserialize, Default)]
struct SettingsToml {
    #[serde(default)]
    timing: Option<TimingToml>,

    #[serde(default)]
    features: Option<FeaturesToml>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct TimingToml {
    #[serde(default)]
    tapping_term_ms: Option<u64>,

    #[serde(default)]
    combo_term_ms: Option<u64>,

    #[serde(default)]
    auto_shift_timeout_ms: Option<u64>,

    #[serde(default)]
    caps_word_idle_ms: Option<u64>,
}

#[derive(Debug, Clone, serde::Deserialize, Default)]
struct FeaturesToml {
    #[serde(default)]
    auto_shift: Option<bool>,

    #[serde(default)]
    game_mode: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Create settings with the built-in defaults
    pub fn new() -> Self {
        Self {
            tapping_term_ms: DEFAULT_TAPPING_TERM_MS,
            combo_term_ms: DEFAULT_COMBO_TERM_MS,
            auto_shift_timeout_ms: DEFAULT_AUTO_SHIFT_TIMEOUT_MS,
            caps_word_idle_ms: DEFAULT_CAPS_WORD_IDLE_MS,
            auto_shift: true,
            game_mode: false,
            source_path: None,
        }
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let parsed: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(timing) = parsed.timing {
            if let Some(v) = timing.tapping_term_ms {
                settings.tapping_term_ms = nonzero(v, "timing.tapping_term_ms")?;
            }
            if let Some(v) = timing.combo_term_ms {
                settings.combo_term_ms = nonzero(v, "timing.combo_term_ms")?;
            }
            if let Some(v) = timing.auto_shift_timeout_ms {
                settings.auto_shift_timeout_ms = nonzero(v, "timing.auto_shift_timeout_ms")?;
            }
            if let Some(v) = timing.caps_word_idle_ms {
                settings.caps_word_idle_ms = nonzero(v, "timing.caps_word_idle_ms")?;
            }
        }

        if let Some(features) = parsed.features {
            if let Some(v) = features.auto_shift {
                settings.auto_shift = v;
            }
            if let Some(v) = features.game_mode {
                settings.game_mode = v;
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("airmap").join("settings.toml"))
    }

    /// Load from the default location, falling back to defaults
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::from_file(path);
            }
        }
        Ok(Self::new())
    }

    /// Reload settings from the original file
    pub fn reload(&mut self) -> Result<(), SettingsError> {
        if let Some(ref path) = self.source_path {
            let new_settings = Self::from_file(path)?;
            *self = new_settings;
            Ok(())
        } else {
            Err(SettingsError::InvalidValue("No source path set".to_string()))
        }
    }

    pub fn tapping_term(&self) -> Duration {
        Duration::from_millis(self.tapping_term_ms)
    }

    pub fn combo_term(&self) -> Duration {
        Duration::from_millis(self.combo_term_ms)
    }

    pub fn auto_shift_timeout(&self) -> Duration {
        Duration::from_millis(self.auto_shift_timeout_ms)
    }

    pub fn caps_word_idle(&self) -> Duration {
        Duration::from_millis(self.caps_word_idle_ms)
    }

    pub fn auto_shift_enabled(&self) -> bool {
        self.auto_shift
    }

    pub fn game_mode(&self) -> bool {
        self.game_mode
    }
}

fn nonzero(value: u64, name: &str) -> Result<u64, SettingsError> {
    if value == 0 {
        Err(SettingsError::InvalidValue(format!(
            "{} must be greater than zero",
            name
        )))
    } else {
        Ok(value)
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Airmap Settings
# Place this file at: ~/.config/airmap/settings.toml

[timing]
# Tap/hold decision window. The held space bar uses three times this;
# the caps tap-dance uses three quarters of it.
tapping_term_ms = 200

# Window within which chord-combo members have to land together
combo_term_ms = 50

# Hold threshold before an auto-shift key goes shifted
auto_shift_timeout_ms = 175

# Caps word switches off after this much typing silence
caps_word_idle_ms = 5000

[features]
# Hold letters, digits and the navigation cluster for their shifted values
auto_shift = true

# Start with the QWERTY game layer toggled on
game_mode = false
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::new();
        assert_eq!(settings.tapping_term(), Duration::from_millis(200));
        assert_eq!(settings.combo_term(), Duration::from_millis(50));
        assert!(settings.auto_shift_enabled());
        assert!(!settings.game_mode());
    }

    #[test]
    fn test_settings_from_toml() {
        let toml = r#"
[timing]
tapping_term_ms = 180
auto_shift_timeout_ms = 140

[features]
auto_shift = false
game_mode = true
"#;

        let settings = Settings::from_toml(toml).unwrap();
        assert_eq!(settings.tapping_term(), Duration::from_millis(180));
        assert_eq!(settings.auto_shift_timeout(), Duration::from_millis(140));
        // Untouched values keep their defaults
        assert_eq!(settings.combo_term(), Duration::from_millis(50));
        assert!(!settings.auto_shift_enabled());
        assert!(settings.game_mode());
    }

    #[test]
    fn test_settings_rejects_zero_timing() {
        let toml = r#"
[timing]
tapping_term_ms = 0
"#;
        let err = Settings::from_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue(_)));
    }

    #[test]
    fn test_settings_rejects_bad_toml() {
        let err = Settings::from_toml("timing = nope").unwrap_err();
        assert!(matches!(err, SettingsError::TomlParse(_)));
    }

    #[test]
    fn test_reload_without_source_fails() {
        let mut settings = Settings::new();
        assert!(settings.reload().is_err());
    }

    #[test]
    fn test_default_content_parses() {
        let settings = Settings::from_toml(default_settings_content()).unwrap();
        assert_eq!(settings.tapping_term(), Duration::from_millis(200));
        assert!(settings.auto_shift_enabled());
    }
}
