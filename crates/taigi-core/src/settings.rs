//! Build settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::path::PathBuf;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::store::temp_path;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub source: SourceSettings,
    pub store: StoreSettings,
    pub build: BuildSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    pub input: PathBuf,
    delimiter: String,
}

impl SourceSettings {
    /// Field delimiter as a byte. Validated to be a single ASCII character.
    pub fn delimiter(&self) -> u8 {
        self.delimiter.as_bytes()[0]
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    pub output: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildSettings {
    pub reading: ReadingColumn,
    #[serde(default)]
    pub fail_on_row_error: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            reading: ReadingColumn::Corrected,
            fail_on_row_error: false,
        }
    }
}

/// Which source column becomes the stored reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingColumn {
    Original,
    Corrected,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty_path {
        ($section:ident . $field:ident) => {
            if s.$section.$field.as_os_str().is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    check_non_empty_path!(source.input);
    check_non_empty_path!(store.output);

    let d = &s.source.delimiter;
    if d.len() != 1 || !d.is_ascii() {
        return Err(SettingsError::InvalidValue {
            field: "source.delimiter".to_string(),
            reason: "must be a single ASCII character".to_string(),
        });
    }

    if s.source.input == s.store.output || s.source.input == temp_path(&s.store.output) {
        return Err(SettingsError::InvalidValue {
            field: "store.output".to_string(),
            reason: "must differ from source.input, including its .tmp scratch file"
                .to_string(),
        });
    }

    Ok(())
}
