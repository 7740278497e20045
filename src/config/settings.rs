//! TOML-based configuration for quarry.
//!
//! Example configuration:
//! ```toml
//! [compile]
//! default_dialect = "postgres"
//! pretty = false
//!
//! [types]
//! decimal_precision = 18
//! decimal_scale = 2
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// SQL compilation settings.
    pub compile: CompileSettings,

    /// Type-spec parsing settings.
    pub types: TypeSettings,
}

/// SQL compilation settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CompileSettings {
    /// Dialect identifier used when the caller does not name one.
    pub default_dialect: String,

    /// Multi-line SELECT layout. When false the statement is one line.
    pub pretty: bool,
}

impl Default for CompileSettings {
    fn default() -> Self {
        Self {
            default_dialect: "duckdb".to_string(),
            pretty: true,
        }
    }
}

/// Defaults for bare `decimal` / `numeric` type specs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TypeSettings {
    pub decimal_precision: u8,
    pub decimal_scale: u8,
}

impl Default for TypeSettings {
    fn default() -> Self {
        Self {
            decimal_precision: 18,
            decimal_scale: 2,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `QUARRY_CONFIG`
    /// 2. `./quarry.toml`
    /// 3. `~/.config/quarry/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("QUARRY_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("quarry.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("quarry").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    fn validate(&self) -> Result<(), SettingsError> {
        let TypeSettings {
            decimal_precision,
            decimal_scale,
        } = self.types;
        if decimal_precision == 0 || decimal_precision > crate::types::MAX_DECIMAL_PRECISION {
            return Err(SettingsError::InvalidConfig(format!(
                "types.decimal_precision must be between 1 and 38, got {}",
                decimal_precision
            )));
        }
        if decimal_scale > decimal_precision {
            return Err(SettingsError::InvalidConfig(format!(
                "types.decimal_scale ({}) exceeds types.decimal_precision ({})",
                decimal_scale, decimal_precision
            )));
        }
        if self.compile.default_dialect.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "compile.default_dialect cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[compile]
default_dialect = "postgres"
pretty = false

[types]
decimal_precision = 20
decimal_scale = 4
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.compile.default_dialect, "postgres");
        assert!(!settings.compile.pretty);
        assert_eq!(settings.types.decimal_precision, 20);
        assert_eq!(settings.types.decimal_scale, 4);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let settings = Settings::from_toml("[compile]\npretty = false\n").unwrap();

        assert_eq!(settings.compile.default_dialect, "duckdb");
        assert!(!settings.compile.pretty);
        assert_eq!(settings.types, TypeSettings::default());
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();

        assert_eq!(settings.compile.default_dialect, "duckdb");
        assert!(settings.compile.pretty);
        assert_eq!(settings.types.decimal_precision, 18);
        assert_eq!(settings.types.decimal_scale, 2);
    }

    #[test]
    fn test_invalid_decimal_defaults() {
        let err = Settings::from_toml("[types]\ndecimal_precision = 4\ndecimal_scale = 6\n")
            .unwrap_err();
        assert!(matches!(err, SettingsError::InvalidConfig(_)));

        let err = Settings::from_toml("[types]\ndecimal_precision = 0\n").unwrap_err();
        assert!(matches!(err, SettingsError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = Settings::from_toml("[compile\n").unwrap_err();
        assert!(matches!(err, SettingsError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::from_file("/definitely/not/here/quarry.toml").unwrap_err();
        assert!(matches!(err, SettingsError::FileNotFound(_)));
    }
}
