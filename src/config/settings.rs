//! User settings for the expense tracker
//!
//! Settings live in a JSON file under the platform config directory and can
//! be overridden per-field through environment variables, so a deployment can
//! ship without a settings file at all and configure everything from the
//! environment.
//!
//! ## Environment overrides
//!
//! - `EXPENSE_TRACKER_DB_PROVIDER` → `database.provider`
//! - `EXPENSE_TRACKER_DB_CONNECTION_STRING` → `database.connection_string`
//! - `EXPENSE_TRACKER_SECRET_NAME` → `secret_store.secret_name`
//! - `EXPENSE_TRACKER_SECRET_STORE_URL` → `secret_store.url`
//! - `EXPENSE_TRACKER_SECRET_STORE_TOKEN` → `secret_store.token`
//! - `EXPENSE_TRACKER_CONFIG_DIR` → directory containing `settings.json`

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Local database configuration, both fields optional until resolved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Target backend name (e.g. "postgres", "mysql")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Native driver connection string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_string: Option<String>,
}

/// Remote secret store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretStoreSettings {
    /// Name of the secret holding the database configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,

    /// Base URL of the secret store service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Bearer token for the secret store, if it requires one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// User settings for the expense tracker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Local database configuration
    #[serde(default)]
    pub database: DatabaseSettings,

    /// Remote secret store configuration
    #[serde(default)]
    pub secret_store: SecretStoreSettings,
}

fn default_schema_version() -> u32 {
    1
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            database: DatabaseSettings::default(),
            secret_store: SecretStoreSettings::default(),
        }
    }
}

impl Settings {
    /// Default location of the settings file
    ///
    /// `EXPENSE_TRACKER_CONFIG_DIR` takes precedence; otherwise the platform
    /// config directory is used (e.g. `~/.config/expense-tracker/`).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        if let Ok(custom) = std::env::var("EXPENSE_TRACKER_CONFIG_DIR") {
            return Ok(PathBuf::from(custom).join("settings.json"));
        }

        let dirs = ProjectDirs::from("", "", "expense-tracker")
            .ok_or_else(|| ConfigError::Io("could not determine home directory".to_string()))?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&contents)
            .map_err(|e| ConfigError::Json(format!("{}: {}", path.display(), e)))
    }

    /// Apply environment-variable overrides on top of the loaded settings
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Override fields from a lookup function; blank values are ignored
    fn apply_overrides_from(&mut self, get: impl Fn(&str) -> Option<String>) {
        let non_blank = |value: String| {
            let trimmed = value.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        };

        if let Some(value) = get("EXPENSE_TRACKER_DB_PROVIDER").and_then(non_blank) {
            self.database.provider = Some(value);
        }
        if let Some(value) = get("EXPENSE_TRACKER_DB_CONNECTION_STRING").and_then(non_blank) {
            self.database.connection_string = Some(value);
        }
        if let Some(value) = get("EXPENSE_TRACKER_SECRET_NAME").and_then(non_blank) {
            self.secret_store.secret_name = Some(value);
        }
        if let Some(value) = get("EXPENSE_TRACKER_SECRET_STORE_URL").and_then(non_blank) {
            self.secret_store.url = Some(value);
        }
        if let Some(value) = get("EXPENSE_TRACKER_SECRET_STORE_TOKEN").and_then(non_blank) {
            self.secret_store.token = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.schema_version, 1);
        assert!(settings.database.provider.is_none());
        assert!(settings.secret_store.secret_name.is_none());
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");

        let settings = Settings::load_or_default(&path).unwrap();
        assert!(settings.database.connection_string.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "database": {
                    "provider": "postgres",
                    "connection_string": "host=localhost user=app"
                },
                "secret_store": { "secret_name": "expense-tracker/db" }
            }"#,
        )
        .unwrap();

        let settings = Settings::load_or_default(&path).unwrap();
        assert_eq!(settings.database.provider.as_deref(), Some("postgres"));
        assert_eq!(
            settings.secret_store.secret_name.as_deref(),
            Some("expense-tracker/db")
        );
    }

    #[test]
    fn test_load_malformed_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        let err = Settings::load_or_default(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_env_overrides_win_over_file_values() {
        let mut settings = Settings {
            database: DatabaseSettings {
                provider: Some("postgres".to_string()),
                connection_string: None,
            },
            ..Settings::default()
        };

        let env: HashMap<&str, &str> = [
            ("EXPENSE_TRACKER_DB_PROVIDER", "mysql"),
            ("EXPENSE_TRACKER_DB_CONNECTION_STRING", "mysql://localhost"),
        ]
        .into_iter()
        .collect();

        settings.apply_overrides_from(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(settings.database.provider.as_deref(), Some("mysql"));
        assert_eq!(
            settings.database.connection_string.as_deref(),
            Some("mysql://localhost")
        );
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let mut settings = Settings {
            database: DatabaseSettings {
                provider: Some("postgres".to_string()),
                connection_string: None,
            },
            ..Settings::default()
        };

        settings.apply_overrides_from(|name| {
            (name == "EXPENSE_TRACKER_DB_PROVIDER").then(|| "   ".to_string())
        });

        assert_eq!(settings.database.provider.as_deref(), Some("postgres"));
    }
}
