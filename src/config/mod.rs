//! Configuration and secret management
//!
//! Local settings come from a JSON file plus environment-variable overrides.
//! When the local database configuration is incomplete, the resolver falls
//! back to a remote secret store.

pub mod resolver;
pub mod secrets;
pub mod settings;

use thiserror::Error;

use secrets::SecretStoreError;

pub use resolver::{resolve_database_config, DatabaseConfig};
pub use secrets::{HttpSecretStore, SecretStore};
pub use settings::Settings;

/// Errors raised while loading settings or resolving the database configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(String),

    /// Settings file is not valid JSON
    #[error("failed to parse settings: {0}")]
    Json(String),

    /// Neither local database configuration nor a secret name is available.
    /// Unrecoverable: nothing left to consult.
    #[error("local database configuration is missing and no secret name is configured")]
    ConfigurationMissing,

    /// Secret store transport/service fault, surfaced unchanged
    #[error(transparent)]
    SecretStore(#[from] SecretStoreError),

    /// Secret was retrieved but its value is blank
    #[error("secret '{0}' has an empty value")]
    SecretEmpty(String),

    /// Secret value is not valid JSON
    #[error("secret '{name}' is not valid JSON")]
    SecretMalformed {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Secret JSON is missing the provider or connection-string field
    #[error("secret '{0}' is missing required fields 'provider' and 'connectionString'")]
    SecretIncomplete(String),
}
