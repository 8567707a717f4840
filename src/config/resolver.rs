//! Database configuration resolution
//!
//! Produces the `(provider, connection string)` pair the connection factory
//! consumes. Local settings win; when either field is blank the resolver
//! falls back to the remote secret store, whose payload must be a JSON object
//! with non-blank `provider` and `connectionString` string fields.
//!
//! A single attempt per call: no retries, no caching of failures. The caller
//! resolves once at startup and treats the result as immutable for the rest
//! of the process.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::secrets::SecretStore;
use super::settings::Settings;
use super::ConfigError;

const PROVIDER_JSON_KEY: &str = "provider";
const CONNECTION_STRING_JSON_KEY: &str = "connectionString";

/// Resolved database configuration
///
/// Invariant: both fields are non-blank once a resolution succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub provider: String,
    pub connection_string: String,
}

/// Resolve the database configuration, local settings first, secret store second
pub async fn resolve_database_config(
    settings: &Settings,
    secret_store: &dyn SecretStore,
) -> Result<DatabaseConfig, ConfigError> {
    debug!("starting database configuration resolution");

    if let Some(config) = try_local(settings) {
        info!("loaded database config from local settings");
        return Ok(config);
    }

    warn!("local database config missing or incomplete, falling back to the secret store");

    let secret_name = settings
        .secret_store
        .secret_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| {
            error!("no secret name is configured");
            ConfigError::ConfigurationMissing
        })?;

    debug!(secret = secret_name, "fetching database config from the secret store");
    let payload = secret_store.get_secret(secret_name).await?;

    let config = parse_secret_payload(secret_name, &payload)?;
    info!("loaded database config from the secret store");
    Ok(config)
}

fn try_local(settings: &Settings) -> Option<DatabaseConfig> {
    let provider = non_blank(settings.database.provider.as_deref())?;
    let connection_string = non_blank(settings.database.connection_string.as_deref())?;

    debug!("found complete local database configuration");
    Some(DatabaseConfig {
        provider: provider.to_string(),
        connection_string: connection_string.to_string(),
    })
}

fn parse_secret_payload(name: &str, payload: &str) -> Result<DatabaseConfig, ConfigError> {
    if payload.trim().is_empty() {
        error!(secret = name, "secret value is empty");
        return Err(ConfigError::SecretEmpty(name.to_string()));
    }

    let root: Value = serde_json::from_str(payload).map_err(|source| {
        error!(secret = name, "failed to parse secret JSON: {source}");
        ConfigError::SecretMalformed {
            name: name.to_string(),
            source,
        }
    })?;

    let provider = string_field(&root, PROVIDER_JSON_KEY);
    let connection_string = string_field(&root, CONNECTION_STRING_JSON_KEY);

    match (provider, connection_string) {
        (Some(provider), Some(connection_string)) => Ok(DatabaseConfig {
            provider: provider.to_string(),
            connection_string: connection_string.to_string(),
        }),
        _ => {
            error!(secret = name, "secret is missing required fields");
            Err(ConfigError::SecretIncomplete(name.to_string()))
        }
    }
}

/// Extract a non-blank string field by exact key; other fields are ignored
fn string_field<'a>(root: &'a Value, key: &str) -> Option<&'a str> {
    root.get(key).and_then(Value::as_str).and_then(|v| non_blank(Some(v)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secrets::SecretStoreError;
    use crate::config::settings::{DatabaseSettings, SecretStoreSettings};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Secret store stub returning a canned payload and counting calls
    struct FakeSecretStore {
        payload: Result<String, ()>,
        calls: AtomicUsize,
    }

    impl FakeSecretStore {
        fn returning(payload: &str) -> Self {
            Self {
                payload: Ok(payload.to_string()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                payload: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl SecretStore for FakeSecretStore {
        async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.payload {
                Ok(payload) => Ok(payload.clone()),
                Err(()) => Err(SecretStoreError::Status {
                    name: name.to_string(),
                    status: 503,
                }),
            }
        }
    }

    fn settings(
        provider: Option<&str>,
        connection_string: Option<&str>,
        secret_name: Option<&str>,
    ) -> Settings {
        Settings {
            database: DatabaseSettings {
                provider: provider.map(String::from),
                connection_string: connection_string.map(String::from),
            },
            secret_store: SecretStoreSettings {
                secret_name: secret_name.map(String::from),
                ..SecretStoreSettings::default()
            },
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_local_config_wins_and_skips_secret_store() {
        let store = FakeSecretStore::returning("{}");
        let settings = settings(Some("postgres"), Some("host=localhost"), Some("name"));

        let config = resolve_database_config(&settings, &store).await.unwrap();

        assert_eq!(config.provider, "postgres");
        assert_eq!(config.connection_string, "host=localhost");
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_local_value_triggers_exactly_one_fallback() {
        let store = FakeSecretStore::returning(
            r#"{"provider":"postgres","connectionString":"Host=x"}"#,
        );
        let settings = settings(Some("postgres"), Some("   "), Some("db-secret"));

        let config = resolve_database_config(&settings, &store).await.unwrap();

        assert_eq!(config.provider, "postgres");
        assert_eq!(config.connection_string, "Host=x");
        assert_eq!(store.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_secret_name_is_configuration_missing() {
        let store = FakeSecretStore::returning("{}");
        let settings = settings(None, None, None);

        let err = resolve_database_config(&settings, &store).await.unwrap_err();

        assert!(matches!(err, ConfigError::ConfigurationMissing));
        assert_eq!(store.call_count(), 0);
    }

    #[tokio::test]
    async fn test_secret_store_fault_propagates() {
        let store = FakeSecretStore::failing();
        let settings = settings(None, None, Some("db-secret"));

        let err = resolve_database_config(&settings, &store).await.unwrap_err();

        assert!(matches!(err, ConfigError::SecretStore(_)));
    }

    #[tokio::test]
    async fn test_empty_payload_is_secret_empty() {
        let store = FakeSecretStore::returning("   ");
        let settings = settings(None, None, Some("db-secret"));

        let err = resolve_database_config(&settings, &store).await.unwrap_err();

        assert!(matches!(err, ConfigError::SecretEmpty(name) if name == "db-secret"));
    }

    #[tokio::test]
    async fn test_non_json_payload_is_secret_malformed() {
        let store = FakeSecretStore::returning("not json");
        let settings = settings(None, None, Some("db-secret"));

        let err = resolve_database_config(&settings, &store).await.unwrap_err();

        assert!(matches!(err, ConfigError::SecretMalformed { .. }));
    }

    #[tokio::test]
    async fn test_missing_connection_string_field_is_secret_incomplete() {
        let store = FakeSecretStore::returning(r#"{"provider":"postgres"}"#);
        let settings = settings(None, None, Some("db-secret"));

        let err = resolve_database_config(&settings, &store).await.unwrap_err();

        assert!(matches!(err, ConfigError::SecretIncomplete(_)));
    }

    #[tokio::test]
    async fn test_blank_field_in_payload_is_secret_incomplete() {
        let store =
            FakeSecretStore::returning(r#"{"provider":"  ","connectionString":"Host=x"}"#);
        let settings = settings(None, None, Some("db-secret"));

        let err = resolve_database_config(&settings, &store).await.unwrap_err();

        assert!(matches!(err, ConfigError::SecretIncomplete(_)));
    }

    #[tokio::test]
    async fn test_extra_payload_fields_are_ignored() {
        let store = FakeSecretStore::returning(
            r#"{"provider":"mysql","connectionString":"mysql://h","rotation":"weekly"}"#,
        );
        let settings = settings(None, None, Some("db-secret"));

        let config = resolve_database_config(&settings, &store).await.unwrap();

        assert_eq!(config.provider, "mysql");
        assert_eq!(config.connection_string, "mysql://h");
    }

    #[tokio::test]
    async fn test_secret_name_is_trimmed_before_use() {
        let store = FakeSecretStore::returning(
            r#"{"provider":"postgres","connectionString":"Host=x"}"#,
        );
        let settings = settings(None, None, Some("  db-secret  "));

        let config = resolve_database_config(&settings, &store).await.unwrap();
        assert_eq!(config.provider, "postgres");
    }
}
