//! Remote secret store client
//!
//! The store is key-based: given a secret name it returns an opaque string
//! payload or fails. The trait keeps the resolver testable; the HTTP
//! implementation is the one used in production. No retries and no caching —
//! a fault is surfaced to the caller unchanged.

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use super::settings::SecretStoreSettings;

/// Errors raised by the secret store client
#[derive(Error, Debug)]
pub enum SecretStoreError {
    /// Secret store is needed but no endpoint is configured
    #[error("secret store URL is not configured")]
    NotConfigured,

    /// Transport-level failure (DNS, TLS, connect, read)
    #[error("secret store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("secret store returned status {status} for secret '{name}'")]
    Status { name: String, status: u16 },
}

/// A key-based remote store returning an opaque payload per secret name
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError>;
}

/// HTTP secret store client
///
/// Fetches `GET {base_url}/v1/secrets/{name}`, authenticating with a bearer
/// token when one is configured, and returns the response body verbatim.
pub struct HttpSecretStore {
    base_url: Option<String>,
    token: Option<String>,
    client: reqwest::Client,
}

impl HttpSecretStore {
    pub fn new(base_url: Option<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.map(|url| url.trim_end_matches('/').to_string()),
            token,
            client: reqwest::Client::new(),
        }
    }

    pub fn from_settings(settings: &SecretStoreSettings) -> Self {
        Self::new(settings.url.clone(), settings.token.clone())
    }

    fn secret_url(&self, name: &str) -> Result<String, SecretStoreError> {
        let base = self.base_url.as_deref().ok_or(SecretStoreError::NotConfigured)?;
        Ok(format!("{}/v1/secrets/{}", base, name))
    }
}

#[async_trait]
impl SecretStore for HttpSecretStore {
    async fn get_secret(&self, name: &str) -> Result<String, SecretStoreError> {
        let url = self.secret_url(name)?;
        debug!(secret = name, "requesting secret from remote store");

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SecretStoreError::Status {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
