//! Provider strategies and the provider registry
//!
//! Each strategy knows how to turn a connection string into an unopened
//! native connection for one backend. Construction never performs I/O; only
//! the explicit open step does. The registry maps normalized provider names
//! to strategies and is built once at startup, read-only afterwards.

pub mod mysql;
pub mod postgres;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::handle::ConnectionHandle;

/// Capability to construct a native, unopened connection for one backend
pub trait ConnectionStrategy: Send + Sync {
    /// Parse the connection string into an unopened connection. Rejects
    /// blank connection strings; performs no I/O.
    fn create(&self, connection_string: &str) -> Result<Box<dyn UnopenedConnection>>;
}

/// A constructed connection that has not been opened yet
#[async_trait]
pub trait UnopenedConnection: Send {
    /// Open the connection. This is the only step that touches the network.
    async fn open(self: Box<Self>) -> Result<ConnectionHandle>;
}

/// Normalize a provider name for registry lookup
pub(crate) fn normalize_provider(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Immutable map from normalized provider name to strategy
#[derive(Default)]
pub struct ProviderRegistry {
    strategies: HashMap<String, Arc<dyn ConnectionStrategy>>,
}

impl ProviderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with all built-in providers registered
    pub fn with_default_providers() -> Self {
        let mut registry = Self::new();
        registry.register("postgres", Arc::new(postgres::PostgresStrategy));
        registry.register("mysql", Arc::new(mysql::MySqlStrategy));
        registry
    }

    /// Register a strategy under a provider name (stored normalized)
    pub fn register(&mut self, name: &str, strategy: Arc<dyn ConnectionStrategy>) {
        self.strategies.insert(normalize_provider(name), strategy);
    }

    /// Look up the strategy for a provider name, normalizing first
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ConnectionStrategy>> {
        self.strategies.get(&normalize_provider(name)).cloned()
    }

    /// Sorted list of registered provider names
    pub fn provider_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
