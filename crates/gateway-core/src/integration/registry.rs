//! Integration registry

use std::collections::HashMap;

use tracing::{debug, info};

use super::types::Integration;

/// Registry of configured integrations, keyed by integration key.
///
/// Populated once at process startup and shared read-only (behind an `Arc`)
/// across concurrent requests for the lifetime of the process. Requests never
/// mutate the registry, so no interior locking is needed.
#[derive(Default)]
pub struct IntegrationRegistry {
    integrations: HashMap<String, Integration>,
}

impl IntegrationRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an integration, replacing any previous entry under its key.
    ///
    /// Startup-time only; the registry is frozen before serving traffic.
    pub fn register(&mut self, integration: Integration) -> Option<Integration> {
        debug!("Registering integration: {}", integration.key);
        self.integrations
            .insert(integration.key.clone(), integration)
    }

    /// Look up an integration by key.
    ///
    /// Absence means the integration is not configured for this process.
    pub fn get(&self, key: &str) -> Option<&Integration> {
        self.integrations.get(key)
    }

    /// Whether an integration with this key is configured
    pub fn contains(&self, key: &str) -> bool {
        self.integrations.contains_key(key)
    }

    /// All configured integration keys
    pub fn keys(&self) -> Vec<&str> {
        self.integrations.keys().map(String::as_str).collect()
    }

    /// All configured integrations
    pub fn list(&self) -> Vec<&Integration> {
        self.integrations.values().collect()
    }

    /// Number of configured integrations
    pub fn len(&self) -> usize {
        self.integrations.len()
    }

    /// Whether no integrations are configured
    pub fn is_empty(&self) -> bool {
        self.integrations.is_empty()
    }

    /// Log a startup summary of the registry contents
    pub fn log_summary(&self) {
        info!("Loaded {} integrations", self.integrations.len());
        for integration in self.integrations.values() {
            debug!("  {} ({})", integration.key, integration.name);
        }
    }
}

impl std::fmt::Debug for IntegrationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationRegistry")
            .field("integrations", &self.keys())
            .finish()
    }
}
