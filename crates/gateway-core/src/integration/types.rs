//! Integration type definitions

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::client::ApiClientFactory;

/// An integration represents a configured external service adapter.
///
/// Only `api_client` is consumed during request resolution; the remaining
/// fields describe the integration for listings and logs.
#[derive(Clone)]
pub struct Integration {
    /// Unique identifier
    pub id: Uuid,

    /// Short key for the integration (e.g., "stripe", "ct")
    pub key: String,

    /// Human-readable name
    pub name: String,

    /// Description
    pub description: Option<String>,

    /// Capability used to construct a fresh API client per request
    pub api_client: Arc<dyn ApiClientFactory>,

    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Integration {
    /// Create a new integration backed by the given client factory
    pub fn new(key: impl Into<String>, api_client: Arc<dyn ApiClientFactory>) -> Self {
        let key = key.into();
        Self {
            id: Uuid::new_v4(),
            name: key.clone(),
            key,
            description: None,
            api_client,
            created_at: Utc::now(),
        }
    }

    /// Set the human-readable name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl std::fmt::Debug for Integration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Integration")
            .field("id", &self.id)
            .field("key", &self.key)
            .field("name", &self.name)
            .field("description", &self.description)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
