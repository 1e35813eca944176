//! Gateway configuration
//!
//! A plain JSON file describes the integrations the process serves. Parsed
//! once at startup; the registry built from it is frozen for the process
//! lifetime.

use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use gateway_core::{GatewayError, Integration, IntegrationRegistry, Result};

use crate::rest::{Endpoint, RestApiClientFactory};

/// Default port the gateway serves on
pub const DEFAULT_PORT: u16 = 4000;

/// Gateway configuration file contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayConfig {
    /// Config file version
    #[serde(default = "default_version")]
    pub version: u32,
    /// Port to serve on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Integrations keyed by integration key (e.g., "ct", "stripe")
    #[serde(default)]
    pub integrations: IndexMap<String, IntegrationConfig>,
}

fn default_version() -> u32 {
    1
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Configuration of one integration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    /// Human-readable name (defaults to the integration key)
    pub name: Option<String>,
    /// Description
    pub description: Option<String>,
    /// Base URL of the upstream service
    pub base_url: String,
    /// Bearer token attached to every upstream request
    pub bearer_token: Option<String>,
    /// Endpoints exposed as API functions
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

impl GatewayConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: GatewayConfig = serde_json::from_str(&contents)?;
        debug!("Loaded gateway config from {:?}", path);
        Ok(config)
    }

    /// Build the integration registry described by this configuration
    pub fn build_registry(&self) -> Result<Arc<IntegrationRegistry>> {
        let mut registry = IntegrationRegistry::new();

        for (key, integration_config) in &self.integrations {
            let base_url = Url::parse(&integration_config.base_url).map_err(|e| {
                GatewayError::InvalidConfig(format!("{}: invalid base URL: {}", key, e))
            })?;

            let mut factory =
                RestApiClientFactory::new(base_url, integration_config.endpoints.clone());
            if let Some(token) = &integration_config.bearer_token {
                factory = factory.with_bearer_token(token.clone());
            }

            let mut integration = Integration::new(key.clone(), Arc::new(factory));
            if let Some(name) = &integration_config.name {
                integration = integration.with_name(name.clone());
            }
            if let Some(description) = &integration_config.description {
                integration = integration.with_description(description.clone());
            }

            registry.register(integration);
        }

        registry.log_summary();
        Ok(Arc::new(registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TEST_CONFIG: &str = r#"
{
  "port": 4100,
  "integrations": {
    "ct": {
      "name": "Commerce",
      "baseUrl": "https://api.commerce.example/v2",
      "bearerToken": "secret",
      "endpoints": [
        { "name": "getProduct", "method": "get", "path": "/products/{id}" },
        { "name": "createCart", "method": "post", "path": "/carts" }
      ]
    },
    "cms": {
      "baseUrl": "https://cms.example/api",
      "endpoints": [
        { "name": "getPage", "method": "get", "path": "/pages/{slug}" }
      ]
    }
  }
}
"#;

    fn write_config(contents: &str) -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("gateway.json");
        std::fs::write(&path, contents).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn load_parses_config() {
        let (_dir, path) = write_config(TEST_CONFIG);

        let config = GatewayConfig::load(&path).unwrap();

        assert_eq!(config.version, 1);
        assert_eq!(config.port, 4100);
        assert_eq!(config.integrations.len(), 2);
        assert_eq!(
            config.integrations["ct"].endpoints[0].name,
            "getProduct"
        );
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");

        assert!(matches!(
            GatewayConfig::load(&path),
            Err(GatewayError::IoError(_))
        ));
    }

    #[tokio::test]
    async fn build_registry_registers_all_integrations() {
        let (_dir, path) = write_config(TEST_CONFIG);
        let config = GatewayConfig::load(&path).unwrap();

        let registry = config.build_registry().unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("ct"));
        assert!(registry.contains("cms"));
        assert_eq!(registry.get("ct").unwrap().name, "Commerce");
        assert_eq!(registry.get("cms").unwrap().name, "cms");

        let client = registry
            .get("ct")
            .unwrap()
            .api_client
            .create_api_client()
            .await
            .unwrap();
        assert_eq!(client.function_names(), vec!["getProduct", "createCart"]);
    }

    #[test]
    fn build_registry_rejects_invalid_base_url() {
        let (_dir, path) = write_config(
            r#"{ "integrations": { "bad": { "baseUrl": "not a url", "endpoints": [] } } }"#,
        );
        let config = GatewayConfig::load(&path).unwrap();

        assert!(matches!(
            config.build_registry(),
            Err(GatewayError::InvalidConfig(_))
        ));
    }
}
