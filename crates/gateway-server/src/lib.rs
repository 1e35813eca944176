//! # gateway-server
//!
//! HTTP server for Integration Gateway. Per request it resolves one named
//! API function of one named integration, attaches it to the request context,
//! and hands control to the invoke stage.

pub mod config;
pub mod middleware;
pub mod rest;
pub mod server;

pub use config::{GatewayConfig, IntegrationConfig, DEFAULT_PORT};
pub use middleware::{attach_context, prepare_api_function, resolve_api_function};
pub use rest::{Endpoint, HttpMethod, RestApiClientFactory};
pub use server::GatewayServer;
