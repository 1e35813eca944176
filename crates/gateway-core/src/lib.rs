//! # gateway-core
//!
//! Core types for Integration Gateway including:
//! - Integration registry keyed by integration name
//! - API client model: named callable functions behind a factory seam
//! - Per-request context carrying the resolved API function downstream
//! - Shared error types

pub mod client;
pub mod context;
pub mod error;
pub mod integration;

pub use client::{api_fn, ApiClient, ApiClientFactory, ApiFunction};
pub use context::{RequestContext, RequestMetadata};
pub use error::{GatewayError, Result};
pub use integration::{Integration, IntegrationRegistry};
