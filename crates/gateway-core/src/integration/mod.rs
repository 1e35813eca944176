//! Integration management for configured third-party services

mod types;
mod registry;

pub use types::*;
pub use registry::IntegrationRegistry;
