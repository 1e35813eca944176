//! Per-request context shared with downstream pipeline stages

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::client::ApiFunction;

/// Metadata seeded into every request context before resolution runs.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMetadata {
    /// Identifier assigned when the context was created
    pub request_id: Uuid,
    /// When the request entered the pipeline
    pub received_at: DateTime<Utc>,
}

impl RequestMetadata {
    fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            received_at: Utc::now(),
        }
    }
}

/// Mutable per-request context carrying resolved capabilities downstream.
///
/// Created by the pipeline before resolution with the metadata placeholder
/// populated and no API function. Resolution writes at most the one
/// `api_function` field; everything else in the context survives untouched.
/// An absent function after resolution means the requested integration or
/// function is not available, and downstream stages respond accordingly.
#[derive(Clone)]
pub struct RequestContext {
    metadata: RequestMetadata,
    api_function: Option<ApiFunction>,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("metadata", &self.metadata)
            .field("api_function", &self.api_function.is_some())
            .finish()
    }
}

impl RequestContext {
    /// Create a context with fresh metadata and no resolved function
    pub fn new() -> Self {
        Self {
            metadata: RequestMetadata::new(),
            api_function: None,
        }
    }

    /// Request metadata, populated at creation
    pub fn metadata(&self) -> &RequestMetadata {
        &self.metadata
    }

    /// The resolved API function, if resolution found one
    pub fn api_function(&self) -> Option<&ApiFunction> {
        self.api_function.as_ref()
    }

    /// Publish the resolved API function for downstream stages.
    ///
    /// Writes exactly this field; the rest of the context is untouched.
    pub fn set_api_function(&mut self, function: ApiFunction) {
        self.api_function = Some(function);
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::api_fn;
    use std::sync::Arc;

    #[test]
    fn new_context_has_metadata_and_no_function() {
        let context = RequestContext::new();
        assert!(context.api_function().is_none());
        assert!(context.metadata().received_at <= Utc::now());
    }

    #[test]
    fn set_api_function_leaves_metadata_untouched() {
        let mut context = RequestContext::new();
        let request_id = context.metadata().request_id;
        let received_at = context.metadata().received_at;

        let function = api_fn(|args| async move { Ok(args) });
        context.set_api_function(function.clone());

        let resolved = context.api_function().unwrap();
        assert!(Arc::ptr_eq(resolved, &function));
        assert_eq!(context.metadata().request_id, request_id);
        assert_eq!(context.metadata().received_at, received_at);
    }
}
