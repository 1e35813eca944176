//! API clients and the functions they expose
//!
//! An [`ApiClient`] is the transient product of an integration's
//! [`ApiClientFactory`]: a named table of callable [`ApiFunction`]s. Clients
//! are built fresh for every resolution and dropped once the requested
//! function has been extracted, so factories must be cheap to invoke.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::Result;

/// A callable API operation exposed by an integration's client.
///
/// Takes a JSON object of arguments and produces a JSON result. Cloning is
/// cheap (`Arc`), and clones compare identical under [`Arc::ptr_eq`] - the
/// resolver hands downstream stages the very function the client exposed,
/// never a wrapper.
pub type ApiFunction = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Adapt an async closure into an [`ApiFunction`].
pub fn api_fn<F, Fut>(f: F) -> ApiFunction
where
    F: Fn(Value) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value>> + Send + 'static,
{
    Arc::new(move |args| -> BoxFuture<'static, Result<Value>> { Box::pin(f(args)) })
}

/// A client for one integration, exposing API functions by name.
#[derive(Clone, Default)]
pub struct ApiClient {
    /// Named API functions, in registration order
    api: IndexMap<String, ApiFunction>,
}

impl ApiClient {
    /// Create an empty client
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style registration of a function
    pub fn with_function(mut self, name: impl Into<String>, function: ApiFunction) -> Self {
        self.api.insert(name.into(), function);
        self
    }

    /// Register a function under a name, replacing any previous entry
    pub fn insert(&mut self, name: impl Into<String>, function: ApiFunction) {
        self.api.insert(name.into(), function);
    }

    /// Look up a function by name.
    ///
    /// Returns `None` when the name is not part of this client's API; callers
    /// must treat absence as an expected outcome, not an error.
    pub fn function(&self, name: &str) -> Option<ApiFunction> {
        self.api.get(name).cloned()
    }

    /// Whether a function with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.api.contains_key(name)
    }

    /// Names of all exposed functions, in registration order
    pub fn function_names(&self) -> Vec<&str> {
        self.api.keys().map(String::as_str).collect()
    }

    /// Number of exposed functions
    pub fn len(&self) -> usize {
        self.api.len()
    }

    /// Whether the client exposes no functions
    pub fn is_empty(&self) -> bool {
        self.api.is_empty()
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("api", &self.function_names())
            .finish()
    }
}

/// Factory capability held by an integration descriptor.
///
/// Implementations construct a fresh [`ApiClient`] per call. Construction
/// failures surface as errors and are the only hard-failure path the
/// resolution step propagates.
#[async_trait]
pub trait ApiClientFactory: Send + Sync {
    /// Build a client exposing this integration's API functions
    async fn create_api_client(&self) -> Result<ApiClient>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn echo() -> ApiFunction {
        api_fn(|args| async move { Ok(args) })
    }

    #[tokio::test]
    async fn api_fn_invokes_closure() {
        let function = echo();
        let result = function(json!({ "id": 7 })).await.unwrap();
        assert_eq!(result, json!({ "id": 7 }));
    }

    #[test]
    fn function_lookup() {
        let client = ApiClient::new().with_function("getProduct", echo());

        assert!(client.contains("getProduct"));
        assert!(client.function("getProduct").is_some());
        assert!(client.function("getOrder").is_none());
    }

    #[test]
    fn lookup_preserves_identity() {
        let function = echo();
        let client = ApiClient::new().with_function("getProduct", function.clone());

        let resolved = client.function("getProduct").unwrap();
        assert!(Arc::ptr_eq(&resolved, &function));
    }

    #[test]
    fn function_names_keep_registration_order() {
        let client = ApiClient::new()
            .with_function("getProduct", echo())
            .with_function("listProducts", echo())
            .with_function("createCart", echo());

        assert_eq!(
            client.function_names(),
            vec!["getProduct", "listProducts", "createCart"]
        );
        assert_eq!(client.len(), 3);
        assert!(!client.is_empty());
    }
}
