//! Request-pipeline middleware
//!
//! [`resolve_api_function`] is the transport-agnostic resolution step: a
//! two-level lookup (integration, then function) that publishes the resolved
//! callable into the request context. [`prepare_api_function`] adapts it to
//! the axum pipeline, and [`attach_context`] seeds the context ahead of it.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use gateway_core::{GatewayError, IntegrationRegistry, RequestContext, Result};

/// Resolve the API function named by `(integration_name, function_name)` and
/// publish it into the request context.
///
/// Two outcomes are expected and silent:
/// - the integration is not in the registry, or
/// - the resolved client does not expose the function.
///
/// In both cases the context is left untouched and `Ok(())` is returned so
/// the pipeline continues; downstream stages treat the absent function as
/// "not available". The only `Err` is a client construction failure.
///
/// A fresh client is built on every call - nothing is cached across requests.
pub async fn resolve_api_function(
    registry: &IntegrationRegistry,
    integration_name: &str,
    function_name: &str,
    context: &mut RequestContext,
) -> Result<()> {
    let Some(integration) = registry.get(integration_name) else {
        debug!("Integration not configured: {}", integration_name);
        return Ok(());
    };

    let client = integration.api_client.create_api_client().await?;

    match client.function(function_name) {
        Some(function) => context.set_api_function(function),
        None => debug!(
            "Function {} not exposed by integration {}",
            function_name, integration_name
        ),
    }

    Ok(())
}

/// Seed a request context so resolution always has one to write into.
///
/// Leaves any context installed by an earlier stage in place.
pub async fn attach_context(mut request: Request, next: Next) -> Response {
    if request.extensions().get::<RequestContext>().is_none() {
        request.extensions_mut().insert(RequestContext::new());
    }
    next.run(request).await
}

/// Middleware that prepares the API function for downstream handlers.
///
/// Takes the context out of the request extensions, runs resolution, and
/// reinserts it before forwarding - downstream never observes a
/// half-initialized context. Forwards exactly once; a client construction
/// failure short-circuits into an error response instead.
pub async fn prepare_api_function(
    State(registry): State<Arc<IntegrationRegistry>>,
    Path((integration_name, function_name)): Path<(String, String)>,
    mut request: Request,
    next: Next,
) -> std::result::Result<Response, (StatusCode, String)> {
    let mut context = request
        .extensions_mut()
        .remove::<RequestContext>()
        .unwrap_or_default();

    resolve_api_function(&registry, &integration_name, &function_name, &mut context)
        .await
        .map_err(|err| (status_for(&err), err.to_string()))?;

    request.extensions_mut().insert(context);
    Ok(next.run(request).await)
}

/// Map a gateway error to the HTTP status the pipeline answers with
pub(crate) fn status_for(error: &GatewayError) -> StatusCode {
    match error {
        GatewayError::FunctionNotFound(_) => StatusCode::NOT_FOUND,
        GatewayError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
        GatewayError::ParseError(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
