//! HTTP server hosting the resolution pipeline

use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Map, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use gateway_core::{GatewayError, IntegrationRegistry, RequestContext};

use crate::middleware::{attach_context, prepare_api_function, status_for};

/// HTTP gateway server
pub struct GatewayServer {
    registry: Arc<IntegrationRegistry>,
    port: u16,
}

impl GatewayServer {
    /// Create a server for the given registry and port
    pub fn new(registry: Arc<IntegrationRegistry>, port: u16) -> Self {
        Self { registry, port }
    }

    /// Build the request pipeline.
    ///
    /// `POST /{integration_name}/{function_name}` runs context seeding, then
    /// API function resolution, then the invoke handler. Health probes are
    /// outside the resolution pipeline.
    pub fn router(registry: Arc<IntegrationRegistry>) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .route(
                "/:integration_name/:function_name",
                post(invoke_api_function),
            )
            .route_layer(from_fn_with_state(registry, prepare_api_function))
            .route_layer(from_fn(attach_context))
            .route("/", get(health))
            .route("/health", get(health))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(cors),
            )
    }

    /// Bind and serve until shutdown
    pub async fn run(&self) -> gateway_core::Result<()> {
        let app = Self::router(self.registry.clone());

        let addr = format!("0.0.0.0:{}", self.port);
        info!("Starting integration gateway on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Downstream stage: invoke the API function resolution attached to the
/// request context.
///
/// An absent function means the integration or function is not configured;
/// this stage owns the user-visible 404 for that case.
async fn invoke_api_function(
    Path((integration_name, function_name)): Path<(String, String)>,
    Extension(context): Extension<RequestContext>,
    body: Option<Json<Value>>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let Some(function) = context.api_function().cloned() else {
        let err =
            GatewayError::FunctionNotFound(format!("{}/{}", integration_name, function_name));
        return Err((status_for(&err), err.to_string()));
    };

    let Json(args) = body.unwrap_or_else(|| Json(Value::Object(Map::new())));

    match function(args).await {
        Ok(result) => Ok(Json(result)),
        Err(err) => Err((status_for(&err), err.to_string())),
    }
}
