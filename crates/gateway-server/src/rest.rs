//! REST-backed API client factory
//!
//! Turns a declarative endpoint list into API functions that execute HTTP
//! requests against an upstream service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, error};
use url::Url;

use gateway_core::{api_fn, ApiClient, ApiClientFactory, ApiFunction, GatewayError, Result};

/// HTTP method of a configured endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// Whether arguments travel in the request body rather than the query
    fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

/// One upstream endpoint exposed as a named API function
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoint {
    /// Function name the endpoint is exposed under (e.g., "getProduct")
    pub name: String,
    /// HTTP method
    pub method: HttpMethod,
    /// URL path, relative to the base URL; `{param}` placeholders are
    /// substituted from the arguments
    pub path: String,
}

/// API client factory for plain REST integrations.
///
/// Builds a client whose functions substitute `{param}` path placeholders
/// from the JSON arguments, send the remaining arguments as query parameters
/// (GET/DELETE) or JSON body (POST/PUT/PATCH), and map non-2xx responses to
/// upstream errors.
pub struct RestApiClientFactory {
    base_url: Url,
    bearer_token: Option<String>,
    endpoints: Vec<Endpoint>,
    client: Client,
}

impl RestApiClientFactory {
    /// Create a factory for the given upstream base URL and endpoint list
    pub fn new(base_url: Url, endpoints: Vec<Endpoint>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            bearer_token: None,
            endpoints,
            client,
        }
    }

    /// Attach a bearer token to every upstream request
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    fn build_function(&self, endpoint: &Endpoint) -> ApiFunction {
        let client = self.client.clone();
        let method = endpoint.method;
        let url_template = format!(
            "{}{}",
            self.base_url.as_str().trim_end_matches('/'),
            endpoint.path
        );
        let token = self.bearer_token.clone();

        api_fn(move |args| {
            let client = client.clone();
            let url_template = url_template.clone();
            let token = token.clone();
            async move { execute(client, method, url_template, token, args).await }
        })
    }
}

#[async_trait]
impl ApiClientFactory for RestApiClientFactory {
    async fn create_api_client(&self) -> Result<ApiClient> {
        let mut api = ApiClient::new();
        for endpoint in &self.endpoints {
            api.insert(endpoint.name.clone(), self.build_function(endpoint));
        }
        Ok(api)
    }
}

/// Execute one upstream HTTP request
async fn execute(
    client: Client,
    method: HttpMethod,
    url_template: String,
    token: Option<String>,
    args: Value,
) -> Result<Value> {
    let args = match args {
        Value::Null => Map::new(),
        Value::Object(map) => map,
        _ => {
            return Err(GatewayError::ParseError(
                "Arguments must be an object".to_string(),
            ))
        }
    };

    let (url, remaining) = substitute_path(&url_template, args);
    let reqwest_method = method.to_reqwest();

    let mut request = client.request(reqwest_method.clone(), &url);

    if method.has_body() {
        if !remaining.is_empty() {
            request = request.json(&Value::Object(remaining));
        }
    } else if !remaining.is_empty() {
        let query: Vec<(String, String)> = remaining
            .iter()
            .map(|(name, value)| (name.clone(), query_value(value)))
            .collect();
        request = request.query(&query);
    }

    if let Some(token) = token.as_deref() {
        request = request.header("Authorization", format!("Bearer {}", token));
    }

    debug!("Executing {} {}", reqwest_method, url);

    let response = request
        .send()
        .await
        .map_err(|e| GatewayError::UpstreamError(format!("HTTP request failed: {}", e)))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| GatewayError::UpstreamError(format!("Failed to read response: {}", e)))?;

    debug!("Response status: {}", status);

    if status.is_success() {
        Ok(serde_json::from_str(&response_text).unwrap_or(Value::String(response_text)))
    } else {
        error!("Request failed with status {}: {}", status, response_text);
        Err(GatewayError::UpstreamError(format!(
            "HTTP {} - {}",
            status, response_text
        )))
    }
}

/// Substitute `{param}` placeholders from the arguments.
///
/// Consumed arguments are removed; the rest are returned for the query or
/// body.
fn substitute_path(template: &str, mut args: Map<String, Value>) -> (String, Map<String, Value>) {
    let mut url = template.to_string();

    let names: Vec<String> = args.keys().cloned().collect();
    for name in names {
        let placeholder = format!("{{{}}}", name);
        if url.contains(&placeholder) {
            if let Some(value) = args.remove(&name) {
                url = url.replace(&placeholder, &query_value(&value));
            }
        }
    }

    (url, args)
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}
