//! HTTP dispatch server for mcp-omics.
//!
//! Exposes the operation catalog as plain JSON endpoints: one `POST` per
//! operation name, with the named parameters as the request body.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use omics_core::{Catalog, DispatchError, OperationInfo, ResultMap};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub const DEFAULT_GATEWAY_PORT: u16 = 4010;

/// Configuration for the gateway HTTP server.
#[derive(Debug, Clone)]
pub struct GatewayServerConfig {
    pub addr: SocketAddr,
    pub request_timeout: Duration,
}

impl GatewayServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            request_timeout: Duration::from_secs(30),
        }
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }
}

impl Default for GatewayServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_GATEWAY_PORT)))
    }
}

/// HTTP gateway wrapper.
pub struct GatewayServer {
    config: GatewayServerConfig,
    state: AppState,
}

impl GatewayServer {
    #[must_use]
    pub const fn new(catalog: Arc<Catalog>, config: GatewayServerConfig) -> Self {
        let state = AppState {
            catalog,
            request_timeout: config.request_timeout,
        };
        Self { config, state }
    }

    /// Runs the HTTP server until shutdown.
    ///
    /// # Errors
    /// Returns any listener or server error.
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = self.config.addr;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = build_router(self.state);

        info!("omics-gateway listening on {addr}");
        axum::serve(listener, app).await?;
        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
    request_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }

    fn timeout() -> Self {
        Self {
            status: StatusCode::GATEWAY_TIMEOUT,
            message: "upstream lookup timed out".to_string(),
        }
    }
}

impl From<DispatchError> for ApiError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::UnknownOperation(_) => Self::not_found(err.to_string()),
            DispatchError::MissingParameter { .. } | DispatchError::InvalidParameter { .. } => {
                Self::bad_request(err.to_string())
            }
            DispatchError::Provider(provider_err) => {
                warn!(error = %provider_err, "provider lookup failed");
                Self::bad_gateway(provider_err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let payload = Json(ErrorResponse { error: self.message });
        (self.status, payload).into_response()
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/tools", get(list_tools))
        .route("/tools/:name", post(call_tool))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn list_tools(State(state): State<AppState>) -> Json<Vec<OperationInfo>> {
    Json(state.catalog.operations())
}

async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ResultMap>, ApiError> {
    // Unknown names win over body problems.
    if state.catalog.lookup(&name).is_none() {
        return Err(DispatchError::UnknownOperation(name).into());
    }
    let Json(params) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let result = tokio::time::timeout(state.request_timeout, state.catalog.call(&name, &params))
        .await
        .map_err(|_| ApiError::timeout())??;

    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, header};
    use omics_core::{Endpoints, ProviderClient};
    use serde_json::json;
    use tower::ServiceExt;
    use wiremock::matchers::{any, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn router_for(base: String, request_timeout: Duration) -> Router {
        let client = ProviderClient::new(Endpoints::uniform(base), Duration::from_secs(5))
            .expect("client should build");
        build_router(AppState {
            catalog: Arc::new(Catalog::new(client)),
            request_timeout,
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should read");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn dispatches_named_operation() {
        let upstream = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/TP53"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": {"docs": [{"symbol": "TP53", "hgnc_id": "HGNC:11998"}]}
            })))
            .mount(&upstream)
            .await;

        let response = router_for(upstream.uri(), Duration::from_secs(5))
            .oneshot(post_json("/tools/get_gene_info", &json!({"gene_symbol": "TP53"})))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"symbol": "TP53", "hgnc_id": "HGNC:11998"})
        );
    }

    #[tokio::test]
    async fn unknown_operation_is_404_without_upstream_call() {
        let upstream = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&upstream)
            .await;

        let response = router_for(upstream.uri(), Duration::from_secs(5))
            .oneshot(post_json("/tools/get_weather", &json!({"city": "Hinxton"})))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"error": "operation not found: get_weather"})
        );
    }

    #[tokio::test]
    async fn missing_parameter_is_400() {
        let response = router_for("http://127.0.0.1:9".to_string(), Duration::from_secs(5))
            .oneshot(post_json("/tools/get_pdb_info", &json!({})))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_operation_without_body_is_404() {
        let request = Request::builder()
            .method("POST")
            .uri("/tools/get_weather")
            .body(Body::empty())
            .expect("request should build");
        let response = router_for("http://127.0.0.1:9".to_string(), Duration::from_secs(5))
            .oneshot(request)
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(response).await,
            json!({"error": "operation not found: get_weather"})
        );
    }

    #[tokio::test]
    async fn non_object_body_is_400_with_error_payload() {
        let response = router_for("http://127.0.0.1:9".to_string(), Duration::from_secs(5))
            .oneshot(post_json("/tools/get_pdb_info", &json!("7WRL")))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = body_json(response).await;
        assert!(payload["error"].is_string());
    }

    #[tokio::test]
    async fn missing_content_type_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/tools/get_pdb_info")
            .body(Body::from(r#"{"pdb_id": "7WRL"}"#))
            .expect("request should build");
        let response = router_for("http://127.0.0.1:9".to_string(), Duration::from_secs(5))
            .oneshot(request)
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_not_found_is_a_normal_response() {
        let upstream = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(404))
            .mount(&upstream)
            .await;

        let response = router_for(upstream.uri(), Duration::from_secs(5))
            .oneshot(post_json("/tools/get_drugbank_info", &json!({"drugbank_id": "DB0"})))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({"error": "DrugBank ID 'DB0' not found."})
        );
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let upstream = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&upstream)
            .await;

        let response = router_for(upstream.uri(), Duration::from_millis(50))
            .oneshot(post_json("/tools/get_pdb_info", &json!({"pdb_id": "7WRL"})))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn lists_operations() {
        let request = Request::builder()
            .uri("/tools")
            .body(Body::empty())
            .expect("request should build");
        let response = router_for("http://127.0.0.1:9".to_string(), Duration::from_secs(5))
            .oneshot(request)
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed[0]["name"], "get_pdb_info");
        assert_eq!(listed[0]["parameter"], "pdb_id");
        assert_eq!(listed.as_array().map(Vec::len), Some(6));
    }
}
