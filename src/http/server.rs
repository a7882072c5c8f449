//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router and wire up middleware (tracing, timeout,
//!   request ID)
//! - Dispatch every request through the revive matcher
//! - Forward matched requests to the upstream transport
//! - Render the classified outcome as the outward response

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{any, get},
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::request::{RequestIdExt, RequestIdLayer};
use crate::observability::metrics;
use crate::revive::{classify, RevivalOutcome};
use crate::routing::match_revive;
use crate::upstream::{HttpTransport, ReviveTransport, TransportError};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub transport: Arc<dyn ReviveTransport>,
}

/// HTTP server for the revive gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server talking to the configured upstream over HTTP.
    pub fn new(config: GatewayConfig) -> Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new(&config.upstream)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a server with an injected transport. Tests substitute a
    /// deterministic mock here.
    pub fn with_transport(config: GatewayConfig, transport: Arc<dyn ReviveTransport>) -> Self {
        let state = AppState { transport };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/healthz", get(health_handler))
            .route("/", any(revive_dispatch))
            .route("/{*path}", any(revive_dispatch))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Outward JSON error payload. Callers must branch on the status code,
/// not on this body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody { error: message.into() })).into_response()
}

/// Liveness probe.
async fn health_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
    .into_response()
}

/// Main dispatch handler.
/// Matches the revive pattern, forwards upstream, classifies the reply.
async fn revive_dispatch(State(state): State<AppState>, request: axum::http::Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let Some(entity) = match_revive(&method, &path) else {
        tracing::debug!(
            request_id = %request_id,
            method = %method,
            path = %path,
            "No revive target in request"
        );
        metrics::record_request(method.as_str(), 404, "no_match", start_time);
        return error_response(StatusCode::NOT_FOUND, "no revive target in request path");
    };

    tracing::debug!(
        request_id = %request_id,
        entity = %entity,
        "Forwarding revive command"
    );

    let reply = match state.transport.revive(&entity).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                entity = %entity,
                error = %e,
                "Upstream transport failure"
            );
            metrics::record_request(method.as_str(), 502, "transport_failure", start_time);
            return error_response(StatusCode::BAD_GATEWAY, "upstream unreachable");
        }
    };

    let outcome = classify(reply.status, &reply.body);
    let status = outcome.status_code();

    tracing::info!(
        request_id = %request_id,
        entity = %entity,
        outcome = outcome.label(),
        status = status.as_u16(),
        "Revive request classified"
    );
    metrics::record_request(method.as_str(), status.as_u16(), outcome.label(), start_time);

    match outcome {
        // Success passes the upstream envelope through verbatim.
        RevivalOutcome::Success => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            reply.body,
        )
            .into_response(),
        RevivalOutcome::ClientError(message) => error_response(status, message),
        RevivalOutcome::NotFound => {
            error_response(status, format!("entity {entity} does not exist upstream"))
        }
        RevivalOutcome::Forbidden => error_response(
            status,
            format!("revive of {entity} blocked by an upstream permission rule"),
        ),
        RevivalOutcome::MalformedUpstream => {
            error_response(status, "upstream returned an unintelligible reply")
        }
    }
}
