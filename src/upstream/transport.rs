//! HTTP transport for the revive command.

use std::time::Duration;

use async_trait::async_trait;
use axum::body::{Body, Bytes};
use axum::http::{header, Method, Request, Uri};
use http_body_util::BodyExt;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::routing::EntityReference;

/// Raw upstream reply: status plus buffered body, uninterpreted.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Bytes,
}

/// Errors crossing the upstream boundary. All of them render outward
/// as bad-gateway; none are retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Endpoint URL from configuration could not be used.
    #[error("invalid upstream endpoint '{url}': {reason}")]
    Endpoint { url: String, reason: String },

    /// Connection-level failure (refused, reset, DNS).
    #[error("upstream request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    /// The reply body could not be read to completion.
    #[error("failed to read upstream body: {0}")]
    Body(String),

    /// The configured deadline elapsed before the upstream answered.
    #[error("upstream request timed out after {0} seconds")]
    Timeout(u64),
}

/// Capability of issuing one revive command upstream.
///
/// Injected into server state as a trait object so tests substitute a
/// deterministic mock for the live connection.
#[async_trait]
pub trait ReviveTransport: Send + Sync {
    async fn revive(&self, entity: &EntityReference) -> Result<UpstreamReply, TransportError>;
}

/// The command envelope the tracker's API expects. Revive is the
/// inverse of its retire operation and shares the same endpoint.
#[derive(Serialize)]
struct ReviveCommand<'a> {
    method_name: &'static str,
    params: [CommandParams<'a>; 1],
}

#[derive(Serialize)]
struct CommandParams<'a> {
    entity_type: &'a str,
    entity_id: i64,
}

/// Live transport over the hyper legacy client.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client<HttpConnector, Body>,
    endpoint: Uri,
    timeout_secs: u64,
}

impl HttpTransport {
    /// Build a transport from upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, TransportError> {
        let endpoint: Uri = config.url.parse().map_err(|e| TransportError::Endpoint {
            url: config.url.clone(),
            reason: format!("{e}"),
        })?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(config.connect_timeout_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            endpoint,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl ReviveTransport for HttpTransport {
    async fn revive(&self, entity: &EntityReference) -> Result<UpstreamReply, TransportError> {
        let command = ReviveCommand {
            method_name: "revive",
            params: [CommandParams {
                entity_type: &entity.entity_type,
                entity_id: entity.id,
            }],
        };
        let payload = serde_json::to_vec(&command)
            .map_err(|e| TransportError::Body(format!("failed to encode command: {e}")))?;

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint.clone())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload))
            .map_err(|e| TransportError::Body(format!("failed to build request: {e}")))?;

        let response = tokio::time::timeout(
            Duration::from_secs(self.timeout_secs),
            self.client.request(request),
        )
        .await
        .map_err(|_| TransportError::Timeout(self.timeout_secs))??;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .collect()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?
            .to_bytes();

        tracing::debug!(
            entity = %entity,
            upstream_status = status,
            body_len = body.len(),
            "Upstream replied"
        );

        Ok(UpstreamReply { status, body })
    }
}
