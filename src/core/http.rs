//! Transport seam between the client and the network
//!
//! Everything above this module talks to a [`Transport`]; only
//! [`ReqwestTransport`] actually opens connections. One `send` is one round trip,
//! with no retry of its own.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method};
use tracing::debug;

use crate::error::Result;

/// A single HTTP exchange to perform.
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

impl TransportRequest {
    pub fn get(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method: Method::GET,
            url: url.into(),
            query: Vec::new(),
            timeout,
        }
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Raw status, headers and body of a completed exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// Sends one request and hands back whatever came back, whatever the status.
///
/// Implementations fail only when no response was received at all
/// (`SwcError::Transport`).
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse>;
}

/// Headers sent with every request.
pub fn default_headers() -> HeaderMap {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        USER_AGENT,
        HeaderValue::from_static(concat!("swc-client/", env!("CARGO_PKG_VERSION"))),
    );
    h
}

/// [`Transport`] over a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = Client::builder().default_headers(default_headers()).build()?;
        Ok(Self { client })
    }

    /// Reuse an existing client (and its connection pool).
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse> {
        debug!(
            method = %request.method,
            url = %request.url,
            params = request.query.len(),
            "sending request"
        );

        let response = self
            .client
            .request(request.method.clone(), &request.url)
            .query(&request.query)
            .timeout(request.timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        debug!(status, bytes = body.len(), "received response");

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
