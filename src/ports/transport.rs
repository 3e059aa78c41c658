//! HTTP transport port used by the image request client.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use thiserror::Error;

/// One outbound multipart POST carrying a single `prompt` form field.
#[derive(Clone)]
pub struct OutboundRequest {
    /// Endpoint URL.
    pub url: String,
    /// Header name the credential is sent under.
    pub key_header: &'static str,
    /// The credential.
    pub api_key: String,
    /// Value of the `prompt` form field.
    pub prompt: String,
    /// Timeout for the whole round trip.
    pub timeout: Duration,
}

impl std::fmt::Debug for OutboundRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutboundRequest")
            .field("url", &self.url)
            .field("key_header", &self.key_header)
            .field("api_key", &"<redacted>")
            .field("prompt", &self.prompt)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, unmodified.
    pub body: Vec<u8>,
}

/// Failures below the HTTP layer.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request did not complete within its timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS, or body read failure.
    #[error("network error: {0}")]
    Network(String),
}

/// Boxed future type returned by [`HttpTransport::send`].
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>>;

/// Sends one HTTP request per call.
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return whatever status came back.
    fn send<'a>(&'a self, request: &'a OutboundRequest) -> TransportFuture<'a>;
}
