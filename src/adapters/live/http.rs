//! `reqwest`-backed HTTP transport.

use reqwest::multipart::Form;
use reqwest::Client;

use crate::ports::transport::{
    HttpTransport, OutboundRequest, TransportError, TransportFuture, TransportResponse,
};

/// Form field carrying the prompt.
const PROMPT_FIELD: &str = "prompt";

/// Live transport that posts multipart forms with `reqwest`.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for ReqwestTransport {
    fn send<'a>(&'a self, request: &'a OutboundRequest) -> TransportFuture<'a> {
        Box::pin(async move {
            let form = Form::new().text(PROMPT_FIELD, request.prompt.clone());
            let map_err = |e: reqwest::Error| {
                if e.is_timeout() {
                    TransportError::Timeout(request.timeout)
                } else {
                    TransportError::Network(e.to_string())
                }
            };

            let response = self
                .client
                .post(&request.url)
                .header(request.key_header, &request.api_key)
                .multipart(form)
                .timeout(request.timeout)
                .send()
                .await
                .map_err(map_err)?;

            let status = response.status().as_u16();
            let body = response.bytes().await.map_err(map_err)?.to_vec();

            Ok(TransportResponse { status, body })
        })
    }
}
