//! Live adapter for the Clipdrop text-to-image API.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use crate::config::{KeySource, CLIPDROP_KEY_ENV};
use crate::error::GenerationError;
use crate::ports::image_generator::{
    GenerateFuture, GenerationRequest, GenerationResult, ImageGenerator,
};
use crate::ports::transport::{HttpTransport, OutboundRequest, TransportError, TransportResponse};
use crate::prompts::enhance_prompt;

const CLIPDROP_API_URL: &str = "https://clipdrop-api.co/text-to-image/v1";
const API_KEY_HEADER: &str = "x-api-key";

/// Hard bound on one generation round trip: 30000 ms.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Image request client for Clipdrop.
///
/// Holds no per-call state; concurrent calls through `&self` are independent.
pub struct ClipdropGenerator {
    transport: Arc<dyn HttpTransport>,
    api_key: KeySource,
}

impl ClipdropGenerator {
    /// Create a generator. `api_key` is consulted on every call.
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>, api_key: KeySource) -> Self {
        Self { transport, api_key }
    }

    /// Request one image for `prompt` in `style`.
    ///
    /// Sends exactly one request, or none if no key is configured at the
    /// time of the call.
    ///
    /// # Errors
    ///
    /// Returns a classified [`GenerationError`] for a missing key, any
    /// non-200 status, a timeout, or a transport failure.
    pub async fn request_image(
        &self,
        prompt: &str,
        style: &str,
    ) -> Result<Vec<u8>, GenerationError> {
        let Some(api_key) = (self.api_key)() else {
            return Err(GenerationError::Configuration {
                env_var: CLIPDROP_KEY_ENV.to_string(),
            });
        };

        let request = OutboundRequest {
            url: CLIPDROP_API_URL.to_string(),
            key_header: API_KEY_HEADER,
            api_key,
            prompt: enhance_prompt(prompt, style),
            timeout: REQUEST_TIMEOUT,
        };
        debug!(
            style,
            prompt_len = request.prompt.len(),
            "Sending Clipdrop request"
        );

        // The transport is expected to honor `request.timeout`; this bounds one that doesn't.
        let send = self.transport.send(&request);
        let response = match tokio::time::timeout(REQUEST_TIMEOUT, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(TransportError::Timeout(after))) => {
                warn!(?after, "Clipdrop request timed out");
                return Err(GenerationError::Timeout);
            }
            Ok(Err(TransportError::Network(detail))) => {
                error!(%detail, "Clipdrop request failed");
                return Err(GenerationError::Generic {
                    status: None,
                    detail,
                });
            }
            Err(_) => {
                warn!(after = ?REQUEST_TIMEOUT, "Clipdrop request exceeded deadline");
                return Err(GenerationError::Timeout);
            }
        };

        classify_response(response)
    }
}

/// Map a completed exchange to image bytes or a classified error.
fn classify_response(response: TransportResponse) -> Result<Vec<u8>, GenerationError> {
    match response.status {
        200 => {
            debug!(bytes = response.body.len(), "Clipdrop returned image");
            Ok(response.body)
        }
        401 => Err(GenerationError::Auth),
        429 => Err(GenerationError::RateLimited),
        status => {
            let detail = truncate_body(&response.body);
            error!(status, %detail, "Clipdrop API error");
            Err(GenerationError::Generic {
                status: Some(status),
                detail,
            })
        }
    }
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() > 500 {
        format!("{}...", text.chars().take(500).collect::<String>())
    } else {
        text.into_owned()
    }
}

impl ImageGenerator for ClipdropGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let data = self.request_image(&request.prompt, &request.style).await?;
            Ok(GenerationResult { data })
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;
    use crate::ports::transport::TransportFuture;

    enum Reply {
        Status(u16, Vec<u8>),
        EchoPrompt,
        Hang(Duration),
        Timeout,
        Network,
    }

    struct MockTransport {
        reply: Reply,
        calls: AtomicUsize,
        seen: Mutex<Vec<OutboundRequest>>,
    }

    impl MockTransport {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn seen(&self) -> Vec<OutboundRequest> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl HttpTransport for MockTransport {
        fn send<'a>(&'a self, request: &'a OutboundRequest) -> TransportFuture<'a> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(request.clone());
            Box::pin(async move {
                match &self.reply {
                    Reply::Status(status, body) => Ok(TransportResponse {
                        status: *status,
                        body: body.clone(),
                    }),
                    Reply::EchoPrompt => {
                        tokio::task::yield_now().await;
                        let body = request.prompt.clone().into_bytes();
                        Ok(TransportResponse { status: 200, body })
                    }
                    Reply::Hang(delay) => {
                        tokio::time::sleep(*delay).await;
                        let body = vec![1];
                        Ok(TransportResponse { status: 200, body })
                    }
                    Reply::Timeout => Err(TransportError::Timeout(request.timeout)),
                    Reply::Network => Err(TransportError::Network("connection refused".into())),
                }
            })
        }
    }

    fn fixed_key(key: Option<&str>) -> KeySource {
        let key = key.map(str::to_string);
        Arc::new(move || key.clone())
    }

    fn generator(transport: &Arc<MockTransport>) -> ClipdropGenerator {
        ClipdropGenerator::new(transport.clone(), fixed_key(Some("test-key")))
    }

    async fn request_cat(transport: &Arc<MockTransport>) -> Result<Vec<u8>, GenerationError> {
        let client = generator(transport);
        client.request_image("a cat", "anime").await
    }

    #[tokio::test]
    async fn success_returns_body_unchanged() {
        let body = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF, 0x10];
        let transport = MockTransport::new(Reply::Status(200, body.clone()));

        let data = request_cat(&transport).await.unwrap();

        assert_eq!(data, body);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn missing_key_makes_no_call() {
        let transport = MockTransport::new(Reply::Status(200, vec![1]));
        let client = ClipdropGenerator::new(transport.clone(), fixed_key(None));

        let err = client.request_image("a cat", "anime").await.unwrap_err();

        let expected = GenerationError::Configuration {
            env_var: "CLIPDROP_API_KEY".into(),
        };
        assert_eq!(err, expected);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn key_is_read_on_every_call() {
        let transport = MockTransport::new(Reply::Status(200, vec![1]));
        let slot: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let source = Arc::clone(&slot);
        let client = ClipdropGenerator::new(
            transport.clone(),
            Arc::new(move || source.lock().unwrap().clone()),
        );

        let err = client.request_image("a cat", "anime").await.unwrap_err();
        assert!(matches!(err, GenerationError::Configuration { .. }));
        assert_eq!(transport.calls(), 0);

        *slot.lock().unwrap() = Some("late-key".into());
        client.request_image("a cat", "anime").await.unwrap();

        assert_eq!(transport.calls(), 1);
        assert_eq!(transport.seen()[0].api_key, "late-key");
    }

    #[tokio::test]
    async fn status_401_is_auth() {
        let transport = MockTransport::new(Reply::Status(401, b"unauthorized".to_vec()));
        let err = request_cat(&transport).await.unwrap_err();
        assert_eq!(err, GenerationError::Auth);
    }

    #[tokio::test]
    async fn status_429_is_rate_limited() {
        let transport = MockTransport::new(Reply::Status(429, Vec::new()));
        let err = request_cat(&transport).await.unwrap_err();
        assert_eq!(err, GenerationError::RateLimited);
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn status_500_is_generic() {
        let transport = MockTransport::new(Reply::Status(500, b"boom".to_vec()));
        let err = request_cat(&transport).await.unwrap_err();
        let expected = GenerationError::Generic {
            status: Some(500),
            detail: "boom".into(),
        };
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn other_success_codes_are_generic() {
        let transport = MockTransport::new(Reply::Status(204, Vec::new()));
        let err = request_cat(&transport).await.unwrap_err();
        let expected = GenerationError::Generic {
            status: Some(204),
            detail: String::new(),
        };
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn transport_timeout_is_timeout() {
        let transport = MockTransport::new(Reply::Timeout);
        let err = request_cat(&transport).await.unwrap_err();
        assert_eq!(err, GenerationError::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_transport_resolves_to_timeout() {
        let transport = MockTransport::new(Reply::Hang(Duration::from_secs(31)));
        let err = request_cat(&transport).await.unwrap_err();
        assert_eq!(err, GenerationError::Timeout);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_but_in_time_succeeds() {
        let transport = MockTransport::new(Reply::Hang(Duration::from_secs(29)));
        let data = request_cat(&transport).await.unwrap();
        assert_eq!(data, vec![1]);
    }

    #[tokio::test]
    async fn network_failure_is_generic() {
        let transport = MockTransport::new(Reply::Network);
        let err = request_cat(&transport).await.unwrap_err();
        let expected = GenerationError::Generic {
            status: None,
            detail: "connection refused".into(),
        };
        assert_eq!(err, expected);
    }

    #[tokio::test]
    async fn wire_request_shape() {
        let transport = MockTransport::new(Reply::Status(200, vec![1]));
        request_cat(&transport).await.unwrap();

        let seen = transport.seen();
        assert_eq!(seen.len(), 1);
        let request = &seen[0];
        assert_eq!(request.url, "https://clipdrop-api.co/text-to-image/v1");
        assert_eq!(request.key_header, "x-api-key");
        assert_eq!(request.api_key, "test-key");
        assert!(request.prompt.contains("a cat"));
        assert!(request.prompt.contains("anime style"));
        let quality = "high quality, detailed, professional";
        assert!(request.prompt.contains(quality));
    }

    #[tokio::test]
    async fn timeout_is_always_thirty_seconds() {
        let transport = MockTransport::new(Reply::Status(200, vec![1]));
        let client = generator(&transport);
        let long = "long ".repeat(200);
        let cases = [
            ("a cat", "anime"),
            ("x", "unknown-style"),
            (long.as_str(), ""),
        ];
        for (prompt, style) in cases {
            client.request_image(prompt, style).await.unwrap();
        }

        let seen = transport.seen();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|r| r.timeout == Duration::from_secs(30)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_calls_do_not_cross_talk() {
        let transport = MockTransport::new(Reply::EchoPrompt);
        let client = generator(&transport);

        let (first, second) = tokio::join!(
            client.request_image("a red fox", "watercolor"),
            client.request_image("a blue whale", "sketch"),
        );

        let first = String::from_utf8(first.unwrap()).unwrap();
        let second = String::from_utf8(second.unwrap()).unwrap();
        assert!(first.contains("a red fox"));
        assert!(first.contains("watercolor style"));
        assert!(!first.contains("whale"));
        assert!(second.contains("a blue whale"));
        assert!(second.contains("sketch style"));
        assert!(!second.contains("fox"));
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn generate_wraps_request_image() {
        let transport = MockTransport::new(Reply::Status(200, vec![9, 8, 7]));
        let request = GenerationRequest::new("a cat", "anime").unwrap();

        let result = generator(&transport).generate(&request).await.unwrap();

        assert_eq!(result.data, vec![9, 8, 7]);
    }

    #[test]
    fn long_bodies_are_truncated() {
        let detail = truncate_body(&vec![b'x'; 2000]);
        assert_eq!(detail.len(), 503);
        assert!(detail.ends_with("..."));
    }
}
