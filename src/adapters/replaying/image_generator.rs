//! Replaying adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use tracing::debug;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::GenerationError;
use crate::ports::image_generator::{
    GenerateFuture, GenerationRequest, GenerationResult, ImageGenerator,
};

type GenerateOutcome = Result<GenerationResult, GenerationError>;

/// Serves recorded generation results from a cassette.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        debug!(style = %request.style, "Replaying generation");
        let result = next_output(&self.replayer, "image_generator", "generate")
            .and_then(decode_output)
            .unwrap_or_else(|detail| Err(replay_failure(detail)));
        Box::pin(async move { result })
    }
}

fn decode_output(output: serde_json::Value) -> Result<GenerateOutcome, String> {
    serde_json::from_value(output)
        .map_err(|e| format!("malformed cassette entry: {e}"))
}

fn replay_failure(detail: String) -> GenerationError {
    GenerationError::Generic {
        status: None,
        detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn replaying(outputs: Vec<serde_json::Value>) -> ReplayingImageGenerator {
        let interactions = outputs
            .into_iter()
            .zip(0..)
            .map(|(output, seq)| Interaction {
                seq,
                port: "image_generator".into(),
                method: "generate".into(),
                input: json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "t".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        };
        ReplayingImageGenerator::new(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    fn request() -> GenerationRequest {
        GenerationRequest::new("a cat", "anime").unwrap()
    }

    #[tokio::test]
    async fn replays_ok_then_err() {
        let ok = json!({"Ok": {"data": "AQID"}});
        let err = json!({"Err": "Auth"});
        let generator = replaying(vec![ok, err]);

        let first = generator.generate(&request()).await.unwrap();
        assert_eq!(first.data, vec![1, 2, 3]);
        let second = generator.generate(&request()).await.unwrap_err();
        assert_eq!(second, GenerationError::Auth);
    }

    #[tokio::test]
    async fn exhausted_cassette_is_generic_error() {
        let generator = replaying(vec![]);
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GenerationError::Generic { status: None, .. }));
    }

    #[tokio::test]
    async fn malformed_entry_is_generic_error() {
        let generator = replaying(vec![json!({"Ok": {"data": 42}})]);
        let err = generator.generate(&request()).await.unwrap_err();
        match err {
            GenerationError::Generic { detail, .. } => assert!(detail.contains("malformed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
