//! Images generated during one session, owned by the caller.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::ports::image_generator::{GenerationRequest, GenerationResult};

/// One generated image and the request that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// Unique id within the session.
    pub id: Uuid,
    /// Prompt as the user typed it.
    pub prompt: String,
    /// Style token.
    pub style: String,
    /// When the image arrived.
    pub created_at: DateTime<Utc>,
    /// Raw image bytes.
    pub data: Vec<u8>,
}

impl GeneratedImage {
    /// Pair a result with the request it answered.
    #[must_use]
    pub fn new(request: &GenerationRequest, result: GenerationResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            prompt: request.prompt.clone(),
            style: request.style.clone(),
            created_at: Utc::now(),
            data: result.data,
        }
    }

    /// The request that regenerates this image.
    #[must_use]
    pub fn to_request(&self) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            style: self.style.clone(),
        }
    }
}

/// Append-only list of generated images, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    images: Vec<GeneratedImage>,
}

impl Gallery {
    /// Return a gallery with `image` appended.
    #[must_use]
    pub fn with_image(mut self, image: GeneratedImage) -> Self {
        self.images.push(image);
        self
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing has been generated yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Most recently added image.
    #[must_use]
    pub fn latest(&self) -> Option<&GeneratedImage> {
        self.images.last()
    }

    /// Images in the order they were generated.
    pub fn oldest_first(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.images.iter()
    }

    /// Images most recent first, the order a results list shows them.
    pub fn newest_first(&self) -> impl Iterator<Item = &GeneratedImage> {
        self.images.iter().rev()
    }
}
