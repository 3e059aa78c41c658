//! Error types for clipgen.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A classified failure from the image request client.
///
/// Every failure the client can hit is mapped into one of these variants
/// before it leaves the client, so callers only ever see a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GenerationError {
    /// No API key configured; no request was sent.
    #[error("Clipdrop API key is not configured. Set {env_var} or add it to the config file.")]
    Configuration {
        /// The environment variable that supplies the key.
        env_var: String,
    },

    /// The service rejected the API key (HTTP 401).
    #[error("Invalid API key. Please check your Clipdrop API key.")]
    Auth,

    /// The service is throttling requests (HTTP 429).
    #[error("Rate limit exceeded. Please wait a moment before trying again.")]
    RateLimited,

    /// No response within the request timeout.
    #[error("Request timeout. Please try again.")]
    Timeout,

    /// Any other non-200 status or transport failure.
    #[error("Failed to generate image. Please try again later.")]
    Generic {
        /// HTTP status, if a response was received.
        status: Option<u16>,
        /// Diagnostic detail. Logged, not shown to the user.
        detail: String,
    },
}

/// Errors that can occur while running the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// Image generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
