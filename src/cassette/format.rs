//! On-disk cassette layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A recorded session: every generator call made during one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cassette {
    /// Cassette name, `<timestamp>-<port>` when recorded by the CLI.
    pub name: String,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Git commit the recording was made from, or `"unknown"`.
    pub commit: String,
    /// Interactions in call order.
    #[serde(default)]
    pub interactions: Vec<Interaction>,
}

/// One call through a port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    /// Position in the recording, starting at 0.
    pub seq: u64,
    /// Port name, e.g. `"image_generator"`.
    pub port: String,
    /// Method name, e.g. `"generate"`.
    pub method: String,
    /// Serialized call input.
    pub input: serde_json::Value,
    /// Serialized `Result`, as `{"Ok": ...}` or `{"Err": ...}`.
    pub output: serde_json::Value,
}
