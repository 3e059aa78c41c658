//! Replaying adapters that serve recorded interactions from cassettes.

pub mod image_generator;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;

/// Take the next recorded output for a port and method.
///
/// # Errors
///
/// Returns a description if the cassette has nothing left for the pair or
/// its lock is poisoned.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, String> {
    let mut guard = replayer
        .lock()
        .map_err(|e| format!("replayer lock poisoned: {e}"))?;
    let interaction = guard
        .next_interaction(port, method)
        .ok_or_else(|| format!("cassette exhausted for {port}::{method}"))?;
    tracing::debug!(
        port,
        method,
        seq = interaction.seq,
        remaining = guard.remaining(),
        "Replayed interaction"
    );
    Ok(interaction.output)
}
