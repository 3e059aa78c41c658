//! Adapter implementations for port traits.
//!
//! - `live/`: Clipdrop client and the `reqwest` transport under it
//! - `recording/`: Record interactions to cassettes
//! - `replaying/`: Replay interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
