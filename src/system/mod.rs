pub mod collector;
pub mod linux;
pub mod snapshot;

use thiserror::Error;

/// Failure to read or parse a system-wide ceiling. Unlike a vanished
/// process, this is fatal: without the ceilings no percentage means
/// anything, so the run aborts before producing output.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read system ceiling {path}")]
    SystemCeiling {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse system ceiling {path}: {contents:?}")]
    SystemCeilingParse { path: &'static str, contents: String },
}
