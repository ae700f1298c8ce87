//! Error types for Phalanx.

use thiserror::Error;

/// Failure to retrieve a single feed.
///
/// Recoverable: the source contributes nothing and the pipeline continues
/// with the remaining sources.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status: {0}")]
    Status(reqwest::StatusCode),

    #[error("response too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),
}

/// Fatal pipeline errors.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Every configured source failed. There is no meaningful block list
    /// to persist, so the run aborts without touching the artifact.
    #[error("all feed sources failed; refusing to write an empty block list")]
    NoSourcesAvailable,
}
