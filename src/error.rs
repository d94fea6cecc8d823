use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy for the fetch → decode → build → render pipeline.
///
/// The source prototype registered no failure handler at all; here every
/// stage reports a typed error and the caller decides how loudly to fail.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The request could not be sent or timed out.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("stats endpoint returned {status}: {body}")]
    Endpoint { status: u16, body: String },

    /// Body was not valid JSON, or the payload broke a table invariant,
    /// or a required column is absent.
    #[error("decode error: {0}")]
    Decode(String),

    /// Reading a saved payload from disk or stdin failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The output location does not exist.
    #[error("render target missing: {}", .0.display())]
    RenderTarget(PathBuf),

    /// Drawing or encoding failed in a rendering backend.
    #[error("render error: {0}")]
    Render(String),
}
