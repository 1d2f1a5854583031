//! Error types for kg-pages.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are printed with Debug, redirect to the Display message.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

#[derive(Error)]
pub enum RecordError {
    #[error("Invalid stream glob pattern `{pattern}`")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("Failed to read stream file: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Stream file is not valid JSON: {path}")]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Record #{index} in {path} is missing required field `{field}`")]
    MissingField {
        path: PathBuf,
        index: usize,
        field: &'static str,
    },
    #[error("Record #{index} in {path} is invalid: {source}")]
    Invalid {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Error)]
pub enum BuildError {
    #[error("Failed to render page `{path}`: {message}")]
    RenderFailed { path: String, message: String },
    #[error("Failed to write `{path}`")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to rewrite the head of `{path}`: {message}")]
    HeadRewriteFailed { path: String, message: String },
}

#[derive(Error)]
pub enum AssetError {
    #[error("Failed to start the Tailwind CLI at {binary}")]
    TailwindSpawnFailed {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Tailwind CSS process failed with status {status}: {stderr}")]
    TailwindFailed { status: String, stderr: String },
    #[error("Failed to write asset file: {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy static file {from} to {to}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl_debug_for_error!(RecordError, BuildError, AssetError);
