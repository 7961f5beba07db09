//! Error types for `DotaConst`

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("DotaLex error: {0}")]
    DotaLex(#[from] dotalex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] toml::de::Error),

    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// A source document a job needs is not in the data directory.
    #[error("Missing source document: {}", path.display())]
    MissingSource { path: PathBuf },

    /// A source document does not have the structure a transform expects.
    #[error("Unexpected layout in {document}: {message}")]
    SourceLayout { document: String, message: String },

    #[error("Unknown job: {0}")]
    UnknownJob(String),
}

impl Error {
    pub(crate) fn layout(document: &str, message: impl Into<String>) -> Self {
        Error::SourceLayout {
            document: document.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
