//! Error types for hiera-module

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] hiera_core::Error),

    #[error("Malformed args document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot read args file {path}: {source}")]
    ArgsFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Usage: hiera <args-file>")]
    MissingArgsFile,
}
