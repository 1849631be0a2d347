//! Errors that abort an export run

use std::path::PathBuf;

use graphldi_core::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("view \"{0}\" not found")]
    ViewNotFound(String),

    #[error("invalid configuration {origin}: {message}")]
    Config { origin: String, message: String },

    #[error("cannot write document: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot write {}: {source}", path.display())]
    Output {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ExportError>;
