//! Errors raised while loading or addressing the graph

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed document {origin}: {source}")]
    Parse {
        origin: String,
        source: serde_json::Error,
    },

    #[error("duplicate node id \"{0}\"")]
    DuplicateNode(String),

    #[error("edge refers to unknown node \"{0}\"")]
    UnknownNode(String),

    #[error("view \"{0}\" not found")]
    ViewNotFound(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
