//! Error types for corpus loading

use std::path::PathBuf;

/// Errors raised while walking or decoding the corpus
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Filesystem access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A container document could not be decoded
    #[error("failed to decode container document {path}: {source}")]
    Decode {
        /// File that failed to decode
        path: PathBuf,
        /// Underlying YAML error
        #[source]
        source: serde_yaml::Error,
    },
}
