//! schemalog model - the log-container boundary
//!
//! Everything upstream of the inference core:
//! - [`Document`]: serde model of one YAML log-container file
//! - [`RawEntry`] / [`LogBatch`]: decoded entries handed to the core
//! - [`walk_corpus`] / [`load_batches`]: deterministic corpus traversal
//!
//! The container format itself is an external collaborator's concern;
//! this crate only decodes it into the flat entry sequence the core
//! consumes.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod corpus;
mod document;
mod error;

pub use corpus::{load_batches, walk_corpus};
pub use document::{decode_batch, DiagnosticRecord, Document, LogBatch, RawEntry};
pub use error::CorpusError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
