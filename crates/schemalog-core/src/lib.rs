//! schemalog core - schema inference and parser synthesis
//!
//! The two-phase pipeline at the heart of the workspace:
//! - [`extract`]: slice the marker-bounded `key:value` payload out of
//!   a raw message
//! - [`infer`]: accumulate per-field statistics across a corpus and
//!   resolve each field to a concrete kind + nullability
//! - [`synthesize`]: turn the frozen [`Schema`] into a [`Parser`] that
//!   decodes payloads into [`TypedRecord`]s, or fails with a
//!   structured drift error
//! - [`apply`]: run the parser across the corpus and build a
//!   [`ParseReport`] for aggregation
//!
//! # Example
//!
//! ```rust
//! use schemalog_core::{extract, infer, synthesize, PipelineConfig};
//!
//! let cfg = PipelineConfig::default();
//! let messages = ["KLEKLE count:3;flag:true KLEKLE"];
//!
//! let payloads = messages.iter().filter_map(|m| extract(m, &cfg.marker));
//! let schema = infer(payloads);
//! let parser = synthesize(schema, &cfg.marker).unwrap();
//!
//! let record = parser.parse(messages[0]).unwrap().unwrap();
//! assert_eq!(record.fields.len(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod apply;
pub mod codegen;
pub mod config;
pub mod encode;
pub mod error;
pub mod extract;
pub mod infer;
pub mod schema;
pub mod synth;

// Re-exports for convenience
pub use apply::{apply, ParseReport, ParsedEntry};
pub use codegen::render_module;
pub use config::PipelineConfig;
pub use encode::{write_payload, write_record, PayloadFields};
pub use error::{DecodeError, SynthesisError};
pub use extract::{extract, Payload};
pub use infer::infer;
pub use schema::{FieldKind, FieldSchema, Schema, TypedRecord, Value};
pub use synth::{synthesize, Parser};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
