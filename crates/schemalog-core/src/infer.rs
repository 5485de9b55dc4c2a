//! Schema inference
//!
//! Accumulates per-field observation statistics across the whole
//! corpus, then resolves each field to exactly one kind. Field order
//! is first-seen order; enum member order is first-seen order of the
//! distinct values.
//!
//! Classification per observation, in corpus order:
//! - `"null"` (exact) marks the field nullable and is not classified
//!   further
//! - case-insensitive `"true"`/`"false"` marks boolean-like
//! - an `i64` literal marks integer-like
//! - an `f64` literal marks double-like
//! - anything else joins the distinct freeform set
//!
//! Resolution precedence: Bool, Int, Double, Enum, Str. The three
//! numeric/boolean rules all require the freeform set to be empty, so
//! a single freeform observation anywhere in the corpus forces the
//! field down to Enum or Str.

use crate::extract::Payload;
use crate::schema::{FieldKind, FieldSchema, Schema};
use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for "field absent" on the wire
pub(crate) const NULL_SENTINEL: &str = "null";

/// Enum members must look like identifiers
static IDENT: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[A-Za-z][A-Za-z0-9_]*$").unwrap());

const ENUM_MAX_MEMBERS: usize = 10;
const ENUM_MAX_VALUE_LEN: usize = 80;

/// Accumulated observations for one field
#[derive(Debug, Default)]
struct FieldStats {
    seen_null: bool,
    seen_bool: bool,
    seen_int: bool,
    seen_double: bool,
    freeform: IndexSet<String>,
}

impl FieldStats {
    fn observe(&mut self, raw: &str) {
        if raw == NULL_SENTINEL {
            self.seen_null = true;
        } else if raw.eq_ignore_ascii_case("true") || raw.eq_ignore_ascii_case("false") {
            self.seen_bool = true;
        } else if raw.parse::<i64>().is_ok() {
            self.seen_int = true;
        } else if raw.parse::<f64>().is_ok() {
            self.seen_double = true;
        } else {
            self.freeform.insert(raw.to_string());
        }
    }

    fn enum_eligible(&self) -> bool {
        (1..=ENUM_MAX_MEMBERS).contains(&self.freeform.len())
            && self
                .freeform
                .iter()
                .all(|v| v.len() < ENUM_MAX_VALUE_LEN && IDENT.is_match(v))
    }

    fn resolve(self, name: String) -> FieldSchema {
        let kind = if self.seen_bool
            && self.freeform.is_empty()
            && !self.seen_int
            && !self.seen_double
        {
            FieldKind::Bool
        } else if self.seen_int && !self.seen_double && self.freeform.is_empty() {
            FieldKind::Int
        } else if self.seen_double && self.freeform.is_empty() {
            FieldKind::Double
        } else if self.enum_eligible() {
            FieldKind::Enum(self.freeform.into_iter().collect())
        } else {
            FieldKind::Str
        };
        FieldSchema {
            name,
            kind,
            nullable: self.seen_null,
        }
    }
}

/// Infer a schema from extracted payloads
///
/// Consumes the payloads in corpus order; yields an empty schema when
/// no payloads were supplied (the caller treats that as "nothing to
/// generate").
pub fn infer<I>(payloads: I) -> Schema
where
    I: IntoIterator<Item = Payload>,
{
    let mut stats: IndexMap<String, FieldStats> = IndexMap::new();
    let mut observed = 0usize;

    for payload in payloads {
        observed += 1;
        for (key, value) in payload.pairs {
            stats.entry(key).or_default().observe(&value);
        }
    }

    tracing::debug!(payloads = observed, fields = stats.len(), "inference complete");
    Schema::new(
        stats
            .into_iter()
            .map(|(name, st)| st.resolve(name))
            .collect(),
    )
}
