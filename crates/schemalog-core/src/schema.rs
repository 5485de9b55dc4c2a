//! Inferred schema and typed-record representation
//!
//! The schema is plain runtime data: a field list in first-seen order,
//! each field resolved to exactly one kind plus a nullability flag.
//! Decoding targets a tagged-variant [`Value`] rather than generated
//! types; source generation (see [`crate::codegen`]) is an optional
//! rendering of the same data.

use indexmap::IndexMap;
use serde::Serialize;

/// Resolved kind of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Every non-null observation looked boolean
    Bool,
    /// Every non-null observation parsed as an integer
    Int,
    /// Every non-null observation parsed as a number, some fractional
    Double,
    /// Small closed set of identifier-like values, in first-seen order
    Enum(Vec<String>),
    /// Fallback: free-form text
    Str,
}

impl FieldKind {
    /// Short human-readable kind name (enum member list elided)
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Int => "Int",
            Self::Double => "Double",
            Self::Enum(_) => "Enum",
            Self::Str => "Str",
        }
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enum(values) => write!(f, "Enum({})", values.join(" | ")),
            other => f.write_str(other.name()),
        }
    }
}

/// One resolved field: name, kind, nullability
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    /// Field name as it appears on the wire
    pub name: String,
    /// Resolved kind
    pub kind: FieldKind,
    /// True iff the literal `null` sentinel was ever observed
    pub nullable: bool,
}

/// The full inferred record shape, fields in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    /// Build a schema from an already-ordered field list
    #[inline]
    #[must_use]
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Fields in first-seen order
    #[inline]
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Number of fields
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the corpus yielded no payloads at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One decoded value, tagged by its field's kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Decoded boolean (see the pass-through rule in [`crate::synth`])
    Bool(bool),
    /// Decoded integer
    Int(i64),
    /// Decoded floating-point number
    Double(f64),
    /// Verbatim string
    Str(String),
    /// Matched enum member name
    EnumTag(String),
}

/// One decoded payload: a value (or null) per schema field, in schema
/// order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TypedRecord {
    /// Field name to decoded value; `None` only for nullable fields
    #[serde(flatten)]
    pub fields: IndexMap<String, Option<Value>>,
}

impl TypedRecord {
    /// Decoded value for `name`, if present and non-null
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).and_then(Option::as_ref)
    }

    /// Whether `name` decoded to the null sentinel
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.fields.get(name), Some(None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kind_display_lists_enum_members() {
        let kind = FieldKind::Enum(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(kind.to_string(), "Enum(A | B)");
        assert_eq!(FieldKind::Int.to_string(), "Int");
    }

    #[test]
    fn schema_lookup_by_name() {
        let schema = Schema::new(vec![FieldSchema {
            name: "a".to_string(),
            kind: FieldKind::Int,
            nullable: false,
        }]);
        assert!(schema.field("a").is_some());
        assert!(schema.field("b").is_none());
        assert_eq!(schema.len(), 1);
        assert!(!schema.is_empty());
    }

    #[test]
    fn record_null_accessors() {
        let mut fields = IndexMap::new();
        fields.insert("a".to_string(), Some(Value::Int(7)));
        fields.insert("c".to_string(), None);
        let record = TypedRecord { fields };

        assert_eq!(record.get("a"), Some(&Value::Int(7)));
        assert!(record.is_null("c"));
        assert!(!record.is_null("a"));
        assert!(!record.is_null("missing"));
    }
}
