//! Parser synthesis
//!
//! Turns a frozen [`Schema`] into a [`Parser`]: a deterministic
//! decoder from payload-bearing messages to [`TypedRecord`]s. The
//! parser re-runs extraction with the same marker, so a message
//! without a marker pair decodes to `Ok(None)` rather than an error.
//!
//! Contract notes carried over from inference:
//! - Duplicate keys within one payload resolve to the LAST occurrence;
//!   earlier values are discarded (observable via a debug trace).
//! - A Bool field decodes to `true` iff the raw value
//!   case-insensitively equals `"true"`; every other non-null value,
//!   `"false"` and garbage alike, decodes to `false`. This is a
//!   pass-through of the inferred contract, not a validating parse.

use crate::error::{DecodeError, SynthesisError};
use crate::extract::extract;
use crate::infer::NULL_SENTINEL;
use crate::schema::{FieldKind, FieldSchema, Schema, TypedRecord, Value};
use indexmap::IndexMap;

/// A synthesized payload decoder bound to one schema and marker
#[derive(Debug, Clone)]
pub struct Parser {
    schema: Schema,
    marker: String,
}

/// Synthesize a parser for `schema`
///
/// Fails with [`SynthesisError::EmptySchema`] when the schema has no
/// fields; the caller should surface that as "nothing to generate".
pub fn synthesize(
    schema: Schema,
    marker: impl Into<String>,
) -> Result<Parser, SynthesisError> {
    if schema.is_empty() {
        return Err(SynthesisError::EmptySchema);
    }
    Ok(Parser {
        schema,
        marker: marker.into(),
    })
}

impl Parser {
    /// The schema this parser decodes into
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Decode one message
    ///
    /// Returns `Ok(None)` when the message carries no payload,
    /// `Ok(Some(record))` on success, and a [`DecodeError`] when the
    /// payload no longer conforms to the schema.
    pub fn parse(&self, message: &str) -> Result<Option<TypedRecord>, DecodeError> {
        let Some(payload) = extract(message, &self.marker) else {
            return Ok(None);
        };

        // last occurrence wins for duplicate keys
        let mut by_key: IndexMap<String, String> = IndexMap::new();
        for (key, value) in payload.pairs {
            if let Some(previous) = by_key.insert(key.clone(), value) {
                tracing::debug!(key = %key, discarded = %previous, "duplicate payload key collapsed");
            }
        }

        let mut fields = IndexMap::with_capacity(self.schema.len());
        for field in self.schema.fields() {
            let raw = by_key
                .get(&field.name)
                .ok_or_else(|| DecodeError::MissingField {
                    field: field.name.clone(),
                })?;

            let value = if raw == NULL_SENTINEL {
                if !field.nullable {
                    return Err(drift(field, raw, "non-nullable"));
                }
                None
            } else {
                Some(decode_value(field, raw)?)
            };
            fields.insert(field.name.clone(), value);
        }
        Ok(Some(TypedRecord { fields }))
    }
}

fn decode_value(field: &FieldSchema, raw: &str) -> Result<Value, DecodeError> {
    match &field.kind {
        // true iff case-insensitively "true"; everything else is false
        FieldKind::Bool => Ok(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        FieldKind::Int => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| drift(field, raw, "integer literal")),
        FieldKind::Double => raw
            .parse::<f64>()
            .map(Value::Double)
            .map_err(|_| drift(field, raw, "floating-point literal")),
        FieldKind::Enum(members) => {
            if members.iter().any(|m| m == raw) {
                Ok(Value::EnumTag(raw.to_string()))
            } else {
                Err(drift(field, raw, "known enum member"))
            }
        }
        FieldKind::Str => Ok(Value::Str(raw.to_string())),
    }
}

fn drift(field: &FieldSchema, raw: &str, expected: &str) -> DecodeError {
    DecodeError::SchemaDrift {
        field: field.name.clone(),
        value: raw.to_string(),
        expected: format!("{expected} {}", field.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MARKER: &str = "KLEKLE";

    fn test_schema() -> Schema {
        Schema::new(vec![
            FieldSchema {
                name: "a".to_string(),
                kind: FieldKind::Int,
                nullable: false,
            },
            FieldSchema {
                name: "b".to_string(),
                kind: FieldKind::Bool,
                nullable: false,
            },
            FieldSchema {
                name: "c".to_string(),
                kind: FieldKind::Str,
                nullable: true,
            },
        ])
    }

    fn parser() -> Parser {
        synthesize(test_schema(), MARKER).unwrap()
    }

    #[test]
    fn empty_schema_is_rejected() {
        let err = synthesize(Schema::default(), MARKER).unwrap_err();
        assert_eq!(err, SynthesisError::EmptySchema);
    }

    #[test]
    fn round_trip_decodes_typed_values() {
        let record = parser()
            .parse("KLEKLE a:7;b:true;c:null KLEKLE")
            .unwrap()
            .unwrap();

        assert_eq!(record.get("a"), Some(&Value::Int(7)));
        assert_eq!(record.get("b"), Some(&Value::Bool(true)));
        assert!(record.is_null("c"));
    }

    #[test]
    fn message_without_payload_is_not_an_error() {
        assert_eq!(parser().parse("plain message").unwrap(), None);
    }

    #[test]
    fn drift_on_bad_integer_literal() {
        let err = parser()
            .parse("KLEKLE a:seven;b:true;c:hi KLEKLE")
            .unwrap_err();
        assert_eq!(err.field(), "a");
        assert!(matches!(err, DecodeError::SchemaDrift { .. }));
    }

    #[test]
    fn missing_field_is_fatal() {
        let err = parser().parse("KLEKLE a:7;c:hi KLEKLE").unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                field: "b".to_string()
            }
        );
    }

    #[test]
    fn null_in_non_nullable_field_is_drift() {
        let err = parser()
            .parse("KLEKLE a:null;b:true;c:hi KLEKLE")
            .unwrap_err();
        assert_eq!(err.field(), "a");
        assert!(matches!(err, DecodeError::SchemaDrift { .. }));
    }

    #[test]
    fn boolean_pass_through_quirk() {
        // "false" and garbage both decode to false
        let record = parser()
            .parse("KLEKLE a:1;b:false;c:x KLEKLE")
            .unwrap()
            .unwrap();
        assert_eq!(record.get("b"), Some(&Value::Bool(false)));

        let record = parser()
            .parse("KLEKLE a:1;b:garbage;c:x KLEKLE")
            .unwrap()
            .unwrap();
        assert_eq!(record.get("b"), Some(&Value::Bool(false)));

        let record = parser()
            .parse("KLEKLE a:1;b:TRUE;c:x KLEKLE")
            .unwrap()
            .unwrap();
        assert_eq!(record.get("b"), Some(&Value::Bool(true)));
    }

    #[test]
    fn duplicate_key_last_occurrence_wins() {
        let record = parser()
            .parse("KLEKLE a:1;a:2;b:true;c:x KLEKLE")
            .unwrap()
            .unwrap();
        assert_eq!(record.get("a"), Some(&Value::Int(2)));
    }

    #[test]
    fn enum_requires_exact_member_match() {
        let schema = Schema::new(vec![FieldSchema {
            name: "e".to_string(),
            kind: FieldKind::Enum(vec!["Alpha".to_string(), "Beta".to_string()]),
            nullable: false,
        }]);
        let parser = synthesize(schema, MARKER).unwrap();

        let record = parser.parse("KLEKLE e:Beta KLEKLE").unwrap().unwrap();
        assert_eq!(record.get("e"), Some(&Value::EnumTag("Beta".to_string())));

        // case-sensitive match
        let err = parser.parse("KLEKLE e:beta KLEKLE").unwrap_err();
        assert!(matches!(err, DecodeError::SchemaDrift { .. }));

        let err = parser.parse("KLEKLE e:Gamma KLEKLE").unwrap_err();
        assert_eq!(err.field(), "e");
    }

    #[test]
    fn double_field_accepts_integer_literal() {
        let schema = Schema::new(vec![FieldSchema {
            name: "d".to_string(),
            kind: FieldKind::Double,
            nullable: false,
        }]);
        let parser = synthesize(schema, MARKER).unwrap();
        let record = parser.parse("KLEKLE d:3 KLEKLE").unwrap().unwrap();
        assert_eq!(record.get("d"), Some(&Value::Double(3.0)));
    }

    #[test]
    fn extra_payload_keys_are_ignored() {
        let record = parser()
            .parse("KLEKLE a:1;b:true;c:x;unknown:whatever KLEKLE")
            .unwrap()
            .unwrap();
        assert_eq!(record.fields.len(), 3);
    }

    #[test]
    fn record_fields_follow_schema_order() {
        // payload order differs from schema order
        let record = parser()
            .parse("KLEKLE c:x;a:1;b:true KLEKLE")
            .unwrap()
            .unwrap();
        let names: Vec<&str> = record.fields.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
