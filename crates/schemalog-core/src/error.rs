//! Error types for parser synthesis and decoding
//!
//! Extraction-level absence is not an error (a message without a
//! marker pair is simply not schema-bearing). Errors here mean the
//! corpus being parsed no longer matches the inferred schema.

/// Parser synthesis errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    /// The corpus yielded zero payloads, so there is nothing to parse
    #[error("schema is empty: no payloads were extracted from the corpus")]
    EmptySchema,
}

/// Fatal per-entry decode errors (schema drift)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A schema field was absent from a parsed payload
    #[error("field `{field}` missing from payload")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// A value no longer conforms to its field's inferred kind
    #[error("field `{field}`: value `{value}` does not conform to inferred kind ({expected})")]
    SchemaDrift {
        /// Field whose contract was violated
        field: String,
        /// Offending raw value
        value: String,
        /// What the schema expected
        expected: String,
    },
}

impl DecodeError {
    /// Name of the field the error was raised on
    #[inline]
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field } | Self::SchemaDrift { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_field() {
        let missing = DecodeError::MissingField {
            field: "exprType".to_string(),
        };
        assert!(missing.to_string().contains("exprType"));
        assert_eq!(missing.field(), "exprType");

        let drift = DecodeError::SchemaDrift {
            field: "someNumber".to_string(),
            value: "seven".to_string(),
            expected: "Int".to_string(),
        };
        assert!(drift.to_string().contains("seven"));
        assert_eq!(drift.field(), "someNumber");
    }
}
