//! Producer-side payload writing
//!
//! The encoder half of the wire contract: a record serializes itself
//! into an ordered list of `(field, value)` string pairs via an
//! explicit method (no runtime introspection), and the writer wraps
//! them in the marker-bounded payload format the extractor consumes:
//!
//! ```text
//! KLEKLE exprType: IrGetValue; someNumber: 42 KLEKLE
//! ```
//!
//! Absent field values are written as the literal `null` sentinel.

/// Explicit, ordered serialization of one record's fields
///
/// Implementors return `(fieldName, stringValue)` pairs in declaration
/// order; absent values are rendered as `"null"`.
pub trait PayloadFields {
    /// Ordered field name/value pairs for the payload body
    fn payload_fields(&self) -> Vec<(String, String)>;
}

/// Render explicit pairs into a marker-bounded payload string
#[must_use]
pub fn write_payload(marker: &str, fields: &[(String, String)]) -> String {
    let body = fields
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("; ");
    format!("{marker} {body} {marker}")
}

/// Render a record's fields into a marker-bounded payload string
#[must_use]
pub fn write_record<T: PayloadFields>(marker: &str, record: &T) -> String {
    write_payload(marker, &record.payload_fields())
}
