//! Optional source rendering
//!
//! Renders the runtime [`Schema`] as a compilable Rust module: one
//! enum per Enum field, a record struct with `Option<T>` for nullable
//! fields, and a `parse_log_entry` function. This is a packaging step
//! only; the runtime [`crate::synth::Parser`] is the authoritative
//! decoder and the rendered parser mirrors its contract (including
//! the boolean pass-through rule). Drift conditions that the runtime
//! parser reports as [`crate::DecodeError`] panic in rendered code.

use crate::schema::{FieldKind, FieldSchema, Schema};
use std::fmt::Write;

/// Render `schema` as the source text of a standalone Rust module
#[must_use]
pub fn render_module(schema: &Schema, marker: &str) -> String {
    let mut out = String::new();
    out.push_str("//! Generated log-payload parser. Do not edit.\n\n");
    out.push_str("use std::collections::HashMap;\n\n");

    for field in schema.fields() {
        if let FieldKind::Enum(members) = &field.kind {
            render_enum(&mut out, &enum_type_name(&field.name), members);
        }
    }

    render_struct(&mut out, schema);
    render_parse_fn(&mut out, schema, marker);
    out
}

/// `exprType` -> `ExprTypeKind`
fn enum_type_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len() + 4);
    let mut upper_next = true;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            name.extend(c.to_uppercase());
            upper_next = false;
        } else {
            name.push(c);
        }
    }
    name.push_str("Kind");
    name
}

/// `exprType` -> `expr_type`
fn struct_field_name(field: &str) -> String {
    let mut name = String::with_capacity(field.len() + 2);
    for c in field.chars() {
        if c.is_uppercase() {
            name.push('_');
            name.extend(c.to_lowercase());
        } else {
            name.push(c);
        }
    }
    name
}

fn rust_type(field: &FieldSchema) -> String {
    let base = match &field.kind {
        FieldKind::Bool => "bool".to_string(),
        FieldKind::Int => "i64".to_string(),
        FieldKind::Double => "f64".to_string(),
        FieldKind::Str => "String".to_string(),
        FieldKind::Enum(_) => enum_type_name(&field.name),
    };
    if field.nullable {
        format!("Option<{base}>")
    } else {
        base
    }
}

fn render_enum(out: &mut String, type_name: &str, members: &[String]) {
    let _ = writeln!(out, "#[derive(Debug, Clone, Copy, PartialEq, Eq)]");
    let _ = writeln!(out, "pub enum {type_name} {{");
    for member in members {
        let _ = writeln!(out, "    {member},");
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {type_name} {{");
    let _ = writeln!(out, "    pub fn from_name(name: &str) -> Option<Self> {{");
    out.push_str("        match name {\n");
    for member in members {
        let _ = writeln!(out, "            \"{member}\" => Some(Self::{member}),");
    }
    out.push_str("            _ => None,\n        }\n    }\n}\n\n");
}

fn render_struct(out: &mut String, schema: &Schema) {
    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    out.push_str("pub struct LogRecord {\n");
    for field in schema.fields() {
        let _ = writeln!(
            out,
            "    pub {}: {},",
            struct_field_name(&field.name),
            rust_type(field)
        );
    }
    out.push_str("}\n\n");
}

fn render_parse_fn(out: &mut String, schema: &Schema, marker: &str) {
    let _ = writeln!(
        out,
        "/// Parse one log line; `None` when it lacks a {marker} .. {marker} block."
    );
    out.push_str("pub fn parse_log_entry(message: &str) -> Option<LogRecord> {\n");
    let _ = writeln!(out, "    let marker = {marker:?};");
    out.push_str(
        "    let first = message.find(marker)?;\n\
         \x20   let after = first + marker.len();\n\
         \x20   let second = message[after..].find(marker)?;\n\
         \x20   let mut kv: HashMap<&str, &str> = HashMap::new();\n\
         \x20   for chunk in message[after..after + second].trim().split(';') {\n\
         \x20       if let Some(idx) = chunk.find(':') {\n\
         \x20           kv.insert(chunk[..idx].trim(), chunk[idx + 1..].trim());\n\
         \x20       }\n\
         \x20   }\n",
    );
    out.push_str("    Some(LogRecord {\n");
    for field in schema.fields() {
        let _ = writeln!(
            out,
            "        {}: {},",
            struct_field_name(&field.name),
            field_expr(field)
        );
    }
    out.push_str("    })\n}\n");
}

/// Decode expression for one field, mirroring the runtime parser
fn field_expr(field: &FieldSchema) -> String {
    let name = &field.name;
    let fetch = format!("kv[{name:?}]");
    let decode = |raw: &str| -> String {
        match &field.kind {
            FieldKind::Bool => format!("{raw}.eq_ignore_ascii_case(\"true\")"),
            FieldKind::Int => {
                format!("{raw}.parse().expect(\"schema drift: bad integer for `{name}`\")")
            }
            FieldKind::Double => {
                format!("{raw}.parse().expect(\"schema drift: bad double for `{name}`\")")
            }
            FieldKind::Str => format!("{raw}.to_string()"),
            FieldKind::Enum(_) => format!(
                "{}::from_name({raw}).expect(\"schema drift: unknown member for `{name}`\")",
                enum_type_name(name)
            ),
        }
    };

    if field.nullable {
        format!(
            "if {fetch} == \"null\" {{ None }} else {{ Some({}) }}",
            decode(&fetch)
        )
    } else {
        decode(&fetch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldKind, FieldSchema, Schema};

    fn sample_schema() -> Schema {
        Schema::new(vec![
            FieldSchema {
                name: "exprType".to_string(),
                kind: FieldKind::Enum(vec![
                    "IrGetValue".to_string(),
                    "IrCall".to_string(),
                ]),
                nullable: false,
            },
            FieldSchema {
                name: "hasSuppression".to_string(),
                kind: FieldKind::Bool,
                nullable: false,
            },
            FieldSchema {
                name: "someNumber".to_string(),
                kind: FieldKind::Int,
                nullable: true,
            },
        ])
    }

    #[test]
    fn name_conversions() {
        assert_eq!(enum_type_name("exprType"), "ExprTypeKind");
        assert_eq!(enum_type_name("expose_kind"), "ExposeKindKind");
        assert_eq!(struct_field_name("hasSuppression"), "has_suppression");
        assert_eq!(struct_field_name("plain"), "plain");
    }

    #[test]
    fn renders_enum_struct_and_parser() {
        let source = render_module(&sample_schema(), "KLEKLE");

        assert!(source.contains("pub enum ExprTypeKind {"));
        assert!(source.contains("    IrGetValue,"));
        assert!(source.contains("\"IrCall\" => Some(Self::IrCall),"));
        assert!(source.contains("pub struct LogRecord {"));
        assert!(source.contains("pub expr_type: ExprTypeKind,"));
        assert!(source.contains("pub has_suppression: bool,"));
        assert!(source.contains("pub some_number: Option<i64>,"));
        assert!(source.contains("pub fn parse_log_entry(message: &str) -> Option<LogRecord>"));
        assert!(source.contains("let marker = \"KLEKLE\";"));
    }

    #[test]
    fn nullable_fields_branch_on_the_sentinel() {
        let source = render_module(&sample_schema(), "KLEKLE");
        assert!(source
            .contains("if kv[\"someNumber\"] == \"null\" { None } else { Some("));
    }

    #[test]
    fn boolean_field_renders_the_pass_through_rule() {
        let source = render_module(&sample_schema(), "KLEKLE");
        assert!(source.contains("kv[\"hasSuppression\"].eq_ignore_ascii_case(\"true\")"));
    }
}
