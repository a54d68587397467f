use crate::bindings::{Bindings, ErrorBinding, ErrorGroup};
use crate::context::{EmitContext, IndentStyle};
use crate::emitters::{comment_text, quote};
use crate::registry::Language;
use crate::traits::ErrorCodeEmitter;

/// Rust code emitter.
pub struct RustEmitter;

const RESERVED: &[&str] = &[
    "PACKAGE_NAME",
    "SERVICE_NAME",
    "SERVICE_ABBREVIATION",
    "ERROR_MESSAGES",
    "ERROR_CATEGORIES",
    "ERROR_CONTEXT_FIELDS",
    "error_message",
    "error_category",
    "format_message",
    "find_entry",
];

const LOOKUPS: &str = r#"/// Message template for `code`.
pub fn error_message(code: &str) -> Option<&'static str> {
    find_entry(ERROR_MESSAGES, code)
}

/// Category of `code`.
pub fn error_category(code: &str) -> Option<&'static str> {
    find_entry(ERROR_CATEGORIES, code)
}

fn find_entry<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    table.iter().find(|(c, _)| *c == code).map(|(_, v)| *v)
}"#;

const FORMATTER: &str = r#"/// Resolve the message template for `code` and fill its placeholders from
/// `context`. The n-th placeholder takes the value of the n-th declared
/// context field; placeholders without a value are kept as-is. Returns
/// `None` for an unknown code.
pub fn format_message<V: Display>(code: &str, context: &HashMap<&str, V>) -> Option<String> {
    let template = error_message(code)?;
    let fields = find_entry(ERROR_CONTEXT_FIELDS, code).unwrap_or(&[]);

    let mut out = String::with_capacity(template.len());
    let mut next = 0;
    let mut chars = template.chars();
    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some(verb @ ('s' | 'd' | 'v')) => {
                match fields.get(next).and_then(|field| context.get(field)) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        out.push('%');
                        out.push(verb);
                    }
                }
                next += 1;
            }
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push('%'),
        }
    }
    Some(out)
}"#;

impl RustEmitter {
    fn table(&self, name: &str, value_type: &str, entries: Vec<String>, ctx: &mut EmitContext) -> String {
        if entries.is_empty() {
            return format!("pub static {name}: &[(&str, {value_type})] = &[];");
        }
        let mut lines = vec![format!("pub static {name}: &[(&str, {value_type})] = &[")];
        ctx.push_indent();
        for entry in entries {
            lines.push(ctx.line(format!("{entry},")));
        }
        ctx.pop_indent();
        lines.push("];".to_string());
        lines.join("\n")
    }
}

impl ErrorCodeEmitter for RustEmitter {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn file_extension(&self) -> &str {
        "rs"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(4)
    }

    fn reserved_identifiers(&self) -> &[&str] {
        RESERVED
    }

    fn emit_header(&self, bindings: &Bindings, _ctx: &mut EmitContext) -> String {
        format!(
            "// Code generated by errcode. DO NOT EDIT.\n\
             //! Error codes for the {} service.\n\n\
             #![allow(dead_code, non_upper_case_globals)]",
            comment_text(&bindings.service_name)
        )
    }

    fn emit_service_constants(&self, bindings: &Bindings, _ctx: &mut EmitContext) -> String {
        [
            format!("pub const PACKAGE_NAME: &str = {};", rust_string(bindings.package_name)),
            format!("pub const SERVICE_NAME: &str = {};", rust_string(&bindings.service_name)),
            format!(
                "pub const SERVICE_ABBREVIATION: &str = {};",
                rust_string(&bindings.service_abbreviation)
            ),
        ]
        .join("\n")
    }

    fn emit_error_constants(&self, group: &ErrorGroup<'_>, _ctx: &mut EmitContext) -> String {
        let mut lines = vec![format!("// {}", comment_text(group.title))];
        for err in group.errors {
            lines.push(format!(
                "pub const {}: &str = {};",
                err.identifier,
                rust_string(&err.identifier)
            ));
        }
        lines.join("\n")
    }

    fn emit_message_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| format!("({}, {})", e.identifier, rust_string(&e.message)))
            .collect();
        format!(
            "/// Error code → message template.\n{}",
            self.table("ERROR_MESSAGES", "&str", entries, ctx)
        )
    }

    fn emit_category_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| format!("({}, {})", e.identifier, rust_string(&e.category)))
            .collect();
        format!(
            "/// Error code → category.\n{}",
            self.table("ERROR_CATEGORIES", "&str", entries, ctx)
        )
    }

    fn emit_context_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| {
                let fields: Vec<String> = e.context_fields.iter().map(|f| rust_string(f)).collect();
                format!("({}, &[{}])", e.identifier, fields.join(", "))
            })
            .collect();
        let table = self.table("ERROR_CONTEXT_FIELDS", "&[&str]", entries, ctx);
        format!(
            "/// Error code → context fields filling its placeholders, in order.\n{table}\n\n{LOOKUPS}"
        )
    }

    fn emit_formatter(&self, ctx: &mut EmitContext) -> String {
        ctx.add_import("HashMap", "std::collections");
        ctx.add_import("Display", "std::fmt");
        FORMATTER.to_string()
    }

    fn emit_imports(&self, ctx: &mut EmitContext) -> String {
        ctx.take_imports()
            .iter()
            .map(|imp| format!("use {}::{};", imp.from, imp.name))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn rust_string(s: &str) -> String {
    quote(s, |c| format!("\\u{{{:x}}}", c as u32))
}
