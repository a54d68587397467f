use crate::bindings::{Bindings, ErrorBinding, ErrorGroup};
use crate::context::{EmitContext, IndentStyle};
use crate::emitters::{comment_text, quote};
use crate::registry::Language;
use crate::traits::ErrorCodeEmitter;

/// Python code emitter.
pub struct PythonEmitter;

const RESERVED: &[&str] = &[
    "PACKAGE_NAME",
    "SERVICE_NAME",
    "SERVICE_ABBREVIATION",
    "ERROR_MESSAGES",
    "ERROR_CATEGORIES",
    "ERROR_CONTEXT_FIELDS",
    "format_message",
];

const FORMATTER: &str = r#"def format_message(code: str, context: Mapping[str, Any]) -> Optional[str]:
    """Resolve the message template for ``code`` and fill its placeholders.

    The n-th placeholder takes the value of the n-th declared context field;
    placeholders without a value are kept as-is. Returns ``None`` for an
    unknown code.
    """
    template = ERROR_MESSAGES.get(code)
    if template is None:
        return None
    fields = ERROR_CONTEXT_FIELDS.get(code, ())

    out = []
    next_field = 0
    i = 0
    while i < len(template):
        ch = template[i]
        if ch != "%" or i + 1 == len(template):
            out.append(ch)
            i += 1
            continue
        verb = template[i + 1]
        i += 2
        if verb == "%":
            out.append("%")
        elif verb in ("s", "d", "v"):
            field = fields[next_field] if next_field < len(fields) else None
            next_field += 1
            if field is not None and field in context:
                out.append(str(context[field]))
            else:
                out.append("%" + verb)
        else:
            out.append("%" + verb)
    return "".join(out)"#;

impl PythonEmitter {
    fn dict_literal(
        &self,
        name: &str,
        annotation: &str,
        entries: Vec<String>,
        ctx: &mut EmitContext,
    ) -> String {
        ctx.add_import("Dict", "typing");
        if entries.is_empty() {
            return format!("{name}: {annotation} = {{}}");
        }
        let mut lines = vec![format!("{name}: {annotation} = {{")];
        ctx.push_indent();
        for entry in entries {
            lines.push(ctx.line(format!("{entry},")));
        }
        ctx.pop_indent();
        lines.push("}".to_string());
        lines.join("\n")
    }
}

impl ErrorCodeEmitter for PythonEmitter {
    fn language(&self) -> Language {
        Language::Python
    }

    fn file_extension(&self) -> &str {
        "py"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Spaces(4)
    }

    fn reserved_identifiers(&self) -> &[&str] {
        RESERVED
    }

    fn is_reserved(&self, identifier: &str) -> bool {
        // Dunder names are module attributes (`__name__`) or not assignable (`__debug__`)
        let dunder = identifier.len() > 4 && identifier.starts_with("__") && identifier.ends_with("__");
        dunder || RESERVED.contains(&identifier)
    }

    fn emit_header(&self, bindings: &Bindings, _ctx: &mut EmitContext) -> String {
        // A leading string literal is the module docstring
        format!(
            "# Code generated by errcode. DO NOT EDIT.\n{}",
            py_string(&format!("Error codes for the {} service.", bindings.service_name))
        )
    }

    fn emit_service_constants(&self, bindings: &Bindings, _ctx: &mut EmitContext) -> String {
        [
            format!("PACKAGE_NAME = {}", py_string(bindings.package_name)),
            format!("SERVICE_NAME = {}", py_string(&bindings.service_name)),
            format!(
                "SERVICE_ABBREVIATION = {}",
                py_string(&bindings.service_abbreviation)
            ),
        ]
        .join("\n")
    }

    fn emit_error_constants(&self, group: &ErrorGroup<'_>, _ctx: &mut EmitContext) -> String {
        let mut lines = vec![format!("# {}", comment_text(group.title))];
        for err in group.errors {
            lines.push(format!("{} = {}", err.identifier, py_string(&err.identifier)));
        }
        lines.join("\n")
    }

    fn emit_message_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| format!("{}: {}", e.identifier, py_string(&e.message)))
            .collect();
        self.dict_literal("ERROR_MESSAGES", "Dict[str, str]", entries, ctx)
    }

    fn emit_category_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| format!("{}: {}", e.identifier, py_string(&e.category)))
            .collect();
        self.dict_literal("ERROR_CATEGORIES", "Dict[str, str]", entries, ctx)
    }

    fn emit_context_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        ctx.add_import("Tuple", "typing");
        let entries = errors
            .iter()
            .map(|e| format!("{}: {}", e.identifier, py_tuple(&e.context_fields)))
            .collect();
        self.dict_literal(
            "ERROR_CONTEXT_FIELDS",
            "Dict[str, Tuple[str, ...]]",
            entries,
            ctx,
        )
    }

    fn emit_formatter(&self, ctx: &mut EmitContext) -> String {
        ctx.add_import("Any", "typing");
        ctx.add_import("Mapping", "typing");
        ctx.add_import("Optional", "typing");
        // PEP 8: two blank lines before a top-level def
        format!("\n{FORMATTER}")
    }

    fn emit_imports(&self, ctx: &mut EmitContext) -> String {
        let imports = ctx.take_imports();
        let mut lines: Vec<String> = Vec::new();
        let mut current: Option<(&str, Vec<&str>)> = None;
        for imp in &imports {
            if let Some((module, names)) = current.as_mut() {
                if *module == imp.from {
                    names.push(imp.name.as_str());
                    continue;
                }
            }
            if let Some((module, names)) = current.take() {
                lines.push(format!("from {} import {}", module, names.join(", ")));
            }
            current = Some((imp.from.as_str(), vec![imp.name.as_str()]));
        }
        if let Some((module, names)) = current {
            lines.push(format!("from {} import {}", module, names.join(", ")));
        }
        lines.join("\n")
    }
}

fn py_string(s: &str) -> String {
    quote(s, |c| format!("\\u{:04x}", c as u32))
}

fn py_tuple(items: &[String]) -> String {
    match items {
        [] => "()".to_string(),
        [one] => format!("({},)", py_string(one)),
        _ => {
            let quoted: Vec<String> = items.iter().map(|i| py_string(i)).collect();
            format!("({})", quoted.join(", "))
        }
    }
}
