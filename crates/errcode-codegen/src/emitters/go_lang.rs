use crate::bindings::{Bindings, ErrorBinding, ErrorGroup};
use crate::context::{EmitContext, IndentStyle};
use crate::emitters::{comment_text, quote};
use crate::registry::Language;
use crate::traits::ErrorCodeEmitter;

/// Go language emitter.
pub struct GoEmitter;

const FORMATTER: &str = r#"// ErrUnknownCode is returned by FormatMessage for codes missing from ErrorMessages.
var ErrUnknownCode = errors.New("unknown error code")

// FormatMessage resolves the message template for code and fills its
// placeholders from context. The n-th placeholder takes the value of the
// n-th declared context field; placeholders without a value are kept as-is.
func FormatMessage(code string, context map[string]interface{}) (string, error) {
	template, ok := ErrorMessages[code]
	if !ok {
		return "", fmt.Errorf("%w: %s", ErrUnknownCode, code)
	}
	fields := ErrorContextFields[code]

	var out strings.Builder
	next := 0
	for i := 0; i < len(template); i++ {
		c := template[i]
		if c != '%' || i+1 == len(template) {
			out.WriteByte(c)
			continue
		}
		i++
		verb := template[i]
		switch verb {
		case '%':
			out.WriteByte('%')
		case 's', 'd', 'v':
			value, found := contextValue(fields, next, context)
			next++
			if found {
				out.WriteString(value)
			} else {
				out.WriteByte('%')
				out.WriteByte(verb)
			}
		default:
			out.WriteByte('%')
			out.WriteByte(verb)
		}
	}
	return out.String(), nil
}

func contextValue(fields []string, index int, context map[string]interface{}) (string, bool) {
	if index >= len(fields) {
		return "", false
	}
	value, ok := context[fields[index]]
	if !ok {
		return "", false
	}
	return fmt.Sprint(value), true
}"#;

impl GoEmitter {
    /// Map literal keyed by error constants, values aligned as gofmt does.
    fn map_literal(
        &self,
        doc: &str,
        name: &str,
        value_type: &str,
        entries: Vec<(&str, String)>,
        ctx: &mut EmitContext,
    ) -> String {
        let mut lines = vec![format!("// {name} {doc}")];
        if entries.is_empty() {
            lines.push(format!("var {name} = map[string]{value_type}{{}}"));
            return lines.join("\n");
        }
        lines.push(format!("var {name} = map[string]{value_type}{{"));
        let width = entries.iter().map(|(key, _)| key.len()).max().unwrap_or(0) + 1;
        ctx.push_indent();
        for (key, value) in entries {
            let key = format!("{key}:");
            lines.push(ctx.line(format!("{key:<width$} {value},")));
        }
        ctx.pop_indent();
        lines.push("}".to_string());
        lines.join("\n")
    }
}

impl ErrorCodeEmitter for GoEmitter {
    fn language(&self) -> Language {
        Language::Go
    }

    fn file_extension(&self) -> &str {
        "go"
    }

    fn indent_style(&self) -> IndentStyle {
        IndentStyle::Tabs
    }

    fn reserved_identifiers(&self) -> &[&str] {
        // Every error constant contains '_', so only underscored names matter
        &[]
    }

    fn emit_header(&self, bindings: &Bindings, _ctx: &mut EmitContext) -> String {
        format!(
            "// Code generated by errcode. DO NOT EDIT.\n\
             // Error codes for the {} service.\n\n\
             package {}",
            comment_text(&bindings.service_name),
            bindings.package_name
        )
    }

    fn emit_service_constants(&self, bindings: &Bindings, _ctx: &mut EmitContext) -> String {
        let service = comment_text(&bindings.service_name);
        [
            "// PackageName is the name of this generated package.".to_string(),
            format!("const PackageName = {}", go_string(bindings.package_name)),
            String::new(),
            format!("// ServiceName is the name of the {service} service."),
            format!("const ServiceName = {}", go_string(&bindings.service_name)),
            String::new(),
            format!("// ServiceAbbreviation represents the abbreviation for the {service} service."),
            format!(
                "const ServiceAbbreviation = {}",
                go_string(&bindings.service_abbreviation)
            ),
        ]
        .join("\n")
    }

    fn emit_error_constants(&self, group: &ErrorGroup<'_>, ctx: &mut EmitContext) -> String {
        let mut lines = vec![
            format!("// {}", comment_text(group.title)),
            "const (".to_string(),
        ];
        let width = group.errors.iter().map(|e| e.identifier.len()).max().unwrap_or(0);
        ctx.push_indent();
        for err in group.errors {
            lines.push(ctx.line(format!(
                "{:<width$} = ServiceAbbreviation + {}",
                err.identifier,
                go_string(&format!("_{}", err.code))
            )));
        }
        ctx.pop_indent();
        lines.push(")".to_string());
        lines.join("\n")
    }

    fn emit_message_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| (e.identifier.as_str(), go_string(&e.message)))
            .collect();
        self.map_literal(
            "holds the mapping of error codes to human-readable messages.",
            "ErrorMessages",
            "string",
            entries,
            ctx,
        )
    }

    fn emit_category_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| (e.identifier.as_str(), go_string(&e.category)))
            .collect();
        self.map_literal(
            "holds the mapping of error codes to their categories.",
            "ErrorCategories",
            "string",
            entries,
            ctx,
        )
    }

    fn emit_context_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String {
        let entries = errors
            .iter()
            .map(|e| {
                let fields: Vec<String> = e.context_fields.iter().map(|f| go_string(f)).collect();
                (e.identifier.as_str(), format!("{{{}}}", fields.join(", ")))
            })
            .collect();
        self.map_literal(
            "lists the context fields that fill each code's placeholders, in order.",
            "ErrorContextFields",
            "[]string",
            entries,
            ctx,
        )
    }

    fn emit_formatter(&self, ctx: &mut EmitContext) -> String {
        ctx.add_import("", "errors");
        ctx.add_import("", "fmt");
        ctx.add_import("", "strings");
        FORMATTER.to_string()
    }

    fn emit_imports(&self, ctx: &mut EmitContext) -> String {
        let imports = ctx.take_imports();
        if imports.is_empty() {
            return String::new();
        }
        let mut lines = vec!["import (".to_string()];
        for imp in &imports {
            lines.push(format!("\t\"{}\"", imp.from));
        }
        lines.push(")".to_string());
        lines.join("\n")
    }
}

fn go_string(s: &str) -> String {
    quote(s, |c| format!("\\u{:04x}", c as u32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn binding(code: &str, message: &str, fields: &[&str]) -> ErrorBinding {
        ErrorBinding {
            code: code.to_string(),
            identifier: format!("USR_{code}"),
            message: message.to_string(),
            category: "client".to_string(),
            context_fields: fields.iter().map(|f| f.to_string()).collect(),
        }
    }

    #[test]
    fn test_emit_error_constants() {
        let errors = vec![binding("NOT_FOUND", "missing", &[])];
        let group = ErrorGroup {
            title: "users service-specific error codes",
            errors: &errors,
        };
        let mut ctx = EmitContext::new(IndentStyle::Tabs);
        let code = GoEmitter.emit_error_constants(&group, &mut ctx);
        assert_eq!(
            code,
            "// users service-specific error codes\n\
             const (\n\
             \tUSR_NOT_FOUND = ServiceAbbreviation + \"_NOT_FOUND\"\n\
             )"
        );
    }

    #[test]
    fn test_columns_aligned_like_gofmt() {
        let errors = vec![
            binding("INTERNAL", "internal", &[]),
            binding("INVALID_ARGUMENT", "invalid %s", &["argument"]),
        ];
        let group = ErrorGroup {
            title: "Common error codes",
            errors: &errors,
        };
        let mut ctx = EmitContext::new(IndentStyle::Tabs);
        assert_eq!(
            GoEmitter.emit_error_constants(&group, &mut ctx),
            "// Common error codes\n\
             const (\n\
             \tUSR_INTERNAL         = ServiceAbbreviation + \"_INTERNAL\"\n\
             \tUSR_INVALID_ARGUMENT = ServiceAbbreviation + \"_INVALID_ARGUMENT\"\n\
             )"
        );

        let all: Vec<&ErrorBinding> = errors.iter().collect();
        assert_eq!(
            GoEmitter.emit_category_table(&all, &mut ctx),
            "// ErrorCategories holds the mapping of error codes to their categories.\n\
             var ErrorCategories = map[string]string{\n\
             \tUSR_INTERNAL:         \"client\",\n\
             \tUSR_INVALID_ARGUMENT: \"client\",\n\
             }"
        );
    }

    #[test]
    fn test_emit_context_table() {
        let a = binding("INTERNAL", "internal", &[]);
        let b = binding("NOT_FOUND", "missing %s with id %s", &["resource", "id"]);
        let mut ctx = EmitContext::new(IndentStyle::Tabs);
        let code = GoEmitter.emit_context_table(&[&a, &b], &mut ctx);
        assert!(code.contains("var ErrorContextFields = map[string][]string{"));
        assert!(code.contains("\tUSR_INTERNAL:  {},\n"));
        assert!(code.contains("\tUSR_NOT_FOUND: {\"resource\", \"id\"},\n"));
    }

    #[test]
    fn test_empty_tables() {
        let mut ctx = EmitContext::new(IndentStyle::Tabs);
        let code = GoEmitter.emit_message_table(&[], &mut ctx);
        assert!(code.ends_with("var ErrorMessages = map[string]string{}"));
    }

    #[test]
    fn test_formatter_registers_imports() {
        let mut ctx = EmitContext::new(IndentStyle::Tabs);
        GoEmitter.emit_formatter(&mut ctx);
        assert_eq!(
            GoEmitter.emit_imports(&mut ctx),
            "import (\n\t\"errors\"\n\t\"fmt\"\n\t\"strings\"\n)"
        );
    }

    #[test]
    fn test_go_string_escapes() {
        assert_eq!(go_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
        assert_eq!(go_string("\u{1b}"), "\"\\u001b\"");
    }
}
