use std::io::Write;
use std::path::{Path, PathBuf};

use errcode_spec::Contract;

use crate::bindings::{Bindings, ErrorBinding};
use crate::context::EmitContext;
use crate::error::CodegenError;
use crate::registry::{EmitterRegistry, Language};
use crate::traits::ErrorCodeEmitter;

/// Base name of every generated file; the extension comes from the registry.
pub const OUTPUT_STEM: &str = "error_code";

/// One generated source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub language: Language,
    /// `error_code.<ext>`
    pub file_name: String,
    pub content: String,
}

impl GeneratedFile {
    /// Write the file into `dir`, replacing any existing file.
    ///
    /// Content goes to a temporary file in the same directory which is then
    /// renamed over the destination, so a failed write never leaves a
    /// half-written file behind.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, CodegenError> {
        let path = dir.join(&self.file_name);
        let write_err = |source: std::io::Error| CodegenError::Write {
            path: path.clone(),
            source,
        };

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        tmp.write_all(self.content.as_bytes()).map_err(write_err)?;
        tmp.flush().map_err(write_err)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(tmp.path(), std::fs::Permissions::from_mode(0o644))
                .map_err(write_err)?;
        }
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::info!(path = %path.display(), bytes = self.content.len(), "wrote generated file");
        Ok(path)
    }
}

/// The emission engine: binds a contract and drives the resolved emitter.
///
/// Generation is a pure function of (contract, language token); the
/// generator holds no mutable state and can be shared across threads.
#[derive(Debug, Clone, Copy)]
pub struct CodeGenerator<'r> {
    registry: &'r EmitterRegistry,
}

impl<'r> CodeGenerator<'r> {
    pub fn new(registry: &'r EmitterRegistry) -> Self {
        Self { registry }
    }

    /// Generate the error-code module for `contract` in the language named
    /// by `token`.
    pub fn generate(&self, contract: &Contract, token: &str) -> Result<GeneratedFile, CodegenError> {
        let (emitter, ext) = self.registry.resolve(token)?;
        tracing::debug!(language = token, "emitter resolved");

        let bindings = Bindings::bind(contract, emitter)?;
        let content = render(emitter, &bindings);

        tracing::debug!(
            language = token,
            errors = contract.error_count(),
            bytes = content.len(),
            "module rendered"
        );
        Ok(GeneratedFile {
            language: emitter.language(),
            file_name: format!("{OUTPUT_STEM}.{ext}"),
            content,
        })
    }
}

/// Assemble the module. Every language gets the same artifacts in the same
/// order; emitters only supply the syntax of each.
fn render(emitter: &dyn ErrorCodeEmitter, bindings: &Bindings) -> String {
    let mut ctx = EmitContext::new(emitter.indent_style());
    let all: Vec<&ErrorBinding> = bindings.all_errors().collect();

    let mut sections = vec![emitter.emit_service_constants(bindings, &mut ctx)];
    for group in bindings.groups() {
        sections.push(emitter.emit_error_constants(&group, &mut ctx));
    }
    sections.push(emitter.emit_message_table(&all, &mut ctx));
    sections.push(emitter.emit_category_table(&all, &mut ctx));
    sections.push(emitter.emit_context_table(&all, &mut ctx));
    sections.push(emitter.emit_formatter(&mut ctx));

    // Header and imports last: imports are only known once the body is emitted
    let mut out = emitter.emit_header(bindings, &mut ctx);
    let imports = emitter.emit_imports(&mut ctx);
    if !imports.is_empty() {
        out.push_str("\n\n");
        out.push_str(&imports);
    }
    for section in sections {
        out.push_str("\n\n");
        out.push_str(&section);
    }
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::ErrorGroup;
    use crate::context::IndentStyle;
    use errcode_spec::{ContextField, ErrorDefinition, Layout};
    use pretty_assertions::assert_eq;

    /// Emits one line per artifact so assembly order is easy to assert.
    struct OutlineEmitter;

    impl ErrorCodeEmitter for OutlineEmitter {
        fn language(&self) -> Language {
            Language::Go
        }
        fn file_extension(&self) -> &str {
            "txt"
        }
        fn indent_style(&self) -> IndentStyle {
            IndentStyle::Spaces(1)
        }
        fn reserved_identifiers(&self) -> &[&str] {
            &["X_RESERVED"]
        }
        fn emit_header(&self, b: &Bindings, _ctx: &mut EmitContext) -> String {
            format!("header {}", b.package_name)
        }
        fn emit_service_constants(&self, b: &Bindings, ctx: &mut EmitContext) -> String {
            ctx.add_import("", "meta");
            format!("service {} {}", b.service_name, b.service_abbreviation)
        }
        fn emit_error_constants(&self, g: &ErrorGroup<'_>, _ctx: &mut EmitContext) -> String {
            let ids: Vec<_> = g.errors.iter().map(|e| e.identifier.as_str()).collect();
            format!("{}: {}", g.title, ids.join(","))
        }
        fn emit_message_table(&self, e: &[&ErrorBinding], _ctx: &mut EmitContext) -> String {
            format!("messages {}", e.len())
        }
        fn emit_category_table(&self, e: &[&ErrorBinding], _ctx: &mut EmitContext) -> String {
            format!("categories {}", e.len())
        }
        fn emit_context_table(&self, e: &[&ErrorBinding], _ctx: &mut EmitContext) -> String {
            let fields: Vec<_> = e.iter().map(|b| b.context_fields.join("+")).collect();
            format!("context {}", fields.join(","))
        }
        fn emit_formatter(&self, _ctx: &mut EmitContext) -> String {
            "formatter".to_string()
        }
        fn emit_imports(&self, ctx: &mut EmitContext) -> String {
            let imports = ctx.take_imports();
            imports
                .iter()
                .map(|i| format!("import {}", i.from))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }

    fn def(code: &str, message: &str, fields: &[&str]) -> ErrorDefinition {
        ErrorDefinition {
            code: code.to_string(),
            message: message.to_string(),
            category: "client".to_string(),
            context: fields
                .iter()
                .map(|f| ContextField {
                    field: f.to_string(),
                    type_: "string".to_string(),
                    description: String::new(),
                })
                .collect(),
        }
    }

    fn contract() -> Contract {
        Contract {
            abbreviation: "X".to_string(),
            name: "demo".to_string(),
            common_errors: vec![def("INTERNAL", "internal", &[])],
            service_errors: vec![def("NOT_FOUND", "missing %s id %s", &["resource", "id"])],
            layout: Layout::Sectioned,
        }
    }

    fn outline_registry() -> EmitterRegistry {
        EmitterRegistry::from_emitters(vec![Box::new(OutlineEmitter)])
    }

    #[test]
    fn test_artifact_order() {
        let registry = outline_registry();
        let file = CodeGenerator::new(&registry).generate(&contract(), "go").unwrap();
        assert_eq!(file.file_name, "error_code.txt");
        assert_eq!(
            file.content,
            "header error_codes\n\n\
             import meta\n\n\
             service demo X\n\n\
             Common error codes: X_INTERNAL\n\n\
             demo service-specific error codes: X_NOT_FOUND\n\n\
             messages 2\n\n\
             categories 2\n\n\
             context ,resource+id\n\n\
             formatter\n"
        );
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let registry = outline_registry();
        let mut c = contract();
        c.common_errors.clear();
        let file = CodeGenerator::new(&registry).generate(&c, "go").unwrap();
        assert!(!file.content.contains("Common error codes"));
        assert!(file.content.contains("messages 1"));
    }

    #[test]
    fn test_malformed_placeholder_is_render_error() {
        let registry = outline_registry();
        let mut c = contract();
        c.service_errors.push(def("DISK_FULL", "disk 100% full", &[]));
        match CodeGenerator::new(&registry).generate(&c, "go").unwrap_err() {
            CodegenError::Render { language, code, reason } => {
                assert_eq!(language, Language::Go);
                assert_eq!(code, "DISK_FULL");
                assert!(reason.contains("'% '"));
            }
            e => panic!("Expected Render, got: {:?}", e),
        }
    }

    #[test]
    fn test_reserved_identifier_is_render_error() {
        let registry = outline_registry();
        let mut c = contract();
        c.service_errors.push(def("RESERVED", "reserved", &[]));
        let err = CodeGenerator::new(&registry).generate(&c, "go").unwrap_err();
        assert!(matches!(err, CodegenError::Render { ref code, .. } if code == "RESERVED"));
        assert!(err.to_string().contains("X_RESERVED"));
    }

    #[test]
    fn test_unsupported_token() {
        let registry = outline_registry();
        let err = CodeGenerator::new(&registry)
            .generate(&contract(), "python")
            .unwrap_err();
        assert!(matches!(err, CodegenError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn test_write_to_dir_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("error_code.go"), "stale").unwrap();

        let file = GeneratedFile {
            language: Language::Go,
            file_name: "error_code.go".to_string(),
            content: "package error_codes\n".to_string(),
        };
        let path = file.write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("error_code.go"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "package error_codes\n");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let file = GeneratedFile {
            language: Language::Rust,
            file_name: "error_code.rs".to_string(),
            content: String::new(),
        };
        match file.write_to_dir(&missing).unwrap_err() {
            CodegenError::Write { path, .. } => assert_eq!(path, missing.join("error_code.rs")),
            e => panic!("Expected Write, got: {:?}", e),
        }
        assert!(!missing.exists());
    }
}
