use crate::bindings::{Bindings, ErrorBinding, ErrorGroup};
use crate::context::{EmitContext, IndentStyle};
use crate::registry::Language;

/// Language-specific syntax for an error-code module.
///
/// The engine decides which artifacts a module contains and in what order;
/// an emitter only knows how each artifact is spelled in its language.
/// Emitters are stateless and must be deterministic.
pub trait ErrorCodeEmitter: Send + Sync {
    /// Which language this emitter targets.
    fn language(&self) -> Language;

    /// File extension without the dot (e.g., "go", "py", "rs").
    fn file_extension(&self) -> &str;

    fn indent_style(&self) -> IndentStyle;

    /// Names the emitter defines itself; an error constant with one of
    /// these names would not compile.
    fn reserved_identifiers(&self) -> &[&str];

    /// Whether an error constant named `identifier` would clash with the
    /// generated module or the target language.
    fn is_reserved(&self, identifier: &str) -> bool {
        self.reserved_identifiers().contains(&identifier)
    }

    /// Generated-code banner and module/package declaration.
    fn emit_header(&self, bindings: &Bindings, ctx: &mut EmitContext) -> String;

    /// Package name, service name and service abbreviation constants.
    fn emit_service_constants(&self, bindings: &Bindings, ctx: &mut EmitContext) -> String;

    /// One constant per error code in `group`.
    fn emit_error_constants(&self, group: &ErrorGroup<'_>, ctx: &mut EmitContext) -> String;

    /// Code → message template table.
    fn emit_message_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String;

    /// Code → category table.
    fn emit_category_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String;

    /// Code → declared context field names, in placeholder order.
    fn emit_context_table(&self, errors: &[&ErrorBinding], ctx: &mut EmitContext) -> String;

    /// `format(code, namedContext)` runtime helper.
    fn emit_formatter(&self, ctx: &mut EmitContext) -> String;

    /// Render collected imports. Called after every artifact is emitted.
    fn emit_imports(&self, ctx: &mut EmitContext) -> String;
}
