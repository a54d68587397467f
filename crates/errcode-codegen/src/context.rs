use indexmap::IndexSet;

/// Tracks state while an emitter writes one file: indentation and the
/// imports its artifacts need.
#[derive(Debug, Clone)]
pub struct EmitContext {
    indent_level: usize,
    indent_width: usize,
    use_tabs: bool,
    /// Collected imports (deduped, insertion-ordered)
    imports: IndexSet<Import>,
}

/// A single name the generated file needs from another module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    /// Imported item (e.g., "HashMap", "Optional"); empty for whole-module imports
    pub name: String,
    /// Module path (e.g., "std::collections", "typing", "strings")
    pub from: String,
}

/// Indentation style configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize),
    Tabs,
}

impl EmitContext {
    pub fn new(style: IndentStyle) -> Self {
        let (use_tabs, indent_width) = match style {
            IndentStyle::Spaces(n) => (false, n),
            IndentStyle::Tabs => (true, 1),
        };
        Self {
            indent_level: 0,
            indent_width,
            use_tabs,
            imports: IndexSet::new(),
        }
    }

    /// Current indentation string.
    pub fn indent(&self) -> String {
        let unit = if self.use_tabs { "\t" } else { " " };
        unit.repeat(self.indent_level * self.indent_width)
    }

    /// `text` prefixed with the current indentation.
    pub fn line(&self, text: impl AsRef<str>) -> String {
        format!("{}{}", self.indent(), text.as_ref())
    }

    pub fn push_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn pop_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Record that the file needs `name` from `from` (deduped).
    pub fn add_import(&mut self, name: impl Into<String>, from: impl Into<String>) {
        self.imports.insert(Import {
            name: name.into(),
            from: from.into(),
        });
    }

    pub fn imports(&self) -> &IndexSet<Import> {
        &self.imports
    }

    /// Drain all collected imports, sorted by module then name so the
    /// output does not depend on artifact emission order.
    pub fn take_imports(&mut self) -> Vec<Import> {
        let mut imports: Vec<Import> = std::mem::take(&mut self.imports).into_iter().collect();
        imports.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.name.cmp(&b.name)));
        imports
    }
}
