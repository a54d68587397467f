use serde::{Deserialize, Serialize};

/// One piece of structured data a caller may supply when formatting
/// a dynamic error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextField {
    /// Name used to look up the supplied value
    pub field: String,
    /// Semantic type name (descriptive only)
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(default)]
    pub description: String,
}

/// A single named, categorized error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDefinition {
    #[serde(default)]
    pub code: String,
    /// Message template, may contain `%s` / `%d` / `%v` placeholders
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub category: String,
    /// Declared context fields; their order drives placeholder resolution
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub context: Vec<ContextField>,
}

impl ErrorDefinition {
    /// Declared context field names, in declaration order.
    pub fn context_field_names(&self) -> impl Iterator<Item = &str> {
        self.context.iter().map(|c| c.field.as_str())
    }
}

/// Which document shape a contract was read from.
///
/// Only affects the JSONPath reported in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `abbreviation`, `name`, `errors` at the top level
    Flat,
    /// `common_errors` plus a `service` section
    #[default]
    Sectioned,
}

/// Section of the contract an error definition belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Common,
    Service,
}

/// A parsed error contract for one service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contract {
    pub abbreviation: String,
    pub name: String,
    pub common_errors: Vec<ErrorDefinition>,
    pub service_errors: Vec<ErrorDefinition>,
    pub layout: Layout,
}

impl Contract {
    /// All error definitions in document order: common errors first,
    /// then service errors.
    pub fn all_errors(&self) -> impl Iterator<Item = &ErrorDefinition> {
        self.common_errors.iter().chain(self.service_errors.iter())
    }

    /// Like [`Contract::all_errors`], tagged with section and index.
    pub fn indexed_errors(&self) -> impl Iterator<Item = (Section, usize, &ErrorDefinition)> {
        let common = self
            .common_errors
            .iter()
            .enumerate()
            .map(|(i, e)| (Section::Common, i, e));
        let service = self
            .service_errors
            .iter()
            .enumerate()
            .map(|(i, e)| (Section::Service, i, e));
        common.chain(service)
    }

    /// Total number of error definitions across both sections.
    pub fn error_count(&self) -> usize {
        self.common_errors.len() + self.service_errors.len()
    }

    /// Look up an error definition by code in either section.
    pub fn find(&self, code: &str) -> Option<&ErrorDefinition> {
        self.all_errors().find(|e| e.code == code)
    }

    /// The emitted constant identifier for `code`.
    pub fn identifier(&self, code: &str) -> String {
        format!("{}_{}", self.abbreviation, code)
    }

    /// JSONPath of an error definition, matching the document layout.
    pub fn error_path(&self, section: Section, index: usize) -> String {
        match (section, self.layout) {
            (Section::Common, _) => format!("$.common_errors[{index}]"),
            (Section::Service, Layout::Sectioned) => format!("$.service.errors[{index}]"),
            (Section::Service, Layout::Flat) => format!("$.errors[{index}]"),
        }
    }

    /// JSONPath of a top-level service field (`abbreviation` or `name`).
    pub fn service_field_path(&self, field: &str) -> String {
        match self.layout {
            Layout::Sectioned => format!("$.service.{field}"),
            Layout::Flat => format!("$.{field}"),
        }
    }
}
