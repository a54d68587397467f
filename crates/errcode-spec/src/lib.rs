pub mod loader;
pub mod parser;
pub mod template;
pub mod types;
pub mod validator;

// Re-exports
pub use loader::{load, load_file, ContractError};
pub use template::{MessageTemplate, TemplateError};
pub use types::contract::{Contract, ContextField, ErrorDefinition, Layout, Section};
pub use types::error::{ErrorEntry, Severity, ValidationReport};
