use serde::Deserialize;

use crate::types::contract::{Contract, ErrorDefinition, Layout};
use crate::types::error::{ErrorEntry, E_PARSE_ERROR};

/// On-disk shape of a contract document. Accepts both the flat form
/// (`abbreviation`/`name`/`errors`) and the sectioned form
/// (`common_errors` + `service`).
#[derive(Debug, Deserialize)]
struct ContractDocument {
    #[serde(default)]
    abbreviation: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    errors: Option<Vec<ErrorDefinition>>,
    #[serde(default)]
    common_errors: Vec<ErrorDefinition>,
    #[serde(default)]
    service: Option<ServiceSection>,
}

#[derive(Debug, Deserialize)]
struct ServiceSection {
    #[serde(default)]
    abbreviation: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    errors: Vec<ErrorDefinition>,
}

/// Parse a contract document (YAML, or JSON as a YAML subset).
#[allow(clippy::result_large_err)]
pub fn parse_contract(content: &str, file_path: &str) -> Result<Contract, ErrorEntry> {
    let doc: ContractDocument =
        serde_yaml::from_str(content).map_err(|e| serde_error_to_entry(e, file_path))?;

    match doc.service {
        Some(service) => {
            if doc.errors.as_ref().is_some_and(|e| !e.is_empty()) {
                return Err(ErrorEntry::error(
                    E_PARSE_ERROR,
                    "Top-level 'errors' cannot be combined with a 'service' section",
                    file_path,
                    "$.errors",
                )
                .with_suggestion("Move the entries under 'service.errors'"));
            }
            Ok(Contract {
                abbreviation: service.abbreviation,
                name: service.name,
                common_errors: doc.common_errors,
                service_errors: service.errors,
                layout: Layout::Sectioned,
            })
        }
        None => Ok(Contract {
            abbreviation: doc.abbreviation.unwrap_or_default(),
            name: doc.name.unwrap_or_default(),
            common_errors: doc.common_errors,
            service_errors: doc.errors.unwrap_or_default(),
            layout: Layout::Flat,
        }),
    }
}

/// Convert a serde_yaml error into a structured ErrorEntry
fn serde_error_to_entry(err: serde_yaml::Error, file_path: &str) -> ErrorEntry {
    let path = match err.location() {
        Some(loc) => format!("$.line:{}:col:{}", loc.line(), loc.column()),
        None => "$".to_string(),
    };

    ErrorEntry::error(
        E_PARSE_ERROR,
        format!("Contract parse error: {err}"),
        file_path,
        &path,
    )
    .with_suggestion("Check YAML syntax and field types")
}
