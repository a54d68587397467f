use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::types::contract::Contract;
use crate::types::error::{
    ErrorEntry, ValidationReport, E_DUPLICATE_CODE, E_INVALID_IDENTIFIER, E_MISSING_FIELD,
    W_DUPLICATE_CONTEXT_FIELD,
};

fn identifier_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"))
}

/// Whether `s` can be used as part of a constant name in every target language.
pub fn is_identifier(s: &str) -> bool {
    identifier_re().is_match(s)
}

/// Validate a parsed contract.
///
/// Walks the service header, then every error definition once in document
/// order (common errors first). Entries appear in the report in the same
/// order, so the first error entry is deterministic.
pub fn validate(contract: &Contract, file: &str) -> ValidationReport {
    let mut report = ValidationReport::success();

    check_service_fields(contract, file, &mut report);
    check_error_definitions(contract, file, &mut report);

    report
}

fn check_service_fields(contract: &Contract, file: &str, report: &mut ValidationReport) {
    let abbr_path = contract.service_field_path("abbreviation");
    if contract.abbreviation.is_empty() {
        report.push(
            ErrorEntry::error(
                E_MISSING_FIELD,
                "Service abbreviation is required",
                file,
                &abbr_path,
            )
            .with_suggestion("Add a short prefix such as 'USR' to 'abbreviation'"),
        );
    } else if !is_identifier(&contract.abbreviation) {
        report.push(
            ErrorEntry::error(
                E_INVALID_IDENTIFIER,
                format!(
                    "Service abbreviation '{}' is not a valid identifier",
                    contract.abbreviation
                ),
                file,
                &abbr_path,
            )
            .with_suggestion("Use letters, digits and underscores, not starting with a digit"),
        );
    }

    if contract.name.is_empty() {
        report.push(
            ErrorEntry::error(
                E_MISSING_FIELD,
                "Service name is required",
                file,
                &contract.service_field_path("name"),
            )
            .with_suggestion("Add a 'name' field to the service"),
        );
    }
}

fn check_error_definitions(contract: &Contract, file: &str, report: &mut ValidationReport) {
    // code -> path of its first occurrence
    let mut seen: IndexMap<&str, String> = IndexMap::new();

    for (section, index, def) in contract.indexed_errors() {
        let base = contract.error_path(section, index);

        if def.code.is_empty() {
            report.push(
                ErrorEntry::error(
                    E_MISSING_FIELD,
                    "Error code is required",
                    file,
                    &format!("{base}.code"),
                )
                .with_suggestion("Add a 'code' such as 'NOT_FOUND'"),
            );
        } else if !is_identifier(&def.code) {
            report.push(
                ErrorEntry::error(
                    E_INVALID_IDENTIFIER,
                    format!("Error code '{}' is not a valid identifier", def.code),
                    file,
                    &format!("{base}.code"),
                )
                .with_suggestion("Use letters, digits and underscores, not starting with a digit"),
            );
        } else if let Some(first) = seen.get(def.code.as_str()) {
            report.push(
                ErrorEntry::error(
                    E_DUPLICATE_CODE,
                    format!(
                        "Duplicate error code '{}' (first defined at {first})",
                        def.code
                    ),
                    file,
                    &format!("{base}.code"),
                )
                .with_suggestion("Error codes must be unique across common and service errors"),
            );
        } else {
            seen.insert(def.code.as_str(), base.clone());
        }

        if def.message.is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                format!("Error '{}' has no message", def.code),
                file,
                &format!("{base}.message"),
            ));
        }

        if def.category.is_empty() {
            report.push(ErrorEntry::error(
                E_MISSING_FIELD,
                format!("Error '{}' has no category", def.code),
                file,
                &format!("{base}.category"),
            ));
        }

        let mut fields: IndexMap<&str, usize> = IndexMap::new();
        for (i, ctx) in def.context.iter().enumerate() {
            if ctx.field.is_empty() {
                report.push(ErrorEntry::error(
                    E_MISSING_FIELD,
                    format!("Context entry of error '{}' has no field name", def.code),
                    file,
                    &format!("{base}.context[{i}].field"),
                ));
            } else if let Some(prev) = fields.insert(ctx.field.as_str(), i) {
                report.push(ErrorEntry::warning(
                    W_DUPLICATE_CONTEXT_FIELD,
                    format!(
                        "Context field '{}' of error '{}' is declared twice (also at index {prev})",
                        ctx.field, def.code
                    ),
                    file,
                    &format!("{base}.context[{i}].field"),
                ));
            }
        }
    }
}
