use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parser;
use crate::types::contract::Contract;
use crate::types::error::{ErrorEntry, Severity, ValidationReport, E_PARSE_ERROR};
use crate::validator;

/// Default contract file name looked up by the CLI.
pub const DEFAULT_CONTRACT_FILE: &str = "contract_error.yml";

/// Errors that abort loading a contract
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("failed to read contract '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed contract: {0}")]
    Parse(ErrorEntry),

    #[error("invalid contract: {first}{}", more_errors_suffix(.report))]
    Validation {
        /// First error in document order
        first: ErrorEntry,
        report: ValidationReport,
    },
}

fn more_errors_suffix(report: &ValidationReport) -> String {
    match report.count(Severity::Error) {
        0 | 1 => String::new(),
        n => format!(" (and {} more)", n - 1),
    }
}

/// Parse and validate a contract document.
///
/// On success returns the contract together with the validation report,
/// which may still carry warnings.
#[allow(clippy::result_large_err)]
pub fn load(bytes: &[u8], file: &str) -> Result<(Contract, ValidationReport), ContractError> {
    let content = std::str::from_utf8(bytes).map_err(|e| {
        ContractError::Parse(ErrorEntry::error(
            E_PARSE_ERROR,
            format!("Contract is not valid UTF-8: {e}"),
            file,
            "$",
        ))
    })?;
    let contract = parser::parse_contract(content, file).map_err(ContractError::Parse)?;

    let report = validator::validate(&contract, file);
    if let Some(first) = report.first_error() {
        return Err(ContractError::Validation {
            first: first.clone(),
            report,
        });
    }

    tracing::debug!(
        file,
        service = %contract.name,
        errors = contract.error_count(),
        "contract loaded"
    );
    Ok((contract, report))
}

/// Read a contract file from disk and [`load`] it.
#[allow(clippy::result_large_err)]
pub fn load_file(path: &Path) -> Result<(Contract, ValidationReport), ContractError> {
    let bytes = std::fs::read(path).map_err(|source| ContractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load(&bytes, &path.to_string_lossy())
}
