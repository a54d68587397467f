use std::path::PathBuf;

use thiserror::Error;

use crate::registry::Language;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("unsupported language: '{token}' (expected one of: {})", .supported.join(", "))]
    UnsupportedLanguage {
        token: String,
        supported: Vec<&'static str>,
    },

    #[error("failed to render {language} output for error code '{code}': {reason}")]
    Render {
        language: Language,
        code: String,
        reason: String,
    },

    #[error("failed to write '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
