use errcode_spec::{Contract, ErrorDefinition, MessageTemplate};

use crate::error::CodegenError;
use crate::traits::ErrorCodeEmitter;

/// Package/module name of every generated file. Fixed, not derived from
/// the contract.
pub const PACKAGE_NAME: &str = "error_codes";

/// One error definition, ready for emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBinding {
    pub code: String,
    /// `abbreviation + "_" + code`
    pub identifier: String,
    pub message: String,
    pub category: String,
    /// Declared context field names, in order
    pub context_fields: Vec<String>,
}

/// A titled run of error constants (common or service-specific).
#[derive(Debug, Clone, Copy)]
pub struct ErrorGroup<'a> {
    pub title: &'a str,
    pub errors: &'a [ErrorBinding],
}

/// Language-neutral binding context handed to every emitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub package_name: &'static str,
    pub service_name: String,
    pub service_abbreviation: String,
    pub common_errors: Vec<ErrorBinding>,
    pub service_errors: Vec<ErrorBinding>,
    common_title: String,
    service_title: String,
}

impl Bindings {
    /// Bind a validated contract for `emitter`.
    ///
    /// Fails with [`CodegenError::Render`] when a message template has a
    /// malformed placeholder or an identifier collides with a name the
    /// emitter defines itself.
    pub fn bind(contract: &Contract, emitter: &dyn ErrorCodeEmitter) -> Result<Self, CodegenError> {
        let bind_all = |defs: &[ErrorDefinition]| -> Result<Vec<ErrorBinding>, CodegenError> {
            defs.iter()
                .map(|def| bind_error(contract, def, emitter))
                .collect()
        };

        Ok(Self {
            package_name: PACKAGE_NAME,
            service_name: contract.name.clone(),
            service_abbreviation: contract.abbreviation.clone(),
            common_errors: bind_all(&contract.common_errors)?,
            service_errors: bind_all(&contract.service_errors)?,
            common_title: "Common error codes".to_string(),
            service_title: format!("{} service-specific error codes", contract.name),
        })
    }

    /// Common errors then service errors.
    pub fn all_errors(&self) -> impl Iterator<Item = &ErrorBinding> {
        self.common_errors.iter().chain(self.service_errors.iter())
    }

    /// Non-empty constant groups in emission order.
    pub fn groups(&self) -> Vec<ErrorGroup<'_>> {
        [
            ErrorGroup {
                title: &self.common_title,
                errors: &self.common_errors,
            },
            ErrorGroup {
                title: &self.service_title,
                errors: &self.service_errors,
            },
        ]
        .into_iter()
        .filter(|g| !g.errors.is_empty())
        .collect()
    }
}

fn bind_error(
    contract: &Contract,
    def: &ErrorDefinition,
    emitter: &dyn ErrorCodeEmitter,
) -> Result<ErrorBinding, CodegenError> {
    let render_err = |reason: String| CodegenError::Render {
        language: emitter.language(),
        code: def.code.clone(),
        reason,
    };

    MessageTemplate::parse(&def.message).map_err(|e| render_err(e.to_string()))?;

    let identifier = contract.identifier(&def.code);
    if emitter.is_reserved(&identifier) {
        return Err(render_err(format!(
            "constant '{identifier}' collides with a generated name"
        )));
    }

    Ok(ErrorBinding {
        code: def.code.clone(),
        identifier,
        message: def.message.clone(),
        category: def.category.clone(),
        context_fields: def.context_field_names().map(str::to_string).collect(),
    })
}
