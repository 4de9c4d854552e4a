//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `Serialize` entity struct matching the stored record
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod admin_user;
pub mod recommendation;
pub mod report;

use harsia_core::error::CoreError;
use validator::ValidationErrors;

/// Admin forms submit untouched optional inputs as empty strings.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Flatten `validator` output into the domain validation error.
pub(crate) fn validation_error(errors: ValidationErrors) -> CoreError {
    CoreError::Validation(errors.to_string())
}

/// Reject a provided-but-empty value for a field that must stay non-empty.
pub(crate) fn require_non_empty(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some("") => Err(CoreError::Validation(format!(
            "{field} must not be empty"
        ))),
        _ => Ok(()),
    }
}
