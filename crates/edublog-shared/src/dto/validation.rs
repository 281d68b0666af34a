//! Custom validators shared by the request DTOs.

use validator::ValidationError;

/// Reject strings that are empty once whitespace is trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message("Must not be blank".into()));
    }
    Ok(())
}
