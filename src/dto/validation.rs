//! Validation helpers for DTOs.

use validator::ValidationError;

/// Longest alias a participant may pick.
pub const MAX_ALIAS_LENGTH: usize = 50;

/// Validates that an alias is non-blank and at most [`MAX_ALIAS_LENGTH`]
/// characters.
///
/// # Examples
///
/// ```ignore
/// validate_alias("luis")    // Ok
/// validate_alias("   ")     // Err - blank
/// validate_alias(&"x".repeat(51)) // Err - too long
/// ```
pub fn validate_alias(alias: &str) -> Result<(), ValidationError> {
    if alias.trim().is_empty() {
        let mut err = ValidationError::new("alias_blank");
        err.message = Some("Alias must contain at least one visible character".into());
        return Err(err);
    }

    let length = alias.chars().count();
    if length > MAX_ALIAS_LENGTH {
        let mut err = ValidationError::new("alias_length");
        err.message = Some(
            format!("Alias must be at most {MAX_ALIAS_LENGTH} characters (got {length})").into(),
        );
        return Err(err);
    }

    Ok(())
}
