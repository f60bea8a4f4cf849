//! Short code generation and custom alias validation.
//!
//! Short codes are opaque random identifiers; custom aliases are
//! user-chosen and validated for shape before the uniqueness check.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of random bytes before base64 encoding.
const CODE_LENGTH_BYTES: usize = 9;

/// Identifiers reserved for system endpoints to prevent routing conflicts.
const RESERVED_ALIASES: &[&str] = &["api", "health", "shorten", "analytics"];

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 12-character code.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 4-32 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved system identifier
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.len() < 4 || alias.len() > 32 {
        return Err(AppError::bad_request(
            "Custom alias must be 4-32 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain lowercase letters, digits, and hyphens",
            json!({ "alias": alias }),
        ));
    }

    if alias.starts_with('-') || alias.ends_with('-') {
        return Err(AppError::bad_request(
            "Custom alias cannot start or end with a hyphen",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "Custom alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_code_shape() {
        let code = generate_code();
        assert_eq!(code.len(), 12);
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_sequential_codes_do_not_collide() {
        assert_ne!(generate_code(), generate_code());
    }

    #[test]
    fn test_valid_custom_aliases() {
        assert!(validate_custom_alias("promo-2026").is_ok());
        assert!(validate_custom_alias("docs").is_ok());
    }

    #[test]
    fn test_rejects_bad_length() {
        assert!(validate_custom_alias("abc").is_err());
        assert!(validate_custom_alias(&"a".repeat(33)).is_err());
    }

    #[test]
    fn test_rejects_bad_characters() {
        assert!(validate_custom_alias("MyAlias").is_err());
        assert!(validate_custom_alias("has space").is_err());
        assert!(validate_custom_alias("-leading").is_err());
        assert!(validate_custom_alias("trailing-").is_err());
    }

    #[test]
    fn test_rejects_reserved() {
        assert!(validate_custom_alias("health").is_err());
        assert!(validate_custom_alias("analytics").is_err());
    }
}
