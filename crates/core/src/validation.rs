//! Field-level validation shared by the API handlers.

use validator::{ValidateEmail, ValidateUrl};

use crate::error::CoreError;

/// Reject missing or whitespace-only required fields.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    Ok(())
}

/// Like [`require_text`] but only for fields present in a partial update.
pub fn require_text_if_present(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) => require_text(field, v),
        None => Ok(()),
    }
}

/// Require an absolute URL (image links, media URLs).
pub fn require_url(field: &str, value: &str) -> Result<(), CoreError> {
    require_text(field, value)?;
    if !value.trim().validate_url() {
        return Err(CoreError::Validation(format!("{field} must be a valid URL")));
    }
    Ok(())
}

/// Lowercase and trim an email address for storage and comparison.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalize and validate an email address.
pub fn parse_email(raw: &str) -> Result<String, CoreError> {
    let email = normalize_email(raw);
    if email.is_empty() {
        return Err(CoreError::Validation("Email is required".to_string()));
    }
    if !email.as_str().validate_email() {
        return Err(CoreError::Validation(format!(
            "'{email}' is not a valid email address"
        )));
    }
    Ok(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        assert!(require_text("title", "  ").is_err());
        assert!(require_text("title", "Hello").is_ok());
        assert!(require_text_if_present("title", None).is_ok());
        assert!(require_text_if_present("title", Some("")).is_err());
    }

    #[test]
    fn url_must_be_absolute() {
        assert!(require_url("image", "https://utfs.io/f/abc.jpg").is_ok());
        assert!(require_url("image", "/assets/fallback.jpeg").is_err());
        assert!(require_url("image", "").is_err());
    }

    #[test]
    fn emails_are_normalized_and_checked() {
        assert_eq!(
            parse_email("  Reader@Example.COM ").unwrap(),
            "reader@example.com"
        );
        assert!(parse_email("not-an-email").is_err());
        assert!(parse_email("   ").is_err());
    }
}
