//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! Limits are chosen based on:
//! - Reasonable UX limits for names and phone numbers
//! - RFC 5321 for email addresses

use std::sync::LazyLock;

use regex::Regex;

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Person and account names
pub const MAX_NAME_LEN: usize = 200;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Phone numbers
pub const MAX_PHONE_LEN: usize = 100;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

// ── Format patterns ─────────────────────────────────────────────────

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").expect("valid regex")
});

// Optional leading +, then at least 10 digits / spaces / dashes
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s-]{10,}$").expect("valid regex"));

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required field is present and non-empty.
///
/// The error names the offending wire field, e.g. "firstName is required".
pub fn require_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<String, AppError> {
    let Some(v) = value else {
        return Err(AppError::validation(format!("{field} is required")));
    };
    if v.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if v.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(v.clone())
}

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is non-empty and within the
/// length limit. Used by partial updates.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value {
        if v.trim().is_empty() {
            return Err(AppError::validation(format!("{field} must not be empty")));
        }
        if v.len() > max_len {
            return Err(AppError::validation(format!(
                "{field} is too long ({} chars, max {max_len})",
                v.len()
            )));
        }
    }
    Ok(())
}

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), AppError> {
    if !EMAIL_RE.is_match(email) {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(())
}

/// Validate phone format
pub fn validate_phone(phone: &str) -> Result<(), AppError> {
    if !PHONE_RE.is_match(phone) {
        return Err(AppError::validation("Invalid phone format"));
    }
    Ok(())
}

/// Validate password strength rules
///
/// At least 6 characters, one uppercase letter and one digit. The error
/// names the violated rule.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < 6 {
        return Err(AppError::validation(
            "Password must be at least 6 characters long",
        ));
    }
    if password.len() > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "Password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(AppError::validation(
            "Password must contain at least one uppercase letter",
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(AppError::validation(
            "Password must contain at least one number",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(err: AppError) -> String {
        match err {
            AppError::Validation(m) => m,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn require_text_reports_field_name() {
        let err = require_text(&None, "firstName", MAX_NAME_LEN).unwrap_err();
        assert_eq!(msg(err), "firstName is required");

        let err = require_text(&Some("   ".to_string()), "lastName", MAX_NAME_LEN).unwrap_err();
        assert_eq!(msg(err), "lastName is required");

        let ok = require_text(&Some("Ada".to_string()), "firstName", MAX_NAME_LEN).unwrap();
        assert_eq!(ok, "Ada");
    }

    #[test]
    fn email_format() {
        assert!(validate_email("ada@x.com").is_ok());
        assert!(validate_email("ADA.lovelace+hr@sub.example.org").is_ok());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("missing@tld").is_err());
    }

    #[test]
    fn phone_format() {
        assert!(validate_phone("+1234567890").is_ok());
        assert!(validate_phone("080 1234-5678").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call-me-maybe").is_err());
    }

    #[test]
    fn password_rules_in_order() {
        assert_eq!(
            msg(validate_password("Ab1").unwrap_err()),
            "Password must be at least 6 characters long"
        );
        assert_eq!(
            msg(validate_password("abcdef1").unwrap_err()),
            "Password must contain at least one uppercase letter"
        );
        assert_eq!(
            msg(validate_password("Abcdefg").unwrap_err()),
            "Password must contain at least one number"
        );
        assert!(validate_password("Abcde1").is_ok());
    }
}
