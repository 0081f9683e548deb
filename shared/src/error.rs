//! Unified error codes for StaffHub
//!
//! Provides [`ApiErrorCode`], the stable code/status/message mapping shared
//! by the server's error responses and the client's error classification.
//!
//! # Error Code Ranges
//!
//! - E0xxx: General errors (validation, not found, conflict)
//! - E3xxx: Authentication errors
//! - E9xxx: System errors

use http::StatusCode;

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Success
    Success,
    /// Validation error (400)
    Validation,
    /// Authentication required (401)
    Unauthorized,
    /// Invalid session token (401)
    InvalidToken,
    /// Session token expired (401)
    TokenExpired,
    /// Resource not found (404)
    NotFound,
    /// Resource already exists (409)
    Conflict,
    /// Internal server error (500)
    Internal,
    /// Database error (500)
    Database,
    /// Invalid request (400)
    Invalid,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Invalid => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Validation => "Validation failed",
            Self::Unauthorized => "Authentication required",
            Self::InvalidToken => "Invalid token",
            Self::TokenExpired => "Token expired",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::Internal => "Internal server error",
            Self::Database => "Database error",
            Self::Invalid => "Invalid request",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Success => "E0000",
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::Invalid => "E0006",
            Self::Unauthorized => "E3001",
            Self::InvalidToken => "E3002",
            Self::TokenExpired => "E3003",
            Self::Internal => "E9001",
            Self::Database => "E9002",
        }
    }

    /// Look up the code enum for a wire code string, if known
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "E0000" => Some(Self::Success),
            "E0002" => Some(Self::Validation),
            "E0003" => Some(Self::NotFound),
            "E0004" => Some(Self::Conflict),
            "E0006" => Some(Self::Invalid),
            "E3001" => Some(Self::Unauthorized),
            "E3002" => Some(Self::InvalidToken),
            "E3003" => Some(Self::TokenExpired),
            "E9001" => Some(Self::Internal),
            "E9002" => Some(Self::Database),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trip() {
        for code in [
            ApiErrorCode::Success,
            ApiErrorCode::Validation,
            ApiErrorCode::Unauthorized,
            ApiErrorCode::InvalidToken,
            ApiErrorCode::TokenExpired,
            ApiErrorCode::NotFound,
            ApiErrorCode::Conflict,
            ApiErrorCode::Internal,
            ApiErrorCode::Database,
            ApiErrorCode::Invalid,
        ] {
            assert_eq!(ApiErrorCode::from_code(code.code()), Some(code));
        }
    }

    #[test]
    fn conflict_is_not_validation() {
        assert_ne!(
            ApiErrorCode::Conflict.status_code(),
            ApiErrorCode::Validation.status_code()
        );
    }
}
