//! Client-related types shared between server and client
//!
//! Common request/response types used in API communication.
//! These types are shared between staffhub-server and staffhub-client.

use serde::{Deserialize, Serialize};

use crate::models::AccountInfo;

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Register request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token (also set as an HttpOnly cookie)
    pub token: String,
    pub user: AccountInfo,
}

// =============================================================================
// Employee API DTOs
// =============================================================================

/// Delete acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteAck {
    pub message: String,
}

impl DeleteAck {
    pub fn employee() -> Self {
        Self {
            message: "Employee deleted successfully".to_string(),
        }
    }
}
