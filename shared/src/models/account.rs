//! Account Model
//!
//! The dashboard user who owns employee records. The stored form (with the
//! password hash) lives server-side; only this safe projection crosses the
//! wire.

use serde::{Deserialize, Serialize};

/// Account info (without password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    /// Opaque, store-assigned record id ("account:xxxx")
    pub id: String,
    pub name: String,
    pub email: String,
    /// Creation timestamp (milliseconds since epoch)
    pub created_at: i64,
}
