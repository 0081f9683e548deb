//! Employee Model

use serde::{Deserialize, Serialize};
use shared::models::Role;
use surrealdb::RecordId;

use super::serde_helpers;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Employee document as stored in SurrealDB
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    /// Owning account id ("account:xxxx"), written once at creation
    pub created_by: String,
    /// Milliseconds since epoch, assigned at creation
    pub created_at: i64,
}

/// Validated create payload handed to the repository
///
/// All fields are concrete: presence and format checks happen in the
/// handler before this is built.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
}
