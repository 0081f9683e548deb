//! Shared types for StaffHub
//!
//! Common types used by both the server and the dashboard client:
//! wire models, API response envelope, error codes and utility types.

pub mod client;
pub mod error;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::ApiErrorCode;
pub use models::{Employee, EmployeeCreate, EmployeeUpdate, Role};
pub use response::{ApiResponse, Pagination};
