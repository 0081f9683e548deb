//! StaffHub Client - HTTP client and dashboard state
//!
//! Provides network-based HTTP calls to the StaffHub server API and the
//! client-side list state behind the dashboard (search, pagination,
//! single-selection role change, delete confirmation).

pub mod config;
pub mod dashboard;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use dashboard::{DashboardState, PAGE_SIZE};
pub use error::{ClientError, ClientResult};
pub use http::StaffhubClient;

// Re-export shared types for convenience
pub use shared::client::{DeleteAck, LoginRequest, LoginResponse, RegisterRequest};
pub use shared::models::{AccountInfo, Employee, EmployeeCreate, EmployeeUpdate, Role};
