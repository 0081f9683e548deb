//! Database Models

// Serde helpers
pub mod serde_helpers;

pub mod account;
pub mod employee;

// Re-exports
pub use account::{AccountCreate, AccountRecord};
pub use employee::{EmployeeRecord, NewEmployee};
