//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`employees`] - 员工管理接口

pub mod convert;

pub mod auth;
pub mod health;

// Data models API
pub mod employees;

// Re-export common types for handlers
pub use crate::utils::AppResult;
