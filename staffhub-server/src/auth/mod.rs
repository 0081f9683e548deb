//! 认证模块
//!
//! 提供会话令牌和中间件：
//! - [`SessionService`] - 会话令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件

pub mod extractor;
pub mod middleware;
pub mod session;

pub use middleware::require_auth;
pub use session::{
    Claims, CurrentUser, SESSION_COOKIE, SessionConfig, SessionError, SessionService,
};
