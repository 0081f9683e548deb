//! StaffHub Server - 员工管理后台服务
//!
//! # 架构概述
//!
//! 本模块是 StaffHub 服务端的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): 会话令牌 + Argon2 密码哈希
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储，按归属账户过滤
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! staffhub-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # 会话认证、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层
//! └── utils/         # 工具函数
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, SessionService};
pub use core::{Config, Server, ServerState, build_app, build_service};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置环境 (dotenv, 日志)
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logger();
    Ok(())
}
