use std::sync::Arc;

use crate::auth::SessionService;
use crate::core::Config;
use crate::db::Database;
use crate::db::repository::{AccountRepository, EmployeeRepository};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// ServerState 是服务器的核心数据结构。使用 Arc 实现浅拷贝，
/// 所有权成本极低。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Arc<Database> | 嵌入式数据库 (懒连接) |
/// | session_service | Arc<SessionService> | 会话令牌服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)，首次使用时建立连接
    pub db: Arc<Database>,
    /// 会话令牌服务 (Arc 共享所有权)
    pub session_service: Arc<SessionService>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录结构 (确保目录存在)
    /// 2. 数据库句柄 (work_dir/database/staffhub.db，懒连接)
    /// 3. 会话服务
    ///
    /// # Panics
    ///
    /// 工作目录创建失败时 panic
    pub async fn initialize(config: &Config) -> Self {
        // 0. Ensure work_dir structure exists
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        // 1. Database handle — the connection itself is established on
        //    first use (see db::Database)
        let db_path = config.database_dir().join("staffhub.db");
        let db = Arc::new(Database::new(db_path));

        // 2. Session service
        let session_service = Arc::new(SessionService::with_config(config.session.clone()));

        Self {
            config: config.clone(),
            db,
            session_service,
        }
    }

    /// 获取会话服务
    pub fn session_service(&self) -> Arc<SessionService> {
        self.session_service.clone()
    }

    /// 获取员工仓库 (首次调用会建立数据库连接)
    pub async fn employee_repo(&self) -> Result<EmployeeRepository, AppError> {
        Ok(EmployeeRepository::new(self.db.get().await?.clone()))
    }

    /// 获取账户仓库 (首次调用会建立数据库连接)
    pub async fn account_repo(&self) -> Result<AccountRepository, AppError> {
        Ok(AccountRepository::new(self.db.get().await?.clone()))
    }
}
