//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use shared::models as api;

use crate::db::models as db;

// ============ Helper ============

pub fn option_record_id_to_string(id: &Option<surrealdb::RecordId>) -> String {
    id.as_ref().map(|t| t.to_string()).unwrap_or_default()
}

// ============ Employee ============

impl From<db::EmployeeRecord> for api::Employee {
    fn from(e: db::EmployeeRecord) -> Self {
        Self {
            id: option_record_id_to_string(&e.id),
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone: e.phone,
            role: e.role,
            created_by: e.created_by,
            created_at: e.created_at,
        }
    }
}

// ============ Account ============

impl From<db::AccountRecord> for api::AccountInfo {
    fn from(a: db::AccountRecord) -> Self {
        Self {
            id: option_record_id_to_string(&a.id),
            name: a.name,
            email: a.email,
            created_at: a.created_at,
        }
    }
}
