//! Employee Repository
//!
//! All reads and writes are scoped to the owning account: queries filter on
//! `created_by = $owner`, create writes it. A missing record and a record
//! owned by someone else are indistinguishable (`NotFound` for both).

use shared::models::EmployeeUpdate;
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{EmployeeRecord, NewEmployee};

const DUPLICATE_EMAIL: &str = "An employee with this email already exists";

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All employees owned by the account, newest-created-first
    pub async fn find_all_for_owner(&self, owner: &str) -> RepoResult<Vec<EmployeeRecord>> {
        let employees: Vec<EmployeeRecord> = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE created_by = $owner ORDER BY created_at DESC")
            .bind(("owner", owner.to_string()))
            .await?
            .take(0)?;
        Ok(employees)
    }

    /// Find employee by email — deliberately NOT owner-scoped, the email
    /// uniqueness invariant is system-wide
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<EmployeeRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let employees: Vec<EmployeeRecord> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Find employee by id, scoped to the owner
    pub async fn find_owned(&self, id: &str, owner: &str) -> RepoResult<Option<EmployeeRecord>> {
        let Some(thing) = parse_id(id) else {
            return Ok(None);
        };
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM employee WHERE id = $thing AND created_by = $owner LIMIT 1")
            .bind(("thing", thing))
            .bind(("owner", owner.to_string()))
            .await?;
        let employees: Vec<EmployeeRecord> = result.take(0)?;
        Ok(employees.into_iter().next())
    }

    /// Create a new employee owned by `owner`
    pub async fn create(&self, owner: &str, data: NewEmployee) -> RepoResult<EmployeeRecord> {
        // Check duplicate email (system-wide)
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE employee SET
                    first_name = $first_name,
                    last_name = $last_name,
                    email = $email,
                    phone = $phone,
                    role = $role,
                    created_by = $owner,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("role", data.role))
            .bind(("owner", owner.to_string()))
            .bind(("created_at", now_millis()))
            .await
            .map_err(map_email_conflict)?;

        let created: Option<EmployeeRecord> = result.take(0).map_err(map_email_conflict)?;
        created.ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
    }

    /// Merge the supplied fields into an owned employee
    pub async fn update(
        &self,
        id: &str,
        owner: &str,
        data: EmployeeUpdate,
    ) -> RepoResult<EmployeeRecord> {
        let existing = self
            .find_owned(id, owner)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

        // Check duplicate email if changing (system-wide, same as create)
        if let Some(ref new_email) = data.email
            && new_email != &existing.email
            && self.find_by_email(new_email).await?.is_some()
        {
            return Err(RepoError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }

        let thing = existing
            .id
            .clone()
            .ok_or_else(|| RepoError::Database("Employee record missing id".to_string()))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE employee SET
                    first_name = $first_name OR first_name,
                    last_name = $last_name OR last_name,
                    email = $email OR email,
                    phone = $phone OR phone,
                    role = IF $has_role THEN $role ELSE role END
                WHERE id = $thing AND created_by = $owner
                RETURN AFTER"#,
            )
            .bind(("thing", thing))
            .bind(("owner", owner.to_string()))
            .bind(("first_name", data.first_name))
            .bind(("last_name", data.last_name))
            .bind(("email", data.email))
            .bind(("phone", data.phone))
            .bind(("has_role", data.role.is_some()))
            .bind(("role", data.role))
            .await
            .map_err(map_email_conflict)?;

        result
            .take::<Option<EmployeeRecord>>(0)
            .map_err(map_email_conflict)?
            .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
    }

    /// Permanently delete an owned employee
    pub async fn delete(&self, id: &str, owner: &str) -> RepoResult<()> {
        let Some(thing) = parse_id(id) else {
            return Err(RepoError::NotFound(format!("Employee {} not found", id)));
        };
        let mut result = self
            .base
            .db()
            .query("DELETE employee WHERE id = $thing AND created_by = $owner RETURN BEFORE")
            .bind(("thing", thing))
            .bind(("owner", owner.to_string()))
            .await?;

        let deleted: Option<EmployeeRecord> = result.take(0)?;
        match deleted {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound(format!("Employee {} not found", id))),
        }
    }
}

/// A malformed id cannot name an existing record, so it reads as absent
/// rather than as a validation failure.
fn parse_id(id: &str) -> Option<RecordId> {
    id.parse::<RecordId>().ok()
}

/// The unique index is the first-writer-wins backstop for the
/// check-then-create race; surface its violation as a duplicate
fn map_email_conflict(err: surrealdb::Error) -> RepoError {
    let msg = err.to_string();
    if msg.contains("employee_email_unique") {
        RepoError::Duplicate(DUPLICATE_EMAIL.to_string())
    } else {
        RepoError::Database(msg)
    }
}
