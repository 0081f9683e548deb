//! Account Repository

use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{AccountCreate, AccountRecord};

const DUPLICATE_EMAIL: &str = "An account with this email already exists";

#[derive(Clone)]
pub struct AccountRepository {
    base: BaseRepository,
}

impl AccountRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find account by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<AccountRecord>> {
        let thing: RecordId = match id.parse() {
            Ok(t) => t,
            Err(_) => return Ok(None),
        };
        let account: Option<AccountRecord> = self.base.db().select(thing).await?;
        Ok(account)
    }

    /// Find account by email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<AccountRecord>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM account WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let accounts: Vec<AccountRecord> = result.take(0)?;
        Ok(accounts.into_iter().next())
    }

    /// Create a new account
    pub async fn create(&self, data: AccountCreate) -> RepoResult<AccountRecord> {
        // Check duplicate email
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(DUPLICATE_EMAIL.to_string()));
        }

        // Hash password
        let hash_pass = AccountRecord::hash_password(&data.password)
            .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE account SET
                    name = $name,
                    email = $email,
                    hash_pass = $hash_pass,
                    created_at = $created_at
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("email", data.email))
            .bind(("hash_pass", hash_pass))
            .bind(("created_at", now_millis()))
            .await
            .map_err(map_email_conflict)?;

        let created: Option<AccountRecord> = result.take(0).map_err(map_email_conflict)?;
        created.ok_or_else(|| RepoError::Database("Failed to create account".to_string()))
    }
}

fn map_email_conflict(err: surrealdb::Error) -> RepoError {
    let msg = err.to_string();
    if msg.contains("account_email_unique") {
        RepoError::Duplicate(DUPLICATE_EMAIL.to_string())
    } else {
        RepoError::Database(msg)
    }
}
