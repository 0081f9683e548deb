//! Database Module
//!
//! Owns the embedded SurrealDB connection and its schema.
//!
//! The connection is process-wide and lazily established: nothing is opened
//! at construction, the first caller of [`Database::get`] triggers the
//! connect, and concurrent first callers share that single in-flight
//! attempt. A failed attempt leaves the cell empty, so the next caller
//! retries — reconnection is the only retry behavior in the system.

pub mod models;
pub mod repository;

use std::path::{Path, PathBuf};

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};
use tokio::sync::OnceCell;

use crate::utils::AppError;

const NAMESPACE: &str = "staffhub";
const DATABASE: &str = "staffhub";

/// Lazily-connected handle to the embedded document store
#[derive(Debug)]
pub struct Database {
    path: PathBuf,
    conn: OnceCell<Surreal<Db>>,
}

impl Database {
    /// Create a handle without connecting.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: OnceCell::new(),
        }
    }

    /// Get the connection, establishing it on first use.
    ///
    /// Concurrent callers during the first use await the same connection
    /// attempt rather than starting one each.
    pub async fn get(&self) -> Result<&Surreal<Db>, AppError> {
        self.conn
            .get_or_try_init(|| connect(&self.path))
            .await
    }

    /// Eagerly establish the connection (startup path).
    pub async fn init(&self) -> Result<(), AppError> {
        self.get().await.map(|_| ())
    }

    /// Whether the connection has been established.
    pub fn is_connected(&self) -> bool {
        self.conn.initialized()
    }
}

async fn connect(path: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(path)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

    define_schema(&db).await?;

    tracing::info!(path = %path.display(), "Database connection established");
    Ok(db)
}

/// Unique email indexes back the first-writer-wins invariant on both
/// collections; everything else is schemaless documents.
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query("DEFINE INDEX IF NOT EXISTS employee_email_unique ON TABLE employee COLUMNS email UNIQUE")
        .await
        .map_err(|e| AppError::database(format!("Failed to define employee index: {e}")))?;
    db.query("DEFINE INDEX IF NOT EXISTS account_email_unique ON TABLE account COLUMNS email UNIQUE")
        .await
        .map_err(|e| AppError::database(format!("Failed to define account index: {e}")))?;
    Ok(())
}
