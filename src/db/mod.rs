pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::fmt;

use crate::models::employee::Employee;

pub use memory::InMemoryEmployeeStore;
pub use postgres::PgEmployeeStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    /// The backend could not be reached (pool, socket, TLS).
    Connection,
    /// The backend answered but the statement or row decoding failed.
    Query,
}

#[derive(Debug)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        StoreError { kind, message: message.into() }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        let kind = match err {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreErrorKind::Connection,
            _ => StoreErrorKind::Query,
        };
        StoreError::new(kind, err.to_string())
    }
}

/// Document-style persistence for employee records, keyed by `Employee::id`.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Inserts the record, or replaces the one with the same id.
    async fn save(&self, employee: &Employee) -> Result<Employee, StoreError>;

    async fn find_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Employee>, StoreError>;

    async fn exists_by_id(&self, id: &str) -> Result<bool, StoreError>;

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    /// Sets `status` and `date` in a single operation. `None` when no record
    /// has this id.
    async fn update_status(
        &self,
        id: &str,
        status: Option<&str>,
        date: DateTime<Utc>,
    ) -> Result<Option<Employee>, StoreError>;
}

pub async fn create_pool(database_url: &str) -> Result<PgPool, StoreError> {
    let pool = PgPool::connect(database_url).await?;
    Ok(pool)
}
