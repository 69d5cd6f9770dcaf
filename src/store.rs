//! Storage gateway: row-level access to the `customers` relation.
//!
//! The only module that talks to the database. Every operation acquires its
//! own pooled connection and holds it for exactly that call; the connection
//! returns to the pool on every exit path when the handle drops. There is no
//! session state between calls.
//!
//! Concurrent writers to the same row are not coordinated: no locking, no
//! versioning, last writer wins.

use sqlx::{AnyPool, Row};
use tracing::debug;

use crate::error::{StoreError, StoreResult};

/// Schema DDL for the caller or test harness. The gateway itself never runs
/// DDL, only row-level DML.
pub const CREATE_SCHEMA_SQL: &str = "CREATE TABLE IF NOT EXISTS customers \
     (id INTEGER PRIMARY KEY, name TEXT NOT NULL, departments TEXT NOT NULL)";
pub const DROP_SCHEMA_SQL: &str = "DROP TABLE IF EXISTS customers";

const INSERT_SQL: &str = "INSERT INTO customers (id, name, departments) VALUES (?, ?, ?)";
const SELECT_SQL: &str = "SELECT name, departments FROM customers WHERE id = ?";

/// One customer row as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerRow {
    pub name: String,
    pub departments: String,
}

/// Insert one customer row and return the effective id.
///
/// An `id` of `0` asks the backend to assign one; the reported generated key
/// is then returned, and a backend that reports none fails with
/// [`StoreError::NoGeneratedId`].
pub async fn insert_customer_row(
    pool: &AnyPool,
    id: i64,
    name: &str,
    departments: &str,
) -> StoreResult<i64> {
    let mut connection = pool.acquire().await?;
    let result = sqlx::query(INSERT_SQL)
        .bind(if id == 0 { None } else { Some(id) })
        .bind(name)
        .bind(departments)
        .execute(&mut *connection)
        .await?;

    let effective = if id != 0 {
        id
    } else {
        result.last_insert_id.ok_or(StoreError::NoGeneratedId)?
    };
    debug!(id = effective, bytes = departments.len(), "wrote customer row");
    Ok(effective)
}

/// Fetch the row stored under `id`, or [`StoreError::NotFound`].
pub async fn select_customer_row(pool: &AnyPool, id: i64) -> StoreResult<CustomerRow> {
    let mut connection = pool.acquire().await?;
    let row = sqlx::query(SELECT_SQL)
        .bind(id)
        .fetch_optional(&mut *connection)
        .await?
        .ok_or(StoreError::NotFound { id })?;

    Ok(CustomerRow { name: row.try_get("name")?, departments: row.try_get("departments")? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn memory_pool() -> AnyPool {
        let pool = db::init_db("sqlite::memory:", 1).await.unwrap();
        sqlx::query(CREATE_SCHEMA_SQL).execute(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn insert_uses_the_caller_id_when_nonzero() {
        let pool = memory_pool().await;
        let id = insert_customer_row(&pool, 7, "customer", "<departmentList/>").await.unwrap();
        assert_eq!(id, 7);
    }

    #[tokio::test]
    async fn insert_with_zero_id_returns_a_generated_one() {
        let pool = memory_pool().await;
        let id = insert_customer_row(&pool, 0, "customer", "<departmentList/>").await.unwrap();
        assert_ne!(id, 0);

        let next = insert_customer_row(&pool, 0, "other", "<departmentList/>").await.unwrap();
        assert_ne!(next, id);
    }

    #[tokio::test]
    async fn select_returns_the_stored_row() {
        let pool = memory_pool().await;
        let blob = "<departmentList><department name=\"d1\"/></departmentList>";
        let id = insert_customer_row(&pool, 1, "customer", blob).await.unwrap();

        let row = select_customer_row(&pool, id).await.unwrap();
        assert_eq!(row, CustomerRow { name: "customer".to_string(), departments: blob.to_string() });
    }

    #[tokio::test]
    async fn select_of_a_missing_row_is_not_found() {
        let pool = memory_pool().await;
        let err = select_customer_row(&pool, 42).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 42 }));
    }

    #[tokio::test]
    async fn duplicate_id_surfaces_as_a_sql_error() {
        let pool = memory_pool().await;
        insert_customer_row(&pool, 1, "first", "<departmentList/>").await.unwrap();
        let err = insert_customer_row(&pool, 1, "second", "<departmentList/>").await.unwrap_err();
        assert!(matches!(err, StoreError::Sql(_)));
    }
}
