// SQLite JobRepository Implementation

use crate::row::{JobRow, SummaryRow, SELECT_JOB, SELECT_SUMMARY};
use crate::SqliteJobTransaction;
use async_trait::async_trait;
use jobs_core::domain::{Job, JobSummary};
use jobs_core::error::{AppError, Result};
use jobs_core::port::{JobRepository, JobRepositoryTransaction, TransactionalJobRepository};
use sqlx::SqlitePool;

// Helper to convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if let Some(code) = db_err.code() {
                let code_str = code.as_ref();

                // SQLite extended result codes: https://www.sqlite.org/rescode.html
                match code_str {
                    "2067" | "1555" => {
                        // UNIQUE / PRIMARY KEY constraint failed
                        AppError::Conflict(format!(
                            "Unique constraint violation: {} ({})",
                            db_err.message(),
                            code_str
                        ))
                    }
                    "517" => {
                        // SQLITE_BUSY_SNAPSHOT - another writer committed after our read
                        AppError::Conflict(format!(
                            "Concurrent modification (SQLITE_BUSY_SNAPSHOT): {}",
                            db_err.message()
                        ))
                    }
                    "5" => {
                        // SQLITE_BUSY - database is locked
                        AppError::Database(format!(
                            "Database locked (SQLITE_BUSY): {}",
                            db_err.message()
                        ))
                    }
                    "13" => {
                        // SQLITE_FULL - database or disk is full
                        AppError::Database(format!("Database full: {}", db_err.message()))
                    }
                    _ => AppError::Database(format!(
                        "Database error [{}]: {}",
                        code_str,
                        db_err.message()
                    )),
                }
            } else {
                AppError::Database(format!("Database error: {}", db_err.message()))
            }
        }
        sqlx::Error::RowNotFound => AppError::Database("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Database(format!("Column not found: {}", col))
        }
        _ => {
            // Connection, pool, protocol errors
            AppError::Database(err.to_string())
        }
    }
}

pub struct SqliteJobRepository {
    pool: SqlitePool,
}

impl SqliteJobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JobRepository for SqliteJobRepository {
    async fn list_summaries(&self) -> Result<Vec<JobSummary>> {
        // No ORDER BY: callers get store order
        let rows: Vec<SummaryRow> = sqlx::query_as(SELECT_SUMMARY)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.into_iter().map(SummaryRow::into_summary).collect()
    }

    async fn find_by_external_id(&self, external_id: &str) -> Result<Option<Job>> {
        let sql = format!("{} WHERE external_id = ?", SELECT_JOB);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(external_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.map(JobRow::into_job).transpose()
    }

    async fn count(&self) -> Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl TransactionalJobRepository for SqliteJobRepository {
    async fn begin_transaction(&self) -> Result<Box<dyn JobRepositoryTransaction>> {
        // Take the write lock up front: a deferred transaction that reads and
        // then writes fails with SQLITE_BUSY instead of waiting on busy_timeout
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(map_sqlx_error)?;
        Ok(Box::new(SqliteJobTransaction::new(tx)))
    }
}
