// SQLite Transaction Implementation

use crate::job_repository::map_sqlx_error;
use crate::row::{bind_fields, JobRow, INSERT_JOB, SELECT_JOB, UPDATE_JOB};
use async_trait::async_trait;
use jobs_core::domain::{Job, Version};
use jobs_core::error::{AppError, Result};
use jobs_core::port::{JobRepositoryTransaction, Transaction};
use sqlx::{Sqlite, Transaction as SqlxTransaction};

pub struct SqliteJobTransaction<'a> {
    tx: SqlxTransaction<'a, Sqlite>,
}

impl<'a> SqliteJobTransaction<'a> {
    pub fn new(tx: SqlxTransaction<'a, Sqlite>) -> Self {
        Self { tx }
    }
}

#[async_trait]
impl Transaction for SqliteJobTransaction<'_> {
    async fn commit(self: Box<Self>) -> Result<()> {
        self.tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<()> {
        self.tx.rollback().await.map_err(map_sqlx_error)?;
        Ok(())
    }
}

#[async_trait]
impl JobRepositoryTransaction for SqliteJobTransaction<'_> {
    async fn find_by_external_id(&mut self, external_id: &str) -> Result<Option<Job>> {
        let sql = format!("{} WHERE external_id = ?", SELECT_JOB);
        let row = sqlx::query_as::<_, JobRow>(&sql)
            .bind(external_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        row.map(JobRow::into_job).transpose()
    }

    async fn insert(&mut self, job: &Job) -> Result<()> {
        let query = bind_fields(sqlx::query(INSERT_JOB), &job.fields)?
            .bind(job.id.clone())
            .bind(job.external_id.clone())
            .bind(job.version);

        query
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn update(&mut self, job: &Job, expected_version: Version) -> Result<()> {
        let query = bind_fields(sqlx::query(UPDATE_JOB), &job.fields)?
            .bind(job.version)
            .bind(job.id.clone())
            .bind(expected_version);

        let result = query
            .execute(&mut *self.tx)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // Either the job is gone or someone else bumped the version
            let current: Option<i64> = sqlx::query_scalar("SELECT version FROM jobs WHERE id = ?")
                .bind(&job.id)
                .fetch_optional(&mut *self.tx)
                .await
                .map_err(map_sqlx_error)?;

            return match current {
                None => Err(AppError::NotFound(format!(
                    "Job with external ID '{}' not found",
                    job.external_id
                ))),
                Some(found) => Err(AppError::Conflict(format!(
                    "Job with external ID '{}' was modified concurrently (expected version {}, found {})",
                    job.external_id, expected_version, found
                ))),
            };
        }

        Ok(())
    }
}
