// Migration Runner

use crate::job_repository::map_sqlx_error;
use jobs_core::error::Result;
use sqlx::SqlitePool;
use tracing::info;

const MIGRATIONS: &[(i64, &str, &str)] = &[
    (
        1,
        "Create jobs table",
        include_str!("../migrations/001_create_jobs.sql"),
    ),
    (
        2,
        "Add job version column",
        include_str!("../migrations/002_add_job_version.sql"),
    ),
];

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");

    let current_version = current_schema_version(pool).await?;
    info!("Current schema version: {}", current_version);

    // Apply migrations sequentially
    for (version, name, sql) in MIGRATIONS {
        if current_version < *version {
            info!("Applying migration {:03}: {}", version, name);
            apply_migration(pool, sql).await?;
        }
    }

    info!("All migrations applied successfully");
    Ok(())
}

/// Highest applied migration, 0 on a fresh database
pub async fn current_schema_version(pool: &SqlitePool) -> Result<i64> {
    // Check if schema_version table exists
    let table_exists: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
    )
    .fetch_one(pool)
    .await
    .map_err(map_sqlx_error)?;

    if table_exists == 0 {
        return Ok(0);
    }

    let version: Option<i64> =
        sqlx::query_scalar("SELECT version FROM schema_version ORDER BY version DESC LIMIT 1")
            .fetch_optional(pool)
            .await
            .map_err(map_sqlx_error)?;

    Ok(version.unwrap_or(0))
}

/// Apply a single migration SQL file
async fn apply_migration(pool: &SqlitePool, sql: &str) -> Result<()> {
    // Execute migration in a transaction
    let mut tx = pool.begin().await.map_err(map_sqlx_error)?;

    for statement in split_statements(sql) {
        sqlx::query(&statement)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
    }

    tx.commit().await.map_err(map_sqlx_error)?;
    Ok(())
}

/// Split a migration file into executable statements.
///
/// `--` comments are dropped before splitting so a `;` inside a comment
/// never ends a statement.
fn split_statements(sql: &str) -> Vec<String> {
    let without_comments = sql
        .lines()
        .map(|line| match line.find("--") {
            Some(start) => &line[..start],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_pool;

    #[tokio::test]
    async fn test_run_migrations() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        let result = run_migrations(&pool).await;

        if let Err(e) = &result {
            eprintln!("Migration error: {:?}", e);
        }
        assert!(result.is_ok());
        assert_eq!(current_schema_version(&pool).await.unwrap(), 2);

        // Check that tables exist
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let pool = create_pool("sqlite::memory:", 1).await.unwrap();
        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();
        assert_eq!(current_schema_version(&pool).await.unwrap(), 2);
    }

    #[test]
    fn test_semicolon_inside_comment_is_not_a_separator() {
        let sql = "-- header; still a comment\nCREATE TABLE t (a INTEGER); -- trailing; note\n\nINSERT INTO t (a) VALUES (1);\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE t (a INTEGER)", "INSERT INTO t (a) VALUES (1)"]
        );
    }

    #[test]
    fn test_embedded_migrations_split_cleanly() {
        for (version, _, sql) in MIGRATIONS {
            let statements = split_statements(sql);
            assert!(!statements.is_empty(), "migration {version} is empty");
            assert!(
                statements.iter().all(|s| !s.contains("--")),
                "migration {version} kept a comment"
            );
        }
    }
}
