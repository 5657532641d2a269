//! Job Postings API - Main Entry Point

mod logging;
mod seed;
mod settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobs_api_http::{AppState, HttpServer};
use jobs_core::application::JobService;
use jobs_core::port::id_provider::UuidProvider;
use jobs_core::port::time_provider::SystemTimeProvider;
use jobs_core::port::{ChangeNotifier, NoopNotifier, TimeProvider};
use jobs_infra_queue::resolve_notifier;
use jobs_infra_sqlite::{create_pool, current_schema_version, run_migrations, SqliteJobRepository};
use settings::Settings;
use std::sync::Arc;
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "jobs-api")]
#[command(about = "Job postings CRUD service", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Run migrations and serve HTTP (default)
    Serve,
    /// Apply pending schema migrations and exit
    Migrate,
    /// Insert a sample posting if the store is empty
    Seed,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env().context("Invalid configuration")?;

    logging::init(settings.log_format)?;
    info!("Job Postings API v{} starting...", VERSION);

    info!(database_url = %settings.database_url, "Initializing database...");
    let pool = create_pool(&settings.database_url, settings.database_max_connections)
        .await
        .context("DB pool creation failed")?;
    run_migrations(&pool).await.context("Migration failed")?;

    let job_repo = Arc::new(SqliteJobRepository::new(pool.clone()));
    let time_provider: Arc<dyn TimeProvider> = Arc::new(SystemTimeProvider);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Migrate => {
            let version = current_schema_version(&pool).await?;
            info!(schema_version = version, "Migrations applied");
        }
        Command::Seed => {
            // Seeding does not emit change notifications
            let notifier: Arc<dyn ChangeNotifier> = Arc::new(NoopNotifier);
            let service = JobService::new(
                job_repo.clone(),
                job_repo.clone(),
                notifier,
                Arc::new(UuidProvider),
            );
            let inserted = seed::seed_if_empty(job_repo.as_ref(), &service, time_provider.now()).await?;
            info!(inserted, "Seed complete");
        }
        Command::Serve => {
            let notifier = resolve_notifier(&settings.queue(), time_provider.clone())
                .await
                .context("Queue configuration failed")?;
            let service = JobService::new(
                job_repo.clone(),
                job_repo.clone(),
                notifier,
                Arc::new(UuidProvider),
            );

            let server = HttpServer::new(settings.http(), AppState::new(Arc::new(service)));
            server.run(shutdown_signal()).await.context("HTTP server failed")?;
        }
    }

    pool.close().await;
    info!("Shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received. Draining requests..."),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
