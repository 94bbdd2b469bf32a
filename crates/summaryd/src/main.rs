use jobsummary::api::{self, ApiState, JobCatalog};
use jobsummary::client::HttpSchedulerClient;
use jobsummary::config::{Config, SummarySource};
use jobsummary::db;
use jobsummary::jobs::{JobConfig, JobKey, JobsRepo, MemJobStore};

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::from_env()?;
    let source = cfg.source();

    info!(
        source = source.as_str(),
        listen = %cfg.listen_addr,
        request_timeout_ms = cfg.request_timeout_ms,
        migrate_on_startup = cfg.migrate_on_startup,
        seed_demo_jobs = cfg.seed_demo_jobs,
        "summaryd starting"
    );

    // kept so the store can be shut down once the server stops
    let mut mem_store = None;

    let state = match source {
        SummarySource::Remote(url) => {
            let client = HttpSchedulerClient::new(url, cfg.request_timeout())?;
            info!(url = %client.summary_url(), "proxying remote scheduler");
            ApiState::new(Arc::new(client), JobCatalog::Unavailable)
        }
        SummarySource::Postgres(url) => {
            let pool = db::make_pool(&url).await?;
            if cfg.migrate_on_startup {
                db::run_migrations(&pool).await?;
            }
            ApiState::postgres(JobsRepo::new(pool))
        }
        SummarySource::Memory => {
            let store = MemJobStore::new();
            if cfg.seed_demo_jobs {
                seed_demo_jobs(&store).await?;
                info!(jobs = store.len().await?, "seeded in-memory store");
            }
            mem_store = Some(store.clone());
            ApiState::memory(store)
        }
    };

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&cfg.listen_addr).await?;
    info!("job summary api listening on http://{}", cfg.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(store) = mem_store {
        store.shutdown().await;
    }

    info!("summaryd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("received ctrl-c, shutting down");
}

async fn seed_demo_jobs(store: &MemJobStore) -> anyhow::Result<()> {
    let jobs = [
        JobConfig::service(JobKey::new("www-data", "prod", "hello"), 3),
        JobConfig::service(JobKey::new("www-data", "prod", "hello_world"), 1),
        JobConfig::cron(JobKey::new("www-data", "prod", "log_rotate"), "0 * * * *"),
        JobConfig::service(JobKey::new("ops", "devel", "health_probe"), 2),
        JobConfig::cron(JobKey::new("mesos", "test", "gc"), "*/15 * * * *"),
    ];

    for job in jobs {
        store.save_job(job).await?;
    }
    Ok(())
}
