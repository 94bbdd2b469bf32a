use std::collections::BTreeMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::client::{BoxFuture, FetchResult, SchedulerClient};
use crate::jobs::model::{JobConfig, JobKey};
use crate::jobs::summary::{summarize, SummaryRow};

#[derive(Default)]
struct MemState {
    jobs: BTreeMap<JobKey, JobConfig>,
    shut_down: bool,
}

impl MemState {
    fn ensure_open(&self) -> anyhow::Result<()> {
        if self.shut_down {
            anyhow::bail!("storage has been shut down");
        }
        Ok(())
    }
}

/// Process-local job store.
///
/// Reads share the lock, writes take it exclusively. Once [`shutdown`] has
/// run every operation fails.
///
/// [`shutdown`]: MemJobStore::shutdown
#[derive(Clone, Default)]
pub struct MemJobStore {
    state: Arc<RwLock<MemState>>,
}

impl MemJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the job, replacing any job with the same key.
    /// Returns the replaced configuration.
    pub async fn save_job(&self, job: JobConfig) -> anyhow::Result<Option<JobConfig>> {
        job.key.validate()?;
        let job = job.normalized();

        let mut state = self.state.write().await;
        state.ensure_open()?;
        Ok(state.jobs.insert(job.key.clone(), job))
    }

    pub async fn remove_job(&self, key: &JobKey) -> anyhow::Result<bool> {
        let mut state = self.state.write().await;
        state.ensure_open()?;
        Ok(state.jobs.remove(key).is_some())
    }

    pub async fn fetch_jobs(&self, role: Option<&str>) -> anyhow::Result<Vec<JobConfig>> {
        let state = self.state.read().await;
        state.ensure_open()?;

        Ok(state
            .jobs
            .values()
            .filter(|job| role.map_or(true, |r| job.key.role == r))
            .cloned()
            .collect())
    }

    pub async fn summarize(&self) -> anyhow::Result<Vec<SummaryRow>> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(summarize(state.jobs.values()))
    }

    pub async fn len(&self) -> anyhow::Result<usize> {
        let state = self.state.read().await;
        state.ensure_open()?;
        Ok(state.jobs.len())
    }

    pub async fn is_empty(&self) -> anyhow::Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Drops all jobs and rejects further use.
    pub async fn shutdown(&self) {
        let mut state = self.state.write().await;
        state.shut_down = true;
        state.jobs.clear();
        tracing::info!("in-memory job store shut down");
    }
}

impl SchedulerClient for MemJobStore {
    fn get_job_summary(&self) -> BoxFuture<'_, anyhow::Result<FetchResult>> {
        Box::pin(async move { self.summarize().await.map(FetchResult::ok) })
    }
}
