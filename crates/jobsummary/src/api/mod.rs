use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::api::models::{ErrorBody, ListJobsQuery, SummaryPageResponse};
use crate::client::{http::JOB_SUMMARY_PATH, FetchResult, SchedulerClient};
use crate::jobs::{JobConfig, JobsRepo, MemJobStore};
use crate::view::{PageRequest, SummaryViewModel};

pub mod models;

/// Where `/jobs` reads job configurations from.
#[derive(Clone)]
pub enum JobCatalog {
    Memory(MemJobStore),
    Postgres(JobsRepo),
    /// Summaries come from elsewhere; individual jobs are not visible here.
    Unavailable,
}

impl JobCatalog {
    async fn list(
        &self,
        role: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Option<Vec<JobConfig>>> {
        let limit = limit.clamp(1, 500) as usize;
        let jobs = match self {
            JobCatalog::Memory(store) => {
                let mut jobs = store.fetch_jobs(role).await?;
                jobs.truncate(limit);
                jobs
            }
            JobCatalog::Postgres(repo) => repo
                .list_jobs(role, limit as i64)
                .await?
                .into_iter()
                .map(|j| j.into_config())
                .collect(),
            JobCatalog::Unavailable => return Ok(None),
        };
        Ok(Some(jobs))
    }
}

#[derive(Clone)]
pub struct ApiState {
    pub client: Arc<dyn SchedulerClient>,
    pub catalog: JobCatalog,
}

impl ApiState {
    pub fn new(client: Arc<dyn SchedulerClient>, catalog: JobCatalog) -> Self {
        Self { client, catalog }
    }

    pub fn memory(store: MemJobStore) -> Self {
        Self::new(Arc::new(store.clone()), JobCatalog::Memory(store))
    }

    pub fn postgres(repo: JobsRepo) -> Self {
        Self::new(Arc::new(repo.clone()), JobCatalog::Postgres(repo))
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        // Scheduler side
        .route(JOB_SUMMARY_PATH, get(job_summary))
        .route("/jobs", get(list_jobs))
        // View side
        .route("/summary", get(summary_page))
        // Health
        .route("/health", get(health))
        .with_state(state)
}

/// Answers `getJobSummary`. A failed lookup is reported in the envelope,
/// not as an HTTP error.
pub async fn job_summary(State(state): State<ApiState>) -> Json<FetchResult> {
    match state.client.get_job_summary().await {
        Ok(result) => Json(result),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "job summary lookup failed");
            Json(FetchResult::backend_error(Vec::new()))
        }
    }
}

/// Activates a fresh summary view, loads it and returns the requested page.
pub async fn summary_page(
    State(state): State<ApiState>,
    Query(request): Query<PageRequest>,
) -> Json<SummaryPageResponse> {
    let mut view = SummaryViewModel::initialize();

    if let Err(e) = view.load_summaries(state.client.as_ref()).await {
        tracing::info!(kind = e.kind(), "serving summary view with error banner");
    }

    let page = view.page(&request);
    let state = view.into_state();

    Json(SummaryPageResponse {
        error_message: state.error_banner().map(str::to_string),
        title: state.title,
        error: state.error,
        columns: state.columns,
        pagination: state.pagination,
        page,
    })
}

pub async fn list_jobs(
    State(state): State<ApiState>,
    Query(q): Query<ListJobsQuery>,
) -> impl IntoResponse {
    match state
        .catalog
        .list(q.role.as_deref(), q.limit.unwrap_or(100))
        .await
    {
        Ok(Some(jobs)) => (StatusCode::OK, Json(jobs)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody {
                error: "job listing is not available for a remote scheduler".into(),
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: format!("internal error: {e}"),
            }),
        )
            .into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}
