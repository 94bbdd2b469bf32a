//! The boundary between the summary view and whatever scheduler backs it.

use std::{future::Future, pin::Pin};

use serde::{Deserialize, Serialize};

use crate::jobs::summary::SummaryRow;

pub mod http;

pub use http::HttpSchedulerClient;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Response envelope of the scheduler's job summary call.
///
/// `error` is mandatory on the wire. `summaries` may be missing or `null`,
/// both of which read as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchResult {
    pub error: bool,
    #[serde(default)]
    pub summaries: Option<Vec<SummaryRow>>,
}

impl FetchResult {
    pub fn ok(summaries: Vec<SummaryRow>) -> Self {
        Self {
            error: false,
            summaries: Some(summaries),
        }
    }

    pub fn backend_error(summaries: Vec<SummaryRow>) -> Self {
        Self {
            error: true,
            summaries: Some(summaries),
        }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        self.summaries.as_deref().unwrap_or_default()
    }

    pub fn into_rows(self) -> Vec<SummaryRow> {
        self.summaries.unwrap_or_default()
    }
}

/// Anything that can answer `getJobSummary`.
///
/// Returns a boxed future so the view can hold `&dyn SchedulerClient`.
/// An `Err` means the call itself did not complete; a backend that completed
/// but detected a problem answers `Ok` with `error: true`.
pub trait SchedulerClient: Send + Sync {
    fn get_job_summary(&self) -> BoxFuture<'_, anyhow::Result<FetchResult>>;
}

impl<T: SchedulerClient + ?Sized> SchedulerClient for std::sync::Arc<T> {
    fn get_job_summary(&self) -> BoxFuture<'_, anyhow::Result<FetchResult>> {
        (**self).get_job_summary()
    }
}
