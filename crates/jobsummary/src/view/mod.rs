//! Render-ready state for the scheduled jobs summary table.

use serde::Serialize;

use crate::client::SchedulerClient;
use crate::error::SummaryError;
use crate::jobs::summary::SummaryRow;

pub mod page;

pub use page::{Page, PageRequest};

pub const TITLE: &str = "Scheduled Jobs Summary";
pub const ERROR_MESSAGE: &str =
    "An error occurred when querying the server. Please reload this page.";

pub const FIELD_ROLE: &str = "role";
pub const FIELD_JOB_COUNT: &str = "jobCount";
pub const FIELD_CRON_JOB_COUNT: &str = "cronJobCount";

/// Cells carrying this hint link to the role's page.
pub const RENDER_ROLE_LINK: &str = "roleLink";

pub const DEFAULT_ITEMS_BY_PAGE: usize = 25;
pub const DEFAULT_MAX_PAGE_LINKS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    pub label: String,
    pub field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub render_hint: Option<String>,
}

impl ColumnDescriptor {
    pub fn new(label: &str, field: &str) -> Self {
        Self {
            label: label.to_string(),
            field: field.to_string(),
            render_hint: None,
        }
    }

    pub fn with_render_hint(mut self, hint: &str) -> Self {
        self.render_hint = Some(hint.to_string());
        self
    }

    /// Text of this column's cell for `row`. Unknown fields have no cell.
    pub fn cell_text(&self, row: &SummaryRow) -> Option<String> {
        match self.field.as_str() {
            FIELD_ROLE => Some(row.role.clone()),
            FIELD_JOB_COUNT => Some(row.job_count.to_string()),
            FIELD_CRON_JOB_COUNT => Some(row.cron_job_count.to_string()),
            _ => None,
        }
    }
}

/// Link target for a role cell.
pub fn role_link(role: &str) -> String {
    format!("/scheduler/{role}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    pub is_global_search_activated: bool,
    pub is_pagination_enabled: bool,
    pub items_by_page: usize,
    pub max_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            is_global_search_activated: true,
            is_pagination_enabled: true,
            items_by_page: DEFAULT_ITEMS_BY_PAGE,
            max_size: DEFAULT_MAX_PAGE_LINKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub title: String,
    pub error: bool,
    pub error_message: String,
    pub columns: Vec<ColumnDescriptor>,
    pub rows: Vec<SummaryRow>,
    pub pagination: PaginationConfig,
}

impl ViewState {
    /// The message to show above the table, if any.
    pub fn error_banner(&self) -> Option<&str> {
        self.error.then_some(self.error_message.as_str())
    }
}

/// Mediates between a [`SchedulerClient`] and whatever renders the table.
///
/// `load_summaries` borrows the view mutably, so nothing can read `rows`
/// while a fetch is pending. Dropping the load future discards the result.
#[derive(Debug, Clone)]
pub struct SummaryViewModel {
    state: ViewState,
    loaded: bool,
}

impl SummaryViewModel {
    pub fn initialize() -> Self {
        let columns = vec![
            ColumnDescriptor::new("Role", FIELD_ROLE).with_render_hint(RENDER_ROLE_LINK),
            ColumnDescriptor::new("Jobs", FIELD_JOB_COUNT),
            ColumnDescriptor::new("Cron Jobs", FIELD_CRON_JOB_COUNT),
        ];

        Self {
            state: ViewState {
                title: TITLE.to_string(),
                error: false,
                error_message: ERROR_MESSAGE.to_string(),
                columns,
                rows: Vec::new(),
                pagination: PaginationConfig::default(),
            },
            loaded: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn into_state(self) -> ViewState {
        self.state
    }

    /// True once a fetch has completed, successfully or not.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetches the summary and applies it to the view.
    ///
    /// The view state is updated on every path:
    /// - the scheduler answered: `error` and `rows` come from the answer, and
    ///   a flagged answer is returned as [`SummaryError::BackendReported`];
    /// - the call failed: `error` is set and `rows` is emptied.
    ///
    /// Ok carries the number of rows now in the view.
    pub async fn load_summaries(
        &mut self,
        client: &dyn SchedulerClient,
    ) -> Result<usize, SummaryError> {
        let outcome = client.get_job_summary().await;
        self.loaded = true;

        match outcome {
            Ok(result) => {
                self.state.error = result.error;
                self.state.rows = result.into_rows();

                let rows = self.state.rows.len();
                if self.state.error {
                    tracing::warn!(rows, "scheduler flagged the job summary as an error");
                    return Err(SummaryError::BackendReported { rows });
                }

                tracing::debug!(rows, "job summary loaded");
                Ok(rows)
            }
            Err(e) => {
                self.state.error = true;
                self.state.rows.clear();
                tracing::warn!(error = %format!("{e:#}"), "job summary fetch failed");
                Err(SummaryError::Fetch(e))
            }
        }
    }

    pub fn page(&self, request: &PageRequest) -> Page {
        self.state.page(request)
    }
}
