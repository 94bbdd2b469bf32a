// crates/jobsummary/src/api/models.rs
use serde::{Deserialize, Serialize};

use crate::view::{ColumnDescriptor, Page, PaginationConfig};

/// The summary view as handed to a renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPageResponse {
    pub title: String,
    pub error: bool,
    /// Present only when `error` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub columns: Vec<ColumnDescriptor>,
    pub pagination: PaginationConfig,
    pub page: Page,
}

#[derive(Debug, Deserialize)]
pub struct ListJobsQuery {
    pub role: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
