use serde::{Deserialize, Serialize};

use crate::jobs::summary::SummaryRow;
use crate::view::{ViewState, FIELD_CRON_JOB_COUNT, FIELD_JOB_COUNT, FIELD_ROLE};

/// What the table is currently showing: page number, global search, sort.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PageRequest {
    /// 1-based; out of range values are clamped.
    pub page: Option<usize>,
    pub search: Option<String>,
    /// A column field to sort by.
    pub sort: Option<String>,
    #[serde(default)]
    pub descending: bool,
}

impl PageRequest {
    pub fn page(page: usize) -> Self {
        Self {
            page: Some(page),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, field: impl Into<String>, descending: bool) -> Self {
        self.sort = Some(field.into());
        self.descending = descending;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub rows: Vec<SummaryRow>,
    pub page: usize,
    pub page_count: usize,
    /// Rows matching the search, across all pages.
    pub total_items: usize,
    pub page_links: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey<'a> {
    Integer(u64),
    Text(&'a str),
}

fn sort_key<'a>(row: &'a SummaryRow, field: &str) -> SortKey<'a> {
    match field {
        FIELD_JOB_COUNT => SortKey::Integer(row.job_count),
        FIELD_CRON_JOB_COUNT => SortKey::Integer(row.cron_job_count),
        _ => SortKey::Text(&row.role),
    }
}

fn is_sortable(field: &str) -> bool {
    matches!(field, FIELD_ROLE | FIELD_JOB_COUNT | FIELD_CRON_JOB_COUNT)
}

impl ViewState {
    /// Applies search, sort and pagination to the loaded rows.
    pub fn page(&self, request: &PageRequest) -> Page {
        let needle = request
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty() && self.pagination.is_global_search_activated);

        let mut matches: Vec<&SummaryRow> = self
            .rows
            .iter()
            .filter(|row| match &needle {
                Some(needle) => self.row_matches(row, needle),
                None => true,
            })
            .collect();

        if let Some(field) = request.sort.as_deref().filter(|f| is_sortable(f)) {
            matches.sort_by(|a, b| {
                let ord = sort_key(a, field).cmp(&sort_key(b, field));
                if request.descending {
                    ord.reverse()
                } else {
                    ord
                }
            });
        }

        let total_items = matches.len();

        if !self.pagination.is_pagination_enabled {
            return Page {
                rows: matches.into_iter().cloned().collect(),
                page: 1,
                page_count: 1,
                total_items,
                page_links: vec![1],
            };
        }

        let per_page = self.pagination.items_by_page.max(1);
        let page_count = total_items.div_ceil(per_page).max(1);
        let page = request.page.unwrap_or(1).clamp(1, page_count);

        let rows = matches
            .into_iter()
            .skip((page - 1) * per_page)
            .take(per_page)
            .cloned()
            .collect();

        Page {
            rows,
            page,
            page_count,
            total_items,
            page_links: page_links(page, page_count, self.pagination.max_size),
        }
    }

    fn row_matches(&self, row: &SummaryRow, needle: &str) -> bool {
        self.columns.iter().any(|col| {
            col.cell_text(row)
                .is_some_and(|text| text.to_lowercase().contains(needle))
        })
    }
}

/// Up to `max_size` consecutive page numbers around `page`, kept inside
/// `1..=page_count`.
pub fn page_links(page: usize, page_count: usize, max_size: usize) -> Vec<usize> {
    let max_size = max_size.max(1);
    if page_count <= max_size {
        return (1..=page_count).collect();
    }

    let mut start = page.saturating_sub(max_size / 2).max(1);
    let mut end = start + max_size - 1;
    if end > page_count {
        end = page_count;
        start = end + 1 - max_size;
    }

    (start..=end).collect()
}
