/// Why a job summary load left the view in its error state.
///
/// Both kinds show the user the same generic banner; the variants exist for
/// logging and for callers that want to tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    /// The scheduler answered, but flagged the answer as an error.
    #[error("scheduler reported an error building the job summary ({rows} rows returned)")]
    BackendReported { rows: usize },

    /// The call to the scheduler did not complete.
    #[error("job summary fetch failed: {0:#}")]
    Fetch(#[source] anyhow::Error),
}

impl SummaryError {
    pub fn kind(&self) -> &'static str {
        match self {
            SummaryError::BackendReported { .. } => "BACKEND_REPORTED",
            SummaryError::Fetch(_) => "FETCH",
        }
    }
}
