use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::jobs::model::JobConfig;

/// Aggregated job counts for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub role: String,
    pub job_count: u64,
    pub cron_job_count: u64,
}

impl SummaryRow {
    pub fn new(role: impl Into<String>, job_count: u64, cron_job_count: u64) -> Self {
        Self {
            role: role.into(),
            job_count,
            cron_job_count,
        }
    }
}

/// One row per role, ordered by role name.
pub fn summarize<'a>(jobs: impl IntoIterator<Item = &'a JobConfig>) -> Vec<SummaryRow> {
    let mut by_role: BTreeMap<&str, (u64, u64)> = BTreeMap::new();

    for job in jobs {
        let counts = by_role.entry(job.key.role.as_str()).or_default();
        if job.is_cron() {
            counts.1 += 1;
        } else {
            counts.0 += 1;
        }
    }

    by_role
        .into_iter()
        .map(|(role, (jobs, cron_jobs))| SummaryRow::new(role, jobs, cron_jobs))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::model::JobKey;

    #[test]
    fn counts_cron_and_service_jobs_per_role() {
        let jobs = vec![
            JobConfig::service(JobKey::new("www-data", "prod", "hello"), 3),
            JobConfig::cron(JobKey::new("www-data", "prod", "nightly"), "0 3 * * *"),
            JobConfig::service(JobKey::new("ops", "devel", "probe"), 1),
            JobConfig::new(JobKey::new("ops", "devel", "blank"), Some("  ".into()), 1),
        ];

        let rows = summarize(&jobs);

        assert_eq!(
            rows,
            vec![
                SummaryRow::new("ops", 2, 0),
                SummaryRow::new("www-data", 1, 1),
            ]
        );
    }

    #[test]
    fn no_jobs_means_no_rows() {
        assert!(summarize(&Vec::<JobConfig>::new()).is_empty());
    }
}
