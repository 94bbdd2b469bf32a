use std::time::Duration;

use anyhow::Context;
use reqwest::Client;

use crate::client::{BoxFuture, FetchResult, SchedulerClient};

pub const JOB_SUMMARY_PATH: &str = "/api/jobsummary";

/// Fetches job summaries from a scheduler over HTTP.
#[derive(Clone)]
pub struct HttpSchedulerClient {
    client: Client,
    base_url: String,
}

impl HttpSchedulerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Self::with_client(base_url, client)
    }

    /// Uses a preconfigured reqwest client (proxies, TLS, timeouts).
    pub fn with_client(base_url: impl Into<String>, client: Client) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            anyhow::bail!("scheduler base url is empty");
        }

        Ok(Self { client, base_url })
    }

    pub fn summary_url(&self) -> String {
        format!("{}{}", self.base_url, JOB_SUMMARY_PATH)
    }

    async fn fetch(&self) -> anyhow::Result<FetchResult> {
        let url = self.summary_url();

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            anyhow::bail!("GET {url} returned HTTP {status}");
        }

        let result = resp
            .json::<FetchResult>()
            .await
            .with_context(|| format!("malformed job summary from {url}"))?;

        tracing::debug!(
            url = %url,
            error = result.error,
            rows = result.rows().len(),
            "fetched job summary"
        );

        Ok(result)
    }
}

impl SchedulerClient for HttpSchedulerClient {
    fn get_job_summary(&self) -> BoxFuture<'_, anyhow::Result<FetchResult>> {
        Box::pin(self.fetch())
    }
}
