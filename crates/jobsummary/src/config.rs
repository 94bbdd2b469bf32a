use std::time::Duration;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8081";

/// Where summaries come from, in order of preference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SummarySource {
    /// A remote scheduler reached over HTTP.
    Remote(String),
    /// The `job_configs` table of a Postgres database.
    Postgres(String),
    /// A process-local store.
    Memory,
}

impl SummarySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummarySource::Remote(_) => "remote",
            SummarySource::Postgres(_) => "postgres",
            SummarySource::Memory => "memory",
        }
    }
}

// Runtime configuration, read from the environment (and .env when present).
#[derive(Clone, Debug)]
pub struct Config {
    pub scheduler_url: Option<String>,
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub request_timeout_ms: u64,
    pub migrate_on_startup: bool,
    pub seed_demo_jobs: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |primary: &str, fallback: &str| env_or_fallback(&lookup, primary, fallback);

        let scheduler_url = var("SUMMARY_SCHEDULER_URL", "SCHEDULER_URL")
            .and_then(|s| normalize_optional_addr(&s));

        let database_url = var("SUMMARY_DATABASE_URL", "DATABASE_URL");

        let listen_addr = var("SUMMARY_LISTEN_ADDR", "LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let request_timeout_ms = match var("SUMMARY_REQUEST_TIMEOUT_MS", "REQUEST_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                anyhow::anyhow!("SUMMARY_REQUEST_TIMEOUT_MS is not a number: {raw}")
            })?,
            None => 5_000,
        };
        if request_timeout_ms == 0 {
            anyhow::bail!("SUMMARY_REQUEST_TIMEOUT_MS must be > 0");
        }

        let migrate_on_startup = env_bool(&lookup, "SUMMARY_MIGRATE_ON_STARTUP").unwrap_or(false);
        let seed_demo_jobs = env_bool(&lookup, "SUMMARY_SEED_DEMO").unwrap_or(true);

        Ok(Self {
            scheduler_url,
            database_url,
            listen_addr,
            request_timeout_ms,
            migrate_on_startup,
            seed_demo_jobs,
        })
    }

    pub fn source(&self) -> SummarySource {
        if let Some(url) = &self.scheduler_url {
            SummarySource::Remote(url.clone())
        } else if let Some(url) = &self.database_url {
            SummarySource::Postgres(url.clone())
        } else {
            SummarySource::Memory
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

fn env_or_fallback(
    lookup: &impl Fn(&str) -> Option<String>,
    primary: &str,
    fallback: &str,
) -> Option<String> {
    lookup(primary)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| lookup(fallback).filter(|s| !s.trim().is_empty()))
}

fn env_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<bool> {
    lookup(key).map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn normalize_optional_addr(value: &str) -> Option<String> {
    let v = value.trim();
    if v.is_empty() {
        return None;
    }
    if matches!(v.to_lowercase().as_str(), "0" | "off" | "false" | "none") {
        return None;
    }
    Some(v.to_string())
}
