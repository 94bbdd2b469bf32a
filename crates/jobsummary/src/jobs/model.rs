use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a job: the owning role, the environment it runs in and its name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobKey {
    pub role: String,
    pub environment: String,
    pub name: String,
}

impl JobKey {
    pub fn new(
        role: impl Into<String>,
        environment: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            environment: environment.into(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (part, value) in [
            ("role", &self.role),
            ("environment", &self.environment),
            ("name", &self.name),
        ] {
            if value.trim().is_empty() {
                anyhow::bail!("job key {part} must not be empty");
            }
            if value.contains('/') {
                anyhow::bail!("job key {part} must not contain '/': {value}");
            }
        }
        Ok(())
    }
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.role, self.environment, self.name)
    }
}

/// Field values are normalized by [`JobConfig::new`]; deserialized configs
/// and [`JobConfig::normalized`] go through it as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "JobConfigFields")]
pub struct JobConfig {
    pub key: JobKey,
    pub cron_schedule: Option<String>,
    pub instance_count: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobConfigFields {
    key: JobKey,
    #[serde(default)]
    cron_schedule: Option<String>,
    instance_count: i32,
}

impl From<JobConfigFields> for JobConfig {
    fn from(f: JobConfigFields) -> Self {
        JobConfig::new(f.key, f.cron_schedule, f.instance_count)
    }
}

impl JobConfig {
    pub fn new(key: JobKey, cron_schedule: Option<String>, instance_count: i32) -> Self {
        // a blank schedule is the same as no schedule
        let cron_schedule = cron_schedule
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        Self {
            key,
            cron_schedule,
            instance_count: instance_count.max(0),
        }
    }

    /// Blank schedule to none, negative instance counts to zero.
    pub fn normalized(self) -> Self {
        Self::new(self.key, self.cron_schedule, self.instance_count)
    }

    pub fn service(key: JobKey, instance_count: i32) -> Self {
        Self::new(key, None, instance_count)
    }

    pub fn cron(key: JobKey, schedule: impl Into<String>) -> Self {
        Self::new(key, Some(schedule.into()), 1)
    }

    pub fn kind(&self) -> JobKind {
        if self
            .cron_schedule
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
        {
            JobKind::Cron
        } else {
            JobKind::Service
        }
    }

    pub fn is_cron(&self) -> bool {
        matches!(self.kind(), JobKind::Cron)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobKind {
    Service,
    Cron,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Service => "service",
            JobKind::Cron => "cron",
        }
    }
}

/// A persisted job configuration row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct StoredJob {
    pub id: Uuid,
    pub role: String,
    pub environment: String,
    pub name: String,
    pub cron_schedule: Option<String>,
    pub instance_count: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredJob {
    pub fn key(&self) -> JobKey {
        JobKey::new(&self.role, &self.environment, &self.name)
    }

    pub fn into_config(self) -> JobConfig {
        let key = self.key();
        JobConfig::new(key, self.cron_schedule, self.instance_count)
    }
}
