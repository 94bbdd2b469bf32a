// crates/jobsummary/src/jobs/repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::client::{BoxFuture, FetchResult, SchedulerClient};
use crate::jobs::model::{JobConfig, JobKey, StoredJob};
use crate::jobs::summary::SummaryRow;

#[derive(Clone)]
pub struct JobsRepo {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct RoleCounts {
    role: String,
    job_count: i64,
    cron_job_count: i64,
}

impl JobsRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ----------------------------
    // Writes
    // ----------------------------

    /// Inserts or replaces the job with the same (role, environment, name).
    pub async fn save_job(&self, job: &JobConfig) -> anyhow::Result<Uuid> {
        job.key.validate()?;
        let job = job.clone().normalized();

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO job_configs (id, role, environment, name, cron_schedule, instance_count)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (role, environment, name)
            DO UPDATE SET
                cron_schedule = EXCLUDED.cron_schedule,
                instance_count = EXCLUDED.instance_count,
                updated_at = now()
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&job.key.role)
        .bind(&job.key.environment)
        .bind(&job.key.name)
        .bind(job.cron_schedule.as_deref())
        .bind(job.instance_count)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    pub async fn remove_job(&self, key: &JobKey) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            DELETE FROM job_configs
            WHERE role = $1 AND environment = $2 AND name = $3
            "#,
        )
        .bind(&key.role)
        .bind(&key.environment)
        .bind(&key.name)
        .execute(&self.pool)
        .await?;

        Ok(res.rows_affected() > 0)
    }

    pub async fn reset(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE TABLE job_configs")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ----------------------------
    // Reads
    // ----------------------------

    /// Jobs ordered by key, optionally for one role.
    /// limit is clamped to [1, 500]
    pub async fn list_jobs(
        &self,
        role: Option<&str>,
        limit: i64,
    ) -> anyhow::Result<Vec<StoredJob>> {
        let limit = limit.clamp(1, 500);

        let rows = sqlx::query_as::<_, StoredJob>(
            r#"
            SELECT
                id, role, environment, name,
                cron_schedule, instance_count,
                created_at, updated_at
            FROM job_configs
            WHERE ($1::text IS NULL OR role = $1)
            ORDER BY role, environment, name
            LIMIT $2
            "#,
        )
        .bind(role)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn summarize(&self) -> anyhow::Result<Vec<SummaryRow>> {
        let rows = sqlx::query_as::<_, RoleCounts>(
            r#"
            SELECT
                role,
                COUNT(*) FILTER (WHERE cron_schedule IS NULL) AS job_count,
                COUNT(*) FILTER (WHERE cron_schedule IS NOT NULL) AS cron_job_count
            FROM job_configs
            GROUP BY role
            ORDER BY role
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                SummaryRow::new(
                    r.role,
                    r.job_count.max(0) as u64,
                    r.cron_job_count.max(0) as u64,
                )
            })
            .collect())
    }
}

impl SchedulerClient for JobsRepo {
    fn get_job_summary(&self) -> BoxFuture<'_, anyhow::Result<FetchResult>> {
        Box::pin(async move { self.summarize().await.map(FetchResult::ok) })
    }
}
