use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::application::{Application, APPLICATION_PENDING, APPLICATION_STATUSES};
use crate::models::job::JOB_OPEN;
use crate::models::user::{ROLE_CANDIDATE, STATUS_ACTIVE};

#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One application per (candidate, job) pair; re-applying is a conflict.
    pub async fn apply(&self, candidate_id: Uuid, job_id: Uuid) -> Result<Application> {
        let candidate: (String, String) =
            sqlx::query_as("SELECT role, status FROM users WHERE id = $1")
                .bind(candidate_id)
                .fetch_one(&self.pool)
                .await?;
        if candidate.0 != ROLE_CANDIDATE {
            return Err(Error::Forbidden("Only candidates can apply to jobs".into()));
        }
        if candidate.1 != STATUS_ACTIVE {
            return Err(Error::Forbidden("This account cannot apply to jobs".into()));
        }

        let job: (String,) = sqlx::query_as("SELECT status FROM jobs WHERE id = $1")
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;
        if job.0 != JOB_OPEN {
            return Err(Error::BadRequest("This job is not open for applications".into()));
        }

        let existing = sqlx::query(
            "SELECT id FROM applications WHERE candidate_id = $1 AND job_id = $2",
        )
        .bind(candidate_id)
        .bind(job_id)
        .fetch_optional(&self.pool)
        .await?;
        if existing.is_some() {
            return Err(Error::Conflict("Already applied to this job".into()));
        }

        let application = sqlx::query_as::<_, Application>(
            r#"
            INSERT INTO applications (candidate_id, job_id, status)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .bind(APPLICATION_PENDING)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn get(&self, id: Uuid) -> Result<Application> {
        let application = sqlx::query_as::<_, Application>(
            "SELECT * FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn list_for_candidate(&self, candidate_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE candidate_id = $1
            ORDER BY applied_at DESC
            "#,
        )
        .bind(candidate_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    pub async fn list_for_job(&self, job_id: Uuid) -> Result<Vec<Application>> {
        let applications = sqlx::query_as::<_, Application>(
            r#"
            SELECT * FROM applications
            WHERE job_id = $1
            ORDER BY applied_at DESC
            "#,
        )
        .bind(job_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(applications)
    }

    /// Status is advanced only by the company owning the posting, never by
    /// the candidate.
    pub async fn update_status(
        &self,
        id: Uuid,
        company_id: Uuid,
        status: &str,
    ) -> Result<Application> {
        if !APPLICATION_STATUSES.contains(&status) {
            return Err(Error::BadRequest(format!(
                "Unknown application status: {}",
                status
            )));
        }

        let owner: (Uuid,) = sqlx::query_as(
            r#"
            SELECT j.company_id FROM applications a
            JOIN jobs j ON j.id = a.job_id
            WHERE a.id = $1
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        if owner.0 != company_id {
            return Err(Error::Forbidden(
                "Only the company owning the job can update this application".into(),
            ));
        }

        let application = sqlx::query_as::<_, Application>(
            r#"
            UPDATE applications
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(application)
    }

    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.0)
    }

    /// Applications per day over the last 7 days, for the admin dashboard.
    pub async fn daily_counts(&self) -> Result<Vec<(String, i64)>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT TO_CHAR(applied_at, 'YYYY-MM-DD') AS date, COUNT(*)
            FROM applications
            WHERE applied_at > NOW() - INTERVAL '7 days'
            GROUP BY TO_CHAR(applied_at, 'YYYY-MM-DD')
            ORDER BY date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
