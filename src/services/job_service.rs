use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::{Job, JOB_CLOSED, JOB_OPEN};
use crate::models::user::ROLE_COMPANY;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let company: (String,) = sqlx::query_as("SELECT role FROM users WHERE id = $1")
            .bind(payload.company_id)
            .fetch_one(&self.pool)
            .await?;
        if company.0 != ROLE_COMPANY {
            return Err(Error::Forbidden("Only company accounts can post jobs".into()));
        }

        let status = payload.status.unwrap_or_else(|| JOB_OPEN.to_string());
        if status != JOB_OPEN && status != JOB_CLOSED {
            return Err(Error::BadRequest(format!("Unknown job status: {}", status)));
        }

        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (company_id, title, description, requirements, location, salary_from, salary_to, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(payload.company_id)
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.requirements)
        .bind(&payload.location)
        .bind(payload.salary_from)
        .bind(payload.salary_to)
        .bind(&status)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn get(&self, id: Uuid) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let current = self.get(id).await?;
        if current.company_id != payload.company_id {
            return Err(Error::Forbidden(
                "Only the owning company can edit this job".into(),
            ));
        }
        if let Some(status) = payload.status.as_deref() {
            if status != JOB_OPEN && status != JOB_CLOSED {
                return Err(Error::BadRequest(format!("Unknown job status: {}", status)));
            }
        }

        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET title = COALESCE($1, title),
                description = COALESCE($2, description),
                requirements = COALESCE($3, requirements),
                location = COALESCE($4, location),
                salary_from = COALESCE($5, salary_from),
                salary_to = COALESCE($6, salary_to),
                status = COALESCE($7, status),
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&payload.title)
        .bind(&payload.description)
        .bind(&payload.requirements)
        .bind(&payload.location)
        .bind(payload.salary_from)
        .bind(payload.salary_to)
        .bind(&payload.status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(job)
    }

    pub async fn delete(&self, id: Uuid, company_id: Uuid) -> Result<()> {
        let current = self.get(id).await?;
        if current.company_id != company_id {
            return Err(Error::Forbidden(
                "Only the owning company can delete this job".into(),
            ));
        }
        sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let page = query.page.unwrap_or(1).max(1);
        let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
        let search = query.search.map(|s| format!("%{}%", s));
        let status = query.status;

        let total: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR title ILIKE $2 OR description ILIKE $2 OR location ILIKE $2)
            "#,
        )
        .bind(&status)
        .bind(&search)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR title ILIKE $2 OR description ILIKE $2 OR location ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(&status)
        .bind(&search)
        .bind(per_page)
        .bind((page - 1) * per_page)
        .fetch_all(&self.pool)
        .await?;

        Ok(JobList {
            items,
            total: total.0,
            page,
            per_page,
            total_pages: (total.0 + per_page - 1) / per_page,
        })
    }

    /// Open postings created within the last `days` days, oldest first.
    /// This is the candidate set the alert dispatcher scores.
    pub async fn list_recent_open(&self, days: i64) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE status = 'open' AND created_at > NOW() - ($1 * INTERVAL '1 day')
            ORDER BY created_at ASC
            "#,
        )
        .bind(days)
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn list_open(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            "SELECT * FROM jobs WHERE status = 'open' ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn count_by_status(&self) -> Result<std::collections::HashMap<String, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM jobs GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
