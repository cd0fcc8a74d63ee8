use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::user_dto::{RegisterUserPayload, UpdateProfilePayload};
use crate::error::{Error, Result};
use crate::models::user::{User, ROLE_CANDIDATE, STATUS_ACTIVE, STATUS_BANNED, STATUS_SUSPENDED};

#[derive(Clone)]
pub struct UserService {
    pool: PgPool,
}

impl UserService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn register(&self, payload: RegisterUserPayload) -> Result<User> {
        let exists = sqlx::query("SELECT id FROM users WHERE email = $1")
            .bind(&payload.email)
            .fetch_optional(&self.pool)
            .await?;
        if exists.is_some() {
            return Err(Error::Conflict(
                "A user with this email address already exists".into(),
            ));
        }

        let role = payload.role.unwrap_or_else(|| ROLE_CANDIDATE.to_string());
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, role, city, company_name)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&role)
        .bind(&payload.city)
        .bind(&payload.company_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn get_optional(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn update_profile(&self, id: Uuid, payload: UpdateProfilePayload) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = COALESCE($1, name),
                city = COALESCE($2, city),
                bio = COALESCE($3, bio),
                skills = COALESCE($4, skills),
                interests = COALESCE($5, interests),
                company_name = COALESCE($6, company_name),
                email_alerts = COALESCE($7, email_alerts),
                updated_at = NOW()
            WHERE id = $8
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.city)
        .bind(&payload.bio)
        .bind(&payload.skills)
        .bind(&payload.interests)
        .bind(&payload.company_name)
        .bind(payload.email_alerts)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn mark_email_verified(&self, id: Uuid) -> Result<(User, bool)> {
        // rows_affected tells whether this call did the transition, so the
        // EMAIL_VERIFIED points are only granted once.
        let res = sqlx::query(
            "UPDATE users SET email_verified = TRUE, updated_at = NOW() WHERE id = $1 AND NOT email_verified",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        let user = self.get(id).await?;
        Ok((user, res.rows_affected() > 0))
    }

    /// Users are never deleted, only status-flagged.
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<User> {
        if ![STATUS_ACTIVE, STATUS_SUSPENDED, STATUS_BANNED].contains(&status) {
            return Err(Error::BadRequest(format!("Unknown user status: {}", status)));
        }
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn record_profile_view(&self, id: Uuid) -> Result<i32> {
        let row: (i32,) = sqlx::query_as(
            "UPDATE users SET profile_views = profile_views + 1 WHERE id = $1 RETURNING profile_views",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.0)
    }

    pub async fn list(&self, role: Option<String>) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE ($1::text IS NULL OR role = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Candidates the alert dispatcher scans: active and opted into alerts.
    pub async fn list_alertable_candidates(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT * FROM users
            WHERE role = 'candidate' AND status = 'active' AND email_alerts
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    pub async fn status_counts(&self) -> Result<std::collections::HashMap<String, i64>> {
        let rows: Vec<(String, i64)> =
            sqlx::query_as("SELECT status, COUNT(*) FROM users GROUP BY status")
                .fetch_all(&self.pool)
                .await?;
        Ok(rows.into_iter().collect())
    }
}
