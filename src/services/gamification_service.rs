use sqlx::{PgPool, Postgres, Row, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::error::Result;
use crate::models::gamification::{PointEvent, PointGrant};
use crate::models::user::User;
use crate::services::achievements::{
    self, AchievementDef, ActivitySnapshot,
};

/// Point, level, and achievement bookkeeping.
///
/// Every point mutation, action-based or achievement-based, goes through
/// [`GamificationService::grant`]: it appends a history row and increments
/// the user's total in one transaction, so `users.points` always equals the
/// sum of that user's `point_history` entries.
#[derive(Clone)]
pub struct GamificationService {
    pool: PgPool,
}

impl GamificationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Grants the configured point value for `action`. Unknown or
    /// zero-valued actions are a no-op that reports the current totals.
    pub async fn award_action(&self, user_id: Uuid, action: &str) -> Result<PointGrant> {
        let points = achievements::points_for_action(action);
        if points == 0 {
            let row = sqlx::query("SELECT points, level FROM users WHERE id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
            return Ok(PointGrant {
                points_awarded: 0,
                total_points: row.try_get("points")?,
                level: row.try_get("level")?,
                leveled_up: false,
            });
        }
        self.grant(user_id, action, points).await
    }

    /// The single authoritative point mutation: history append + atomic
    /// increment + level recompute, in one transaction.
    pub async fn grant(&self, user_id: Uuid, action: &str, points: i32) -> Result<PointGrant> {
        let mut tx = self.pool.begin().await?;
        let grant = grant_in_tx(&mut tx, user_id, action, points).await?;
        tx.commit().await?;

        if grant.leveled_up {
            info!(%user_id, level = grant.level, "user leveled up");
        }
        Ok(grant)
    }

    /// Re-evaluates every achievement predicate against the user's current
    /// activity and awards whatever newly qualifies. Safe to call at any
    /// time; a second call with no state change awards nothing.
    pub async fn check_achievements(&self, user_id: Uuid) -> Result<Vec<&'static AchievementDef>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;
        let snap = self.activity_snapshot(&user).await?;
        let candidates = achievements::newly_satisfied(&user.achievements, &snap);

        let mut awarded = Vec::new();
        for def in candidates {
            if self.award_achievement(&user, def).await? {
                awarded.push(def);
            }
        }
        Ok(awarded)
    }

    /// Awards one achievement: set-union append, point grant through the
    /// shared path, and a notification, all in one transaction. Returns
    /// false when a concurrent request already awarded it.
    async fn award_achievement(&self, user: &User, def: &'static AchievementDef) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let res = sqlx::query(
            r#"
            UPDATE users
            SET achievements = array_append(achievements, $1), updated_at = NOW()
            WHERE id = $2 AND NOT (achievements @> ARRAY[$1])
            "#,
        )
        .bind(def.id)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        grant_in_tx(&mut tx, user.id, &format!("ACHIEVEMENT:{}", def.id), def.points).await?;

        sqlx::query(
            r#"
            INSERT INTO notifications (user_id, kind, title, body, metadata)
            VALUES ($1, 'achievement', $2, $3, $4)
            "#,
        )
        .bind(user.id)
        .bind(format!("Achievement unlocked: {}", def.name))
        .bind(format!("{} (+{} points)", def.description, def.points))
        .bind(serde_json::json!({ "achievement_id": def.id }))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(user_id = %user.id, achievement = def.id, "achievement awarded");
        Ok(true)
    }

    pub async fn history(&self, user_id: Uuid, limit: i64) -> Result<Vec<PointEvent>> {
        let events = sqlx::query_as::<_, PointEvent>(
            r#"
            SELECT * FROM point_history
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(events)
    }

    async fn activity_snapshot(&self, user: &User) -> Result<ActivitySnapshot> {
        let row = sqlx::query(
            r#"
            SELECT
                (SELECT COUNT(*) FROM applications WHERE candidate_id = $1) AS applications,
                (SELECT COUNT(*) FROM applications WHERE candidate_id = $1 AND status = 'accepted') AS accepted,
                (SELECT COUNT(*) FROM applications WHERE candidate_id = $1 AND status = 'hired') AS hired,
                (SELECT COUNT(*) FROM messages WHERE sender_id = $1) AS messages_sent,
                (SELECT COUNT(*) FROM reviews WHERE author_id = $1) AS reviews_written,
                (SELECT COUNT(*) FROM jobs WHERE company_id = $1) AS jobs_posted
            "#,
        )
        .bind(user.id)
        .fetch_one(&self.pool)
        .await?;

        let account_age_days = user
            .created_at
            .map(|c| (crate::utils::time::now() - c).num_days())
            .unwrap_or(0);

        Ok(ActivitySnapshot {
            applications: row.try_get("applications")?,
            accepted_applications: row.try_get("accepted")?,
            hired_applications: row.try_get("hired")?,
            messages_sent: row.try_get("messages_sent")?,
            reviews_written: row.try_get("reviews_written")?,
            profile_views: user.profile_views as i64,
            jobs_posted: row.try_get("jobs_posted")?,
            total_points: user.points as i64,
            account_age_days,
            profile_complete: user.profile_complete(),
        })
    }
}

async fn grant_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    user_id: Uuid,
    action: &str,
    points: i32,
) -> Result<PointGrant> {
    sqlx::query(
        r#"
        INSERT INTO point_history (user_id, action, points)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(user_id)
    .bind(action)
    .bind(points)
    .execute(&mut **tx)
    .await?;

    // SQL-side increment: concurrent grants for the same user cannot lose
    // updates the way a read-modify-write cycle could.
    let row = sqlx::query(
        r#"
        UPDATE users
        SET points = points + $1, updated_at = NOW()
        WHERE id = $2
        RETURNING points, level
        "#,
    )
    .bind(points)
    .bind(user_id)
    .fetch_one(&mut **tx)
    .await?;

    let total_points: i32 = row.try_get("points")?;
    let old_level: i32 = row.try_get("level")?;
    let level = achievements::level_for_points(total_points);
    if level != old_level {
        sqlx::query("UPDATE users SET level = $1 WHERE id = $2")
            .bind(level)
            .bind(user_id)
            .execute(&mut **tx)
            .await?;
    }

    Ok(PointGrant {
        points_awarded: points,
        total_points,
        level,
        leveled_up: level > old_level,
    })
}
