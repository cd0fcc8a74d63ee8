use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::message::Message;

#[derive(Clone)]
pub struct MessageService {
    pool: PgPool,
}

impl MessageService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn send(&self, sender_id: Uuid, recipient_id: Uuid, body: &str) -> Result<Message> {
        if sender_id == recipient_id {
            return Err(Error::BadRequest("Cannot message yourself".into()));
        }
        let recipient = sqlx::query("SELECT id FROM users WHERE id = $1")
            .bind(recipient_id)
            .fetch_optional(&self.pool)
            .await?;
        if recipient.is_none() {
            return Err(Error::NotFound("Recipient not found".into()));
        }

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (sender_id, recipient_id, body)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(sender_id)
        .bind(recipient_id)
        .bind(body)
        .fetch_one(&self.pool)
        .await?;
        Ok(message)
    }

    pub async fn conversation(&self, user_id: Uuid, peer_id: Uuid) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT * FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .bind(peer_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(messages)
    }

    pub async fn mark_read(&self, user_id: Uuid, peer_id: Uuid) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET read_at = NOW()
            WHERE recipient_id = $1 AND sender_id = $2 AND read_at IS NULL
            "#,
        )
        .bind(user_id)
        .bind(peer_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn unread_count(&self, user_id: Uuid) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) FROM messages
            WHERE recipient_id = $1 AND read_at IS NULL
            "#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count.0)
    }
}
