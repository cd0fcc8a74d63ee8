use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const JOB_OPEN: &str = "open";
pub const JOB_CLOSED: &str = "closed";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Vec<String>,
    pub location: String,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Searchable text body of the posting, used by the match scorer for
    /// interest and bio-keyword lookups.
    pub fn full_text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(desc) = &self.description {
            text.push(' ');
            text.push_str(desc);
        }
        if !self.requirements.is_empty() {
            text.push(' ');
            text.push_str(&self.requirements.join(" "));
        }
        text.to_lowercase()
    }
}
