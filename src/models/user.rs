use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const ROLE_CANDIDATE: &str = "candidate";
pub const ROLE_COMPANY: &str = "company";
pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OWNER: &str = "owner";

pub const STATUS_ACTIVE: &str = "active";
pub const STATUS_SUSPENDED: &str = "suspended";
pub const STATUS_BANNED: &str = "banned";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub status: String,
    pub city: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub company_name: Option<String>,
    pub email_alerts: bool,
    pub email_verified: bool,
    pub profile_views: i32,
    pub points: i32,
    pub level: i32,
    pub achievements: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn is_candidate(&self) -> bool {
        self.role == ROLE_CANDIDATE
    }

    pub fn is_company(&self) -> bool {
        self.role == ROLE_COMPANY
    }

    /// A candidate profile counts as complete when the fields the matcher
    /// relies on are all filled in.
    pub fn profile_complete(&self) -> bool {
        !self.skills.is_empty()
            && !self.interests.is_empty()
            && self.bio.as_deref().is_some_and(|b| !b.trim().is_empty())
            && self.city.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}
