use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::gamification::PointEvent;
use crate::models::user::User;
use crate::services::achievements::AchievementDef;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// candidate | company | admin; defaults to candidate.
    pub role: Option<String>,
    pub city: Option<String>,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfilePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    pub city: Option<String>,
    #[validate(length(max = 2000))]
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub company_name: Option<String>,
    pub email_alerts: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
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

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            status: u.status,
            city: u.city,
            bio: u.bio,
            skills: u.skills,
            interests: u.interests,
            company_name: u.company_name,
            email_alerts: u.email_alerts,
            email_verified: u.email_verified,
            profile_views: u.profile_views,
            points: u.points,
            level: u.level,
            achievements: u.achievements,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievementView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub points: i32,
}

impl From<&AchievementDef> for AchievementView {
    fn from(def: &AchievementDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            points: def.points,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GamificationSummary {
    pub points: i32,
    pub level: i32,
    pub achievements: Vec<AchievementView>,
    pub history: Vec<PointEvent>,
}
