//! Scripted admin-panel assistant: fixed regex intent table, template
//! responses filled with live counts. Deliberately not a language model.

use regex::Regex;
use sqlx::PgPool;
use std::sync::LazyLock;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Greeting,
    Help,
    CandidateCount,
    CompanyCount,
    JobCount,
    ApplicationCount,
    PendingModeration,
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Greeting => "greeting",
            Intent::Help => "help",
            Intent::CandidateCount => "candidate_count",
            Intent::CompanyCount => "company_count",
            Intent::JobCount => "job_count",
            Intent::ApplicationCount => "application_count",
            Intent::PendingModeration => "pending_moderation",
            Intent::Unknown => "unknown",
        }
    }
}

static INTENT_TABLE: LazyLock<Vec<(Regex, Intent)>> = LazyLock::new(|| {
    let table = [
        (r"(?i)\b(hi|hello|hey|ola|olá)\b", Intent::Greeting),
        (r"(?i)\b(help|what can you do|commands)\b", Intent::Help),
        (
            r"(?i)\bhow many\b.*\bcandidates?\b|\bcandidates? count\b",
            Intent::CandidateCount,
        ),
        (
            r"(?i)\bhow many\b.*\bcompan(y|ies)\b|\bcompan(y|ies) count\b",
            Intent::CompanyCount,
        ),
        (
            r"(?i)\bhow many\b.*\bjobs?\b|\b(open|active) jobs?\b",
            Intent::JobCount,
        ),
        (
            r"(?i)\bhow many\b.*\bapplications?\b|\bapplications? count\b",
            Intent::ApplicationCount,
        ),
        (
            r"(?i)\b(banned|suspended|moderation)\b",
            Intent::PendingModeration,
        ),
    ];
    table
        .into_iter()
        .map(|(pattern, intent)| {
            (
                Regex::new(pattern).expect("intent pattern must compile"),
                intent,
            )
        })
        .collect()
});

/// First matching pattern wins; anything else is Unknown.
pub fn detect_intent(message: &str) -> Intent {
    for (pattern, intent) in INTENT_TABLE.iter() {
        if pattern.is_match(message) {
            return *intent;
        }
    }
    Intent::Unknown
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct AssistantReply {
    pub intent: String,
    pub reply: String,
}

#[derive(Clone)]
pub struct AssistantService {
    pool: PgPool,
}

impl AssistantService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn reply(&self, message: &str) -> Result<AssistantReply> {
        let intent = detect_intent(message);
        let reply = match intent {
            Intent::Greeting => "Hello! Ask me about candidates, companies, jobs, or applications.".to_string(),
            Intent::Help => {
                "I can answer: how many candidates/companies/jobs/applications there are, \
                 and how many accounts are suspended or banned."
                    .to_string()
            }
            Intent::CandidateCount => {
                let n = self.count_users_by_role("candidate").await?;
                format!("There are {} registered candidates.", n)
            }
            Intent::CompanyCount => {
                let n = self.count_users_by_role("company").await?;
                format!("There are {} registered companies.", n)
            }
            Intent::JobCount => {
                let n: (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM jobs WHERE status = 'open'")
                        .fetch_one(&self.pool)
                        .await?;
                format!("There are {} open job postings.", n.0)
            }
            Intent::ApplicationCount => {
                let n: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
                    .fetch_one(&self.pool)
                    .await?;
                format!("{} applications have been submitted in total.", n.0)
            }
            Intent::PendingModeration => {
                let n: (i64,) = sqlx::query_as(
                    "SELECT COUNT(*) FROM users WHERE status IN ('suspended', 'banned')",
                )
                .fetch_one(&self.pool)
                .await?;
                format!("{} accounts are currently suspended or banned.", n.0)
            }
            Intent::Unknown => {
                "Sorry, I did not understand that. Try 'help' to see what I can answer."
                    .to_string()
            }
        };

        Ok(AssistantReply {
            intent: intent.as_str().to_string(),
            reply,
        })
    }

    async fn count_users_by_role(&self, role: &str) -> Result<i64> {
        let n: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;
        Ok(n.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greetings_are_detected() {
        assert_eq!(detect_intent("hello there"), Intent::Greeting);
        assert_eq!(detect_intent("Olá!"), Intent::Greeting);
    }

    #[test]
    fn count_questions_map_to_their_intent() {
        assert_eq!(
            detect_intent("How many candidates do we have?"),
            Intent::CandidateCount
        );
        assert_eq!(
            detect_intent("how many companies are registered"),
            Intent::CompanyCount
        );
        assert_eq!(detect_intent("open jobs right now?"), Intent::JobCount);
        assert_eq!(
            detect_intent("how many applications today"),
            Intent::ApplicationCount
        );
    }

    #[test]
    fn gibberish_is_unknown() {
        assert_eq!(detect_intent("xyzzy plugh"), Intent::Unknown);
    }
}
