use rand::Rng;
use serde::Serialize;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{error, info};
use uuid::Uuid;

use crate::error::Result;
use crate::models::job::Job;
use crate::models::notification::CreateNotification;
use crate::models::user::User;
use crate::services::mailer_service::MailerService;
use crate::services::match_service::{self, ScoredJob, MIN_ALERT_SCORE};
use crate::services::notification_service::NotificationService;
use crate::services::{job_service::JobService, user_service::UserService};

/// Days back the periodic scan looks for fresh postings.
const SCAN_WINDOW_DAYS: i64 = 7;
/// At most this many jobs per alert email.
const DIGEST_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize)]
pub struct AlertOutcome {
    pub candidate_id: Uuid,
    pub email: String,
    pub matches: usize,
    pub sent: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
pub struct AlertRunReport {
    pub scanned: usize,
    pub notified: usize,
    pub failed: usize,
    pub outcomes: Vec<AlertOutcome>,
}

/// Job alert dispatcher: one linear pass over eligible candidates, scoring
/// recent postings and mailing a digest when anything clears the alert
/// threshold. A failed send is recorded and the pass moves on; there is no
/// retry queue.
#[derive(Clone)]
pub struct AlertService {
    users: UserService,
    jobs: JobService,
    notifications: NotificationService,
    mailer: MailerService,
}

impl AlertService {
    pub fn new(pool: PgPool, mailer: MailerService) -> Self {
        Self {
            users: UserService::new(pool.clone()),
            jobs: JobService::new(pool.clone()),
            notifications: NotificationService::new(pool),
            mailer,
        }
    }

    /// Full re-scan: every active, opted-in candidate against the postings
    /// of the last 7 days. Invoked by the periodic worker and by the admin
    /// trigger endpoint.
    pub async fn run_scan(&self) -> Result<AlertRunReport> {
        let candidates = self.users.list_alertable_candidates().await?;
        let jobs = self.jobs.list_recent_open(SCAN_WINDOW_DAYS).await?;
        let now = crate::utils::time::now();

        let mut report = AlertRunReport::default();
        for candidate in candidates {
            report.scanned += 1;
            let scored = match_service::score_all(&candidate, jobs.clone(), now);
            let matches = match_service::rank(scored, DIGEST_LIMIT, MIN_ALERT_SCORE);
            if matches.is_empty() {
                continue;
            }

            let outcome = self.deliver(&candidate, &matches).await;
            if outcome.sent {
                report.notified += 1;
            } else {
                report.failed += 1;
            }
            report.outcomes.push(outcome);

            // Spread sends out so the mail relay is not hammered.
            let jitter = rand::thread_rng().gen_range(100..=200);
            tokio::time::sleep(Duration::from_millis(jitter)).await;
        }

        info!(
            scanned = report.scanned,
            notified = report.notified,
            failed = report.failed,
            "alert scan finished"
        );
        Ok(report)
    }

    /// On-demand path: a single freshly published posting, matched against
    /// every eligible candidate.
    pub async fn notify_for_job(&self, job: &Job) -> Result<AlertRunReport> {
        let candidates = self.users.list_alertable_candidates().await?;
        let now = crate::utils::time::now();

        let mut report = AlertRunReport::default();
        for candidate in candidates {
            report.scanned += 1;
            let score = match_service::score(&candidate, job, now);
            if score < MIN_ALERT_SCORE {
                continue;
            }

            let matches = vec![ScoredJob {
                job: job.clone(),
                score,
            }];
            let outcome = self.deliver(&candidate, &matches).await;
            if outcome.sent {
                report.notified += 1;
            } else {
                report.failed += 1;
            }
            report.outcomes.push(outcome);

            let jitter = rand::thread_rng().gen_range(100..=200);
            tokio::time::sleep(Duration::from_millis(jitter)).await;
        }
        Ok(report)
    }

    /// Sends the digest email and records an in-app notification. Errors are
    /// captured in the outcome, never propagated, so one bad address cannot
    /// abort the batch.
    async fn deliver(&self, candidate: &User, matches: &[ScoredJob]) -> AlertOutcome {
        let subject = format!(
            "{} job{} matching your profile",
            matches.len(),
            if matches.len() == 1 { "" } else { "s" }
        );
        let html = render_digest(&candidate.name, matches);

        let result = self.mailer.send(&candidate.email, &subject, &html).await;
        let error = result.as_ref().err().map(|e| e.to_string());
        if let Some(err) = &error {
            error!(candidate_id = %candidate.id, error = %err, "alert email failed");
        } else {
            let _ = self
                .notifications
                .create(CreateNotification {
                    user_id: candidate.id,
                    kind: "job_alert".into(),
                    title: subject.clone(),
                    body: matches
                        .iter()
                        .map(|m| m.job.title.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    metadata: Some(serde_json::json!({
                        "job_ids": matches.iter().map(|m| m.job.id).collect::<Vec<_>>(),
                    })),
                })
                .await;
        }

        AlertOutcome {
            candidate_id: candidate.id,
            email: candidate.email.clone(),
            matches: matches.len(),
            sent: error.is_none(),
            error,
        }
    }
}

fn render_digest(name: &str, matches: &[ScoredJob]) -> String {
    let mut rows = String::new();
    for m in matches {
        rows.push_str(&format!(
            "<li><strong>{}</strong> - {}</li>",
            m.job.title, m.job.location
        ));
    }
    format!(
        "<html><body><p>Hi {},</p><p>These openings look like a good fit for you:</p><ul>{}</ul></body></html>",
        name, rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_lists_every_match() {
        let job = crate::models::job::Job {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: "Junior Developer".into(),
            description: None,
            requirements: vec![],
            location: "Campinas".into(),
            salary_from: None,
            salary_to: None,
            status: "open".into(),
            created_at: None,
            updated_at: None,
        };
        let html = render_digest(
            "Ana",
            &[ScoredJob {
                job,
                score: 42.0,
            }],
        );
        assert!(html.contains("Hi Ana"));
        assert!(html.contains("Junior Developer"));
        assert!(html.contains("Campinas"));
    }
}
