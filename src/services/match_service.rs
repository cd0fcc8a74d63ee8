//! Candidate/job compatibility scoring.
//!
//! The score is a weighted sum of independent signals and is only meaningful
//! for relative ordering; it is not clamped to 0-100. Both the interactive
//! recommendations endpoint and the alert dispatcher rank through the same
//! [`rank`] function with an explicit minimum-score cutoff, so the two paths
//! cannot drift apart on zero-score filtering.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{job::Job, user::User};
use crate::utils::text::{keywords, loose_match, normalize};

/// Weight of the skill-overlap signal.
const SKILL_WEIGHT: f64 = 30.0;
/// Weight of the interest-in-job-text signal.
const INTEREST_WEIGHT: f64 = 30.0;
/// Points per bio keyword found in the job text, and the cap on their sum.
const BIO_KEYWORD_POINTS: f64 = 4.0;
const BIO_KEYWORD_CAP: f64 = 20.0;
/// Recency bonuses for postings younger than 7 / 14 days.
const RECENCY_FRESH: f64 = 10.0;
const RECENCY_RECENT: f64 = 5.0;
/// Bonus for a candidate-city / job-location match.
const LOCATION_BONUS: f64 = 10.0;

/// Minimum score for a job to appear in interactive recommendations.
pub const MIN_RECOMMENDATION_SCORE: f64 = 1.0;
/// Minimum score for a job to trigger an email alert.
pub const MIN_ALERT_SCORE: f64 = 40.0;

#[derive(Debug, Clone, Serialize)]
pub struct ScoredJob {
    pub job: Job,
    pub score: f64,
}

/// Compatibility score between a candidate profile and a job posting.
///
/// Empty or missing profile fields contribute zero; the function cannot fail.
/// `now` is passed in so the recency bonus is deterministic under test.
pub fn score(user: &User, job: &Job, now: DateTime<Utc>) -> f64 {
    let job_text = job.full_text();
    let mut total = 0.0;

    // Skill overlap, proportional to how much of the candidate's skill set
    // the posting covers.
    if !user.skills.is_empty() && !job.requirements.is_empty() {
        let required: Vec<String> = job.requirements.iter().map(|r| normalize(r)).collect();
        let matched = user
            .skills
            .iter()
            .filter(|s| required.contains(&normalize(s)))
            .count();
        total += (matched as f64 / user.skills.len() as f64) * SKILL_WEIGHT;
    }

    // Interests found in the posting text.
    if !user.interests.is_empty() {
        let matched = user
            .interests
            .iter()
            .filter(|i| {
                let i = normalize(i);
                !i.is_empty() && job_text.contains(&i)
            })
            .count();
        total += (matched as f64 / user.interests.len() as f64) * INTEREST_WEIGHT;
    }

    // Bio keywords found in the posting text, capped.
    if let Some(bio) = &user.bio {
        let hits = keywords(bio, 3)
            .iter()
            .filter(|kw| job_text.contains(kw.as_str()))
            .count();
        total += (hits as f64 * BIO_KEYWORD_POINTS).min(BIO_KEYWORD_CAP);
    }

    // Fresh postings float up.
    if let Some(created_at) = job.created_at {
        let age_days = (now - created_at).num_days();
        if age_days < 7 {
            total += RECENCY_FRESH;
        } else if age_days < 14 {
            total += RECENCY_RECENT;
        }
    }

    if let Some(city) = &user.city {
        if loose_match(city, &job.location) {
            total += LOCATION_BONUS;
        }
    }

    total
}

/// Scores every job for the candidate. No filtering happens here.
pub fn score_all(user: &User, jobs: Vec<Job>, now: DateTime<Utc>) -> Vec<ScoredJob> {
    jobs.into_iter()
        .map(|job| {
            let score = score(user, &job, now);
            ScoredJob { job, score }
        })
        .collect()
}

/// Shared ranking for recommendations and alerts: stable sort descending by
/// score (ties keep input order), drop everything below `min_score`, truncate
/// to `limit`.
pub fn rank(mut scored: Vec<ScoredJob>, limit: usize, min_score: f64) -> Vec<ScoredJob> {
    scored.retain(|s| s.score >= min_score);
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn candidate(skills: &[&str], interests: &[&str], bio: Option<&str>, city: Option<&str>) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            role: "candidate".into(),
            status: "active".into(),
            city: city.map(Into::into),
            bio: bio.map(Into::into),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            interests: interests.iter().map(|s| s.to_string()).collect(),
            company_name: None,
            email_alerts: true,
            email_verified: false,
            profile_views: 0,
            points: 0,
            level: 1,
            achievements: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn job(requirements: &[&str], title: &str, location: &str, age_days: i64) -> Job {
        Job {
            id: Uuid::new_v4(),
            company_id: Uuid::new_v4(),
            title: title.into(),
            description: None,
            requirements: requirements.iter().map(|s| s.to_string()).collect(),
            location: location.into(),
            salary_from: None,
            salary_to: None,
            status: "open".into(),
            created_at: Some(Utc::now() - Duration::days(age_days)),
            updated_at: None,
        }
    }

    #[test]
    fn disjoint_profiles_score_zero() {
        let user = candidate(&["cooking"], &["gastronomy"], Some("chef at heart"), Some("Recife"));
        // 30 days old so no recency bonus applies.
        let j = job(&["Rust", "SQL"], "Backend Engineer", "Curitiba", 30);
        assert_eq!(score(&user, &j, Utc::now()), 0.0);
    }

    #[test]
    fn adding_a_required_skill_never_decreases_the_score() {
        let j = job(&["JavaScript", "Node.js"], "Web Developer", "Curitiba", 30);
        let before = candidate(&["cooking"], &[], None, None);
        let mut after = before.clone();
        after.skills.push("Node.js".into());

        let now = Utc::now();
        assert!(score(&after, &j, now) >= score(&before, &j, now));
    }

    #[test]
    fn full_skill_ratio_recency_and_location_sum_to_fifty() {
        // skills=['javascript'] against requirements=['JavaScript','Node.js'],
        // posted 2 days ago, same city -> 30 + 10 + 10.
        let user = candidate(&["javascript"], &[], None, Some("Curitiba"));
        let j = job(&["JavaScript", "Node.js"], "Dev", "Curitiba", 2);
        let s = score(&user, &j, Utc::now());
        assert!((s - 50.0).abs() < f64::EPSILON, "score was {}", s);
    }

    #[test]
    fn bio_keyword_signal_is_capped() {
        let user = candidate(
            &[],
            &[],
            Some("backend engineer focused rust tokio axum postgres docker linux"),
            None,
        );
        let j = job(
            &[],
            "backend engineer rust tokio axum postgres docker linux focused",
            "Remote",
            30,
        );
        let s = score(&user, &j, Utc::now());
        assert!((s - BIO_KEYWORD_CAP).abs() < f64::EPSILON, "score was {}", s);
    }

    #[test]
    fn recency_bonus_tiers() {
        let user = candidate(&[], &[], None, None);
        let now = Utc::now();
        assert_eq!(score(&user, &job(&[], "t", "x", 2), now), 10.0);
        assert_eq!(score(&user, &job(&[], "t", "x", 10), now), 5.0);
        assert_eq!(score(&user, &job(&[], "t", "x", 20), now), 0.0);
    }

    #[test]
    fn rank_bounds_length_and_orders_non_increasing() {
        let user = candidate(&["rust"], &[], None, None);
        let now = Utc::now();
        let jobs = vec![
            job(&["cooking"], "a", "x", 30),
            job(&["rust"], "b", "x", 30),
            job(&["rust"], "c", "x", 2),
            job(&["rust", "go"], "d", "x", 30),
        ];
        let ranked = rank(score_all(&user, jobs, now), 3, MIN_RECOMMENDATION_SCORE);
        assert!(ranked.len() <= 3);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        // zero-score posting was filtered out
        assert!(ranked.iter().all(|s| s.score >= MIN_RECOMMENDATION_SCORE));
    }

    #[test]
    fn rank_keeps_input_order_on_ties() {
        let user = candidate(&["rust"], &[], None, None);
        let now = Utc::now();
        let a = job(&["rust"], "first", "x", 30);
        let b = job(&["rust"], "second", "x", 30);
        let ranked = rank(score_all(&user, vec![a, b], now), 10, 0.0);
        assert_eq!(ranked[0].job.title, "first");
        assert_eq!(ranked[1].job.title, "second");
    }
}
