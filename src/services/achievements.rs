//! Static gamification tables: point values per action, level thresholds,
//! and the achievement catalog with its unlock predicates.
//!
//! Everything here is pure; the database-facing side lives in
//! `gamification_service`.

/// Point value granted for a platform action. Unknown actions grant nothing.
pub fn points_for_action(action: &str) -> i32 {
    match action {
        "REGISTER" => 10,
        "EMAIL_VERIFIED" => 50,
        "PROFILE_COMPLETED" => 30,
        "APPLY_JOB" => 10,
        "APPLICATION_ACCEPTED" => 25,
        "HIRED" => 100,
        "JOB_POSTED" => 15,
        "MESSAGE_SENT" => 2,
        "REVIEW_WRITTEN" => 10,
        _ => 0,
    }
}

/// Level thresholds, ascending. The user's level is the highest entry whose
/// `min_points` does not exceed their total.
pub const LEVELS: &[(i32, i32)] = &[
    (1, 0),
    (2, 100),
    (3, 300),
    (4, 600),
    (5, 1_000),
    (6, 1_500),
    (7, 2_500),
    (8, 4_000),
    (9, 6_000),
    (10, 10_000),
];

pub fn level_for_points(points: i32) -> i32 {
    let mut level = 1;
    for &(lvl, min_points) in LEVELS {
        if points >= min_points {
            level = lvl;
        }
    }
    level
}

/// Counts the achievement predicates are evaluated against. All fields are
/// monotonically non-decreasing over a user's lifetime, which is what makes
/// re-checking idempotent.
#[derive(Debug, Clone, Default)]
pub struct ActivitySnapshot {
    pub applications: i64,
    pub accepted_applications: i64,
    pub hired_applications: i64,
    pub messages_sent: i64,
    pub reviews_written: i64,
    pub profile_views: i64,
    pub jobs_posted: i64,
    pub total_points: i64,
    pub account_age_days: i64,
    pub profile_complete: bool,
}

#[derive(Debug, Clone)]
pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub points: i32,
}

pub const ACHIEVEMENTS: &[AchievementDef] = &[
    AchievementDef { id: "first_application", name: "First Step", description: "Applied to a job for the first time", points: 20 },
    AchievementDef { id: "active_seeker", name: "Active Seeker", description: "Applied to 5 jobs", points: 50 },
    AchievementDef { id: "job_seeker", name: "Job Seeker", description: "Applied to 10 jobs", points: 100 },
    AchievementDef { id: "persistent", name: "Persistent", description: "Applied to 25 jobs", points: 150 },
    AchievementDef { id: "relentless", name: "Relentless", description: "Applied to 50 jobs", points: 250 },
    AchievementDef { id: "first_response", name: "First Response", description: "Had an application accepted", points: 50 },
    AchievementDef { id: "shortlist_regular", name: "Shortlist Regular", description: "Had 5 applications accepted", points: 100 },
    AchievementDef { id: "first_hire", name: "Hired!", description: "Got hired through the platform", points: 200 },
    AchievementDef { id: "serial_winner", name: "Serial Winner", description: "Got hired 3 times", points: 300 },
    AchievementDef { id: "first_message", name: "Breaking the Ice", description: "Sent a first chat message", points: 10 },
    AchievementDef { id: "communicator", name: "Communicator", description: "Sent 10 chat messages", points: 50 },
    AchievementDef { id: "chatterbox", name: "Chatterbox", description: "Sent 50 chat messages", points: 100 },
    AchievementDef { id: "first_review", name: "First Review", description: "Reviewed a company", points: 20 },
    AchievementDef { id: "critic", name: "Critic", description: "Wrote 5 company reviews", points: 60 },
    AchievementDef { id: "review_pro", name: "Review Pro", description: "Wrote 15 company reviews", points: 120 },
    AchievementDef { id: "noticed", name: "Getting Noticed", description: "Profile viewed 10 times", points: 30 },
    AchievementDef { id: "popular", name: "Popular", description: "Profile viewed 50 times", points: 80 },
    AchievementDef { id: "celebrity", name: "Celebrity", description: "Profile viewed 100 times", points: 150 },
    AchievementDef { id: "complete_profile", name: "All Set", description: "Filled in the whole profile", points: 50 },
    AchievementDef { id: "first_posting", name: "Open for Talent", description: "Published a first job posting", points: 30 },
    AchievementDef { id: "recruiter", name: "Recruiter", description: "Published 5 job postings", points: 80 },
    AchievementDef { id: "hiring_machine", name: "Hiring Machine", description: "Published 20 job postings", points: 150 },
    AchievementDef { id: "point_collector", name: "Point Collector", description: "Accumulated 1000 points", points: 100 },
    AchievementDef { id: "point_hoarder", name: "Point Hoarder", description: "Accumulated 5000 points", points: 250 },
    AchievementDef { id: "veteran", name: "Veteran", description: "One year on the platform", points: 200 },
];

pub fn find_achievement(id: &str) -> Option<&'static AchievementDef> {
    ACHIEVEMENTS.iter().find(|a| a.id == id)
}

/// Whether the snapshot satisfies the unlock condition of `id`.
pub fn satisfied(id: &str, snap: &ActivitySnapshot) -> bool {
    match id {
        "first_application" => snap.applications >= 1,
        "active_seeker" => snap.applications >= 5,
        "job_seeker" => snap.applications >= 10,
        "persistent" => snap.applications >= 25,
        "relentless" => snap.applications >= 50,
        "first_response" => snap.accepted_applications >= 1,
        "shortlist_regular" => snap.accepted_applications >= 5,
        "first_hire" => snap.hired_applications >= 1,
        "serial_winner" => snap.hired_applications >= 3,
        "first_message" => snap.messages_sent >= 1,
        "communicator" => snap.messages_sent >= 10,
        "chatterbox" => snap.messages_sent >= 50,
        "first_review" => snap.reviews_written >= 1,
        "critic" => snap.reviews_written >= 5,
        "review_pro" => snap.reviews_written >= 15,
        "noticed" => snap.profile_views >= 10,
        "popular" => snap.profile_views >= 50,
        "celebrity" => snap.profile_views >= 100,
        "complete_profile" => snap.profile_complete,
        "first_posting" => snap.jobs_posted >= 1,
        "recruiter" => snap.jobs_posted >= 5,
        "hiring_machine" => snap.jobs_posted >= 20,
        "point_collector" => snap.total_points >= 1_000,
        "point_hoarder" => snap.total_points >= 5_000,
        "veteran" => snap.account_age_days >= 365,
        _ => false,
    }
}

/// Achievement ids satisfied by `snap` but absent from `already_awarded`.
pub fn newly_satisfied(
    already_awarded: &[String],
    snap: &ActivitySnapshot,
) -> Vec<&'static AchievementDef> {
    ACHIEVEMENTS
        .iter()
        .filter(|def| !already_awarded.iter().any(|a| a == def.id))
        .filter(|def| satisfied(def.id, snap))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_achievement_has_a_predicate() {
        let maxed = ActivitySnapshot {
            applications: 1_000,
            accepted_applications: 1_000,
            hired_applications: 1_000,
            messages_sent: 1_000,
            reviews_written: 1_000,
            profile_views: 1_000,
            jobs_posted: 1_000,
            total_points: 100_000,
            account_age_days: 10_000,
            profile_complete: true,
        };
        for def in ACHIEVEMENTS {
            assert!(satisfied(def.id, &maxed), "no predicate for {}", def.id);
        }
    }

    #[test]
    fn fresh_account_unlocks_nothing() {
        let snap = ActivitySnapshot::default();
        assert!(newly_satisfied(&[], &snap).is_empty());
    }

    #[test]
    fn job_seeker_unlocks_at_ten_applications() {
        let snap = ActivitySnapshot {
            applications: 10,
            ..Default::default()
        };
        let newly = newly_satisfied(&[], &snap);
        let ids: Vec<&str> = newly.iter().map(|d| d.id).collect();
        assert!(ids.contains(&"job_seeker"));
        assert_eq!(find_achievement("job_seeker").unwrap().points, 100);
    }

    #[test]
    fn newly_satisfied_skips_already_awarded() {
        let snap = ActivitySnapshot {
            applications: 10,
            ..Default::default()
        };
        let awarded: Vec<String> = vec![
            "first_application".into(),
            "active_seeker".into(),
            "job_seeker".into(),
        ];
        assert!(newly_satisfied(&awarded, &snap).is_empty());
    }

    #[test]
    fn level_scan_picks_highest_reached_threshold() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(99), 1);
        assert_eq!(level_for_points(100), 2);
        assert_eq!(level_for_points(9_999), 9);
        assert_eq!(level_for_points(1_000_000), 10);
    }

    #[test]
    fn unknown_action_grants_nothing() {
        assert_eq!(points_for_action("NOT_AN_ACTION"), 0);
        assert_eq!(points_for_action("EMAIL_VERIFIED"), 50);
    }
}
