use aprendiz_backend::models::{job::Job, user::User};
use aprendiz_backend::services::match_service::{
    rank, score, score_all, MIN_ALERT_SCORE, MIN_RECOMMENDATION_SCORE,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

fn candidate(skills: &[&str], city: Option<&str>) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Bruno".into(),
        email: "bruno@example.com".into(),
        role: "candidate".into(),
        status: "active".into(),
        city: city.map(Into::into),
        bio: None,
        skills: skills.iter().map(|s| s.to_string()).collect(),
        interests: vec![],
        company_name: None,
        email_alerts: true,
        email_verified: true,
        profile_views: 0,
        points: 0,
        level: 1,
        achievements: vec![],
        created_at: None,
        updated_at: None,
    }
}

fn job(requirements: &[&str], location: &str, age_days: i64) -> Job {
    Job {
        id: Uuid::new_v4(),
        company_id: Uuid::new_v4(),
        title: "Posting".into(),
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
fn score_is_zero_without_any_overlap() {
    let user = candidate(&["gardening", "carpentry"], Some("Natal"));
    let j = job(&["kubernetes", "terraform"], "Manaus", 60);
    assert_eq!(score(&user, &j, Utc::now()), 0.0);
}

#[test]
fn skill_matching_ignores_case_and_whitespace() {
    let user = candidate(&["  JavaScript "], Some("Curitiba"));
    let j = job(&["javascript"], "Salvador", 60);
    // Only the skill signal should fire: full ratio of a one-skill profile.
    assert_eq!(score(&user, &j, Utc::now()), 30.0);
}

#[test]
fn partial_skill_coverage_scales_the_signal() {
    let user = candidate(&["rust", "go", "python", "java"], None);
    let j = job(&["rust", "go"], "Remote", 60);
    // 2 of 4 skills covered -> half of the 30-point weight.
    assert_eq!(score(&user, &j, Utc::now()), 15.0);
}

#[test]
fn alert_threshold_is_stricter_than_recommendations() {
    assert!(MIN_ALERT_SCORE > MIN_RECOMMENDATION_SCORE);
}

#[test]
fn rank_respects_limit_and_threshold_for_both_callers() {
    let user = candidate(&["rust"], Some("Curitiba"));
    let now = Utc::now();
    let jobs = vec![
        job(&["rust"], "Curitiba", 1),   // 30 + 10 + 10 = 50
        job(&["rust"], "Manaus", 60),    // 30
        job(&["cobol"], "Manaus", 60),   // 0
        job(&["rust"], "Curitiba", 60),  // 40
    ];

    let recommended = rank(
        score_all(&user, jobs.clone(), now),
        10,
        MIN_RECOMMENDATION_SCORE,
    );
    assert_eq!(recommended.len(), 3, "zero-score posting must be dropped");

    let alerted = rank(score_all(&user, jobs, now), 10, MIN_ALERT_SCORE);
    assert_eq!(alerted.len(), 2, "alerts only fire above the alert threshold");
    assert_eq!(alerted[0].score, 50.0);
    assert_eq!(alerted[1].score, 40.0);
}

#[test]
fn adding_any_required_skill_is_monotone() {
    let j = job(&["react", "typescript", "css"], "Recife", 60);
    let now = Utc::now();

    let mut user = candidate(&["php"], None);
    let mut previous = score(&user, &j, now);
    for skill in ["react", "typescript", "css"] {
        user.skills.push(skill.to_string());
        let current = score(&user, &j, now);
        assert!(
            current >= previous,
            "adding {} dropped the score from {} to {}",
            skill,
            previous,
            current
        );
        previous = current;
    }
}
