use aprendiz_backend::services::achievements::{
    find_achievement, level_for_points, newly_satisfied, points_for_action, ActivitySnapshot,
    ACHIEVEMENTS, LEVELS,
};

#[test]
fn email_verification_grants_fifty_points_without_leveling() {
    let points = points_for_action("EMAIL_VERIFIED");
    assert_eq!(points, 50);
    // Starting from zero: 50 points stays on the first level.
    assert_eq!(level_for_points(points), 1);
}

#[test]
fn apply_job_grant_never_lowers_the_level() {
    let apply = points_for_action("APPLY_JOB");
    assert!(apply > 0);
    for total in [0, 50, 99, 100, 999, 10_000] {
        assert!(level_for_points(total + apply) >= level_for_points(total));
    }
}

#[test]
fn level_table_is_strictly_ascending() {
    for pair in LEVELS.windows(2) {
        assert!(pair[0].0 < pair[1].0);
        assert!(pair[0].1 < pair[1].1);
    }
    // The bottom level must catch a zero-point account.
    assert_eq!(LEVELS[0].1, 0);
}

#[test]
fn job_seeker_awards_one_hundred_points_at_ten_applications() {
    let snap = ActivitySnapshot {
        applications: 10,
        ..Default::default()
    };
    let newly = newly_satisfied(&[], &snap);
    let job_seeker = newly
        .iter()
        .find(|d| d.id == "job_seeker")
        .expect("job_seeker must unlock at 10 applications");
    assert_eq!(job_seeker.points, 100);
}

#[test]
fn repeated_checks_with_no_new_activity_award_nothing() {
    let snap = ActivitySnapshot {
        applications: 12,
        messages_sent: 3,
        ..Default::default()
    };

    let first: Vec<String> = newly_satisfied(&[], &snap)
        .iter()
        .map(|d| d.id.to_string())
        .collect();
    assert!(!first.is_empty());

    // Second pass with the awarded set recorded: nothing new.
    let second = newly_satisfied(&first, &snap);
    assert!(second.is_empty());
}

#[test]
fn achievement_ids_are_unique() {
    for (i, a) in ACHIEVEMENTS.iter().enumerate() {
        for b in &ACHIEVEMENTS[i + 1..] {
            assert_ne!(a.id, b.id);
        }
        assert!(find_achievement(a.id).is_some());
    }
}
