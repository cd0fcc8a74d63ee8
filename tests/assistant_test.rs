use aprendiz_backend::services::assistant_service::{detect_intent, Intent};

#[test]
fn common_admin_questions_hit_the_right_intent() {
    let cases = [
        ("hello", Intent::Greeting),
        ("hey, anyone there?", Intent::Greeting),
        ("help", Intent::Help),
        ("How many candidates signed up?", Intent::CandidateCount),
        ("how many companies do we have", Intent::CompanyCount),
        ("how many jobs are there", Intent::JobCount),
        ("show me open jobs", Intent::JobCount),
        ("how many applications came in", Intent::ApplicationCount),
        ("list banned accounts", Intent::PendingModeration),
    ];
    for (message, expected) in cases {
        assert_eq!(detect_intent(message), expected, "message: {:?}", message);
    }
}

#[test]
fn unmatched_input_falls_through_to_unknown() {
    assert_eq!(detect_intent(""), Intent::Unknown);
    assert_eq!(detect_intent("delete the database"), Intent::Unknown);
    assert_eq!(detect_intent("42"), Intent::Unknown);
}

#[test]
fn detection_is_deterministic() {
    let msg = "how many candidates";
    assert_eq!(detect_intent(msg), detect_intent(msg));
}
