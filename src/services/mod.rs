pub mod achievements;
pub mod alert_service;
pub mod application_service;
pub mod assistant_service;
pub mod gamification_service;
pub mod job_service;
pub mod mailer_service;
pub mod match_service;
pub mod message_service;
pub mod notification_service;
pub mod review_service;
pub mod user_service;
