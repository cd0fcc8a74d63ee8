pub mod admin_routes;
pub mod application_routes;
pub mod chat_routes;
pub mod health;
pub mod job_routes;
pub mod review_routes;
pub mod user_routes;
