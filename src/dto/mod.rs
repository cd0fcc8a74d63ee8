pub mod admin_dto;
pub mod application_dto;
pub mod chat_dto;
pub mod job_dto;
pub mod review_dto;
pub mod user_dto;
