pub mod application;
pub mod gamification;
pub mod job;
pub mod message;
pub mod notification;
pub mod review;
pub mod user;
