pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    alert_service::AlertService, application_service::ApplicationService,
    assistant_service::AssistantService, gamification_service::GamificationService,
    job_service::JobService, mailer_service::MailerService, message_service::MessageService,
    notification_service::NotificationService, review_service::ReviewService,
    user_service::UserService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub user_service: UserService,
    pub job_service: JobService,
    pub application_service: ApplicationService,
    pub message_service: MessageService,
    pub review_service: ReviewService,
    pub notification_service: NotificationService,
    pub gamification_service: GamificationService,
    pub alert_service: AlertService,
    pub assistant_service: AssistantService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let mailer = MailerService::new(config.mailer_webhook_url.clone());
        let user_service = UserService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let message_service = MessageService::new(pool.clone());
        let review_service = ReviewService::new(pool.clone());
        let notification_service = NotificationService::new(pool.clone());
        let gamification_service = GamificationService::new(pool.clone());
        let alert_service = AlertService::new(pool.clone(), mailer);
        let assistant_service = AssistantService::new(pool.clone());

        Self {
            pool,
            user_service,
            job_service,
            application_service,
            message_service,
            review_service,
            notification_service,
            gamification_service,
            alert_service,
            assistant_service,
        }
    }
}
