use crate::{APIResponse, BaseClient};
use event_notifier_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

/// Manual triggers of the reminder schedulers
#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn run_event_reminders(&self) -> APIResponse<run_event_reminders::APIResponse> {
        self.base
            .post(&(), "testEventReminders", StatusCode::OK)
            .await
    }

    pub async fn run_registration_deadlines(
        &self,
    ) -> APIResponse<run_registration_deadlines::APIResponse> {
        self.base
            .get("testRegistrationDeadlines", StatusCode::OK)
            .await
    }
}
