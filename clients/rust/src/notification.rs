use crate::{APIResponse, BaseClient};
use event_notifier_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Requires the sdk to be created with an id token
    pub async fn send_to_token(
        &self,
        input: NotificationInput,
    ) -> APIResponse<send_notification_to_token::APIResponse> {
        let body = send_notification_to_token::RequestBody { data: input };
        self.base
            .post(&body, "sendNotificationToToken", StatusCode::OK)
            .await
    }

    pub async fn test_send_to_token(
        &self,
        input: NotificationInput,
    ) -> APIResponse<test_send_notification_to_token::APIResponse> {
        self.base
            .post(&input, "testSendNotificationToToken", StatusCode::OK)
            .await
    }
}
