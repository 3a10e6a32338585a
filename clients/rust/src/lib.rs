mod base;
mod notification;
mod reminders;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIErrorVariant, APIResponse};
pub use event_notifier_api_structs::send_notification_to_token::ErrorResponse as CallableErrorResponse;
pub use event_notifier_api_structs::{NotificationInput, SchedulerRunResponse, SendNotificationResult};
use notification::NotificationClient;
use reminders::ReminderClient;
use status::StatusClient;
use std::sync::Arc;

/// Event Notifier Server SDK
///
/// The SDK contains methods for interacting with the Event Notifier server
/// API.
#[derive(Clone)]
pub struct NotifierSDK {
    pub notification: NotificationClient,
    pub reminders: ReminderClient,
    pub status: StatusClient,
}

impl NotifierSDK {
    /// An empty `id_token` creates an unauthenticated sdk
    pub fn new<T: Into<String>>(address: String, id_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_id_token(id_token.into());
        let base = Arc::new(base);
        let notification = NotificationClient::new(base.clone());
        let reminders = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self {
            notification,
            reminders,
            status,
        }
    }
}
