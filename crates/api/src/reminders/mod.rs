mod send_event_reminders;
mod send_registration_deadlines;

use actix_web::web;
use event_notifier_domain::{Notification, User};
use event_notifier_infra::{NotifierContext, PushPayload};
use send_event_reminders::run_event_reminders_controller;
use send_registration_deadlines::run_registration_deadlines_controller;
use tracing::warn;

pub use send_event_reminders::SendEventRemindersUseCase;
pub use send_registration_deadlines::SendRegistrationDeadlinesUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/testEventReminders")
            .route(web::get().to(run_event_reminders_controller))
            .route(web::post().to(run_event_reminders_controller)),
    );
    cfg.service(
        web::resource("/testRegistrationDeadlines")
            .route(web::get().to(run_registration_deadlines_controller))
            .route(web::post().to(run_registration_deadlines_controller)),
    );
}

/// What a single scheduler run did
#[derive(Debug, Default, PartialEq)]
pub struct SchedulerRunSummary {
    pub events_checked: usize,
    pub notifications_sent: usize,
}

/// Stores the in app notification and pushes it to the device of the user,
/// if the user has one. A push rejected because of the token does not fail
/// the delivery. Any other push failure does, so the ledger is left untouched
/// and the next run sends it again.
async fn deliver_notification(
    notification: &Notification,
    user: &User,
    ctx: &NotifierContext,
) -> anyhow::Result<()> {
    ctx.repos.notifications.insert(notification).await?;

    if let Some(token) = user.push_token() {
        match ctx
            .push
            .send_push_notification(token, &PushPayload::from(notification))
            .await
        {
            Ok(_) => {}
            Err(e) if e.is_token_failure() => {
                warn!(
                    "Unable to push notification: {} to user: {}. Error: {}",
                    notification.id, user.id, e
                );
            }
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!(
                    "Unable to push notification: {} to user: {}",
                    notification.id, user.id
                )))
            }
        }
    }

    Ok(())
}
