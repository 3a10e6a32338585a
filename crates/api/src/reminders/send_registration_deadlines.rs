use super::{deliver_notification, SchedulerRunSummary};
use crate::{
    error::NotifierError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use event_notifier_api_structs::run_registration_deadlines::*;
use event_notifier_domain::{
    days_until_deadline, deadline_text, Event, Notification, ScheduledNotificationRecord,
    REGISTRATION_DEADLINE_LOOKAHEAD,
};
use event_notifier_infra::{NotifierContext, TimestampRange};
use tracing::{error, info, warn};

pub async fn run_registration_deadlines_controller(
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    execute(SendRegistrationDeadlinesUseCase {}, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse::new(
                "Registration deadlines processed",
                summary.events_checked,
                summary.notifications_sent,
            ))
        })
        .map_err(NotifierError::from)
}

/// Sends a one time notice for every event whose registration closes within
/// the next three days
#[derive(Debug)]
pub struct SendRegistrationDeadlinesUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NotifierError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendRegistrationDeadlinesUseCase {
    type Response = SchedulerRunSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendRegistrationDeadlines";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let _run = ctx.locks.registration_deadlines.lock().await;
        let now = ctx.sys.get_timestamp_millis();

        let events = ctx
            .repos
            .events
            .find_with_registration_deadline(TimestampRange::starting_at(
                now,
                REGISTRATION_DEADLINE_LOOKAHEAD,
            ))
            .await
            .map_err(|e| {
                error!("Unable to query upcoming registration deadlines. Error: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut summary = SchedulerRunSummary {
            events_checked: events.len(),
            notifications_sent: 0,
        };
        for event in &events {
            match send_deadline_notice_for_event(event, now, ctx).await {
                Ok(true) => summary.notifications_sent += 1,
                Ok(false) => (),
                Err(e) => error!(
                    "Failed to process registration deadline for event: {}. Error: {:?}",
                    event.id, e
                ),
            }
        }

        info!(
            "Checked {} events, sent {} registration deadline notices",
            summary.events_checked, summary.notifications_sent
        );
        Ok(summary)
    }
}

async fn send_deadline_notice_for_event(
    event: &Event,
    now: i64,
    ctx: &NotifierContext,
) -> anyhow::Result<bool> {
    let deadline = match event.registration_deadline {
        Some(deadline) if event.status.wants_registration_notices() => deadline,
        _ => return Ok(false),
    };

    let user = match ctx.repos.users.find(&event.user_id).await? {
        Some(user) => user,
        None => {
            warn!(
                "User: {} of event: {} was not found, skipping event",
                event.user_id, event.id
            );
            return Ok(false);
        }
    };
    if !user.preferences().registration_deadlines_enabled {
        return Ok(false);
    }

    let mut record = ctx
        .repos
        .scheduled_notifications
        .find(&user.id, &event.id)
        .await?
        .unwrap_or_else(|| ScheduledNotificationRecord::new(user.id.clone(), event.id.clone()));
    if record.registration_deadline_sent {
        return Ok(false);
    }

    let text = deadline_text(days_until_deadline(deadline - now));
    let notification = Notification::registration_deadline(event, &text, now);
    deliver_notification(&notification, &user, ctx).await?;

    record.mark_registration_deadline_sent(now);
    ctx.repos.scheduled_notifications.save(&record).await?;

    Ok(true)
}
