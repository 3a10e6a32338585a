use super::{deliver_notification, SchedulerRunSummary};
use crate::{
    error::NotifierError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use event_notifier_api_structs::run_event_reminders::*;
use event_notifier_domain::{
    find_reminder_rule, Event, Notification, ScheduledNotificationRecord, EVENT_REMINDERS_LOOKAHEAD,
};
use event_notifier_infra::{NotifierContext, TimestampRange};
use tracing::{error, info, warn};

pub async fn run_event_reminders_controller(
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    execute(SendEventRemindersUseCase {}, &ctx)
        .await
        .map(|summary| {
            HttpResponse::Ok().json(APIResponse::new(
                "Event reminders processed",
                summary.events_checked,
                summary.notifications_sent,
            ))
        })
        .map_err(NotifierError::from)
}

/// Sends the time window alerts (one week, one day and three hours before)
/// for every event taking place within the next week
#[derive(Debug)]
pub struct SendEventRemindersUseCase {}

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
impl UseCase for SendEventRemindersUseCase {
    type Response = SchedulerRunSummary;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendEventReminders";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        let _run = ctx.locks.event_reminders.lock().await;
        let now = ctx.sys.get_timestamp_millis();

        let events = ctx
            .repos
            .events
            .find_by_date_range(TimestampRange::starting_at(now, EVENT_REMINDERS_LOOKAHEAD))
            .await
            .map_err(|e| {
                error!("Unable to query upcoming events. Error: {:?}", e);
                UseCaseError::StorageError
            })?;

        let mut summary = SchedulerRunSummary {
            events_checked: events.len(),
            notifications_sent: 0,
        };
        for event in &events {
            match send_reminder_for_event(event, now, ctx).await {
                Ok(true) => summary.notifications_sent += 1,
                Ok(false) => (),
                Err(e) => error!(
                    "Failed to process reminders for event: {}. Error: {:?}",
                    event.id, e
                ),
            }
        }

        info!(
            "Checked {} events, sent {} event reminders",
            summary.events_checked, summary.notifications_sent
        );
        Ok(summary)
    }
}

/// Returns whether a reminder was sent for the event
async fn send_reminder_for_event(
    event: &Event,
    now: i64,
    ctx: &NotifierContext,
) -> anyhow::Result<bool> {
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
    let preferences = user.preferences();
    if !preferences.event_reminders_enabled {
        return Ok(false);
    }

    let mut record = ctx
        .repos
        .scheduled_notifications
        .find(&user.id, &event.id)
        .await?
        .unwrap_or_else(|| ScheduledNotificationRecord::new(user.id.clone(), event.id.clone()));

    let rule = match find_reminder_rule(&event.status, event.event_date - now) {
        Some(rule) => rule,
        None => return Ok(false),
    };
    if record.has_sent(rule.kind) || !rule.preference.is_enabled(&preferences) {
        return Ok(false);
    }

    let notification = Notification::event_reminder(event, rule, now);
    deliver_notification(&notification, &user, ctx).await?;

    record.mark_sent(rule.kind, now);
    ctx.repos.scheduled_notifications.save(&record).await?;

    Ok(true)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{configure_server_api, shared::test_helpers::*};
    use actix_web::{http::StatusCode, test, App};
    use event_notifier_infra::InMemoryPushTransport;
    use event_notifier_domain::{
        EventStatus, NotificationPreferences, NotificationType, ReminderKind,
    };
    use std::sync::Arc;

    #[actix_web::test]
    async fn sends_day_before_reminder_for_going_event() {
        let TestContext { ctx, transport } = setup();
        let user = insert_user(&ctx, Some("device-1"), None).await;
        let event = insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(
            res,
            SchedulerRunSummary {
                events_checked: 1,
                notifications_sent: 1
            }
        );

        let notifications = ctx.repos.notifications.find_by_user(&user.id).await.unwrap();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_type, NotificationType::Event);
        assert_eq!(notifications[0].title, "Event Reminder");
        assert_eq!(notifications[0].message, "Jazz Night is tomorrow!");
        assert_eq!(notifications[0].action_url, Some(format!("/events/{}", event.id)));

        let record = ctx
            .repos
            .scheduled_notifications
            .find(&user.id, &event.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.scheduled_reminders, vec!["1day".to_string()]);
        assert_eq!(record.last_checked, NOW);

        let sent = transport.sent_messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].token, "device-1");
        assert_eq!(sent[0].payload.body, "Jazz Night is tomorrow!");
    }

    #[actix_web::test]
    async fn running_twice_sends_reminder_once() {
        let TestContext { ctx, transport } = setup();
        let user = insert_user(&ctx, Some("device-1"), None).await;
        insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Going).await;

        let first = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();
        let second = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(first.notifications_sent, 1);
        assert_eq!(second.events_checked, 1);
        assert_eq!(second.notifications_sent, 0);
        assert_eq!(transport.sent_messages().len(), 1);
        assert_eq!(ctx.repos.notifications.find_by_user(&user.id).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn ignores_not_going_events() {
        let TestContext { ctx, transport } = setup();
        let user = insert_user(&ctx, Some("device-1"), None).await;
        let event = insert_event(&ctx, &user, "Opera", 2.5, EventStatus::NotGoing).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.events_checked, 1);
        assert_eq!(res.notifications_sent, 0);
        assert!(transport.sent_messages().is_empty());
        assert!(ctx
            .repos
            .scheduled_notifications
            .find(&user.id, &event.id)
            .await
            .unwrap()
            .is_none());
    }

    #[actix_web::test]
    async fn sends_three_hour_and_week_reminders() {
        let TestContext { ctx, .. } = setup();
        let user = insert_user(&ctx, None, None).await;
        insert_event(&ctx, &user, "Concert", 2.5, EventStatus::Going).await;
        insert_event(&ctx, &user, "Marathon", 6.5 * 24.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 2);

        let mut messages = ctx
            .repos
            .notifications
            .find_by_user(&user.id)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.message)
            .collect::<Vec<_>>();
        messages.sort();
        assert_eq!(
            messages,
            vec![
                "Concert is in 3 hours!".to_string(),
                "Marathon is in one week!".to_string()
            ]
        );
    }

    #[actix_web::test]
    async fn counts_reminder_for_user_without_push_token() {
        let TestContext { ctx, transport } = setup();
        let user = insert_user(&ctx, Some("   "), None).await;
        insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Interested).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.notifications_sent, 1);
        assert!(transport.sent_messages().is_empty());
        assert_eq!(ctx.repos.notifications.find_by_user(&user.id).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn rejected_push_still_marks_reminder_as_sent() {
        let TestContext { ctx, transport } = setup();
        transport.reject_token("stale-device");
        let user = insert_user(&ctx, Some("stale-device"), None).await;
        let event = insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.notifications_sent, 1);
        let record = ctx
            .repos
            .scheduled_notifications
            .find(&user.id, &event.id)
            .await
            .unwrap()
            .unwrap();
        assert!(record.has_sent(ReminderKind::OneDay));
    }

    #[actix_web::test]
    async fn respects_disabled_preferences() {
        let TestContext { ctx, transport } = setup();
        let all_off = NotificationPreferences {
            event_reminders_enabled: false,
            ..Default::default()
        };
        let day_off = NotificationPreferences {
            reminder_day_before: false,
            ..Default::default()
        };
        let user_all_off = insert_user(&ctx, Some("device-1"), Some(all_off)).await;
        let user_day_off = insert_user(&ctx, Some("device-2"), Some(day_off)).await;
        insert_event(&ctx, &user_all_off, "Jazz Night", 23.0, EventStatus::Going).await;
        insert_event(&ctx, &user_day_off, "Jazz Night", 23.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.events_checked, 2);
        assert_eq!(res.notifications_sent, 0);
        assert!(transport.sent_messages().is_empty());
    }

    #[actix_web::test]
    async fn day_tag_is_shared_between_statuses() {
        let TestContext { ctx, .. } = setup();
        let user = insert_user(&ctx, None, None).await;
        let mut event = insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 1);

        event.status = EventStatus::Interested;
        ctx.repos.events.insert(&event).await.unwrap();

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 0);
    }

    #[actix_web::test]
    async fn skips_events_of_missing_users() {
        let TestContext { ctx, .. } = setup();
        let ghost = event_notifier_domain::User::new();
        let user = insert_user(&ctx, None, None).await;
        let orphan = Event::new(ghost.id.clone(), "Orphan", NOW + 23 * 3_600_000, EventStatus::Going);
        ctx.repos.events.insert(&orphan).await.unwrap();
        insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.events_checked, 2);
        assert_eq!(res.notifications_sent, 1);
    }

    #[actix_web::test]
    async fn aborts_when_events_cannot_be_queried() {
        let TestContext { mut ctx, .. } = setup();
        ctx.repos.events = Arc::new(FailingEventRepo {});

        let res = SendEventRemindersUseCase {}.execute(&ctx).await;

        assert!(matches!(res, Err(UseCaseError::StorageError)));
    }

    #[actix_web::test]
    async fn failing_event_does_not_stop_the_run() {
        let TestContext { mut ctx, transport } = setup();
        let user = insert_user(&ctx, Some("device-1"), None).await;
        let broken = insert_event(&ctx, &user, "Broken", 23.0, EventStatus::Going).await;
        let healthy = insert_event(&ctx, &user, "Jazz Night", 22.0, EventStatus::Going).await;
        let ledger = ctx.repos.scheduled_notifications.clone();
        ctx.repos.scheduled_notifications = Arc::new(FailingLedgerRepo {
            inner: ledger.clone(),
            failing_event_id: broken.id.clone(),
        });

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.events_checked, 2);
        assert_eq!(res.notifications_sent, 1);
        assert_eq!(transport.sent_messages().len(), 1);
        assert_eq!(
            transport.sent_messages()[0].payload.event_id,
            Some(healthy.id.to_string())
        );
        let record = ledger.find(&user.id, &healthy.id).await.unwrap().unwrap();
        assert!(record.has_sent(ReminderKind::OneDay));
    }

    #[actix_web::test]
    async fn refused_push_credentials_leave_reminder_unsent() {
        let TestContext { ctx, .. } = setup();
        let ctx = ctx.with_push_transport(Arc::new(UnauthenticatedPushTransport {}));
        let user = insert_user(&ctx, Some("device-1"), None).await;
        let event = insert_event(&ctx, &user, "Jazz Night", 23.0, EventStatus::Going).await;

        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();

        assert_eq!(res.events_checked, 1);
        assert_eq!(res.notifications_sent, 0);
        assert!(ctx
            .repos
            .scheduled_notifications
            .find(&user.id, &event.id)
            .await
            .unwrap()
            .is_none());

        // Sent once the credentials work again
        let ctx = ctx.with_push_transport(Arc::new(InMemoryPushTransport::new()));
        let res = SendEventRemindersUseCase {}.execute(&ctx).await.unwrap();
        assert_eq!(res.notifications_sent, 1);
    }

    #[actix_web::test]
    async fn trigger_reports_storage_failure_as_internal_error() {
        let TestContext { mut ctx, .. } = setup();
        ctx.repos.events = Arc::new(FailingEventRepo {});
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .configure(configure_server_api),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/testEventReminders")
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["success"], false);
    }
}
