mod helpers;

use event_notifier_domain::{EventStatus, MILLIS_PER_DAY};
use event_notifier_sdk::{APIErrorVariant, CallableErrorResponse, NotificationInput, NotifierSDK};
use helpers::setup::{spawn_app, NOW};

fn notification_input(tokens: Vec<String>) -> NotificationInput {
    NotificationInput {
        title: Some("Heads up".into()),
        body: Some("Doors open at 7".into()),
        tokens: Some(tokens),
        ..Default::default()
    }
}

fn callable_error(variant: &APIErrorVariant, message: &str) -> (u16, String) {
    let status = match variant {
        APIErrorVariant::UnexpectedStatusCode(status) => status.as_u16(),
        other => panic!("Expected an error response, got: {:?}", other),
    };
    let body: CallableErrorResponse = serde_json::from_str(message).unwrap();
    (status, body.error.code)
}

#[actix_web::test]
async fn test_status_ok() {
    let (_, sdk, _) = spawn_app().await;
    assert!(sdk.status.check_health().await.is_ok());
}

#[actix_web::test]
async fn test_event_reminders_trigger_is_idempotent() {
    let (app, sdk, _) = spawn_app().await;
    let user = app.insert_user(Some("device-1")).await;
    app.insert_event(&user, 23, EventStatus::Going).await;
    app.insert_event(&user, 30 * 24, EventStatus::Going).await;

    let res = sdk
        .reminders
        .run_event_reminders()
        .await
        .expect("Expected to run event reminders");
    assert!(res.success);
    assert_eq!(res.events_checked, 1);
    assert_eq!(res.notifications_sent, 1);

    let res = sdk.reminders.run_event_reminders().await.unwrap();
    assert_eq!(res.notifications_sent, 0);

    let sent = app.transport.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].payload.body, "Jazz Night is tomorrow!");
}

#[actix_web::test]
async fn test_registration_deadlines_trigger() {
    let (app, sdk, _) = spawn_app().await;
    let user = app.insert_user(None).await;
    let mut event = app.insert_event(&user, 5 * 24, EventStatus::Interested).await;
    event.requires_registration = true;
    event.registration_deadline = Some(NOW + MILLIS_PER_DAY);
    app.ctx.repos.events.insert(&event).await.unwrap();

    let res = sdk
        .reminders
        .run_registration_deadlines()
        .await
        .expect("Expected to run registration deadlines");
    assert_eq!(res.events_checked, 1);
    assert_eq!(res.notifications_sent, 1);

    let notifications = app.ctx.repos.notifications.find_by_user(&user.id).await.unwrap();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].message.ends_with("closes tomorrow!"));
}

#[actix_web::test]
async fn test_callable_rejects_unauthenticated_caller() {
    let (app, sdk, _) = spawn_app().await;

    let err = sdk
        .notification
        .send_to_token(notification_input(vec!["device-1".into()]))
        .await
        .unwrap_err();

    let (status, code) = callable_error(&err.variant, &err.message);
    assert_eq!(status, 401);
    assert_eq!(code, "unauthenticated");
    assert!(app.transport.sent_messages().is_empty());
}

#[actix_web::test]
async fn test_callable_rejects_missing_title() {
    let (app, _, address) = spawn_app().await;
    let sdk = NotifierSDK::new(address, app.id_token("user-1"));

    let input = NotificationInput {
        title: None,
        ..notification_input(vec!["device-1".into()])
    };
    let err = sdk.notification.send_to_token(input).await.unwrap_err();

    let (status, code) = callable_error(&err.variant, &err.message);
    assert_eq!(status, 400);
    assert_eq!(code, "invalid-argument");
    assert!(app.transport.sent_messages().is_empty());
}

#[actix_web::test]
async fn test_callable_sends_to_single_token() {
    let (app, _, address) = spawn_app().await;
    let sdk = NotifierSDK::new(address, app.id_token("user-1"));

    let input = NotificationInput {
        token: Some("device-1".into()),
        tokens: None,
        ..notification_input(vec![])
    };
    let res = sdk
        .notification
        .send_to_token(input)
        .await
        .expect("Expected to send notification");

    assert!(res.result.success);
    assert_eq!(res.result.success_count, 1);
    assert_eq!(app.transport.sent_messages()[0].token, "device-1");
}

#[actix_web::test]
async fn test_callable_batch_reports_partial_failure() {
    let (app, _, address) = spawn_app().await;
    let sdk = NotifierSDK::new(address, app.id_token("user-1"));
    app.transport.reject_token("device-700");

    let tokens = (0..1200).map(|i| format!("device-{}", i)).collect();
    let res = sdk
        .notification
        .send_to_token(notification_input(tokens))
        .await
        .expect("Expected the batch to be best effort");

    assert!(res.result.success);
    assert_eq!(res.result.success_count, 1199);
    assert_eq!(res.result.failure_count, 1);
    assert_eq!(app.transport.batch_sizes(), vec![500, 500, 200]);
}

#[actix_web::test]
async fn test_test_endpoint_echoes_payload_without_auth() {
    let (app, sdk, _) = spawn_app().await;

    let res = sdk
        .notification
        .test_send_to_token(notification_input(vec!["device-1".into()]))
        .await
        .expect("Expected to send test notification");

    assert!(res.success);
    assert_eq!(res.payload.title, Some("Heads up".to_string()));
    assert_eq!(app.transport.sent_messages().len(), 1);
}
