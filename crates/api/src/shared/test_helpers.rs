use event_notifier_domain::{
    Event, EventStatus, NotificationPreferences, ScheduledNotificationRecord, User, ID,
    MILLIS_PER_HOUR,
};
use event_notifier_infra::{
    IEventRepo, IPushTransport, IScheduledNotificationRepo, ISys, InMemoryPushTransport,
    NotifierContext, PushError, PushMessage, TimestampRange,
};
use std::sync::Arc;

pub const NOW: i64 = 1_700_000_000_000;

pub struct StaticTimeSys(pub i64);

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

pub struct TestContext {
    pub ctx: NotifierContext,
    pub transport: Arc<InMemoryPushTransport>,
}

/// Inmemory context frozen at `NOW` which records every push message
pub fn setup() -> TestContext {
    let transport = Arc::new(InMemoryPushTransport::new());
    let mut ctx = NotifierContext::create_inmemory().with_push_transport(transport.clone());
    ctx.sys = Arc::new(StaticTimeSys(NOW));
    TestContext { ctx, transport }
}

pub async fn insert_user(
    ctx: &NotifierContext,
    fcm_token: Option<&str>,
    preferences: Option<NotificationPreferences>,
) -> User {
    let mut user = User::new();
    user.fcm_token = fcm_token.map(String::from);
    user.notification_preferences = preferences;
    ctx.repos.users.insert(&user).await.unwrap();
    user
}

pub async fn insert_event(
    ctx: &NotifierContext,
    user: &User,
    name: &str,
    hours_from_now: f64,
    status: EventStatus,
) -> Event {
    let event_date = NOW + (hours_from_now * MILLIS_PER_HOUR as f64) as i64;
    let event = Event::new(user.id.clone(), name, event_date, status);
    ctx.repos.events.insert(&event).await.unwrap();
    event
}

/// Event store which is unreachable
pub struct FailingEventRepo {}

#[async_trait::async_trait]
impl IEventRepo for FailingEventRepo {
    async fn insert(&self, _e: &Event) -> anyhow::Result<()> {
        Err(anyhow::anyhow!("Event store is unreachable"))
    }

    async fn find_by_date_range(&self, _range: TimestampRange) -> anyhow::Result<Vec<Event>> {
        Err(anyhow::anyhow!("Event store is unreachable"))
    }

    async fn find_with_registration_deadline(
        &self,
        _range: TimestampRange,
    ) -> anyhow::Result<Vec<Event>> {
        Err(anyhow::anyhow!("Event store is unreachable"))
    }
}

/// Ledger which fails for every record of one event and delegates the rest
pub struct FailingLedgerRepo {
    pub inner: Arc<dyn IScheduledNotificationRepo>,
    pub failing_event_id: ID,
}

#[async_trait::async_trait]
impl IScheduledNotificationRepo for FailingLedgerRepo {
    async fn find(
        &self,
        user_id: &ID,
        event_id: &ID,
    ) -> anyhow::Result<Option<ScheduledNotificationRecord>> {
        if *event_id == self.failing_event_id {
            return Err(anyhow::anyhow!("Ledger read timed out"));
        }
        self.inner.find(user_id, event_id).await
    }

    async fn save(&self, record: &ScheduledNotificationRecord) -> anyhow::Result<()> {
        if record.event_id == self.failing_event_id {
            return Err(anyhow::anyhow!("Ledger write timed out"));
        }
        self.inner.save(record).await
    }
}

/// Push transport whose credentials are refused
pub struct UnauthenticatedPushTransport {}

#[async_trait::async_trait]
impl IPushTransport for UnauthenticatedPushTransport {
    async fn send(&self, _message: &PushMessage) -> Result<String, PushError> {
        Err(PushError::Unauthenticated("UNAUTHENTICATED".into()))
    }

    async fn send_batch(
        &self,
        messages: &[PushMessage],
    ) -> Result<Vec<Result<String, PushError>>, PushError> {
        Ok(messages
            .iter()
            .map(|_| Err(PushError::Unauthenticated("UNAUTHENTICATED".into())))
            .collect())
    }
}
