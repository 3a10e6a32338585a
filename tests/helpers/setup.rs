use event_notifier_api::Application;
use event_notifier_domain::{Event, EventStatus, User, MILLIS_PER_HOUR};
use event_notifier_infra::{Config, ISys, InMemoryPushTransport, NotifierContext};
use event_notifier_sdk::NotifierSDK;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use std::sync::Arc;

pub const NOW: i64 = 1_700_000_000_000;

struct StaticTimeSys(i64);

impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}

pub struct TestApp {
    pub config: Config,
    pub ctx: NotifierContext,
    pub transport: Arc<InMemoryPushTransport>,
}

impl TestApp {
    pub async fn insert_user(&self, fcm_token: Option<&str>) -> User {
        let mut user = User::new();
        user.fcm_token = fcm_token.map(String::from);
        self.ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    pub async fn insert_event(&self, user: &User, hours_from_now: i64, status: EventStatus) -> Event {
        let event = Event::new(
            user.id.clone(),
            "Jazz Night",
            NOW + hours_from_now * MILLIS_PER_HOUR,
            status,
        );
        self.ctx.repos.events.insert(&event).await.unwrap();
        event
    }

    /// Signed id token of a caller with the given uid
    pub fn id_token(&self, uid: &str) -> String {
        #[derive(Serialize)]
        struct Claims<'a> {
            exp: usize,
            iat: usize,
            sub: &'a str,
        }

        encode(
            &Header::new(Algorithm::HS256),
            &Claims {
                exp: 5609418990073,
                iat: 19,
                sub: uid,
            },
            &EncodingKey::from_secret(self.config.auth_jwt_secret.as_bytes()),
        )
        .unwrap()
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> (TestApp, NotifierSDK, String) {
    let transport = Arc::new(InMemoryPushTransport::new());
    let mut ctx = NotifierContext::create_inmemory().with_push_transport(transport.clone());
    ctx.config.port = 0; // Random port
    ctx.config.reminders_job_interval_secs = 0;
    ctx.sys = Arc::new(StaticTimeSys(NOW));

    let config = ctx.config.clone();
    let application = Application::new(ctx.clone())
        .await
        .expect("Failed to build application.");

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    let app = TestApp {
        config,
        ctx,
        transport,
    };
    let sdk = NotifierSDK::new(address.clone(), "");
    (app, sdk, address)
}
