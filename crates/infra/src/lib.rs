mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, FcmConfig, FcmCredentials};
pub use repos::{
    IEventRepo, INotificationRepo, IScheduledNotificationRepo, IUserRepo, Repos, TimestampRange,
};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tokio::sync::Mutex;
use tracing::warn;

/// Locks making sure only one run of each scheduler is in flight in this process
#[derive(Clone, Default)]
pub struct SchedulerLocks {
    pub event_reminders: Arc<Mutex<()>>,
    pub registration_deadlines: Arc<Mutex<()>>,
}

#[derive(Clone)]
pub struct NotifierContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub push: PushDispatcher,
    pub locks: SchedulerLocks,
}

struct ContextParams {
    pub postgres_connection_string: Option<String>,
}

impl NotifierContext {
    /// Context with inmemory repositories and an inmemory push transport
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
            push: PushDispatcher::new(Arc::new(InMemoryPushTransport::new())),
            locks: Default::default(),
        }
    }

    pub fn with_push_transport(mut self, transport: Arc<dyn IPushTransport>) -> Self {
        self.push = PushDispatcher::new(transport);
        self
    }

    async fn create(params: ContextParams) -> Self {
        let repos = match params.postgres_connection_string {
            Some(connection_string) => Repos::create_postgres(&connection_string)
                .await
                .expect("Postgres credentials must be valid"),
            None => {
                warn!("{} is not set, all data is kept in memory.", PSQL_CONNECTION_STRING);
                Repos::create_inmemory()
            }
        };
        let config = Config::new();
        let transport: Arc<dyn IPushTransport> = match config.fcm.clone() {
            Some(fcm) => Arc::new(FcmPushTransport::new(fcm).expect("FCM http client must build")),
            None => Arc::new(LogPushTransport::new()),
        };

        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            push: PushDispatcher::new(transport),
            locks: Default::default(),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NotifierContext {
    NotifierContext::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

fn get_psql_connection_string() -> Option<String> {
    std::env::var(PSQL_CONNECTION_STRING).ok()
}

/// Runs the Postgres migrations, does nothing when running in memory
pub async fn run_migration() -> Result<(), MigrateError> {
    let connection_string = match get_psql_connection_string() {
        Some(connection_string) => connection_string,
        None => return Ok(()),
    };
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}
