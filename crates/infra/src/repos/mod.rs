mod event;
mod notification;
mod scheduled_notification;
mod shared;
mod user;

use event::{InMemoryEventRepo, PostgresEventRepo};
use notification::{InMemoryNotificationRepo, PostgresNotificationRepo};
use scheduled_notification::{InMemoryScheduledNotificationRepo, PostgresScheduledNotificationRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use user::{InMemoryUserRepo, PostgresUserRepo};

pub use event::IEventRepo;
pub use notification::INotificationRepo;
pub use scheduled_notification::IScheduledNotificationRepo;
pub use user::IUserRepo;

pub use shared::query_structs::*;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub users: Arc<dyn IUserRepo>,
    pub scheduled_notifications: Arc<dyn IScheduledNotificationRepo>,
    pub notifications: Arc<dyn INotificationRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            users: Arc::new(PostgresUserRepo::new(pool.clone())),
            scheduled_notifications: Arc::new(PostgresScheduledNotificationRepo::new(
                pool.clone(),
            )),
            notifications: Arc::new(PostgresNotificationRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            users: Arc::new(InMemoryUserRepo::new()),
            scheduled_notifications: Arc::new(InMemoryScheduledNotificationRepo::new()),
            notifications: Arc::new(InMemoryNotificationRepo::new()),
        }
    }
}
