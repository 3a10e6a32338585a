use super::IEventRepo;
use crate::repos::shared::query_structs::TimestampRange;
use event_notifier_domain::{Event, EventStatus};
use sqlx::{FromRow, PgPool};
use std::convert::{TryFrom, TryInto};
use tracing::warn;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: String,
    user_uid: String,
    name: String,
    event_date: i64,
    status: String,
    requires_registration: bool,
    registration_deadline: Option<i64>,
    url_link: Option<String>,
}

impl TryFrom<EventRaw> for Event {
    type Error = anyhow::Error;

    fn try_from(e: EventRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: e.event_uid.parse()?,
            user_id: e.user_uid.parse()?,
            name: e.name,
            event_date: e.event_date,
            status: EventStatus::from(e.status),
            requires_registration: e.requires_registration,
            registration_deadline: e.registration_deadline,
            url_link: e.url_link,
        })
    }
}

/// Malformed documents are logged and left out instead of failing the whole query
fn into_events(rows: Vec<EventRaw>) -> Vec<Event> {
    rows.into_iter()
        .filter_map(|row| {
            let event_uid = row.event_uid.clone();
            match row.try_into() {
                Ok(event) => Some(event),
                Err(e) => {
                    warn!("Skipping malformed event: {:?}. Error: {:?}", event_uid, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &Event) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO events
            (event_uid, user_uid, name, event_date, status, requires_registration, registration_deadline, url_link)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (event_uid) DO UPDATE SET
                user_uid = EXCLUDED.user_uid,
                name = EXCLUDED.name,
                event_date = EXCLUDED.event_date,
                status = EXCLUDED.status,
                requires_registration = EXCLUDED.requires_registration,
                registration_deadline = EXCLUDED.registration_deadline,
                url_link = EXCLUDED.url_link
            "#,
        )
        .bind(e.id.as_str())
        .bind(e.user_id.as_str())
        .bind(e.name.as_str())
        .bind(e.event_date)
        .bind(e.status.as_str())
        .bind(e.requires_registration)
        .bind(e.registration_deadline)
        .bind(e.url_link.as_deref())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_date_range(&self, range: TimestampRange) -> anyhow::Result<Vec<Event>> {
        let rows: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_date >= $1 AND e.event_date <= $2
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_events(rows))
    }

    async fn find_with_registration_deadline(
        &self,
        range: TimestampRange,
    ) -> anyhow::Result<Vec<Event>> {
        let rows: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.requires_registration = TRUE
            AND e.registration_deadline >= $1 AND e.registration_deadline <= $2
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .fetch_all(&self.pool)
        .await?;
        Ok(into_events(rows))
    }
}
