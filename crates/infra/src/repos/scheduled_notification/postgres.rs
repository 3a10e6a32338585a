use super::IScheduledNotificationRepo;
use event_notifier_domain::{ScheduledNotificationRecord, ID};
use sqlx::{FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresScheduledNotificationRepo {
    pool: PgPool,
}

impl PostgresScheduledNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledNotificationRaw {
    user_uid: String,
    event_uid: String,
    scheduled_reminders: Vec<String>,
    registration_deadline_sent: bool,
    last_checked: i64,
}

impl TryFrom<ScheduledNotificationRaw> for ScheduledNotificationRecord {
    type Error = anyhow::Error;

    fn try_from(r: ScheduledNotificationRaw) -> anyhow::Result<Self> {
        Ok(Self {
            user_id: r.user_uid.parse()?,
            event_id: r.event_uid.parse()?,
            scheduled_reminders: r.scheduled_reminders,
            registration_deadline_sent: r.registration_deadline_sent,
            last_checked: r.last_checked,
        })
    }
}

#[async_trait::async_trait]
impl IScheduledNotificationRepo for PostgresScheduledNotificationRepo {
    async fn find(
        &self,
        user_id: &ID,
        event_id: &ID,
    ) -> anyhow::Result<Option<ScheduledNotificationRecord>> {
        let row: Option<ScheduledNotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM scheduled_notifications AS s
            WHERE s.user_uid = $1 AND s.event_uid = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(event_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.try_into()).transpose()
    }

    async fn save(&self, record: &ScheduledNotificationRecord) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_notifications
            (user_uid, event_uid, scheduled_reminders, registration_deadline_sent, last_checked)
            VALUES($1, $2, $3, $4, $5)
            ON CONFLICT (user_uid, event_uid) DO UPDATE SET
                scheduled_reminders = EXCLUDED.scheduled_reminders,
                registration_deadline_sent = EXCLUDED.registration_deadline_sent,
                last_checked = EXCLUDED.last_checked
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.event_id.as_str())
        .bind(record.scheduled_reminders.clone())
        .bind(record.registration_deadline_sent)
        .bind(record.last_checked)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
