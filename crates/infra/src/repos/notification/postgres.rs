use super::INotificationRepo;
use event_notifier_domain::{Notification, NotificationType, ID};
use sqlx::{FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: String,
    user_uid: String,
    notification_type: String,
    title: String,
    message: String,
    action_text: Option<String>,
    action_url: Option<String>,
    event_uid: Option<String>,
    is_read: bool,
    timestamp: i64,
    created_at: i64,
}

fn parse_notification_type(raw: &str) -> NotificationType {
    match raw {
        "Event" => NotificationType::Event,
        "Deadline" => NotificationType::Deadline,
        "Registration" => NotificationType::Registration,
        _ => NotificationType::General,
    }
}

impl TryFrom<NotificationRaw> for Notification {
    type Error = anyhow::Error;

    fn try_from(n: NotificationRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: n.notification_uid.parse()?,
            user_id: n.user_uid.parse()?,
            notification_type: parse_notification_type(&n.notification_type),
            title: n.title,
            message: n.message,
            action_text: n.action_text,
            action_url: n.action_url,
            event_id: n.event_uid.map(|id| id.parse()).transpose()?,
            is_read: n.is_read,
            timestamp: n.timestamp,
            created_at: n.created_at,
        })
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, n: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, user_uid, notification_type, title, message, action_text, action_url, event_uid, is_read, timestamp, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            ON CONFLICT (notification_uid) DO UPDATE SET
                title = EXCLUDED.title,
                message = EXCLUDED.message,
                action_text = EXCLUDED.action_text,
                action_url = EXCLUDED.action_url,
                timestamp = EXCLUDED.timestamp
            "#,
        )
        .bind(n.id.as_str())
        .bind(n.user_id.as_str())
        .bind(n.notification_type.as_str())
        .bind(n.title.as_str())
        .bind(n.message.as_str())
        .bind(n.action_text.as_deref())
        .bind(n.action_url.as_deref())
        .bind(n.event_id.as_ref().map(|id| id.as_str()))
        .bind(n.is_read)
        .bind(n.timestamp)
        .bind(n.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let rows: Vec<NotificationRaw> = sqlx::query_as(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.user_uid = $1
            ORDER BY n.timestamp DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(|n| n.try_into()).collect()
    }
}
