mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

use event_notifier_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    /// Creates the notification, an existing notification with the same id is replaced
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Newest first
    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use event_notifier_domain::{Notification, NotificationType, ID};

    fn notification(user_id: &ID, id: &str, timestamp: i64) -> Notification {
        Notification {
            id: id.parse().unwrap(),
            user_id: user_id.clone(),
            notification_type: NotificationType::General,
            title: "Title".into(),
            message: "Message".into(),
            action_text: None,
            action_url: None,
            event_id: None,
            is_read: false,
            timestamp,
            created_at: timestamp,
        }
    }

    #[tokio::test]
    async fn insert_is_idempotent_per_id() {
        let ctx = NotifierContext::create_inmemory();
        let user_id = ID::new();
        let repo = &ctx.repos.notifications;

        repo.insert(&notification(&user_id, "n1", 1)).await.unwrap();
        repo.insert(&notification(&user_id, "n2", 2)).await.unwrap();
        repo.insert(&notification(&user_id, "n1", 3)).await.unwrap();
        repo.insert(&notification(&ID::new(), "n3", 4)).await.unwrap();

        let found = repo.find_by_user(&user_id).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id.as_str(), "n1");
        assert_eq!(found[0].timestamp, 3);
        assert_eq!(found[1].id.as_str(), "n2");
    }
}
