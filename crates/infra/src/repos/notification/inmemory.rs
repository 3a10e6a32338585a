use super::INotificationRepo;
use crate::repos::shared::inmemory_repo::*;
use event_notifier_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        upsert(notification, &self.notifications);
        Ok(())
    }

    async fn find_by_user(&self, user_id: &ID) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = find_by(&self.notifications, |n| n.user_id == *user_id);
        notifications.sort_by(|n1, n2| n2.timestamp.cmp(&n1.timestamp));
        Ok(notifications)
    }
}
