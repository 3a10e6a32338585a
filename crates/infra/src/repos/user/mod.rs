mod inmemory;
mod postgres;

pub use inmemory::InMemoryUserRepo;
pub use postgres::PostgresUserRepo;

use event_notifier_domain::{User, ID};

#[async_trait::async_trait]
pub trait IUserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<()>;
    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>>;
}

#[cfg(test)]
mod tests {
    use crate::NotifierContext;
    use event_notifier_domain::{NotificationPreferences, User, ID};

    #[tokio::test]
    async fn insert_and_find() {
        let ctx = NotifierContext::create_inmemory();
        let mut user = User::new();
        user.fcm_token = Some("device".into());
        ctx.repos.users.insert(&user).await.expect("To insert user");

        let found = ctx.repos.users.find(&user.id).await.expect("To query user");
        assert_eq!(found, Some(user.clone()));
        assert!(ctx.repos.users.find(&ID::new()).await.unwrap().is_none());

        // Insert of existing user replaces it
        user.notification_preferences = Some(NotificationPreferences {
            reminder_3_hours: false,
            ..Default::default()
        });
        ctx.repos.users.insert(&user).await.expect("To insert user");
        let found = ctx.repos.users.find(&user.id).await.unwrap().unwrap();
        assert_eq!(found.notification_preferences, user.notification_preferences);
    }
}
