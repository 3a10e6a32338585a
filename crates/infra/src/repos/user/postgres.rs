use super::IUserRepo;
use event_notifier_domain::{NotificationPreferences, User, ID};
use sqlx::{types::Json, FromRow, PgPool};
use std::convert::{TryFrom, TryInto};

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    user_uid: String,
    fcm_token: Option<String>,
    notification_preferences: Option<Json<NotificationPreferences>>,
}

impl TryFrom<UserRaw> for User {
    type Error = anyhow::Error;

    fn try_from(u: UserRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: u.user_uid.parse()?,
            fcm_token: u.fcm_token,
            notification_preferences: u.notification_preferences.map(|prefs| prefs.0),
        })
    }
}

#[async_trait::async_trait]
impl IUserRepo for PostgresUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users(user_uid, fcm_token, notification_preferences)
            VALUES($1, $2, $3)
            ON CONFLICT (user_uid) DO UPDATE SET
                fcm_token = EXCLUDED.fcm_token,
                notification_preferences = EXCLUDED.notification_preferences
            "#,
        )
        .bind(user.id.as_str())
        .bind(user.fcm_token.as_deref())
        .bind(user.notification_preferences.clone().map(Json))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, user_id: &ID) -> anyhow::Result<Option<User>> {
        let row: Option<UserRaw> = sqlx::query_as(
            r#"
            SELECT * FROM users AS u
            WHERE u.user_uid = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|u| u.try_into()).transpose()
    }
}
