use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

fn enabled() -> bool {
    true
}

/// Named notification toggles a `User` can switch off in the app.
///
/// A toggle that is missing from the stored document counts as enabled,
/// so does a user without any preferences at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreferences {
    #[serde(default = "enabled")]
    pub event_reminders_enabled: bool,
    #[serde(default = "enabled")]
    pub reminder_week_before: bool,
    #[serde(default = "enabled")]
    pub reminder_day_before: bool,
    #[serde(default = "enabled", rename = "reminder3Hours")]
    pub reminder_3_hours: bool,
    #[serde(default = "enabled")]
    pub reminder_interested_day_before: bool,
    #[serde(default = "enabled")]
    pub registration_deadlines_enabled: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            event_reminders_enabled: true,
            reminder_week_before: true,
            reminder_day_before: true,
            reminder_3_hours: true,
            reminder_interested_day_before: true,
            registration_deadlines_enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: ID,
    /// Push delivery address of the user's device
    pub fcm_token: Option<String>,
    pub notification_preferences: Option<NotificationPreferences>,
}

impl User {
    pub fn new() -> Self {
        Self {
            id: Default::default(),
            fcm_token: None,
            notification_preferences: None,
        }
    }

    pub fn preferences(&self) -> NotificationPreferences {
        self.notification_preferences.clone().unwrap_or_default()
    }

    pub fn push_token(&self) -> Option<&str> {
        self.fcm_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for User {
    fn id(&self) -> &ID {
        &self.id
    }
}
