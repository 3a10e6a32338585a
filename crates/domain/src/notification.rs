use crate::{
    event::Event,
    reminder::{registration_deadline_message, ReminderRule},
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Event,
    Deadline,
    Registration,
    General,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "Event",
            Self::Deadline => "Deadline",
            Self::Registration => "Registration",
            Self::General => "General",
        }
    }
}

impl Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted, user visible record of an alert sent to a `User`
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub user_id: ID,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub action_text: Option<String>,
    pub action_url: Option<String>,
    pub event_id: Option<ID>,
    pub is_read: bool,
    pub timestamp: i64,
    pub created_at: i64,
}

impl Notification {
    /// Id of the notification for one logical reminder. Retrying the same
    /// reminder after a failed ledger write overwrites the earlier record.
    pub fn reminder_id(event_id: &ID, tag: &str) -> ID {
        ID::from_parts(event_id, tag)
    }

    pub fn event_reminder(event: &Event, rule: &ReminderRule, now: i64) -> Self {
        Self {
            id: Self::reminder_id(&event.id, rule.kind.as_tag()),
            user_id: event.user_id.clone(),
            notification_type: NotificationType::Event,
            title: "Event Reminder".into(),
            message: rule.message(&event.name),
            action_text: Some("View Event".into()),
            action_url: Some(event.app_route()),
            event_id: Some(event.id.clone()),
            is_read: false,
            timestamp: now,
            created_at: now,
        }
    }

    pub fn registration_deadline(event: &Event, deadline_text: &str, now: i64) -> Self {
        Self {
            id: Self::reminder_id(&event.id, "registrationDeadline"),
            user_id: event.user_id.clone(),
            notification_type: NotificationType::Deadline,
            title: "Registration Deadline".into(),
            message: registration_deadline_message(&event.name, deadline_text),
            action_text: Some("Register Now".into()),
            action_url: Some(event.registration_url()),
            event_id: Some(event.id.clone()),
            is_read: false,
            timestamp: now,
            created_at: now,
        }
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}
