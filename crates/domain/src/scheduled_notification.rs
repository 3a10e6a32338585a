use crate::{reminder::ReminderKind, shared::entity::ID};

/// Ledger entry of what has already been sent to a `User` for an `Event`.
///
/// A reminder kind present in `scheduled_reminders` must never be sent again
/// for the pair, neither may a second registration deadline notice once
/// `registration_deadline_sent` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledNotificationRecord {
    pub event_id: ID,
    pub user_id: ID,
    /// Tags of the reminder kinds already sent, in the order they were sent.
    /// The store does not enforce uniqueness and might contain tags this
    /// version does not know about.
    pub scheduled_reminders: Vec<String>,
    pub registration_deadline_sent: bool,
    pub last_checked: i64,
}

impl ScheduledNotificationRecord {
    /// Empty ledger entry for a pair that has never been notified
    pub fn new(user_id: ID, event_id: ID) -> Self {
        Self {
            event_id,
            user_id,
            scheduled_reminders: Vec::new(),
            registration_deadline_sent: false,
            last_checked: 0,
        }
    }

    pub fn has_sent(&self, kind: ReminderKind) -> bool {
        self.scheduled_reminders
            .iter()
            .any(|tag| tag == kind.as_tag())
    }

    pub fn mark_sent(&mut self, kind: ReminderKind, now: i64) {
        if !self.has_sent(kind) {
            self.scheduled_reminders.push(kind.as_tag().to_string());
        }
        self.last_checked = now;
    }

    pub fn mark_registration_deadline_sent(&mut self, now: i64) {
        self.registration_deadline_sent = true;
        self.last_checked = now;
    }
}
