mod event;
mod notification;
mod reminder;
mod scheduled_notification;
mod shared;
mod user;

pub use event::{Event, EventStatus};
pub use notification::{Notification, NotificationType};
pub use reminder::{
    days_until_deadline, deadline_text, find_reminder_rule, registration_deadline_message,
    ReminderKind, ReminderPreference, ReminderRule, WindowUnit, EVENT_REMINDERS_LOOKAHEAD,
    MILLIS_PER_DAY, MILLIS_PER_HOUR, REGISTRATION_DEADLINE_LOOKAHEAD, REMINDER_RULES,
};
pub use scheduled_notification::ScheduledNotificationRecord;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use user::{NotificationPreferences, User};
