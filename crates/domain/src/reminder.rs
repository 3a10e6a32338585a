use crate::{event::EventStatus, user::NotificationPreferences};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const MILLIS_PER_HOUR: i64 = 1000 * 60 * 60;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// How far ahead the event reminder scheduler looks for events
pub const EVENT_REMINDERS_LOOKAHEAD: i64 = 7 * MILLIS_PER_DAY;
/// How far ahead the registration deadline scheduler looks for deadlines
pub const REGISTRATION_DEADLINE_LOOKAHEAD: i64 = 3 * MILLIS_PER_DAY;

/// Tag marking which time window alert was sent for an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderKind {
    #[serde(rename = "1week")]
    OneWeek,
    #[serde(rename = "1day")]
    OneDay,
    #[serde(rename = "3hours")]
    ThreeHours,
}

impl ReminderKind {
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::OneWeek => "1week",
            Self::OneDay => "1day",
            Self::ThreeHours => "3hours",
        }
    }
}

impl Display for ReminderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Unknown reminder kind: {0}")]
pub struct InvalidReminderKindError(String);

impl FromStr for ReminderKind {
    type Err = InvalidReminderKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1week" => Ok(Self::OneWeek),
            "1day" => Ok(Self::OneDay),
            "3hours" => Ok(Self::ThreeHours),
            _ => Err(InvalidReminderKindError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowUnit {
    Days,
    Hours,
}

impl WindowUnit {
    fn millis(&self) -> i64 {
        match self {
            Self::Days => MILLIS_PER_DAY,
            Self::Hours => MILLIS_PER_HOUR,
        }
    }
}

/// The preference toggle gating a `ReminderRule`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReminderPreference {
    WeekBefore,
    DayBefore,
    ThreeHours,
    InterestedDayBefore,
}

impl ReminderPreference {
    pub fn is_enabled(&self, prefs: &NotificationPreferences) -> bool {
        match self {
            Self::WeekBefore => prefs.reminder_week_before,
            Self::DayBefore => prefs.reminder_day_before,
            Self::ThreeHours => prefs.reminder_3_hours,
            Self::InterestedDayBefore => prefs.reminder_interested_day_before,
        }
    }
}

/// One row of the reminder decision table. The window is half open,
/// `lower < time until event <= upper`, measured in `unit`.
#[derive(Debug, PartialEq)]
pub struct ReminderRule {
    pub status: EventStatus,
    pub lower: f64,
    pub upper: f64,
    pub unit: WindowUnit,
    pub kind: ReminderKind,
    pub preference: ReminderPreference,
    pub fragment: &'static str,
}

/// Ordered by priority, the first matching window wins
pub static REMINDER_RULES: [ReminderRule; 4] = [
    ReminderRule {
        status: EventStatus::Going,
        lower: 6.0,
        upper: 7.0,
        unit: WindowUnit::Days,
        kind: ReminderKind::OneWeek,
        preference: ReminderPreference::WeekBefore,
        fragment: "in one week",
    },
    ReminderRule {
        status: EventStatus::Going,
        lower: 0.8,
        upper: 1.0,
        unit: WindowUnit::Days,
        kind: ReminderKind::OneDay,
        preference: ReminderPreference::DayBefore,
        fragment: "tomorrow",
    },
    ReminderRule {
        status: EventStatus::Going,
        lower: 2.0,
        upper: 3.0,
        unit: WindowUnit::Hours,
        kind: ReminderKind::ThreeHours,
        preference: ReminderPreference::ThreeHours,
        fragment: "in 3 hours",
    },
    ReminderRule {
        status: EventStatus::Interested,
        lower: 0.8,
        upper: 1.0,
        unit: WindowUnit::Days,
        kind: ReminderKind::OneDay,
        preference: ReminderPreference::InterestedDayBefore,
        fragment: "tomorrow",
    },
];

impl ReminderRule {
    pub fn matches(&self, status: &EventStatus, millis_until: i64) -> bool {
        if self.status != *status {
            return false;
        }
        let until = millis_until as f64 / self.unit.millis() as f64;
        self.lower < until && until <= self.upper
    }

    pub fn message(&self, event_name: &str) -> String {
        format!("{} is {}!", event_name, self.fragment)
    }
}

/// Finds the reminder window an event with the given status falls into,
/// `millis_until` before it starts.
pub fn find_reminder_rule(status: &EventStatus, millis_until: i64) -> Option<&'static ReminderRule> {
    REMINDER_RULES
        .iter()
        .find(|rule| rule.matches(status, millis_until))
}

/// Whole days left until a deadline, rounded up
pub fn days_until_deadline(millis_until: i64) -> i64 {
    (millis_until as f64 / MILLIS_PER_DAY as f64).ceil() as i64
}

pub fn deadline_text(days_until: i64) -> String {
    match days_until {
        0 => "today".into(),
        1 => "tomorrow".into(),
        n => format!("in {} days", n),
    }
}

pub fn registration_deadline_message(event_name: &str, deadline_text: &str) -> String {
    format!("Registration for {} closes {}!", event_name, deadline_text)
}
