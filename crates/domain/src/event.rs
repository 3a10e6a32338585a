use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The attendance status the owner has set on an `Event`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventStatus {
    Going,
    Interested,
    NotGoing,
    /// Any status this service has no reminder rules for, kept as written
    /// by the client
    Other(String),
}

impl EventStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Going => "Going",
            Self::Interested => "Interested",
            Self::NotGoing => "Not Going",
            Self::Other(status) => status.as_str(),
        }
    }

    /// Registration deadline notices are only relevant for users
    /// who plan to show up
    pub fn wants_registration_notices(&self) -> bool {
        matches!(self, Self::Going | Self::Interested)
    }
}

impl From<&str> for EventStatus {
    fn from(status: &str) -> Self {
        match status {
            "Going" => Self::Going,
            "Interested" => Self::Interested,
            "Not Going" => Self::NotGoing,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for EventStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "Going" | "Interested" | "Not Going" => Self::from(status.as_str()),
            _ => Self::Other(status),
        }
    }
}

impl From<EventStatus> for String {
    fn from(status: EventStatus) -> Self {
        match status {
            EventStatus::Other(status) => status,
            known => known.as_str().to_string(),
        }
    }
}

/// A user created happening. Events are created and updated by the mobile
/// client, this service only reads them.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: ID,
    pub user_id: ID,
    pub name: String,
    /// Timestamp in millis of when the event takes place
    pub event_date: i64,
    pub status: EventStatus,
    pub requires_registration: bool,
    /// Timestamp in millis of when the registration closes
    pub registration_deadline: Option<i64>,
    pub url_link: Option<String>,
}

impl Event {
    pub fn new(user_id: ID, name: impl Into<String>, event_date: i64, status: EventStatus) -> Self {
        Self {
            id: Default::default(),
            user_id,
            name: name.into(),
            event_date,
            status,
            requires_registration: false,
            registration_deadline: None,
            url_link: None,
        }
    }

    /// In app route to the detail page of this event
    pub fn app_route(&self) -> String {
        format!("/events/{}", self.id)
    }

    /// Where a registration deadline notice should take the user.
    /// The registration link if the event has one, otherwise the event page.
    pub fn registration_url(&self) -> String {
        match self.url_link.as_deref().map(str::trim) {
            Some(link) if !link.is_empty() => link.to_string(),
            _ => self.app_route(),
        }
    }
}

impl Entity for Event {
    fn id(&self) -> &ID {
        &self.id
    }
}
