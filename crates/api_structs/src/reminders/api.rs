use serde::{Deserialize, Serialize};

/// Summary of one scheduler run
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulerRunResponse {
    pub success: bool,
    pub message: String,
    pub events_checked: usize,
    pub notifications_sent: usize,
}

impl SchedulerRunResponse {
    pub fn new(message: impl Into<String>, events_checked: usize, notifications_sent: usize) -> Self {
        Self {
            success: true,
            message: message.into(),
            events_checked,
            notifications_sent,
        }
    }
}

/// Body of every failed trigger
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerErrorResponse {
    pub success: bool,
    pub error: String,
}

impl TriggerErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

pub mod run_event_reminders {
    use super::*;

    pub type APIResponse = SchedulerRunResponse;
}

pub mod run_registration_deadlines {
    use super::*;

    pub type APIResponse = SchedulerRunResponse;
}
