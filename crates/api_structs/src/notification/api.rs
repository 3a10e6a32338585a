use serde::{Deserialize, Serialize};

/// Push notification requested by a client
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl NotificationInput {
    /// All non blank tokens of the request, `token` first
    pub fn all_tokens(&self) -> Vec<String> {
        self.token
            .iter()
            .chain(self.tokens.iter().flatten())
            .map(|token| token.trim())
            .filter(|token| !token.is_empty())
            .map(String::from)
            .collect()
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationResult {
    pub success: bool,
    pub message: String,
    pub success_count: usize,
    pub failure_count: usize,
}

pub mod send_notification_to_token {
    use super::*;

    /// Callable functions wrap their argument in `data`
    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        #[serde(default)]
        pub data: NotificationInput,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub result: SendNotificationResult,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct CallableError {
        /// One of `unauthenticated`, `invalid-argument` or `internal`
        pub code: String,
        pub message: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct ErrorResponse {
        pub error: CallableError,
    }
}

pub mod test_send_notification_to_token {
    use super::*;

    pub type RequestBody = NotificationInput;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub success: bool,
        pub message: String,
        pub success_count: usize,
        pub failure_count: usize,
        pub payload: NotificationInput,
    }
}
