mod auth_provider;
mod fcm;
mod inmemory;
mod log;

pub use fcm::FcmPushTransport;
pub use inmemory::InMemoryPushTransport;
pub use log::LogPushTransport;

use event_notifier_domain::{Notification, NotificationType};
use serde::Serialize;
use std::{collections::BTreeMap, sync::Arc};
use thiserror::Error;
use tracing::{error, warn};

/// Maximum number of messages the transport accepts in one batch call
pub const MAX_BATCH_SIZE: usize = 500;

/// Content of a push message, shared by every token it is sent to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub notification_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

impl PushPayload {
    /// Key value data delivered to the app next to the visible notification.
    /// Absent optional fields are left out instead of sent empty.
    pub fn data(&self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        data.insert("type".to_string(), self.notification_type.to_string());
        data.insert("notificationId".to_string(), self.notification_id.clone());
        if let Some(event_id) = &self.event_id {
            data.insert("eventId".to_string(), event_id.clone());
        }
        if let Some(action_url) = &self.action_url {
            data.insert("actionUrl".to_string(), action_url.clone());
        }
        data
    }
}

impl From<&Notification> for PushPayload {
    fn from(n: &Notification) -> Self {
        Self {
            title: n.title.clone(),
            body: n.message.clone(),
            notification_type: n.notification_type,
            notification_id: n.id.to_string(),
            event_id: n.event_id.as_ref().map(|id| id.to_string()),
            action_url: n.action_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PushMessage {
    pub token: String,
    pub payload: PushPayload,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PushError {
    #[error("Invalid push token: `{0}`")]
    InvalidToken(String),
    #[error("Push message to `{token}` was rejected: {reason}")]
    Rejected { token: String, reason: String },
    #[error("Push transport rejected the credentials: {0}")]
    Unauthenticated(String),
    #[error("Push transport failed: {0}")]
    Transport(String),
    #[error("Batch of {0} messages exceeds the transport limit of {}", MAX_BATCH_SIZE)]
    BatchTooLarge(usize),
}

impl PushError {
    /// Whether the failure was caused by the addressed token. Any other failure
    /// says nothing about the token and the message can be sent again later.
    pub fn is_token_failure(&self) -> bool {
        matches!(self, Self::InvalidToken(_) | Self::Rejected { .. })
    }
}

/// The messaging backend delivering push messages to device tokens
#[async_trait::async_trait]
pub trait IPushTransport: Send + Sync {
    /// Sends one message and returns the message id assigned by the transport
    async fn send(&self, message: &PushMessage) -> Result<String, PushError>;
    /// Sends at most `MAX_BATCH_SIZE` messages. The outer error means the whole
    /// batch failed, otherwise there is one result per message in input order.
    async fn send_batch(
        &self,
        messages: &[PushMessage],
    ) -> Result<Vec<Result<String, PushError>>, PushError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenOutcome {
    Delivered { token: String, message_id: String },
    Failed { token: String, error: PushError },
}

impl TokenOutcome {
    pub fn token(&self) -> &str {
        match self {
            Self::Delivered { token, .. } | Self::Failed { token, .. } => token,
        }
    }

    pub fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Result of a best effort batch dispatch, one outcome per token in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOutcome {
    pub outcomes: Vec<TokenOutcome>,
    /// Number of tokens in every chunk handed to the transport
    pub chunk_sizes: Vec<usize>,
}

impl BatchOutcome {
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.outcomes.len() - self.success_count()
    }

    pub fn failed_tokens(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_delivered())
            .map(|o| o.token())
            .collect()
    }
}

/// Notification dispatch service sitting on top of a `IPushTransport`
#[derive(Clone)]
pub struct PushDispatcher {
    transport: Arc<dyn IPushTransport>,
}

impl PushDispatcher {
    pub fn new(transport: Arc<dyn IPushTransport>) -> Self {
        Self { transport }
    }

    pub async fn send_push_notification(
        &self,
        token: &str,
        payload: &PushPayload,
    ) -> Result<String, PushError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(PushError::InvalidToken(token.to_string()));
        }
        self.transport
            .send(&PushMessage {
                token: token.to_string(),
                payload: payload.clone(),
            })
            .await
    }

    /// Never fails, every token is attempted and the failures are logged and
    /// reported in the returned `BatchOutcome`.
    pub async fn send_batch_push_notifications(
        &self,
        tokens: &[String],
        payload: &PushPayload,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for chunk in tokens.chunks(MAX_BATCH_SIZE) {
            outcome.chunk_sizes.push(chunk.len());
            let messages = chunk
                .iter()
                .map(|token| PushMessage {
                    token: token.clone(),
                    payload: payload.clone(),
                })
                .collect::<Vec<_>>();

            match self.transport.send_batch(&messages).await {
                Ok(results) => {
                    let mut results = results.into_iter();
                    for token in chunk {
                        let result = results.next().unwrap_or_else(|| {
                            Err(PushError::Transport("No result for token".into()))
                        });
                        match result {
                            Ok(message_id) => outcome.outcomes.push(TokenOutcome::Delivered {
                                token: token.clone(),
                                message_id,
                            }),
                            Err(e) => {
                                warn!("Failed to send push message to token: {}. Error: {}", token, e);
                                outcome.outcomes.push(TokenOutcome::Failed {
                                    token: token.clone(),
                                    error: e,
                                });
                            }
                        }
                    }
                }
                Err(e) => {
                    error!("Push batch of {} messages failed: {}", chunk.len(), e);
                    for token in chunk {
                        outcome.outcomes.push(TokenOutcome::Failed {
                            token: token.clone(),
                            error: e.clone(),
                        });
                    }
                }
            }
        }

        outcome
    }
}
