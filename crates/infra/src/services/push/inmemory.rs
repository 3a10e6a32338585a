use super::{IPushTransport, PushError, PushMessage, MAX_BATCH_SIZE};
use std::{collections::HashSet, sync::Mutex};
use tracing::info;

/// Transport that keeps every message in memory instead of delivering it.
/// Used by the in memory context and in tests, which read the messages back.
pub struct InMemoryPushTransport {
    sent: Mutex<Vec<PushMessage>>,
    batch_sizes: Mutex<Vec<usize>>,
    rejected_tokens: Mutex<HashSet<String>>,
}

impl InMemoryPushTransport {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            batch_sizes: Mutex::new(Vec::new()),
            rejected_tokens: Mutex::new(HashSet::new()),
        }
    }

    /// Every later message to `token` fails with `PushError::Rejected`
    pub fn reject_token(&self, token: &str) {
        self.rejected_tokens
            .lock()
            .unwrap()
            .insert(token.to_string());
    }

    pub fn sent_messages(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn batch_sizes(&self) -> Vec<usize> {
        self.batch_sizes.lock().unwrap().clone()
    }

    fn deliver(&self, message: &PushMessage) -> Result<String, PushError> {
        if self.rejected_tokens.lock().unwrap().contains(&message.token) {
            return Err(PushError::Rejected {
                token: message.token.clone(),
                reason: "registration-token-not-registered".into(),
            });
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(message.clone());
        info!(
            "Recorded push message `{}` to token: {}",
            message.payload.title, message.token
        );
        Ok(format!("inmemory/messages/{}", sent.len()))
    }
}

impl Default for InMemoryPushTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IPushTransport for InMemoryPushTransport {
    async fn send(&self, message: &PushMessage) -> Result<String, PushError> {
        self.deliver(message)
    }

    async fn send_batch(
        &self,
        messages: &[PushMessage],
    ) -> Result<Vec<Result<String, PushError>>, PushError> {
        if messages.len() > MAX_BATCH_SIZE {
            return Err(PushError::BatchTooLarge(messages.len()));
        }
        self.batch_sizes.lock().unwrap().push(messages.len());
        Ok(messages.iter().map(|m| self.deliver(m)).collect())
    }
}
