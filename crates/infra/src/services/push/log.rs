use super::{IPushTransport, PushError, PushMessage, MAX_BATCH_SIZE};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

/// Transport used when no messaging backend is configured. Messages are
/// written to the log and then dropped, nothing is retained.
#[derive(Default)]
pub struct LogPushTransport {
    sent_count: AtomicUsize,
}

impl LogPushTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_count(&self) -> usize {
        self.sent_count.load(Ordering::Relaxed)
    }

    fn deliver(&self, message: &PushMessage) -> String {
        let n = self.sent_count.fetch_add(1, Ordering::Relaxed) + 1;
        info!(
            "No push transport configured, dropping push message `{}` to token: {}",
            message.payload.title, message.token
        );
        format!("log/messages/{}", n)
    }
}

#[async_trait::async_trait]
impl IPushTransport for LogPushTransport {
    async fn send(&self, message: &PushMessage) -> Result<String, PushError> {
        Ok(self.deliver(message))
    }

    async fn send_batch(
        &self,
        messages: &[PushMessage],
    ) -> Result<Vec<Result<String, PushError>>, PushError> {
        if messages.len() > MAX_BATCH_SIZE {
            return Err(PushError::BatchTooLarge(messages.len()));
        }
        Ok(messages.iter().map(|m| Ok(self.deliver(m))).collect())
    }
}
