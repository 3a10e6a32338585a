use super::auth_provider::FcmAuthProvider;
use super::{IPushTransport, PushError, PushMessage, MAX_BATCH_SIZE};
use crate::config::FcmConfig;
use futures::future::join_all;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::error;

const CONNECT_TIMEOUT_SECS: u64 = 5;

#[derive(Debug, Serialize)]
struct FcmNotification<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct FcmMessage<'a> {
    token: &'a str,
    notification: FcmNotification<'a>,
    data: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
struct FcmSendRequest<'a> {
    message: FcmMessage<'a>,
}

impl<'a> From<&'a PushMessage> for FcmSendRequest<'a> {
    fn from(m: &'a PushMessage) -> Self {
        Self {
            message: FcmMessage {
                token: &m.token,
                notification: FcmNotification {
                    title: &m.payload.title,
                    body: &m.payload.body,
                },
                data: m.payload.data(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct FcmSendResponse {
    name: String,
}

#[derive(Debug, Deserialize)]
struct FcmErrorBody {
    status: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FcmErrorResponse {
    error: FcmErrorBody,
}

/// Firebase Cloud Messaging HTTP v1 transport
pub struct FcmPushTransport {
    client: Client,
    auth: FcmAuthProvider,
    config: FcmConfig,
}

impl FcmPushTransport {
    pub fn new(config: FcmConfig) -> Result<Self, reqwest::Error> {
        let request_timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(request_timeout.min(Duration::from_secs(CONNECT_TIMEOUT_SECS)))
            .build()?;
        Ok(Self {
            auth: FcmAuthProvider::new(client.clone(), config.credentials.clone()),
            client,
            config,
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.config.api_base.trim_end_matches('/'),
            self.config.project_id
        )
    }
}

#[async_trait::async_trait]
impl IPushTransport for FcmPushTransport {
    async fn send(&self, message: &PushMessage) -> Result<String, PushError> {
        let access_token = self.auth.access_token().await?;
        let res = self
            .client
            .post(&self.send_url())
            .bearer_auth(&access_token)
            .json(&FcmSendRequest::from(message))
            .send()
            .await
            .map_err(|e| {
                error!("Unable to reach FCM: {:?}", e);
                PushError::Transport(e.to_string())
            })?;

        let status = res.status();
        if status.is_success() {
            return res
                .json::<FcmSendResponse>()
                .await
                .map(|body| body.name)
                .map_err(|e| PushError::Transport(e.to_string()));
        }

        let reason = match res.json::<FcmErrorResponse>().await {
            Ok(body) => body
                .error
                .status
                .or(body.error.message)
                .unwrap_or_else(|| status.to_string()),
            Err(_) => status.to_string(),
        };
        match status {
            StatusCode::UNAUTHORIZED => {
                self.auth.invalidate().await;
                Err(PushError::Unauthenticated(reason))
            }
            StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                Err(PushError::Rejected {
                    token: message.token.clone(),
                    reason,
                })
            }
            _ => Err(PushError::Transport(reason)),
        }
    }

    async fn send_batch(
        &self,
        messages: &[PushMessage],
    ) -> Result<Vec<Result<String, PushError>>, PushError> {
        if messages.len() > MAX_BATCH_SIZE {
            return Err(PushError::BatchTooLarge(messages.len()));
        }
        // The v1 api has no multicast endpoint, so the chunk is sent as
        // concurrent single sends
        Ok(join_all(messages.iter().map(|m| self.send(m))).await)
    }
}
