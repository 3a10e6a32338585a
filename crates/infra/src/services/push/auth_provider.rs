use super::PushError;
use crate::config::FcmCredentials;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{info, warn};

// https://developers.google.com/identity/protocols/oauth2/web-server#httprest_3

const EXPIRY_MARGIN_MILLIS: i64 = 1000 * 60;

#[derive(Debug, Deserialize)]
struct RefreshTokenResponse {
    access_token: String,
    // Access token expires in specified in seconds
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_ts: i64,
}

impl CachedToken {
    fn is_fresh(&self, now: i64) -> bool {
        now + EXPIRY_MARGIN_MILLIS < self.expires_ts
    }
}

/// Hands out the bearer token for FCM requests, refreshing it
/// with the refresh token grant when it is about to expire
pub(super) struct FcmAuthProvider {
    client: Client,
    credentials: FcmCredentials,
    cached: Mutex<Option<CachedToken>>,
}

impl FcmAuthProvider {
    pub fn new(client: Client, credentials: FcmCredentials) -> Self {
        Self {
            client,
            credentials,
            cached: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> Result<String, PushError> {
        let (client_id, client_secret, refresh_token, token_endpoint) = match &self.credentials {
            FcmCredentials::AccessToken(token) => return Ok(token.clone()),
            FcmCredentials::RefreshToken {
                client_id,
                client_secret,
                refresh_token,
                token_endpoint,
            } => (client_id, client_secret, refresh_token, token_endpoint),
        };

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now().timestamp_millis()) {
                return Ok(token.access_token.clone());
            }
        }
        // Access token has or will expire soon, now renew it

        let params = [
            ("client_id", client_id.as_str()),
            ("client_secret", client_secret.as_str()),
            ("refresh_token", refresh_token.as_str()),
            ("grant_type", "refresh_token"),
        ];
        let res = self
            .client
            .post(token_endpoint)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                warn!("Unable to reach the FCM token endpoint. Error: {:?}", e);
                PushError::Transport(e.to_string())
            })?;

        if !res.status().is_success() {
            let status = res.status();
            warn!("FCM access token refresh was refused with status: {}", status);
            return Err(PushError::Unauthenticated(format!(
                "Access token refresh failed with status {}",
                status
            )));
        }

        let tokens = res
            .json::<RefreshTokenResponse>()
            .await
            .map_err(|e| PushError::Unauthenticated(e.to_string()))?;
        info!("Refreshed the FCM access token");
        let access_token = tokens.access_token.clone();
        *cached = Some(CachedToken {
            access_token: tokens.access_token,
            expires_ts: Utc::now().timestamp_millis() + tokens.expires_in * 1000,
        });

        Ok(access_token)
    }

    /// Drops the cached token so the next request fetches a new one
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }
}
