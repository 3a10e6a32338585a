use event_notifier_utils::create_random_secret;
use tracing::{info, warn};

const DEFAULT_PORT: usize = 5000;
const DEFAULT_FCM_API_BASE: &str = "https://fcm.googleapis.com";
const DEFAULT_FCM_TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_FCM_REQUEST_TIMEOUT_SECS: u64 = 10;

/// How the FCM transport obtains the OAuth2 access token with the
/// firebase messaging scope
#[derive(Debug, Clone, PartialEq)]
pub enum FcmCredentials {
    /// Token used as is until it expires
    AccessToken(String),
    /// Access tokens are fetched with the refresh token grant and refreshed
    /// before they expire
    RefreshToken {
        client_id: String,
        client_secret: String,
        refresh_token: String,
        token_endpoint: String,
    },
}

/// Settings for the Firebase Cloud Messaging HTTP v1 api
#[derive(Debug, Clone)]
pub struct FcmConfig {
    pub project_id: String,
    pub credentials: FcmCredentials,
    pub api_base: String,
    /// Upper bound in seconds for every request made to FCM and the token endpoint
    pub request_timeout_secs: u64,
}

impl FcmConfig {
    fn from_env() -> Option<Self> {
        let project_id = match std::env::var("FCM_PROJECT_ID") {
            Ok(project_id) => project_id,
            Err(_) => {
                warn!("FCM_PROJECT_ID is not set. Push messages will only be logged.");
                return None;
            }
        };

        let credentials = match (
            std::env::var("FCM_CLIENT_ID"),
            std::env::var("FCM_CLIENT_SECRET"),
            std::env::var("FCM_REFRESH_TOKEN"),
            std::env::var("FCM_ACCESS_TOKEN"),
        ) {
            (Ok(client_id), Ok(client_secret), Ok(refresh_token), _) => {
                FcmCredentials::RefreshToken {
                    client_id,
                    client_secret,
                    refresh_token,
                    token_endpoint: std::env::var("FCM_TOKEN_ENDPOINT")
                        .unwrap_or_else(|_| DEFAULT_FCM_TOKEN_ENDPOINT.to_string()),
                }
            }
            (_, _, _, Ok(access_token)) => {
                warn!("Using the static FCM_ACCESS_TOKEN, pushes will fail once it expires. Set FCM_CLIENT_ID, FCM_CLIENT_SECRET and FCM_REFRESH_TOKEN to refresh it.");
                FcmCredentials::AccessToken(access_token)
            }
            _ => {
                warn!("FCM_PROJECT_ID is set but no FCM credentials were found. Push messages will only be logged.");
                return None;
            }
        };

        let timeout = std::env::var("FCM_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_FCM_REQUEST_TIMEOUT_SECS.to_string());
        let request_timeout_secs = match timeout.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given FCM_REQUEST_TIMEOUT_SECS: {} is not valid, falling back to: {}.",
                    timeout, DEFAULT_FCM_REQUEST_TIMEOUT_SECS
                );
                DEFAULT_FCM_REQUEST_TIMEOUT_SECS
            }
        };

        Some(Self {
            project_id,
            credentials,
            api_base: std::env::var("FCM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_FCM_API_BASE.to_string()),
            request_timeout_secs,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// Secret used to verify the HS256 id tokens sent to the callable endpoints
    pub auth_jwt_secret: String,
    /// Push transport settings. When missing push messages are only logged.
    pub fcm: Option<FcmConfig>,
    /// Seconds between the periodic reminder runs, `0` disables the job schedulers
    pub reminders_job_interval_secs: u64,
}

impl Config {
    pub fn new() -> Self {
        let auth_jwt_secret = match std::env::var("AUTH_JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find AUTH_JWT_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for verifying callable id tokens was generated and set to: {}", secret);
                secret
            }
        };

        let port = std::env::var("PORT").unwrap_or_else(|_| DEFAULT_PORT.to_string());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, DEFAULT_PORT
                );
                DEFAULT_PORT
            }
        };

        let fcm = FcmConfig::from_env();

        let interval = std::env::var("REMINDERS_JOB_INTERVAL_SECS").unwrap_or_else(|_| "0".into());
        let reminders_job_interval_secs = match interval.parse::<u64>() {
            Ok(secs) => secs,
            Err(_) => {
                warn!(
                    "The given REMINDERS_JOB_INTERVAL_SECS: {} is not valid, the job schedulers are disabled.",
                    interval
                );
                0
            }
        };

        Self {
            port,
            auth_jwt_secret,
            fcm,
            reminders_job_interval_secs,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
