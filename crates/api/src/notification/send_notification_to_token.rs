use crate::{
    error::CallableError,
    shared::{
        auth::protect_callable,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use event_notifier_api_structs::{send_notification_to_token::*, NotificationInput, SendNotificationResult};
use event_notifier_domain::{NotificationType, ID};
use event_notifier_infra::{NotifierContext, PushError, PushPayload};
use tracing::info;

pub async fn send_notification_to_token_controller(
    http_req: HttpRequest,
    body: web::Bytes,
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, CallableError> {
    let caller = protect_callable(&http_req, &ctx)?;

    let body: RequestBody = serde_json::from_slice(&body)
        .map_err(|e| CallableError::InvalidArgument(format!("Malformed request body: {}", e)))?;
    let usecase = SendNotificationToTokenUseCase::new(&body.data)?;
    info!(
        "Caller: {} sends a notification to {} devices",
        caller.uid,
        usecase.tokens.len()
    );

    execute(usecase, &ctx)
        .await
        .map(|result| HttpResponse::Ok().json(APIResponse { result }))
        .map_err(CallableError::from)
}

/// Pushes a notification to one or more device tokens given by the client
#[derive(Debug)]
pub struct SendNotificationToTokenUseCase {
    pub tokens: Vec<String>,
    pub payload: PushPayload,
}

impl SendNotificationToTokenUseCase {
    /// Validates the client input, nothing is sent for an invalid input
    pub fn new(input: &NotificationInput) -> Result<Self, CallableError> {
        let title = Guard::against_blank("title", input.title.as_deref())?;
        let body = Guard::against_blank("body", input.body.as_deref())?;
        let tokens = input.all_tokens();
        if tokens.is_empty() {
            return Err(CallableError::InvalidArgument(
                "Either `token` or `tokens` must contain a device token.".into(),
            ));
        }
        let optional = |val: &Option<String>| {
            val.as_deref()
                .map(str::trim)
                .filter(|val| !val.is_empty())
                .map(String::from)
        };

        Ok(Self {
            tokens,
            payload: PushPayload {
                title,
                body,
                notification_type: NotificationType::General,
                notification_id: ID::new().to_string(),
                event_id: optional(&input.event_id),
                action_url: optional(&input.action_url),
            },
        })
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    Transport(PushError),
}

impl From<UseCaseError> for CallableError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Transport(e) => {
                Self::Internal(format!("Unable to send the notification. Error: {}", e))
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendNotificationToTokenUseCase {
    type Response = SendNotificationResult;

    type Errors = UseCaseError;

    const NAME: &'static str = "SendNotificationToToken";

    async fn execute(&mut self, ctx: &NotifierContext) -> Result<Self::Response, Self::Errors> {
        if let [token] = self.tokens.as_slice() {
            ctx.push
                .send_push_notification(token, &self.payload)
                .await
                .map_err(UseCaseError::Transport)?;
            return Ok(SendNotificationResult {
                success: true,
                message: "Notification sent".into(),
                success_count: 1,
                failure_count: 0,
            });
        }

        let outcome = ctx
            .push
            .send_batch_push_notifications(&self.tokens, &self.payload)
            .await;
        Ok(SendNotificationResult {
            success: true,
            message: format!(
                "Notification sent to {} of {} devices",
                outcome.success_count(),
                self.tokens.len()
            ),
            success_count: outcome.success_count(),
            failure_count: outcome.failure_count(),
        })
    }
}
