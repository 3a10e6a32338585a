use super::SendNotificationToTokenUseCase;
use crate::{error::NotifierError, shared::usecase::execute};
use actix_web::{web, HttpResponse};
use event_notifier_api_structs::test_send_notification_to_token::*;
use event_notifier_infra::NotifierContext;

/// Unauthenticated variant of the callable, used to try out push delivery
pub async fn test_send_notification_to_token_controller(
    body: web::Bytes,
    ctx: web::Data<NotifierContext>,
) -> Result<HttpResponse, NotifierError> {
    let payload: RequestBody = serde_json::from_slice(&body)
        .map_err(|e| NotifierError::BadClientData(format!("Malformed request body: {}", e)))?;
    let usecase = SendNotificationToTokenUseCase::new(&payload)
        .map_err(|e| NotifierError::BadClientData(e.to_string()))?;

    let result = execute(usecase, &ctx).await.map_err(|_| NotifierError::InternalError)?;

    Ok(HttpResponse::Ok().json(APIResponse {
        success: result.success,
        message: result.message,
        success_count: result.success_count,
        failure_count: result.failure_count,
        payload,
    }))
}
