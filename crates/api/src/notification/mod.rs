mod send_notification_to_token;
mod test_send_notification_to_token;

use crate::error::NotifierError;
use actix_web::{web, HttpRequest};
use send_notification_to_token::send_notification_to_token_controller;
use test_send_notification_to_token::test_send_notification_to_token_controller;

pub use send_notification_to_token::SendNotificationToTokenUseCase;

async fn method_not_allowed(http_req: HttpRequest) -> Result<&'static str, NotifierError> {
    Err(NotifierError::MethodNotAllowed(format!(
        "{} is not supported, use POST.",
        http_req.method()
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/sendNotificationToToken")
            .route(web::post().to(send_notification_to_token_controller)),
    );
    cfg.service(
        web::resource("/testSendNotificationToToken")
            .route(web::post().to(test_send_notification_to_token_controller))
            .default_service(web::to(method_not_allowed)),
    );
}
