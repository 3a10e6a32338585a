use actix_web::{http::StatusCode, HttpResponse};
use event_notifier_api_structs::{send_notification_to_token, TriggerErrorResponse};
use thiserror::Error;

/// Errors of the plain http triggers, rendered as `{ success: false, error }`
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("Method not allowed. Error message: `{0}`")]
    MethodNotAllowed(String),
}

impl actix_web::error::ResponseError for NotifierError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(TriggerErrorResponse::new(self.to_string()))
    }
}

/// Errors of the authenticated callable, rendered as `{ error: { code, message } }`
#[derive(Error, Debug, PartialEq)]
pub enum CallableError {
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    InvalidArgument(String),
    #[error("{0}")]
    Internal(String),
}

impl CallableError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated(_) => "unauthenticated",
            Self::InvalidArgument(_) => "invalid-argument",
            Self::Internal(_) => "internal",
        }
    }
}

impl actix_web::error::ResponseError for CallableError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(send_notification_to_token::ErrorResponse {
            error: send_notification_to_token::CallableError {
                code: self.code().into(),
                message: self.to_string(),
            },
        })
    }
}
