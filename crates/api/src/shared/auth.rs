use crate::error::CallableError;
use actix_web::HttpRequest;
use event_notifier_infra::NotifierContext;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration time (as UTC timestamp)
    pub exp: usize,
    /// Issued at (as UTC timestamp)
    #[serde(default)]
    pub iat: usize,
    /// Uid of the signed in caller
    pub sub: String,
}

/// The verified identity behind a callable request
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    pub uid: String,
}

fn parse_authtoken_header(token_header_value: &str) -> Option<&str> {
    let token = token_header_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

fn decode_token(secret: &str, token: &str) -> anyhow::Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims;
    Ok(claims)
}

/// Only signed in callers may invoke callable endpoints
pub fn protect_callable(req: &HttpRequest, ctx: &NotifierContext) -> Result<Caller, CallableError> {
    let token = req
        .headers()
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(parse_authtoken_header)
        .ok_or_else(|| {
            CallableError::Unauthenticated(
                "The function must be called while authenticated.".into(),
            )
        })?;

    match decode_token(&ctx.config.auth_jwt_secret, token) {
        Ok(claims) if !claims.sub.trim().is_empty() => Ok(Caller { uid: claims.sub }),
        Ok(_) => Err(CallableError::Unauthenticated(
            "The auth token is missing a subject.".into(),
        )),
        Err(e) => Err(CallableError::Unauthenticated(format!(
            "Malformed or expired auth token. Error: {}",
            e
        ))),
    }
}
