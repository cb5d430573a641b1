use std::sync::Arc;

use auth::Authenticator;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;

/// Message returned for every rejected token, whatever the cause.
pub const UNAUTHENTICATED_MESSAGE: &str = "Authentication required";

/// Extension type to store the authenticated subject in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Outcome of reading the Authorization header.
#[derive(Debug, PartialEq, Eq)]
enum TokenCheck<'a> {
    Missing,
    Present(&'a str),
}

/// Middleware that validates bearer tokens and adds the subject to request extensions.
///
/// Every rejection produces the same 401 response; the reason is only logged.
/// The subject is not looked up in the credential store.
pub async fn authenticate(
    State(authenticator): State<Arc<Authenticator>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = match extract_token_from_header(&req) {
        TokenCheck::Present(token) => token,
        TokenCheck::Missing => {
            tracing::warn!("Missing or malformed Authorization header");
            return Err(unauthenticated());
        }
    };

    let user = verify(&authenticator, token)?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn verify(authenticator: &Authenticator, token: &str) -> Result<AuthenticatedUser, ApiError> {
    let claims = authenticator.validate_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        unauthenticated()
    })?;

    let user_id = UserId::from_string(&claims.sub).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user ID");
        unauthenticated()
    })?;

    Ok(AuthenticatedUser { user_id })
}

fn extract_token_from_header(req: &Request) -> TokenCheck<'_> {
    req.headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map_or(TokenCheck::Missing, TokenCheck::Present)
}

fn unauthenticated() -> ApiError {
    ApiError::Unauthorized(UNAUTHENTICATED_MESSAGE.to_string())
}
