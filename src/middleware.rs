use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use uuid::Uuid;

use crate::error::ApiError;
use crate::routes::AppState;
use crate::services::auth::AuthError;

/// Extractor for the authenticated caller
///
/// Pulls the bearer token from the Authorization header and verifies it
/// against the application's token issuer. Handlers that take an `AuthUser`
/// argument reject unauthenticated requests with 401 before running.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::Internal("application state missing".to_string()))?;

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let token = header_value
        .strip_prefix("Bearer ")
        .ok_or(AuthError::MissingToken)?;

    let claims = state.auth.verify(token)?;

    Ok(AuthUser {
        user_id: claims.sub,
    })
}
