use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::error::{validation_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::{AuthResponse, LoginRequest, MessageResponse, RegisterRequest, User};
use crate::routes::{require_user, AppState};

/// Configure authentication routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(me)),
    );
}

/// Create an account and issue a token
///
/// POST /api/auth/register
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let email = req.email.trim().to_lowercase();
    if state.store.find_user_by_email(email.clone()).await?.is_some() {
        return Err(ApiError::Conflict("user already exists".to_string()));
    }

    let password_hash = state.auth.hash_password(&req.password)?;
    let now = Utc::now();
    let user = User {
        id: Uuid::new_v4(),
        name: req.name.trim().to_string(),
        email,
        password_hash,
        bio: None,
        profile_image: String::new(),
        skills_offered: vec![],
        skills_wanted: vec![],
        availability: vec![],
        rating: 0.0,
        review_count: 0,
        location: None,
        timezone: None,
        created_at: now,
        updated_at: now,
    };

    let user = state.store.create_user(user).await?;
    let token = state.auth.issue(user.id)?;

    info!("registered user {}", user.id);

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "Registered successfully".to_string(),
        token,
        user: user.summary(),
    }))
}

/// Verify credentials and issue a token
///
/// POST /api/auth/login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let email = req.email.trim().to_lowercase();
    let user = state
        .store
        .find_user_by_email(email)
        .await?
        .ok_or_else(|| ApiError::BadRequest("user not found".to_string()))?;

    state.auth.verify_password(&req.password, &user.password_hash)?;

    let token = state.auth.issue(user.id)?;

    info!("user {} logged in", user.id);

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.summary(),
    }))
}

/// Stateless acknowledgement; bearer tokens are discarded client-side
///
/// POST /api/auth/logout
async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Logout successful".to_string(),
    })
}

/// The authenticated user's own profile
///
/// GET /api/auth/me
async fn me(state: web::Data<AppState>, caller: AuthUser) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, caller.user_id).await?;
    Ok(HttpResponse::Ok().json(user))
}
