// Route exports
pub mod auth;
pub mod matches;
pub mod messages;
pub mod profile;
pub mod reviews;
pub mod sessions;

use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use uuid::Uuid;

use crate::core::Matcher;
use crate::error::ApiError;
use crate::models::{HealthResponse, User};
use crate::services::{MessageBus, Store, TokenIssuer};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub bus: Arc<dyn MessageBus>,
    pub matcher: Matcher,
    pub auth: TokenIssuer,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check)).service(
        web::scope("/api")
            .configure(auth::configure)
            .configure(profile::configure)
            .configure(matches::configure)
            .configure(sessions::configure)
            .configure(reviews::configure)
            .configure(messages::configure),
    );
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Fetch a user or fail with 404
pub(crate) async fn require_user(state: &AppState, id: Uuid) -> Result<User, ApiError> {
    state
        .store
        .find_user(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))
}
