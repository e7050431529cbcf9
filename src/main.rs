mod config;
mod core;
mod error;
mod middleware;
mod models;
mod routes;
mod services;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    error as actix_error, http::StatusCode, middleware as actix_middleware, web, App, HttpResponse,
    HttpServer,
};
use tracing::{error as log_error, info};

use crate::config::Settings;
use crate::core::Matcher;
use crate::models::ScoringPoints;
use crate::routes::AppState;
use crate::services::{InProcessBus, MemoryStore, TokenIssuer};

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl actix_error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .content_type("application/json")
            .body(serde_json::to_string(self).unwrap_or_default())
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(
    err: actix_error::JsonPayloadError,
    req: &actix_web::HttpRequest,
) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(
    err: actix_error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt().with_target(false).with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting SkillSwap API...");

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        log_error!("Failed to load configuration: {}", e);
        panic!("Configuration error: {}", e);
    });

    info!("Configuration loaded successfully");

    // In-memory document store; swap for a persistent backend behind the
    // same Store trait.
    let store = Arc::new(MemoryStore::new());

    // In-process pub/sub for conversation rooms
    let bus = Arc::new(InProcessBus::default());

    // Initialize matcher with configured point values
    let points = ScoringPoints {
        skill_name_match: settings.scoring.points.skill_name_match,
        category_match: settings.scoring.points.category_match,
        same_city: settings.scoring.points.same_city,
        same_timezone: settings.scoring.points.same_timezone,
    };

    let matcher = Matcher::new(points);

    info!("Matcher initialized with points: {:?}", points);

    // Token issuer for auth
    let auth = TokenIssuer::new(settings.auth.jwt_secret.clone(), settings.token_ttl_secs());

    // Build application state
    let app_state = AppState {
        store,
        bus,
        matcher,
        auth,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
            .wrap(cors)
            .wrap(actix_middleware::Logger::default())
            .wrap(actix_middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
