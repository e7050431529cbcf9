use actix_web::{web, HttpResponse};
use tracing::info;

use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::models::SearchQuery;
use crate::routes::{require_user, AppState};
use crate::services::UserQuery;

/// Configure match routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/match")
            .route("", web::get().to(get_matches))
            .route("/search", web::get().to(search_users)),
    );
}

/// Rank every other user by skill compatibility with the caller
///
/// GET /api/match
///
/// Returns `{ user, matchScore, matches }` entries sorted descending by
/// score; zero-score candidates are dropped.
async fn get_matches(
    state: web::Data<AppState>,
    caller: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let requester = require_user(&state, caller.user_id).await?;
    let candidates = state.store.list_users().await?;
    let total_candidates = candidates.len();

    let ranked = state.matcher.rank(&requester, candidates);

    info!(
        "ranked {} matches for user {} (from {} candidates)",
        ranked.len(),
        requester.id,
        total_candidates
    );

    Ok(HttpResponse::Ok().json(ranked))
}

/// Search profiles by offered skill, category and city
///
/// GET /api/match/search?skill=&category=&location=
async fn search_users(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ApiError> {
    let query = query.into_inner();
    let users = state
        .store
        .search_users(UserQuery {
            skill: query.skill,
            category: query.category,
            city: query.location,
        })
        .await?;

    Ok(HttpResponse::Ok().json(users))
}
