use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{validation_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::{CreateReviewRequest, Review, ReviewView, SessionStatus};
use crate::routes::{require_user, AppState};

/// Configure review routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/review")
            .route("", web::post().to(create_review))
            .route("/user/{userId}", web::get().to(get_user_reviews))
            .route("/my-reviews", web::get().to(get_my_reviews)),
    );
}

/// Review a completed session
///
/// POST /api/review
///
/// The session must be completed, the reviewer must have taken part in it,
/// and each participant can review a session only once. Creating a review
/// recomputes the reviewee's average rating.
async fn create_review(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;
    let req = req.into_inner();

    let session = state.store.find_session(req.session).await?;
    let session = match session {
        Some(s) if s.status == SessionStatus::Completed => s,
        _ => {
            return Err(ApiError::BadRequest(
                "can only review completed sessions".to_string(),
            ))
        }
    };

    if !session.involves(caller.user_id) {
        return Err(ApiError::Forbidden("not authorized".to_string()));
    }

    let reviewer = require_user(&state, caller.user_id).await?;
    let reviewee = require_user(&state, req.reviewee).await?;

    let review = Review {
        id: Uuid::new_v4(),
        reviewer: reviewer.id,
        reviewee: reviewee.id,
        session: session.id,
        rating: req.rating,
        comment: req.comment,
        skill_taught: req.skill_taught,
        created_at: Utc::now(),
    };

    // Duplicate (reviewer, session) pairs are rejected by the store index
    let review = state.store.create_review(review).await?;

    let reviewee = recompute_rating(&state, reviewee.id).await?;
    let view = ReviewView::populate(review, &reviewer, &reviewee);

    Ok(HttpResponse::Created().json(view))
}

/// Reviews about a user, newest first
///
/// GET /api/review/user/{userId}
async fn get_user_reviews(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let reviewee = require_user(&state, path.into_inner()).await?;
    let reviews = state.store.reviews_for_reviewee(reviewee.id).await?;

    let mut views = Vec::with_capacity(reviews.len());
    for review in reviews {
        let reviewer = require_user(&state, review.reviewer).await?;
        views.push(ReviewView::populate(review, &reviewer, &reviewee));
    }

    Ok(HttpResponse::Ok().json(views))
}

/// Reviews written by the caller, newest first
///
/// GET /api/review/my-reviews
async fn get_my_reviews(
    state: web::Data<AppState>,
    caller: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let reviewer = require_user(&state, caller.user_id).await?;
    let reviews = state.store.reviews_by_reviewer(reviewer.id).await?;

    let mut views = Vec::with_capacity(reviews.len());
    for review in reviews {
        let reviewee = require_user(&state, review.reviewee).await?;
        views.push(ReviewView::populate(review, &reviewer, &reviewee));
    }

    Ok(HttpResponse::Ok().json(views))
}

/// Recompute a user's average rating (one decimal) and review count
async fn recompute_rating(
    state: &AppState,
    user_id: Uuid,
) -> Result<crate::models::User, ApiError> {
    let reviews = state.store.reviews_for_reviewee(user_id).await?;
    let mut user = require_user(state, user_id).await?;

    user.review_count = reviews.len() as u32;
    user.rating = if reviews.is_empty() {
        0.0
    } else {
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        let avg = f64::from(sum) / reviews.len() as f64;
        (avg * 10.0).round() / 10.0
    };
    user.updated_at = Utc::now();

    let user = state.store.update_user(user).await?;
    Ok(user)
}
