use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{validation_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::{
    CreateSessionRequest, MessageResponse, Session, SessionStatus, SessionView,
    UpdateSessionRequest,
};
use crate::routes::{require_user, AppState};

/// Configure session routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/session")
            .route("", web::post().to(create_session))
            .route("", web::get().to(get_sessions))
            .route("/{id}", web::put().to(update_session))
            .route("/{id}", web::delete().to(delete_session)),
    );
}

async fn populate(state: &AppState, session: Session) -> Result<SessionView, ApiError> {
    let requester = require_user(state, session.requester).await?;
    let recipient = require_user(state, session.recipient).await?;
    Ok(SessionView::populate(session, &requester, &recipient))
}

/// Request a session with another user
///
/// POST /api/session
async fn create_session(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<CreateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;
    let req = req.into_inner();

    let requester = require_user(&state, caller.user_id).await?;
    let recipient = require_user(&state, req.recipient).await?;

    if recipient.id == requester.id {
        return Err(ApiError::BadRequest(
            "cannot request a session with yourself".to_string(),
        ));
    }

    let now = Utc::now();
    let session = Session {
        id: Uuid::new_v4(),
        requester: requester.id,
        recipient: recipient.id,
        skill: req.skill,
        description: req.description,
        scheduled_date: req.scheduled_date,
        duration_minutes: req.duration_minutes,
        status: SessionStatus::Pending,
        meeting_link: None,
        notes: None,
        created_at: now,
        updated_at: now,
    };

    let session = state.store.create_session(session).await?;
    let view = SessionView::populate(session, &requester, &recipient);

    Ok(HttpResponse::Created().json(view))
}

/// The caller's sessions, ascending by scheduled date
///
/// GET /api/session
async fn get_sessions(
    state: web::Data<AppState>,
    caller: AuthUser,
) -> Result<HttpResponse, ApiError> {
    let sessions = state.store.sessions_for_user(caller.user_id).await?;

    let mut views = Vec::with_capacity(sessions.len());
    for session in sessions {
        views.push(populate(&state, session).await?);
    }

    Ok(HttpResponse::Ok().json(views))
}

/// Update a session's status, meeting link or notes
///
/// PUT /api/session/{id}
///
/// Only participants may update a session, and only the recipient may accept
/// or reject it.
async fn update_session(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSessionRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut session = state
        .store
        .find_session(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("session not found".to_string()))?;

    if !session.involves(caller.user_id) {
        return Err(ApiError::Forbidden("not authorized".to_string()));
    }

    let req = req.into_inner();
    if let Some(status) = req.status {
        if matches!(status, SessionStatus::Accepted | SessionStatus::Rejected)
            && session.recipient != caller.user_id
        {
            return Err(ApiError::Forbidden(
                "only the recipient can accept or reject".to_string(),
            ));
        }
        session.status = status;
    }
    if let Some(meeting_link) = req.meeting_link {
        session.meeting_link = Some(meeting_link);
    }
    if let Some(notes) = req.notes {
        session.notes = Some(notes);
    }
    session.updated_at = Utc::now();

    let session = state.store.update_session(session).await?;
    let view = populate(&state, session).await?;

    Ok(HttpResponse::Ok().json(view))
}

/// Delete a session
///
/// DELETE /api/session/{id}
async fn delete_session(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let session = state
        .store
        .find_session(path.into_inner())
        .await?
        .ok_or_else(|| ApiError::NotFound("session not found".to_string()))?;

    if !session.involves(caller.user_id) {
        return Err(ApiError::Forbidden("not authorized".to_string()));
    }

    state.store.delete_session(session.id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Session deleted".to_string(),
    }))
}
