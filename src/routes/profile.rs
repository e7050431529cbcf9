use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::error::{validation_error, ApiError};
use crate::middleware::AuthUser;
use crate::models::{
    AddSkillOfferedRequest, AddSkillWantedRequest, ProfileUpdateRequest, SkillOffered,
    SkillWanted, UpdateAvailabilityRequest,
};
use crate::routes::{require_user, AppState};

/// Configure profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .route("", web::put().to(update_profile))
            .route("/skills/offered", web::post().to(add_skill_offered))
            .route(
                "/skills/offered/{skillId}",
                web::delete().to(remove_skill_offered),
            )
            .route("/skills/wanted", web::post().to(add_skill_wanted))
            .route("/availability", web::put().to(update_availability))
            .route("/{id}", web::get().to(get_profile)),
    );
}

/// Public profile lookup
///
/// GET /api/profile/{id}
async fn get_profile(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let user = require_user(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Partial profile update; absent fields are left unchanged
///
/// PUT /api/profile
async fn update_profile(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<ProfileUpdateRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let mut user = require_user(&state, caller.user_id).await?;
    let req = req.into_inner();

    if let Some(name) = req.name {
        user.name = name;
    }
    if let Some(bio) = req.bio {
        user.bio = Some(bio);
    }
    if let Some(location) = req.location {
        user.location = Some(location);
    }
    if let Some(timezone) = req.timezone {
        user.timezone = Some(timezone);
    }
    if let Some(profile_image) = req.profile_image {
        user.profile_image = profile_image;
    }
    user.updated_at = Utc::now();

    let user = state.store.update_user(user).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Append an offered skill
///
/// POST /api/profile/skills/offered
async fn add_skill_offered(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<AddSkillOfferedRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let mut user = require_user(&state, caller.user_id).await?;
    let req = req.into_inner();
    user.skills_offered.push(SkillOffered {
        id: Uuid::new_v4(),
        skill_name: req.skill_name,
        category: req.category,
        proficiency_level: req.proficiency_level,
        description: req.description,
    });
    user.updated_at = Utc::now();

    let user = state.store.update_user(user).await?;
    Ok(HttpResponse::Ok().json(user.skills_offered))
}

/// Remove an offered skill by id
///
/// DELETE /api/profile/skills/offered/{skillId}
async fn remove_skill_offered(
    state: web::Data<AppState>,
    caller: AuthUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let skill_id = path.into_inner();
    let mut user = require_user(&state, caller.user_id).await?;
    user.skills_offered.retain(|skill| skill.id != skill_id);
    user.updated_at = Utc::now();

    let user = state.store.update_user(user).await?;
    Ok(HttpResponse::Ok().json(user.skills_offered))
}

/// Append a wanted skill
///
/// POST /api/profile/skills/wanted
async fn add_skill_wanted(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<AddSkillWantedRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let mut user = require_user(&state, caller.user_id).await?;
    let req = req.into_inner();
    user.skills_wanted.push(SkillWanted {
        skill_name: req.skill_name,
        category: req.category,
        desired_level: req.desired_level,
    });
    user.updated_at = Utc::now();

    let user = state.store.update_user(user).await?;
    Ok(HttpResponse::Ok().json(user.skills_wanted))
}

/// Replace the availability list
///
/// PUT /api/profile/availability
async fn update_availability(
    state: web::Data<AppState>,
    caller: AuthUser,
    req: web::Json<UpdateAvailabilityRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut user = require_user(&state, caller.user_id).await?;
    user.availability = req.into_inner().availability;
    user.updated_at = Utc::now();

    let user = state.store.update_user(user).await?;
    Ok(HttpResponse::Ok().json(user.availability))
}
