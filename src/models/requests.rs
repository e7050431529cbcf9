use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::domain::{AvailabilitySlot, Location, ProficiencyLevel, SessionStatus};

/// Request to create an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

/// Request to sign in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Partial profile update; absent fields leave the stored value unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(alias = "profileImage", rename = "profileImage", default)]
    pub profile_image: Option<String>,
}

/// Request to add an offered skill to the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSkillOfferedRequest {
    #[validate(length(min = 1, message = "skillName is required"))]
    #[serde(alias = "skill_name", rename = "skillName")]
    pub skill_name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(alias = "proficiencyLevel", rename = "proficiencyLevel", default)]
    pub proficiency_level: Option<ProficiencyLevel>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request to add a wanted skill to the caller's profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddSkillWantedRequest {
    #[validate(length(min = 1, message = "skillName is required"))]
    #[serde(alias = "skill_name", rename = "skillName")]
    pub skill_name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[serde(alias = "desiredLevel", rename = "desiredLevel", default)]
    pub desired_level: Option<String>,
}

/// Replaces the caller's whole availability list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
}

/// Query parameters for user search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub skill: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

/// Request to schedule a session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSessionRequest {
    pub recipient: Uuid,
    #[validate(length(min = 1, message = "skill is required"))]
    pub skill: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(alias = "scheduledDate", rename = "scheduledDate")]
    pub scheduled_date: DateTime<Utc>,
    #[serde(
        alias = "durationMinutes",
        rename = "durationMinutes",
        default = "default_duration"
    )]
    pub duration_minutes: u32,
}

fn default_duration() -> u32 {
    60
}

/// Partial session update; absent fields leave the stored value unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(alias = "meetingLink", rename = "meetingLink", default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to review a completed session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReviewRequest {
    pub reviewee: Uuid,
    pub session: Uuid,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: u8,
    #[validate(length(max = 500, message = "comment must be at most 500 characters"))]
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(alias = "skillTaught", rename = "skillTaught", default)]
    pub skill_taught: Option<String>,
}

/// Request to open (or fetch) the conversation with another user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenConversationRequest {
    #[serde(alias = "participant_id", rename = "participantId")]
    pub participant_id: Uuid,
}

/// Request to send a chat message
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[serde(alias = "conversation_id", rename = "conversationId")]
    pub conversation_id: Uuid,
    #[validate(length(min = 1, message = "content is required"))]
    pub content: String,
}
