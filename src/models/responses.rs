use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::domain::{Message, Review, Session, SessionStatus, User, UserSummary};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Successful register/login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserSummary,
}

/// Plain acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Session with participant references populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub id: Uuid,
    pub requester: UserSummary,
    pub recipient: UserSummary,
    pub skill: String,
    pub description: Option<String>,
    #[serde(rename = "scheduledDate")]
    pub scheduled_date: DateTime<Utc>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    pub status: SessionStatus,
    #[serde(rename = "meetingLink")]
    pub meeting_link: Option<String>,
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl SessionView {
    pub fn populate(session: Session, requester: &User, recipient: &User) -> Self {
        Self {
            id: session.id,
            requester: requester.summary(),
            recipient: recipient.summary(),
            skill: session.skill,
            description: session.description,
            scheduled_date: session.scheduled_date,
            duration_minutes: session.duration_minutes,
            status: session.status,
            meeting_link: session.meeting_link,
            notes: session.notes,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

/// Review with user references populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewView {
    pub id: Uuid,
    pub reviewer: UserSummary,
    pub reviewee: UserSummary,
    pub session: Uuid,
    pub rating: u8,
    pub comment: Option<String>,
    #[serde(rename = "skillTaught")]
    pub skill_taught: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ReviewView {
    pub fn populate(review: Review, reviewer: &User, reviewee: &User) -> Self {
        Self {
            id: review.id,
            reviewer: reviewer.summary(),
            reviewee: reviewee.summary(),
            session: review.session,
            rating: review.rating,
            comment: review.comment,
            skill_taught: review.skill_taught,
            created_at: review.created_at,
        }
    }
}

/// Message with the sender reference populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: Uuid,
    pub conversation: Uuid,
    pub sender: UserSummary,
    pub content: String,
    pub read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl MessageView {
    pub fn populate(message: Message, sender: &User) -> Self {
        Self {
            id: message.id,
            conversation: message.conversation,
            sender: sender.summary(),
            content: message.content,
            read: message.read,
            created_at: message.created_at,
        }
    }
}

/// Conversation with participants and last message populated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationView {
    pub id: Uuid,
    pub participants: Vec<UserSummary>,
    #[serde(rename = "lastMessage")]
    pub last_message: Option<Message>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
