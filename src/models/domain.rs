use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Proficiency level for an offered skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProficiencyLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// A skill a user can teach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillOffered {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(rename = "skillName")]
    pub skill_name: String,
    pub category: String,
    #[serde(rename = "proficiencyLevel", default)]
    pub proficiency_level: Option<ProficiencyLevel>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A skill a user wants to learn
///
/// The desired level is free text, unlike the proficiency enum on offered skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillWanted {
    #[serde(rename = "skillName")]
    pub skill_name: String,
    pub category: String,
    #[serde(rename = "desiredLevel", default)]
    pub desired_level: Option<String>,
}

/// Optional city/country pair on a profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
}

/// Weekly availability entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    #[serde(rename = "dayOfWeek")]
    pub day_of_week: DayOfWeek,
    #[serde(rename = "timeSlots", default)]
    pub time_slots: Vec<TimeSlot>,
}

/// Full user record
///
/// The password hash never leaves the server: it is skipped on serialization,
/// so every endpoint that returns a `User` returns the profile minus the
/// credential secret.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(rename = "profileImage", default)]
    pub profile_image: String,
    #[serde(rename = "skillsOffered", default)]
    pub skills_offered: Vec<SkillOffered>,
    #[serde(rename = "skillsWanted", default)]
    pub skills_wanted: Vec<SkillWanted>,
    #[serde(default)]
    pub availability: Vec<AvailabilitySlot>,
    #[serde(default)]
    pub rating: f64,
    #[serde(rename = "reviewCount", default)]
    pub review_count: u32,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Condensed form used when populating references to other users
    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            profile_image: self.profile_image.clone(),
        }
    }
}

/// The subset of a user embedded in sessions, reviews and conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(rename = "profileImage", default)]
    pub profile_image: String,
}

/// Direction of a skill match between requester and candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchDirection {
    /// The requester wants a skill the candidate offers
    WantedOffered,
    /// The requester offers a skill the candidate wants
    OfferedWanted,
}

/// One named justification contributing to a compatibility score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillMatch {
    #[serde(rename = "type")]
    pub direction: MatchDirection,
    pub skill: String,
    pub category: String,
}

/// Output of the match scorer for one requester/candidate pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScore {
    pub score: u32,
    pub matches: Vec<SkillMatch>,
}

/// A candidate ranked against the requester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedMatch {
    pub user: User,
    #[serde(rename = "matchScore")]
    pub match_score: u32,
    pub matches: Vec<SkillMatch>,
}

/// Lifecycle state of a teaching session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Accepted,
    Rejected,
    Completed,
    Cancelled,
}

/// A scheduled teaching session between two users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub requester: Uuid,
    pub recipient: Uuid,
    pub skill: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "scheduledDate")]
    pub scheduled_date: DateTime<Utc>,
    #[serde(rename = "durationMinutes")]
    pub duration_minutes: u32,
    pub status: SessionStatus,
    #[serde(rename = "meetingLink", default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn involves(&self, user_id: Uuid) -> bool {
        self.requester == user_id || self.recipient == user_id
    }
}

/// A review left after a completed session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub reviewer: Uuid,
    pub reviewee: Uuid,
    pub session: Uuid,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(rename = "skillTaught", default)]
    pub skill_taught: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A two-party message thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub participants: [Uuid; 2],
    #[serde(rename = "lastMessage", default)]
    pub last_message: Option<Uuid>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn includes(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub conversation: Uuid,
    pub sender: Uuid,
    pub content: String,
    #[serde(default)]
    pub read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Point values for the additive scoring algorithm
#[derive(Debug, Clone, Copy)]
pub struct ScoringPoints {
    /// Exact (case-insensitive) skill-name match, either direction
    pub skill_name_match: u32,
    /// Category agreement without a name match (wanted-vs-offered pass only)
    pub category_match: u32,
    /// Both profiles carry the same city
    pub same_city: u32,
    /// Both profiles carry the same timezone label
    pub same_timezone: u32,
}

impl Default for ScoringPoints {
    fn default() -> Self {
        Self {
            skill_name_match: 50,
            category_match: 10,
            same_city: 15,
            same_timezone: 10,
        }
    }
}
