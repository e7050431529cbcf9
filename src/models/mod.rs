// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AvailabilitySlot, Conversation, DayOfWeek, Location, MatchDirection, MatchScore, Message,
    ProficiencyLevel, RankedMatch, Review, ScoringPoints, Session, SessionStatus, SkillMatch,
    SkillOffered, SkillWanted, TimeSlot, User, UserSummary,
};
pub use requests::{
    AddSkillOfferedRequest, AddSkillWantedRequest, CreateReviewRequest, CreateSessionRequest,
    LoginRequest, OpenConversationRequest, ProfileUpdateRequest, RegisterRequest, SearchQuery,
    SendMessageRequest, UpdateAvailabilityRequest, UpdateSessionRequest,
};
pub use responses::{
    AuthResponse, ConversationView, ErrorResponse, HealthResponse, MessageResponse, MessageView,
    ReviewView, SessionView,
};
