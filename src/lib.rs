//! SkillSwap - skill-exchange marketplace API
//!
//! This library provides the SkillSwap backend: profile, session, review and
//! messaging CRUD around a compatibility-scoring core that ranks users by how
//! well their offered and wanted skills line up.

pub mod config;
pub mod core;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{calculate_match_score, Matcher};
pub use crate::models::{MatchScore, RankedMatch, ScoringPoints, SkillMatch, User};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let matcher = Matcher::with_default_points();
        let _ = format!("{:?}", matcher);
        assert_eq!(ScoringPoints::default().skill_name_match, 50);
    }
}
