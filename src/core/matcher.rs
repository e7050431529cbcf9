use crate::core::scoring::calculate_match_score;
use crate::models::{RankedMatch, ScoringPoints, User};

/// Ranks a candidate population for a requester
///
/// Scores every candidate, drops zero scores and the requester itself, and
/// sorts descending by score. The sort is stable, so candidates with equal
/// scores keep the order the storage layer returned them in.
#[derive(Debug, Clone)]
pub struct Matcher {
    points: ScoringPoints,
}

impl Matcher {
    pub fn new(points: ScoringPoints) -> Self {
        Self { points }
    }

    pub fn with_default_points() -> Self {
        Self {
            points: ScoringPoints::default(),
        }
    }

    /// Rank `candidates` against `requester`
    ///
    /// Each surviving candidate is returned with its score and the itemized
    /// skill matches that produced it.
    pub fn rank(&self, requester: &User, candidates: Vec<User>) -> Vec<RankedMatch> {
        let mut ranked: Vec<RankedMatch> = candidates
            .into_iter()
            .filter(|candidate| candidate.id != requester.id)
            .filter_map(|candidate| {
                let result = calculate_match_score(requester, &candidate, &self.points);
                if result.score > 0 {
                    Some(RankedMatch {
                        user: candidate,
                        match_score: result.score,
                        matches: result.matches,
                    })
                } else {
                    None
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        ranked
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SkillOffered, SkillWanted};
    use chrono::Utc;
    use uuid::Uuid;

    fn user_offering(name: &str, skills: &[&str]) -> User {
        User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: String::new(),
            bio: None,
            profile_image: String::new(),
            skills_offered: skills
                .iter()
                .map(|s| SkillOffered {
                    id: Uuid::new_v4(),
                    skill_name: s.to_string(),
                    category: "Programming & Development".to_string(),
                    proficiency_level: None,
                    description: None,
                })
                .collect(),
            skills_wanted: vec![],
            availability: vec![],
            rating: 0.0,
            review_count: 0,
            location: None,
            timezone: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn wants(mut user: User, skills: &[&str]) -> User {
        user.skills_wanted = skills
            .iter()
            .map(|s| SkillWanted {
                skill_name: s.to_string(),
                category: "Programming & Development".to_string(),
                desired_level: None,
            })
            .collect();
        user
    }

    #[test]
    fn test_rank_sorts_descending_and_drops_zero() {
        let matcher = Matcher::with_default_points();
        let requester = wants(user_offering("Requester", &[]), &["Rust", "Go"]);

        // Offers both wanted skills: 100 + 2 incidental category bonuses
        let strong = user_offering("Strong", &["Rust", "Go"]);
        // Offers one: 50 + 1 category bonus
        let weak = user_offering("Weak", &["Rust"]);
        // Unrelated category, no overlap at all
        let mut none = user_offering("None", &[]);
        none.skills_offered = vec![];

        let strong_id = strong.id;
        let weak_id = weak.id;

        let ranked = matcher.rank(&requester, vec![weak, none, strong]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].user.id, strong_id);
        assert_eq!(ranked[1].user.id, weak_id);
        assert!(ranked[0].match_score > ranked[1].match_score);
    }

    #[test]
    fn test_rank_excludes_requester() {
        let matcher = Matcher::with_default_points();
        let requester = wants(user_offering("Me", &["Rust"]), &["Rust"]);

        let ranked = matcher.rank(&requester, vec![requester.clone()]);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let matcher = Matcher::with_default_points();
        let requester = wants(user_offering("Requester", &[]), &["Rust"]);

        let first = user_offering("First", &["Rust"]);
        let second = user_offering("Second", &["Rust"]);
        let first_id = first.id;
        let second_id = second.id;

        let ranked = matcher.rank(&requester, vec![first, second]);

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].match_score, ranked[1].match_score);
        assert_eq!(ranked[0].user.id, first_id);
        assert_eq!(ranked[1].user.id, second_id);
    }

    #[test]
    fn test_ranked_matches_carry_itemized_entries() {
        let matcher = Matcher::with_default_points();
        let requester = wants(user_offering("Requester", &[]), &["Rust"]);
        let candidate = user_offering("Candidate", &["Rust"]);

        let ranked = matcher.rank(&requester, vec![candidate]);

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].matches.len(), 1);
        assert_eq!(ranked[0].matches[0].skill, "Rust");
    }
}
