// Unit tests for the SkillSwap scoring core

use chrono::Utc;
use skillswap::core::{calculate_match_score, Matcher};
use skillswap::models::{
    Location, MatchDirection, ScoringPoints, SkillOffered, SkillWanted, User,
};
use uuid::Uuid;

fn blank_user(name: &str) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        password_hash: String::new(),
        bio: None,
        profile_image: String::new(),
        skills_offered: vec![],
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

fn offered(name: &str, category: &str) -> SkillOffered {
    SkillOffered {
        id: Uuid::new_v4(),
        skill_name: name.to_string(),
        category: category.to_string(),
        proficiency_level: None,
        description: None,
    }
}

fn wanted(name: &str, category: &str) -> SkillWanted {
    SkillWanted {
        skill_name: name.to_string(),
        category: category.to_string(),
        desired_level: None,
    }
}

fn in_city(mut user: User, city: &str) -> User {
    user.location = Some(Location {
        city: Some(city.to_string()),
        country: None,
    });
    user
}

#[test]
fn test_score_is_sum_of_contributions() {
    // One name match (50), one category-only pair (10), shared city (15),
    // shared timezone (10)
    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![
        wanted("Spanish", "Languages"),
        wanted("Sourdough", "Cooking & Culinary"),
    ];
    requester.timezone = Some("GMT".to_string());
    let requester = in_city(requester, "London");

    let mut candidate = blank_user("candidate");
    candidate.skills_offered = vec![
        offered("spanish", "Languages"),
        offered("Ramen", "Cooking & Culinary"),
    ];
    candidate.timezone = Some("GMT".to_string());
    let candidate = in_city(candidate, "London");

    let result = calculate_match_score(&requester, &candidate, &ScoringPoints::default());

    assert_eq!(result.score, 50 + 10 + 15 + 10);
    assert_eq!(result.matches.len(), 1);
    assert_eq!(result.matches[0].skill, "Spanish");
}

#[test]
fn test_case_insensitive_name_match() {
    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![wanted("Python", "Programming & Development")];
    let mut candidate = blank_user("candidate");
    candidate.skills_offered = vec![offered("PYTHON", "Programming & Development")];

    let result = calculate_match_score(&requester, &candidate, &ScoringPoints::default());

    assert_eq!(result.score, 50);
    assert_eq!(result.matches[0].direction, MatchDirection::WantedOffered);
}

#[test]
fn test_name_match_and_category_bonus_are_exclusive() {
    // Same name and same category: only the 50 applies for that pair
    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![wanted("Yoga", "Fitness")];
    let mut candidate = blank_user("candidate");
    candidate.skills_offered = vec![offered("Yoga", "Fitness")];

    let result = calculate_match_score(&requester, &candidate, &ScoringPoints::default());
    assert_eq!(result.score, 50);
}

#[test]
fn test_asymmetric_category_fallback() {
    // Category fallback exists only in the wanted-vs-offered pass, so the
    // two directions disagree.
    let mut a = blank_user("a");
    a.skills_wanted = vec![wanted("Guitar", "Music")];
    let mut b = blank_user("b");
    b.skills_offered = vec![offered("Piano", "Music")];

    let points = ScoringPoints::default();
    assert_eq!(calculate_match_score(&a, &b, &points).score, 10);
    assert_eq!(calculate_match_score(&b, &a, &points).score, 0);
}

#[test]
fn test_location_and_timezone_gating() {
    let points = ScoringPoints::default();

    // One side without a city: no bonus
    let with_city = in_city(blank_user("a"), "Paris");
    let without = blank_user("b");
    assert_eq!(calculate_match_score(&with_city, &without, &points).score, 0);

    // Both without: still no bonus
    assert_eq!(
        calculate_match_score(&blank_user("a"), &blank_user("b"), &points).score,
        0
    );

    // Different cities: no bonus
    let lyon = in_city(blank_user("c"), "Lyon");
    assert_eq!(calculate_match_score(&with_city, &lyon, &points).score, 0);

    // Timezone needs both sides too
    let mut tz = blank_user("d");
    tz.timezone = Some("CET".to_string());
    assert_eq!(calculate_match_score(&tz, &blank_user("e"), &points).score, 0);
}

#[test]
fn test_empty_profile_scores_zero_against_anything() {
    let empty = blank_user("empty");

    let mut full = blank_user("full");
    full.skills_offered = vec![offered("Python", "Programming & Development")];
    full.skills_wanted = vec![wanted("Guitar", "Music")];
    full.timezone = Some("EST".to_string());
    let full = in_city(full, "New York");

    let result = calculate_match_score(&empty, &full, &ScoringPoints::default());
    assert_eq!(result.score, 0);
    assert!(result.matches.is_empty());
}

#[test]
fn test_duplicate_wanted_entries_double_count() {
    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![
        wanted("SQL", "Programming & Development"),
        wanted("SQL", "Programming & Development"),
    ];
    let mut candidate = blank_user("candidate");
    candidate.skills_offered = vec![offered("SQL", "Programming & Development")];

    let result = calculate_match_score(&requester, &candidate, &ScoringPoints::default());

    assert_eq!(result.score, 100);
    assert_eq!(result.matches.len(), 2);
    for entry in &result.matches {
        assert_eq!(entry.direction, MatchDirection::WantedOffered);
        assert_eq!(entry.skill, "SQL");
    }
}

#[test]
fn test_ranking_drops_zero_scores_and_sorts() {
    let matcher = Matcher::with_default_points();

    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![
        wanted("Rust", "Programming & Development"),
        wanted("Go", "Programming & Development"),
    ];

    let mut both = blank_user("both");
    both.skills_offered = vec![
        offered("Rust", "Programming & Development"),
        offered("Go", "Programming & Development"),
    ];
    let mut one = blank_user("one");
    one.skills_offered = vec![offered("Rust", "Programming & Development")];
    let unrelated = blank_user("unrelated");

    let both_id = both.id;
    let one_id = one.id;

    let ranked = matcher.rank(&requester, vec![one, unrelated, both]);

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].user.id, both_id);
    assert_eq!(ranked[1].user.id, one_id);
}

#[test]
fn test_ranking_preserves_tie_order() {
    let matcher = Matcher::with_default_points();

    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![wanted("Rust", "Programming & Development")];

    let candidates: Vec<User> = (0..5)
        .map(|i| {
            let mut candidate = blank_user(&format!("candidate{}", i));
            candidate.skills_offered = vec![offered("Rust", "Programming & Development")];
            candidate
        })
        .collect();
    let expected: Vec<Uuid> = candidates.iter().map(|c| c.id).collect();

    let ranked = matcher.rank(&requester, candidates);

    let order: Vec<Uuid> = ranked.iter().map(|r| r.user.id).collect();
    assert_eq!(order, expected);
}

#[test]
fn test_match_entry_serialization_shape() {
    // Wire contract: { "type": "wanted-offered", "skill": ..., "category": ... }
    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![wanted("Python", "Programming & Development")];
    let mut candidate = blank_user("candidate");
    candidate.skills_offered = vec![offered("Python", "Programming & Development")];

    let result = calculate_match_score(&requester, &candidate, &ScoringPoints::default());
    let json = serde_json::to_value(&result.matches[0]).unwrap();

    assert_eq!(json["type"], "wanted-offered");
    assert_eq!(json["skill"], "Python");
    assert_eq!(json["category"], "Programming & Development");
}

#[test]
fn test_ranked_match_serialization_hides_password_hash() {
    let matcher = Matcher::with_default_points();

    let mut requester = blank_user("requester");
    requester.skills_wanted = vec![wanted("Rust", "Programming & Development")];
    let mut candidate = blank_user("candidate");
    candidate.skills_offered = vec![offered("Rust", "Programming & Development")];
    candidate.password_hash = "super-secret-hash".to_string();

    let ranked = matcher.rank(&requester, vec![candidate]);
    let json = serde_json::to_value(&ranked[0]).unwrap();

    assert_eq!(json["matchScore"], 50);
    assert!(json["user"].get("password_hash").is_none());
    assert!(json["user"].get("passwordHash").is_none());
}
