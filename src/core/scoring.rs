use crate::models::{MatchDirection, MatchScore, ScoringPoints, SkillMatch, User};

/// Calculate a compatibility score for a candidate against the requester
///
/// Additive point system, evaluated in a fixed order:
/// 1. requester wanted vs candidate offered: +50 per exact (case-insensitive)
///    skill-name match, recorded in `matches`; otherwise +10 per category
///    agreement, not recorded. The two branches are mutually exclusive per
///    pair, so a name match forfeits that pair's category bonus.
/// 2. requester offered vs candidate wanted: +50 per name match, recorded.
///    This pass intentionally has no category fallback; the asymmetry with
///    step 1 is part of the scoring contract and must not be "fixed" here.
/// 3. +15 when both profiles carry the same city.
/// 4. +10 when both profiles carry the same timezone label.
///
/// Duplicate entries in either list contribute once per pair, so a skill
/// listed twice doubles its bonus. Scores are not symmetric:
/// score(a, b) and score(b, a) are independent computations.
pub fn calculate_match_score(
    requester: &User,
    candidate: &User,
    points: &ScoringPoints,
) -> MatchScore {
    let mut score: u32 = 0;
    let mut matches: Vec<SkillMatch> = Vec::new();

    // Pass 1: skills the requester wants against skills the candidate offers
    for wanted in &requester.skills_wanted {
        for offered in &candidate.skills_offered {
            if names_match(&wanted.skill_name, &offered.skill_name) {
                score += points.skill_name_match;
                matches.push(SkillMatch {
                    direction: MatchDirection::WantedOffered,
                    skill: wanted.skill_name.clone(),
                    category: offered.category.clone(),
                });
            } else if wanted.category == offered.category {
                // Category agreement alone raises the score without producing
                // a match entry.
                score += points.category_match;
            }
        }
    }

    // Pass 2: skills the requester offers against skills the candidate wants
    for offered in &requester.skills_offered {
        for wanted in &candidate.skills_wanted {
            if names_match(&offered.skill_name, &wanted.skill_name) {
                score += points.skill_name_match;
                matches.push(SkillMatch {
                    direction: MatchDirection::OfferedWanted,
                    skill: offered.skill_name.clone(),
                    category: offered.category.clone(),
                });
            }
        }
    }

    // Location bonus: only when both sides actually declare a city
    if let (Some(a), Some(b)) = (requester_city(requester), requester_city(candidate)) {
        if a == b {
            score += points.same_city;
        }
    }

    // Timezone bonus: same gating rule
    if let (Some(a), Some(b)) = (requester.timezone.as_deref(), candidate.timezone.as_deref()) {
        if a == b {
            score += points.same_timezone;
        }
    }

    MatchScore { score, matches }
}

#[inline]
fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[inline]
fn requester_city(user: &User) -> Option<&str> {
    user.location.as_ref()?.city.as_deref()
}
