use crate::models::{MatchFilters, Person, Role, ScoringWeights};
use crate::core::filters::matches_query;

/// Calculate the integer compatibility score of a candidate
///
/// Scoring table (default weights):
/// ```text
/// role matches roleNeeded                  +3
/// subject taught                           +4
/// grade fits the search direction          +2  (otherwise -2)
/// overlapping timeslots                    +min(3, overlap)
/// onlyVerified and candidate verified      +1
/// candidate is a mentor                    +round(rating)
/// non-empty query found in the haystack    +2
/// ```
///
/// Role is rewarded here but not enforced; exclusion happens in
/// `passes_filters`. The rating bonus follows the candidate's own role,
/// independent of `roleNeeded`.
pub fn calculate_match_score(
    candidate: &Person,
    filters: &MatchFilters,
    weights: &ScoringWeights,
) -> i32 {
    let mut score = 0;

    if candidate.role == filters.role_needed {
        score += weights.role;
    }

    if candidate.teaches(&filters.subject_id) {
        score += weights.subject;
    }

    score += calculate_grade_score(candidate.grade, filters, weights);
    score += calculate_overlap_score(candidate, filters, weights);

    if filters.only_verified && candidate.verified {
        score += weights.verified;
    }

    if candidate.role == Role::Mentor {
        score += rating_bonus(candidate.rating);
    }

    if let Some(query) = filters.normalized_query() {
        if matches_query(candidate, &query) {
            score += weights.query;
        }
    }

    score
}

/// Mentors should be older than the seeker, students younger
#[inline]
fn calculate_grade_score(grade: u8, filters: &MatchFilters, weights: &ScoringWeights) -> i32 {
    let grade = i32::from(grade);
    let seeker = i32::from(filters.seeker_grade);

    let fits = match filters.role_needed {
        Role::Mentor => grade >= seeker + 1,
        Role::Student => grade <= seeker - 1,
    };

    if fits {
        weights.grade_fit
    } else {
        -weights.grade_misfit
    }
}

#[inline]
fn calculate_overlap_score(candidate: &Person, filters: &MatchFilters, weights: &ScoringWeights) -> i32 {
    let overlap = candidate
        .available
        .iter()
        .filter(|slot| filters.time_ids.contains(slot))
        .count();

    // Bounded by the cap, the cast cannot truncate
    overlap.min(weights.overlap_cap) as i32
}

/// Rating rounded to whole stars
#[inline]
pub fn rating_bonus(rating: f64) -> i32 {
    rating.round() as i32
}
