use crate::models::{MatchFilters, Person, ScoredCandidate, ScoringWeights};
use crate::core::{
    filters::{passes_filters, shared_timeslots},
    scoring::calculate_match_score,
};

/// Result of the ranking process
#[derive(Debug)]
pub struct RankResult {
    pub matches: Vec<ScoredCandidate>,
    pub total_candidates: usize,
}

/// Ranking orchestrator
///
/// # Pipeline Stages
/// 1. Hard filters (role, verification, subject, free-text query)
/// 2. Scoring
/// 3. Stable sort by score, descending
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single candidate without filtering it
    pub fn score(&self, filters: &MatchFilters, candidate: &Person) -> i32 {
        calculate_match_score(candidate, filters, &self.weights)
    }

    /// Filter, score and rank a candidate pool
    ///
    /// Candidates with equal scores keep their order from `pool`.
    pub fn rank(&self, filters: &MatchFilters, pool: &[Person]) -> RankResult {
        let mut matches: Vec<ScoredCandidate> = pool
            .iter()
            .filter(|candidate| passes_filters(candidate, filters))
            .map(|candidate| ScoredCandidate {
                score: calculate_match_score(candidate, filters, &self.weights),
                shared_timeslots: shared_timeslots(candidate, filters),
                person: candidate.clone(),
            })
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::debug!(
            "Ranked {} of {} candidates for subject {}",
            matches.len(),
            pool.len(),
            filters.subject_id
        );

        RankResult {
            matches,
            total_candidates: pool.len(),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
