use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::sync::Arc;

use thiserror::Error;

use crate::core::{
    filters::{filter_budget_duration, group_matching_types},
    scoring::{match_score, matching_type_names},
};
use crate::models::{CityMatch, ReferenceSnapshot, TravelQuery};

/// Query rejections surfaced to the caller
///
/// The boundary layer validates requests before they reach the engine,
/// but the engine guards its own invariants as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("budget must be a non-negative number")]
    InvalidBudget,

    #[error("duration must be a non-negative number")]
    InvalidDuration,

    #[error("experience_types must be a non-empty list of IDs")]
    EmptyExperienceTypes,
}

/// Main matching orchestrator - executes one query against the shared
/// reference snapshot
///
/// # Pipeline Stages
/// 1. Budget/duration range containment filter
/// 2. Experience-type filter, grouped per city
/// 3. Intersection of the two candidate sets
/// 4. Overlap scoring
/// 5. Matching type-name resolution
/// 6. Deterministic ordering
///
/// The matcher is stateless and reentrant: any number of queries may run
/// concurrently against the same snapshot, which is never mutated after
/// the loader finishes.
#[derive(Debug, Clone)]
pub struct Matcher {
    snapshot: Arc<ReferenceSnapshot>,
}

impl Matcher {
    pub fn new(snapshot: Arc<ReferenceSnapshot>) -> Self {
        Self { snapshot }
    }

    /// The reference snapshot this matcher serves
    pub fn snapshot(&self) -> &ReferenceSnapshot {
        &self.snapshot
    }

    /// Rank the cities matching a trip query.
    ///
    /// A city is returned iff at least one budget/duration row contains
    /// both queried values and the city offers at least one requested
    /// experience type. An empty list is a valid result, not an error.
    pub fn recommend(&self, query: &TravelQuery) -> Result<Vec<CityMatch>, QueryError> {
        if !query.budget.is_finite() || query.budget < 0.0 {
            return Err(QueryError::InvalidBudget);
        }
        if !query.duration.is_finite() || query.duration < 0.0 {
            return Err(QueryError::InvalidDuration);
        }

        // Duplicate requested ids must not inflate scores
        let requested: BTreeSet<u32> = query.experience_types.iter().copied().collect();
        if requested.is_empty() {
            return Err(QueryError::EmptyExperienceTypes);
        }

        // Stage 1: range containment filter
        let candidates =
            filter_budget_duration(&self.snapshot.budget_duration, query.budget, query.duration);

        // Stage 2: type filter, grouped per city
        let grouped = group_matching_types(&self.snapshot.city_types, &requested);

        // Stages 3-5: intersect, score, resolve names
        let mut matches: Vec<CityMatch> = candidates
            .into_iter()
            .filter_map(|(city_id, city_name)| {
                let overlap = grouped.get(&city_id)?;
                Some(CityMatch {
                    name: city_name,
                    match_score: match_score(requested.len(), overlap.len()),
                    matching_types: matching_type_names(overlap, &self.snapshot.type_names),
                })
            })
            .collect();

        // Stage 6: score descending, ties broken by city name ascending
        matches.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.name.cmp(&b.name))
        });

        Ok(matches)
    }
}
