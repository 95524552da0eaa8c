use std::collections::{BTreeSet, HashMap, HashSet};

use crate::models::{BudgetDurationEntry, CityExperienceType};

/// Check if a budget/duration entry covers the queried trip
///
/// Both conditions must hold on the same row: a city with one row matching
/// the budget and a different row matching the duration does not qualify.
#[inline]
pub fn entry_covers(entry: &BudgetDurationEntry, budget: f64, duration: f64) -> bool {
    entry.budget.contains(budget) && entry.duration.contains(duration)
}

/// Stage 1 of the pipeline: range containment filter.
///
/// Returns the distinct (city_id, city_name) pairs whose budget and
/// duration ranges both contain the queried values. A city may have
/// several qualifying rows in the raw data; only the first is kept, and
/// encounter order is preserved so downstream output stays deterministic.
pub fn filter_budget_duration(
    entries: &[BudgetDurationEntry],
    budget: f64,
    duration: f64,
) -> Vec<(u32, String)> {
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();

    for entry in entries {
        if entry_covers(entry, budget, duration) && seen.insert(entry.city_id) {
            candidates.push((entry.city_id, entry.city_name.clone()));
        }
    }

    candidates
}

/// Stage 2 of the pipeline: experience-type filter and grouping.
///
/// Keeps only the association rows whose type id is in the requested set,
/// grouped into a de-duplicated id-set per city.
pub fn group_matching_types(
    rows: &[CityExperienceType],
    requested: &BTreeSet<u32>,
) -> HashMap<u32, BTreeSet<u32>> {
    let mut grouped: HashMap<u32, BTreeSet<u32>> = HashMap::new();

    for row in rows {
        if requested.contains(&row.type_id) {
            grouped.entry(row.city_id).or_default().insert(row.type_id);
        }
    }

    grouped
}
