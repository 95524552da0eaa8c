use std::collections::{BTreeSet, HashMap};

/// Calculate the match score (0-100) for a city.
///
/// Scoring formula:
/// ```text
/// score = |requested ∩ city_types| / |requested| * 100
/// ```
/// This is recall against the request: a city offering every requested
/// type scores 100 regardless of how many extra, unrequested types it has.
/// The result is rounded to 2 decimal places.
pub fn match_score(requested_count: usize, overlap_count: usize) -> f64 {
    if requested_count == 0 {
        return 0.0;
    }

    let raw = overlap_count as f64 / requested_count as f64 * 100.0;
    round2(raw)
}

/// Display names for the overlapping types, de-duplicated and sorted
/// lexicographically. Unknown type ids fall back to their stringified id.
pub fn matching_type_names(
    overlap: &BTreeSet<u32>,
    type_names: &HashMap<u32, String>,
) -> Vec<String> {
    let names: BTreeSet<String> = overlap
        .iter()
        .map(|id| {
            type_names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string())
        })
        .collect();

    names.into_iter().collect()
}

#[inline]
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
