use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// State or union territory reference row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct State {
    pub id: u32,
    pub name: String,
}

/// City reference row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct City {
    pub id: u32,
    pub name: String,
    pub state_id: u32,
}

/// Inclusive numeric bounds decoded from a range string like "10000-20000"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: f64,
    pub max: f64,
}

impl RangeBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the value falls within the bounds, endpoints included
    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-city budget and duration ranges, one row per source entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetDurationEntry {
    pub city_id: u32,
    pub city_name: String,
    pub budget: RangeBounds,
    pub duration: RangeBounds,
}

/// City-to-experience-type association row
///
/// (city_id, type_id) pairs are not unique in the source data; the loader
/// keeps the rows as-is and de-duplicates only when building the type-name
/// index and when grouping per query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityExperienceType {
    pub city_id: u32,
    pub city_name: String,
    pub type_id: u32,
    pub type_name: String,
}

/// Immutable, normalized copy of the four reference tables
///
/// Built once at startup by the loader and shared read-only across all
/// requests for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSnapshot {
    pub states: Vec<State>,
    pub cities: Vec<City>,
    pub budget_duration: Vec<BudgetDurationEntry>,
    pub city_types: Vec<CityExperienceType>,
    /// Canonical display name per experience type id
    pub type_names: HashMap<u32, String>,
}

/// A single validated recommendation query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelQuery {
    pub budget: f64,
    pub duration: f64,
    pub experience_types: Vec<u32>,
}

/// Ranked recommendation result for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMatch {
    pub name: String,
    pub match_score: f64,
    pub matching_types: Vec<String>,
}

/// One raw tabular source, as read from disk: a header row plus string cells
#[derive(Debug, Clone)]
pub struct RawTable {
    /// Table name used in error messages and logs
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(name: impl Into<String>, headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Index of a named column, if present
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

/// The four raw tables the loader consumes
#[derive(Debug, Clone)]
pub struct RawTables {
    pub states: RawTable,
    pub cities: RawTable,
    pub budget_duration: RawTable,
    pub city_types: RawTable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds_contains_endpoints() {
        let bounds = RangeBounds::new(1000.0, 2000.0);
        assert!(bounds.contains(1000.0));
        assert!(bounds.contains(2000.0));
        assert!(bounds.contains(1500.0));
        assert!(!bounds.contains(999.99));
        assert!(!bounds.contains(2000.01));
    }

    #[test]
    fn test_raw_table_column_lookup() {
        let table = RawTable::new(
            "cities",
            vec!["City_ID".to_string(), "City_Name".to_string()],
            vec![],
        );

        assert_eq!(table.column("City_ID"), Some(0));
        assert_eq!(table.column("City_Name"), Some(1));
        assert_eq!(table.column("State_ID"), None);
    }
}
