use std::collections::HashMap;

use thiserror::Error;

use crate::core::range::parse_range;
use crate::models::{
    BudgetDurationEntry, City, CityExperienceType, RawTable, RawTables, ReferenceSnapshot, State,
};

/// Errors that make a reference load unusable
///
/// Any of these is fatal at startup: the process must not serve traffic
/// with incomplete reference data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("table `{table}` is missing required column `{column}`")]
    MissingColumn { table: String, column: String },

    #[error("table `{table}` contains no rows")]
    EmptyTable { table: String },
}

/// Per-table counts of rows dropped during normalization
///
/// Individual bad rows (blank or corrupted ids, unparseable range minima)
/// are recoverable: the row is dropped and counted here rather than
/// aborting the whole load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub states_dropped: usize,
    pub cities_dropped: usize,
    pub budget_duration_dropped: usize,
    pub city_types_dropped: usize,
}

impl LoadStats {
    pub fn total_dropped(&self) -> usize {
        self.states_dropped
            + self.cities_dropped
            + self.budget_duration_dropped
            + self.city_types_dropped
    }
}

/// Result of a successful reference load
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub snapshot: ReferenceSnapshot,
    pub stats: LoadStats,
}

/// Normalize the four raw tables into an immutable reference snapshot.
///
/// Schema checks run first so a structurally broken table fails before any
/// row work; row-level problems are dropped and counted in `LoadStats`.
pub fn load_reference_data(tables: &RawTables) -> Result<LoadOutcome, LoadError> {
    let (states, states_dropped) = parse_states(&tables.states)?;
    let (cities, cities_dropped) = parse_cities(&tables.cities)?;
    let (budget_duration, budget_duration_dropped) =
        parse_budget_duration(&tables.budget_duration)?;
    let (city_types, city_types_dropped) = parse_city_types(&tables.city_types)?;

    let stats = LoadStats {
        states_dropped,
        cities_dropped,
        budget_duration_dropped,
        city_types_dropped,
    };

    if stats.total_dropped() > 0 {
        tracing::warn!(
            "Dropped unusable reference rows: states={}, cities={}, budget_duration={}, city_types={}",
            stats.states_dropped,
            stats.cities_dropped,
            stats.budget_duration_dropped,
            stats.city_types_dropped
        );
    }

    let type_names = build_type_name_index(&city_types);

    Ok(LoadOutcome {
        snapshot: ReferenceSnapshot {
            states,
            cities,
            budget_duration,
            city_types,
            type_names,
        },
        stats,
    })
}

fn require_rows(table: &RawTable) -> Result<(), LoadError> {
    if table.rows.is_empty() {
        return Err(LoadError::EmptyTable {
            table: table.name.clone(),
        });
    }
    Ok(())
}

fn require_column(table: &RawTable, column: &str) -> Result<usize, LoadError> {
    table.column(column).ok_or_else(|| LoadError::MissingColumn {
        table: table.name.clone(),
        column: column.to_string(),
    })
}

#[inline]
fn cell<'a>(row: &'a [String], idx: usize) -> &'a str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

#[inline]
fn parse_id(raw: &str) -> Option<u32> {
    raw.trim().parse().ok()
}

fn parse_states(table: &RawTable) -> Result<(Vec<State>, usize), LoadError> {
    require_rows(table)?;
    let id_col = require_column(table, "State_ID")?;
    let name_col = require_column(table, "State_Name")?;

    let mut states = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;

    for row in &table.rows {
        match parse_id(cell(row, id_col)) {
            Some(id) => states.push(State {
                id,
                name: cell(row, name_col).trim().to_string(),
            }),
            None => dropped += 1,
        }
    }

    Ok((states, dropped))
}

fn parse_cities(table: &RawTable) -> Result<(Vec<City>, usize), LoadError> {
    require_rows(table)?;
    let id_col = require_column(table, "City_ID")?;
    let name_col = require_column(table, "City_Name")?;
    let state_col = require_column(table, "State_ID")?;

    let mut cities = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;

    for row in &table.rows {
        match (
            parse_id(cell(row, id_col)),
            parse_id(cell(row, state_col)),
        ) {
            (Some(id), Some(state_id)) => cities.push(City {
                id,
                name: cell(row, name_col).trim().to_string(),
                state_id,
            }),
            _ => dropped += 1,
        }
    }

    Ok((cities, dropped))
}

fn parse_budget_duration(table: &RawTable) -> Result<(Vec<BudgetDurationEntry>, usize), LoadError> {
    require_rows(table)?;
    let id_col = require_column(table, "City_ID")?;
    let name_col = require_column(table, "City_Name")?;
    let budget_col = require_column(table, "Budget_Range")?;
    let duration_col = require_column(table, "Duration_Range")?;

    let mut entries = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;

    for row in &table.rows {
        let parsed = parse_id(cell(row, id_col)).and_then(|city_id| {
            let budget = parse_range(cell(row, budget_col))?;
            let duration = parse_range(cell(row, duration_col))?;
            Some(BudgetDurationEntry {
                city_id,
                city_name: cell(row, name_col).trim().to_string(),
                budget,
                duration,
            })
        });

        match parsed {
            Some(entry) => entries.push(entry),
            None => dropped += 1,
        }
    }

    Ok((entries, dropped))
}

fn parse_city_types(table: &RawTable) -> Result<(Vec<CityExperienceType>, usize), LoadError> {
    require_rows(table)?;
    let city_col = require_column(table, "City_ID")?;
    let name_col = require_column(table, "City_Name")?;
    let type_col = require_column(table, "Type_ID")?;
    let type_name_col = require_column(table, "Type_Name")?;

    let mut rows = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;

    for row in &table.rows {
        match (
            parse_id(cell(row, city_col)),
            parse_id(cell(row, type_col)),
        ) {
            (Some(city_id), Some(type_id)) => rows.push(CityExperienceType {
                city_id,
                city_name: cell(row, name_col).trim().to_string(),
                type_id,
                type_name: cell(row, type_name_col).trim().to_string(),
            }),
            _ => dropped += 1,
        }
    }

    Ok((rows, dropped))
}

/// Build the type-name index from the association rows, de-duplicating
/// repeated (type_id, type_name) pairs. First occurrence wins, keeping the
/// index deterministic for a given row order.
fn build_type_name_index(rows: &[CityExperienceType]) -> HashMap<u32, String> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index
            .entry(row.type_id)
            .or_insert_with(|| row.type_name.clone());
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(name: &str, headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            name,
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn valid_tables() -> RawTables {
        RawTables {
            states: table(
                "states",
                &["State_ID", "State_Name"],
                &[&["1", "Rajasthan"], &["2", "Kerala"]],
            ),
            cities: table(
                "cities",
                &["City_ID", "City_Name", "State_ID"],
                &[&["1", "Jaipur", "1"], &["2", "Kochi", "2"]],
            ),
            budget_duration: table(
                "budget_duration",
                &["City_ID", "City_Name", "Budget_Range", "Duration_Range"],
                &[
                    &["1", "Jaipur", "10000-20000", "2-4 days"],
                    &["2", "Kochi", "12000-25000", "3-5 days"],
                ],
            ),
            city_types: table(
                "city_types",
                &["City_ID", "City_Name", "Type_ID", "Type_Name"],
                &[
                    &["1", "Jaipur", "1", "Heritage"],
                    &["1", "Jaipur", "2", "Adventure"],
                    &["2", "Kochi", "3", "Beach"],
                ],
            ),
        }
    }

    #[test]
    fn test_load_valid_tables() {
        let outcome = load_reference_data(&valid_tables()).unwrap();

        assert_eq!(outcome.snapshot.states.len(), 2);
        assert_eq!(outcome.snapshot.cities.len(), 2);
        assert_eq!(outcome.snapshot.budget_duration.len(), 2);
        assert_eq!(outcome.snapshot.city_types.len(), 3);
        assert_eq!(outcome.stats.total_dropped(), 0);

        let jaipur = &outcome.snapshot.budget_duration[0];
        assert_eq!(jaipur.budget.min, 10000.0);
        assert_eq!(jaipur.budget.max, 20000.0);
        assert_eq!(jaipur.duration.min, 2.0);
        assert_eq!(jaipur.duration.max, 4.0);
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let mut tables = valid_tables();
        tables.budget_duration = table(
            "budget_duration",
            &["City_ID", "City_Name", "Budget_Range"],
            &[&["1", "Jaipur", "10000-20000"]],
        );

        let err = load_reference_data(&tables).unwrap_err();
        match err {
            LoadError::MissingColumn { table, column } => {
                assert_eq!(table, "budget_duration");
                assert_eq!(column, "Duration_Range");
            }
            other => panic!("expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_table_is_fatal() {
        let mut tables = valid_tables();
        tables.cities = table("cities", &["City_ID", "City_Name", "State_ID"], &[]);

        let err = load_reference_data(&tables).unwrap_err();
        assert!(matches!(err, LoadError::EmptyTable { table } if table == "cities"));
    }

    #[test]
    fn test_bad_rows_dropped_and_counted() {
        let mut tables = valid_tables();
        tables.budget_duration = table(
            "budget_duration",
            &["City_ID", "City_Name", "Budget_Range", "Duration_Range"],
            &[
                &["1", "Jaipur", "10000-20000", "2-4 days"],
                &["", "Ghost", "10000-20000", "2-4 days"],
                &["3", "Panaji", "n/a", "3-6 days"],
            ],
        );
        tables.city_types = table(
            "city_types",
            &["City_ID", "City_Name", "Type_ID", "Type_Name"],
            &[
                &["1", "Jaipur", "1", "Heritage"],
                &["1", "Jaipur", "x", "Broken"],
            ],
        );

        let outcome = load_reference_data(&tables).unwrap();
        assert_eq!(outcome.snapshot.budget_duration.len(), 1);
        assert_eq!(outcome.stats.budget_duration_dropped, 2);
        assert_eq!(outcome.snapshot.city_types.len(), 1);
        assert_eq!(outcome.stats.city_types_dropped, 1);
    }

    #[test]
    fn test_single_value_range_normalizes_to_min_max() {
        let mut tables = valid_tables();
        tables.budget_duration = table(
            "budget_duration",
            &["City_ID", "City_Name", "Budget_Range", "Duration_Range"],
            &[&["1", "Jaipur", "15000", "5"]],
        );

        let outcome = load_reference_data(&tables).unwrap();
        let entry = &outcome.snapshot.budget_duration[0];
        assert_eq!(entry.budget.min, 15000.0);
        assert_eq!(entry.budget.max, 15000.0);
        assert_eq!(entry.duration.min, 5.0);
        assert_eq!(entry.duration.max, 5.0);
    }

    #[test]
    fn test_type_name_index_deduplicates() {
        let outcome = load_reference_data(&valid_tables()).unwrap();
        let index = &outcome.snapshot.type_names;

        assert_eq!(index.len(), 3);
        assert_eq!(index.get(&1).map(String::as_str), Some("Heritage"));
        assert_eq!(index.get(&3).map(String::as_str), Some("Beach"));
    }

    #[test]
    fn test_duplicate_type_rows_keep_first_name() {
        let mut tables = valid_tables();
        tables.city_types = table(
            "city_types",
            &["City_ID", "City_Name", "Type_ID", "Type_Name"],
            &[
                &["1", "Jaipur", "1", "Heritage"],
                &["2", "Kochi", "1", "Heritage"],
                &["2", "Kochi", "1", "History"],
            ],
        );

        let outcome = load_reference_data(&tables).unwrap();
        assert_eq!(
            outcome.snapshot.type_names.get(&1).map(String::as_str),
            Some("Heritage")
        );
    }
}
