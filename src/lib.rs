//! Trip Match - city recommendation service for trip planning
//!
//! This library provides the matching core used by the trip-match API.
//! Four small reference tables are normalized once at startup into an
//! immutable snapshot; each query runs a filter-join-score-sort pipeline
//! over that snapshot to produce a ranked list of cities.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{
    load_reference_data, parse_range, LoadError, LoadOutcome, LoadStats, Matcher, QueryError,
};
pub use models::{
    CityMatch, RawTable, RawTables, RecommendCitiesRequest, ReferenceSnapshot, TravelQuery,
};
