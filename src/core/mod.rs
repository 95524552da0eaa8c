// Core algorithm exports
pub mod filters;
pub mod loader;
pub mod matcher;
pub mod range;
pub mod scoring;

pub use filters::{entry_covers, filter_budget_duration, group_matching_types};
pub use loader::{load_reference_data, LoadError, LoadOutcome, LoadStats};
pub use matcher::{Matcher, QueryError};
pub use range::parse_range;
pub use scoring::{match_score, matching_type_names};
