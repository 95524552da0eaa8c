// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BudgetDurationEntry, City, CityExperienceType, CityMatch, RangeBounds, RawTable, RawTables,
    ReferenceSnapshot, State, TravelQuery,
};
pub use requests::RecommendCitiesRequest;
pub use responses::{ErrorResponse, HealthResponse, ReadyResponse};
