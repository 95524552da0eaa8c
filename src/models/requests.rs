use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::TravelQuery;

/// Request to recommend cities for a trip
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendCitiesRequest {
    #[validate(range(min = 0.0, message = "budget must be a non-negative number"))]
    pub budget: f64,
    #[validate(range(min = 0.0, message = "duration must be a non-negative number"))]
    pub duration: f64,
    #[validate(length(min = 1, message = "experience_types must be a non-empty list of IDs"))]
    pub experience_types: Vec<u32>,
}

impl From<RecommendCitiesRequest> for TravelQuery {
    fn from(req: RecommendCitiesRequest) -> Self {
        TravelQuery {
            budget: req.budget,
            duration: req.duration,
            experience_types: req.experience_types,
        }
    }
}
