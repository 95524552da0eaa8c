use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::Matcher;
use crate::models::{
    ErrorResponse, HealthResponse, ReadyResponse, RecommendCitiesRequest, TravelQuery,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: Matcher,
}

/// Configure city recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/cities", web::post().to(recommend_cities));
}

/// Configure liveness/readiness probes
pub fn configure_health(cfg: &mut web::ServiceConfig) {
    cfg.route("/live", web::get().to(live))
        .route("/ready", web::get().to(ready));
}

/// Liveness probe
async fn live() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe
///
/// The server only starts after the reference snapshot has loaded, so a
/// reachable instance is by construction ready; the response reports the
/// loaded table sizes for operability.
async fn ready(state: web::Data<AppState>) -> impl Responder {
    let snapshot = state.matcher.snapshot();

    HttpResponse::Ok().json(ReadyResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        states: snapshot.states.len(),
        cities: snapshot.cities.len(),
        budget_duration_entries: snapshot.budget_duration.len(),
        city_type_entries: snapshot.city_types.len(),
    })
}

/// Recommend cities endpoint
///
/// POST /api/cities
///
/// Request body:
/// ```json
/// {
///   "budget": 15000,
///   "duration": 3,
///   "experience_types": [1, 2]
/// }
/// ```
///
/// Returns a ranked list of `{name, match_score, matching_types}` records.
async fn recommend_cities(
    state: web::Data<AppState>,
    req: web::Json<RecommendCitiesRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for recommend request: {}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = TravelQuery::from(req.into_inner());

    tracing::debug!(
        "Recommending cities for budget={}, duration={}, {} requested types",
        query.budget,
        query.duration,
        query.experience_types.len()
    );

    match state.matcher.recommend(&query) {
        Ok(matches) => {
            tracing::info!("Returning {} city matches", matches.len());
            HttpResponse::Ok().json(matches)
        }
        Err(e) => {
            tracing::info!("Rejected query: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid query".to_string(),
                message: e.to_string(),
                status_code: 400,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BudgetDurationEntry, CityExperienceType, CityMatch, RangeBounds, ReferenceSnapshot,
    };
    use actix_web::{test, App};
    use std::collections::HashMap;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let city_types = vec![
            CityExperienceType {
                city_id: 1,
                city_name: "Jaipur".to_string(),
                type_id: 1,
                type_name: "Heritage".to_string(),
            },
            CityExperienceType {
                city_id: 1,
                city_name: "Jaipur".to_string(),
                type_id: 2,
                type_name: "Adventure".to_string(),
            },
        ];

        let mut type_names = HashMap::new();
        for row in &city_types {
            type_names
                .entry(row.type_id)
                .or_insert_with(|| row.type_name.clone());
        }

        let snapshot = Arc::new(ReferenceSnapshot {
            states: vec![],
            cities: vec![],
            budget_duration: vec![BudgetDurationEntry {
                city_id: 1,
                city_name: "Jaipur".to_string(),
                budget: RangeBounds::new(10000.0, 20000.0),
                duration: RangeBounds::new(2.0, 4.0),
            }],
            city_types,
            type_names,
        });

        AppState {
            matcher: Matcher::new(snapshot),
        }
    }

    #[actix_web::test]
    async fn test_recommend_cities_returns_matches() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cities")
            .set_json(serde_json::json!({
                "budget": 15000,
                "duration": 3,
                "experience_types": [1, 2]
            }))
            .to_request();

        let matches: Vec<CityMatch> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Jaipur");
        assert_eq!(matches[0].match_score, 100.0);
        assert_eq!(matches[0].matching_types, vec!["Adventure", "Heritage"]);
    }

    #[actix_web::test]
    async fn test_recommend_cities_rejects_empty_types() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/cities")
            .set_json(serde_json::json!({
                "budget": 15000,
                "duration": 3,
                "experience_types": []
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_liveness_probe() {
        let app = test::init_service(App::new().configure(configure_health)).await;

        let req = test::TestRequest::get().uri("/live").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "ok");
    }

    #[actix_web::test]
    async fn test_readiness_reports_table_sizes() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_state()))
                .configure(configure_health),
        )
        .await;

        let req = test::TestRequest::get().uri("/ready").to_request();
        let body: ReadyResponse = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.status, "ready");
        assert_eq!(body.budget_duration_entries, 1);
        assert_eq!(body.city_type_entries, 2);
    }
}
