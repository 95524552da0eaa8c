// Route exports
pub mod recommend;

use actix_web::web;

pub use recommend::AppState;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api").configure(recommend::configure))
        .service(web::scope("/health").configure(recommend::configure_health));
}
