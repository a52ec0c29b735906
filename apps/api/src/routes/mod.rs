pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::certification::handlers as certification;
use crate::state::AppState;
use crate::taxonomy::handlers as taxonomy;
use crate::workers::handlers as workers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Taxonomy API
        .route("/api/v1/taxonomy/stats", get(taxonomy::handle_taxonomy_stats))
        .route("/api/v1/skills/:skill_id", get(taxonomy::handle_get_skill))
        .route("/api/v1/normalize", post(taxonomy::handle_normalize))
        .route("/api/v1/score", post(taxonomy::handle_score))
        .route("/api/v1/map", post(taxonomy::handle_map))
        .route("/api/v1/map/batch", post(taxonomy::handle_map_batch))
        .route("/api/v1/extract", post(taxonomy::handle_extract))
        .route("/api/v1/batch", post(taxonomy::handle_batch))
        // Certification API
        .route(
            "/api/v1/requirements/resolve",
            get(certification::handle_resolve),
        )
        .route("/api/v1/readiness", post(certification::handle_readiness))
        .route(
            "/api/v1/certifications",
            get(certification::handle_list_certifications),
        )
        // Worker profiles
        .route("/api/v1/workers", get(workers::handle_list_workers))
        .route(
            "/api/v1/workers/:worker_id/skills",
            get(workers::handle_get_worker_skills).put(workers::handle_put_worker_skills),
        )
        .route(
            "/api/v1/workers/:worker_id/readiness",
            get(workers::handle_worker_readiness),
        )
        .with_state(state)
}
