use std::collections::HashSet;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::certification::readiness::CertificationMatch;
use crate::errors::AppError;
use crate::state::AppState;
use crate::taxonomy::catalog::CertificationRequirement;

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub name: String,
}

#[derive(Serialize)]
pub struct ResolveResponse {
    pub requirement_name: String,
    pub skill_ids: Vec<String>,
    pub resolved: bool,
}

#[derive(Deserialize)]
pub struct ReadinessRequest {
    pub held_skill_ids: HashSet<String>,
    pub requirement_names: Vec<String>,
}

/// GET /api/v1/requirements/resolve?name=
pub async fn handle_resolve(
    State(state): State<AppState>,
    Query(params): Query<ResolveQuery>,
) -> Result<Json<ResolveResponse>, AppError> {
    if params.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    let skill_ids: Vec<String> = state.engine.resolve(&params.name).into_iter().collect();
    Ok(Json(ResolveResponse {
        resolved: !skill_ids.is_empty(),
        requirement_name: params.name,
        skill_ids,
    }))
}

/// POST /api/v1/readiness
pub async fn handle_readiness(
    State(state): State<AppState>,
    Json(req): Json<ReadinessRequest>,
) -> Json<CertificationMatch> {
    Json(
        state
            .engine
            .compute_readiness(&req.held_skill_ids, &req.requirement_names),
    )
}

/// GET /api/v1/certifications
pub async fn handle_list_certifications(
    State(state): State<AppState>,
) -> Json<Vec<CertificationRequirement>> {
    Json(state.engine.taxonomy().certifications().to_vec())
}
