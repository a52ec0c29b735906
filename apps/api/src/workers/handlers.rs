use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::certification::readiness::CertificationMatch;
use crate::errors::AppError;
use crate::models::worker::WorkerProfile;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct PutSkillsRequest {
    pub lines: Vec<String>,
}

#[derive(Serialize)]
pub struct WorkerReadinessResponse {
    pub worker_id: String,
    pub held_skill_ids: Vec<String>,
    pub certifications: Vec<CertificationMatch>,
}

#[derive(Serialize)]
pub struct WorkerListResponse {
    pub worker_ids: Vec<String>,
}

async fn load_profile(state: &AppState, worker_id: &str) -> Result<WorkerProfile, AppError> {
    state
        .store
        .get(worker_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Worker {worker_id} not found")))
}

/// PUT /api/v1/workers/:worker_id/skills
/// Replaces the worker's stored skills with those extracted from `lines`.
pub async fn handle_put_worker_skills(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
    Json(req): Json<PutSkillsRequest>,
) -> Result<Json<WorkerProfile>, AppError> {
    if worker_id.trim().is_empty() {
        return Err(AppError::Validation("worker_id must not be empty".to_string()));
    }

    let skills = state.engine.extract_all(&req.lines);
    let profile = WorkerProfile::new(worker_id, skills);
    state.store.put(profile.clone()).await?;

    info!(
        worker_id = %profile.worker_id,
        skills = profile.skills.len(),
        unmapped = profile.skills.unmapped_lines,
        "stored worker skills"
    );
    Ok(Json(profile))
}

/// GET /api/v1/workers
pub async fn handle_list_workers(
    State(state): State<AppState>,
) -> Result<Json<WorkerListResponse>, AppError> {
    let worker_ids = state.store.list_ids().await?;
    Ok(Json(WorkerListResponse { worker_ids }))
}

/// GET /api/v1/workers/:worker_id/skills
pub async fn handle_get_worker_skills(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Result<Json<WorkerProfile>, AppError> {
    Ok(Json(load_profile(&state, &worker_id).await?))
}

/// GET /api/v1/workers/:worker_id/readiness
pub async fn handle_worker_readiness(
    State(state): State<AppState>,
    Path(worker_id): Path<String>,
) -> Result<Json<WorkerReadinessResponse>, AppError> {
    let profile = load_profile(&state, &worker_id).await?;
    let held = profile.held_skill_ids();
    let certifications = state.engine.readiness_for_catalog(&held);

    let mut held_skill_ids: Vec<String> = held.into_iter().collect();
    held_skill_ids.sort();

    Ok(Json(WorkerReadinessResponse {
        worker_id,
        held_skill_ids,
        certifications,
    }))
}
