use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::state::AppState;
use crate::taxonomy::batch::{BatchSummary, WorkerLines};
use crate::taxonomy::catalog::{Skill, TaxonomyStats};
use crate::taxonomy::extractor::ExtractedSkillSet;
use crate::taxonomy::mapper::MappingResult;
use crate::taxonomy::similarity::ScoreBreakdown;

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub text: String,
    pub phrase: String,
}

#[derive(Deserialize)]
pub struct LinesRequest {
    pub lines: Vec<String>,
}

#[derive(Deserialize)]
pub struct BatchRequest {
    pub workers: Vec<WorkerLines>,
}

#[derive(Serialize)]
pub struct NormalizeResponse {
    pub text: String,
    pub normalized: String,
}

#[derive(Serialize)]
pub struct MapBatchResponse {
    pub results: Vec<MappingResult>,
}

/// GET /api/v1/taxonomy/stats
pub async fn handle_taxonomy_stats(State(state): State<AppState>) -> Json<TaxonomyStats> {
    Json(state.engine.taxonomy().stats())
}

/// GET /api/v1/skills/:skill_id
pub async fn handle_get_skill(
    State(state): State<AppState>,
    Path(skill_id): Path<String>,
) -> Result<Json<Skill>, AppError> {
    state
        .engine
        .taxonomy()
        .skill(&skill_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Skill {skill_id} not found")))
}

/// POST /api/v1/normalize
pub async fn handle_normalize(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Json<NormalizeResponse> {
    let normalized = state.engine.normalize(&req.text);
    Json(NormalizeResponse {
        text: req.text,
        normalized,
    })
}

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(req): Json<ScoreRequest>,
) -> Json<ScoreBreakdown> {
    Json(state.engine.score(&req.text, &req.phrase))
}

/// POST /api/v1/map
pub async fn handle_map(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Json<MappingResult> {
    Json(state.engine.map_task(&req.text))
}

/// POST /api/v1/map/batch
pub async fn handle_map_batch(
    State(state): State<AppState>,
    Json(req): Json<LinesRequest>,
) -> Json<MapBatchResponse> {
    Json(MapBatchResponse {
        results: state.engine.batch_map(&req.lines),
    })
}

/// POST /api/v1/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<LinesRequest>,
) -> Json<ExtractedSkillSet> {
    Json(state.engine.extract_all(&req.lines))
}

/// POST /api/v1/batch
pub async fn handle_batch(
    State(state): State<AppState>,
    Json(req): Json<BatchRequest>,
) -> Result<Json<BatchSummary>, AppError> {
    let limit = state.config.max_batch_workers;
    if req.workers.len() > limit {
        return Err(AppError::Validation(format!(
            "batch has {} workers; the limit is {limit}",
            req.workers.len()
        )));
    }
    if let Some(i) = req.workers.iter().position(|w| w.worker_id.trim().is_empty()) {
        return Err(AppError::Validation(format!("workers[{i}].worker_id is empty")));
    }

    // rayon fan-out; keep it off the async workers.
    let engine = state.engine.clone();
    let summary = tokio::task::spawn_blocking(move || engine.summarize_batch(&req.workers))
        .await
        .map_err(anyhow::Error::from)?;
    Ok(Json(summary))
}
