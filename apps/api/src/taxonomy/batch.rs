//! Multi-worker extraction. Each worker's lines are independent, so the per-worker
//! work fans out over rayon; results come back in input order.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::taxonomy::extractor::{extract_all, ExtractedSkillSet, TierCounts};
use crate::taxonomy::mapper::TaskMapper;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerLines {
    pub worker_id: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerExtraction {
    pub worker_id: String,
    pub skills: ExtractedSkillSet,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub total_workers: usize,
    pub workers_with_skills: usize,
    pub total_skills_mapped: usize,
    /// Over workers with at least one skill.
    pub avg_skills_per_worker: f64,
    /// Mean of per-worker average confidence, over workers with at least one skill.
    pub avg_confidence: f64,
    pub tier_counts: TierCounts,
    pub workers: Vec<WorkerExtraction>,
    pub generated_at: DateTime<Utc>,
}

pub fn summarize_batch(mapper: &TaskMapper<'_>, workers: &[WorkerLines]) -> BatchSummary {
    let extractions: Vec<WorkerExtraction> = workers
        .par_iter()
        .map(|w| WorkerExtraction {
            worker_id: w.worker_id.clone(),
            skills: extract_all(mapper, &w.lines),
        })
        .collect();

    let mut workers_with_skills = 0;
    let mut total_skills_mapped = 0;
    let mut confidence_sum = 0.0;
    let mut tier_counts = TierCounts::default();

    for extraction in &extractions {
        if extraction.skills.is_empty() {
            continue;
        }
        workers_with_skills += 1;
        total_skills_mapped += extraction.skills.len();
        confidence_sum += extraction.skills.average_confidence();
        tier_counts.merge(&extraction.skills.tier_counts);
    }

    let (avg_skills_per_worker, avg_confidence) = if workers_with_skills > 0 {
        (
            total_skills_mapped as f64 / workers_with_skills as f64,
            confidence_sum / workers_with_skills as f64,
        )
    } else {
        (0.0, 0.0)
    };

    let summary = BatchSummary {
        batch_id: Uuid::new_v4(),
        total_workers: workers.len(),
        workers_with_skills,
        total_skills_mapped,
        avg_skills_per_worker,
        avg_confidence,
        tier_counts,
        workers: extractions,
        generated_at: Utc::now(),
    };

    info!(
        batch_id = %summary.batch_id,
        total_workers = summary.total_workers,
        workers_with_skills,
        total_skills_mapped,
        "batch extraction complete"
    );

    summary
}
