use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::taxonomy::extractor::ExtractedSkillSet;

/// A worker's extracted skills as last stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkerProfile {
    pub worker_id: String,
    pub skills: ExtractedSkillSet,
    pub updated_at: DateTime<Utc>,
}

impl WorkerProfile {
    pub fn new(worker_id: impl Into<String>, skills: ExtractedSkillSet) -> Self {
        Self {
            worker_id: worker_id.into(),
            skills,
            updated_at: Utc::now(),
        }
    }

    /// Input set for certification readiness.
    pub fn held_skill_ids(&self) -> HashSet<String> {
        self.skills.skill_ids()
    }
}
