//! Skill Engine: the synchronous core shared by every handler.
//!
//! Owns the reference tables and the scorer behind `Arc`s so `AppState` can clone
//! it per request. Holds no mutable state and does no I/O.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use crate::certification::readiness::{CertificationMatch, ReadinessCalculator};
use crate::certification::resolver::RequirementResolver;
use crate::taxonomy::batch::{self, BatchSummary, WorkerLines};
use crate::taxonomy::catalog::{CertificationRequirement, Taxonomy};
use crate::taxonomy::extractor::{self, ExtractedSkillSet};
use crate::taxonomy::mapper::{MappingResult, TaskMapper};
use crate::taxonomy::normalize;
use crate::taxonomy::similarity::{ScoreBreakdown, SimilarityScorer};

#[derive(Debug, Clone)]
pub struct SkillEngine {
    taxonomy: Arc<Taxonomy>,
    scorer: Arc<SimilarityScorer>,
}

impl SkillEngine {
    /// The scorer uses the taxonomy's own keyword lexicon.
    pub fn new(taxonomy: Taxonomy) -> Self {
        let scorer = SimilarityScorer::new(taxonomy.keywords());
        Self {
            taxonomy: Arc::new(taxonomy),
            scorer: Arc::new(scorer),
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize::normalize(text)
    }

    /// Per-signal similarity between free text and an arbitrary phrase.
    pub fn score(&self, text: &str, phrase: &str) -> ScoreBreakdown {
        self.scorer.breakdown(text, phrase)
    }

    pub fn map_task(&self, text: &str) -> MappingResult {
        self.mapper().map(text)
    }

    pub fn batch_map<S: AsRef<str>>(&self, lines: &[S]) -> Vec<MappingResult> {
        self.mapper().map_batch(lines)
    }

    pub fn extract_all<S: AsRef<str>>(&self, lines: &[S]) -> ExtractedSkillSet {
        extractor::extract_all(&self.mapper(), lines)
    }

    pub fn summarize_batch(&self, workers: &[WorkerLines]) -> BatchSummary {
        batch::summarize_batch(&self.mapper(), workers)
    }

    pub fn resolve(&self, requirement_name: &str) -> BTreeSet<String> {
        RequirementResolver::new(&self.taxonomy).resolve(requirement_name)
    }

    pub fn compute_readiness<S: AsRef<str>>(
        &self,
        held_skill_ids: &HashSet<String>,
        requirement_names: &[S],
    ) -> CertificationMatch {
        self.calculator().compute(held_skill_ids, requirement_names)
    }

    pub fn rank_certifications(
        &self,
        certifications: &[CertificationRequirement],
        held_skill_ids: &HashSet<String>,
    ) -> Vec<CertificationMatch> {
        self.calculator().rank(certifications, held_skill_ids)
    }

    /// Ranks every certification the taxonomy ships with.
    pub fn readiness_for_catalog(&self, held_skill_ids: &HashSet<String>) -> Vec<CertificationMatch> {
        self.rank_certifications(self.taxonomy.certifications(), held_skill_ids)
    }

    fn mapper(&self) -> TaskMapper<'_> {
        TaskMapper::new(&self.taxonomy, &self.scorer)
    }

    fn calculator(&self) -> ReadinessCalculator<'_> {
        ReadinessCalculator::new(RequirementResolver::new(&self.taxonomy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::mapper::ConfidenceTier;

    fn engine() -> SkillEngine {
        SkillEngine::new(Taxonomy::bundled().unwrap())
    }

    #[test]
    fn test_engine_is_send_sync_and_clone() {
        fn assert_traits<T: Send + Sync + Clone>() {}
        assert_traits::<SkillEngine>();
    }

    #[test]
    fn test_extract_then_rank_against_catalog() {
        let engine = engine();
        let skills = engine.extract_all(&[
            "Milking dairy cows by hand",
            "Milking cows using machines",
            "Feeding cattle and livestock",
        ]);
        let held = skills.skill_ids();

        let ranked = engine.readiness_for_catalog(&held);
        assert_eq!(ranked.len(), engine.taxonomy().certifications().len());
        assert!(ranked.windows(2).all(|w| w[0].match_percentage >= w[1].match_percentage));
        assert!(ranked[0].match_percentage > 0);
        assert!(ranked[0].certification_name.to_lowercase().contains("dairy"));
    }

    #[test]
    fn test_compute_readiness_against_bundled_aliases() {
        let engine = engine();
        let held: HashSet<String> = ["HS_CROP_001", "HS_CROP_002"]
            .into_iter()
            .map(String::from)
            .collect();
        let m = engine.compute_readiness(
            &held,
            &["Land preparation", "Planting seeds or seedlings", "Irrigation management"],
        );
        assert_eq!(m.match_percentage, 67);
        assert!(m.certification_name.is_empty());
    }

    #[test]
    fn test_facade_delegates() {
        let engine = engine();
        assert_eq!(engine.normalize("  Milking,  COWS! "), "milking cows");
        assert_eq!(
            engine.map_task("Milking dairy cows by hand").tier(),
            Some(ConfidenceTier::High)
        );
        assert_eq!(engine.batch_map(&["", "Ploughing land"]).len(), 1);
        assert!(engine.resolve("no such requirement").is_empty());
        assert_eq!(engine.score("Ploughing land", "ploughing land").total, 1.0);
    }
}
