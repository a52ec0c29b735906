#![allow(dead_code)]

//! Taxonomy reference data: canonical tasks, skill catalog, requirement aliases,
//! certification definitions, and the keyword lexicon used by the scorer.
//!
//! Everything here is immutable once a `Taxonomy` is built. Loading goes through
//! `TaxonomyDocument` (plain serde records) and `Taxonomy::new` validates the
//! cross-references, so every skill id reachable from a task or alias is known.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::taxonomy::normalize::normalize;
use crate::taxonomy::similarity::DEFAULT_KEYWORDS;

/// Reference document compiled into the binary. Used when no `TAXONOMY_PATH` is set.
pub const BUNDLED_TAXONOMY: &str = include_str!("../../data/taxonomy.json");

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Hard,
    Soft,
}

/// A skill catalog entry. `skill_id` is the key every other record refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
    pub category: String,
    pub skill_type: SkillType,
    pub domain_id: String,
    pub is_foundation: bool,
}

/// One authored "ground truth" phrasing of a unit of work, bound to a primary skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTaskEntry {
    pub task_id: String,
    pub phrase: String,
    pub primary_skill_id: String,
    pub primary_skill_name: String,
    /// Discount applied to the similarity score. Ambiguous phrases carry less.
    pub base_confidence: f64,
}

/// Human-readable requirement name and the skill ids that satisfy it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementAlias {
    pub name: String,
    pub skill_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationRequirement {
    pub certification_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certification_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cert_type: Option<String>,
    pub requirement_names: Vec<String>,
}

/// On-disk / bundled shape of the reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyDocument {
    #[serde(default)]
    pub version: Option<String>,
    pub canonical_tasks: Vec<CanonicalTaskEntry>,
    pub skills: Vec<Skill>,
    #[serde(default = "default_keyword_lexicon")]
    pub keyword_lexicon: Vec<String>,
    #[serde(default)]
    pub requirement_aliases: Vec<RequirementAlias>,
    #[serde(default)]
    pub certifications: Vec<CertificationRequirement>,
}

fn default_keyword_lexicon() -> Vec<String> {
    DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect()
}

impl TaxonomyDocument {
    pub fn from_json(raw: &str) -> Result<Self, TaxonomyError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn bundled() -> Result<Self, TaxonomyError> {
        Self::from_json(BUNDLED_TAXONOMY)
    }

    pub fn from_path(path: &Path) -> Result<Self, TaxonomyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TaxonomyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed taxonomy document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate canonical task id '{0}'")]
    DuplicateTask(String),

    #[error("Canonical task '{0}' has an empty phrase")]
    EmptyPhrase(String),

    #[error("Canonical task '{task_id}' has base confidence {value} outside (0, 1]")]
    InvalidBaseConfidence { task_id: String, value: f64 },

    #[error("Canonical task '{task_id}' references unknown skill '{skill_id}'")]
    UnknownTaskSkill { task_id: String, skill_id: String },

    #[error("Duplicate skill id '{0}'")]
    DuplicateSkill(String),

    #[error("Requirement alias name is empty")]
    EmptyAliasName,

    #[error("Duplicate requirement alias '{0}'")]
    DuplicateAlias(String),

    #[error("Requirement alias '{0}' lists no skills")]
    AliasWithoutSkills(String),

    #[error("Requirement alias '{name}' references unknown skill '{skill_id}'")]
    UnknownAliasSkill { name: String, skill_id: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct TaxonomyStats {
    pub version: Option<String>,
    pub total_canonical_tasks: usize,
    pub total_skills: usize,
    pub total_aliases: usize,
    pub total_certifications: usize,
    pub skills_by_domain: BTreeMap<String, usize>,
}

/// Validated, read-only reference tables.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    version: Option<String>,
    tasks: Vec<CanonicalTaskEntry>,
    /// `normalize(task.phrase)`, index-aligned with `tasks`.
    normalized_phrases: Vec<String>,
    skills: Vec<Skill>,
    skill_index: HashMap<String, usize>,
    /// Keyed by `alias_key(name)`.
    aliases: HashMap<String, Vec<String>>,
    certifications: Vec<CertificationRequirement>,
    keywords: Vec<String>,
}

/// Lookup key for requirement names: trimmed, ASCII-lowercased.
pub(crate) fn alias_key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

impl Taxonomy {
    pub fn new(document: TaxonomyDocument) -> Result<Self, TaxonomyError> {
        let TaxonomyDocument {
            version,
            canonical_tasks,
            skills,
            keyword_lexicon,
            requirement_aliases,
            certifications,
        } = document;

        let mut skill_index = HashMap::with_capacity(skills.len());
        for (i, skill) in skills.iter().enumerate() {
            if skill_index.insert(skill.skill_id.clone(), i).is_some() {
                return Err(TaxonomyError::DuplicateSkill(skill.skill_id.clone()));
            }
        }

        let mut seen_tasks = HashSet::with_capacity(canonical_tasks.len());
        for task in &canonical_tasks {
            if !seen_tasks.insert(task.task_id.as_str()) {
                return Err(TaxonomyError::DuplicateTask(task.task_id.clone()));
            }
            if task.phrase.trim().is_empty() {
                return Err(TaxonomyError::EmptyPhrase(task.task_id.clone()));
            }
            if !(task.base_confidence > 0.0 && task.base_confidence <= 1.0) {
                return Err(TaxonomyError::InvalidBaseConfidence {
                    task_id: task.task_id.clone(),
                    value: task.base_confidence,
                });
            }
            if !skill_index.contains_key(&task.primary_skill_id) {
                return Err(TaxonomyError::UnknownTaskSkill {
                    task_id: task.task_id.clone(),
                    skill_id: task.primary_skill_id.clone(),
                });
            }
        }

        let mut aliases = HashMap::with_capacity(requirement_aliases.len());
        for alias in requirement_aliases {
            let key = alias_key(&alias.name);
            if key.is_empty() {
                return Err(TaxonomyError::EmptyAliasName);
            }
            if alias.skill_ids.is_empty() {
                return Err(TaxonomyError::AliasWithoutSkills(alias.name));
            }
            let mut ids: Vec<String> = Vec::with_capacity(alias.skill_ids.len());
            for skill_id in alias.skill_ids {
                if !skill_index.contains_key(&skill_id) {
                    return Err(TaxonomyError::UnknownAliasSkill {
                        name: alias.name,
                        skill_id,
                    });
                }
                if !ids.contains(&skill_id) {
                    ids.push(skill_id);
                }
            }
            if aliases.insert(key, ids).is_some() {
                return Err(TaxonomyError::DuplicateAlias(alias.name));
            }
        }

        let normalized_phrases = canonical_tasks
            .iter()
            .map(|t| normalize(&t.phrase))
            .collect();

        Ok(Self {
            version,
            tasks: canonical_tasks,
            normalized_phrases,
            skills,
            skill_index,
            aliases,
            certifications,
            keywords: keyword_lexicon,
        })
    }

    /// The reference data compiled into the binary.
    pub fn bundled() -> Result<Self, TaxonomyError> {
        Self::new(TaxonomyDocument::bundled()?)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Canonical tasks in authored order (the mapper's tie-break order).
    pub fn tasks(&self) -> &[CanonicalTaskEntry] {
        &self.tasks
    }

    pub(crate) fn tasks_with_normalized(
        &self,
    ) -> impl Iterator<Item = (&CanonicalTaskEntry, &str)> {
        self.tasks
            .iter()
            .zip(self.normalized_phrases.iter().map(String::as_str))
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn skill(&self, skill_id: &str) -> Option<&Skill> {
        self.skill_index.get(skill_id).map(|&i| &self.skills[i])
    }

    pub fn is_valid_skill_id(&self, skill_id: &str) -> bool {
        self.skill_index.contains_key(skill_id)
    }

    pub fn all_skill_ids(&self) -> Vec<&str> {
        self.skills.iter().map(|s| s.skill_id.as_str()).collect()
    }

    /// Skill ids bound to a requirement name, if the alias table knows it.
    pub fn alias(&self, requirement_name: &str) -> Option<&[String]> {
        self.aliases
            .get(&alias_key(requirement_name))
            .map(Vec::as_slice)
    }

    pub fn certifications(&self) -> &[CertificationRequirement] {
        &self.certifications
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn stats(&self) -> TaxonomyStats {
        let mut skills_by_domain = BTreeMap::new();
        for skill in &self.skills {
            *skills_by_domain.entry(skill.domain_id.clone()).or_insert(0) += 1;
        }
        TaxonomyStats {
            version: self.version.clone(),
            total_canonical_tasks: self.tasks.len(),
            total_skills: self.skills.len(),
            total_aliases: self.aliases.len(),
            total_certifications: self.certifications.len(),
            skills_by_domain,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Fixtures
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn skill(id: &str, name: &str, domain: &str) -> Skill {
        Skill {
            skill_id: id.to_string(),
            name: name.to_string(),
            category: "Test".to_string(),
            skill_type: SkillType::Hard,
            domain_id: domain.to_string(),
            is_foundation: false,
        }
    }

    pub fn task(id: &str, phrase: &str, skill_id: &str, base: f64) -> CanonicalTaskEntry {
        CanonicalTaskEntry {
            task_id: id.to_string(),
            phrase: phrase.to_string(),
            primary_skill_id: skill_id.to_string(),
            primary_skill_name: format!("{skill_id} name"),
            base_confidence: base,
        }
    }

    pub fn alias(name: &str, ids: &[&str]) -> RequirementAlias {
        RequirementAlias {
            name: name.to_string(),
            skill_ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Small catalog with no generic "… farming" phrases.
    pub fn document() -> TaxonomyDocument {
        TaxonomyDocument {
            version: Some("fixture".to_string()),
            canonical_tasks: vec![
                task("T1", "Milking dairy cows by hand", "HS_LIVE_007", 0.95),
                task("T2", "Milking cows using machines", "HS_LIVE_008", 0.95),
                task("T3", "Feeding cattle and livestock", "HS_LIVE_001", 0.92),
                task("T4", "Ploughing land", "HS_CROP_001", 0.92),
                task("T5", "Planting seeds", "HS_CROP_002", 0.95),
                task("T6", "Irrigating crops", "HS_CROP_003", 0.95),
            ],
            skills: vec![
                skill("HS_LIVE_001", "Animal Feeding", "DOM_LIVE"),
                skill("HS_LIVE_007", "Manual Milking Operations", "DOM_LIVE"),
                skill("HS_LIVE_008", "Machine Milking Operations", "DOM_LIVE"),
                skill("HS_CROP_001", "Land Preparation", "DOM_CROP"),
                skill("HS_CROP_002", "Planting/Seeding", "DOM_CROP"),
                skill("HS_CROP_003", "Irrigation Management", "DOM_CROP"),
            ],
            keyword_lexicon: default_keyword_lexicon(),
            requirement_aliases: vec![
                alias("Land preparation", &["HS_CROP_001"]),
                alias("Planting seeds or seedlings", &["HS_CROP_002"]),
                alias("Irrigation management", &["HS_CROP_003"]),
                alias("Milking dairy cattle", &["HS_LIVE_007", "HS_LIVE_008"]),
                alias("Feeding and watering animals", &["HS_LIVE_001"]),
            ],
            certifications: vec![
                CertificationRequirement {
                    certification_name: "Crop Basics".to_string(),
                    certification_code: Some("CROP-1".to_string()),
                    cert_type: None,
                    requirement_names: vec![
                        "Land preparation".to_string(),
                        "Planting seeds or seedlings".to_string(),
                        "Irrigation management".to_string(),
                    ],
                },
                CertificationRequirement {
                    certification_name: "Dairy Assistant".to_string(),
                    certification_code: None,
                    cert_type: None,
                    requirement_names: vec![
                        "Milking dairy cattle".to_string(),
                        "Feeding and watering animals".to_string(),
                    ],
                },
            ],
        }
    }

    pub fn taxonomy() -> Taxonomy {
        Taxonomy::new(document()).expect("fixture taxonomy is valid")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use std::io::Write;

    #[test]
    fn test_bundled_taxonomy_loads_and_validates() {
        let taxonomy = Taxonomy::bundled().unwrap();
        let stats = taxonomy.stats();
        assert_eq!(stats.total_canonical_tasks, 93);
        assert_eq!(stats.total_skills, 39);
        assert_eq!(stats.skills_by_domain.get("DOM_LIVE"), Some(&12));
        assert!(stats.total_certifications > 0);
        assert!(!taxonomy.keywords().is_empty());
    }

    #[test]
    fn test_bundled_tasks_reference_known_skills() {
        let taxonomy = Taxonomy::bundled().unwrap();
        for task in taxonomy.tasks() {
            assert!(taxonomy.is_valid_skill_id(&task.primary_skill_id));
        }
    }

    #[test]
    fn test_bundled_certification_requirements_all_resolve() {
        let taxonomy = Taxonomy::bundled().unwrap();
        for cert in taxonomy.certifications() {
            for name in &cert.requirement_names {
                assert!(
                    taxonomy.alias(name).is_some(),
                    "'{name}' in '{}' has no alias",
                    cert.certification_name
                );
            }
        }
    }

    #[test]
    fn test_skill_lookup_and_catalog_order() {
        let taxonomy = taxonomy();
        assert_eq!(
            taxonomy.skill("HS_CROP_001").map(|s| s.name.as_str()),
            Some("Land Preparation")
        );
        assert!(taxonomy.skill("HS_NOPE_999").is_none());
        assert_eq!(taxonomy.all_skill_ids()[0], "HS_LIVE_001");
    }

    #[test]
    fn test_alias_lookup_trims_and_ignores_case() {
        let taxonomy = taxonomy();
        assert_eq!(
            taxonomy.alias("  LAND PREPARATION "),
            Some(&["HS_CROP_001".to_string()][..])
        );
        assert!(taxonomy.alias("land prep").is_none());
    }

    #[test]
    fn test_rejects_task_with_unknown_skill() {
        let mut doc = document();
        doc.canonical_tasks
            .push(task("T9", "Beekeeping", "HS_LIVE_012", 0.9));
        let err = Taxonomy::new(doc).unwrap_err();
        assert!(matches!(err, TaxonomyError::UnknownTaskSkill { .. }));
    }

    #[test]
    fn test_rejects_base_confidence_out_of_range() {
        for bad in [0.0, -0.1, 1.01] {
            let mut doc = document();
            doc.canonical_tasks[0].base_confidence = bad;
            let err = Taxonomy::new(doc).unwrap_err();
            assert!(matches!(err, TaxonomyError::InvalidBaseConfidence { .. }));
        }
    }

    #[test]
    fn test_accepts_base_confidence_of_one() {
        let mut doc = document();
        doc.canonical_tasks[0].base_confidence = 1.0;
        assert!(Taxonomy::new(doc).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let mut doc = document();
        doc.canonical_tasks
            .push(task("T1", "Another phrase", "HS_CROP_001", 0.9));
        assert!(matches!(
            Taxonomy::new(doc).unwrap_err(),
            TaxonomyError::DuplicateTask(id) if id == "T1"
        ));

        let mut doc = document();
        doc.skills.push(skill("HS_CROP_001", "Dup", "DOM_CROP"));
        assert!(matches!(
            Taxonomy::new(doc).unwrap_err(),
            TaxonomyError::DuplicateSkill(_)
        ));
    }

    #[test]
    fn test_rejects_bad_aliases() {
        let mut doc = document();
        doc.requirement_aliases
            .push(alias("land PREPARATION", &["HS_CROP_001"]));
        assert!(matches!(
            Taxonomy::new(doc).unwrap_err(),
            TaxonomyError::DuplicateAlias(_)
        ));

        let mut doc = document();
        doc.requirement_aliases.push(alias("Beekeeping", &["HS_LIVE_012"]));
        assert!(matches!(
            Taxonomy::new(doc).unwrap_err(),
            TaxonomyError::UnknownAliasSkill { .. }
        ));

        let mut doc = document();
        doc.requirement_aliases.push(alias("Nothing", &[]));
        assert!(matches!(
            Taxonomy::new(doc).unwrap_err(),
            TaxonomyError::AliasWithoutSkills(_)
        ));

        let mut doc = document();
        doc.requirement_aliases.push(alias("   ", &["HS_CROP_001"]));
        assert!(matches!(
            Taxonomy::new(doc).unwrap_err(),
            TaxonomyError::EmptyAliasName
        ));
    }

    #[test]
    fn test_keyword_lexicon_defaults_when_absent() {
        let raw = r#"{
            "canonical_tasks": [],
            "skills": []
        }"#;
        let doc = TaxonomyDocument::from_json(raw).unwrap();
        assert_eq!(doc.keyword_lexicon.len(), DEFAULT_KEYWORDS.len());
        assert!(doc.requirement_aliases.is_empty());
    }

    #[test]
    fn test_from_path_reads_document() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let raw = serde_json::to_string(&document()).unwrap();
        file.write_all(raw.as_bytes()).unwrap();

        let doc = TaxonomyDocument::from_path(file.path()).unwrap();
        let taxonomy = Taxonomy::new(doc).unwrap();
        assert_eq!(taxonomy.version(), Some("fixture"));
        assert_eq!(taxonomy.tasks().len(), 6);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let err = TaxonomyDocument::from_path(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, TaxonomyError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = TaxonomyDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TaxonomyError::Parse(_)));
    }
}
