#![allow(dead_code)]

//! Certification Readiness: how much of a certification a worker's held skills cover.
//!
//! The denominator is the number of *requirements*, not resolved skill ids. A
//! requirement resolving to several ids is satisfied by holding any one of them.
//! A requirement that resolves to nothing stays in the denominator as
//! `Unverifiable`, so percentages remain comparable across profiles.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::certification::resolver::RequirementResolver;
use crate::taxonomy::catalog::CertificationRequirement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementStatus {
    Satisfied,
    NotYetAchieved,
    /// The alias table has no mapping for this requirement name.
    Unverifiable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementCheck {
    pub requirement_name: String,
    pub resolved_skill_ids: Vec<String>,
    pub held_skill_ids: Vec<String>,
    pub status: RequirementStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificationMatch {
    pub certification_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certification_code: Option<String>,
    pub matched_skill_ids: Vec<String>,
    pub missing_skill_ids: Vec<String>,
    pub matched_count: usize,
    pub total_requirements: usize,
    /// 0 to 100
    pub match_percentage: u32,
    pub requirements: Vec<RequirementCheck>,
}

impl CertificationMatch {
    pub fn unverifiable_requirements(&self) -> impl Iterator<Item = &str> {
        self.requirements
            .iter()
            .filter(|r| r.status == RequirementStatus::Unverifiable)
            .map(|r| r.requirement_name.as_str())
    }
}

pub struct ReadinessCalculator<'a> {
    resolver: RequirementResolver<'a>,
}

impl<'a> ReadinessCalculator<'a> {
    pub fn new(resolver: RequirementResolver<'a>) -> Self {
        Self { resolver }
    }

    /// Readiness against an ad-hoc requirement list (no certification name).
    pub fn compute<S: AsRef<str>>(
        &self,
        held_skill_ids: &HashSet<String>,
        requirement_names: &[S],
    ) -> CertificationMatch {
        self.evaluate(String::new(), None, held_skill_ids, requirement_names)
    }

    pub fn compute_for(
        &self,
        certification: &CertificationRequirement,
        held_skill_ids: &HashSet<String>,
    ) -> CertificationMatch {
        self.evaluate(
            certification.certification_name.clone(),
            certification.certification_code.clone(),
            held_skill_ids,
            &certification.requirement_names,
        )
    }

    /// Best match first; ties keep authoring order.
    pub fn rank(
        &self,
        certifications: &[CertificationRequirement],
        held_skill_ids: &HashSet<String>,
    ) -> Vec<CertificationMatch> {
        let mut matches: Vec<CertificationMatch> = certifications
            .iter()
            .map(|c| self.compute_for(c, held_skill_ids))
            .collect();
        matches.sort_by(|a, b| b.match_percentage.cmp(&a.match_percentage));
        matches
    }

    fn evaluate<S: AsRef<str>>(
        &self,
        certification_name: String,
        certification_code: Option<String>,
        held_skill_ids: &HashSet<String>,
        requirement_names: &[S],
    ) -> CertificationMatch {
        let mut requirements = Vec::with_capacity(requirement_names.len());
        let mut matched_skill_ids: Vec<String> = Vec::new();
        let mut missing_skill_ids: Vec<String> = Vec::new();

        for name in requirement_names {
            let name = name.as_ref();
            let resolved: Vec<String> = self.resolver.resolve(name).into_iter().collect();
            let held: Vec<String> = resolved
                .iter()
                .filter(|id| held_skill_ids.contains(*id))
                .cloned()
                .collect();

            let status = if resolved.is_empty() {
                RequirementStatus::Unverifiable
            } else if held.is_empty() {
                RequirementStatus::NotYetAchieved
            } else {
                RequirementStatus::Satisfied
            };

            match status {
                RequirementStatus::Satisfied => push_unique(&mut matched_skill_ids, &held),
                RequirementStatus::NotYetAchieved => {
                    push_unique(&mut missing_skill_ids, &resolved)
                }
                RequirementStatus::Unverifiable => {}
            }

            requirements.push(RequirementCheck {
                requirement_name: name.to_string(),
                resolved_skill_ids: resolved,
                held_skill_ids: held,
                status,
            });
        }

        let total_requirements = requirements.len();
        let matched_count = requirements
            .iter()
            .filter(|r| r.status == RequirementStatus::Satisfied)
            .count();

        CertificationMatch {
            certification_name,
            certification_code,
            matched_skill_ids,
            missing_skill_ids,
            matched_count,
            total_requirements,
            match_percentage: match_percentage(matched_count, total_requirements),
            requirements,
        }
    }
}

/// `round(matched / total × 100)`, 0 when there are no requirements.
pub fn match_percentage(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((matched as f64 / total as f64) * 100.0).round() as u32
}

fn push_unique(target: &mut Vec<String>, ids: &[String]) {
    for id in ids {
        if !target.contains(id) {
            target.push(id.clone());
        }
    }
}
