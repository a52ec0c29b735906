use std::collections::BTreeSet;

use tracing::warn;

use crate::taxonomy::catalog::Taxonomy;

/// Translates human-readable requirement names into the skill ids that satisfy
/// them, via the taxonomy's alias table.
///
/// Fails closed: an unknown name resolves to the empty set. Callers must treat
/// that as "cannot be verified", never as satisfied.
pub struct RequirementResolver<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> RequirementResolver<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn resolve(&self, requirement_name: &str) -> BTreeSet<String> {
        match self.taxonomy.alias(requirement_name) {
            Some(ids) => ids.iter().cloned().collect(),
            None => {
                warn!(requirement = requirement_name, "no skill mapping for requirement");
                BTreeSet::new()
            }
        }
    }
}
