use super::identity_resolver::ResolvedEvidence;
use crate::inventory::domain::{Component, ComponentIdentity};
use std::collections::BTreeMap;

/// Aggregator service merging resolved evidence into deduplicated components
///
/// Components are keyed by identity alone. Every observation of the same
/// identity unions its source bucket, location, env tag, qualifiers and
/// registry traces into the existing entry, so no location is ever lost.
#[derive(Debug, Default)]
pub struct Aggregator {
    components: BTreeMap<ComponentIdentity, Component>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, evidence: ResolvedEvidence) {
        let component = evidence.into_component();
        match self.components.get_mut(component.identity()) {
            Some(existing) => existing.merge(component),
            None => {
                self.components
                    .insert(component.identity().clone(), component);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Consumes the aggregator, yielding components ordered by identity
    pub fn finish(self) -> Vec<Component> {
        self.components.into_values().collect()
    }
}

impl Extend<ResolvedEvidence> for Aggregator {
    fn extend<I: IntoIterator<Item = ResolvedEvidence>>(&mut self, iter: I) {
        for evidence in iter {
            self.add(evidence);
        }
    }
}
