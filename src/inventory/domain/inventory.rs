use super::component::{Component, ComponentIdentity};
use super::environment::EnvironmentInfo;
use super::inventory_metadata::InventoryMetadata;
use serde_json::Value;
use std::collections::BTreeMap;

/// Inventory (SBOM) - the deduplicated set of components found for a project.
///
/// Identity is unique: adding a component whose identity is already present
/// merges it into the existing entry instead of creating a duplicate.
#[derive(Debug, Clone)]
pub struct Inventory {
    components: BTreeMap<ComponentIdentity, Component>,
    environment: Option<EnvironmentInfo>,
    metadata: InventoryMetadata,
    findings: Vec<Value>,
}

impl Inventory {
    pub fn new(metadata: InventoryMetadata) -> Self {
        Self {
            components: BTreeMap::new(),
            environment: None,
            metadata,
            findings: Vec::new(),
        }
    }

    pub fn add_component(&mut self, component: Component) {
        match self.components.get_mut(component.identity()) {
            Some(existing) => existing.merge(component),
            None => {
                self.components
                    .insert(component.identity().clone(), component);
            }
        }
    }

    pub fn add_components(&mut self, components: impl IntoIterator<Item = Component>) {
        for component in components {
            self.add_component(component);
        }
    }

    /// Components ordered by identity
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn get(&self, identity: &ComponentIdentity) -> Option<&Component> {
        self.components.get(identity)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Replaces the environment details; an inventory carries exactly one
    pub fn update_environment(&mut self, environment: EnvironmentInfo) {
        self.environment = Some(environment);
    }

    pub fn environment(&self) -> Option<&EnvironmentInfo> {
        self.environment.as_ref()
    }

    pub fn metadata(&self) -> &InventoryMetadata {
        &self.metadata
    }

    /// Records an entry of the scanning service's verdict
    pub fn add_finding(&mut self, finding: Value) {
        self.findings.push(finding);
    }

    pub fn findings(&self) -> &[Value] {
        &self.findings
    }

    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}
