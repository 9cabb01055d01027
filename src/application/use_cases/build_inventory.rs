use crate::application::dto::InventoryRequest;
use crate::inventory::domain::Inventory;
use crate::inventory::services::{Aggregator, IdentityResolver, MetadataGenerator};
use crate::ports::outbound::{EnvironmentProbe, EvidenceSource, ProgressReporter, ProvenanceReader};
use crate::shared::error::ScanError;
use crate::shared::Result;

/// BuildInventoryUseCase - Discovers, resolves and aggregates dependencies
///
/// Runs evidence discovery, identity resolution and aggregation in one
/// streaming pass, then stamps the inventory with host details.
///
/// # Type Parameters
/// * `ES` - EvidenceSource implementation
/// * `PR` - ProvenanceReader implementation
/// * `EP` - EnvironmentProbe implementation
/// * `REP` - ProgressReporter implementation
pub struct BuildInventoryUseCase<ES, PR, EP, REP> {
    evidence_source: ES,
    resolver: IdentityResolver<PR>,
    environment_probe: EP,
    progress_reporter: REP,
}

impl<ES, PR, EP, REP> BuildInventoryUseCase<ES, PR, EP, REP>
where
    ES: EvidenceSource,
    PR: ProvenanceReader,
    EP: EnvironmentProbe,
    REP: ProgressReporter,
{
    pub fn new(
        evidence_source: ES,
        provenance_reader: PR,
        environment_probe: EP,
        progress_reporter: REP,
    ) -> Self {
        Self {
            evidence_source,
            resolver: IdentityResolver::new(provenance_reader),
            environment_probe,
            progress_reporter,
        }
    }

    /// Builds the inventory for `request.project_path`
    ///
    /// # Errors
    /// Returns `ScanError::InvalidProjectPath` for an unusable root and
    /// `ScanError::Discovery` when no artifact yields any evidence.
    pub fn execute(&self, request: InventoryRequest) -> Result<Inventory> {
        self.progress_reporter.report(&format!(
            "🔍 Scanning for dependencies in: {}",
            request.project_path.display()
        ));

        let mut aggregator = Aggregator::new();
        let mut observations = 0usize;
        for evidence in self.evidence_source.scan(&request.project_path)? {
            observations += 1;
            aggregator.add(self.resolver.resolve(evidence));
        }

        if aggregator.is_empty() {
            return Err(ScanError::Discovery {
                path: request.project_path,
            }
            .into());
        }

        tracing::info!(observations, components = aggregator.len(), "inventory aggregated");

        let mut inventory = Inventory::new(MetadataGenerator::generate_default_metadata());
        inventory.add_components(aggregator.finish());
        inventory.update_environment(self.environment_probe.probe(&request.project_path));

        self.progress_reporter.report(&format!(
            "✅ Found {} component(s) from {} observation(s)",
            inventory.len(),
            observations
        ));

        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::domain::{
        ComponentIdentity, ComponentType, Ecosystem, EnvironmentInfo, Evidence, InstallerProvenance,
        SourceBucket, VcsInfo,
    };
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    struct StubEvidenceSource(Vec<Evidence>);

    impl EvidenceSource for StubEvidenceSource {
        fn scan<'a>(&'a self, _root: &Path) -> Result<Box<dyn Iterator<Item = Evidence> + 'a>> {
            Ok(Box::new(self.0.iter().cloned()))
        }
    }

    struct GithubProvenance;

    impl ProvenanceReader for GithubProvenance {
        fn read_provenance(&self, _metadata_dir: &Path) -> Option<InstallerProvenance> {
            Some(InstallerProvenance {
                url: Some("https://github.com/org/tool".to_string()),
                vcs_info: Some(VcsInfo {
                    requested_revision: None,
                    commit_id: Some("abcdef0123456789".to_string()),
                }),
            })
        }
    }

    struct FixedProbe;

    impl EnvironmentProbe for FixedProbe {
        fn probe(&self, project_path: &Path) -> EnvironmentInfo {
            EnvironmentInfo {
                os: "linux".to_string(),
                project_path: project_path.display().to_string(),
                ..Default::default()
            }
        }
    }

    #[derive(Default)]
    struct RecordingReporter(RefCell<Vec<String>>);

    impl ProgressReporter for RecordingReporter {
        fn report(&self, message: &str) {
            self.0.borrow_mut().push(message.to_string());
        }
        fn report_waiting(&self, _message: &str) {}
        fn report_warning(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    #[test]
    fn test_execute_resolves_through_provenance_reader() {
        let source = StubEvidenceSource(vec![Evidence::new(
            Ecosystem::Python,
            "tool",
            "1.0.0",
            "/venv/site-packages/tool-1.0.0.dist-info",
            SourceBucket::PkgPackages,
        )]);
        let reporter = RecordingReporter::default();
        let use_case = BuildInventoryUseCase::new(source, GithubProvenance, FixedProbe, &reporter);

        let inventory = use_case
            .execute(InventoryRequest::new(PathBuf::from("/project")))
            .unwrap();

        let identity = ComponentIdentity::new(ComponentType::Github, "org/tool", "abcdef012345");
        assert!(inventory.get(&identity).is_some());
        assert_eq!(inventory.environment().unwrap().project_path, "/project");
        assert_eq!(reporter.0.borrow().len(), 2);
    }

    #[test]
    fn test_execute_without_evidence_is_discovery_error() {
        let use_case = BuildInventoryUseCase::new(
            StubEvidenceSource(Vec::new()),
            GithubProvenance,
            FixedProbe,
            RecordingReporter::default(),
        );

        let err = use_case
            .execute(InventoryRequest::new(PathBuf::from("/empty")))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::Discovery { .. })
        ));
    }
}
