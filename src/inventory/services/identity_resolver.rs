use crate::inventory::domain::{
    Component, ComponentIdentity, ComponentType, DependencyEnv, Ecosystem, Evidence,
    InstallerProvenance, SourceBucket,
};
use crate::inventory::policies::{SourceHostPolicy, VcsRevisionPolicy, BRANCH_QUALIFIER};
use crate::ports::outbound::ProvenanceReader;
use std::path::Path;

/// Evidence after identity resolution, ready for aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEvidence {
    pub identity: ComponentIdentity,
    pub source: SourceBucket,
    pub location: String,
    pub env: DependencyEnv,
    pub branch: Option<String>,
    /// Registry `name==version` kept when the identity was rewritten
    pub registry_trace: Option<String>,
}

impl ResolvedEvidence {
    /// Converts into a single-observation component
    pub fn into_component(self) -> Component {
        let mut component = Component::new(self.identity);
        component.add_source(self.source);
        component.add_location(self.location);
        component.add_env(self.env);
        if let Some(branch) = self.branch {
            component.add_qualifier(BRANCH_QUALIFIER, branch);
        }
        if let Some(trace) = self.registry_trace {
            component.add_registry_trace(trace);
        }
        component
    }
}

/// IdentityResolver service turning raw evidence into canonical identities
///
/// Python distributions installed from the source host are detected through
/// the installer provenance record that sits next to their metadata.
pub struct IdentityResolver<P> {
    provenance_reader: P,
}

impl<P: ProvenanceReader> IdentityResolver<P> {
    pub fn new(provenance_reader: P) -> Self {
        Self { provenance_reader }
    }

    pub fn resolve(&self, evidence: Evidence) -> ResolvedEvidence {
        let provenance = match evidence.ecosystem {
            Ecosystem::Python => self
                .provenance_reader
                .read_provenance(Path::new(&evidence.location)),
            Ecosystem::Npm => None,
        };
        Self::resolve_with_provenance(evidence, provenance.as_ref())
    }

    /// Pure resolution step, given the provenance record (if any)
    pub fn resolve_with_provenance(
        evidence: Evidence,
        provenance: Option<&InstallerProvenance>,
    ) -> ResolvedEvidence {
        let registry_type = match evidence.ecosystem {
            Ecosystem::Python => ComponentType::Pypi,
            Ecosystem::Npm => ComponentType::Npm,
        };

        let repository = provenance.and_then(|p| {
            p.url
                .as_deref()
                .and_then(SourceHostPolicy::repository)
                .map(|repo| (repo, p.vcs_info()))
        });

        match repository {
            Some((repo, vcs_info)) => {
                let resolved = VcsRevisionPolicy::resolve(&vcs_info);
                ResolvedEvidence {
                    identity: ComponentIdentity::new(
                        ComponentType::Github,
                        repo.full_name(),
                        resolved.version,
                    ),
                    source: evidence.source,
                    location: evidence.location,
                    env: evidence.env,
                    branch: resolved.branch,
                    registry_trace: Some(format!("{}=={}", evidence.name, evidence.version)),
                }
            }
            None => ResolvedEvidence {
                identity: ComponentIdentity::new(registry_type, evidence.name, evidence.version),
                source: evidence.source,
                location: evidence.location,
                env: evidence.env,
                branch: None,
                registry_trace: None,
            },
        }
    }
}
