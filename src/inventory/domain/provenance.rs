use serde::Deserialize;

/// Parsed `direct_url.json` written by pip next to a distribution's metadata.
///
/// Only used while resolving an identity; nothing from it is stored on the
/// component beyond its effect on type, name, version and qualifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct InstallerProvenance {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub vcs_info: Option<VcsInfo>,
}

/// VCS section of an installer provenance record
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VcsInfo {
    #[serde(default)]
    pub requested_revision: Option<String>,
    #[serde(default)]
    pub commit_id: Option<String>,
}

impl InstallerProvenance {
    pub fn vcs_info(&self) -> VcsInfo {
        self.vcs_info.clone().unwrap_or_default()
    }
}
