use crate::inventory::domain::VcsInfo;

/// Version used when a VCS install cannot be pinned to a commit
pub const LATEST_VERSION: &str = "latest";

/// Number of commit hash characters kept in a pinned version
pub const SHORT_COMMIT_LEN: usize = 12;

/// Qualifier key carrying the requested branch or tag
pub const BRANCH_QUALIFIER: &str = "branch";

/// Version and optional branch qualifier for a source-host identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VcsVersion {
    pub version: String,
    pub branch: Option<String>,
}

/// VcsRevisionPolicy decides how a VCS install is versioned
///
/// Priority order:
/// 1. A requested revision that is not the resolved commit is a mutable ref:
///    version `latest`, qualified by the ref name
/// 2. A resolved commit pins the version to its first 12 characters
/// 3. Otherwise `latest` with no qualifier
pub struct VcsRevisionPolicy;

impl VcsRevisionPolicy {
    pub fn resolve(vcs_info: &VcsInfo) -> VcsVersion {
        let requested = vcs_info.requested_revision.as_deref();
        let commit = vcs_info.commit_id.as_deref();

        match (requested, commit) {
            (Some(revision), commit) if commit != Some(revision) => VcsVersion {
                version: LATEST_VERSION.to_string(),
                branch: Some(revision.to_string()),
            },
            (_, Some(commit)) => VcsVersion {
                version: commit.chars().take(SHORT_COMMIT_LEN).collect(),
                branch: None,
            },
            _ => VcsVersion {
                version: LATEST_VERSION.to_string(),
                branch: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vcs(requested: Option<&str>, commit: Option<&str>) -> VcsInfo {
        VcsInfo {
            requested_revision: requested.map(str::to_string),
            commit_id: commit.map(str::to_string),
        }
    }

    #[test]
    fn test_branch_with_different_commit_is_latest() {
        let resolved = VcsRevisionPolicy::resolve(&vcs(Some("main"), Some("deadbeefcafebabe")));
        assert_eq!(resolved.version, "latest");
        assert_eq!(resolved.branch.as_deref(), Some("main"));
    }

    #[test]
    fn test_branch_without_commit_is_latest() {
        let resolved = VcsRevisionPolicy::resolve(&vcs(Some("v2"), None));
        assert_eq!(resolved.version, "latest");
        assert_eq!(resolved.branch.as_deref(), Some("v2"));
    }

    #[test]
    fn test_commit_only_is_pinned_to_twelve_chars() {
        let resolved = VcsRevisionPolicy::resolve(&vcs(None, Some("0123456789abcdef0123")));
        assert_eq!(resolved.version, "0123456789ab");
        assert!(resolved.branch.is_none());
    }

    #[test]
    fn test_requested_revision_equal_to_commit_is_pinned() {
        let sha = "0123456789abcdef0123456789abcdef01234567";
        let resolved = VcsRevisionPolicy::resolve(&vcs(Some(sha), Some(sha)));
        assert_eq!(resolved.version, "0123456789ab");
        assert!(resolved.branch.is_none());
    }

    #[test]
    fn test_short_commit_is_kept_whole() {
        let resolved = VcsRevisionPolicy::resolve(&vcs(None, Some("abc123")));
        assert_eq!(resolved.version, "abc123");
    }

    #[test]
    fn test_nothing_known_is_latest() {
        let resolved = VcsRevisionPolicy::resolve(&vcs(None, None));
        assert_eq!(resolved.version, "latest");
        assert!(resolved.branch.is_none());
    }
}
