use url::Url;

/// Source-control host whose installs are tracked as their own component type
pub const SOURCE_HOST_DOMAIN: &str = "github.com";

/// `org/repo` coordinates of a repository on the source host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryRef {
    pub org: String,
    pub repo: String,
}

impl RepositoryRef {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

/// SourceHostPolicy recognizes installer URLs that point at the source host
pub struct SourceHostPolicy;

impl SourceHostPolicy {
    /// Extracts `org/repo` from an installer URL such as
    /// `git+https://github.com/org/repo.git@main`.
    ///
    /// Returns `None` when the URL does not parse, is not hosted on the
    /// source host, or has fewer than two path segments.
    pub fn repository(raw_url: &str) -> Option<RepositoryRef> {
        let trimmed = raw_url.trim();
        let without_marker = trimmed.strip_prefix("git+").unwrap_or(trimmed);
        let parsed = Url::parse(without_marker).ok()?;

        let host = parsed.host_str()?.to_ascii_lowercase();
        if !Self::is_source_host(&host) {
            return None;
        }

        let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
        let org = segments.next()?.to_string();
        let repo_segment = segments.next()?;
        // pip keeps a pinned ref as `repo.git@ref` in the path
        let repo_segment = repo_segment.split('@').next().unwrap_or(repo_segment);
        let repo = repo_segment
            .strip_suffix(".git")
            .unwrap_or(repo_segment)
            .to_string();

        if repo.is_empty() {
            return None;
        }

        Some(RepositoryRef { org, repo })
    }

    fn is_source_host(host: &str) -> bool {
        host == SOURCE_HOST_DOMAIN || host.ends_with(&format!(".{}", SOURCE_HOST_DOMAIN))
    }
}
