use crate::inventory::domain::EnvironmentInfo;
use crate::ports::outbound::EnvironmentProbe;
use std::path::Path;

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// HostEnvironmentProbe adapter reading the OS, architecture and CI variables
pub struct HostEnvironmentProbe {
    lookup: EnvLookup,
}

impl HostEnvironmentProbe {
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    fn var(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|v| !v.trim().is_empty())
    }
}

impl Default for HostEnvironmentProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvironmentProbe for HostEnvironmentProbe {
    fn probe(&self, project_path: &Path) -> EnvironmentInfo {
        EnvironmentInfo {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            project_path: project_path.display().to_string(),
            github_repository: self.var("GITHUB_REPOSITORY"),
            github_ref: self.var("GITHUB_REF_NAME"),
            github_sha: self.var("GITHUB_SHA"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_reads_ci_variables() {
        let probe = HostEnvironmentProbe::with_lookup(|key| match key {
            "GITHUB_REPOSITORY" => Some("ossprey/example".to_string()),
            "GITHUB_SHA" => Some("abc123".to_string()),
            "GITHUB_REF_NAME" => Some("  ".to_string()),
            _ => None,
        });

        let env = probe.probe(Path::new("/work/app"));
        assert_eq!(env.os, std::env::consts::OS);
        assert_eq!(env.arch, std::env::consts::ARCH);
        assert_eq!(env.project_path, "/work/app");
        assert_eq!(env.github_repository.as_deref(), Some("ossprey/example"));
        assert_eq!(env.github_sha.as_deref(), Some("abc123"));
        assert!(env.github_ref.is_none());
    }

    #[test]
    fn test_probe_outside_ci() {
        let env = HostEnvironmentProbe::with_lookup(|_| None).probe(Path::new("."));
        assert!(env.github_repository.is_none());
        assert!(!env.os.is_empty());
    }
}
