use super::component::DependencyEnv;
use std::fmt;
use std::str::FromStr;

/// Package ecosystem an artifact belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ecosystem {
    Python,
    Npm,
}

/// Mechanism through which a dependency was observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SourceBucket {
    /// Installed Python distribution metadata (`*.dist-info`, `*.egg-info`)
    PkgPackages,
    /// A `package.json` somewhere below a `node_modules` directory
    NodeModules,
    /// An entry of a `package-lock.json`
    PackageLock,
    /// An entry of a `yarn.lock`
    YarnLock,
}

impl SourceBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceBucket::PkgPackages => "pkg_packages",
            SourceBucket::NodeModules => "node_modules",
            SourceBucket::PackageLock => "package-lock.json",
            SourceBucket::YarnLock => "yarn.lock",
        }
    }
}

impl fmt::Display for SourceBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pkg_packages" => Ok(SourceBucket::PkgPackages),
            "node_modules" => Ok(SourceBucket::NodeModules),
            "package-lock.json" => Ok(SourceBucket::PackageLock),
            "yarn.lock" => Ok(SourceBucket::YarnLock),
            other => Err(format!("Unknown source bucket: {}", other)),
        }
    }
}

/// A raw, unresolved observation of a dependency on disk.
///
/// Produced by the filesystem scanner and consumed by identity resolution
/// within the same scan; never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evidence {
    pub ecosystem: Ecosystem,
    pub name: String,
    pub version: String,
    pub location: String,
    pub source: SourceBucket,
    pub env: DependencyEnv,
}

impl Evidence {
    pub fn new(
        ecosystem: Ecosystem,
        name: impl Into<String>,
        version: impl Into<String>,
        location: impl Into<String>,
        source: SourceBucket,
    ) -> Self {
        Self {
            ecosystem,
            name: name.into(),
            version: version.into(),
            location: location.into(),
            source,
            env: DependencyEnv::Prod,
        }
    }

    pub fn with_env(mut self, env: DependencyEnv) -> Self {
        self.env = env;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_bucket_strings() {
        assert_eq!(SourceBucket::PkgPackages.as_str(), "pkg_packages");
        assert_eq!(SourceBucket::NodeModules.as_str(), "node_modules");
        assert_eq!(SourceBucket::PackageLock.as_str(), "package-lock.json");
        assert_eq!(SourceBucket::YarnLock.to_string(), "yarn.lock");
    }

    #[test]
    fn test_source_bucket_from_str() {
        assert_eq!(
            "yarn.lock".parse::<SourceBucket>().unwrap(),
            SourceBucket::YarnLock
        );
        assert!("requirements.txt".parse::<SourceBucket>().is_err());
    }

    #[test]
    fn test_evidence_defaults_to_prod() {
        let evidence = Evidence::new(
            Ecosystem::Npm,
            "left-pad",
            "1.3.0",
            "/app/node_modules/left-pad",
            SourceBucket::NodeModules,
        );
        assert_eq!(evidence.env, DependencyEnv::Prod);
        assert_eq!(evidence.with_env(DependencyEnv::Dev).env, DependencyEnv::Dev);
    }
}
