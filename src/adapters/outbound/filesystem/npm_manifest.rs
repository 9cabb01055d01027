use crate::inventory::domain::DependencyEnv;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const PACKAGE_JSON: &str = "package.json";
pub const PACKAGE_LOCK: &str = "package-lock.json";
pub const NODE_MODULES: &str = "node_modules";

const NODE_MODULES_PREFIX: &str = "node_modules/";

/// `name` and `version` of an installed package manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub version: String,
}

/// One installed package recorded in a `package-lock.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEntry {
    /// Key under which the entry appears, e.g. `node_modules/a/node_modules/b`
    pub key: String,
    pub name: String,
    pub version: String,
    pub env: DependencyEnv,
}

#[derive(Debug, Deserialize)]
struct PackageJson {
    name: Option<Value>,
    version: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct PackageLock {
    packages: Option<BTreeMap<String, LockPackage>>,
    /// Lockfile v1 layout, used when `packages` is absent
    dependencies: Option<BTreeMap<String, LockDependency>>,
}

#[derive(Debug, Deserialize)]
struct LockPackage {
    version: Option<String>,
    #[serde(default)]
    dev: bool,
}

#[derive(Debug, Deserialize)]
struct LockDependency {
    version: Option<String>,
    #[serde(default)]
    dev: bool,
    #[serde(default)]
    dependencies: BTreeMap<String, LockDependency>,
}

/// Parses an installed `package.json`.
///
/// Returns `None` unless both `name` and `version` are non-empty strings.
pub fn parse_package_json(text: &str) -> Option<ManifestEntry> {
    let manifest: PackageJson = serde_json::from_str(text).ok()?;
    let name = non_empty_string(manifest.name?)?;
    let version = non_empty_string(manifest.version?)?;
    Some(ManifestEntry { name, version })
}

/// Parses a `package-lock.json` into its installed packages.
///
/// The root entry (empty key), workspace members (keys outside any
/// `node_modules`) and entries without a version are skipped.
/// Unparsable input yields an empty list.
pub fn parse_package_lock(text: &str) -> Vec<LockEntry> {
    let Ok(lock) = serde_json::from_str::<PackageLock>(text) else {
        return Vec::new();
    };

    match (lock.packages, lock.dependencies) {
        (Some(packages), _) => packages
            .into_iter()
            .filter_map(|(key, package)| {
                let name = package_name_from_key(&key)?;
                let version = package.version.filter(|v| !v.is_empty())?;
                Some(LockEntry {
                    name,
                    version,
                    env: env_of(package.dev),
                    key,
                })
            })
            .collect(),
        (None, Some(dependencies)) => {
            let mut entries = Vec::new();
            flatten_v1(&dependencies, "", &mut entries);
            entries
        }
        (None, None) => Vec::new(),
    }
}

/// Recovers the package name from a `packages` key by dropping everything
/// up to and including the last `node_modules/`.
pub fn package_name_from_key(key: &str) -> Option<String> {
    let index = key.rfind(NODE_MODULES_PREFIX)?;
    let name = &key[index + NODE_MODULES_PREFIX.len()..];
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn flatten_v1(
    dependencies: &BTreeMap<String, LockDependency>,
    parent_key: &str,
    entries: &mut Vec<LockEntry>,
) {
    for (name, dependency) in dependencies {
        let key = if parent_key.is_empty() {
            format!("{}{}", NODE_MODULES_PREFIX, name)
        } else {
            format!("{}/{}{}", parent_key, NODE_MODULES_PREFIX, name)
        };
        if let Some(version) = dependency.version.as_ref().filter(|v| !v.is_empty()) {
            entries.push(LockEntry {
                key: key.clone(),
                name: name.clone(),
                version: version.clone(),
                env: env_of(dependency.dev),
            });
        }
        flatten_v1(&dependency.dependencies, &key, entries);
    }
}

fn env_of(dev: bool) -> DependencyEnv {
    if dev {
        DependencyEnv::Dev
    } else {
        DependencyEnv::Prod
    }
}

fn non_empty_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}
