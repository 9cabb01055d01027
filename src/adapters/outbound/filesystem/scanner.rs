use super::file_reader::FileSystemReader;
use super::npm_manifest::{
    parse_package_json, parse_package_lock, NODE_MODULES, PACKAGE_JSON, PACKAGE_LOCK,
};
use super::python_metadata::{is_metadata_dir_name, parse_metadata, MetadataFields, METADATA_FILES};
use super::yarn_lock::{parse_yarn_lock, YARN_LOCK};
use crate::inventory::domain::{Ecosystem, Evidence, ScanMode, SourceBucket};
use crate::ports::outbound::EvidenceSource;
use crate::shared::error::ScanError;
use crate::shared::Result;
use std::path::{Component, Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Pseudo-filesystem and log roots that are never walked
pub const EXCLUDED_ROOTS: [&str; 5] = ["/proc", "/sys", "/dev", "/var/log", "/var/cache"];

/// FilesystemScanner adapter walking a project tree for dependency evidence
///
/// Symbolic links are not followed. Subtrees whose path string starts with
/// an excluded prefix are pruned before they are entered.
pub struct FilesystemScanner {
    reader: FileSystemReader,
    mode: ScanMode,
    extra_exclusions: Vec<PathBuf>,
}

impl FilesystemScanner {
    pub fn new(mode: ScanMode) -> Self {
        Self {
            reader: FileSystemReader::new(),
            mode,
            extra_exclusions: Vec::new(),
        }
    }

    /// Adds user-provided path prefixes to skip; relative ones are taken from the scan root
    pub fn with_exclusions(mut self, exclusions: Vec<PathBuf>) -> Self {
        self.extra_exclusions = exclusions;
        self
    }

    fn excluded_prefixes(&self, root: &Path) -> Vec<String> {
        EXCLUDED_ROOTS
            .iter()
            .map(|p| p.to_string())
            .chain(self.extra_exclusions.iter().map(|p| {
                let absolute = if p.is_absolute() {
                    p.clone()
                } else {
                    root.join(p)
                };
                absolute.to_string_lossy().into_owned()
            }))
            .collect()
    }

    fn evidence_for(&self, entry: &DirEntry) -> Vec<Evidence> {
        let path = entry.path();
        let Some(file_name) = entry.file_name().to_str() else {
            return Vec::new();
        };
        let file_type = entry.file_type();

        if is_metadata_dir_name(file_name) && self.mode.includes(SourceBucket::PkgPackages) {
            if file_type.is_dir() {
                return self.python_dir_evidence(path).into_iter().collect();
            }
            if file_type.is_file() {
                return self.python_file_evidence(path).into_iter().collect();
            }
            return Vec::new();
        }

        if !file_type.is_file() {
            return Vec::new();
        }

        let inside_node_modules = path.parent().is_some_and(has_node_modules_component);
        match file_name {
            PACKAGE_JSON if inside_node_modules && self.mode.includes(SourceBucket::NodeModules) => {
                self.node_module_evidence(path).into_iter().collect()
            }
            PACKAGE_LOCK if !inside_node_modules && self.mode.includes(SourceBucket::PackageLock) => {
                self.package_lock_evidence(path)
            }
            YARN_LOCK if !inside_node_modules && self.mode.includes(SourceBucket::YarnLock) => {
                self.yarn_lock_evidence(path)
            }
            _ => Vec::new(),
        }
    }

    fn python_dir_evidence(&self, metadata_dir: &Path) -> Option<Evidence> {
        let mut fields = MetadataFields::new();
        for file in METADATA_FILES {
            if let Some(text) = self.reader.read_artifact(&metadata_dir.join(file)) {
                fields.feed(&text);
            }
            if fields.is_complete() {
                break;
            }
        }

        let Some(meta) = fields.finish() else {
            tracing::debug!(path = %metadata_dir.display(), "metadata directory without a name");
            return None;
        };
        Some(Evidence::new(
            Ecosystem::Python,
            meta.name,
            meta.version,
            metadata_dir.display().to_string(),
            SourceBucket::PkgPackages,
        ))
    }

    /// Legacy installs write `*.egg-info` as a single PKG-INFO style file
    fn python_file_evidence(&self, path: &Path) -> Option<Evidence> {
        let meta = parse_metadata(&self.reader.read_artifact(path)?)?;
        Some(Evidence::new(
            Ecosystem::Python,
            meta.name,
            meta.version,
            path.display().to_string(),
            SourceBucket::PkgPackages,
        ))
    }

    fn node_module_evidence(&self, manifest: &Path) -> Option<Evidence> {
        let text = self.reader.read_artifact(manifest)?;
        let Some(entry) = parse_package_json(&text) else {
            tracing::debug!(path = %manifest.display(), "package.json without name or version");
            return None;
        };
        let package_dir = manifest.parent().unwrap_or(manifest);
        Some(Evidence::new(
            Ecosystem::Npm,
            entry.name,
            entry.version,
            package_dir.display().to_string(),
            SourceBucket::NodeModules,
        ))
    }

    fn package_lock_evidence(&self, lockfile: &Path) -> Vec<Evidence> {
        let Some(text) = self.reader.read_artifact(lockfile) else {
            return Vec::new();
        };
        let entries = parse_package_lock(&text);
        if entries.is_empty() {
            tracing::debug!(path = %lockfile.display(), "no packages recovered from lockfile");
        }
        entries
            .into_iter()
            .map(|entry| {
                Evidence::new(
                    Ecosystem::Npm,
                    entry.name,
                    entry.version,
                    format!("{}#{}", lockfile.display(), entry.key),
                    SourceBucket::PackageLock,
                )
                .with_env(entry.env)
            })
            .collect()
    }

    fn yarn_lock_evidence(&self, lockfile: &Path) -> Vec<Evidence> {
        let Some(text) = self.reader.read_artifact(lockfile) else {
            return Vec::new();
        };
        let entries = parse_yarn_lock(&text);
        if entries.is_empty() {
            tracing::debug!(path = %lockfile.display(), "no packages recovered from lockfile");
        }
        entries
            .into_iter()
            .map(|entry| {
                Evidence::new(
                    Ecosystem::Npm,
                    entry.name,
                    entry.version,
                    format!("{}#{}", lockfile.display(), entry.alias),
                    SourceBucket::YarnLock,
                )
            })
            .collect()
    }
}

impl Default for FilesystemScanner {
    fn default() -> Self {
        Self::new(ScanMode::Auto)
    }
}

impl EvidenceSource for FilesystemScanner {
    fn scan<'a>(&'a self, root: &Path) -> Result<Box<dyn Iterator<Item = Evidence> + 'a>> {
        let root = root
            .canonicalize()
            .map_err(|e| ScanError::InvalidProjectPath {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
        if !root.is_dir() {
            return Err(ScanError::InvalidProjectPath {
                path: root,
                reason: "Path is not a directory".to_string(),
            }
            .into());
        }

        let excluded = self.excluded_prefixes(&root);
        tracing::debug!(root = %root.display(), mode = %self.mode, "starting filesystem scan");

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(move |entry| !is_excluded(entry.path(), &excluded))
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable directory entry");
                    None
                }
            })
            .flat_map(move |entry| self.evidence_for(&entry));

        Ok(Box::new(walker))
    }
}

fn is_excluded(path: &Path, prefixes: &[String]) -> bool {
    let path = path.to_string_lossy();
    prefixes.iter().any(|prefix| path.starts_with(prefix.as_str()))
}

fn has_node_modules_component(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == NODE_MODULES))
}
