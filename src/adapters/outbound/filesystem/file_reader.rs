use crate::inventory::domain::InstallerProvenance;
use crate::ports::outbound::{ProvenanceReader, DIRECT_URL_FILE};
use crate::shared::security::{read_text_lossy, MAX_FILE_SIZE};
use std::path::Path;

/// FileSystemReader adapter for reading artifacts from disk
///
/// Every read rejects symbolic links, non-regular files and files above
/// the size limit. Failures are logged at debug level and turned into
/// "nothing found" so a single bad artifact never aborts a scan.
pub struct FileSystemReader {
    max_file_size: u64,
}

impl FileSystemReader {
    pub fn new() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_max_file_size(max_file_size: u64) -> Self {
        Self { max_file_size }
    }

    /// Reads an artifact as text, or `None` if it is missing or unreadable
    pub fn read_artifact(&self, path: &Path) -> Option<String> {
        if !path.exists() {
            return None;
        }
        match read_text_lossy(path, self.max_file_size) {
            Ok(text) => Some(text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "skipping unreadable artifact");
                None
            }
        }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ProvenanceReader for FileSystemReader {
    fn read_provenance(&self, metadata_dir: &Path) -> Option<InstallerProvenance> {
        let path = metadata_dir.join(DIRECT_URL_FILE);
        let text = self.read_artifact(&path)?;
        let provenance = parse_direct_url(&text);
        if provenance.is_none() {
            tracing::debug!(path = %path.display(), "ignoring malformed provenance record");
        }
        provenance
    }
}

/// Parses the JSON provenance record pip writes for direct-URL installs
pub fn parse_direct_url(text: &str) -> Option<InstallerProvenance> {
    serde_json::from_str(text).ok()
}
