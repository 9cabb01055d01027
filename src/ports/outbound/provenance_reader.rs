use crate::inventory::domain::InstallerProvenance;
use std::path::Path;

/// Name of the provenance file pip writes into a distribution's metadata directory
pub const DIRECT_URL_FILE: &str = "direct_url.json";

/// ProvenanceReader port for installer provenance records
///
/// Abstracts where `direct_url.json` comes from so identity resolution
/// can be tested without a filesystem.
pub trait ProvenanceReader {
    /// Reads the provenance record stored in a metadata directory
    ///
    /// # Returns
    /// `None` when the record is absent, unreadable or malformed
    fn read_provenance(&self, metadata_dir: &Path) -> Option<InstallerProvenance>;
}
