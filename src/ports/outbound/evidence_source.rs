use crate::inventory::domain::Evidence;
use crate::shared::Result;
use std::path::Path;

/// EvidenceSource port for discovering raw dependency observations
///
/// This port abstracts how a project tree is searched for package-manager
/// artifacts. Implementations must be read-only so a scan can be restarted.
pub trait EvidenceSource {
    /// Starts a lazy scan of the tree rooted at `root`
    ///
    /// # Errors
    /// Returns an error only when `root` itself is unusable. Unreadable or
    /// malformed artifacts inside the tree are skipped, not reported.
    fn scan<'a>(&'a self, root: &Path) -> Result<Box<dyn Iterator<Item = Evidence> + 'a>>;
}
