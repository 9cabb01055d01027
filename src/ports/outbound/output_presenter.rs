use crate::shared::Result;

/// OutputPresenter port for presenting final output
///
/// This port abstracts the output destination (stdout, file, etc.)
/// where the compact inventory is written.
pub trait OutputPresenter {
    /// Presents the serialized inventory to the output destination
    ///
    /// # Errors
    /// Returns an error if:
    /// - Writing to the output destination fails
    /// - The destination is a symbolic link or its parent directory is missing
    fn present(&self, content: &str) -> Result<()>;
}
