/// Result alias used by the application layer and the binary.
/// Domain operations that can fail in a classified way return `ScanError` instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
