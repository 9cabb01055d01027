/// Filesystem adapters: artifact discovery, artifact parsers and output writers
mod file_reader;
mod file_writer;
pub mod npm_manifest;
pub mod python_metadata;
mod scanner;
pub mod yarn_lock;

pub use file_reader::{parse_direct_url, FileSystemReader};
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use scanner::{FilesystemScanner, EXCLUDED_ROOTS};
