/// Formatter adapters for the compact inventory form
mod compact_formatter;

pub use compact_formatter::{
    describe_finding, CompactInventoryFormatter, COMPACT_FORMAT, COMPACT_VERSION,
};
