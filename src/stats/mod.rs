mod summary;

pub use summary::{ExtensionStats, ScanResult};
