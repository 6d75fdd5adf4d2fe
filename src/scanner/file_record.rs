//! File information structures produced by a scan pass

use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// Metadata about a discovered source file.
///
/// Immutable for one scan pass; a re-scan produces a new record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub path: PathBuf,
    /// Path relative to the analysis root, forward slashes
    pub relative_path: String,
    /// Extension without the leading dot
    pub extension: String,
    /// Size in bytes
    pub size: u64,
    pub modified: DateTime<Utc>,
    pub is_candidate: bool,
}

impl FileRecord {
    /// Modification time as epoch milliseconds, the cache key component
    pub fn mtime_key(&self) -> i64 {
        self.modified.timestamp_millis()
    }
}

/// A candidate component file together with its content
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub record: FileRecord,
    pub content: String,
}
