//! Source scanning: directory traversal, component-file heuristics,
//! project listings and file-system watching.
//!
//! The scanner walks the configured component directories depth-first,
//! never entering ignored directories, and yields one [`SourceFile`] per
//! candidate component file. Oversized or unreadable files are skipped and
//! reported, never fatal.

mod file_record;
mod file_walker;
pub mod heuristics;
mod language;
mod project;
mod watcher;

pub use file_record::{FileRecord, SourceFile};
pub use file_walker::{ScanOutput, SkippedFile, SourceScanner};
pub use language::{detect_language, is_typescript_extension};
pub use project::{InMemoryProject, LocalProject, PackageManifest, ProjectFiles};
pub use watcher::{WatchEvent, WatchEventKind, WorkspaceWatcher, is_watched_path};
