//! File-system watcher feeding cache invalidation.
//!
//! Wraps a `notify` recommended watcher and forwards change, add and delete
//! notifications for component sources and workspace config files over a
//! tokio channel.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::error::WatchError;

/// Kind of file-system change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    Changed,
    Added,
    Deleted,
}

impl WatchEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Changed => "changed",
            Self::Added => "added",
            Self::Deleted => "deleted",
        }
    }

    fn from_notify(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(Self::Added),
            EventKind::Modify(_) => Some(Self::Changed),
            EventKind::Remove(_) => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// A single path-level notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub path: PathBuf,
    pub kind: WatchEventKind,
}

/// Whether a path is relevant to the analysis: an allowed source extension
/// or one of the watched config file names, outside ignored directories.
pub fn is_watched_path(
    path: &Path,
    extensions: &[String],
    watch_files: &[String],
    ignored_dirs: &[String],
) -> bool {
    let in_ignored_dir = path.components().any(|c| {
        let name = c.as_os_str().to_string_lossy();
        ignored_dirs.iter().any(|i| *i == name)
    });
    if in_ignored_dir {
        return false;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default();
    if watch_files.iter().any(|w| *w == file_name) {
        return true;
    }

    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Filter settings shared with the notify callback
#[derive(Debug, Clone)]
struct WatchFilter {
    extensions: Vec<String>,
    watch_files: Vec<String>,
    ignored_dirs: Vec<String>,
}

impl WatchFilter {
    fn forward(&self, event: Event, tx: &UnboundedSender<WatchEvent>) {
        let Some(kind) = WatchEventKind::from_notify(&event.kind) else {
            return;
        };

        for path in event.paths {
            if !is_watched_path(
                &path,
                &self.extensions,
                &self.watch_files,
                &self.ignored_dirs,
            ) {
                continue;
            }
            tracing::debug!("File {} {:?}", kind.as_str(), path);
            // Receiver gone means the watcher is shutting down
            let _ = tx.send(WatchEvent { path, kind });
        }
    }
}

/// A running recursive watcher over a workspace root.
///
/// Dropping it stops the underlying OS watcher.
pub struct WorkspaceWatcher {
    _watcher: RecommendedWatcher,
    rx: UnboundedReceiver<WatchEvent>,
}

impl WorkspaceWatcher {
    /// Start watching `root` recursively
    pub fn start(
        root: &Path,
        extensions: Vec<String>,
        watch_files: Vec<String>,
        ignored_dirs: Vec<String>,
    ) -> Result<Self, WatchError> {
        let (tx, rx) = unbounded_channel();
        let filter = WatchFilter {
            extensions,
            watch_files,
            ignored_dirs,
        };

        let mut watcher =
            notify::recommended_watcher(move |res: notify::Result<Event>| match res {
                Ok(event) => filter.forward(event, &tx),
                Err(e) => tracing::warn!("File watcher error: {}", e),
            })
            .map_err(|e| WatchError::InitFailed(e.to_string()))?;

        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| WatchError::WatchFailed {
                path: root.display().to_string(),
                reason: e.to_string(),
            })?;

        tracing::info!("Watching {:?} for component changes", root);
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    /// Wait for the next relevant event; `None` once the watcher is closed
    pub async fn next_event(&mut self) -> Option<WatchEvent> {
        self.rx.recv().await
    }

    /// An already queued event, without waiting
    pub fn try_next_event(&mut self) -> Option<WatchEvent> {
        self.rx.try_recv().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind, RemoveKind};

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn filter() -> WatchFilter {
        WatchFilter {
            extensions: strings(&["tsx", "vue"]),
            watch_files: strings(&["package.json", "tsconfig.json"]),
            ignored_dirs: strings(&["node_modules", ".git"]),
        }
    }

    #[test]
    fn test_is_watched_path() {
        let f = filter();
        let watched =
            |p: &str| is_watched_path(Path::new(p), &f.extensions, &f.watch_files, &f.ignored_dirs);

        assert!(watched("/app/src/Button.tsx"));
        assert!(watched("/app/src/Card.VUE"));
        assert!(watched("/app/package.json"));
        assert!(watched("/app/tsconfig.json"));
        assert!(!watched("/app/src/styles.css"));
        assert!(!watched("/app/node_modules/lib/Button.tsx"));
        assert!(!watched("/app/.git/HEAD"));
    }

    #[test]
    fn test_event_kind_mapping() {
        assert_eq!(
            WatchEventKind::from_notify(&EventKind::Create(CreateKind::File)),
            Some(WatchEventKind::Added)
        );
        assert_eq!(
            WatchEventKind::from_notify(&EventKind::Modify(ModifyKind::Any)),
            Some(WatchEventKind::Changed)
        );
        assert_eq!(
            WatchEventKind::from_notify(&EventKind::Remove(RemoveKind::File)),
            Some(WatchEventKind::Deleted)
        );
        assert_eq!(WatchEventKind::from_notify(&EventKind::Any), None);
    }

    #[test]
    fn test_forward_filters_paths() {
        let (tx, mut rx) = unbounded_channel();
        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/app/src/Button.tsx"))
            .add_path(PathBuf::from("/app/src/readme.md"))
            .add_path(PathBuf::from("/app/node_modules/x/Y.tsx"));

        filter().forward(event, &tx);
        drop(tx);

        let first = rx.try_recv().unwrap();
        assert_eq!(first.path, PathBuf::from("/app/src/Button.tsx"));
        assert_eq!(first.kind, WatchEventKind::Changed);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_access_events_are_ignored() {
        let (tx, mut rx) = unbounded_channel();
        let event = Event::new(EventKind::Access(notify::event::AccessKind::Any))
            .add_path(PathBuf::from("/app/src/Button.tsx"));

        filter().forward(event, &tx);
        assert!(rx.try_recv().is_err());
    }
}
