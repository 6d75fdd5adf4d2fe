//! Directory traversal for component discovery

use super::file_record::{FileRecord, SourceFile};
use super::heuristics::looks_like_component;
use crate::config::ScannerConfig;
use crate::error::ScanError;
use crate::paths::relative_slash_path;
use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// A file the scanner saw but did not hand to extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SkippedFile {
    pub path: String,
    pub reason: String,
}

/// Result of one scan pass
#[derive(Debug, Clone, Default)]
pub struct ScanOutput {
    /// Candidate component files, sorted by relative path
    pub files: Vec<SourceFile>,
    /// Files with an allowed extension that were skipped
    pub skipped: Vec<SkippedFile>,
    /// Number of files with an allowed extension that were inspected
    pub files_seen: usize,
}

pub struct SourceScanner {
    pub(crate) root: PathBuf,
    pub(crate) component_dirs: Vec<String>,
    pub(crate) ignored_dirs: Vec<String>,
    pub(crate) extensions: Vec<String>,
    pub(crate) max_file_chars: usize,
}

impl SourceScanner {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::from_config(root, &ScannerConfig::default())
    }

    pub fn from_config(root: impl AsRef<Path>, config: &ScannerConfig) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            component_dirs: config.component_dirs.clone(),
            ignored_dirs: config.ignored_dirs.clone(),
            extensions: config.extensions.clone(),
            max_file_chars: config.max_file_chars,
        }
    }

    /// Replace the ignored directory names for this scanner
    pub fn with_ignored_dirs(mut self, ignored_dirs: Vec<String>) -> Self {
        self.ignored_dirs = ignored_dirs;
        self
    }

    pub fn with_max_file_chars(mut self, max_file_chars: usize) -> Self {
        self.max_file_chars = max_file_chars;
        self
    }

    /// Walk the component directories and collect candidate component files
    pub fn scan(&self) -> Result<ScanOutput, ScanError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.display().to_string()));
        }
        if !self.root.is_dir() {
            return Err(ScanError::NotADirectory(self.root.display().to_string()));
        }
        fs::read_dir(&self.root)
            .map_err(|e| ScanError::WalkFailed(format!("{}: {}", self.root.display(), e)))?;

        // Keyed by relative path so overlapping directories collapse
        let mut found: BTreeMap<String, SourceFile> = BTreeMap::new();
        let mut skipped: BTreeMap<String, String> = BTreeMap::new();
        let mut seen = BTreeSet::new();

        for dir in self.scan_roots() {
            self.walk_dir(&dir, &mut found, &mut skipped, &mut seen);
        }

        let output = ScanOutput {
            files: found.into_values().collect(),
            skipped: skipped
                .into_iter()
                .map(|(path, reason)| SkippedFile { path, reason })
                .collect(),
            files_seen: seen.len(),
        };

        tracing::info!(
            "Scanned {} files, {} component candidates, {} skipped",
            output.files_seen,
            output.files.len(),
            output.skipped.len()
        );
        Ok(output)
    }

    /// Existing component directories, or the root when none exists
    pub(crate) fn scan_roots(&self) -> Vec<PathBuf> {
        let dirs: Vec<PathBuf> = self
            .component_dirs
            .iter()
            .map(|d| self.root.join(d))
            .filter(|d| d.is_dir())
            .collect();

        if dirs.is_empty() {
            tracing::debug!(
                "No component directories under {:?}, scanning the root",
                self.root
            );
            vec![self.root.clone()]
        } else {
            dirs
        }
    }

    fn walk_dir(
        &self,
        dir: &Path,
        found: &mut BTreeMap<String, SourceFile>,
        skipped: &mut BTreeMap<String, String>,
        seen: &mut BTreeSet<String>,
    ) {
        let ignored = self.ignored_dirs.clone();
        let walker = WalkBuilder::new(dir)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                !(is_dir && entry.depth() > 0 && is_ignored_name(&ignored, entry.file_name()))
            })
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read directory entry under {:?}: {}", dir, e);
                    continue;
                }
            };
            let path = entry.path();

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            if !self.has_allowed_extension(path) {
                continue;
            }

            let relative_path = relative_slash_path(&self.root, path);
            if !seen.insert(relative_path.clone()) {
                continue;
            }

            match self.read_candidate(path, &relative_path) {
                Ok(Some(file)) => {
                    found.insert(relative_path, file);
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", relative_path, e);
                    skipped.insert(relative_path, e.to_string());
                }
            }
        }
    }

    /// Read a file and apply the size limit and component heuristic
    fn read_candidate(
        &self,
        path: &Path,
        relative_path: &str,
    ) -> Result<Option<SourceFile>, ScanError> {
        let metadata = fs::metadata(path).map_err(|e| ScanError::ReadFailed {
            file: relative_path.to_string(),
            reason: e.to_string(),
        })?;

        let content = fs::read_to_string(path).map_err(|e| ScanError::ReadFailed {
            file: relative_path.to_string(),
            reason: e.to_string(),
        })?;

        let chars = content.chars().count();
        if chars > self.max_file_chars {
            return Err(ScanError::FileTooLarge {
                path: relative_path.to_string(),
                size: chars,
                max: self.max_file_chars,
            });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let is_candidate = looks_like_component(&file_name, &content);
        if !is_candidate {
            return Ok(None);
        }

        let modified: DateTime<Utc> = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| DateTime::<Utc>::from(std::time::UNIX_EPOCH));

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Ok(Some(SourceFile {
            record: FileRecord {
                path: path.to_path_buf(),
                relative_path: relative_path.to_string(),
                extension,
                size: metadata.len(),
                modified,
                is_candidate,
            },
            content,
        }))
    }

    /// Check if the file extension is in the allow-list
    pub(crate) fn has_allowed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

fn is_ignored_name(ignored: &[String], name: &std::ffi::OsStr) -> bool {
    let name = name.to_string_lossy();
    ignored.iter().any(|i| *i == name)
}

#[cfg(test)]
mod tests;
