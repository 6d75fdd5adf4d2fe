//! Project-level file access used by the workspace-wide detectors.
//!
//! Detectors for testing frameworks, styling, structure and manifests only
//! see a [`ProjectFiles`] implementation, so they stay pure functions of its
//! answers. [`LocalProject`] reads from disk; [`InMemoryProject`] lets a host
//! (or a test) supply the files directly.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::paths::relative_slash_path;

/// Read-only view of the files in a workspace
pub trait ProjectFiles: Send + Sync {
    /// All files, relative to the root with forward slashes, sorted
    fn list_files(&self) -> &[String];

    /// Read a file by relative path
    fn read_to_string(&self, rel: &str) -> Option<String>;

    /// Whether a file exists at the relative path
    fn exists(&self, rel: &str) -> bool {
        self.list_files()
            .binary_search_by(|f| f.as_str().cmp(rel))
            .is_ok()
    }

    /// Whether any listed file lives under the relative directory
    fn dir_exists(&self, rel: &str) -> bool {
        let prefix = format!("{}/", rel.trim_end_matches('/'));
        self.list_files().iter().any(|f| f.starts_with(&prefix))
    }
}

/// Files of a workspace on the local disk
#[derive(Debug, Clone)]
pub struct LocalProject {
    root: PathBuf,
    files: Vec<String>,
}

impl LocalProject {
    /// List every file under `root`, pruning ignored directory names
    pub fn load(root: impl AsRef<Path>, ignored_dirs: &[String]) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let mut files = Vec::new();

        let walker = WalkDir::new(&root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| {
                !(e.depth() > 0
                    && e.file_type().is_dir()
                    && ignored_dirs
                        .iter()
                        .any(|i| e.file_name().to_string_lossy() == i.as_str()))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| format!("Failed to list {:?}", root));
                }
                Err(e) => {
                    tracing::debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            if entry.file_type().is_file() {
                files.push(relative_slash_path(&root, entry.path()));
            }
        }

        files.sort();
        tracing::debug!("Listed {} project files under {:?}", files.len(), root);
        Ok(Self { root, files })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ProjectFiles for LocalProject {
    fn list_files(&self) -> &[String] {
        &self.files
    }

    fn read_to_string(&self, rel: &str) -> Option<String> {
        std::fs::read_to_string(self.root.join(rel)).ok()
    }
}

/// Files supplied directly by the caller
#[derive(Debug, Clone, Default)]
pub struct InMemoryProject {
    contents: BTreeMap<String, String>,
    files: Vec<String>,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn with_file(mut self, rel: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents.insert(rel.into(), content.into());
        self.files = self.contents.keys().cloned().collect();
        self
    }
}

impl ProjectFiles for InMemoryProject {
    fn list_files(&self) -> &[String] {
        &self.files
    }

    fn read_to_string(&self, rel: &str) -> Option<String> {
        self.contents.get(rel).cloned()
    }
}

/// The dependency sections of a `package.json`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Parse the root `package.json`, if present and valid
    pub fn load(project: &dyn ProjectFiles) -> Option<Self> {
        let content = project.read_to_string("package.json")?;
        match serde_json::from_str(&content) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                tracing::warn!("Ignoring unparseable package.json: {}", e);
                None
            }
        }
    }

    /// Every dependency name across all sections, sorted
    pub fn dependency_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
            .collect()
    }

    pub fn has_dependency(&self, name: &str) -> bool {
        self.dependencies.contains_key(name)
            || self.dev_dependencies.contains_key(name)
            || self.peer_dependencies.contains_key(name)
    }

    /// Whether any dependency name starts with `prefix` (e.g. `@radix-ui/`)
    pub fn has_dependency_prefix(&self, prefix: &str) -> bool {
        self.dependency_names()
            .iter()
            .any(|name| name.starts_with(prefix))
    }
}
