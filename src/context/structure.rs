//! Framework, TypeScript and project-structure detection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::scanner::{PackageManifest, ProjectFiles, detect_language, is_typescript_extension};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Next,
    Nuxt,
    Vue,
    React,
    #[default]
    Unknown,
}

fn extension(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.').map(|(_, ext)| ext)
}

fn has_root_file_prefix(project: &dyn ProjectFiles, prefix: &str) -> bool {
    project
        .list_files()
        .iter()
        .any(|f| !f.contains('/') && f.starts_with(prefix))
}

fn has_extension(project: &dyn ProjectFiles, extensions: &[&str]) -> bool {
    project
        .list_files()
        .iter()
        .filter_map(|f| extension(f))
        .any(|ext| extensions.contains(&ext))
}

/// Manifest dependencies first, then files typical of each framework
pub fn detect_framework(project: &dyn ProjectFiles, manifest: Option<&PackageManifest>) -> Framework {
    let has = |dep: &str| manifest.is_some_and(|m| m.has_dependency(dep));

    if has("next") || has_root_file_prefix(project, "next.config.") {
        Framework::Next
    } else if has("nuxt") || has_root_file_prefix(project, "nuxt.config.") {
        Framework::Nuxt
    } else if has("vue") || has_extension(project, &["vue"]) {
        Framework::Vue
    } else if has("react") || has_extension(project, &["jsx", "tsx"]) {
        Framework::React
    } else {
        Framework::Unknown
    }
}

/// `tsconfig.json` at the root or any TypeScript source
pub fn detect_typescript(project: &dyn ProjectFiles) -> bool {
    project.exists("tsconfig.json")
        || project
            .list_files()
            .iter()
            .filter_map(|f| extension(f))
            .any(is_typescript_extension)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ProjectStructure {
    /// Directories up to the configured depth, sorted
    pub directories: Vec<String>,
    /// Configured component directories that exist
    pub component_dirs: Vec<String>,
    /// Next.js `app/` router pages present
    pub app_router: bool,
    /// Next.js `pages/` router present
    pub pages_router: bool,
    /// File count per extension
    pub file_counts: BTreeMap<String, usize>,
    /// Source file count per language
    pub languages: BTreeMap<String, usize>,
}

fn is_route_source(path: &str) -> bool {
    matches!(extension(path), Some("js" | "jsx" | "ts" | "tsx"))
}

pub fn project_structure(
    project: &dyn ProjectFiles,
    component_dirs: &[String],
    depth: usize,
) -> ProjectStructure {
    let files = project.list_files();

    let mut directories = BTreeSet::new();
    let mut file_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut languages: BTreeMap<String, usize> = BTreeMap::new();
    for file in files {
        let segments: Vec<&str> = file.split('/').collect();
        let dir_count = segments.len().saturating_sub(1).min(depth);
        for end in 1..=dir_count {
            directories.insert(segments[..end].join("/"));
        }
        if let Some(ext) = extension(file) {
            *file_counts.entry(ext.to_lowercase()).or_default() += 1;
            if let Some(language) = detect_language(ext) {
                *languages.entry(language.to_string()).or_default() += 1;
            }
        }
    }

    let under = |dirs: &[&str], file: &str| dirs.iter().any(|d| file.starts_with(d));
    let app_router = files.iter().any(|f| {
        under(&["app/", "src/app/"], f)
            && f.rsplit('/').next().is_some_and(|n| n.starts_with("page."))
            && is_route_source(f)
    });
    let pages_router = files
        .iter()
        .any(|f| under(&["pages/", "src/pages/"], f) && is_route_source(f));

    ProjectStructure {
        directories: directories.into_iter().collect(),
        component_dirs: component_dirs
            .iter()
            .filter(|d| project.dir_exists(d))
            .cloned()
            .collect(),
        app_router,
        pages_router,
        file_counts,
        languages,
    }
}
