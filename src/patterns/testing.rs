//! Testing-framework detection from test files, the manifest and config files.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::scanner::{PackageManifest, ProjectFiles};

/// Directory names whose contents are tests
const TEST_DIRS: &[&str] = &["__tests__", "tests", "test", "e2e", "cypress"];

/// Manifest dependency (or prefix ending in `/`) to framework name
const MANIFEST_FRAMEWORKS: &[(&str, &str)] = &[
    ("jest", "jest"),
    ("vitest", "vitest"),
    ("mocha", "mocha"),
    ("chai", "chai"),
    ("@testing-library/", "testing-library"),
    ("playwright", "playwright"),
    ("@playwright/test", "playwright"),
    ("cypress", "cypress"),
    ("enzyme", "enzyme"),
    ("jasmine", "jasmine"),
    ("jasmine-core", "jasmine"),
    ("karma", "karma"),
];

/// Config file name prefix (or exact name) to framework name
const CONFIG_FRAMEWORKS: &[(&str, &str)] = &[
    ("jest.config.", "jest"),
    ("vitest.config.", "vitest"),
    ("playwright.config.", "playwright"),
    ("cypress.config.", "cypress"),
    ("cypress.json", "cypress"),
    (".mocharc", "mocha"),
    ("karma.conf.js", "karma"),
];

/// Testing facts of a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TestingSummary {
    /// Frameworks from the manifest and config files, sorted
    pub frameworks: Vec<String>,
    /// Number of test files found
    pub test_files: usize,
    /// Test directories, sorted
    pub test_directories: Vec<String>,
    /// Config files that identified a framework, sorted
    pub config_files: Vec<String>,
}

impl TestingSummary {
    pub fn has_tests(&self) -> bool {
        self.test_files > 0 || !self.frameworks.is_empty()
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Whether a file is a test by name (`.test.`/`.spec.`) or location
pub fn is_test_file(path: &str) -> bool {
    let name = basename(path);
    if name.contains(".test.") || name.contains(".spec.") || name.contains(".cy.") {
        return true;
    }
    let mut dirs = path.split('/').rev().skip(1);
    dirs.any(|d| TEST_DIRS.contains(&d))
}

/// The directory prefix ending at the first test-directory segment
fn test_directory(path: &str) -> Option<String> {
    let segments: Vec<&str> = path.split('/').collect();
    let dir_count = segments.len().saturating_sub(1);
    segments[..dir_count]
        .iter()
        .position(|s| TEST_DIRS.contains(s))
        .map(|i| segments[..=i].join("/"))
}

/// Frameworks named by manifest dependencies
pub fn manifest_frameworks(manifest: &PackageManifest) -> BTreeSet<&'static str> {
    let names = manifest.dependency_names();
    MANIFEST_FRAMEWORKS
        .iter()
        .filter(|(dep, _)| {
            if dep.ends_with('/') {
                names.iter().any(|n| n.starts_with(dep))
            } else {
                names.contains(dep)
            }
        })
        .map(|(_, framework)| *framework)
        .collect()
}

/// Frameworks named by config files, with the files that matched
pub fn config_frameworks(files: &[String]) -> (BTreeSet<&'static str>, BTreeSet<String>) {
    let mut frameworks = BTreeSet::new();
    let mut matched = BTreeSet::new();
    for file in files {
        let name = basename(file);
        for (pattern, framework) in CONFIG_FRAMEWORKS {
            if name == *pattern || name.starts_with(pattern) {
                frameworks.insert(*framework);
                matched.insert(file.clone());
            }
        }
    }
    (frameworks, matched)
}

/// Union of all three testing signals
pub fn detect_testing(project: &dyn ProjectFiles, manifest: Option<&PackageManifest>) -> TestingSummary {
    let files = project.list_files();

    let mut frameworks: BTreeSet<&'static str> =
        manifest.map(manifest_frameworks).unwrap_or_default();
    let (from_config, config_files) = config_frameworks(files);
    frameworks.extend(from_config);

    let test_files = files.iter().filter(|f| is_test_file(f)).count();
    let test_directories: BTreeSet<String> = files.iter().filter_map(|f| test_directory(f)).collect();

    TestingSummary {
        frameworks: frameworks.into_iter().map(String::from).collect(),
        test_files,
        test_directories: test_directories.into_iter().collect(),
        config_files: config_files.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::InMemoryProject;

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file("src/Button.test.tsx"));
        assert!(is_test_file("src/Button.spec.js"));
        assert!(is_test_file("src/__tests__/Button.tsx"));
        assert!(is_test_file("e2e/login.ts"));
        assert!(!is_test_file("src/Button.tsx"));
        assert!(!is_test_file("src/testing-utils.ts"));
        assert!(!is_test_file("test"));
    }

    #[test]
    fn test_union_of_signals() {
        let project = InMemoryProject::new()
            .with_file(
                "package.json",
                r#"{ "devDependencies": { "jest": "29", "@testing-library/react": "14" } }"#,
            )
            .with_file("playwright.config.ts", "export default {}")
            .with_file("jest.config.js", "module.exports = {}")
            .with_file("src/__tests__/App.test.tsx", "")
            .with_file("src/Button.spec.tsx", "")
            .with_file("src/Button.tsx", "");
        let manifest = PackageManifest::load(&project);

        let summary = detect_testing(&project, manifest.as_ref());
        assert_eq!(summary.frameworks, vec!["jest", "playwright", "testing-library"]);
        assert_eq!(summary.test_files, 2);
        assert_eq!(summary.test_directories, vec!["src/__tests__"]);
        assert_eq!(
            summary.config_files,
            vec!["jest.config.js", "playwright.config.ts"]
        );
        assert!(summary.has_tests());
    }

    #[test]
    fn test_no_testing_signals() {
        let project = InMemoryProject::new().with_file("src/App.tsx", "");
        let summary = detect_testing(&project, None);
        assert_eq!(summary, TestingSummary::default());
        assert!(!summary.has_tests());
    }

    #[test]
    fn test_cypress_json_and_mocharc() {
        let project = InMemoryProject::new()
            .with_file("cypress.json", "{}")
            .with_file(".mocharc.yml", "")
            .with_file("cypress/e2e/login.cy.ts", "");
        let summary = detect_testing(&project, None);
        assert_eq!(summary.frameworks, vec!["cypress", "mocha"]);
        assert_eq!(summary.test_directories, vec!["cypress"]);
        assert_eq!(summary.test_files, 1);
    }
}
