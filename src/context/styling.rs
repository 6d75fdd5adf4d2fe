//! Styling-approach detection as an ordered rule list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scanner::{PackageManifest, ProjectFiles};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StylingApproach {
    Tailwind,
    StyledComponents,
    Emotion,
    CssModules,
    Sass,
    Css,
    #[default]
    None,
}

/// Inputs the styling rules look at
struct StylingSignals<'a> {
    manifest: Option<&'a PackageManifest>,
    files: &'a [String],
}

impl StylingSignals<'_> {
    fn has_dependency(&self, name: &str) -> bool {
        self.manifest.is_some_and(|m| m.has_dependency(name))
    }

    fn has_dependency_prefix(&self, prefix: &str) -> bool {
        self.manifest.is_some_and(|m| m.has_dependency_prefix(prefix))
    }

    fn has_file(&self, pred: impl Fn(&str) -> bool) -> bool {
        self.files.iter().any(|f| pred(basename(f)))
    }
}

fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Ordered (predicate, approach) rules; the first match is the primary approach
const RULES: &[(fn(&StylingSignals) -> bool, StylingApproach)] = &[
    (
        |s| s.has_dependency("tailwindcss") || s.has_file(|f| f.starts_with("tailwind.config.")),
        StylingApproach::Tailwind,
    ),
    (
        |s| s.has_dependency("styled-components"),
        StylingApproach::StyledComponents,
    ),
    (
        |s| s.has_dependency_prefix("@emotion/"),
        StylingApproach::Emotion,
    ),
    (
        |s| {
            s.has_file(|f| {
                f.ends_with(".module.css") || f.ends_with(".module.scss") || f.ends_with(".module.sass")
            })
        },
        StylingApproach::CssModules,
    ),
    (
        |s| {
            s.has_dependency("sass")
                || s.has_dependency("node-sass")
                || s.has_file(|f| f.ends_with(".scss") || f.ends_with(".sass"))
        },
        StylingApproach::Sass,
    ),
    (|s| s.has_file(|f| f.ends_with(".css")), StylingApproach::Css),
];

/// Primary styling approach plus every approach detected
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StylingSummary {
    pub primary: StylingApproach,
    /// Detected approaches in priority order
    pub approaches: Vec<StylingApproach>,
}

pub fn detect_styling(
    project: &dyn ProjectFiles,
    manifest: Option<&PackageManifest>,
) -> StylingSummary {
    let signals = StylingSignals {
        manifest,
        files: project.list_files(),
    };
    let approaches: Vec<StylingApproach> = RULES
        .iter()
        .filter(|(rule, _)| rule(&signals))
        .map(|(_, approach)| *approach)
        .collect();

    StylingSummary {
        primary: approaches.first().copied().unwrap_or_default(),
        approaches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::InMemoryProject;

    #[test]
    fn test_tailwind_wins_over_css() {
        let project = InMemoryProject::new()
            .with_file("package.json", r#"{ "devDependencies": { "tailwindcss": "3" } }"#)
            .with_file("src/index.css", "@tailwind base;");
        let manifest = PackageManifest::load(&project);

        let summary = detect_styling(&project, manifest.as_ref());
        assert_eq!(summary.primary, StylingApproach::Tailwind);
        assert_eq!(
            summary.approaches,
            vec![StylingApproach::Tailwind, StylingApproach::Css]
        );
    }

    #[test]
    fn test_tailwind_config_without_dependency() {
        let project = InMemoryProject::new().with_file("tailwind.config.js", "");
        assert_eq!(detect_styling(&project, None).primary, StylingApproach::Tailwind);
    }

    #[test]
    fn test_css_modules_and_sass() {
        let project = InMemoryProject::new()
            .with_file("src/Button.module.scss", "")
            .with_file("src/App.tsx", "");
        let summary = detect_styling(&project, None);
        assert_eq!(summary.primary, StylingApproach::CssModules);
        assert_eq!(
            summary.approaches,
            vec![StylingApproach::CssModules, StylingApproach::Sass]
        );
    }

    #[test]
    fn test_emotion_prefix() {
        let project = InMemoryProject::new()
            .with_file("package.json", r#"{ "dependencies": { "@emotion/react": "11" } }"#);
        let manifest = PackageManifest::load(&project);
        assert_eq!(
            detect_styling(&project, manifest.as_ref()).primary,
            StylingApproach::Emotion
        );
    }

    #[test]
    fn test_no_styling() {
        let project = InMemoryProject::new().with_file("src/App.tsx", "");
        let summary = detect_styling(&project, None);
        assert_eq!(summary, StylingSummary::default());
    }
}
