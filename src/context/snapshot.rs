//! The workspace snapshot handed to prompt construction.

use anyhow::{Context, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::design_system::DesignSystemSummary;
use super::structure::{Framework, ProjectStructure};
use super::styling::StylingSummary;
use crate::graph::DependencyGraph;
use crate::patterns::{ArchitectureSummary, PatternSummary};
use crate::scanner::SkippedFile;
use crate::types::{Category, ComponentRecord};

/// What the scan saw besides the accepted components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ScanDiagnostics {
    /// Files with an allowed extension that were inspected
    pub files_scanned: usize,
    /// Oversized or unreadable files, sorted by path
    pub skipped: Vec<SkippedFile>,
    /// Paths whose extraction fell back to a basic record, sorted
    pub degraded: Vec<String>,
}

/// Complete analysis of one workspace scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct WorkspaceSnapshot {
    /// Fingerprint of the inputs; equal trees give equal versions
    pub version: String,
    pub framework: Framework,
    pub typescript: bool,
    pub styling: StylingSummary,
    pub structure: ProjectStructure,
    /// Components sorted by path
    pub components: Vec<ComponentRecord>,
    pub graph: DependencyGraph,
    pub patterns: PatternSummary,
    pub architecture: ArchitectureSummary,
    pub design_system: DesignSystemSummary,
    pub diagnostics: ScanDiagnostics,
}

/// The parts of a component a prompt needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentSummary {
    pub name: String,
    pub path: String,
    pub category: Category,
    pub description: Option<String>,
    pub props: Vec<String>,
}

impl From<&ComponentRecord> for ComponentSummary {
    fn from(record: &ComponentRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            category: record.category,
            description: record.description.clone(),
            props: record.props.clone(),
        }
    }
}

/// Serialized name of a unit enum variant
fn label<T: Serialize>(value: &T) -> String {
    serde_json::to_value(value)
        .ok()
        .and_then(|v| v.as_str().map(String::from))
        .unwrap_or_default()
}

fn join_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

impl WorkspaceSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize workspace snapshot")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse workspace snapshot")
    }

    /// JSON schema of the snapshot format
    pub fn json_schema() -> serde_json::Value {
        schemars::schema_for!(WorkspaceSnapshot).to_value()
    }

    pub fn component_summaries(&self) -> Vec<ComponentSummary> {
        self.components.iter().map(ComponentSummary::from).collect()
    }

    /// Markdown block describing the workspace, listing at most `limit` components
    pub fn prompt_context(&self, limit: usize) -> String {
        let mut out = String::new();
        let language = if self.typescript { "TypeScript" } else { "JavaScript" };
        let naming = &self.patterns.naming;

        // Writing to a String cannot fail
        let _ = writeln!(out, "## Workspace");
        let _ = writeln!(out, "- Framework: {} ({})", label(&self.framework), language);
        let _ = writeln!(out, "- Styling: {}", label(&self.styling.primary));
        let _ = writeln!(
            out,
            "- State management: {}",
            label(&self.patterns.state_management)
        );
        let _ = writeln!(
            out,
            "- Naming: components {}, files {}, props {}, constants {}",
            label(&naming.components),
            label(&naming.files),
            label(&naming.props),
            label(&naming.constants)
        );
        let _ = writeln!(
            out,
            "- Patterns: {}",
            join_or_none(&self.patterns.architectural)
        );
        let _ = writeln!(
            out,
            "- Testing: {}",
            join_or_none(&self.patterns.testing.frameworks)
        );
        let _ = writeln!(
            out,
            "- UI libraries: {}",
            join_or_none(&self.design_system.ui_libraries)
        );
        if !self.architecture.data_flow.event_patterns.is_empty() {
            let _ = writeln!(
                out,
                "- Events: {}",
                self.architecture.data_flow.event_patterns.join(", ")
            );
        }

        let _ = writeln!(out, "\n## Components ({})", self.components.len());
        for summary in self.component_summaries().iter().take(limit) {
            let _ = write!(out, "- **{}** (`{}`)", summary.name, summary.path);
            if let Some(description) = &summary.description {
                let _ = write!(out, ": {}", description);
            }
            if !summary.props.is_empty() {
                let _ = write!(out, " Props: {}", summary.props.join(", "));
            }
            out.push('\n');
        }
        if self.components.len() > limit {
            let _ = writeln!(out, "- ... and {} more", self.components.len() - limit);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(components: Vec<ComponentRecord>) -> WorkspaceSnapshot {
        WorkspaceSnapshot {
            version: "v1".to_string(),
            framework: Framework::React,
            typescript: true,
            styling: StylingSummary::default(),
            structure: ProjectStructure::default(),
            graph: DependencyGraph::build(&components),
            components,
            patterns: PatternSummary::default(),
            architecture: ArchitectureSummary::default(),
            design_system: DesignSystemSummary::default(),
            diagnostics: ScanDiagnostics::default(),
        }
    }

    fn component(path: &str, description: Option<&str>, props: &[&str]) -> ComponentRecord {
        let mut record = ComponentRecord::basic(path);
        record.degraded = false;
        record.description = description.map(String::from);
        record.props = props.iter().map(|p| p.to_string()).collect();
        record
    }

    #[test]
    fn test_json_round_trip() {
        let snap = snapshot(vec![component("src/Button.tsx", None, &["label"])]);
        let json = snap.to_json().unwrap();
        assert!(json.contains("\"framework\": \"react\""));
        assert_eq!(WorkspaceSnapshot::from_json(&json).unwrap(), snap);
    }

    #[test]
    fn test_schema_names_top_level_fields() {
        let schema = WorkspaceSnapshot::json_schema();
        let properties = schema["properties"].as_object().unwrap();
        for field in ["version", "components", "graph", "patterns", "architecture"] {
            assert!(properties.contains_key(field), "missing {}", field);
        }
    }

    #[test]
    fn test_prompt_context() {
        let snap = snapshot(vec![
            component("src/Button.tsx", Some("Primary action button"), &["label", "onClick"]),
            component("src/Card.tsx", None, &[]),
            component("src/Modal.tsx", None, &[]),
        ]);
        let text = snap.prompt_context(2);

        assert!(text.contains("- Framework: react (TypeScript)"));
        assert!(text.contains("- Styling: none"));
        assert!(text.contains("- State management: local"));
        assert!(text.contains("components PascalCase"));
        assert!(text.contains("## Components (3)"));
        assert!(text.contains(
            "- **Button** (`src/Button.tsx`): Primary action button Props: label, onClick"
        ));
        assert!(text.contains("- **Card** (`src/Card.tsx`)\n"));
        assert!(!text.contains("Modal"));
        assert!(text.contains("... and 1 more"));
    }

    #[test]
    fn test_component_summaries() {
        let snap = snapshot(vec![component("src/Button.tsx", Some("desc"), &["size"])]);
        let summaries = snap.component_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].name, "Button");
        assert_eq!(summaries[0].category, Category::Utility);
        assert_eq!(summaries[0].props, vec!["size"]);
    }
}
