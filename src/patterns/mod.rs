//! Pattern & architecture analysis.
//!
//! Every detector is a pure function of the extracted component set and,
//! for manifest and config checks, of a [`ProjectFiles`] view.

pub mod architecture;
pub mod naming;
pub mod state;
pub mod testing;

pub use architecture::{ArchitectureSummary, DataFlow, Layer, analyze_architecture};
pub use naming::{Casing, NamingConventions, detect_naming};
pub use state::{StateManagement, StateSignal, classify_state, collect_signals};
pub use testing::{TestingSummary, detect_testing};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::extractor::hooks::{is_builtin_hook, is_hook_name};
use crate::scanner::{PackageManifest, ProjectFiles};
use crate::types::{Category, ComponentRecord};

pub const CONTAINER_PRESENTATIONAL: &str = "container-presentational";
pub const HIGHER_ORDER_COMPONENTS: &str = "higher-order-components";
pub const RENDER_PROPS: &str = "render-props";
pub const CUSTOM_HOOKS: &str = "custom-hooks";
pub const COMPOUND_COMPONENTS: &str = "compound-components";
pub const CONTEXT_PROVIDERS: &str = "context-providers";

/// Built-in versus custom hooks across the workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HookUsage {
    /// Framework and well-known library hooks, sorted
    pub builtin: Vec<String>,
    /// Project-defined hooks, sorted
    pub custom: Vec<String>,
}

/// Workspace-wide pattern facts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PatternSummary {
    pub naming: NamingConventions,
    /// Architectural idiom tags in fixed order
    pub architectural: Vec<String>,
    pub state_management: StateManagement,
    /// Every state signal seen, sorted
    pub state_signals: Vec<StateSignal>,
    pub testing: TestingSummary,
    pub hooks: HookUsage,
}

fn is_custom_hook(hook: &str) -> bool {
    is_hook_name(hook) && !is_builtin_hook(hook)
}

/// Split every used hook into built-in and custom
pub fn hook_usage(components: &[&ComponentRecord]) -> HookUsage {
    let mut builtin = BTreeSet::new();
    let mut custom = BTreeSet::new();
    for hook in components.iter().flat_map(|c| c.hooks.iter()) {
        if is_custom_hook(hook) {
            custom.insert(hook.clone());
        } else {
            builtin.insert(hook.clone());
        }
    }
    HookUsage {
        builtin: builtin.into_iter().collect(),
        custom: custom.into_iter().collect(),
    }
}

fn is_container(c: &ComponentRecord) -> bool {
    c.name.contains("Container") || c.category == Category::BusinessLogic
}

fn is_presentational(c: &ComponentRecord) -> bool {
    matches!(c.category, Category::UiPrimitive | Category::DataDisplay)
}

fn is_hoc(c: &ComponentRecord) -> bool {
    let hoc_name = |name: &str| {
        name.strip_prefix("with")
            .and_then(|rest| rest.chars().next())
            .is_some_and(|ch| ch.is_ascii_uppercase())
    };
    hoc_name(&c.name)
        || c.exports.iter().any(|e| hoc_name(e))
        || c.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains("higher-order"))
}

fn has_render_prop(c: &ComponentRecord) -> bool {
    c.props
        .iter()
        .any(|p| p.to_lowercase().contains("render") || p.contains("children"))
}

fn has_compound_element(c: &ComponentRecord) -> bool {
    c.jsx_elements.iter().any(|e| {
        e.contains('.')
            && !e.starts_with("React.")
            && e.starts_with(|ch: char| ch.is_ascii_uppercase())
    })
}

fn is_context_provider(c: &ComponentRecord) -> bool {
    c.name.ends_with("Provider") || c.hooks.iter().any(|h| h == "useContext")
}

/// Architectural tags present in the component set, in fixed order
pub fn architectural_tags(components: &[&ComponentRecord]) -> Vec<String> {
    let any = |pred: fn(&ComponentRecord) -> bool| components.iter().any(|c| pred(c));

    let rules: [(&str, bool); 6] = [
        (
            CONTAINER_PRESENTATIONAL,
            any(is_container) && any(is_presentational),
        ),
        (HIGHER_ORDER_COMPONENTS, any(is_hoc)),
        (RENDER_PROPS, any(has_render_prop)),
        (
            CUSTOM_HOOKS,
            components
                .iter()
                .any(|c| c.hooks.iter().any(|h| is_custom_hook(h))),
        ),
        (COMPOUND_COMPONENTS, any(has_compound_element)),
        (CONTEXT_PROVIDERS, any(is_context_provider)),
    ];

    rules
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(tag, _)| tag.to_string())
        .collect()
}

/// Runs the pattern and architecture detectors
#[derive(Debug, Clone)]
pub struct PatternAnalyzer {
    prop_drilling_threshold: usize,
}

impl PatternAnalyzer {
    pub fn new(prop_drilling_threshold: usize) -> Self {
        Self {
            prop_drilling_threshold,
        }
    }

    /// Pattern summary; `components` must be sorted by path
    pub fn patterns(
        &self,
        components: &[&ComponentRecord],
        project: &dyn ProjectFiles,
        manifest: Option<&PackageManifest>,
    ) -> PatternSummary {
        let signals = collect_signals(components);
        PatternSummary {
            naming: detect_naming(components),
            architectural: architectural_tags(components),
            state_management: classify_state(&signals),
            state_signals: signals.into_iter().collect(),
            testing: detect_testing(project, manifest),
            hooks: hook_usage(components),
        }
    }

    pub fn architecture(&self, components: &[&ComponentRecord]) -> ArchitectureSummary {
        analyze_architecture(components, self.prop_drilling_threshold)
    }
}

impl Default for PatternAnalyzer {
    fn default() -> Self {
        Self::new(crate::config::AnalysisConfig::default().prop_drilling_threshold)
    }
}
