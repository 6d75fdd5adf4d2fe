//! Layering and data-flow summary.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::state::{StateManagement, classify_state, collect_signals};
use crate::types::{Category, ComponentRecord};

/// A fixed architectural layer
struct LayerRule {
    name: &'static str,
    categories: &'static [Category],
    responsibilities: &'static [&'static str],
}

const LAYER_RULES: &[LayerRule] = &[
    LayerRule {
        name: "Presentation Layer",
        categories: &[Category::Page, Category::Layout, Category::Navigation],
        responsibilities: &[
            "Route-level screens",
            "Page layout and navigation",
            "Composition of feature components",
        ],
    },
    LayerRule {
        name: "UI Component Layer",
        categories: &[
            Category::UiPrimitive,
            Category::Form,
            Category::DataDisplay,
            Category::Feedback,
            Category::Overlay,
        ],
        responsibilities: &[
            "Reusable visual building blocks",
            "User input and interaction",
            "Data presentation and feedback",
        ],
    },
    LayerRule {
        name: "Business Logic Layer",
        categories: &[Category::BusinessLogic],
        responsibilities: &[
            "State management",
            "Data fetching and side effects",
            "Domain rules",
        ],
    },
    LayerRule {
        name: "Utility Layer",
        categories: &[Category::Utility],
        responsibilities: &["Shared helpers", "Non-visual modules"],
    },
];

/// Event tag rules over handler names, in output order
const EVENT_RULES: &[(&str, fn(&str) -> bool)] = &[
    ("click-handlers", |h| h == "onClick" || h == "onDoubleClick"),
    ("form-submission", |h| h == "onSubmit"),
    ("input-change", |h| h == "onChange" || h == "onInput"),
    ("keyboard-events", |h| h.starts_with("onKey")),
    ("focus-events", |h| h == "onFocus" || h == "onBlur"),
    ("mouse-events", |h| {
        h.starts_with("onMouse") || h.starts_with("onPointer") || h.starts_with("onHover")
    }),
];

const CUSTOM_CALLBACKS: &str = "custom-callbacks";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Layer {
    pub name: String,
    pub responsibilities: Vec<String>,
    /// Component names, ordered by path
    pub components: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DataFlow {
    pub state_management: StateManagement,
    /// Some component takes more props than the configured threshold
    pub prop_drilling: bool,
    pub event_patterns: Vec<String>,
}

/// Layering and data flow of a workspace
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ArchitectureSummary {
    /// Non-empty layers in fixed order
    pub layers: Vec<Layer>,
    pub data_flow: DataFlow,
}

fn is_callback_name(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Tag the event-handling styles seen in handlers and callback props
pub fn event_patterns(components: &[&ComponentRecord]) -> Vec<String> {
    let mut hits = vec![false; EVENT_RULES.len()];
    let mut custom = false;

    let handlers = components.iter().copied().flat_map(|c| {
        c.event_handlers
            .iter()
            .chain(c.props.iter().filter(|p| is_callback_name(p)))
    });

    for handler in handlers {
        match EVENT_RULES.iter().position(|(_, rule)| rule(handler)) {
            Some(i) => hits[i] = true,
            None => custom = true,
        }
    }

    let mut tags: Vec<String> = EVENT_RULES
        .iter()
        .zip(hits)
        .filter(|(_, hit)| *hit)
        .map(|((tag, _), _)| tag.to_string())
        .collect();
    if custom {
        tags.push(CUSTOM_CALLBACKS.to_string());
    }
    tags
}

/// Group components into layers; empty layers are left out
pub fn layers(components: &[&ComponentRecord]) -> Vec<Layer> {
    LAYER_RULES
        .iter()
        .filter_map(|rule| {
            let members: Vec<String> = components
                .iter()
                .filter(|c| rule.categories.contains(&c.category))
                .map(|c| c.name.clone())
                .collect();
            (!members.is_empty()).then(|| Layer {
                name: rule.name.to_string(),
                responsibilities: rule.responsibilities.iter().map(|r| r.to_string()).collect(),
                components: members,
            })
        })
        .collect()
}

/// Architecture summary; `components` must be sorted by path
pub fn analyze_architecture(
    components: &[&ComponentRecord],
    prop_drilling_threshold: usize,
) -> ArchitectureSummary {
    ArchitectureSummary {
        layers: layers(components),
        data_flow: DataFlow {
            state_management: classify_state(&collect_signals(components)),
            prop_drilling: components
                .iter()
                .any(|c| c.props.len() > prop_drilling_threshold),
            event_patterns: event_patterns(components),
        },
    }
}
