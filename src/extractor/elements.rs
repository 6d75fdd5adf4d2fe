//! Markup-level rules: rendered elements, UI keywords, event handlers and
//! literal constants.

use once_cell::sync::Lazy;
use regex::Regex;

use super::push_unique;

/// UI keywords recorded when they appear anywhere in the source
pub const UI_PATTERN_KEYWORDS: &[&str] = &[
    "modal",
    "dialog",
    "dropdown",
    "tooltip",
    "popover",
    "accordion",
    "tabs",
    "carousel",
    "table",
    "card",
    "form",
    "button",
    "navbar",
    "sidebar",
    "breadcrumb",
    "pagination",
    "toast",
    "spinner",
];

/// SFC block tags that are never rendered elements
const SFC_BLOCKS: &[&str] = &["template", "script", "style"];

static OPENING_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|[^\w$.])<([A-Za-z][\w.-]*)").expect("valid regex"));

static JSX_HANDLER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(on[A-Z]\w*)\s*=\s*\{").expect("valid regex"));

static VUE_HANDLER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:\s@|\sv-on:)([a-zA-Z][\w-]*)(?:\.[\w.]+)?\s*=\s*["']"#).expect("valid regex")
});

static LITERAL_CONSTANT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?m)^\s*(?:export\s+)?const\s+([A-Za-z_$][\w$]*)\s*(?::[^=\n]+)?=\s*(?:['"`\d\[{-]|true\b|false\b|null\b)"#,
    )
    .expect("valid regex")
});

/// Opening-tag names in JSX or Vue templates, deduplicated in order
pub fn extract_elements(content: &str) -> Vec<String> {
    let mut elements = Vec::new();
    for caps in OPENING_TAG.captures_iter(content) {
        let tag = &caps[1];
        if SFC_BLOCKS.contains(&tag) {
            continue;
        }
        push_unique(&mut elements, tag.to_string());
    }
    elements
}

/// UI keywords present in the lowercased source, in keyword order
pub fn extract_ui_patterns(content: &str) -> Vec<String> {
    let lower = content.to_lowercase();
    UI_PATTERN_KEYWORDS
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

/// Convert a Vue event name (`click`, `update-value`) to handler form (`onClick`, `onUpdateValue`)
pub fn vue_event_to_handler(event: &str) -> String {
    let mut handler = String::from("on");
    for part in event.split(['-', ':']).filter(|p| !p.is_empty()) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            handler.extend(first.to_uppercase());
            handler.push_str(chars.as_str());
        }
    }
    handler
}

/// Event handler attributes, normalized to `onXxx`
pub fn extract_event_handlers(content: &str) -> Vec<String> {
    let mut handlers = Vec::new();
    for caps in JSX_HANDLER.captures_iter(content) {
        push_unique(&mut handlers, caps[1].to_string());
    }
    for caps in VUE_HANDLER.captures_iter(content) {
        push_unique(&mut handlers, vue_event_to_handler(&caps[1]));
    }
    handlers
}

/// Names of `const` declarations initialised with a literal
pub fn extract_constants(content: &str) -> Vec<String> {
    let mut constants = Vec::new();
    for caps in LITERAL_CONSTANT.captures_iter(content) {
        push_unique(&mut constants, caps[1].to_string());
    }
    constants
}
