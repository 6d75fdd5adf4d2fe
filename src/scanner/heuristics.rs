//! "Looks like a component" heuristics.
//!
//! Each signature is a named regular expression so rules can be tested and
//! replaced one at a time. A file is a candidate when its basename starts
//! with an uppercase letter or its content matches at least one signature.

use once_cell::sync::Lazy;
use regex::Regex;

/// A named textual signature of a React or Vue component
pub struct Signature {
    pub name: &'static str,
    pattern: Regex,
}

impl Signature {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("component signature must be a valid regex"),
        }
    }

    /// Whether the content matches this signature
    pub fn matches(&self, content: &str) -> bool {
        self.pattern.is_match(content)
    }
}

/// All component signatures, in evaluation order
pub static SIGNATURES: Lazy<Vec<Signature>> = Lazy::new(|| {
    vec![
        Signature::new(
            "exported-capitalized-declaration",
            r"export\s+(?:default\s+)?(?:async\s+)?(?:function|const|let|var|class)\s+[A-Z]",
        ),
        Signature::new(
            "class-component",
            r"class\s+[A-Za-z_$][\w$]*\s+extends\s+(?:React\.)?(?:Pure)?Component\b",
        ),
        Signature::new("jsx-capitalized-tag", r"<[A-Z][\w.]*[\s/>]"),
        Signature::new("hook-call", r"\buse[A-Z]\w*\s*\("),
        Signature::new(
            "framework-import",
            r#"from\s+['"](?:react|react-dom|react-native|preact|next(?:/[\w-]+)?|vue|nuxt|solid-js)['"]"#,
        ),
        Signature::new("vue-template", r"<template[\s>]"),
        Signature::new("vue-script-setup", r"<script\s+setup"),
        Signature::new("vue-define-component", r"\bdefineComponent\s*\("),
        Signature::new(
            "vue-composition-api",
            r"\b(?:reactive|computed|watchEffect|onMounted|onUnmounted|onBeforeMount)\s*\(",
        ),
    ]
});

/// Names of every signature the content matches
pub fn matched_signatures(content: &str) -> Vec<&'static str> {
    SIGNATURES
        .iter()
        .filter(|s| s.matches(content))
        .map(|s| s.name)
        .collect()
}

/// Whether the content matches at least one component signature
pub fn matches_component_signature(content: &str) -> bool {
    SIGNATURES.iter().any(|s| s.matches(content))
}

/// Whether a file name starts with an uppercase letter
pub fn has_component_basename(file_name: &str) -> bool {
    file_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// The full candidate heuristic: capitalized basename or content signature
pub fn looks_like_component(file_name: &str, content: &str) -> bool {
    has_component_basename(file_name) || matches_component_signature(content)
}
