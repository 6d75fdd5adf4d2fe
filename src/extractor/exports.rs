//! Export detection rules.
//!
//! Rules run in a fixed precedence: exported functions, exported bindings,
//! exported classes, named export lists, default exports, then the
//! capitalized-declaration fallback when nothing else matched. Framework
//! specific rules (Next.js pages, Vue single-file components) append after.

use once_cell::sync::Lazy;
use regex::Regex;

use super::push_unique;

/// Placeholder export for `<script setup>` components without a `name`
pub const SCRIPT_SETUP_PLACEHOLDER: &str = "default";

static EXPORT_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:default\s+)?(?:async\s+)?function\s*\*?\s*([A-Za-z_$][\w$]*)")
        .expect("valid regex")
});

static EXPORT_BINDING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:const|let|var)\s+([A-Za-z_$][\w$]*)").expect("valid regex")
});

static EXPORT_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?:default\s+)?(?:abstract\s+)?class\s+([A-Za-z_$][\w$]*)")
        .expect("valid regex")
});

static EXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+(?:type\s+)?\{([^}]*)\}").expect("valid regex"));

static EXPORT_DEFAULT_WRAPPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"export\s+default\s+([A-Za-z_$][\w$.]*)\s*\(\s*([^()]*?)\s*\)(?:\s*\(\s*([A-Za-z_$][\w$]*)\s*\))?",
    )
    .expect("valid regex")
});

static EXPORT_DEFAULT_IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)export\s+default\s+([A-Za-z_$][\w$]*)\s*;?\s*$").expect("valid regex")
});

static CAPITALIZED_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:const|let|var|function)\s+([A-Z][\w$]*)").expect("valid regex")
});

static NEXT_DATA_FUNCTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:getServerSideProps|getStaticProps)\b").expect("valid regex"));

static NEXT_PAGE_COMPONENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:function|const)\s+([A-Z][\w$]*)\s*(?:[=(:<])").expect("valid regex")
});

static VUE_SFC_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<template[\s>]|\bdefineComponent\s*\(").expect("valid regex"));

static VUE_SCRIPT_SETUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<script\s+setup").expect("valid regex"));

static VUE_NAME_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)(?:export\s+default|defineComponent\s*\(|defineOptions\s*\()\s*\{.*?\bname\s*:\s*['"]([^'"]+)['"]"#,
    )
    .expect("valid regex")
});

const NON_IDENTIFIER_KEYWORDS: &[&str] = &[
    "function", "class", "async", "abstract", "new", "await", "typeof", "void", "null", "true",
    "false", "undefined", "this",
];

fn captures(re: &Regex, content: &str) -> Vec<String> {
    re.captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// `export function Name` and `export default function Name`
pub fn exported_functions(content: &str) -> Vec<String> {
    captures(&EXPORT_FUNCTION, content)
}

/// `export const|let|var Name`
pub fn exported_bindings(content: &str) -> Vec<String> {
    captures(&EXPORT_BINDING, content)
}

/// `export class Name` and `export default class Name`
pub fn exported_classes(content: &str) -> Vec<String> {
    captures(&EXPORT_CLASS, content)
}

/// `export { a, b as c }` keeps `a` and the alias `c`
pub fn named_export_list(content: &str) -> Vec<String> {
    let mut names = Vec::new();
    for list in captures(&EXPORT_LIST, content) {
        for item in list.split(',') {
            let item = item.trim();
            let item = item.strip_prefix("type ").unwrap_or(item).trim();
            if item.is_empty() {
                continue;
            }
            let name = match item.split_once(" as ") {
                Some((_, alias)) => alias.trim(),
                None => item,
            };
            if is_identifier(name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

/// Default exports of an identifier, including wrapped forms.
///
/// `export default withAuth(Profile)` yields `default:withAuth(Profile)`
/// followed by `Profile`. Curried wrappers keep the last call's argument:
/// `export default connect(mapState)(Profile)` yields
/// `default:connect(mapState)(Profile)` and `Profile`.
pub fn default_exports(content: &str) -> Vec<String> {
    let mut names = Vec::new();

    for caps in EXPORT_DEFAULT_WRAPPED.captures_iter(content) {
        let wrapper = &caps[1];
        let args = &caps[2];
        if NON_IDENTIFIER_KEYWORDS.contains(&wrapper) {
            continue;
        }
        match caps.get(3) {
            Some(inner) => {
                names.push(format!("default:{}({})({})", wrapper, args, inner.as_str()));
                names.push(inner.as_str().to_string());
            }
            None if is_identifier(args) => {
                names.push(format!("default:{}({})", wrapper, args));
                names.push(args.to_string());
            }
            None => {}
        }
    }

    for name in captures(&EXPORT_DEFAULT_IDENT, content) {
        if !NON_IDENTIFIER_KEYWORDS.contains(&name.as_str()) {
            names.push(name);
        }
    }

    names
}

/// Any `const|let|var|function Name` with a capitalized name
pub fn capitalized_declarations(content: &str) -> Vec<String> {
    captures(&CAPITALIZED_DECLARATION, content)
}

/// Page component names of a Next.js data-fetching page, empty otherwise
pub fn next_page_components(content: &str) -> Vec<String> {
    if !NEXT_DATA_FUNCTION.is_match(content) {
        return Vec::new();
    }
    captures(&NEXT_PAGE_COMPONENT, content)
}

/// Whether the content is a Vue single-file or `defineComponent` component
pub fn is_vue_component(content: &str) -> bool {
    VUE_SFC_MARKER.is_match(content) || VUE_SCRIPT_SETUP.is_match(content)
}

/// The component name of a Vue component.
///
/// Uses the `name:` option when present; `<script setup>` components without
/// one get [`SCRIPT_SETUP_PLACEHOLDER`].
pub fn vue_component_name(content: &str) -> Option<String> {
    if !is_vue_component(content) {
        return None;
    }
    if let Some(caps) = VUE_NAME_FIELD.captures(content) {
        return Some(caps[1].to_string());
    }
    if VUE_SCRIPT_SETUP.is_match(content) {
        return Some(SCRIPT_SETUP_PLACEHOLDER.to_string());
    }
    None
}

/// Apply every export rule in precedence order, without duplicates
pub fn extract_exports(content: &str) -> Vec<String> {
    let mut exports = Vec::new();

    let explicit = exported_functions(content)
        .into_iter()
        .chain(exported_bindings(content))
        .chain(exported_classes(content))
        .chain(named_export_list(content))
        .chain(default_exports(content));
    for name in explicit {
        push_unique(&mut exports, name);
    }

    if exports.is_empty() {
        for name in capitalized_declarations(content) {
            push_unique(&mut exports, name);
        }
    }

    for name in next_page_components(content) {
        push_unique(&mut exports, name);
    }

    if let Some(name) = vue_component_name(content) {
        push_unique(&mut exports, name);
    }

    exports
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
