//! Import statement parsing and specifier resolution.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

use super::exports::is_identifier;
use crate::paths::normalize_slash_path;
use crate::types::ImportRecord;

static IMPORT_FROM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?m)^\s*import\s+(?:type\s+)?([^'";]*?)\s*from\s*['"]([^'"]+)['"]"#)
        .expect("valid regex")
});

static IMPORT_SIDE_EFFECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?m)^\s*import\s*['"]([^'"]+)['"]"#).expect("valid regex"));

static REQUIRE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:const|let|var)\s+([^=;]+?)\s*=\s*require\(\s*['"]([^'"]+)['"]\s*\)"#)
        .expect("valid regex")
});

static DYNAMIC_IMPORT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\bimport\(\s*['"]([^'"]+)['"]\s*\)"#).expect("valid regex"));

/// Resolves raw specifiers against the importing file and path aliases
#[derive(Debug, Clone)]
pub struct ImportResolver {
    aliases: Vec<(String, String)>,
}

impl ImportResolver {
    pub fn new(path_aliases: &BTreeMap<String, String>) -> Self {
        // Longest alias first so `@/ui/` wins over `@/`
        let mut aliases: Vec<(String, String)> = path_aliases
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        aliases.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
        Self { aliases }
    }

    /// Resolve `specifier` imported from `importer` (root-relative path).
    ///
    /// Returns the resolved source and whether the specifier is external.
    pub fn resolve(&self, specifier: &str, importer: &str) -> (String, bool) {
        let specifier = specifier.split(['?', '#']).next().unwrap_or(specifier);

        if is_relative(specifier) {
            let dir = importer.rsplit_once('/').map(|(d, _)| d).unwrap_or("");
            let joined = if dir.is_empty() {
                specifier.to_string()
            } else {
                format!("{}/{}", dir, specifier)
            };
            let resolved = normalize_slash_path(&joined).unwrap_or_else(|| specifier.to_string());
            return (resolved, false);
        }

        if let Some(stripped) = specifier.strip_prefix('/') {
            let resolved =
                normalize_slash_path(stripped).unwrap_or_else(|| stripped.to_string());
            return (resolved, false);
        }

        for (alias, target) in &self.aliases {
            if let Some(rest) = specifier.strip_prefix(alias.as_str()) {
                let joined = format!("{}{}", target, rest);
                let resolved = normalize_slash_path(&joined).unwrap_or(joined);
                return (resolved, false);
            }
        }

        (specifier.to_string(), true)
    }

    fn record(&self, specifier: &str, importer: &str, bindings: Vec<String>, has_default: bool) -> ImportRecord {
        let (source, is_external) = self.resolve(specifier, importer);
        ImportRecord {
            specifier: specifier.to_string(),
            source,
            bindings,
            has_default,
            is_external,
        }
    }
}

impl Default for ImportResolver {
    fn default() -> Self {
        Self::new(&crate::config::ExtractionConfig::default().path_aliases)
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Split an import clause into local bindings and a has-default flag.
///
/// Handles `React`, `{ a, b as c }`, `* as ns` and combinations.
pub fn parse_import_clause(clause: &str) -> (Vec<String>, bool) {
    let mut bindings = Vec::new();
    let mut has_default = false;

    let (outer, named) = match (clause.find('{'), clause.rfind('}')) {
        (Some(open), Some(close)) if open < close => (
            format!("{}{}", &clause[..open], &clause[close + 1..]),
            Some(&clause[open + 1..close]),
        ),
        _ => (clause.to_string(), None),
    };

    for part in outer.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        if let Some(ns) = part.strip_prefix('*') {
            let name = ns.trim().trim_start_matches("as").trim();
            if is_identifier(name) {
                bindings.push(name.to_string());
            }
        } else if is_identifier(part) {
            has_default = true;
            bindings.push(part.to_string());
        }
    }

    if let Some(named) = named {
        for item in named.split(',') {
            let item = item.trim();
            let item = item.strip_prefix("type ").unwrap_or(item).trim();
            if item.is_empty() {
                continue;
            }
            let (imported, local) = match item.split_once(" as ") {
                Some((imported, local)) => (imported.trim(), local.trim()),
                None => (item, item),
            };
            if imported == "default" {
                has_default = true;
            }
            if is_identifier(local) {
                bindings.push(local.to_string());
            }
        }
    }

    (bindings, has_default)
}

/// Every import of a file in source order.
///
/// Covers ES imports, side-effect imports, `require` and dynamic `import()`.
pub fn extract_imports(content: &str, importer: &str, resolver: &ImportResolver) -> Vec<ImportRecord> {
    let mut found: Vec<(usize, ImportRecord)> = Vec::new();

    for caps in IMPORT_FROM.captures_iter(content) {
        let (Some(whole), Some(clause), Some(spec)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let (bindings, has_default) = parse_import_clause(clause.as_str());
        found.push((
            whole.start(),
            resolver.record(spec.as_str(), importer, bindings, has_default),
        ));
    }

    for caps in IMPORT_SIDE_EFFECT.captures_iter(content) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), resolver.record(spec.as_str(), importer, Vec::new(), false)));
        }
    }

    for caps in REQUIRE.captures_iter(content) {
        if let (Some(whole), Some(target), Some(spec)) = (caps.get(0), caps.get(1), caps.get(2)) {
            let (bindings, has_default) = parse_import_clause(target.as_str());
            found.push((
                whole.start(),
                resolver.record(spec.as_str(), importer, bindings, has_default),
            ));
        }
    }

    for caps in DYNAMIC_IMPORT.captures_iter(content) {
        if let (Some(whole), Some(spec)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), resolver.record(spec.as_str(), importer, Vec::new(), true)));
        }
    }

    found.sort_by_key(|(pos, _)| *pos);
    found.into_iter().map(|(_, record)| record).collect()
}
