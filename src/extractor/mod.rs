//! Per-file component extraction.
//!
//! [`ComponentExtractor`] turns the text of one source file into a
//! [`ComponentRecord`]. Every rule is a plain function over the content in
//! one of the submodules, so rules can be tested and replaced individually.
//! Extraction never fails outright: a rule failure degrades to a basic
//! record so the workspace analysis keeps going.

pub mod classify;
pub mod comments;
pub mod elements;
pub mod exports;
pub mod hooks;
pub mod imports;
pub mod props;

use crate::config::ExtractionConfig;
use crate::error::ExtractionError;
use crate::scanner::heuristics::looks_like_component;
use crate::types::{ComponentRecord, component_name_from_path};
use std::sync::Arc;

pub use classify::{ComplexitySignals, classify_category, classify_complexity};
pub use imports::ImportResolver;

/// Outcome of extracting a single file
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Every rule ran
    Full(Arc<ComponentRecord>),
    /// A rule failed or timed out; `record` is the basic fallback
    Fallback {
        record: Arc<ComponentRecord>,
        cause: ExtractionError,
    },
    /// The file does not define a component
    NotAComponent,
}

impl Extraction {
    /// Basic degraded record for `path`
    pub fn fallback(path: &str, cause: ExtractionError) -> Self {
        Self::Fallback {
            record: Arc::new(ComponentRecord::basic(path)),
            cause,
        }
    }

    pub fn record(&self) -> Option<&Arc<ComponentRecord>> {
        match self {
            Self::Full(record) | Self::Fallback { record, .. } => Some(record),
            Self::NotAComponent => None,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Turns the text of one source file into an [`Extraction`].
///
/// [`ComponentExtractor`] is the implementation used by the analyzer;
/// `WorkspaceAnalyzer::with_extractor` swaps in another one.
pub trait SourceExtractor: Send + Sync {
    fn extract(&self, path: &str, content: &str) -> Extraction;
}

impl SourceExtractor for ComponentExtractor {
    fn extract(&self, path: &str, content: &str) -> Extraction {
        ComponentExtractor::extract(self, path, content)
    }
}

/// Append `value` unless already present
pub(crate) fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Applies every extraction rule to a file
#[derive(Debug, Clone)]
pub struct ComponentExtractor {
    resolver: ImportResolver,
    max_comments: usize,
}

impl ComponentExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            resolver: ImportResolver::new(&config.path_aliases),
            max_comments: config.max_comments,
        }
    }

    /// Extract a component record from `content` at root-relative `path`
    pub fn extract(&self, path: &str, content: &str) -> Extraction {
        match self.try_extract(path, content) {
            Ok(Some(record)) => Extraction::Full(Arc::new(record)),
            Ok(None) => Extraction::NotAComponent,
            Err(cause) => {
                tracing::warn!("Extraction degraded for {}: {}", path, cause);
                Extraction::Fallback {
                    record: Arc::new(ComponentRecord::basic(path)),
                    cause,
                }
            }
        }
    }

    fn try_extract(
        &self,
        path: &str,
        content: &str,
    ) -> Result<Option<ComponentRecord>, ExtractionError> {
        if path.is_empty() {
            return Err(ExtractionError::Failure {
                path: path.to_string(),
                reason: "empty path".to_string(),
            });
        }
        if content.contains('\0') {
            return Err(ExtractionError::Failure {
                path: path.to_string(),
                reason: "binary content".to_string(),
            });
        }

        let file_name = path.rsplit('/').next().unwrap_or(path);
        if !looks_like_component(file_name, content) {
            return Ok(None);
        }

        let is_vue = path.ends_with(".vue") || exports::is_vue_component(content);

        let exports = exports::extract_exports(content);
        let imports = imports::extract_imports(content, path, &self.resolver);
        let hooks = hooks::extract_hooks(content, &imports, is_vue);

        if exports.is_empty() && hooks.is_empty() {
            tracing::trace!("{} has neither exports nor hooks", path);
            return Ok(None);
        }

        let props = props::extract_props(content);
        let jsx_elements = elements::extract_elements(content);
        let ui_patterns = elements::extract_ui_patterns(content);
        let event_handlers = elements::extract_event_handlers(content);
        let constants = elements::extract_constants(content);
        let comments = comments::extract_comments(content, self.max_comments);
        let description = comments::description(&comments);
        let line_count = content.lines().count();

        let name = primary_name(&exports).unwrap_or_else(|| component_name_from_path(path));
        let complexity = classify_complexity(ComplexitySignals {
            line_count,
            hook_count: hooks.len(),
            element_count: jsx_elements.len(),
        });
        let category = classify_category(&name, path, !jsx_elements.is_empty());

        Ok(Some(ComponentRecord {
            name,
            path: path.to_string(),
            exports,
            imports,
            hooks,
            props,
            jsx_elements,
            ui_patterns,
            event_handlers,
            constants,
            comments: comments.into_iter().map(|c| c.text).collect(),
            description,
            line_count,
            complexity,
            category,
            degraded: false,
        }))
    }
}

impl Default for ComponentExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

/// First capitalized plain export, skipping `default:` wrapper entries
fn primary_name(exports: &[String]) -> Option<String> {
    exports
        .iter()
        .find(|e| !e.starts_with("default:") && e.starts_with(|c: char| c.is_ascii_uppercase()))
        .cloned()
}
