//! # Palette Analyzer - Component Graph and Pattern Analysis for UI Workspaces
//!
//! Analyzes a JavaScript/TypeScript (React or Vue) workspace and produces a
//! structured snapshot of its components, their dependency graph and the
//! conventions the codebase follows. The snapshot is the context a prompt
//! builder hands to a code-generation model.
//!
//! ## Overview
//!
//! Extraction is textual: every rule is a regular expression behind a named
//! function, not a parser. Results are cached per `(path, mtime)` and
//! invalidated by file-system events, so repeated analyses of a live
//! workspace only re-extract what changed.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │  SourceScanner   │  walk component dirs, size limit, heuristics
//! └────────┬─────────┘
//!          │ SourceFile
//! ┌────────▼─────────┐     ┌───────────────┐
//! │ComponentExtractor│◄───►│ AnalysisCache │◄── WorkspaceWatcher (notify)
//! └────────┬─────────┘     └───────────────┘
//!          │ ComponentRecord
//!    ┌─────┴──────┬───────────────┐
//!    │            │               │
//! ┌──▼────┐  ┌────▼─────┐  ┌──────▼───────┐
//! │ graph │  │ patterns │  │ design system│
//! └──┬────┘  └────┬─────┘  └──────┬───────┘
//!    └────────────┼───────────────┘
//!        ┌────────▼──────────┐
//!        │ WorkspaceSnapshot │  JSON, prompt context
//!        └───────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`scanner`]: directory traversal, component heuristics, project listing, file watching
//! - [`extractor`]: per-file extraction rules
//! - [`graph`]: dependency graph, clusters and metrics
//! - [`patterns`]: naming, state management, architecture and testing detection
//! - [`cache`]: per-file and workspace-wide result cache
//! - [`context`]: the [`WorkspaceAnalyzer`] coordinator and the snapshot
//! - [`config`]: configuration management with environment variable support
//! - [`types`]: the component data model
//! - [`error`]: error types
//! - [`paths`]: path utilities
//!
//! ## Usage Example
//!
//! ```no_run
//! use palette_analyzer::{Config, WorkspaceAnalyzer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let analyzer = WorkspaceAnalyzer::with_config("./my-app", Config::default())?;
//!     let snapshot = analyzer.analyze_workspace().await?;
//!
//!     println!("{} components", snapshot.components.len());
//!     println!("{}", snapshot.to_json()?);
//!     Ok(())
//! }
//! ```

/// Per-file extraction cache and workspace-wide derived caches
pub mod cache;

/// Configuration management with environment variable overrides
pub mod config;

/// Workspace coordinator, snapshot and workspace-level detectors
pub mod context;

/// Error types and utilities
pub mod error;

/// Component extraction rules
pub mod extractor;

/// Component dependency graph
pub mod graph;

/// Platform paths and path normalization
pub mod paths;

/// Pattern and architecture analysis
pub mod patterns;

/// Source scanning and file watching
pub mod scanner;

/// Component data model with JSON schema definitions
pub mod types;

pub use cache::{AnalysisCache, CacheStats};
pub use config::Config;
pub use context::{ComponentSummary, WorkspaceAnalyzer, WorkspaceSnapshot};
pub use error::AnalyzerError;
pub use extractor::{ComponentExtractor, Extraction, SourceExtractor};
pub use graph::DependencyGraph;
pub use types::{Category, Complexity, ComponentRecord, ImportRecord};
