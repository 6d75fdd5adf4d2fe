//! Context assembly.
//!
//! [`WorkspaceAnalyzer`] is the coordinator: it owns the [`AnalysisCache`],
//! scans the workspace, extracts components in bounded batches with a
//! per-file timeout, and combines the workspace-wide aggregates into a
//! [`WorkspaceSnapshot`].

pub mod design_system;
pub mod snapshot;
pub mod structure;
pub mod styling;

pub use design_system::{DesignSystemSummary, ElementUsage, detect_design_system};
pub use snapshot::{ComponentSummary, ScanDiagnostics, WorkspaceSnapshot};
pub use structure::{
    Framework, ProjectStructure, detect_framework, detect_typescript, project_structure,
};
pub use styling::{StylingApproach, StylingSummary, detect_styling};

use anyhow::Context;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use crate::cache::{AnalysisCache, CacheStats, fingerprint};
use crate::config::Config;
use crate::error::{AnalyzerError, ExtractionError, ValidationError};
use crate::extractor::{ComponentExtractor, Extraction, SourceExtractor};
use crate::graph::DependencyGraph;
use crate::paths::relative_slash_path;
use crate::patterns::PatternAnalyzer;
use crate::scanner::{
    LocalProject, PackageManifest, ProjectFiles, ScanOutput, SourceFile, SourceScanner,
    WatchEvent, WorkspaceWatcher,
};
use crate::types::ComponentRecord;

/// Analyzes one workspace root, reusing cached results across passes.
///
/// Cloning is cheap and clones share the cache.
///
/// # Example
///
/// ```no_run
/// use palette_analyzer::{Config, WorkspaceAnalyzer};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let analyzer = WorkspaceAnalyzer::with_config("./my-app", Config::default())?;
///     let snapshot = analyzer.analyze_workspace().await?;
///     println!("{}", snapshot.prompt_context(20));
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct WorkspaceAnalyzer {
    root: PathBuf,
    /// `root` with symlinks resolved; watchers may report either form
    canonical_root: PathBuf,
    config: Arc<Config>,
    extractor: Arc<dyn SourceExtractor>,
    cache: Arc<AnalysisCache>,
}

impl WorkspaceAnalyzer {
    /// Create an analyzer with configuration from the config file and environment
    pub fn new(root: impl AsRef<Path>) -> Result<Self, AnalyzerError> {
        Self::with_config(root, Config::new()?)
    }

    pub fn with_config(root: impl AsRef<Path>, config: Config) -> Result<Self, AnalyzerError> {
        config.validate()?;
        let root = root.as_ref().to_path_buf();
        let canonical_root = root.canonicalize().unwrap_or_else(|_| root.clone());

        tracing::info!("Initializing workspace analyzer for {:?}", root);
        tracing::debug!(
            "Batch size: {}, timeout: {}s, max file size: {} chars",
            config.extraction.batch_size,
            config.extraction.timeout_secs,
            config.scanner.max_file_chars
        );

        Ok(Self {
            root,
            canonical_root,
            extractor: Arc::new(ComponentExtractor::new(&config.extraction)),
            config: Arc::new(config),
            cache: Arc::new(AnalysisCache::new()),
        })
    }

    /// Replace the ignored directory names for this analyzer
    pub fn with_ignored_dirs(mut self, ignored_dirs: Vec<String>) -> Self {
        Arc::make_mut(&mut self.config).scanner.ignored_dirs = ignored_dirs;
        self
    }

    /// Replace the per-file extractor. Cached results are dropped.
    pub fn with_extractor(mut self, extractor: Arc<dyn SourceExtractor>) -> Self {
        self.extractor = extractor;
        self.cache = Arc::new(AnalysisCache::new());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cache(&self) -> &Arc<AnalysisCache> {
        &self.cache
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    /// Run the full analysis.
    ///
    /// Per-file problems degrade single components; only workspace-level
    /// failures such as a missing root return an error.
    pub async fn analyze_workspace(&self) -> Result<WorkspaceSnapshot, AnalyzerError> {
        let start = Instant::now();

        let scanner = SourceScanner::from_config(&self.root, &self.config.scanner);
        let root = self.root.clone();
        let ignored = self.config.scanner.ignored_dirs.clone();
        let (scan, project) = tokio::join!(
            tokio::task::spawn_blocking(move || scanner.scan()),
            tokio::task::spawn_blocking(move || LocalProject::load(root, &ignored)),
        );
        let ScanOutput {
            files,
            skipped,
            files_seen,
        } = scan.context("Scanner task failed")??;
        let project = project.context("Project listing task failed")??;
        let manifest = PackageManifest::load(&project);

        let version = self.fingerprint(&files, &project);

        let ((components, degraded), (framework, typescript, styling, structure)) = tokio::join!(
            self.extract_all(files),
            async {
                (
                    detect_framework(&project, manifest.as_ref()),
                    detect_typescript(&project),
                    detect_styling(&project, manifest.as_ref()),
                    project_structure(
                        &project,
                        &self.config.scanner.component_dirs,
                        self.config.analysis.structure_depth,
                    ),
                )
            }
        );

        let refs: Vec<&ComponentRecord> = components.iter().map(|c| c.as_ref()).collect();
        let analyzer = PatternAnalyzer::new(self.config.analysis.prop_drilling_threshold);
        let (graph, patterns, architecture, design_system) = tokio::join!(
            self.cache
                .graph_or_compute(&version, || DependencyGraph::build(&components)),
            self.cache.patterns_or_compute(&version, || {
                analyzer.patterns(&refs, &project, manifest.as_ref())
            }),
            self.cache
                .architecture_or_compute(&version, || analyzer.architecture(&refs)),
            self.cache.design_system_or_compute(&version, || {
                detect_design_system(
                    &refs,
                    &project,
                    manifest.as_ref(),
                    self.config.analysis.top_elements,
                )
            }),
        );

        let snapshot = WorkspaceSnapshot {
            version,
            framework,
            typescript,
            styling,
            structure,
            components: refs.iter().map(|c| (*c).clone()).collect(),
            graph: (*graph).clone(),
            patterns: (*patterns).clone(),
            architecture: (*architecture).clone(),
            design_system: (*design_system).clone(),
            diagnostics: ScanDiagnostics {
                files_scanned: files_seen,
                skipped,
                degraded,
            },
        };

        tracing::info!(
            "Analyzed {} components ({} edges, {} degraded) in {}ms",
            snapshot.components.len(),
            snapshot.graph.edges.len(),
            snapshot.diagnostics.degraded.len(),
            start.elapsed().as_millis()
        );
        Ok(snapshot)
    }

    /// Fingerprint over candidate `(path, mtime)` pairs, the file listing
    /// and the watched config files
    fn fingerprint(&self, files: &[SourceFile], project: &LocalProject) -> String {
        let mut parts: Vec<String> = files
            .iter()
            .map(|f| format!("{}@{}", f.record.relative_path, f.record.mtime_key()))
            .collect();
        parts.push(String::from("--files"));
        parts.extend(project.list_files().iter().cloned());
        for name in &self.config.scanner.watch_files {
            parts.push(format!("--{}", name));
            parts.push(project.read_to_string(name).unwrap_or_default());
        }
        fingerprint(&parts)
    }

    /// Extract every file, batch by batch, through the cache.
    ///
    /// Returns the components in input order and the degraded paths.
    async fn extract_all(&self, files: Vec<SourceFile>) -> (Vec<Arc<ComponentRecord>>, Vec<String>) {
        let batch_size = self.config.extraction.batch_size.max(1);
        let total_batches = files.len().div_ceil(batch_size);
        let mut components = Vec::with_capacity(files.len());
        let mut degraded = Vec::new();
        let mut files = files.into_iter();

        for batch_idx in 0..total_batches {
            let batch: Vec<SourceFile> = files.by_ref().take(batch_size).collect();
            let results =
                futures::future::join_all(batch.into_iter().map(|file| self.extract_cached(file)))
                    .await;

            for extraction in results {
                match extraction {
                    Extraction::Full(record) => components.push(record),
                    Extraction::Fallback { record, cause } => {
                        tracing::debug!("Using basic record for {}: {}", record.path, cause);
                        degraded.push(record.path.clone());
                        components.push(record);
                    }
                    Extraction::NotAComponent => {}
                }
            }
            tracing::debug!("Extracted batch {}/{}", batch_idx + 1, total_batches);
        }

        (components, degraded)
    }

    async fn extract_cached(&self, file: SourceFile) -> Extraction {
        let SourceFile { record, content } = file;
        let mtime = record.mtime_key();
        let path = record.relative_path;
        self.cache
            .get_or_extract(&path, mtime, || {
                extract_with_timeout(
                    Arc::clone(&self.extractor),
                    path.clone(),
                    content,
                    Duration::from_secs(self.config.extraction.timeout_secs),
                )
            })
            .await
    }

    /// Apply one file-system notification to the cache.
    ///
    /// Source files are invalidated by path; watched config files such as
    /// `package.json` only drop the workspace-wide aggregates.
    pub async fn handle_event(&self, event: &WatchEvent) -> Result<(), AnalyzerError> {
        let Some(rel) = self.relative_to_root(&event.path) else {
            return Err(ValidationError::OutsideRoot {
                path: event.path.display().to_string(),
                root: self.root.display().to_string(),
            }
            .into());
        };

        let file_name = rel.rsplit('/').next().unwrap_or(&rel);
        let is_config = self
            .config
            .scanner
            .watch_files
            .iter()
            .any(|w| w == file_name);

        tracing::debug!("Handling {} event for {}", event.kind.as_str(), rel);
        if is_config {
            self.cache.clear_derived().await;
        } else {
            self.cache.invalidate(&rel).await;
        }
        Ok(())
    }

    /// Root-relative path of `path`, matched against the root as given or canonicalized
    fn relative_to_root(&self, path: &Path) -> Option<String> {
        [&self.root, &self.canonical_root]
            .into_iter()
            .find(|root| path.starts_with(root))
            .map(|root| relative_slash_path(root, path))
    }

    /// Start a watcher over the root using the configured filters
    pub fn start_watcher(&self) -> Result<WorkspaceWatcher, AnalyzerError> {
        let scanner = &self.config.scanner;
        Ok(WorkspaceWatcher::start(
            &self.root,
            scanner.extensions.clone(),
            scanner.watch_files.clone(),
            scanner.ignored_dirs.clone(),
        )?)
    }

    /// Apply watch events until `cancel` fires.
    ///
    /// With `updates`, the workspace is re-analyzed after each burst of
    /// events and the fresh snapshot is sent; a closed receiver ends the loop.
    pub async fn watch_until(
        &self,
        cancel: CancellationToken,
        updates: Option<UnboundedSender<WorkspaceSnapshot>>,
    ) -> Result<(), AnalyzerError> {
        let mut watcher = self.start_watcher()?;

        loop {
            let event = tokio::select! {
                _ = cancel.cancelled() => break,
                event = watcher.next_event() => event,
            };
            let Some(event) = event else {
                tracing::warn!("File watcher closed");
                break;
            };

            let mut pending = vec![event];
            while let Some(more) = watcher.try_next_event() {
                pending.push(more);
            }
            for event in &pending {
                if let Err(e) = self.handle_event(event).await {
                    tracing::warn!("Ignoring watch event: {}", e);
                }
            }

            if let Some(tx) = &updates {
                match self.analyze_workspace().await {
                    Ok(snapshot) => {
                        if tx.send(snapshot).is_err() {
                            break;
                        }
                    }
                    Err(e) => tracing::warn!("Re-analysis failed: {}", e),
                }
            }
        }

        tracing::info!("Stopped watching {:?}", self.root);
        Ok(())
    }
}

/// Extract on a blocking thread, falling back to a basic record on
/// timeout or panic
async fn extract_with_timeout(
    extractor: Arc<dyn SourceExtractor>,
    path: String,
    content: String,
    timeout: Duration,
) -> Extraction {
    let task_path = path.clone();
    let task = tokio::task::spawn_blocking(move || extractor.extract(&task_path, &content));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(extraction)) => extraction,
        Ok(Err(e)) => {
            tracing::warn!("Extraction task for {} panicked: {}", path, e);
            Extraction::fallback(
                &path,
                ExtractionError::Panicked {
                    path: path.clone(),
                    reason: e.to_string(),
                },
            )
        }
        Err(_) => {
            tracing::warn!("Extraction of {} timed out after {:?}", path, timeout);
            Extraction::fallback(
                &path,
                ExtractionError::Timeout {
                    path: path.clone(),
                    secs: timeout.as_secs(),
                },
            )
        }
    }
}
