//! Analysis cache.
//!
//! Per-file extraction results are keyed by `(path, mtime)`, with a separate
//! import map per path. Workspace-wide aggregates (graph, patterns,
//! architecture, design system) are kept in derived slots keyed by the
//! workspace fingerprint and are dropped on any invalidation.

use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

use crate::context::DesignSystemSummary;
use crate::extractor::Extraction;
use crate::graph::DependencyGraph;
use crate::patterns::{ArchitectureSummary, PatternSummary};
use crate::types::{ComponentRecord, ImportRecord};

/// A cached per-file verdict
#[derive(Debug, Clone)]
enum CachedExtraction {
    Component(Arc<ComponentRecord>),
    NotAComponent,
}

#[derive(Debug, Default)]
struct Entries {
    records: HashMap<(String, i64), CachedExtraction>,
    imports: HashMap<String, Vec<ImportRecord>>,
}

/// A derived value together with the fingerprint it was computed for
type Slot<T> = Option<(String, Arc<T>)>;

#[derive(Debug, Default)]
struct DerivedCaches {
    graph: Slot<DependencyGraph>,
    patterns: Slot<PatternSummary>,
    architecture: Slot<ArchitectureSummary>,
    design_system: Slot<DesignSystemSummary>,
}

/// Counters describing cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub invalidations: u64,
    pub entries: usize,
    pub generation: u64,
}

/// Hex SHA-256 over `parts`, each terminated by a NUL byte.
///
/// Used as the key of the derived caches and as the snapshot version.
pub fn fingerprint<I, P>(parts: I) -> String
where
    I: IntoIterator<Item = P>,
    P: AsRef<[u8]>,
{
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part.as_ref());
        hasher.update([0u8]);
    }
    format!("{:x}", hasher.finalize())
}

/// Memoizes extraction results and workspace-wide aggregates
#[derive(Debug, Default)]
pub struct AnalysisCache {
    entries: RwLock<Entries>,
    derived: RwLock<DerivedCaches>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
    invalidations: AtomicU64,
}

macro_rules! derived_slot {
    ($field:ident, $setter:ident, $compute:ident, $ty:ty) => {
        /// Cached value for `fingerprint`, if one was stored since the last invalidation
        pub async fn $field(&self, fingerprint: &str) -> Option<Arc<$ty>> {
            let derived = self.derived.read().await;
            derived
                .$field
                .as_ref()
                .filter(|(key, _)| key == fingerprint)
                .map(|(_, value)| Arc::clone(value))
        }

        /// Store a value computed for `fingerprint`
        pub async fn $setter(&self, fingerprint: &str, value: $ty) -> Arc<$ty> {
            let value = Arc::new(value);
            let mut derived = self.derived.write().await;
            derived.$field = Some((fingerprint.to_string(), Arc::clone(&value)));
            value
        }

        /// Cached value for `fingerprint`, computing and storing it on a miss
        pub async fn $compute(&self, fingerprint: &str, compute: impl FnOnce() -> $ty) -> Arc<$ty> {
            match self.$field(fingerprint).await {
                Some(value) => value,
                None => self.$setter(fingerprint, compute()).await,
            }
        }
    };
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the result for an exact `(path, mtime)` pair
    pub async fn get(&self, path: &str, mtime: i64) -> Option<Extraction> {
        let entries = self.entries.read().await;
        match entries.records.get(&(path.to_string(), mtime)) {
            Some(cached) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Cache hit for {}", path);
                Some(match cached {
                    CachedExtraction::Component(record) => Extraction::Full(Arc::clone(record)),
                    CachedExtraction::NotAComponent => Extraction::NotAComponent,
                })
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Store a result, replacing entries for older modification times.
    ///
    /// Fallback results are not stored so the next pass retries them.
    pub async fn put(&self, path: &str, mtime: i64, extraction: &Extraction) {
        let cached = match extraction {
            Extraction::Full(record) => CachedExtraction::Component(Arc::clone(record)),
            Extraction::NotAComponent => CachedExtraction::NotAComponent,
            Extraction::Fallback { .. } => return,
        };

        let mut entries = self.entries.write().await;
        entries.records.retain(|(p, _), _| p != path);
        match &cached {
            CachedExtraction::Component(record) => {
                entries
                    .imports
                    .insert(path.to_string(), record.imports.clone());
            }
            CachedExtraction::NotAComponent => {
                entries.imports.remove(path);
            }
        }
        entries.records.insert((path.to_string(), mtime), cached);
    }

    /// Return the cached result or run `extract` and cache what it yields
    pub async fn get_or_extract<F, Fut>(&self, path: &str, mtime: i64, extract: F) -> Extraction
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Extraction>,
    {
        if let Some(hit) = self.get(path, mtime).await {
            return hit;
        }
        let extraction = extract().await;
        self.put(path, mtime, &extraction).await;
        extraction
    }

    /// Imports recorded for a path by its latest cached extraction
    pub async fn imports(&self, path: &str) -> Option<Vec<ImportRecord>> {
        self.entries.read().await.imports.get(path).cloned()
    }

    /// Drop every entry for `path`, whatever its mtime, and all derived caches
    pub async fn invalidate(&self, path: &str) {
        let removed = {
            let mut entries = self.entries.write().await;
            let before = entries.records.len();
            entries.records.retain(|(p, _), _| p != path);
            entries.imports.remove(path);
            before - entries.records.len()
        };
        self.clear_derived().await;
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::debug!("Invalidated {} ({} entries)", path, removed);
    }

    /// Drop everything
    pub async fn invalidate_all(&self) {
        {
            let mut entries = self.entries.write().await;
            entries.records.clear();
            entries.imports.clear();
        }
        self.clear_derived().await;
        self.invalidations.fetch_add(1, Ordering::Relaxed);
        tracing::info!("Analysis cache cleared");
    }

    /// Drop the workspace-wide aggregates only
    pub async fn clear_derived(&self) {
        *self.derived.write().await = DerivedCaches::default();
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Incremented whenever derived caches are dropped
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            invalidations: self.invalidations.load(Ordering::Relaxed),
            entries: self.entries.read().await.records.len(),
            generation: self.generation(),
        }
    }

    derived_slot!(graph, set_graph, graph_or_compute, DependencyGraph);
    derived_slot!(patterns, set_patterns, patterns_or_compute, PatternSummary);
    derived_slot!(
        architecture,
        set_architecture,
        architecture_or_compute,
        ArchitectureSummary
    );
    derived_slot!(
        design_system,
        set_design_system,
        design_system_or_compute,
        DesignSystemSummary
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExtractionError;
    use crate::extractor::ComponentExtractor;
    use std::sync::atomic::AtomicUsize;

    const BUTTON: &str = "import { cn } from './cn';\nexport const Button = () => <button/>;";

    fn extract(path: &str, content: &str) -> Extraction {
        ComponentExtractor::default().extract(path, content)
    }

    #[tokio::test]
    async fn test_unchanged_file_is_a_hit() {
        let cache = AnalysisCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let result = cache
                .get_or_extract("src/Button.tsx", 1000, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    extract("src/Button.tsx", BUTTON)
                })
                .await;
            assert!(matches!(result, Extraction::Full(_)));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stats = cache.stats().await;
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[tokio::test]
    async fn test_new_mtime_recomputes_and_replaces() {
        let cache = AnalysisCache::new();
        let calls = AtomicUsize::new(0);

        for mtime in [1000, 2000] {
            cache
                .get_or_extract("src/Button.tsx", mtime, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    extract("src/Button.tsx", BUTTON)
                })
                .await;
        }

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(cache.get("src/Button.tsx", 1000).await.is_none());
        assert!(cache.get("src/Button.tsx", 2000).await.is_some());
        assert_eq!(cache.stats().await.entries, 1);
    }

    #[tokio::test]
    async fn test_invalidate_removes_exactly_that_path() {
        let cache = AnalysisCache::new();
        cache
            .put("src/Button.tsx", 1, &extract("src/Button.tsx", BUTTON))
            .await;
        cache
            .put(
                "src/Card.tsx",
                1,
                &extract("src/Card.tsx", "export const Card = () => <div/>;"),
            )
            .await;

        cache.invalidate("src/Button.tsx").await;

        assert!(cache.get("src/Button.tsx", 1).await.is_none());
        assert!(cache.imports("src/Button.tsx").await.is_none());
        assert!(cache.get("src/Card.tsx", 1).await.is_some());
        assert_eq!(cache.stats().await.invalidations, 1);
    }

    #[tokio::test]
    async fn test_imports_are_tracked() {
        let cache = AnalysisCache::new();
        cache
            .put("src/Button.tsx", 1, &extract("src/Button.tsx", BUTTON))
            .await;
        let imports = cache.imports("src/Button.tsx").await.unwrap();
        assert_eq!(imports.len(), 1);
        assert_eq!(imports[0].source, "src/cn");
    }

    #[tokio::test]
    async fn test_fallback_is_not_cached() {
        let cache = AnalysisCache::new();
        let fallback = Extraction::fallback(
            "src/Slow.tsx",
            ExtractionError::Timeout {
                path: "src/Slow.tsx".to_string(),
                secs: 5,
            },
        );
        cache.put("src/Slow.tsx", 1, &fallback).await;
        assert!(cache.get("src/Slow.tsx", 1).await.is_none());
    }

    #[tokio::test]
    async fn test_not_a_component_is_cached() {
        let cache = AnalysisCache::new();
        cache
            .put("src/math.js", 1, &Extraction::NotAComponent)
            .await;
        assert_eq!(
            cache.get("src/math.js", 1).await,
            Some(Extraction::NotAComponent)
        );
    }

    #[tokio::test]
    async fn test_derived_caches_are_rebuilt_after_invalidation() {
        let cache = AnalysisCache::new();
        let first = cache.set_patterns("fp", PatternSummary::default()).await;
        assert!(Arc::ptr_eq(&first, &cache.patterns("fp").await.unwrap()));
        assert!(cache.patterns("other").await.is_none());

        let generation = cache.generation();
        cache.invalidate("src/Button.tsx").await;
        assert!(cache.patterns("fp").await.is_none());
        assert!(cache.graph("fp").await.is_none());
        assert!(cache.generation() > generation);

        let second = cache.set_patterns("fp", PatternSummary::default()).await;
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_or_compute_runs_once_per_fingerprint() {
        let cache = AnalysisCache::new();
        let calls = AtomicUsize::new(0);
        let compute = || {
            calls.fetch_add(1, Ordering::SeqCst);
            DependencyGraph::default()
        };

        let a = cache.graph_or_compute("fp", compute).await;
        let b = cache.graph_or_compute("fp", compute).await;
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        cache.graph_or_compute("fp2", compute).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fingerprint_is_order_sensitive_and_separated() {
        let a = fingerprint(["src/A.tsx", "1"]);
        assert_eq!(a, fingerprint(["src/A.tsx", "1"]));
        assert_ne!(a, fingerprint(["1", "src/A.tsx"]));
        assert_ne!(fingerprint(["ab", "c"]), fingerprint(["a", "bc"]));
        assert_eq!(a.len(), 64);
    }

    #[tokio::test]
    async fn test_invalidate_all() {
        let cache = AnalysisCache::new();
        cache
            .put("src/Button.tsx", 1, &extract("src/Button.tsx", BUTTON))
            .await;
        cache.set_graph("fp", DependencyGraph::default()).await;

        cache.invalidate_all().await;

        assert_eq!(cache.stats().await.entries, 0);
        assert!(cache.graph("fp").await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_invalidation_and_reads() {
        let cache = Arc::new(AnalysisCache::new());
        let record = extract("src/Button.tsx", BUTTON);

        let mut handles = Vec::new();
        for i in 0..16 {
            let cache = Arc::clone(&cache);
            let record = record.clone();
            handles.push(tokio::spawn(async move {
                if i % 2 == 0 {
                    cache.put("src/Button.tsx", 1, &record).await;
                } else {
                    cache.invalidate("src/Button.tsx").await;
                }
                if let Some(Extraction::Full(hit)) = cache.get("src/Button.tsx", 1).await {
                    assert_eq!(hit.name, "Button");
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }
        assert!(cache.stats().await.entries <= 1);
    }
}
