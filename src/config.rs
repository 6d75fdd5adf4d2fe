/// Configuration system for palette-analyzer
///
/// Supports loading from multiple sources with priority:
/// Environment variables > Config file > Defaults
use crate::error::{AnalyzerError, ConfigError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Source scanning configuration
    #[serde(default)]
    pub scanner: ScannerConfig,

    /// Per-file extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Workspace-wide analysis configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Source scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Directories (relative to the root) searched for component files
    #[serde(default = "default_component_dirs")]
    pub component_dirs: Vec<String>,

    /// Directory names never traversed
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// File extensions considered for component extraction (without dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Files larger than this many characters are skipped
    #[serde(default = "default_max_file_chars")]
    pub max_file_chars: usize,

    /// Additional file names the watcher reports on
    #[serde(default = "default_watch_files")]
    pub watch_files: Vec<String>,
}

/// Per-file extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Number of files extracted concurrently in one batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Per-file extraction timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of comments kept per component
    #[serde(default = "default_max_comments")]
    pub max_comments: usize,

    /// Import specifier prefixes rewritten to root-relative paths
    #[serde(default = "default_path_aliases")]
    pub path_aliases: BTreeMap<String, String>,
}

/// Workspace-wide analysis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// A component with more props than this flags prop drilling
    #[serde(default = "default_prop_drilling_threshold")]
    pub prop_drilling_threshold: usize,

    /// Depth of the directory listing recorded in the project structure
    #[serde(default = "default_structure_depth")]
    pub structure_depth: usize,

    /// Number of most frequent elements kept in the design-system summary
    #[serde(default = "default_top_elements")]
    pub top_elements: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn default_component_dirs() -> Vec<String> {
    strings(&[
        "src",
        "components",
        "pages",
        "app",
        "ui",
        "lib",
        "src/components",
        "src/ui",
        "src/pages",
        "src/app",
    ])
}

fn default_ignored_dirs() -> Vec<String> {
    strings(&["node_modules", ".git", "dist", "build", ".next", "out"])
}

fn default_extensions() -> Vec<String> {
    strings(&["js", "jsx", "ts", "tsx", "vue"])
}

fn default_max_file_chars() -> usize {
    50_000
}

fn default_watch_files() -> Vec<String> {
    strings(&["package.json", "tsconfig.json"])
}

fn default_batch_size() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_comments() -> usize {
    5
}

fn default_path_aliases() -> BTreeMap<String, String> {
    let mut aliases = BTreeMap::new();
    aliases.insert("@/".to_string(), "src/".to_string());
    aliases.insert("~/".to_string(), "src/".to_string());
    aliases
}

fn default_prop_drilling_threshold() -> usize {
    5
}

fn default_structure_depth() -> usize {
    3
}

fn default_top_elements() -> usize {
    10
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            component_dirs: default_component_dirs(),
            ignored_dirs: default_ignored_dirs(),
            extensions: default_extensions(),
            max_file_chars: default_max_file_chars(),
            watch_files: default_watch_files(),
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            max_comments: default_max_comments(),
            path_aliases: default_path_aliases(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            prop_drilling_threshold: default_prop_drilling_threshold(),
            structure_depth: default_structure_depth(),
            top_elements: default_top_elements(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn from_file(path: &Path) -> Result<Self, AnalyzerError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default location or create default
    pub fn load_or_default() -> Result<Self, AnalyzerError> {
        let config_path = crate::paths::PlatformPaths::default_config_path();

        if config_path.exists() {
            tracing::info!("Loading config from: {}", config_path.display());
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), AnalyzerError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        if self.extraction.batch_size == 0 {
            return Err(invalid("extraction.batch_size", "must be greater than 0"));
        }

        if self.extraction.timeout_secs == 0 {
            return Err(invalid("extraction.timeout_secs", "must be greater than 0"));
        }

        if self.scanner.max_file_chars == 0 {
            return Err(invalid("scanner.max_file_chars", "must be greater than 0"));
        }

        if self.scanner.extensions.is_empty() {
            return Err(invalid("scanner.extensions", "must not be empty"));
        }

        if let Some(ext) = self.scanner.extensions.iter().find(|e| e.starts_with('.')) {
            return Err(invalid(
                "scanner.extensions",
                &format!("extensions are given without a dot, got '{}'", ext),
            ));
        }

        for (alias, target) in &self.extraction.path_aliases {
            if !alias.ends_with('/') || !(target.is_empty() || target.ends_with('/')) {
                return Err(invalid(
                    "extraction.path_aliases",
                    &format!("alias '{}' -> '{}' must end with '/'", alias, target),
                ));
            }
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(batch_size) = std::env::var("PALETTE_BATCH_SIZE")
            && let Ok(size) = batch_size.parse()
        {
            self.extraction.batch_size = size;
        }

        if let Ok(timeout) = std::env::var("PALETTE_TIMEOUT_SECS")
            && let Ok(secs) = timeout.parse()
        {
            self.extraction.timeout_secs = secs;
        }

        if let Ok(max_chars) = std::env::var("PALETTE_MAX_FILE_CHARS")
            && let Ok(max) = max_chars.parse()
        {
            self.scanner.max_file_chars = max;
        }

        if let Ok(ignored) = std::env::var("PALETTE_IGNORED_DIRS") {
            self.scanner.ignored_dirs = ignored
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
        }

        if let Ok(threshold) = std::env::var("PALETTE_PROP_DRILLING_THRESHOLD")
            && let Ok(value) = threshold.parse()
        {
            self.analysis.prop_drilling_threshold = value;
        }
    }

    /// Create a new Config with defaults and environment overrides
    pub fn new() -> Result<Self, AnalyzerError> {
        let mut config = Self::load_or_default()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}

fn invalid(key: &str, reason: &str) -> AnalyzerError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests;
