/// Centralized error types for palette-analyzer using thiserror
///
/// Per-file problems (oversized files, extraction timeouts, extraction
/// failures) are contained at the file boundary and recorded as values.
/// Only workspace-level failures reach the caller as an `AnalyzerError`.
use thiserror::Error;

/// Main error type for the analysis engine
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Watch error: {0}")]
    Watch(#[from] WatchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while scanning the workspace tree
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(String),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to walk directory: {0}")]
    WalkFailed(String),

    #[error("File '{path}' exceeds the size limit: {size} > {max} characters")]
    FileTooLarge {
        path: String,
        size: usize,
        max: usize,
    },

    #[error("Failed to read file '{file}': {reason}")]
    ReadFailed { file: String, reason: String },
}

/// Errors raised while extracting a single component file.
///
/// These never abort a scan: they are carried in `Extraction::Fallback`
/// alongside the basic record that replaced the failed extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Extraction of '{path}' timed out after {secs} seconds")]
    Timeout { path: String, secs: u64 },

    #[error("Extraction of '{path}' failed: {reason}")]
    Failure { path: String, reason: String },

    #[error("Extraction task for '{path}' panicked: {reason}")]
    Panicked { path: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to input validation
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Path does not exist: {0}")]
    PathNotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Path '{path}' is outside the analysis root '{root}'")]
    OutsideRoot { path: String, root: String },
}

/// Errors related to the file-system watcher
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to initialize file watcher: {0}")]
    InitFailed(String),

    #[error("Failed to watch '{path}': {reason}")]
    WatchFailed { path: String, reason: String },
}

impl From<anyhow::Error> for AnalyzerError {
    fn from(err: anyhow::Error) -> Self {
        AnalyzerError::Other(format!("{:#}", err))
    }
}

impl AnalyzerError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        AnalyzerError::Other(msg.into())
    }

    /// Convert to a user-facing error string
    pub fn to_user_string(&self) -> String {
        format!("{}", self)
    }

    /// Check if this is a user error (bad input or config) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Validation(_)
                | AnalyzerError::Scan(ScanError::RootNotFound(_))
                | AnalyzerError::Scan(ScanError::NotADirectory(_))
                | AnalyzerError::Config(ConfigError::InvalidValue { .. })
        )
    }

    /// Check if the caller may retry the analysis on the next trigger
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AnalyzerError::Scan(ScanError::WalkFailed(_))
                | AnalyzerError::Scan(ScanError::ReadFailed { .. })
                | AnalyzerError::Io(_)
                | AnalyzerError::Watch(_)
        )
    }
}
