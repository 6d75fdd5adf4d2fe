use super::*;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.extraction.batch_size, 5);
    assert_eq!(config.extraction.timeout_secs, 5);
    assert_eq!(config.extraction.max_comments, 5);
    assert_eq!(config.scanner.max_file_chars, 50_000);
    assert_eq!(config.analysis.prop_drilling_threshold, 5);
}

#[test]
fn test_default_ignored_dirs() {
    let config = Config::default();
    for dir in ["node_modules", ".git", "dist", "build", ".next", "out"] {
        assert!(
            config.scanner.ignored_dirs.contains(&dir.to_string()),
            "missing {}",
            dir
        );
    }
}

#[test]
fn test_default_extensions_and_watch_files() {
    let config = ScannerConfig::default();
    assert_eq!(config.extensions, vec!["js", "jsx", "ts", "tsx", "vue"]);
    assert_eq!(config.watch_files, vec!["package.json", "tsconfig.json"]);
}

#[test]
fn test_validate_valid_config() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_validate_zero_batch_size() {
    let mut config = Config::default();
    config.extraction.batch_size = 0;
    let result = config.validate();
    assert!(matches!(
        result.unwrap_err(),
        AnalyzerError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.extraction.timeout_secs = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_empty_extensions() {
    let mut config = Config::default();
    config.scanner.extensions.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_dotted_extension() {
    let mut config = Config::default();
    config.scanner.extensions = vec![".tsx".to_string()];
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_bad_alias() {
    let mut config = Config::default();
    config
        .extraction
        .path_aliases
        .insert("#components".to_string(), "src/components/".to_string());
    assert!(config.validate().is_err());
}

#[test]
fn test_save_and_load() {
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    let mut config = Config::default();
    config.extraction.batch_size = 8;
    config.scanner.max_file_chars = 10_000;

    config.save(path).unwrap();
    let loaded = Config::from_file(path).unwrap();

    assert_eq!(loaded.extraction.batch_size, 8);
    assert_eq!(loaded.scanner.max_file_chars, 10_000);
    assert_eq!(loaded.extraction.path_aliases, config.extraction.path_aliases);
}

#[test]
fn test_load_nonexistent_file() {
    let result = Config::from_file(Path::new("/nonexistent/palette.toml"));
    assert!(matches!(
        result.unwrap_err(),
        AnalyzerError::Config(ConfigError::FileNotFound(_))
    ));
}

#[test]
fn test_from_file_invalid_toml() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(temp_file.path(), "scanner = {{{ broken").unwrap();

    let result = Config::from_file(temp_file.path());
    assert!(matches!(
        result.unwrap_err(),
        AnalyzerError::Config(ConfigError::ParseFailed(_))
    ));
}

#[test]
fn test_from_file_partial_config() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"
[extraction]
batch_size = 3
"#,
    )
    .unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();
    assert_eq!(config.extraction.batch_size, 3);
    assert_eq!(config.extraction.timeout_secs, 5);
    assert_eq!(config.scanner.max_file_chars, 50_000);
}

#[test]
fn test_from_file_validates_loaded_config() {
    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"
[extraction]
batch_size = 0
"#,
    )
    .unwrap();

    let result = Config::from_file(temp_file.path());
    assert!(matches!(
        result.unwrap_err(),
        AnalyzerError::Config(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_apply_env_overrides() {
    // Safety: the only test touching PALETTE_* variables; cleaned up below
    unsafe {
        std::env::set_var("PALETTE_BATCH_SIZE", "12");
        std::env::set_var("PALETTE_TIMEOUT_SECS", "not_a_number");
        std::env::set_var("PALETTE_MAX_FILE_CHARS", "1000");
        std::env::set_var("PALETTE_IGNORED_DIRS", "node_modules, vendor ,");
        std::env::set_var("PALETTE_PROP_DRILLING_THRESHOLD", "7");
    }

    let mut config = Config::default();
    config.apply_env_overrides();

    assert_eq!(config.extraction.batch_size, 12);
    // Unparseable values keep the default
    assert_eq!(config.extraction.timeout_secs, 5);
    assert_eq!(config.scanner.max_file_chars, 1000);
    assert_eq!(config.scanner.ignored_dirs, vec!["node_modules", "vendor"]);
    assert_eq!(config.analysis.prop_drilling_threshold, 7);

    unsafe {
        std::env::remove_var("PALETTE_BATCH_SIZE");
        std::env::remove_var("PALETTE_TIMEOUT_SECS");
        std::env::remove_var("PALETTE_MAX_FILE_CHARS");
        std::env::remove_var("PALETTE_IGNORED_DIRS");
        std::env::remove_var("PALETTE_PROP_DRILLING_THRESHOLD");
    }
}

#[test]
fn test_toml_serialization() {
    let toml_str = toml::to_string(&Config::default()).unwrap();
    assert!(toml_str.contains("batch_size"));
    assert!(toml_str.contains("ignored_dirs"));
    assert!(toml_str.contains("prop_drilling_threshold"));
}
