//! Tests for SourceScanner

use super::*;
use std::fs;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn relative_paths(output: &ScanOutput) -> Vec<&str> {
    output
        .files
        .iter()
        .map(|f| f.record.relative_path.as_str())
        .collect()
}

#[test]
fn test_new_uses_default_config() {
    let scanner = SourceScanner::new("/tmp");
    assert_eq!(scanner.root, PathBuf::from("/tmp"));
    assert_eq!(scanner.max_file_chars, 50_000);
    assert!(scanner.ignored_dirs.contains(&"node_modules".to_string()));
    assert!(scanner.extensions.contains(&"vue".to_string()));
}

#[test]
fn test_with_ignored_dirs() {
    let scanner = SourceScanner::new("/tmp").with_ignored_dirs(vec!["vendor".to_string()]);
    assert_eq!(scanner.ignored_dirs, vec!["vendor"]);
}

#[test]
fn test_scan_nonexistent_directory() {
    let scanner = SourceScanner::new("/nonexistent/path/12345");
    let result = scanner.scan();
    assert!(matches!(result, Err(ScanError::RootNotFound(_))));
}

#[test]
fn test_scan_not_a_directory() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("notadir.txt");
    fs::write(&file_path, "test").unwrap();

    let result = SourceScanner::new(&file_path).scan();
    assert!(matches!(result, Err(ScanError::NotADirectory(_))));
}

#[test]
fn test_scan_empty_directory() {
    let temp_dir = TempDir::new().unwrap();
    let output = SourceScanner::new(temp_dir.path()).scan().unwrap();
    assert!(output.files.is_empty());
    assert!(output.skipped.is_empty());
    assert_eq!(output.files_seen, 0);
}

#[test]
fn test_scan_filters_by_extension_and_heuristic() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/Button.tsx", "export const Button = () => <button/>;");
    write(root, "src/helpers.ts", "export function add(a, b) { return a + b; }");
    write(root, "src/styles.css", ".button { color: red; }");
    write(root, "src/card.jsx", "export default function Card() { return <div/>; }");

    let output = SourceScanner::new(root).scan().unwrap();
    assert_eq!(relative_paths(&output), vec!["src/Button.tsx", "src/card.jsx"]);
    assert_eq!(output.files_seen, 3);
}

#[test]
fn test_scan_never_enters_ignored_directories() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/App.tsx", "export const App = () => <main/>;");
    write(
        root,
        "src/node_modules/lib/Widget.tsx",
        "export const Widget = () => <div/>;",
    );
    write(root, "src/dist/Bundle.jsx", "export const Bundle = () => null;");
    write(root, "src/.next/Page.jsx", "export const Page = () => null;");

    let output = SourceScanner::new(root).scan().unwrap();
    assert_eq!(relative_paths(&output), vec!["src/App.tsx"]);
}

#[test]
fn test_scan_overlapping_component_dirs_dedupe() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "src/components/Header.tsx",
        "export const Header = () => <header/>;",
    );

    let output = SourceScanner::new(root).scan().unwrap();
    assert_eq!(relative_paths(&output), vec!["src/components/Header.tsx"]);
}

#[test]
fn test_scan_falls_back_to_root() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "Widget.jsx", "export const Widget = () => <div/>;");
    write(root, "node_modules/Other.jsx", "export const Other = () => <div/>;");

    let output = SourceScanner::new(root).scan().unwrap();
    assert_eq!(relative_paths(&output), vec!["Widget.jsx"]);
}

#[test]
fn test_scan_skips_large_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(root, "src/Small.tsx", "export const Small = () => null;");
    let big = format!("export const Big = () => null;\n{}", "x".repeat(2000));
    write(root, "src/Big.tsx", &big);

    let output = SourceScanner::new(root)
        .with_max_file_chars(500)
        .scan()
        .unwrap();

    assert_eq!(relative_paths(&output), vec!["src/Small.tsx"]);
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].path, "src/Big.tsx");
    assert!(output.skipped[0].reason.contains("exceeds the size limit"));
}

#[test]
fn test_scan_skips_non_utf8_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/Broken.tsx"), [0xff, 0xfe, 0x00, 0x41]).unwrap();

    let output = SourceScanner::new(root).scan().unwrap();
    assert!(output.files.is_empty());
    assert_eq!(output.skipped.len(), 1);
    assert!(output.skipped[0].reason.contains("Failed to read file"));
}

#[test]
fn test_file_record_fields() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let content = "export const Nav = () => <nav/>;";
    write(root, "src/Nav.TSX", content);

    let output = SourceScanner::new(root).scan().unwrap();
    let record = &output.files[0].record;
    assert_eq!(record.extension, "tsx");
    assert_eq!(record.size, content.len() as u64);
    assert!(record.is_candidate);
    assert!(record.mtime_key() > 0);
    assert_eq!(output.files[0].content, content);
}

#[test]
fn test_has_allowed_extension() {
    let scanner = SourceScanner::new("/tmp");
    assert!(scanner.has_allowed_extension(Path::new("a/B.vue")));
    assert!(scanner.has_allowed_extension(Path::new("a/B.JSX")));
    assert!(!scanner.has_allowed_extension(Path::new("a/B.md")));
    assert!(!scanner.has_allowed_extension(Path::new("a/Makefile")));
}
