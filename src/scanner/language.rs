//! Language detection from file extensions

/// Detect the source language of a component file from its extension
pub fn detect_language(extension: &str) -> Option<&'static str> {
    let lang = match extension.to_lowercase().as_str() {
        "js" | "mjs" | "cjs" => "JavaScript",
        "jsx" => "JavaScript (JSX)",
        "ts" | "mts" | "cts" => "TypeScript",
        "tsx" => "TypeScript (TSX)",
        "vue" => "Vue",
        _ => return None,
    };

    Some(lang)
}

/// Whether the extension denotes a TypeScript source file
pub fn is_typescript_extension(extension: &str) -> bool {
    matches!(
        extension.to_lowercase().as_str(),
        "ts" | "tsx" | "mts" | "cts"
    )
}
