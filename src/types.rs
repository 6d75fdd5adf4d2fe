use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Coarse complexity class of a component
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Simple,
    Moderate,
    Complex,
}

impl Complexity {
    /// Numeric rank used in node weights (simple = 1)
    pub fn rank(&self) -> u32 {
        match self {
            Self::Simple => 1,
            Self::Moderate => 2,
            Self::Complex => 3,
        }
    }
}

/// Functional category of a component
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Page,
    Layout,
    UiPrimitive,
    Form,
    DataDisplay,
    Navigation,
    Feedback,
    Overlay,
    BusinessLogic,
    Utility,
}

impl Category {
    /// All categories in declaration order
    pub const ALL: [Category; 10] = [
        Self::Page,
        Self::Layout,
        Self::UiPrimitive,
        Self::Form,
        Self::DataDisplay,
        Self::Navigation,
        Self::Feedback,
        Self::Overlay,
        Self::BusinessLogic,
        Self::Utility,
    ];

    /// Get the serialized name of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Layout => "layout",
            Self::UiPrimitive => "ui-primitive",
            Self::Form => "form",
            Self::DataDisplay => "data-display",
            Self::Navigation => "navigation",
            Self::Feedback => "feedback",
            Self::Overlay => "overlay",
            Self::BusinessLogic => "business-logic",
            Self::Utility => "utility",
        }
    }
}

/// One import statement of a component file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ImportRecord {
    /// Module specifier exactly as written (`./Button`, `react`)
    pub specifier: String,
    /// Root-relative path for internal imports, the verbatim specifier otherwise
    pub source: String,
    /// Local binding names introduced by the import
    #[serde(default)]
    pub bindings: Vec<String>,
    /// Whether the import has a default binding
    #[serde(default)]
    pub has_default: bool,
    /// Whether the specifier names an external package
    pub is_external: bool,
}

/// Everything extracted from a single component file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComponentRecord {
    /// Component name, from the primary export or the file name
    pub name: String,
    /// Path relative to the analysis root, forward slashes
    pub path: String,
    /// Exported symbols in detection order, no duplicates
    #[serde(default)]
    pub exports: Vec<String>,
    #[serde(default)]
    pub imports: Vec<ImportRecord>,
    /// Hooks and composables used
    #[serde(default)]
    pub hooks: Vec<String>,
    /// Destructured prop names
    #[serde(default)]
    pub props: Vec<String>,
    /// Opening-tag names seen in JSX or templates
    #[serde(default)]
    pub jsx_elements: Vec<String>,
    /// Common UI keywords present in the source (modal, table, ...)
    #[serde(default)]
    pub ui_patterns: Vec<String>,
    /// Event handler attributes (`onClick`, `@submit`)
    #[serde(default)]
    pub event_handlers: Vec<String>,
    /// Literal-valued `const` declarations
    #[serde(default)]
    pub constants: Vec<String>,
    /// Leading doc and line comments, capped
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub line_count: usize,
    pub complexity: Complexity,
    pub category: Category,
    /// Set on basic records that replaced a failed extraction
    #[serde(default)]
    pub degraded: bool,
}

impl ComponentRecord {
    /// Minimal record used when extraction fails or times out.
    pub fn basic(path: &str) -> Self {
        Self {
            name: component_name_from_path(path),
            path: path.to_string(),
            exports: Vec::new(),
            imports: Vec::new(),
            hooks: Vec::new(),
            props: Vec::new(),
            jsx_elements: Vec::new(),
            ui_patterns: Vec::new(),
            event_handlers: Vec::new(),
            constants: Vec::new(),
            comments: Vec::new(),
            description: None,
            line_count: 0,
            complexity: Complexity::Simple,
            category: Category::Utility,
            degraded: true,
        }
    }

    /// Internal (non-package) imports of this component
    pub fn internal_imports(&self) -> impl Iterator<Item = &ImportRecord> {
        self.imports.iter().filter(|i| !i.is_external)
    }
}

/// Derive a PascalCase component name from a file path.
///
/// `index`, `page` and `layout` files take the name of their directory.
pub fn component_name_from_path(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let file = segments.next().unwrap_or(path);
    let stem = file.split('.').next().unwrap_or(file);

    let base = if matches!(stem, "index" | "page" | "layout") {
        segments.next().filter(|d| !d.is_empty()).unwrap_or(stem)
    } else {
        stem
    };

    to_pascal_case(base)
}

/// Convert `login-form`, `login_form` or `loginForm` to `LoginForm`
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c == ' ' || c == '[' || c == ']')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}
