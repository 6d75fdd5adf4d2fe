//! Complexity and category classification.

use crate::types::{Category, Complexity};

/// Ordered category rules; the first whose name suffixes match wins
const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (Category::Layout, &["Layout", "Shell", "Header", "Footer"]),
    (
        Category::Navigation,
        &["Nav", "Navbar", "Menu", "Breadcrumb", "Tabs", "Sidebar", "Link", "Pagination"],
    ),
    (
        Category::Form,
        &["Form", "Input", "Select", "Checkbox", "Radio", "Field", "TextArea", "Textarea", "Switch"],
    ),
    (
        Category::Overlay,
        &["Modal", "Dialog", "Drawer", "Popover", "Tooltip", "Dropdown", "Overlay"],
    ),
    (
        Category::Feedback,
        &[
            "Alert",
            "Toast",
            "Notification",
            "Spinner",
            "Loader",
            "Loading",
            "Progress",
            "Skeleton",
            "Error",
            "Banner",
        ],
    ),
    (
        Category::DataDisplay,
        &["Table", "List", "Card", "Chart", "Badge", "Avatar", "Stat", "Item", "Detail", "Profile"],
    ),
    (
        Category::BusinessLogic,
        &["Container", "Provider", "Manager", "Controller", "Store", "Context"],
    ),
    (
        Category::UiPrimitive,
        &["Button", "Icon", "Text", "Heading", "Label", "Image", "Divider", "Box", "Stack", "Tag", "Chip"],
    ),
];

const PAGE_SUFFIXES: &[&str] = &["Page", "Screen"];
const PAGE_DIRS: &[&str] = &["pages", "app"];

/// Inputs of the complexity rule
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexitySignals {
    pub line_count: usize,
    pub hook_count: usize,
    pub element_count: usize,
}

/// Complex above 200 lines, 5 hooks or 15 elements; moderate above 80 lines,
/// 2 hooks or 6 elements; simple otherwise
pub fn classify_complexity(signals: ComplexitySignals) -> Complexity {
    let ComplexitySignals {
        line_count,
        hook_count,
        element_count,
    } = signals;

    if line_count > 200 || hook_count > 5 || element_count > 15 {
        Complexity::Complex
    } else if line_count > 80 || hook_count > 2 || element_count > 6 {
        Complexity::Moderate
    } else {
        Complexity::Simple
    }
}

fn has_suffix(name: &str, suffixes: &[&str]) -> bool {
    suffixes.iter().any(|s| name.ends_with(s))
}

fn in_dir(path: &str, dirs: &[&str]) -> bool {
    path.split('/')
        .rev()
        .skip(1)
        .any(|segment| dirs.contains(&segment))
}

/// Category from the component name, its path and whether it renders markup
pub fn classify_category(name: &str, path: &str, has_elements: bool) -> Category {
    if has_suffix(name, PAGE_SUFFIXES) || in_dir(path, PAGE_DIRS) {
        return Category::Page;
    }

    for (category, suffixes) in CATEGORY_RULES {
        if has_suffix(name, suffixes) {
            return *category;
        }
    }

    if in_dir(path, &["ui"]) || has_elements {
        Category::UiPrimitive
    } else {
        Category::Utility
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(line_count: usize, hook_count: usize, element_count: usize) -> ComplexitySignals {
        ComplexitySignals {
            line_count,
            hook_count,
            element_count,
        }
    }

    #[test]
    fn test_complexity_thresholds() {
        assert_eq!(classify_complexity(signals(10, 1, 3)), Complexity::Simple);
        assert_eq!(classify_complexity(signals(80, 2, 6)), Complexity::Simple);
        assert_eq!(classify_complexity(signals(81, 0, 0)), Complexity::Moderate);
        assert_eq!(classify_complexity(signals(10, 3, 0)), Complexity::Moderate);
        assert_eq!(classify_complexity(signals(10, 0, 7)), Complexity::Moderate);
        assert_eq!(classify_complexity(signals(201, 0, 0)), Complexity::Complex);
        assert_eq!(classify_complexity(signals(10, 6, 0)), Complexity::Complex);
        assert_eq!(classify_complexity(signals(10, 0, 16)), Complexity::Complex);
    }

    #[test]
    fn test_page_category() {
        assert_eq!(
            classify_category("SettingsPage", "src/views/SettingsPage.tsx", true),
            Category::Page
        );
        assert_eq!(
            classify_category("Checkout", "src/pages/checkout.tsx", true),
            Category::Page
        );
        assert_eq!(
            classify_category("Dashboard", "app/dashboard/page.tsx", true),
            Category::Page
        );
    }

    #[test]
    fn test_name_rules_in_order() {
        let c = |name: &str| classify_category(name, "src/components/X.tsx", true);
        assert_eq!(c("AppLayout"), Category::Layout);
        assert_eq!(c("SiteHeader"), Category::Layout);
        assert_eq!(c("MainNav"), Category::Navigation);
        assert_eq!(c("LoginForm"), Category::Form);
        assert_eq!(c("ConfirmDialog"), Category::Overlay);
        assert_eq!(c("LoadingSpinner"), Category::Feedback);
        assert_eq!(c("UserCard"), Category::DataDisplay);
        assert_eq!(c("AuthProvider"), Category::BusinessLogic);
        assert_eq!(c("IconButton"), Category::UiPrimitive);
    }

    #[test]
    fn test_fallback_categories() {
        assert_eq!(
            classify_category("Anything", "src/ui/anything.tsx", false),
            Category::UiPrimitive
        );
        assert_eq!(
            classify_category("Widget", "src/components/Widget.tsx", true),
            Category::UiPrimitive
        );
        assert_eq!(
            classify_category("formatters", "src/lib/formatters.ts", false),
            Category::Utility
        );
    }

    #[test]
    fn test_file_named_like_dir_is_not_a_dir() {
        assert_eq!(
            classify_category("Helpers", "src/pages.ts", false),
            Category::Utility
        );
    }
}
