//! Prop name detection from destructuring and Vue prop declarations.

use once_cell::sync::Lazy;
use regex::Regex;

use super::exports::is_identifier;
use super::push_unique;

static FUNCTION_PARAMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"function\s*[A-Za-z_$]?[\w$]*\s*(?:<[^>]*>)?\s*\(\s*\{([^}]*)\}").expect("valid regex")
});

static ARROW_PARAMS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:const|let|var)\s+[A-Za-z_$][\w$]*\s*(?::[^=]+?)?=\s*(?:[\w$.]+\(\s*)?(?:async\s*)?\(\s*\{([^}]*)\}",
    )
    .expect("valid regex")
});

static VUE_PROPS_ARRAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:defineProps\s*\(|\bprops\s*:)\s*\[([^\]]*)\]").expect("valid regex")
});

static VUE_PROPS_TYPED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"defineProps\s*<\s*\{([^}]*)\}\s*>").expect("valid regex"));

static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid regex"));

/// Prop names from a destructuring pattern body (`a, b = 1, c: renamed, ...rest`)
pub fn destructured_names(pattern: &str) -> Vec<String> {
    pattern
        .split(',')
        .filter_map(|binding| {
            let binding = binding.trim();
            if binding.starts_with("...") {
                return None;
            }
            let name = binding
                .split(['=', ':'])
                .next()
                .unwrap_or(binding)
                .trim();
            is_identifier(name).then(|| name.to_string())
        })
        .collect()
}

/// Props destructured in function and arrow component signatures
pub fn destructured_props(content: &str) -> Vec<String> {
    FUNCTION_PARAMS
        .captures_iter(content)
        .chain(ARROW_PARAMS.captures_iter(content))
        .filter_map(|c| c.get(1))
        .flat_map(|m| destructured_names(m.as_str()))
        .collect()
}

/// Props declared with `defineProps([...])`, `props: [...]` or `defineProps<{...}>()`
pub fn vue_props(content: &str) -> Vec<String> {
    let mut props = Vec::new();

    for caps in VUE_PROPS_ARRAY.captures_iter(content) {
        for quoted in QUOTED.captures_iter(&caps[1]) {
            props.push(quoted[1].to_string());
        }
    }

    for caps in VUE_PROPS_TYPED.captures_iter(content) {
        for field in caps[1].split([';', ',', '\n']) {
            let name = field
                .split(':')
                .next()
                .unwrap_or("")
                .trim()
                .trim_end_matches('?')
                .trim_start_matches("readonly ")
                .trim();
            if is_identifier(name) {
                props.push(name.to_string());
            }
        }
    }

    props
}

/// All prop names, deduplicated in discovery order
pub fn extract_props(content: &str) -> Vec<String> {
    let mut props = Vec::new();
    for prop in destructured_props(content).into_iter().chain(vue_props(content)) {
        push_unique(&mut props, prop);
    }
    props
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destructured_names() {
        assert_eq!(
            destructured_names(" title, size = 'md', onClose: close, ...rest "),
            vec!["title", "size", "onClose"]
        );
    }

    #[test]
    fn test_function_component_props() {
        let content = "export function Modal({ isOpen, onClose, children }) { return null }";
        assert_eq!(extract_props(content), vec!["isOpen", "onClose", "children"]);
    }

    #[test]
    fn test_arrow_component_props() {
        let content = "export const Card: React.FC<CardProps> = ({ title, footer }) => null;\nconst Memo = React.memo(({ item }) => null);";
        assert_eq!(extract_props(content), vec!["title", "footer", "item"]);
    }

    #[test]
    fn test_vue_props() {
        let array = "export default { props: ['title', \"size\"] }";
        assert_eq!(extract_props(array), vec!["title", "size"]);

        let setup = "const props = defineProps(['modelValue'])";
        assert_eq!(extract_props(setup), vec!["modelValue"]);

        let typed = "const props = defineProps<{ label: string; disabled?: boolean }>()";
        assert_eq!(extract_props(typed), vec!["label", "disabled"]);
    }

    #[test]
    fn test_no_props() {
        assert!(extract_props("export const App = () => <main/>;").is_empty());
    }
}
