//! Hook and composable detection.

use once_cell::sync::Lazy;
use regex::Regex;

use super::push_unique;
use crate::types::ImportRecord;

/// React built-in hooks
pub const REACT_HOOKS: &[&str] = &[
    "useState",
    "useEffect",
    "useContext",
    "useReducer",
    "useCallback",
    "useMemo",
    "useRef",
    "useLayoutEffect",
    "useImperativeHandle",
    "useDebugValue",
    "useTransition",
    "useDeferredValue",
    "useId",
    "useSyncExternalStore",
    "useInsertionEffect",
];

/// Widely used library hooks, detected by name like the built-ins
pub const LIBRARY_HOOKS: &[&str] = &[
    "useRouter",
    "usePathname",
    "useSearchParams",
    "useParams",
    "useNavigate",
    "useLocation",
    "useQuery",
    "useMutation",
    "useSelector",
    "useDispatch",
    "useForm",
    "useStore",
    "useAtom",
    "useRecoilState",
    "useRecoilValue",
    "useTranslation",
    "useTheme",
    "useSWR",
];

/// Vue Composition API functions
pub const VUE_COMPOSABLES: &[&str] = &[
    "ref",
    "reactive",
    "computed",
    "watch",
    "watchEffect",
    "onMounted",
    "onUnmounted",
    "onBeforeMount",
    "onBeforeUnmount",
    "onUpdated",
    "provide",
    "inject",
    "toRefs",
    "nextTick",
];

static HOOK_CALL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(use[A-Z]\w*)\s*(?:<[^<>()]*>)?\s*\(").expect("valid regex")
});

static VUE_COMPOSABLE_CALL: Lazy<Regex> = Lazy::new(|| {
    let names = VUE_COMPOSABLES.join("|");
    Regex::new(&format!(r"\b({})\s*(?:<[^<>()]*>)?\s*\(", names)).expect("valid regex")
});

static HOOK_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^use[A-Z]").expect("valid regex"));

/// Whether a name follows the `useXxx` hook convention
pub fn is_hook_name(name: &str) -> bool {
    HOOK_NAME.is_match(name)
}

/// Whether a hook name is one of the framework or well-known library hooks
pub fn is_builtin_hook(name: &str) -> bool {
    REACT_HOOKS.contains(&name) || LIBRARY_HOOKS.contains(&name) || VUE_COMPOSABLES.contains(&name)
}

/// `useXxx(` call sites in source order
pub fn hook_calls(content: &str) -> Vec<String> {
    HOOK_CALL
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Named import bindings that follow the hook convention
pub fn imported_hooks(imports: &[ImportRecord]) -> Vec<String> {
    imports
        .iter()
        .flat_map(|i| i.bindings.iter())
        .filter(|b| is_hook_name(b))
        .cloned()
        .collect()
}

/// Known React and library hooks mentioned anywhere in the source
pub fn known_hooks(content: &str) -> Vec<String> {
    REACT_HOOKS
        .iter()
        .chain(LIBRARY_HOOKS)
        .filter(|h| content.contains(*h))
        .map(|h| h.to_string())
        .collect()
}

/// Vue composables called in the source
pub fn vue_composables(content: &str) -> Vec<String> {
    VUE_COMPOSABLE_CALL
        .captures_iter(content)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// All hooks used by a file, deduplicated in discovery order.
///
/// Vue composables are only considered for Vue components or files that
/// import from `vue`.
pub fn extract_hooks(content: &str, imports: &[ImportRecord], is_vue: bool) -> Vec<String> {
    let mut hooks = Vec::new();
    for hook in hook_calls(content)
        .into_iter()
        .chain(imported_hooks(imports))
        .chain(known_hooks(content))
    {
        push_unique(&mut hooks, hook);
    }

    let imports_vue = imports.iter().any(|i| i.specifier == "vue");
    if is_vue || imports_vue {
        for composable in vue_composables(content) {
            push_unique(&mut hooks, composable);
        }
    }

    hooks
}
