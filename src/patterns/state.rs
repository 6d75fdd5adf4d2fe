//! State-management classification as an ordered rule list.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::types::ComponentRecord;

/// Workspace-level state-management style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StateManagement {
    #[default]
    Local,
    Context,
    Redux,
    Zustand,
    Jotai,
    Recoil,
    Mixed,
}

/// Evidence of a state-management approach in some component
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum StateSignal {
    Redux,
    Zustand,
    Context,
    Jotai,
    Recoil,
    Mobx,
    Pinia,
    Vuex,
    Reducer,
    LocalState,
}

impl StateSignal {
    /// Signals of a state-management library, as opposed to built-in local state
    pub fn is_library(self) -> bool {
        !matches!(self, Self::Reducer | Self::LocalState)
    }
}

fn library_count(signals: &SignalSet) -> usize {
    signals.iter().filter(|s| s.is_library()).count()
}

type SignalSet = BTreeSet<StateSignal>;

/// Ordered (predicate, result) rules; the first match wins
const RULES: &[(fn(&SignalSet) -> bool, StateManagement)] = &[
    (|s| s.contains(&StateSignal::Redux), StateManagement::Redux),
    (|s| s.contains(&StateSignal::Zustand), StateManagement::Zustand),
    (|s| s.contains(&StateSignal::Context), StateManagement::Context),
    (|s| s.contains(&StateSignal::Jotai), StateManagement::Jotai),
    (|s| s.contains(&StateSignal::Recoil), StateManagement::Recoil),
    (|s| library_count(s) > 1, StateManagement::Mixed),
];

fn imports_module(component: &ComponentRecord, modules: &[&str]) -> bool {
    component.imports.iter().any(|i| {
        modules
            .iter()
            .any(|m| i.specifier == *m || i.specifier.starts_with(&format!("{}/", m)))
    })
}

fn uses_hook(component: &ComponentRecord, hooks: &[&str]) -> bool {
    component.hooks.iter().any(|h| hooks.contains(&h.as_str()))
}

fn imports_binding(component: &ComponentRecord, binding: &str) -> bool {
    component
        .imports
        .iter()
        .any(|i| i.bindings.iter().any(|b| b == binding))
}

/// State signals present in one component
pub fn component_signals(component: &ComponentRecord) -> SignalSet {
    let mut signals = SignalSet::new();

    if imports_module(component, &["redux", "react-redux", "@reduxjs/toolkit"])
        || uses_hook(component, &["useSelector", "useDispatch"])
    {
        signals.insert(StateSignal::Redux);
    }
    if imports_module(component, &["zustand"]) {
        signals.insert(StateSignal::Zustand);
    }
    if uses_hook(component, &["useContext"]) || imports_binding(component, "createContext") {
        signals.insert(StateSignal::Context);
    }
    if imports_module(component, &["jotai"]) || uses_hook(component, &["useAtom"]) {
        signals.insert(StateSignal::Jotai);
    }
    if imports_module(component, &["recoil"])
        || uses_hook(component, &["useRecoilState", "useRecoilValue"])
    {
        signals.insert(StateSignal::Recoil);
    }
    if imports_module(component, &["mobx", "mobx-react", "mobx-react-lite"]) {
        signals.insert(StateSignal::Mobx);
    }
    if imports_module(component, &["pinia"]) || imports_binding(component, "defineStore") {
        signals.insert(StateSignal::Pinia);
    }
    if imports_module(component, &["vuex"]) {
        signals.insert(StateSignal::Vuex);
    }
    if uses_hook(component, &["useReducer"]) {
        signals.insert(StateSignal::Reducer);
    }
    if uses_hook(component, &["useState", "ref", "reactive"]) {
        signals.insert(StateSignal::LocalState);
    }

    signals
}

/// Union of signals over every component
pub fn collect_signals(components: &[&ComponentRecord]) -> SignalSet {
    components
        .iter()
        .flat_map(|c| component_signals(c))
        .collect()
}

/// Apply the rule list; local state is the default
pub fn classify_state(signals: &SignalSet) -> StateManagement {
    RULES
        .iter()
        .find(|(predicate, _)| predicate(signals))
        .map_or(StateManagement::Local, |(_, result)| *result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ImportRecord;

    fn with(imports: &[&str], hooks: &[&str]) -> ComponentRecord {
        let mut record = ComponentRecord::basic("src/X.tsx");
        record.imports = imports
            .iter()
            .map(|s| ImportRecord {
                specifier: s.to_string(),
                source: s.to_string(),
                bindings: Vec::new(),
                has_default: false,
                is_external: true,
            })
            .collect();
        record.hooks = hooks.iter().map(|h| h.to_string()).collect();
        record
    }

    fn classify(components: &[ComponentRecord]) -> StateManagement {
        let refs: Vec<&ComponentRecord> = components.iter().collect();
        classify_state(&collect_signals(&refs))
    }

    #[test]
    fn test_default_is_local() {
        assert_eq!(classify(&[]), StateManagement::Local);
        assert_eq!(classify(&[with(&[], &["useState"])]), StateManagement::Local);
    }

    #[test]
    fn test_priority_order() {
        let redux = with(&["react-redux"], &[]);
        let zustand = with(&["zustand"], &[]);
        let context = with(&[], &["useContext"]);
        let jotai = with(&["jotai"], &[]);
        let recoil = with(&[], &["useRecoilValue"]);

        assert_eq!(
            classify(&[recoil.clone(), jotai.clone(), context.clone(), zustand.clone(), redux]),
            StateManagement::Redux
        );
        assert_eq!(
            classify(&[recoil.clone(), jotai.clone(), context.clone(), zustand]),
            StateManagement::Zustand
        );
        assert_eq!(
            classify(&[recoil.clone(), jotai.clone(), context]),
            StateManagement::Context
        );
        assert_eq!(classify(&[recoil.clone(), jotai]), StateManagement::Jotai);
        assert_eq!(classify(&[recoil]), StateManagement::Recoil);
    }

    #[test]
    fn test_redux_hooks_and_toolkit_subpaths() {
        assert_eq!(classify(&[with(&[], &["useSelector"])]), StateManagement::Redux);
        assert_eq!(
            classify(&[with(&["@reduxjs/toolkit/query"], &[])]),
            StateManagement::Redux
        );
    }

    #[test]
    fn test_context_from_create_context_binding() {
        let mut record = with(&["react"], &[]);
        record.imports[0].bindings = vec!["createContext".to_string()];
        assert_eq!(classify(&[record]), StateManagement::Context);
    }

    #[test]
    fn test_builtin_state_hooks_stay_local() {
        let components = [with(&[], &["useState"]), with(&[], &["useReducer"])];
        let signals = collect_signals(&components.iter().collect::<Vec<_>>());
        assert_eq!(
            signals,
            SignalSet::from([StateSignal::Reducer, StateSignal::LocalState])
        );
        assert_eq!(classify_state(&signals), StateManagement::Local);

        let vue = [with(&[], &["ref", "reactive"])];
        assert_eq!(classify(&vue), StateManagement::Local);
    }

    #[test]
    fn test_single_unranked_library_is_local() {
        let components = [with(&["mobx"], &[]), with(&[], &["useReducer"])];
        assert_eq!(classify(&components), StateManagement::Local);
    }

    #[test]
    fn test_multiple_unranked_libraries_are_mixed() {
        let components = [with(&["pinia"], &[]), with(&["vuex"], &["useState"])];
        assert_eq!(classify(&components), StateManagement::Mixed);

        let components = [with(&["mobx-react"], &[]), with(&["pinia"], &[])];
        assert_eq!(classify(&components), StateManagement::Mixed);
    }
}
