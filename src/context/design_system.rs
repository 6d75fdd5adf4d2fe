//! Design-system summary: UI libraries, primitives and common elements.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scanner::{PackageManifest, ProjectFiles};
use crate::types::{Category, ComponentRecord};

/// Manifest dependency (or prefix ending in `/`) to library name
const UI_LIBRARIES: &[(&str, &str)] = &[
    ("@mui/", "Material UI"),
    ("@material-ui/", "Material UI"),
    ("antd", "Ant Design"),
    ("@chakra-ui/", "Chakra UI"),
    ("@radix-ui/", "Radix UI"),
    ("@headlessui/", "Headless UI"),
    ("@mantine/", "Mantine"),
    ("react-bootstrap", "React Bootstrap"),
    ("vuetify", "Vuetify"),
    ("element-plus", "Element Plus"),
];

/// shadcn/ui writes this file at the project root
const SHADCN_MARKER: &str = "components.json";
const SHADCN: &str = "shadcn/ui";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ElementUsage {
    pub name: String,
    /// Number of components using the element
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DesignSystemSummary {
    /// Component libraries in table order, no duplicates
    pub ui_libraries: Vec<String>,
    /// Names of ui-primitive components, ordered by path
    pub primitives: Vec<String>,
    /// Most used elements, by count then name
    pub common_elements: Vec<ElementUsage>,
}

pub fn ui_libraries(project: &dyn ProjectFiles, manifest: Option<&PackageManifest>) -> Vec<String> {
    let mut libraries: Vec<String> = Vec::new();
    if let Some(manifest) = manifest {
        for (dep, library) in UI_LIBRARIES {
            let present = if dep.ends_with('/') {
                manifest.has_dependency_prefix(dep)
            } else {
                manifest.has_dependency(dep)
            };
            if present && !libraries.iter().any(|l| l == library) {
                libraries.push(library.to_string());
            }
        }
    }
    if project.exists(SHADCN_MARKER) {
        libraries.push(SHADCN.to_string());
    }
    libraries
}

/// Element names by how many components use them; ties go alphabetically
pub fn common_elements(components: &[&ComponentRecord], top: usize) -> Vec<ElementUsage> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for element in components.iter().flat_map(|c| c.jsx_elements.iter()) {
        *counts.entry(element.as_str()).or_default() += 1;
    }

    let mut usage: Vec<ElementUsage> = counts
        .into_iter()
        .map(|(name, count)| ElementUsage {
            name: name.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps the alphabetical order within equal counts
    usage.sort_by(|a, b| b.count.cmp(&a.count));
    usage.truncate(top);
    usage
}

/// Design-system summary; `components` must be sorted by path
pub fn detect_design_system(
    components: &[&ComponentRecord],
    project: &dyn ProjectFiles,
    manifest: Option<&PackageManifest>,
    top_elements: usize,
) -> DesignSystemSummary {
    DesignSystemSummary {
        ui_libraries: ui_libraries(project, manifest),
        primitives: components
            .iter()
            .filter(|c| c.category == Category::UiPrimitive)
            .map(|c| c.name.clone())
            .collect(),
        common_elements: common_elements(components, top_elements),
    }
}
