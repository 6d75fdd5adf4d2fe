//! Naming-convention detection by majority vote.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::ComponentRecord;

/// Identifier casing styles, in tie-break order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Casing {
    PascalCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "kebab-case")]
    KebabCase,
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,
}

impl Casing {
    pub const ALL: [Casing; 5] = [
        Self::PascalCase,
        Self::CamelCase,
        Self::KebabCase,
        Self::SnakeCase,
        Self::ScreamingSnakeCase,
    ];

    fn ordinal(self) -> usize {
        Self::ALL.iter().position(|c| *c == self).unwrap_or(0)
    }
}

/// Majority casing for each kind of name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NamingConventions {
    pub components: Casing,
    pub files: Casing,
    pub props: Casing,
    pub constants: Casing,
}

impl Default for NamingConventions {
    fn default() -> Self {
        Self {
            components: Casing::PascalCase,
            files: Casing::PascalCase,
            props: Casing::CamelCase,
            constants: Casing::ScreamingSnakeCase,
        }
    }
}

/// Classify the casing of a single identifier, `None` when it fits no style
pub fn classify_casing(name: &str) -> Option<Casing> {
    let first = name.chars().next()?;
    let has_dash = name.contains('-');
    let has_underscore = name.contains('_');

    if has_dash && has_underscore {
        return None;
    }

    if has_dash {
        let kebab = name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        return kebab.then_some(Casing::KebabCase);
    }

    let alnum_or_underscore = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !alnum_or_underscore {
        return None;
    }

    let has_lower = name.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = name.chars().any(|c| c.is_ascii_uppercase());

    if has_underscore {
        return if !has_lower && has_upper {
            Some(Casing::ScreamingSnakeCase)
        } else if !has_upper && has_lower {
            Some(Casing::SnakeCase)
        } else {
            None
        };
    }

    if first.is_ascii_uppercase() {
        if !has_lower && name.chars().count() > 1 {
            Some(Casing::ScreamingSnakeCase)
        } else {
            Some(Casing::PascalCase)
        }
    } else if first.is_ascii_lowercase() {
        Some(Casing::CamelCase)
    } else {
        None
    }
}

/// Most frequent casing among `names`; ties resolve in [`Casing::ALL`] order
pub fn majority_casing<'a>(names: impl IntoIterator<Item = &'a str>, default: Casing) -> Casing {
    let mut counts = [0usize; 5];
    for casing in names.into_iter().filter_map(classify_casing) {
        counts[casing.ordinal()] += 1;
    }

    let best = counts
        .iter()
        .enumerate()
        .fold(None::<(usize, usize)>, |best, (i, &count)| match best {
            Some((_, top)) if top >= count => best,
            _ if count > 0 => Some((i, count)),
            _ => best,
        });

    best.map_or(default, |(i, _)| Casing::ALL[i])
}

/// File stem used for file-name conventions; `index` files carry no signal
fn file_stem(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next()?;
    let stem = file.split('.').next()?;
    (!stem.is_empty() && stem != "index").then_some(stem)
}

/// Detect naming conventions across the component set
pub fn detect_naming(components: &[&ComponentRecord]) -> NamingConventions {
    let defaults = NamingConventions::default();
    NamingConventions {
        components: majority_casing(
            components.iter().map(|c| c.name.as_str()),
            defaults.components,
        ),
        files: majority_casing(
            components.iter().filter_map(|c| file_stem(&c.path)),
            defaults.files,
        ),
        props: majority_casing(
            components
                .iter()
                .flat_map(|c| c.props.iter().map(String::as_str)),
            defaults.props,
        ),
        constants: majority_casing(
            components
                .iter()
                .flat_map(|c| c.constants.iter().map(String::as_str)),
            defaults.constants,
        ),
    }
}
