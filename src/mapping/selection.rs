//! Property selection
//!
//! A selection tree decides which properties the builder emits, and how
//! deep nested resources are expanded. It mirrors the query-string
//! projections servers accept (`oslc.properties=dcterms:title,oslc_cm:relatedChangeRequest{dcterms:title}`).

use indexmap::IndexMap;

/// Which properties to emit
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Selection {
    /// Every property, nested resources fully expanded
    #[default]
    All,

    /// Identity and `rdf:type` only
    Singleton,

    /// Explicit and wildcard projections
    Select {
        /// Predicate IRI → sub-selection for its values
        properties: IndexMap<String, Selection>,
        /// Every immediate property, nested resources shallow
        shallow_wildcard: bool,
        /// Nested-resource properties expanded with this sub-tree
        nested_wildcard: Option<Box<Selection>>,
    },
}

static SINGLETON: Selection = Selection::Singleton;

impl Selection {
    /// Explicit predicate projection
    pub fn only<I, S>(predicates: I) -> Self
    where
        I: IntoIterator<Item = (S, Selection)>,
        S: Into<String>,
    {
        Selection::Select {
            properties: predicates.into_iter().map(|(p, s)| (p.into(), s)).collect(),
            shallow_wildcard: false,
            nested_wildcard: None,
        }
    }

    /// `*`: every immediate property, nested resources as references
    pub fn wildcard() -> Self {
        Selection::Select {
            properties: IndexMap::new(),
            shallow_wildcard: true,
            nested_wildcard: None,
        }
    }

    /// `*{...}`: only nested-resource properties, expanded with `nested`
    pub fn nested_wildcard(nested: Selection) -> Self {
        Selection::Select {
            properties: IndexMap::new(),
            shallow_wildcard: false,
            nested_wildcard: Some(Box::new(nested)),
        }
    }

    /// Add a shallow wildcard to a projection
    pub fn with_wildcard(self) -> Self {
        match self {
            Selection::Select {
                properties,
                nested_wildcard,
                ..
            } => Selection::Select {
                properties,
                shallow_wildcard: true,
                nested_wildcard,
            },
            other => other,
        }
    }

    /// Add a nested wildcard to a projection
    pub fn with_nested_wildcard(self, nested: Selection) -> Self {
        match self {
            Selection::Select {
                properties,
                shallow_wildcard,
                ..
            } => Selection::Select {
                properties,
                shallow_wildcard,
                nested_wildcard: Some(Box::new(nested)),
            },
            other => other,
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, Selection::Singleton)
    }

    /// Sub-selection for `predicate`, or `None` when it is excluded.
    ///
    /// The flag is true when only nested-resource values of the predicate
    /// are selected.
    pub fn child(&self, predicate: &str) -> Option<(&Selection, bool)> {
        match self {
            Selection::All => Some((self, false)),
            Selection::Singleton => None,
            Selection::Select {
                properties,
                shallow_wildcard,
                nested_wildcard,
            } => {
                if let Some(selection) = properties.get(predicate) {
                    return Some((selection, false));
                }
                match (nested_wildcard, shallow_wildcard) {
                    (Some(nested), shallow) => Some((nested, !shallow)),
                    (None, true) => Some((&SINGLETON, false)),
                    (None, false) => None,
                }
            }
        }
    }
}
