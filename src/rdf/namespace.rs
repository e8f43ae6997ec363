//! RDF namespace and prefix management
//!
//! Keeps a prefix <-> namespace bijection for one graph. Prefixes are
//! allocated on both sides of the mapping: the builder ensures its reserved
//! prefixes without clobbering resource-declared ones, and the reader
//! synthesizes `j.N` prefixes for namespaces it has never seen.

use crate::vocab;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Prefix errors
#[derive(Error, Debug)]
pub enum PrefixError {
    /// Unknown prefix
    #[error("Unknown prefix: {0}")]
    UnknownPrefix(String),

    /// Not of the form `prefix:local`
    #[error("Invalid compact IRI: {0}")]
    InvalidIri(String),
}

pub type PrefixResult<T> = Result<T, PrefixError>;

/// Namespace (prefix → IRI mapping)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Prefix
    pub prefix: String,
    /// IRI
    pub iri: String,
}

impl Namespace {
    /// Create a new namespace
    pub fn new(prefix: impl Into<String>, iri: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            iri: iri.into(),
        }
    }
}

/// Prefix table for one graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceManager {
    /// Prefix → IRI
    prefixes: IndexMap<String, String>,
    /// IRI → prefix
    namespaces: IndexMap<String, String>,
    /// Next candidate for generated prefixes
    next_generated: usize,
}

impl NamespaceManager {
    /// Create an empty prefix table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a prefix table preloaded with the OSLC vocabularies
    pub fn with_defaults() -> Self {
        let mut mgr = Self::new();

        mgr.add_prefix(vocab::rdf::PREFIX, vocab::rdf::NS);
        mgr.add_prefix(vocab::rdfs::PREFIX, vocab::rdfs::NS);
        mgr.add_prefix("xsd", vocab::xsd::NS);
        mgr.add_prefix(vocab::dcterms::PREFIX, vocab::dcterms::NS);
        mgr.add_prefix(vocab::foaf::PREFIX, vocab::foaf::NS);
        mgr.add_prefix(vocab::oslc::PREFIX, vocab::oslc::NS);
        mgr.add_prefix(vocab::rm::PREFIX, vocab::rm::NS);
        mgr.add_prefix(vocab::cm::PREFIX, vocab::cm::NS);
        mgr.add_prefix(vocab::qm::PREFIX, vocab::qm::NS);

        mgr
    }

    /// Bind a prefix, replacing whatever either side was bound to
    pub fn add_prefix(&mut self, prefix: impl Into<String>, iri: impl Into<String>) {
        let prefix = prefix.into();
        let iri = iri.into();

        if let Some(old_iri) = self.prefixes.shift_remove(&prefix) {
            self.namespaces.shift_remove(&old_iri);
        }
        if let Some(old_prefix) = self.namespaces.shift_remove(&iri) {
            self.prefixes.shift_remove(&old_prefix);
        }

        self.prefixes.insert(prefix.clone(), iri.clone());
        self.namespaces.insert(iri, prefix);
    }

    /// Get IRI for a prefix
    pub fn get_iri(&self, prefix: &str) -> PrefixResult<&str> {
        self.prefixes
            .get(prefix)
            .map(|s| s.as_str())
            .ok_or_else(|| PrefixError::UnknownPrefix(prefix.to_string()))
    }

    /// Get the prefix bound to a namespace IRI
    pub fn prefix_for(&self, iri: &str) -> Option<&str> {
        self.namespaces.get(iri).map(|s| s.as_str())
    }

    /// Whether a prefix is bound
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    /// Make sure `iri` has a prefix, preferring `prefix`.
    ///
    /// Existing bindings win: if the namespace is already bound its prefix is
    /// returned unchanged; if `prefix` belongs to another namespace a numeric
    /// suffix is appended (`oslc1`, `oslc2`, ...).
    pub fn ensure_prefix(&mut self, prefix: &str, iri: &str) -> String {
        if let Some(existing) = self.prefix_for(iri) {
            return existing.to_string();
        }

        let mut candidate = prefix.to_string();
        let mut suffix = 1;
        while self.contains_prefix(&candidate) {
            candidate = format!("{}{}", prefix, suffix);
            suffix += 1;
        }

        self.add_prefix(candidate.clone(), iri);
        candidate
    }

    /// Bind `iri` to the next unused generated prefix (`{stem}0`, `{stem}1`, ...).
    ///
    /// The counter only moves forward for the lifetime of this table, so
    /// the same sequence of unknown namespaces always yields the same prefixes.
    pub fn generate_prefix(&mut self, iri: &str, stem: &str) -> String {
        if let Some(existing) = self.prefix_for(iri) {
            return existing.to_string();
        }

        let prefix = loop {
            let candidate = format!("{}{}", stem, self.next_generated);
            self.next_generated += 1;
            if !self.contains_prefix(&candidate) {
                break candidate;
            }
        };

        debug!("Generated prefix {} for {}", prefix, iri);
        self.add_prefix(prefix.clone(), iri);
        prefix
    }

    /// Expand a compact IRI (prefix:local) to full IRI
    pub fn expand(&self, compact_iri: &str) -> PrefixResult<String> {
        match compact_iri.split_once(':') {
            Some((prefix, local)) => {
                let iri = self.get_iri(prefix)?;
                Ok(format!("{}{}", iri, local))
            }
            None => Err(PrefixError::InvalidIri(compact_iri.to_string())),
        }
    }

    /// Compact an IRI using the longest matching namespace
    pub fn compact(&self, iri: &str) -> Option<String> {
        self.namespaces
            .iter()
            .filter(|(namespace_iri, _)| iri.starts_with(namespace_iri.as_str()))
            .max_by_key(|(namespace_iri, _)| namespace_iri.len())
            .map(|(namespace_iri, prefix)| format!("{}:{}", prefix, &iri[namespace_iri.len()..]))
    }

    /// Get all registered prefixes, in binding order
    pub fn prefixes(&self) -> Vec<Namespace> {
        self.prefixes
            .iter()
            .map(|(prefix, iri)| Namespace::new(prefix.clone(), iri.clone()))
            .collect()
    }

    /// Number of bound prefixes
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    /// Whether no prefix is bound
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }
}

/// Split an IRI into namespace and local name at the last `#` or `/`
pub fn split_iri(iri: &str) -> Option<(&str, &str)> {
    let pos = iri.rfind(['#', '/'])?;
    let (namespace, local) = iri.split_at(pos + 1);
    if local.is_empty() {
        None
    } else {
        Some((namespace, local))
    }
}
