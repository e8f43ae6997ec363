//! In-memory triple set
//!
//! The graph keeps triples in insertion order without duplicates, with two
//! indices for the lookups the mapping engine performs:
//! - subject → triples (walking a resource's properties)
//! - (predicate, object) → subjects (type scans, reification and membership)

use super::namespace::NamespaceManager;
use super::types::{NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;

/// RDF graph with its prefix table
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All triples (primary storage)
    triples: IndexSet<Triple>,

    /// Subject → positions in `triples`
    by_subject: FxHashMap<RdfSubject, Vec<usize>>,

    /// (Predicate, Object) → positions in `triples`
    by_predicate_object: FxHashMap<(RdfPredicate, RdfObject), Vec<usize>>,

    /// Prefix table used when the graph is serialized
    namespaces: NamespaceManager,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty graph with the given prefix table
    pub fn with_namespaces(namespaces: NamespaceManager) -> Self {
        Self {
            namespaces,
            ..Self::default()
        }
    }

    /// Insert a triple. Returns false if it was already present.
    pub fn insert(&mut self, triple: Triple) -> bool {
        if self.triples.contains(&triple) {
            return false;
        }

        let key = (triple.predicate.clone(), triple.object.clone());
        let subject = triple.subject.clone();
        let (position, _) = self.triples.insert_full(triple);

        self.by_subject.entry(subject).or_default().push(position);
        self.by_predicate_object.entry(key).or_default().push(position);
        true
    }

    /// Convenience insert from parts
    pub fn add(
        &mut self,
        subject: impl Into<RdfSubject>,
        predicate: impl Into<RdfPredicate>,
        object: impl Into<RdfObject>,
    ) -> bool {
        self.insert(Triple::new(subject, predicate, object))
    }

    /// Check whether a triple is present
    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.contains(triple)
    }

    /// Number of triples
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    /// Whether the graph has no triples
    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Iterate over all triples in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Triple> {
        self.triples.iter()
    }

    /// All triples with the given subject, in insertion order
    pub fn triples_with_subject<'a>(
        &'a self,
        subject: &RdfSubject,
    ) -> impl Iterator<Item = &'a Triple> + 'a {
        self.by_subject
            .get(subject)
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&i| self.triples.get_index(i))
    }

    /// Whether the node has any outgoing triple
    pub fn has_subject(&self, subject: &RdfSubject) -> bool {
        self.by_subject.contains_key(subject)
    }

    /// Objects of `(subject, predicate, ?)`
    pub fn objects<'a, 'p>(
        &'a self,
        subject: &RdfSubject,
        predicate: &'p str,
    ) -> impl Iterator<Item = &'a RdfObject> + 'p
    where
        'a: 'p,
    {
        self.triples_with_subject(subject)
            .filter(move |t| t.predicate.as_str() == predicate)
            .map(|t| &t.object)
    }

    /// First object of `(subject, predicate, ?)`
    pub fn object<'a>(&'a self, subject: &RdfSubject, predicate: &str) -> Option<&'a RdfObject> {
        self.triples_with_subject(subject)
            .find(|t| t.predicate.as_str() == predicate)
            .map(|t| &t.object)
    }

    /// Subjects of `(?, predicate, object)`, in insertion order
    pub fn subjects_with<'a>(
        &'a self,
        predicate: &RdfPredicate,
        object: &RdfObject,
    ) -> impl Iterator<Item = &'a RdfSubject> + 'a {
        self.by_predicate_object
            .get(&(predicate.clone(), object.clone()))
            .map(|positions| positions.as_slice())
            .unwrap_or(&[])
            .iter()
            .filter_map(move |&i| self.triples.get_index(i))
            .map(|t| &t.subject)
    }

    /// Subjects typed `type_iri`, in insertion order
    pub fn subjects_of_type<'a>(&'a self, type_iri: &str) -> impl Iterator<Item = &'a RdfSubject> + 'a {
        let predicate = RdfPredicate::from(NamedNode::new_unchecked(crate::vocab::rdf::TYPE));
        let object = RdfObject::NamedNode(NamedNode::new_unchecked(type_iri));
        self.subjects_with(&predicate, &object)
    }

    /// Whether `subject` carries `rdf:type type_iri`
    pub fn has_type(&self, subject: &RdfSubject, type_iri: &str) -> bool {
        self.objects(subject, crate::vocab::rdf::TYPE)
            .any(|o| o.is_iri(type_iri))
    }

    /// Prefix table
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    /// Mutable prefix table
    pub fn namespaces_mut(&mut self) -> &mut NamespaceManager {
        &mut self.namespaces
    }
}

impl Extend<Triple> for Graph {
    fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert(triple);
        }
    }
}

impl FromIterator<Triple> for Graph {
    fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

impl PartialEq for Graph {
    /// Same triple set, ignoring order and prefixes
    fn eq(&self, other: &Self) -> bool {
        self.triples == other.triples
    }
}
