//! RDF layer
//!
//! The data the mapping engine produces and consumes:
//! - RDF terms and triples (wrappers over oxrdf)
//! - an indexed, insertion-ordered triple set with its prefix table
//! - the prefix manager
//! - wire codecs (Turtle, N-Triples, RDF/XML, JSON-LD)
//!
//! # Example
//!
//! ```rust
//! use oslc::rdf::{Graph, Literal, NamedNode, RdfFormat, RdfSerializer};
//!
//! let mut graph = Graph::new();
//! let subject = NamedNode::new("http://example.org/r1").unwrap();
//! let title = NamedNode::new("http://purl.org/dc/terms/title").unwrap();
//! graph.add(subject, title, Literal::new_simple_literal("Req01"));
//!
//! let ntriples = RdfSerializer::serialize(&graph, RdfFormat::NTriples).unwrap();
//! assert!(ntriples.contains("Req01"));
//! ```

mod graph;
mod namespace;
mod serialization;
mod types;

pub use types::{
    is_absolute_iri, BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfPredicate, RdfResult,
    RdfSubject, Triple,
};

pub use graph::Graph;

pub use namespace::{split_iri, Namespace, NamespaceManager, PrefixError, PrefixResult};

pub use serialization::{
    ParseError, ParseResult, RdfFormat, RdfParser, RdfSerializer, SerializeError,
    SerializeResult,
};
