//! OSLC client core
//!
//! Typed lifecycle resources (requirements, change requests, test
//! artifacts) mapped to and from RDF graphs.
//!
//! # Architecture
//!
//! - [`rdf`]: terms, an indexed triple set, the prefix manager and the wire
//!   codecs (Turtle, N-Triples, RDF/XML, JSON-LD)
//! - [`mapping`]: literal conversion, resource schemas and their registry,
//!   the graph builder (encode) and the graph reader (decode)
//! - [`resources`]: schema tables for the OSLC RM / CM / QM resources
//! - [`vocab`]: IRIs of the vocabularies involved
//!
//! ## Example Usage
//!
//! ```rust
//! use oslc::{decode_all, encode, MappingConfig, ResourceSet, Selection, Uri};
//! use oslc::rdf::{RdfFormat, RdfParser, RdfSerializer};
//! use oslc::resources::{Link, Requirement};
//!
//! let mut resources = ResourceSet::new();
//! let req = resources.insert(Requirement {
//!     about: Some(Uri::new("http://example.org/reqs/1")),
//!     title: Some("Req01".to_string()),
//!     validated_by: vec![Link::new("http://example.org/tests/1").with_label("smoke")],
//!     ..Requirement::default()
//! });
//!
//! let config = MappingConfig::default();
//! let graph = encode(&resources, &[req.id()], &Selection::All, None, &config).unwrap();
//! let turtle = RdfSerializer::serialize(&graph, RdfFormat::Turtle).unwrap();
//!
//! let parsed = RdfParser::parse(&turtle, RdfFormat::Turtle, None).unwrap();
//! let decoded = decode_all::<Requirement>(&parsed, &config).unwrap();
//! let requirement = decoded.first().unwrap();
//! assert_eq!(requirement.title.as_deref(), Some("Req01"));
//! assert_eq!(requirement.validated_by[0].label.as_deref(), Some("smoke"));
//! ```

pub mod config;
pub mod error;
pub mod mapping;
pub mod rdf;
pub mod resources;
pub mod vocab;

// Re-export commonly used types
pub use config::MappingConfig;
pub use error::{MappingError, MappingResult};
pub use mapping::{
    decode_all, decode_one, decode_page, descriptor, encode, Decoded, GraphBuilder, GraphReader, Handle, Page,
    PageInfo, Resource, ResourceSchema, ResourceSet, Selection, Uri, Value,
};
pub use rdf::{Graph, RdfFormat, RdfParser, RdfSerializer};
