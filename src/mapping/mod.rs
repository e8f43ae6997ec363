//! Resource ↔ graph mapping
//!
//! This module implements the bidirectional codec between typed resources
//! and RDF graphs:
//! - literal conversion for primitive values
//! - per-type schemas, validated once and cached in a registry
//! - the graph builder (resources → triples)
//! - the graph reader (triples → resources), safe on cyclic graphs
//!
//! # Example
//!
//! ```rust
//! use oslc::config::MappingConfig;
//! use oslc::mapping::{decode_all, encode, ResourceSet, Selection, Uri};
//! use oslc::resources::Requirement;
//!
//! let mut resources = ResourceSet::new();
//! let r1 = resources.insert(Requirement {
//!     about: Some(Uri::new("http://example.org/reqs/1")),
//!     title: Some("Req01".to_string()),
//!     implemented_by: vec![Uri::new("http://google.com")],
//!     ..Requirement::default()
//! });
//!
//! let config = MappingConfig::default();
//! let graph = encode(&resources, &[r1.id()], &Selection::All, None, &config).unwrap();
//! assert_eq!(graph.len(), 3);
//!
//! let decoded = decode_all::<Requirement>(&graph, &config).unwrap();
//! assert_eq!(decoded.first().unwrap().title.as_deref(), Some("Req01"));
//! ```

mod arena;
mod builder;
pub mod literal;
mod reader;
mod schema;
mod selection;
mod value;

pub use arena::{ErasedResource, Handle, ResourceId, ResourceSet};

pub use literal::{Primitive, PrimitiveKind, XmlLiteral};

pub use value::{
    all, all_reified, into_reified, opt, opt_reified, set_all, set_all_reified, set_opt,
    set_opt_reified, ExtendedProperties, ExtendedValue, FromValue, IntoValue, QName, Uri, Value,
};

pub use schema::{
    descriptor, Container, Getter, NestedCodec, Occurs, PrimaryKind, PropertyDescriptor, Registry,
    Reified, ReifiedCodec, Resource, ResourceSchema, Setter, TypeDescriptor, ValueKind,
};

pub use selection::Selection;

pub use builder::{encode, GraphBuilder, PageInfo};

pub use reader::{decode_all, decode_one, decode_page, Decoded, GraphReader, Page};
