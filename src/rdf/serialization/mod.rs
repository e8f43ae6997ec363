//! RDF wire formats
//!
//! Supports:
//! - Turtle (TTL)
//! - N-Triples (NT)
//! - RDF/XML
//! - JSON-LD (flattened node objects with a prefix `@context`)
//!
//! The mapping engine only ever sees a [`Graph`]; these codecs run before
//! decode and after encode.

mod jsonld;
mod rdfxml;
mod turtle;

use super::types::{BlankNode, Literal, NamedNode, RdfError, RdfObject, RdfSubject, Triple};
use super::Graph;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// RDF serialization format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfFormat {
    /// Turtle format (.ttl)
    Turtle,
    /// N-Triples format (.nt)
    NTriples,
    /// RDF/XML format (.rdf)
    RdfXml,
    /// JSON-LD format (.jsonld)
    JsonLd,
}

impl RdfFormat {
    /// Pick a codec for a media type; parameters such as `charset` are ignored
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let parsed: mime::Mime = media_type.trim().parse().ok()?;
        // subtype() drops structured suffixes such as `+xml`
        match parsed.essence_str().to_ascii_lowercase().as_str() {
            "text/turtle" | "application/x-turtle" => Some(RdfFormat::Turtle),
            "application/n-triples" | "text/plain" => Some(RdfFormat::NTriples),
            "application/rdf+xml" | "application/xml" => Some(RdfFormat::RdfXml),
            "application/ld+json" | "application/json" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }

    /// Canonical media type
    pub fn media_type(&self) -> &'static str {
        match self {
            RdfFormat::Turtle => "text/turtle",
            RdfFormat::NTriples => "application/n-triples",
            RdfFormat::RdfXml => "application/rdf+xml",
            RdfFormat::JsonLd => "application/ld+json",
        }
    }

    /// Guess the format from a file extension
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ttl" => Some(RdfFormat::Turtle),
            "nt" => Some(RdfFormat::NTriples),
            "rdf" | "xml" | "owl" => Some(RdfFormat::RdfXml),
            "jsonld" | "json" => Some(RdfFormat::JsonLd),
            _ => None,
        }
    }
}

/// Parse errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Turtle / N-Triples syntax error
    #[error("Turtle parse error: {0}")]
    Turtle(#[from] rio_turtle::TurtleError),

    /// RDF/XML syntax error
    #[error("RDF/XML parse error: {0}")]
    RdfXml(#[from] rio_xml::RdfXmlError),

    /// JSON syntax error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid RDF term
    #[error(transparent)]
    Rdf(#[from] RdfError),

    /// Structurally invalid document
    #[error("Parse error: {0}")]
    Parse(String),

    /// Base IRI is not absolute
    #[error("Invalid base IRI: {0}")]
    InvalidBase(String),

    /// No codec for the file or media type
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Serialization errors
#[derive(Error, Debug)]
pub enum SerializeError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// No codec for the file or media type
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

pub type SerializeResult<T> = Result<T, SerializeError>;

/// RDF parser
pub struct RdfParser;

impl RdfParser {
    /// Parse RDF data from a string. `base` resolves relative IRIs.
    pub fn parse(input: &str, format: RdfFormat, base: Option<&str>) -> ParseResult<Graph> {
        match format {
            RdfFormat::Turtle => turtle::parse_turtle(input, base),
            RdfFormat::NTriples => turtle::parse_ntriples(input),
            RdfFormat::RdfXml => rdfxml::parse(input, base),
            RdfFormat::JsonLd => jsonld::parse(input),
        }
    }

    /// Parse RDF data from a file, picking the format from its extension
    pub fn parse_file(path: &Path, base: Option<&str>) -> ParseResult<Graph> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(RdfFormat::from_extension)
            .ok_or_else(|| ParseError::UnsupportedFormat(path.display().to_string()))?;
        let input = fs::read_to_string(path)?;
        Self::parse(&input, format, base)
    }
}

/// RDF serializer
pub struct RdfSerializer;

impl RdfSerializer {
    /// Serialize a graph to a string
    pub fn serialize(graph: &Graph, format: RdfFormat) -> SerializeResult<String> {
        match format {
            RdfFormat::Turtle => turtle::serialize_turtle(graph),
            RdfFormat::NTriples => turtle::serialize_ntriples(graph),
            RdfFormat::RdfXml => rdfxml::serialize(graph),
            RdfFormat::JsonLd => jsonld::serialize(graph),
        }
    }

    /// Serialize a graph to a file, picking the format from its extension
    pub fn serialize_file(graph: &Graph, path: &Path) -> SerializeResult<()> {
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(RdfFormat::from_extension)
            .ok_or_else(|| SerializeError::UnsupportedFormat(path.display().to_string()))?;
        let output = Self::serialize(graph, format)?;
        fs::write(path, output)?;
        Ok(())
    }
}

fn parse_base(base: Option<&str>) -> ParseResult<Option<oxiri::Iri<String>>> {
    base.map(|b| oxiri::Iri::parse(b.to_string()).map_err(|e| ParseError::InvalidBase(format!("{}: {}", b, e))))
        .transpose()
}

/// Convert a triple borrowed from a rio parser
fn from_rio(triple: rio_api::model::Triple<'_>) -> ParseResult<Triple> {
    use rio_api::model::{Subject, Term};

    let subject = match triple.subject {
        Subject::NamedNode(n) => RdfSubject::NamedNode(NamedNode::new(n.iri)?),
        Subject::BlankNode(b) => RdfSubject::BlankNode(BlankNode::from_id(b.id)?),
        #[allow(unreachable_patterns)]
        _ => return Err(ParseError::Parse("RDF-star subjects are not supported".to_string())),
    };

    let predicate = NamedNode::new(triple.predicate.iri)?;

    let object = match triple.object {
        Term::NamedNode(n) => RdfObject::NamedNode(NamedNode::new(n.iri)?),
        Term::BlankNode(b) => RdfObject::BlankNode(BlankNode::from_id(b.id)?),
        Term::Literal(rio_api::model::Literal::Simple { value }) => {
            RdfObject::Literal(Literal::new_simple_literal(value))
        }
        Term::Literal(rio_api::model::Literal::LanguageTaggedString { value, language }) => {
            RdfObject::Literal(Literal::new_language_tagged_literal(value, language)?)
        }
        Term::Literal(rio_api::model::Literal::Typed { value, datatype }) => {
            RdfObject::Literal(Literal::new_typed_literal(value, NamedNode::new(datatype.iri)?))
        }
        #[allow(unreachable_patterns)]
        _ => return Err(ParseError::Parse("RDF-star objects are not supported".to_string())),
    };

    Ok(Triple::new(subject, predicate, object))
}

/// Lend a rio view of `triple` to `write`
fn with_rio<R>(
    triple: &Triple,
    write: impl FnOnce(&rio_api::model::Triple<'_>) -> R,
) -> R {
    use rio_api::model;

    let subject = match &triple.subject {
        RdfSubject::NamedNode(n) => model::Subject::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfSubject::BlankNode(b) => model::Subject::BlankNode(model::BlankNode { id: b.as_str() }),
    };

    let object = match &triple.object {
        RdfObject::NamedNode(n) => model::Term::NamedNode(model::NamedNode { iri: n.as_str() }),
        RdfObject::BlankNode(b) => model::Term::BlankNode(model::BlankNode { id: b.as_str() }),
        RdfObject::Literal(l) => model::Term::Literal(match l.language() {
            Some(language) => model::Literal::LanguageTaggedString {
                value: l.value(),
                language,
            },
            None if l.is_plain() => model::Literal::Simple { value: l.value() },
            None => model::Literal::Typed {
                value: l.value(),
                datatype: model::NamedNode { iri: l.datatype() },
            },
        }),
    };

    write(&model::Triple {
        subject,
        predicate: model::NamedNode {
            iri: triple.predicate.as_str(),
        },
        object,
    })
}
