//! Turtle and N-Triples via rio_turtle

use super::{from_rio, parse_base, with_rio, ParseError, ParseResult, SerializeResult};
use crate::rdf::Graph;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_turtle::{NTriplesFormatter, NTriplesParser, TurtleFormatter, TurtleParser};
use std::io::Write;

/// Parse a Turtle document
pub(super) fn parse_turtle(input: &str, base: Option<&str>) -> ParseResult<Graph> {
    let base = parse_base(base)?;
    let mut parser = TurtleParser::new(input.as_bytes(), base);
    let mut graph = Graph::new();

    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        graph.insert(from_rio(t)?);
        Ok(())
    })?;

    let mut declared: Vec<_> = parser.prefixes().iter().collect();
    declared.sort();
    let namespaces = graph.namespaces_mut();
    for (prefix, iri) in declared {
        namespaces.ensure_prefix(prefix, iri);
    }

    Ok(graph)
}

/// Parse an N-Triples document
pub(super) fn parse_ntriples(input: &str) -> ParseResult<Graph> {
    let mut parser = NTriplesParser::new(input.as_bytes());
    let mut graph = Graph::new();

    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        graph.insert(from_rio(t)?);
        Ok(())
    })?;

    Ok(graph)
}

/// Serialize to Turtle, declaring the graph's prefixes up front
pub(super) fn serialize_turtle(graph: &Graph) -> SerializeResult<String> {
    let mut output = Vec::new();
    for ns in graph.namespaces().prefixes() {
        writeln!(output, "@prefix {}: <{}> .", ns.prefix, ns.iri)?;
    }
    if !graph.namespaces().is_empty() {
        writeln!(output)?;
    }

    let mut formatter = TurtleFormatter::new(output);
    for triple in graph.iter() {
        with_rio(triple, |t| formatter.format(t))?;
    }
    let output = formatter.finish()?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Serialize to N-Triples
pub(super) fn serialize_ntriples(graph: &Graph) -> SerializeResult<String> {
    let mut formatter = NTriplesFormatter::new(Vec::new());
    for triple in graph.iter() {
        with_rio(triple, |t| formatter.format(t))?;
    }
    let output = formatter.finish()?;

    Ok(String::from_utf8_lossy(&output).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{NamedNode, RdfSubject};

    #[test]
    fn test_turtle_roundtrip() {
        let input = r#"
            @prefix dcterms: <http://purl.org/dc/terms/> .
            <http://example.org/a> dcterms:title "c" ;
                <http://example.org/n> "5"^^<http://www.w3.org/2001/XMLSchema#int> .
        "#;
        let mut graph = parse_turtle(input, None).unwrap();
        assert_eq!(graph.len(), 2);

        assert_eq!(graph.namespaces().prefix_for("http://purl.org/dc/terms/"), Some("dcterms"));
        let output = serialize_turtle(&graph).unwrap();
        assert!(output.starts_with("@prefix dcterms: <http://purl.org/dc/terms/> ."));

        let reparsed = parse_turtle(&output, None).unwrap();
        assert_eq!(reparsed, graph);
    }

    #[test]
    fn test_turtle_base_resolution() {
        let input = r#"<r1> <http://purl.org/dc/terms/title> "x" ."#;
        let graph = parse_turtle(input, Some("http://example.org/")).unwrap();

        let subject = RdfSubject::from(NamedNode::new("http://example.org/r1").unwrap());
        assert!(graph.has_subject(&subject));
    }

    #[test]
    fn test_turtle_syntax_error() {
        let result = parse_turtle("<http://example.org/a> <http://example.org/b> .", None);
        assert!(matches!(result, Err(ParseError::Turtle(_))));
    }

    #[test]
    fn test_ntriples_roundtrip() {
        let input = "<http://example.org/a> <http://example.org/b> _:x .\n\
                     _:x <http://example.org/c> \"hi\"@en .\n";
        let graph = parse_ntriples(input).unwrap();
        assert_eq!(graph.len(), 2);

        let output = serialize_ntriples(&graph).unwrap();
        let reparsed = parse_ntriples(&output).unwrap();
        assert_eq!(reparsed.len(), 2);
        assert!(output.contains("\"hi\"@en"));
    }
}
