//! RDF/XML via rio_xml

use super::{from_rio, parse_base, with_rio, ParseError, ParseResult, SerializeResult};
use crate::rdf::Graph;
use rio_api::formatter::TriplesFormatter;
use rio_api::parser::TriplesParser;
use rio_xml::{RdfXmlFormatter, RdfXmlParser};

/// Parse an RDF/XML document.
///
/// `rdf:li` elements come back as numbered `rdf:_N` membership triples.
pub(super) fn parse(input: &str, base: Option<&str>) -> ParseResult<Graph> {
    let base = parse_base(base)?;
    let mut parser = RdfXmlParser::new(input.as_bytes(), base);
    let mut graph = Graph::new();

    parser.parse_all(&mut |t| -> Result<(), ParseError> {
        graph.insert(from_rio(t)?);
        Ok(())
    })?;

    Ok(graph)
}

/// Serialize to RDF/XML
pub(super) fn serialize(graph: &Graph) -> SerializeResult<String> {
    let mut formatter = RdfXmlFormatter::new(Vec::new())?;
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
    use crate::vocab::rdf;

    const DOCUMENT: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dcterms="http://purl.org/dc/terms/"
         xmlns:ex="http://example.org/vocab#">
  <rdf:Description rdf:about="http://example.org/r1">
    <dcterms:title>Req01</dcterms:title>
    <ex:tags>
      <rdf:Bag>
        <rdf:li>a</rdf:li>
        <rdf:li>b</rdf:li>
      </rdf:Bag>
    </ex:tags>
  </rdf:Description>
</rdf:RDF>"#;

    #[test]
    fn test_parse_numbers_li() {
        let graph = parse(DOCUMENT, None).unwrap();
        let r1 = RdfSubject::from(NamedNode::new("http://example.org/r1").unwrap());

        let bag = graph
            .object(&r1, "http://example.org/vocab#tags")
            .and_then(|o| o.as_subject())
            .unwrap();
        assert!(graph.has_type(&bag, rdf::BAG));
        assert_eq!(graph.objects(&bag, "http://www.w3.org/1999/02/22-rdf-syntax-ns#_1").count(), 1);
        assert_eq!(graph.objects(&bag, "http://www.w3.org/1999/02/22-rdf-syntax-ns#_2").count(), 1);
    }

    #[test]
    fn test_roundtrip() {
        let graph = parse(DOCUMENT, None).unwrap();
        let output = serialize(&graph).unwrap();
        assert!(output.contains("http://example.org/r1"));

        let reparsed = parse(&output, None).unwrap();
        assert_eq!(reparsed.len(), graph.len());
    }
}
