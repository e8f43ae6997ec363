//! JSON-LD codec
//!
//! Serialization writes one flattened node object per subject under
//! `@graph`, with the graph's prefixes as a term-free `@context`. Parsing
//! accepts that shape plus embedded node objects, `@list` values and
//! native JSON scalars; it is not a full JSON-LD processor.

use super::{ParseError, ParseResult, SerializeResult};
use crate::rdf::{
    BlankNode, Graph, Literal, NamedNode, NamespaceManager, RdfObject, RdfPredicate, RdfSubject,
};
use crate::vocab::{rdf, xsd};
use indexmap::IndexMap;
use serde_json::{json, Map, Value};
use tracing::debug;

/// Serialize a graph to JSON-LD
pub(super) fn serialize(graph: &Graph) -> SerializeResult<String> {
    let namespaces = graph.namespaces();
    let mut nodes: IndexMap<String, Map<String, Value>> = IndexMap::new();

    for triple in graph.iter() {
        let id = subject_id(&triple.subject);
        let node = nodes.entry(id.clone()).or_insert_with(|| {
            let mut node = Map::new();
            node.insert("@id".to_string(), Value::String(id));
            node
        });

        if triple.predicate.as_str() == rdf::TYPE {
            if let RdfObject::NamedNode(n) = &triple.object {
                push(node, "@type", Value::String(compact(namespaces, n.as_str())));
                continue;
            }
        }

        let value = match &triple.object {
            RdfObject::NamedNode(n) => json!({ "@id": n.as_str() }),
            RdfObject::BlankNode(b) => json!({ "@id": format!("_:{}", b.as_str()) }),
            RdfObject::Literal(l) => match l.language() {
                Some(lang) => json!({ "@value": l.value(), "@language": lang }),
                None if l.is_plain() => json!({ "@value": l.value() }),
                None => json!({ "@value": l.value(), "@type": compact(namespaces, l.datatype()) }),
            },
        };
        push(node, &compact(namespaces, triple.predicate.as_str()), value);
    }

    let context: Map<String, Value> = namespaces
        .prefixes()
        .into_iter()
        .map(|ns| (ns.prefix, Value::String(ns.iri)))
        .collect();

    let document = json!({
        "@context": context,
        "@graph": nodes.into_values().map(Value::Object).collect::<Vec<_>>(),
    });

    Ok(serde_json::to_string_pretty(&document)?)
}

fn subject_id(subject: &RdfSubject) -> String {
    match subject {
        RdfSubject::NamedNode(n) => n.as_str().to_string(),
        RdfSubject::BlankNode(b) => format!("_:{}", b.as_str()),
    }
}

fn compact(namespaces: &NamespaceManager, iri: &str) -> String {
    namespaces.compact(iri).unwrap_or_else(|| iri.to_string())
}

fn push(node: &mut Map<String, Value>, key: &str, value: Value) {
    match node.get_mut(key) {
        Some(Value::Array(values)) => values.push(value),
        _ => {
            node.insert(key.to_string(), Value::Array(vec![value]));
        }
    }
}

/// Parse a JSON-LD document
pub(super) fn parse(input: &str) -> ParseResult<Graph> {
    let document: Value = serde_json::from_str(input)?;
    let mut parser = JsonLdReader {
        graph: Graph::new(),
        labels: IndexMap::new(),
    };

    let nodes = match &document {
        Value::Array(nodes) => nodes.iter().collect::<Vec<_>>(),
        Value::Object(object) => {
            if let Some(Value::Object(context)) = object.get("@context") {
                parser.read_context(context);
            }
            match object.get("@graph") {
                Some(Value::Array(nodes)) => nodes.iter().collect(),
                Some(_) => return Err(ParseError::Parse("@graph must be an array".to_string())),
                None => vec![&document],
            }
        }
        _ => return Err(ParseError::Parse("expected a JSON object or array".to_string())),
    };

    for node in nodes {
        match node {
            Value::Object(object) => {
                parser.read_node(object)?;
            }
            other => return Err(ParseError::Parse(format!("expected a node object, got {}", other))),
        }
    }

    Ok(parser.graph)
}

struct JsonLdReader {
    graph: Graph,
    /// Document blank node labels → graph blank nodes
    labels: IndexMap<String, BlankNode>,
}

impl JsonLdReader {
    fn read_context(&mut self, context: &Map<String, Value>) {
        for (prefix, iri) in context {
            match iri {
                Value::String(iri) => self.graph.namespaces_mut().add_prefix(prefix.clone(), iri.clone()),
                _ => debug!("Ignoring non-prefix @context entry {}", prefix),
            }
        }
    }

    fn expand(&self, term: &str) -> String {
        match term.split_once(':') {
            Some((prefix, local)) if !local.starts_with("//") => {
                match self.graph.namespaces().get_iri(prefix) {
                    Ok(ns) => format!("{}{}", ns, local),
                    Err(_) => term.to_string(),
                }
            }
            _ => term.to_string(),
        }
    }

    fn node_for(&mut self, id: Option<&Value>) -> ParseResult<RdfSubject> {
        match id {
            None => Ok(BlankNode::new().into()),
            Some(Value::String(id)) => match id.strip_prefix("_:") {
                Some(label) => Ok(self
                    .labels
                    .entry(label.to_string())
                    .or_insert_with(BlankNode::new)
                    .clone()
                    .into()),
                None => Ok(NamedNode::new(&self.expand(id))?.into()),
            },
            Some(other) => Err(ParseError::Parse(format!("@id must be a string, got {}", other))),
        }
    }

    fn read_node(&mut self, object: &Map<String, Value>) -> ParseResult<RdfSubject> {
        let subject = self.node_for(object.get("@id"))?;

        for (key, value) in object {
            match key.as_str() {
                "@id" | "@context" => {}
                "@type" => {
                    for ty in as_array(value) {
                        let ty = ty
                            .as_str()
                            .ok_or_else(|| ParseError::Parse("@type must be a string".to_string()))?;
                        let ty = NamedNode::new(&self.expand(ty))?;
                        self.graph.add(subject.clone(), NamedNode::new(rdf::TYPE)?, ty);
                    }
                }
                key if key.starts_with('@') => debug!("Ignoring JSON-LD keyword {}", key),
                key => {
                    let predicate = RdfPredicate::from(NamedNode::new(&self.expand(key))?);
                    for item in as_array(value) {
                        let object = self.read_value(item)?;
                        self.graph.add(subject.clone(), predicate.clone(), object);
                    }
                }
            }
        }

        Ok(subject)
    }

    fn read_value(&mut self, value: &Value) -> ParseResult<RdfObject> {
        match value {
            Value::String(s) => Ok(Literal::new_simple_literal(s.as_str()).into()),
            Value::Bool(b) => Ok(typed(&b.to_string(), xsd::BOOLEAN)?.into()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Ok(typed(&n.to_string(), xsd::INTEGER)?.into()),
            Value::Number(n) => Ok(typed(&n.to_string(), xsd::DOUBLE)?.into()),
            Value::Object(object) => {
                if let Some(literal) = object.get("@value") {
                    return self.read_literal(literal, object);
                }
                if let Some(items) = object.get("@list") {
                    return self.read_list(items);
                }
                Ok(self.read_node(object)?.to_object())
            }
            other => Err(ParseError::Parse(format!("unsupported JSON-LD value {}", other))),
        }
    }

    fn read_literal(&mut self, value: &Value, object: &Map<String, Value>) -> ParseResult<RdfObject> {
        let lexical = match value {
            Value::String(s) => s.clone(),
            Value::Bool(_) | Value::Number(_) => value.to_string(),
            other => return Err(ParseError::Parse(format!("unsupported @value {}", other))),
        };

        if let Some(Value::String(lang)) = object.get("@language") {
            return Ok(Literal::new_language_tagged_literal(lexical, lang.as_str())?.into());
        }
        match object.get("@type") {
            Some(Value::String(datatype)) => {
                let datatype = self.expand(datatype);
                Ok(typed(&lexical, &datatype)?.into())
            }
            _ => Ok(Literal::new_simple_literal(lexical).into()),
        }
    }

    fn read_list(&mut self, items: &Value) -> ParseResult<RdfObject> {
        let mut elements = Vec::new();
        for item in as_array(items) {
            elements.push(self.read_value(item)?);
        }

        let mut tail: RdfObject = NamedNode::new(rdf::NIL)?.into();
        for element in elements.into_iter().rev() {
            let cell = BlankNode::new();
            self.graph.add(cell.clone(), NamedNode::new(rdf::FIRST)?, element);
            self.graph.add(cell.clone(), NamedNode::new(rdf::REST)?, tail);
            tail = cell.into();
        }
        Ok(tail)
    }
}

fn as_array(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(values) => values.iter().collect(),
        single => vec![single],
    }
}

fn typed(lexical: &str, datatype: &str) -> ParseResult<Literal> {
    Ok(Literal::new_typed_literal(lexical, NamedNode::new(datatype)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::Triple;

    fn sample() -> Graph {
        let mut graph = Graph::new();
        graph.namespaces_mut().add_prefix("dcterms", "http://purl.org/dc/terms/");
        graph.namespaces_mut().add_prefix("oslc_rm", "http://open-services.net/ns/rm#");

        let r1 = NamedNode::new("http://example.org/r1").unwrap();
        graph.add(
            r1.clone(),
            NamedNode::new(rdf::TYPE).unwrap(),
            NamedNode::new("http://open-services.net/ns/rm#Requirement").unwrap(),
        );
        graph.add(
            r1.clone(),
            NamedNode::new("http://purl.org/dc/terms/title").unwrap(),
            Literal::new_simple_literal("Req01"),
        );
        graph.add(
            r1,
            NamedNode::new("http://example.org/count").unwrap(),
            typed("3", xsd::INT).unwrap(),
        );
        graph
    }

    #[test]
    fn test_jsonld_serialization() {
        let json = serialize(&sample()).unwrap();
        assert!(json.contains("\"@id\": \"http://example.org/r1\""));
        assert!(json.contains("oslc_rm:Requirement"));
        assert!(json.contains("dcterms:title"));
        assert!(json.contains("Req01"));
    }

    #[test]
    fn test_jsonld_roundtrip() {
        let graph = sample();
        let json = serialize(&graph).unwrap();
        let parsed = parse(&json).unwrap();
        assert_eq!(parsed, graph);
        assert_eq!(parsed.namespaces().get_iri("dcterms").unwrap(), "http://purl.org/dc/terms/");
    }

    #[test]
    fn test_parse_embedded_and_list() {
        let input = r#"{
            "@context": { "ex": "http://example.org/vocab#" },
            "@id": "http://example.org/a",
            "ex:owner": { "ex:name": "Alice" },
            "ex:steps": { "@list": ["one", "two"] },
            "ex:done": true
        }"#;
        let graph = parse(input).unwrap();
        let a = RdfSubject::from(NamedNode::new("http://example.org/a").unwrap());

        let owner = graph.object(&a, "http://example.org/vocab#owner").unwrap();
        assert!(owner.is_blank_node());

        let head = graph.object(&a, "http://example.org/vocab#steps").unwrap();
        let head = head.as_subject().unwrap();
        assert!(graph.object(&head, rdf::FIRST).is_some());

        let done = Triple::new(
            a,
            NamedNode::new("http://example.org/vocab#done").unwrap(),
            typed("true", xsd::BOOLEAN).unwrap(),
        );
        assert!(graph.contains(&done));
    }

    #[test]
    fn test_parse_rejects_scalar_document() {
        assert!(matches!(parse("42"), Err(ParseError::Parse(_))));
        assert!(matches!(parse("{"), Err(ParseError::Json(_))));
    }
}
