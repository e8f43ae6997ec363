//! Resources through the wire codecs
//!
//! Encodes resources, serializes them in each supported syntax, parses the
//! text back and decodes it again.

use chrono::{TimeZone, Utc};
use oslc::mapping::{all, set_all, Container, PrimitiveKind, PropertyDescriptor, ResourceId, ValueKind, XmlLiteral};
use oslc::resources::{ChangeRequest, Link, Person, Requirement, TestResult};
use oslc::*;
use tempfile::TempDir;

const FORMATS: [RdfFormat; 4] = [RdfFormat::Turtle, RdfFormat::NTriples, RdfFormat::RdfXml, RdfFormat::JsonLd];

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn through<T: Resource>(resources: &ResourceSet, roots: &[ResourceId], format: RdfFormat) -> Decoded<T> {
    let config = MappingConfig::default();
    let graph = encode(resources, roots, &Selection::All, None, &config).unwrap();
    let text = RdfSerializer::serialize(&graph, format).unwrap();
    let parsed = RdfParser::parse(&text, format, None)
        .unwrap_or_else(|e| panic!("{:?} output did not parse back: {}\n{}", format, e, text));
    assert_eq!(parsed.len(), graph.len(), "{:?} lost triples", format);
    decode_all::<T>(&parsed, &config).unwrap()
}

fn sample_requirement() -> Requirement {
    Requirement {
        about: Some(Uri::new("http://example.org/reqs/1")),
        title: Some("Login within 2s".to_string()),
        description: Some(XmlLiteral::new("<p>Measured on <em>cold</em> start</p>")),
        identifier: Some("REQ-1".to_string()),
        created: Some(Utc.with_ymd_and_hms(2023, 11, 5, 9, 15, 0).unwrap()),
        creators: vec![Uri::new("http://example.org/users/alice")],
        validated_by: vec![Link::new("http://example.org/tests/1").with_label("Cold start")],
        implemented_by: vec![Uri::new("http://example.org/crs/5")],
        ..Requirement::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Checklist {
    about: Option<Uri>,
    items: Vec<String>,
}

impl Resource for Checklist {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new("http://example.org/check#", "Checklist")
            .identity(|c| c.about.as_ref(), |c, uri| c.about = Some(uri))
            .property(
                PropertyDescriptor::<Self>::multi(
                    "http://example.org/check#items",
                    "items",
                    ValueKind::Literal(PrimitiveKind::String),
                )
                .with_container(Container::Seq)
                .accessors(|c| all(&c.items), |c, v| set_all(&mut c.items, v)),
            )
    }
}

#[test]
fn test_requirement_through_every_format() {
    init_tracing();
    let original = sample_requirement();
    let mut resources = ResourceSet::new();
    let handle = resources.insert(original.clone());

    for format in FORMATS {
        let decoded = through::<Requirement>(&resources, &[handle.id()], format);
        assert_eq!(decoded.first(), Some(&original), "{:?}", format);
    }
}

#[test]
fn test_nested_people_through_every_format() {
    init_tracing();
    let mut resources = ResourceSet::new();
    let alice = resources.insert(Person {
        about: Some(Uri::new("http://example.org/people/alice")),
        name: Some("Alice".to_string()),
        ..Person::default()
    });
    let anonymous = resources.insert(Person {
        nick: Some("anon".to_string()),
        knows: vec![alice],
        ..Person::default()
    });
    let cr = resources.insert(ChangeRequest {
        about: Some(Uri::new("http://example.org/crs/9")),
        title: Some("Crash on logout".to_string()),
        closed: Some(false),
        fixed: Some(true),
        contributors: vec![alice, anonymous],
        ..ChangeRequest::default()
    });

    for format in FORMATS {
        let decoded = through::<ChangeRequest>(&resources, &[cr.id()], format);
        let change = decoded.first().unwrap();
        assert_eq!(change.closed, Some(false), "{:?}", format);
        assert_eq!(change.fixed, Some(true), "{:?}", format);
        assert_eq!(change.contributors.len(), 2, "{:?}", format);

        let people: Vec<&Person> = change
            .contributors
            .iter()
            .filter_map(|h| decoded.resources.get(*h))
            .collect();
        let named = people.iter().find(|p| p.about.is_some()).unwrap();
        let blank = people.iter().find(|p| p.about.is_none()).unwrap();
        assert_eq!(named.name.as_deref(), Some("Alice"));
        assert_eq!(blank.nick.as_deref(), Some("anon"));
        assert_eq!(blank.knows.len(), 1);
        assert_eq!(decoded.resources.get(blank.knows[0]), Some(*named));
    }
}

#[test]
fn test_single_reified_through_turtle() {
    init_tracing();
    let original = TestResult {
        about: Some(Uri::new("http://example.org/results/3")),
        status: Some("passed".to_string()),
        reports_on_test_case: Some(Link::new("http://example.org/tests/1").with_label("Cold start")),
        ..TestResult::default()
    };
    let mut resources = ResourceSet::new();
    let handle = resources.insert(original.clone());

    let decoded = through::<TestResult>(&resources, &[handle.id()], RdfFormat::Turtle);
    assert_eq!(decoded.first(), Some(&original));
}

#[test]
fn test_container_members_through_rdfxml() {
    init_tracing();
    let original = Checklist {
        about: Some(Uri::new("http://example.org/checklists/1")),
        items: vec!["unpack".to_string(), "plug in".to_string(), "power on".to_string()],
    };
    let mut resources = ResourceSet::new();
    let handle = resources.insert(original.clone());

    let config = MappingConfig::default();
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();
    let xml = RdfSerializer::serialize(&graph, RdfFormat::RdfXml).unwrap();

    // rdf:li members come back numbered
    let parsed = RdfParser::parse(&xml, RdfFormat::RdfXml, None).unwrap();
    let numbered = parsed
        .iter()
        .filter(|t| t.predicate.as_str().starts_with("http://www.w3.org/1999/02/22-rdf-syntax-ns#_"))
        .count();
    assert_eq!(numbered, 3);

    let decoded = decode_all::<Checklist>(&parsed, &config).unwrap();
    assert_eq!(decoded.first(), Some(&original));
}

#[test]
fn test_turtle_declares_mapping_prefixes() {
    init_tracing();
    let mut resources = ResourceSet::new();
    let handle = resources.insert(sample_requirement());

    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &MappingConfig::default()).unwrap();
    let turtle = RdfSerializer::serialize(&graph, RdfFormat::Turtle).unwrap();

    assert!(turtle.contains("@prefix oslc_rm: <http://open-services.net/ns/rm#> ."));
    assert!(turtle.contains("@prefix dcterms: <http://purl.org/dc/terms/> ."));
    assert!(turtle.contains("@prefix rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#> ."));
}

#[test]
fn test_file_round_trip() {
    init_tracing();
    let dir = TempDir::new().unwrap();
    let original = sample_requirement();
    let mut resources = ResourceSet::new();
    let handle = resources.insert(original.clone());
    let config = MappingConfig::default();
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();

    for name in ["req.ttl", "req.nt", "req.rdf", "req.jsonld"] {
        let path = dir.path().join(name);
        RdfSerializer::serialize_file(&graph, &path).unwrap();

        let parsed = RdfParser::parse_file(&path, None).unwrap();
        let decoded = decode_all::<Requirement>(&parsed, &config).unwrap();
        assert_eq!(decoded.first(), Some(&original), "{}", name);
    }

    let unknown = dir.path().join("req.bin");
    assert!(RdfSerializer::serialize_file(&graph, &unknown).is_err());
}

#[test]
fn test_relative_references_resolve_against_base() {
    init_tracing();
    let turtle = r#"
        @prefix dcterms: <http://purl.org/dc/terms/> .
        @prefix oslc_rm: <http://open-services.net/ns/rm#> .

        <reqs/1> a oslc_rm:Requirement ;
            dcterms:title "Req01" ;
            oslc_rm:implementedBy <crs/5> .
    "#;
    let graph = RdfParser::parse(turtle, RdfFormat::Turtle, Some("http://example.org/")).unwrap();

    let decoded = decode_all::<Requirement>(&graph, &MappingConfig::default()).unwrap();
    let requirement = decoded.first().unwrap();
    assert_eq!(requirement.about, Some(Uri::new("http://example.org/reqs/1")));
    assert_eq!(requirement.implemented_by, vec![Uri::new("http://example.org/crs/5")]);
}

#[test]
fn test_media_type_negotiation() {
    assert_eq!(
        RdfFormat::from_media_type("application/rdf+xml; charset=utf-8"),
        Some(RdfFormat::RdfXml)
    );
    assert_eq!(RdfFormat::from_media_type("text/turtle"), Some(RdfFormat::Turtle));
    assert_eq!(RdfFormat::from_media_type("application/ld+json"), Some(RdfFormat::JsonLd));
    assert_eq!(RdfFormat::from_media_type("text/html"), None);
}
