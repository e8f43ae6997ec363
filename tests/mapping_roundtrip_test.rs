//! Encode/decode round trips through the mapping engine
//!
//! Covers the behaviors a client relies on when it writes resources to a
//! server and reads them back: value preservation, shared and cyclic
//! references, container ordering, reified statements, unmapped
//! predicates and paged collections.

use chrono::{TimeZone, Utc};
use oslc::mapping::{
    all, opt_reified, set_all, set_opt_reified, Container, ExtendedValue, Primitive, PrimitiveKind,
    PropertyDescriptor, Reified, ValueKind, XmlLiteral,
};
use oslc::rdf::{BlankNode, Literal, NamedNode, RdfObject, RdfPredicate, RdfSubject, Triple};
use oslc::resources::{AnyResource, ChangeRequest, Link, Person, Requirement};
use oslc::vocab::{dcterms, foaf, rdf, rm};
use oslc::*;

const PLAN_NS: &str = "http://example.org/plan#";

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn named(iri: &str) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

fn plan_iri(local: &str) -> String {
    format!("{}{}", PLAN_NS, local)
}

/// Estimate with a note attached to the statement that asserts it
#[derive(Debug, Clone, Default, PartialEq)]
struct Estimate {
    days: Option<i32>,
    note: Option<String>,
}

impl Resource for Estimate {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::untyped().single(
            "http://example.org/plan#note",
            "note",
            ValueKind::Literal(PrimitiveKind::String),
            |e| oslc::mapping::opt(&e.note),
            |e, v| oslc::mapping::set_opt(&mut e.note, v),
        )
    }
}

impl Reified for Estimate {
    fn primary_kind() -> oslc::mapping::PrimaryKind {
        oslc::mapping::PrimaryKind::Literal(PrimitiveKind::Int)
    }

    fn value(&self) -> Option<Value> {
        self.days.map(|d| Value::Literal(Primitive::Int(d)))
    }

    fn set_value(&mut self, value: Value) -> MappingResult<()> {
        self.days = Some(oslc::mapping::FromValue::from_value(value)?);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Plan {
    about: Option<Uri>,
    steps: Vec<String>,
    tags: Vec<String>,
    estimate: Option<Estimate>,
}

impl Resource for Plan {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(PLAN_NS, "Plan")
            .prefix("plan", PLAN_NS)
            .identity(|p| p.about.as_ref(), |p, uri| p.about = Some(uri))
            .property(
                PropertyDescriptor::<Self>::multi(
                    "http://example.org/plan#steps",
                    "steps",
                    ValueKind::Literal(PrimitiveKind::String),
                )
                .with_container(Container::List)
                .accessors(|p| all(&p.steps), |p, v| set_all(&mut p.steps, v)),
            )
            .property(
                PropertyDescriptor::<Self>::multi(
                    "http://example.org/plan#tags",
                    "tags",
                    ValueKind::Literal(PrimitiveKind::String),
                )
                .with_container(Container::Bag)
                .accessors(|p| all(&p.tags), |p, v| set_all(&mut p.tags, v)),
            )
            .single(
                "http://example.org/plan#estimate",
                "estimate",
                ValueKind::reified::<Estimate>(),
                |p| opt_reified(&p.estimate),
                |p, v| set_opt_reified(&mut p.estimate, v),
            )
    }
}

fn plan_subject() -> RdfSubject {
    RdfSubject::NamedNode(named("http://example.org/plans/1"))
}

#[test]
fn test_requirement_example() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let r1 = resources.insert(Requirement {
        about: Some(Uri::new("http://ex/r1")),
        title: Some("Req01".to_string()),
        implemented_by: vec![Uri::new("http://google.com")],
        ..Requirement::default()
    });

    let graph = encode(&resources, &[r1.id()], &Selection::All, None, &config).unwrap();
    let subject = RdfSubject::NamedNode(named("http://ex/r1"));

    assert_eq!(graph.len(), 3);
    assert!(graph.contains(&Triple::new(
        subject.clone(),
        named(rdf::TYPE),
        named("http://open-services.net/ns/rm#Requirement"),
    )));
    assert!(graph.contains(&Triple::new(
        subject.clone(),
        named(dcterms::TITLE),
        Literal::new_simple_literal("Req01"),
    )));
    assert!(graph.contains(&Triple::new(subject, named(rm::IMPLEMENTED_BY), named("http://google.com"))));
    assert_eq!(graph.namespaces().get_iri("oslc_rm").ok(), Some(rm::NS));

    let decoded = decode_all::<Requirement>(&graph, &config).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded.first(), resources.get(r1));
}

#[test]
fn test_round_trip_preserves_values() {
    init_tracing();
    let config = MappingConfig::default();

    let original = Requirement {
        about: Some(Uri::new("http://ex/reqs/42")),
        types: vec![Uri::new("http://ex/vocab#SafetyRequirement")],
        title: Some("Brake response".to_string()),
        description: Some(XmlLiteral::new("<p>Stop within <b>2s</b></p>")),
        identifier: Some("42".to_string()),
        subjects: vec!["brakes".to_string(), "safety".to_string()],
        creators: vec![Uri::new("http://ex/users/alice")],
        created: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap()),
        modified: Some(Utc.with_ymd_and_hms(2024, 3, 2, 8, 0, 0).unwrap()),
        service_provider: Some(Uri::new("http://ex/sp")),
        validated_by: vec![
            Link::new("http://ex/tests/1").with_label("Bench test"),
            Link::new("http://ex/tests/2"),
        ],
        tracked_by: vec![Link::new("http://ex/crs/7").with_label("CR 7")],
        satisfied_by: vec![Uri::new("http://ex/designs/3")],
        ..Requirement::default()
    };

    let mut resources = ResourceSet::new();
    let handle = resources.insert(original.clone());
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();

    let decoded = decode_all::<Requirement>(&graph, &config).unwrap();
    let mut back = decoded.first().unwrap().clone();
    back.subjects.sort();
    assert_eq!(back, original);
}

#[test]
fn test_reified_literal_carries_note() {
    init_tracing();
    let config = MappingConfig::default();

    let plan = Plan {
        about: Some(Uri::new("http://example.org/plans/1")),
        estimate: Some(Estimate {
            days: Some(5),
            note: Some("m".to_string()),
        }),
        ..Plan::default()
    };

    let mut resources = ResourceSet::new();
    let handle = resources.insert(plan.clone());
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();

    // type, estimate, and the statement node: type, subject, predicate, object, note
    assert_eq!(graph.len(), 7);
    let statements: Vec<_> = graph.subjects_of_type(rdf::STATEMENT).cloned().collect();
    assert_eq!(statements.len(), 1);
    assert!(statements[0].is_blank_node());
    assert_eq!(
        graph.object(&statements[0], &plan_iri("note")),
        Some(&RdfObject::Literal(Literal::new_simple_literal("m")))
    );

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    assert_eq!(decoded.first(), Some(&plan));
}

#[test]
fn test_list_preserves_order() {
    init_tracing();
    let config = MappingConfig::default();

    let plan = Plan {
        about: Some(Uri::new("http://example.org/plans/1")),
        steps: vec!["design".to_string(), "build".to_string(), "verify".to_string(), "build".to_string()],
        ..Plan::default()
    };

    let mut resources = ResourceSet::new();
    let handle = resources.insert(plan.clone());
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();

    let head = graph.object(&plan_subject(), &plan_iri("steps")).unwrap();
    assert!(head.is_blank_node());
    assert_eq!(graph
            .subjects_with(&RdfPredicate::from(named(rdf::REST)), &RdfObject::NamedNode(named(rdf::NIL)))
            .count(), 1);

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    assert_eq!(decoded.first().unwrap().steps, plan.steps);
}

#[test]
fn test_bag_preserves_members() {
    init_tracing();
    let config = MappingConfig::default();

    let plan = Plan {
        about: Some(Uri::new("http://example.org/plans/1")),
        tags: vec!["urgent".to_string(), "backend".to_string(), "q3".to_string()],
        ..Plan::default()
    };

    let mut resources = ResourceSet::new();
    let handle = resources.insert(plan.clone());
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();

    let bag = graph.object(&plan_subject(), &plan_iri("tags")).unwrap().as_subject().unwrap();
    assert!(graph.has_type(&bag, rdf::BAG));

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    let mut tags = decoded.first().unwrap().tags.clone();
    tags.sort();
    assert_eq!(tags, vec!["backend", "q3", "urgent"]);
}

#[test]
fn test_list_takes_precedence_over_container_type() {
    init_tracing();
    let config = MappingConfig::default();

    let head = BlankNode::new();
    let mut graph = Graph::new();
    graph.add(plan_subject(), named(rdf::TYPE), named(&plan_iri("Plan")));
    graph.add(plan_subject(), named(&plan_iri("steps")), head.clone());
    graph.add(head.clone(), named(rdf::FIRST), Literal::new_simple_literal("only"));
    graph.add(head.clone(), named(rdf::REST), named(rdf::NIL));
    graph.add(head.clone(), named(rdf::TYPE), named(rdf::BAG));
    graph.add(head, named(rdf::LI), Literal::new_simple_literal("ignored"));

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    assert_eq!(decoded.first().unwrap().steps, vec!["only"]);
}

#[test]
fn test_numbered_container_members() {
    init_tracing();
    let config = MappingConfig::default();

    let bag = BlankNode::new();
    let mut graph = Graph::new();
    graph.add(plan_subject(), named(rdf::TYPE), named(&plan_iri("Plan")));
    graph.add(plan_subject(), named(&plan_iri("tags")), bag.clone());
    graph.add(bag.clone(), named(rdf::TYPE), named(rdf::SEQ));
    graph.add(bag.clone(), named(&format!("{}_2", rdf::NS)), Literal::new_simple_literal("second"));
    graph.add(bag.clone(), named(&format!("{}_1", rdf::NS)), Literal::new_simple_literal("first"));
    graph.add(bag, named(rdf::LI), Literal::new_simple_literal("unnumbered"));

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    assert_eq!(decoded.first().unwrap().tags, vec!["unnumbered", "first", "second"]);
}

#[test]
fn test_empty_list_is_nil() {
    init_tracing();
    let config = MappingConfig::default();

    let mut graph = Graph::new();
    graph.add(plan_subject(), named(rdf::TYPE), named(&plan_iri("Plan")));
    graph.add(plan_subject(), named(&plan_iri("steps")), named(rdf::NIL));

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    assert!(decoded.first().unwrap().steps.is_empty());
}

#[test]
fn test_cyclic_references_round_trip() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let alice = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/alice")),
        name: Some("Alice".to_string()),
        ..Person::default()
    });
    let bob = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/bob")),
        name: Some("Bob".to_string()),
        knows: vec![alice],
        ..Person::default()
    });
    resources.get_mut(alice).unwrap().knows.push(bob);

    let graph = encode(&resources, &[alice.id(), bob.id()], &Selection::All, None, &config).unwrap();
    // Each person: type, name, knows
    assert_eq!(graph.len(), 6);

    let decoded = decode_all::<Person>(&graph, &config).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.resources.len(), 2);

    let a = decoded.roots[0];
    let b = decoded.roots[1];
    assert_eq!(decoded.get(a).unwrap().name.as_deref(), Some("Alice"));
    assert_eq!(decoded.get(a).unwrap().knows, vec![b]);
    assert_eq!(decoded.get(b).unwrap().knows, vec![a]);
}

#[test]
fn test_shared_nested_resource_decodes_once() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let alice = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/alice")),
        name: Some("Alice".to_string()),
        ..Person::default()
    });
    let cr1 = resources.insert(ChangeRequest {
        about: Some(Uri::new("http://ex/crs/1")),
        contributors: vec![alice],
        ..ChangeRequest::default()
    });
    let cr2 = resources.insert(ChangeRequest {
        about: Some(Uri::new("http://ex/crs/2")),
        contributors: vec![alice],
        ..ChangeRequest::default()
    });

    let graph = encode(&resources, &[cr1.id(), cr2.id()], &Selection::All, None, &config).unwrap();
    let alice_node = RdfSubject::NamedNode(named("http://ex/people/alice"));
    assert_eq!(graph.triples_with_subject(&alice_node).count(), 2);

    let decoded = decode_all::<ChangeRequest>(&graph, &config).unwrap();
    assert_eq!(decoded.len(), 2);
    assert_eq!(decoded.resources.len(), 3);

    let first = decoded.get(decoded.roots[0]).unwrap();
    let second = decoded.get(decoded.roots[1]).unwrap();
    assert_eq!(first.contributors, second.contributors);

    let person = decoded.resources.get(first.contributors[0]).unwrap();
    assert_eq!(person.name.as_deref(), Some("Alice"));
}

#[test]
fn test_misused_occurs() {
    init_tracing();
    let turtle = r#"
        @prefix dcterms: <http://purl.org/dc/terms/> .
        @prefix oslc_rm: <http://open-services.net/ns/rm#> .

        <http://ex/r1> a oslc_rm:Requirement ;
            dcterms:title "A", "B" .
    "#;
    let graph = RdfParser::parse(turtle, RdfFormat::Turtle, None).unwrap();

    let err = decode_all::<Requirement>(&graph, &MappingConfig::default()).unwrap_err();
    assert!(matches!(err, MappingError::MisusedOccurs { ref member, .. } if member == "title"));
}

#[test]
fn test_relative_uris_are_rejected() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let relative_identity = resources.insert(Requirement {
        about: Some(Uri::new("r1")),
        ..Requirement::default()
    });
    let err = encode(&resources, &[relative_identity.id()], &Selection::All, None, &config).unwrap_err();
    assert!(matches!(err, MappingError::RelativeUri { ref uri, .. } if uri == "r1"));

    let relative_reference = resources.insert(Requirement {
        about: Some(Uri::new("http://ex/r2")),
        implemented_by: vec![Uri::new("impl/3")],
        ..Requirement::default()
    });
    let err = encode(&resources, &[relative_reference.id()], &Selection::All, None, &config).unwrap_err();
    assert!(matches!(err, MappingError::RelativeUri { ref member, .. } if member == "implementedBy"));

    let mut graph = Graph::new();
    graph.add(
        named("r1"),
        named(rdf::TYPE),
        named("http://open-services.net/ns/rm#Requirement"),
    );
    let err = decode_all::<Requirement>(&graph, &config).unwrap_err();
    assert!(matches!(err, MappingError::RelativeUri { .. }));
}

#[test]
fn test_unmapped_predicates_land_in_extended_bag() {
    init_tracing();
    let config = MappingConfig::default();
    let turtle = r#"
        @prefix dcterms: <http://purl.org/dc/terms/> .
        @prefix oslc_rm: <http://open-services.net/ns/rm#> .
        @prefix ex: <http://unknown.example/vocab#> .

        <http://ex/r1> a oslc_rm:Requirement ;
            dcterms:title "Req01" ;
            ex:priority 3 ;
            ex:tag "a", "b" ;
            ex:owner [ ex:name "Ops" ] ;
            ex:seeAlso <http://ex/other> .
    "#;
    let graph = RdfParser::parse(turtle, RdfFormat::Turtle, None).unwrap();

    let decoded = decode_all::<Requirement>(&graph, &config).unwrap();
    let requirement = decoded.first().unwrap();
    let ns = "http://unknown.example/vocab#";
    assert_eq!(requirement.title.as_deref(), Some("Req01"));
    assert_eq!(requirement.extended.len(), 4);

    let priority = requirement.extended.get_iri(&format!("{}priority", ns)).unwrap();
    assert_eq!(
        priority,
        &ExtendedValue::Single(Value::Literal(Primitive::BigInteger(3.into())))
    );

    let tags = requirement.extended.get_iri(&format!("{}tag", ns)).unwrap();
    assert_eq!(
        tags.values(),
        &[
            Value::Literal(Primitive::String("a".to_string())),
            Value::Literal(Primitive::String("b".to_string())),
        ]
    );

    let see_also = requirement.extended.get_iri(&format!("{}seeAlso", ns)).unwrap();
    assert_eq!(see_also, &ExtendedValue::Single(Value::Uri(Uri::new("http://ex/other"))));

    let owner = match requirement.extended.get_iri(&format!("{}owner", ns)).unwrap() {
        ExtendedValue::Single(Value::Resource(id)) => decoded.resources.downcast::<AnyResource>(*id).unwrap(),
        other => panic!("unexpected owner value {:?}", other),
    };
    assert_eq!(
        owner.extended.get_iri(&format!("{}name", ns)),
        Some(&ExtendedValue::Single(Value::Literal(Primitive::String("Ops".to_string()))))
    );

    // The document's own prefix is reused
    let key = requirement
        .extended
        .key(&oslc::mapping::QName::new(ns, "priority"))
        .unwrap();
    assert_eq!(key.prefix.as_deref(), Some("ex"));
    assert_eq!(decoded.namespaces.get_iri("ex").ok(), Some(ns));

    // Re-encoding reproduces every triple shape
    let roots = [decoded.roots[0].id()];
    let again = encode(&decoded.resources, &roots, &Selection::All, None, &config).unwrap();
    assert_eq!(again.len(), graph.len());
    assert!(again.contains(&Triple::new(
        named("http://ex/r1"),
        named(&format!("{}seeAlso", ns)),
        named("http://ex/other"),
    )));
    assert_eq!(again.namespaces().get_iri("ex").ok(), Some(ns));
}

#[test]
fn test_undeclared_namespace_gets_generated_prefix() {
    init_tracing();
    let turtle = r#"
        @prefix oslc_rm: <http://open-services.net/ns/rm#> .

        <http://ex/r1> a oslc_rm:Requirement ;
            <http://unknown.example/vocab#priority> 3 .
    "#;
    let graph = RdfParser::parse(turtle, RdfFormat::Turtle, None).unwrap();
    assert_eq!(
        graph.namespaces().prefix_for("http://open-services.net/ns/rm#"),
        Some("oslc_rm")
    );

    let decoded = decode_all::<Requirement>(&graph, &MappingConfig::default()).unwrap();
    let requirement = decoded.first().unwrap();
    let key = requirement
        .extended
        .key(&oslc::mapping::QName::new("http://unknown.example/vocab#", "priority"))
        .unwrap();
    assert_eq!(key.prefix.as_deref(), Some("j.0"));
    assert_eq!(decoded.namespaces.get_iri("j.0").ok(), Some("http://unknown.example/vocab#"));
}

#[test]
fn test_unmapped_predicates_strict_mode() {
    init_tracing();
    let mut graph = Graph::new();
    let statement = BlankNode::new();
    graph.add(named("http://ex/r1"), named(rm::VALIDATED_BY), named("http://ex/tc1"));
    graph.add(statement.clone(), named(rdf::TYPE), named(rdf::STATEMENT));
    graph.add(statement.clone(), named(rdf::SUBJECT), named("http://ex/r1"));
    graph.add(statement.clone(), named(rdf::PREDICATE), named(rm::VALIDATED_BY));
    graph.add(statement.clone(), named(rdf::OBJECT), named("http://ex/tc1"));
    graph.add(statement.clone(), named(dcterms::TITLE), Literal::new_simple_literal("smoke"));
    graph.add(statement, named(dcterms::IDENTIFIER), Literal::new_simple_literal("7"));
    graph.add(
        named("http://ex/r1"),
        named(rdf::TYPE),
        named("http://open-services.net/ns/rm#Requirement"),
    );

    // Link has no extended bag: the stray identifier is dropped by default
    let decoded = decode_all::<Requirement>(&graph, &MappingConfig::default()).unwrap();
    let link = &decoded.first().unwrap().validated_by[0];
    assert_eq!(link, &Link::new("http://ex/tc1").with_label("smoke"));

    let strict = MappingConfig::default().with_strict_unmapped(true);
    let err = decode_all::<Requirement>(&graph, &strict).unwrap_err();
    assert!(matches!(err, MappingError::UnsupportedValue { .. }));
}

#[test]
fn test_paged_collection_round_trip() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let roots: Vec<_> = (1..=2)
        .map(|i| {
            resources
                .insert(Requirement {
                    about: Some(Uri::new(format!("http://ex/reqs/{}", i))),
                    title: Some(format!("Req{:02}", i)),
                    ..Requirement::default()
                })
                .id()
        })
        .collect();

    let page = PageInfo::new("http://ex/reqs")
        .with_response_info("http://ex/reqs?oslc.pageSize=2")
        .with_next_page("http://ex/reqs?oslc.pageSize=2&page=2")
        .with_total_count(10);
    let graph = encode(&resources, &roots, &Selection::All, Some(&page), &config).unwrap();

    let turtle = RdfSerializer::serialize(&graph, RdfFormat::Turtle).unwrap();
    let parsed = RdfParser::parse(&turtle, RdfFormat::Turtle, None).unwrap();

    let page = decode_page::<Requirement>(&parsed, "http://ex/reqs", &config).unwrap();
    assert_eq!(page.total_count, Some(10));
    assert_eq!(page.next_page, Some(Uri::new("http://ex/reqs?oslc.pageSize=2&page=2")));

    let mut titles: Vec<_> = page.decoded.iter().filter_map(|r| r.title.clone()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Req01", "Req02"]);
}

#[test]
fn test_selection_limits_output() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let alice = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/alice")),
        name: Some("Alice".to_string()),
        nick: Some("al".to_string()),
        ..Person::default()
    });
    let cr = resources.insert(ChangeRequest {
        about: Some(Uri::new("http://ex/crs/1")),
        title: Some("Fix login".to_string()),
        contributors: vec![alice],
        ..ChangeRequest::default()
    });

    let cr_node = RdfSubject::NamedNode(named("http://ex/crs/1"));
    let alice_node = RdfSubject::NamedNode(named("http://ex/people/alice"));

    // Only nested-resource properties, expanded to the person's name
    let selection = Selection::nested_wildcard(Selection::only([(foaf::NAME, Selection::All)]));
    let graph = encode(&resources, &[cr.id()], &selection, None, &config).unwrap();
    assert!(graph.object(&cr_node, dcterms::TITLE).is_none());
    assert!(graph.object(&cr_node, dcterms::CONTRIBUTOR).is_some());
    assert!(graph.object(&alice_node, foaf::NAME).is_some());
    assert!(graph.object(&alice_node, foaf::NICK).is_none());

    // Shallow wildcard: nested resources appear as references only
    let graph = encode(&resources, &[cr.id()], &Selection::wildcard(), None, &config).unwrap();
    assert!(graph.object(&cr_node, dcterms::TITLE).is_some());
    assert!(graph.object(&alice_node, foaf::NAME).is_none());

    let graph = encode(&resources, &[cr.id()], &Selection::Singleton, None, &config).unwrap();
    assert_eq!(graph.len(), 1);
}

/// Download locations, any one of which will do
#[derive(Debug, Clone, Default, PartialEq)]
struct Release {
    about: Option<Uri>,
    mirrors: Vec<Uri>,
}

impl Resource for Release {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(PLAN_NS, "Release")
            .identity(|r| r.about.as_ref(), |r, uri| r.about = Some(uri))
            .property(
                PropertyDescriptor::<Self>::multi("http://example.org/plan#mirrors", "mirrors", ValueKind::Uri)
                    .with_container(Container::Alt)
                    .accessors(|r| all(&r.mirrors), |r, v| set_all(&mut r.mirrors, v)),
            )
    }
}

#[test]
fn test_alt_container_round_trip() {
    init_tracing();
    let config = MappingConfig::default();
    let release = Release {
        about: Some(Uri::new("http://example.org/releases/1")),
        mirrors: vec![
            Uri::new("http://eu.example.org/dl"),
            Uri::new("http://us.example.org/dl"),
        ],
    };

    let mut resources = ResourceSet::new();
    let handle = resources.insert(release.clone());
    let graph = encode(&resources, &[handle.id()], &Selection::All, None, &config).unwrap();

    let subject = RdfSubject::NamedNode(named("http://example.org/releases/1"));
    let alt = graph.object(&subject, &plan_iri("mirrors")).unwrap().as_subject().unwrap();
    assert!(graph.has_type(&alt, rdf::ALT));
    assert_eq!(graph.objects(&alt, rdf::LI).count(), 2);

    let turtle = RdfSerializer::serialize(&graph, RdfFormat::Turtle).unwrap();
    let parsed = RdfParser::parse(&turtle, RdfFormat::Turtle, None).unwrap();
    let decoded = decode_all::<Release>(&parsed, &config).unwrap();
    let mut mirrors = decoded.first().unwrap().mirrors.clone();
    mirrors.sort_by(|a, b| a.as_str().cmp(b.as_str()));
    assert_eq!(mirrors, release.mirrors);
}

#[test]
fn test_unparseable_literal_fails_decode() {
    init_tracing();
    let turtle = r#"
        @prefix plan: <http://example.org/plan#> .
        @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

        <http://example.org/plans/1> a plan:Plan ;
            plan:estimate "abc"^^xsd:int .
    "#;
    let graph = RdfParser::parse(turtle, RdfFormat::Turtle, None).unwrap();

    let err = decode_all::<Plan>(&graph, &MappingConfig::default()).unwrap_err();
    assert!(
        matches!(err, MappingError::Format { ref lexical, .. } if lexical == "abc"),
        "unexpected error {:?}",
        err
    );
}

#[test]
fn test_selection_over_linked_roots() {
    init_tracing();
    let config = MappingConfig::default();

    let mut resources = ResourceSet::new();
    let carol = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/carol")),
        name: Some("Carol".to_string()),
        nick: Some("cc".to_string()),
        ..Person::default()
    });
    let bob = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/bob")),
        name: Some("Bob".to_string()),
        knows: vec![carol],
        ..Person::default()
    });
    let alice = resources.insert(Person {
        about: Some(Uri::new("http://ex/people/alice")),
        name: Some("Alice".to_string()),
        knows: vec![bob],
        ..Person::default()
    });

    let selection = Selection::only([
        (foaf::NAME, Selection::All),
        (foaf::KNOWS, Selection::only([(foaf::NAME, Selection::All)])),
    ]);
    let bob_node = RdfSubject::NamedNode(named("http://ex/people/bob"));
    let carol_node = RdfSubject::NamedNode(named("http://ex/people/carol"));

    for roots in [[alice.id(), bob.id()], [bob.id(), alice.id()]] {
        let graph = encode(&resources, &roots, &selection, None, &config).unwrap();

        assert!(graph.contains(&Triple::new(
            bob_node.clone(),
            named(foaf::KNOWS),
            named("http://ex/people/carol"),
        )));
        assert!(graph.object(&carol_node, foaf::NAME).is_some());
        assert!(graph.object(&carol_node, foaf::NICK).is_none());

        let decoded = decode_all::<Person>(&graph, &config).unwrap();
        let decoded_bob = decoded
            .iter()
            .find(|p| p.about == Some(Uri::new("http://ex/people/bob")))
            .unwrap();
        assert_eq!(decoded_bob.knows.len(), 1);
    }
}

#[test]
fn test_reexpansion_writes_containers_once() {
    init_tracing();
    let config = MappingConfig::default();
    let plan = Plan {
        about: Some(Uri::new("http://example.org/plans/1")),
        steps: vec!["design".to_string(), "build".to_string()],
        tags: vec!["q3".to_string()],
        estimate: Some(Estimate {
            days: Some(5),
            note: Some("rough".to_string()),
        }),
    };
    let mut resources = ResourceSet::new();
    let handle = resources.insert(plan.clone());

    let mut builder = GraphBuilder::new(&resources, &config);
    builder
        .add_root(handle.id(), &Selection::only([(plan_iri("tags"), Selection::All)]))
        .unwrap();
    builder.add_root(handle.id(), &Selection::All).unwrap();
    let graph = builder.finish(None).unwrap();

    assert_eq!(graph.objects(&plan_subject(), &plan_iri("tags")).count(), 1);
    assert_eq!(graph.objects(&plan_subject(), &plan_iri("steps")).count(), 1);
    assert_eq!(graph.subjects_of_type(rdf::STATEMENT).count(), 1);

    let decoded = decode_all::<Plan>(&graph, &config).unwrap();
    assert_eq!(decoded.first(), Some(&plan));
}
