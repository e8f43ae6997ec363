//! Graph builder (encode)
//!
//! Walks resources through their descriptors and emits triples into a
//! [`Graph`]. Nested resources are looked up in the [`ResourceSet`] the
//! builder was created over; each is given one node. A resource is expanded
//! once per distinct selection reaching it and never while its own
//! expansion is still running, which keeps cyclic resource graphs finite.

use super::arena::{ResourceId, ResourceSet};
use super::literal;
use super::schema::{descriptor, Container, PropertyDescriptor, ReifiedCodec, Resource, TypeDescriptor, ValueKind};
use super::selection::Selection;
use super::value::{Uri, Value};
use crate::config::MappingConfig;
use crate::error::{MappingError, MappingResult};
use crate::rdf::{is_absolute_iri, BlankNode, Graph, Literal, NamedNode, RdfObject, RdfSubject};
use crate::vocab::{oslc, rdf, rdfs, xsd};
use rustc_hash::{FxHashMap, FxHashSet};
use std::any::TypeId;
use tracing::debug;

/// Paging metadata attached to an encoded collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    /// Subject the `rdfs:member` triples hang off
    pub collection: Uri,
    /// `oslc:ResponseInfo` subject, possibly equal to `collection`
    pub response_info: Option<Uri>,
    pub next_page: Option<Uri>,
    /// Defaults to the number of encoded roots
    pub total_count: Option<u64>,
}

impl PageInfo {
    pub fn new(collection: impl Into<Uri>) -> Self {
        Self {
            collection: collection.into(),
            response_info: None,
            next_page: None,
            total_count: None,
        }
    }

    pub fn with_response_info(mut self, response_info: impl Into<Uri>) -> Self {
        self.response_info = Some(response_info.into());
        self
    }

    pub fn with_next_page(mut self, next_page: impl Into<Uri>) -> Self {
        self.next_page = Some(next_page.into());
        self
    }

    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }
}

/// Encoder from resources to triples
pub struct GraphBuilder<'a> {
    resources: &'a ResourceSet,
    config: &'a MappingConfig,
    graph: Graph,
    /// Node assigned to each arena resource
    nodes: FxHashMap<ResourceId, RdfSubject>,
    /// Selections each arena resource has been expanded with
    expanded: FxHashMap<ResourceId, Vec<Selection>>,
    /// Arena resources whose expansion is running
    in_progress: FxHashSet<ResourceId>,
    /// Container and reified properties already written, by node and predicate
    structured: FxHashSet<(RdfSubject, String)>,
    /// Types whose declared prefixes are already registered
    prefixed: FxHashSet<TypeId>,
    roots: Vec<RdfSubject>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(resources: &'a ResourceSet, config: &'a MappingConfig) -> Self {
        Self {
            resources,
            config,
            graph: Graph::new(),
            nodes: FxHashMap::default(),
            expanded: FxHashMap::default(),
            in_progress: FxHashSet::default(),
            structured: FxHashSet::default(),
            prefixed: FxHashSet::default(),
            roots: Vec::new(),
        }
    }

    /// Encode an arena resource as a top-level member
    pub fn add_root(&mut self, id: ResourceId, selection: &Selection) -> MappingResult<RdfSubject> {
        let resources = self.resources;
        let resource = resources
            .resolve(id)
            .ok_or_else(|| MappingError::unsupported(format!("{:?}", id), "resource"))?;
        let node = resource.encode_node(self, Some(id), selection)?;
        self.roots.push(node.clone());
        Ok(node)
    }

    /// Encode a resource that lives outside the arena as a top-level member.
    ///
    /// Its handles still resolve against the builder's arena.
    pub fn add<T: Resource>(&mut self, resource: &T, selection: &Selection) -> MappingResult<RdfSubject> {
        let node = self.encode_resource(resource, None, selection)?;
        self.roots.push(node.clone());
        Ok(node)
    }

    /// Reserve the built-in prefixes, emit paging metadata and hand back the graph
    pub fn finish(self, page: Option<&PageInfo>) -> MappingResult<Graph> {
        let mut graph = self.graph;

        let namespaces = graph.namespaces_mut();
        namespaces.ensure_prefix(rdf::PREFIX, rdf::NS);
        namespaces.ensure_prefix(rdfs::PREFIX, rdfs::NS);

        let Some(page) = page else {
            return Ok(graph);
        };

        namespaces.ensure_prefix(oslc::PREFIX, oslc::NS);

        let collection = page_node(&page.collection, "collection")?;

        if let Some(response_info) = &page.response_info {
            let info = if *response_info == page.collection {
                collection.clone()
            } else {
                page_node(response_info, "responseInfo")?
            };

            graph.add(info.clone(), named(rdf::TYPE), named(oslc::RESPONSE_INFO));

            let total = page.total_count.unwrap_or(self.roots.len() as u64);
            let total = if self.config.total_count_datatype {
                Literal::new_typed_literal(total.to_string(), named(xsd::INTEGER))
            } else {
                Literal::new_simple_literal(total.to_string())
            };
            graph.add(info.clone(), named(oslc::TOTAL_COUNT), total);

            if let Some(next_page) = &page.next_page {
                let next = page_node(next_page, "nextPage")?;
                graph.add(info, named(oslc::NEXT_PAGE), next);
            }
        }

        for root in &self.roots {
            graph.add(collection.clone(), named(rdfs::MEMBER), root.clone());
        }

        Ok(graph)
    }

    /// Emit a resource node: identity, shape type and (unless singleton) properties
    pub(crate) fn encode_resource<T: Resource>(
        &mut self,
        resource: &T,
        id: Option<ResourceId>,
        selection: &Selection,
    ) -> MappingResult<RdfSubject> {
        let descriptor = descriptor::<T>()?;
        self.register_prefixes(&descriptor);

        let known = id.and_then(|id| self.nodes.get(&id).cloned());
        if let (Some(id), Some(node)) = (id, &known) {
            if selection.is_singleton() || self.in_progress.contains(&id) || self.covers(id, selection) {
                return Ok(node.clone());
            }
        }

        let node = match known {
            Some(node) => node,
            None => self.node_for(resource, &descriptor)?,
        };
        if let Some(id) = id {
            self.nodes.insert(id, node.clone());
        }

        if let Some(type_node) = descriptor.type_node() {
            self.graph.add(node.clone(), named(rdf::TYPE), type_node.clone());
        }

        if selection.is_singleton() {
            return Ok(node);
        }

        let Some(id) = id else {
            self.encode_properties(resource, &descriptor, &node, selection)?;
            return Ok(node);
        };

        self.in_progress.insert(id);
        let result = self.encode_properties(resource, &descriptor, &node, selection);
        self.in_progress.remove(&id);
        result?;

        self.expanded.entry(id).or_default().push(selection.clone());
        Ok(node)
    }

    /// Whether an earlier expansion of `id` already emitted everything `selection` asks for
    fn covers(&self, id: ResourceId, selection: &Selection) -> bool {
        self.expanded
            .get(&id)
            .is_some_and(|applied| applied.iter().any(|s| matches!(s, Selection::All) || s == selection))
    }

    /// Emit type tags, mapped properties and extended properties onto `node`
    pub(crate) fn encode_properties<T: Resource>(
        &mut self,
        resource: &T,
        descriptor: &TypeDescriptor<T>,
        node: &RdfSubject,
        selection: &Selection,
    ) -> MappingResult<()> {
        let type_name = descriptor.type_name();

        if let Some(types) = descriptor.types_of(resource) {
            if selection.child(rdf::TYPE).is_some() {
                for type_uri in types {
                    let object = absolute(type_uri, type_name, "type")?;
                    self.graph.add(node.clone(), named(rdf::TYPE), object);
                }
            }
        }

        for property in descriptor.properties() {
            let Some((child, only_nested)) = selection.child(property.predicate()) else {
                continue;
            };
            let values = property.values(resource);
            if values.is_empty() {
                continue;
            }
            self.encode_property(type_name, property, node, values, child, only_nested)?;
        }

        if let Some(extended) = descriptor.extended_of(resource) {
            for (name, entry) in extended.iter() {
                let predicate = name.iri();
                let Some((child, only_nested)) = selection.child(&predicate) else {
                    continue;
                };
                if !is_absolute_iri(&predicate) {
                    return Err(MappingError::relative_uri(type_name, name.local.as_str(), predicate));
                }
                if let Some(prefix) = &name.prefix {
                    self.graph.namespaces_mut().ensure_prefix(prefix, &name.namespace);
                }

                for value in entry.values() {
                    if only_nested && !matches!(value, Value::Resource(_)) {
                        continue;
                    }
                    let object = self.encode_term(type_name, &name.local, value, None, child)?;
                    self.graph.add(node.clone(), named(&predicate), object);
                }
            }
        }

        Ok(())
    }

    fn encode_property<T>(
        &mut self,
        type_name: &str,
        property: &PropertyDescriptor<T>,
        node: &RdfSubject,
        values: Vec<Value>,
        selection: &Selection,
        only_nested: bool,
    ) -> MappingResult<()> {
        let predicate = named(property.predicate());
        let nested = match property.kind() {
            ValueKind::Resource(codec) => Some(codec.type_id),
            ValueKind::Reified(codec) => {
                if only_nested || !self.structured.insert((node.clone(), property.predicate().to_string())) {
                    return Ok(());
                }
                for value in &values {
                    self.encode_reified(type_name, property.name(), codec, node, &predicate, value, selection)?;
                }
                return Ok(());
            }
            ValueKind::Literal(_) | ValueKind::Uri => None,
        };

        let mut objects = Vec::with_capacity(values.len());
        for value in &values {
            if only_nested && !matches!(value, Value::Resource(_)) {
                continue;
            }
            objects.push(self.encode_term(type_name, property.name(), value, nested, selection)?);
        }
        if objects.is_empty() {
            return Ok(());
        }
        if property.container() != Container::None
            && !self.structured.insert((node.clone(), property.predicate().to_string()))
        {
            return Ok(());
        }

        match property.container() {
            Container::None => {
                for object in objects {
                    self.graph.add(node.clone(), predicate.clone(), object);
                }
            }
            Container::List => {
                let head = self.encode_list(objects);
                self.graph.add(node.clone(), predicate, head);
            }
            container @ (Container::Bag | Container::Seq | Container::Alt) => {
                let bag = BlankNode::new();
                if let Some(type_iri) = container.type_iri() {
                    self.graph.add(bag.clone(), named(rdf::TYPE), named(type_iri));
                }
                for object in objects {
                    self.graph.add(bag.clone(), named(rdf::LI), object);
                }
                self.graph.add(node.clone(), predicate, bag);
            }
        }
        Ok(())
    }

    /// Main triple, then the statement node carrying the wrapper's properties
    #[allow(clippy::too_many_arguments)]
    fn encode_reified(
        &mut self,
        type_name: &str,
        member: &str,
        codec: &ReifiedCodec,
        node: &RdfSubject,
        predicate: &NamedNode,
        value: &Value,
        selection: &Selection,
    ) -> MappingResult<()> {
        let Value::Reified(wrapper) = value else {
            let object = self.encode_term(type_name, member, value, None, selection)?;
            self.graph.add(node.clone(), predicate.clone(), object);
            return Ok(());
        };

        let Some(primary) = (codec.primary_of)(&**wrapper) else {
            debug!("Skipping {}.{}: {} has no value", type_name, member, codec.type_name);
            return Ok(());
        };
        let object = self.encode_term(type_name, member, &primary, None, selection)?;
        self.graph.add(node.clone(), predicate.clone(), object.clone());

        if selection.is_singleton() {
            return Ok(());
        }
        if !self.config.reify_without_metadata && !wrapper.has_metadata()? {
            return Ok(());
        }

        let statement = BlankNode::new();
        self.graph.add(statement.clone(), named(rdf::SUBJECT), node.clone());
        self.graph.add(statement.clone(), named(rdf::PREDICATE), predicate.clone());
        self.graph.add(statement.clone(), named(rdf::OBJECT), object);
        self.graph.add(statement.clone(), named(rdf::TYPE), named(rdf::STATEMENT));

        wrapper.encode_onto(self, &RdfSubject::BlankNode(statement), selection)
    }

    fn encode_term(
        &mut self,
        type_name: &str,
        member: &str,
        value: &Value,
        nested: Option<TypeId>,
        selection: &Selection,
    ) -> MappingResult<RdfObject> {
        match value {
            Value::Literal(primitive) => Ok(literal::encode(primitive)?.into()),
            Value::Uri(uri) => Ok(absolute(uri, type_name, member)?.into()),
            Value::Resource(id) => {
                let resources = self.resources;
                let resource = resources
                    .resolve(*id)
                    .ok_or_else(|| MappingError::unsupported(format!("{:?}", id), member))?;
                if let Some(expected) = nested {
                    if resource.as_any().type_id() != expected {
                        return Err(MappingError::unsupported(resource.type_name(), member));
                    }
                }
                Ok(resource.encode_node(self, Some(*id), selection)?.into())
            }
            Value::Reified(_) => Err(MappingError::unsupported(value.describe(), member)),
        }
    }

    /// Cons-cell chain ending in `rdf:nil`
    fn encode_list(&mut self, objects: Vec<RdfObject>) -> RdfObject {
        let mut head = RdfObject::NamedNode(named(rdf::NIL));
        for object in objects.into_iter().rev() {
            let cell = BlankNode::new();
            self.graph.add(cell.clone(), named(rdf::FIRST), object);
            self.graph.add(cell.clone(), named(rdf::REST), head);
            head = cell.into();
        }
        head
    }

    fn node_for<T: Resource>(&self, resource: &T, descriptor: &TypeDescriptor<T>) -> MappingResult<RdfSubject> {
        match descriptor.identity_of(resource) {
            Some(uri) => Ok(absolute(uri, descriptor.type_name(), "about")?.into()),
            None => Ok(BlankNode::new().into()),
        }
    }

    fn register_prefixes<T: Resource>(&mut self, descriptor: &TypeDescriptor<T>) {
        if !self.prefixed.insert(TypeId::of::<T>()) {
            return;
        }
        let namespaces = self.graph.namespaces_mut();
        for (prefix, namespace) in descriptor.prefixes() {
            namespaces.ensure_prefix(prefix, namespace);
        }
    }
}

/// Encode `roots` (and everything they reach) into a graph
pub fn encode(
    resources: &ResourceSet,
    roots: &[ResourceId],
    selection: &Selection,
    page: Option<&PageInfo>,
    config: &MappingConfig,
) -> MappingResult<Graph> {
    let mut builder = GraphBuilder::new(resources, config);
    for root in roots {
        builder.add_root(*root, selection)?;
    }
    builder.finish(page)
}

fn named(iri: &str) -> NamedNode {
    NamedNode::new_unchecked(iri)
}

fn absolute(uri: &Uri, type_name: &str, member: &str) -> MappingResult<NamedNode> {
    if uri.is_absolute() {
        Ok(named(uri.as_str()))
    } else {
        Err(MappingError::relative_uri(type_name, member, uri.as_str()))
    }
}

fn page_node(uri: &Uri, member: &str) -> MappingResult<NamedNode> {
    absolute(uri, "PageInfo", member)
}
