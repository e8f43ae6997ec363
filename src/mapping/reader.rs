//! Graph reader (decode)
//!
//! Rebuilds typed resources from a [`Graph`]. Every decoded subject gets a
//! slot in a [`ResourceSet`] before its triples are read, and the slot is
//! recorded in a visited map; a later reference to the same subject (a
//! cycle, or a resource shared by two parents) resolves to that slot
//! instead of decoding it again.

use super::arena::{Handle, ResourceId, ResourceSet};
use super::literal;
use super::schema::{descriptor, Occurs, PrimaryKind, PropertyDescriptor, Reified, Resource, TypeDescriptor, ValueKind};
use super::value::{QName, Uri, Value};
use crate::config::MappingConfig;
use crate::error::{MappingError, MappingResult};
use crate::rdf::{split_iri, Graph, NamedNode, NamespaceManager, RdfObject, RdfPredicate, RdfSubject, Triple};
use crate::resources::AnyResource;
use crate::vocab::{oslc, rdf, rdfs};
use rustc_hash::{FxHashMap, FxHashSet};
use std::any::TypeId;
use tracing::{debug, warn};

/// Decoder from triples to resources
pub struct GraphReader<'g> {
    graph: &'g Graph,
    config: &'g MappingConfig,
    resources: ResourceSet,
    /// Prefix table, extended with generated prefixes
    namespaces: NamespaceManager,
    /// (subject, target type) → slot, set before the subject's triples are read
    visited: FxHashMap<(RdfSubject, TypeId), ResourceId>,
    /// First slot decoded for each subject, whatever its type
    visited_any: FxHashMap<RdfSubject, ResourceId>,
}

impl<'g> GraphReader<'g> {
    pub fn new(graph: &'g Graph, config: &'g MappingConfig) -> Self {
        Self {
            graph,
            config,
            resources: ResourceSet::new(),
            namespaces: graph.namespaces().clone(),
            visited: FxHashMap::default(),
            visited_any: FxHashMap::default(),
        }
    }

    /// Decode `subject` as a `T`
    pub fn decode<T: Resource>(&mut self, subject: &RdfSubject) -> MappingResult<Handle<T>> {
        let id = self.decode_subject::<T>(subject)?;
        Handle::from_id(id).ok_or_else(|| MappingError::unsupported(format!("{:?}", id), std::any::type_name::<T>()))
    }

    /// Decode every subject typed with `T`'s shape URI, in graph order
    pub fn decode_typed<T: Resource>(&mut self) -> MappingResult<Vec<Handle<T>>> {
        let descriptor = descriptor::<T>()?;
        let type_iri = descriptor.type_iri().ok_or_else(|| {
            MappingError::invalid_shape(descriptor.type_name(), "rdf:type", "type has no shape URI to match")
        })?;

        let graph = self.graph;
        graph
            .subjects_of_type(type_iri)
            .map(|subject| self.decode::<T>(subject))
            .collect()
    }

    /// Resources decoded so far
    pub fn resources(&self) -> &ResourceSet {
        &self.resources
    }

    /// Prefix table, including prefixes generated for unknown namespaces
    pub fn namespaces(&self) -> &NamespaceManager {
        &self.namespaces
    }

    pub fn into_decoded<T: Resource>(self, roots: Vec<Handle<T>>) -> Decoded<T> {
        Decoded {
            resources: self.resources,
            roots,
            namespaces: self.namespaces,
        }
    }

    fn decode_subject<T: Resource>(&mut self, subject: &RdfSubject) -> MappingResult<ResourceId> {
        let key = (subject.clone(), TypeId::of::<T>());
        if let Some(id) = self.visited.get(&key) {
            return Ok(*id);
        }

        let descriptor = descriptor::<T>()?;
        let id = self.resources.reserve::<T>();
        self.visited.insert(key, id);
        self.visited_any.entry(subject.clone()).or_insert(id);

        let mut resource = T::default();
        self.read_resource(&mut resource, &descriptor, subject, false)?;
        self.resources.fill(id, Box::new(resource));
        Ok(id)
    }

    /// Read every triple of `subject` into `resource`.
    ///
    /// On a reification statement node the four quad triples are skipped.
    fn read_resource<T: Resource>(
        &mut self,
        resource: &mut T,
        descriptor: &TypeDescriptor<T>,
        subject: &RdfSubject,
        statement: bool,
    ) -> MappingResult<()> {
        let type_name = descriptor.type_name();

        if let RdfSubject::NamedNode(node) = subject {
            if descriptor.has_identity() {
                if !node.is_absolute() {
                    return Err(MappingError::relative_uri(type_name, "about", node.as_str()));
                }
                descriptor.set_identity(resource, Uri::new(node.as_str()));
            }
        }

        let mut buffers: Vec<Option<Vec<Value>>> = descriptor.properties().iter().map(|_| None).collect();

        let graph = self.graph;
        for triple in graph.triples_with_subject(subject) {
            if statement && is_quad_triple(triple) {
                continue;
            }

            let predicate = triple.predicate.as_str();
            if predicate == rdf::TYPE && descriptor.index_of(predicate).is_none() {
                if let RdfObject::NamedNode(type_node) = &triple.object {
                    if descriptor.type_iri() == Some(type_node.as_str()) {
                        continue;
                    }
                    if let Some(types) = descriptor.types_mut(resource) {
                        if !type_node.is_absolute() {
                            return Err(MappingError::relative_uri(type_name, "type", type_node.as_str()));
                        }
                        types.push(Uri::new(type_node.as_str()));
                        continue;
                    }
                }
            }

            match descriptor.index_of(predicate) {
                Some(index) => {
                    let property = &descriptor.properties()[index];
                    let values = self.read_property(type_name, property, triple)?;
                    let buffer = &mut buffers[index];
                    match property.occurs() {
                        Occurs::Single => {
                            if buffer.is_some() {
                                return Err(MappingError::MisusedOccurs {
                                    type_name: type_name.to_string(),
                                    member: property.name().to_string(),
                                });
                            }
                            *buffer = Some(values);
                        }
                        Occurs::Multi => buffer.get_or_insert_with(Vec::new).extend(values),
                    }
                }
                None => self.read_extended(resource, descriptor, triple)?,
            }
        }

        for (property, values) in descriptor.properties().iter().zip(buffers) {
            if let Some(values) = values {
                property.assign(resource, values)?;
            }
        }
        Ok(())
    }

    fn read_property<T>(
        &mut self,
        type_name: &str,
        property: &PropertyDescriptor<T>,
        triple: &'g Triple,
    ) -> MappingResult<Vec<Value>> {
        if let ValueKind::Reified(codec) = property.kind() {
            let Some(primary) = self.read_primary(type_name, property.name(), codec.primary, &triple.object)? else {
                return Ok(Vec::new());
            };
            let statement = find_statement(self.graph, triple);
            if let Some(node) = &statement {
                debug!("Reading reification {} for {}.{}", node, type_name, property.name());
            }
            let value = (codec.decode)(self, primary, statement.as_ref())?;
            return Ok(vec![value]);
        }

        let terms = match property.occurs() {
            Occurs::Multi => self.expand_collection(&triple.object)?,
            Occurs::Single => vec![&triple.object],
        };

        let mut values = Vec::with_capacity(terms.len());
        for term in terms {
            if let Some(value) = self.read_term(type_name, property, term)? {
                values.push(value);
            }
        }
        Ok(values)
    }

    /// Members of an `rdf:List` or `rdf:Bag`/`Seq`/`Alt`, or the term itself.
    ///
    /// `rdf:nil` is an empty list; a node with `rdf:first` is a list cell
    /// and wins over a container type on the same node.
    fn expand_collection(&self, object: &'g RdfObject) -> MappingResult<Vec<&'g RdfObject>> {
        if object.is_iri(rdf::NIL) {
            return Ok(Vec::new());
        }
        let Some(node) = object.as_subject() else {
            return Ok(vec![object]);
        };

        let graph = self.graph;
        if graph.object(&node, rdf::FIRST).is_some() {
            return read_list(graph, node);
        }
        if [rdf::BAG, rdf::SEQ, rdf::ALT].iter().any(|t| graph.has_type(&node, t)) {
            return Ok(read_container(graph, &node));
        }
        Ok(vec![object])
    }

    fn read_term<T>(
        &mut self,
        type_name: &str,
        property: &PropertyDescriptor<T>,
        term: &'g RdfObject,
    ) -> MappingResult<Option<Value>> {
        match (property.kind(), term) {
            (ValueKind::Literal(kind), RdfObject::Literal(lit)) => Ok(Some(Value::Literal(literal::decode(lit, *kind)?))),
            (ValueKind::Uri, RdfObject::NamedNode(node)) => Ok(Some(Value::Uri(uri_of(node, type_name, property.name())?))),
            (ValueKind::Resource(codec), RdfObject::NamedNode(_) | RdfObject::BlankNode(_)) => {
                let Some(node) = term.as_subject() else {
                    return Ok(None);
                };
                let id = (codec.decode)(self, &node)?;
                Ok(Some(Value::Resource(id)))
            }
            (kind, _) => {
                debug!("Skipping {} for {}.{}: not a {:?} term", term, type_name, property.name(), kind);
                Ok(None)
            }
        }
    }

    fn read_primary(
        &self,
        type_name: &str,
        member: &str,
        primary: PrimaryKind,
        object: &RdfObject,
    ) -> MappingResult<Option<Value>> {
        match (primary, object) {
            (PrimaryKind::Literal(kind), RdfObject::Literal(lit)) => Ok(Some(Value::Literal(literal::decode(lit, kind)?))),
            (PrimaryKind::Uri, RdfObject::NamedNode(node)) => Ok(Some(Value::Uri(uri_of(node, type_name, member)?))),
            _ => {
                debug!("Skipping {} for {}.{}: not a {:?} value", object, type_name, member, primary);
                Ok(None)
            }
        }
    }

    /// Store an unmapped predicate in the extended bag, or drop it
    fn read_extended<T: Resource>(
        &mut self,
        resource: &mut T,
        descriptor: &TypeDescriptor<T>,
        triple: &'g Triple,
    ) -> MappingResult<()> {
        let type_name = descriptor.type_name();
        let predicate = triple.predicate.as_str();

        if !descriptor.has_extended() {
            if self.config.strict_unmapped {
                return Err(MappingError::unsupported(format!("<{}>", predicate), type_name));
            }
            warn!("Dropping unmapped predicate <{}> on {}", predicate, type_name);
            return Ok(());
        }

        let name = self.qname(predicate);
        let value = self.read_extended_value(type_name, &name.local, &triple.object)?;
        if let Some(extended) = descriptor.extended_mut(resource) {
            extended.add(name, value);
        }
        Ok(())
    }

    fn read_extended_value(&mut self, type_name: &str, member: &str, object: &'g RdfObject) -> MappingResult<Value> {
        let node = match object {
            RdfObject::Literal(lit) => return Ok(Value::Literal(literal::infer(lit))),
            RdfObject::NamedNode(node) => RdfSubject::NamedNode(node.clone()),
            RdfObject::BlankNode(node) => RdfSubject::BlankNode(node.clone()),
        };

        if let Some(id) = self.visited_any.get(&node) {
            return Ok(Value::Resource(*id));
        }
        if let RdfSubject::NamedNode(iri) = &node {
            if !self.graph.has_subject(&node) {
                return Ok(Value::Uri(uri_of(iri, type_name, member)?));
            }
        }
        let id = self.decode_subject::<AnyResource>(&node)?;
        Ok(Value::Resource(id))
    }

    /// QName for an unmapped predicate, generating a prefix for new namespaces
    fn qname(&mut self, predicate: &str) -> QName {
        match split_iri(predicate) {
            Some((namespace, local)) => {
                let prefix = self.namespaces.generate_prefix(namespace, &self.config.generated_prefix);
                QName::new(namespace, local).with_prefix(prefix)
            }
            None => QName::new(predicate, ""),
        }
    }
}

fn uri_of(node: &NamedNode, type_name: &str, member: &str) -> MappingResult<Uri> {
    if node.is_absolute() {
        Ok(Uri::new(node.as_str()))
    } else {
        Err(MappingError::relative_uri(type_name, member, node.as_str()))
    }
}

/// `rdf:subject`/`rdf:predicate`/`rdf:object`, and `rdf:type rdf:Statement`
fn is_quad_triple(triple: &Triple) -> bool {
    match triple.predicate.as_str() {
        rdf::SUBJECT | rdf::PREDICATE | rdf::OBJECT => true,
        rdf::TYPE => triple.object.is_iri(rdf::STATEMENT),
        _ => false,
    }
}

/// Statement node reifying `triple`, if the graph has one
fn find_statement(graph: &Graph, triple: &Triple) -> Option<RdfSubject> {
    let subject_of = RdfPredicate::from(NamedNode::new_unchecked(rdf::SUBJECT));
    graph
        .subjects_with(&subject_of, &triple.subject.to_object())
        .find(|node| {
            graph.has_type(node, rdf::STATEMENT)
                && graph.objects(node, rdf::PREDICATE).any(|p| p.is_iri(triple.predicate.as_str()))
                && graph.objects(node, rdf::OBJECT).any(|o| *o == triple.object)
        })
        .cloned()
}

fn read_list(graph: &Graph, head: RdfSubject) -> MappingResult<Vec<&RdfObject>> {
    let mut items = Vec::new();
    let mut seen = FxHashSet::default();
    let mut cell = head;

    loop {
        if !seen.insert(cell.clone()) {
            return Err(MappingError::malformed(cell.to_string(), "rdf:rest revisits a list cell"));
        }
        let first = graph
            .object(&cell, rdf::FIRST)
            .ok_or_else(|| MappingError::malformed(cell.to_string(), "list cell has no rdf:first"))?;
        items.push(first);

        let rest = graph
            .object(&cell, rdf::REST)
            .ok_or_else(|| MappingError::malformed(cell.to_string(), "list cell has no rdf:rest"))?;
        if rest.is_iri(rdf::NIL) {
            return Ok(items);
        }
        cell = rest
            .as_subject()
            .ok_or_else(|| MappingError::malformed(cell.to_string(), "rdf:rest is a literal"))?;
    }
}

/// `rdf:li` members first, then `rdf:_N` members by index
fn read_container<'g>(graph: &'g Graph, node: &RdfSubject) -> Vec<&'g RdfObject> {
    let mut items: Vec<&RdfObject> = graph.objects(node, rdf::LI).collect();

    let mut numbered: Vec<(usize, &RdfObject)> = graph
        .triples_with_subject(node)
        .filter_map(|t| rdf::membership_index(t.predicate.as_str()).map(|i| (i, &t.object)))
        .collect();
    numbered.sort_by_key(|(index, _)| *index);

    items.extend(numbered.into_iter().map(|(_, object)| object));
    items
}

pub(crate) fn decode_nested<N: Resource>(reader: &mut GraphReader<'_>, subject: &RdfSubject) -> MappingResult<ResourceId> {
    reader.decode_subject::<N>(subject)
}

pub(crate) fn decode_reified<W: Reified>(
    reader: &mut GraphReader<'_>,
    primary: Value,
    statement: Option<&RdfSubject>,
) -> MappingResult<Value> {
    let descriptor = descriptor::<W>()?;
    let mut wrapper = W::default();
    wrapper.set_value(primary)?;
    if let Some(node) = statement {
        reader.read_resource(&mut wrapper, &descriptor, node, true)?;
    }
    Ok(Value::reified(wrapper))
}

/// Result of a decode call: the arena plus the requested resources
#[derive(Debug, Clone)]
pub struct Decoded<T> {
    pub resources: ResourceSet,
    pub roots: Vec<Handle<T>>,
    /// Prefix table of the source graph plus any generated prefixes
    pub namespaces: NamespaceManager,
}

impl<T: Resource> Decoded<T> {
    pub fn get(&self, handle: Handle<T>) -> Option<&T> {
        self.resources.get(handle)
    }

    /// First requested resource
    pub fn first(&self) -> Option<&T> {
        self.roots.first().and_then(|h| self.resources.get(*h))
    }

    /// Requested resources, in graph order
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.roots.iter().filter_map(|h| self.resources.get(*h))
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// One page of a paged collection
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub decoded: Decoded<T>,
    pub total_count: Option<u64>,
    pub next_page: Option<Uri>,
}

/// Decode every subject typed with `T`'s shape
pub fn decode_all<T: Resource>(graph: &Graph, config: &MappingConfig) -> MappingResult<Decoded<T>> {
    let mut reader = GraphReader::new(graph, config);
    let roots = reader.decode_typed::<T>()?;
    Ok(reader.into_decoded(roots))
}

/// Decode one subject as a `T`
pub fn decode_one<T: Resource>(graph: &Graph, subject: &RdfSubject, config: &MappingConfig) -> MappingResult<Decoded<T>> {
    let mut reader = GraphReader::new(graph, config);
    let root = reader.decode::<T>(subject)?;
    Ok(reader.into_decoded(vec![root]))
}

/// Decode a paged response: the members of `collection` plus the
/// response-info totals
pub fn decode_page<T: Resource>(graph: &Graph, collection: &str, config: &MappingConfig) -> MappingResult<Page<T>> {
    let collection = RdfSubject::NamedNode(NamedNode::new_unchecked(collection));
    let mut reader = GraphReader::new(graph, config);

    let mut roots = Vec::new();
    for member in graph.objects(&collection, rdfs::MEMBER) {
        match member.as_subject() {
            Some(subject) => roots.push(reader.decode::<T>(&subject)?),
            None => debug!("Skipping literal member {} of {}", member, collection),
        }
    }

    let info = graph.subjects_of_type(oslc::RESPONSE_INFO).next();
    let total_count = match info.and_then(|info| graph.object(info, oslc::TOTAL_COUNT)) {
        Some(RdfObject::Literal(lit)) => Some(
            lit.value()
                .trim()
                .parse::<u64>()
                .map_err(|_| MappingError::format(lit.value(), "unsignedLong"))?,
        ),
        _ => None,
    };
    let next_page = match info.and_then(|info| graph.object(info, oslc::NEXT_PAGE)) {
        Some(RdfObject::NamedNode(node)) => Some(uri_of(node, "ResponseInfo", "nextPage")?),
        _ => None,
    };

    Ok(Page {
        decoded: reader.into_decoded(roots),
        total_count,
        next_page,
    })
}
