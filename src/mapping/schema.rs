//! Resource schema registry
//!
//! Every mappable type declares, once, how its fields map onto predicates:
//! an ordered list of property descriptors plus optional identity, type-tag
//! and extended-property accessors. Declarations are validated and cached
//! for the life of the process by the [`Registry`].
//!
//! # Example
//!
//! ```rust
//! use oslc::mapping::{descriptor, opt, set_opt, PrimitiveKind, Resource, ResourceSchema, Uri, ValueKind};
//!
//! #[derive(Debug, Clone, Default, PartialEq)]
//! struct Note {
//!     about: Option<Uri>,
//!     title: Option<String>,
//! }
//!
//! impl Resource for Note {
//!     fn schema() -> ResourceSchema<Self> {
//!         ResourceSchema::<Self>::new("http://example.org/ns#", "Note")
//!             .identity(|n| n.about.as_ref(), |n, uri| n.about = Some(uri))
//!             .single(
//!                 "http://purl.org/dc/terms/title",
//!                 "title",
//!                 ValueKind::Literal(PrimitiveKind::String),
//!                 |n| opt(&n.title),
//!                 |n, v| set_opt(&mut n.title, v),
//!             )
//!     }
//! }
//!
//! let descriptor = descriptor::<Note>().unwrap();
//! assert_eq!(descriptor.type_iri(), Some("http://example.org/ns#Note"));
//! assert_eq!(descriptor.properties().len(), 1);
//! ```

use super::arena::{ErasedResource, ResourceId};
use super::literal::PrimitiveKind;
use super::reader::{decode_nested, decode_reified, GraphReader};
use super::value::{ExtendedProperties, Uri, Value};
use crate::error::{MappingError, MappingResult};
use crate::rdf::{is_absolute_iri, NamedNode, RdfSubject};
use crate::vocab::rdf;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// A type that maps to and from RDF
pub trait Resource: Any + Default + Clone + PartialEq + fmt::Debug + Send + Sync {
    /// Property declarations for this type
    fn schema() -> ResourceSchema<Self>;
}

/// A wrapper around a primary value whose own properties describe the
/// statement asserting that value (RDF reification)
pub trait Reified: Resource {
    /// How the primary value is written
    fn primary_kind() -> PrimaryKind;

    fn value(&self) -> Option<Value>;

    fn set_value(&mut self, value: Value) -> MappingResult<()>;
}

/// Multiplicity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Occurs {
    Single,
    Multi,
}

/// RDF collection used for a multi-valued property
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// One triple per value
    None,
    /// `rdf:first`/`rdf:rest` chain, ordered
    List,
    Bag,
    Seq,
    Alt,
}

impl Container {
    /// `rdf:type` of the container node, for Bag/Seq/Alt
    pub fn type_iri(&self) -> Option<&'static str> {
        match self {
            Container::Bag => Some(rdf::BAG),
            Container::Seq => Some(rdf::SEQ),
            Container::Alt => Some(rdf::ALT),
            Container::None | Container::List => None,
        }
    }
}

/// Primary value of a reified wrapper
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKind {
    Literal(PrimitiveKind),
    Uri,
}

pub(crate) type DecodeNested = fn(&mut GraphReader<'_>, &RdfSubject) -> MappingResult<ResourceId>;
pub(crate) type DecodeReified =
    fn(&mut GraphReader<'_>, Value, Option<&RdfSubject>) -> MappingResult<Value>;
pub(crate) type PrimaryOf = fn(&dyn ErasedResource) -> Option<Value>;

/// Decoder for a nested resource type
#[derive(Clone, Copy)]
pub struct NestedCodec {
    pub(crate) type_id: TypeId,
    pub(crate) type_name: &'static str,
    pub(crate) decode: DecodeNested,
}

/// Decoder and primary-value accessor for a reified wrapper type
#[derive(Clone, Copy)]
pub struct ReifiedCodec {
    pub(crate) primary: PrimaryKind,
    pub(crate) type_name: &'static str,
    pub(crate) decode: DecodeReified,
    pub(crate) primary_of: PrimaryOf,
}

/// What a property's values are
#[derive(Clone, Copy)]
pub enum ValueKind {
    Literal(PrimitiveKind),
    Uri,
    Resource(NestedCodec),
    Reified(ReifiedCodec),
}

impl ValueKind {
    /// Nested resource of type `N`
    pub fn nested<N: Resource>() -> Self {
        ValueKind::Resource(NestedCodec {
            type_id: TypeId::of::<N>(),
            type_name: short_type_name::<N>(),
            decode: decode_nested::<N>,
        })
    }

    /// Reified wrapper of type `W`
    pub fn reified<W: Reified>() -> Self {
        ValueKind::Reified(ReifiedCodec {
            primary: W::primary_kind(),
            type_name: short_type_name::<W>(),
            decode: decode_reified::<W>,
            primary_of: primary_of::<W>,
        })
    }

    /// Whether values are literals (or reified literals)
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            ValueKind::Literal(_)
                | ValueKind::Reified(ReifiedCodec {
                    primary: PrimaryKind::Literal(_),
                    ..
                })
        )
    }
}

impl fmt::Debug for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Literal(kind) => write!(f, "Literal({})", kind),
            ValueKind::Uri => f.write_str("Uri"),
            ValueKind::Resource(codec) => write!(f, "Resource({})", codec.type_name),
            ValueKind::Reified(codec) => write!(f, "Reified({}, {:?})", codec.type_name, codec.primary),
        }
    }
}

fn primary_of<W: Reified>(wrapper: &dyn ErasedResource) -> Option<Value> {
    wrapper.as_any().downcast_ref::<W>()?.value()
}

/// Last path segment of a Rust type name
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

pub type Getter<T> = fn(&T) -> Vec<Value>;
pub type Setter<T> = fn(&mut T, Vec<Value>) -> MappingResult<()>;

/// One mapped property
#[derive(Clone)]
pub struct PropertyDescriptor<T> {
    predicate: String,
    name: String,
    occurs: Occurs,
    container: Container,
    kind: ValueKind,
    read_only: bool,
    get: Option<Getter<T>>,
    set: Option<Setter<T>>,
}

impl<T> PropertyDescriptor<T> {
    fn new(predicate: &str, name: &str, occurs: Occurs, kind: ValueKind) -> Self {
        Self {
            predicate: predicate.to_string(),
            name: name.to_string(),
            occurs,
            container: Container::None,
            kind,
            read_only: false,
            get: None,
            set: None,
        }
    }

    /// Zero-or-one valued property
    pub fn single(predicate: &str, name: &str, kind: ValueKind) -> Self {
        Self::new(predicate, name, Occurs::Single, kind)
    }

    /// Zero-or-many valued property
    pub fn multi(predicate: &str, name: &str, kind: ValueKind) -> Self {
        Self::new(predicate, name, Occurs::Multi, kind)
    }

    /// Write the values as an RDF collection
    pub fn with_container(mut self, container: Container) -> Self {
        self.container = container;
        self
    }

    /// Mark as server-managed
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn getter(mut self, get: Getter<T>) -> Self {
        self.get = Some(get);
        self
    }

    pub fn setter(mut self, set: Setter<T>) -> Self {
        self.set = Some(set);
        self
    }

    pub fn accessors(self, get: Getter<T>, set: Setter<T>) -> Self {
        self.getter(get).setter(set)
    }

    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn occurs(&self) -> Occurs {
        self.occurs
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Current values of this property on `resource`
    pub fn values(&self, resource: &T) -> Vec<Value> {
        self.get.map(|get| get(resource)).unwrap_or_default()
    }

    pub(crate) fn assign(&self, resource: &mut T, values: Vec<Value>) -> MappingResult<()> {
        match self.set {
            Some(set) => set(resource, values),
            None => Ok(()),
        }
    }

    fn validate(&self, type_name: &str) -> MappingResult<()> {
        let shape = |reason: &str| MappingError::invalid_shape(type_name, self.name.as_str(), reason);

        if self.get.is_none() || self.set.is_none() {
            return Err(MappingError::MissingCounterpart {
                type_name: type_name.to_string(),
                member: self.name.clone(),
            });
        }
        if self.name.is_empty() || !self.predicate.ends_with(&self.name) {
            return Err(shape(&format!(
                "predicate <{}> does not end with '{}'",
                self.predicate, self.name
            )));
        }
        if !is_absolute_iri(&self.predicate) {
            return Err(shape(&format!("predicate <{}> is not an absolute IRI", self.predicate)));
        }
        if self.container != Container::None && self.occurs == Occurs::Single {
            return Err(shape("containers require a multi-valued property"));
        }
        if self.container != Container::None && matches!(self.kind, ValueKind::Reified(_)) {
            return Err(shape("reified values cannot be stored in a container"));
        }
        Ok(())
    }
}

impl<T> fmt::Debug for PropertyDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyDescriptor")
            .field("predicate", &self.predicate)
            .field("name", &self.name)
            .field("occurs", &self.occurs)
            .field("container", &self.container)
            .field("kind", &self.kind)
            .field("read_only", &self.read_only)
            .finish()
    }
}

type IdentityAccessors<T> = (fn(&T) -> Option<&Uri>, fn(&mut T, Uri));
type TypesAccessors<T> = (fn(&T) -> &[Uri], fn(&mut T) -> &mut Vec<Uri>);
type ExtendedAccessors<T> = (fn(&T) -> &ExtendedProperties, fn(&mut T) -> &mut ExtendedProperties);

/// Declaration of a resource type, as written by the type itself
pub struct ResourceSchema<T> {
    namespace: Option<String>,
    name: String,
    prefixes: Vec<(String, String)>,
    identity: Option<IdentityAccessors<T>>,
    types: Option<TypesAccessors<T>>,
    extended: Option<ExtendedAccessors<T>>,
    properties: Vec<PropertyDescriptor<T>>,
}

impl<T: Resource> ResourceSchema<T> {
    /// A type asserted as `rdf:type <namespace + name>`
    pub fn new(namespace: &str, name: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            name: name.to_string(),
            ..Self::untyped()
        }
    }

    /// A type with no shape URI (anonymous resources, reified wrappers)
    pub fn untyped() -> Self {
        Self {
            namespace: None,
            name: short_type_name::<T>().to_string(),
            prefixes: Vec::new(),
            identity: None,
            types: None,
            extended: None,
            properties: Vec::new(),
        }
    }

    /// Prefix this type wants in serialized output
    pub fn prefix(mut self, prefix: &str, namespace: &str) -> Self {
        self.prefixes.push((prefix.to_string(), namespace.to_string()));
        self
    }

    pub fn identity(mut self, get: fn(&T) -> Option<&Uri>, set: fn(&mut T, Uri)) -> Self {
        self.identity = Some((get, set));
        self
    }

    /// Additional `rdf:type` tags beyond the shape type
    pub fn types(mut self, get: fn(&T) -> &[Uri], get_mut: fn(&mut T) -> &mut Vec<Uri>) -> Self {
        self.types = Some((get, get_mut));
        self
    }

    /// Bag for predicates with no descriptor
    pub fn extended(
        mut self,
        get: fn(&T) -> &ExtendedProperties,
        get_mut: fn(&mut T) -> &mut ExtendedProperties,
    ) -> Self {
        self.extended = Some((get, get_mut));
        self
    }

    pub fn property(mut self, property: PropertyDescriptor<T>) -> Self {
        self.properties.push(property);
        self
    }

    /// Shorthand for a zero-or-one valued property with both accessors
    pub fn single(self, predicate: &str, name: &str, kind: ValueKind, get: Getter<T>, set: Setter<T>) -> Self {
        self.property(PropertyDescriptor::single(predicate, name, kind).accessors(get, set))
    }

    /// Shorthand for a zero-or-many valued property with both accessors
    pub fn multi(self, predicate: &str, name: &str, kind: ValueKind, get: Getter<T>, set: Setter<T>) -> Self {
        self.property(PropertyDescriptor::multi(predicate, name, kind).accessors(get, set))
    }

    fn build(self) -> MappingResult<TypeDescriptor<T>> {
        let type_name = short_type_name::<T>();

        let type_iri = match &self.namespace {
            Some(namespace) => {
                let iri = format!("{}{}", namespace, self.name);
                if !is_absolute_iri(&iri) {
                    return Err(MappingError::invalid_shape(
                        type_name,
                        "rdf:type",
                        format!("<{}> is not an absolute IRI", iri),
                    ));
                }
                Some(NamedNode::new_unchecked(iri))
            }
            None => None,
        };

        let mut by_predicate = FxHashMap::default();
        for (index, property) in self.properties.iter().enumerate() {
            property.validate(type_name)?;
            if by_predicate.insert(property.predicate.clone(), index).is_some() {
                return Err(MappingError::invalid_shape(
                    type_name,
                    property.name.as_str(),
                    format!("predicate <{}> is declared twice", property.predicate),
                ));
            }
        }

        debug!("Built descriptor for {} ({} properties)", type_name, self.properties.len());

        Ok(TypeDescriptor {
            type_name,
            type_iri,
            prefixes: self.prefixes,
            identity: self.identity,
            types: self.types,
            extended: self.extended,
            properties: self.properties,
            by_predicate,
        })
    }
}

/// Validated, immutable view of a [`ResourceSchema`]
pub struct TypeDescriptor<T> {
    type_name: &'static str,
    type_iri: Option<NamedNode>,
    prefixes: Vec<(String, String)>,
    identity: Option<IdentityAccessors<T>>,
    types: Option<TypesAccessors<T>>,
    extended: Option<ExtendedAccessors<T>>,
    properties: Vec<PropertyDescriptor<T>>,
    by_predicate: FxHashMap<String, usize>,
}

impl<T> TypeDescriptor<T> {
    /// Short type name used in errors
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Shape URI asserted as `rdf:type`
    pub fn type_iri(&self) -> Option<&str> {
        self.type_iri.as_ref().map(|n| n.as_str())
    }

    pub(crate) fn type_node(&self) -> Option<&NamedNode> {
        self.type_iri.as_ref()
    }

    /// Declared `(prefix, namespace)` pairs
    pub fn prefixes(&self) -> &[(String, String)] {
        &self.prefixes
    }

    /// Property descriptors in declaration order
    pub fn properties(&self) -> &[PropertyDescriptor<T>] {
        &self.properties
    }

    /// Descriptor for a predicate IRI
    pub fn property(&self, predicate: &str) -> Option<&PropertyDescriptor<T>> {
        self.index_of(predicate).map(|i| &self.properties[i])
    }

    pub(crate) fn index_of(&self, predicate: &str) -> Option<usize> {
        self.by_predicate.get(predicate).copied()
    }

    pub fn has_identity(&self) -> bool {
        self.identity.is_some()
    }

    pub fn has_extended(&self) -> bool {
        self.extended.is_some()
    }

    pub(crate) fn identity_of<'r>(&self, resource: &'r T) -> Option<&'r Uri> {
        self.identity.and_then(|(get, _)| get(resource))
    }

    pub(crate) fn set_identity(&self, resource: &mut T, uri: Uri) {
        if let Some((_, set)) = self.identity {
            set(resource, uri);
        }
    }

    pub(crate) fn types_of<'r>(&self, resource: &'r T) -> Option<&'r [Uri]> {
        self.types.map(|(get, _)| get(resource))
    }

    pub(crate) fn types_mut<'r>(&self, resource: &'r mut T) -> Option<&'r mut Vec<Uri>> {
        self.types.map(|(_, get_mut)| get_mut(resource))
    }

    pub(crate) fn extended_of<'r>(&self, resource: &'r T) -> Option<&'r ExtendedProperties> {
        self.extended.map(|(get, _)| get(resource))
    }

    pub(crate) fn extended_mut<'r>(&self, resource: &'r mut T) -> Option<&'r mut ExtendedProperties> {
        self.extended.map(|(_, get_mut)| get_mut(resource))
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("type_iri", &self.type_iri())
            .field("properties", &self.properties)
            .finish()
    }
}

/// Process-wide, build-once cache of type descriptors
pub struct Registry {
    id: u64,
    descriptors: RwLock<FxHashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    /// Serializes builds so each type is built at most once
    build: Mutex<()>,
}

static GLOBAL_REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(0);

type Published = FxHashMap<(u64, TypeId), Arc<dyn Any + Send + Sync>>;

// Descriptors are immutable once published, so a per-thread copy of the
// entries never goes stale and repeat lookups skip the lock entirely.
thread_local! {
    static PUBLISHED: RefCell<Published> = RefCell::new(FxHashMap::default());
}

impl Registry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            descriptors: RwLock::new(FxHashMap::default()),
            build: Mutex::new(()),
        }
    }

    /// The registry shared by the builder and the reader
    pub fn global() -> &'static Registry {
        &GLOBAL_REGISTRY
    }

    /// Descriptor for `T`, building and publishing it on first use
    pub fn descriptor<T: Resource>(&self) -> MappingResult<Arc<TypeDescriptor<T>>> {
        if let Some(descriptor) = self.lookup::<T>() {
            return Ok(descriptor);
        }

        let _guard = self.build.lock();
        if let Some(descriptor) = self.lookup::<T>() {
            return Ok(descriptor);
        }

        let descriptor = Arc::new(T::schema().build()?);
        let entry = descriptor.clone() as Arc<dyn Any + Send + Sync>;
        self.descriptors.write().insert(TypeId::of::<T>(), entry.clone());
        PUBLISHED.with(|published| published.borrow_mut().insert((self.id, TypeId::of::<T>()), entry));
        Ok(descriptor)
    }

    /// Whether `T` has been built
    pub fn contains<T: Resource>(&self) -> bool {
        self.descriptors.read().contains_key(&TypeId::of::<T>())
    }

    /// Number of built descriptors
    pub fn len(&self) -> usize {
        self.descriptors.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.read().is_empty()
    }

    fn lookup<T: Resource>(&self) -> Option<Arc<TypeDescriptor<T>>> {
        let key = (self.id, TypeId::of::<T>());
        let entry = match PUBLISHED.with(|published| published.borrow().get(&key).cloned()) {
            Some(entry) => entry,
            None => {
                let entry = self.descriptors.read().get(&key.1)?.clone();
                PUBLISHED.with(|published| published.borrow_mut().insert(key, entry.clone()));
                entry
            }
        };
        entry.downcast::<TypeDescriptor<T>>().ok()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

/// Descriptor for `T` from the global registry
pub fn descriptor<T: Resource>() -> MappingResult<Arc<TypeDescriptor<T>>> {
    Registry::global().descriptor::<T>()
}
