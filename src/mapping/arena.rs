//! Resource arena
//!
//! Resources that refer to each other live side by side in a
//! [`ResourceSet`] and point at one another through typed [`Handle`]s.
//! Shared and cyclic references are plain index copies, so decoding a
//! graph where A and B reference each other yields two slots, not an
//! infinite tree.

use super::builder::GraphBuilder;
use super::schema::{descriptor, Resource};
use super::selection::Selection;
use crate::error::MappingResult;
use crate::rdf::RdfSubject;
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Untyped position in a [`ResourceSet`]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId {
    index: usize,
    type_id: TypeId,
}

impl ResourceId {
    /// Slot index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether the slot holds a `T`
    pub fn is<T: Resource>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

impl fmt::Debug for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceId({})", self.index)
    }
}

/// Typed position in a [`ResourceSet`]
pub struct Handle<T> {
    id: ResourceId,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Resource> Handle<T> {
    /// Typed view of an id, if the slot holds a `T`
    pub fn from_id(id: ResourceId) -> Option<Self> {
        id.is::<T>().then_some(Self {
            id,
            _marker: PhantomData,
        })
    }
}

impl<T> Handle<T> {
    pub fn id(&self) -> ResourceId {
        self.id
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Handle<T> {}

impl<T> PartialEq for Handle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Handle<T> {}

impl<T> Hash for Handle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({})", self.id.index)
    }
}

impl<T> From<Handle<T>> for ResourceId {
    fn from(handle: Handle<T>) -> Self {
        handle.id
    }
}

/// Object-safe view of a [`Resource`]
pub trait ErasedResource: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn type_name(&self) -> &'static str;
    fn clone_box(&self) -> Box<dyn ErasedResource>;
    fn eq_dyn(&self, other: &dyn ErasedResource) -> bool;
    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Emit this resource as a node (identity, type, properties)
    fn encode_node(
        &self,
        builder: &mut GraphBuilder<'_>,
        id: Option<ResourceId>,
        selection: &Selection,
    ) -> MappingResult<RdfSubject>;

    /// Emit only this resource's properties onto an existing node
    fn encode_onto(
        &self,
        builder: &mut GraphBuilder<'_>,
        node: &RdfSubject,
        selection: &Selection,
    ) -> MappingResult<()>;

    /// Whether any property, type tag or extended value is set
    fn has_metadata(&self) -> MappingResult<bool>;
}

impl<T: Resource> ErasedResource for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    fn clone_box(&self) -> Box<dyn ErasedResource> {
        Box::new(self.clone())
    }

    fn eq_dyn(&self, other: &dyn ErasedResource) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }

    fn fmt_dyn(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }

    fn encode_node(
        &self,
        builder: &mut GraphBuilder<'_>,
        id: Option<ResourceId>,
        selection: &Selection,
    ) -> MappingResult<RdfSubject> {
        builder.encode_resource(self, id, selection)
    }

    fn encode_onto(
        &self,
        builder: &mut GraphBuilder<'_>,
        node: &RdfSubject,
        selection: &Selection,
    ) -> MappingResult<()> {
        let descriptor = descriptor::<T>()?;
        builder.encode_properties(self, &descriptor, node, selection)
    }

    fn has_metadata(&self) -> MappingResult<bool> {
        let descriptor = descriptor::<T>()?;
        Ok(descriptor.properties().iter().any(|p| !p.values(self).is_empty())
            || descriptor.types_of(self).is_some_and(|t| !t.is_empty())
            || descriptor.extended_of(self).is_some_and(|e| !e.is_empty()))
    }
}

impl fmt::Debug for dyn ErasedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_dyn(f)
    }
}

enum Slot {
    /// Reserved while its subject is being decoded
    Pending { type_name: &'static str },
    Ready(Box<dyn ErasedResource>),
}

/// Arena of resources addressed by [`Handle`]
#[derive(Default)]
pub struct ResourceSet {
    slots: Vec<Slot>,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Move a resource into the set
    pub fn insert<T: Resource>(&mut self, resource: T) -> Handle<T> {
        let id = self.next_id::<T>();
        self.slots.push(Slot::Ready(Box::new(resource)));
        Handle {
            id,
            _marker: PhantomData,
        }
    }

    pub fn get<T: Resource>(&self, handle: Handle<T>) -> Option<&T> {
        self.downcast(handle.id)
    }

    pub fn get_mut<T: Resource>(&mut self, handle: Handle<T>) -> Option<&mut T> {
        match self.slots.get_mut(handle.id.index)? {
            Slot::Ready(resource) => resource.as_any_mut().downcast_mut::<T>(),
            Slot::Pending { .. } => None,
        }
    }

    /// Typed access through an untyped id
    pub fn downcast<T: Resource>(&self, id: ResourceId) -> Option<&T> {
        self.resolve(id)?.as_any().downcast_ref::<T>()
    }

    /// Untyped access
    pub fn resolve(&self, id: ResourceId) -> Option<&dyn ErasedResource> {
        match self.slots.get(id.index)? {
            Slot::Ready(resource) if id.type_id == resource.as_any().type_id() => Some(&**resource),
            _ => None,
        }
    }

    /// All resources of type `T`, in slot order
    pub fn iter<T: Resource>(&self) -> impl Iterator<Item = (Handle<T>, &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| match slot {
            Slot::Ready(resource) => resource.as_any().downcast_ref::<T>().map(|r| {
                let handle = Handle {
                    id: ResourceId {
                        index,
                        type_id: TypeId::of::<T>(),
                    },
                    _marker: PhantomData,
                };
                (handle, r)
            }),
            Slot::Pending { .. } => None,
        })
    }

    /// Reserve a slot for a resource whose decode has started
    pub(crate) fn reserve<T: Resource>(&mut self) -> ResourceId {
        let id = self.next_id::<T>();
        self.slots.push(Slot::Pending {
            type_name: std::any::type_name::<T>(),
        });
        id
    }

    /// Publish a decoded resource into its reserved slot
    pub(crate) fn fill(&mut self, id: ResourceId, resource: Box<dyn ErasedResource>) {
        if let Some(slot) = self.slots.get_mut(id.index) {
            *slot = Slot::Ready(resource);
        }
    }

    fn next_id<T: Resource>(&self) -> ResourceId {
        ResourceId {
            index: self.slots.len(),
            type_id: TypeId::of::<T>(),
        }
    }
}

impl Clone for ResourceSet {
    fn clone(&self) -> Self {
        let slots = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Pending { type_name } => Slot::Pending { type_name: *type_name },
                Slot::Ready(resource) => Slot::Ready(resource.clone_box()),
            })
            .collect();
        Self { slots }
    }
}

impl fmt::Debug for ResourceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        for slot in &self.slots {
            match slot {
                Slot::Pending { type_name } => list.entry(&format_args!("<pending {}>", type_name)),
                Slot::Ready(resource) => list.entry(resource),
            };
        }
        list.finish()
    }
}
