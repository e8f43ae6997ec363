//! Property values
//!
//! A [`Value`] is what flows between a resource's accessors and the graph:
//! a literal, a URI reference, a handle to a nested resource in the same
//! [`ResourceSet`](super::ResourceSet), or a reified wrapper. Predicates
//! without a descriptor land in [`ExtendedProperties`].

use super::arena::{ErasedResource, Handle, ResourceId};
use super::literal::{Primitive, XmlLiteral};
use super::schema::{Reified, Resource};
use crate::error::{MappingError, MappingResult};
use crate::rdf::is_absolute_iri;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// URI reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference is an absolute IRI
    pub fn is_absolute(&self) -> bool {
        is_absolute_iri(&self.0)
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Uri {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Uri {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Qualified name: namespace plus local name, with an optional display prefix.
///
/// Two QNames are equal when namespace and local name match; the prefix
/// is presentation only.
#[derive(Debug, Clone, Eq)]
pub struct QName {
    pub namespace: String,
    pub local: String,
    pub prefix: Option<String>,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
            prefix: None,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Full predicate IRI
    pub fn iri(&self) -> String {
        format!("{}{}", self.namespace, self.local)
    }
}

impl PartialEq for QName {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.local == other.local
    }
}

impl Hash for QName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.local.hash(state);
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(prefix) => write!(f, "{}:{}", prefix, self.local),
            None => write!(f, "<{}{}>", self.namespace, self.local),
        }
    }
}

/// One property value
pub enum Value {
    Literal(Primitive),
    Uri(Uri),
    Resource(ResourceId),
    Reified(Box<dyn ErasedResource>),
}

impl Value {
    /// Wrap a reified value
    pub fn reified<W: Reified>(wrapper: W) -> Self {
        Value::Reified(Box::new(wrapper))
    }

    /// Short description used in error messages
    pub(crate) fn describe(&self) -> String {
        match self {
            Value::Literal(p) => p.to_string(),
            Value::Uri(u) => format!("<{}>", u),
            Value::Resource(id) => format!("{:?}", id),
            Value::Reified(w) => format!("reified {}", w.type_name()),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Literal(p) => Value::Literal(p.clone()),
            Value::Uri(u) => Value::Uri(u.clone()),
            Value::Resource(id) => Value::Resource(*id),
            Value::Reified(w) => Value::Reified(w.clone_box()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Literal(a), Value::Literal(b)) => a == b,
            (Value::Uri(a), Value::Uri(b)) => a == b,
            (Value::Resource(a), Value::Resource(b)) => a == b,
            (Value::Reified(a), Value::Reified(b)) => a.eq_dyn(&**b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Literal(p) => f.debug_tuple("Literal").field(p).finish(),
            Value::Uri(u) => f.debug_tuple("Uri").field(u).finish(),
            Value::Resource(id) => f.debug_tuple("Resource").field(id).finish(),
            Value::Reified(w) => {
                f.write_str("Reified(")?;
                w.fmt_dyn(f)?;
                f.write_str(")")
            }
        }
    }
}

/// Extended property value; a repeated predicate promotes it to a list
#[derive(Debug, Clone, PartialEq)]
pub enum ExtendedValue {
    Single(Value),
    List(Vec<Value>),
}

impl ExtendedValue {
    /// All values, in insertion order
    pub fn values(&self) -> &[Value] {
        match self {
            ExtendedValue::Single(v) => std::slice::from_ref(v),
            ExtendedValue::List(vs) => vs,
        }
    }

    /// Add another value, promoting a single value to a list
    pub fn push(&mut self, value: Value) {
        match self {
            ExtendedValue::List(values) => values.push(value),
            ExtendedValue::Single(_) => {
                if let ExtendedValue::Single(first) = std::mem::replace(self, ExtendedValue::List(Vec::new())) {
                    *self = ExtendedValue::List(vec![first, value]);
                }
            }
        }
    }
}

/// Ordered bag of values for predicates with no descriptor
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedProperties(IndexMap<QName, ExtendedValue>);

impl ExtendedProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entry for `name`
    pub fn insert(&mut self, name: QName, value: ExtendedValue) -> Option<ExtendedValue> {
        self.0.insert(name, value)
    }

    /// Add a value under `name`, coalescing repeats into a list
    pub fn add(&mut self, name: QName, value: Value) {
        match self.0.get_mut(&name) {
            Some(existing) => existing.push(value),
            None => {
                self.0.insert(name, ExtendedValue::Single(value));
            }
        }
    }

    pub fn get(&self, name: &QName) -> Option<&ExtendedValue> {
        self.0.get(name)
    }

    /// Look up by full predicate IRI
    pub fn get_iri(&self, iri: &str) -> Option<&ExtendedValue> {
        self.0
            .iter()
            .find(|(name, _)| name.iri() == iri)
            .map(|(_, value)| value)
    }

    /// The stored key for `name`, including the prefix it was given
    pub fn key(&self, name: &QName) -> Option<&QName> {
        self.0.get_key_value(name).map(|(k, _)| k)
    }

    pub fn remove(&mut self, name: &QName) -> Option<ExtendedValue> {
        self.0.shift_remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QName, &ExtendedValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Conversion into a property value
pub trait IntoValue {
    fn into_value(self) -> Value;
}

/// Conversion out of a property value
pub trait FromValue: Sized {
    fn from_value(value: Value) -> MappingResult<Self>;
}

fn mismatch<T>(value: &Value, target: &str) -> MappingResult<T> {
    Err(MappingError::unsupported(value.describe(), target))
}

impl IntoValue for Value {
    fn into_value(self) -> Value {
        self
    }
}

impl FromValue for Value {
    fn from_value(value: Value) -> MappingResult<Self> {
        Ok(value)
    }
}

impl IntoValue for Primitive {
    fn into_value(self) -> Value {
        Value::Literal(self)
    }
}

impl FromValue for Primitive {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Literal(p) => Ok(p),
            other => mismatch(&other, "literal"),
        }
    }
}

impl IntoValue for String {
    fn into_value(self) -> Value {
        Value::Literal(Primitive::String(self))
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Literal(Primitive::String(s))
            | Value::Literal(Primitive::XmlLiteral(s))
            | Value::Literal(Primitive::LangString { value: s, .. }) => Ok(s),
            other => mismatch(&other, "string"),
        }
    }
}

impl IntoValue for XmlLiteral {
    fn into_value(self) -> Value {
        Value::Literal(Primitive::XmlLiteral(self.0))
    }
}

impl FromValue for XmlLiteral {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Literal(Primitive::XmlLiteral(s)) | Value::Literal(Primitive::String(s)) => {
                Ok(XmlLiteral(s))
            }
            other => mismatch(&other, "XMLLiteral"),
        }
    }
}

macro_rules! primitive_value {
    ($($ty:ty => $variant:ident, $name:literal;)*) => {
        $(
            impl IntoValue for $ty {
                fn into_value(self) -> Value {
                    Value::Literal(Primitive::$variant(self))
                }
            }

            impl FromValue for $ty {
                fn from_value(value: Value) -> MappingResult<Self> {
                    match value {
                        Value::Literal(Primitive::$variant(v)) => Ok(v),
                        other => mismatch(&other, $name),
                    }
                }
            }
        )*
    };
}

primitive_value! {
    bool => Boolean, "boolean";
    i8 => Byte, "byte";
    i16 => Short, "short";
    i32 => Int, "int";
    i64 => Long, "long";
    BigInt => BigInteger, "integer";
    f32 => Float, "float";
    f64 => Double, "double";
    BigDecimal => Decimal, "decimal";
    DateTime<Utc> => DateTime, "dateTime";
}

impl IntoValue for Uri {
    fn into_value(self) -> Value {
        Value::Uri(self)
    }
}

impl FromValue for Uri {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Uri(u) => Ok(u),
            other => mismatch(&other, "URI reference"),
        }
    }
}

impl<T: Resource> IntoValue for Handle<T> {
    fn into_value(self) -> Value {
        Value::Resource(self.id())
    }
}

impl<T: Resource> FromValue for Handle<T> {
    fn from_value(value: Value) -> MappingResult<Self> {
        match value {
            Value::Resource(id) => Handle::from_id(id)
                .ok_or_else(|| MappingError::unsupported(format!("{:?}", id), std::any::type_name::<T>())),
            other => mismatch(&other, std::any::type_name::<T>()),
        }
    }
}

/// Accessor helper: an optional field as zero or one value
pub fn opt<V: IntoValue + Clone>(field: &Option<V>) -> Vec<Value> {
    field.iter().cloned().map(IntoValue::into_value).collect()
}

/// Accessor helper: a collection field as values
pub fn all<V: IntoValue + Clone>(field: &[V]) -> Vec<Value> {
    field.iter().cloned().map(IntoValue::into_value).collect()
}

/// Accessor helper: reified wrappers as values
pub fn all_reified<W: Reified>(field: &[W]) -> Vec<Value> {
    field.iter().cloned().map(Value::reified).collect()
}

/// Accessor helper: an optional reified wrapper as zero or one value
pub fn opt_reified<W: Reified>(field: &Option<W>) -> Vec<Value> {
    field.iter().cloned().map(Value::reified).collect()
}

/// Mutator helper: assign the first decoded value
pub fn set_opt<V: FromValue>(field: &mut Option<V>, values: Vec<Value>) -> MappingResult<()> {
    *field = values.into_iter().next().map(V::from_value).transpose()?;
    Ok(())
}

/// Mutator helper: assign all decoded values
pub fn set_all<V: FromValue>(field: &mut Vec<V>, values: Vec<Value>) -> MappingResult<()> {
    *field = values.into_iter().map(V::from_value).collect::<MappingResult<_>>()?;
    Ok(())
}

/// Unwrap a reified value into its concrete wrapper type
pub fn into_reified<W: Reified>(value: Value) -> MappingResult<W> {
    match value {
        Value::Reified(wrapper) => match wrapper.as_any().downcast_ref::<W>() {
            Some(w) => Ok(w.clone()),
            None => Err(MappingError::unsupported(
                format!("reified {}", wrapper.type_name()),
                std::any::type_name::<W>(),
            )),
        },
        other => mismatch(&other, std::any::type_name::<W>()),
    }
}

/// Mutator helper: assign the first reified wrapper
pub fn set_opt_reified<W: Reified>(field: &mut Option<W>, values: Vec<Value>) -> MappingResult<()> {
    *field = values.into_iter().next().map(into_reified).transpose()?;
    Ok(())
}

/// Mutator helper: assign all reified wrappers
pub fn set_all_reified<W: Reified>(field: &mut Vec<W>, values: Vec<Value>) -> MappingResult<()> {
    *field = values.into_iter().map(into_reified).collect::<MappingResult<_>>()?;
    Ok(())
}
