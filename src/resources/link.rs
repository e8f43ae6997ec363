use super::STRING;
use crate::error::MappingResult;
use crate::mapping::{opt, set_opt, FromValue, PrimaryKind, Reified, Resource, ResourceSchema, Uri, Value};
use crate::vocab::dcterms;

/// Reference to another resource.
///
/// The label is not a property of the target: it is written on the
/// statement that asserts the reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Link {
    pub value: Option<Uri>,
    pub label: Option<String>,
}

impl Link {
    pub fn new(uri: impl Into<Uri>) -> Self {
        Self {
            value: Some(uri.into()),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Resource for Link {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::untyped().single(
            dcterms::TITLE,
            "title",
            STRING,
            |l| opt(&l.label),
            |l, v| set_opt(&mut l.label, v),
        )
    }
}

impl Reified for Link {
    fn primary_kind() -> PrimaryKind {
        PrimaryKind::Uri
    }

    fn value(&self) -> Option<Value> {
        self.value.clone().map(Value::Uri)
    }

    fn set_value(&mut self, value: Value) -> MappingResult<()> {
        self.value = Some(Uri::from_value(value)?);
        Ok(())
    }
}
