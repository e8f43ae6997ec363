use crate::mapping::{ExtendedProperties, Resource, ResourceSchema, Uri};

/// Resource with no declared properties.
///
/// Nested nodes reached through unmapped predicates decode into this type,
/// keeping every triple in the extended bag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnyResource {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,
}

impl Resource for AnyResource {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::untyped()
            .identity(|r| r.about.as_ref(), |r, uri| r.about = Some(uri))
            .types(|r| r.types.as_slice(), |r| &mut r.types)
            .extended(|r| &r.extended, |r| &mut r.extended)
    }
}
