use super::STRING;
use crate::mapping::{
    all, opt, set_all, set_opt, ExtendedProperties, Handle, Resource, ResourceSchema, Uri, ValueKind,
};
use crate::vocab::foaf;

/// `foaf:Person`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,
    pub name: Option<String>,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub nick: Option<String>,
    pub mbox: Option<Uri>,
    pub knows: Vec<Handle<Person>>,
}

impl Resource for Person {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(foaf::NS, foaf::PERSON)
            .prefix(foaf::PREFIX, foaf::NS)
            .identity(|p| p.about.as_ref(), |p, uri| p.about = Some(uri))
            .types(|p| p.types.as_slice(), |p| &mut p.types)
            .extended(|p| &p.extended, |p| &mut p.extended)
            .single(foaf::NAME, "name", STRING, |p| opt(&p.name), |p, v| set_opt(&mut p.name, v))
            .single(
                foaf::GIVEN_NAME,
                "givenName",
                STRING,
                |p| opt(&p.given_name),
                |p, v| set_opt(&mut p.given_name, v),
            )
            .single(
                foaf::FAMILY_NAME,
                "familyName",
                STRING,
                |p| opt(&p.family_name),
                |p, v| set_opt(&mut p.family_name, v),
            )
            .single(foaf::NICK, "nick", STRING, |p| opt(&p.nick), |p, v| set_opt(&mut p.nick, v))
            .single(foaf::MBOX, "mbox", ValueKind::Uri, |p| opt(&p.mbox), |p, v| set_opt(&mut p.mbox, v))
            .multi(
                foaf::KNOWS,
                "knows",
                ValueKind::nested::<Person>(),
                |p| all(&p.knows),
                |p, v| set_all(&mut p.knows, v),
            )
    }
}
