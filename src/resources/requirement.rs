use super::{Link, DATE_TIME, STRING, XML_LITERAL};
use crate::mapping::{
    all, all_reified, opt, set_all, set_all_reified, set_opt, ExtendedProperties, PropertyDescriptor, Resource,
    ResourceSchema, Uri, ValueKind, XmlLiteral,
};
use crate::vocab::{dcterms, oslc, rm};
use chrono::{DateTime, Utc};

/// `oslc_rm:Requirement`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Requirement {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,

    pub title: Option<String>,
    pub description: Option<XmlLiteral>,
    pub identifier: Option<String>,
    pub short_title: Option<String>,
    pub subjects: Vec<String>,
    pub creators: Vec<Uri>,
    pub contributors: Vec<Uri>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub service_provider: Option<Uri>,
    pub instance_shape: Option<Uri>,

    pub elaborated_by: Vec<Uri>,
    pub specified_by: Vec<Uri>,
    pub affected_by: Vec<Uri>,
    pub tracked_by: Vec<Link>,
    pub implemented_by: Vec<Uri>,
    pub validated_by: Vec<Link>,
    pub satisfied_by: Vec<Uri>,
    pub decomposed_by: Vec<Uri>,
    pub constrained_by: Vec<Uri>,
}

impl Resource for Requirement {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(rm::NS, rm::REQUIREMENT)
            .prefix(rm::PREFIX, rm::NS)
            .prefix(dcterms::PREFIX, dcterms::NS)
            .identity(|r| r.about.as_ref(), |r, uri| r.about = Some(uri))
            .types(|r| r.types.as_slice(), |r| &mut r.types)
            .extended(|r| &r.extended, |r| &mut r.extended)
            .single(dcterms::TITLE, "title", STRING, |r| opt(&r.title), |r, v| set_opt(&mut r.title, v))
            .single(
                dcterms::DESCRIPTION,
                "description",
                XML_LITERAL,
                |r| opt(&r.description),
                |r, v| set_opt(&mut r.description, v),
            )
            .single(
                dcterms::IDENTIFIER,
                "identifier",
                STRING,
                |r| opt(&r.identifier),
                |r, v| set_opt(&mut r.identifier, v),
            )
            .single(
                oslc::SHORT_TITLE,
                "shortTitle",
                STRING,
                |r| opt(&r.short_title),
                |r, v| set_opt(&mut r.short_title, v),
            )
            .multi(dcterms::SUBJECT, "subject", STRING, |r| all(&r.subjects), |r, v| set_all(&mut r.subjects, v))
            .multi(
                dcterms::CREATOR,
                "creator",
                ValueKind::Uri,
                |r| all(&r.creators),
                |r, v| set_all(&mut r.creators, v),
            )
            .multi(
                dcterms::CONTRIBUTOR,
                "contributor",
                ValueKind::Uri,
                |r| all(&r.contributors),
                |r, v| set_all(&mut r.contributors, v),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::CREATED, "created", DATE_TIME)
                    .read_only()
                    .accessors(|r| opt(&r.created), |r, v| set_opt(&mut r.created, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::MODIFIED, "modified", DATE_TIME)
                    .read_only()
                    .accessors(|r| opt(&r.modified), |r, v| set_opt(&mut r.modified, v)),
            )
            .single(
                oslc::SERVICE_PROVIDER,
                "serviceProvider",
                ValueKind::Uri,
                |r| opt(&r.service_provider),
                |r, v| set_opt(&mut r.service_provider, v),
            )
            .single(
                oslc::INSTANCE_SHAPE,
                "instanceShape",
                ValueKind::Uri,
                |r| opt(&r.instance_shape),
                |r, v| set_opt(&mut r.instance_shape, v),
            )
            .multi(
                rm::ELABORATED_BY,
                "elaboratedBy",
                ValueKind::Uri,
                |r| all(&r.elaborated_by),
                |r, v| set_all(&mut r.elaborated_by, v),
            )
            .multi(
                rm::SPECIFIED_BY,
                "specifiedBy",
                ValueKind::Uri,
                |r| all(&r.specified_by),
                |r, v| set_all(&mut r.specified_by, v),
            )
            .multi(
                rm::AFFECTED_BY,
                "affectedBy",
                ValueKind::Uri,
                |r| all(&r.affected_by),
                |r, v| set_all(&mut r.affected_by, v),
            )
            .multi(
                rm::TRACKED_BY,
                "trackedBy",
                ValueKind::reified::<Link>(),
                |r| all_reified(&r.tracked_by),
                |r, v| set_all_reified(&mut r.tracked_by, v),
            )
            .multi(
                rm::IMPLEMENTED_BY,
                "implementedBy",
                ValueKind::Uri,
                |r| all(&r.implemented_by),
                |r, v| set_all(&mut r.implemented_by, v),
            )
            .multi(
                rm::VALIDATED_BY,
                "validatedBy",
                ValueKind::reified::<Link>(),
                |r| all_reified(&r.validated_by),
                |r, v| set_all_reified(&mut r.validated_by, v),
            )
            .multi(
                rm::SATISFIED_BY,
                "satisfiedBy",
                ValueKind::Uri,
                |r| all(&r.satisfied_by),
                |r, v| set_all(&mut r.satisfied_by, v),
            )
            .multi(
                rm::DECOMPOSED_BY,
                "decomposedBy",
                ValueKind::Uri,
                |r| all(&r.decomposed_by),
                |r, v| set_all(&mut r.decomposed_by, v),
            )
            .multi(
                rm::CONSTRAINED_BY,
                "constrainedBy",
                ValueKind::Uri,
                |r| all(&r.constrained_by),
                |r, v| set_all(&mut r.constrained_by, v),
            )
    }
}

/// `oslc_rm:RequirementCollection`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementCollection {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,

    pub title: Option<String>,
    pub description: Option<XmlLiteral>,
    pub identifier: Option<String>,
    pub creators: Vec<Uri>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub service_provider: Option<Uri>,
    pub uses: Vec<Uri>,
}

impl Resource for RequirementCollection {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(rm::NS, rm::REQUIREMENT_COLLECTION)
            .prefix(rm::PREFIX, rm::NS)
            .prefix(dcterms::PREFIX, dcterms::NS)
            .identity(|r| r.about.as_ref(), |r, uri| r.about = Some(uri))
            .types(|r| r.types.as_slice(), |r| &mut r.types)
            .extended(|r| &r.extended, |r| &mut r.extended)
            .single(dcterms::TITLE, "title", STRING, |r| opt(&r.title), |r, v| set_opt(&mut r.title, v))
            .single(
                dcterms::DESCRIPTION,
                "description",
                XML_LITERAL,
                |r| opt(&r.description),
                |r, v| set_opt(&mut r.description, v),
            )
            .single(
                dcterms::IDENTIFIER,
                "identifier",
                STRING,
                |r| opt(&r.identifier),
                |r, v| set_opt(&mut r.identifier, v),
            )
            .multi(
                dcterms::CREATOR,
                "creator",
                ValueKind::Uri,
                |r| all(&r.creators),
                |r, v| set_all(&mut r.creators, v),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::CREATED, "created", DATE_TIME)
                    .read_only()
                    .accessors(|r| opt(&r.created), |r, v| set_opt(&mut r.created, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::MODIFIED, "modified", DATE_TIME)
                    .read_only()
                    .accessors(|r| opt(&r.modified), |r, v| set_opt(&mut r.modified, v)),
            )
            .single(
                oslc::SERVICE_PROVIDER,
                "serviceProvider",
                ValueKind::Uri,
                |r| opt(&r.service_provider),
                |r, v| set_opt(&mut r.service_provider, v),
            )
            .multi(rm::USES, "uses", ValueKind::Uri, |r| all(&r.uses), |r, v| set_all(&mut r.uses, v))
    }
}
