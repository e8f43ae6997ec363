use super::{Link, Person, BOOLEAN, DATE_TIME, STRING, XML_LITERAL};
use crate::mapping::{
    all, all_reified, opt, set_all, set_all_reified, set_opt, ExtendedProperties, Handle, PropertyDescriptor,
    Resource, ResourceSchema, Uri, ValueKind, XmlLiteral,
};
use crate::vocab::{cm, dcterms, oslc};
use chrono::{DateTime, Utc};

/// `oslc_cm:ChangeRequest`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeRequest {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,

    pub identifier: Option<String>,
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub description: Option<XmlLiteral>,
    pub subjects: Vec<String>,
    pub creators: Vec<Uri>,
    /// Contributors are described inline
    pub contributors: Vec<Handle<Person>>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub close_date: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub closed: Option<bool>,
    pub in_progress: Option<bool>,
    pub fixed: Option<bool>,
    pub approved: Option<bool>,
    pub reviewed: Option<bool>,
    pub verified: Option<bool>,
    pub discussed_by: Option<Uri>,
    pub service_provider: Option<Uri>,
    pub instance_shape: Option<Uri>,

    pub related_change_requests: Vec<Link>,
    pub affects_requirements: Vec<Link>,
    pub implements_requirements: Vec<Link>,
    pub tracks_requirements: Vec<Link>,
    pub tested_by_test_cases: Vec<Link>,
    pub affects_test_results: Vec<Link>,
}

impl Resource for ChangeRequest {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(cm::NS, cm::CHANGE_REQUEST)
            .prefix(cm::PREFIX, cm::NS)
            .prefix(dcterms::PREFIX, dcterms::NS)
            .identity(|c| c.about.as_ref(), |c, uri| c.about = Some(uri))
            .types(|c| c.types.as_slice(), |c| &mut c.types)
            .extended(|c| &c.extended, |c| &mut c.extended)
            .single(
                dcterms::IDENTIFIER,
                "identifier",
                STRING,
                |c| opt(&c.identifier),
                |c, v| set_opt(&mut c.identifier, v),
            )
            .single(dcterms::TITLE, "title", STRING, |c| opt(&c.title), |c, v| set_opt(&mut c.title, v))
            .single(
                oslc::SHORT_TITLE,
                "shortTitle",
                STRING,
                |c| opt(&c.short_title),
                |c, v| set_opt(&mut c.short_title, v),
            )
            .single(
                dcterms::DESCRIPTION,
                "description",
                XML_LITERAL,
                |c| opt(&c.description),
                |c, v| set_opt(&mut c.description, v),
            )
            .multi(dcterms::SUBJECT, "subject", STRING, |c| all(&c.subjects), |c, v| set_all(&mut c.subjects, v))
            .multi(
                dcterms::CREATOR,
                "creator",
                ValueKind::Uri,
                |c| all(&c.creators),
                |c, v| set_all(&mut c.creators, v),
            )
            .multi(
                dcterms::CONTRIBUTOR,
                "contributor",
                ValueKind::nested::<Person>(),
                |c| all(&c.contributors),
                |c, v| set_all(&mut c.contributors, v),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::CREATED, "created", DATE_TIME)
                    .read_only()
                    .accessors(|c| opt(&c.created), |c, v| set_opt(&mut c.created, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::MODIFIED, "modified", DATE_TIME)
                    .read_only()
                    .accessors(|c| opt(&c.modified), |c, v| set_opt(&mut c.modified, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(cm::CLOSE_DATE, "closeDate", DATE_TIME)
                    .read_only()
                    .accessors(|c| opt(&c.close_date), |c, v| set_opt(&mut c.close_date, v)),
            )
            .single(cm::STATUS, "status", STRING, |c| opt(&c.status), |c, v| set_opt(&mut c.status, v))
            .property(
                PropertyDescriptor::<Self>::single(cm::CLOSED, "closed", BOOLEAN)
                    .read_only()
                    .accessors(|c| opt(&c.closed), |c, v| set_opt(&mut c.closed, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(cm::IN_PROGRESS, "inProgress", BOOLEAN)
                    .read_only()
                    .accessors(|c| opt(&c.in_progress), |c, v| set_opt(&mut c.in_progress, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(cm::FIXED, "fixed", BOOLEAN)
                    .read_only()
                    .accessors(|c| opt(&c.fixed), |c, v| set_opt(&mut c.fixed, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(cm::APPROVED, "approved", BOOLEAN)
                    .read_only()
                    .accessors(|c| opt(&c.approved), |c, v| set_opt(&mut c.approved, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(cm::REVIEWED, "reviewed", BOOLEAN)
                    .read_only()
                    .accessors(|c| opt(&c.reviewed), |c, v| set_opt(&mut c.reviewed, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(cm::VERIFIED, "verified", BOOLEAN)
                    .read_only()
                    .accessors(|c| opt(&c.verified), |c, v| set_opt(&mut c.verified, v)),
            )
            .single(
                oslc::DISCUSSED_BY,
                "discussedBy",
                ValueKind::Uri,
                |c| opt(&c.discussed_by),
                |c, v| set_opt(&mut c.discussed_by, v),
            )
            .single(
                oslc::SERVICE_PROVIDER,
                "serviceProvider",
                ValueKind::Uri,
                |c| opt(&c.service_provider),
                |c, v| set_opt(&mut c.service_provider, v),
            )
            .single(
                oslc::INSTANCE_SHAPE,
                "instanceShape",
                ValueKind::Uri,
                |c| opt(&c.instance_shape),
                |c, v| set_opt(&mut c.instance_shape, v),
            )
            .multi(
                cm::RELATED_CHANGE_REQUEST,
                "relatedChangeRequest",
                ValueKind::reified::<Link>(),
                |c| all_reified(&c.related_change_requests),
                |c, v| set_all_reified(&mut c.related_change_requests, v),
            )
            .multi(
                cm::AFFECTS_REQUIREMENT,
                "affectsRequirement",
                ValueKind::reified::<Link>(),
                |c| all_reified(&c.affects_requirements),
                |c, v| set_all_reified(&mut c.affects_requirements, v),
            )
            .multi(
                cm::IMPLEMENTS_REQUIREMENT,
                "implementsRequirement",
                ValueKind::reified::<Link>(),
                |c| all_reified(&c.implements_requirements),
                |c, v| set_all_reified(&mut c.implements_requirements, v),
            )
            .multi(
                cm::TRACKS_REQUIREMENT,
                "tracksRequirement",
                ValueKind::reified::<Link>(),
                |c| all_reified(&c.tracks_requirements),
                |c, v| set_all_reified(&mut c.tracks_requirements, v),
            )
            .multi(
                cm::TESTED_BY_TEST_CASE,
                "testedByTestCase",
                ValueKind::reified::<Link>(),
                |c| all_reified(&c.tested_by_test_cases),
                |c, v| set_all_reified(&mut c.tested_by_test_cases, v),
            )
            .multi(
                cm::AFFECTS_TEST_RESULT,
                "affectsTestResult",
                ValueKind::reified::<Link>(),
                |c| all_reified(&c.affects_test_results),
                |c, v| set_all_reified(&mut c.affects_test_results, v),
            )
    }
}
