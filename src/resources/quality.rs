use super::{Link, DATE_TIME, STRING, XML_LITERAL};
use crate::mapping::{
    all, all_reified, opt, opt_reified, set_all, set_all_reified, set_opt, set_opt_reified, ExtendedProperties,
    PropertyDescriptor, Resource, ResourceSchema, Uri, ValueKind, XmlLiteral,
};
use crate::vocab::{dcterms, oslc, qm};
use chrono::{DateTime, Utc};

/// `oslc_qm:TestCase`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCase {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,

    pub identifier: Option<String>,
    pub title: Option<String>,
    pub description: Option<XmlLiteral>,
    pub subjects: Vec<String>,
    pub creators: Vec<Uri>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub service_provider: Option<Uri>,

    pub validates_requirements: Vec<Link>,
    pub tests_change_requests: Vec<Link>,
    pub related_change_requests: Vec<Link>,
}

impl Resource for TestCase {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(qm::NS, qm::TEST_CASE)
            .prefix(qm::PREFIX, qm::NS)
            .prefix(dcterms::PREFIX, dcterms::NS)
            .identity(|t| t.about.as_ref(), |t, uri| t.about = Some(uri))
            .types(|t| t.types.as_slice(), |t| &mut t.types)
            .extended(|t| &t.extended, |t| &mut t.extended)
            .single(
                dcterms::IDENTIFIER,
                "identifier",
                STRING,
                |t| opt(&t.identifier),
                |t, v| set_opt(&mut t.identifier, v),
            )
            .single(dcterms::TITLE, "title", STRING, |t| opt(&t.title), |t, v| set_opt(&mut t.title, v))
            .single(
                dcterms::DESCRIPTION,
                "description",
                XML_LITERAL,
                |t| opt(&t.description),
                |t, v| set_opt(&mut t.description, v),
            )
            .multi(dcterms::SUBJECT, "subject", STRING, |t| all(&t.subjects), |t, v| set_all(&mut t.subjects, v))
            .multi(
                dcterms::CREATOR,
                "creator",
                ValueKind::Uri,
                |t| all(&t.creators),
                |t, v| set_all(&mut t.creators, v),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::CREATED, "created", DATE_TIME)
                    .read_only()
                    .accessors(|t| opt(&t.created), |t, v| set_opt(&mut t.created, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::MODIFIED, "modified", DATE_TIME)
                    .read_only()
                    .accessors(|t| opt(&t.modified), |t, v| set_opt(&mut t.modified, v)),
            )
            .single(
                oslc::SERVICE_PROVIDER,
                "serviceProvider",
                ValueKind::Uri,
                |t| opt(&t.service_provider),
                |t, v| set_opt(&mut t.service_provider, v),
            )
            .multi(
                qm::VALIDATES_REQUIREMENT,
                "validatesRequirement",
                ValueKind::reified::<Link>(),
                |t| all_reified(&t.validates_requirements),
                |t, v| set_all_reified(&mut t.validates_requirements, v),
            )
            .multi(
                qm::TESTS_CHANGE_REQUEST,
                "testsChangeRequest",
                ValueKind::reified::<Link>(),
                |t| all_reified(&t.tests_change_requests),
                |t, v| set_all_reified(&mut t.tests_change_requests, v),
            )
            .multi(
                qm::RELATED_CHANGE_REQUEST,
                "relatedChangeRequest",
                ValueKind::reified::<Link>(),
                |t| all_reified(&t.related_change_requests),
                |t, v| set_all_reified(&mut t.related_change_requests, v),
            )
    }
}

/// `oslc_qm:TestResult`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestResult {
    pub about: Option<Uri>,
    pub types: Vec<Uri>,
    pub extended: ExtendedProperties,

    pub identifier: Option<String>,
    pub title: Option<String>,
    pub status: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
    pub service_provider: Option<Uri>,

    pub reports_on_test_case: Option<Link>,
    pub affected_by_change_requests: Vec<Link>,
}

impl Resource for TestResult {
    fn schema() -> ResourceSchema<Self> {
        ResourceSchema::<Self>::new(qm::NS, qm::TEST_RESULT)
            .prefix(qm::PREFIX, qm::NS)
            .prefix(dcterms::PREFIX, dcterms::NS)
            .identity(|t| t.about.as_ref(), |t, uri| t.about = Some(uri))
            .types(|t| t.types.as_slice(), |t| &mut t.types)
            .extended(|t| &t.extended, |t| &mut t.extended)
            .single(
                dcterms::IDENTIFIER,
                "identifier",
                STRING,
                |t| opt(&t.identifier),
                |t, v| set_opt(&mut t.identifier, v),
            )
            .single(dcterms::TITLE, "title", STRING, |t| opt(&t.title), |t, v| set_opt(&mut t.title, v))
            .single(qm::STATUS, "status", STRING, |t| opt(&t.status), |t, v| set_opt(&mut t.status, v))
            .property(
                PropertyDescriptor::<Self>::single(dcterms::CREATED, "created", DATE_TIME)
                    .read_only()
                    .accessors(|t| opt(&t.created), |t, v| set_opt(&mut t.created, v)),
            )
            .property(
                PropertyDescriptor::<Self>::single(dcterms::MODIFIED, "modified", DATE_TIME)
                    .read_only()
                    .accessors(|t| opt(&t.modified), |t, v| set_opt(&mut t.modified, v)),
            )
            .single(
                oslc::SERVICE_PROVIDER,
                "serviceProvider",
                ValueKind::Uri,
                |t| opt(&t.service_provider),
                |t, v| set_opt(&mut t.service_provider, v),
            )
            .single(
                qm::REPORTS_ON_TEST_CASE,
                "reportsOnTestCase",
                ValueKind::reified::<Link>(),
                |t| opt_reified(&t.reports_on_test_case),
                |t, v| set_opt_reified(&mut t.reports_on_test_case, v),
            )
            .multi(
                qm::AFFECTED_BY_CHANGE_REQUEST,
                "affectedByChangeRequest",
                ValueKind::reified::<Link>(),
                |t| all_reified(&t.affected_by_change_requests),
                |t, v| set_all_reified(&mut t.affected_by_change_requests, v),
            )
    }
}
