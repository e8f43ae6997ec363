//! Vocabulary constants
//!
//! IRIs for the RDF machinery the mapping engine relies on (types, lists,
//! containers, reification) and for the OSLC domain vocabularies the bundled
//! resources use.

/// RDF vocabulary (http://www.w3.org/1999/02/22-rdf-syntax-ns#)
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const PREFIX: &str = "rdf";

    /// rdf:type
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:first (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";

    /// rdf:li (container membership, unnumbered)
    pub const LI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#li";

    pub const BAG: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Bag";
    pub const SEQ: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Seq";
    pub const ALT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Alt";

    pub const SUBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#subject";
    pub const PREDICATE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#predicate";
    pub const OBJECT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#object";
    pub const STATEMENT: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#Statement";

    /// rdf:XMLLiteral datatype
    pub const XML_LITERAL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#XMLLiteral";

    /// rdf:langString datatype
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// Index of a numbered container membership property (`rdf:_3` -> 3).
    pub fn membership_index(iri: &str) -> Option<usize> {
        iri.strip_prefix(NS)?
            .strip_prefix('_')?
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
    }
}

/// RDFS vocabulary (http://www.w3.org/2000/01/rdf-schema#)
pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
    pub const PREFIX: &str = "rdfs";

    /// rdfs:member
    pub const MEMBER: &str = "http://www.w3.org/2000/01/rdf-schema#member";
}

/// XSD datatypes
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const BYTE: &str = "http://www.w3.org/2001/XMLSchema#byte";
    pub const SHORT: &str = "http://www.w3.org/2001/XMLSchema#short";
    pub const INT: &str = "http://www.w3.org/2001/XMLSchema#int";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// OSLC core vocabulary
pub mod oslc {
    pub const NS: &str = "http://open-services.net/ns/core#";
    pub const PREFIX: &str = "oslc";

    pub const RESPONSE_INFO: &str = "http://open-services.net/ns/core#ResponseInfo";
    pub const TOTAL_COUNT: &str = "http://open-services.net/ns/core#totalCount";
    pub const NEXT_PAGE: &str = "http://open-services.net/ns/core#nextPage";
    pub const SERVICE_PROVIDER: &str = "http://open-services.net/ns/core#serviceProvider";
    pub const INSTANCE_SHAPE: &str = "http://open-services.net/ns/core#instanceShape";
    pub const SHORT_TITLE: &str = "http://open-services.net/ns/core#shortTitle";
    pub const DISCUSSED_BY: &str = "http://open-services.net/ns/core#discussedBy";
}

/// Dublin Core terms
pub mod dcterms {
    pub const NS: &str = "http://purl.org/dc/terms/";
    pub const PREFIX: &str = "dcterms";

    pub const TITLE: &str = "http://purl.org/dc/terms/title";
    pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
    pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
    pub const CREATED: &str = "http://purl.org/dc/terms/created";
    pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
    pub const CREATOR: &str = "http://purl.org/dc/terms/creator";
    pub const CONTRIBUTOR: &str = "http://purl.org/dc/terms/contributor";
    pub const SUBJECT: &str = "http://purl.org/dc/terms/subject";
    pub const TYPE: &str = "http://purl.org/dc/terms/type";
}

/// FOAF
pub mod foaf {
    pub const NS: &str = "http://xmlns.com/foaf/0.1/";
    pub const PREFIX: &str = "foaf";

    pub const PERSON: &str = "Person";

    pub const NAME: &str = "http://xmlns.com/foaf/0.1/name";
    pub const GIVEN_NAME: &str = "http://xmlns.com/foaf/0.1/givenName";
    pub const FAMILY_NAME: &str = "http://xmlns.com/foaf/0.1/familyName";
    pub const NICK: &str = "http://xmlns.com/foaf/0.1/nick";
    pub const MBOX: &str = "http://xmlns.com/foaf/0.1/mbox";
    pub const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
}

/// OSLC Requirements Management
pub mod rm {
    pub const NS: &str = "http://open-services.net/ns/rm#";
    pub const PREFIX: &str = "oslc_rm";

    pub const REQUIREMENT: &str = "Requirement";
    pub const REQUIREMENT_COLLECTION: &str = "RequirementCollection";

    pub const ELABORATED_BY: &str = "http://open-services.net/ns/rm#elaboratedBy";
    pub const SPECIFIED_BY: &str = "http://open-services.net/ns/rm#specifiedBy";
    pub const AFFECTED_BY: &str = "http://open-services.net/ns/rm#affectedBy";
    pub const TRACKED_BY: &str = "http://open-services.net/ns/rm#trackedBy";
    pub const IMPLEMENTED_BY: &str = "http://open-services.net/ns/rm#implementedBy";
    pub const VALIDATED_BY: &str = "http://open-services.net/ns/rm#validatedBy";
    pub const SATISFIED_BY: &str = "http://open-services.net/ns/rm#satisfiedBy";
    pub const DECOMPOSED_BY: &str = "http://open-services.net/ns/rm#decomposedBy";
    pub const CONSTRAINED_BY: &str = "http://open-services.net/ns/rm#constrainedBy";
    pub const USES: &str = "http://open-services.net/ns/rm#uses";
}

/// OSLC Change Management
pub mod cm {
    pub const NS: &str = "http://open-services.net/ns/cm#";
    pub const PREFIX: &str = "oslc_cm";

    pub const CHANGE_REQUEST: &str = "ChangeRequest";

    pub const STATUS: &str = "http://open-services.net/ns/cm#status";
    pub const CLOSED: &str = "http://open-services.net/ns/cm#closed";
    pub const IN_PROGRESS: &str = "http://open-services.net/ns/cm#inProgress";
    pub const FIXED: &str = "http://open-services.net/ns/cm#fixed";
    pub const APPROVED: &str = "http://open-services.net/ns/cm#approved";
    pub const REVIEWED: &str = "http://open-services.net/ns/cm#reviewed";
    pub const VERIFIED: &str = "http://open-services.net/ns/cm#verified";
    pub const CLOSE_DATE: &str = "http://open-services.net/ns/cm#closeDate";
    pub const RELATED_CHANGE_REQUEST: &str = "http://open-services.net/ns/cm#relatedChangeRequest";
    pub const AFFECTS_REQUIREMENT: &str = "http://open-services.net/ns/cm#affectsRequirement";
    pub const IMPLEMENTS_REQUIREMENT: &str = "http://open-services.net/ns/cm#implementsRequirement";
    pub const TRACKS_REQUIREMENT: &str = "http://open-services.net/ns/cm#tracksRequirement";
    pub const TESTED_BY_TEST_CASE: &str = "http://open-services.net/ns/cm#testedByTestCase";
    pub const AFFECTS_TEST_RESULT: &str = "http://open-services.net/ns/cm#affectsTestResult";
}

/// OSLC Quality Management
pub mod qm {
    pub const NS: &str = "http://open-services.net/ns/qm#";
    pub const PREFIX: &str = "oslc_qm";

    pub const TEST_CASE: &str = "TestCase";
    pub const TEST_RESULT: &str = "TestResult";

    pub const STATUS: &str = "http://open-services.net/ns/qm#status";
    pub const VALIDATES_REQUIREMENT: &str = "http://open-services.net/ns/qm#validatesRequirement";
    pub const TESTS_CHANGE_REQUEST: &str = "http://open-services.net/ns/qm#testsChangeRequest";
    pub const RELATED_CHANGE_REQUEST: &str = "http://open-services.net/ns/qm#relatedChangeRequest";
    pub const REPORTS_ON_TEST_CASE: &str = "http://open-services.net/ns/qm#reportsOnTestCase";
    pub const AFFECTED_BY_CHANGE_REQUEST: &str = "http://open-services.net/ns/qm#affectedByChangeRequest";
}
