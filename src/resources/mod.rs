//! OSLC domain resources
//!
//! Schema tables for the resources a lifecycle client exchanges:
//! - `Requirement` and `RequirementCollection` (RM)
//! - `ChangeRequest` (CM)
//! - `TestCase` and `TestResult` (QM)
//! - `Person` (FOAF)
//! - `Link`, a reified reference with an optional label
//! - `AnyResource`, the untyped node unmapped values decode into

mod any;
mod change_request;
mod link;
mod person;
mod quality;
mod requirement;

pub use any::AnyResource;
pub use change_request::ChangeRequest;
pub use link::Link;
pub use person::Person;
pub use quality::{TestCase, TestResult};
pub use requirement::{Requirement, RequirementCollection};

use crate::mapping::{PrimitiveKind, ValueKind};

const STRING: ValueKind = ValueKind::Literal(PrimitiveKind::String);
const XML_LITERAL: ValueKind = ValueKind::Literal(PrimitiveKind::XmlLiteral);
const BOOLEAN: ValueKind = ValueKind::Literal(PrimitiveKind::Boolean);
const DATE_TIME: ValueKind = ValueKind::Literal(PrimitiveKind::DateTime);
