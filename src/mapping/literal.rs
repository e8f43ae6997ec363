//! Literal value conversion
//!
//! Primitive values to and from RDF literal lexical forms. Numbers use the
//! invariant XSD lexical space, date-times are normalized to UTC, and
//! XML literals are carried verbatim.

use crate::error::{MappingError, MappingResult};
use crate::rdf::{Literal, NamedNode};
use crate::vocab::{rdf, xsd};
use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use num_bigint::BigInt;
use std::fmt;
use std::str::FromStr;

/// Raw XML markup stored as an `rdf:XMLLiteral`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct XmlLiteral(pub String);

impl XmlLiteral {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Primitive literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    String(String),
    Boolean(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    BigInteger(BigInt),
    Float(f32),
    Double(f64),
    Decimal(BigDecimal),
    DateTime(DateTime<Utc>),
    XmlLiteral(String),
    /// Literal with a datatype this crate does not interpret
    Typed { lexical: String, datatype: String },
    /// Language-tagged string
    LangString { value: String, language: String },
}

/// Target primitive of a literal property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    BigInteger,
    Float,
    Double,
    Decimal,
    DateTime,
    XmlLiteral,
}

impl PrimitiveKind {
    /// XSD (or RDF) datatype written for this kind
    pub fn datatype(&self) -> &'static str {
        match self {
            PrimitiveKind::String => xsd::STRING,
            PrimitiveKind::Boolean => xsd::BOOLEAN,
            PrimitiveKind::Byte => xsd::BYTE,
            PrimitiveKind::Short => xsd::SHORT,
            PrimitiveKind::Int => xsd::INT,
            PrimitiveKind::Long => xsd::LONG,
            PrimitiveKind::BigInteger => xsd::INTEGER,
            PrimitiveKind::Float => xsd::FLOAT,
            PrimitiveKind::Double => xsd::DOUBLE,
            PrimitiveKind::Decimal => xsd::DECIMAL,
            PrimitiveKind::DateTime => xsd::DATE_TIME,
            PrimitiveKind::XmlLiteral => rdf::XML_LITERAL,
        }
    }

    /// Kind denoted by a datatype IRI
    pub fn from_datatype(datatype: &str) -> Option<Self> {
        Some(match datatype {
            xsd::STRING => PrimitiveKind::String,
            xsd::BOOLEAN => PrimitiveKind::Boolean,
            xsd::BYTE => PrimitiveKind::Byte,
            xsd::SHORT => PrimitiveKind::Short,
            xsd::INT => PrimitiveKind::Int,
            xsd::LONG => PrimitiveKind::Long,
            xsd::INTEGER => PrimitiveKind::BigInteger,
            xsd::FLOAT => PrimitiveKind::Float,
            xsd::DOUBLE => PrimitiveKind::Double,
            xsd::DECIMAL => PrimitiveKind::Decimal,
            xsd::DATE_TIME => PrimitiveKind::DateTime,
            rdf::XML_LITERAL => PrimitiveKind::XmlLiteral,
            _ => return None,
        })
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PrimitiveKind::String => "string",
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::BigInteger => "integer",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Decimal => "decimal",
            PrimitiveKind::DateTime => "dateTime",
            PrimitiveKind::XmlLiteral => "XMLLiteral",
        };
        f.write_str(name)
    }
}

impl Primitive {
    /// Lexical form as written into the graph
    pub fn lexical(&self) -> String {
        match self {
            Primitive::String(s) | Primitive::XmlLiteral(s) => s.clone(),
            Primitive::Boolean(b) => b.to_string(),
            Primitive::Byte(n) => n.to_string(),
            Primitive::Short(n) => n.to_string(),
            Primitive::Int(n) => n.to_string(),
            Primitive::Long(n) => n.to_string(),
            Primitive::BigInteger(n) => n.to_string(),
            Primitive::Float(n) => float_lexical(f64::from(*n), n.to_string()),
            Primitive::Double(n) => float_lexical(*n, n.to_string()),
            // xsd:decimal has no exponent form
            Primitive::Decimal(n) => n.to_plain_string(),
            Primitive::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Primitive::Typed { lexical, .. } => lexical.clone(),
            Primitive::LangString { value, .. } => value.clone(),
        }
    }
}

fn float_lexical(value: f64, display: String) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() && value > 0.0 {
        "INF".to_string()
    } else if value.is_infinite() {
        "-INF".to_string()
    } else {
        display
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::LangString { value, language } => write!(f, "\"{}\"@{}", value, language),
            Primitive::Typed { lexical, datatype } => write!(f, "\"{}\"^^<{}>", lexical, datatype),
            other => write!(f, "\"{}\"", other.lexical()),
        }
    }
}

/// Encode a primitive as an RDF literal
pub fn encode(value: &Primitive) -> MappingResult<Literal> {
    let datatype = match value {
        Primitive::String(s) => return Ok(Literal::new_simple_literal(s.as_str())),
        Primitive::LangString { value, language } => {
            return Literal::new_language_tagged_literal(value.as_str(), language.as_str())
                .map_err(|_| MappingError::unsupported(format!("language tag '{}'", language), "rdf:langString"));
        }
        Primitive::Typed { datatype, .. } => NamedNode::new(datatype)
            .map_err(|_| MappingError::unsupported(format!("datatype '{}'", datatype), "literal"))?,
        Primitive::Boolean(_) => NamedNode::new_unchecked(xsd::BOOLEAN),
        Primitive::Byte(_) => NamedNode::new_unchecked(xsd::BYTE),
        Primitive::Short(_) => NamedNode::new_unchecked(xsd::SHORT),
        Primitive::Int(_) => NamedNode::new_unchecked(xsd::INT),
        Primitive::Long(_) => NamedNode::new_unchecked(xsd::LONG),
        Primitive::BigInteger(_) => NamedNode::new_unchecked(xsd::INTEGER),
        Primitive::Float(_) => NamedNode::new_unchecked(xsd::FLOAT),
        Primitive::Double(_) => NamedNode::new_unchecked(xsd::DOUBLE),
        Primitive::Decimal(_) => NamedNode::new_unchecked(xsd::DECIMAL),
        Primitive::DateTime(_) => NamedNode::new_unchecked(xsd::DATE_TIME),
        Primitive::XmlLiteral(_) => NamedNode::new_unchecked(rdf::XML_LITERAL),
    };

    Ok(Literal::new_typed_literal(value.lexical(), datatype))
}

/// Decode a literal as the given primitive kind
pub fn decode(literal: &Literal, kind: PrimitiveKind) -> MappingResult<Primitive> {
    let lexical = literal.value();
    let trimmed = lexical.trim();
    let fail = || MappingError::format(lexical, kind.to_string());

    Ok(match kind {
        PrimitiveKind::String => Primitive::String(lexical.to_string()),
        PrimitiveKind::XmlLiteral => Primitive::XmlLiteral(lexical.to_string()),
        PrimitiveKind::Boolean => match trimmed {
            "true" | "1" => Primitive::Boolean(true),
            "false" | "0" => Primitive::Boolean(false),
            _ => return Err(fail()),
        },
        PrimitiveKind::Byte => Primitive::Byte(trimmed.parse().map_err(|_| fail())?),
        PrimitiveKind::Short => Primitive::Short(trimmed.parse().map_err(|_| fail())?),
        PrimitiveKind::Int => Primitive::Int(trimmed.parse().map_err(|_| fail())?),
        PrimitiveKind::Long => Primitive::Long(trimmed.parse().map_err(|_| fail())?),
        PrimitiveKind::BigInteger => {
            Primitive::BigInteger(BigInt::from_str(trimmed.trim_start_matches('+')).map_err(|_| fail())?)
        }
        PrimitiveKind::Float => Primitive::Float(parse_float(trimmed).ok_or_else(fail)? as f32),
        PrimitiveKind::Double => Primitive::Double(parse_float(trimmed).ok_or_else(fail)?),
        PrimitiveKind::Decimal => Primitive::Decimal(BigDecimal::from_str(trimmed).map_err(|_| fail())?),
        PrimitiveKind::DateTime => Primitive::DateTime(parse_date_time(trimmed).ok_or_else(fail)?),
    })
}

fn parse_float(lexical: &str) -> Option<f64> {
    match lexical {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        // Rust accepts "inf"/"infinity"/"nan", XSD does not
        s if s.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => None,
        s => s.parse().ok(),
    }
}

/// ISO-8601 date-time, converted to UTC.
///
/// A value without an offset is taken as UTC; a bare date is midnight UTC.
fn parse_date_time(lexical: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(lexical) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(lexical, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    let date = NaiveDate::parse_from_str(lexical, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Decode a literal by its own datatype.
///
/// Used where no descriptor names a target kind. Unknown datatypes, and
/// known ones whose lexical form does not parse, are kept as `Typed` so they
/// re-encode to the same literal.
pub fn infer(literal: &Literal) -> Primitive {
    if let Some(language) = literal.language() {
        return Primitive::LangString {
            value: literal.value().to_string(),
            language: language.to_string(),
        };
    }

    PrimitiveKind::from_datatype(literal.datatype())
        .and_then(|kind| decode(literal, kind).ok())
        .unwrap_or_else(|| Primitive::Typed {
            lexical: literal.value().to_string(),
            datatype: literal.datatype().to_string(),
        })
}
