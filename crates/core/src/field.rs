//! Field descriptor tables and dynamically typed field values.
//!
//! Every document declares its fields once, as a static table of
//! [`FieldDescriptor`]s. Generic access (`Document::get` / `Document::set`),
//! change tracking and the serialization partition are all driven by that
//! table instead of per-field reflection.

use chrono::{NaiveDate, NaiveDateTime};

use crate::enumeration::Enumeration;
use crate::error::{DomainError, DomainResult};
use crate::id::BizId;
use crate::value_object::Geometry;

/// Declared type of a field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Integer,
    Long,
    Enum,
    Date,
    DateTime,
    Geometry,
    /// Non-owning association to another document.
    Reference,
    /// Owned, ordered collection of child documents.
    Collection,
}

/// One row of a document's field table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Mutations are reported to the change tracker.
    pub tracked: bool,
    /// Included in the external structured representation.
    pub serialized: bool,
}

impl FieldDescriptor {
    /// A tracked, serialized business field.
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            tracked: true,
            serialized: true,
        }
    }

    pub const fn untracked(self) -> Self {
        Self {
            tracked: false,
            ..self
        }
    }

    pub const fn excluded(self) -> Self {
        Self {
            serialized: false,
            ..self
        }
    }

    /// UI-state field: neither tracked nor serialized.
    pub const fn transient(name: &'static str, kind: FieldKind) -> Self {
        Self::new(name, kind).untracked().excluded()
    }
}

/// Look up a descriptor by declared name.
pub fn find_descriptor(
    fields: &'static [FieldDescriptor],
    name: &str,
) -> Option<&'static FieldDescriptor> {
    fields.iter().find(|d| d.name == name)
}

/// Current (or new) value of a field, independent of the owning document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i32),
    Long(i64),
    /// Enumeration value, held by its code.
    Enum(&'static str),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Geometry(Geometry),
    /// Identifier of the referenced document.
    Reference(BizId),
    /// Identifiers of the collection's elements, in order.
    Collection(Vec<BizId>),
}

impl FieldValue {
    /// Value of an optional enumerated field.
    pub fn from_enum<E: Enumeration>(value: Option<E>) -> Self {
        value.map_or(FieldValue::Null, |v| FieldValue::Enum(v.code()))
    }

    pub fn into_text(self, field: &str) -> DomainResult<Option<String>> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Text(s) => Ok(Some(s)),
            _ => Err(DomainError::type_mismatch(field, FieldKind::Text)),
        }
    }

    pub fn into_integer(self, field: &str) -> DomainResult<Option<i32>> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Integer(n) => Ok(Some(n)),
            FieldValue::Long(n) => i32::try_from(n)
                .map(Some)
                .map_err(|_| DomainError::validation(format!("{field}: {n} is out of range"))),
            _ => Err(DomainError::type_mismatch(field, FieldKind::Integer)),
        }
    }

    pub fn into_long(self, field: &str) -> DomainResult<Option<i64>> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Long(n) => Ok(Some(n)),
            FieldValue::Integer(n) => Ok(Some(i64::from(n))),
            _ => Err(DomainError::type_mismatch(field, FieldKind::Long)),
        }
    }

    pub fn into_date(self, field: &str) -> DomainResult<Option<NaiveDate>> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Date(d) => Ok(Some(d)),
            _ => Err(DomainError::type_mismatch(field, FieldKind::Date)),
        }
    }

    pub fn into_date_time(self, field: &str) -> DomainResult<Option<NaiveDateTime>> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::DateTime(t) => Ok(Some(t)),
            _ => Err(DomainError::type_mismatch(field, FieldKind::DateTime)),
        }
    }

    pub fn into_geometry(self, field: &str) -> DomainResult<Option<Geometry>> {
        match self {
            FieldValue::Null => Ok(None),
            FieldValue::Geometry(g) => Ok(Some(g)),
            FieldValue::Text(wkt) => Geometry::from_wkt(wkt).map(Some),
            _ => Err(DomainError::type_mismatch(field, FieldKind::Geometry)),
        }
    }

    /// Resolve an enumeration value from its code (given as `Enum` or `Text`).
    ///
    /// An unknown code is a validation failure: enumerated fields only ever hold
    /// declared values.
    pub fn into_enum<E: Enumeration>(self, field: &str) -> DomainResult<Option<E>> {
        let code = match &self {
            FieldValue::Null => return Ok(None),
            FieldValue::Enum(code) => *code,
            FieldValue::Text(code) => code.as_str(),
            _ => return Err(DomainError::type_mismatch(field, FieldKind::Enum)),
        };
        E::from_code(code)
            .map(Some)
            .ok_or_else(|| DomainError::validation(format!("{field}: unknown code {code:?}")))
    }
}

impl core::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Integer(n) => write!(f, "{n}"),
            FieldValue::Long(n) => write!(f, "{n}"),
            FieldValue::Enum(code) => f.write_str(code),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::DateTime(t) => write!(f, "{}", t.format("%Y-%m-%dT%H:%M:%S")),
            FieldValue::Geometry(g) => f.write_str(g.as_wkt()),
            FieldValue::Reference(id) => f.write_str(id.as_str()),
            FieldValue::Collection(ids) => {
                for (i, id) in ids.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(id.as_str())?;
                }
                Ok(())
            }
        }
    }
}

macro_rules! impl_from_optional {
    ($t:ty, $variant:ident) => {
        impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                FieldValue::$variant(value)
            }
        }

        impl From<Option<$t>> for FieldValue {
            fn from(value: Option<$t>) -> Self {
                value.map_or(FieldValue::Null, FieldValue::$variant)
            }
        }
    };
}

impl_from_optional!(String, Text);
impl_from_optional!(i32, Integer);
impl_from_optional!(i64, Long);
impl_from_optional!(NaiveDate, Date);
impl_from_optional!(NaiveDateTime, DateTime);
impl_from_optional!(Geometry, Geometry);
impl_from_optional!(BizId, Reference);

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}
