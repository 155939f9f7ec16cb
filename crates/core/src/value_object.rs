//! Value objects: equality by value, not identity.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use wkt::Wkt;

use crate::error::{DomainError, DomainResult};

/// Marker trait for value objects.
///
/// Value objects have no identity; two with the same attributes are equal.
/// Documents, in contrast, compare by their [`crate::BizId`] only.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

/// A spatial value held in Well-Known Text form (e.g. `POINT (153.02 -27.47)`).
///
/// The text must parse as WKT, including `Z`, `M` and `ZM` dimensions; it is
/// kept verbatim apart from surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Geometry(String);

impl Geometry {
    pub fn from_wkt(text: impl Into<String>) -> DomainResult<Self> {
        let text = text.into();
        let trimmed = text.trim();

        if let Err(err) = Wkt::<f64>::from_str(trimmed) {
            return Err(DomainError::validation(format!(
                "invalid geometry text {trimmed:?}: {err}"
            )));
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_wkt(&self) -> &str {
        &self.0
    }
}

impl ValueObject for Geometry {}

impl TryFrom<String> for Geometry {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_wkt(value)
    }
}

impl From<Geometry> for String {
    fn from(value: Geometry) -> Self {
        value.0
    }
}

impl core::fmt::Display for Geometry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
