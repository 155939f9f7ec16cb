//! Document identity: business identifiers and (module, document) keys.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Process-unique identifier of a document instance (the "bizId").
///
/// Opaque string. Assigned once when the instance is created and never
/// reassigned; equality of documents is defined by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BizId(String);

impl BizId {
    /// Generate a fresh identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer [`BizId::from`] with fixed values in
    /// tests for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BizId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for BizId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for BizId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for BizId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<Uuid> for BizId {
    fn from(value: Uuid) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for BizId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Key a factory uses to produce a document: `(module, document)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentKey {
    module: Cow<'static, str>,
    document: Cow<'static, str>,
}

impl DocumentKey {
    pub fn new(
        module: impl Into<Cow<'static, str>>,
        document: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            module: module.into(),
            document: document.into(),
        }
    }

    /// Key built from static names; usable in `const` position.
    pub const fn of(module: &'static str, document: &'static str) -> Self {
        Self {
            module: Cow::Borrowed(module),
            document: Cow::Borrowed(document),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn document(&self) -> &str {
        &self.document
    }
}

impl core::fmt::Display for DocumentKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.module, self.document)
    }
}
