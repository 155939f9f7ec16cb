//! Domain error model.

use thiserror::Error;

use crate::field::FieldKind;
use crate::id::DocumentKey;

/// Result type used across the document layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Document-level error raised by generic field access.
///
/// Keep this focused on deterministic failures of the document model itself.
/// Creation failures have their own type ([`CreationError`]) because they wrap
/// an arbitrary collaborator cause.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. unknown enumeration code).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The document declares no field with this name.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// The value's kind does not match the field's declared kind.
    #[error("type mismatch for field {field}: expected {expected:?}")]
    TypeMismatch { field: String, expected: FieldKind },

    /// A requested element was not found (e.g. collection index out of range).
    #[error("not found")]
    NotFound,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_field(field: impl Into<String>) -> Self {
        Self::UnknownField(field.into())
    }

    pub fn type_mismatch(field: impl Into<String>, expected: FieldKind) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

/// A factory could not produce a document instance.
///
/// This is the single typed creation error: whatever went wrong underneath
/// (unknown key, collaborator failure) is carried as the source. Panics are not
/// caught and propagate unchanged.
#[derive(Debug, Error)]
#[error("cannot create a new instance of {document}")]
pub struct CreationError {
    document: DocumentKey,
    #[source]
    source: anyhow::Error,
}

impl CreationError {
    pub fn new(document: DocumentKey, source: impl Into<anyhow::Error>) -> Self {
        Self {
            document,
            source: source.into(),
        }
    }

    pub fn unknown_document(document: DocumentKey) -> Self {
        let source = anyhow::anyhow!("document {document} is not registered");
        Self { document, source }
    }

    pub fn document(&self) -> &DocumentKey {
        &self.document
    }

    pub fn cause(&self) -> &anyhow::Error {
        &self.source
    }
}

/// A display-key template could not be rendered.
///
/// Never escapes [`crate::Document::biz_key`]; it is turned into the fallback
/// text there.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("binding {0} does not resolve")]
    UnknownBinding(String),

    #[error("binding {0} is null")]
    NullBinding(String),

    #[error("unterminated binding in template {0:?}")]
    Unterminated(String),
}
