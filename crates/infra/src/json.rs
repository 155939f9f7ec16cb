//! JSON representation of documents.
//!
//! Documents serialize every field their table marks `serialized` (under its
//! declared name) plus `bizId`. Documents read back report to a no-op tracker.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use bizdoc_core::{Document, DocumentKey};

#[derive(Debug, Error)]
#[error("{document}: {source}")]
pub struct JsonError {
    document: DocumentKey,
    #[source]
    source: serde_json::Error,
}

impl JsonError {
    pub fn document(&self) -> &DocumentKey {
        &self.document
    }
}

pub fn to_json<T: Document + Serialize>(document: &T) -> Result<String, JsonError> {
    serde_json::to_string(document).map_err(|source| JsonError {
        document: T::key(),
        source,
    })
}

pub fn from_json<T: Document + DeserializeOwned>(json: &str) -> Result<T, JsonError> {
    let document: T = serde_json::from_str(json).map_err(|source| {
        tracing::warn!(document = %T::key(), error = %source, "cannot read document");
        JsonError {
            document: T::key(),
            source,
        }
    })?;
    tracing::trace!(document = %T::key(), biz_id = %document.biz_id(), "read document");
    Ok(document)
}

/// Names present in `T`'s JSON form, `bizId` excluded.
pub fn serialized_field_names<T: Document>() -> Vec<&'static str> {
    T::fields()
        .iter()
        .filter(|d| d.serialized)
        .map(|d| d.name)
        .collect()
}
