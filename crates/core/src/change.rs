//! Change-tracking seam.
//!
//! Documents never decide whether they are dirty. Each tracked mutation is
//! reported, synchronously and before the field is assigned, to an injected
//! [`ChangeTracker`]; what the tracker does with it is its own business.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::field::FieldValue;
use crate::id::{BizId, DocumentKey};

/// One field mutation as reported to a tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Change {
    pub document: DocumentKey,
    pub biz_id: BizId,
    /// Declared field name (e.g. `"firstName"`).
    pub field: &'static str,
    pub value: FieldValue,
}

/// Receives every tracked field mutation.
pub trait ChangeTracker: Send + Sync {
    fn record(&self, change: &Change);
}

/// Discards every change.
#[derive(Debug, Default, Copy, Clone)]
pub struct NoopTracker;

impl ChangeTracker for NoopTracker {
    fn record(&self, _change: &Change) {}
}

fn noop_tracker() -> Arc<dyn ChangeTracker> {
    Arc::new(NoopTracker)
}

/// Framework state embedded in every document: its identifier and the
/// tracker its mutations are reported to.
///
/// Serializes as `bizId` only; a deserialized bean reports to a
/// [`NoopTracker`] until re-created through a factory.
#[derive(Clone, Serialize, Deserialize)]
pub struct Bean {
    #[serde(rename = "bizId")]
    biz_id: BizId,
    #[serde(skip, default = "noop_tracker")]
    tracker: Arc<dyn ChangeTracker>,
}

impl Bean {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::with_id(BizId::new(), tracker)
    }

    pub fn with_id(biz_id: BizId, tracker: Arc<dyn ChangeTracker>) -> Self {
        Self { biz_id, tracker }
    }

    pub fn biz_id(&self) -> &BizId {
        &self.biz_id
    }

    pub fn tracker(&self) -> &Arc<dyn ChangeTracker> {
        &self.tracker
    }

    /// Report that `field` is about to take `value`.
    pub fn preset(&self, document: DocumentKey, field: &'static str, value: FieldValue) {
        tracing::trace!(%document, biz_id = %self.biz_id, field, "field change");
        self.tracker.record(&Change {
            document,
            biz_id: self.biz_id.clone(),
            field,
            value,
        });
    }

    /// Handle used by owned collections to report their own mutations.
    pub fn collection(&self, document: DocumentKey, field: &'static str) -> CollectionOwner<'_> {
        CollectionOwner {
            bean: self,
            document,
            field,
        }
    }
}

impl core::fmt::Debug for Bean {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Bean").field("biz_id", &self.biz_id).finish_non_exhaustive()
    }
}

/// The owning document of a collection, seen from the collection.
///
/// Borrowed for the duration of one mutation; collections never keep a
/// pointer to their owner.
#[derive(Debug)]
pub struct CollectionOwner<'a> {
    bean: &'a Bean,
    document: DocumentKey,
    field: &'static str,
}

impl CollectionOwner<'_> {
    /// Report that the collection is about to hold `ids`.
    pub fn preset(&self, ids: Vec<BizId>) {
        self.bean
            .preset(self.document.clone(), self.field, FieldValue::Collection(ids));
    }
}
