//! Shared, non-owning references between documents.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::entity::Document;
use crate::field::FieldValue;
use crate::id::BizId;

/// A document reachable from several owners (e.g. one `User` referenced by
/// many interactions).
///
/// Single-threaded by construction; identity is the allocation, so two
/// `Shared` handles are "the same object" iff [`Shared::ptr_eq`] holds.
/// Serializes as the referenced document itself.
#[derive(Debug, Default)]
pub struct Shared<T>(Rc<RefCell<T>>);

impl<T> Shared<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.0, &b.0)
    }

    /// Identity comparison of two optional references (`None` equals `None`).
    pub fn same(a: Option<&Self>, b: Option<&Self>) -> bool {
        match (a, b) {
            (Some(a), Some(b)) => Self::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: Document> Shared<T> {
    /// Identifier of the referenced document.
    pub fn biz_id(&self) -> BizId {
        self.0.borrow().biz_id().clone()
    }
}

impl<T: Document> From<Option<&Shared<T>>> for FieldValue {
    fn from(value: Option<&Shared<T>>) -> Self {
        value.map_or(FieldValue::Null, |r| FieldValue::Reference(r.biz_id()))
    }
}

impl<T> Clone for Shared<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T> From<T> for Shared<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Serialize> Serialize for Shared<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.borrow().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Shared<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        T::deserialize(deserializer).map(Self::new)
    }
}
