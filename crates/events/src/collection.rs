//! Owned, ordered, change-tracked child collections.

use serde::{Deserialize, Serialize};

use bizdoc_core::{BizId, CollectionOwner, Document, DomainError, DomainResult};

/// Ordered children exclusively owned by a parent document.
///
/// Order is significant; uniqueness is not enforced beyond what callers do
/// with identifiers. Every mutation is reported through the owner's
/// [`CollectionOwner`] handle *before* it is applied, carrying the element
/// ids the collection is about to hold. Lookups are linear scans.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChildList<T> {
    elements: Vec<T>,
}

impl<T> Default for ChildList<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T: Document> ChildList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// Element ids in order.
    pub fn ids(&self) -> Vec<BizId> {
        self.elements.iter().map(|e| e.biz_id().clone()).collect()
    }

    fn position(&self, biz_id: &BizId) -> Option<usize> {
        self.elements.iter().position(|e| e.biz_id() == biz_id)
    }

    pub fn get_by_id(&self, biz_id: &BizId) -> Option<&T> {
        self.elements.iter().find(|e| e.biz_id() == biz_id)
    }

    pub fn get_by_id_mut(&mut self, biz_id: &BizId) -> Option<&mut T> {
        self.elements.iter_mut().find(|e| e.biz_id() == biz_id)
    }

    /// Append at the end.
    pub fn push(&mut self, owner: &CollectionOwner<'_>, element: T) {
        let mut ids = self.ids();
        ids.push(element.biz_id().clone());
        owner.preset(ids);
        self.elements.push(element);
    }

    /// Insert at `index`, shifting later elements up. `index == len()` appends.
    pub fn insert(
        &mut self,
        owner: &CollectionOwner<'_>,
        index: usize,
        element: T,
    ) -> DomainResult<()> {
        if index > self.elements.len() {
            return Err(DomainError::not_found());
        }
        let mut ids = self.ids();
        ids.insert(index, element.biz_id().clone());
        owner.preset(ids);
        self.elements.insert(index, element);
        Ok(())
    }

    /// Remove and return the element at `index`; later elements shift down.
    pub fn remove(&mut self, owner: &CollectionOwner<'_>, index: usize) -> DomainResult<T> {
        if index >= self.elements.len() {
            return Err(DomainError::not_found());
        }
        let mut ids = self.ids();
        ids.remove(index);
        owner.preset(ids);
        Ok(self.elements.remove(index))
    }

    /// Remove the first element with `biz_id`. Nothing is reported on a miss.
    pub fn remove_by_id(&mut self, owner: &CollectionOwner<'_>, biz_id: &BizId) -> Option<T> {
        let index = self.position(biz_id)?;
        self.remove(owner, index).ok()
    }

    /// Replace the element sharing `element`'s id, returning the old one.
    /// Nothing is reported (or replaced) on a miss.
    pub fn replace_by_id(&mut self, owner: &CollectionOwner<'_>, element: T) -> Option<T> {
        let index = self.position(element.biz_id())?;
        owner.preset(self.ids());
        Some(core::mem::replace(&mut self.elements[index], element))
    }
}

impl<'a, T> IntoIterator for &'a ChildList<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
