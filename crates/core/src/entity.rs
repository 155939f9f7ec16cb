//! Documents: identity-keyed business records with a declared field table.

use crate::binder::{Bindable, UNKNOWN, format_message};
use crate::change::Bean;
use crate::error::{DomainError, DomainResult};
use crate::field::{FieldDescriptor, FieldValue, find_descriptor};
use crate::id::{BizId, DocumentKey};

/// A persistent business document.
///
/// Implementors embed a [`Bean`] and declare their fields once in a static
/// table. Equality is by [`BizId`] only (see [`identity_eq!`]).
///
/// [`identity_eq!`]: crate::identity_eq
pub trait Document: Bindable + Sized + 'static {
    const MODULE_NAME: &'static str;
    const DOCUMENT_NAME: &'static str;

    /// Display-key template, e.g. `"{firstName} {lastName}"`.
    const BIZ_KEY_TEMPLATE: &'static str;

    fn key() -> DocumentKey {
        DocumentKey::of(Self::MODULE_NAME, Self::DOCUMENT_NAME)
    }

    fn fields() -> &'static [FieldDescriptor];

    fn descriptor(name: &str) -> Option<&'static FieldDescriptor> {
        find_descriptor(Self::fields(), name)
    }

    fn bean(&self) -> &Bean;

    fn biz_id(&self) -> &BizId {
        self.bean().biz_id()
    }

    /// Human-readable summary rendered from [`Document::BIZ_KEY_TEMPLATE`].
    ///
    /// Never fails: an unrenderable template yields `"Unknown"`.
    fn biz_key(&self) -> String {
        format_message(Self::BIZ_KEY_TEMPLATE, self).unwrap_or_else(|err| {
            tracing::debug!(
                document = %Self::key(),
                biz_id = %self.biz_id(),
                %err,
                "display key fallback"
            );
            UNKNOWN.to_owned()
        })
    }

    /// Current value of a declared field.
    fn get(&self, field: &str) -> DomainResult<FieldValue> {
        self.binding(field)
            .ok_or_else(|| DomainError::unknown_field(format!("{}.{field}", Self::key())))
    }

    /// Assign a declared field with the same contract as its typed mutator.
    ///
    /// References and collections are only mutable through typed operations.
    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()>;

    /// Report a tracked mutation of `field` before it is applied.
    fn preset(&self, field: &'static str, value: impl Into<FieldValue>) {
        self.bean().preset(Self::key(), field, value.into());
    }
}

/// Documents a factory can produce from a fresh [`Bean`].
pub trait Instantiate: Document {
    /// An empty-state instance owning `bean`.
    fn instantiate(bean: Bean) -> Self;
}

/// The current user, as seen by documents evaluating conditions.
pub trait UserContext {
    fn user_name(&self) -> &str;

    fn is_user_in_role(&self, module: &str, role: &str) -> bool;
}

/// Named boolean conditions consumed by view layers.
///
/// Each condition `xxx` comes with an independently named negation `notXxx`.
pub trait Conditional {
    /// Declared condition names, negations included.
    fn conditions() -> &'static [&'static str];

    /// Evaluate a condition by name; `None` if undeclared.
    fn condition(&self, name: &str, user: &dyn UserContext) -> Option<bool>;
}

/// Error for generic `set` on a field only mutable through typed operations.
pub fn typed_only(document: &DocumentKey, field: &str) -> DomainError {
    DomainError::validation(format!(
        "{document}.{field} can only be assigned through its typed mutator"
    ))
}

/// Implement `PartialEq`, `Eq` and `Hash` on a document by its `BizId`.
#[macro_export]
macro_rules! identity_eq {
    ($t:ty) => {
        impl ::core::cmp::PartialEq for $t {
            fn eq(&self, other: &Self) -> bool {
                $crate::Document::biz_id(self) == $crate::Document::biz_id(other)
            }
        }

        impl ::core::cmp::Eq for $t {}

        impl ::core::hash::Hash for $t {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash($crate::Document::biz_id(self), state);
            }
        }
    };
}
