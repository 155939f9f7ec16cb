//! `bizdoc-core` — document model building blocks.
//!
//! This crate contains the **framework side** of the business documents:
//! identity, field tables, enumerations, change-tracking and factory seams,
//! display-key formatting. It performs no IO.

pub mod binder;
pub mod change;
pub mod entity;
pub mod enumeration;
pub mod error;
pub mod factory;
pub mod field;
pub mod i18n;
pub mod id;
pub mod shared;
pub mod value_object;

pub use binder::{Bindable, UNKNOWN, format_message, resolve_through};
pub use change::{Bean, Change, ChangeTracker, CollectionOwner, NoopTracker};
pub use entity::{Conditional, Document, Instantiate, UserContext, typed_only};
pub use enumeration::{DomainValue, DomainValues, Enumeration};
pub use error::{CreationError, DomainError, DomainResult, FormatError};
pub use factory::{DocumentFactory, new_instance};
pub use field::{FieldDescriptor, FieldKind, FieldValue};
pub use i18n::{IdentityTranslator, Translator};
pub use id::{BizId, DocumentKey};
pub use shared::Shared;
pub use value_object::{Geometry, ValueObject};

#[doc(hidden)]
pub mod __private {
    pub use serde;
}
