use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, ChangeTracker, CreationError, Document, DocumentFactory, DomainError,
    DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, Shared, UserContext,
    identity_eq, resolve_through, typed_only,
};

use crate::contact::Contact;
use crate::roles::Role;

pub const USER_NAME: &str = "userName";
pub const CONTACT: &str = "contact";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(USER_NAME, FieldKind::Text),
    FieldDescriptor::new(CONTACT, FieldKind::Reference),
];

/// A system user (`admin.User`).
///
/// Roles are security context supplied at runtime; they are neither tracked
/// nor serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(flatten)]
    bean: Bean,
    user_name: Option<String>,
    contact: Option<Shared<Contact>>,
    #[serde(skip)]
    roles: Vec<Role>,
}

impl User {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    pub fn set_user_name(&mut self, user_name: Option<String>) {
        self.preset(USER_NAME, user_name.clone());
        self.user_name = user_name;
    }

    pub fn contact(&self) -> Option<&Shared<Contact>> {
        self.contact.as_ref()
    }

    pub fn set_contact(&mut self, contact: Option<Shared<Contact>>) {
        if !Shared::same(self.contact.as_ref(), contact.as_ref()) {
            self.preset(CONTACT, contact.as_ref());
            self.contact = contact;
        }
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn grant_role(&mut self, role: Role) {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
    }

    pub fn revoke_role(&mut self, role: &Role) {
        self.roles.retain(|r| r != role);
    }
}

identity_eq!(User);

impl UserContext for User {
    fn user_name(&self) -> &str {
        self.user_name.as_deref().unwrap_or_default()
    }

    fn is_user_in_role(&self, module: &str, role: &str) -> bool {
        self.roles.iter().any(|r| r.matches(module, role))
    }
}

impl Bindable for User {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            USER_NAME => self.user_name.clone().into(),
            CONTACT => self.contact.as_ref().into(),
            _ => return None,
        })
    }

    fn resolve_related(&self, field: &str, path: &str) -> Option<FieldValue> {
        match field {
            CONTACT => resolve_through(self.contact.as_ref(), path),
            _ => None,
        }
    }
}

impl Document for User {
    const MODULE_NAME: &'static str = "admin";
    const DOCUMENT_NAME: &'static str = "User";
    const BIZ_KEY_TEMPLATE: &'static str = "{userName}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            USER_NAME => self.set_user_name(value.into_text(field)?),
            CONTACT => return Err(typed_only(&Self::key(), field)),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for User {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            user_name: None,
            contact: None,
            roles: Vec::new(),
        }
    }
}
