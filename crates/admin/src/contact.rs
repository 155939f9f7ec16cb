use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, ChangeTracker, CreationError, Document, DocumentFactory, DomainError,
    DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, identity_eq,
};

pub const NAME: &str = "name";
pub const EMAIL: &str = "email";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(NAME, FieldKind::Text),
    FieldDescriptor::new(EMAIL, FieldKind::Text),
];

/// Contact details of a user (`admin.Contact`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(flatten)]
    bean: Bean,
    name: Option<String>,
    email: Option<String>,
}

impl Contact {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.preset(NAME, name.clone());
        self.name = name;
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.preset(EMAIL, email.clone());
        self.email = email;
    }
}

identity_eq!(Contact);

impl Bindable for Contact {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            NAME => self.name.clone().into(),
            EMAIL => self.email.clone().into(),
            _ => return None,
        })
    }
}

impl Document for Contact {
    const MODULE_NAME: &'static str = "admin";
    const DOCUMENT_NAME: &'static str = "Contact";
    const BIZ_KEY_TEMPLATE: &'static str = "{name}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            NAME => self.set_name(value.into_text(field)?),
            EMAIL => self.set_email(value.into_text(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for Contact {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            name: None,
            email: None,
        }
    }
}
