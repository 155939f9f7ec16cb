use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, ChangeTracker, CreationError, Document, DocumentFactory, DomainError,
    DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, identity_eq,
};

use crate::interaction::InteractionType;

pub const ACCOUNT_NAME: &str = "accountName";
pub const INTERACTION_TYPE: &str = "interactionType";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(ACCOUNT_NAME, FieldKind::Text),
    FieldDescriptor::new(INTERACTION_TYPE, FieldKind::Enum),
];

/// A customer organisation (`customers.Account`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    #[serde(flatten)]
    bean: Bean,
    account_name: Option<String>,
    /// Kind of the interaction currently being logged against the account.
    interaction_type: Option<InteractionType>,
}

impl Account {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    pub fn account_name(&self) -> Option<&str> {
        self.account_name.as_deref()
    }

    pub fn set_account_name(&mut self, account_name: Option<String>) {
        self.preset(ACCOUNT_NAME, account_name.clone());
        self.account_name = account_name;
    }

    pub fn interaction_type(&self) -> Option<InteractionType> {
        self.interaction_type
    }

    pub fn set_interaction_type(&mut self, interaction_type: Option<InteractionType>) {
        self.preset(INTERACTION_TYPE, FieldValue::from_enum(interaction_type));
        self.interaction_type = interaction_type;
    }
}

identity_eq!(Account);

impl Bindable for Account {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            ACCOUNT_NAME => self.account_name.clone().into(),
            INTERACTION_TYPE => FieldValue::from_enum(self.interaction_type),
            _ => return None,
        })
    }
}

impl Document for Account {
    const MODULE_NAME: &'static str = "customers";
    const DOCUMENT_NAME: &'static str = "Account";
    const BIZ_KEY_TEMPLATE: &'static str = "{accountName}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            ACCOUNT_NAME => self.set_account_name(value.into_text(field)?),
            INTERACTION_TYPE => self.set_interaction_type(value.into_enum(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for Account {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            account_name: None,
            interaction_type: None,
        }
    }
}
