use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use bizdoc_admin::User;
use bizdoc_core::{
    Bean, Bindable, ChangeTracker, CreationError, Document, DocumentFactory, DomainError,
    DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, Shared, domain_enum,
    identity_eq, resolve_through, typed_only,
};

pub const TITLE: &str = "title";
pub const USER: &str = "user";
pub const DESCRIPTION: &str = "description";
pub const TYPE: &str = "type";
pub const INTERACTION_TIME: &str = "interactionTime";
pub const DOCUMENT: &str = "document";
pub const INTERACTION_TEMPLATE: &str = "interactionTemplate";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(TITLE, FieldKind::Text),
    FieldDescriptor::new(USER, FieldKind::Reference),
    FieldDescriptor::new(DESCRIPTION, FieldKind::Text),
    FieldDescriptor::new(TYPE, FieldKind::Enum),
    FieldDescriptor::new(INTERACTION_TIME, FieldKind::DateTime),
    FieldDescriptor::new(DOCUMENT, FieldKind::Text),
    FieldDescriptor::new(INTERACTION_TEMPLATE, FieldKind::Text).untracked(),
];

domain_enum! {
    /// Kind of customer interaction.
    pub enum InteractionType {
        Email => ("Email", "Email"),
        Phone => ("Phone", "Phone"),
        Meeting => ("Meeting", "Meeting"),
        SocialMedia => ("Social Media", "Social Media"),
        Comment => ("Comment", "Comment"),
        Upload => ("Upload", "Upload"),
        Other => ("Other", "Other"),
    }
}

/// One logged touch-point with a customer (`customers.Interaction`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interaction {
    #[serde(flatten)]
    bean: Bean,
    title: Option<String>,
    user: Option<Shared<User>>,
    description: Option<String>,
    #[serde(rename = "type")]
    interaction_type: Option<InteractionType>,
    interaction_time: Option<NaiveDateTime>,
    document: Option<String>,
    /// Scratch text the UI composes new interactions from.
    interaction_template: Option<String>,
}

impl Interaction {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.preset(TITLE, title.clone());
        self.title = title;
    }

    /// The user who performed the interaction.
    pub fn user(&self) -> Option<&Shared<User>> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<Shared<User>>) {
        if !Shared::same(self.user.as_ref(), user.as_ref()) {
            self.preset(USER, user.as_ref());
            self.user = user;
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.preset(DESCRIPTION, description.clone());
        self.description = description;
    }

    pub fn interaction_type(&self) -> Option<InteractionType> {
        self.interaction_type
    }

    pub fn set_interaction_type(&mut self, interaction_type: Option<InteractionType>) {
        self.preset(TYPE, FieldValue::from_enum(interaction_type));
        self.interaction_type = interaction_type;
    }

    pub fn interaction_time(&self) -> Option<NaiveDateTime> {
        self.interaction_time
    }

    pub fn set_interaction_time(&mut self, interaction_time: Option<NaiveDateTime>) {
        self.preset(INTERACTION_TIME, interaction_time);
        self.interaction_time = interaction_time;
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn set_document(&mut self, document: Option<String>) {
        self.preset(DOCUMENT, document.clone());
        self.document = document;
    }

    pub fn interaction_template(&self) -> Option<&str> {
        self.interaction_template.as_deref()
    }

    pub fn set_interaction_template(&mut self, interaction_template: Option<String>) {
        self.interaction_template = interaction_template;
    }
}

identity_eq!(Interaction);

impl Bindable for Interaction {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            TITLE => self.title.clone().into(),
            USER => self.user.as_ref().into(),
            DESCRIPTION => self.description.clone().into(),
            TYPE => FieldValue::from_enum(self.interaction_type),
            INTERACTION_TIME => self.interaction_time.into(),
            DOCUMENT => self.document.clone().into(),
            INTERACTION_TEMPLATE => self.interaction_template.clone().into(),
            _ => return None,
        })
    }

    fn resolve_related(&self, field: &str, path: &str) -> Option<FieldValue> {
        match field {
            USER => resolve_through(self.user.as_ref(), path),
            _ => None,
        }
    }
}

impl Document for Interaction {
    const MODULE_NAME: &'static str = "customers";
    const DOCUMENT_NAME: &'static str = "Interaction";
    const BIZ_KEY_TEMPLATE: &'static str = "{title}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            TITLE => self.set_title(value.into_text(field)?),
            USER => return Err(typed_only(&Self::key(), field)),
            DESCRIPTION => self.set_description(value.into_text(field)?),
            TYPE => self.set_interaction_type(value.into_enum(field)?),
            INTERACTION_TIME => self.set_interaction_time(value.into_date_time(field)?),
            DOCUMENT => self.set_document(value.into_text(field)?),
            INTERACTION_TEMPLATE => self.set_interaction_template(value.into_text(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for Interaction {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            title: None,
            user: None,
            description: None,
            interaction_type: None,
            interaction_time: None,
            document: None,
            interaction_template: None,
        }
    }
}
