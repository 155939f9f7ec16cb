use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, BizId, ChangeTracker, Conditional, CreationError, Document, DocumentFactory,
    DomainError, DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, UserContext,
    domain_enum, identity_eq, typed_only,
};
use bizdoc_events::ChildList;

use crate::interaction::{Interaction, InteractionType};

pub const FIRST_NAME: &str = "firstName";
pub const LAST_NAME: &str = "lastName";
pub const JOB_TITLE: &str = "jobTitle";
pub const EMAIL: &str = "email";
pub const MOBILE_NUMBER: &str = "mobileNumber";
pub const BUSINESS_NUMBER: &str = "businessNumber";
pub const FAX: &str = "fax";
pub const METHOD: &str = "method";
pub const LINE1: &str = "line1";
pub const LINE2: &str = "line2";
pub const SUBURB: &str = "suburb";
pub const STATE: &str = "state";
pub const POST_CODE: &str = "postCode";
pub const INTERACTIONS: &str = "interactions";
pub const INTERACTION_DESCRIPTION: &str = "interactionDescription";
pub const INTERACTION_TYPE: &str = "interactionType";
pub const DOCUMENT: &str = "document";
pub const SELECTED_TAB: &str = "selectedTab";
pub const FLOWBAR: &str = "flowbar";

pub const UPLOAD_SELECTED: &str = "uploadSelected";
pub const NOT_UPLOAD_SELECTED: &str = "notUploadSelected";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(FIRST_NAME, FieldKind::Text),
    FieldDescriptor::new(LAST_NAME, FieldKind::Text),
    FieldDescriptor::new(JOB_TITLE, FieldKind::Text),
    FieldDescriptor::new(EMAIL, FieldKind::Text),
    FieldDescriptor::new(MOBILE_NUMBER, FieldKind::Text),
    FieldDescriptor::new(BUSINESS_NUMBER, FieldKind::Text),
    FieldDescriptor::new(FAX, FieldKind::Text),
    FieldDescriptor::new(METHOD, FieldKind::Enum),
    FieldDescriptor::new(LINE1, FieldKind::Text),
    FieldDescriptor::new(LINE2, FieldKind::Text),
    FieldDescriptor::new(SUBURB, FieldKind::Text),
    FieldDescriptor::new(STATE, FieldKind::Text),
    FieldDescriptor::new(POST_CODE, FieldKind::Text),
    FieldDescriptor::new(INTERACTIONS, FieldKind::Collection),
    FieldDescriptor::new(INTERACTION_DESCRIPTION, FieldKind::Text),
    FieldDescriptor::new(INTERACTION_TYPE, FieldKind::Enum),
    FieldDescriptor::new(DOCUMENT, FieldKind::Text),
    FieldDescriptor::transient(SELECTED_TAB, FieldKind::Integer),
    FieldDescriptor::transient(FLOWBAR, FieldKind::Text),
];

domain_enum! {
    /// Preferred way of reaching a contact.
    pub enum Method {
        Email => ("Email", "Email"),
        MobileNumber => ("Mobile Number", "Mobile Number"),
        BusinessNumber => ("Business Number", "Business Number"),
        Fax => ("Fax", "Fax"),
        Any => ("Any", "Any"),
    }
}

/// A customer contact and its interaction history (`customers.ContactDetail`).
///
/// The contact exclusively owns its [`Interaction`]s; they are serialized
/// inline and every collection mutation is reported against `interactions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetail {
    #[serde(flatten)]
    bean: Bean,
    first_name: Option<String>,
    last_name: Option<String>,
    job_title: Option<String>,
    email: Option<String>,
    mobile_number: Option<String>,
    business_number: Option<String>,
    fax: Option<String>,
    method: Option<Method>,
    line1: Option<String>,
    line2: Option<String>,
    suburb: Option<String>,
    state: Option<String>,
    post_code: Option<String>,
    #[serde(default)]
    interactions: ChildList<Interaction>,
    interaction_description: Option<String>,
    interaction_type: Option<InteractionType>,
    document: Option<String>,
    #[serde(skip)]
    selected_tab: Option<i32>,
    #[serde(skip)]
    flowbar: Option<String>,
}

macro_rules! text_field {
    ($get:ident, $set:ident, $name:ident) => {
        pub fn $get(&self) -> Option<&str> {
            self.$get.as_deref()
        }

        pub fn $set(&mut self, $get: Option<String>) {
            self.preset($name, $get.clone());
            self.$get = $get;
        }
    };
}

impl ContactDetail {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    text_field!(first_name, set_first_name, FIRST_NAME);
    text_field!(last_name, set_last_name, LAST_NAME);
    text_field!(job_title, set_job_title, JOB_TITLE);
    text_field!(email, set_email, EMAIL);
    text_field!(mobile_number, set_mobile_number, MOBILE_NUMBER);
    text_field!(business_number, set_business_number, BUSINESS_NUMBER);
    text_field!(fax, set_fax, FAX);
    text_field!(line1, set_line1, LINE1);
    text_field!(line2, set_line2, LINE2);
    text_field!(suburb, set_suburb, SUBURB);
    text_field!(state, set_state, STATE);
    text_field!(post_code, set_post_code, POST_CODE);
    text_field!(interaction_description, set_interaction_description, INTERACTION_DESCRIPTION);
    text_field!(document, set_document, DOCUMENT);

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn set_method(&mut self, method: Option<Method>) {
        self.preset(METHOD, FieldValue::from_enum(method));
        self.method = method;
    }

    pub fn interaction_type(&self) -> Option<InteractionType> {
        self.interaction_type
    }

    pub fn set_interaction_type(&mut self, interaction_type: Option<InteractionType>) {
        self.preset(INTERACTION_TYPE, FieldValue::from_enum(interaction_type));
        self.interaction_type = interaction_type;
    }

    pub fn interactions(&self) -> &ChildList<Interaction> {
        &self.interactions
    }

    pub fn interaction_by_id(&self, biz_id: &BizId) -> Option<&Interaction> {
        self.interactions.get_by_id(biz_id)
    }

    pub fn interaction_by_id_mut(&mut self, biz_id: &BizId) -> Option<&mut Interaction> {
        self.interactions.get_by_id_mut(biz_id)
    }

    pub fn add_interaction(&mut self, interaction: Interaction) {
        let owner = self.bean.collection(Self::key(), INTERACTIONS);
        self.interactions.push(&owner, interaction);
    }

    pub fn insert_interaction(
        &mut self,
        index: usize,
        interaction: Interaction,
    ) -> DomainResult<()> {
        let owner = self.bean.collection(Self::key(), INTERACTIONS);
        self.interactions.insert(&owner, index, interaction)
    }

    pub fn remove_interaction(&mut self, index: usize) -> DomainResult<Interaction> {
        let owner = self.bean.collection(Self::key(), INTERACTIONS);
        self.interactions.remove(&owner, index)
    }

    pub fn remove_interaction_by_id(&mut self, biz_id: &BizId) -> Option<Interaction> {
        let owner = self.bean.collection(Self::key(), INTERACTIONS);
        self.interactions.remove_by_id(&owner, biz_id)
    }

    /// Replace the interaction with the same id; `None` if there is none.
    pub fn set_interaction_by_id(&mut self, interaction: Interaction) -> Option<Interaction> {
        let owner = self.bean.collection(Self::key(), INTERACTIONS);
        self.interactions.replace_by_id(&owner, interaction)
    }

    pub fn selected_tab(&self) -> Option<i32> {
        self.selected_tab
    }

    pub fn set_selected_tab(&mut self, selected_tab: Option<i32>) {
        self.selected_tab = selected_tab;
    }

    pub fn flowbar(&self) -> Option<&str> {
        self.flowbar.as_deref()
    }

    pub fn set_flowbar(&mut self, flowbar: Option<String>) {
        self.flowbar = flowbar;
    }

    /// The pending interaction is a document upload.
    pub fn is_upload_selected(&self) -> bool {
        self.interaction_type == Some(InteractionType::Upload)
    }

    pub fn is_not_upload_selected(&self) -> bool {
        !self.is_upload_selected()
    }
}

identity_eq!(ContactDetail);

impl Conditional for ContactDetail {
    fn conditions() -> &'static [&'static str] {
        &[UPLOAD_SELECTED, NOT_UPLOAD_SELECTED]
    }

    fn condition(&self, name: &str, _user: &dyn UserContext) -> Option<bool> {
        match name {
            UPLOAD_SELECTED => Some(self.is_upload_selected()),
            NOT_UPLOAD_SELECTED => Some(self.is_not_upload_selected()),
            _ => None,
        }
    }
}

impl Bindable for ContactDetail {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            FIRST_NAME => self.first_name.clone().into(),
            LAST_NAME => self.last_name.clone().into(),
            JOB_TITLE => self.job_title.clone().into(),
            EMAIL => self.email.clone().into(),
            MOBILE_NUMBER => self.mobile_number.clone().into(),
            BUSINESS_NUMBER => self.business_number.clone().into(),
            FAX => self.fax.clone().into(),
            METHOD => FieldValue::from_enum(self.method),
            LINE1 => self.line1.clone().into(),
            LINE2 => self.line2.clone().into(),
            SUBURB => self.suburb.clone().into(),
            STATE => self.state.clone().into(),
            POST_CODE => self.post_code.clone().into(),
            INTERACTIONS => FieldValue::Collection(self.interactions.ids()),
            INTERACTION_DESCRIPTION => self.interaction_description.clone().into(),
            INTERACTION_TYPE => FieldValue::from_enum(self.interaction_type),
            DOCUMENT => self.document.clone().into(),
            SELECTED_TAB => self.selected_tab.into(),
            FLOWBAR => self.flowbar.clone().into(),
            _ => return None,
        })
    }
}

impl Document for ContactDetail {
    const MODULE_NAME: &'static str = "customers";
    const DOCUMENT_NAME: &'static str = "ContactDetail";
    const BIZ_KEY_TEMPLATE: &'static str = "{firstName} {lastName}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            FIRST_NAME => self.set_first_name(value.into_text(field)?),
            LAST_NAME => self.set_last_name(value.into_text(field)?),
            JOB_TITLE => self.set_job_title(value.into_text(field)?),
            EMAIL => self.set_email(value.into_text(field)?),
            MOBILE_NUMBER => self.set_mobile_number(value.into_text(field)?),
            BUSINESS_NUMBER => self.set_business_number(value.into_text(field)?),
            FAX => self.set_fax(value.into_text(field)?),
            METHOD => self.set_method(value.into_enum(field)?),
            LINE1 => self.set_line1(value.into_text(field)?),
            LINE2 => self.set_line2(value.into_text(field)?),
            SUBURB => self.set_suburb(value.into_text(field)?),
            STATE => self.set_state(value.into_text(field)?),
            POST_CODE => self.set_post_code(value.into_text(field)?),
            INTERACTIONS => return Err(typed_only(&Self::key(), field)),
            INTERACTION_DESCRIPTION => self.set_interaction_description(value.into_text(field)?),
            INTERACTION_TYPE => self.set_interaction_type(value.into_enum(field)?),
            DOCUMENT => self.set_document(value.into_text(field)?),
            SELECTED_TAB => self.set_selected_tab(value.into_integer(field)?),
            FLOWBAR => self.set_flowbar(value.into_text(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for ContactDetail {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            first_name: None,
            last_name: None,
            job_title: None,
            email: None,
            mobile_number: None,
            business_number: None,
            fax: None,
            method: None,
            line1: None,
            line2: None,
            suburb: None,
            state: None,
            post_code: None,
            interactions: ChildList::new(),
            interaction_description: None,
            interaction_type: None,
            document: None,
            selected_tab: None,
            flowbar: None,
        }
    }
}
