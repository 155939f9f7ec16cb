use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, ChangeTracker, Conditional, CreationError, Document, DocumentFactory,
    DomainError, DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, Shared,
    UserContext, domain_enum, identity_eq, resolve_through, typed_only,
};
use bizdoc_customers::{Account, ContactDetail, InteractionType};
use bizdoc_products::{ProductInfo, ProductPriceList};

pub const TOPIC: &str = "topic";
pub const CONTACT: &str = "contact";
pub const ACCOUNT: &str = "account";
pub const DESCRIPTION: &str = "description";
pub const PRODUCT: &str = "product";
pub const PRICE_LIST: &str = "priceList";
pub const PRICING_TYPE: &str = "pricingType";
pub const QUANTITY: &str = "quantity";
pub const BULK_DISCOUNT: &str = "bulkDiscount";
pub const MANUAL_DISCOUNT: &str = "manualDiscount";
pub const TAX: &str = "tax";
pub const TOTAL: &str = "total";
pub const SELECTED_TAB: &str = "selectedTab";

pub const PRICE_LIST_SELECTED: &str = "priceListSelected";
pub const NOT_PRICE_LIST_SELECTED: &str = "notPriceListSelected";
pub const PRODUCT_SELECTED: &str = "productSelected";
pub const NOT_PRODUCT_SELECTED: &str = "notProductSelected";
pub const UPLOAD_SELECTED: &str = "uploadSelected";
pub const NOT_UPLOAD_SELECTED: &str = "notUploadSelected";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(TOPIC, FieldKind::Text),
    FieldDescriptor::new(CONTACT, FieldKind::Reference),
    FieldDescriptor::new(ACCOUNT, FieldKind::Reference),
    FieldDescriptor::new(DESCRIPTION, FieldKind::Text),
    FieldDescriptor::new(PRODUCT, FieldKind::Reference),
    FieldDescriptor::new(PRICE_LIST, FieldKind::Reference),
    FieldDescriptor::new(PRICING_TYPE, FieldKind::Enum),
    FieldDescriptor::new(QUANTITY, FieldKind::Long),
    FieldDescriptor::new(BULK_DISCOUNT, FieldKind::Integer),
    FieldDescriptor::new(MANUAL_DISCOUNT, FieldKind::Integer),
    FieldDescriptor::new(TAX, FieldKind::Integer),
    FieldDescriptor::new(TOTAL, FieldKind::Long),
    FieldDescriptor::transient(SELECTED_TAB, FieldKind::Integer),
];

domain_enum! {
    /// Which price of the selected price list applies.
    pub enum PricingType {
        Retail => ("Retail", "Retail"),
        Bulk => ("Bulk", "Bulk"),
    }
}

/// A potential sale (`sales.Opportunity`).
///
/// References its contact, account, product and price list without owning
/// them; they serialize inline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    #[serde(flatten)]
    bean: Bean,
    topic: Option<String>,
    contact: Option<Shared<ContactDetail>>,
    account: Option<Shared<Account>>,
    description: Option<String>,
    product: Option<Shared<ProductInfo>>,
    price_list: Option<Shared<ProductPriceList>>,
    pricing_type: Option<PricingType>,
    quantity: Option<i64>,
    bulk_discount: Option<i32>,
    manual_discount: Option<i32>,
    tax: Option<i32>,
    total: Option<i64>,
    #[serde(skip)]
    selected_tab: Option<i32>,
}

/// Identity-checked assignment of a reference field.
macro_rules! reference_field {
    ($get:ident, $set:ident, $name:ident, $t:ty) => {
        pub fn $get(&self) -> Option<&Shared<$t>> {
            self.$get.as_ref()
        }

        pub fn $set(&mut self, $get: Option<Shared<$t>>) {
            if !Shared::same(self.$get.as_ref(), $get.as_ref()) {
                self.preset($name, $get.as_ref());
                self.$get = $get;
            }
        }
    };
}

macro_rules! copy_field {
    ($get:ident, $set:ident, $name:ident, $t:ty) => {
        pub fn $get(&self) -> Option<$t> {
            self.$get
        }

        pub fn $set(&mut self, $get: Option<$t>) {
            self.preset($name, $get);
            self.$get = $get;
        }
    };
}

impl Opportunity {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self::instantiate(Bean::new(tracker))
    }

    pub fn new_instance(factory: &dyn DocumentFactory) -> Result<Self, CreationError> {
        bizdoc_core::new_instance(factory)
    }

    pub fn topic(&self) -> Option<&str> {
        self.topic.as_deref()
    }

    pub fn set_topic(&mut self, topic: Option<String>) {
        self.preset(TOPIC, topic.clone());
        self.topic = topic;
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.preset(DESCRIPTION, description.clone());
        self.description = description;
    }

    reference_field!(contact, set_contact, CONTACT, ContactDetail);
    reference_field!(account, set_account, ACCOUNT, Account);
    reference_field!(product, set_product, PRODUCT, ProductInfo);
    reference_field!(price_list, set_price_list, PRICE_LIST, ProductPriceList);

    pub fn pricing_type(&self) -> Option<PricingType> {
        self.pricing_type
    }

    pub fn set_pricing_type(&mut self, pricing_type: Option<PricingType>) {
        self.preset(PRICING_TYPE, FieldValue::from_enum(pricing_type));
        self.pricing_type = pricing_type;
    }

    copy_field!(quantity, set_quantity, QUANTITY, i64);
    copy_field!(bulk_discount, set_bulk_discount, BULK_DISCOUNT, i32);
    copy_field!(manual_discount, set_manual_discount, MANUAL_DISCOUNT, i32);
    copy_field!(tax, set_tax, TAX, i32);
    copy_field!(total, set_total, TOTAL, i64);

    pub fn selected_tab(&self) -> Option<i32> {
        self.selected_tab
    }

    pub fn set_selected_tab(&mut self, selected_tab: Option<i32>) {
        self.selected_tab = selected_tab;
    }

    pub fn is_price_list_selected(&self) -> bool {
        self.price_list.is_some()
    }

    pub fn is_not_price_list_selected(&self) -> bool {
        !self.is_price_list_selected()
    }

    pub fn is_product_selected(&self) -> bool {
        self.product.is_some()
    }

    pub fn is_not_product_selected(&self) -> bool {
        !self.is_product_selected()
    }

    /// The account's pending interaction is a document upload.
    pub fn is_upload_selected(&self) -> bool {
        self.account
            .as_ref()
            .is_some_and(|a| a.borrow().interaction_type() == Some(InteractionType::Upload))
    }

    pub fn is_not_upload_selected(&self) -> bool {
        !self.is_upload_selected()
    }
}

identity_eq!(Opportunity);

impl Conditional for Opportunity {
    fn conditions() -> &'static [&'static str] {
        &[
            PRICE_LIST_SELECTED,
            NOT_PRICE_LIST_SELECTED,
            PRODUCT_SELECTED,
            NOT_PRODUCT_SELECTED,
            UPLOAD_SELECTED,
            NOT_UPLOAD_SELECTED,
        ]
    }

    fn condition(&self, name: &str, _user: &dyn UserContext) -> Option<bool> {
        Some(match name {
            PRICE_LIST_SELECTED => self.is_price_list_selected(),
            NOT_PRICE_LIST_SELECTED => self.is_not_price_list_selected(),
            PRODUCT_SELECTED => self.is_product_selected(),
            NOT_PRODUCT_SELECTED => self.is_not_product_selected(),
            UPLOAD_SELECTED => self.is_upload_selected(),
            NOT_UPLOAD_SELECTED => self.is_not_upload_selected(),
            _ => return None,
        })
    }
}

impl Bindable for Opportunity {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            TOPIC => self.topic.clone().into(),
            CONTACT => self.contact.as_ref().into(),
            ACCOUNT => self.account.as_ref().into(),
            DESCRIPTION => self.description.clone().into(),
            PRODUCT => self.product.as_ref().into(),
            PRICE_LIST => self.price_list.as_ref().into(),
            PRICING_TYPE => FieldValue::from_enum(self.pricing_type),
            QUANTITY => self.quantity.into(),
            BULK_DISCOUNT => self.bulk_discount.into(),
            MANUAL_DISCOUNT => self.manual_discount.into(),
            TAX => self.tax.into(),
            TOTAL => self.total.into(),
            SELECTED_TAB => self.selected_tab.into(),
            _ => return None,
        })
    }

    fn resolve_related(&self, field: &str, path: &str) -> Option<FieldValue> {
        match field {
            CONTACT => resolve_through(self.contact.as_ref(), path),
            ACCOUNT => resolve_through(self.account.as_ref(), path),
            PRODUCT => resolve_through(self.product.as_ref(), path),
            PRICE_LIST => resolve_through(self.price_list.as_ref(), path),
            _ => None,
        }
    }
}

impl Document for Opportunity {
    const MODULE_NAME: &'static str = "sales";
    const DOCUMENT_NAME: &'static str = "Opportunity";
    const BIZ_KEY_TEMPLATE: &'static str = "{topic}";

    fn fields() -> &'static [FieldDescriptor] {
        FIELDS
    }

    fn bean(&self) -> &Bean {
        &self.bean
    }

    fn set(&mut self, field: &str, value: FieldValue) -> DomainResult<()> {
        match field {
            TOPIC => self.set_topic(value.into_text(field)?),
            CONTACT | ACCOUNT | PRODUCT | PRICE_LIST => {
                return Err(typed_only(&Self::key(), field));
            }
            DESCRIPTION => self.set_description(value.into_text(field)?),
            PRICING_TYPE => self.set_pricing_type(value.into_enum(field)?),
            QUANTITY => self.set_quantity(value.into_long(field)?),
            BULK_DISCOUNT => self.set_bulk_discount(value.into_integer(field)?),
            MANUAL_DISCOUNT => self.set_manual_discount(value.into_integer(field)?),
            TAX => self.set_tax(value.into_integer(field)?),
            TOTAL => self.set_total(value.into_long(field)?),
            SELECTED_TAB => self.set_selected_tab(value.into_integer(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for Opportunity {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            topic: None,
            contact: None,
            account: None,
            description: None,
            product: None,
            price_list: None,
            pricing_type: None,
            quantity: None,
            bulk_discount: None,
            manual_discount: None,
            tax: None,
            total: None,
            selected_tab: None,
        }
    }
}
