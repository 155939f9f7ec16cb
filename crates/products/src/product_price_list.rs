use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, ChangeTracker, CreationError, Document, DocumentFactory, DomainError,
    DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, identity_eq,
};

pub const NAME: &str = "name";
pub const RETAIL_PRICE: &str = "retailPrice";
pub const BULK_PRICE: &str = "bulkPrice";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(NAME, FieldKind::Text),
    FieldDescriptor::new(RETAIL_PRICE, FieldKind::Long),
    FieldDescriptor::new(BULK_PRICE, FieldKind::Long),
];

/// Unit prices for a product (`products.ProductPriceList`).
///
/// Prices are whole minor currency units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPriceList {
    #[serde(flatten)]
    bean: Bean,
    name: Option<String>,
    retail_price: Option<i64>,
    bulk_price: Option<i64>,
}

impl ProductPriceList {
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

    pub fn retail_price(&self) -> Option<i64> {
        self.retail_price
    }

    pub fn set_retail_price(&mut self, retail_price: Option<i64>) {
        self.preset(RETAIL_PRICE, retail_price);
        self.retail_price = retail_price;
    }

    pub fn bulk_price(&self) -> Option<i64> {
        self.bulk_price
    }

    pub fn set_bulk_price(&mut self, bulk_price: Option<i64>) {
        self.preset(BULK_PRICE, bulk_price);
        self.bulk_price = bulk_price;
    }
}

identity_eq!(ProductPriceList);

impl Bindable for ProductPriceList {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            NAME => self.name.clone().into(),
            RETAIL_PRICE => self.retail_price.into(),
            BULK_PRICE => self.bulk_price.into(),
            _ => return None,
        })
    }
}

impl Document for ProductPriceList {
    const MODULE_NAME: &'static str = "products";
    const DOCUMENT_NAME: &'static str = "ProductPriceList";
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
            RETAIL_PRICE => self.set_retail_price(value.into_long(field)?),
            BULK_PRICE => self.set_bulk_price(value.into_long(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for ProductPriceList {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            name: None,
            retail_price: None,
            bulk_price: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdoc_core::NoopTracker;
    use proptest::prelude::*;

    #[test]
    fn integer_values_widen_to_prices() {
        let mut list = ProductPriceList::new(Arc::new(NoopTracker));
        list.set(RETAIL_PRICE, FieldValue::Integer(1_250)).unwrap();
        assert_eq!(list.retail_price(), Some(1_250));
        assert!(matches!(
            list.set(BULK_PRICE, FieldValue::from("cheap")),
            Err(DomainError::TypeMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prices_serialize_as_plain_numbers(retail in any::<i64>(), bulk in any::<i64>()) {
            let mut list = ProductPriceList::new(Arc::new(NoopTracker));
            list.set_retail_price(Some(retail));
            list.set_bulk_price(Some(bulk));

            let json = serde_json::to_value(&list).unwrap();
            prop_assert_eq!(json["retailPrice"].as_i64(), Some(retail));

            let back: ProductPriceList = serde_json::from_value(json).unwrap();
            prop_assert_eq!(back.bulk_price(), Some(bulk));
            prop_assert_eq!(back.biz_id(), list.biz_id());
        }
    }
}
