use std::sync::Arc;

use serde::{Deserialize, Serialize};

use bizdoc_core::{
    Bean, Bindable, ChangeTracker, CreationError, Document, DocumentFactory, DomainError,
    DomainResult, FieldDescriptor, FieldKind, FieldValue, Instantiate, identity_eq,
};

pub const NAME: &str = "name";
pub const DESCRIPTION: &str = "description";

static FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::new(NAME, FieldKind::Text),
    FieldDescriptor::new(DESCRIPTION, FieldKind::Text),
];

/// A catalog product (`products.ProductInfo`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    #[serde(flatten)]
    bean: Bean,
    name: Option<String>,
    description: Option<String>,
}

impl ProductInfo {
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

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(&mut self, description: Option<String>) {
        self.preset(DESCRIPTION, description.clone());
        self.description = description;
    }
}

identity_eq!(ProductInfo);

impl Bindable for ProductInfo {
    fn binding(&self, name: &str) -> Option<FieldValue> {
        Some(match name {
            NAME => self.name.clone().into(),
            DESCRIPTION => self.description.clone().into(),
            _ => return None,
        })
    }
}

impl Document for ProductInfo {
    const MODULE_NAME: &'static str = "products";
    const DOCUMENT_NAME: &'static str = "ProductInfo";
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
            DESCRIPTION => self.set_description(value.into_text(field)?),
            _ => return Err(DomainError::unknown_field(field)),
        }
        Ok(())
    }
}

impl Instantiate for ProductInfo {
    fn instantiate(bean: Bean) -> Self {
        Self {
            bean,
            name: None,
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdoc_events::InMemoryChangeTracker;

    #[test]
    fn generic_access_goes_through_the_field_table() {
        let tracker = Arc::new(InMemoryChangeTracker::new());
        let mut product = ProductInfo::new(tracker.clone());

        product.set(NAME, FieldValue::from("Difference Engine")).unwrap();
        product.set(DESCRIPTION, FieldValue::Null).unwrap();

        assert_eq!(product.name(), Some("Difference Engine"));
        assert_eq!(product.get(DESCRIPTION), Ok(FieldValue::Null));
        assert_eq!(tracker.dirty_fields(product.biz_id()), [NAME, DESCRIPTION]);
        assert_eq!(product.biz_key(), "Difference Engine");
        assert!(ProductInfo::descriptor(DESCRIPTION).is_some_and(|d| d.tracked));
    }
}
