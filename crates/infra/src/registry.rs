//! Document factory keyed by `(module, document)`.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use bizdoc_core::{Bean, ChangeTracker, CreationError, DocumentFactory, DocumentKey, Instantiate};

type Constructor = Box<dyn Fn(Bean) -> anyhow::Result<Box<dyn Any>>>;

/// Creates registered documents, each with a fresh identifier and the
/// registry's change tracker.
///
/// Lookups by an unregistered key fail with [`CreationError`]; so does a
/// constructor that reports an error. Constructor panics are not caught.
pub struct ModuleRegistry {
    tracker: Arc<dyn ChangeTracker>,
    constructors: HashMap<DocumentKey, Constructor>,
}

fn construct<T: Instantiate>(bean: Bean) -> anyhow::Result<Box<dyn Any>> {
    Ok(Box::new(T::instantiate(bean)))
}

impl ModuleRegistry {
    pub fn new(tracker: Arc<dyn ChangeTracker>) -> Self {
        Self {
            tracker,
            constructors: HashMap::new(),
        }
    }

    /// Registry knowing every document shipped in this workspace.
    pub fn with_standard_documents(tracker: Arc<dyn ChangeTracker>) -> Self {
        let mut registry = Self::new(tracker);
        registry
            .register::<bizdoc_admin::Contact>()
            .register::<bizdoc_admin::User>()
            .register::<bizdoc_customers::Account>()
            .register::<bizdoc_customers::ContactDetail>()
            .register::<bizdoc_customers::Interaction>()
            .register::<bizdoc_products::ProductInfo>()
            .register::<bizdoc_products::ProductPriceList>()
            .register::<bizdoc_sales::Opportunity>()
            .register::<bizdoc_staff::StaffList>();
        registry
    }

    pub fn register<T: Instantiate>(&mut self) -> &mut Self {
        self.register_with(T::key(), construct::<T>)
    }

    /// Register a fallible constructor under `key`, replacing any previous one.
    pub fn register_with<F>(&mut self, key: DocumentKey, constructor: F) -> &mut Self
    where
        F: Fn(Bean) -> anyhow::Result<Box<dyn Any>> + 'static,
    {
        tracing::debug!(document = %key, "registering document");
        self.constructors.insert(key, Box::new(constructor));
        self
    }

    pub fn is_registered(&self, key: &DocumentKey) -> bool {
        self.constructors.contains_key(key)
    }

    /// Registered keys, sorted by their display form.
    pub fn keys(&self) -> Vec<DocumentKey> {
        let mut keys: Vec<_> = self.constructors.keys().cloned().collect();
        keys.sort_by_key(|k| k.to_string());
        keys
    }
}

impl DocumentFactory for ModuleRegistry {
    fn new_instance(&self, key: &DocumentKey) -> Result<Box<dyn Any>, CreationError> {
        let Some(constructor) = self.constructors.get(key) else {
            tracing::warn!(document = %key, "no constructor registered");
            return Err(CreationError::unknown_document(key.clone()));
        };

        let bean = Bean::new(Arc::clone(&self.tracker));
        let biz_id = bean.biz_id().clone();
        match constructor(bean) {
            Ok(instance) => {
                tracing::debug!(document = %key, %biz_id, "created document");
                Ok(instance)
            }
            Err(err) => {
                tracing::warn!(document = %key, error = %err, "document construction failed");
                Err(CreationError::new(key.clone(), err))
            }
        }
    }
}

impl core::fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("documents", &self.keys())
            .finish_non_exhaustive()
    }
}
