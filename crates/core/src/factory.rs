//! Creation of documents through a (module, document) keyed factory.

use std::any::Any;

use crate::entity::Document;
use crate::error::CreationError;
use crate::id::DocumentKey;

/// Produces fully initialised, empty-state documents.
///
/// Passed explicitly to whoever needs new instances; there is no ambient
/// "current customer" to look one up from.
pub trait DocumentFactory {
    fn new_instance(&self, key: &DocumentKey) -> Result<Box<dyn Any>, CreationError>;
}

/// Create a `T` through `factory`.
///
/// Fails with [`CreationError`] if the factory does not know `T`'s key or
/// hands back a different document type under it.
pub fn new_instance<T: Document>(factory: &dyn DocumentFactory) -> Result<T, CreationError> {
    let key = T::key();
    let instance = factory.new_instance(&key)?;
    instance.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        let cause = anyhow::anyhow!("factory produced a different document type for {key}");
        CreationError::new(key, cause)
    })
}
