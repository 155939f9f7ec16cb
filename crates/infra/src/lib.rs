//! Wiring: the document factory, message catalogs, configuration and the
//! JSON representation of documents.

pub mod catalog;
pub mod config;
pub mod json;
pub mod registry;

pub use catalog::{CatalogError, MessageCatalog};
pub use config::Config;
pub use json::{JsonError, from_json, serialized_field_names, to_json};
pub use registry::ModuleRegistry;
