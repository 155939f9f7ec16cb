//! File-backed message catalogs.

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

use bizdoc_core::Translator;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("cannot read message catalog {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("message catalog is not a JSON object of strings")]
    Parse(#[from] serde_json::Error),
}

/// Translations for one locale, keyed by message key (e.g. an enumeration
/// description such as `"Mobile Number"`).
///
/// Keys without a translation come back unchanged.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    locale: String,
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            messages: HashMap::new(),
        }
    }

    /// Parse `{ "key": "translation", ... }`.
    pub fn from_json_str(locale: impl Into<String>, json: &str) -> Result<Self, CatalogError> {
        let messages: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self {
            locale: locale.into(),
            messages,
        })
    }

    pub fn from_path(
        locale: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json_str(locale, &json)?;
        tracing::debug!(
            path = %path.display(),
            locale = %catalog.locale,
            messages = catalog.messages.len(),
            "loaded message catalog"
        );
        Ok(catalog)
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.messages.insert(key.into(), text.into());
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Translator for MessageCatalog {
    fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self.messages.get(key) {
            Some(text) => Cow::Borrowed(text.as_str()),
            None => Cow::Borrowed(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdoc_core::Enumeration;
    use bizdoc_customers::Method;

    #[test]
    fn labels_come_from_the_catalog() {
        let catalog = MessageCatalog::from_json_str(
            "fr",
            r#"{ "Mobile Number": "Portable", "Any": "Indifférent" }"#,
        )
        .unwrap();

        assert_eq!(Method::MobileNumber.label(&catalog), "Portable");
        assert_eq!(Method::Fax.label(&catalog), "Fax");
        assert_eq!(Method::from_label("Portable", &catalog), Some(Method::MobileNumber));
        assert_eq!(Method::from_label("Mobile Number", &catalog), None);

        let labels: Vec<_> = Method::domain_values(&catalog).map(|v| v.label).collect();
        assert_eq!(labels, ["Email", "Portable", "Business Number", "Fax", "Indifférent"]);
    }

    #[test]
    fn malformed_catalogs_are_rejected() {
        assert!(matches!(
            MessageCatalog::from_json_str("en", r#"["not", "an", "object"]"#),
            Err(CatalogError::Parse(_))
        ));
        assert!(matches!(
            MessageCatalog::from_path("en", "/nonexistent/messages.json"),
            Err(CatalogError::Read { .. })
        ));
    }
}
