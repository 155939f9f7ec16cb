//! Environment-driven configuration.

use std::path::PathBuf;

use crate::catalog::{CatalogError, MessageCatalog};

pub const MESSAGES_VAR: &str = "BIZDOC_MESSAGES";
pub const LOCALE_VAR: &str = "BIZDOC_LOCALE";
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON message catalog; labels are untranslated when absent.
    pub messages: Option<PathBuf>,
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let locale = var(LOCALE_VAR).unwrap_or_else(|| {
            tracing::debug!("{LOCALE_VAR} not set; using {DEFAULT_LOCALE}");
            DEFAULT_LOCALE.to_string()
        });

        let messages = var(MESSAGES_VAR).map(PathBuf::from);
        if messages.is_none() {
            tracing::warn!("{MESSAGES_VAR} not set; labels will be untranslated");
        }

        Self { messages, locale }
    }

    /// The configured catalog, or an empty one for the configured locale.
    pub fn message_catalog(&self) -> Result<MessageCatalog, CatalogError> {
        match &self.messages {
            Some(path) => MessageCatalog::from_path(self.locale.clone(), path),
            None => Ok(MessageCatalog::new(self.locale.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup(&[]));
        assert_eq!(config, Config::default());
        assert!(config.message_catalog().unwrap().is_empty());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[(LOCALE_VAR, "  "), (MESSAGES_VAR, "")]));
        assert_eq!(config.locale, DEFAULT_LOCALE);
        assert_eq!(config.messages, None);
    }

    #[test]
    fn catalog_is_loaded_from_the_configured_path() {
        let path =
            std::env::temp_dir().join(format!("bizdoc-messages-{}.json", std::process::id()));
        std::fs::write(&path, r#"{ "Retail": "Détail" }"#).unwrap();

        let config = Config::from_lookup(lookup(&[
            (LOCALE_VAR, "fr"),
            (MESSAGES_VAR, path.to_str().unwrap()),
        ]));
        let catalog = config.message_catalog().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(catalog.locale(), "fr");
        assert_eq!(catalog.len(), 1);
    }
}
