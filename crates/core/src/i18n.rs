//! Localization seam.

use std::borrow::Cow;

/// Translates message keys (enumeration descriptions, labels) for display.
///
/// Implementations decide the locale; the document layer only passes keys
/// through. Unknown keys should come back unchanged.
pub trait Translator {
    fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str>;
}

/// Returns every key untranslated.
#[derive(Debug, Default, Copy, Clone)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(key)
    }
}

impl<F> Translator for F
where
    F: Fn(&str) -> Option<String>,
{
    fn translate<'a>(&'a self, key: &'a str) -> Cow<'a, str> {
        match self(key) {
            Some(text) => Cow::Owned(text),
            None => Cow::Borrowed(key),
        }
    }
}
