//! Closed enumerations with (code, label) domain values.
//!
//! Each enumeration is a plain Rust enum whose members carry a stable machine
//! code and an untranslated description. The [`domain_enum!`] macro generates
//! the enum, its declaration-ordered value table and its code-based serde
//! representation; lookups are provided by the [`Enumeration`] trait.
//!
//! [`domain_enum!`]: crate::domain_enum

use std::borrow::Cow;

use serde::Serialize;

use crate::i18n::Translator;

/// A (code, label) pair as shown in selection widgets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DomainValue {
    pub code: Cow<'static, str>,
    pub label: Cow<'static, str>,
}

impl DomainValue {
    pub fn new(code: impl Into<Cow<'static, str>>, label: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// Closed, ordered set of values.
pub trait Enumeration: Copy + Eq + core::fmt::Debug + 'static {
    /// All values in declaration order.
    fn values() -> &'static [Self];

    /// Stable machine code.
    fn code(&self) -> &'static str;

    /// Untranslated description (the message key passed to a [`Translator`]).
    fn description(&self) -> &'static str;

    /// `(code, description)` pairs, built on first use and immutable afterwards.
    fn untranslated_domain_values() -> &'static [DomainValue];

    /// Description rendered through `translator`.
    fn label<'t>(&self, translator: &'t dyn Translator) -> Cow<'t, str> {
        translator.translate(self.description())
    }

    /// The value with this code, if any.
    fn from_code(code: &str) -> Option<Self> {
        Self::values().iter().copied().find(|v| v.code() == code)
    }

    /// The first value, in declaration order, whose translated description
    /// equals `label`.
    ///
    /// Two values whose translations coincide cannot be told apart here; the
    /// earlier declaration always wins.
    fn from_label(label: &str, translator: &dyn Translator) -> Option<Self> {
        Self::values()
            .iter()
            .copied()
            .find(|v| translator.translate(v.description()) == label)
    }

    /// Lazily translated `(code, label)` pairs in declaration order.
    fn domain_values(translator: &dyn Translator) -> DomainValues<'_, Self> {
        DomainValues {
            values: Self::values().iter(),
            translator,
        }
    }
}

/// Iterator returned by [`Enumeration::domain_values`].
///
/// Finite, and restartable by cloning or by asking for a new one.
pub struct DomainValues<'t, E: 'static> {
    values: core::slice::Iter<'static, E>,
    translator: &'t dyn Translator,
}

impl<E: 'static> Clone for DomainValues<'_, E> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            translator: self.translator,
        }
    }
}

impl<E: Enumeration> Iterator for DomainValues<'_, E> {
    type Item = DomainValue;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.values.next()?;
        let label = self.translator.translate(value.description()).into_owned();
        Some(DomainValue::new(value.code(), label))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<E: Enumeration> ExactSizeIterator for DomainValues<'_, E> {}

/// Declare a closed enumeration: `Variant => ("code", "Description")`.
///
/// Generates the enum (Copy, Eq, Hash), its [`Enumeration`] impl, `Display`
/// (the code), code-based `Serialize`/`Deserialize`, and a conversion into
/// [`FieldValue`](crate::FieldValue).
#[macro_export]
macro_rules! domain_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => ($code:literal, $description:literal) ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::Enumeration for $name {
            fn values() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }

            fn code(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code ),+
                }
            }

            fn description(&self) -> &'static str {
                match self {
                    $( $name::$variant => $description ),+
                }
            }

            fn untranslated_domain_values() -> &'static [$crate::DomainValue] {
                static VALUES: ::std::sync::LazyLock<::std::vec::Vec<$crate::DomainValue>> =
                    ::std::sync::LazyLock::new(|| {
                        <$name as $crate::Enumeration>::values()
                            .iter()
                            .map(|v| {
                                $crate::DomainValue::new(
                                    $crate::Enumeration::code(v),
                                    $crate::Enumeration::description(v),
                                )
                            })
                            .collect()
                    });
                &VALUES
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str($crate::Enumeration::code(self))
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::core::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str($crate::Enumeration::code(self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::core::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let code = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                <$name as $crate::Enumeration>::from_code(&code).ok_or_else(|| {
                    <D::Error as $crate::__private::serde::de::Error>::custom(
                        ::std::format!("unknown {} code {:?}", ::core::stringify!($name), code),
                    )
                })
            }
        }

        impl ::core::convert::From<$name> for $crate::FieldValue {
            fn from(value: $name) -> Self {
                $crate::FieldValue::Enum($crate::Enumeration::code(&value))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FieldValue, IdentityTranslator};
    use proptest::prelude::*;

    crate::domain_enum! {
        /// Test fixture.
        enum Colour {
            Red => ("R", "Red"),
            Green => ("G", "Green"),
            Crimson => ("C", "Crimson"),
        }
    }

    fn merge_reds(key: &str) -> Option<String> {
        (key == "Crimson").then(|| "Red".to_string())
    }

    #[test]
    fn code_lookup_round_trips_every_value() {
        for v in Colour::values() {
            assert_eq!(Colour::from_code(v.code()), Some(*v));
            let label = v.label(&IdentityTranslator);
            assert_eq!(Colour::from_label(&label, &IdentityTranslator), Some(*v));
        }
    }

    #[test]
    fn lookups_miss_without_failing() {
        assert_eq!(Colour::from_code("__nonexistent__"), None);
        assert_eq!(Colour::from_label("__nonexistent__", &IdentityTranslator), None);
    }

    #[test]
    fn coinciding_labels_resolve_to_first_declared() {
        assert_eq!(Colour::from_label("Red", &merge_reds), Some(Colour::Red));
        assert_eq!(Colour::Crimson.label(&merge_reds), "Red");
    }

    #[test]
    fn domain_values_are_ordered_and_restartable() {
        let values = Colour::domain_values(&merge_reds);
        assert_eq!(values.len(), 3);

        let codes: Vec<_> = values.clone().map(|dv| dv.code).collect();
        assert_eq!(codes, ["R", "G", "C"]);

        let labels: Vec<_> = values.map(|dv| dv.label).collect();
        assert_eq!(labels, ["Red", "Green", "Red"]);

        let again: Vec<_> = Colour::domain_values(&IdentityTranslator).collect();
        assert_eq!(again[0], DomainValue::new("R", "Red"));
    }

    #[test]
    fn untranslated_table_is_shared() {
        let a = Colour::untranslated_domain_values();
        let b = Colour::untranslated_domain_values();
        assert!(core::ptr::eq(a, b));
        assert_eq!(a[2], DomainValue::new("C", "Crimson"));
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Colour::Green).unwrap(), "\"G\"");
        assert_eq!(serde_json::from_str::<Colour>("\"C\"").unwrap(), Colour::Crimson);
        assert!(serde_json::from_str::<Colour>("\"Z\"").is_err());
    }

    #[test]
    fn converts_to_field_value() {
        assert_eq!(FieldValue::from(Colour::Red), FieldValue::Enum("R"));
        assert_eq!(FieldValue::from_enum(None::<Colour>), FieldValue::Null);
        assert_eq!(FieldValue::from_enum(Some(Colour::Crimson)), FieldValue::Enum("C"));
        assert_eq!(Colour::Green.to_string(), "G");
    }

    proptest! {
        #[test]
        fn from_code_only_matches_declared_codes(code in "[A-Za-z_]{0,12}") {
            let found = Colour::from_code(&code);
            prop_assert_eq!(found.is_some(), ["R", "G", "C"].contains(&code.as_str()));
        }
    }
}
