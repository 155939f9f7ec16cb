//! Binding paths and message templates (display keys).

use crate::error::FormatError;
use crate::field::FieldValue;
use crate::shared::Shared;

/// Fallback display text when a template cannot be rendered.
pub const UNKNOWN: &str = "Unknown";

/// Something whose fields can be read by binding name.
///
/// `binding` covers the document's own fields; dotted paths
/// (`user.contact.name`) are resolved by handing the remainder to the
/// referenced document through `resolve_related`.
pub trait Bindable {
    /// Value of one of this document's own fields, `None` if undeclared.
    fn binding(&self, name: &str) -> Option<FieldValue>;

    /// Resolve `path` inside the document referenced by `field`.
    fn resolve_related(&self, _field: &str, _path: &str) -> Option<FieldValue> {
        None
    }

    fn resolve(&self, path: &str) -> Option<FieldValue> {
        match path.split_once('.') {
            None => self.binding(path),
            Some((head, rest)) => self.resolve_related(head, rest),
        }
    }
}

/// Resolve `path` through an optional reference; an unset reference yields
/// `Null` so the caller sees a null binding rather than an unknown one.
pub fn resolve_through<T: Bindable>(
    reference: Option<&Shared<T>>,
    path: &str,
) -> Option<FieldValue> {
    match reference {
        Some(target) => target.borrow().resolve(path),
        None => Some(FieldValue::Null),
    }
}

/// Render `template`, replacing each `{path}` with the bound value.
///
/// Every binding must resolve to a non-null value.
pub fn format_message(template: &str, bean: &dyn Bindable) -> Result<String, FormatError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            return Err(FormatError::Unterminated(template.to_owned()));
        };

        let path = after[..close].trim();
        match bean.resolve(path) {
            None => return Err(FormatError::UnknownBinding(path.to_owned())),
            Some(FieldValue::Null) => return Err(FormatError::NullBinding(path.to_owned())),
            Some(value) => out.push_str(&value.to_string()),
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Person {
        first: Option<String>,
        last: Option<String>,
        manager: Option<Shared<Person>>,
    }

    impl Bindable for Person {
        fn binding(&self, name: &str) -> Option<FieldValue> {
            match name {
                "first" => Some(self.first.clone().into()),
                "last" => Some(self.last.clone().into()),
                _ => None,
            }
        }

        fn resolve_related(&self, field: &str, path: &str) -> Option<FieldValue> {
            match field {
                "manager" => resolve_through(self.manager.as_ref(), path),
                _ => None,
            }
        }
    }

    fn person(first: Option<&str>, last: Option<&str>) -> Person {
        Person {
            first: first.map(str::to_owned),
            last: last.map(str::to_owned),
            manager: None,
        }
    }

    #[test]
    fn substitutes_each_binding() {
        let p = person(Some("Ada"), Some("Lovelace"));
        assert_eq!(format_message("{first} {last}", &p).unwrap(), "Ada Lovelace");
        assert_eq!(format_message("no bindings", &p).unwrap(), "no bindings");
    }

    #[test]
    fn null_and_unknown_bindings_fail() {
        let p = person(Some("Ada"), None);
        assert_eq!(
            format_message("{first} {last}", &p),
            Err(FormatError::NullBinding("last".into()))
        );
        assert_eq!(
            format_message("{middle}", &p),
            Err(FormatError::UnknownBinding("middle".into()))
        );
        assert!(matches!(
            format_message("{first", &p),
            Err(FormatError::Unterminated(_))
        ));
    }

    #[test]
    fn dotted_paths_follow_references() {
        let mut p = person(Some("Ada"), None);
        assert_eq!(
            format_message("{manager.first}", &p),
            Err(FormatError::NullBinding("manager.first".into()))
        );

        p.manager = Some(Shared::new(person(Some("Charles"), Some("Babbage"))));
        assert_eq!(format_message("{manager.last}", &p).unwrap(), "Babbage");
    }
}
