use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role granted to a user, qualified by the module that declares it
/// (e.g. `staff.StaffManager`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    module: Cow<'static, str>,
    name: Cow<'static, str>,
}

impl Role {
    pub fn new(module: impl Into<Cow<'static, str>>, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }

    /// Parse `module.Name`.
    pub fn parse(qualified: &str) -> Option<Self> {
        let (module, name) = qualified.split_once('.')?;
        if module.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self::new(module.to_owned(), name.to_owned()))
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn matches(&self, module: &str, name: &str) -> bool {
        self.module == module && self.name == name
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}
