//! On-chain identity of an account

use serde::{Deserialize, Serialize};

/// Display fields of an on-chain identity.
///
/// Sub-identities carry the display of their parent account.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityInfo {
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub display_parent: Option<String>,
}

impl IdentityInfo {
    pub fn named(display: impl Into<String>) -> Self {
        Self {
            display: Some(display.into()),
            display_parent: None,
        }
    }

    pub fn sub_of(parent: impl Into<String>, display: impl Into<String>) -> Self {
        Self {
            display: Some(display.into()),
            display_parent: Some(parent.into()),
        }
    }

    /// `parent/display` for sub-identities, `display` otherwise, empty when unset.
    pub fn display_name(&self) -> String {
        match (&self.display_parent, &self.display) {
            (Some(parent), Some(display)) => format!("{}/{}", parent, display),
            (Some(parent), None) => parent.clone(),
            (None, Some(display)) => display.clone(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_variants() {
        assert_eq!(IdentityInfo::named("Alice").display_name(), "Alice");
        assert_eq!(IdentityInfo::sub_of("Corp", "node-1").display_name(), "Corp/node-1");
        assert_eq!(IdentityInfo::default().display_name(), "");
    }
}
