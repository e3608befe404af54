use serde::{Deserialize, Serialize};

use crate::names::DEFAULT_SEPARATOR;

/// Configuration for a [`PrefixRouter`](crate::PrefixRouter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Delimiter between a group prefix and the key inside the group.
    pub separator: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl RouterConfig {
    /// A configuration using `separator` instead of the default.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}
