//! TOML manifests describing a router and its stores.
//!
//! A manifest lists default stores and prefix groups in the order they are
//! registered:
//!
//! ```toml
//! separator = "."
//!
//! [[defaults]]
//! "hello.world" = "Hello World"
//!
//! [[groups]]
//! prefix = "a"
//! entries = { test = "A test!" }
//! ```
//!
//! Every `[[defaults]]` table and every `[[groups]]` entry becomes its own
//! [`LeafStore`].

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use prism_store::LeafStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::RouterConfig;
use crate::error::{RouterError, RouterResult};
use crate::router::PrefixRouter;

/// Declarative description of a [`PrefixRouter`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Router settings (the separator).
    #[serde(flatten)]
    pub router: RouterConfig,
    /// Default stores, one table per store.
    #[serde(default)]
    pub defaults: Vec<BTreeMap<String, String>>,
    /// Prefixed stores.
    #[serde(default)]
    pub groups: Vec<GroupManifest>,
}

/// One store registered under a prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupManifest {
    /// Group prefix. A blank prefix registers a default store.
    pub prefix: String,
    /// Entries of the store, keyed relative to the prefix.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Manifest {
    /// Parse a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> RouterResult<Self> {
        toml::from_str(text).map_err(|e| RouterError::Manifest(e.to_string()))
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> RouterResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&text)?;
        debug!(
            path = %path.display(),
            defaults = manifest.defaults.len(),
            groups = manifest.groups.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Build a router holding one fresh [`LeafStore`] per manifest store.
    pub fn build(&self) -> RouterResult<PrefixRouter> {
        let mut router = PrefixRouter::with_config(&self.router)?;
        for entries in &self.defaults {
            router.add_default_store(Arc::new(entries.iter().collect::<LeafStore>()));
        }
        for group in &self.groups {
            let store: LeafStore = group.entries.iter().collect();
            router.add_child_store(Some(group.prefix.as_str()), Arc::new(store));
        }
        Ok(router)
    }
}
