//! The prefix router and its resolution algorithm.
//!
//! [`PrefixRouter`] composes any number of [`Resolvable`] stores. Stores are
//! either registered under a literal prefix (a *group*) or appended to the
//! list of *default* stores.
//!
//! # Resolution order
//!
//! 1. Groups are scanned in descending lexicographic order of their prefix.
//!    A group takes part when the key starts with `prefix + separator` and is
//!    longer than the prefix; its stores are asked for the remainder of the
//!    key in registration order.
//! 2. The first store that holds the remainder wins. A group that matches
//!    the key but holds no value does not stop the scan.
//! 3. When no group answers, default stores are asked for the full key in
//!    registration order.
//!
//! Enumeration ([`PrefixRouter::enumerate_keys`]) lists default stores
//! first and groups afterwards, which is the reverse of resolution priority.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use prism_store::{Keys, Resolvable};
use tracing::{debug, trace};

use crate::config::RouterConfig;
use crate::cursor::KeyCursor;
use crate::error::{RouterError, RouterResult};
use crate::names::{normalize_prefix, validate_separator, DEFAULT_SEPARATOR};

/// A store shared between its owner and one or more routers.
pub type SharedStore = Arc<dyn Resolvable>;

/// Routes lookups to stores by key prefix, falling back to default stores.
///
/// Registration (`add_*`, `set_separator`) takes `&mut self` and is meant to
/// happen once during setup. Lookups take `&self` and may run concurrently
/// from many threads once the router is shared.
pub struct PrefixRouter {
    /// Prefix groups. Iterated in reverse for descending prefix order.
    groups: BTreeMap<String, Vec<SharedStore>>,
    defaults: Vec<SharedStore>,
    separator: String,
}

impl PrefixRouter {
    /// Create an empty router using [`DEFAULT_SEPARATOR`].
    pub fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            defaults: Vec::new(),
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }

    /// Create an empty router with a custom separator.
    ///
    /// Fails with [`RouterError::InvalidArgument`] if the separator is blank.
    pub fn with_separator(separator: &str) -> RouterResult<Self> {
        let mut router = Self::new();
        router.set_separator(separator)?;
        Ok(router)
    }

    /// Create an empty router from a [`RouterConfig`].
    pub fn with_config(config: &RouterConfig) -> RouterResult<Self> {
        Self::with_separator(&config.separator)
    }

    /// The separator placed between a prefix and the key inside its group.
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Replace the separator used by future lookups and enumerations.
    ///
    /// The value is trimmed. Fails with [`RouterError::InvalidArgument`] if
    /// nothing remains.
    pub fn set_separator(&mut self, separator: &str) -> RouterResult<()> {
        self.separator = validate_separator(separator)?.to_string();
        debug!(separator = %self.separator, "router separator set");
        Ok(())
    }

    // ---------------------------------------------------------------
    // Registration
    // ---------------------------------------------------------------

    /// Append a store to the default list.
    pub fn add_default_store(&mut self, store: SharedStore) {
        self.defaults.push(store);
        debug!(stores = self.defaults.len(), "default store registered");
    }

    /// Append a store to the group registered under `prefix`.
    ///
    /// The prefix is trimmed. A missing or blank prefix registers the store
    /// as a default store instead.
    pub fn add_child_store(&mut self, prefix: Option<&str>, store: SharedStore) {
        let Some(prefix) = normalize_prefix(prefix) else {
            self.add_default_store(store);
            return;
        };

        let group = self.groups.entry(prefix.to_string()).or_default();
        group.push(store);
        debug!(prefix, stores = group.len(), "child store registered");
    }

    /// Default stores in registration order.
    pub fn default_stores(&self) -> &[SharedStore] {
        &self.defaults
    }

    /// Stores registered under `prefix`, in registration order.
    ///
    /// Returns an empty slice for an unknown prefix.
    pub fn stores(&self, prefix: &str) -> &[SharedStore] {
        self.groups.get(prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registered prefixes in the order lookups scan them.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> + '_ {
        self.groups.keys().rev().map(String::as_str)
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Resolve `key` to a value.
    ///
    /// Returns [`RouterError::NotFound`] carrying the requested key when no
    /// group and no default store holds it.
    pub fn resolve(&self, key: &str) -> RouterResult<String> {
        for (prefix, stores) in self.groups.iter().rev() {
            let Some(rest) = self.strip_prefix(prefix, key) else {
                continue;
            };
            if let Some(value) = first_hit(stores, rest) {
                debug!(key, prefix = %prefix, "resolved in prefix group");
                return Ok(value);
            }
            trace!(key, prefix = %prefix, "prefix group matched without value");
        }

        if let Some(value) = first_hit(&self.defaults, key) {
            debug!(key, "resolved in default stores");
            return Ok(value);
        }

        debug!(key, "key not found");
        Err(RouterError::NotFound {
            key: key.to_string(),
        })
    }

    /// Returns `true` if [`resolve`](Self::resolve) would succeed for `key`.
    pub fn exists(&self, key: &str) -> bool {
        self.resolve(key).is_ok()
    }

    /// Lazily enumerate every fully-qualified key.
    ///
    /// Each call returns an independent cursor. See [`KeyCursor`] for the
    /// visiting order.
    pub fn enumerate_keys(&self) -> KeyCursor<'_> {
        KeyCursor::new(&self.separator, &self.defaults, &self.groups)
    }

    /// The part of `key` after `prefix + separator`, if `key` is longer than
    /// `prefix` and starts with it.
    fn strip_prefix<'k>(&self, prefix: &str, key: &'k str) -> Option<&'k str> {
        if key.len() <= prefix.len() {
            return None;
        }
        key.strip_prefix(prefix)?.strip_prefix(self.separator.as_str())
    }
}

/// Value from the first store that contains `key`.
///
/// A store may lose the key between `contains` and `get`; that counts as a
/// miss and the scan moves on.
fn first_hit(stores: &[SharedStore], key: &str) -> Option<String> {
    stores
        .iter()
        .filter(|store| store.contains(key))
        .find_map(|store| {
            let value = store.get(key);
            if value.is_none() {
                trace!(key, "key vanished between contains and get");
            }
            value
        })
}

impl Default for PrefixRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolvable for PrefixRouter {
    fn contains(&self, key: &str) -> bool {
        self.exists(key)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.resolve(key).ok()
    }

    fn keys(&self) -> Keys<'_> {
        Box::new(self.enumerate_keys())
    }
}

/// Renders `{key=value, ...}` for every enumerated key.
///
/// Keys are enumerated and then resolved one by one, so the value shown for
/// a key may come from a higher-priority store than the one that listed it.
/// A key removed between the two steps is skipped.
impl fmt::Display for PrefixRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        for key in self.enumerate_keys() {
            let Ok(value) = self.resolve(&key) else {
                continue;
            };
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{key}={value}")?;
        }
        f.write_str("}")
    }
}

impl fmt::Debug for PrefixRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups: Vec<(&str, usize)> = self
            .groups
            .iter()
            .rev()
            .map(|(prefix, stores)| (prefix.as_str(), stores.len()))
            .collect();
        f.debug_struct("PrefixRouter")
            .field("separator", &self.separator)
            .field("default_stores", &self.defaults.len())
            .field("groups", &groups)
            .finish()
    }
}
