//! Lazy enumeration of fully-qualified router keys.

use std::collections::btree_map;
use std::iter::{FusedIterator, Rev};
use std::slice;

use prism_store::Keys;

use crate::router::SharedStore;

/// Depth-first pull cursor over every key a router can enumerate.
///
/// The cursor walks three levels: the current group (the default list first,
/// then each prefix group in descending order), the current store inside
/// that group, and the current store's own key iterator. Only one store key
/// iterator is open at a time; nothing is collected up front.
///
/// Keys from default stores are yielded unchanged. Keys from a prefix group
/// are yielded as `prefix + separator + key`. Duplicates across stores are
/// not removed.
pub struct KeyCursor<'a> {
    separator: &'a str,
    groups: Rev<btree_map::Iter<'a, String, Vec<SharedStore>>>,
    prefix: Option<&'a str>,
    stores: slice::Iter<'a, SharedStore>,
    keys: Option<Keys<'a>>,
}

impl<'a> KeyCursor<'a> {
    pub(crate) fn new(
        separator: &'a str,
        defaults: &'a [SharedStore],
        groups: &'a btree_map::BTreeMap<String, Vec<SharedStore>>,
    ) -> Self {
        Self {
            separator,
            groups: groups.iter().rev(),
            prefix: None,
            stores: defaults.iter(),
            keys: None,
        }
    }

    /// Prefix of the group currently being enumerated, `None` while the
    /// default stores are visited.
    pub fn current_prefix(&self) -> Option<&'a str> {
        self.prefix
    }
}

impl Iterator for KeyCursor<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            if let Some(keys) = self.keys.as_mut() {
                if let Some(key) = keys.next() {
                    return Some(match self.prefix {
                        Some(prefix) => format!("{prefix}{}{key}", self.separator),
                        None => key,
                    });
                }
                self.keys = None;
            }

            if let Some(store) = self.stores.next() {
                self.keys = Some(store.keys());
                continue;
            }

            let (prefix, stores) = self.groups.next()?;
            self.prefix = Some(prefix.as_str());
            self.stores = stores.iter();
        }
    }
}

impl FusedIterator for KeyCursor<'_> {}

impl std::fmt::Debug for KeyCursor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyCursor")
            .field("separator", &self.separator)
            .field("prefix", &self.prefix)
            .field("remaining_stores", &self.stores.len())
            .finish()
    }
}
