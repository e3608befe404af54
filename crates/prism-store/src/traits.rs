//! The [`Resolvable`] trait defining the lookup capability.
//!
//! Any component that can answer exact-key string lookups implements this
//! trait: the in-memory [`LeafStore`](crate::LeafStore), or a prefix router
//! that composes other resolvables.

/// Lazy sequence of keys produced by [`Resolvable::keys`].
pub type Keys<'a> = Box<dyn Iterator<Item = String> + Send + 'a>;

/// Exact-key lookup capability.
///
/// Implementations must be thread-safe (`Send + Sync`). Each call is
/// independent: a key reported by [`contains`](Resolvable::contains) may be
/// gone by the time [`get`](Resolvable::get) runs, so callers must treat a
/// later `None` as an ordinary miss.
pub trait Resolvable: Send + Sync {
    /// Returns `true` if `key` currently has a value.
    fn contains(&self, key: &str) -> bool;

    /// Look up the value for `key`.
    ///
    /// Returns `None` if the key is absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Enumerate the keys this resolvable can answer.
    ///
    /// The sequence is lazy and finite for a store that is not being
    /// mutated.
    fn keys(&self) -> Keys<'_>;
}
