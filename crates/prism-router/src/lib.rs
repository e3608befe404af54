//! Prefix-routed lookup over multiple resource stores.
//!
//! A [`PrefixRouter`] aggregates independent [`Resolvable`] stores into one
//! lookup surface. A key such as `soup.another.yas` is routed to the stores
//! registered under a matching prefix (`soup.another`), with the prefix and
//! separator stripped; keys no group answers fall back to the ordered list
//! of default stores.
//!
//! Routers are resolvables themselves, so they nest.
//!
//! # Modules
//!
//! - [`error`] — Error types for router operations
//! - [`names`] — Prefix and separator normalization
//! - [`config`] — [`RouterConfig`]
//! - [`router`] — [`PrefixRouter`] and its resolution algorithm
//! - [`cursor`] — [`KeyCursor`], the lazy key enumeration
//! - [`manifest`] — Building routers from TOML [`Manifest`]s
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use prism_router::PrefixRouter;
//! use prism_store::LeafStore;
//!
//! let defaults = Arc::new(LeafStore::new());
//! defaults.put("a.test", "a test!");
//!
//! let group = Arc::new(LeafStore::new());
//! group.put("another", "x");
//!
//! let mut router = PrefixRouter::new();
//! router.add_default_store(defaults);
//! router.add_child_store(Some("a"), group.clone());
//!
//! assert_eq!(router.resolve("a.another").unwrap(), "x");
//! assert_eq!(router.resolve("a.test").unwrap(), "a test!");
//!
//! group.put("test", "A test!");
//! assert_eq!(router.resolve("a.test").unwrap(), "A test!");
//! ```

pub mod config;
pub mod cursor;
pub mod error;
pub mod manifest;
pub mod names;
pub mod router;

pub use config::RouterConfig;
pub use cursor::KeyCursor;
pub use error::{RouterError, RouterResult};
pub use manifest::{GroupManifest, Manifest};
pub use names::DEFAULT_SEPARATOR;
pub use prism_store::{LeafStore, Resolvable};
pub use router::{PrefixRouter, SharedStore};
