//! Leaf resource stores for prism.
//!
//! A resource store maps string keys to string values. Everything that can
//! answer a lookup implements the narrow [`Resolvable`] capability: a leaf
//! store, or a router composing other stores (see `prism-router`).
//!
//! # Modules
//!
//! - [`traits`] — The [`Resolvable`] trait and the boxed [`Keys`] iterator
//! - [`memory`] — [`LeafStore`], the mutable in-memory base case
//!
//! # Design Rules
//!
//! 1. A missing key is reported as `None`, never as an error.
//! 2. Every single operation is atomic; sequences of operations are not.
//! 3. Key enumeration is live: it never snapshots the store and never fails
//!    under concurrent mutation.

pub mod memory;
pub mod traits;

pub use memory::{LeafStore, LiveKeys};
pub use traits::{Keys, Resolvable};
