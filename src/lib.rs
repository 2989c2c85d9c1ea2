//! An ordered map implemented with an AVL tree.
//!
//! [`AvlTreeMap`] keeps its entries in a height-balanced binary search tree,
//! so lookups, insertions, updates and removals take O(log n) steps and the
//! entries can be walked in key order.
//!
//! Every operation that can be misused reports it through [`MapError`]
//! instead of silently overwriting or ignoring: inserting a key twice,
//! updating or removing a missing key, or using a key that cannot be ordered
//! (such as `f64::NAN`). A failed operation leaves the map untouched.
//!
//! Diagnostics go through [`tracing`]: rotations are traced, rejected
//! operations are logged at debug level.
//!
//! ```
//! use avlmap::AvlTreeMap;
//! let mut map = AvlTreeMap::new();
//! for (i, word) in ["zero", "one", "two", "three"].into_iter().enumerate() {
//!     map.insert(i, word).unwrap();
//! }
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
//! ```
//!
//! # Features
//!
//! * `consistency_check`: exposes `AvlTreeMap::check_consistency` outside of tests.
//! * `serde`: (de)serializes the map as a sorted map.

mod error;
mod map;
mod ordered_map;
#[cfg(feature = "serde")]
mod serde_impl;

pub use error::{MapError, Result};
pub use map::{AvlTreeMap, Iter, Keys, TreeDisplay, Values};
pub use ordered_map::OrderedMap;
