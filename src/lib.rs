//! # record-trie
//!
//! Immutable, schema-fixed records with structurally shared updates.
//!
//! ## Overview
//!
//! A record family is declared once from the default value of every key.
//! Instances of the family are never modified: `set` returns a new instance
//! and leaves the receiver as it was. Two representations back the
//! instances:
//!
//! - **Thin records** hold the values they were created with and answer
//!   reads directly, so records that are only read never build a trie
//! - **Trie records** store values in a 32-way trie addressed by the key's
//!   index; `set` copies only the O(log32 N) nodes on the path to the key
//!   and shares everything else with the previous version
//!
//! ## Feature Flags
//!
//! - `derive`: `#[derive(RecordKey)]` for key enums with read-only accessors
//!   (enabled by default)
//! - `arc`: use `Arc` instead of `Rc`, making records `Send + Sync`
//! - `fxhash` / `ahash`: faster hashers for the key-index map
//! - `tracing`: emit `tracing` events on schema construction and promotion
//! - `full`: `derive`, `arc` and `tracing`
//!
//! ## Example
//!
//! ```rust
//! use record_trie::prelude::*;
//!
//! let family = RecordFamily::new([("a", None), ("b", None), ("c", None)]);
//! let first = family.create([("a", Some("a1")), ("b", Some("b1"))]);
//! let second = first.set("a", Some("a2"));
//!
//! assert_eq!(first.get("a"), Some(&Some("a1")));
//! assert_eq!(second.get("a"), Some(&Some("a2")));
//! assert_eq!(second.get("c"), Some(&None)); // default
//! assert_eq!(second.get("d"), None); // undeclared
//! ```
//!
//! ## Read-only Fields
//!
//! Fields can only change through `set`. Generated accessors hand out
//! shared references, so assigning through them is rejected by the
//! compiler:
//!
//! ```rust,compile_fail
//! use record_trie::prelude::*;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, RecordKey)]
//! enum Field {
//!     Count,
//! }
//!
//! let family = RecordFamily::for_keys(|_: &Field| 0);
//! let record = family.empty();
//! *record.count().unwrap() = 5;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

extern crate self as record_trie;

/// Prelude module for convenient imports.
///
/// Re-exports the record types, the families and the [`RecordView`]
/// trait that generated accessors build on.
///
/// # Usage
///
/// ```rust
/// use record_trie::prelude::*;
/// ```
///
/// [`RecordView`]: crate::record::RecordView
pub mod prelude {
    pub use crate::record::*;

    #[cfg(feature = "derive")]
    pub use record_trie_derive::RecordKey;
}

pub mod record;

#[cfg(feature = "derive")]
pub use record_trie_derive::RecordKey;
