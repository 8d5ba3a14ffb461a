//! Immutable, schema-fixed records backed by a 32-way trie.
//!
//! A record family is declared once from a set of keys and their default
//! values. Every instance produced by the family answers `get` for any
//! declared key and "modifies" itself only by returning a new instance from
//! `set`; nothing that has been handed out is ever mutated.
//!
//! - [`Schema`]: declared keys, their defaults and the key-index assignment
//! - [`TrieRecord`]: instance stored in a 32-way trie with path-copying updates
//! - [`ThinRecord`]: lightweight instance over the raw input values
//! - [`Record`]: either of the two, as produced by [`RecordFamily`]
//! - [`RecordFamily`] / [`TrieRecordFamily`]: factories bound to one schema
//!
//! # Structural Sharing
//!
//! `set` on a [`TrieRecord`] copies only the nodes on the route from the root
//! to the written slot. All other subtrees are shared by reference with the
//! receiver, so an update costs O(log32 N) time and memory.
//!
//! # Examples
//!
//! ```rust
//! use record_trie::record::RecordFamily;
//!
//! let family = RecordFamily::new([("a", 0), ("b", 0), ("c", 0)]);
//! let record = family.create([("a", 11), ("c", 13)]);
//!
//! assert_eq!(record.get("a"), Some(&11));
//! assert_eq!(record.get("b"), Some(&0)); // default
//!
//! let updated = record.set("a", 15);
//! assert_eq!(record.get("a"), Some(&11)); // Original unchanged
//! assert_eq!(updated.get("a"), Some(&15)); // New version
//! ```

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled, this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

mod error;
mod family;
mod instance;
mod key;
mod node;
mod schema;
mod thin;
mod trie;
mod view;

pub use error::RecordError;
pub use family::RecordFamily;
pub use family::TrieRecordFamily;
pub use instance::Record;
pub use key::RecordKey;
pub use schema::KeyIndexHasher;
pub use schema::KeyIndexMap;
pub use schema::Schema;
pub use schema::assign_key_indices;
pub use schema::number_of_levels;
pub use thin::ThinRecord;
pub use trie::TrieRecord;
pub use view::Entries;
pub use view::RecordView;

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(Record<String, i32>: Send, Sync);
#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(RecordFamily<String, i32>: Send, Sync);
#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(Record<String, i32>: Send, Sync);

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod reference_counter_tests {
    use super::ReferenceCounter;
    use rstest::rstest;

    #[rstest]
    fn test_reference_counter_ptr_eq_after_clone() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        let reference_counter_clone = reference_counter.clone();
        assert!(ReferenceCounter::ptr_eq(
            &reference_counter,
            &reference_counter_clone
        ));
    }

    #[rstest]
    fn test_reference_counter_strong_count() {
        let reference_counter: ReferenceCounter<i32> = ReferenceCounter::new(42);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
        let reference_counter_clone = reference_counter.clone();
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 2);
        drop(reference_counter_clone);
        assert_eq!(ReferenceCounter::strong_count(&reference_counter), 1);
    }
}
