//! Record instances stored in a 32-way trie.
//!
//! This module provides [`TrieRecord`], the representation every record
//! ends up in once it has been written to.
//!
//! # Overview
//!
//! The value of the key with index `i` lives at the slot addressed by the
//! 5-bit groups of `i`, least significant group first. A schema with `N`
//! keys therefore needs `ceil(log32 N)` levels, and both reads and writes
//! walk exactly that many nodes:
//!
//! - O(log32 N) `get`, without allocating
//! - O(log32 N) `set`, allocating one node per level (path copying)
//! - every subtree off the written path is shared with the receiver
//!
//! A slot that was never written reads as the schema default. A slot that
//! was written keeps whatever value was stored there, so a record whose
//! values are `Option<T>` can tell "set to `None`" from "never set".
//!
//! # Examples
//!
//! ```rust
//! use record_trie::record::TrieRecordFamily;
//!
//! let family = TrieRecordFamily::new([("a", "a0"), ("b", "b0"), ("c", "c0")]);
//! let first = family.create([("a", "a1"), ("b", "b1"), ("c", "c1")]);
//! let second = first.set("a", "a2");
//! let third = second.set("a", "a3");
//!
//! assert_eq!(first.get("a"), Some(&"a1"));
//! assert_eq!(second.get("a"), Some(&"a2"));
//! assert_eq!(third.get("a"), Some(&"a3"));
//! ```

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use super::ReferenceCounter;
use super::error::RecordError;
use super::node::Slot;
use super::schema::Schema;
use super::view::{self, Entries, RecordView};

// =============================================================================
// TrieRecord Definition
// =============================================================================

/// A persistent record instance backed by a 32-way trie.
///
/// Created by [`TrieRecordFamily`](super::TrieRecordFamily), or by the first
/// `set` on a [`ThinRecord`](super::ThinRecord). Cloning is O(1): the clone
/// shares the whole trie.
///
/// # Time Complexity
///
/// | Operation | Complexity            |
/// |-----------|-----------------------|
/// | `get`     | O(log32 N)            |
/// | `set`     | O(log32 N)            |
/// | `update`  | O(log32 N)            |
/// | `merge`   | O(M log32 N)          |
/// | `clone`   | O(1)                  |
/// | `iter`    | O(N log32 N)          |
pub struct TrieRecord<K, V> {
    schema: ReferenceCounter<Schema<K, V>>,
    root: Slot<V>,
}

impl<K, V> Clone for TrieRecord<K, V> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            root: self.root.clone(),
        }
    }
}

impl<K, V> TrieRecord<K, V> {
    /// Creates a record with every slot empty.
    pub(crate) fn empty_with(schema: ReferenceCounter<Schema<K, V>>) -> Self {
        let root = Slot::empty_tree(schema.number_of_levels());
        Self { schema, root }
    }

    /// Creates a record from `(index, value)` pairs, writing them into a
    /// freshly allocated trie. Later pairs overwrite earlier ones.
    pub(crate) fn seeded<I>(schema: ReferenceCounter<Schema<K, V>>, entries: I) -> Self
    where
        I: IntoIterator<Item = (usize, ReferenceCounter<V>)>,
    {
        let mut record = Self::empty_with(schema);
        let levels = record.schema.number_of_levels();
        for (index, value) in entries {
            record.root.insert_in_place(index, levels, value);
        }
        record
    }

    pub(crate) const fn schema_handle(&self) -> &ReferenceCounter<Schema<K, V>> {
        &self.schema
    }

    /// Returns a new record with `value` stored at `index`.
    pub(crate) fn set_at(&self, index: usize, value: ReferenceCounter<V>) -> Self {
        Self {
            schema: self.schema.clone(),
            root: self.root.assoc(index, self.schema.number_of_levels(), value),
        }
    }

    fn lookup_at(&self, index: usize) -> Option<&V> {
        self.root
            .lookup(index, self.schema.number_of_levels())
            .or_else(|| self.schema.default_at(index))
    }

    /// Returns the schema this record belongs to.
    #[inline]
    pub fn schema(&self) -> &Schema<K, V> {
        &self.schema
    }
}

impl<K: Hash + Eq, V> TrieRecord<K, V> {
    /// Returns the value for `key`.
    ///
    /// Returns the stored value if `key` was set, the schema default if it
    /// was not, and `None` if `key` is not declared.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_trie::record::TrieRecordFamily;
    ///
    /// let family = TrieRecordFamily::new([("a", 13), ("b", 0)]);
    /// let record = family.create([("a", 14)]);
    ///
    /// assert_eq!(record.get("a"), Some(&14));
    /// assert_eq!(record.get("b"), Some(&0));
    /// assert_eq!(record.get("c"), None);
    /// ```
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        RecordView::get(self, key)
    }

    /// Returns `true` if `key` is declared by the schema.
    #[inline]
    pub fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.schema.contains_key(key)
    }

    /// Returns a new record with `key` bound to `value`.
    ///
    /// The receiver is left unchanged. Only the nodes on the path to the
    /// key's slot are copied. Setting an undeclared key is a no-op that
    /// returns a record equal to (and sharing everything with) `self`.
    ///
    /// # Complexity
    ///
    /// O(log32 N)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_trie::record::TrieRecordFamily;
    ///
    /// let family = TrieRecordFamily::new([("a", 0), ("b", 0)]);
    /// let record = family.empty();
    /// let updated = record.set("a", 15);
    ///
    /// assert_eq!(updated.get("a"), Some(&15));
    /// assert_eq!(record.get("a"), Some(&0)); // Original unchanged
    /// ```
    #[must_use]
    pub fn set<Q>(&self, key: &Q, value: V) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.try_set(key, value).unwrap_or_else(|_| self.clone())
    }

    /// Like [`set`](Self::set), but reports an undeclared key.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UndeclaredKey`] if `key` is not declared.
    pub fn try_set<Q>(&self, key: &Q, value: V) -> Result<Self, RecordError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.schema.index_of(key).ok_or(RecordError::UndeclaredKey)?;
        Ok(self.set_at(index, ReferenceCounter::new(value)))
    }

    /// Returns a new record with the value of `key` replaced by
    /// `function(current)`.
    ///
    /// Undeclared keys are a no-op.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_trie::record::TrieRecordFamily;
    ///
    /// let family = TrieRecordFamily::new([("count", 0)]);
    /// let record = family.empty().update("count", |count| count + 1);
    /// assert_eq!(record.get("count"), Some(&1));
    /// ```
    #[must_use]
    pub fn update<Q, F>(&self, key: &Q, function: F) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> V,
    {
        match self.schema.index_of(key) {
            Some(index) => match self.lookup_at(index) {
                Some(current) => self.set_at(index, ReferenceCounter::new(function(current))),
                None => self.clone(),
            },
            None => self.clone(),
        }
    }

    /// Returns a new record with every `(key, value)` pair applied.
    ///
    /// Undeclared keys are skipped. Nodes shared with `self` are copied once;
    /// nodes created by this call are written in place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_trie::record::TrieRecordFamily;
    ///
    /// let family = TrieRecordFamily::new([("a", 0), ("b", 0), ("c", 0)]);
    /// let record = family.empty();
    /// let merged = record.merge([("a", 1), ("c", 3), ("z", 26)]);
    ///
    /// assert_eq!(merged.get("a"), Some(&1));
    /// assert_eq!(merged.get("b"), Some(&0));
    /// assert_eq!(merged.get("c"), Some(&3));
    /// assert_eq!(record.get("a"), Some(&0)); // Original unchanged
    /// ```
    #[must_use]
    pub fn merge<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut merged = self.clone();
        let levels = self.schema.number_of_levels();
        for (key, value) in entries {
            if let Some(index) = self.schema.index_of(&key) {
                merged
                    .root
                    .insert_in_place(index, levels, ReferenceCounter::new(value));
            }
        }
        merged
    }

    /// Returns an iterator over every declared key and its resolved value,
    /// in declaration order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_trie::record::TrieRecordFamily;
    ///
    /// let family = TrieRecordFamily::new([("a", 1), ("b", 2)]);
    /// let record = family.create([("b", 20)]);
    /// let entries: Vec<(&&str, &i32)> = record.iter().collect();
    /// assert_eq!(entries, vec![(&"a", &1), (&"b", &20)]);
    /// ```
    pub fn iter(&self) -> Entries<'_, K, V, Self> {
        self.entries()
    }
}

impl<K: Hash + Eq, V> RecordView<K, V> for TrieRecord<K, V> {
    #[inline]
    fn schema(&self) -> &Schema<K, V> {
        &self.schema
    }

    #[inline]
    fn value_at(&self, index: usize) -> Option<&V> {
        self.lookup_at(index)
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a TrieRecord<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V, TrieRecord<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two records are equal when they belong to the same schema and resolve
/// every key to equal values.
impl<K: Hash + Eq, V: PartialEq> PartialEq for TrieRecord<K, V> {
    fn eq(&self, other: &Self) -> bool {
        view::resolved_eq(self, other)
    }
}

impl<K: Hash + Eq, V: Eq> Eq for TrieRecord<K, V> {}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug> fmt::Debug for TrieRecord<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + fmt::Display, V: fmt::Display> fmt::Display for TrieRecord<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        view::display_entries(self.iter(), formatter)
    }
}

// =============================================================================
// Tests
// =============================================================================
