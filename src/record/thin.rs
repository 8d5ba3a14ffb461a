//! Lightweight record instances that defer building a trie.
//!
//! A [`ThinRecord`] keeps the values it was created from and answers reads
//! straight from them. The first write seeds a full [`TrieRecord`] from those
//! values and applies the write to it, so records that are only ever read
//! never pay for a trie.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::ReferenceCounter;
use super::error::RecordError;
use super::instance::Record;
use super::schema::{KeyIndexHasher, Schema};
use super::trie::TrieRecord;
use super::view::{self, Entries, RecordView};

type Values<K, V> = HashMap<K, ReferenceCounter<V>, KeyIndexHasher>;

// =============================================================================
// ThinRecord Definition
// =============================================================================

/// A record instance holding only the values it was created with.
///
/// Reads resolve against the held values and fall back to the schema
/// defaults. Writes to a declared key return a trie-backed [`Record`]; the
/// thin record itself never changes. Keys that the schema does not declare may be held but are never
/// observable.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::{Record, RecordFamily};
///
/// let family = RecordFamily::new([("a", Some(18)), ("b", Some(7))]);
/// let Record::Thin(thin) = family.create([("b", None)]) else {
///     unreachable!()
/// };
///
/// assert_eq!(thin.get("a"), Some(&Some(18))); // default
/// assert_eq!(thin.get("b"), Some(&None)); // explicitly stored
///
/// let trie = thin.set("a", Some(19));
/// assert!(trie.is_trie());
/// assert_eq!(trie.get("a"), Some(&Some(19)));
/// assert_eq!(trie.get("b"), Some(&None));
///
/// assert!(thin.set("z", Some(0)).is_thin()); // undeclared: no-op
/// ```
pub struct ThinRecord<K, V> {
    schema: ReferenceCounter<Schema<K, V>>,
    values: ReferenceCounter<Values<K, V>>,
}

impl<K, V> Clone for ThinRecord<K, V> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
            values: self.values.clone(),
        }
    }
}

impl<K, V> ThinRecord<K, V> {
    pub(crate) const fn schema_handle(&self) -> &ReferenceCounter<Schema<K, V>> {
        &self.schema
    }

    #[cfg(test)]
    pub(crate) const fn values_handle(&self) -> &ReferenceCounter<Values<K, V>> {
        &self.values
    }

    /// Returns the schema this record belongs to.
    #[inline]
    pub fn schema(&self) -> &Schema<K, V> {
        &self.schema
    }
}

impl<K: Hash + Eq, V> ThinRecord<K, V> {
    /// Creates a thin record holding `values` as given.
    pub(crate) fn new<I>(schema: ReferenceCounter<Schema<K, V>>, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let values = values
            .into_iter()
            .map(|(key, value)| (key, ReferenceCounter::new(value)))
            .collect::<Values<K, V>>();
        Self {
            schema,
            values: ReferenceCounter::new(values),
        }
    }

    /// Returns the value for `key`.
    ///
    /// Returns the held value if `key` was supplied and is declared, the
    /// schema default if it was not supplied, and `None` if `key` is not
    /// declared.
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

    /// Builds a trie record holding every declared value of this record.
    ///
    /// Undeclared values are left behind. The result is a fresh trie that
    /// shares the stored values, not the nodes, of any other record.
    pub fn to_trie(&self) -> TrieRecord<K, V> {
        #[cfg(feature = "tracing")]
        tracing::trace!(
            held_values = self.values.len(),
            key_count = self.schema.len(),
            "promoting thin record to trie"
        );

        TrieRecord::seeded(self.schema.clone(), self.declared_values())
    }

    fn declared_values(&self) -> impl Iterator<Item = (usize, ReferenceCounter<V>)> + '_ {
        self.values
            .iter()
            .filter_map(|(key, value)| Some((self.schema.index_of(key)?, value.clone())))
    }

    /// Returns a record with `key` bound to `value`.
    ///
    /// Runs in two phases: a fresh trie is seeded with every declared value
    /// held by this record, then `key` is written with one path-copying
    /// `set`. The result is a [`Record::Trie`] and the thin record is left
    /// unchanged. Setting an undeclared key is a no-op: no trie is built and
    /// a [`Record::Thin`] sharing this record's values is returned.
    ///
    /// # Complexity
    ///
    /// O(N + log32 N) on the first write of a record; later writes happen on
    /// the returned trie and cost O(log32 N). O(1) for an undeclared key.
    #[must_use]
    pub fn set<Q>(&self, key: &Q, value: V) -> Record<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.try_set(key, value)
            .map_or_else(|_| Record::Thin(self.clone()), Record::Trie)
    }

    /// Like [`set`](Self::set), but reports an undeclared key without
    /// building a trie.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::UndeclaredKey`] if `key` is not declared.
    pub fn try_set<Q>(&self, key: &Q, value: V) -> Result<TrieRecord<K, V>, RecordError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.schema.index_of(key).ok_or(RecordError::UndeclaredKey)?;
        Ok(self.to_trie().set_at(index, ReferenceCounter::new(value)))
    }

    /// Returns a record with the value of `key` replaced by
    /// `function(current)`.
    ///
    /// Like [`set`](Self::set), an undeclared key leaves the result thin.
    #[must_use]
    pub fn update<Q, F>(&self, key: &Q, function: F) -> Record<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> V,
    {
        match self.get(key) {
            Some(current) => self.set(key, function(current)),
            None => Record::Thin(self.clone()),
        }
    }

    /// Returns a trie record holding this record's values overridden by
    /// `entries`, seeded in a single pass.
    #[must_use]
    pub fn merge<I>(&self, entries: I) -> TrieRecord<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let overrides = entries.into_iter().filter_map(|(key, value)| {
            Some((self.schema.index_of(&key)?, ReferenceCounter::new(value)))
        });
        TrieRecord::seeded(self.schema.clone(), self.declared_values().chain(overrides))
    }

    /// Returns an iterator over every declared key and its resolved value,
    /// in declaration order.
    pub fn iter(&self) -> Entries<'_, K, V, Self> {
        self.entries()
    }
}

impl<K: Hash + Eq, V> RecordView<K, V> for ThinRecord<K, V> {
    #[inline]
    fn schema(&self) -> &Schema<K, V> {
        &self.schema
    }

    fn value_at(&self, index: usize) -> Option<&V> {
        let key = self.schema.key_at(index)?;
        self.values
            .get(key)
            .map(|value| value.as_ref())
            .or_else(|| self.schema.default_at(index))
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a ThinRecord<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V, ThinRecord<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for ThinRecord<K, V> {
    fn eq(&self, other: &Self) -> bool {
        view::resolved_eq(self, other)
    }
}

impl<K: Hash + Eq, V: Eq> Eq for ThinRecord<K, V> {}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug> fmt::Debug for ThinRecord<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq + fmt::Display, V: fmt::Display> fmt::Display for ThinRecord<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        view::display_entries(self.iter(), formatter)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn thin<const N: usize, const M: usize>(
        defaults: [(&'static str, i32); N],
        values: [(&'static str, i32); M],
    ) -> ThinRecord<&'static str, i32> {
        ThinRecord::new(ReferenceCounter::new(Schema::new(defaults)), values)
    }

    #[rstest]
    fn test_get_held_value() {
        let record = thin([("a", 0), ("b", 0), ("c", 0)], [("a", 11), ("c", 13)]);
        assert_eq!(record.get("a"), Some(&11));
        assert_eq!(record.get("b"), Some(&0));
        assert_eq!(record.get("c"), Some(&13));
    }

    #[rstest]
    fn test_get_undeclared_held_value_is_hidden() {
        let record = thin([("a", 0)], [("c", 13)]);
        assert_eq!(record.get("c"), None);
        assert!(!record.has("c"));
        assert_eq!(record.iter().count(), 1);
    }

    #[rstest]
    fn test_set_promotes_and_keeps_values() {
        let record = thin([("a", 0), ("b", 0), ("c", 0)], [("a", 11), ("c", 13)]);
        let trie = record.set("a", 15);
        assert!(trie.is_trie());
        assert_eq!(trie.get("a"), Some(&15));
        assert_eq!(trie.get("b"), Some(&0));
        assert_eq!(trie.get("c"), Some(&13));
        assert_eq!(record.get("a"), Some(&11));
    }

    #[rstest]
    fn test_set_shares_stored_values() {
        let record = thin([("a", 0), ("b", 0)], [("a", 1), ("b", 2)]);
        let trie = record.set("a", 10);
        let held = record.values.get("b").unwrap();
        assert_eq!(ReferenceCounter::strong_count(held), 2);
        assert_eq!(trie.get("b"), Some(&2));
    }

    #[rstest]
    fn test_set_undeclared_key_stays_thin() {
        let record = thin([("a", 0), ("b", 0)], [("a", 1), ("z", 26)]);
        let Record::Thin(same) = record.set("z", 27) else {
            panic!("an undeclared key must not promote");
        };
        assert!(ReferenceCounter::ptr_eq(same.values_handle(), record.values_handle()));
        assert_eq!(same.get("a"), Some(&1));
        assert_eq!(same.get("z"), None);
    }

    #[rstest]
    fn test_update_undeclared_key_stays_thin() {
        let record = thin([("a", 0)], [("a", 1)]);
        let updated = record.update("z", |value| value + 1);
        assert!(updated.is_thin());
        assert_eq!(updated.get("a"), Some(&1));
    }

    #[rstest]
    fn test_try_set_undeclared_key() {
        let record = thin([("a", 0)], []);
        assert_eq!(record.try_set("z", 1).unwrap_err(), RecordError::UndeclaredKey);
    }

    #[rstest]
    fn test_single_key_schema_promotion() {
        let record = thin([("a", 13)], [("a", 14)]);
        let trie = record.set("a", 15);
        assert_eq!(record.get("a"), Some(&14));
        assert_eq!(trie.get("a"), Some(&15));
    }

    #[rstest]
    fn test_merge_overrides_held_values() {
        let record = thin([("a", 0), ("b", 0), ("c", 0)], [("a", 1), ("b", 2)]);
        let merged = record.merge([("b", 20), ("c", 30), ("x", 99)]);
        assert_eq!(merged.get("a"), Some(&1));
        assert_eq!(merged.get("b"), Some(&20));
        assert_eq!(merged.get("c"), Some(&30));
        assert_eq!(merged.get("x"), None);
    }

    #[rstest]
    fn test_update_uses_default_when_not_held() {
        let record = thin([("count", 5)], []);
        let updated = record.update("count", |count| count * 2);
        assert_eq!(updated.get("count"), Some(&10));
    }

    #[rstest]
    fn test_display() {
        let record = thin([("a", 1), ("b", 2)], [("b", 20), ("q", 0)]);
        assert_eq!(format!("{record}"), "{a: 1, b: 20}");
    }
}
