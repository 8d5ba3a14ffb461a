//! Record instances as produced by a [`RecordFamily`](super::RecordFamily).

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use super::ReferenceCounter;
use super::error::RecordError;
use super::schema::Schema;
use super::thin::ThinRecord;
use super::trie::TrieRecord;
use super::view::{self, Entries, RecordView};

/// A record instance in either representation.
///
/// Records start out [`Thin`](Record::Thin) and become
/// [`Trie`](Record::Trie) on their first `set`. Both answer every read the
/// same way; the representation only decides what a write costs.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::RecordFamily;
///
/// let family = RecordFamily::new([("a", 0), ("b", 0), ("c", 0)]);
/// let first = family.create([("a", 11), ("c", 13)]);
/// let second = first.set("a", 15);
///
/// assert!(first.is_thin());
/// assert!(second.is_trie());
/// assert_eq!(first.get("a"), Some(&11));
/// assert_eq!(second.get("a"), Some(&15));
/// assert_eq!(second.get("c"), Some(&13));
/// ```
pub enum Record<K, V> {
    /// Holds the values the record was created with.
    Thin(ThinRecord<K, V>),
    /// Holds a 32-way trie.
    Trie(TrieRecord<K, V>),
}

impl<K, V> Clone for Record<K, V> {
    fn clone(&self) -> Self {
        match self {
            Self::Thin(record) => Self::Thin(record.clone()),
            Self::Trie(record) => Self::Trie(record.clone()),
        }
    }
}

impl<K, V> Record<K, V> {
    pub(crate) const fn schema_handle(&self) -> &ReferenceCounter<Schema<K, V>> {
        match self {
            Self::Thin(record) => record.schema_handle(),
            Self::Trie(record) => record.schema_handle(),
        }
    }

    /// Returns the schema this record belongs to.
    #[inline]
    pub fn schema(&self) -> &Schema<K, V> {
        self.schema_handle()
    }

    /// Returns `true` if no write has happened on this record yet.
    #[inline]
    pub const fn is_thin(&self) -> bool {
        matches!(self, Self::Thin(_))
    }

    /// Returns `true` if this record is backed by a trie.
    #[inline]
    pub const fn is_trie(&self) -> bool {
        matches!(self, Self::Trie(_))
    }
}

impl<K: Hash + Eq, V> Record<K, V> {
    /// Returns the value for `key`.
    ///
    /// Returns the stored value if `key` was set, the schema default if it
    /// was not, and `None` if `key` is not declared.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use record_trie::record::RecordFamily;
    ///
    /// let family = RecordFamily::new([("a", Some(18)), ("b", Some(99))]);
    /// let record = family.create([("b", None)]);
    ///
    /// assert_eq!(record.get("a"), Some(&Some(18)));
    /// assert_eq!(record.get("b"), Some(&None));
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
        self.schema().contains_key(key)
    }

    /// Returns a new record with `key` bound to `value`.
    ///
    /// The receiver is left unchanged. A thin record is promoted: the result
    /// is always a [`Record::Trie`] for a declared key. Setting an undeclared
    /// key is a no-op that returns a clone of the receiver in its current
    /// representation.
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
        match self {
            Self::Thin(record) => record.try_set(key, value).map(Self::Trie),
            Self::Trie(record) => record.try_set(key, value).map(Self::Trie),
        }
    }

    /// Returns a new record with the value of `key` replaced by
    /// `function(current)`. Undeclared keys are a no-op.
    #[must_use]
    pub fn update<Q, F>(&self, key: &Q, function: F) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        F: FnOnce(&V) -> V,
    {
        if !self.has(key) {
            return self.clone();
        }
        match self {
            Self::Thin(record) => record.update(key, function),
            Self::Trie(record) => Self::Trie(record.update(key, function)),
        }
    }

    /// Returns a trie-backed record with every `(key, value)` pair applied.
    /// Undeclared keys are skipped.
    #[must_use]
    pub fn merge<I>(&self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        match self {
            Self::Thin(record) => Self::Trie(record.merge(entries)),
            Self::Trie(record) => Self::Trie(record.merge(entries)),
        }
    }

    /// Converts this record into its trie representation.
    ///
    /// A trie-backed record is returned as is; a thin record is seeded into
    /// a fresh trie.
    pub fn into_trie(self) -> TrieRecord<K, V> {
        match self {
            Self::Thin(record) => record.to_trie(),
            Self::Trie(record) => record,
        }
    }

    /// Returns an iterator over every declared key and its resolved value,
    /// in declaration order.
    pub fn iter(&self) -> Entries<'_, K, V, Self> {
        self.entries()
    }
}

impl<K: Hash + Eq, V> RecordView<K, V> for Record<K, V> {
    #[inline]
    fn schema(&self) -> &Schema<K, V> {
        self.schema_handle()
    }

    #[inline]
    fn value_at(&self, index: usize) -> Option<&V> {
        match self {
            Self::Thin(record) => record.value_at(index),
            Self::Trie(record) => record.value_at(index),
        }
    }
}

impl<K, V> From<ThinRecord<K, V>> for Record<K, V> {
    fn from(record: ThinRecord<K, V>) -> Self {
        Self::Thin(record)
    }
}

impl<K, V> From<TrieRecord<K, V>> for Record<K, V> {
    fn from(record: TrieRecord<K, V>) -> Self {
        Self::Trie(record)
    }
}

impl<'a, K: Hash + Eq, V> IntoIterator for &'a Record<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Entries<'a, K, V, Record<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Equality ignores the representation: a thin record and a trie record of
/// the same schema are equal when every key resolves to an equal value.
impl<K: Hash + Eq, V: PartialEq> PartialEq for Record<K, V> {
    fn eq(&self, other: &Self) -> bool {
        view::resolved_eq(self, other)
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Record<K, V> {}

impl<K: Hash + Eq + fmt::Debug, V: fmt::Debug> fmt::Debug for Record<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thin(record) => formatter.debug_tuple("Thin").field(record).finish(),
            Self::Trie(record) => formatter.debug_tuple("Trie").field(record).finish(),
        }
    }
}

impl<K: Hash + Eq + fmt::Display, V: fmt::Display> fmt::Display for Record<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        view::display_entries(self.iter(), formatter)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::super::RecordFamily;
    use rstest::rstest;

    #[rstest]
    fn test_set_undeclared_key_keeps_representation() {
        let family = RecordFamily::new([("a", 1)]);
        let record = family.create([("a", 2)]);
        let unchanged = record.set("b", 3);
        assert!(unchanged.is_thin());
        assert_eq!(unchanged, record);
    }

    #[rstest]
    fn test_equality_across_representations() {
        let family = RecordFamily::new([("a", 1), ("b", 2)]);
        let thin = family.create([("a", 10)]);
        let trie = family.empty().set("a", 10);
        assert!(thin.is_thin());
        assert!(trie.is_trie());
        assert_eq!(thin, trie);
    }

    #[rstest]
    fn test_update_promotes() {
        let family = RecordFamily::new([("count", 1)]);
        let record = family.empty().update("count", |count| count + 1);
        assert!(record.is_trie());
        assert_eq!(record.get("count"), Some(&2));
    }

    #[rstest]
    fn test_merge_promotes_once() {
        let family = RecordFamily::new([("a", 0), ("b", 0)]);
        let record = family.create([("a", 1)]).merge([("b", 2)]);
        assert!(record.is_trie());
        assert_eq!(record.get("a"), Some(&1));
        assert_eq!(record.get("b"), Some(&2));
    }

    #[rstest]
    fn test_into_trie_keeps_values() {
        let family = RecordFamily::new([("a", 0), ("b", 0)]);
        let trie = family.create([("b", 5)]).into_trie();
        assert_eq!(trie.get("a"), Some(&0));
        assert_eq!(trie.get("b"), Some(&5));
    }

    #[rstest]
    fn test_debug_shows_representation() {
        let family = RecordFamily::new([("a", 1)]);
        let thin = family.empty();
        assert_eq!(format!("{thin:?}"), r#"Thin({"a": 1})"#);
        assert_eq!(format!("{:?}", thin.set("a", 2)), r#"Trie({"a": 2})"#);
    }
}
