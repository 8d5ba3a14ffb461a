//! Record families: factories bound to one schema.
//!
//! A family is created once per record shape from the default value of
//! every key. It owns the shared [`Schema`] and produces instances of that
//! shape:
//!
//! - [`RecordFamily`] produces [`Record`]s that start out thin and move to a
//!   trie on their first write
//! - [`TrieRecordFamily`] produces [`TrieRecord`]s directly
//!
//! Families are cheap to clone; clones share the schema and therefore
//! recognise each other's instances.

use std::fmt;
use std::hash::Hash;

use super::ReferenceCounter;
use super::error::RecordError;
use super::instance::Record;
use super::key::RecordKey;
use super::schema::Schema;
use super::thin::ThinRecord;
use super::trie::TrieRecord;

// =============================================================================
// RecordFamily
// =============================================================================

/// Factory for [`Record`]s of one schema.
///
/// Instances are created thin: they hold the supplied values and build a
/// trie only when first written to.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::RecordFamily;
///
/// let family = RecordFamily::new([("a", 18), ("b", 0)]);
/// let record = family.create([("b", 7), ("extra", 1)]);
///
/// assert_eq!(record.get("a"), Some(&18));
/// assert_eq!(record.get("b"), Some(&7));
/// assert_eq!(record.get("extra"), None); // undeclared keys are inert
/// assert!(family.is_instance(&record));
///
/// // Re-wrapping an instance of the family returns it unchanged
/// let same = family.wrap(record.clone()).unwrap();
/// assert_eq!(same, record);
/// ```
pub struct RecordFamily<K, V> {
    schema: ReferenceCounter<Schema<K, V>>,
}

impl<K, V> Clone for RecordFamily<K, V> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> RecordFamily<K, V> {
    /// Declares a family from the default value of every key.
    ///
    /// The iteration order of `defaults` is the declaration order of the
    /// keys.
    pub fn new<I>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            schema: ReferenceCounter::new(Schema::new(defaults)),
        }
    }
}

impl<K: RecordKey, V> RecordFamily<K, V> {
    /// Declares a family over every key of a [`RecordKey`] enumeration.
    pub fn for_keys<F>(mut default_for: F) -> Self
    where
        F: FnMut(&K) -> V,
    {
        Self::new(K::KEYS.iter().map(|key| (key.clone(), default_for(key))))
    }
}

impl<K, V> RecordFamily<K, V> {
    /// Returns the schema shared by every instance of this family.
    #[inline]
    pub fn schema(&self) -> &Schema<K, V> {
        &self.schema
    }

    /// Returns the family producing trie records over the same schema.
    ///
    /// Instances of either family are interchangeable through
    /// [`wrap`](Self::wrap).
    pub fn trie_family(&self) -> TrieRecordFamily<K, V> {
        TrieRecordFamily {
            schema: self.schema.clone(),
        }
    }

    /// Returns `true` if `record` is a thin record of this family.
    ///
    /// A record stops being an instance once it has been written to: the
    /// write produces a trie record.
    pub fn is_instance(&self, record: &Record<K, V>) -> bool {
        record.is_thin() && ReferenceCounter::ptr_eq(&self.schema, record.schema_handle())
    }

    /// Returns `true` if `record` belongs to this family's schema, in either
    /// representation.
    pub fn owns(&self, record: &Record<K, V>) -> bool {
        ReferenceCounter::ptr_eq(&self.schema, record.schema_handle())
    }

    /// Hands an existing record back to the family.
    ///
    /// A record of this family's schema is returned unchanged, whatever its
    /// representation; nothing is copied.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ForeignSchema`] if `record` was produced from a
    /// different schema.
    pub fn wrap(&self, record: Record<K, V>) -> Result<Record<K, V>, RecordError> {
        if self.owns(&record) {
            Ok(record)
        } else {
            Err(RecordError::ForeignSchema {
                family: "RecordFamily",
            })
        }
    }
}

impl<K: Hash + Eq, V> RecordFamily<K, V> {
    /// Creates a thin record holding `values`.
    ///
    /// Keys the schema does not declare are accepted and never observable.
    pub fn create<I>(&self, values: I) -> Record<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Record::Thin(ThinRecord::new(self.schema.clone(), values))
    }

    /// Creates a thin record where every key holds its default.
    pub fn empty(&self) -> Record<K, V> {
        self.create(std::iter::empty())
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RecordFamily<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RecordFamily")
            .field("schema", &self.schema)
            .finish()
    }
}

// =============================================================================
// TrieRecordFamily
// =============================================================================

/// Factory for [`TrieRecord`]s of one schema.
///
/// Every instance is trie-backed from the start: creating one allocates the
/// trie and writes the supplied values into it.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::TrieRecordFamily;
///
/// let family = TrieRecordFamily::new([("a", 13), ("b", 0)]);
/// let record = family.create([("a", 14), ("b", 1)]);
///
/// assert_eq!(record.get("a"), Some(&14));
/// assert_eq!(record.get("b"), Some(&1));
/// ```
pub struct TrieRecordFamily<K, V> {
    schema: ReferenceCounter<Schema<K, V>>,
}

impl<K, V> Clone for TrieRecordFamily<K, V> {
    fn clone(&self) -> Self {
        Self {
            schema: self.schema.clone(),
        }
    }
}

impl<K: Hash + Eq + Clone, V> TrieRecordFamily<K, V> {
    /// Declares a family from the default value of every key.
    pub fn new<I>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            schema: ReferenceCounter::new(Schema::new(defaults)),
        }
    }
}

impl<K: RecordKey, V> TrieRecordFamily<K, V> {
    /// Declares a family over every key of a [`RecordKey`] enumeration.
    pub fn for_keys<F>(mut default_for: F) -> Self
    where
        F: FnMut(&K) -> V,
    {
        Self::new(K::KEYS.iter().map(|key| (key.clone(), default_for(key))))
    }
}

impl<K, V> TrieRecordFamily<K, V> {
    /// Returns the schema shared by every instance of this family.
    #[inline]
    pub fn schema(&self) -> &Schema<K, V> {
        &self.schema
    }

    /// Returns the family producing thin-first records over the same schema.
    pub fn record_family(&self) -> RecordFamily<K, V> {
        RecordFamily {
            schema: self.schema.clone(),
        }
    }

    /// Returns `true` if `record` belongs to this family's schema.
    pub fn is_instance(&self, record: &TrieRecord<K, V>) -> bool {
        ReferenceCounter::ptr_eq(&self.schema, record.schema_handle())
    }

    /// Hands an existing record back to the family, unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::ForeignSchema`] if `record` was produced from a
    /// different schema.
    pub fn wrap(&self, record: TrieRecord<K, V>) -> Result<TrieRecord<K, V>, RecordError> {
        if self.is_instance(&record) {
            Ok(record)
        } else {
            Err(RecordError::ForeignSchema {
                family: "TrieRecordFamily",
            })
        }
    }

    /// Creates a trie record where every key holds its default.
    ///
    /// No value slot is populated.
    pub fn empty(&self) -> TrieRecord<K, V> {
        TrieRecord::empty_with(self.schema.clone())
    }
}

impl<K: Hash + Eq, V> TrieRecordFamily<K, V> {
    /// Creates a trie record holding `values`.
    ///
    /// Keys the schema does not declare are skipped. A key given more than
    /// once keeps its last value.
    pub fn create<I>(&self, values: I) -> TrieRecord<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let schema = &self.schema;
        let entries = values.into_iter().filter_map(|(key, value)| {
            Some((schema.index_of(&key)?, ReferenceCounter::new(value)))
        });
        TrieRecord::seeded(schema.clone(), entries)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TrieRecordFamily<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("TrieRecordFamily")
            .field("schema", &self.schema)
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_wrap_returns_same_instance() {
        let family = RecordFamily::new([("a", 1)]);
        let record = family.create([("a", 2)]);
        let Ok(Record::Thin(wrapped)) = family.wrap(record.clone()) else {
            panic!("expected a thin record");
        };
        let Record::Thin(original) = &record else {
            panic!("expected a thin record");
        };
        assert!(ReferenceCounter::ptr_eq(
            wrapped.values_handle(),
            original.values_handle()
        ));
    }

    #[rstest]
    fn test_wrap_accepts_promoted_instance() {
        let family = RecordFamily::new([("a", 1)]);
        let promoted = family.empty().set("a", 2);
        assert!(!family.is_instance(&promoted));
        assert!(family.owns(&promoted));
        assert_eq!(family.wrap(promoted.clone()), Ok(promoted));
    }

    #[rstest]
    fn test_wrap_rejects_foreign_schema() {
        let first = RecordFamily::new([("a", 1)]);
        let second = RecordFamily::new([("a", 1)]);
        assert_eq!(
            second.wrap(first.empty()),
            Err(RecordError::ForeignSchema {
                family: "RecordFamily"
            })
        );
    }

    #[rstest]
    fn test_clone_shares_schema() {
        let family = RecordFamily::new([("a", 1)]);
        let cloned = family.clone();
        assert!(cloned.is_instance(&family.empty()));
    }

    #[rstest]
    fn test_trie_family_shares_schema() {
        let family = RecordFamily::new([("a", 1), ("b", 2)]);
        let trie_family = family.trie_family();
        let record = trie_family.create([("a", 3)]);
        assert!(family.owns(&Record::from(record.clone())));
        assert!(trie_family.record_family().is_instance(&family.empty()));
        assert_eq!(Record::from(record), family.create([("a", 3)]));
    }

    #[rstest]
    fn test_trie_family_wrap_rejects_foreign_schema() {
        let first = TrieRecordFamily::new([("a", 1)]);
        let second = TrieRecordFamily::new([("a", 1)]);
        assert_eq!(
            second.wrap(first.empty()).unwrap_err(),
            RecordError::ForeignSchema {
                family: "TrieRecordFamily"
            }
        );
    }

    #[rstest]
    fn test_trie_family_create_last_duplicate_wins() {
        let family = TrieRecordFamily::new([("a", 0)]);
        let record = family.create([("a", 1), ("a", 2)]);
        assert_eq!(record.get("a"), Some(&2));
    }

    #[rstest]
    fn test_trie_family_ignores_undeclared_single_key() {
        let family = TrieRecordFamily::new([("a", 0)]);
        let record = family.create([("c", 13)]);
        assert_eq!(record.get("a"), Some(&0));
        assert_eq!(record.get("c"), None);
    }

    #[rstest]
    fn test_debug() {
        let family = TrieRecordFamily::new([("a", 1)]);
        assert_eq!(
            format!("{family:?}"),
            r#"TrieRecordFamily { schema: Schema { number_of_levels: 0, defaults: {"a": 1} } }"#
        );
    }
}
