//! Record schema: declared keys, defaults and key-index assignment.
//!
//! A [`Schema`] is built once per record shape and shared by reference by
//! every instance of that shape. Building it assigns each declared key a
//! dense integer index in declaration order; that index is the path the
//! trie follows for the key. Nothing about a schema changes afterwards.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::node::BITS_PER_LEVEL;

// =============================================================================
// Key Index Map
// =============================================================================

/// Hasher used by key-index maps.
///
/// `FxHash` when the `fxhash` feature is enabled, `AHash` when only the
/// `ahash` feature is enabled, and the standard library's `SipHash`
/// otherwise.
#[cfg(feature = "fxhash")]
pub type KeyIndexHasher = rustc_hash::FxBuildHasher;

/// Hasher used by key-index maps.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type KeyIndexHasher = ahash::RandomState;

/// Hasher used by key-index maps.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type KeyIndexHasher = std::collections::hash_map::RandomState;

/// Mapping from declared key to its dense index.
pub type KeyIndexMap<K> = HashMap<K, usize, KeyIndexHasher>;

/// Assigns every key a dense index starting at 0, in iteration order.
///
/// A key that appears more than once keeps the index of its first
/// occurrence, so indices stay dense.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::assign_key_indices;
///
/// let indices = assign_key_indices(["name", "age", "email"]);
/// assert_eq!(indices["name"], 0);
/// assert_eq!(indices["age"], 1);
/// assert_eq!(indices["email"], 2);
/// ```
pub fn assign_key_indices<K, I>(keys: I) -> KeyIndexMap<K>
where
    K: Hash + Eq,
    I: IntoIterator<Item = K>,
{
    let keys = keys.into_iter();
    let mut indices =
        KeyIndexMap::with_capacity_and_hasher(keys.size_hint().0, KeyIndexHasher::default());
    for key in keys {
        let next_index = indices.len();
        indices.entry(key).or_insert(next_index);
    }
    indices
}

/// Returns the trie depth needed to address `key_count` keys.
///
/// Each level consumes 5 bits of a key's index, so the depth is
/// `ceil(log2(key_count) / 5)`. Schemas with zero or one key need no
/// branching at all and store their value directly at the root.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::number_of_levels;
///
/// assert_eq!(number_of_levels(1), 0);
/// assert_eq!(number_of_levels(2), 1);
/// assert_eq!(number_of_levels(32), 1);
/// assert_eq!(number_of_levels(33), 2);
/// assert_eq!(number_of_levels(1024), 2);
/// assert_eq!(number_of_levels(1025), 3);
/// ```
#[must_use]
pub const fn number_of_levels(key_count: usize) -> usize {
    if key_count <= 1 {
        return 0;
    }
    let index_bits = (usize::BITS - (key_count - 1).leading_zeros()) as usize;
    index_bits.div_ceil(BITS_PER_LEVEL)
}

// =============================================================================
// Schema Definition
// =============================================================================

/// The fixed shape of a record family.
///
/// Holds the declared keys in declaration order, one default value per key,
/// the key-index map and the trie depth derived from the key count.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::Schema;
///
/// let schema = Schema::new([("a", 1), ("b", 2), ("c", 3)]);
/// assert_eq!(schema.len(), 3);
/// assert_eq!(schema.index_of("b"), Some(1));
/// assert_eq!(schema.default_value("c"), Some(&3));
/// assert_eq!(schema.default_value("z"), None);
/// ```
pub struct Schema<K, V> {
    keys: Vec<K>,
    defaults: Vec<V>,
    indices: KeyIndexMap<K>,
    number_of_levels: usize,
}

impl<K: Hash + Eq + Clone, V> Schema<K, V> {
    /// Builds a schema from `(key, default)` pairs in declaration order.
    ///
    /// If a key is declared twice it keeps its first position and the last
    /// default wins.
    pub fn new<I>(defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = defaults.into_iter().collect();
        let indices = assign_key_indices(entries.iter().map(|(key, _)| key.clone()));

        let mut keys: Vec<Option<K>> = (0..indices.len()).map(|_| None).collect();
        let mut values: Vec<Option<V>> = (0..indices.len()).map(|_| None).collect();
        for (key, default) in entries {
            if let Some(&index) = indices.get(&key) {
                keys[index] = Some(key);
                values[index] = Some(default);
            }
        }

        let keys: Vec<K> = keys.into_iter().flatten().collect();
        let defaults: Vec<V> = values.into_iter().flatten().collect();
        let number_of_levels = number_of_levels(keys.len());

        #[cfg(feature = "tracing")]
        tracing::debug!(
            key_count = keys.len(),
            number_of_levels,
            "record schema constructed"
        );

        Self {
            keys,
            defaults,
            indices,
            number_of_levels,
        }
    }
}

impl<K: Hash + Eq, V> Schema<K, V> {
    /// Returns the dense index assigned to `key`, or `None` if undeclared.
    #[inline]
    pub fn index_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.indices.get(key).copied()
    }

    /// Returns `true` if `key` is declared.
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.indices.contains_key(key)
    }

    /// Returns the default value declared for `key`.
    pub fn default_value<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index_of(key).and_then(|index| self.default_at(index))
    }
}

impl<K, V> Schema<K, V> {
    /// Returns the number of declared keys.
    #[inline]
    pub const fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if no key is declared.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the trie depth used by instances of this schema.
    #[inline]
    pub const fn number_of_levels(&self) -> usize {
        self.number_of_levels
    }

    /// Returns the declared keys in declaration order.
    #[inline]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Returns the key assigned to `index`.
    #[inline]
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    /// Returns the default value of the key assigned to `index`.
    #[inline]
    pub fn default_at(&self, index: usize) -> Option<&V> {
        self.defaults.get(index)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Schema<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Schema")
            .field("number_of_levels", &self.number_of_levels)
            .field(
                "defaults",
                &DebugEntries {
                    keys: &self.keys,
                    values: &self.defaults,
                },
            )
            .finish()
    }
}

struct DebugEntries<'a, K, V> {
    keys: &'a [K],
    values: &'a [V],
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for DebugEntries<'_, K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.keys.iter().zip(self.values))
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
