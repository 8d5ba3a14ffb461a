//! Read access shared by every record representation.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use super::schema::Schema;

/// Read-only view of a record instance.
///
/// Implementors supply the schema and the resolved value for a key index;
/// key-based lookup and iteration are derived from those two. Generated
/// field accessors (see `#[derive(RecordKey)]`) are implemented for every
/// `RecordView`, which is why there is no way to assign a field in place:
/// the only path to a different value is `set`, which returns a new record.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::{RecordFamily, RecordView};
///
/// fn describe<R: RecordView<&'static str, i32>>(record: &R) -> i32 {
///     record.get("width").copied().unwrap_or_default()
///         * record.get("height").copied().unwrap_or_default()
/// }
///
/// let family = RecordFamily::new([("width", 1), ("height", 1)]);
/// assert_eq!(describe(&family.create([("width", 4), ("height", 3)])), 12);
/// ```
pub trait RecordView<K: Hash + Eq, V> {
    /// Returns the schema this record belongs to.
    fn schema(&self) -> &Schema<K, V>;

    /// Returns the value for the key assigned to `index`, falling back to
    /// the schema default.
    fn value_at(&self, index: usize) -> Option<&V>;

    /// Returns the value for `key`.
    ///
    /// The stored value if the key was set, the schema default if it was
    /// not, and `None` if `key` is not declared by the schema.
    fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.value_at(self.schema().index_of(key)?)
    }

    /// Returns `true` if `key` is declared by the schema.
    fn has<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.schema().contains_key(key)
    }

    /// Returns an iterator over every declared key and its resolved value,
    /// in declaration order.
    fn entries(&self) -> Entries<'_, K, V, Self>
    where
        Self: Sized,
    {
        Entries {
            record: self,
            front: 0,
            back: self.schema().len(),
            marker: std::marker::PhantomData,
        }
    }
}

/// Returns `true` if both records belong to the same schema and resolve
/// every key to equal values.
pub(crate) fn resolved_eq<K, V, L, R>(left: &L, right: &R) -> bool
where
    K: Hash + Eq,
    V: PartialEq,
    L: RecordView<K, V> + ?Sized,
    R: RecordView<K, V> + ?Sized,
{
    std::ptr::eq(left.schema(), right.schema())
        && (0..left.schema().len()).all(|index| left.value_at(index) == right.value_at(index))
}

/// Writes entries as `{key: value, key: value}`.
pub(crate) fn display_entries<'a, K, V, I>(
    entries: I,
    formatter: &mut fmt::Formatter<'_>,
) -> fmt::Result
where
    K: fmt::Display + 'a,
    V: fmt::Display + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    write!(formatter, "{{")?;
    let mut first = true;
    for (key, value) in entries {
        if first {
            first = false;
        } else {
            write!(formatter, ", ")?;
        }
        write!(formatter, "{key}: {value}")?;
    }
    write!(formatter, "}}")
}

/// Iterator over the resolved entries of a record.
///
/// Created by [`RecordView::entries`] and the `iter` methods of the record
/// types.
pub struct Entries<'a, K, V, R: ?Sized> {
    record: &'a R,
    front: usize,
    back: usize,
    marker: std::marker::PhantomData<fn() -> (K, V)>,
}

impl<'a, K, V, R> Iterator for Entries<'a, K, V, R>
where
    K: Hash + Eq + 'a,
    V: 'a,
    R: RecordView<K, V> + ?Sized,
{
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            let index = self.front;
            self.front += 1;
            let record: &'a R = self.record;
            if let (Some(key), Some(value)) =
                (record.schema().key_at(index), record.value_at(index))
            {
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<'a, K, V, R> DoubleEndedIterator for Entries<'a, K, V, R>
where
    K: Hash + Eq + 'a,
    V: 'a,
    R: RecordView<K, V> + ?Sized,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        while self.front < self.back {
            self.back -= 1;
            let index = self.back;
            let record: &'a R = self.record;
            if let (Some(key), Some(value)) =
                (record.schema().key_at(index), record.value_at(index))
            {
                return Some((key, value));
            }
        }
        None
    }
}

impl<'a, K, V, R> ExactSizeIterator for Entries<'a, K, V, R>
where
    K: Hash + Eq + 'a,
    V: 'a,
    R: RecordView<K, V> + ?Sized,
{
}

impl<'a, K, V, R> FusedIterator for Entries<'a, K, V, R>
where
    K: Hash + Eq + 'a,
    V: 'a,
    R: RecordView<K, V> + ?Sized,
{
}
