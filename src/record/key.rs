//! Compile-time key enumerations.

use std::hash::Hash;

/// A closed set of record keys, usually a fieldless enum.
///
/// Implement it with `#[derive(RecordKey)]`, which also generates read-only
/// field accessors for every record over the enum. A schema built from a
/// `RecordKey` with [`RecordFamily::for_keys`](super::RecordFamily::for_keys)
/// declares every variant, in declaration order.
///
/// # Examples
///
/// ```rust
/// use record_trie::record::{RecordFamily, RecordKey};
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Axis {
///     X,
///     Y,
/// }
///
/// impl RecordKey for Axis {
///     const KEYS: &'static [Self] = &[Self::X, Self::Y];
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::X => "X",
///             Self::Y => "Y",
///         }
///     }
/// }
///
/// let family = RecordFamily::for_keys(|_: &Axis| 0.0);
/// let point = family.create([(Axis::Y, 2.5)]);
/// assert_eq!(point.get(&Axis::X), Some(&0.0));
/// assert_eq!(point.get(&Axis::Y), Some(&2.5));
/// ```
pub trait RecordKey: Clone + Eq + Hash + 'static {
    /// Every key, in declaration order.
    const KEYS: &'static [Self];

    /// The name the key was declared with.
    fn name(&self) -> &'static str;
}
