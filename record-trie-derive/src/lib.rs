//! Derive macros for record-trie key enumerations.
//!
//! This crate provides `#[derive(RecordKey)]`, which turns a fieldless enum
//! into a compile-time checked set of record keys and generates read-only
//! field accessors for every record keyed by it.
//!
//! # Example
//!
//! ```rust,ignore
//! use record_trie::RecordKey;
//! use record_trie::record::RecordFamily;
//!
//! #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, RecordKey)]
//! enum Person {
//!     Name,
//!     Age,
//! }
//!
//! // Generated:
//! // - impl RecordKey for Person
//! // - trait PersonFields<V> { fn name(&self) -> Option<&V>; fn age(&self) -> Option<&V>; }
//!
//! let family = RecordFamily::for_keys(|_: &Person| 0);
//! let person = family.create([(Person::Age, 30)]);
//! assert_eq!(person.age(), Some(&30));
//! assert_eq!(person.name(), Some(&0));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod record_key;

use proc_macro::TokenStream;

/// Derive macro for record key enumerations.
///
/// Generates an implementation of `record_trie::record::RecordKey` listing
/// every variant in declaration order, and a trait named `{Enum}Fields<V>`
/// with one accessor per variant. The accessor name is the variant name in
/// `snake_case`. Keywords become raw identifiers; a name that matches a
/// record method (`get`, `schema`, `iter`, ...) or one of `crate`, `self`,
/// `super` and `Self` gets a trailing underscore, so `Get` reads as `get_()`.
///
/// # Requirements
///
/// - The type must be an enum without generic parameters
/// - Every variant must be a unit variant
/// - The enum must implement `Clone`, `Eq` and `Hash`
///
/// # Generated Code
///
/// For `enum Field { FirstName, Age }`, generates:
///
/// ```rust,ignore
/// impl record_trie::record::RecordKey for Field {
///     const KEYS: &'static [Self] = &[Self::FirstName, Self::Age];
///     fn name(&self) -> &'static str { ... }
/// }
///
/// trait FieldFields<V>: record_trie::record::RecordView<Field, V> {
///     fn first_name(&self) -> Option<&V> { ... }
///     fn age(&self) -> Option<&V> { ... }
/// }
///
/// impl<V, R: record_trie::record::RecordView<Field, V> + ?Sized> FieldFields<V> for R {}
/// ```
///
/// # Read-only Access
///
/// Accessors hand out shared references only. Assigning through them does
/// not compile; a different value is only reachable through `set`, which
/// returns a new record.
#[proc_macro_derive(RecordKey)]
pub fn derive_record_key(input: TokenStream) -> TokenStream {
    record_key::derive_record_key_impl(input)
}
