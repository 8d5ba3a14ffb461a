//! Integration tests for records shared across threads.
//!
//! With the `arc` feature enabled, records and families are `Send + Sync`
//! and can be read and extended from several threads at once.

#![cfg(feature = "arc")]
#![allow(clippy::cast_possible_truncation)]

use record_trie::record::{RecordFamily, TrieRecordFamily};
use rstest::rstest;
use std::sync::Arc;
use std::thread;

#[rstest]
fn test_trie_record_cross_thread_structural_sharing() {
    let family = TrieRecordFamily::new((0..100_usize).map(|index| (index, index)));
    let original = Arc::new(family.empty());

    let handles: Vec<_> = (0..4_usize)
        .map(|thread_index| {
            let record = Arc::clone(&original);
            thread::spawn(move || {
                let updated = record.set(&thread_index, thread_index * 1000);
                assert_eq!(updated.get(&thread_index), Some(&(thread_index * 1000)));
                assert_eq!(record.get(&thread_index), Some(&thread_index));
                updated
            })
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().expect("Thread panicked"))
        .collect();

    for (thread_index, record) in results.iter().enumerate() {
        assert_eq!(record.get(&thread_index), Some(&(thread_index * 1000)));
        assert!(family.is_instance(record));
    }
    for index in 0..100 {
        assert_eq!(original.get(&index), Some(&index));
    }
}

#[rstest]
fn test_family_shared_across_threads() {
    let family = RecordFamily::new([("hits", 0_u64), ("misses", 0_u64)]);

    let handles: Vec<_> = (1..=4_u64)
        .map(|thread_index| {
            let family = family.clone();
            thread::spawn(move || {
                family
                    .create([("hits", thread_index)])
                    .update("misses", |misses| misses + thread_index)
            })
        })
        .collect();

    for (offset, handle) in handles.into_iter().enumerate() {
        let record = handle.join().expect("Thread panicked");
        let thread_index = offset as u64 + 1;
        assert!(family.owns(&record));
        assert_eq!(record.get("hits"), Some(&thread_index));
        assert_eq!(record.get("misses"), Some(&thread_index));
    }
}

#[rstest]
fn test_thin_record_promoted_on_another_thread() {
    let family = RecordFamily::new([("a", String::new()), ("b", String::new())]);
    let thin = family.create([("a", "from main".to_string())]);
    let sent = thin.clone();

    let promoted = thread::spawn(move || sent.set("b", "from worker".to_string()))
        .join()
        .expect("Thread panicked");

    assert!(thin.is_thin());
    assert!(promoted.is_trie());
    assert_eq!(promoted.get("a").map(String::as_str), Some("from main"));
    assert_eq!(promoted.get("b").map(String::as_str), Some("from worker"));
}
