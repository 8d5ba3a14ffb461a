//! IAI-Callgrind benchmark for record operations.
//!
//! Measures instruction counts for creation, reads, writes and promotion.
//!
//! # Data Sizes
//!
//! - **create / get / set**: 32, 1024, 32768 keys (one, two and three trie levels)
//! - **promote**: 1024 keys, thin record holding every value
//!
//! Setup functions build the family and the record outside the measurement.

use iai_callgrind::{library_benchmark, library_benchmark_group, main};
use record_trie::record::{Record, RecordFamily, TrieRecord, TrieRecordFamily};
use std::hint::black_box;

fn setup_family(key_count: usize) -> TrieRecordFamily<usize, usize> {
    TrieRecordFamily::new((0..key_count).map(|index| (index, index)))
}

fn setup_trie(key_count: usize) -> TrieRecord<usize, usize> {
    let family = setup_family(key_count);
    family.create((0..key_count).step_by(2).map(|index| (index, index * 2)))
}

fn setup_thin(key_count: usize) -> Record<usize, usize> {
    let family = RecordFamily::new((0..key_count).map(|index| (index, index)));
    family.create((0..key_count).map(|index| (index, index * 2)))
}

#[library_benchmark]
#[bench::keys_32(setup_family(32))]
#[bench::keys_1024(setup_family(1024))]
#[bench::keys_32768(setup_family(32768))]
fn create_half_populated(family: TrieRecordFamily<usize, usize>) -> TrieRecord<usize, usize> {
    let key_count = family.schema().len();
    black_box(family.create((0..key_count).step_by(2).map(|index| (index, index * 2))))
}

#[library_benchmark]
#[bench::keys_32(setup_trie(32))]
#[bench::keys_1024(setup_trie(1024))]
#[bench::keys_32768(setup_trie(32768))]
fn get_sequential(record: TrieRecord<usize, usize>) -> usize {
    let mut sum = 0;
    for index in 0..record.schema().len() {
        if let Some(&value) = record.get(black_box(&index)) {
            sum += value;
        }
    }
    black_box(sum)
}

#[library_benchmark]
#[bench::keys_32(setup_trie(32))]
#[bench::keys_1024(setup_trie(1024))]
#[bench::keys_32768(setup_trie(32768))]
fn set_single(record: TrieRecord<usize, usize>) -> TrieRecord<usize, usize> {
    let key = record.schema().len() / 2;
    black_box(record.set(black_box(&key), 0))
}

#[library_benchmark]
#[bench::keys_1024(setup_trie(1024))]
fn merge_quarter(record: TrieRecord<usize, usize>) -> TrieRecord<usize, usize> {
    let key_count = record.schema().len();
    black_box(record.merge((0..key_count).step_by(4).map(|index| (index, 0))))
}

#[library_benchmark]
#[bench::keys_1024(setup_thin(1024))]
fn promote(record: Record<usize, usize>) -> Record<usize, usize> {
    black_box(record.set(black_box(&0), 1))
}

#[library_benchmark]
#[bench::keys_1024(setup_thin(1024))]
fn get_thin(record: Record<usize, usize>) -> usize {
    let mut sum = 0;
    for index in 0..record.schema().len() {
        if let Some(&value) = record.get(black_box(&index)) {
            sum += value;
        }
    }
    black_box(sum)
}

library_benchmark_group!(
    name = record_group;
    benchmarks =
        create_half_populated,
        get_sequential,
        set_single,
        merge_quarter,
        promote,
        get_thin
);

main!(library_benchmark_groups = record_group);
