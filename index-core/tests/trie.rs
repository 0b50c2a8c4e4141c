// Copyright 2024 Wladimir Palant
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Integration tests exercising `Trie` through its public surface only.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use index_core::Trie;

fn be(value: u64) -> [u8; 8] {
    value.to_be_bytes()
}

#[test]
fn seed_scenario_mixed_inserts_and_lookups() {
    let mut trie = Trie::new();
    trie.put(&be(1234567), 1, 1234567).unwrap();
    trie.put(&be(1234567), 1, 7654321).unwrap();
    trie.put(&be(1236789), 1, 1234568).unwrap();
    trie.put(&be(1256789), 1, 8654321).unwrap();

    assert_eq!(trie.get(&be(1234567)), vec![1234567, 7654321]);
    assert_eq!(trie.get(&be(1236789)), vec![1234568]);
    assert_eq!(trie.get(&be(1256789)), vec![8654321]);
    assert_eq!(trie.get(&be(9999999)), Vec::<u64>::new());
}

#[test]
fn range_query_over_a_large_random_key_set_matches_a_linear_scan() {
    let mut rng = StdRng::seed_from_u64(0x1234_5678_9abc_def1);
    let mut trie = Trie::new();
    let mut reference = Vec::new();

    for id in 1..=20_000u64 {
        let key: u64 = rng.random();
        trie.put(&be(key), 1, id).unwrap();
        reference.push((key, id));
    }

    let start = 1_000_000_000u64;
    let end = 3_000_000_000u64;

    let mut expected: Vec<u64> = reference
        .iter()
        .filter(|(key, _)| *key >= start && *key <= end)
        .map(|(_, id)| *id)
        .collect();
    expected.sort_unstable();
    expected.dedup();

    let mut actual = trie.range_query(&be(start), &be(end)).unwrap();
    actual.sort_unstable();
    actual.dedup();

    assert_eq!(actual, expected);
}

#[test]
fn range_query_covering_the_entire_key_space_returns_every_identifier() {
    let mut trie = Trie::new();
    let mut expected: Vec<u64> = Vec::new();
    for (i, key) in [42u64, 7, 1000, 999_999, 123_456, 5].into_iter().enumerate() {
        let id = i as u64 + 1;
        trie.put(&be(key), 1, id).unwrap();
        expected.push(id);
    }
    expected.sort_unstable();

    let mut actual = trie
        .range_query(&be(u64::MIN), &be(u64::MAX))
        .unwrap();
    actual.sort_unstable();

    assert_eq!(actual, expected);
}

#[test]
fn split_then_lookup_each_sibling_independently() {
    let mut trie = Trie::new();
    trie.put(b"ABCDE", 7, 100).unwrap();
    trie.put(b"ABCXY", 7, 200).unwrap();

    assert_eq!(trie.get(b"ABCDE"), vec![100]);
    assert_eq!(trie.get(b"ABCXY"), vec![200]);
    assert_eq!(trie.get(b"ABC"), Vec::<u64>::new());
    assert_eq!(trie.get(b"ABCDEF"), Vec::<u64>::new());
}
