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

//! The patricia-style compressed trie: owns the root and implements `put`,
//! `get` and `range_query` by descending the tree, splitting edges on
//! collision and sweeping between two boundary paths for ranges.

use std::cmp::Ordering;

use log::trace;

use crate::chunk::TrieChunk;
use crate::error::Error;
use crate::node::TrieNode;
use crate::valuepack::ValuePack;

/// A compressed trie mapping fixed-width byte keys to sets of 64-bit
/// identifiers.
///
/// The trie owns a synthetic root node with an empty edge label; its child
/// chunk holds the top-level entries. Dropping the `Trie` cascades through
/// every chunk and node it owns — nothing is referenced from outside the
/// tree, so there is no cycle to break.
#[derive(Debug, Clone, Default)]
pub struct Trie {
    root: TrieNode,
}

/// A single step on the boundary path computed for a range endpoint: the
/// chunk visited and the offset of the node within it.
///
/// Two bound nodes refer to the same chunk iff their `chunk` references are
/// the same allocation, which [`Sweep`](Trie::range_query) uses to tell
/// where the left and right paths diverge.
struct BoundNode<'a> {
    chunk: &'a TrieChunk,
    offset: usize,
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `identifier` under `key`, tagging its value pack with `tag`
    /// if this is the first identifier stored at `key`. Idempotent:
    /// inserting the same `(key, identifier)` pair twice is a no-op beyond
    /// the first insertion.
    pub fn put(&mut self, key: &[u8], tag: u32, identifier: u64) -> Result<(), Error> {
        if self.root.children().is_none() {
            self.root.set_children(Some(Box::new(TrieChunk::new())));
        }
        let chunk = self
            .root
            .children_mut()
            .expect("root chunk was just allocated");
        Self::put_into(chunk, key, tag, identifier)
    }

    fn put_into(chunk: &mut TrieChunk, key: &[u8], tag: u32, identifier: u64) -> Result<(), Error> {
        match chunk.locate(key) {
            Err(insertion) => {
                let mut node = TrieNode::new(key.to_vec());
                node.add(tag, identifier);
                chunk.insert_node(insertion, node);
                Ok(())
            }
            Ok(offset) => {
                let common_len = chunk.node(offset).prefix_offset(key) as usize;
                let edge_len = chunk.node(offset).edge().len();

                if common_len + 1 == edge_len {
                    let remainder = &key[common_len + 1..];
                    if remainder.is_empty() {
                        chunk.node_mut(offset).add(tag, identifier);
                        return Ok(());
                    }

                    if chunk.node(offset).children().is_none() {
                        trace!("allocating child chunk to continue descent");
                        chunk
                            .node_mut(offset)
                            .set_children(Some(Box::new(TrieChunk::new())));
                    }
                    let child = chunk
                        .node_mut(offset)
                        .children_mut()
                        .expect("child chunk was just ensured");
                    Self::put_into(child, remainder, tag, identifier)
                } else {
                    trace!("splitting node at common prefix length {common_len}");
                    let split_chunk = chunk.split(offset, common_len);
                    let mut sibling = TrieNode::new(key[common_len + 1..].to_vec());
                    sibling.add(tag, identifier);
                    split_chunk.add_node(sibling)
                }
            }
        }
    }

    /// Looks up `key` exactly, returning the identifiers stored there in
    /// ascending order, or an empty list on any miss.
    pub fn get(&self, key: &[u8]) -> Vec<u64> {
        let Some(mut chunk) = self.root.children() else {
            return Vec::new();
        };
        let mut remainder = key;

        loop {
            let Ok(offset) = chunk.locate(remainder) else {
                return Vec::new();
            };

            let node = chunk.node(offset);
            let common_len = node.prefix_offset(remainder) as usize;
            if common_len + 1 != node.edge().len() {
                return Vec::new();
            }

            remainder = &remainder[common_len + 1..];
            if remainder.is_empty() {
                return node.value().map(ValuePack::unpack).unwrap_or_default();
            }

            match node.children() {
                Some(next) => chunk = next,
                None => return Vec::new(),
            }
        }
    }

    /// Returns the union of identifiers whose keys fall within
    /// `[start, end]` inclusive.
    ///
    /// Fails with [`Error::InvalidRange`] if `start` is lexicographically
    /// greater than `end`.
    pub fn range_query(&self, start: &[u8], end: &[u8]) -> Result<Vec<u64>, Error> {
        match start.cmp(end) {
            Ordering::Greater => Err(Error::InvalidRange),
            Ordering::Equal => Ok(self.get(start)),
            Ordering::Less => {
                let left = self.left_bound(start);
                let right = self.right_bound(end);
                Ok(Self::sweep(&left, &right))
            }
        }
    }

    /// Computes the path to the smallest node whose edge is `>= key`.
    fn left_bound<'a>(&'a self, key: &[u8]) -> Vec<BoundNode<'a>> {
        let mut bounds = Vec::new();
        let Some(mut chunk) = self.root.children() else {
            return bounds;
        };
        let mut remainder = key;

        loop {
            match chunk.locate(remainder) {
                Err(insertion) => {
                    if insertion >= chunk.len() {
                        left_bound_next(&mut bounds);
                    } else {
                        left_bound_all(chunk, insertion, &mut bounds);
                    }
                    return bounds;
                }
                Ok(offset) => {
                    let node = chunk.node(offset);
                    let common_len = node.prefix_offset(remainder) as usize;

                    if node.edge().len() > common_len + 1 {
                        let tail_remainder = &remainder[common_len + 1..];
                        let tail_edge = &node.edge()[common_len + 1..];
                        if tail_remainder > tail_edge && offset + 1 == chunk.len() {
                            left_bound_next(&mut bounds);
                        } else {
                            left_bound_all(chunk, offset, &mut bounds);
                        }
                        return bounds;
                    }

                    bounds.push(BoundNode { chunk, offset });

                    remainder = &remainder[common_len + 1..];
                    if remainder.is_empty() {
                        return bounds;
                    }

                    match node.children() {
                        Some(next) => chunk = next,
                        None => return bounds,
                    }
                }
            }
        }
    }

    /// Computes the path to the largest node whose edge is `<= key`.
    fn right_bound<'a>(&'a self, key: &[u8]) -> Vec<BoundNode<'a>> {
        let mut bounds = Vec::new();
        let Some(mut chunk) = self.root.children() else {
            return bounds;
        };
        let mut remainder = key;

        loop {
            match chunk.locate(remainder) {
                Err(insertion) => {
                    if insertion == 0 {
                        right_bound_prev(&mut bounds);
                    } else {
                        right_bound_all(chunk, insertion - 1, &mut bounds);
                    }
                    return bounds;
                }
                Ok(offset) => {
                    let node = chunk.node(offset);
                    let common_len = node.prefix_offset(remainder) as usize;

                    if node.edge().len() > common_len + 1 {
                        let tail_remainder = &remainder[common_len + 1..];
                        let tail_edge = &node.edge()[common_len + 1..];
                        if tail_remainder < tail_edge && offset == 0 {
                            right_bound_prev(&mut bounds);
                        } else {
                            right_bound_all(chunk, offset, &mut bounds);
                        }
                        return bounds;
                    }

                    bounds.push(BoundNode { chunk, offset });

                    remainder = &remainder[common_len + 1..];
                    if remainder.is_empty() {
                        return bounds;
                    }

                    match node.children() {
                        Some(next) => chunk = next,
                        None => return bounds,
                    }
                }
            }
        }
    }

    /// Unions the value packs recorded by two boundary paths: everything at
    /// or between `left` and `right`.
    fn sweep(left: &[BoundNode<'_>], right: &[BoundNode<'_>]) -> Vec<u64> {
        let mut accumulator = ValuePack::new(0, 0);
        let mut i = 0;

        while i < left.len() && i < right.len() {
            let l = &left[i];
            let r = &right[i];
            if !std::ptr::eq(l.chunk, r.chunk) {
                break;
            }

            record_bound_node(l.chunk, l.offset, &mut accumulator);
            if l.offset != r.offset {
                record_bound_node(r.chunk, r.offset, &mut accumulator);
                if l.offset + 1 < r.offset {
                    record_range(l.chunk, l.offset + 1, r.offset - 1, &mut accumulator);
                }
            }

            i += 1;
        }

        for l in &left[i..] {
            record_bound_node(l.chunk, l.offset, &mut accumulator);
            if l.offset + 1 < l.chunk.len() {
                record_range(l.chunk, l.offset + 1, l.chunk.len() - 1, &mut accumulator);
            }
        }

        for r in &right[i..] {
            record_bound_node(r.chunk, r.offset, &mut accumulator);
            if r.offset >= 1 {
                record_range(r.chunk, 0, r.offset - 1, &mut accumulator);
            }
        }

        accumulator.unpack()
    }
}

/// Pops boundary records until finding an ancestor with an unused following
/// sibling, then advances to it. Used when a `LeftBound` descent runs past
/// the last sibling at some level.
fn left_bound_next(bounds: &mut Vec<BoundNode<'_>>) {
    while let Some(last) = bounds.last_mut() {
        if last.offset + 1 < last.chunk.len() {
            last.offset += 1;
            return;
        }
        bounds.pop();
    }
}

/// Mirror of [`left_bound_next`] for `RightBound`: steps back to the
/// nearest ancestor with an unused preceding sibling.
fn right_bound_prev(bounds: &mut Vec<BoundNode<'_>>) {
    while let Some(last) = bounds.last_mut() {
        if last.offset >= 1 {
            last.offset -= 1;
            return;
        }
        bounds.pop();
    }
}

/// Records `(chunk, index)` then extends the path down through each level's
/// first child, to the leftmost leaf.
fn left_bound_all<'a>(chunk: &'a TrieChunk, index: usize, bounds: &mut Vec<BoundNode<'a>>) {
    bounds.push(BoundNode { chunk, offset: index });

    let mut node = chunk.node(index);
    while let Some(next) = node.children() {
        bounds.push(BoundNode {
            chunk: next,
            offset: 0,
        });
        node = next.node(0);
    }
}

/// Mirror of [`left_bound_all`]: extends the path down through each level's
/// last child, to the rightmost leaf.
fn right_bound_all<'a>(chunk: &'a TrieChunk, index: usize, bounds: &mut Vec<BoundNode<'a>>) {
    bounds.push(BoundNode { chunk, offset: index });

    let mut node = chunk.node(index);
    while let Some(next) = node.children() {
        let last = next.len() - 1;
        bounds.push(BoundNode {
            chunk: next,
            offset: last,
        });
        node = next.node(last);
    }
}

/// Merges the value pack of the node at `(chunk, index)` into `accumulator`,
/// if any.
fn record_bound_node(chunk: &TrieChunk, index: usize, accumulator: &mut ValuePack) {
    if let Some(value) = chunk.node(index).value() {
        accumulator.merge_into(value);
    }
}

/// Records every node in `chunk[start..=end]` together with their full
/// subtrees.
fn record_range(chunk: &TrieChunk, start: usize, end: usize, accumulator: &mut ValuePack) {
    for index in start..=end {
        record_subtree(chunk, index, accumulator);
    }
}

/// Records a node's own value pack and recursively every node reachable
/// through its child chunk, to all depths.
fn record_subtree(chunk: &TrieChunk, index: usize, accumulator: &mut ValuePack) {
    record_bound_node(chunk, index, accumulator);

    if let Some(children) = chunk.node(index).children() {
        for child_index in 0..children.len() {
            record_subtree(children, child_index, accumulator);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn be_bytes(value: u64) -> [u8; 8] {
        value.to_be_bytes()
    }

    #[test]
    fn membership_after_write() {
        let mut trie = Trie::new();
        trie.put(&be_bytes(1234567), 1, 1234567).unwrap();
        assert_eq!(trie.get(&be_bytes(1234567)), vec![1234567]);
    }

    #[test]
    fn seed_scenario_put_and_get() {
        let mut trie = Trie::new();
        trie.put(&be_bytes(1234567), 1, 1234567).unwrap();
        trie.put(&be_bytes(1234567), 1, 7654321).unwrap();
        trie.put(&be_bytes(1236789), 1, 1234568).unwrap();
        trie.put(&be_bytes(1256789), 1, 8654321).unwrap();

        assert_eq!(trie.get(&be_bytes(1234567)), vec![1234567, 7654321]);
        assert_eq!(trie.get(&be_bytes(1236789)), vec![1234568]);
        assert_eq!(trie.get(&be_bytes(1256789)), vec![8654321]);
    }

    #[test]
    fn get_on_miss_returns_empty() {
        let mut trie = Trie::new();
        trie.put(&be_bytes(10), 1, 1).unwrap();
        assert_eq!(trie.get(&be_bytes(11)), Vec::<u64>::new());
        assert_eq!(trie.get(&be_bytes(10)[..4]), Vec::<u64>::new());
    }

    #[test]
    fn add_is_idempotent() {
        let mut trie = Trie::new();
        trie.put(&be_bytes(5), 1, 42).unwrap();
        trie.put(&be_bytes(5), 1, 42).unwrap();
        assert_eq!(trie.get(&be_bytes(5)), vec![42]);
    }

    #[test]
    fn split_keeps_siblings_independent() {
        let mut trie = Trie::new();
        trie.put(b"ABCDE", 1, 1).unwrap();
        trie.put(b"ABCXY", 1, 2).unwrap();

        assert_eq!(trie.get(b"ABCDE"), vec![1]);
        assert_eq!(trie.get(b"ABCXY"), vec![2]);
    }

    #[test]
    fn range_query_narrow_window_returns_only_contained_key() {
        let mut trie = Trie::new();
        trie.put(&be_bytes(0x0100), 1, 100).unwrap();
        trie.put(&be_bytes(0x0200), 1, 200).unwrap();
        trie.put(&be_bytes(0x0300), 1, 300).unwrap();

        let mut result = trie
            .range_query(&be_bytes(0x0150), &be_bytes(0x0250))
            .unwrap();
        result.sort_unstable();
        assert_eq!(result, vec![200]);
    }

    #[test]
    fn range_query_single_point() {
        let mut trie = Trie::new();
        trie.put(&be_bytes(9), 1, 5).unwrap();

        assert_eq!(trie.range_query(&be_bytes(9), &be_bytes(9)).unwrap(), vec![5]);
    }

    #[test]
    fn range_query_rejects_inverted_range() {
        let trie = Trie::new();
        assert_eq!(
            trie.range_query(&be_bytes(10), &be_bytes(9)),
            Err(Error::InvalidRange)
        );
    }

    #[test]
    fn range_query_full_span_returns_every_identifier() {
        let mut trie = Trie::new();
        let keys: [u64; 6] = [5, 1000, 42, 999_999, 7, 123_456];
        for (i, key) in keys.iter().enumerate() {
            trie.put(&be_bytes(*key), 1, i as u64 + 1).unwrap();
        }

        let mut result = trie
            .range_query(&be_bytes(0), &be_bytes(u64::MAX))
            .unwrap();
        result.sort_unstable();
        assert_eq!(result, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn disjoint_ranges_do_not_overlap() {
        let mut trie = Trie::new();
        for key in [10u64, 20, 30, 100, 110, 120] {
            trie.put(&be_bytes(key), 1, key).unwrap();
        }

        let mut low = trie.range_query(&be_bytes(0), &be_bytes(50)).unwrap();
        let mut high = trie.range_query(&be_bytes(60), &be_bytes(200)).unwrap();
        low.sort_unstable();
        high.sort_unstable();

        assert_eq!(low, vec![10, 20, 30]);
        assert_eq!(high, vec![100, 110, 120]);

        let mut combined = trie.range_query(&be_bytes(0), &be_bytes(200)).unwrap();
        combined.sort_unstable();
        assert_eq!(combined, vec![10, 20, 30, 100, 110, 120]);
    }
}
