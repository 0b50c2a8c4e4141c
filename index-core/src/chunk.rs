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

//! A sorted list of sibling trie nodes.

use crate::error::Error;
use crate::node::TrieNode;

/// An ordered list of trie nodes, sorted strictly ascending by the first
/// byte of each node's edge label. No two nodes in a chunk ever share a
/// first byte: colliding insertions are resolved by splitting the existing
/// node on its longest common prefix with the new key (see [`TrieChunk::split`]).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TrieChunk {
    nodes: Vec<TrieNode>,
}

impl TrieChunk {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn node(&self, index: usize) -> &TrieNode {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut TrieNode {
        &mut self.nodes[index]
    }

    /// Binary search for the sibling whose edge starts with `key[0]`.
    ///
    /// Returns `Ok(index)` on a match, `Err(insertion_point)` otherwise —
    /// the position at which a node with that first byte should be
    /// inserted to preserve sort order.
    pub(crate) fn locate(&self, key: &[u8]) -> Result<usize, usize> {
        let Some(&first) = key.first() else {
            return Err(0);
        };

        let mut low = 0usize;
        let mut high = self.nodes.len();
        while low < high {
            let mid = low + (high - low) / 2;
            let mid_first = self.nodes[mid].edge()[0];
            match mid_first.cmp(&first) {
                std::cmp::Ordering::Equal => return Ok(mid),
                std::cmp::Ordering::Less => low = mid + 1,
                std::cmp::Ordering::Greater => high = mid,
            }
        }
        Err(low)
    }

    /// Splices `node` at `index`, preserving the ascending-first-byte
    /// invariant. `index >= len()` appends.
    pub(crate) fn insert_node(&mut self, index: usize, node: TrieNode) {
        if index >= self.nodes.len() {
            self.nodes.push(node);
        } else {
            self.nodes.insert(index, node);
        }
    }

    /// Inserts a node with a first byte that must not already be present in
    /// this chunk. A first-byte collision is a caller precondition
    /// violation: all non-split insertions are expected to use a fresh
    /// first byte, with [`TrieChunk::split`] responsible for making room
    /// when an existing edge needs to be broken up.
    pub(crate) fn add_node(&mut self, node: TrieNode) -> Result<(), Error> {
        match self.locate(node.edge()) {
            Ok(_) => Err(Error::InvariantViolated),
            Err(index) => {
                self.insert_node(index, node);
                Ok(())
            }
        }
    }

    /// Splits the node at `index` on its longest common prefix with an
    /// incoming key, `common_len` bytes long (inclusive, matching
    /// [`TrieNode::prefix_offset`]'s convention).
    ///
    /// The node's edge is truncated to the shared prefix and its previous
    /// value pack and child chunk move to a freshly created node carrying
    /// the edge tail, reachable through a new chunk. That new chunk is
    /// returned so the caller can insert the incoming key's own new sibling
    /// node into it.
    pub(crate) fn split(&mut self, index: usize, common_len: usize) -> &mut TrieChunk {
        let node = &mut self.nodes[index];

        let tail = node.edge()[common_len + 1..].to_vec();
        let mut tail_node = TrieNode::new(tail);
        tail_node.set_value(node.take_value());
        tail_node.set_children(node.take_children());

        let mut tail_chunk = TrieChunk::new();
        tail_chunk.nodes.push(tail_node);

        node.set_edge(node.edge()[..=common_len].to_vec());
        node.set_children(Some(Box::new(tail_chunk)));

        node.children_mut().expect("just attached above")
    }
}
