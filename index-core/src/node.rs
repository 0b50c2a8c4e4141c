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

//! A single edge of the compressed trie.

use crate::chunk::TrieChunk;
use crate::valuepack::ValuePack;

/// One node of the trie: the bytes consumed to reach it from its parent, an
/// optional value pack (present iff at least one identifier terminates
/// exactly here), and an optional child chunk holding its own children.
///
/// A node's edge is never empty except for the trie's synthetic root.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct TrieNode {
    edge: Vec<u8>,
    value: Option<ValuePack>,
    children: Option<Box<TrieChunk>>,
}

impl TrieNode {
    /// Creates a node with the given edge label and no value or children.
    pub(crate) fn new(edge: Vec<u8>) -> Self {
        Self {
            edge,
            value: None,
            children: None,
        }
    }

    pub(crate) fn edge(&self) -> &[u8] {
        &self.edge
    }

    pub(crate) fn set_edge(&mut self, edge: Vec<u8>) {
        self.edge = edge;
    }

    pub(crate) fn value(&self) -> Option<&ValuePack> {
        self.value.as_ref()
    }

    pub(crate) fn take_value(&mut self) -> Option<ValuePack> {
        self.value.take()
    }

    pub(crate) fn set_value(&mut self, value: Option<ValuePack>) {
        self.value = value;
    }

    pub(crate) fn children(&self) -> Option<&TrieChunk> {
        self.children.as_deref()
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut TrieChunk> {
        self.children.as_deref_mut()
    }

    pub(crate) fn take_children(&mut self) -> Option<Box<TrieChunk>> {
        self.children.take()
    }

    pub(crate) fn set_children(&mut self, children: Option<Box<TrieChunk>>) {
        self.children = children;
    }

    /// Lazily allocates this node's value pack (using `tag` the first time
    /// it is needed) and inserts `identifier` into it.
    pub(crate) fn add(&mut self, tag: u32, identifier: u64) {
        self.value
            .get_or_insert_with(|| ValuePack::new(tag, 0))
            .add(identifier);
    }

    /// The largest index `i` such that `edge[0..=i] == query[0..=i]`, or
    /// `-1` if the first bytes of `edge` and `query` already differ.
    pub(crate) fn prefix_offset(&self, query: &[u8]) -> i64 {
        let mut offset: i64 = -1;
        for (i, (a, b)) in self.edge.iter().zip(query.iter()).enumerate() {
            if a != b {
                break;
            }
            offset = i as i64;
        }
        offset
    }

    /// Whether this node carries neither a value nor any children. Such a
    /// node must never exist in a well-formed trie.
    #[cfg(test)]
    pub(crate) fn is_dangling(&self) -> bool {
        self.value.is_none() && self.children.is_none()
    }
}
