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

//! Attribute-keyed dispatch over a set of independently-tried attributes.

use std::collections::HashMap;

use index_core::Trie;

use crate::error::IndexError;

/// A single attribute's declared shape: the byte width of its keys and the
/// tag stamped onto its value packs.
///
/// Corresponds to the original implementation's `attrItem` struct.
#[derive(Debug, Clone)]
pub struct AttributeSpec {
    pub(crate) name: String,
    pub(crate) byte_len: u32,
    pub(crate) tag: u32,
}

impl AttributeSpec {
    /// The attribute's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared key width, in bits.
    pub fn byte_len(&self) -> u32 {
        self.byte_len
    }

    /// The tag stamped onto this attribute's value packs.
    pub fn tag(&self) -> u32 {
        self.tag
    }
}

struct AttributeEntry {
    spec: AttributeSpec,
    trie: Trie,
}

/// A registry of named attributes, each backed by its own trie.
///
/// Built exclusively through [`crate::FacadeBuilder`], which validates every
/// attribute's `byte_len` before an `Index` ever comes into existence.
#[derive(Default)]
pub struct Index {
    attributes: HashMap<String, AttributeEntry>,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("attributes", &self.attributes.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Index {
    pub(crate) fn new(specs: Vec<AttributeSpec>) -> Self {
        let attributes = specs
            .into_iter()
            .map(|spec| {
                let name = spec.name.clone();
                (name, AttributeEntry { spec, trie: Trie::new() })
            })
            .collect();
        Self { attributes }
    }

    fn entry(&self, attr: &str) -> Result<&AttributeEntry, IndexError> {
        self.attributes
            .get(attr)
            .ok_or_else(|| IndexError::UnknownAttribute(attr.to_string()))
    }

    fn entry_mut(&mut self, attr: &str) -> Result<&mut AttributeEntry, IndexError> {
        self.attributes
            .get_mut(attr)
            .ok_or_else(|| IndexError::UnknownAttribute(attr.to_string()))
    }

    /// The declared spec for `attr`, if registered.
    pub fn attribute(&self, attr: &str) -> Option<&AttributeSpec> {
        self.attributes.get(attr).map(|entry| &entry.spec)
    }

    /// Checks that `key` is exactly the attribute's declared `byte_len / 8`
    /// bytes long. Every trie belonging to an attribute assumes a fixed key
    /// width; a key of any other length would drive `Trie::put_into`'s split
    /// branch into constructing a node with an empty edge label, violating
    /// the trie's invariant that only the synthetic root may have one.
    fn check_key_len(spec: &AttributeSpec, key: &[u8]) -> Result<(), IndexError> {
        let expected = (spec.byte_len / 8) as usize;
        if key.len() == expected {
            Ok(())
        } else {
            Err(IndexError::Core(index_core::Error::InvariantViolated))
        }
    }

    /// Inserts `id` under `key` for the named attribute.
    pub fn put(&mut self, attr: &str, key: &[u8], id: u64) -> Result<(), IndexError> {
        let entry = self.entry_mut(attr)?;
        Self::check_key_len(&entry.spec, key)?;
        entry.trie.put(key, entry.spec.tag, id)?;
        Ok(())
    }

    /// Looks up `key` exactly for the named attribute.
    pub fn get(&self, attr: &str, key: &[u8]) -> Result<Vec<u64>, IndexError> {
        let entry = self.entry(attr)?;
        Self::check_key_len(&entry.spec, key)?;
        Ok(entry.trie.get(key))
    }

    /// Looks up the union of identifiers in `[start, end]` for the named
    /// attribute.
    pub fn range_query(&self, attr: &str, start: &[u8], end: &[u8]) -> Result<Vec<u64>, IndexError> {
        let entry = self.entry(attr)?;
        Self::check_key_len(&entry.spec, start)?;
        Self::check_key_len(&entry.spec, end)?;
        Ok(entry.trie.range_query(start, end)?)
    }
}
