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

//! Build-time attribute registration and the assembled entry point.

use log::warn;

use crate::error::IndexError;
use crate::index::{AttributeSpec, Index};
use crate::sequencer::IdSequencer;

/// Valid key widths, in bits: every nonzero multiple of 8 up to 64.
///
/// Mirrors the original implementation's `isIllegalLen`.
fn is_illegal_byte_len(byte_len: u32) -> bool {
    byte_len == 0 || byte_len > 64 || byte_len % 8 != 0
}

/// Accumulates attribute declarations before validating them into an
/// [`Index`].
///
/// Corresponds to the original implementation's `builder`/`AddAttrItem`.
#[derive(Debug, Default)]
pub struct FacadeBuilder {
    specs: Vec<AttributeSpec>,
    init_sequence: Option<u64>,
}

impl FacadeBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an attribute. If `name` was already registered, this call
    /// is a no-op: the first registration wins, matching the original
    /// implementation's early return on a duplicate name.
    pub fn attribute(&mut self, name: impl Into<String>, byte_len: u32, tag: u32) -> &mut Self {
        let name = name.into();
        if self.specs.iter().any(|spec| spec.name == name) {
            return self;
        }
        self.specs.push(AttributeSpec { name, byte_len, tag });
        self
    }

    /// Sets the identifier sequencer's initial value. Defaults to `0` if
    /// never called.
    pub fn init_sequence(&mut self, value: u64) -> &mut Self {
        self.init_sequence = Some(value);
        self
    }

    /// Validates every registered attribute and assembles the [`Facade`].
    ///
    /// Fails with [`IndexError::IllegalByteLen`] on the first attribute
    /// whose `byte_len` is `0`, greater than `64`, or not a multiple of `8`.
    pub fn build(self) -> Result<Facade, IndexError> {
        for spec in &self.specs {
            if is_illegal_byte_len(spec.byte_len) {
                warn!(
                    "attribute {:?} has illegal byte_len {}",
                    spec.name, spec.byte_len
                );
                return Err(IndexError::IllegalByteLen {
                    name: spec.name.clone(),
                    byte_len: spec.byte_len,
                });
            }
        }

        let sequencer = IdSequencer::new();
        if let Some(value) = self.init_sequence {
            sequencer.init_sequence(value);
        }

        Ok(Facade {
            index: Index::new(self.specs),
            sequencer,
        })
    }
}

/// The assembled index: a validated attribute registry plus an identifier
/// sequencer, ready to serve writes and lookups.
///
/// Corresponds to the original implementation's `engine`.
#[derive(Debug)]
pub struct Facade {
    index: Index,
    sequencer: IdSequencer,
}

impl Facade {
    /// Starts building a new façade.
    pub fn builder() -> FacadeBuilder {
        FacadeBuilder::new()
    }

    /// The underlying attribute registry.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// The underlying attribute registry, mutably.
    pub fn index_mut(&mut self) -> &mut Index {
        &mut self.index
    }

    /// Draws the next identifier from the façade's sequencer.
    pub fn next_id(&self) -> u64 {
        self.sequencer.next()
    }

    /// Inserts `id` under `key` for the named attribute.
    pub fn put(&mut self, attr: &str, key: &[u8], id: u64) -> Result<(), IndexError> {
        self.index.put(attr, key, id)
    }

    /// Looks up `key` exactly for the named attribute.
    pub fn get(&self, attr: &str, key: &[u8]) -> Result<Vec<u64>, IndexError> {
        self.index.get(attr, key)
    }

    /// Looks up the union of identifiers in `[start, end]` for the named
    /// attribute.
    pub fn range_query(&self, attr: &str, start: &[u8], end: &[u8]) -> Result<Vec<u64>, IndexError> {
        self.index.range_query(attr, start, end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_rejects_zero_byte_len() {
        let result = Facade::builder().attribute("sip", 0, 0).build();
        assert!(matches!(result, Err(IndexError::IllegalByteLen { .. })));
    }

    #[test]
    fn build_rejects_byte_len_over_64() {
        let result = Facade::builder().attribute("sip", 65, 0).build();
        assert!(matches!(result, Err(IndexError::IllegalByteLen { .. })));
    }

    #[test]
    fn build_rejects_byte_len_not_a_multiple_of_eight() {
        let result = Facade::builder().attribute("sip", 20, 0).build();
        assert!(matches!(result, Err(IndexError::IllegalByteLen { .. })));
    }

    #[test]
    fn duplicate_attribute_names_keep_the_first_registration() {
        let facade = Facade::builder()
            .attribute("sip", 32, 1)
            .attribute("sip", 64, 9)
            .build()
            .unwrap();

        let spec = facade.index().attribute("sip").unwrap();
        assert_eq!(spec.byte_len(), 32);
        assert_eq!(spec.tag(), 1);
    }

    #[test]
    fn init_sequence_seeds_the_first_next_id() {
        let facade = Facade::builder().init_sequence(10_000).build().unwrap();
        assert_eq!(facade.next_id(), 10_001);
    }

    #[test]
    fn without_init_sequence_ids_start_at_one() {
        let facade = Facade::builder().build().unwrap();
        assert_eq!(facade.next_id(), 1);
    }

    #[test]
    fn end_to_end_put_get_range_query() {
        let mut facade = Facade::builder()
            .attribute("sip", 32, 0)
            .attribute("dip", 32, 0)
            .attribute("svc", 32, 0)
            .init_sequence(10_000)
            .build()
            .unwrap();

        let id = facade.next_id();
        facade.put("sip", &[10, 0, 0, 1], id).unwrap();
        facade.put("dip", &[10, 0, 0, 2], id).unwrap();

        assert_eq!(facade.get("sip", &[10, 0, 0, 1]).unwrap(), vec![id]);
        assert_eq!(facade.get("dip", &[10, 0, 0, 2]).unwrap(), vec![id]);
        assert_eq!(facade.get("svc", &[10, 0, 0, 1]).unwrap(), Vec::<u64>::new());

        assert!(matches!(
            facade.put("unknown", &[0, 0, 0, 0], id),
            Err(IndexError::UnknownAttribute(name)) if name == "unknown"
        ));
    }
}
