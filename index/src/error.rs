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

/// Errors surfaced by the attribute-keyed façade, on top of whatever
/// [`index_core::Error`] a particular attribute's trie reports.
#[derive(Debug, Clone, thiserror::Error)]
pub enum IndexError {
    /// An [`crate::AttributeSpec`] declared a `byte_len` that is `0`, greater
    /// than `64`, or not a multiple of `8`.
    #[error("attribute {name:?} has illegal byte_len {byte_len} (must be a nonzero multiple of 8, up to 64)")]
    IllegalByteLen {
        /// The offending attribute's name.
        name: String,
        /// The offending `byte_len` value.
        byte_len: u32,
    },

    /// An attribute was registered without ever being given a trie to write
    /// into. Kept for parity with the original implementation's defensive
    /// nil-trie check at build time; unreachable through the public
    /// `FacadeBuilder` API, since every attribute spec is given a fresh trie
    /// as soon as it is added.
    #[error("attribute {0:?} has no trie")]
    MissingTrie(String),

    /// `put`/`get`/`range_query` was called with an attribute name that was
    /// never registered with the façade.
    #[error("unknown attribute {0:?}")]
    UnknownAttribute(String),

    /// The underlying trie/value-pack core reported an error.
    #[error(transparent)]
    Core(#[from] index_core::Error),
}
