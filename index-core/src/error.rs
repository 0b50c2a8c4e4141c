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

/// Combinatorial error for the trie/value-pack core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// `RangeQuery` was called with `start` lexicographically greater than `end`.
    #[error("range query start key is greater than end key")]
    InvalidRange,

    /// Two value packs with conflicting non-zero tags were merged.
    #[error("cannot merge value packs with conflicting tags")]
    TagMismatch,

    /// A merge was attempted with a missing operand.
    #[error("cannot merge with a nil value pack operand")]
    NilOperand,

    /// An internal structural invariant was violated. Should not occur; if it
    /// does, it indicates a bug in the trie rather than a caller error.
    #[error("internal trie invariant violated")]
    InvariantViolated,
}
