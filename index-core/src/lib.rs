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

//! Core data structures behind a multi-value secondary index: a
//! bitmap-compressed identifier set ([`ValuePack`]) and a patricia-style
//! compressed trie ([`Trie`]) keyed on fixed-width byte strings.
//!
//! This crate has no opinion on attribute names, byte widths or build-time
//! validation — that lives one layer up, in the `index` crate. It only
//! knows how to store and retrieve sets of 64-bit identifiers under byte
//! keys, including by range.

mod chunk;
mod node;
mod trie;
mod valuepack;

pub mod error;

pub use crate::error::Error;
pub use crate::trie::Trie;
pub use crate::valuepack::ValuePack;
