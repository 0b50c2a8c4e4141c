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

//! Attribute-keyed façade over [`index_core`]: named, independently-typed
//! attributes, build-time validation of their key widths, and an identifier
//! sequencer, assembled into a single entry point.
//!
//! ```
//! use index::Facade;
//!
//! let mut facade = Facade::builder()
//!     .attribute("sip", 32, 0)
//!     .attribute("dip", 32, 0)
//!     .init_sequence(10_000)
//!     .build()
//!     .unwrap();
//!
//! let id = facade.next_id();
//! facade.put("sip", &[10, 0, 0, 1], id).unwrap();
//! assert_eq!(facade.get("sip", &[10, 0, 0, 1]).unwrap(), vec![id]);
//! ```

mod bytes;
mod error;
mod facade;
mod index;
mod sequencer;

pub use crate::bytes::big_endian_bytes;
pub use crate::error::IndexError;
pub use crate::facade::{Facade, FacadeBuilder};
pub use crate::index::{AttributeSpec, Index};
pub use crate::sequencer::IdSequencer;
