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

//! Integer-to-key encoding helper for callers working with integer
//! attribute values rather than raw bytes.

/// Encodes `value` as a big-endian byte string `byte_len / 8` bytes long.
///
/// Corrects the original implementation's `IntXXToBytes`, which divided the
/// declared bit length by `4` instead of `8` and shifted by whole bytes
/// (`v >> i`) instead of `i * 8` bits, silently truncating any value that
/// didn't fit in the resulting (too-short, wrongly-endian) buffer.
///
/// `byte_len` is a bit count (as in [`crate::AttributeSpec::byte_len`]), not
/// a byte count — matching the `Facade`/`FacadeBuilder` surface, which deals
/// exclusively in bit widths.
pub fn big_endian_bytes(value: u64, byte_len: u32) -> Vec<u8> {
    let len = (byte_len / 8) as usize;
    let mut buf = vec![0u8; len];
    for (i, byte) in buf.iter_mut().enumerate() {
        let shift = (len - 1 - i) * 8;
        *byte = (value >> shift) as u8;
    }
    buf
}
