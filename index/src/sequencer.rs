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

//! Lock-free identifier sequencer.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing identifier source, shareable across threads
/// without external locking.
///
/// Matches the original implementation's use of `sync/atomic`'s strongest
/// ordering throughout: both [`IdSequencer::next`] and
/// [`IdSequencer::init_sequence`] use [`Ordering::SeqCst`].
#[derive(Debug, Default)]
pub struct IdSequencer {
    sequence: AtomicU64,
}

impl IdSequencer {
    /// Creates a sequencer starting from `0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically increments the sequence and returns the new value, never
    /// `0`. Mirrors Go's `atomic.AddUint64`, which returns the value *after*
    /// the addition.
    pub fn next(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Resets the sequence to `value`, discarding whatever was there before.
    pub fn init_sequence(&self, value: u64) {
        self.sequence.store(value, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_starts_at_one() {
        let sequencer = IdSequencer::new();
        assert_eq!(sequencer.next(), 1);
        assert_eq!(sequencer.next(), 2);
    }

    #[test]
    fn init_sequence_resets_the_counter() {
        let sequencer = IdSequencer::new();
        sequencer.next();
        sequencer.init_sequence(10_000);
        assert_eq!(sequencer.next(), 10_001);
    }
}
