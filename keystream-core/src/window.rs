// File:    window.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Sliding window of precomputed hashes with candidate and confirmer indexes.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The sliding window over the hash sequence.
//!
//! The cache owns the indices `[cursor, cursor + memory)`. For each of them it
//! keeps the hash if it is a candidate (holds a run of three) and records the
//! index under every character that forms a run of five. Entries leave only
//! through [`WindowCache::advance`].

use crate::error::{KeyStreamError, Result};
use crate::hash_source::HashSource;
use crate::runs::{first_triplet, scan_runs};
use log::{info, trace};
use std::collections::{BTreeMap, HashMap, VecDeque};

/// A hash holding a run of three, retained while its index is in the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// Position of the hash in the sequence.
    pub index: u64,
    /// The hash itself.
    pub hash: String,
}

/// Sliding window of size `memory` over a [`HashSource`].
#[derive(Debug)]
pub struct WindowCache<S> {
    source: S,
    seed: String,
    stretch: u32,
    memory: u64,
    cursor: u64,
    stopped: bool,
    candidates: BTreeMap<u64, String>,
    confirmers: HashMap<char, VecDeque<u64>>,
}

impl<S: HashSource> WindowCache<S> {
    /// Creates the cache and precomputes indices `0..memory`.
    ///
    /// If the source runs out of indices while filling the window, the cache
    /// starts out stopped.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStreamError::InvalidConfig`] when `memory` is zero.
    pub fn new(source: S, seed: impl Into<String>, memory: usize, stretch: u32) -> Result<Self> {
        if memory == 0 {
            return Err(KeyStreamError::InvalidConfig(
                "memory must be greater than zero".to_string(),
            ));
        }
        let memory = u64::try_from(memory)
            .map_err(|_| KeyStreamError::InvalidConfig(format!("memory {memory} is too large")))?;

        let mut cache = Self {
            source,
            seed: seed.into(),
            stretch,
            memory,
            cursor: 0,
            stopped: false,
            candidates: BTreeMap::new(),
            confirmers: HashMap::new(),
        };
        for index in 0..memory {
            if !cache.grow(index) {
                break;
            }
        }
        Ok(cache)
    }

    /// Lowest index still live in the window.
    #[must_use]
    pub const fn cursor(&self) -> u64 {
        self.cursor
    }

    /// Size of the window.
    #[must_use]
    pub const fn memory(&self) -> u64 {
        self.memory
    }

    /// Whether the index space has been exhausted. This state is terminal.
    #[must_use]
    pub const fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Indices currently held as candidates, in increasing order.
    pub fn candidate_indices(&self) -> impl Iterator<Item = u64> + '_ {
        self.candidates.keys().copied()
    }

    /// Indices whose hash holds a run of five `ch`, if any remain in the window.
    #[must_use]
    pub fn confirmer_indices(&self, ch: char) -> Option<&VecDeque<u64>> {
        self.confirmers.get(&ch)
    }

    /// Characters that currently have at least one confirmer in the window.
    pub fn confirmer_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.confirmers.keys().copied()
    }

    /// Moves the window forward by one index.
    ///
    /// Returns the candidate that sat at the old cursor, if any. After this
    /// call the window holds `[cursor, cursor + memory)` minus any indices the
    /// source could not produce.
    pub fn advance(&mut self) -> Option<CandidateRecord> {
        let leaving = self.cursor;
        let candidate = self
            .candidates
            .get(&leaving)
            .map(|hash| CandidateRecord {
                index: leaving,
                hash: hash.clone(),
            });

        self.cursor += 1;
        self.evict();

        if !self.stopped {
            self.grow(leaving + self.memory);
        }

        candidate
    }

    /// Whether the triplet character of `candidate_hash` has a confirmer in the window.
    ///
    /// Only meaningful after [`WindowCache::advance`] has evicted and grown for
    /// the current step.
    #[must_use]
    pub fn is_confirmed(&self, candidate_hash: &str) -> bool {
        first_triplet(candidate_hash)
            .and_then(|ch| self.confirmers.get(&ch))
            .is_some_and(|indices| !indices.is_empty())
    }

    fn evict(&mut self) {
        let cursor = self.cursor;
        // Only entries below the cursor are stale; each list is in index order.
        while let Some((&index, _)) = self.candidates.first_key_value() {
            if index >= cursor {
                break;
            }
            self.candidates.remove(&index);
            trace!("Evicted candidate at index {index}");
        }
        self.confirmers.retain(|ch, indices| {
            while indices.front().is_some_and(|&index| index < cursor) {
                indices.pop_front();
            }
            if indices.is_empty() {
                trace!("No confirmers left for '{ch}'");
            }
            !indices.is_empty()
        });
    }

    /// Hashes `index` and records it. Returns `false` once the source is exhausted.
    fn grow(&mut self, index: u64) -> bool {
        match self.source.hash(&self.seed, index, self.stretch) {
            Ok(hash) => {
                self.record(index, hash);
                true
            }
            Err(e) => {
                info!("Hash source exhausted: {e}");
                self.stopped = true;
                false
            }
        }
    }

    fn record(&mut self, index: u64, hash: String) {
        let scan = scan_runs(&hash);
        for ch in scan.quintuplets {
            self.confirmers.entry(ch).or_default().push_back(index);
        }
        if scan.triplet.is_some() {
            self.candidates.insert(index, hash);
        }
    }
}
