// File:    generator.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Pull-based stream of confirmed one-time pad keys driven over the window cache.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::config::GeneratorConfig;
use crate::error::{KeyStreamError, Result};
use crate::hash_source::{DigestHashSource, HashSource};
use crate::window::WindowCache;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// A confirmed key: a candidate hash whose triplet was matched by a run of five ahead of it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Key {
    /// 1-based position of the key in the stream.
    pub ordinal: usize,
    /// Index of the hash in the sequence.
    pub index: u64,
    /// The hash that became the key.
    pub hash: String,
}

/// Lazily yields keys in increasing index order.
///
/// The stream consumes its window as it goes and cannot be restarted. Once
/// the index space is exhausted every further call to `next` returns `None`.
#[derive(Debug)]
pub struct KeyStream<S> {
    cache: WindowCache<S>,
    produced: usize,
}

impl KeyStream<DigestHashSource> {
    /// Builds a stream over the real digest described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStreamError::InvalidConfig`] if `config` does not validate.
    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let source = DigestHashSource::new(config.algorithm, config.max_index);
        debug!(
            "Hashing with {} up to index {}",
            source.algorithm(),
            source.max_index()
        );
        Self::new(source, config)
    }
}

impl<S: HashSource> KeyStream<S> {
    /// Builds a stream over `source`, precomputing the first window.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStreamError::InvalidConfig`] if `config` does not validate.
    pub fn new(source: S, config: &GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Self::with_window(source, &config.seed, config.memory, config.stretch)
    }

    /// Builds a stream from bare window parameters, without the full configuration.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStreamError::InvalidConfig`] when `memory` is zero.
    pub fn with_window(source: S, seed: &str, memory: usize, stretch: u32) -> Result<Self> {
        let cache = WindowCache::new(source, seed, memory, stretch)?;
        Ok(Self { cache, produced: 0 })
    }

    /// Whether the index space has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cache.is_stopped()
    }

    /// The window the stream is driving.
    #[must_use]
    pub const fn window(&self) -> &WindowCache<S> {
        &self.cache
    }

    /// Collects the next `n` keys.
    ///
    /// # Errors
    ///
    /// Returns [`KeyStreamError::InsufficientKeys`] if the stream ends first.
    pub fn generate(&mut self, n: usize) -> Result<Vec<Key>> {
        let mut keys = Vec::with_capacity(n);
        while keys.len() < n {
            match self.next() {
                Some(key) => keys.push(key),
                None => {
                    return Err(KeyStreamError::InsufficientKeys {
                        requested: n,
                        produced: keys.len(),
                    });
                }
            }
        }
        Ok(keys)
    }
}

impl<S: HashSource> Iterator for KeyStream<S> {
    type Item = Key;

    fn next(&mut self) -> Option<Key> {
        while !self.cache.is_stopped() {
            let Some(candidate) = self.cache.advance() else {
                continue;
            };
            if self.cache.is_confirmed(&candidate.hash) {
                self.produced += 1;
                debug!(
                    "Key {} confirmed at index {}: {}",
                    self.produced, candidate.index, candidate.hash
                );
                return Some(Key {
                    ordinal: self.produced,
                    index: candidate.index,
                    hash: candidate.hash,
                });
            }
        }
        info!(
            "Key stream exhausted at cursor {} after {} keys",
            self.cache.cursor(),
            self.produced
        );
        None
    }
}
