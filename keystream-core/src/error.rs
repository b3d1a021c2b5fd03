// File:    error.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Error types shared by the hash sources, the window cache and the key stream.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use thiserror::Error;

/// Raised by a hash source asked for an index past the end of its index space.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("index {index} is beyond the maximum index {max_index}")]
pub struct IndexOutOfRange {
    /// The index that was requested.
    pub index: u64,
    /// The largest index the source will hash.
    pub max_index: u64,
}

/// Errors surfaced to callers of the key stream.
#[derive(Error, Debug)]
pub enum KeyStreamError {
    /// The index space was exhausted.
    #[error(transparent)]
    IndexOutOfRange(#[from] IndexOutOfRange),

    /// The stream stopped before the requested number of keys was produced.
    #[error("requested {requested} keys but the stream ended after {produced}")]
    InsufficientKeys {
        /// How many keys were asked for.
        requested: usize,
        /// How many keys were produced before the stream ended.
        produced: usize,
    },

    /// The configuration was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file could not be parsed or serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KeyStreamError>;
