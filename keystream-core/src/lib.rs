// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: The main library crate for keystream-core, deriving confirmed one-time pad keys from a hash stream.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Keystream Core Library
//!
//! This library derives a stream of one-time pad keys from an index-addressable
//! hash sequence. A hash holding a run of three identical characters becomes a
//! key when one of the next `memory` hashes holds a run of five of the same
//! character. Memory use is bounded by the window size.
//!
//! ```no_run
//! use keystream_core::{GeneratorConfig, KeyStream};
//!
//! let config = GeneratorConfig::with_seed("abc");
//! let mut stream = KeyStream::from_config(&config)?;
//! let keys = stream.generate(config.key_count)?;
//! println!("key {} is at index {}", keys.len(), keys[keys.len() - 1].index);
//! # Ok::<(), keystream_core::KeyStreamError>(())
//! ```

/// Settings for a key stream run and their JSON form.
pub mod config;
/// Error types.
pub mod error;
/// The pull-based key stream.
pub mod generator;
/// Hash sequences, real and canned.
pub mod hash_source;
/// Run-of-identical-characters detection.
pub mod runs;
/// The sliding window of candidates and confirmers.
pub mod window;

pub use config::GeneratorConfig;
pub use error::{IndexOutOfRange, KeyStreamError, Result};
pub use generator::{Key, KeyStream};
pub use hash_source::{DigestAlgorithm, DigestHashSource, HashSource, SequenceHashSource};
pub use window::{CandidateRecord, WindowCache};
