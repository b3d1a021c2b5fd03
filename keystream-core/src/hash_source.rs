// File:    hash_source.rs
// Author:  apezoo
// Date:    2026-10-17
//
// Description: Index-addressable hash sequences feeding the key stream, including key stretching.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Sources of the hash sequence the key stream is derived from.
//!
//! A [`HashSource`] maps `(seed, index, stretch)` to a fixed-length string. The
//! production source is [`DigestHashSource`]; [`SequenceHashSource`] serves a
//! canned list so the window logic can be checked without a real digest.

use crate::error::IndexOutOfRange;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::digest::Output;
use sha2::{Digest, Sha256};
use std::fmt::{self, LowerHex};

/// Default upper bound on the index space.
pub const DEFAULT_MAX_INDEX: u64 = 10_000_000;

/// A deterministic, index-addressable sequence of hashes.
pub trait HashSource {
    /// Produces the hash at `index` for `seed`, re-hashed `stretch` extra times.
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`] when `index` exceeds [`HashSource::max_index`].
    fn hash(&self, seed: &str, index: u64, stretch: u32) -> Result<String, IndexOutOfRange>;

    /// The largest index this source will hash.
    fn max_index(&self) -> u64;

    /// Fails with [`IndexOutOfRange`] when `index` is past [`HashSource::max_index`].
    ///
    /// # Errors
    ///
    /// Returns [`IndexOutOfRange`] for any index greater than the maximum.
    fn check_index(&self, index: u64) -> Result<(), IndexOutOfRange> {
        let max_index = self.max_index();
        if index > max_index {
            return Err(IndexOutOfRange { index, max_index });
        }
        Ok(())
    }
}

/// Digest used by [`DigestHashSource`].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// 128-bit MD5, rendered as 32 hex characters.
    #[default]
    Md5,
    /// SHA-256, rendered as 64 hex characters.
    Sha256,
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Md5 => f.write_str("md5"),
            Self::Sha256 => f.write_str("sha256"),
        }
    }
}

/// Hashes `seed ++ index` with a real digest, then re-hashes the hex form `stretch` times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestHashSource {
    algorithm: DigestAlgorithm,
    max_index: u64,
}

impl DigestHashSource {
    /// Creates a source for `algorithm` bounded by `max_index`.
    #[must_use]
    pub const fn new(algorithm: DigestAlgorithm, max_index: u64) -> Self {
        Self {
            algorithm,
            max_index,
        }
    }

    /// The digest this source uses.
    #[must_use]
    pub const fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }
}

impl Default for DigestHashSource {
    fn default() -> Self {
        Self::new(DigestAlgorithm::Md5, DEFAULT_MAX_INDEX)
    }
}

impl HashSource for DigestHashSource {
    fn hash(&self, seed: &str, index: u64, stretch: u32) -> Result<String, IndexOutOfRange> {
        self.check_index(index)?;
        let input = format!("{seed}{index}");
        Ok(match self.algorithm {
            DigestAlgorithm::Md5 => stretched_hex::<Md5>(&input, stretch),
            DigestAlgorithm::Sha256 => stretched_hex::<Sha256>(&input, stretch),
        })
    }

    fn max_index(&self) -> u64 {
        self.max_index
    }
}

fn stretched_hex<D: Digest>(input: &str, stretch: u32) -> String
where
    Output<D>: LowerHex,
{
    let mut hex = format!("{:x}", D::digest(input.as_bytes()));
    for _ in 0..stretch {
        hex = format!("{:x}", D::digest(hex.as_bytes()));
    }
    hex
}

/// Serves a fixed list of hashes, ignoring seed and stretch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceHashSource {
    hashes: Vec<String>,
    limit: Option<u64>,
}

impl SequenceHashSource {
    /// Creates a source serving `hashes` in order from index 0.
    pub fn new<I, T>(hashes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            hashes: hashes.into_iter().map(Into::into).collect(),
            limit: None,
        }
    }

    /// Lowers the maximum index below the end of the list.
    #[must_use]
    pub const fn with_max_index(mut self, max_index: u64) -> Self {
        self.limit = Some(max_index);
        self
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

impl HashSource for SequenceHashSource {
    fn hash(&self, _seed: &str, index: u64, _stretch: u32) -> Result<String, IndexOutOfRange> {
        // An empty list rejects every index, including 0.
        let out_of_range = IndexOutOfRange {
            index,
            max_index: self.max_index(),
        };
        if self.hashes.is_empty() {
            return Err(out_of_range);
        }
        self.check_index(index)?;
        usize::try_from(index)
            .ok()
            .and_then(|i| self.hashes.get(i))
            .cloned()
            .ok_or(out_of_range)
    }

    fn max_index(&self) -> u64 {
        let last = u64::try_from(self.hashes.len().saturating_sub(1)).unwrap_or(u64::MAX);
        self.limit.map_or(last, |limit| limit.min(last))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runs::first_triplet;

    #[test]
    fn md5_matches_known_digest() {
        let source = DigestHashSource::default();
        let hash = source.hash("abc", 0, 0).unwrap();
        assert_eq!(hash, "577571be4de9dcce85a041ba0410f29f");
    }

    #[test]
    fn hex_form_matches_digest_formatter() {
        let source = DigestHashSource::default();
        let expected = format!("{:x}", Md5::digest(b"abc0"));
        assert_eq!(source.hash("abc", 0, 0).unwrap(), expected);
        let rehashed = format!("{:x}", Md5::digest(expected.as_bytes()));
        assert_eq!(source.hash("abc", 0, 1).unwrap(), rehashed);
    }

    #[test]
    fn stretching_rehashes_hex_form() {
        let source = DigestHashSource::default();
        let once = source.hash("abc", 0, 1).unwrap();
        assert_eq!(once, "eec80a0c92dc8a0777c619d9bb51e910");
        let stretched = source.hash("abc", 0, 2016).unwrap();
        assert_eq!(stretched, "a107ff634856bb300138cac6568c0f24");
    }

    #[test]
    fn first_triplet_for_abc_is_at_18() {
        let source = DigestHashSource::default();
        for index in 0..18 {
            let hash = source.hash("abc", index, 0).unwrap();
            assert_eq!(first_triplet(&hash), None, "index {index}: {hash}");
        }
        let hash = source.hash("abc", 18, 0).unwrap();
        assert!(hash.contains("cc38887a5"));
        assert_eq!(first_triplet(&hash), Some('8'));
    }

    #[test]
    fn digest_source_is_pure() {
        let source = DigestHashSource::new(DigestAlgorithm::Sha256, 100);
        assert_eq!(source.algorithm(), DigestAlgorithm::Sha256);
        let first = source.hash("salt", 42, 3).unwrap();
        let second = source.hash("salt", 42, 3).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_source_rejects_index_past_max() {
        let source = DigestHashSource::new(DigestAlgorithm::Md5, 10);
        assert!(source.hash("abc", 10, 0).is_ok());
        assert_eq!(
            source.hash("abc", 11, 0),
            Err(IndexOutOfRange {
                index: 11,
                max_index: 10
            })
        );
    }

    #[test]
    fn sequence_source_serves_list_then_fails() {
        let source = SequenceHashSource::new(["a", "b", "ccc"]);
        assert_eq!(source.max_index(), 2);
        assert_eq!(source.hash("ignored", 2, 99).unwrap(), "ccc");
        assert_eq!(
            source.hash("ignored", 3, 0),
            Err(IndexOutOfRange {
                index: 3,
                max_index: 2
            })
        );
    }

    #[test]
    fn sequence_source_honours_explicit_max() {
        let source = SequenceHashSource::new(["a", "b", "c", "d"]).with_max_index(1);
        assert_eq!(source.max_index(), 1);
        assert!(source.hash("", 1, 0).is_ok());
        assert!(source.hash("", 2, 0).is_err());
    }

    #[test]
    fn empty_sequence_rejects_everything() {
        let source = SequenceHashSource::default();
        assert!(source.is_empty());
        assert!(source.hash("", 0, 0).is_err());
    }
}
