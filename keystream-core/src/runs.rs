//! Detection of runs of identical consecutive characters within a hash.

/// Length of a run that makes a hash a candidate.
pub const TRIPLET_LEN: usize = 3;
/// Length of a run that makes a hash a confirmer.
pub const QUINTUPLET_LEN: usize = 5;

/// The runs of interest found in a single hash.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunScan {
    /// Character of the first run reaching [`TRIPLET_LEN`], if any.
    pub triplet: Option<char>,
    /// Each distinct character reaching a run of [`QUINTUPLET_LEN`], in order of first appearance.
    pub quintuplets: Vec<char>,
}

impl RunScan {
    /// Whether the hash holds a triplet and is therefore a candidate.
    #[must_use]
    pub const fn is_candidate(&self) -> bool {
        self.triplet.is_some()
    }
}

/// Scans `hash` once, counting consecutive-equal runs.
#[must_use]
pub fn scan_runs(hash: &str) -> RunScan {
    let mut scan = RunScan::default();
    let mut current: Option<char> = None;
    let mut run_len = 0usize;

    for ch in hash.chars() {
        if current == Some(ch) {
            run_len += 1;
        } else {
            current = Some(ch);
            run_len = 1;
        }

        if run_len == TRIPLET_LEN && scan.triplet.is_none() {
            scan.triplet = Some(ch);
        }
        if run_len == QUINTUPLET_LEN && !scan.quintuplets.contains(&ch) {
            scan.quintuplets.push(ch);
        }
    }

    scan
}

/// Character of the first run of three in `hash`.
#[must_use]
pub fn first_triplet(hash: &str) -> Option<char> {
    scan_runs(hash).triplet
}

/// Distinct characters with a run of five in `hash`.
#[must_use]
pub fn quintuplet_chars(hash: &str) -> Vec<char> {
    scan_runs(hash).quintuplets
}
