//! Embedded profile search
//!
//! Locates ICC profiles inside arbitrary byte blobs (image files, profile
//! bundles) by looking for the `acsp` header signature.

use super::header::{PROFILE_SIGNATURE, SIGNATURE_OFFSET};

/// Progress through the `acsp` signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum MatchState {
    #[default]
    Start,
    A,
    Ac,
    Acs,
}

/// Byte-at-a-time matcher for the `acsp` profile signature
///
/// Each state names the prefix matched so far. A mismatching byte resets to
/// `Start`, or to `A` when the byte is itself an `a`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignatureMatcher {
    state: MatchState,
}

impl SignatureMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns `true` when it completes the signature
    pub fn feed(&mut self, byte: u8) -> bool {
        let [a, c, s, p] = PROFILE_SIGNATURE.to_be_bytes();

        let (next, matched) = match self.state {
            MatchState::Start if byte == a => (MatchState::A, false),
            MatchState::A if byte == c => (MatchState::Ac, false),
            MatchState::Ac if byte == s => (MatchState::Acs, false),
            MatchState::Acs if byte == p => (MatchState::Start, true),
            _ if byte == a => (MatchState::A, false),
            _ => (MatchState::Start, false),
        };

        self.state = next;
        matched
    }

    /// Forget any partial match
    pub fn reset(&mut self) {
        self.state = MatchState::Start;
    }
}

/// Start offsets of every profile embedded in `data`
///
/// The signature sits at header offset 36, so a match ending at byte `i`
/// implies a profile starting at `i + 1 - 40`. Matches too close to the
/// beginning of the blob to have a full header prefix are skipped.
pub fn find_embedded_profiles(data: &[u8]) -> Vec<usize> {
    let mut matcher = SignatureMatcher::new();
    let mut offsets = Vec::new();

    for (i, &byte) in data.iter().enumerate() {
        if matcher.feed(byte) {
            if let Some(start) = (i + 1).checked_sub(SIGNATURE_OFFSET + 4) {
                offsets.push(start);
            }
        }
    }

    offsets
}
