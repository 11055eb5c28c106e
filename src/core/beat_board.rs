/// Beat board — the session's ordered list of story beats.

use serde::{Deserialize, Serialize};

/// Beats every new session starts with.
pub const SEED_BEATS: [&str; 3] = ["FADE IN", "Ordinary World", "Call to Adventure"];

/// An ordered sequence of free-text beat labels. Order is the only
/// narrative ordering; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatSequence {
    beats: Vec<String>,
}

impl Default for BeatSequence {
    fn default() -> Self {
        Self::with_seed(SEED_BEATS)
    }
}

impl BeatSequence {
    /// Create a sequence holding the given labels in order.
    pub fn with_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            beats: seed.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a beat at the tail. Blank labels are ignored.
    pub fn append(&mut self, label: &str) {
        let label = label.trim();
        if label.is_empty() {
            return;
        }
        self.beats.push(label.to_string());
        log::debug!("beat appended at {}: {:?}", self.beats.len() - 1, label);
    }

    /// Relocate the beat at `source` so it ends up at `destination`.
    ///
    /// Everything else keeps its relative order. Equal or out-of-range
    /// indices leave the sequence untouched.
    pub fn move_beat(&mut self, source: usize, destination: usize) {
        let len = self.beats.len();
        if source == destination || source >= len || destination >= len {
            return;
        }
        let beat = self.beats.remove(source);
        self.beats.insert(destination, beat);
        log::debug!("beat moved {} -> {}", source, destination);
    }

    /// A snapshot of the current order.
    pub fn read(&self) -> Vec<String> {
        self.beats.clone()
    }

    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }
}
