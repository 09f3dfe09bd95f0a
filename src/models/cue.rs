use serde::{Deserialize, Serialize};

use crate::segmenter::normalize;

/// One timed subtitle entry as produced by the container parser
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cue {
    /// Start offset in milliseconds
    pub start_ms: u64,
    /// End offset in milliseconds (>= start_ms)
    pub end_ms: u64,
    /// Raw cue text, possibly multi-line and containing markup
    pub raw_text: String,
}

impl Cue {
    pub fn new(start_ms: u64, end_ms: u64, raw_text: impl Into<String>) -> Self {
        Self {
            start_ms,
            end_ms,
            raw_text: raw_text.into(),
        }
    }

    /// The "start --> end" label used in every output record
    pub fn timestamp_label(&self) -> String {
        format!(
            "{} --> {}",
            format_offset(self.start_ms),
            format_offset(self.end_ms)
        )
    }
}

/// A cue whose text survived normalization
///
/// Cues that clean down to an empty string yield no NormalizedCue and are
/// invisible to the segmenter: they neither break nor extend a chain.
#[derive(Debug, Clone)]
pub struct NormalizedCue {
    pub start_ms: u64,
    pub end_ms: u64,
    /// Formatted "start --> end" label, generated once per cue
    pub timestamp: String,
    /// Cleaned, non-empty text
    pub text: String,
}

impl NormalizedCue {
    /// Normalize a cue's text, returning None when nothing is left
    pub fn from_cue(cue: &Cue) -> Option<Self> {
        let text = normalize(&cue.raw_text);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            start_ms: cue.start_ms,
            end_ms: cue.end_ms,
            timestamp: cue.timestamp_label(),
            text,
        })
    }
}

/// Format a millisecond offset as HH:MM:SS,mmm
fn format_offset(ms: u64) -> String {
    let millis = ms % 1000;
    let total_secs = ms / 1000;
    let secs = total_secs % 60;
    let total_mins = total_secs / 60;
    let mins = total_mins % 60;
    let hours = total_mins / 60;
    format!("{:02}:{:02}:{:02},{:03}", hours, mins, secs, millis)
}
