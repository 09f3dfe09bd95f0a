use std::fmt;

use serde::Serialize;

/// Positional speaker role within a conversation run
///
/// Roles alternate by position and reset at every new run. They carry no
/// identity beyond distinguishing alternating turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpeakerRole {
    #[serde(rename = "Speaker_1")]
    First,
    #[serde(rename = "Speaker_2")]
    Second,
}

impl SpeakerRole {
    /// Role for the entry about to be appended at `position` (0-based)
    pub fn from_position(position: usize) -> Self {
        if position % 2 == 0 {
            SpeakerRole::First
        } else {
            SpeakerRole::Second
        }
    }
}

impl fmt::Display for SpeakerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeakerRole::First => write!(f, "Speaker_1"),
            SpeakerRole::Second => write!(f, "Speaker_2"),
        }
    }
}

/// A two-line exchange: one prompt, one reply
#[derive(Debug, Clone, Serialize)]
pub struct PairRecord {
    pub source: String,
    /// Timestamp label of the first line
    pub timestamp: String,
    pub input: String,
    pub output: String,
}

/// One line of a conversation longer than two turns
///
/// All lines of the same run share one conversation_id.
#[derive(Debug, Clone, Serialize)]
pub struct ChainRecord {
    pub source: String,
    pub timestamp: String,
    pub speaker_id: SpeakerRole,
    pub text: String,
    pub conversation_id: String,
}

/// A line with no timely neighbor on either side
#[derive(Debug, Clone, Serialize)]
pub struct OrphanRecord {
    pub source: String,
    pub timestamp: String,
    pub text: String,
}

/// A classified segmentation result
#[derive(Debug, Clone)]
pub enum DialogueRecord {
    Pair(PairRecord),
    Chain(ChainRecord),
    Orphan(OrphanRecord),
}

/// Accumulates classified records across sources, in processing order
#[derive(Debug, Default)]
pub struct RecordSet {
    pub pairs: Vec<PairRecord>,
    pub chains: Vec<ChainRecord>,
    pub orphans: Vec<OrphanRecord>,
}

impl RecordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a record into its collection, preserving arrival order
    pub fn push(&mut self, record: DialogueRecord) {
        match record {
            DialogueRecord::Pair(r) => self.pairs.push(r),
            DialogueRecord::Chain(r) => self.chains.push(r),
            DialogueRecord::Orphan(r) => self.orphans.push(r),
        }
    }

    pub fn extend(&mut self, records: impl IntoIterator<Item = DialogueRecord>) {
        for record in records {
            self.push(record);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty() && self.chains.is_empty() && self.orphans.is_empty()
    }

    /// Total number of normalized cues represented (pairs count two lines)
    pub fn line_count(&self) -> usize {
        self.pairs.len() * 2 + self.chains.len() + self.orphans.len()
    }
}
