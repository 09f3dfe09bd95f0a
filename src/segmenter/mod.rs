pub mod adjacency;
pub mod normalize;

pub use adjacency::{DEFAULT_MAX_GAP_SECONDS, gap_seconds, is_response};
pub use normalize::normalize;

use uuid::Uuid;

use crate::models::{
    ChainRecord, Cue, DialogueRecord, NormalizedCue, OrphanRecord, PairRecord, SpeakerRole,
};

/// Configuration for conversation segmentation
#[derive(Debug, Clone)]
pub struct SegmenterConfig {
    /// Maximum gap in seconds for a cue to count as a response
    pub max_gap_seconds: f64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            max_gap_seconds: DEFAULT_MAX_GAP_SECONDS,
        }
    }
}

/// Per-source diagnostics gathered during segmentation
#[derive(Debug, Clone, Default)]
pub struct SourceStats {
    /// Cues received from the parser
    pub total_cues: usize,
    /// Cues discarded because nothing was left after normalization
    pub skipped_empty: usize,
    /// Consecutive eligible cues whose gap was negative (overlapping or
    /// out-of-order timestamps)
    pub out_of_order: usize,
    /// Pair records emitted
    pub pairs: usize,
    /// Chain lines emitted
    pub chain_lines: usize,
    /// Orphan records emitted
    pub orphans: usize,
}

/// Outcome of segmenting one source
#[derive(Debug)]
pub struct SegmentResult {
    /// Classified records in emission order
    pub records: Vec<DialogueRecord>,
    pub stats: SourceStats,
}

/// One accumulated line of an open run
#[derive(Debug, Clone)]
struct RunLine {
    timestamp: String,
    text: String,
    speaker: SpeakerRole,
}

/// An open conversation run: a contiguous adjacency chain under construction
///
/// The id is generated up front but only surfaces in output when the run
/// closes with more than two lines.
#[derive(Debug)]
struct ConversationRun {
    id: String,
    lines: Vec<RunLine>,
}

impl ConversationRun {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lines: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line, assigning the speaker role by position
    fn push(&mut self, cue: &NormalizedCue) {
        let speaker = SpeakerRole::from_position(self.lines.len());
        self.lines.push(RunLine {
            timestamp: cue.timestamp.clone(),
            text: cue.text.clone(),
            speaker,
        });
    }

    /// Classify the run by length and emit its records
    ///
    /// One line demotes to an orphan, two lines form a pair, anything longer
    /// becomes a chain sharing this run's id.
    fn close(self, source: &str, out: &mut Vec<DialogueRecord>) {
        match self.lines.len() {
            0 => {}
            1 => {
                let line = self.lines.into_iter().next().expect("checked length 1");
                out.push(DialogueRecord::Orphan(OrphanRecord {
                    source: source.to_string(),
                    timestamp: line.timestamp,
                    text: line.text,
                }));
            }
            2 => {
                let mut lines = self.lines.into_iter();
                let first = lines.next().expect("checked length 2");
                let second = lines.next().expect("checked length 2");
                out.push(DialogueRecord::Pair(PairRecord {
                    source: source.to_string(),
                    timestamp: first.timestamp,
                    input: first.text,
                    output: second.text,
                }));
            }
            _ => {
                for line in self.lines {
                    out.push(DialogueRecord::Chain(ChainRecord {
                        source: source.to_string(),
                        timestamp: line.timestamp,
                        speaker_id: line.speaker,
                        text: line.text,
                        conversation_id: self.id.clone(),
                    }));
                }
            }
        }
    }
}

/// Segment one source's cue sequence into classified dialogue records
///
/// Cues whose text normalizes to empty are invisible: they neither break
/// nor extend a chain. A cue joins the open run when it is a timely
/// response to the previous eligible cue; otherwise the open run closes
/// and the cue either anchors a new run (when its own successor would
/// respond to it) or is emitted as an orphan. After the last cue any open
/// run is closed by the same length rule.
pub fn segment_source(source: &str, cues: &[Cue], config: &SegmenterConfig) -> SegmentResult {
    let normalized: Vec<NormalizedCue> = cues.iter().filter_map(NormalizedCue::from_cue).collect();

    let mut stats = SourceStats {
        total_cues: cues.len(),
        skipped_empty: cues.len() - normalized.len(),
        ..SourceStats::default()
    };

    let mut records = Vec::new();
    let mut run = ConversationRun::new();
    let mut last: Option<&NormalizedCue> = None;

    for (i, sub) in normalized.iter().enumerate() {
        let next = normalized.get(i + 1);

        if let Some(prev) = last {
            if gap_seconds(prev, sub) < 0.0 {
                stats.out_of_order += 1;
            }
        }

        if last.is_some_and(|prev| is_response(prev, Some(sub), config.max_gap_seconds)) {
            run.push(sub);
        } else {
            // Chain broken (or first eligible cue): close whatever was open
            if !run.is_empty() {
                let closed = std::mem::replace(&mut run, ConversationRun::new());
                closed.close(source, &mut records);
            }

            // A cue with no responding successor cannot anchor a run
            if is_response(sub, next, config.max_gap_seconds) {
                run.push(sub);
            } else {
                records.push(DialogueRecord::Orphan(OrphanRecord {
                    source: source.to_string(),
                    timestamp: sub.timestamp.clone(),
                    text: sub.text.clone(),
                }));
            }
        }

        last = Some(sub);
    }

    run.close(source, &mut records);

    for record in &records {
        match record {
            DialogueRecord::Pair(_) => stats.pairs += 1,
            DialogueRecord::Chain(_) => stats.chain_lines += 1,
            DialogueRecord::Orphan(_) => stats.orphans += 1,
        }
    }

    SegmentResult { records, stats }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start_ms: u64, end_ms: u64, text: &str) -> Cue {
        Cue::new(start_ms, end_ms, text)
    }

    fn segment(cues: &[Cue]) -> SegmentResult {
        segment_source("test", cues, &SegmenterConfig::default())
    }

    fn pairs(result: &SegmentResult) -> Vec<&PairRecord> {
        result
            .records
            .iter()
            .filter_map(|r| match r {
                DialogueRecord::Pair(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    fn chains(result: &SegmentResult) -> Vec<&ChainRecord> {
        result
            .records
            .iter()
            .filter_map(|r| match r {
                DialogueRecord::Chain(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    fn orphans(result: &SegmentResult) -> Vec<&OrphanRecord> {
        result
            .records
            .iter()
            .filter_map(|r| match r {
                DialogueRecord::Orphan(o) => Some(o),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_isolated_lines_become_orphans() {
        // Second cue starts 10s after the first ends
        let cues = vec![cue(0, 2_000, "first"), cue(12_000, 14_000, "second")];
        let result = segment(&cues);

        assert_eq!(orphans(&result).len(), 2);
        assert!(pairs(&result).is_empty());
        assert!(chains(&result).is_empty());
        assert_eq!(orphans(&result)[0].text, "first");
        assert_eq!(orphans(&result)[1].text, "second");
    }

    #[test]
    fn test_simple_pair() {
        let cues = vec![cue(0, 2_000, "how are you"), cue(4_000, 6_000, "fine thanks")];
        let result = segment(&cues);

        let pairs = pairs(&result);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].input, "how are you");
        assert_eq!(pairs[0].output, "fine thanks");
        assert_eq!(pairs[0].timestamp, "00:00:00,000 --> 00:00:02,000");
        assert!(chains(&result).is_empty());
        assert!(orphans(&result).is_empty());
    }

    #[test]
    fn test_chain_of_four_alternates_speakers() {
        let cues = vec![
            cue(0, 1_000, "one"),
            cue(1_500, 2_500, "two"),
            cue(3_000, 4_000, "three"),
            cue(4_500, 5_500, "four"),
        ];
        let result = segment(&cues);

        let chains = chains(&result);
        assert_eq!(chains.len(), 4);
        assert_eq!(chains[0].speaker_id, SpeakerRole::First);
        assert_eq!(chains[1].speaker_id, SpeakerRole::Second);
        assert_eq!(chains[2].speaker_id, SpeakerRole::First);
        assert_eq!(chains[3].speaker_id, SpeakerRole::Second);

        let id = &chains[0].conversation_id;
        assert!(chains.iter().all(|c| &c.conversation_id == id));
    }

    #[test]
    fn test_conversation_ids_unique_across_runs() {
        let cues = vec![
            cue(0, 1_000, "a"),
            cue(1_500, 2_500, "b"),
            cue(3_000, 4_000, "c"),
            // 100s break
            cue(110_000, 111_000, "d"),
            cue(111_500, 112_500, "e"),
            cue(113_000, 114_000, "f"),
        ];
        let result = segment(&cues);

        let chains = chains(&result);
        assert_eq!(chains.len(), 6);
        assert_ne!(chains[0].conversation_id, chains[3].conversation_id);
    }

    #[test]
    fn test_empty_cue_invisible_to_chain() {
        // The markup-only cue between the two real ones is skipped and the
        // chain forms across it
        let cues = vec![
            cue(0, 2_000, "hello"),
            cue(2_100, 2_200, "<i></i>"),
            cue(4_000, 6_000, "hi"),
        ];
        let result = segment(&cues);

        let pairs = pairs(&result);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].input, "hello");
        assert_eq!(pairs[0].output, "hi");
        assert_eq!(result.stats.skipped_empty, 1);
    }

    #[test]
    fn test_pair_then_orphan() {
        let cues = vec![
            cue(0, 2_000, "question"),
            cue(3_000, 5_000, "answer"),
            cue(60_000, 62_000, "alone"),
        ];
        let result = segment(&cues);

        assert_eq!(pairs(&result).len(), 1);
        assert_eq!(orphans(&result).len(), 1);
        assert_eq!(orphans(&result)[0].text, "alone");
    }

    #[test]
    fn test_chain_still_open_at_end_is_flushed() {
        let cues = vec![
            cue(0, 1_000, "a"),
            cue(1_500, 2_500, "b"),
            cue(3_000, 4_000, "c"),
        ];
        let result = segment(&cues);

        assert_eq!(chains(&result).len(), 3);
        assert!(orphans(&result).is_empty());
    }

    #[test]
    fn test_singleton_run_closes_as_orphan() {
        let mut records = Vec::new();
        let mut run = ConversationRun::new();
        run.push(&NormalizedCue {
            start_ms: 0,
            end_ms: 1_000,
            timestamp: "00:00:00,000 --> 00:00:01,000".to_string(),
            text: "alone".to_string(),
        });
        run.close("test", &mut records);

        assert_eq!(records.len(), 1);
        assert!(matches!(&records[0], DialogueRecord::Orphan(o) if o.text == "alone"));
    }

    #[test]
    fn test_zero_gap_counts_as_adjacent() {
        let cues = vec![cue(0, 2_000, "a"), cue(2_000, 4_000, "b")];
        let result = segment(&cues);
        assert_eq!(pairs(&result).len(), 1);
    }

    #[test]
    fn test_negative_gap_breaks_chain_and_is_counted() {
        let cues = vec![cue(0, 3_000, "a"), cue(2_000, 4_000, "b")];
        let result = segment(&cues);

        assert_eq!(orphans(&result).len(), 2);
        assert_eq!(result.stats.out_of_order, 1);
    }

    #[test]
    fn test_completeness() {
        let cues = vec![
            cue(0, 1_000, "a"),
            cue(1_500, 2_500, "b"),
            cue(20_000, 21_000, "c"),
            cue(21_500, 22_500, "d"),
            cue(23_000, 24_000, "e"),
            cue(60_000, 61_000, "<i></i>"),
            cue(90_000, 91_000, "f"),
        ];
        let result = segment(&cues);

        let eligible = cues.len() - result.stats.skipped_empty;
        let accounted =
            result.stats.pairs * 2 + result.stats.chain_lines + result.stats.orphans;
        assert_eq!(accounted, eligible);
    }

    #[test]
    fn test_empty_source() {
        let result = segment(&[]);
        assert!(result.records.is_empty());
        assert_eq!(result.stats.total_cues, 0);
    }
}
