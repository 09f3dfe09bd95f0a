pub mod error;
pub mod io;
pub mod models;
pub mod segmenter;

pub use error::SourceError;
pub use io::{DEFAULT_FALLBACK_ENCODING, load_cues, parse_manifest_file, write_tables};
pub use models::{
    ChainRecord, Cue, DialogueRecord, NormalizedCue, OrphanRecord, PairRecord, RecordSet,
    SourceSpec, SpeakerRole,
};
pub use segmenter::{
    DEFAULT_MAX_GAP_SECONDS, SegmentResult, SegmenterConfig, SourceStats, is_response, normalize,
    segment_source,
};
