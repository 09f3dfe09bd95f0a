pub mod input;
pub mod manifest;
pub mod output;

pub use input::{DEFAULT_FALLBACK_ENCODING, ResolvedEncoding, load_cues, resolve_encoding};
pub use manifest::{parse_manifest_file, parse_manifest_json};
pub use output::write_tables;
