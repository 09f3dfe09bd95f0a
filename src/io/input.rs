use std::path::Path;

use encoding_rs::Encoding;
use srtlib::Subtitles;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::models::Cue;

/// Minimum detector confidence before the fallback encoding kicks in
const MIN_DETECTION_CONFIDENCE: f32 = 0.5;

/// Default fallback, common for Arabic subtitle files
pub const DEFAULT_FALLBACK_ENCODING: &str = "windows-1256";

/// Outcome of resolving a file's text encoding
#[derive(Debug, Clone, Copy)]
pub struct ResolvedEncoding {
    pub encoding: &'static Encoding,
    /// Detector confidence, None when the fallback was substituted
    pub confidence: Option<f32>,
}

/// Resolve the encoding of raw subtitle bytes
///
/// Detection is confidence-scored; a low score or an unrecognized charset
/// label substitutes the fallback encoding instead of failing.
pub fn resolve_encoding(bytes: &[u8], fallback_label: &str) -> ResolvedEncoding {
    let (charset, confidence, _language) = chardet::detect(bytes);
    let label = chardet::charset2encoding(&charset);

    if confidence > MIN_DETECTION_CONFIDENCE {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            return ResolvedEncoding {
                encoding,
                confidence: Some(confidence),
            };
        }
    }

    ResolvedEncoding {
        encoding: fallback_encoding(fallback_label),
        confidence: None,
    }
}

fn fallback_encoding(label: &str) -> &'static Encoding {
    Encoding::for_label(label.as_bytes()).unwrap_or(encoding_rs::WINDOWS_1256)
}

/// Load a subtitle file into an ordered cue sequence
///
/// Reads the raw bytes, resolves their encoding, decodes, and parses the
/// SRT container. Missing files, unreadable files, and malformed containers
/// are reported as `SourceError`; an ambiguous encoding only logs a warning
/// and falls back.
pub fn load_cues(path: &Path, fallback_encoding: &str) -> Result<Vec<Cue>, SourceError> {
    if !path.is_file() {
        return Err(SourceError::Missing(path.to_path_buf()));
    }

    let bytes = std::fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let resolved = resolve_encoding(&bytes, fallback_encoding);
    match resolved.confidence {
        Some(confidence) => debug!(
            "Detected encoding {} for {:?} (confidence {:.2})",
            resolved.encoding.name(),
            path,
            confidence
        ),
        None => warn!(
            "Could not detect encoding for {:?}, falling back to {}",
            path,
            resolved.encoding.name()
        ),
    }

    let (text, _, had_errors) = resolved.encoding.decode(&bytes);
    if had_errors {
        warn!(
            "Replacement characters while decoding {:?} as {}",
            path,
            resolved.encoding.name()
        );
    }

    let subtitles = Subtitles::parse_from_str(text.into_owned()).map_err(|e| SourceError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(subtitles
        .to_vec()
        .into_iter()
        .map(|sub| {
            let (h, m, s, ms) = sub.start_time.get();
            let start_ms = to_millis(h, m, s, ms);
            let (h, m, s, ms) = sub.end_time.get();
            let end_ms = to_millis(h, m, s, ms);
            Cue::new(start_ms, end_ms, sub.text)
        })
        .collect())
}

fn to_millis(hours: u8, minutes: u8, seconds: u8, millis: u16) -> u64 {
    (hours as u64 * 3600 + minutes as u64 * 60 + seconds as u64) * 1000 + millis as u64
}
