use std::path::PathBuf;

/// Per-source failures caught at the source boundary
///
/// Any of these skips the offending source; the remaining sources still
/// run and output is written for whatever succeeded. Ambiguous encoding
/// detection is deliberately absent here: it is handled by substituting
/// the fallback encoding, not by failing the source.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("subtitle file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse subtitle container {path}: {message}")]
    Parse { path: PathBuf, message: String },
}
