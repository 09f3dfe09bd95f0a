use std::path::Path;

use anyhow::{Context, Result};

use crate::models::SourceSpec;

/// Parse a JSON manifest file into a source list
///
/// The manifest is an array of `{ "name": ..., "path": ... }` entries.
pub fn parse_manifest_file(path: &Path) -> Result<Vec<SourceSpec>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {:?}", path))?;
    parse_manifest_json(&content)
}

/// Parse manifest JSON into a source list
pub fn parse_manifest_json(json: &str) -> Result<Vec<SourceSpec>> {
    serde_json::from_str(json).context("Failed to parse source manifest JSON")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest_json() {
        let json = r#"[
            {"name": "West Beirut", "path": "Data/west_beirut.srt"},
            {"name": "Capernaum", "path": "Data/capernaum.srt"}
        ]"#;

        let sources = parse_manifest_json(json).unwrap();

        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].name, "West Beirut");
        assert_eq!(sources[1].path.to_str(), Some("Data/capernaum.srt"));
    }

    #[test]
    fn test_rejects_malformed_manifest() {
        assert!(parse_manifest_json(r#"{"name": "not a list"}"#).is_err());
    }
}
