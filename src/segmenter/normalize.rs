use once_cell::sync::Lazy;
use regex::Regex;

// Inline formatting spans like <i>, <b>, <font ...>
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("Invalid regex"));

// Directional-control artifacts plus anything outside ASCII alphanumerics,
// the Arabic block, and whitespace
static NOISE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"RLE|PDF|[^A-Za-z0-9\u{0600}-\u{06FF}\s]").expect("Invalid regex"));

// Translator credit lines, matched to end of string
static ATTRIBUTION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)translated by.*").expect("Invalid regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Clean a raw cue text down to plain dialogue
///
/// Strips markup tags, directional artifacts and out-of-script characters,
/// removes trailing "translated by ..." credits, and collapses all runs of
/// whitespace (including line breaks) into single spaces. An empty result
/// means the cue carried no dialogue and should be discarded.
///
/// Idempotent: normalizing an already-normalized string is a no-op.
pub fn normalize(raw_text: &str) -> String {
    let text = TAG_RE.replace_all(raw_text, "");
    let text = NOISE_RE.replace_all(&text, "");
    let text = ATTRIBUTION_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.trim().to_string()
}
