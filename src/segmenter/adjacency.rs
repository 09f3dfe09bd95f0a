use crate::models::NormalizedCue;

/// Default maximum gap, in seconds, for a cue to count as a response
pub const DEFAULT_MAX_GAP_SECONDS: f64 = 5.0;

/// Decide whether `next` is a timely conversational response to `prev`
///
/// The gap is measured from the end of `prev` to the start of `next`, in
/// seconds with millisecond precision. Simultaneous cues (gap of zero)
/// qualify; overlapping or out-of-order cues (negative gap) do not, and
/// neither does a gap beyond the threshold. Absent `next` never qualifies.
pub fn is_response(
    prev: &NormalizedCue,
    next: Option<&NormalizedCue>,
    max_gap_seconds: f64,
) -> bool {
    let Some(next) = next else {
        return false;
    };
    let gap = gap_seconds(prev, next);
    (0.0..=max_gap_seconds).contains(&gap)
}

/// Signed gap from the end of `prev` to the start of `next`, in seconds
pub fn gap_seconds(prev: &NormalizedCue, next: &NormalizedCue) -> f64 {
    (next.start_ms as i64 - prev.end_ms as i64) as f64 / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cue(start_ms: u64, end_ms: u64) -> NormalizedCue {
        NormalizedCue {
            start_ms,
            end_ms,
            timestamp: String::new(),
            text: "line".to_string(),
        }
    }

    #[test]
    fn test_gap_at_threshold_qualifies() {
        // A ends at 00:00:10,000; B starts at 00:00:15,000 -> gap 5.0
        let a = cue(8_000, 10_000);
        let b = cue(15_000, 17_000);
        assert!(is_response(&a, Some(&b), DEFAULT_MAX_GAP_SECONDS));
    }

    #[test]
    fn test_gap_just_past_threshold_fails() {
        // B starts at 00:00:15,001 -> gap 5.001
        let a = cue(8_000, 10_000);
        let b = cue(15_001, 17_000);
        assert!(!is_response(&a, Some(&b), DEFAULT_MAX_GAP_SECONDS));
    }

    #[test]
    fn test_zero_gap_qualifies() {
        let a = cue(0, 2_000);
        let b = cue(2_000, 4_000);
        assert!(is_response(&a, Some(&b), DEFAULT_MAX_GAP_SECONDS));
    }

    #[test]
    fn test_negative_gap_fails() {
        // next starts before prev ends
        let a = cue(0, 3_000);
        let b = cue(2_500, 4_000);
        assert!(!is_response(&a, Some(&b), DEFAULT_MAX_GAP_SECONDS));
        assert!(gap_seconds(&a, &b) < 0.0);
    }

    #[test]
    fn test_absent_next_fails() {
        let a = cue(0, 2_000);
        assert!(!is_response(&a, None, DEFAULT_MAX_GAP_SECONDS));
    }

    #[test]
    fn test_custom_threshold() {
        let a = cue(0, 1_000);
        let b = cue(3_000, 4_000);
        assert!(!is_response(&a, Some(&b), 1.0));
        assert!(is_response(&a, Some(&b), 2.0));
    }
}
