//! String similarity scoring used for fuzzy title matching.

use similar::TextDiff;

/// A similarity measure on a 0..=100 scale.
pub trait Similarity {
    /// Score how alike `a` and `b` are; 100 means identical.
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Character-level sequence ratio: `2 * matches / (len(a) + len(b))`.
///
/// Matches are the characters kept by a minimal character diff, so the
/// score is the normalized insert/delete similarity of the two strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl Similarity for SequenceRatio {
    fn score(&self, a: &str, b: &str) -> u8 {
        let ratio = TextDiff::from_chars(a, b).ratio();
        (ratio * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> u8,
{
    fn score(&self, a: &str, b: &str) -> u8 {
        self(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_and_disjoint() {
        assert_eq!(SequenceRatio.score("abc", "abc"), 100);
        assert_eq!(SequenceRatio.score("abc", "xyz"), 0);
        assert_eq!(SequenceRatio.score("", ""), 100);
    }

    #[test]
    fn test_partial_overlap() {
        // 3 shared characters out of 4 + 4
        assert_eq!(SequenceRatio.score("abcd", "abce"), 75);
        // 4 shared out of 4 + 5
        assert_eq!(SequenceRatio.score("part", "party"), 89);
    }

    #[test]
    fn test_case_sensitive_by_itself() {
        assert!(SequenceRatio.score("PART", "part") < 80);
    }

    #[test]
    fn test_cjk_characters() {
        assert_eq!(SequenceRatio.score("甲部：公司資料", "甲部：公司資料"), 100);
        assert_eq!(SequenceRatio.score("甲部：公司資料", "甲部：公司資訊"), 86);
    }

    #[test]
    fn test_closure_scorer() {
        let fixed = |_: &str, _: &str| 42u8;
        assert_eq!(fixed.score("a", "b"), 42);
    }
}
