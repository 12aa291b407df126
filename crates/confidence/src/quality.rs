//! Conflicting-parameter and ambiguous-term detection (spec §4.3).
//!
//! Both are detected over the original command text rather than the
//! extracted parameter map, since a conflict is two contradictory hints
//! appearing in the same utterance (only one of which could have been
//! captured into the single-valued `direction` parameter).

const CONFLICT_PAIRS: &[(&[&str], &[&str])] = &[
    (&["up", "上"], &["down", "下"]),
    (&["left", "左"], &["right", "右"]),
    (
        &["clockwise", "時計回り"],
        &["counterclockwise", "反時計回り", "ccw"],
    ),
    (&["immediate", "immediately", "緊急"], &["safe", "安全", "慎重"]),
];

const AMBIGUOUS_HEDGES: &[&str] = &["少し", "ちょっと", "たくさん", "a bit", "fast", "slow"];

pub fn has_conflicting_params(text: &str) -> bool {
    let lower = text.to_lowercase();
    CONFLICT_PAIRS.iter().any(|(left, right)| {
        left.iter().any(|w| lower.contains(&w.to_lowercase()))
            && right.iter().any(|w| lower.contains(&w.to_lowercase()))
    })
}

pub fn has_ambiguous_terms(text: &str) -> bool {
    let lower = text.to_lowercase();
    AMBIGUOUS_HEDGES.iter().any(|h| lower.contains(&h.to_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_up_down_conflict() {
        assert!(has_conflicting_params("上に行って、それから下に"));
    }

    #[test]
    fn no_conflict_for_single_direction() {
        assert!(!has_conflicting_params("前に2m移動して"));
    }

    #[test]
    fn detects_hedge_words() {
        assert!(has_ambiguous_terms("ちょっと前に進んで"));
        assert!(has_ambiguous_terms("go a bit forward"));
    }
}
