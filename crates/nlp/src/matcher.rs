//! The action-matching algorithm (spec §4.2).

use dronecmd_domain::Token;
use dronecmd_pattern_library::{compiled_action_regexes, ActionPattern};

use crate::morphology::has_morphological_evidence;

/// Intermediate scoring detail for one action, kept around so the
/// confidence evaluator can reproduce the same score without re-deriving
/// which boosts applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionScore {
    pub score: f64,
    pub patterns_matched: usize,
    pub exact_match: bool,
    pub morphological_match: bool,
}

/// Score one action against `text`, per spec §4.2's formula:
/// `base × (1.1 if ≥2 patterns match) × (1.2 if any pattern equals text
/// exactly) × (1.15 if morphological evidence supports the action)`,
/// capped at 1.0.
pub fn score_action(action: &ActionPattern, text: &str, tokens: &[Token]) -> ActionScore {
    let regexes = compiled_action_regexes(action.action_name).unwrap_or(&[]);
    let patterns_matched = regexes.iter().filter(|r| r.is_match(text)).count();
    let exact_match = regexes.iter().any(|r| {
        r.find(text)
            .map(|m| m.start() == 0 && m.end() == text.len())
            .unwrap_or(false)
    });
    let morphological_match = has_morphological_evidence(action.action_name, tokens);

    if patterns_matched == 0 {
        return ActionScore {
            score: 0.0,
            patterns_matched,
            exact_match: false,
            morphological_match,
        };
    }

    let mut score = action.base_confidence;
    if patterns_matched >= 2 {
        score *= 1.1;
    }
    if exact_match {
        score *= 1.2;
    }
    if morphological_match {
        score *= 1.15;
    }
    ActionScore {
        score: score.min(1.0),
        patterns_matched,
        exact_match,
        morphological_match,
    }
}

/// Select the best-scoring action. Ties are broken by declaration order
/// (first-seen wins, so a strict `>` comparison is used when folding).
pub fn best_action<'a>(
    actions: &'a [ActionPattern],
    text: &str,
    tokens: &[Token],
) -> Option<(&'a ActionPattern, ActionScore)> {
    let mut best: Option<(&ActionPattern, ActionScore)> = None;
    for action in actions {
        let scored = score_action(action, text, tokens);
        if scored.patterns_matched == 0 {
            continue;
        }
        match best {
            Some((_, best_score)) if scored.score <= best_score.score => {}
            _ => best = Some((action, scored)),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronecmd_pattern_library::get_action_patterns;

    #[test]
    fn no_match_returns_zero_score() {
        let actions = get_action_patterns();
        let takeoff = actions.iter().find(|a| a.action_name == "takeoff").unwrap();
        let scored = score_action(takeoff, "banana smoothie recipe", &[]);
        assert_eq!(scored.score, 0.0);
        assert_eq!(scored.patterns_matched, 0);
    }

    #[test]
    fn single_pattern_match_uses_base_confidence() {
        let actions = get_action_patterns();
        let land = actions.iter().find(|a| a.action_name == "land").unwrap();
        let scored = score_action(land, "着陸して", &[]);
        assert_eq!(scored.patterns_matched, 1);
        assert!((scored.score - land.base_confidence).abs() < 1e-9);
    }

    #[test]
    fn best_action_picks_highest_scorer() {
        let actions = get_action_patterns();
        let (action, _) = best_action(actions, "離陸して", &[]).expect("a match");
        assert_eq!(action.action_name, "takeoff");
    }
}
