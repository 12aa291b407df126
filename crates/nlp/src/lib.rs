//! Natural language parsing of drone commands into [`ParsedIntent`]s
//! (spec §4.2). Pure and synchronous — no suspension points, no I/O.

pub mod extractor;
pub mod matcher;
pub mod morphology;
pub mod tokenizer;

use dronecmd_domain::{IntentContext, ParsedIntent, Suggestion, Token, UNKNOWN_ACTION};
use dronecmd_pattern_library::get_action_patterns;

pub use extractor::ParamExtractionDetail;
pub use matcher::ActionScore;
pub use tokenizer::{KeywordTokenizer, NullTokenizer, Tokenizer};

const MAX_SUGGESTIONS: usize = 5;

/// Parse `text` into exactly one best-guess intent. `tokens` is the
/// optional morphological evidence (empty slice when no tokenizer is
/// configured, or when the configured one found nothing) — its absence
/// only removes the matcher's 1.15× boost, it never fails the parse.
pub fn parse(text: &str, context: Option<&IntentContext>, tokens: &[Token]) -> ParsedIntent {
    if text.trim().is_empty() {
        return ParsedIntent::unknown(text);
    }

    let actions = get_action_patterns();
    let Some((action, scored)) = matcher::best_action(actions, text, tokens) else {
        return ParsedIntent::unknown(text);
    };

    let details = extractor::extract_all(action.required_params, action.optional_params, text);
    let parameters = extractor::accepted_parameters(&details);

    ParsedIntent {
        action: action.action_name.to_string(),
        parameters,
        confidence: scored.score,
        original_command: text.to_string(),
        context: context.cloned(),
    }
}

/// Up to [`MAX_SUGGESTIONS`] near-miss candidates, ranked by score
/// descending, ties broken by declaration order.
pub fn suggest(text: &str, tokens: &[Token]) -> Vec<Suggestion> {
    let actions = get_action_patterns();
    let mut scored: Vec<(&'static str, ActionScore, &'static [&'static str])> = actions
        .iter()
        .map(|a| (a.action_name, matcher::score_action(a, text, tokens), a.examples))
        .filter(|(_, s, _)| s.score > 0.0)
        .collect();

    scored.sort_by(|a, b| b.1.score.partial_cmp(&a.1.score).unwrap());
    scored.truncate(MAX_SUGGESTIONS);

    scored
        .into_iter()
        .map(|(action, score, examples)| Suggestion {
            action: action.to_string(),
            confidence: score.score,
            example: examples.first().unwrap_or(&"").to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_unknown() {
        let intent = parse("", None, &[]);
        assert_eq!(intent.action, UNKNOWN_ACTION);
        assert_eq!(intent.confidence, 0.0);
    }

    #[test]
    fn unrelated_text_is_unknown() {
        let intent = parse("what a nice day today", None, &[]);
        assert_eq!(intent.action, UNKNOWN_ACTION);
    }

    #[test]
    fn parses_takeoff_with_no_parameters() {
        let intent = parse("離陸して", None, &[]);
        assert_eq!(intent.action, "takeoff");
        assert!(intent.confidence > 0.0);
    }

    #[test]
    fn parses_move_with_direction_and_distance() {
        let intent = parse("前に2m移動して", None, &[]);
        assert_eq!(intent.action, "move");
        assert_eq!(
            intent.parameters.get("direction").and_then(|v| v.as_text()),
            Some("forward")
        );
        assert_eq!(
            intent.parameters.get("distance").and_then(|v| v.as_number()),
            Some(200.0)
        );
    }

    #[test]
    fn parses_rotate_with_direction_and_angle() {
        let intent = parse("時計回りに90度回転", None, &[]);
        assert_eq!(intent.action, "rotate");
        assert_eq!(
            intent.parameters.get("direction").and_then(|v| v.as_text()),
            Some("clockwise")
        );
        assert_eq!(
            intent.parameters.get("angle").and_then(|v| v.as_number()),
            Some(90.0)
        );
    }

    #[test]
    fn suggest_returns_at_most_five_ranked_candidates() {
        let suggestions = suggest("land", &[]);
        assert!(suggestions.len() <= MAX_SUGGESTIONS);
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].action, "land");
    }

    #[test]
    fn suggest_returns_empty_for_no_candidates() {
        assert!(suggest("lorem ipsum dolor sit amet", &[]).is_empty());
    }
}
