//! Scores a parsed intent on action fit, parameter fit, completeness,
//! and quality indicators; produces risks and correction suggestions
//! (spec §4.3). Pure and synchronous, like the NLP Engine it consumes.

pub mod quality;
pub mod ranges;

use dronecmd_domain::{
    ConfidenceEvaluation, DomainError, ErrorCode, ParsedIntent, QualityFlags, Token,
};
use dronecmd_nlp::extractor::{self, ParamExtractionDetail};
use dronecmd_pattern_library::{get_action_patterns, get_parameter_pattern};

const DANGEROUS_ACTIONS: &[&str] = &["takeoff", "land", "emergency_stop"];
const DANGEROUS_ACTION_HIGH_CONFIDENCE_THRESHOLD: f64 = 0.85;
const REPHRASE_THRESHOLD: f64 = 0.5;

fn parameter_score(detail: &ParamExtractionDetail) -> f64 {
    let pattern_match_fit = if detail.pattern_matched { 0.8 } else { 0.0 };
    let validator_fit = match detail.validator_accepted {
        Some(true) => 0.9,
        Some(false) => 0.2,
        None => 0.5,
    };
    let type_fit = match (&detail.converted, get_parameter_pattern(&detail.name)) {
        (Some(value), Some(pattern)) if pattern.param_type.matches(value) => 0.9,
        (Some(_), Some(_)) => 0.5,
        _ => 0.5,
    };
    pattern_match_fit.max((validator_fit + type_fit) / 2.0)
}

/// Score the parameters expected for `intent.action`, per spec §4.3.
fn score_parameters(intent: &ParsedIntent) -> (f64, Vec<ParamExtractionDetail>, usize, usize, usize, usize) {
    let Some(action) = get_action_patterns()
        .iter()
        .find(|a| a.action_name == intent.action)
    else {
        return (1.0, Vec::new(), 0, 0, 0, 0);
    };

    if action.required_params.is_empty() && action.optional_params.is_empty() {
        return (1.0, Vec::new(), 0, 0, 0, 0);
    }

    let details = extractor::extract_all(
        action.required_params,
        action.optional_params,
        &intent.original_command,
    );

    let required_total = action.required_params.len();
    let optional_total = action.optional_params.len();
    let required_fulfilled = details
        .iter()
        .take(required_total)
        .filter(|d| d.accepted_value().is_some())
        .count();
    let optional_fulfilled = details
        .iter()
        .skip(required_total)
        .filter(|d| d.accepted_value().is_some())
        .count();

    let mean_score = if details.is_empty() {
        1.0
    } else {
        details.iter().map(parameter_score).sum::<f64>() / details.len() as f64
    };
    let missing_required = required_total.saturating_sub(required_fulfilled);
    let penalized = (mean_score - 0.3 * missing_required as f64).max(0.0);

    (
        penalized,
        details,
        required_total,
        required_fulfilled,
        optional_total,
        optional_fulfilled,
    )
}

fn completeness(
    required_total: usize,
    required_fulfilled: usize,
    optional_total: usize,
    optional_fulfilled: usize,
) -> f64 {
    let required_part = if required_total == 0 {
        1.0
    } else {
        required_fulfilled as f64 / required_total as f64
    };
    let optional_part = if optional_total == 0 {
        0.0
    } else {
        0.2 * (optional_fulfilled as f64 / optional_total as f64)
    };
    (required_part + optional_part).min(1.0)
}

/// Evaluate a parsed intent, reproducing the NLP Engine's action score
/// and independently deriving parameter fit, completeness, and quality.
pub fn evaluate(intent: &ParsedIntent, tokens: &[Token]) -> ConfidenceEvaluation {
    let text = &intent.original_command;

    let action_score = if intent.is_unknown() {
        0.0
    } else {
        match get_action_patterns()
            .iter()
            .find(|a| a.action_name == intent.action)
        {
            Some(action) => {
                dronecmd_nlp::matcher::score_action(action, text, tokens).score
            }
            None => intent.confidence,
        }
    };

    let (parameter_score_value, details, required_total, required_fulfilled, optional_total, optional_fulfilled) =
        score_parameters(intent);

    let completeness_value = completeness(
        required_total,
        required_fulfilled,
        optional_total,
        optional_fulfilled,
    );

    let has_all_required = required_fulfilled >= required_total;
    let has_conflicting = quality::has_conflicting_params(text);
    let has_ambiguous = quality::has_ambiguous_terms(text);
    let morphological_match = dronecmd_nlp::morphology::has_morphological_evidence(&intent.action, tokens);

    let quality_flags = QualityFlags {
        has_all_required,
        has_conflicting_params: has_conflicting,
        has_ambiguous_terms: has_ambiguous,
        morphological_match,
    };

    let mut quality_bonus = 0.0;
    if has_all_required {
        quality_bonus += 0.05;
    }
    if !has_conflicting {
        quality_bonus += 0.05;
    }
    if !has_ambiguous {
        quality_bonus += 0.025;
    }
    if morphological_match {
        quality_bonus += 0.025;
    }

    let overall = (0.4 * action_score + 0.3 * parameter_score_value + 0.2 * completeness_value
        + quality_bonus)
        .min(1.0);

    let mut suggestions = Vec::new();
    if overall < REPHRASE_THRESHOLD {
        suggestions.push(
            "Low confidence in this interpretation — try rephrasing the command more explicitly."
                .to_string(),
        );
    }
    if let Some(action) = get_action_patterns()
        .iter()
        .find(|a| a.action_name == intent.action)
    {
        for (i, param_name) in action.required_params.iter().enumerate() {
            let Some(detail) = details.get(i) else { continue };
            if detail.accepted_value().is_none() {
                if let Some(pattern) = get_parameter_pattern(param_name) {
                    if let Some(example) = pattern.examples.first() {
                        suggestions.push(format!(
                            "Missing required parameter '{param_name}', e.g. \"{example}\""
                        ));
                    }
                }
            }
            if detail.validator_accepted == Some(false) {
                suggestions.push(format!(
                    "'{param_name}' should be {}",
                    ranges::valid_range_hint(param_name)
                ));
            }
        }
    }

    let mut risks = Vec::new();
    if overall < REPHRASE_THRESHOLD {
        risks.push("low-confidence execution risk".to_string());
    }
    if has_conflicting {
        risks.push("conflicting parameters detected".to_string());
    }
    if !has_all_required {
        risks.push("missing required parameter".to_string());
    }
    if has_ambiguous {
        risks.push("ambiguous terms in command".to_string());
    }
    if DANGEROUS_ACTIONS.contains(&intent.action.as_str())
        && overall < DANGEROUS_ACTION_HIGH_CONFIDENCE_THRESHOLD
    {
        risks.push(format!(
            "dangerous action '{}' below high-confidence threshold",
            intent.action
        ));
    }

    ConfidenceEvaluation {
        overall,
        action_score,
        parameter_score: parameter_score_value,
        completeness: completeness_value,
        quality_flags,
        suggestions,
        risks,
    }
}

/// Default process-wide executability threshold (spec §4.3, §6's
/// `nlp_confidence_threshold` config key).
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.7;

pub fn reject_if_not_executable(
    evaluation: &ConfidenceEvaluation,
    threshold: f64,
) -> Result<(), DomainError> {
    if evaluation.is_executable(threshold) {
        return Ok(());
    }
    Err(DomainError::new(
        ErrorCode::AmbiguousCommand,
        "parsed command did not reach the confidence threshold required to execute",
    )
    .with_suggestions(evaluation.suggestions.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn high_confidence_full_command_is_executable() {
        let intent = dronecmd_nlp::parse("前に2m移動して", None, &[]);
        let eval = evaluate(&intent, &[]);
        assert!(eval.quality_flags.has_all_required);
        assert!(eval.is_executable(DEFAULT_CONFIDENCE_THRESHOLD));
    }

    #[test]
    fn missing_required_parameter_lowers_completeness() {
        let intent = dronecmd_nlp::parse("移動して", None, &[]);
        let eval = evaluate(&intent, &[]);
        assert!(!eval.quality_flags.has_all_required);
        assert!(eval.completeness < 1.0);
    }

    #[test]
    fn conflicting_directions_are_flagged() {
        let intent = dronecmd_nlp::parse("上に行って、それから下に移動して", None, &[]);
        let eval = evaluate(&intent, &[]);
        assert!(eval.quality_flags.has_conflicting_params);
        assert!(eval.risks.iter().any(|r| r.contains("conflicting")));
    }

    #[test]
    fn dangerous_action_below_high_threshold_is_a_risk() {
        let intent = dronecmd_nlp::parse("そろそろ飛び立ちたい", None, &[]);
        assert_eq!(intent.action, "takeoff");
        assert!(intent.confidence < DANGEROUS_ACTION_HIGH_CONFIDENCE_THRESHOLD);
        let eval = evaluate(&intent, &[]);
        assert!(eval.risks.iter().any(|r| r.contains("takeoff")));
    }

    #[test]
    fn unknown_intent_has_zero_action_score() {
        let intent = ParsedIntent::unknown("asdkjasd");
        let eval = evaluate(&intent, &[]);
        assert_eq!(eval.action_score, 0.0);
    }
}
