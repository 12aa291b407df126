//! Types shared by the Pattern Library, NLP Engine, and Confidence Evaluator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A parameter value after conversion, tagged by declared type (spec §3,
/// §9 "dynamic typing in the source").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterValue {
    Number(f64),
    Text(String),
    Flag(bool),
}

impl ParameterValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ParameterValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParameterValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Number(_) => "number",
            ParameterValue::Text(_) => "string",
            ParameterValue::Flag(_) => "boolean",
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Number(n) => write!(f, "{n}"),
            ParameterValue::Text(s) => write!(f, "{s}"),
            ParameterValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Declared type of a parameter, independent of the value carried at
/// runtime — used to check "type fit" in the Confidence Evaluator (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterType {
    Number,
    String,
    Boolean,
}

impl ParameterType {
    pub fn matches(self, value: &ParameterValue) -> bool {
        matches!(
            (self, value),
            (ParameterType::Number, ParameterValue::Number(_))
                | (ParameterType::String, ParameterValue::Text(_))
                | (ParameterType::Boolean, ParameterValue::Flag(_))
        )
    }
}

/// A single morphological token, `{surface, basic}` (spec §4.2, §9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    pub basic: String,
}

/// Optional context carried alongside a natural-language command, e.g. the
/// single currently-connected drone, used to resolve an omitted `drone_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct IntentContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_drone_id: Option<String>,
}

/// The distinguished action returned when no pattern matches (spec §4.2).
pub const UNKNOWN_ACTION: &str = "unknown";

/// Output of the NLP Engine (component B).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedIntent {
    pub action: String,
    pub parameters: BTreeMap<String, ParameterValue>,
    pub confidence: f64,
    pub original_command: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<IntentContext>,
}

impl ParsedIntent {
    pub fn unknown(original_command: impl Into<String>) -> Self {
        Self {
            action: UNKNOWN_ACTION.to_string(),
            parameters: BTreeMap::new(),
            confidence: 0.0,
            original_command: original_command.into(),
            context: None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.action == UNKNOWN_ACTION
    }

    pub fn drone_id(&self) -> Option<&str> {
        self.parameters.get("drone_id").and_then(|v| v.as_text())
    }
}

/// A near-miss candidate returned by `suggest` (component B).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: String,
    pub confidence: f64,
    pub example: String,
}

/// Output of the Confidence Evaluator (component C).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfidenceEvaluation {
    pub overall: f64,
    pub action_score: f64,
    pub parameter_score: f64,
    pub completeness: f64,
    pub quality_flags: QualityFlags,
    pub suggestions: Vec<String>,
    pub risks: Vec<String>,
}

impl ConfidenceEvaluation {
    /// `is_executable` per spec §4.3: overall clears `threshold`, all
    /// required parameters are present, and no conflicting parameters.
    pub fn is_executable(&self, threshold: f64) -> bool {
        self.overall >= threshold
            && self.quality_flags.has_all_required
            && !self.quality_flags.has_conflicting_params
    }
}

/// The four quality indicators from spec §4.3.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityFlags {
    pub has_all_required: bool,
    pub has_conflicting_params: bool,
    pub has_ambiguous_terms: bool,
    pub morphological_match: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unknown_intent_has_zero_confidence() {
        let intent = ParsedIntent::unknown("asdf");
        assert!(intent.is_unknown());
        assert_eq!(intent.confidence, 0.0);
        assert!(intent.parameters.is_empty());
    }

    #[test]
    fn parameter_type_matches_checks_variant_not_value() {
        assert!(ParameterType::Number.matches(&ParameterValue::Number(200.0)));
        assert!(!ParameterType::Number.matches(&ParameterValue::Text("x".into())));
        assert!(ParameterType::Boolean.matches(&ParameterValue::Flag(true)));
    }

    #[test]
    fn is_executable_requires_threshold_required_and_no_conflicts() {
        let mut eval = ConfidenceEvaluation {
            overall: 0.9,
            quality_flags: QualityFlags {
                has_all_required: true,
                has_conflicting_params: false,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(eval.is_executable(0.7));

        eval.quality_flags.has_conflicting_params = true;
        assert!(!eval.is_executable(0.7));

        eval.quality_flags.has_conflicting_params = false;
        eval.overall = 0.5;
        assert!(!eval.is_executable(0.7));
    }

    #[test]
    fn drone_id_reads_text_parameter() {
        let mut intent = ParsedIntent::unknown("connect");
        intent
            .parameters
            .insert("drone_id".to_string(), ParameterValue::Text("AA".into()));
        assert_eq!(intent.drone_id(), Some("AA"));
    }
}
