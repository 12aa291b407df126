//! The compile-time pattern library: a static table of recognizable
//! actions and parameters, compiled to `regex::Regex` once at process
//! startup and validated so a broken pattern fails loudly instead of
//! silently matching nothing (spec §4.1).

pub mod actions;
pub mod converters;
pub mod parameters;
pub mod types;
pub mod validators;

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

pub use actions::ACTION_PATTERNS;
pub use parameters::PARAMETER_PATTERNS;
pub use types::{ActionPattern, ConversionError, Converter, ParameterPattern, Validator};

#[derive(Debug, thiserror::Error)]
pub enum PatternLibraryError {
    #[error("action pattern '{action}' has invalid regex '{pattern}': {source}")]
    InvalidActionRegex {
        action: &'static str,
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("parameter pattern '{name}' has invalid regex '{pattern}': {source}")]
    InvalidParameterRegex {
        name: &'static str,
        pattern: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("duplicate action_name '{0}' in the action pattern table")]
    DuplicateActionName(&'static str),
    #[error("duplicate parameter name '{0}' in the parameter pattern table")]
    DuplicateParameterName(&'static str),
    #[error("action '{action}' requires unknown parameter '{param}'")]
    UnknownRequiredParameter {
        action: &'static str,
        param: &'static str,
    },
}

/// All action patterns' regexes, compiled once. Panics (at first access,
/// i.e. at startup) if any fails to compile — callers that want a
/// recoverable path should call [`validate_all`] first.
static COMPILED_ACTION_REGEXES: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    ACTION_PATTERNS
        .iter()
        .map(|action| {
            let compiled = action
                .regex_patterns
                .iter()
                .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("bad regex '{p}': {e}")))
                .collect();
            (action.action_name, compiled)
        })
        .collect()
});

static COMPILED_PARAMETER_REGEXES: Lazy<Vec<(&'static str, Vec<Regex>)>> = Lazy::new(|| {
    PARAMETER_PATTERNS
        .iter()
        .map(|param| {
            let compiled = param
                .regex_patterns
                .iter()
                .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("bad regex '{p}': {e}")))
                .collect();
            (param.name, compiled)
        })
        .collect()
});

/// Compile and sanity-check the whole table without panicking. Call this
/// once at process startup; a non-empty error list means the binary
/// should refuse to start.
pub fn validate_all() -> Result<(), Vec<PatternLibraryError>> {
    let mut errors = Vec::new();

    let mut action_names = HashSet::new();
    for action in ACTION_PATTERNS {
        if !action_names.insert(action.action_name) {
            errors.push(PatternLibraryError::DuplicateActionName(
                action.action_name,
            ));
        }
        for pattern in action.regex_patterns {
            if let Err(source) = Regex::new(pattern) {
                errors.push(PatternLibraryError::InvalidActionRegex {
                    action: action.action_name,
                    pattern,
                    source,
                });
            }
        }
    }

    let mut param_names = HashSet::new();
    for param in PARAMETER_PATTERNS {
        if !param_names.insert(param.name) {
            errors.push(PatternLibraryError::DuplicateParameterName(param.name));
        }
        for pattern in param.regex_patterns {
            if let Err(source) = Regex::new(pattern) {
                errors.push(PatternLibraryError::InvalidParameterRegex {
                    name: param.name,
                    pattern,
                    source,
                });
            }
        }
    }

    for action in ACTION_PATTERNS {
        for required in action.required_params.iter().chain(action.optional_params) {
            if !param_names.contains(required) {
                errors.push(PatternLibraryError::UnknownRequiredParameter {
                    action: action.action_name,
                    param: required,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn get_action_patterns() -> &'static [ActionPattern] {
    ACTION_PATTERNS
}

pub fn get_parameter_pattern(name: &str) -> Option<&'static ParameterPattern> {
    PARAMETER_PATTERNS.iter().find(|p| p.name == name)
}

/// The compiled regexes for one action, in declaration order.
pub fn compiled_action_regexes(action_name: &str) -> Option<&'static [Regex]> {
    COMPILED_ACTION_REGEXES
        .iter()
        .find(|(name, _)| *name == action_name)
        .map(|(_, regexes)| regexes.as_slice())
}

/// The compiled regexes for one parameter, in declaration order.
pub fn compiled_parameter_regexes(param_name: &str) -> Option<&'static [Regex]> {
    COMPILED_PARAMETER_REGEXES
        .iter()
        .find(|(name, _)| *name == param_name)
        .map(|(_, regexes)| regexes.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_all_passes_on_the_shipped_table() {
        assert!(validate_all().is_ok());
    }

    #[test]
    fn get_action_patterns_is_non_empty() {
        assert!(!get_action_patterns().is_empty());
    }

    #[test]
    fn get_parameter_pattern_finds_known_names() {
        assert!(get_parameter_pattern("distance").is_some());
        assert!(get_parameter_pattern("nonexistent").is_none());
    }

    #[test]
    fn compiled_regexes_are_cached_and_match() {
        let regexes = compiled_action_regexes("takeoff").expect("takeoff action exists");
        assert!(regexes.iter().any(|r| r.is_match("離陸して")));
    }
}
