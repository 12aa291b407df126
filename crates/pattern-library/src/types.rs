//! Declarative pattern tables (spec §3, §4.1).
//!
//! `ActionPattern` and `ParameterPattern` are plain, `'static` data —
//! the library is a compile-time constant, compiled and validated once at
//! startup (`validate_all`), never mutated afterwards.

use dronecmd_domain::{ParameterType, ParameterValue};

/// A conversion failure: the raw matched text did not parse into the
/// parameter's declared type.
#[derive(Debug, Clone, thiserror::Error)]
#[error("could not convert '{raw}' for parameter '{param}'")]
pub struct ConversionError {
    pub param: &'static str,
    pub raw: String,
}

impl ConversionError {
    pub fn new(param: &'static str, raw: impl Into<String>) -> Self {
        Self {
            param,
            raw: raw.into(),
        }
    }
}

pub type Converter = fn(&str) -> Result<ParameterValue, ConversionError>;
pub type Validator = fn(&ParameterValue) -> bool;

/// Static description of one recognizable action (spec §3).
pub struct ActionPattern {
    pub action_name: &'static str,
    pub regex_patterns: &'static [&'static str],
    pub base_confidence: f64,
    pub required_params: &'static [&'static str],
    pub optional_params: &'static [&'static str],
    pub examples: &'static [&'static str],
}

/// Static description of one recognizable parameter (spec §3).
pub struct ParameterPattern {
    pub name: &'static str,
    pub regex_patterns: &'static [&'static str],
    pub param_type: ParameterType,
    pub converter: Option<Converter>,
    pub validator: Option<Validator>,
    pub examples: &'static [&'static str],
}
