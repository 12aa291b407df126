//! Parameter extraction (spec §4.2): for each expected parameter, iterate
//! its regex list, take the first match's capture group 1, run it through
//! the converter then the validator. A validator rejection counts as "not
//! matched" but is still visible to callers that want to build risks or
//! suggestions from it.

use std::collections::BTreeMap;

use dronecmd_domain::ParameterValue;
use dronecmd_pattern_library::{compiled_parameter_regexes, get_parameter_pattern};
use tracing::warn;

/// Extraction detail for one expected parameter, regardless of outcome.
#[derive(Debug, Clone)]
pub struct ParamExtractionDetail {
    pub name: String,
    pub pattern_matched: bool,
    pub converted: Option<ParameterValue>,
    pub validator_accepted: Option<bool>,
}

impl ParamExtractionDetail {
    pub fn accepted_value(&self) -> Option<&ParameterValue> {
        match self.validator_accepted {
            Some(false) => None,
            _ => self.converted.as_ref(),
        }
    }
}

fn extract_one(name: &str, text: &str) -> ParamExtractionDetail {
    let Some(pattern) = get_parameter_pattern(name) else {
        return ParamExtractionDetail {
            name: name.to_string(),
            pattern_matched: false,
            converted: None,
            validator_accepted: None,
        };
    };
    let regexes = compiled_parameter_regexes(name).unwrap_or(&[]);

    for regex in regexes {
        let Some(captures) = regex.captures(text) else {
            continue;
        };
        let Some(raw) = captures.get(1).or_else(|| captures.get(0)) else {
            continue;
        };
        let raw = raw.as_str();
        let converted = match pattern.converter {
            Some(converter) => match converter(raw) {
                Ok(value) => value,
                Err(err) => {
                    warn!(parameter = name, %raw, error = %err, "converter rejected captured text");
                    continue;
                }
            },
            None => ParameterValue::Text(raw.to_string()),
        };
        let validator_accepted = pattern.validator.map(|v| v(&converted));
        return ParamExtractionDetail {
            name: name.to_string(),
            pattern_matched: true,
            converted: Some(converted),
            validator_accepted,
        };
    }

    ParamExtractionDetail {
        name: name.to_string(),
        pattern_matched: false,
        converted: None,
        validator_accepted: None,
    }
}

/// Extract every expected parameter (required ∪ optional) for the chosen
/// action, in declaration order.
pub fn extract_all(
    required: &[&'static str],
    optional: &[&'static str],
    text: &str,
) -> Vec<ParamExtractionDetail> {
    required
        .iter()
        .chain(optional.iter())
        .map(|name| extract_one(name, text))
        .collect()
}

/// Reduce extraction details to the accepted `{name: value}` map a
/// `ParsedIntent` carries.
pub fn accepted_parameters(
    details: &[ParamExtractionDetail],
) -> BTreeMap<String, ParameterValue> {
    details
        .iter()
        .filter_map(|d| d.accepted_value().map(|v| (d.name.clone(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_distance_in_centimeters() {
        let detail = extract_one("distance", "前に2m移動して");
        assert!(detail.pattern_matched);
        assert_eq!(detail.validator_accepted, Some(true));
        assert_eq!(detail.converted.unwrap().as_number(), Some(200.0));
    }

    #[test]
    fn validator_rejection_is_not_accepted() {
        let detail = extract_one("angle", "500度回転");
        assert!(detail.pattern_matched);
        assert_eq!(detail.validator_accepted, Some(false));
        assert!(detail.accepted_value().is_none());
    }

    #[test]
    fn missing_parameter_is_unmatched() {
        let detail = extract_one("drone_id", "離陸して");
        assert!(!detail.pattern_matched);
        assert!(detail.accepted_value().is_none());
    }
}
