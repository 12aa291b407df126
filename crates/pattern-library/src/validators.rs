//! Parameter validators: `true` only for in-range values (spec §3, §4.1).

use dronecmd_domain::ParameterValue;

/// Distance/height in centimeters, `[20, 1000]` per spec §8's boundary table.
pub fn distance_validator(value: &ParameterValue) -> bool {
    matches!(value.as_number(), Some(n) if n >= 20.0 && n <= 1000.0)
}

/// Angle in degrees, `[0, 360]`.
pub fn angle_validator(value: &ParameterValue) -> bool {
    matches!(value.as_number(), Some(n) if (0.0..=360.0).contains(&n))
}

/// Confidence threshold, `[0, 1]`.
pub fn confidence_threshold_validator(value: &ParameterValue) -> bool {
    matches!(value.as_number(), Some(n) if (0.0..=1.0).contains(&n))
}

pub fn direction_validator(value: &ParameterValue) -> bool {
    matches!(
        value.as_text(),
        Some(
            "up" | "down" | "left" | "right" | "forward" | "back" | "clockwise"
                | "counterclockwise"
        )
    )
}

pub fn quality_validator(value: &ParameterValue) -> bool {
    matches!(
        value.as_text(),
        Some("lowest" | "low" | "medium" | "high" | "highest")
    )
}

pub fn non_empty_text_validator(value: &ParameterValue) -> bool {
    matches!(value.as_text(), Some(s) if !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_validator_boundary() {
        assert!(!distance_validator(&ParameterValue::Number(19.0)));
        assert!(distance_validator(&ParameterValue::Number(20.0)));
        assert!(distance_validator(&ParameterValue::Number(1000.0)));
        assert!(!distance_validator(&ParameterValue::Number(1001.0)));
        assert!(!distance_validator(&ParameterValue::Number(0.0)));
    }

    #[test]
    fn angle_validator_boundary() {
        assert!(angle_validator(&ParameterValue::Number(360.0)));
        assert!(!angle_validator(&ParameterValue::Number(361.0)));
        assert!(angle_validator(&ParameterValue::Number(0.0)));
    }

    #[test]
    fn confidence_threshold_validator_boundary() {
        assert!(confidence_threshold_validator(&ParameterValue::Number(0.0)));
        assert!(confidence_threshold_validator(&ParameterValue::Number(1.0)));
        assert!(!confidence_threshold_validator(&ParameterValue::Number(
            1.1
        )));
    }

    #[test]
    fn direction_validator_accepts_canonical_values_only() {
        assert!(direction_validator(&ParameterValue::Text(
            "forward".to_string()
        )));
        assert!(!direction_validator(&ParameterValue::Text(
            "diagonal".to_string()
        )));
    }
}
