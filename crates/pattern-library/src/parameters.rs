//! The static parameter-pattern table (spec §4.1's minimum parameter coverage).

use dronecmd_domain::ParameterType;

use crate::converters;
use crate::types::ParameterPattern;
use crate::validators;

pub static PARAMETER_PATTERNS: &[ParameterPattern] = &[
    ParameterPattern {
        name: "drone_id",
        regex_patterns: &[
            "ドローン([A-Za-z0-9_-]+)",
            "(?i)drone[_\\s]+([a-z0-9_-]+)",
        ],
        param_type: ParameterType::String,
        converter: Some(converters::drone_id_converter),
        validator: Some(validators::non_empty_text_validator),
        examples: &["ドローンAAに接続して", "drone AA"],
    },
    ParameterPattern {
        name: "distance",
        regex_patterns: &[
            "(\\d+(?:\\.\\d+)?mm)(?:[^a-zA-Z]|$)",
            "(\\d+(?:\\.\\d+)?cm)(?:[^a-zA-Z]|$)",
            "(\\d+(?:\\.\\d+)?m)(?:[^a-zA-Z]|$)",
            "(\\d+(?:\\.\\d+)?)\\s*ミリメートル",
            "(\\d+(?:\\.\\d+)?)\\s*センチメートル",
            "(\\d+(?:\\.\\d+)?)\\s*メートル",
            "(\\d+(?:\\.\\d+)?)\\s*(?:移動|進んで|進む)",
        ],
        param_type: ParameterType::Number,
        converter: Some(converters::distance_converter),
        validator: Some(validators::distance_validator),
        examples: &["前に2m移動して", "move forward 200cm"],
    },
    ParameterPattern {
        name: "height",
        regex_patterns: &[
            "(\\d+(?:\\.\\d+)?mm)(?:[^a-zA-Z]|$)",
            "(\\d+(?:\\.\\d+)?cm)(?:[^a-zA-Z]|$)",
            "(\\d+(?:\\.\\d+)?m)(?:[^a-zA-Z]|$)",
            "(\\d+(?:\\.\\d+)?)\\s*(?:の高さ|高度|height)",
        ],
        param_type: ParameterType::Number,
        converter: Some(converters::height_converter),
        validator: Some(validators::distance_validator),
        examples: &["高度を150cmに設定", "set altitude to 150cm"],
    },
    ParameterPattern {
        name: "direction",
        regex_patterns: &[
            "(前に|前)",
            "(後ろに|後ろ|後)",
            "(上に|上)",
            "(下に|下)",
            "(左に|左)",
            "(右に|右)",
            "(時計回りに|時計回り)",
            "(反時計回りに|反時計回り)",
            "(?i)(forward|ahead)",
            "(?i)(backward|back)",
            "(?i)\\b(up)\\b",
            "(?i)\\b(down)\\b",
            "(?i)\\b(left)\\b",
            "(?i)\\b(right)\\b",
            "(?i)(clockwise|cw)",
            "(?i)(counterclockwise|ccw|anti-clockwise)",
        ],
        param_type: ParameterType::String,
        converter: Some(converters::direction_converter),
        validator: Some(validators::direction_validator),
        examples: &["前に2m移動して", "rotate clockwise 90 degrees"],
    },
    ParameterPattern {
        name: "angle",
        regex_patterns: &[
            "(\\d+(?:\\.\\d+)?)\\s*度",
            "(?i)(\\d+(?:\\.\\d+)?)\\s*degrees?",
        ],
        param_type: ParameterType::Number,
        converter: Some(converters::angle_converter),
        validator: Some(validators::angle_validator),
        examples: &["時計回りに90度回転", "rotate 90 degrees"],
    },
    ParameterPattern {
        name: "quality",
        regex_patterns: &[
            "(?i)(lowest|low|medium|high|highest|basic|super|ultra)",
            "(最低|最高|普通|標準|低|高)",
        ],
        param_type: ParameterType::String,
        converter: Some(converters::quality_converter),
        validator: Some(validators::quality_validator),
        examples: &["高画質で写真を撮って", "take a high quality photo"],
    },
    ParameterPattern {
        name: "filename",
        regex_patterns: &[
            "(?i)filename[:\\s]+([\\w.\\-]+)",
            "ファイル名[:\\s]*([\\w.\\-]+)",
        ],
        param_type: ParameterType::String,
        converter: Some(converters::filename_converter),
        validator: Some(validators::non_empty_text_validator),
        examples: &["filename: photo1.jpg として写真を撮って"],
    },
    ParameterPattern {
        name: "target_class",
        regex_patterns: &[
            "(?i)detect(?:ing)?\\s+(?:an?\\s+)?([a-z_]+)",
            "(?i)track(?:ing)?\\s+(?:an?\\s+)?([a-z_]+)",
            "([一-龠ぁ-んァ-ヶ]+)を(?:検出|認識|追跡)",
        ],
        param_type: ParameterType::String,
        converter: Some(converters::target_class_converter),
        validator: Some(validators::non_empty_text_validator),
        examples: &["人を検出して", "detect person"],
    },
    ParameterPattern {
        name: "confidence_threshold",
        regex_patterns: &[
            "(?i)confidence[:\\s]+(\\d+(?:\\.\\d+)?)",
            "信頼度[:\\s]*(\\d+(?:\\.\\d+)?)",
        ],
        param_type: ParameterType::Number,
        converter: Some(converters::confidence_threshold_converter),
        validator: Some(validators::confidence_threshold_validator),
        examples: &["confidence 0.8 で人を検出して"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_parameter_name_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for pattern in PARAMETER_PATTERNS {
            assert!(
                seen.insert(pattern.name),
                "duplicate parameter name: {}",
                pattern.name
            );
        }
    }

    #[test]
    fn every_pattern_list_is_non_empty() {
        for pattern in PARAMETER_PATTERNS {
            assert!(!pattern.regex_patterns.is_empty(), "{}", pattern.name);
        }
    }
}
