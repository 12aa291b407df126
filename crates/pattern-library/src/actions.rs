//! The static action-pattern table (spec §4.1's minimum action coverage).

use crate::types::ActionPattern;

pub static ACTION_PATTERNS: &[ActionPattern] = &[
    ActionPattern {
        action_name: "connect",
        regex_patterns: &["接続", "つないで", "繋いで", "(?i)connect"],
        base_confidence: 0.85,
        required_params: &["drone_id"],
        optional_params: &[],
        examples: &["ドローンAAに接続して", "connect to drone AA"],
    },
    ActionPattern {
        action_name: "disconnect",
        regex_patterns: &["切断", "切って", "(?i)disconnect"],
        base_confidence: 0.85,
        required_params: &["drone_id"],
        optional_params: &[],
        examples: &["ドローンAAを切断して", "disconnect drone AA"],
    },
    ActionPattern {
        action_name: "takeoff",
        regex_patterns: &["離陸", "飛び立", "(?i)take[\\s-]?off"],
        base_confidence: 0.8,
        required_params: &[],
        optional_params: &["drone_id", "height"],
        examples: &["離陸して", "take off"],
    },
    ActionPattern {
        action_name: "land",
        regex_patterns: &["着陸", "降りて", "(?i)\\bland\\b"],
        base_confidence: 0.85,
        required_params: &[],
        optional_params: &["drone_id"],
        examples: &["着陸して", "land the drone"],
    },
    ActionPattern {
        action_name: "emergency_stop",
        regex_patterns: &[
            "緊急停止",
            "(?i)emergency\\s*stop",
            "(?i)stop\\s*immediately",
        ],
        base_confidence: 0.9,
        required_params: &[],
        optional_params: &["drone_id"],
        examples: &["緊急停止して", "emergency stop"],
    },
    ActionPattern {
        action_name: "move",
        regex_patterns: &["移動", "進んで", "進む", "(?i)\\bmove\\b"],
        base_confidence: 0.75,
        required_params: &["direction", "distance"],
        optional_params: &["drone_id"],
        examples: &["前に2m移動して", "move forward 200cm"],
    },
    ActionPattern {
        action_name: "rotate",
        regex_patterns: &["回転", "回って", "(?i)\\brotate\\b", "(?i)\\bturn\\b"],
        base_confidence: 0.75,
        required_params: &["direction", "angle"],
        optional_params: &["drone_id"],
        examples: &["時計回りに90度回転", "rotate clockwise 90 degrees"],
    },
    ActionPattern {
        action_name: "altitude",
        regex_patterns: &["高度", "(?i)altitude", "(?i)set\\s*altitude"],
        base_confidence: 0.75,
        required_params: &["height"],
        optional_params: &["drone_id"],
        examples: &["高度を150cmに設定", "set altitude to 150cm"],
    },
    ActionPattern {
        action_name: "take_photo",
        regex_patterns: &["写真", "撮って", "(?i)take\\s*a?\\s*photo", "(?i)picture"],
        base_confidence: 0.8,
        required_params: &[],
        optional_params: &["drone_id", "quality", "filename"],
        examples: &["写真を撮って", "take a photo"],
    },
    ActionPattern {
        action_name: "start_streaming",
        regex_patterns: &[
            "配信開始",
            "ストリーミング開始",
            "(?i)start\\s*stream(?:ing)?",
        ],
        base_confidence: 0.8,
        required_params: &[],
        optional_params: &["drone_id", "quality"],
        examples: &["配信を開始して", "start streaming"],
    },
    ActionPattern {
        action_name: "stop_streaming",
        regex_patterns: &[
            "配信停止",
            "ストリーミング停止",
            "(?i)stop\\s*stream(?:ing)?",
        ],
        base_confidence: 0.8,
        required_params: &[],
        optional_params: &["drone_id"],
        examples: &["配信を停止して", "stop streaming"],
    },
    ActionPattern {
        action_name: "detect_objects",
        regex_patterns: &["検出", "認識して", "(?i)detect"],
        base_confidence: 0.75,
        required_params: &["target_class"],
        optional_params: &["drone_id", "confidence_threshold"],
        examples: &["人を検出して", "detect person"],
    },
    ActionPattern {
        action_name: "start_tracking",
        regex_patterns: &["追跡開始", "追いかけて", "(?i)start\\s*track(?:ing)?"],
        base_confidence: 0.75,
        required_params: &["target_class"],
        optional_params: &["drone_id", "follow_distance"],
        examples: &["人を追跡して", "start tracking person"],
    },
    ActionPattern {
        action_name: "stop_tracking",
        regex_patterns: &["追跡停止", "(?i)stop\\s*track(?:ing)?"],
        base_confidence: 0.8,
        required_params: &[],
        optional_params: &["drone_id"],
        examples: &["追跡を停止して", "stop tracking"],
    },
    ActionPattern {
        action_name: "get_status",
        regex_patterns: &["状態", "ステータス", "(?i)get\\s*status", "(?i)\\bstatus\\b"],
        base_confidence: 0.85,
        required_params: &[],
        optional_params: &["drone_id"],
        examples: &["ドローンの状態を教えて", "get drone status"],
    },
    ActionPattern {
        action_name: "health_check",
        regex_patterns: &[
            "ヘルスチェック",
            "動作確認",
            "(?i)health\\s*check",
        ],
        base_confidence: 0.9,
        required_params: &[],
        optional_params: &[],
        examples: &["ヘルスチェックして", "run a health check"],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_name_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for pattern in ACTION_PATTERNS {
            assert!(
                seen.insert(pattern.action_name),
                "duplicate action_name: {}",
                pattern.action_name
            );
        }
    }

    #[test]
    fn every_base_confidence_is_at_most_one() {
        for pattern in ACTION_PATTERNS {
            assert!(pattern.base_confidence <= 1.0);
            assert!(pattern.base_confidence > 0.0);
        }
    }
}
