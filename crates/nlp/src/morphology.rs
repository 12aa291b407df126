//! The small per-action keyword table that morphological evidence is
//! checked against (spec §4.2). Deliberately tiny: it only needs to
//! catch forms a raw regex list might miss (e.g. "flying" vs "fly").

use dronecmd_domain::Token;

struct ActionKeywords {
    action_name: &'static str,
    keywords: &'static [&'static str],
}

static ACTION_KEYWORDS: &[ActionKeywords] = &[
    ActionKeywords {
        action_name: "connect",
        keywords: &["connect", "connecting", "接続"],
    },
    ActionKeywords {
        action_name: "disconnect",
        keywords: &["disconnect", "disconnecting", "切断"],
    },
    ActionKeywords {
        action_name: "takeoff",
        keywords: &["takeoff", "take-off", "fly", "flying", "launch", "離陸"],
    },
    ActionKeywords {
        action_name: "land",
        keywords: &["land", "landing", "着陸"],
    },
    ActionKeywords {
        action_name: "emergency_stop",
        keywords: &["emergency", "stop", "halt", "緊急", "停止"],
    },
    ActionKeywords {
        action_name: "move",
        keywords: &["move", "moving", "移動", "進む"],
    },
    ActionKeywords {
        action_name: "rotate",
        keywords: &["rotate", "rotating", "turn", "回転"],
    },
    ActionKeywords {
        action_name: "altitude",
        keywords: &["altitude", "height", "高度"],
    },
    ActionKeywords {
        action_name: "take_photo",
        keywords: &["photo", "picture", "snapshot", "写真"],
    },
    ActionKeywords {
        action_name: "start_streaming",
        keywords: &["stream", "streaming", "配信"],
    },
    ActionKeywords {
        action_name: "stop_streaming",
        keywords: &["stream", "streaming", "配信"],
    },
    ActionKeywords {
        action_name: "detect_objects",
        keywords: &["detect", "detecting", "recognize", "検出", "認識"],
    },
    ActionKeywords {
        action_name: "start_tracking",
        keywords: &["track", "tracking", "follow", "追跡"],
    },
    ActionKeywords {
        action_name: "stop_tracking",
        keywords: &["track", "tracking", "追跡"],
    },
    ActionKeywords {
        action_name: "get_status",
        keywords: &["status", "state", "状態"],
    },
    ActionKeywords {
        action_name: "health_check",
        keywords: &["health", "healthcheck", "確認"],
    },
];

/// Whether any token's basic form appears in the action's keyword list.
pub fn has_morphological_evidence(action_name: &str, tokens: &[Token]) -> bool {
    let Some(entry) = ACTION_KEYWORDS.iter().find(|e| e.action_name == action_name) else {
        return false;
    };
    tokens
        .iter()
        .any(|t| entry.keywords.contains(&t.basic.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_evidence_for_known_action() {
        let tokens = vec![Token {
            surface: "Flying".to_string(),
            basic: "flying".to_string(),
        }];
        assert!(has_morphological_evidence("takeoff", &tokens));
    }

    #[test]
    fn no_evidence_for_unrelated_tokens() {
        let tokens = vec![Token {
            surface: "banana".to_string(),
            basic: "banana".to_string(),
        }];
        assert!(!has_morphological_evidence("takeoff", &tokens));
    }

    #[test]
    fn unknown_action_has_no_evidence() {
        assert!(!has_morphological_evidence("unknown", &[]));
    }
}
