//! Per-action "produces"/"requires" effect sets the DAG builder derives
//! edges from (spec §4.7, §9 "keep the dependency rules in one place").

struct ActionEffects {
    action_name: &'static str,
    produces: &'static [&'static str],
    requires: &'static [&'static str],
}

static ACTION_EFFECTS: &[ActionEffects] = &[
    ActionEffects {
        action_name: "connect",
        produces: &["connected"],
        requires: &[],
    },
    ActionEffects {
        action_name: "disconnect",
        produces: &[],
        requires: &["connected"],
    },
    ActionEffects {
        action_name: "takeoff",
        produces: &["in_air"],
        requires: &["connected"],
    },
    ActionEffects {
        action_name: "land",
        produces: &["landed"],
        requires: &["in_air"],
    },
    ActionEffects {
        action_name: "move",
        produces: &[],
        requires: &["in_air"],
    },
    ActionEffects {
        action_name: "rotate",
        produces: &[],
        requires: &["in_air"],
    },
    ActionEffects {
        action_name: "altitude",
        produces: &[],
        requires: &["in_air"],
    },
    ActionEffects {
        action_name: "take_photo",
        produces: &[],
        requires: &["in_air"],
    },
    ActionEffects {
        action_name: "emergency_stop",
        produces: &["landed"],
        requires: &["connected"],
    },
    ActionEffects {
        action_name: "start_streaming",
        produces: &["streaming"],
        requires: &["connected"],
    },
    ActionEffects {
        action_name: "stop_streaming",
        produces: &[],
        requires: &["streaming"],
    },
    ActionEffects {
        action_name: "detect_objects",
        produces: &[],
        requires: &["connected"],
    },
    ActionEffects {
        action_name: "start_tracking",
        produces: &["tracking"],
        requires: &["connected"],
    },
    ActionEffects {
        action_name: "stop_tracking",
        produces: &[],
        requires: &["tracking"],
    },
    ActionEffects {
        action_name: "get_status",
        produces: &[],
        requires: &[],
    },
    ActionEffects {
        action_name: "health_check",
        produces: &[],
        requires: &[],
    },
];

pub fn produces(action_name: &str) -> &'static [&'static str] {
    ACTION_EFFECTS
        .iter()
        .find(|e| e.action_name == action_name)
        .map(|e| e.produces)
        .unwrap_or(&[])
}

pub fn requires(action_name: &str) -> &'static [&'static str] {
    ACTION_EFFECTS
        .iter()
        .find(|e| e.action_name == action_name)
        .map(|e| e.requires)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takeoff_requires_connected_and_produces_in_air() {
        assert_eq!(requires("takeoff"), &["connected"]);
        assert_eq!(produces("takeoff"), &["in_air"]);
    }

    #[test]
    fn unknown_action_has_no_effects() {
        assert!(requires("unknown").is_empty());
        assert!(produces("unknown").is_empty());
    }
}
