//! Precondition gating (spec §4.5.2): reject a command before it ever
//! reaches the backend when cached status already rules it out.

use dronecmd_domain::{
    is_dangerous_action_name, ConnectionStatus, DomainError, DroneStatus, ErrorCode,
    MIN_TAKEOFF_BATTERY,
};

const IN_FLIGHT_ACTIONS: &[&str] = &["move", "rotate", "altitude", "land", "take_photo"];

/// Check the cached status against the action about to be dispatched.
/// `status = None` means the drone is unknown to the backend.
pub fn check(status: Option<&DroneStatus>, action_name: &str) -> Result<(), DomainError> {
    let Some(status) = status else {
        return Err(DomainError::new(
            ErrorCode::DroneNotFound,
            "drone is not known to the backend",
        ));
    };

    if status.connection_status == ConnectionStatus::Disconnected && action_name != "connect" {
        return Err(DomainError::new(
            ErrorCode::DroneDisconnected,
            "drone is disconnected",
        ));
    }

    if status.connection_status == ConnectionStatus::Error {
        return Err(DomainError::new(
            ErrorCode::DroneErrorState,
            "drone is in an error state",
        ));
    }

    // Boundary per spec §8: 15% rejects, 16% accepts — the cutoff is
    // inclusive of the minimum, not a strict "less than".
    if action_name == "takeoff" && status.battery_level <= MIN_TAKEOFF_BATTERY {
        return Err(DomainError::new(
            ErrorCode::LowBattery,
            format!(
                "battery at {:.0}%, below the {:.0}% minimum required for takeoff",
                status.battery_level, MIN_TAKEOFF_BATTERY
            ),
        ));
    }

    if IN_FLIGHT_ACTIONS.contains(&action_name) && !status.flight_status.is_in_flight() {
        return Err(DomainError::new(
            ErrorCode::DroneNotReady,
            "drone must be in flight for this command",
        ));
    }

    if action_name == "connect" && status.connection_status == ConnectionStatus::Connected {
        return Err(DomainError::new(
            ErrorCode::DroneAlreadyConnected,
            "drone is already connected",
        ));
    }

    Ok(())
}

/// Dangerous-command confirmation policy (spec §4.5.3, §9 "centralize in
/// one service layer"): callers that did not pass `confirm: true` for a
/// dangerous action are rejected before dispatch.
pub fn check_confirmation(action_name: &str, confirmed: bool) -> Result<(), DomainError> {
    if is_dangerous_action_name(action_name) && !confirmed {
        return Err(DomainError::new(
            ErrorCode::DangerousCommandConfirmationRequired,
            format!("action '{action_name}' requires explicit confirmation"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dronecmd_domain::FlightStatus;

    fn status(connection: ConnectionStatus, flight: FlightStatus, battery: f64) -> DroneStatus {
        DroneStatus {
            drone_id: "AA".to_string(),
            connection_status: connection,
            flight_status: flight,
            battery_level: battery,
            height: 0.0,
            temperature: 25.0,
            wifi_signal: 90.0,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn unknown_drone_is_not_found() {
        assert_eq!(
            check(None, "connect").unwrap_err().code,
            ErrorCode::DroneNotFound
        );
    }

    #[test]
    fn disconnected_drone_rejects_non_connect() {
        let s = status(ConnectionStatus::Disconnected, FlightStatus::Landed, 80.0);
        assert_eq!(
            check(Some(&s), "takeoff").unwrap_err().code,
            ErrorCode::DroneDisconnected
        );
        assert!(check(Some(&s), "connect").is_ok());
    }

    #[test]
    fn low_battery_rejects_takeoff_at_exactly_fifteen() {
        let low = status(ConnectionStatus::Connected, FlightStatus::Landed, 15.0);
        assert_eq!(
            check(Some(&low), "takeoff").unwrap_err().code,
            ErrorCode::LowBattery
        );
        let ok = status(ConnectionStatus::Connected, FlightStatus::Landed, 16.0);
        assert!(check(Some(&ok), "takeoff").is_ok());
    }

    #[test]
    fn in_flight_action_on_landed_drone_is_not_ready() {
        let s = status(ConnectionStatus::Connected, FlightStatus::Landed, 80.0);
        assert_eq!(
            check(Some(&s), "move").unwrap_err().code,
            ErrorCode::DroneNotReady
        );
    }

    #[test]
    fn connecting_already_connected_drone_is_rejected() {
        let s = status(ConnectionStatus::Connected, FlightStatus::Landed, 80.0);
        assert_eq!(
            check(Some(&s), "connect").unwrap_err().code,
            ErrorCode::DroneAlreadyConnected
        );
    }

    #[test]
    fn dangerous_action_requires_confirmation() {
        assert_eq!(
            check_confirmation("emergency_stop", false)
                .unwrap_err()
                .code,
            ErrorCode::DangerousCommandConfirmationRequired
        );
        assert!(check_confirmation("emergency_stop", true).is_ok());
        assert!(check_confirmation("move", false).is_ok());
    }
}
