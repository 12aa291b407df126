//! Short-TTL drone status cache (spec §4.5.1).
//!
//! A single lock over the whole cache — at the described scale (O(drones),
//! 30s TTL) a per-key lock would be premature.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use dronecmd_domain::DroneStatus;

struct Entry<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Entry<T> {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.fetched_at.elapsed() < ttl
    }
}

#[derive(Default)]
pub struct StatusCache {
    per_drone: HashMap<String, Entry<DroneStatus>>,
    all: Option<Entry<Vec<DroneStatus>>>,
}

impl StatusCache {
    pub fn get_one(&self, drone_id: &str, ttl: Duration) -> Option<DroneStatus> {
        self.per_drone
            .get(drone_id)
            .filter(|e| e.is_fresh(ttl))
            .map(|e| e.value.clone())
    }

    pub fn get_all(&self, ttl: Duration) -> Option<Vec<DroneStatus>> {
        self.all
            .as_ref()
            .filter(|e| e.is_fresh(ttl))
            .map(|e| e.value.clone())
    }

    /// Age of the "all" entry, used by the readiness check to decide
    /// "degraded" (spec's supplemental health operation).
    pub fn all_entry_age(&self) -> Option<Duration> {
        self.all.as_ref().map(|e| e.fetched_at.elapsed())
    }

    pub fn put_one(&mut self, status: DroneStatus) {
        self.per_drone.insert(
            status.drone_id.clone(),
            Entry {
                value: status,
                fetched_at: Instant::now(),
            },
        );
    }

    pub fn put_all(&mut self, statuses: Vec<DroneStatus>) {
        for status in &statuses {
            self.per_drone.insert(
                status.drone_id.clone(),
                Entry {
                    value: status.clone(),
                    fetched_at: Instant::now(),
                },
            );
        }
        self.all = Some(Entry {
            value: statuses,
            fetched_at: Instant::now(),
        });
    }

    /// Invalidate one drone's entry and the "all" entry (spec §4.5.1: every
    /// successful command invalidates `{d, "all"}`).
    pub fn invalidate_drone(&mut self, drone_id: &str) {
        self.per_drone.remove(drone_id);
        self.all = None;
    }

    pub fn invalidate_all(&mut self) {
        self.per_drone.clear();
        self.all = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use dronecmd_domain::{ConnectionStatus, FlightStatus};

    fn sample(drone_id: &str) -> DroneStatus {
        DroneStatus {
            drone_id: drone_id.to_string(),
            connection_status: ConnectionStatus::Connected,
            flight_status: FlightStatus::Landed,
            battery_level: 80.0,
            height: 0.0,
            temperature: 25.0,
            wifi_signal: 90.0,
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn fresh_entry_is_returned_within_ttl() {
        let mut cache = StatusCache::default();
        cache.put_one(sample("AA"));
        assert!(cache.get_one("AA", Duration::from_secs(30)).is_some());
    }

    #[test]
    fn expired_entry_is_not_returned() {
        let mut cache = StatusCache::default();
        cache.put_one(sample("AA"));
        assert!(cache.get_one("AA", Duration::from_nanos(0)).is_none());
    }

    #[test]
    fn invalidate_drone_clears_its_entry_and_all() {
        let mut cache = StatusCache::default();
        cache.put_all(vec![sample("AA"), sample("BB")]);
        cache.invalidate_drone("AA");
        assert!(cache.get_one("AA", Duration::from_secs(30)).is_none());
        assert!(cache.get_all(Duration::from_secs(30)).is_none());
        assert!(cache.get_one("BB", Duration::from_secs(30)).is_some());
    }
}
