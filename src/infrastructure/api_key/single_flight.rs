//! Per-principal single-flight guard for mutating key operations

use std::sync::Arc;

use dashmap::DashSet;

/// Tracks principals with a mutation in flight.
///
/// Overlapping mutations are dropped, not queued: a second `try_acquire` for
/// the same principal fails until the first guard is dropped.
#[derive(Debug, Default, Clone)]
pub struct SingleFlight {
    in_flight: Arc<DashSet<String>>,
}

impl SingleFlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `key`, or `None` if it is already taken
    pub fn try_acquire(&self, key: &str) -> Option<FlightGuard> {
        if self.in_flight.insert(key.to_string()) {
            Some(FlightGuard {
                in_flight: Arc::clone(&self.in_flight),
                key: key.to_string(),
            })
        } else {
            None
        }
    }

    #[cfg(test)]
    pub fn is_in_flight(&self, key: &str) -> bool {
        self.in_flight.contains(key)
    }
}

/// Releases its slot on drop
#[derive(Debug)]
pub struct FlightGuard {
    in_flight: Arc<DashSet<String>>,
    key: String,
}

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.in_flight.remove(&self.key);
    }
}
