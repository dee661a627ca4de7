use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the page bridge
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Seconds between liveness checks (default: 5)
    pub liveness_interval_secs: u64,

    /// Buffered messages per direction (default: 100)
    pub queue_capacity: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            liveness_interval_secs: 5,
            queue_capacity: 100,
        }
    }
}

impl BridgeConfig {
    pub fn liveness_interval(&self) -> Duration {
        Duration::from_secs(self.liveness_interval_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = BridgeConfig::default();
        assert_eq!(config.liveness_interval(), Duration::from_secs(5));
        assert_eq!(config.queue_capacity, 100);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let config = BridgeConfig {
            liveness_interval_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.liveness_interval(), Duration::from_secs(1));
    }
}
