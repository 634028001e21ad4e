//! # Configuration
//!
//! The bridge reads one JSON file at startup.
//!
//! ## Example
//!
//! ```json
//! {
//!   "mode": "lasercutter",
//!   "ledBoardHost": "ledboard.local",
//!   "laserFinishedPattern": "peel-off-right",
//!   "ping": { "interval": 5, "consecutiveAnswers": 3 },
//!   "mqtt": { "host": "mqtt.local" }
//! }
//! ```
//!
//! ## Defaults
//!
//! | Key | Default |
//! |-----|---------|
//! | `ledBoardPort` | 9520 |
//! | `ping.timeout` | 1 (seconds) |
//! | `ping.port` | 7 |
//! | `mqtt.port` | 1883 |
//! | `mqtt.clientId` | `ledboard` |
//!
//! `laserFinishedPattern` has no default: lasercutter deployments must
//! choose between `peel-off-left` and `peel-off-right`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::controller::Mode;
use crate::error::LedboardError;
use crate::liveness::tcp::DEFAULT_ECHO_PORT;
use crate::screen::LaserFinishedPattern;
use crate::session::udp::DEFAULT_PORT;

/// Top-level configuration file
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Operating mode, fixed for the process lifetime
    pub mode: Mode,
    /// Hostname or address of the sign
    pub led_board_host: String,
    /// UDP port of the sign
    #[serde(default = "default_led_board_port")]
    pub led_board_port: u16,
    /// Transition of the "laser job finished" summary page
    #[serde(default)]
    pub laser_finished_pattern: Option<LaserFinishedPattern>,
    pub ping: PingConfig,
    pub mqtt: MqttConfig,
}

/// Liveness probe settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PingConfig {
    /// Seconds between checks
    pub interval: u64,
    /// Consecutive successful checks before the sign counts as alive
    pub consecutive_answers: u32,
    /// Seconds a single check may take
    #[serde(default = "default_ping_timeout")]
    pub timeout: u64,
    /// TCP port probed on the sign's host
    #[serde(default = "default_ping_port")]
    pub port: u16,
}

/// Event bus settings
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MqttConfig {
    pub host: String,
    #[serde(default = "default_mqtt_port")]
    pub port: u16,
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

fn default_led_board_port() -> u16 {
    DEFAULT_PORT
}

fn default_ping_timeout() -> u64 {
    1
}

fn default_ping_port() -> u16 {
    DEFAULT_ECHO_PORT
}

fn default_mqtt_port() -> u16 {
    1883
}

fn default_client_id() -> String {
    "ledboard".to_string()
}

impl Config {
    /// Read, parse and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LedboardError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| {
            LedboardError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json(&data)
    }

    /// Parse and validate configuration JSON.
    pub fn from_json(data: &str) -> Result<Self, LedboardError> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), LedboardError> {
        if self.led_board_host.trim().is_empty() {
            return Err(LedboardError::Config("ledBoardHost must not be empty".into()));
        }
        if self.mqtt.host.trim().is_empty() {
            return Err(LedboardError::Config("mqtt.host must not be empty".into()));
        }
        if self.ping.interval == 0 {
            return Err(LedboardError::Config("ping.interval must be at least 1".into()));
        }
        if self.ping.timeout == 0 {
            return Err(LedboardError::Config("ping.timeout must be at least 1".into()));
        }
        if self.ping.consecutive_answers == 0 {
            return Err(LedboardError::Config(
                "ping.consecutiveAnswers must be at least 1".into(),
            ));
        }
        if self.mode == Mode::Lasercutter && self.laser_finished_pattern.is_none() {
            return Err(LedboardError::Config(
                "laserFinishedPattern is required in lasercutter mode (peel-off-left or peel-off-right)".into(),
            ));
        }
        Ok(())
    }
}

impl PingConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
