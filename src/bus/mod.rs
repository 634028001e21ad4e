//! # Event Bus
//!
//! Intake of pub/sub messages. The bridge only consumes; it never publishes.
//!
//! - [`mqtt`]: MQTT broker connection via `rumqttc`
//!
//! Messages leave this module as [`BusMessage`] values on a channel, so the
//! controller loop never touches the network client directly.

pub mod mqtt;

pub use mqtt::MqttBus;

/// One message received from the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusMessage {
    pub topic: String,
    /// Payload decoded as UTF-8, invalid sequences replaced
    pub payload: String,
}

impl BusMessage {
    pub fn new(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    pub fn from_bytes(topic: impl Into<String>, payload: &[u8]) -> Self {
        Self::new(topic, String::from_utf8_lossy(payload).into_owned())
    }
}
