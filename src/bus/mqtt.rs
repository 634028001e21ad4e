//! # MQTT Bus
//!
//! Wraps a `rumqttc` client and its event loop.
//!
//! ## Lifecycle
//!
//! 1. [`MqttBus::connect`] waits for the broker's CONNACK.
//! 2. [`MqttBus::subscribe_all`] waits for a SUBACK per topic. A refused
//!    subscription is an error; the bridge cannot work without it.
//! 3. [`MqttBus::run`] forwards publishes to a channel until shutdown,
//!    then disconnects. After a reconnect, all topics are subscribed again.

use std::collections::VecDeque;
use std::time::Duration;

use rumqttc::{
    AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Outgoing, Packet, QoS,
    SubscribeReasonCode,
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use super::BusMessage;
use crate::config::MqttConfig;
use crate::error::LedboardError;

const KEEP_ALIVE: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const RECONNECT_DELAY: Duration = Duration::from_secs(2);
const DISCONNECT_TIMEOUT: Duration = Duration::from_secs(2);
const REQUEST_CAPACITY: usize = 32;

/// Connected MQTT client plus its event loop.
pub struct MqttBus {
    client: AsyncClient,
    eventloop: EventLoop,
    topics: Vec<String>,
    backlog: VecDeque<BusMessage>,
}

impl MqttBus {
    /// Connect to the broker and wait until it accepts the session.
    pub async fn connect(config: &MqttConfig) -> Result<Self, LedboardError> {
        let mut options =
            MqttOptions::new(config.client_id.clone(), config.host.clone(), config.port);
        options.set_keep_alive(KEEP_ALIVE);

        let (client, mut eventloop) = AsyncClient::new(options, REQUEST_CAPACITY);

        let connack = tokio::time::timeout(CONNECT_TIMEOUT, async {
            loop {
                match eventloop.poll().await {
                    Ok(Event::Incoming(Packet::ConnAck(ack))) => return Ok(ack),
                    Ok(_) => {}
                    Err(e) => return Err(e),
                }
            }
        })
        .await
        .map_err(|_| {
            LedboardError::Bus(format!(
                "Timed out connecting to MQTT broker {}:{}",
                config.host, config.port
            ))
        })?
        .map_err(|e| {
            LedboardError::Bus(format!(
                "Failed to connect to MQTT broker {}:{}: {}",
                config.host, config.port, e
            ))
        })?;

        if connack.code != ConnectReturnCode::Success {
            return Err(LedboardError::Bus(format!(
                "MQTT broker refused connection: {:?}",
                connack.code
            )));
        }

        info!(host = %config.host, port = config.port, "connected to MQTT broker");
        Ok(Self {
            client,
            eventloop,
            topics: Vec::new(),
            backlog: VecDeque::new(),
        })
    }

    /// Subscribe to every topic and wait until the broker confirms all of them.
    ///
    /// Messages that arrive while waiting are kept and delivered first by
    /// [`MqttBus::run`].
    pub async fn subscribe_all<I, T>(&mut self, topics: I) -> Result<(), LedboardError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut pending = 0usize;
        for topic in topics {
            let topic = topic.into();
            self.client
                .subscribe(topic.clone(), QoS::AtMostOnce)
                .await
                .map_err(|e| {
                    LedboardError::Bus(format!("Failed to subscribe to {}: {}", topic, e))
                })?;
            debug!(topic = %topic, "subscription requested");
            self.topics.push(topic);
            pending += 1;
        }

        while pending > 0 {
            match self.eventloop.poll().await {
                Ok(Event::Incoming(Packet::SubAck(ack))) => {
                    check_suback(&ack.return_codes)?;
                    pending -= 1;
                }
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    self.backlog
                        .push_back(BusMessage::from_bytes(publish.topic, &publish.payload));
                }
                Ok(_) => {}
                Err(e) => {
                    return Err(LedboardError::Bus(format!(
                        "Connection lost while subscribing: {}",
                        e
                    )));
                }
            }
        }

        info!(count = self.topics.len(), "subscribed to bus topics");
        Ok(())
    }

    /// Forward messages until shutdown or until the receiver goes away,
    /// then disconnect from the broker.
    ///
    /// A refused subscription after a reconnect is sent as an error and
    /// ends the loop.
    pub async fn run(
        mut self,
        messages: mpsc::Sender<Result<BusMessage, LedboardError>>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        while let Some(message) = self.backlog.pop_front() {
            if messages.send(Ok(message)).await.is_err() {
                return;
            }
        }

        loop {
            if *shutdown.borrow() {
                break;
            }

            let event = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                event = self.eventloop.poll() => event,
            };

            match event {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    let message = BusMessage::from_bytes(publish.topic, &publish.payload);
                    if messages.send(Ok(message)).await.is_err() {
                        break;
                    }
                }
                Ok(Event::Incoming(Packet::ConnAck(_))) => {
                    info!("reconnected to MQTT broker, subscribing again");
                    for topic in &self.topics {
                        let request = self.client.subscribe(topic.clone(), QoS::AtMostOnce);
                        if let Err(e) = request.await {
                            warn!(topic = %topic, error = %e, "resubscribe request failed");
                        }
                    }
                }
                Ok(Event::Incoming(Packet::SubAck(ack))) => {
                    if let Err(e) = check_suback(&ack.return_codes) {
                        let _ = messages.send(Err(e)).await;
                        break;
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(error = %e, "MQTT connection error, retrying");
                    tokio::select! {
                        _ = shutdown.changed() => {}
                        _ = tokio::time::sleep(RECONNECT_DELAY) => {}
                    }
                }
            }
        }

        self.disconnect().await;
        debug!("bus loop stopped");
    }

    async fn disconnect(&mut self) {
        if let Err(e) = self.client.disconnect().await {
            warn!(error = %e, "MQTT disconnect request failed");
            return;
        }

        // The request only goes out while the event loop is polled.
        let flushed = tokio::time::timeout(DISCONNECT_TIMEOUT, async {
            loop {
                match self.eventloop.poll().await {
                    Ok(Event::Outgoing(Outgoing::Disconnect)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        })
        .await;

        if flushed.is_err() {
            warn!("MQTT disconnect timed out");
        } else {
            info!("disconnected from MQTT broker");
        }
    }
}

fn check_suback(codes: &[SubscribeReasonCode]) -> Result<(), LedboardError> {
    if codes
        .iter()
        .any(|code| matches!(code, SubscribeReasonCode::Failure))
    {
        return Err(LedboardError::Bus("MQTT broker refused a subscription".into()));
    }
    Ok(())
}
