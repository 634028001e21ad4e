//! # Bridge Runtime
//!
//! Wires the bus, the liveness probe and the sign session together.
//!
//! ```text
//!   MqttBus::run ──BusMessage──┐
//!                              ├──► event_loop ──► Controller ──► UdpSession
//!   Probe::run ───AliveEvent───┘
//! ```
//!
//! Only [`event_loop`] touches the controller, so bus messages and alive
//! events are applied one at a time in arrival order.

use std::sync::Arc;

use chrono::NaiveDateTime;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::bus::{BusMessage, MqttBus};
use crate::config::Config;
use crate::controller::{Controller, clock};
use crate::error::LedboardError;
use crate::liveness::{AliveEvent, Probe, TcpEchoCheck};
use crate::session::{DeviceSession, UdpSession};

const CHANNEL_CAPACITY: usize = 64;

/// Run the bridge until SIGINT or SIGTERM.
///
/// Startup failures (unresolvable sign, broker unreachable, subscription
/// refused) are returned as errors.
pub async fn run(config: Config) -> Result<(), LedboardError> {
    info!(mode = ?config.mode, host = %config.led_board_host, "starting bridge");
    let session = UdpSession::connect(&config.led_board_host, config.led_board_port)?;
    let mut controller = start_controller(&config, session, clock::wall_clock);

    let mut bus = MqttBus::connect(&config.mqtt).await?;
    bus.subscribe_all(config.mode.topics().into_iter().map(|t| t.as_str()))
        .await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (bus_tx, bus_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (alive_tx, alive_rx) = mpsc::channel(CHANNEL_CAPACITY);

    let bus_task = tokio::spawn(bus.run(bus_tx, shutdown_rx.clone()));

    let check = TcpEchoCheck::new(
        config.led_board_host.clone(),
        config.ping.port,
        config.ping.timeout(),
    );
    let probe = Probe::new(check, config.ping.interval(), config.ping.consecutive_answers);
    let probe_task = tokio::spawn(probe.run(alive_tx, shutdown_rx.clone()));

    let shutdown_tx = Arc::new(shutdown_tx);
    let signal_tx = Arc::clone(&shutdown_tx);
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("shutdown requested");
        let _ = signal_tx.send(true);
    });

    let result = event_loop(&mut controller, bus_rx, alive_rx, shutdown_rx).await;

    // Also stops the tasks when the loop ended on a bus failure.
    let _ = shutdown_tx.send(true);
    let _ = bus_task.await;
    let _ = probe_task.await;

    info!("bridge stopped");
    result
}

/// Build the controller for `config` and push the current time to the sign.
///
/// The sign may have been running on its own clock for a while, so the
/// clock is set before any bus message is handled.
pub fn start_controller<S: DeviceSession>(
    config: &Config,
    session: S,
    now: fn() -> NaiveDateTime,
) -> Controller<S> {
    let mut controller = Controller::new(config.mode, session, config.laser_finished_pattern)
        .with_clock(now);
    controller.sync_clock();
    controller
}

/// Apply bus messages and alive events to the controller until shutdown.
///
/// Returns an error if the bus reports a fatal condition. Ends cleanly if
/// the bus channel closes.
pub async fn event_loop<S: DeviceSession>(
    controller: &mut Controller<S>,
    mut messages: mpsc::Receiver<Result<BusMessage, LedboardError>>,
    mut alive: mpsc::Receiver<AliveEvent>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), LedboardError> {
    let mut probe_running = true;

    loop {
        if *shutdown.borrow() {
            return Ok(());
        }

        tokio::select! {
            biased;

            changed = shutdown.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
            }
            event = alive.recv(), if probe_running => match event {
                Some(AliveEvent) => controller.on_alive(),
                None => probe_running = false,
            },
            message = messages.recv() => match message {
                Some(Ok(message)) => controller.handle(&message.topic, &message.payload),
                Some(Err(e)) => {
                    error!(error = %e, "bus failed");
                    return Err(e);
                }
                None => return Ok(()),
            },
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut terminate) => {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => {}
                _ = terminate.recv() => {}
            }
        }
        Err(e) => {
            warn!(error = %e, "cannot listen for SIGTERM");
            let _ = tokio::signal::ctrl_c().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::Mode;
    use crate::protocol::frame;
    use crate::session::testing::RecordingSession;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(18, 42, 11)
            .unwrap()
    }

    fn controller() -> Controller<RecordingSession> {
        Controller::new(Mode::Default, RecordingSession::default(), None).with_clock(fixed_now)
    }

    #[test]
    fn test_startup_pushes_wall_clock_first() {
        let config = Config::from_json(
            r#"{
                "mode": "default",
                "ledBoardHost": "ledboard.local",
                "ping": { "interval": 5, "consecutiveAnswers": 3 },
                "mqtt": { "host": "mqtt.local" }
            }"#,
        )
        .unwrap();

        let controller = start_controller(&config, RecordingSession::default(), fixed_now);

        assert_eq!(
            controller.session().sent,
            vec![frame::set_date(&fixed_now()).unwrap()]
        );
        assert_eq!(
            controller.session().sent[0],
            b"\x01Z00\x02EB\x24\x20\x05\x17\x18\x42\x00\x00\x04".to_vec()
        );
    }

    #[tokio::test]
    async fn test_messages_reach_controller_in_order() {
        let mut controller = controller();
        let (bus_tx, bus_rx) = mpsc::channel(8);
        let (alive_tx, alive_rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        bus_tx
            .send(Ok(BusMessage::new("sensor/space/member/present", "4")))
            .await
            .unwrap();
        bus_tx
            .send(Ok(BusMessage::new("psa/alarm", "")))
            .await
            .unwrap();
        drop(bus_tx);
        drop(alive_tx);

        event_loop(&mut controller, bus_rx, alive_rx, shutdown_rx)
            .await
            .unwrap();

        assert_eq!(controller.state().member_count, 4);
        // idle screen, then alarm + home
        assert_eq!(controller.session().sent.len(), 2);
    }

    #[tokio::test]
    async fn test_alive_event_pushes_clock_and_home() {
        let mut controller = controller();
        let (bus_tx, bus_rx) = mpsc::channel(8);
        let (alive_tx, alive_rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        alive_tx.send(AliveEvent).await.unwrap();
        drop(alive_tx);
        drop(bus_tx);

        event_loop(&mut controller, bus_rx, alive_rx, shutdown_rx)
            .await
            .unwrap();

        // date, then idle screen
        assert_eq!(controller.session().sent.len(), 2);
    }

    #[tokio::test]
    async fn test_bus_failure_is_returned() {
        let mut controller = controller();
        let (bus_tx, bus_rx) = mpsc::channel(8);
        let (_alive_tx, alive_rx) = mpsc::channel(8);
        let (_shutdown_tx, shutdown_rx) = watch::channel(false);

        bus_tx
            .send(Err(LedboardError::Bus("refused".into())))
            .await
            .unwrap();

        let result = event_loop(&mut controller, bus_rx, alive_rx, shutdown_rx).await;
        assert!(matches!(result, Err(LedboardError::Bus(_))));
    }

    #[tokio::test]
    async fn test_shutdown_stops_loop() {
        let mut controller = controller();
        let (_bus_tx, bus_rx) = mpsc::channel(8);
        let (_alive_tx, alive_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        shutdown_tx.send(true).unwrap();
        event_loop(&mut controller, bus_rx, alive_rx, shutdown_rx)
            .await
            .unwrap();

        assert!(controller.session().sent.is_empty());
    }
}
