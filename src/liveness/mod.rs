//! # Liveness Probe
//!
//! The sign forgets its screen and clock whenever it loses power. The probe
//! watches the sign's host and reports when it comes back, so the controller
//! can restore the display.
//!
//! ## Debounce
//!
//! ```text
//! check:      ✗  ✓  ✓  ✓  ✓  ✗  ✓
//! successes:  0  1  2  3  4  0  1
//! alive:      -  -  -  ▲  ●  ▼  -      (K = 3)
//! ```
//!
//! Going alive needs `K` consecutive successful checks; one failure drops
//! the flag immediately. Only the rising edge is reported as an
//! [`AliveEvent`]; going offline is just logged.

pub mod tcp;

pub use tcp::TcpEchoCheck;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// The sign's host answered `K` checks in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AliveEvent;

/// Edge reported by [`Debounce::record`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    CameAlive,
    WentOffline,
}

/// Slow-to-rise, instant-to-fall debounce over check results.
#[derive(Debug, Clone)]
pub struct Debounce {
    required: u32,
    consecutive: u32,
    alive: bool,
}

impl Debounce {
    /// `required` is clamped to at least one success.
    pub fn new(required: u32) -> Self {
        Self {
            required: required.max(1),
            consecutive: 0,
            alive: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn consecutive_successes(&self) -> u32 {
        self.consecutive
    }

    /// Feed one check result and return the edge it caused, if any.
    pub fn record(&mut self, reachable: bool) -> Option<Transition> {
        if !reachable {
            self.consecutive = 0;
            if self.alive {
                self.alive = false;
                return Some(Transition::WentOffline);
            }
            return None;
        }

        self.consecutive = self.consecutive.saturating_add(1);
        if !self.alive && self.consecutive >= self.required {
            self.alive = true;
            return Some(Transition::CameAlive);
        }
        None
    }
}

/// One reachability test against the sign's host.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
    /// Returns true if the host answered. Must give up on its own timeout.
    async fn check(&self) -> bool;

    /// Human-readable target for logs
    fn target(&self) -> String;
}

/// Periodic checker feeding a [`Debounce`].
pub struct Probe<C> {
    check: C,
    interval: Duration,
    debounce: Debounce,
}

impl<C: ReachabilityCheck> Probe<C> {
    pub fn new(check: C, interval: Duration, required_successes: u32) -> Self {
        Self {
            check,
            interval,
            debounce: Debounce::new(required_successes),
        }
    }

    /// Check every interval until shutdown is signalled or the event
    /// receiver goes away.
    pub async fn run(self, events: mpsc::Sender<AliveEvent>, mut shutdown: watch::Receiver<bool>) {
        let Probe {
            check,
            interval,
            mut debounce,
        } = self;
        let host = check.target();

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            if *shutdown.borrow() {
                break;
            }

            let reachable = tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                reachable = async {
                    ticker.tick().await;
                    check.check().await
                } => reachable,
            };

            debug!(host = %host, reachable, "liveness check");

            match debounce.record(reachable) {
                Some(Transition::CameAlive) => {
                    info!(host = %host, "sign went online");
                    if events.send(AliveEvent).await.is_err() {
                        break;
                    }
                }
                Some(Transition::WentOffline) => {
                    info!(host = %host, "sign went offline");
                }
                None => {}
            }
        }

        debug!(host = %host, "liveness probe stopped");
    }
}
