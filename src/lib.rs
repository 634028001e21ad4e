//! # Ledboard - LED Sign Bridge
//!
//! Ledboard drives a hackerspace LED sign over its UDP protocol, reacting to
//! events published on an MQTT bus. It provides:
//!
//! - **Protocol implementation**: command, field and datagram builders
//! - **Screens**: named screens such as the idle clock or the alarm banner
//! - **Session**: fire-and-forget UDP delivery to the sign
//! - **Liveness**: debounced reachability probe that re-syncs a rebooted sign
//! - **Controller**: topic dispatch and the laser cutter job timer
//!
//! ## Quick Start
//!
//! ```no_run
//! use ledboard::{
//!     screen,
//!     session::{DeviceSession, UdpSession},
//! };
//!
//! let mut session = UdpSession::connect("ledboard.local", 9520)?;
//!
//! // Show the alarm banner, then fall back to the idle clock
//! let alarm = screen::alarm("Fenster offen");
//! let home = screen::idle(3);
//! session.send_screens(&[alarm, home]);
//!
//! # Ok::<(), ledboard::error::LedboardError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | Sign command builders and datagram framing |
//! | [`screen`] | Screen builder and named screen templates |
//! | [`session`] | Datagram delivery to the sign |
//! | [`liveness`] | Reachability probe with debounce |
//! | [`controller`] | Bus message handling and sign state |
//! | [`bus`] | MQTT intake |
//! | [`config`] | JSON configuration file |
//! | [`app`] | Runtime wiring and shutdown |
//! | [`error`] | Error types |

pub mod app;
pub mod bus;
pub mod config;
pub mod controller;
pub mod error;
pub mod liveness;
pub mod protocol;
pub mod screen;
pub mod session;

// Re-exports for convenience
pub use config::Config;
pub use controller::Controller;
pub use error::LedboardError;
pub use session::{DeviceSession, UdpSession};
