//! # Device Sessions
//!
//! A session is the only thing that talks to the sign. Implementations supply
//! [`DeviceSession::send`]; framing of screens and clock updates is shared.
//!
//! ## Available Sessions
//!
//! - [`udp`]: UDP datagrams to the sign's port (default 9520)
//!
//! Sends are fire-and-forget. The protocol has no acknowledgement, so a
//! failed write is logged and forgotten; the next screen or the next
//! liveness recovery brings the sign back in sync.

pub mod udp;

pub use udp::UdpSession;

use chrono::{Datelike, Timelike};
use tracing::{error, info};

use crate::protocol::frame;
use crate::screen::ScreenCommand;

/// Capability set of a connection to the sign.
pub trait DeviceSession {
    /// Write one datagram. Must not block and must not fail loudly.
    fn send(&mut self, datagram: &[u8]);

    /// Set the sign's onboard clock. Seconds are not transmitted.
    fn set_date<T>(&mut self, at: &T)
    where
        T: Datelike + Timelike,
        Self: Sized,
    {
        match frame::set_date(at) {
            Ok(datagram) => {
                info!(
                    year = at.year(),
                    month = at.month(),
                    day = at.day(),
                    hour = at.hour(),
                    minute = at.minute(),
                    "pushing date to sign"
                );
                self.send(&datagram);
            }
            Err(e) => error!(error = %e, "cannot encode date for sign"),
        }
    }

    /// Store one screen in the sign's RAM slot.
    fn send_screen(&mut self, screen: &ScreenCommand) {
        self.send(&frame::store_screen(screen.as_bytes()));
    }

    /// Join screens with the frame separator and store them as one screen.
    fn send_screens(&mut self, screens: &[ScreenCommand]) {
        let joined = frame::join_pages(screens.iter().map(ScreenCommand::as_bytes));
        self.send_screen(&ScreenCommand::from_bytes(joined));
    }
}
