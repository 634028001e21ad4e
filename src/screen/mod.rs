//! # Screen Composition
//!
//! Named screens for the LED sign, built from the protocol vocabulary.
//!
//! ## Screens
//!
//! | Name | Template | Pages |
//! |------|----------|-------|
//! | `idle` | [`idle`] | date, time, people present |
//! | `alarm` | [`alarm`] | banner, message |
//! | `donation` | [`donation`] | banner |
//! | `doorbell` | [`door_bell`] | banner |
//! | `pizza-timer` | [`pizza_timer`] | banner |
//! | `psa` | [`public_service_announcement`] | title, message |
//! | `now-playing` | [`now_playing`] | title, message |
//! | `new-member` | [`new_member_registration`] | 3x welcome, nickname |
//! | `laser-operation` | [`laser_operation`] | live elapsed time |
//! | `laser-finished` | [`laser_finished`] | optional blink, summary |
//!
//! Templates only produce screen bytes. Combining a screen with the idle
//! screen that follows it is the session's job (see
//! [`DeviceSession::send_screens`](crate::session::DeviceSession::send_screens)).

mod builder;
mod templates;

pub use builder::{ScreenBuilder, ScreenCommand};
pub use templates::*;

use std::fmt;
use std::str::FromStr;

use crate::error::LedboardError;

/// Every named screen, for listing and previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Idle,
    Alarm,
    Donation,
    DoorBell,
    PizzaTimer,
    PublicServiceAnnouncement,
    NowPlaying,
    NewMemberRegistration,
    LaserOperation,
    LaserFinished,
}

/// Parameters used when composing a screen by name.
///
/// `laser_finished_pattern` has no default; composing
/// [`ScreenKind::LaserFinished`] without one is an error.
#[derive(Debug, Clone, Default)]
pub struct ScreenArgs {
    pub text: String,
    pub member_count: i64,
    pub duration_secs: i64,
    pub laser_finished_pattern: Option<LaserFinishedPattern>,
}

impl ScreenKind {
    pub const ALL: [ScreenKind; 10] = [
        ScreenKind::Idle,
        ScreenKind::Alarm,
        ScreenKind::Donation,
        ScreenKind::DoorBell,
        ScreenKind::PizzaTimer,
        ScreenKind::PublicServiceAnnouncement,
        ScreenKind::NowPlaying,
        ScreenKind::NewMemberRegistration,
        ScreenKind::LaserOperation,
        ScreenKind::LaserFinished,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ScreenKind::Idle => "idle",
            ScreenKind::Alarm => "alarm",
            ScreenKind::Donation => "donation",
            ScreenKind::DoorBell => "doorbell",
            ScreenKind::PizzaTimer => "pizza-timer",
            ScreenKind::PublicServiceAnnouncement => "psa",
            ScreenKind::NowPlaying => "now-playing",
            ScreenKind::NewMemberRegistration => "new-member",
            ScreenKind::LaserOperation => "laser-operation",
            ScreenKind::LaserFinished => "laser-finished",
        }
    }

    /// Compose this screen, taking whichever arguments it needs.
    ///
    /// ## Errors
    ///
    /// Returns [`LedboardError::InvalidCommand`] for
    /// [`ScreenKind::LaserFinished`] when no transition pattern is given.
    pub fn compose(self, args: &ScreenArgs) -> Result<ScreenCommand, LedboardError> {
        let screen = match self {
            ScreenKind::Idle => idle(args.member_count),
            ScreenKind::Alarm => alarm(&args.text),
            ScreenKind::Donation => donation(),
            ScreenKind::DoorBell => door_bell(),
            ScreenKind::PizzaTimer => pizza_timer(),
            ScreenKind::PublicServiceAnnouncement => public_service_announcement(&args.text),
            ScreenKind::NowPlaying => now_playing(&args.text),
            ScreenKind::NewMemberRegistration => new_member_registration(&args.text),
            ScreenKind::LaserOperation => laser_operation(),
            ScreenKind::LaserFinished => {
                let pattern = args.laser_finished_pattern.ok_or_else(|| {
                    LedboardError::InvalidCommand(
                        "laser-finished needs a pattern (peel-off-left or peel-off-right)".into(),
                    )
                })?;
                laser_finished(args.duration_secs, pattern)
            }
        };
        Ok(screen)
    }
}

impl fmt::Display for ScreenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScreenKind {
    type Err = LedboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| LedboardError::InvalidCommand(format!("unknown screen '{}'", s)))
    }
}
