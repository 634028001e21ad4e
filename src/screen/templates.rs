//! Screen templates.
//!
//! Each function returns the same bytes for the same arguments. User text is
//! sanitized by the builder, so every template that embeds a message or a
//! nickname is safe for the sign's character set.

use serde::Deserialize;

use super::builder::{ScreenBuilder, ScreenCommand};
use crate::protocol::commands::{Font, FontColor, Pattern, Pause, Special};

/// Laser jobs longer than this get a congratulation blink.
pub const CONGRATULATION_THRESHOLD_SECS: i64 = 10 * 60;

/// Transition used when the "laser job finished" page enters.
///
/// Two variants of the screen exist in the wild, one peeling off to the
/// left and one to the right. Deployments pick one in their configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LaserFinishedPattern {
    PeelOffLeft,
    PeelOffRight,
}

impl LaserFinishedPattern {
    pub fn pattern(self) -> Pattern {
        match self {
            LaserFinishedPattern::PeelOffLeft => Pattern::PeelOffLeft,
            LaserFinishedPattern::PeelOffRight => Pattern::PeelOffRight,
        }
    }
}

/// Date, time and the number of people in the space. Loops forever.
pub fn idle(member_count: i64) -> ScreenCommand {
    ScreenBuilder::new()
        .font(Font::Normal7x6)
        .pattern_in(Pattern::ScrollUp)
        .pattern_out(Pattern::ScrollUp)
        .color(FontColor::Green)
        .special(Special::Year4)
        .text("-")
        .special(Special::Month)
        .text("-")
        .special(Special::Day)
        .text(" ")
        .color(FontColor::Red)
        .special(Special::Hour)
        .text(":")
        .special(Special::Minute)
        .text(":")
        .special(Special::Second)
        .line_feed()
        .color(FontColor::Yellow)
        .text(&format!("humans present: {}", member_count))
        .pause(Pause::Seconds4, 9999)
        .build()
}

/// Flashing red banner, then the message.
pub fn alarm(message: &str) -> ScreenCommand {
    ScreenBuilder::new()
        .pattern_in(Pattern::RadarScan)
        .font(Font::Normal16x9)
        .flash(true)
        .color(FontColor::Red)
        .text("!  ALARM  !")
        .flash(false)
        .pause(Pause::Seconds2, 4)
        .frame()
        .font(Font::Normal7x6)
        .color(FontColor::Green)
        .pattern_in(Pattern::MoveUp)
        .pattern_out(Pattern::MoveLeft)
        .text(message)
        .pause(Pause::Seconds2, 30)
        .build()
}

pub fn donation() -> ScreenCommand {
    ScreenBuilder::new()
        .font(Font::Normal16x9)
        .pattern_in(Pattern::ScrollUp)
        .pattern_out(Pattern::ScrollUp)
        .flash(true)
        .color(FontColor::YgrCharacter)
        .text("\\o/ Spende! \\o/")
        .flash(false)
        .pause(Pause::Seconds2, 4)
        .build()
}

pub fn door_bell() -> ScreenCommand {
    ScreenBuilder::new()
        .pattern_in(Pattern::ScrollUp)
        .pattern_out(Pattern::ScrollUp)
        .font(Font::Normal16x9)
        .flash(true)
        .color(FontColor::Red)
        .text("! DOORBELL !")
        .flash(false)
        .pause(Pause::Seconds2, 10)
        .build()
}

pub fn pizza_timer() -> ScreenCommand {
    ScreenBuilder::new()
        .font(Font::Normal16x9)
        .pattern_in(Pattern::ScrollUp)
        .pattern_out(Pattern::ScrollUp)
        .flash(true)
        .color(FontColor::YgrCharacter)
        .text("PIZZA IS READY!")
        .flash(false)
        .pause(Pause::Seconds2, 10)
        .build()
}

/// Three-colored title page, then the message.
pub fn public_service_announcement(message: &str) -> ScreenCommand {
    ScreenBuilder::new()
        .pattern_in(Pattern::RadarScan)
        .flash(true)
        .font(Font::Normal7x6)
        .color(FontColor::Yellow)
        .text("PUBLIC ")
        .color(FontColor::Red)
        .text("SERVICE ")
        .color(FontColor::Green)
        .text("ANNOUNCEMENT")
        .flash(false)
        .pause(Pause::Seconds2, 5)
        .frame()
        .text(message)
        .pause(Pause::Seconds2, 45)
        .build()
}

pub fn now_playing(message: &str) -> ScreenCommand {
    ScreenBuilder::new()
        .pattern_in(Pattern::RadarScan)
        .font(Font::Normal7x6)
        .color(FontColor::Yellow)
        .text("NOW PLAYING")
        .pause(Pause::Seconds2, 5)
        .frame()
        .text(message)
        .pause(Pause::Seconds2, 45)
        .build()
}

/// Welcome banner in three colors, then the new member's nickname.
pub fn new_member_registration(nickname: &str) -> ScreenCommand {
    let mut screen = ScreenBuilder::new().pattern_in(Pattern::RadarScan);

    for color in [FontColor::Green, FontColor::Red, FontColor::YgrHorizontal] {
        screen = screen
            .font(Font::Normal7x6)
            .color(color)
            .text("Herzlich Willkommen im backspace!")
            .pause(Pause::Seconds2, 1)
            .frame();
    }

    screen
        .font(Font::Normal16x9)
        .color(FontColor::Yellow)
        .pattern_in(Pattern::MoveUp)
        .pattern_out(Pattern::MoveLeft)
        .text(nickname)
        .pause(Pause::Seconds2, 30)
        .build()
}

/// Elapsed time of the running laser job.
///
/// The sign's own clock is the counter: the controller sets it to a known
/// midnight when the job starts, and the hour/minute/second fields tick
/// from there.
pub fn laser_operation() -> ScreenCommand {
    ScreenBuilder::new()
        .pattern_in(Pattern::RadarScan)
        .font(Font::Normal15x9)
        .color(FontColor::Red)
        .special(Special::Hour)
        .text("h ")
        .special(Special::Minute)
        .text("m ")
        .special(Special::Second)
        .text("s ")
        .pause(Pause::Seconds4, 9999)
        .build()
}

/// Summary after a laser job.
pub fn laser_finished(duration_secs: i64, transition: LaserFinishedPattern) -> ScreenCommand {
    let mut screen = ScreenBuilder::new()
        .pattern_in(Pattern::ScrollUp)
        .pattern_out(Pattern::ScrollUp);

    if duration_secs > CONGRATULATION_THRESHOLD_SECS {
        screen = screen.font(Font::Normal14x8).color(FontColor::Green);

        // Blink with blank pages, the flash command is unreliable here
        for _ in 0..3 {
            screen = screen
                .text("Congratulations!")
                .pause(Pause::Milliseconds4, 400)
                .frame()
                .text(" ")
                .pause(Pause::Milliseconds4, 100)
                .frame();
        }
    }

    screen
        .pattern_in(transition.pattern())
        .font(Font::Normal7x6)
        .color(FontColor::Green)
        .flash(false)
        .text("Laser-Job finished:")
        .line_feed()
        .color(FontColor::Red)
        .text(&format_duration(duration_secs))
        .pause(Pause::Seconds4, 120)
        .build()
}

/// Format seconds as `{h}h {m}m {s}s`, leaving out zero units.
///
/// ```
/// use ledboard::screen::format_duration;
///
/// assert_eq!(format_duration(3725), "1h 2m 5s");
/// assert_eq!(format_duration(50), "50s");
/// assert_eq!(format_duration(0), "");
/// ```
pub fn format_duration(duration_secs: i64) -> String {
    let hours = duration_secs / 3600;
    let minutes = (duration_secs % 3600) / 60;
    let seconds = duration_secs % 60;

    let mut out = String::new();
    if hours > 0 {
        out.push_str(&format!("{}h ", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m ", minutes));
    }
    if seconds > 0 {
        out.push_str(&format!("{}s", seconds));
    }
    out
}
