//! Screen command type and the builder used by the templates.

use std::fmt;

use crate::protocol::commands::{
    self, BackgroundColor, FRAME, Font, FontColor, LINE_FEED, Pattern, Pause, Special,
};
use crate::protocol::text;

/// One composed screen, ready to be framed by a session.
///
/// A screen may contain several pages separated by the frame byte. The bytes
/// are fixed once built.
#[derive(Clone, PartialEq, Eq)]
pub struct ScreenCommand(Vec<u8>);

impl ScreenCommand {
    /// Wrap bytes that are already valid screen content.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
impl ScreenCommand {
    /// Returns true if `needle` occurs anywhere in the screen bytes.
    pub(crate) fn contains(&self, needle: &[u8]) -> bool {
        find(&self.0, needle, 0).is_some()
    }

    /// Returns true if every needle occurs, each one after the previous.
    pub(crate) fn contains_in_order(&self, needles: &[&[u8]]) -> bool {
        let mut from = 0;
        for needle in needles {
            match find(&self.0, needle, from) {
                Some(at) => from = at + needle.len(),
                None => return false,
            }
        }
        true
    }
}

#[cfg(test)]
fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(haystack.len()));
    }
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|pos| pos + from)
}

impl AsRef<[u8]> for ScreenCommand {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for ScreenCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ScreenCommand(\"{}\")", self.0.escape_ascii())
    }
}

/// Builder that appends protocol commands in call order.
///
/// ```
/// use ledboard::screen::ScreenBuilder;
/// use ledboard::protocol::commands::{Font, FontColor, Pause};
///
/// let screen = ScreenBuilder::new()
///     .font(Font::Normal7x6)
///     .color(FontColor::Yellow)
///     .text("Hallo")
///     .pause(Pause::Seconds2, 5)
///     .build();
///
/// assert!(screen.as_bytes().ends_with(b"Hallo\x0E\x3005"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct ScreenBuilder {
    bytes: Vec<u8>,
}

impl ScreenBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, font: Font) -> Self {
        self.bytes.extend(commands::font(font));
        self
    }

    pub fn color(mut self, color: FontColor) -> Self {
        self.bytes.extend(commands::font_color(color));
        self
    }

    pub fn background(mut self, color: BackgroundColor) -> Self {
        self.bytes.extend(commands::background_color(color));
        self
    }

    pub fn pattern_in(mut self, pattern: Pattern) -> Self {
        self.bytes.extend(commands::pattern_in(pattern));
        self
    }

    pub fn pattern_out(mut self, pattern: Pattern) -> Self {
        self.bytes.extend(commands::pattern_out(pattern));
        self
    }

    pub fn flash(mut self, on: bool) -> Self {
        if on {
            self.bytes.extend(commands::flash_on());
        } else {
            self.bytes.extend(commands::flash_off());
        }
        self
    }

    pub fn special(mut self, field: Special) -> Self {
        self.bytes.extend(commands::special(field));
        self
    }

    /// Append text. Umlauts are spelled out, control characters blanked and
    /// other non-ASCII characters replaced (see [`text::encode`]).
    pub fn text(mut self, content: &str) -> Self {
        self.bytes.extend(text::encode(content));
        self
    }

    pub fn line_feed(mut self) -> Self {
        self.bytes.push(LINE_FEED);
        self
    }

    /// Start a new page.
    pub fn frame(mut self) -> Self {
        self.bytes.push(FRAME);
        self
    }

    pub fn pause(mut self, unit: Pause, value: u16) -> Self {
        self.bytes.extend(commands::pause(unit, value));
        self
    }

    pub fn build(self) -> ScreenCommand {
        ScreenCommand(self.bytes)
    }
}
