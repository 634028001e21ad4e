//! # LED Sign Protocol Implementation
//!
//! This module provides low-level builders for the binary command protocol
//! spoken by the LED sign. The sign listens for UDP datagrams and knows two
//! message kinds: "set date" and "store screen to RAM".
//!
//! ## Module Structure
//!
//! - [`commands`]: Control vocabulary (fonts, colors, patterns, pauses, special fields)
//! - [`field`]: Packed decimal encoding for date/time fields
//! - [`text`]: Text sanitization for the sign's character set
//! - [`frame`]: Datagram headers and terminators
//!
//! ## Usage Example
//!
//! ```
//! use ledboard::protocol::{commands, frame, text};
//! use ledboard::protocol::commands::{Font, FontColor, Pause};
//!
//! let mut page = Vec::new();
//! page.extend(commands::font(Font::Normal7x6));
//! page.extend(commands::font_color(FontColor::Green));
//! page.extend(text::encode("Grüße"));
//! page.extend(commands::pause(Pause::Seconds2, 5));
//!
//! let datagram = frame::store_screen(&page);
//! assert_eq!(datagram.last(), Some(&commands::END));
//! ```

pub mod commands;
pub mod field;
pub mod frame;
pub mod text;
