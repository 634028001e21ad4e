//! # Datagram Framing
//!
//! Every datagram starts with a start-of-header, the sign address `Z00`, a
//! start-of-text and a command letter, and ends with [`END`].
//!
//! | Message | Header | Payload |
//! |---------|--------|---------|
//! | Store screen | `01 5A 30 30 02 41` `0F 45 54 41 41` | screen bytes |
//! | Set date | `01 5A 30 30 02 45 42` | 8 packed fields |
//!
//! There is no acknowledgement; a lost datagram is simply lost.

use chrono::{Datelike, Timelike};

use super::commands::{END, FRAME};
use super::field;
use crate::error::LedboardError;

/// Header of a "write text file" command addressed to every sign
pub const SCREEN_HEADER: &[u8] = b"\x01Z00\x02A";

/// Selects the RAM text slot the screen is stored to
pub const STORE_TO_RAM: &[u8] = b"\x0FETAA";

/// Header of a "set date and time" command
pub const DATE_HEADER: &[u8] = b"\x01Z00\x02EB";

/// Wrap screen bytes into a "store screen to RAM" datagram.
///
/// ```
/// use ledboard::protocol::frame::store_screen;
///
/// assert_eq!(store_screen(b"hi"), b"\x01Z00\x02A\x0FETAAhi\x04".to_vec());
/// ```
pub fn store_screen(screen: &[u8]) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(SCREEN_HEADER.len() + STORE_TO_RAM.len() + screen.len() + 1);
    cmd.extend_from_slice(SCREEN_HEADER);
    cmd.extend_from_slice(STORE_TO_RAM);
    cmd.extend_from_slice(screen);
    cmd.push(END);
    cmd
}

/// Concatenate pages with the frame separator between them.
pub fn join_pages<'a, I>(pages: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a [u8]>,
{
    let mut out = Vec::new();
    for (i, page) in pages.into_iter().enumerate() {
        if i > 0 {
            out.push(FRAME);
        }
        out.extend_from_slice(page);
    }
    out
}

/// Build a "set date" datagram.
///
/// The year is split into `year % 100` and `year / 100`. Seconds are not
/// transmitted; the two trailing fields are always zero.
///
/// ```
/// use chrono::NaiveDate;
/// use ledboard::protocol::frame::set_date;
///
/// let at = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap().and_hms_opt(23, 59, 10).unwrap();
/// assert_eq!(
///     set_date(&at).unwrap(),
///     b"\x01Z00\x02EB\x24\x20\x12\x31\x23\x59\x00\x00\x04".to_vec()
/// );
/// ```
pub fn set_date<T: Datelike + Timelike>(at: &T) -> Result<Vec<u8>, LedboardError> {
    let year = i64::from(at.year());
    let fields = [
        year % 100,
        year / 100,
        i64::from(at.month()),
        i64::from(at.day()),
        i64::from(at.hour()),
        i64::from(at.minute()),
        0,
        0,
    ];

    let mut cmd = DATE_HEADER.to_vec();
    for value in fields {
        cmd.push(field::encode(value)?);
    }
    cmd.push(END);
    Ok(cmd)
}
