//! # Packed Decimal Fields
//!
//! The "set date" command carries each date/time component as one byte whose
//! high nibble is the tens digit and whose low nibble is the ones digit:
//!
//! ```text
//! 59  ->  (5 << 4) + 9  ->  0x59
//! 7   ->  (0 << 4) + 7  ->  0x07
//! ```
//!
//! Only values 0..=99 can be represented.

use crate::error::LedboardError;

/// Encode a value in 0..=99 as a packed decimal byte.
///
/// ## Example
///
/// ```
/// use ledboard::protocol::field::encode;
///
/// assert_eq!(encode(31).unwrap(), 0x31);
/// assert_eq!(encode(20).unwrap(), 0x20);
/// assert!(encode(100).is_err());
/// ```
pub fn encode(value: i64) -> Result<u8, LedboardError> {
    if !(0..=99).contains(&value) {
        return Err(LedboardError::FieldOutOfRange(value));
    }
    let tens = (value / 10) as u8;
    let ones = (value % 10) as u8;
    Ok((tens << 4) + ones)
}
