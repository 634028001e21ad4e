//! # Sign Text Encoding
//!
//! The sign's character set has no glyphs for German umlauts or the sharp s.
//! They are spelled out before any text is placed on a page.
//!
//! | Input | Output |
//! |-------|--------|
//! | ä | ae |
//! | ö | oe |
//! | ü | ue |
//! | ß | sz |
//!
//! [`encode`] then keeps the page bytes inside printable ASCII. Control
//! characters would be read as protocol commands (`0x04` ends the datagram,
//! `0x0C` starts a new page), so they become spaces. Any other character
//! outside ASCII, including the uppercase umlauts, becomes `?`; its UTF-8
//! bytes could otherwise hit command codes such as the half space `0x82`.

/// Replace the characters the sign cannot render with ASCII spellings.
///
/// Idempotent: the replacements contain only ASCII, so a second pass finds
/// nothing to replace.
///
/// ```
/// use ledboard::protocol::text::sanitize;
///
/// assert_eq!(sanitize("Grüße aus Bämberg"), "Gruesze aus Baemberg");
/// ```
pub fn sanitize(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for ch in message.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'ß' => out.push_str("sz"),
            other => out.push(other),
        }
    }
    out
}

/// Placeholder for characters the sign has no glyph for
pub const REPLACEMENT: u8 = b'?';

/// Sanitize and convert to the bytes placed on a page.
///
/// The result only contains bytes in `0x20..=0x7E`.
///
/// ```
/// use ledboard::protocol::text::encode;
///
/// assert_eq!(encode("Tür\x04zu"), b"Tuer zu".to_vec());
/// assert_eq!(encode("Ärger"), b"?rger".to_vec());
/// ```
pub fn encode(message: &str) -> Vec<u8> {
    sanitize(message)
        .chars()
        .map(|ch| match ch {
            ' '..='~' => ch as u8,
            c if c.is_ascii_control() => b' ',
            _ => REPLACEMENT,
        })
        .collect()
}
