//! # LED Sign Control Vocabulary
//!
//! Screens are plain byte strings in which control codes switch the sign's
//! rendering state: printable ASCII is drawn with the current font and color,
//! everything below `0x20` (plus a few high bytes) steers the renderer.
//!
//! ## Command Structure
//!
//! Most commands are a control byte followed by a single selector byte:
//!
//! | Command | Bytes | Selector |
//! |---------|-------|----------|
//! | Font | `1A n` | [`Font`] |
//! | Font color | `1C n` | [`FontColor`] |
//! | Background color | `1D n` | [`BackgroundColor`] |
//! | Flash | `07 n` | `30` off / `31` on |
//! | Special field | `0B n` | [`Special`] |
//! | Pattern in/out | `06 0A 49 n` / `06 0A 4F n` | [`Pattern`] |
//! | Pause | `0E n d..` | [`Pause`] plus ASCII digits |
//! | Speed | `0F n` | [`Speed`] |
//! | Align | `1E n` / `1F n` | [`AlignHorizontal`] / [`AlignVertical`] |
//!
//! ## Pages
//!
//! A screen may hold several pages separated by [`FRAME`]. The sign shows
//! them in order and then loops.

// ============================================================================
// CONTROL BYTES
// ============================================================================

/// End of a datagram (EOT)
pub const END: u8 = 0x04;

/// Flash prefix, followed by `30` (off) or `31` (on)
pub const FLASH: u8 = 0x07;

/// Special field prefix, followed by a [`Special`] selector
pub const SPECIAL: u8 = 0x0B;

/// Page break within one screen
pub const FRAME: u8 = 0x0C;

/// Line feed inside a page
pub const LINE_FEED: u8 = 0x0D;

/// Pause prefix, followed by a [`Pause`] selector and digits
pub const PAUSE: u8 = 0x0E;

/// Speed prefix, followed by a [`Speed`] selector
pub const SPEED: u8 = 0x0F;

/// Font prefix, followed by a [`Font`] selector
pub const FONT: u8 = 0x1A;

/// Font color prefix
pub const FONT_COLOR: u8 = 0x1C;

/// Background color prefix
pub const BACKGROUND_COLOR: u8 = 0x1D;

/// Horizontal alignment prefix
pub const ALIGN_HORIZONTAL: u8 = 0x1E;

/// Vertical alignment prefix
pub const ALIGN_VERTICAL: u8 = 0x1F;

/// Half-width space
pub const HALF_SPACE: u8 = 0x82;

/// Transition effect used when a page enters
pub const PATTERN_IN: [u8; 3] = [0x06, 0x0A, b'I'];

/// Transition effect used when a page leaves
pub const PATTERN_OUT: [u8; 3] = [0x06, 0x0A, b'O'];

const FLASH_OFF: u8 = 0x30;
const FLASH_ON: u8 = 0x31;

// ============================================================================
// SELECTORS
// ============================================================================

/// Transition effects for entering and leaving a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Random = 0x2F,
    JumpOut = 0x30,
    MoveLeft = 0x31,
    MoveRight = 0x32,
    ScrollLeft = 0x33,
    ScrollRight = 0x34,
    MoveUp = 0x35,
    MoveDown = 0x36,
    ScrollLeftRight = 0x37,
    ScrollUp = 0x38,
    ScrollDown = 0x39,
    FoldLeftRight = 0x3A,
    FoldUpDown = 0x3B,
    ScrollUpDown = 0x3C,
    ShuttleLeftRight = 0x3D,
    ShuttleUpDown = 0x3E,
    PeelOffLeft = 0x3F,
    PeelOffRight = 0x40,
    ShutterUpDown = 0x41,
    ShutterLeftRight = 0x42,
    Raindrops = 0x43,
    RandomMosaic = 0x44,
    TwinklingStar = 0x45,
    HipHop = 0x46,
    RadarScan = 0x47,
    FanOut = 0x48,
    FanIn = 0x49,
    SpiralRight = 0x4A,
    SpiralLeft = 0x4B,
    ToFourCorners = 0x4C,
    FromFourCorners = 0x4D,
    ToFourSides = 0x4E,
    FromFourSides = 0x4F,
    ScrollOutFromFourBlocks = 0x50,
}

/// Font faces and sizes (height x width in LEDs)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Normal5x5 = 0x30,
    Normal7x6 = 0x31,
    Normal14x8 = 0x32,
    Normal15x9 = 0x33,
    Normal16x9 = 0x34,
    Normal24x16 = 0x36,
    Normal32x18 = 0x38,
    Normal11x9 = 0x3A,
    Normal22x18 = 0x3C,
    Normal30x18 = 0x3D,
    Normal40x21 = 0x3E,
    Bold5x7 = 0x4D,
    Bold14x10 = 0x4E,
    Bold15x10 = 0x4F,
    Bold16x12 = 0x50,
    Custom3 = 0x63,
    Custom4 = 0x64,
    Custom5 = 0x65,
    Custom6 = 0x66,
    Custom7 = 0x67,
    Custom8 = 0x68,
    Custom9 = 0x69,
}

/// Font colors. The `Ygr*` variants cycle yellow, green and red.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontColor {
    Black = 0x30,
    Red = 0x31,
    Green = 0x32,
    Yellow = 0x33,
    YgrCharacter = 0x34,
    YgrHorizontal = 0x35,
    YgrWave = 0x36,
    YgrDiagonal = 0x37,
}

/// Background colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundColor {
    Black = 0x30,
    Red = 0x31,
    Green = 0x32,
    Yellow = 0x33,
}

/// Device-rendered fields that follow the sign's onboard clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    /// MM/DD/YY
    MmDdYySlash = 0x20,
    /// DD/MM/YY
    DdMmYySlash = 0x21,
    /// MM-DD-YY
    MmDdYyDash = 0x22,
    /// DD-MM-YY
    DdMmYyDash = 0x23,
    /// MM.DD.YYYY
    MmDdYyyyDot = 0x24,
    Year2 = 0x25,
    Year4 = 0x26,
    Month = 0x27,
    MonthName = 0x28,
    Day = 0x29,
    WeekdayNumber = 0x2A,
    WeekdayName = 0x2B,
    Hour = 0x2C,
    Minute = 0x2D,
    Second = 0x2E,
    HourMinute24 = 0x2F,
    HourMinute12 = 0x30,
}

/// Pause units. The selector also fixes how many digits follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    /// Seconds, two digits
    Seconds2 = 0x30,
    /// Milliseconds, two digits
    Milliseconds2 = 0x31,
    /// Seconds, four digits
    Seconds4 = 0x32,
    /// Milliseconds, four digits
    Milliseconds4 = 0x33,
}

impl Pause {
    /// Number of ASCII digits the sign expects after this selector
    pub fn digits(self) -> usize {
        match self {
            Pause::Seconds2 | Pause::Milliseconds2 => 2,
            Pause::Seconds4 | Pause::Milliseconds4 => 4,
        }
    }
}

/// Scroll speed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    VeryFast = 0x30,
    Fast = 0x31,
    MediumFast = 0x32,
    Medium = 0x33,
    MediumSlow = 0x34,
    Slow = 0x35,
    VerySlow = 0x36,
}

/// Horizontal alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignHorizontal {
    Center = 0x30,
    Left = 0x31,
    Right = 0x32,
}

/// Vertical alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignVertical {
    Center = 0x30,
    Top = 0x31,
    Bottom = 0x32,
}

// ============================================================================
// COMMAND BUILDERS
// ============================================================================

/// # Pattern In (06 0A 49 n)
///
/// Selects the transition used when the following page appears. Stays in
/// effect for later pages until changed.
///
/// ## Example
///
/// ```
/// use ledboard::protocol::commands::{pattern_in, Pattern};
///
/// assert_eq!(pattern_in(Pattern::RadarScan), vec![0x06, 0x0A, b'I', 0x47]);
/// ```
pub fn pattern_in(pattern: Pattern) -> Vec<u8> {
    let mut cmd = PATTERN_IN.to_vec();
    cmd.push(pattern as u8);
    cmd
}

/// # Pattern Out (06 0A 4F n)
///
/// Selects the transition used when the current page leaves.
pub fn pattern_out(pattern: Pattern) -> Vec<u8> {
    let mut cmd = PATTERN_OUT.to_vec();
    cmd.push(pattern as u8);
    cmd
}

/// Select font face and size (1A n)
#[inline]
pub fn font(font: Font) -> Vec<u8> {
    vec![FONT, font as u8]
}

/// Select font color (1C n)
#[inline]
pub fn font_color(color: FontColor) -> Vec<u8> {
    vec![FONT_COLOR, color as u8]
}

/// Select background color (1D n)
#[inline]
pub fn background_color(color: BackgroundColor) -> Vec<u8> {
    vec![BACKGROUND_COLOR, color as u8]
}

/// Start flashing the following text
#[inline]
pub fn flash_on() -> Vec<u8> {
    vec![FLASH, FLASH_ON]
}

/// Stop flashing
#[inline]
pub fn flash_off() -> Vec<u8> {
    vec![FLASH, FLASH_OFF]
}

/// Insert a self-updating field (0B n)
#[inline]
pub fn special(field: Special) -> Vec<u8> {
    vec![SPECIAL, field as u8]
}

/// Set scroll speed (0F n)
#[inline]
pub fn speed(speed: Speed) -> Vec<u8> {
    vec![SPEED, speed as u8]
}

/// Set horizontal alignment (1E n)
#[inline]
pub fn align_horizontal(align: AlignHorizontal) -> Vec<u8> {
    vec![ALIGN_HORIZONTAL, align as u8]
}

/// Set vertical alignment (1F n)
#[inline]
pub fn align_vertical(align: AlignVertical) -> Vec<u8> {
    vec![ALIGN_VERTICAL, align as u8]
}

/// # Pause (0E n d..)
///
/// Holds the current page for `value` units before moving on. The value is
/// written as zero-padded ASCII digits, two or four depending on the unit,
/// and clamped to the largest value that fits.
///
/// ## Example
///
/// ```
/// use ledboard::protocol::commands::{pause, Pause};
///
/// assert_eq!(pause(Pause::Seconds2, 4), b"\x0E\x3004".to_vec());
/// assert_eq!(pause(Pause::Milliseconds4, 400), b"\x0E\x330400".to_vec());
/// ```
pub fn pause(unit: Pause, value: u16) -> Vec<u8> {
    let digits = unit.digits();
    let max = if digits == 2 { 99 } else { 9999 };
    let mut cmd = vec![PAUSE, unit as u8];
    cmd.extend(format!("{:0width$}", value.min(max), width = digits).into_bytes());
    cmd
}
