//! Constant values shared by the emulated architectures.
use std::time::Duration;

use crate::devices::Colour;

/// Number of general purpose registers.
pub const REGISTER_COUNT: usize = 0x10; // 16

/// The lower memory space was historically used for the interpreter itself,
/// but is now used for fonts.
pub const MEM_START: usize = 0x200; // 512

/// Memory size for the classic dialects.
pub const MEM_SIZE_4K: usize = 0x1000; // 4096

/// Memory size for XO-CHIP, which extends addressing to 16 bits.
pub const MEM_SIZE_64K: usize = 0x10000; // 65536

/// Call depth on the original RCA 1802 interpreter.
pub const STACK_SIZE_CLASSIC: usize = 12;

/// Call depth on Super-CHIP and XO-CHIP.
pub const STACK_SIZE_SCHIP: usize = 16;

/// Location of the sixteen 5-byte glyphs for hex digits 0-F.
pub const SMALL_FONT_ADDR: usize = 0x000;

/// Location of the sixteen 10-byte hi-res glyphs.
pub const BIG_FONT_ADDR: usize = 0x050;

pub const SMALL_GLYPH_SIZE: usize = 5;
pub const BIG_GLYPH_SIZE: usize = 10;

/// Number of system timer decrements in a second. Also the display
/// refresh rate.
pub const TICK_FREQUENCY: u32 = 60;

/// Number of nanoseconds in a second
#[doc(hidden)]
pub const NANOS_IN_SECOND: u64 = 1_000_000_000;

/// Time in nanoseconds a single 60 Hz tick takes, precalculated.
pub const TICK_INTERVAL: u64 = NANOS_IN_SECOND / TICK_FREQUENCY as u64;

/// Wall-clock budget spent executing instructions inside one tick when the
/// clock speed is uncapped. The remainder of the tick is left to the host
/// so its event loop does not starve.
pub const UNCAPPED_TICK_BUDGET: Duration = Duration::from_micros(12_000);

/// Number of cycles executed between wall-clock checks in uncapped mode.
pub const UNCAPPED_CHUNK: usize = 256;

/// Number of keys on the keypad (0x0-0xF)
pub const KEY_COUNT: usize = 16;

/// Upper bound on bit planes (XO-CHIP 16-colour).
pub const MAX_PLANES: usize = 4;

/// Default CPU speed for the classic dialects, in cycles per second.
/// Super-CHIP and later run uncapped by default.
pub const DEFAULT_CLOCK_CLASSIC: u32 = 1000;

/// Type for storing memory addresses. Classic dialects only use the low
/// 12 bits.
pub type Address = u16;

/// Colours for every representable colour index. A machine with N planes
/// uses the first 2^N entries; index 0 is the background.
///
/// The first two entries form the monochrome scheme, the first four the
/// XO-CHIP scheme, all sixteen the 16-colour scheme.
pub const DEFAULT_PALETTE: [Colour; 16] = [
    Colour::new(0x00, 0x00, 0x00),
    Colour::new(0xFF, 0xFF, 0xFF),
    Colour::new(0xFF, 0x66, 0x66),
    Colour::new(0xFF, 0xCC, 0x00),
    Colour::new(0x00, 0xCC, 0x00),
    Colour::new(0x00, 0x66, 0xFF),
    Colour::new(0xCC, 0x66, 0xFF),
    Colour::new(0x88, 0x88, 0x88),
    Colour::new(0x44, 0x44, 0x44),
    Colour::new(0xFF, 0x99, 0xCC),
    Colour::new(0x66, 0xFF, 0xFF),
    Colour::new(0x00, 0x66, 0x66),
    Colour::new(0x66, 0x33, 0x00),
    Colour::new(0x99, 0xFF, 0x66),
    Colour::new(0x00, 0x00, 0x99),
    Colour::new(0xFF, 0xFF, 0xCC),
];

/// Default palette slice for a machine with the given number of planes.
pub fn default_palette(planes: usize) -> &'static [Colour] {
    &DEFAULT_PALETTE[..1 << planes]
}
