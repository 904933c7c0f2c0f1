//! Emulated architecture dialects.
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::constants::*;
use crate::error::Chip8Error;

/// The CHIP-8 family dialect a machine emulates.
///
/// Variants are declared in capability rank order so that instruction-set
/// availability checks read as range comparisons. CHIP-48 predates
/// Super-CHIP 1.0 historically, but its instruction set sits between the
/// two Super-CHIPs, differing only in quirk defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arch {
    /// Base architecture, 64x32 monochrome.
    Chip8,
    /// Double-height 64x64 resolution mode.
    Chip8HiRes,
    /// Extra instructions, user-flag registers, 128x64 hi-res mode.
    SuperChip1_0,
    /// Super-CHIP 1.0 instruction set with different quirk defaults.
    Chip48,
    /// Hardware scrolling and the large system font.
    SuperChip1_1,
    /// Second plane, 64 KiB memory, audio pattern playback.
    XoChip,
    /// XO-CHIP with four planes for 16 colours.
    XoChip16,
}

impl Arch {
    pub const ALL: [Arch; 7] = [
        Arch::Chip8,
        Arch::Chip8HiRes,
        Arch::SuperChip1_0,
        Arch::Chip48,
        Arch::SuperChip1_1,
        Arch::XoChip,
        Arch::XoChip16,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Arch::Chip8 => "chip8",
            Arch::Chip8HiRes => "chip8hires",
            Arch::SuperChip1_0 => "schip1.0",
            Arch::Chip48 => "chip48",
            Arch::SuperChip1_1 => "schip1.1",
            Arch::XoChip => "xochip",
            Arch::XoChip16 => "xochip16",
        }
    }

    /// Addressable memory in bytes. Always a power of two, so reads and
    /// writes can wrap by masking.
    pub fn mem_size(self) -> usize {
        if self >= Arch::XoChip {
            MEM_SIZE_64K
        } else {
            MEM_SIZE_4K
        }
    }

    /// Call stack depth.
    pub fn stack_capacity(self) -> usize {
        if self >= Arch::SuperChip1_0 {
            STACK_SIZE_SCHIP
        } else {
            STACK_SIZE_CLASSIC
        }
    }

    /// Number of framebuffer bit planes.
    pub fn plane_count(self) -> usize {
        match self {
            Arch::XoChip16 => 4,
            Arch::XoChip => 2,
            _ => 1,
        }
    }

    /// Display resolution at boot. Super-CHIP machines switch between
    /// lo-res and hi-res at runtime via 00FE/00FF.
    pub fn resolution(self) -> (usize, usize) {
        match self {
            Arch::Chip8HiRes => (64, 64),
            _ => (64, 32),
        }
    }

    /// Default cycles per second. Zero means uncapped.
    pub fn default_clock(self) -> u32 {
        if self >= Arch::SuperChip1_0 {
            0
        } else {
            DEFAULT_CLOCK_CLASSIC
        }
    }

    /// Whether the 10-byte hi-res font is installed at boot.
    pub fn has_big_font(self) -> bool {
        self > Arch::Chip8
    }

    /// Number of user-flag registers reachable by FX75/FX85.
    pub fn flag_register_count(self) -> usize {
        if self >= Arch::XoChip {
            16
        } else {
            8
        }
    }
}

impl Default for Arch {
    fn default() -> Self {
        Arch::Chip8
    }
}

impl Display for Arch {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Arch {
    type Err = Chip8Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Arch::ALL
            .into_iter()
            .find(|arch| arch.name() == s)
            .ok_or_else(|| Chip8Error::Config(format!("unknown architecture '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_order() {
        assert!(Arch::Chip8 < Arch::Chip8HiRes);
        assert!(Arch::SuperChip1_0 < Arch::Chip48);
        assert!(Arch::Chip48 < Arch::SuperChip1_1);
        assert!(Arch::SuperChip1_1 < Arch::XoChip);
        assert!(Arch::XoChip < Arch::XoChip16);
    }

    #[test]
    fn memory_and_stack_sizes() {
        assert_eq!(Arch::Chip8.mem_size(), 0x1000);
        assert_eq!(Arch::SuperChip1_1.mem_size(), 0x1000);
        assert_eq!(Arch::XoChip.mem_size(), 0x10000);
        assert_eq!(Arch::Chip8.stack_capacity(), 12);
        assert_eq!(Arch::Chip48.stack_capacity(), 16);
    }

    #[test]
    fn parse_names() {
        for arch in Arch::ALL {
            assert_eq!(arch.name().parse::<Arch>().unwrap(), arch);
        }
        assert!("chip9".parse::<Arch>().is_err());
    }

    #[test]
    fn boot_resolution() {
        assert_eq!(Arch::Chip8.resolution(), (64, 32));
        assert_eq!(Arch::Chip8HiRes.resolution(), (64, 64));
        assert_eq!(Arch::XoChip16.resolution(), (64, 32));
    }
}
