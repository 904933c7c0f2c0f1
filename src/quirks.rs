//! Dialect quirk flags.
//!
//! Identical opcode encodings behave differently across the historical
//! interpreters. Each divergence is captured as a boolean flag; the
//! architecture preset fixes the defaults and per-flag overrides are
//! applied on top.
use crate::arch::Arch;

/// Resolved quirk flags for a running machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// FX55/FX65 leave I unchanged. When off, I advances past the
    /// transferred registers.
    pub load: bool,
    /// 8XY6/8XYE shift Vx in place instead of shifting Vy into Vx.
    pub shift: bool,
    /// 8XY1/8XY2/8XY3 clear VF after the operation.
    pub logic: bool,
    /// FX1E writes the overflow of I into VF.
    pub index_overflow: bool,
    /// When FX55/FX65 advance I, step by x rather than x + 1.
    pub index_increment: bool,
    /// BNNN jumps to XNN + Vx, where X is the high nibble of the operand,
    /// instead of NNN + V0.
    pub jump: bool,
    /// DXYN waits for the next 60 Hz video tick before drawing.
    pub sprite_delay: bool,
    /// Sprite pixels wrap at the display edges instead of clipping.
    pub screen_wrap: bool,
}

impl Quirks {
    /// Default flags for an architecture.
    pub fn preset(arch: Arch) -> Self {
        let schip = arch >= Arch::SuperChip1_0 && arch <= Arch::SuperChip1_1;
        Self {
            load: arch == Arch::Chip8HiRes || arch == Arch::SuperChip1_0,
            shift: schip,
            logic: arch == Arch::Chip8,
            index_overflow: false,
            index_increment: arch == Arch::Chip48,
            jump: schip,
            sprite_delay: arch == Arch::Chip8,
            screen_wrap: arch >= Arch::XoChip,
        }
    }

    pub fn with_overrides(mut self, overrides: &QuirkOverrides) -> Self {
        if let Some(v) = overrides.load {
            self.load = v;
        }
        if let Some(v) = overrides.shift {
            self.shift = v;
        }
        if let Some(v) = overrides.logic {
            self.logic = v;
        }
        if let Some(v) = overrides.index_overflow {
            self.index_overflow = v;
        }
        if let Some(v) = overrides.index_increment {
            self.index_increment = v;
        }
        if let Some(v) = overrides.jump {
            self.jump = v;
        }
        if let Some(v) = overrides.sprite_delay {
            self.sprite_delay = v;
        }
        if let Some(v) = overrides.screen_wrap {
            self.screen_wrap = v;
        }
        self
    }
}

/// Per-flag overrides supplied by the host, applied after the
/// architecture preset. `None` keeps the preset value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuirkOverrides {
    pub load: Option<bool>,
    pub shift: Option<bool>,
    pub logic: Option<bool>,
    pub index_overflow: Option<bool>,
    pub index_increment: Option<bool>,
    pub jump: Option<bool>,
    pub sprite_delay: Option<bool>,
    pub screen_wrap: Option<bool>,
}
