//! Multi-variant CHIP-8 emulation core.
//!
//! One machine emulates seven overlapping dialects: CHIP-8, CHIP-8
//! hi-res, CHIP-48, Super-CHIP 1.0/1.1, XO-CHIP and XO-CHIP 16-colour.
//! The dialects share a 16-bit opcode space in which identical encodings
//! behave differently depending on the architecture preset and its quirk
//! flags.
//!
//! The core is headless: it draws into its own bit-packed framebuffer and
//! talks to the host exclusively through the [`Display`], [`Input`] and
//! [`Audio`] ports injected at construction.
//!
//! ```no_run
//! use chip8x::prelude::*;
//!
//! fn boot(
//!     rom: &[u8],
//!     display: impl Display,
//!     input: impl Input,
//!     audio: impl Audio,
//! ) -> Chip8Result<()> {
//!     let conf = Chip8Conf {
//!         arch: "xochip".parse()?,
//!         ..Chip8Conf::default()
//!     };
//!     let mut vm = Chip8Vm::new(conf, display, input, audio)?;
//!     vm.load_rom(rom)?;
//!     vm.run()
//! }
//! ```
//!
//! A note on flag ordering: VF is always assigned after the result of an
//! arithmetic instruction, so programs naming VF as an operand observe
//! the result. The historical "VF first" variant is not emulated and
//! there is no flag for it.
mod arch;
mod clock;
pub mod constants;
mod cpu;
mod devices;
mod disasm;
mod error;
mod font;
mod framebuffer;
mod interp;
mod keypad;
mod mem;
mod quirks;
mod vm;

pub use self::{
    arch::Arch,
    cpu::Chip8Cpu,
    devices::{Audio, Colour, Display, Input, InputEvent, InvalidKeyCode, KeyCode},
    disasm::Disassembler,
    error::{Chip8Error, Chip8Result},
    font::{big_glyph_addr, small_glyph_addr, BIG_FONT, SMALL_FONT},
    framebuffer::{DirtyRect, Framebuffer, FrameView},
    mem::Ram,
    quirks::{QuirkOverrides, Quirks},
    vm::{Chip8Conf, Chip8Vm, Flow, Hz, Signal},
};

/// Version of *this* implementation.
pub const IMPL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod prelude {
    pub use super::{
        arch::Arch,
        devices::{Audio, Display, Input},
        disasm::Disassembler,
        error::{Chip8Error, Chip8Result},
        vm::{Chip8Conf, Chip8Vm},
    };
}
