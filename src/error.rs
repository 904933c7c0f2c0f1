//! Result and traps.
use std::fmt::{self, Display, Formatter};

pub type Chip8Result<T> = std::result::Result<T, Chip8Error>;

/// Structured traps reported to the host.
///
/// Decode, stack and bounds errors are fatal: the scheduler stops and the
/// trap bubbles out of [`run`](crate::Chip8Vm::run). Timer underflow and
/// arithmetic overflow are not errors; they are defined behaviour.
#[derive(Debug, PartialEq, Eq)]
pub enum Chip8Error {
    /// Opcode word not matched by any handler under the current dialect.
    /// Carries a disassembly of the surrounding instructions.
    InvalidOpcode {
        opcode: u16,
        pc: u16,
        context: String,
    },
    /// Return executed with an empty call stack.
    StackUnderflow,
    /// Call executed with a full call stack.
    StackOverflow,
    /// A sprite read through I reached past the end of memory.
    IndexOutOfRange { addr: usize },
    /// The program executed 00FD.
    Halt,
    /// Attempt to load a ROM that can't fit in memory.
    LargeProgram,
    /// Incompatible machine configuration, rejected at boot.
    Config(String),
    /// Failure reported by a host I/O port.
    Port {
        device: &'static str,
        message: String,
    },
}

impl Display for Chip8Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::InvalidOpcode {
                opcode,
                pc,
                context,
            } => {
                writeln!(
                    f,
                    "opcode {:04X} at {:04X} is not emulated for the selected architecture",
                    opcode, pc
                )?;
                write!(f, "{}", context)
            }
            Self::StackUnderflow => write!(f, "return with an empty call stack"),
            Self::StackOverflow => write!(f, "call nesting exceeds the stack capacity"),
            Self::IndexOutOfRange { addr } => {
                write!(f, "sprite read at {:04X} is outside memory", addr)
            }
            Self::Halt => write!(f, "program requested halt"),
            Self::LargeProgram => write!(f, "program too large for VM memory"),
            Self::Config(msg) => write!(f, "configuration rejected: {}", msg),
            Self::Port { device, message } => write!(f, "{} port failure: {}", device, message),
        }
    }
}

impl std::error::Error for Chip8Error {}
