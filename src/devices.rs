//! Host I/O port interfaces.
//!
//! The core owns all machine state and drives the ports synchronously
//! from the scheduler; a port must not retain references to the buffers
//! it is handed. Display failures are fatal to the run, audio failures
//! mute the port, input is infallible.
use crate::error::Chip8Result;
use crate::framebuffer::{DirtyRect, FrameView};

/// Video output sink.
pub trait Display {
    /// The framebuffer geometry changed: at boot and on 00FE/00FF.
    fn set_mode(&mut self, width: usize, height: usize, planes: usize) -> Chip8Result<()>;

    /// Colours for every representable colour index, background first.
    fn set_palette(&mut self, colours: &[Colour]) -> Chip8Result<()>;

    /// Present the framebuffer. Called at 60 Hz with a read-only snapshot
    /// valid for the duration of the call. `dirty` is the region changed
    /// since the previous present, `None` when nothing changed.
    fn present(&mut self, frame: FrameView<'_>, dirty: Option<DirtyRect>) -> Chip8Result<()>;
}

/// Keypad input source.
///
/// The core consumes key state exclusively through the events drained by
/// `poll` at tick boundaries, so input changes never become visible in
/// the middle of a cycle batch. `key_state` exists for hosts that want to
/// mirror the hardware line level, e.g. for an on-screen keypad.
pub trait Input {
    /// Drain pending events into `events`.
    fn poll(&mut self, events: &mut Vec<InputEvent>);

    /// Immediate host-side state of a key.
    fn key_state(&self, key: KeyCode) -> bool;
}

/// Tone generator. XO-CHIP programs reload the 16-byte 1-bit pattern
/// buffer and retune its playback rate; the other dialects only gate a
/// fixed beep.
pub trait Audio {
    /// Set the pattern playback rate in Hz.
    fn set_tone(&mut self, freq_hz: f32) -> Chip8Result<()>;

    /// Replace the 128-bit sample pattern.
    fn set_pattern(&mut self, pattern: &[u8; 16]) -> Chip8Result<()>;

    /// Start or stop emitting. Follows the sound timer.
    fn gate(&mut self, on: bool) -> Chip8Result<()>;

    /// Host-level mute, independent of the gate.
    fn mute(&mut self, muted: bool) -> Chip8Result<()>;
}

/// Key state transition reported by the input port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    /// The host asked the machine to stop. The scheduler finishes the
    /// tick, flushes the ports and returns.
    PowerOff,
}

/// An RGB display colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum KeyCode {
    Key0 = 0,
    Key1,
    Key2,
    Key3,
    Key4,
    Key5,
    Key6,
    Key7,
    Key8,
    Key9,
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF = 0xF,
}

impl KeyCode {
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Build a keycode from the low nibble of a byte. Infallible since
    /// the nibble range is exactly the key range.
    pub(crate) fn from_nibble(value: u8) -> Self {
        match value & 0xF {
            0 => Self::Key0,
            1 => Self::Key1,
            2 => Self::Key2,
            3 => Self::Key3,
            4 => Self::Key4,
            5 => Self::Key5,
            6 => Self::Key6,
            7 => Self::Key7,
            8 => Self::Key8,
            9 => Self::Key9,
            10 => Self::KeyA,
            11 => Self::KeyB,
            12 => Self::KeyC,
            13 => Self::KeyD,
            14 => Self::KeyE,
            _ => Self::KeyF,
        }
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let key_id = self.as_u8();
        write!(f, "k{key_id:x}")
    }
}

impl From<KeyCode> for u8 {
    fn from(keycode: KeyCode) -> Self {
        keycode.as_u8()
    }
}

impl TryFrom<u8> for KeyCode {
    type Error = InvalidKeyCode;

    fn try_from(key_id: u8) -> Result<Self, Self::Error> {
        if key_id < 16 {
            Ok(Self::from_nibble(key_id))
        } else {
            Err(InvalidKeyCode)
        }
    }
}

#[derive(Debug)]
pub struct InvalidKeyCode;

impl std::error::Error for InvalidKeyCode {}

impl std::fmt::Display for InvalidKeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "keycode must be in range 0 <= keycode < 16")
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Headless ports for the unit tests.
    use super::*;
    use crate::error::Chip8Error;

    #[derive(Default)]
    pub(crate) struct TestDisplay {
        pub mode: Option<(usize, usize, usize)>,
        pub presents: usize,
        pub palette_len: usize,
    }

    impl Display for TestDisplay {
        fn set_mode(&mut self, width: usize, height: usize, planes: usize) -> Chip8Result<()> {
            self.mode = Some((width, height, planes));
            Ok(())
        }

        fn set_palette(&mut self, colours: &[Colour]) -> Chip8Result<()> {
            self.palette_len = colours.len();
            Ok(())
        }

        fn present(&mut self, _frame: FrameView<'_>, _dirty: Option<DirtyRect>) -> Chip8Result<()> {
            self.presents += 1;
            Ok(())
        }
    }

    #[derive(Default)]
    pub(crate) struct TestInput {
        pub pending: Vec<InputEvent>,
    }

    impl Input for TestInput {
        fn poll(&mut self, events: &mut Vec<InputEvent>) {
            events.append(&mut self.pending);
        }

        fn key_state(&self, _key: KeyCode) -> bool {
            false
        }
    }

    #[derive(Default)]
    pub(crate) struct TestAudio {
        pub gate_on: bool,
        pub muted: bool,
        pub tone: f32,
        pub pattern: [u8; 16],
        pub fail_gate: bool,
    }

    impl Audio for TestAudio {
        fn set_tone(&mut self, freq_hz: f32) -> Chip8Result<()> {
            self.tone = freq_hz;
            Ok(())
        }

        fn set_pattern(&mut self, pattern: &[u8; 16]) -> Chip8Result<()> {
            self.pattern = *pattern;
            Ok(())
        }

        fn gate(&mut self, on: bool) -> Chip8Result<()> {
            if self.fail_gate {
                return Err(Chip8Error::Port {
                    device: "audio",
                    message: "gate failure injected".into(),
                });
            }
            self.gate_on = on;
            Ok(())
        }

        fn mute(&mut self, muted: bool) -> Chip8Result<()> {
            self.muted = muted;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keycode_round_trip() {
        for id in 0u8..16 {
            let key = KeyCode::try_from(id).unwrap();
            assert_eq!(u8::from(key), id);
        }
        assert!(KeyCode::try_from(16).is_err());
    }
}
