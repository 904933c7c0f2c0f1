//! Virtual machine and scheduler.
use std::fmt::Write as FmtWrite;
use std::time::Instant;

use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    arch::Arch,
    clock::Clock,
    constants::*,
    cpu::Chip8Cpu,
    devices::{Audio, Colour, Display, Input, InputEvent},
    error::{Chip8Error, Chip8Result},
    font,
    framebuffer::Framebuffer,
    interp::Dispatch,
    keypad::Keypad,
    quirks::{QuirkOverrides, Quirks},
};

/// Clock speed in cycles per second. Zero means uncapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hz(pub u32);

impl From<u32> for Hz {
    fn from(value: u32) -> Self {
        Hz(value)
    }
}

/// Outcome of a single cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// The instruction completed; execution continues at the new PC.
    Continue,
    /// FX0A is waiting on the keypad. The PC was rewound; the rest of
    /// the cycle batch yields so input can arrive.
    KeyWait,
    /// A sprite blit is gated on the video timer. The PC was rewound.
    VideoWait,
}

/// Outcome of a 60 Hz tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    /// The host requested stop through the input port.
    Stop,
}

/// Machine configuration, consumed at construction.
///
/// The architecture preset fixes the quirk flags and clock speed;
/// overrides are applied on top of the preset.
#[derive(Debug, Clone, Default)]
pub struct Chip8Conf {
    pub arch: Arch,
    /// Cycles per second; `None` takes the architecture default,
    /// `Some(Hz(0))` forces uncapped execution.
    pub clock_speed: Option<Hz>,
    pub quirks: QuirkOverrides,
    /// Replacement palette; must have one colour per representable
    /// colour index.
    pub palette: Option<Vec<Colour>>,
    /// Downgrade decode errors to logged skips, for diagnostic runs.
    pub lenient_decode: bool,
    /// Fixed RNG seed. Defaults to entropy.
    pub rng_seed: Option<u64>,
}

/// A complete machine: CPU, framebuffer, keypad and the host ports it
/// drives. The host creates one per ROM run.
pub struct Chip8Vm<D: Display, I: Input, A: Audio> {
    pub(crate) arch: Arch,
    pub(crate) quirks: Quirks,
    pub(crate) cpu: Chip8Cpu,
    pub(crate) fb: Framebuffer,
    pub(crate) keypad: Keypad,
    pub(crate) display: D,
    pub(crate) input: I,
    pub(crate) audio: A,
    pub(crate) dispatch: Dispatch<D, I, A>,
    pub(crate) rng: StdRng,
    pub(crate) lenient_decode: bool,
    pub(crate) lo_res: bool,
    clock_speed: u32,
    cycle_carry: u32,
    audio_muted: bool,
    events: Vec<InputEvent>,
    stop: bool,
}

impl<D: Display, I: Input, A: Audio> Chip8Vm<D, I, A> {
    pub fn new(conf: Chip8Conf, display: D, input: I, audio: A) -> Chip8Result<Self> {
        let arch = conf.arch;
        let quirks = Quirks::preset(arch).with_overrides(&conf.quirks);
        let plane_count = arch.plane_count();

        let palette = match conf.palette {
            Some(palette) => {
                if palette.len() != 1 << plane_count {
                    return Err(Chip8Error::Config(format!(
                        "palette for {} needs {} colours, got {}",
                        arch,
                        1 << plane_count,
                        palette.len()
                    )));
                }
                palette
            }
            None => default_palette(plane_count).to_vec(),
        };

        let mut cpu = Chip8Cpu::new(arch);
        font::install(&mut cpu.ram, arch);

        let (width, height) = arch.resolution();
        let fb = Framebuffer::new(plane_count, width, height, palette);

        let mut vm = Self {
            arch,
            quirks,
            cpu,
            fb,
            keypad: Keypad::new(),
            display,
            input,
            audio,
            dispatch: Self::build_dispatch(arch),
            rng: match conf.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            },
            lenient_decode: conf.lenient_decode,
            lo_res: (width, height) == (64, 32),
            clock_speed: conf.clock_speed.map(|hz| hz.0).unwrap_or_else(|| arch.default_clock()),
            cycle_carry: 0,
            audio_muted: false,
            events: Vec::new(),
            stop: false,
        };

        vm.display.set_mode(width, height, plane_count)?;
        vm.display.set_palette(vm.fb.palette())?;
        Ok(vm)
    }

    /// Place a ROM image at 0x200 and reset the machine for execution.
    /// The user-flag registers survive, everything else starts clean.
    pub fn load_rom(&mut self, rom: &[u8]) -> Chip8Result<()> {
        if rom.len() > self.cpu.ram.len() - MEM_START {
            return Err(Chip8Error::LargeProgram);
        }

        // Start with clean memory to avoid leaking the previous program.
        self.cpu.reset();
        font::install(&mut self.cpu.ram, self.arch);
        self.cpu.ram.load(MEM_START, rom);

        let (width, height) = self.arch.resolution();
        self.set_resolution(width, height)?;
        self.fb.set_mask(0b1);
        self.cycle_carry = 0;
        self.stop = false;

        info!("loaded {} byte ROM for {}", rom.len(), self.arch);
        Ok(())
    }

    /// Replace the bundled fonts with host-supplied glyph tables.
    pub fn load_fonts(&mut self, small: &[u8], big: &[u8]) -> Chip8Result<()> {
        font::install_custom(&mut self.cpu.ram, self.arch, small, big)
    }

    /// Run until the program halts, a trap fires, or the host requests
    /// stop through the input port.
    pub fn run(&mut self) -> Chip8Result<()> {
        let mut clock = Clock::new();
        loop {
            match self.tick() {
                Ok(Signal::Continue) => clock.wait(),
                Ok(Signal::Stop) => {
                    self.flush();
                    return Ok(());
                }
                Err(err) => {
                    self.flush();
                    return Err(err);
                }
            }
        }
    }

    /// One 60 Hz tick: a batch of CPU cycles, then the timer decrement,
    /// input poll and display present. Public for hosts that own the
    /// pacing loop.
    pub fn tick(&mut self) -> Chip8Result<Signal> {
        if self.clock_speed == 0 {
            // Uncapped: spend a fixed wall-clock budget per tick.
            let started = Instant::now();
            'burst: while started.elapsed() < UNCAPPED_TICK_BUDGET {
                for _ in 0..UNCAPPED_CHUNK {
                    if self.step()? != Flow::Continue {
                        break 'burst;
                    }
                }
            }
        } else {
            self.cycle_carry += self.clock_speed;
            let cycles = self.cycle_carry / TICK_FREQUENCY;
            self.cycle_carry %= TICK_FREQUENCY;
            for _ in 0..cycles {
                if self.step()? != Flow::Continue {
                    break;
                }
            }
        }

        self.tick_60hz()?;
        Ok(if self.stop {
            Signal::Stop
        } else {
            Signal::Continue
        })
    }

    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self) -> Chip8Result<Flow> {
        self.cpu.op_pc = self.cpu.pc;
        self.cpu.opcode = self.cpu.fetch_word();
        self.cpu.inc_pc();

        #[cfg(feature = "op_trace")]
        log::trace!(
            "{:04X}: {}",
            self.cpu.op_pc,
            crate::disasm::mnemonic(self.cpu.opcode, self.cpu.fetch_word())
        );

        let handler = self.dispatch.primary(self.cpu.opcode);
        handler(self)
    }

    fn tick_60hz(&mut self) -> Chip8Result<()> {
        let sound_was = self.cpu.sound_timer;
        self.cpu.tick_delay();
        self.cpu.tick_sound();
        self.cpu.tick_video();
        if sound_was == 1 && self.cpu.sound_timer == 0 {
            self.audio_gate(false);
        }

        self.poll_input();
        self.present()
    }

    fn poll_input(&mut self) {
        self.input.poll(&mut self.events);
        for event in self.events.drain(..) {
            match event {
                InputEvent::KeyDown(key) => self.keypad.set(key, true),
                InputEvent::KeyUp(key) => self.keypad.set(key, false),
                InputEvent::PowerOff => self.stop = true,
            }
        }
    }

    fn present(&mut self) -> Chip8Result<()> {
        let dirty = self.fb.take_dirty();
        self.display.present(self.fb.frame(), dirty)
    }

    /// Final port flush before handing control back to the host.
    fn flush(&mut self) {
        self.audio_gate(false);
        let _ = self.display.present(self.fb.frame(), None);
    }

    /// Resize the framebuffer and tell the display. The palette and the
    /// plane mask survive; the pixels do not.
    pub(crate) fn set_resolution(&mut self, width: usize, height: usize) -> Chip8Result<()> {
        self.fb.resize(width, height);
        self.lo_res = (width, height) == (64, 32);
        self.display.set_mode(width, height, self.fb.plane_count())
    }

    // Audio failures are not fatal: log, mute, carry on.

    pub(crate) fn audio_gate(&mut self, on: bool) {
        if self.audio_muted {
            return;
        }
        if let Err(err) = self.audio.gate(on) {
            self.mute_audio(err);
        }
    }

    pub(crate) fn audio_set_pattern(&mut self, pattern: &[u8; 16]) {
        if self.audio_muted {
            return;
        }
        if let Err(err) = self.audio.set_pattern(pattern) {
            self.mute_audio(err);
        }
    }

    pub(crate) fn audio_set_tone(&mut self, freq_hz: f32) {
        if self.audio_muted {
            return;
        }
        if let Err(err) = self.audio.set_tone(freq_hz) {
            self.mute_audio(err);
        }
    }

    fn mute_audio(&mut self, err: Chip8Error) {
        warn!("audio port failure, muting: {}", err);
        self.audio_muted = true;
        let _ = self.audio.mute(true);
    }

    // ------------------------------------------------------------------------
    // Introspection

    pub fn arch(&self) -> Arch {
        self.arch
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn cpu(&self) -> &Chip8Cpu {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Chip8Cpu {
        &mut self.cpu
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.fb
    }
}

/// Troubleshooting
impl<D: Display, I: Input, A: Audio> Chip8Vm<D, I, A> {
    /// Returns the program region of memory as a human readable string.
    pub fn dump_ram(&self, count: usize) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();
        let ram = self.cpu.ram.as_slice();
        let end = usize::min(MEM_START + count, ram.len() - 1);
        for addr in (MEM_START..end).step_by(2) {
            writeln!(buf, "{:04X}: {:02X}{:02X}", addr, ram[addr], ram[addr + 1])?;
        }
        Ok(buf)
    }

    /// Returns the framebuffer as a human readable string, one hex digit
    /// per non-background pixel.
    pub fn dump_display(&self) -> Result<String, std::fmt::Error> {
        let mut buf = String::new();
        for y in 0..self.fb.height() {
            for x in 0..self.fb.width() {
                match self.fb.pixel(x, y) {
                    0 => write!(buf, ".")?,
                    index => write!(buf, "{:x}", index)?,
                }
            }
            writeln!(buf)?;
        }
        Ok(buf)
    }
}
