//! Headless ports shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chip8x::{
    Audio, Chip8Conf, Chip8Result, Chip8Vm, Colour, DirtyRect, Display, FrameView, Input,
    InputEvent, KeyCode,
};

#[derive(Default)]
pub struct HeadlessDisplay {
    pub mode: Option<(usize, usize, usize)>,
    pub presents: usize,
}

impl Display for HeadlessDisplay {
    fn set_mode(&mut self, width: usize, height: usize, planes: usize) -> Chip8Result<()> {
        self.mode = Some((width, height, planes));
        Ok(())
    }

    fn set_palette(&mut self, _colours: &[Colour]) -> Chip8Result<()> {
        Ok(())
    }

    fn present(&mut self, _frame: FrameView<'_>, _dirty: Option<DirtyRect>) -> Chip8Result<()> {
        self.presents += 1;
        Ok(())
    }
}

/// Input port fed from a queue the test holds on to.
pub struct ScriptedInput {
    pub queue: Rc<RefCell<Vec<InputEvent>>>,
}

impl Input for ScriptedInput {
    fn poll(&mut self, events: &mut Vec<InputEvent>) {
        events.append(&mut self.queue.borrow_mut());
    }

    fn key_state(&self, _key: KeyCode) -> bool {
        false
    }
}

pub struct SilentAudio;

impl Audio for SilentAudio {
    fn set_tone(&mut self, _freq_hz: f32) -> Chip8Result<()> {
        Ok(())
    }

    fn set_pattern(&mut self, _pattern: &[u8; 16]) -> Chip8Result<()> {
        Ok(())
    }

    fn gate(&mut self, _on: bool) -> Chip8Result<()> {
        Ok(())
    }

    fn mute(&mut self, _muted: bool) -> Chip8Result<()> {
        Ok(())
    }
}

pub type TestVm = Chip8Vm<HeadlessDisplay, ScriptedInput, SilentAudio>;

pub fn machine(conf: Chip8Conf) -> (TestVm, Rc<RefCell<Vec<InputEvent>>>) {
    let queue = Rc::new(RefCell::new(Vec::new()));
    let input = ScriptedInput {
        queue: Rc::clone(&queue),
    };
    let vm = Chip8Vm::new(conf, HeadlessDisplay::default(), input, SilentAudio).unwrap();
    (vm, queue)
}

/// Assemble a ROM image from big-endian opcode words.
pub fn rom(words: &[u16]) -> Vec<u8> {
    words.iter().flat_map(|word| word.to_be_bytes()).collect()
}
