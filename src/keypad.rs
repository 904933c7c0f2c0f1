//! Keypad state.
//!
//! The sixteen keys form a bitmap that the scheduler refreshes from input
//! events between ticks. FX0A's blocking wait is a small state machine:
//! the canonical semantics are "wait for a fresh press, then wait for its
//! release", so a key already held when the wait starts does not count.
use crate::devices::KeyCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wait {
    /// Waiting for a new key to go down. `seen` holds the keys that do
    /// not count because they were already held.
    Press { seen: u16 },
    /// A key went down; waiting for it to come back up.
    Release(u8),
}

#[derive(Default)]
pub(crate) struct Keypad {
    keys: u16,
    wait: Option<Wait>,
}

impl Keypad {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&mut self, key: KeyCode, down: bool) {
        let bit = 1u16 << key.as_u8();
        if down {
            self.keys |= bit;
        } else {
            self.keys &= !bit;
        }
    }

    pub(crate) fn is_down(&self, key: KeyCode) -> bool {
        self.keys & (1 << key.as_u8()) != 0
    }

    /// Advance the FX0A wait. Returns the keycode once a full
    /// press-then-release has been observed, clearing the wait.
    pub(crate) fn poll_wait(&mut self) -> Option<u8> {
        match self.wait {
            None => {
                self.wait = Some(Wait::Press { seen: self.keys });
                None
            }
            Some(Wait::Press { seen }) => {
                // Keys released since the wait started become eligible again.
                let seen = seen & self.keys;
                match self.keys & !seen {
                    0 => {
                        self.wait = Some(Wait::Press { seen });
                        None
                    }
                    fresh => {
                        self.wait = Some(Wait::Release(fresh.trailing_zeros() as u8));
                        None
                    }
                }
            }
            Some(Wait::Release(key)) => {
                if self.keys & (1 << key) == 0 {
                    self.wait = None;
                    Some(key)
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_tracks_events() {
        let mut pad = Keypad::new();
        assert!(!pad.is_down(KeyCode::Key7));
        pad.set(KeyCode::Key7, true);
        pad.set(KeyCode::KeyF, true);
        assert!(pad.is_down(KeyCode::Key7));
        assert!(pad.is_down(KeyCode::KeyF));
        pad.set(KeyCode::Key7, false);
        assert!(!pad.is_down(KeyCode::Key7));
    }

    #[test]
    fn wait_requires_press_then_release() {
        let mut pad = Keypad::new();
        assert_eq!(pad.poll_wait(), None); // arms the wait
        assert_eq!(pad.poll_wait(), None); // nothing pressed yet

        pad.set(KeyCode::Key4, true);
        assert_eq!(pad.poll_wait(), None); // press observed, still held
        assert_eq!(pad.poll_wait(), None);

        pad.set(KeyCode::Key4, false);
        assert_eq!(pad.poll_wait(), Some(4));

        // The wait is cleared; the next call arms a new one.
        assert_eq!(pad.poll_wait(), None);
    }

    #[test]
    fn held_key_does_not_satisfy_the_wait() {
        let mut pad = Keypad::new();
        pad.set(KeyCode::Key2, true);
        assert_eq!(pad.poll_wait(), None);
        assert_eq!(pad.poll_wait(), None); // key 2 was held at arm time

        // Releasing and re-pressing the same key counts as a fresh press.
        pad.set(KeyCode::Key2, false);
        assert_eq!(pad.poll_wait(), None);
        pad.set(KeyCode::Key2, true);
        assert_eq!(pad.poll_wait(), None);
        pad.set(KeyCode::Key2, false);
        assert_eq!(pad.poll_wait(), Some(2));
    }
}
