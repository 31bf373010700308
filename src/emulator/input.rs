//! The 16-key hexadecimal keypad, and the request/response protocol
//! used by the instruction that waits for a key press.

use crate::emulator::error::{EmulatorError, Result};

pub const NUM_KEYS: usize = 16;

/// A resolved key wait: which key was pressed, and which register asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyResponse {
    pub key: u8,
    pub register: u8,
}

pub struct Input {
    state: [bool; NUM_KEYS],
    waiting: bool,
    request_register: u8,
    response: Option<KeyResponse>,
}

impl Input {

    pub fn new() -> Input {
        Input {
            state: [false; NUM_KEYS],
            waiting: false,
            request_register: 0,
            response: None,
        }
    }

    /// Record a key event. A press of a key that was not already down
    /// resolves an outstanding key wait.
    pub fn update(&mut self, key: u8, pressed: bool) -> Result<()> {
        let slot = self
            .state
            .get_mut(key as usize)
            .ok_or(EmulatorError::KeyOutOfRange { key })?;

        if *slot == pressed {
            return Ok(());
        }
        *slot = pressed;

        if pressed && self.waiting {
            log::debug!("Key {:X} resolves wait for V{:X}", key, self.request_register);
            self.waiting = false;
            self.response = Some(KeyResponse { key, register: self.request_register });
        }

        Ok(())
    }

    /// Block until the next key press, which will be stored in `register`.
    pub fn request_key_press(&mut self, register: u8) {
        log::debug!("Waiting for a key press into V{:X}", register);
        self.waiting = true;
        self.request_register = register;
    }

    pub fn is_key_pressed(&self, key: u8) -> Result<bool> {
        self.state
            .get(key as usize)
            .copied()
            .ok_or(EmulatorError::KeyOutOfRange { key })
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Take the resolved key wait, if there is one.
    pub fn take_response(&mut self) -> Option<KeyResponse> {
        self.response.take()
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tracks_key_state() {
        let mut input = Input::new();
        input.update(0xA, true).unwrap();
        assert_eq!(input.is_key_pressed(0xA), Ok(true));
        input.update(0xA, false).unwrap();
        assert_eq!(input.is_key_pressed(0xA), Ok(false));
    }

    #[test]
    fn press_resolves_wait() {
        let mut input = Input::new();
        input.request_key_press(3);
        assert!(input.is_waiting());
        input.update(0x7, true).unwrap();
        assert!(!input.is_waiting());
        assert_eq!(input.take_response(), Some(KeyResponse { key: 7, register: 3 }));
        assert_eq!(input.take_response(), None);
    }

    #[test]
    fn release_does_not_resolve_wait() {
        let mut input = Input::new();
        input.update(0x1, true).unwrap();
        input.request_key_press(0);
        input.update(0x1, false).unwrap();
        assert!(input.is_waiting());
        assert_eq!(input.take_response(), None);
    }

    #[test]
    fn held_key_does_not_resolve_wait() {
        let mut input = Input::new();
        input.update(0x2, true).unwrap();
        input.request_key_press(0);
        input.update(0x2, true).unwrap();
        assert!(input.is_waiting());
    }

    #[test]
    fn rejects_keys_out_of_range() {
        let mut input = Input::new();
        assert_eq!(input.update(16, true), Err(EmulatorError::KeyOutOfRange { key: 16 }));
        assert_eq!(input.is_key_pressed(0xFF), Err(EmulatorError::KeyOutOfRange { key: 0xFF }));
    }
}
