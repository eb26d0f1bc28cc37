// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The 16-key hexadecimal keypad, as seen across two frames

/// Number of keys on the keypad
pub const KEY_COUNT: usize = 16;

/// Holds the keypad state for the current and previous host frame
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Keypad {
    held: [bool; KEY_COUNT],
    previous: [bool; KEY_COUNT],
}

impl Keypad {
    /// Moves the current state into the previous snapshot, then takes `state` as current.
    ///
    /// Call once per frame, before any instructions run.
    pub fn update(&mut self, state: [bool; KEY_COUNT]) {
        self.previous = self.held;
        self.held = state;
    }

    /// Returns true if `key` is held this frame. Keys past `0xf` are never held.
    pub fn is_held(&self, key: usize) -> bool {
        self.held.get(key).copied().unwrap_or_default()
    }

    /// Returns the lowest key which was held last frame, but isn't held now
    /// # Examples
    /// ```rust
    /// # use chip8vm::cpu::keypad::*;
    /// let mut keys = Keypad::default();
    /// let mut state = [false; KEY_COUNT];
    /// state[0xa] = true;
    /// keys.update(state);
    /// assert_eq!(None, keys.released());
    /// keys.update([false; KEY_COUNT]);
    /// assert_eq!(Some(0xa), keys.released());
    /// ```
    pub fn released(&self) -> Option<usize> {
        self.previous
            .iter()
            .zip(self.held.iter())
            .position(|(&was, &is)| was && !is)
    }

    /// Gets the keys held this frame
    pub fn held(&self) -> &[bool; KEY_COUNT] {
        &self.held
    }

    /// Gets the keys held last frame
    pub fn previous(&self) -> &[bool; KEY_COUNT] {
        &self.previous
    }
}
