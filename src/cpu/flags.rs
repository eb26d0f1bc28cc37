// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Run-time switches that sit outside the emulated machine

use super::Quirks;

/// Default number of instructions executed per host frame
pub const DEFAULT_IPF: usize = 11;

/// Interpreter settings: tracing, single-stepping, speed, and [Quirks]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Flags {
    /// Logs a disassembly of each instruction as it runs
    pub debug: bool,
    /// Single-step mode. Instructions only run after [Flags::advance]
    pub pause: bool,
    /// A requested step that hasn't been taken yet
    pub advance: bool,
    /// Halt on unrecognized words. When unset, they're logged and stepped over
    pub halt_on_unknown: bool,
    /// Instructions per host frame
    pub ipf: usize,
    /// Which variant behaviors are on
    pub quirks: Quirks,
}

impl Default for Flags {
    fn default() -> Self {
        Flags {
            debug: false,
            pause: false,
            advance: false,
            halt_on_unknown: true,
            ipf: DEFAULT_IPF,
            quirks: Quirks::default(),
        }
    }
}

impl Flags {
    /// Toggles debug mode
    ///
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.flags.debug();
    /// assert!(cpu.flags.debug);
    /// cpu.flags.debug();
    /// assert!(!cpu.flags.debug);
    /// ```
    pub fn debug(&mut self) {
        self.debug = !self.debug
    }

    /// Toggles single-step mode, dropping any pending step request
    ///
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.flags.pause();
    /// assert!(cpu.flags.is_paused());
    /// cpu.flags.advance();
    /// assert!(!cpu.flags.is_paused());
    /// ```
    pub fn pause(&mut self) {
        self.pause = !self.pause;
        self.advance = false;
    }

    /// Requests that a paused CPU execute exactly one more instruction
    pub fn advance(&mut self) {
        self.advance = true;
    }

    /// Returns true if [CPU::tick](super::CPU::tick) would do nothing right now
    pub fn is_paused(&self) -> bool {
        self.pause && !self.advance
    }
}
