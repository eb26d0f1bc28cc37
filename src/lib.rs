// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! This crate implements a Chip-8 interpreter as if it were a real CPU architecture.
//!
//! The [CPU] owns memory, registers, the call stack, timers and the keypad.
//! It draws to a separate [Screen], which the host consumes once per frame.
//! [Chip8] bundles the two together, and runs them one host frame at a time:
//! keys are taken, timers tick, then [Flags::ipf] instructions run.
//!
//! # Examples
//! ```rust
//! # use chip8vm::*;
//! # fn main() -> Result<()> {
//! // ld v0, #05; ld v1, #03; add v0, v1
//! let mut ch8 = Chip8::from_rom(&[0x60, 0x05, 0x61, 0x03, 0x80, 0x14], Flags::default())?;
//! ch8.frame([false; 16])?;
//! assert_eq!(7, ch8.cpu.v()[0]);
//! assert_eq!(0, ch8.cpu.v()[0xf]);
//! #    Ok(())
//! # }
//! ```

pub mod cpu;
pub mod error;
pub mod screen;

// Common imports for chip8vm
pub use cpu::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::{Keypad, KEY_COUNT},
    mem::{Mem, Region, Region::*, FONT, MAX_ROM_SIZE, MEM_SIZE, PROGRAM_START},
    mode::Mode,
    quirks::Quirks,
    stack::STACK_DEPTH,
    Adr, CPU,
};
pub use error::{Error, Halt, Result};
pub use screen::Screen;

/// Holds the state of a Chip-8
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chip8 {
    /// Contains the registers, timers, and memory of a Chip-8
    pub cpu: CPU,
    /// Contains the framebuffer the [CPU] draws to
    pub screen: Screen,
}

impl Chip8 {
    /// Constructs a new Chip8, loading the ROM at `rom`, with the font at `font`
    pub fn new(rom: impl AsRef<std::path::Path>, font: Adr, flags: Flags) -> Result<Self> {
        Ok(Chip8 {
            cpu: CPU::new(rom, font, flags)?,
            screen: Screen::default(),
        })
    }

    /// Constructs a new Chip8 from ROM bytes
    pub fn from_rom(rom: &[u8], flags: Flags) -> Result<Self> {
        Ok(Chip8 {
            cpu: CPU::from_rom(rom, flags)?,
            screen: Screen::default(),
        })
    }

    /// Runs one host frame.
    ///
    /// In order: takes this frame's `keys`, ticks the timers, then executes
    /// [Flags::ipf] instructions. When single-stepping, at most one instruction runs,
    /// and only if a step was requested with [Flags::advance].
    ///
    /// Returns true if the screen changed, and should be redrawn.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// // cls; jp 202
    /// let mut ch8 = Chip8::from_rom(&[0x00, 0xe0, 0x12, 0x02], Flags::default())?;
    /// assert!(ch8.frame([false; 16])?);
    /// assert!(!ch8.frame([false; 16])?);
    /// #    Ok(())
    /// # }
    /// ```
    pub fn frame(&mut self, keys: [bool; KEY_COUNT]) -> Result<bool> {
        let Chip8 { cpu, screen } = self;
        cpu.update_keys(keys);
        cpu.tick_timers();
        if cpu.flags.pause {
            cpu.tick(screen)?;
        } else {
            let ipf = cpu.flags.ipf;
            cpu.multistep(screen, ipf)?;
        }
        Ok(screen.take_dirty())
    }

    /// Resets the CPU, and blanks the screen
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.screen = Screen::default();
    }

    /// Returns true if the host should be playing a tone
    pub fn tone(&self) -> bool {
        self.cpu.tone()
    }
}

/// Common imports for chip8vm
pub mod prelude {
    pub use super::*;
    pub use cpu::{keypad, mem, stack};
}
