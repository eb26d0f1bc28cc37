// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Error types for chip8vm

use std::path::PathBuf;
use thiserror::Error;

/// Result type, equivalent to [std::result::Result]<T, [enum@Error]>
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for chip8vm.
#[derive(Debug, Error)]
pub enum Error {
    /// The ROM does not fit in program memory
    #[error("rom is {size} bytes, but only {max} bytes fit in program memory")]
    RomTooLarge {
        /// Size of the offending ROM
        size: usize,
        /// Size of the program region
        max: usize,
    },
    /// The ROM could not be read from disk
    #[error("could not read rom {path:?}: {source}")]
    RomUnreadable {
        /// Where we looked for the ROM
        path: PathBuf,
        /// What went wrong
        source: std::io::Error,
    },
    /// The interpreter stopped. See [Halt] for the reason.
    #[error(transparent)]
    Halted(#[from] Halt),
    /// Tried to query a key that doesn't exist
    #[error("tried to access key {key:X} which does not exist")]
    InvalidKey {
        /// The offending key
        key: usize,
    },
    /// Tried to get/set an out-of-bounds register
    #[error("tried to access register v{reg:X} which does not exist")]
    InvalidRegister {
        /// The offending register
        reg: usize,
    },
    /// Tried to convert string into mode, but it did not match.
    #[error("no suitable conversion of \"{mode}\" into Mode")]
    InvalidMode {
        /// The string which failed to become a mode
        mode: String,
    },
}

/// The reason a [CPU](crate::cpu::CPU) stopped executing.
///
/// Every variant is terminal. A halted CPU does nothing until it is
/// [reset](crate::cpu::CPU::reset) or reloaded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Halt {
    /// `2nnn` was executed with a full call stack
    #[error("stack overflow at {addr:03x} ({word:04x})")]
    StackOverflow {
        /// Address of the offending instruction
        addr: u16,
        /// The offending word
        word: u16,
    },
    /// `00ee` was executed with an empty call stack
    #[error("stack underflow at {addr:03x} ({word:04x})")]
    StackUnderflow {
        /// Address of the offending instruction
        addr: u16,
        /// The offending word
        word: u16,
    },
    /// The word at `addr` is not a Chip-8 instruction
    #[error("opcode {word:04x} at {addr:03x} not recognized")]
    UnknownOpcode {
        /// Address of the offending instruction
        addr: u16,
        /// The offending word
        word: u16,
    },
    /// The program counter ran off the end of memory
    #[error("tried to fetch an instruction at {addr:04x}, outside of memory")]
    FetchOutOfBounds {
        /// The program counter at the time of the fetch
        addr: u16,
    },
}
