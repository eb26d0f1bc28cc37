// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)
#![allow(clippy::bad_bit_mask)]
//! Contains the definition of a Chip-8 [Insn]
//!
//! Decoding is derived by imperative_rs: lowercase hex digits in an `opcode` pattern are
//! matched exactly, and every other letter captures the field of the same name.

pub mod disassembler;

use imperative_rs::InstructionSet;
use std::fmt::Display;

/// A decoded Chip-8 instruction
#[allow(non_snake_case)]
#[derive(Clone, Copy, Debug, InstructionSet, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Insn {
    /// | 00e0 | Clear screen memory to 0s
    #[opcode = "0x00e0"]
    Clear,
    /// | 00ee | Return from subroutine
    #[opcode = "0x00ee"]
    Return,
    /// | 1aaa | Jumps to an absolute address
    #[opcode = "0x1AAA"]
    Jump { A: u16 },
    /// | 2aaa | Pushes pc onto the stack, then jumps to a
    #[opcode = "0x2AAA"]
    Call { A: u16 },
    /// | 3xbb | Skips next instruction if register X == b
    #[opcode = "0x3xBB"]
    SkipEqImm { x: usize, B: u8 },
    /// | 4xbb | Skips next instruction if register X != b
    #[opcode = "0x4xBB"]
    SkipNeImm { x: usize, B: u8 },
    /// | 5xy0 | Skips next instruction if vX == vY
    #[opcode = "0x5xy0"]
    SkipEq { x: usize, y: usize },
    /// | 6xbb | Loads immediate byte b into register vX
    #[opcode = "0x6xBB"]
    LoadImm { x: usize, B: u8 },
    /// | 7xbb | Adds immediate byte b to register vX, without carry
    #[opcode = "0x7xBB"]
    AddImm { x: usize, B: u8 },
    /// | 8xy0 | Loads the value of vY into vX
    #[opcode = "0x8xy0"]
    Load { x: usize, y: usize },
    /// | 8xy1 | vX |= vY
    #[opcode = "0x8xy1"]
    Or { x: usize, y: usize },
    /// | 8xy2 | vX &= vY
    #[opcode = "0x8xy2"]
    And { x: usize, y: usize },
    /// | 8xy3 | vX ^= vY
    #[opcode = "0x8xy3"]
    Xor { x: usize, y: usize },
    /// | 8xy4 | vX += vY, vF = carry
    #[opcode = "0x8xy4"]
    Add { x: usize, y: usize },
    /// | 8xy5 | vX -= vY, vF = !borrow
    #[opcode = "0x8xy5"]
    Sub { x: usize, y: usize },
    /// | 8xy6 | vX = vY >> 1, vF = shifted-out bit
    #[opcode = "0x8xy6"]
    ShiftRight { x: usize, y: usize },
    /// | 8xy7 | vX = vY - vX, vF = !borrow
    #[opcode = "0x8xy7"]
    SubReverse { x: usize, y: usize },
    /// | 8xyE | vX = vY << 1, vF = shifted-out bit
    #[opcode = "0x8xye"]
    ShiftLeft { x: usize, y: usize },
    /// | 9xy0 | Skips next instruction if vX != vY
    #[opcode = "0x9xy0"]
    SkipNe { x: usize, y: usize },
    /// | Aaaa | Load address a into register I
    #[opcode = "0xaAAA"]
    LoadI { A: u16 },
    /// | Baaa | Jump to a + v0
    #[opcode = "0xbAAA"]
    JumpIndexed { A: u16 },
    /// | Cxbb | Stores a random number & b into vX
    #[opcode = "0xcxBB"]
    Random { x: usize, B: u8 },
    /// | Dxyn | Draws n-byte sprite to the screen at coordinates (vX, vY)
    #[opcode = "0xdxyn"]
    Draw { x: usize, y: usize, n: u8 },
    /// | Ex9E | Skips next instruction if key vX is held
    #[opcode = "0xex9e"]
    SkipKey { x: usize },
    /// | ExA1 | Skips next instruction if key vX is not held
    #[opcode = "0xexa1"]
    SkipNotKey { x: usize },
    /// | Fx07 | vX = delay timer
    #[opcode = "0xfx07"]
    GetDelay { x: usize },
    /// | Fx0A | Wait for a key to be released, and store it in vX
    #[opcode = "0xfx0a"]
    WaitKey { x: usize },
    /// | Fx15 | delay timer = vX
    #[opcode = "0xfx15"]
    SetDelay { x: usize },
    /// | Fx18 | sound timer = vX
    #[opcode = "0xfx18"]
    SetSound { x: usize },
    /// | Fx1E | I += vX
    #[opcode = "0xfx1e"]
    AddI { x: usize },
    /// | Fx29 | Point I at the font glyph for vX
    #[opcode = "0xfx29"]
    Font { x: usize },
    /// | Fx33 | BCD convert vX into I[0..3]
    #[opcode = "0xfx33"]
    Bcd { x: usize },
    /// | Fx55 | Store v0..=vX at I
    #[opcode = "0xfx55"]
    Store { x: usize },
    /// | Fx65 | Load v0..=vX from I
    #[opcode = "0xfx65"]
    Restore { x: usize },
}

impl Insn {
    /// Decodes a single instruction word, or [None] if the word isn't an instruction
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// assert_eq!(Some(Insn::Jump { A: 0x234 }), Insn::from_word(0x1234));
    /// assert_eq!(None, Insn::from_word(0x5121));
    /// ```
    pub fn from_word(word: u16) -> Option<Self> {
        Insn::decode(&word.to_be_bytes()).ok().map(|(_, insn)| insn)
    }
}

impl Display for Insn {
    #[rustfmt::skip]
    #[allow(non_snake_case)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insn::Clear                 => write!(f, "cls"),
            Insn::Return                => write!(f, "ret"),
            Insn::Jump { A }            => write!(f, "jp     {A:03x}"),
            Insn::Call { A }            => write!(f, "call   {A:03x}"),
            Insn::SkipEqImm { x, B }    => write!(f, "se     v{x:X}, #{B:02x}"),
            Insn::SkipNeImm { x, B }    => write!(f, "sne    v{x:X}, #{B:02x}"),
            Insn::SkipEq { x, y }       => write!(f, "se     v{x:X}, v{y:X}"),
            Insn::LoadImm { x, B }      => write!(f, "ld     v{x:X}, #{B:02x}"),
            Insn::AddImm { x, B }       => write!(f, "add    v{x:X}, #{B:02x}"),
            Insn::Load { x, y }         => write!(f, "ld     v{x:X}, v{y:X}"),
            Insn::Or { x, y }           => write!(f, "or     v{x:X}, v{y:X}"),
            Insn::And { x, y }          => write!(f, "and    v{x:X}, v{y:X}"),
            Insn::Xor { x, y }          => write!(f, "xor    v{x:X}, v{y:X}"),
            Insn::Add { x, y }          => write!(f, "add    v{x:X}, v{y:X}"),
            Insn::Sub { x, y }          => write!(f, "sub    v{x:X}, v{y:X}"),
            Insn::ShiftRight { x, y }   => write!(f, "shr    v{x:X}, v{y:X}"),
            Insn::SubReverse { x, y }   => write!(f, "subn   v{x:X}, v{y:X}"),
            Insn::ShiftLeft { x, y }    => write!(f, "shl    v{x:X}, v{y:X}"),
            Insn::SkipNe { x, y }       => write!(f, "sne    v{x:X}, v{y:X}"),
            Insn::LoadI { A }           => write!(f, "ld     I, {A:03x}"),
            Insn::JumpIndexed { A }     => write!(f, "jp     v0, {A:03x}"),
            Insn::Random { x, B }       => write!(f, "rnd    v{x:X}, #{B:02x}"),
            Insn::Draw { x, y, n }      => write!(f, "drw    v{x:X}, v{y:X}, #{n:x}"),
            Insn::SkipKey { x }         => write!(f, "skp    v{x:X}"),
            Insn::SkipNotKey { x }      => write!(f, "sknp   v{x:X}"),
            Insn::GetDelay { x }        => write!(f, "ld     v{x:X}, DT"),
            Insn::WaitKey { x }         => write!(f, "ld     v{x:X}, K"),
            Insn::SetDelay { x }        => write!(f, "ld     DT, v{x:X}"),
            Insn::SetSound { x }        => write!(f, "ld     ST, v{x:X}"),
            Insn::AddI { x }            => write!(f, "add    I, v{x:X}"),
            Insn::Font { x }            => write!(f, "ld     F, v{x:X}"),
            Insn::Bcd { x }             => write!(f, "ld     B, v{x:X}"),
            Insn::Store { x }           => write!(f, "ld     [I], v{x:X}"),
            Insn::Restore { x }         => write!(f, "ld     v{x:X}, [I]"),
        }
    }
}
