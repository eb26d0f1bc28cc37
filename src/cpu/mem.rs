// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The Mem represents the CPU's memory
//!
//! Contains some handy utils for reading and writing

use super::Adr;
use crate::error::{Error, Result};
use std::{
    fmt::{Display, Formatter},
    ops::Range,
    slice::SliceIndex,
};

/// Size of the Chip-8 address space, in bytes
pub const MEM_SIZE: usize = 0x1000;
/// Address at which programs are loaded
pub const PROGRAM_START: Adr = 0x200;
/// Largest ROM that fits in program memory
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PROGRAM_START as usize;

/// The built-in hexadecimal font: sixteen 4x5 glyphs, 5 bytes each
#[rustfmt::skip]
pub const FONT: [u8; 80] = [
    0xf0, 0x90, 0x90, 0x90, 0xf0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xf0, 0x10, 0xf0, 0x80, 0xf0, // 2
    0xf0, 0x10, 0xf0, 0x10, 0xf0, // 3
    0x90, 0x90, 0xf0, 0x10, 0x10, // 4
    0xf0, 0x80, 0xf0, 0x10, 0xf0, // 5
    0xf0, 0x80, 0xf0, 0x90, 0xf0, // 6
    0xf0, 0x10, 0x20, 0x40, 0x40, // 7
    0xf0, 0x90, 0xf0, 0x90, 0xf0, // 8
    0xf0, 0x90, 0xf0, 0x10, 0xf0, // 9
    0xf0, 0x90, 0xf0, 0x90, 0x90, // A
    0xe0, 0x90, 0xe0, 0x90, 0xe0, // B
    0xf0, 0x80, 0x80, 0x80, 0xf0, // C
    0xe0, 0x90, 0x90, 0x90, 0xe0, // D
    0xf0, 0x80, 0xf0, 0x80, 0xf0, // E
    0xf0, 0x80, 0xf0, 0x80, 0x80, // F
];

/// Represents a named region in memory
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// Character ROM (but writable!)
    Charset,
    /// Program memory
    Program,
    #[doc(hidden)]
    /// Total number of named regions
    Count,
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Region::Charset => "Charset",
                Region::Program => "Program",
                _ => "",
            }
        )
    }
}

/// The 4 KiB memory image, split into named [Region]s
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mem {
    memory: Vec<u8>,
    region: [Option<Range<usize>>; Region::Count as usize],
}

impl Default for Mem {
    /// Constructs a [Mem] with the font at `0x000`
    fn default() -> Self {
        Mem::new(0x000)
    }
}

impl Mem {
    /// Constructs a zeroed 4 KiB memory image with the font loaded at `font`
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mem = Mem::new(0x050);
    /// assert_eq!(0x1000, mem.len());
    /// assert_eq!(&FONT[..], mem.get_region(Charset).unwrap());
    /// ```
    pub fn new(font: Adr) -> Self {
        let start = (font as usize) % MEM_SIZE;
        let end = (start + FONT.len()).min(MEM_SIZE);
        let mut mem = Mem {
            memory: vec![0; MEM_SIZE],
            region: [Some(start..end), Some(PROGRAM_START as usize..MEM_SIZE)],
        };
        if let Some(charset) = mem.get_region_mut(Region::Charset) {
            charset.copy_from_slice(&FONT[..charset.len()]);
        }
        mem
    }

    /// Gets the length of the backing memory
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Returns true if the backing memory contains no elements
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Gets a slice of [Mem] memory
    #[inline(always)]
    pub fn get<I>(&self, index: I) -> Option<&<I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get(index)
    }

    /// Gets a mutable slice of [Mem] memory
    #[inline(always)]
    pub fn get_mut<I>(&mut self, index: I) -> Option<&mut <I as SliceIndex<[u8]>>::Output>
    where
        I: SliceIndex<[u8]>,
    {
        self.memory.get_mut(index)
    }

    /// Gets the address range of a named [Region]
    pub fn range(&self, name: Region) -> Option<Range<usize>> {
        self.region.get(name as usize)?.clone()
    }

    /// Gets a slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region(&self, name: Region) -> Option<&[u8]> {
        self.get(self.range(name)?)
    }

    /// Gets a mutable slice of a named [Region] of memory
    #[inline(always)]
    pub fn get_region_mut(&mut self, name: Region) -> Option<&mut [u8]> {
        let range = self.range(name)?;
        self.get_mut(range)
    }

    /// Loads data into the start of a named [Region].
    ///
    /// Returns [Error::RomTooLarge] if the data doesn't fit, leaving the region untouched.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::default();
    /// mem.load_region(Program, b"Hello, world!")?;
    /// assert_eq!(b"Hello", &mem.get_region(Program).unwrap()[..5]);
    /// assert!(mem.load_region(Program, &[0; 0x1000]).is_err());
    /// #    Ok(())
    /// # }
    /// ```
    pub fn load_region(&mut self, name: Region, data: &[u8]) -> Result<&mut Self> {
        if let Some(region) = self.get_region_mut(name) {
            if data.len() > region.len() {
                return Err(Error::RomTooLarge {
                    size: data.len(),
                    max: region.len(),
                });
            }
            region[..data.len()].copy_from_slice(data);
        }
        Ok(self)
    }

    /// Reads a byte. The address is wrapped to 12 bits.
    #[inline(always)]
    pub fn read(&self, addr: Adr) -> u8 {
        self.memory[addr as usize % MEM_SIZE]
    }

    /// Writes a byte. The address is wrapped to 12 bits.
    #[inline(always)]
    pub fn write(&mut self, addr: Adr, data: u8) {
        self.memory[addr as usize % MEM_SIZE] = data;
    }

    /// Reads a big-endian word, or [None] if it would run past the end of memory
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let mut mem = Mem::default();
    /// mem.load_region(Program, &[0x12, 0x34])?;
    /// assert_eq!(Some(0x1234), mem.read_word(0x200));
    /// assert_eq!(None, mem.read_word(0xfff));
    /// #    Ok(())
    /// # }
    /// ```
    pub fn read_word(&self, addr: Adr) -> Option<u16> {
        let addr = addr as usize;
        let bytes = self.get(addr..addr.checked_add(2)?)?;
        Some(u16::from_be_bytes([bytes[0], bytes[1]]))
    }
}
