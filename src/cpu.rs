// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Decodes and runs instructions


pub mod behavior;
pub mod flags;
pub mod instruction;
pub mod keypad;
pub mod mem;
pub mod mode;
pub mod quirks;
pub mod stack;

use self::{
    flags::Flags,
    instruction::{
        disassembler::{Dis, Disassembler},
        Insn,
    },
    keypad::{Keypad, KEY_COUNT},
    mem::{Mem, Region::*, PROGRAM_START},
    mode::Mode,
    quirks::Quirks,
    stack::Stack,
};
use crate::{
    error::{Error, Halt, Result},
    screen::Screen,
};
use owo_colors::OwoColorize;
use rand::{rngs::StdRng, SeedableRng};
use std::{fmt::Debug, path::Path};

type Reg = usize;
/// A 16-bit address. Memory accesses only use the low 12 bits.
pub type Adr = u16;
type Nib = u8;

fn entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Represents the internal state of the CPU interpreter
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CPU {
    /// Flags that control how the CPU behaves, but which aren't inherent to the
    /// chip-8. Includes [Quirks], target IPF, etc.
    pub flags: Flags,
    // memory map info
    font: Adr,
    // memory
    mem: Mem,
    rom: Vec<u8>,
    stack: Stack,
    // registers
    pc: Adr,
    i: Adr,
    v: [u8; 16],
    delay: u8,
    sound: u8,
    tone: bool,
    // I/O
    keys: Keypad,
    // Execution data
    cycle: usize,
    halt: Option<Halt>,
    #[cfg_attr(feature = "serde", serde(skip))]
    disassembler: Dis,
    #[cfg_attr(feature = "serde", serde(skip, default = "entropy"))]
    rng: StdRng,
}

// public interface
impl CPU {
    /// Constructs a new CPU, loading the ROM at `rom` into program memory
    ///
    /// Returns [Error::RomUnreadable] if the file can't be read,
    /// or [Error::RomTooLarge] if it doesn't fit in memory.
    pub fn new(rom: impl AsRef<Path>, font: Adr, flags: Flags) -> Result<Self> {
        let mut cpu = CPU::with_font(font, flags);
        cpu.load_program(rom)?;
        Ok(cpu)
    }

    /// Constructs a new CPU with an empty program, and the font at `font`
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let cpu = CPU::with_font(0x050, Flags::default());
    /// assert_eq!(0x050, cpu.font());
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn with_font(font: Adr, flags: Flags) -> Self {
        CPU {
            font,
            mem: Mem::new(font),
            flags,
            ..Default::default()
        }
    }

    /// Constructs a new CPU from ROM bytes, with the default font location
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let cpu = CPU::from_rom(&[0x00, 0xe0], Flags::default())?;
    /// assert_eq!(Some(0x00e0), cpu.mem().read_word(0x200));
    /// assert!(CPU::from_rom(&[0; 0xe01], Flags::default()).is_err());
    /// #    Ok(())
    /// # }
    /// ```
    pub fn from_rom(rom: &[u8], flags: Flags) -> Result<Self> {
        let mut cpu = CPU {
            flags,
            ..Default::default()
        };
        cpu.load_program_bytes(rom)?;
        Ok(cpu)
    }

    /// Loads a program from disk into the CPU's program space, and resets the CPU
    pub fn load_program(&mut self, rom: impl AsRef<Path>) -> Result<&mut Self> {
        let path = rom.as_ref();
        let bytes = std::fs::read(path).map_err(|source| Error::RomUnreadable {
            path: path.to_owned(),
            source,
        })?;
        self.load_program_bytes(&bytes)
    }

    /// Loads bytes into the CPU's program space, and resets the CPU
    ///
    /// On [Error::RomTooLarge], the CPU is left as it was.
    pub fn load_program_bytes(&mut self, rom: &[u8]) -> Result<&mut Self> {
        Mem::new(self.font).load_region(Program, rom)?;
        self.rom = rom.to_vec();
        self.reset();
        Ok(self)
    }

    /// Resets the CPU to the state it was in right after loading the program.
    ///
    /// Memory is rebuilt from the font and the loaded ROM; stack, registers, timers, keys,
    /// cycle count, and halt state are cleared. Does not touch [Flags] beyond dropping a
    /// pending single-step request.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::from_rom(&[0x60, 0x42], Flags::default())?;
    /// let mut screen = Screen::new();
    /// cpu.tick(&mut screen)?;
    /// assert_eq!(0x42, cpu.v()[0]);
    /// cpu.reset();
    /// assert_eq!(0, cpu.v()[0]);
    /// assert_eq!(0x200, cpu.pc());
    /// #    Ok(())
    /// # }
    /// ```
    pub fn reset(&mut self) {
        self.mem = Mem::new(self.font);
        // the ROM was checked against the program region when it was loaded
        self.mem.load_region(Program, &self.rom).ok();
        self.stack.clear();
        self.pc = PROGRAM_START;
        self.i = 0;
        self.v = [0; 16];
        self.delay = 0;
        self.sound = 0;
        self.tone = false;
        self.keys = Keypad::default();
        self.cycle = 0;
        self.halt = None;
        self.flags.advance = false;
    }

    /// Reseeds the random number generator used by `Cxbb`
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Replaces the [Quirks] with a named [Mode] preset
    pub fn set_mode(&mut self, mode: Mode) -> &mut Self {
        self.flags.quirks = Quirks::from(mode);
        self
    }

    /// Takes this frame's keypad state. Call once per frame, before any [CPU::tick].
    ///
    /// The previous state is kept, so `Fx0A` can tell when a key was released.
    pub fn update_keys(&mut self, state: [bool; KEY_COUNT]) -> &mut Self {
        self.keys.update(state);
        self
    }

    /// Returns true if `key` is held this frame.
    /// If key is outside range `0..=0xF`, returns [Error::InvalidKey].
    pub fn is_held(&self, key: usize) -> Result<bool> {
        if key < KEY_COUNT {
            Ok(self.keys.is_held(key))
        } else {
            Err(Error::InvalidKey { key })
        }
    }

    /// Decrements the delay and sound timers, then updates the tone signal.
    ///
    /// Call at 60Hz, independently of the instruction rate.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// // ld v0, #02; ld ST, v0
    /// let mut cpu = CPU::from_rom(&[0x60, 0x02, 0xf0, 0x18], Flags::default())?;
    /// cpu.multistep(&mut Screen::new(), 2)?;
    /// cpu.tick_timers();
    /// assert_eq!((1, true), (cpu.sound(), cpu.tone()));
    /// cpu.tick_timers();
    /// assert_eq!((0, false), (cpu.sound(), cpu.tone()));
    /// #    Ok(())
    /// # }
    /// ```
    pub fn tick_timers(&mut self) -> &mut Self {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
        self.tone = self.sound > 0;
        self
    }

    /// Sets a general purpose register in the CPU.
    /// If the register doesn't exist, returns [Error::InvalidRegister]
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.set_v(0x4, 0x41).unwrap();
    /// assert_eq!(0x41, cpu.v()[4]);
    /// assert!(cpu.set_v(0x10, 0x41).is_err());
    /// ```
    pub fn set_v(&mut self, reg: Reg, value: u8) -> Result<()> {
        if let Some(gpr) = self.v.get_mut(reg) {
            *gpr = value;
            Ok(())
        } else {
            Err(Error::InvalidRegister { reg })
        }
    }

    /// Gets a slice of the entire general purpose registers
    pub fn v(&self) -> &[u8] {
        self.v.as_slice()
    }

    /// Gets the program counter
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let cpu = CPU::default();
    /// assert_eq!(0x200, cpu.pc());
    /// ```
    pub fn pc(&self) -> Adr {
        self.pc
    }

    /// Gets the I register
    pub fn i(&self) -> Adr {
        self.i
    }

    /// Gets the stack pointer (the number of return addresses on the stack)
    pub fn sp(&self) -> usize {
        self.stack.len()
    }

    /// Gets the live portion of the call stack, oldest first
    pub fn stack(&self) -> &[Adr] {
        self.stack.as_slice()
    }

    /// Gets the value in the Sound Timer register
    pub fn sound(&self) -> u8 {
        self.sound
    }

    /// Gets the value in the Delay Timer register
    pub fn delay(&self) -> u8 {
        self.delay
    }

    /// Returns true if the host should be playing a tone
    pub fn tone(&self) -> bool {
        self.tone
    }

    /// Gets the location of the font in memory
    pub fn font(&self) -> Adr {
        self.font
    }

    /// Gets the CPU's memory
    pub fn mem(&self) -> &Mem {
        &self.mem
    }

    /// Gets the keypad state
    pub fn keys(&self) -> &Keypad {
        &self.keys
    }

    /// Gets the number of cycles the CPU has executed
    pub fn cycle(&self) -> usize {
        self.cycle
    }

    /// Gets the reason the CPU halted, if it has
    pub fn halted(&self) -> Option<Halt> {
        self.halt
    }

    /// Returns true if the CPU hasn't halted
    pub fn is_running(&self) -> bool {
        self.halt.is_none()
    }

    /// Unpauses the emulator for a single tick,
    /// even if cpu.flags.pause is set.
    ///
    /// Like with [CPU::tick], this returns [Error::Halted]
    /// if the instruction halted the CPU.
    ///
    /// NOTE: does not synchronize with delay timers
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::from_rom(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ], Flags::default())?;
    /// cpu.flags.pause = true;
    /// cpu.singlestep(&mut Screen::new())?;
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// #    Ok(())
    /// # }
    /// ```
    pub fn singlestep(&mut self, screen: &mut Screen) -> Result<&mut Self> {
        self.flags.advance();
        self.tick(screen)
    }

    /// Executes up to `steps` instructions
    ///
    /// Stops early if the CPU halts. Does not tick the timers.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::from_rom(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ], Flags::default())?;
    /// cpu.multistep(&mut Screen::new(), 0x20)?;
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(0x20, cpu.cycle());
    /// #    Ok(())
    /// # }
    /// ```
    pub fn multistep(&mut self, screen: &mut Screen, steps: usize) -> Result<&mut Self> {
        for _ in 0..steps {
            if !self.is_running() {
                break;
            }
            self.tick(screen)?;
        }
        Ok(self)
    }

    /// Reads the instruction word at pc, and advances pc past it
    ///
    /// Returns [Halt::FetchOutOfBounds] if the word isn't entirely in memory.
    pub(super) fn fetch(&mut self) -> std::result::Result<u16, Halt> {
        let word = self
            .mem
            .read_word(self.pc)
            .ok_or(Halt::FetchOutOfBounds { addr: self.pc })?;
        self.pc = self.pc.wrapping_add(2);
        Ok(word)
    }

    /// Executes a single instruction
    ///
    /// Does nothing if the CPU is halted, or paused without a pending [Flags::advance] request.
    ///
    /// Returns [Error::Halted] on the cycle where the CPU halts.
    /// Unrecognized instructions halt only if [Flags::halt_on_unknown] is set,
    /// and are otherwise logged and skipped.
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// # fn main() -> Result<()> {
    /// let mut cpu = CPU::from_rom(&[
    ///     0x00, 0xe0, // cls
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ], Flags::default())?;
    /// cpu.tick(&mut Screen::new())?;
    /// assert_eq!(0x202, cpu.pc());
    /// assert_eq!(1, cpu.cycle());
    /// #    Ok(())
    /// # }
    /// ```
    /// Returns [Error::Halted] if the instruction is not implemented.
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::from_rom(&[
    ///     0xff, 0xff, // invalid!
    ///     0x12, 0x02, // jump 0x202 (pc)
    /// ], Flags::default()).unwrap();
    /// cpu.tick(&mut Screen::new())
    ///     .expect_err("Should return Error::Halted(UnknownOpcode)");
    /// assert!(!cpu.is_running());
    /// ```
    pub fn tick(&mut self, screen: &mut Screen) -> Result<&mut Self> {
        if self.halt.is_some() || self.flags.is_paused() {
            return Ok(self);
        }
        self.flags.advance = false;
        self.cycle += 1;

        let addr = self.pc;
        let word = match self.fetch() {
            Ok(word) => word,
            Err(halt) => return Err(self.halt(halt)),
        };

        // Print opcode disassembly:
        if self.flags.debug {
            log::debug!(
                "{:3} {:03x}: {:<36}",
                self.cycle.bright_black(),
                addr,
                self.disassembler.once(word)
            );
        }

        match Insn::from_word(word) {
            Some(insn) => {
                if let Err(halt) = self.execute(screen, insn) {
                    return Err(self.halt(halt));
                }
            }
            None => {
                let unknown = Halt::UnknownOpcode { addr, word };
                if self.flags.halt_on_unknown {
                    return Err(self.halt(unknown));
                }
                log::warn!("{unknown}, skipping");
            }
        }
        Ok(self)
    }

    /// Dumps the current state of all CPU registers, and the cycle count
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// cpu.dump();
    /// ```
    /// outputs
    /// ```text
    /// PC: 0200, SP: 00, I: 0000
    /// v0: 00 v1: 00 v2: 00 v3: 00
    /// v4: 00 v5: 00 v6: 00 v7: 00
    /// v8: 00 v9: 00 vA: 00 vB: 00
    /// vC: 00 vD: 00 vE: 00 vF: 00
    /// DLY: 0, SND: 0, CYC:      0
    /// ```
    pub fn dump(&self) {
        std::println!(
            "PC: {:04x}, SP: {:02x}, I: {:04x}\n{}DLY: {}, SND: {}, CYC: {:6}",
            self.pc,
            self.stack.len(),
            self.i,
            self.v
                .into_iter()
                .enumerate()
                .map(|(i, gpr)| {
                    format!(
                        "v{i:X}: {gpr:02x} {}",
                        match i % 4 {
                            3 => "\n",
                            _ => "",
                        }
                    )
                })
                .collect::<String>(),
            self.delay,
            self.sound,
            self.cycle,
        );
        if let Some(halt) = self.halt {
            std::println!("{}", format_args!("halted: {halt}").bold().red());
        }
    }
}

// private interface
impl CPU {
    /// Moves the CPU into the halted state, and returns the [Error] to report
    fn halt(&mut self, halt: Halt) -> Error {
        log::error!("halted: {halt}");
        self.halt = Some(halt);
        halt.into()
    }
}

impl PartialEq for CPU {
    /// Compares all machine and control state. The random number generator is ignored.
    fn eq(&self, other: &Self) -> bool {
        self.flags == other.flags
            && self.font == other.font
            && self.mem == other.mem
            && self.rom == other.rom
            && self.stack == other.stack
            && self.pc == other.pc
            && self.i == other.i
            && self.v == other.v
            && self.delay == other.delay
            && self.sound == other.sound
            && self.tone == other.tone
            && self.keys == other.keys
            && self.cycle == other.cycle
            && self.halt == other.halt
            && self.disassembler == other.disassembler
    }
}

impl Debug for CPU {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CPU")
            .field("flags", &self.flags)
            .field("font", &self.font)
            .field("stack", &self.stack)
            .field("pc", &self.pc)
            .field("i", &self.i)
            .field("v", &self.v)
            .field("delay", &self.delay)
            .field("sound", &self.sound)
            .field("tone", &self.tone)
            .field("keys", &self.keys)
            .field("cycle", &self.cycle)
            .field("halt", &self.halt)
            .field("disassembler", &self.disassembler)
            .finish_non_exhaustive()
    }
}

impl Default for CPU {
    /// Constructs a new CPU with sane defaults
    ///
    /// | value  | default | description
    /// |--------|---------|------------
    /// | font   |`0x0000` | Location of font memory.
    /// | pc     |`0x0200` | Start location.
    /// | rom    | empty   | Program memory is zeroed.
    ///
    /// # Examples
    /// ```rust
    /// use chip8vm::*;
    /// let mut cpu = CPU::default();
    /// ```
    fn default() -> Self {
        CPU {
            flags: Flags::default(),
            font: 0x000,
            mem: Mem::new(0x000),
            rom: vec![],
            stack: Stack::default(),
            pc: PROGRAM_START,
            i: 0,
            v: [0; 16],
            delay: 0,
            sound: 0,
            tone: false,
            keys: Keypad::default(),
            cycle: 0,
            halt: None,
            disassembler: Dis::default(),
            rng: entropy(),
        }
    }
}
