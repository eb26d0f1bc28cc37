// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 [Insn]
//!
//! Handlers are grouped by what they touch. Each one runs with pc already
//! pointing past its own instruction.

use super::*;
use crate::screen::{HEIGHT, WIDTH};
use rand::Rng;

impl CPU {
    /// Dispatches a decoded [Insn] to its handler
    #[rustfmt::skip]
    #[allow(non_snake_case)]
    #[inline(always)]
    pub(super) fn execute(&mut self, screen: &mut Screen, instruction: Insn) -> std::result::Result<(), Halt> {
        match instruction {
            // flow control
            Insn::Clear                 => self.clear_screen(screen),
            Insn::Return                => self.ret()?,
            Insn::Jump        {    A  } => self.jump(A),
            Insn::Call        {    A  } => self.call(A)?,
            Insn::JumpIndexed {    A  } => self.jump_indexed(A),
            // skips
            Insn::SkipEqImm   { x, B  } => self.skip_equals_immediate(x, B),
            Insn::SkipNeImm   { x, B  } => self.skip_not_equals_immediate(x, B),
            Insn::SkipEq      { x, y  } => self.skip_equals(x, y),
            Insn::SkipNe      { x, y  } => self.skip_not_equals(x, y),
            Insn::SkipKey     { x     } => self.skip_key_equals(x),
            Insn::SkipNotKey  { x     } => self.skip_key_not_equals(x),
            // registers
            Insn::LoadImm     { x, B  } => self.load_immediate(x, B),
            Insn::AddImm      { x, B  } => self.add_immediate(x, B),
            Insn::Load        { x, y  } => self.load(x, y),
            Insn::Or          { x, y  } => self.or(x, y),
            Insn::And         { x, y  } => self.and(x, y),
            Insn::Xor         { x, y  } => self.xor(x, y),
            Insn::Add         { x, y  } => self.add(x, y),
            Insn::Sub         { x, y  } => self.sub(x, y),
            Insn::ShiftRight  { x, y  } => self.shift_right(x, y),
            Insn::SubReverse  { x, y  } => self.backwards_sub(x, y),
            Insn::ShiftLeft   { x, y  } => self.shift_left(x, y),
            Insn::Random      { x, B  } => self.rand(x, B),
            // I and memory
            Insn::LoadI       {    A  } => self.load_i_immediate(A),
            Insn::AddI        { x     } => self.add_i(x),
            Insn::Font        { x     } => self.load_sprite(x),
            Insn::Bcd         { x     } => self.bcd_convert(x),
            Insn::Store       { x     } => self.store_dma(x),
            Insn::Restore     { x     } => self.load_dma(x),
            // timers, keys, and the screen
            Insn::GetDelay    { x     } => self.load_delay_timer(x),
            Insn::SetDelay    { x     } => self.store_delay_timer(x),
            Insn::SetSound    { x     } => self.store_sound_timer(x),
            Insn::WaitKey     { x     } => self.wait_for_key(x),
            Insn::Draw     { x, y, n  } => self.draw(x, y, n, screen),
        }
        Ok(())
    }
}

/// Flow control
///
/// |opcode| effect                                  |
/// |------|-----------------------------------------|
/// |`00e0`| Blank the screen                        |
/// |`00ee`| Pop a return address into pc            |
/// |`1nnn`| pc = nnn                                |
/// |`2nnn`| Push pc, then pc = nnn                  |
/// |`Bnnn`| pc = nnn + v0                           |
impl CPU {
    /// |`00e0`| Turns every pixel off
    #[inline(always)]
    pub(super) fn clear_screen(&mut self, screen: &mut Screen) {
        screen.clear();
    }

    /// |`00ee`| Pops the top of the stack into pc
    ///
    /// An empty stack halts with [Halt::StackUnderflow]
    #[inline(always)]
    pub(super) fn ret(&mut self) -> std::result::Result<(), Halt> {
        let Some(addr) = self.stack.pop() else {
            return Err(Halt::StackUnderflow {
                addr: self.pc.wrapping_sub(2),
                word: 0x00ee,
            });
        };
        self.pc = addr;
        Ok(())
    }

    /// |`1nnn`| Jumps to an absolute address
    #[inline(always)]
    pub(super) fn jump(&mut self, a: Adr) {
        self.pc = a;
    }

    /// |`2nnn`| Saves the return address, then jumps
    ///
    /// A full stack halts with [Halt::StackOverflow], and pc stays put
    #[inline(always)]
    pub(super) fn call(&mut self, a: Adr) -> std::result::Result<(), Halt> {
        if self.stack.push(self.pc).is_none() {
            return Err(Halt::StackOverflow {
                addr: self.pc.wrapping_sub(2),
                word: 0x2000 | a,
            });
        }
        self.pc = a;
        Ok(())
    }

    /// |`Bnnn`| Jumps to nnn, offset by v0
    ///
    /// # Quirk
    /// [Quirks::jump_vx] offsets by vX instead, where X is the top nibble of nnn.
    #[inline(always)]
    pub(super) fn jump_indexed(&mut self, a: Adr) {
        let reg: Reg = match self.flags.quirks.jump_vx {
            true => (a >> 8) as Reg & 0xf,
            false => 0,
        };
        self.pc = a.wrapping_add(self.v[reg] as Adr);
    }
}

/// Conditional skips. Skipping moves pc over exactly one more word.
///
/// |opcode| skips when           |
/// |------|----------------------|
/// |`3xkk`| vX == kk             |
/// |`4xkk`| vX != kk             |
/// |`5xy0`| vX == vY             |
/// |`9xy0`| vX != vY             |
/// |`Ex9E`| key vX is held       |
/// |`ExA1`| key vX is not held   |
impl CPU {
    #[inline(always)]
    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.pc = self.pc.wrapping_add(2);
        }
    }

    #[inline(always)]
    pub(super) fn skip_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] == b);
    }

    #[inline(always)]
    pub(super) fn skip_not_equals_immediate(&mut self, x: Reg, b: u8) {
        self.skip_if(self.v[x] != b);
    }

    #[inline(always)]
    pub(super) fn skip_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] == self.v[y]);
    }

    #[inline(always)]
    pub(super) fn skip_not_equals(&mut self, x: Reg, y: Reg) {
        self.skip_if(self.v[x] != self.v[y]);
    }

    /// |`Ex9E`| Only the low nibble of vX picks the key
    #[inline(always)]
    pub(super) fn skip_key_equals(&mut self, x: Reg) {
        self.skip_if(self.keys.is_held(self.v[x] as usize & 0xf));
    }

    /// |`ExA1`| Only the low nibble of vX picks the key
    #[inline(always)]
    pub(super) fn skip_key_not_equals(&mut self, x: Reg) {
        self.skip_if(!self.keys.is_held(self.v[x] as usize & 0xf));
    }
}

/// Register loads and arithmetic
///
/// |opcode| effect                              |
/// |------|-------------------------------------|
/// |`6xkk`| vX = kk                             |
/// |`7xkk`| vX += kk, vF untouched              |
/// |`8xy0`| vX = vY                             |
/// |`8xy1`| vX \|= vY                           |
/// |`8xy2`| vX &= vY                            |
/// |`8xy3`| vX ^= vY                            |
/// |`8xy4`| vX += vY; vF = carry                |
/// |`8xy5`| vX -= vY; vF = no borrow            |
/// |`8xy6`| vX = vY >> 1; vF = bit shifted out  |
/// |`8xy7`| vX = vY - vX; vF = no borrow        |
/// |`8xyE`| vX = vY << 1; vF = bit shifted out  |
/// |`Cxkk`| vX = random & kk                    |
///
/// Flag-setting ops write vX first and vF last, so with X = F only the flag is kept.
impl CPU {
    #[inline(always)]
    pub(super) fn load_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = b;
    }

    #[inline(always)]
    pub(super) fn add_immediate(&mut self, x: Reg, b: u8) {
        self.v[x] = self.v[x].wrapping_add(b);
    }

    #[inline(always)]
    pub(super) fn load(&mut self, x: Reg, y: Reg) {
        self.v[x] = self.v[y];
    }

    /// |`8xy1`|
    ///
    /// # Quirk
    /// vF is cleared afterwards, unless [Quirks::bin_ops] is set.
    #[inline(always)]
    pub(super) fn or(&mut self, x: Reg, y: Reg) {
        self.v[x] |= self.v[y];
        self.reset_vf();
    }

    /// |`8xy2`|
    ///
    /// # Quirk
    /// vF is cleared afterwards, unless [Quirks::bin_ops] is set.
    #[inline(always)]
    pub(super) fn and(&mut self, x: Reg, y: Reg) {
        self.v[x] &= self.v[y];
        self.reset_vf();
    }

    /// |`8xy3`|
    ///
    /// # Quirk
    /// vF is cleared afterwards, unless [Quirks::bin_ops] is set.
    #[inline(always)]
    pub(super) fn xor(&mut self, x: Reg, y: Reg) {
        self.v[x] ^= self.v[y];
        self.reset_vf();
    }

    #[inline(always)]
    pub(super) fn add(&mut self, x: Reg, y: Reg) {
        let (sum, carry) = self.v[x].overflowing_add(self.v[y]);
        self.v[x] = sum;
        self.v[0xf] = carry as u8;
    }

    /// |`8xy5`| vF = 1 when vX >= vY
    ///
    /// # Quirk
    /// [Quirks::sub_strict] needs vX > vY instead.
    #[inline(always)]
    pub(super) fn sub(&mut self, x: Reg, y: Reg) {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[x] = vx.wrapping_sub(vy);
        self.v[0xf] = self.no_borrow(vx, vy) as u8;
    }

    /// |`8xy7`| vF = 1 when vY >= vX
    ///
    /// # Quirk
    /// [Quirks::sub_strict] needs vY > vX instead.
    #[inline(always)]
    pub(super) fn backwards_sub(&mut self, x: Reg, y: Reg) {
        let (vx, vy) = (self.v[x], self.v[y]);
        self.v[x] = vy.wrapping_sub(vx);
        self.v[0xf] = self.no_borrow(vy, vx) as u8;
    }

    /// |`8xy6`|
    ///
    /// # Quirk
    /// [Quirks::shift] shifts vX in place, ignoring vY.
    #[inline(always)]
    pub(super) fn shift_right(&mut self, x: Reg, y: Reg) {
        let value = self.v[self.shift_source(x, y)];
        self.v[x] = value >> 1;
        self.v[0xf] = value & 1;
    }

    /// |`8xyE`|
    ///
    /// # Quirk
    /// [Quirks::shift] shifts vX in place, ignoring vY.
    #[inline(always)]
    pub(super) fn shift_left(&mut self, x: Reg, y: Reg) {
        let value = self.v[self.shift_source(x, y)];
        self.v[x] = value << 1;
        self.v[0xf] = value >> 7;
    }

    #[inline(always)]
    pub(super) fn rand(&mut self, x: Reg, b: u8) {
        self.v[x] = self.rng.gen::<u8>() & b;
    }

    #[inline(always)]
    fn reset_vf(&mut self) {
        if !self.flags.quirks.bin_ops {
            self.v[0xf] = 0;
        }
    }

    #[inline(always)]
    fn no_borrow(&self, minuend: u8, subtrahend: u8) -> bool {
        match self.flags.quirks.sub_strict {
            true => minuend > subtrahend,
            false => minuend >= subtrahend,
        }
    }

    #[inline(always)]
    fn shift_source(&self, x: Reg, y: Reg) -> Reg {
        match self.flags.quirks.shift {
            true => x,
            false => y,
        }
    }
}

/// The index register, and memory through it
///
/// Memory addresses computed from I wrap at the end of the 4 KiB space.
/// I itself is a full 16 bits.
impl CPU {
    /// |`Annn`| I = nnn
    #[inline(always)]
    pub(super) fn load_i_immediate(&mut self, a: Adr) {
        self.i = a;
    }

    /// |`Fx1E`| I += vX, without touching vF
    #[inline(always)]
    pub(super) fn add_i(&mut self, x: Reg) {
        self.i = self.i.wrapping_add(self.v[x] as Adr);
    }

    /// |`Fx29`| Points I at the glyph for the low nibble of vX
    #[inline(always)]
    pub(super) fn load_sprite(&mut self, x: Reg) {
        self.i = self.font.wrapping_add(5 * (self.v[x] as Adr & 0xf));
    }

    /// |`Fx33`| Writes the decimal digits of vX to I, I+1, and I+2, most significant first
    #[inline(always)]
    pub(super) fn bcd_convert(&mut self, x: Reg) {
        let value = self.v[x];
        let digits = [value / 100, value / 10 % 10, value % 10];
        for (offset, digit) in digits.into_iter().enumerate() {
            self.mem.write(self.i.wrapping_add(offset as Adr), digit);
        }
    }

    /// |`Fx55`| Copies v0..=vX to memory starting at I
    ///
    /// # Quirk
    /// [Quirks::dma_inc] leaves I pointing just past the last byte written.
    #[inline(always)]
    pub(super) fn store_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.mem.write(self.i.wrapping_add(reg as Adr), self.v[reg]);
        }
        self.dma_advance(x);
    }

    /// |`Fx65`| Copies memory starting at I into v0..=vX
    ///
    /// # Quirk
    /// [Quirks::dma_inc] leaves I pointing just past the last byte read.
    #[inline(always)]
    pub(super) fn load_dma(&mut self, x: Reg) {
        for reg in 0..=x {
            self.v[reg] = self.mem.read(self.i.wrapping_add(reg as Adr));
        }
        self.dma_advance(x);
    }

    #[inline(always)]
    fn dma_advance(&mut self, x: Reg) {
        if self.flags.quirks.dma_inc {
            self.i = self.i.wrapping_add(x as Adr + 1);
        }
    }
}

/// Timers, the keypad, and the screen
impl CPU {
    /// |`Fx07`| vX = DT
    #[inline(always)]
    pub(super) fn load_delay_timer(&mut self, x: Reg) {
        self.v[x] = self.delay;
    }

    /// |`Fx15`| DT = vX
    #[inline(always)]
    pub(super) fn store_delay_timer(&mut self, x: Reg) {
        self.delay = self.v[x];
    }

    /// |`Fx18`| ST = vX, and the tone follows it
    #[inline(always)]
    pub(super) fn store_sound_timer(&mut self, x: Reg) {
        self.sound = self.v[x];
        self.tone = self.sound > 0;
    }

    /// |`Fx0A`| Blocks until a key is released, then stores it in vX
    ///
    /// Released means held last frame and not held this frame. Until that
    /// happens, pc is rewound onto this instruction, so it runs again.
    #[inline(always)]
    pub(super) fn wait_for_key(&mut self, x: Reg) {
        match self.keys.released() {
            Some(key) => self.v[x] = key as u8,
            None => self.pc = self.pc.wrapping_sub(2),
        }
    }

    /// |`Dxyn`| XORs the n-byte sprite at I onto the screen at (vX, vY)
    ///
    /// The start position wraps onto the screen. vF = 1 if any lit pixel was turned off.
    ///
    /// # Quirk
    /// Whatever hangs off the right or bottom edge is dropped, unless
    /// [Quirks::screen_wrap] is set, in which case it comes back around.
    #[inline(always)]
    pub(super) fn draw(&mut self, x: Reg, y: Reg, n: Nib, screen: &mut Screen) {
        let (x, y) = (self.v[x] as usize % WIDTH, self.v[y] as usize % HEIGHT);
        let wrap = self.flags.quirks.screen_wrap;
        let mut collision = false;
        for row in 0..n as usize {
            let byte = self.mem.read(self.i.wrapping_add(row as Adr));
            collision |= screen.xor_row(x, y + row, byte, wrap);
        }
        self.v[0xf] = collision as u8;
        screen.touch();
    }
}
