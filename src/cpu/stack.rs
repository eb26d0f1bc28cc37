// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! The fixed-depth call stack

use super::Adr;

/// Number of return addresses the stack can hold
pub const STACK_DEPTH: usize = 16;

/// A fixed-capacity stack of return addresses
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stack {
    frames: [Adr; STACK_DEPTH],
    sp: usize,
}

impl Stack {
    /// Pushes a return address. Returns [None] if the stack is already full.
    /// # Examples
    /// ```rust
    /// # use chip8vm::cpu::stack::*;
    /// let mut stack = Stack::default();
    /// for addr in 0..STACK_DEPTH as u16 {
    ///     assert!(stack.push(addr).is_some());
    /// }
    /// assert!(stack.push(0x200).is_none());
    /// ```
    pub fn push(&mut self, addr: Adr) -> Option<()> {
        *self.frames.get_mut(self.sp)? = addr;
        self.sp += 1;
        Some(())
    }

    /// Pops a return address. Returns [None] if the stack is empty.
    pub fn pop(&mut self) -> Option<Adr> {
        self.sp = self.sp.checked_sub(1)?;
        Some(self.frames[self.sp])
    }

    /// Gets the number of addresses on the stack
    pub fn len(&self) -> usize {
        self.sp
    }

    /// Returns true if nothing is on the stack
    pub fn is_empty(&self) -> bool {
        self.sp == 0
    }

    /// Gets the live portion of the stack, oldest first
    pub fn as_slice(&self) -> &[Adr] {
        &self.frames[..self.sp]
    }

    /// Empties the stack
    pub fn clear(&mut self) {
        self.frames = [0; STACK_DEPTH];
        self.sp = 0;
    }
}
