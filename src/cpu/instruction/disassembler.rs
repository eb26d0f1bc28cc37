// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Turns instruction words back into assembly text
use super::Insn;
use owo_colors::{OwoColorize, Style};

/// Anything that can render Chip-8 words as text
pub trait Disassembler {
    /// Renders one word. Words that aren't instructions still produce a line
    fn once(&self, insn: u16) -> String;

    /// Disassemble a run of big-endian words, loaded at `base`, into one line per word
    fn listing(&self, base: u16, bytes: &[u8]) -> Vec<String> {
        bytes
            .chunks(2)
            .enumerate()
            .map(|(index, chunk)| {
                let word = match *chunk {
                    [hi, lo] => u16::from_be_bytes([hi, lo]),
                    [hi] => u16::from_be_bytes([hi, 0]),
                    _ => 0,
                };
                let addr = base.wrapping_add(2 * index as u16);
                format!("{addr:03x}: {:04x} {}", word, self.once(word))
            })
            .collect()
    }
}

/// The standard [Disassembler], which colors its output with [owo_colors::Style]s
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dis {
    /// Used for words that don't decode
    pub invalid: Style,
    /// Used for everything else
    pub normal: Style,
    /// When unset, output is plain text
    pub color: bool,
}

impl Default for Dis {
    fn default() -> Self {
        Self {
            invalid: Style::new().bold().red(),
            normal: Style::new().green(),
            color: true,
        }
    }
}

impl Dis {
    /// Constructs a [Dis] which doesn't style its output
    pub fn plain() -> Self {
        Self {
            color: false,
            ..Default::default()
        }
    }
}

impl Disassembler for Dis {
    fn once(&self, insn: u16) -> String {
        match (Insn::from_word(insn), self.color) {
            (Some(insn), true) => format!("{}", insn.style(self.normal)),
            (Some(insn), false) => insn.to_string(),
            (None, true) => format!("{}", format_args!("inval  {insn:04x}").style(self.invalid)),
            (None, false) => format!("inval  {insn:04x}"),
        }
    }
}
