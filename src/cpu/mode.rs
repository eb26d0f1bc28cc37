// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Named [Quirks](super::Quirks) presets

use crate::error::Error;
use std::str::FromStr;

/// Selects a set of [Quirks](super::Quirks) matching a well-known interpreter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Default behavior: vF reset, vY-sourced shifts, I untouched by DMA
    #[default]
    Chip8,
    /// Cosmac VIP behavior: like [Mode::Chip8], but DMA advances I
    Vip,
    /// Super-Chip behavior: vF kept, in-place shifts, `Bxnn` jumps
    SChip,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chip8" | "chip-8" => Ok(Mode::Chip8),
            "vip" | "cosmac" => Ok(Mode::Vip),
            "schip" | "superchip" | "chip48" | "chip-48" => Ok(Mode::SChip),
            _ => Err(Error::InvalidMode {
                mode: s.to_string(),
            }),
        }
    }
}
