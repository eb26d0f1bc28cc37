// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Individual switches for behavior that differs between Chip-8 interpreters

use super::Mode;

/// One switch per behavior that varies between interpreters.
///
/// All switches off is [Mode::Chip8].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quirks {
    /// Super Chip: `8xy1`, `8xy2`, and `8xy3` leave vF alone
    pub bin_ops: bool,
    /// Super Chip: `8xy6` and `8xyE` shift vX in place, ignoring vY
    pub shift: bool,
    /// `8xy5` and `8xy7` set vF only when the difference is nonzero and positive
    pub sub_strict: bool,
    /// Cosmac VIP: `Fx55` and `Fx65` leave I at I + x + 1
    pub dma_inc: bool,
    /// Super Chip: `Bxnn` jumps to xnn + vX
    pub jump_vx: bool,
    /// XO-Chip: `Dxyn` wraps sprites around the screen edges instead of clipping them
    pub screen_wrap: bool,
}

impl From<Mode> for Quirks {
    fn from(value: Mode) -> Self {
        match value {
            Mode::Chip8 => Quirks::default(),
            Mode::Vip => Quirks {
                dma_inc: true,
                ..Default::default()
            },
            Mode::SChip => Quirks {
                bin_ops: true,
                shift: true,
                jump_vx: true,
                ..Default::default()
            },
        }
    }
}
