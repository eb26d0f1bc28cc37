// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Runs a Chip-8 ROM in the terminal, headless, for a fixed number of frames
//!
//! The keypad is left idle. When the run ends, the screen is printed to stdout.

use chip8vm::{error::Result, *};
use gumdrop::*;
use log::LevelFilter;
use owo_colors::OwoColorize;
use std::path::PathBuf;

pub fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    env_logger::Builder::new()
        .filter_level(match options.debug {
            true => LevelFilter::Trace,
            false => LevelFilter::Warn,
        })
        .format_timestamp(None)
        .parse_default_env()
        .init();
    let mut state = match State::new(options) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("{}", e.bold().red());
            std::process::exit(1);
        }
    };
    if let Err(e) = state.run() {
        eprintln!("{}", e.bold().red());
    }
    state.finish();
    Ok(())
}

/// Parses a hexadecimal string into a u16
fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Load a ROM to run.", required, free)]
    pub file: PathBuf,
    #[options(short = "h", help = "Print this help message.")]
    help: bool,
    #[options(short = "d", help = "Log a disassembly of every instruction as it runs.")]
    pub debug: bool,
    #[options(short = "p", help = "Single-step: run one instruction per frame.")]
    pub pause: bool,

    #[options(short = "i", help = "Set the instructions-per-frame rate.", default = "11")]
    pub ipf: usize,
    #[options(short = "n", help = "Stop after this many frames.", default = "600")]
    pub frames: usize,
    #[options(
        no_short,
        help = "Load the font at this address (hex).",
        parse(try_from_str = "parse_hex"),
        default = "0",
        meta = "ADR"
    )]
    pub font: u16,
    #[options(no_short, help = "Seed the random number generator.")]
    pub seed: Option<u64>,

    #[options(short = "m", help = "Run in (Chip8, Vip, SChip) mode.")]
    pub mode: Option<Mode>,

    #[options(
        short = "z",
        help = "Toggle setting vF to 0 after a bitwise operation."
    )]
    pub vfreset: bool,
    #[options(
        short = "c",
        help = "Toggle COSMAC VIP style DMA instructions, which move I."
    )]
    pub memory: bool,
    #[options(
        short = "v",
        help = "Toggle CHIP-48 style bit-shifts, which don't touch vY."
    )]
    pub shift: bool,
    #[options(
        short = "b",
        help = "Toggle SUPER-CHIP style indexed jump, which is indexed relative to v[adr]."
    )]
    pub jumping: bool,
    #[options(short = "w", help = "Toggle sprites wrapping around the edges of the screen.")]
    pub wrap: bool,
    #[options(short = "s", help = "Toggle subtraction only setting vF when there's no borrow *and* no zero.")]
    pub strict: bool,

    #[options(short = "u", help = "Skip unrecognized instructions, instead of halting.")]
    pub skip_unknown: bool,
    #[options(no_short, help = "Dump the registers when the run ends.")]
    pub dump: bool,
}

#[derive(Debug)]
struct State {
    pub frames: usize,
    pub step: bool,
    pub dump: bool,
    pub ch8: Chip8,
}

impl State {
    fn new(options: Arguments) -> Result<Self> {
        let mut state = State {
            frames: options.frames,
            step: options.pause,
            dump: options.dump,
            ch8: Chip8::new(
                &options.file,
                options.font,
                Flags {
                    quirks: options.mode.unwrap_or_default().into(),
                    debug: options.debug,
                    pause: options.pause,
                    halt_on_unknown: !options.skip_unknown,
                    ipf: options.ipf,
                    ..Default::default()
                },
            )?,
        };
        // Flip the state of the quirks
        let quirks = &mut state.ch8.cpu.flags.quirks;
        quirks.bin_ops ^= options.vfreset;
        quirks.dma_inc ^= options.memory;
        quirks.shift ^= options.shift;
        quirks.jump_vx ^= options.jumping;
        quirks.screen_wrap ^= options.wrap;
        quirks.sub_strict ^= options.strict;
        if let Some(seed) = options.seed {
            state.ch8.cpu.seed(seed);
        }
        log::info!("{:?}", state.ch8.cpu.flags);
        Ok(state)
    }

    /// Runs frames until the frame limit, or until the CPU halts
    fn run(&mut self) -> Result<()> {
        let mut redraws = 0;
        for _ in 0..self.frames {
            if self.step {
                self.ch8.cpu.flags.advance();
            }
            if self.ch8.frame([false; KEY_COUNT])? {
                redraws += 1;
            }
            if !self.ch8.cpu.is_running() {
                break;
            }
        }
        log::info!(
            "ran {} cycles, redrew the screen {redraws} times",
            self.ch8.cpu.cycle()
        );
        Ok(())
    }

    /// Prints the screen, and the registers if asked
    fn finish(&self) {
        self.ch8.screen.print_screen();
        if self.dump {
            self.ch8.cpu.dump();
        }
    }
}
