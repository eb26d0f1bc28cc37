// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Disassembles a Chip-8 ROM, one instruction word per line

use chip8vm::{error::Result, *};
use gumdrop::*;
use owo_colors::OwoColorize;
use std::{fs::read, path::PathBuf};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Options, Hash)]
struct Arguments {
    #[options(help = "Print this message")]
    help: bool,
    #[options(help = "ROM file", free, required)]
    pub file: PathBuf,
    #[options(
        help = "Address the ROM is loaded at, in hex",
        parse(try_from_str = "parse_hex"),
        default = "200"
    )]
    pub loadaddr: u16,
    #[options(help = "Skip this many bytes of the file first")]
    pub offset: usize,
    #[options(help = "Don't color the output")]
    pub plain: bool,
}

fn parse_hex(value: &str) -> std::result::Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(value, 16)
}

fn main() -> Result<()> {
    let options = Arguments::parse_args_default_or_exit();
    let contents = read(&options.file).map_err(|source| Error::RomUnreadable {
        path: options.file.clone(),
        source,
    })?;
    let disassembler = match options.plain {
        true => Dis::plain(),
        false => Dis::default(),
    };
    let offset = options.offset.min(contents.len());
    let base = options.loadaddr.wrapping_add(offset as u16);
    for line in disassembler.listing(base, &contents[offset..]) {
        match options.plain {
            true => println!("{line}"),
            false => {
                // dim the address and the raw word
                let (head, insn) = line.split_at(line.len().min(10));
                println!("{}{insn}", head.bright_black());
            }
        }
    }
    Ok(())
}
