//! Testing methods on chip8vm's structs
use chip8vm::prelude::*;
use std::{collections::hash_map::DefaultHasher, hash::Hash};

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8, ch82); // PartialEq
    println!("{ch8:?}"); // Debug
}

#[test]
fn error() {
    let error = Error::RomTooLarge {
        size: 0x1000,
        max: MAX_ROM_SIZE,
    };
    println!("{error} {error:?}");
    let error: Error = Halt::UnknownOpcode {
        addr: 0x200,
        word: 0xffff,
    }
    .into();
    assert_eq!("opcode ffff at 200 not recognized", error.to_string());
}

mod region {
    use super::*;
    #[test]
    #[allow(clippy::clone_on_copy)]
    fn copy_clone() {
        let r1 = Program;
        let r2 = r1;
        let r3 = r1.clone();
        assert_eq!(r2, r3);
    }
    #[test]
    fn display() {
        assert_eq!("CharsetProgram", format!("{Charset}{Program}"));
    }
    #[test]
    fn ord() {
        assert!(Charset < Program);
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Program.hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod mem {
    use super::*;
    #[test]
    fn font_loaded() {
        let mem = Mem::new(0x050);
        assert_eq!(Some(0x050..0x0a0), mem.range(Charset));
        assert_eq!(Some(&FONT[..]), mem.get(0x050..0x0a0));
        assert_eq!(0, mem.read(0x04f));
    }
    #[test]
    fn font_clamped_at_end() {
        let mem = Mem::new(0xff0);
        assert_eq!(Some(0xff0..MEM_SIZE), mem.range(Charset));
        assert_eq!(FONT[0xf], mem.read(0xfff));
    }
    #[test]
    fn read_write_wrap() {
        let mut mem = Mem::default();
        mem.write(0x1234, 0xa5);
        assert_eq!(0xa5, mem.read(0x234));
    }
}

mod mode {
    use super::*;
    #[test]
    fn from_str() {
        assert_eq!(Mode::Chip8, "chip8".parse().unwrap());
        assert_eq!(Mode::Chip8, "CHIP-8".parse().unwrap());
        assert_eq!(Mode::Vip, "cosmac".parse().unwrap());
        assert_eq!(Mode::SChip, "SChip".parse().unwrap());
        assert_eq!(Mode::SChip, "chip48".parse().unwrap());
        assert!(matches!(
            "xochip".parse::<Mode>(),
            Err(Error::InvalidMode { mode }) if mode == "xochip"
        ));
    }
    #[test]
    fn default() {
        assert_eq!(Mode::Chip8, Mode::default());
        assert_eq!(Quirks::default(), Quirks::from(Mode::default()));
    }
}

mod quirks {
    use super::*;
    #[test]
    fn from_mode() {
        assert_eq!(
            Quirks {
                bin_ops: false,
                shift: false,
                sub_strict: false,
                dma_inc: true,
                jump_vx: false,
                screen_wrap: false,
            },
            Quirks::from(Mode::Vip)
        );
        assert_eq!(
            Quirks {
                bin_ops: true,
                shift: true,
                sub_strict: false,
                dma_inc: false,
                jump_vx: true,
                screen_wrap: false,
            },
            Quirks::from(Mode::SChip)
        );
    }
    #[test]
    fn clone() {
        let q1 = Quirks::from(Mode::SChip);
        let q2 = q1;
        assert_eq!(q1, q2);
    }
    #[test]
    fn debug() {
        println!("{:?}", Quirks::default());
    }
    #[test]
    fn ord() {
        assert!(Quirks::from(Mode::Chip8) < Quirks::from(Mode::SChip));
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Quirks::default().hash(&mut hasher);
        println!("{hasher:?}");
    }
}

mod flags {
    use super::*;
    #[test]
    fn default() {
        let flags = Flags::default();
        assert_eq!(11, flags.ipf);
        assert!(flags.halt_on_unknown);
        assert!(!flags.debug && !flags.pause && !flags.advance);
        assert_eq!(Quirks::default(), flags.quirks);
    }
    #[test]
    fn toggles() {
        let mut flags = Flags::default();
        flags.debug();
        assert!(flags.debug);
        flags.pause();
        assert!(flags.is_paused());
        flags.advance();
        assert!(!flags.is_paused());
        flags.pause();
        assert!(!flags.pause && !flags.advance);
    }
}

mod keypad {
    use super::*;
    #[test]
    fn update() {
        let mut keys = Keypad::default();
        let mut state = [false; KEY_COUNT];
        state[3] = true;
        keys.update(state);
        assert!(keys.is_held(3));
        assert!(!keys.is_held(4));
        assert!(!keys.is_held(KEY_COUNT));
        keys.update([false; KEY_COUNT]);
        assert_eq!(&state, keys.previous());
        assert_eq!(&[false; KEY_COUNT], keys.held());
        assert_eq!(Some(3), keys.released());
        keys.update([false; KEY_COUNT]);
        assert_eq!(None, keys.released());
    }
}

mod insn {
    use super::*;
    #[test]
    fn decode() {
        assert_eq!(Some(Insn::Clear), Insn::from_word(0x00e0));
        assert_eq!(Some(Insn::Return), Insn::from_word(0x00ee));
        assert_eq!(
            Some(Insn::Draw { x: 1, y: 2, n: 3 }),
            Insn::from_word(0xd123)
        );
        assert_eq!(Some(Insn::ShiftLeft { x: 0xa, y: 0xb }), Insn::from_word(0x8abe));
        assert_eq!(Some(Insn::Restore { x: 0xf }), Insn::from_word(0xff65));
        assert_eq!(None, Insn::from_word(0x0123));
        assert_eq!(None, Insn::from_word(0x8008));
        assert_eq!(None, Insn::from_word(0xe0ff));
    }
    #[test]
    fn display() {
        assert_eq!("ld     v3, #2a", Insn::from_word(0x632a).unwrap().to_string());
        assert_eq!("jp     v0, 345", Insn::from_word(0xb345).unwrap().to_string());
        assert_eq!("ld     [I], vF", Insn::from_word(0xff55).unwrap().to_string());
    }
    /// Every word either decodes, and disassembles to its mnemonic, or is marked invalid
    #[test]
    fn disassemble_all() {
        let dis = Dis::plain();
        for word in 0..=0xffff {
            let text = dis.once(word);
            match Insn::from_word(word) {
                Some(insn) => assert_eq!(insn.to_string(), text),
                None => assert_eq!(format!("inval  {word:04x}"), text),
            }
        }
    }
}

mod screen {
    use super::*;
    #[test]
    fn default() {
        let screen = Screen::new();
        assert_eq!(Screen::default(), screen);
        assert!(!screen.is_dirty());
        assert_eq!(64 * 32, screen.cells().count());
    }
    #[test]
    fn display() {
        let mut screen = Screen::new();
        screen.xor_row(0, 0, 0x80, false);
        let text = screen.to_string();
        assert_eq!(32, text.lines().count());
        assert!(text.starts_with("00|█ "));
    }
    #[test]
    fn hash() {
        let mut hasher = DefaultHasher::new();
        Screen::new().hash(&mut hasher);
        println!("{hasher:?}");
    }
}
