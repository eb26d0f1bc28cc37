// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Stores and displays the Chip-8's screen memory

use std::fmt::{Display, Formatter, Result};

/// Width of the screen, in pixels
pub const WIDTH: usize = 64;
/// Height of the screen, in pixels
pub const HEIGHT: usize = 32;

/// The 64x32 monochrome framebuffer.
///
/// Each row is packed into a [u64], with the leftmost pixel in the most significant bit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Screen {
    rows: [u64; HEIGHT],
    dirty: bool,
}

impl Screen {
    /// Constructs a blank, clean screen
    pub fn new() -> Self {
        Self::default()
    }

    /// Turns every pixel off and marks the screen dirty
    pub fn clear(&mut self) {
        self.rows = [0; HEIGHT];
        self.dirty = true;
    }

    /// XORs one 8-pixel sprite row onto the screen with its left edge at (`x`, `y`).
    ///
    /// Pixels past the right or bottom edge are dropped, unless `wrap` is set, in which case
    /// they reappear on the opposite edge. Returns true if any lit pixel was turned off.
    ///
    /// Does not touch the dirty flag.
    pub fn xor_row(&mut self, x: usize, y: usize, byte: u8, wrap: bool) -> bool {
        let y = match (y < HEIGHT, wrap) {
            (true, _) => y,
            (false, true) => y % HEIGHT,
            (false, false) => return false,
        };
        let sprite = (byte as u64) << (u64::BITS - 8);
        let line = match wrap {
            true => sprite.rotate_right((x % WIDTH) as u32),
            false => sprite.checked_shr(x as u32).unwrap_or_default(),
        };
        let collision = self.rows[y] & line != 0;
        self.rows[y] ^= line;
        collision
    }

    /// Marks the screen as changed
    pub fn touch(&mut self) {
        self.dirty = true;
    }

    /// Returns true if the screen changed since the host last consumed a frame
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Consumes a frame: returns the dirty flag, and clears it
    /// # Examples
    /// ```rust
    /// # use chip8vm::*;
    /// let mut screen = Screen::new();
    /// screen.clear();
    /// assert!(screen.take_dirty());
    /// assert!(!screen.take_dirty());
    /// ```
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Gets the pixel at (`x`, `y`). Out-of-bounds pixels are always off.
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH {
            return false;
        }
        self.rows
            .get(y)
            .map_or(false, |row| row & (1 << (WIDTH - 1 - x)) != 0)
    }

    /// Gets the packed rows of the screen
    pub fn rows(&self) -> &[u64; HEIGHT] {
        &self.rows
    }

    /// Iterates over every pixel in row-major order, as `0` or `1`
    pub fn cells(&self) -> impl Iterator<Item = u8> + '_ {
        self.rows
            .iter()
            .flat_map(|row| (0..WIDTH).rev().map(move |bit| (row >> bit & 1) as u8))
    }

    /// Prints the screen to stdout
    ///
    /// Uses braille characters if the `drawille` feature is enabled, and box characters otherwise.
    pub fn print_screen(&self) {
        #[cfg(feature = "drawille")]
        {
            use drawille::Canvas;
            let mut canvas = Canvas::new(WIDTH as u32, HEIGHT as u32);
            self.cells()
                .enumerate()
                .filter(|(_, cell)| *cell != 0)
                .for_each(|(index, _)| {
                    canvas.set((index % WIDTH) as u32, (index / WIDTH) as u32)
                });
            println!("{}", canvas.frame());
        }
        #[cfg(not(feature = "drawille"))]
        print!("{self}");
    }
}

impl Display for Screen {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (index, row) in self.rows.iter().enumerate() {
            writeln!(
                f,
                "{:02x}|{}|",
                index,
                format!("{row:064b}").replace('0', " ").replace('1', "█")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xor_row_sets_and_collides() {
        let mut screen = Screen::new();
        assert!(!screen.xor_row(0, 0, 0b1000_0001, false));
        assert!(screen.get(0, 0));
        assert!(screen.get(7, 0));
        assert!(!screen.get(1, 0));
        // drawing the same row again erases it
        assert!(screen.xor_row(0, 0, 0b1000_0001, false));
        assert!(screen.cells().all(|cell| cell == 0));
    }

    #[test]
    fn xor_row_clips_at_right_edge() {
        let mut screen = Screen::new();
        screen.xor_row(60, 0, 0xff, false);
        for x in 60..64 {
            assert!(screen.get(x, 0));
        }
        for x in 0..4 {
            assert!(!screen.get(x, 0));
        }
        assert_eq!(4, screen.cells().filter(|&c| c == 1).count());
    }

    #[test]
    fn xor_row_wraps_when_asked() {
        let mut screen = Screen::new();
        screen.xor_row(60, 33, 0xff, true);
        for x in (60..64).chain(0..4) {
            assert!(screen.get(x, 1));
        }
        assert_eq!(8, screen.cells().filter(|&c| c == 1).count());
    }

    #[test]
    fn xor_row_drops_rows_below_screen() {
        let mut screen = Screen::new();
        assert!(!screen.xor_row(0, HEIGHT, 0xff, false));
        assert_eq!(&[0; HEIGHT], screen.rows());
    }

    #[test]
    fn clear_marks_dirty() {
        let mut screen = Screen::new();
        screen.xor_row(0, 0, 0x80, false);
        assert!(!screen.is_dirty());
        screen.clear();
        assert!(screen.is_dirty());
        assert!(!screen.get(0, 0));
    }

    #[test]
    fn cells_are_row_major() {
        let mut screen = Screen::new();
        screen.xor_row(8, 1, 0x80, false);
        let cells: Vec<u8> = screen.cells().collect();
        assert_eq!(WIDTH * HEIGHT, cells.len());
        assert_eq!(1, cells[WIDTH + 8]);
        assert_eq!(1, cells.iter().map(|&c| c as usize).sum::<usize>());
    }
}
