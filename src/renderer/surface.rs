//! Surface: a 2D buffer of styled cells.
//!
//! Flat `Vec<Cell>` with row-major indexing for cache efficiency. Wide
//! glyphs (CJK, most emoji) occupy their width in cells; the cells after a
//! wide glyph hold a continuation marker so serialization does not
//! double-print.

use crate::drawing::{Color, Style};
use crate::measure::char_width;
use crate::types::{Extent, Point};

/// Continuation marker for the trailing cells of a wide glyph.
const CONTINUATION: char = '\0';

// =============================================================================
// Cell
// =============================================================================

/// A single styled terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub glyph: char,
    /// `None` leaves the terminal's foreground untouched.
    pub foreground: Option<Color>,
    /// `None` leaves the terminal's background untouched.
    pub background: Option<Color>,
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            foreground: None,
            background: None,
            style: Style::EMPTY,
        }
    }
}

// =============================================================================
// Surface
// =============================================================================

/// A 2D buffer of terminal cells, `(height, width)` order.
///
/// Uses flat storage with row-major indexing: `index = y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    height: u16,
    width: u16,
    cells: Vec<Cell>,
}

impl Surface {
    /// Create a surface filled with default cells.
    pub fn new(height: u16, width: u16) -> Self {
        let size = height as usize * width as usize;
        Self {
            height,
            width,
            cells: vec![Cell::default(); size],
        }
    }

    /// Surface height in rows.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Surface width in columns.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Surface size as an extent.
    #[inline]
    pub fn extent(&self) -> Extent {
        Extent::new(self.height, self.width)
    }

    #[inline]
    fn index(&self, y: u16, x: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Check if coordinates are in bounds.
    #[inline]
    pub fn in_bounds(&self, y: u16, x: u16) -> bool {
        y < self.height && x < self.width
    }

    /// Cell reference, `None` out of bounds.
    #[inline]
    pub fn get(&self, y: u16, x: u16) -> Option<&Cell> {
        if self.in_bounds(y, x) {
            Some(&self.cells[self.index(y, x)])
        } else {
            None
        }
    }

    /// Mutable cell reference, `None` out of bounds.
    #[inline]
    pub fn get_mut(&mut self, y: u16, x: u16) -> Option<&mut Cell> {
        if self.in_bounds(y, x) {
            let idx = self.index(y, x);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Set a single cell. Returns true if it was in bounds.
    pub fn set(&mut self, y: u16, x: u16, cell: Cell) -> bool {
        match self.get_mut(y, x) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Write a single line of text starting at `(y, x)`.
    ///
    /// Returns the number of columns advanced. Wide glyphs get continuation
    /// cells; zero-width characters are skipped; writing clips at the right
    /// edge.
    pub fn write_str(
        &mut self,
        y: u16,
        x: u16,
        text: &str,
        foreground: Option<Color>,
        background: Option<Color>,
        style: Style,
    ) -> u16 {
        let mut col = x;

        for glyph in text.chars() {
            if col >= self.width {
                break;
            }

            let width = char_width(glyph);
            if width == 0 {
                continue;
            }

            self.set(
                y,
                col,
                Cell {
                    glyph,
                    foreground,
                    background,
                    style,
                },
            );
            for offset in 1..width {
                self.set(
                    y,
                    col + offset,
                    Cell {
                        glyph: CONTINUATION,
                        foreground,
                        background,
                        style,
                    },
                );
            }

            col = col.saturating_add(width);
        }

        col.saturating_sub(x)
    }

    /// Copy `src` into this surface with its top-left corner at `(y, x)`,
    /// clipping at the edges.
    pub fn blit(&mut self, y: u16, x: u16, src: &Surface) {
        self.overlay(src, Point::new(y as i32, x as i32));
    }

    /// Copy `src` into this surface at a signed origin (overlay semantics):
    /// cells falling outside this surface are clipped, including negative
    /// coordinates.
    pub fn overlay(&mut self, src: &Surface, origin: Point) {
        for sy in 0..src.height {
            let dy = origin.y.saturating_add(sy as i32);
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width {
                let dx = origin.x.saturating_add(sx as i32);
                if dx < 0 || dx >= self.width as i32 {
                    continue;
                }
                let idx = self.index(dy as u16, dx as u16);
                self.cells[idx] = src.cells[src.index(sy, sx)];
            }
        }
    }

    /// Serialize to ANSI-escaped text, one `\n`-terminated line per row.
    ///
    /// Emits an SGR sequence only where the (style, foreground, background)
    /// run changes, and a reset at the end of each row.
    pub fn to_ansi(&self) -> String {
        let mut out = String::new();

        for y in 0..self.height {
            let mut current: Option<(Style, Option<Color>, Option<Color>)> = None;

            for x in 0..self.width {
                let cell = &self.cells[self.index(y, x)];
                if cell.glyph == CONTINUATION {
                    continue;
                }

                let attrs = (cell.style, cell.foreground, cell.background);
                if current != Some(attrs) {
                    push_sgr(&mut out, cell.style, cell.foreground, cell.background);
                    current = Some(attrs);
                }
                out.push(cell.glyph);
            }

            out.push_str("\x1B[0m\n");
        }

        out
    }
}

/// Append a reset-prefixed SGR sequence for a run's attributes.
fn push_sgr(out: &mut String, style: Style, foreground: Option<Color>, background: Option<Color>) {
    out.push_str("\x1B[0");
    for code in style.codes() {
        out.push(';');
        out.push_str(&code.to_string());
    }
    if let Some(fg) = foreground {
        out.push_str(&format!(";38;2;{};{};{}", fg.r(), fg.g(), fg.b()));
    }
    if let Some(bg) = background {
        out.push_str(&format!(";48;2;{};{};{}", bg.r(), bg.g(), bg.b()));
    }
    out.push('m');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation() {
        let surface = Surface::new(4, 10);
        assert_eq!(surface.extent(), Extent::new(4, 10));
        assert_eq!(surface.get(3, 9).unwrap().glyph, ' ');
        assert!(surface.get(4, 0).is_none());
    }

    #[test]
    fn test_write_str() {
        let mut surface = Surface::new(2, 10);
        let advanced = surface.write_str(0, 1, "Hey", None, None, Style::EMPTY);
        assert_eq!(advanced, 3);
        assert_eq!(surface.get(0, 1).unwrap().glyph, 'H');
        assert_eq!(surface.get(0, 3).unwrap().glyph, 'y');
        assert_eq!(surface.get(0, 0).unwrap().glyph, ' ');
    }

    #[test]
    fn test_write_str_wide_glyphs() {
        let mut surface = Surface::new(1, 6);
        let advanced = surface.write_str(0, 0, "中a", None, None, Style::EMPTY);
        assert_eq!(advanced, 3);
        assert_eq!(surface.get(0, 0).unwrap().glyph, '中');
        assert_eq!(surface.get(0, 1).unwrap().glyph, CONTINUATION);
        assert_eq!(surface.get(0, 2).unwrap().glyph, 'a');
    }

    #[test]
    fn test_write_str_clips_at_edge() {
        let mut surface = Surface::new(1, 3);
        let advanced = surface.write_str(0, 0, "abcdef", None, None, Style::EMPTY);
        assert_eq!(advanced, 3);
        assert_eq!(surface.get(0, 2).unwrap().glyph, 'c');
    }

    #[test]
    fn test_blit() {
        let mut base = Surface::new(3, 6);
        let mut patch = Surface::new(1, 2);
        patch.write_str(0, 0, "ab", None, None, Style::EMPTY);

        base.blit(1, 2, &patch);
        assert_eq!(base.get(1, 2).unwrap().glyph, 'a');
        assert_eq!(base.get(1, 3).unwrap().glyph, 'b');
        assert_eq!(base.get(0, 2).unwrap().glyph, ' ');
    }

    #[test]
    fn test_overlay_clips_negative_origin() {
        let mut base = Surface::new(2, 4);
        let mut patch = Surface::new(2, 2);
        patch.write_str(0, 0, "ab", None, None, Style::EMPTY);
        patch.write_str(1, 0, "cd", None, None, Style::EMPTY);

        base.overlay(&patch, Point::new(-1, -1));
        // Only the bottom-right cell of the patch lands on the base.
        assert_eq!(base.get(0, 0).unwrap().glyph, 'd');
        assert_eq!(base.get(0, 1).unwrap().glyph, ' ');
        assert_eq!(base.get(1, 0).unwrap().glyph, ' ');
    }

    #[test]
    fn test_to_ansi_runs() {
        let mut surface = Surface::new(1, 4);
        surface.write_str(0, 0, "ab", None, None, Style::UNDERLINE_ON);
        surface.write_str(0, 2, "cd", None, None, Style::EMPTY);

        let ansi = surface.to_ansi();
        assert_eq!(ansi, "\x1B[0;4mab\x1B[0mcd\x1B[0m\n");
    }

    #[test]
    fn test_to_ansi_truecolor() {
        let mut surface = Surface::new(1, 1);
        surface.write_str(
            0,
            0,
            "x",
            Some(Color::from_rgb(1, 2, 3)),
            Some(Color::from_rgb(9, 8, 7)),
            Style::EMPTY,
        );
        assert_eq!(surface.to_ansi(), "\x1B[0;38;2;1;2;3;48;2;9;8;7mx\x1B[0m\n");
    }
}
