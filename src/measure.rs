//! Text measurement.
//!
//! Utilities for measuring text dimensions in terminal cells.
//!
//! Terminal text width depends on Unicode character widths: ASCII is 1 cell,
//! CJK and most emoji are 2 cells, combining marks are 0 cells. All width
//! math goes through `unicode-width` so measure and render agree exactly.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::types::Extent;

/// Display width of a string in terminal cells.
pub fn display_width(s: &str) -> u16 {
    UnicodeWidthStr::width(s).min(u16::MAX as usize) as u16
}

/// Display width of a single character in terminal cells.
///
/// Control characters measure as 0.
pub fn char_width(c: char) -> u16 {
    UnicodeWidthChar::width(c).unwrap_or(0) as u16
}

/// Measured size of a text block: line count by widest line.
///
/// An empty string measures zero; lines split on `\n` only.
pub fn block_size(text: &str) -> Extent {
    if text.is_empty() {
        return Extent::ZERO;
    }

    let mut height = 0u16;
    let mut width = 0u16;
    for line in text.split('\n') {
        height = height.saturating_add(1);
        width = width.max(display_width(line));
    }

    Extent::new(height, width)
}
