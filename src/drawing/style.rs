//! Drawable styles.
//!
//! A [`Style`] is an immutable set of SGR codes. [`Style::build`] produces
//! the literal escape sequence `ESC[<codes>m` with the codes semicolon-joined
//! in ascending order, e.g. a style holding `{1, 4}` builds `"\x1B[1;4m"`.
//!
//! Styles combine with `|`, which unions the code sets. Combining with
//! [`Style::RESET`] on either side is an error - reset must be emitted
//! directly, never composed into another style.
//!
//! The code set is stored as a 128-bit mask (SGR codes in use are all below
//! 128), which keeps `Style` a `Copy` value with `const` constants.

use std::fmt;
use std::ops::BitOr;

use crate::error::Error;

/// A drawable style: a set of SGR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    mask: u128,
}

impl Style {
    /// A style holding a single SGR code. Codes must be below 128.
    pub const fn from_code(code: u8) -> Self {
        assert!(code < 128, "SGR code out of range");
        Self { mask: 1 << code }
    }

    /// A style holding no codes; `build()` yields `"\x1B[m"`.
    pub const EMPTY: Self = Self { mask: 0 };

    pub const RESET: Self = Self::from_code(0);
    pub const INTENSITY_INCREASED: Self = Self::from_code(1);
    pub const INTENSITY_DECREASED: Self = Self::from_code(2);
    pub const ITALIC_ON: Self = Self::from_code(3);
    pub const UNDERLINE_ON: Self = Self::from_code(4);
    pub const BLINK_SLOW_ON: Self = Self::from_code(5);
    pub const BLINK_FAST_ON: Self = Self::from_code(6);
    pub const INVERT_ON: Self = Self::from_code(7);
    pub const CONCEAL_ON: Self = Self::from_code(8);
    pub const STRIKETHROUGH_ON: Self = Self::from_code(9);

    // 10-20 are font sequences.

    pub const UNDERLINE_DOUBLE_ON: Self = Self::from_code(21);
    pub const INTENSITY_NORMAL: Self = Self::from_code(22);
    pub const ITALIC_OFF: Self = Self::from_code(23);
    pub const UNDERLINE_OFF: Self = Self::from_code(24);
    pub const BLINK_OFF: Self = Self::from_code(25);
    pub const INVERT_OFF: Self = Self::from_code(27);
    pub const CONCEAL_OFF: Self = Self::from_code(28);
    pub const STRIKETHROUGH_OFF: Self = Self::from_code(29);

    // 30-38 are foreground colors, 40-48 background colors.

    pub const RESET_FOREGROUND_COLOR: Self = Self::from_code(39);
    pub const RESET_BACKGROUND_COLOR: Self = Self::from_code(49);
    pub const OVERLINE_ON: Self = Self::from_code(53);
    pub const OVERLINE_OFF: Self = Self::from_code(55);

    /// Resets both foreground and background color, `{39, 49}`.
    pub const RESET_COLOR: Self = Self {
        mask: Self::RESET_FOREGROUND_COLOR.mask | Self::RESET_BACKGROUND_COLOR.mask,
    };

    /// A style holding the given codes.
    pub fn new(codes: impl IntoIterator<Item = u8>) -> Self {
        let mut mask = 0u128;
        for code in codes {
            mask |= Self::from_code(code).mask;
        }
        Self { mask }
    }

    /// Whether the style holds no codes.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.mask == 0
    }

    /// Whether every code of `other` is present in this style.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.mask & other.mask == other.mask
    }

    /// The codes in ascending order.
    pub fn codes(self) -> impl Iterator<Item = u8> {
        (0u8..128).filter(move |&code| self.mask >> code & 1 == 1)
    }

    /// Build the escape sequence: `ESC[<codes>m`, codes ascending.
    pub fn build(self) -> String {
        let mut out = String::from("\x1B[");
        let mut first = true;
        for code in self.codes() {
            if !first {
                out.push(';');
            }
            first = false;
            out.push_str(&code.to_string());
        }
        out.push('m');
        out
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl BitOr for Style {
    type Output = Result<Style, Error>;

    /// Union of the two code sets.
    ///
    /// Fails with [`Error::StyleComposition`] when either side is
    /// [`Style::RESET`]; neither operand is modified (styles are values).
    fn bitor(self, rhs: Self) -> Self::Output {
        if self == Self::RESET || rhs == Self::RESET {
            return Err(Error::StyleComposition);
        }
        Ok(Style {
            mask: self.mask | rhs.mask,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_sorted_ascending() {
        assert_eq!(Style::new([4, 1]).build(), "\x1B[1;4m");
        assert_eq!(Style::new([53, 9, 22]).build(), "\x1B[9;22;53m");
        assert_eq!(Style::RESET.build(), "\x1B[0m");
        assert_eq!(Style::EMPTY.build(), "\x1B[m");
    }

    #[test]
    fn test_composition_unions_codes() {
        let s = (Style::INTENSITY_INCREASED | Style::UNDERLINE_ON).unwrap();
        assert_eq!(s, Style::new([1, 4]));
        assert_eq!(s.build(), "\x1B[1;4m");

        // Union is idempotent on overlap.
        let again = (s | Style::UNDERLINE_ON).unwrap();
        assert_eq!(again, s);
    }

    #[test]
    fn test_reset_composition_fails() {
        assert!(matches!(
            Style::INTENSITY_INCREASED | Style::RESET,
            Err(Error::StyleComposition)
        ));
        assert!(matches!(
            Style::RESET | Style::UNDERLINE_ON,
            Err(Error::StyleComposition)
        ));
    }

    #[test]
    fn test_equality() {
        assert_eq!(Style::from_code(1), Style::from_code(1));
        assert_ne!(Style::from_code(1), Style::from_code(2));
        assert_eq!(Style::RESET_COLOR, Style::new([39, 49]));
    }

    #[test]
    fn test_codes_and_contains() {
        let s = Style::new([49, 1, 39]);
        assert_eq!(s.codes().collect::<Vec<_>>(), vec![1, 39, 49]);
        assert!(s.contains(Style::RESET_COLOR));
        assert!(!s.contains(Style::UNDERLINE_ON));
    }
}
