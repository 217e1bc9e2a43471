//! Primitive layout enumerations.
//!
//! Closed sets of layout and positioning choices consumed by controls.
//! No logic beyond identity and a glyph table for bullets.

// =============================================================================
// Orientation
// =============================================================================

/// Axis along which a stack lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

// =============================================================================
// Placement
// =============================================================================

/// Anchor a popup positions itself against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Relative to the current cursor position (supplied externally).
    #[default]
    Cursor,
    /// Relative to the base surface origin.
    Origin,
}

// =============================================================================
// Bullet
// =============================================================================

/// Fixed marker glyph drawn before each child of a stack.
///
/// A stack's bullet property also accepts an arbitrary string; this enum is
/// the closed set of built-in glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Bullet {
    /// No marker; reserves no space.
    #[default]
    None,
    Disc,
    Circle,
    Square,
    Diamond,
    Asterisk,
    Hyphen,
}

impl Bullet {
    /// The glyph this bullet renders as. [`Bullet::None`] is empty.
    pub const fn glyph(self) -> &'static str {
        match self {
            Bullet::None => "",
            Bullet::Disc => "\u{2022}",
            Bullet::Circle => "\u{25CB}",
            Bullet::Square => "\u{25AA}",
            Bullet::Diamond => "\u{25C6}",
            Bullet::Asterisk => "*",
            Bullet::Hyphen => "-",
        }
    }
}
