//! Drawing collaborators: colors and ANSI styles.
//!
//! These are plain value types consumed by render passes. They never
//! participate in invalidation - the layout pipeline paints with them but
//! does not own their math.

mod color;
mod style;

pub use color::{Color, ColorSpace};
pub use style::Style;
