//! Render output: styled cell grids.
//!
//! A render pass produces a [`Surface`], a 2D grid of [`Cell`]s referencing
//! [`Color`](crate::drawing::Color) and [`Style`](crate::drawing::Style)
//! values. Surfaces compose by blitting (containers) and overlaying
//! (popups); [`Surface::to_ansi`] serializes a surface to escape-coded text.

mod surface;

pub use surface::{Cell, Surface};
