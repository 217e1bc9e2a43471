//! # lattice-tui
//!
//! Retained-mode terminal UI core.
//!
//! A UI is a tree of typed controls described declaratively through property
//! descriptors. The pipeline is a two-pass measure/render protocol driven by
//! selective invalidation:
//!
//! ```text
//! property write → descriptor rules → dirty flags → measure pass → render pass
//! ```
//!
//! A mutation to a single attribute dirties re-layout, repaint, both, or
//! neither, per the descriptor's invalidation rules. Measure dirt propagates
//! to ancestors (their size depends on the subtree); paint dirt stays local
//! and containers rediscover it when they composite. Clean subtrees are never
//! re-entered: `measure`/`render` return cached results bit-identically.
//!
//! Render passes paint [`Surface`]s of cells referencing [`Color`] and
//! [`Style`] values; terminal I/O itself (raw mode, resize, input) is out of
//! scope - the host supplies the available extent and cursor position and
//! writes the serialized output.
//!
//! ## Modules
//!
//! - [`types`] - Core types (`Extent`, `Point`, `NodeId`)
//! - [`controls`] - Property descriptors, the `Control` contract, and the
//!   concrete controls (`Stack`, `Popup`, `Text`)
//! - [`tree`] - The arena that owns controls and drives the passes
//! - [`drawing`] - `Color`/`Style` value types
//! - [`renderer`] - Styled cell surfaces and ANSI serialization

pub mod controls;
pub mod drawing;
pub mod error;
pub mod measure;
pub mod renderer;
pub mod tree;
pub mod types;

// Re-export commonly used items
pub use types::{Extent, NodeId, Point, UNCONSTRAINED};

pub use controls::{
    Bullet, Control, ControlBase, Dirty, Invalidate, Orientation, Placement, Popup, Property,
    Stack, Text, Value, ValueKind,
};

pub use drawing::{Color, ColorSpace, Style};

pub use error::{Error, Result};

pub use renderer::{Cell, Surface};

pub use tree::{ControlTree, LayoutContext};
