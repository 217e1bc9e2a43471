//! Core types for lattice-tui.
//!
//! These types define the foundation that everything builds on.
//! They flow through the measure/render pipeline and define what the
//! surface and tree understand.

use std::fmt;

// =============================================================================
// Extent
// =============================================================================

/// Sentinel for an unconstrained measure extent.
///
/// A stack measures its children with the main axis unconstrained so they
/// report their natural size (greedy sizing).
pub const UNCONSTRAINED: u16 = u16::MAX;

/// A measured size in terminal cells, `(height, width)` order.
///
/// Using integers for exact comparison - a cached measure result must be
/// bit-identical on repeated calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub height: u16,
    pub width: u16,
}

impl Extent {
    /// Create a new extent.
    pub const fn new(height: u16, width: u16) -> Self {
        Self { height, width }
    }

    /// Zero-sized extent.
    pub const ZERO: Self = Self::new(0, 0);
}

// =============================================================================
// Point
// =============================================================================

/// A position in cells, `(y, x)` order.
///
/// Signed: popup offsets may place an overlay partially off the base
/// surface, where it is clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub y: i32,
    pub x: i32,
}

impl Point {
    /// Create a new point.
    pub const fn new(y: i32, x: i32) -> Self {
        Self { y, x }
    }

    /// The origin, `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);
}

// =============================================================================
// NodeId
// =============================================================================

/// Handle to a control stored in a [`ControlTree`](crate::tree::ControlTree).
///
/// Controls never hold references to each other; parent/child links are ids
/// into the arena, so a removed child cannot dereference a freed parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The raw slot index (stable for the lifetime of the node).
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_equality() {
        assert_eq!(Extent::new(3, 7), Extent::new(3, 7));
        assert_ne!(Extent::new(3, 7), Extent::new(7, 3));
        assert_eq!(Extent::ZERO, Extent::new(0, 0));
    }

    #[test]
    fn test_point_origin() {
        assert_eq!(Point::ORIGIN, Point::new(0, 0));
        let p = Point::new(-2, 5);
        assert_eq!(p.y, -2);
        assert_eq!(p.x, 5);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(4).to_string(), "#4");
    }
}
