//! Controls: the node type of the UI tree.
//!
//! A control owns its property values (backed by its descriptor table), an
//! invalidation state of two orthogonal dirty bits, and the measure/render
//! contract every concrete control implements. The tree drives the contract:
//! [`ControlTree::measure`](crate::tree::ControlTree::measure) and
//! [`ControlTree::render`](crate::tree::ControlTree::render) consult the
//! dirty bits and only call into `measure_core`/`render_core` on stale nodes.

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::renderer::Surface;
use crate::tree::LayoutContext;
use crate::types::Extent;

pub mod primitives;
pub mod property;

mod popup;
mod stack;
mod text;

pub use popup::Popup;
pub use primitives::{Bullet, Orientation, Placement};
pub use property::{Invalidate, Property, Value, ValueKind};
pub use stack::Stack;
pub use text::Text;

// =============================================================================
// Dirty flags
// =============================================================================

bitflags! {
    /// Invalidation state: two orthogonal bits, not four named states.
    ///
    /// A freshly constructed control has both bits set - it has never been
    /// measured or painted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Dirty: u8 {
        /// The cached measure result is stale.
        const MEASURE = 1 << 0;
        /// The cached render output is stale.
        const PAINT = 1 << 1;
    }
}

// =============================================================================
// ControlBase
// =============================================================================

/// Per-control state shared by every concrete control: the property backing
/// store (parallel to the descriptor table), the dirty bits, and the cached
/// measure/render results.
///
/// The backing store is owned exclusively by the control instance; mutation
/// goes through [`ControlTree::set`](crate::tree::ControlTree::set), which
/// enforces the descriptor contract.
pub struct ControlBase {
    properties: &'static [Property],
    values: Vec<Value>,
    dirty: Dirty,
    measured: Option<Extent>,
    rendered: Option<Surface>,
}

impl ControlBase {
    /// Create a base with every property at its declared default.
    ///
    /// Default initialization does not count as assignment: no rules fire,
    /// the control starts dirty by construction.
    pub fn new(properties: &'static [Property]) -> Self {
        Self {
            properties,
            values: properties.iter().map(|p| (p.default)()).collect(),
            dirty: Dirty::all(),
            measured: None,
            rendered: None,
        }
    }

    /// The control's descriptor table.
    #[inline]
    pub fn properties(&self) -> &'static [Property] {
        self.properties
    }

    /// Index of a property in the descriptor table.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.properties.iter().position(|p| p.name == name)
    }

    /// Current value of a property, by name.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.position(name).map(|i| &self.values[i])
    }

    /// Current value at a descriptor index.
    #[inline]
    pub(crate) fn value_at(&self, index: usize) -> &Value {
        &self.values[index]
    }

    /// Store a new value at a descriptor index, returning the old one.
    pub(crate) fn replace_value(&mut self, index: usize, new: Value) -> Value {
        std::mem::replace(&mut self.values[index], new)
    }

    /// Current dirty bits.
    #[inline]
    pub fn dirty(&self) -> Dirty {
        self.dirty
    }

    pub(crate) fn mark(&mut self, flags: Dirty) {
        self.dirty |= flags;
    }

    pub(crate) fn clear(&mut self, flags: Dirty) {
        self.dirty &= !flags;
    }

    pub(crate) fn cached_measure(&self) -> Option<Extent> {
        self.measured
    }

    pub(crate) fn store_measure(&mut self, extent: Extent) {
        self.measured = Some(extent);
        self.clear(Dirty::MEASURE);
    }

    pub(crate) fn cached_render(&self) -> Option<&Surface> {
        self.rendered.as_ref()
    }

    pub(crate) fn store_render(&mut self, surface: Surface) {
        self.rendered = Some(surface);
        self.clear(Dirty::PAINT);
    }
}

// =============================================================================
// Control trait
// =============================================================================

/// The abstract base of every control.
///
/// Concrete controls implement [`measure_core`](Control::measure_core) and
/// [`render_core`](Control::render_core); the default bodies fail with
/// [`Error::NotImplemented`] on first invocation. Both must be pure with
/// respect to everything except the control's own property values and its
/// children.
pub trait Control {
    /// Control type name, used in error messages.
    fn kind(&self) -> &'static str;

    /// Shared per-control state.
    fn base(&self) -> &ControlBase;

    /// Shared per-control state, mutably.
    fn base_mut(&mut self) -> &mut ControlBase;

    /// Compute the control's required size within the available extent.
    ///
    /// `available_height`/`available_width` may be
    /// [`UNCONSTRAINED`](crate::types::UNCONSTRAINED).
    fn measure_core(
        &self,
        ctx: &mut LayoutContext<'_>,
        available_height: u16,
        available_width: u16,
    ) -> Result<Extent> {
        let _ = (ctx, available_height, available_width);
        Err(Error::NotImplemented {
            control: self.kind(),
            method: "measure_core",
        })
    }

    /// Paint the control into a surface of the assigned size.
    fn render_core(
        &self,
        ctx: &mut LayoutContext<'_>,
        height: u16,
        width: u16,
    ) -> Result<Surface> {
        let _ = (ctx, height, width);
        Err(Error::NotImplemented {
            control: self.kind(),
            method: "render_core",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ControlTree;

    const PROPS: &[Property] = &[Property {
        name: "flag",
        kinds: &[ValueKind::Bool],
        default: || Value::Bool(false),
        nullable: false,
        measure: Invalidate::Always,
        paint: Invalidate::Always,
    }];

    /// A control that overrides nothing.
    struct Abstract {
        base: ControlBase,
    }

    impl Abstract {
        fn new() -> Self {
            Self {
                base: ControlBase::new(PROPS),
            }
        }
    }

    impl Control for Abstract {
        fn kind(&self) -> &'static str {
            "Abstract"
        }
        fn base(&self) -> &ControlBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ControlBase {
            &mut self.base
        }
    }

    #[test]
    fn test_starts_fully_dirty() {
        let control = Abstract::new();
        assert_eq!(control.base().dirty(), Dirty::all());
        assert_eq!(control.base().value("flag"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_missing_overrides_fail_not_implemented() {
        let mut tree = ControlTree::new();
        let node = tree.insert(Abstract::new());

        match tree.measure(node, 10, 10) {
            Err(Error::NotImplemented { control, method }) => {
                assert_eq!(control, "Abstract");
                assert_eq!(method, "measure_core");
            }
            other => panic!("expected NotImplemented, got {other:?}"),
        }

        match tree.render(node, 10, 10) {
            Err(Error::NotImplemented { method, .. }) => {
                assert_eq!(method, "render_core");
            }
            other => panic!("expected NotImplemented, got {other:?}"),
        }
    }

    #[test]
    fn test_base_value_lookup() {
        let base = ControlBase::new(PROPS);
        assert_eq!(base.position("flag"), Some(0));
        assert_eq!(base.position("missing"), None);
        assert!(base.value("missing").is_none());
    }
}
