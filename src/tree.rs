//! Control tree - ownership, invalidation propagation, layout drivers.
//!
//! The tree is an arena: every control lives in a slot owned by the tree,
//! and parent/child links are [`NodeId`]s rather than references, so a
//! removed child can never dereference a freed parent. Freed slots go to a
//! pool for reuse.
//!
//! All mutation goes through the tree:
//! - [`ControlTree::set`] assigns a property through its descriptor,
//!   evaluates the invalidation rules, and propagates measure dirt upward
//!   (stopping at the first already-dirty ancestor, which bounds the walk to
//!   tree depth).
//! - [`ControlTree::measure`] / [`ControlTree::render`] are the pass
//!   drivers: they consult the dirty bits and only call
//!   `measure_core`/`render_core` on stale nodes, caching the results.
//!
//! Paint dirt never propagates upward. Instead the render driver treats a
//! node as stale when its own flag is set or any descendant's is, so a
//! container re-composites whenever a child repainted.
//!
//! Single-threaded by design: `&mut self` serializes every mutation, and
//! there are no suspension points inside a pass.

use tracing::trace;

use crate::controls::{Control, Dirty, Placement, Value};
use crate::error::{Error, Result};
use crate::renderer::Surface;
use crate::types::{Extent, NodeId, Point};

// =============================================================================
// Nodes
// =============================================================================

struct Node {
    /// The control itself; `None` only while its own core hook runs.
    control: Option<Box<dyn Control>>,
    /// Non-owning back-reference, cleared on detach.
    parent: Option<NodeId>,
    /// Owned children; insertion order is layout order.
    children: Vec<NodeId>,
}

// =============================================================================
// ControlTree
// =============================================================================

/// Arena owning a tree of controls.
pub struct ControlTree {
    nodes: Vec<Option<Node>>,
    free: Vec<usize>,
    cursor: Point,
}

impl ControlTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            cursor: Point::ORIGIN,
        }
    }

    /// Insert a control as a new root (no parent).
    pub fn insert(&mut self, control: impl Control + 'static) -> NodeId {
        let node = Node {
            control: Some(Box::new(control)),
            parent: None,
            children: Vec::new(),
        };

        let id = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                NodeId(index)
            }
            None => {
                self.nodes.push(Some(node));
                NodeId(self.nodes.len() - 1)
            }
        };

        trace!(node = %id, "control inserted");
        id
    }

    /// Insert a control as the last child of `parent`.
    ///
    /// Child membership affects the parent's size and content, so the parent
    /// is marked measure- and paint-dirty.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        control: impl Control + 'static,
    ) -> Result<NodeId> {
        self.node(parent)?;
        let child = self.insert(control);
        self.link(parent, child)?;
        Ok(child)
    }

    /// Attach an existing root node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        if self.node(child)?.parent.is_some() {
            return Err(Error::InvalidNode(child));
        }

        // Reject attaching a node into its own subtree.
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(Error::InvalidNode(child));
            }
            current = self.node(id)?.parent;
        }

        self.link(parent, child)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node_mut(child)?.parent = Some(parent);
        self.node_mut(parent)?.children.push(child);
        self.invalidate_parent(parent);
        Ok(())
    }

    /// Unlink `child` from its parent, keeping it alive as a root.
    ///
    /// The cleared back-reference guarantees subsequent property changes on
    /// the orphan never propagate into the former parent.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let Some(parent) = self.node(child)?.parent else {
            return Ok(());
        };

        self.node_mut(parent)?.children.retain(|&c| c != child);
        self.node_mut(child)?.parent = None;
        self.invalidate_parent(parent);

        trace!(node = %child, parent = %parent, "child detached");
        Ok(())
    }

    /// Remove a node and its whole subtree, returning slots to the pool.
    pub fn remove(&mut self, node: NodeId) -> Result<()> {
        self.node(node)?;
        self.detach(node)?;
        self.release(node);
        Ok(())
    }

    fn release(&mut self, node: NodeId) {
        let Some(slot) = self.nodes.get_mut(node.0).and_then(|s| s.take()) else {
            return;
        };
        for child in slot.children {
            self.release(child);
        }
        self.free.push(node.0);
        trace!(node = %node, "control released");
    }

    /// Whether the node is currently in the tree.
    pub fn contains(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.0), Some(Some(_)))
    }

    /// The node's children, in layout order.
    pub fn children(&self, node: NodeId) -> Result<&[NodeId]> {
        Ok(&self.node(node)?.children)
    }

    /// The node's parent, if attached.
    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(node)?.parent)
    }

    /// Cursor position supplied by the host, used as the popup anchor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Update the externally supplied cursor position.
    pub fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    // =========================================================================
    // Properties & invalidation
    // =========================================================================

    /// Assign a property through its descriptor.
    ///
    /// The descriptor enforces the declared kinds and nullability before
    /// anything is stored; on a constraint violation the property is left
    /// unmodified and no flags change. A successful assignment always stores
    /// the value, then dirties measure and/or paint state per the
    /// descriptor's rules (a change can mark neither, either, or both).
    pub fn set(&mut self, node: NodeId, name: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();

        let fired_measure = {
            let entry = self.node_mut(node)?;
            let control = entry.control.as_mut().ok_or(Error::InvalidNode(node))?;
            let kind = control.kind();

            let index =
                control
                    .base()
                    .position(name)
                    .ok_or_else(|| Error::UnknownProperty {
                        control: kind,
                        property: name.to_string(),
                    })?;
            let property = &control.base().properties()[index];

            if !property.accepts(&value) {
                return Err(Error::TypeConstraint {
                    control: kind,
                    property: property.name,
                    given: value.describe(),
                });
            }

            let old = control.base_mut().replace_value(index, value);
            let new = control.base().value_at(index);
            let fired_measure = property.measure.fires(&old, new);
            let fired_paint = property.paint.fires(&old, new);

            trace!(
                node = %node,
                property = property.name,
                measure = fired_measure,
                paint = fired_paint,
                "property assigned"
            );

            if fired_paint {
                control.base_mut().mark(Dirty::PAINT);
            }
            fired_measure
        };

        if fired_measure {
            self.mark_measure_dirty(node);
        }
        Ok(())
    }

    /// Current value of a property.
    pub fn get(&self, node: NodeId, name: &str) -> Result<&Value> {
        let control = self.control(node)?;
        control.base().value(name).ok_or_else(|| Error::UnknownProperty {
            control: control.kind(),
            property: name.to_string(),
        })
    }

    /// Current dirty bits of a node.
    pub fn dirty(&self, node: NodeId) -> Result<Dirty> {
        Ok(self.control(node)?.base().dirty())
    }

    /// Explicitly mark a node dirty, e.g. after the available extent changed.
    ///
    /// Measure dirt propagates upward exactly as a property assignment would.
    pub fn invalidate(&mut self, node: NodeId, flags: Dirty) -> Result<()> {
        if flags.contains(Dirty::PAINT) {
            self.control_mut(node)?.base_mut().mark(Dirty::PAINT);
        }
        if flags.contains(Dirty::MEASURE) {
            self.mark_measure_dirty(node);
        }
        Ok(())
    }

    /// Walk ancestors, marking measure dirt; stops at the first node that is
    /// already measure-dirty (its ancestors must already be marked too).
    fn mark_measure_dirty(&mut self, node: NodeId) {
        let mut current = Some(node);
        while let Some(id) = current {
            let Ok(entry) = self.node_mut(id) else { break };
            let parent = entry.parent;
            let Some(control) = entry.control.as_mut() else { break };

            if control.base().dirty().contains(Dirty::MEASURE) {
                break;
            }
            control.base_mut().mark(Dirty::MEASURE);
            trace!(node = %id, "measure dirt propagated");
            current = parent;
        }
    }

    /// Child membership changed: the parent must re-measure and repaint.
    fn invalidate_parent(&mut self, parent: NodeId) {
        if let Ok(control) = self.control_mut(parent) {
            control.base_mut().mark(Dirty::PAINT);
        }
        self.mark_measure_dirty(parent);
    }

    // =========================================================================
    // Measure / render drivers
    // =========================================================================

    /// Measure a node within the available extent.
    ///
    /// With a clear measure flag this returns the cached result in O(1)
    /// without invoking `measure_core`. Otherwise the control's
    /// `measure_core` runs, its result is cached, and the flag clears.
    pub fn measure(
        &mut self,
        node: NodeId,
        available_height: u16,
        available_width: u16,
    ) -> Result<Extent> {
        {
            let control = self.control(node)?;
            if !control.base().dirty().contains(Dirty::MEASURE) {
                if let Some(extent) = control.base().cached_measure() {
                    return Ok(extent);
                }
            }
        }

        let mut control = self.take(node)?;
        let result = {
            let mut ctx = LayoutContext { tree: self, node };
            control.measure_core(&mut ctx, available_height, available_width)
        };

        match result {
            Ok(extent) => {
                control.base_mut().store_measure(extent);
                self.restore(node, control);
                trace!(node = %node, ?extent, "measured");
                Ok(extent)
            }
            Err(error) => {
                self.restore(node, control);
                Err(error)
            }
        }
    }

    /// Render a node into the assigned size.
    ///
    /// Same caching discipline as [`measure`](Self::measure), against the
    /// paint flag - with the twist that a container is also stale when any
    /// descendant is paint-dirty, so it re-composites repainted children.
    pub fn render(&mut self, node: NodeId, height: u16, width: u16) -> Result<Surface> {
        if !self.paint_stale(node)? {
            if let Some(surface) = self.control(node)?.base().cached_render() {
                return Ok(surface.clone());
            }
        }

        let mut control = self.take(node)?;
        let result = {
            let mut ctx = LayoutContext { tree: self, node };
            control.render_core(&mut ctx, height, width)
        };

        match result {
            Ok(surface) => {
                control.base_mut().store_render(surface.clone());
                self.restore(node, control);
                trace!(node = %node, height, width, "rendered");
                Ok(surface)
            }
            Err(error) => {
                self.restore(node, control);
                Err(error)
            }
        }
    }

    /// A node needs repainting when its own flag is set, it has never been
    /// painted, or any descendant is stale. The scan short-circuits at the
    /// first stale node.
    fn paint_stale(&self, node: NodeId) -> Result<bool> {
        let entry = self.node(node)?;
        let control = entry.control.as_ref().ok_or(Error::InvalidNode(node))?;

        if control.base().dirty().contains(Dirty::PAINT) || control.base().cached_render().is_none()
        {
            return Ok(true);
        }
        for &child in &entry.children {
            if self.paint_stale(child)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    // =========================================================================
    // Popup compositing
    // =========================================================================

    /// Measure and render an anchored overlay, then draw it over `base`.
    ///
    /// The node's `placement` anchor plus its `(vertical_offset,
    /// horizontal_offset)` determine the origin; the cursor anchor is the
    /// externally supplied [`cursor`](Self::cursor). Composited last, the
    /// overlay draws over whatever the base layout produced there, clipped
    /// at the base edges.
    pub fn composite(
        &mut self,
        base: &mut Surface,
        node: NodeId,
        available_height: u16,
        available_width: u16,
    ) -> Result<()> {
        let extent = self.measure(node, available_height, available_width)?;
        let surface = self.render(node, extent.height, extent.width)?;
        let origin = self.overlay_origin(node)?;

        trace!(node = %node, ?origin, "overlay composited");
        base.overlay(&surface, origin);
        Ok(())
    }

    fn overlay_origin(&self, node: NodeId) -> Result<Point> {
        let base = self.control(node)?.base();

        let placement = match base.value("placement") {
            Some(Value::Placement(p)) => *p,
            _ => Placement::Cursor,
        };
        let dy = saturate_offset(base.value("vertical_offset").map_or(0, |v| v.int_or(0)));
        let dx = saturate_offset(base.value("horizontal_offset").map_or(0, |v| v.int_or(0)));

        let anchor = match placement {
            Placement::Cursor => self.cursor,
            Placement::Origin => Point::ORIGIN,
        };
        Ok(Point::new(
            anchor.y.saturating_add(dy),
            anchor.x.saturating_add(dx),
        ))
    }

    // =========================================================================
    // Slot access
    // =========================================================================

    fn node(&self, node: NodeId) -> Result<&Node> {
        self.nodes
            .get(node.0)
            .and_then(|slot| slot.as_ref())
            .ok_or(Error::InvalidNode(node))
    }

    fn node_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(node.0)
            .and_then(|slot| slot.as_mut())
            .ok_or(Error::InvalidNode(node))
    }

    fn control(&self, node: NodeId) -> Result<&dyn Control> {
        self.node(node)?
            .control
            .as_deref()
            .ok_or(Error::InvalidNode(node))
    }

    fn control_mut(&mut self, node: NodeId) -> Result<&mut (dyn Control + 'static)> {
        self.node_mut(node)?
            .control
            .as_deref_mut()
            .ok_or(Error::InvalidNode(node))
    }

    /// Take the control out of its slot while its core hook runs.
    fn take(&mut self, node: NodeId) -> Result<Box<dyn Control>> {
        self.node_mut(node)?
            .control
            .take()
            .ok_or(Error::InvalidNode(node))
    }

    fn restore(&mut self, node: NodeId, control: Box<dyn Control>) {
        if let Ok(entry) = self.node_mut(node) {
            entry.control = Some(control);
        }
    }
}

/// Clamp an offset to the point range; extreme values stay off-surface
/// instead of wrapping back on.
fn saturate_offset(offset: i64) -> i32 {
    offset.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl Default for ControlTree {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// LayoutContext
// =============================================================================

/// Tree access handed to `measure_core`/`render_core`.
///
/// Scoped to the node being laid out: it exposes that node's children and
/// the measure/render drivers for them, nothing else.
pub struct LayoutContext<'t> {
    tree: &'t mut ControlTree,
    node: NodeId,
}

impl LayoutContext<'_> {
    /// The current node's children, in layout order.
    pub fn children(&self) -> Vec<NodeId> {
        self.tree
            .node(self.node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Measure a child (cached when its flag is clear).
    pub fn measure_child(
        &mut self,
        child: NodeId,
        available_height: u16,
        available_width: u16,
    ) -> Result<Extent> {
        self.ensure_child(child)?;
        self.tree.measure(child, available_height, available_width)
    }

    /// Render a child into the given size (cached when clean).
    pub fn render_child(&mut self, child: NodeId, height: u16, width: u16) -> Result<Surface> {
        self.ensure_child(child)?;
        self.tree.render(child, height, width)
    }

    /// Cursor position supplied by the host.
    pub fn cursor(&self) -> Point {
        self.tree.cursor
    }

    fn ensure_child(&self, child: NodeId) -> Result<()> {
        if self.tree.node(self.node)?.children.contains(&child) {
            Ok(())
        } else {
            Err(Error::InvalidNode(child))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::controls::{ControlBase, Invalidate, Property, ValueKind};

    const PROBE_PROPS: &[Property] = &[
        Property {
            name: "pad",
            kinds: &[ValueKind::Int],
            default: || Value::Int(0),
            nullable: false,
            measure: Invalidate::Always,
            paint: Invalidate::Always,
        },
        Property {
            name: "tint",
            kinds: &[ValueKind::Int],
            default: || Value::Int(0),
            nullable: false,
            measure: Invalidate::Never,
            paint: Invalidate::Always,
        },
        Property {
            name: "tag",
            kinds: &[ValueKind::Int],
            default: || Value::Int(0),
            nullable: false,
            measure: Invalidate::Never,
            paint: Invalidate::Never,
        },
    ];

    /// Leaf control counting its core invocations.
    struct Probe {
        base: ControlBase,
        measures: Rc<Cell<usize>>,
        renders: Rc<Cell<usize>>,
    }

    impl Probe {
        fn new() -> (Self, Rc<Cell<usize>>, Rc<Cell<usize>>) {
            let measures = Rc::new(Cell::new(0));
            let renders = Rc::new(Cell::new(0));
            let probe = Self {
                base: ControlBase::new(PROBE_PROPS),
                measures: measures.clone(),
                renders: renders.clone(),
            };
            (probe, measures, renders)
        }
    }

    impl Control for Probe {
        fn kind(&self) -> &'static str {
            "Probe"
        }
        fn base(&self) -> &ControlBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ControlBase {
            &mut self.base
        }
        fn measure_core(
            &self,
            _ctx: &mut LayoutContext<'_>,
            _h: u16,
            _w: u16,
        ) -> Result<Extent> {
            self.measures.set(self.measures.get() + 1);
            Ok(Extent::new(1, 3))
        }
        fn render_core(&self, _ctx: &mut LayoutContext<'_>, h: u16, w: u16) -> Result<Surface> {
            self.renders.set(self.renders.get() + 1);
            Ok(Surface::new(h, w))
        }
    }

    /// Container that sizes to and repaints its children.
    struct Wrap {
        base: ControlBase,
        renders: Rc<Cell<usize>>,
    }

    impl Wrap {
        fn new() -> (Self, Rc<Cell<usize>>) {
            let renders = Rc::new(Cell::new(0));
            let wrap = Self {
                base: ControlBase::new(&[]),
                renders: renders.clone(),
            };
            (wrap, renders)
        }
    }

    impl Control for Wrap {
        fn kind(&self) -> &'static str {
            "Wrap"
        }
        fn base(&self) -> &ControlBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut ControlBase {
            &mut self.base
        }
        fn measure_core(&self, ctx: &mut LayoutContext<'_>, h: u16, w: u16) -> Result<Extent> {
            match ctx.children().first() {
                Some(&child) => ctx.measure_child(child, h, w),
                None => Ok(Extent::ZERO),
            }
        }
        fn render_core(&self, ctx: &mut LayoutContext<'_>, h: u16, w: u16) -> Result<Surface> {
            self.renders.set(self.renders.get() + 1);
            let mut surface = Surface::new(h, w);
            for child in ctx.children() {
                let patch = ctx.render_child(child, h, w)?;
                surface.blit(0, 0, &patch);
            }
            Ok(surface)
        }
    }

    #[test]
    fn test_measure_render_idempotent() {
        let mut tree = ControlTree::new();
        let (probe, measures, renders) = Probe::new();
        let node = tree.insert(probe);

        let first = tree.measure(node, 10, 10).unwrap();
        let second = tree.measure(node, 10, 10).unwrap();
        assert_eq!(first, second);
        assert_eq!(measures.get(), 1);

        let a = tree.render(node, 1, 3).unwrap();
        let b = tree.render(node, 1, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(renders.get(), 1);
        assert_eq!(tree.dirty(node).unwrap(), Dirty::empty());
    }

    #[test]
    fn test_paint_only_property_skips_measure() {
        let mut tree = ControlTree::new();
        let (probe, measures, renders) = Probe::new();
        let node = tree.insert(probe);

        tree.measure(node, 10, 10).unwrap();
        tree.render(node, 1, 3).unwrap();

        tree.set(node, "tint", 5i64).unwrap();
        assert_eq!(tree.dirty(node).unwrap(), Dirty::PAINT);

        tree.measure(node, 10, 10).unwrap();
        tree.render(node, 1, 3).unwrap();
        assert_eq!(measures.get(), 1, "paint-only change must not re-measure");
        assert_eq!(renders.get(), 2);
    }

    #[test]
    fn test_inert_property_marks_nothing() {
        let mut tree = ControlTree::new();
        let (probe, ..) = Probe::new();
        let node = tree.insert(probe);

        tree.measure(node, 10, 10).unwrap();
        tree.render(node, 1, 3).unwrap();

        tree.set(node, "tag", 9i64).unwrap();
        assert_eq!(tree.dirty(node).unwrap(), Dirty::empty());
        // The value is stored even though no work was scheduled.
        assert_eq!(tree.get(node, "tag").unwrap(), &Value::Int(9));
    }

    #[test]
    fn test_measure_dirt_propagates_to_ancestors() {
        let mut tree = ControlTree::new();
        let (root, ..) = Probe::new();
        let (mid, ..) = Probe::new();
        let (leaf, ..) = Probe::new();

        let root = tree.insert(root);
        let mid = tree.insert_child(root, mid).unwrap();
        let leaf = tree.insert_child(mid, leaf).unwrap();

        for node in [root, mid, leaf] {
            tree.measure(node, 10, 10).unwrap();
            tree.render(node, 1, 3).unwrap();
            assert_eq!(tree.dirty(node).unwrap(), Dirty::empty());
        }

        tree.set(leaf, "pad", 1i64).unwrap();
        assert!(tree.dirty(leaf).unwrap().contains(Dirty::MEASURE));
        assert!(tree.dirty(mid).unwrap().contains(Dirty::MEASURE));
        assert!(tree.dirty(root).unwrap().contains(Dirty::MEASURE));

        // Paint dirt stays local.
        assert!(!tree.dirty(mid).unwrap().contains(Dirty::PAINT));
        assert!(!tree.dirty(root).unwrap().contains(Dirty::PAINT));
    }

    #[test]
    fn test_propagation_stops_at_dirty_ancestor() {
        let mut tree = ControlTree::new();
        let (root, ..) = Probe::new();
        let (leaf, ..) = Probe::new();
        let root = tree.insert(root);
        let leaf = tree.insert_child(root, leaf).unwrap();

        // Never measured: everything starts dirty, assignment is idempotent.
        tree.set(leaf, "pad", 1i64).unwrap();
        tree.set(leaf, "pad", 2i64).unwrap();
        assert!(tree.dirty(root).unwrap().contains(Dirty::MEASURE));
    }

    #[test]
    fn test_container_repaints_when_child_paints() {
        let mut tree = ControlTree::new();
        let (wrap, wrap_renders) = Wrap::new();
        let (probe, _, probe_renders) = Probe::new();

        let root = tree.insert(wrap);
        let child = tree.insert_child(root, probe).unwrap();

        tree.measure(root, 10, 10).unwrap();
        tree.render(root, 1, 3).unwrap();
        assert_eq!(wrap_renders.get(), 1);

        // Clean subtree: cached composite, no repaint anywhere.
        tree.render(root, 1, 3).unwrap();
        assert_eq!(wrap_renders.get(), 1);
        assert_eq!(probe_renders.get(), 1);

        // Child repaint forces the container to re-composite.
        tree.set(child, "tint", 1i64).unwrap();
        tree.render(root, 1, 3).unwrap();
        assert_eq!(wrap_renders.get(), 2);
        assert_eq!(probe_renders.get(), 2);
    }

    #[test]
    fn test_type_constraint_leaves_state_untouched() {
        let mut tree = ControlTree::new();
        let (probe, ..) = Probe::new();
        let node = tree.insert(probe);

        tree.measure(node, 10, 10).unwrap();
        tree.render(node, 1, 3).unwrap();
        tree.set(node, "pad", 4i64).unwrap();
        tree.measure(node, 10, 10).unwrap();
        tree.render(node, 1, 3).unwrap();

        let error = tree.set(node, "pad", "nope").unwrap_err();
        assert!(matches!(
            error,
            Error::TypeConstraint {
                control: "Probe",
                property: "pad",
                ..
            }
        ));
        assert_eq!(tree.get(node, "pad").unwrap(), &Value::Int(4));
        assert_eq!(tree.dirty(node).unwrap(), Dirty::empty());
    }

    #[test]
    fn test_unknown_property() {
        let mut tree = ControlTree::new();
        let (probe, ..) = Probe::new();
        let node = tree.insert(probe);

        assert!(matches!(
            tree.set(node, "nope", 1i64),
            Err(Error::UnknownProperty { .. })
        ));
        assert!(matches!(
            tree.get(node, "nope"),
            Err(Error::UnknownProperty { .. })
        ));
    }

    #[test]
    fn test_orphan_does_not_touch_former_parent() {
        let mut tree = ControlTree::new();
        let (root, ..) = Probe::new();
        let (leaf, ..) = Probe::new();
        let root = tree.insert(root);
        let leaf = tree.insert_child(root, leaf).unwrap();

        tree.detach(leaf).unwrap();
        assert_eq!(tree.parent(leaf).unwrap(), None);

        // Settle the former parent, then dirty the orphan.
        tree.measure(root, 10, 10).unwrap();
        tree.render(root, 1, 3).unwrap();
        tree.set(leaf, "pad", 7i64).unwrap();

        assert_eq!(tree.dirty(root).unwrap(), Dirty::empty());
    }

    #[test]
    fn test_remove_drops_subtree_and_reuses_slots() {
        let mut tree = ControlTree::new();
        let (root, ..) = Probe::new();
        let (mid, ..) = Probe::new();
        let (leaf, ..) = Probe::new();

        let root = tree.insert(root);
        let mid = tree.insert_child(root, mid).unwrap();
        let leaf = tree.insert_child(mid, leaf).unwrap();

        tree.remove(mid).unwrap();
        assert!(tree.contains(root));
        assert!(!tree.contains(mid));
        assert!(!tree.contains(leaf));
        assert!(tree.children(root).unwrap().is_empty());
        assert!(matches!(
            tree.measure(leaf, 5, 5),
            Err(Error::InvalidNode(_))
        ));

        // Freed slots are reused.
        let (again, ..) = Probe::new();
        let reused = tree.insert(again);
        assert!([mid, leaf].contains(&reused));
    }

    #[test]
    fn test_append_child_rejects_cycles_and_attached_nodes() {
        let mut tree = ControlTree::new();
        let (a, ..) = Probe::new();
        let (b, ..) = Probe::new();
        let a = tree.insert(a);
        let b = tree.insert_child(a, b).unwrap();

        // Already attached.
        assert!(tree.append_child(a, b).is_err());
        // Would create a cycle.
        tree.detach(b).unwrap();
        assert!(tree.append_child(a, b).is_ok());
        assert!(tree.append_child(b, a).is_err());
    }

    #[test]
    fn test_explicit_invalidate_propagates_measure() {
        let mut tree = ControlTree::new();
        let (root, ..) = Probe::new();
        let (leaf, ..) = Probe::new();
        let root = tree.insert(root);
        let leaf = tree.insert_child(root, leaf).unwrap();

        for node in [root, leaf] {
            tree.measure(node, 10, 10).unwrap();
            tree.render(node, 1, 3).unwrap();
        }

        tree.invalidate(leaf, Dirty::PAINT).unwrap();
        assert_eq!(tree.dirty(leaf).unwrap(), Dirty::PAINT);
        assert_eq!(tree.dirty(root).unwrap(), Dirty::empty());

        tree.invalidate(leaf, Dirty::MEASURE).unwrap();
        assert!(tree.dirty(root).unwrap().contains(Dirty::MEASURE));
    }

    #[test]
    fn test_insertion_dirties_parent() {
        let mut tree = ControlTree::new();
        let (root, ..) = Probe::new();
        let root = tree.insert(root);
        tree.measure(root, 10, 10).unwrap();
        tree.render(root, 1, 3).unwrap();

        let (child, ..) = Probe::new();
        tree.insert_child(root, child).unwrap();
        assert_eq!(tree.dirty(root).unwrap(), Dirty::all());
    }
}
