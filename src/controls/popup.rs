//! Popup: anchored overlay.
//!
//! A popup sits outside the normal layout traversal: instead of contributing
//! extent to a parent's measure pass, it resolves its own on-screen origin
//! from its `placement` anchor (e.g. the externally supplied cursor
//! position) plus pixel offsets, and is composited last so it draws over
//! whatever the base layout produced there - see
//! [`ControlTree::composite`](crate::tree::ControlTree::composite).
//!
//! None of its properties dirty measure or paint: position is resolved at
//! composite time, not cached.

use crate::controls::primitives::Placement;
use crate::controls::property::{Invalidate, Property, Value, ValueKind};
use crate::controls::{Control, ControlBase};
use crate::error::Result;
use crate::renderer::Surface;
use crate::tree::LayoutContext;
use crate::types::Extent;

/// The base pop-up control: a single content region with anchored placement.
pub struct Popup {
    base: ControlBase,
}

impl Popup {
    pub const PROPERTIES: &'static [Property] = &[
        Property {
            name: "horizontal_offset",
            kinds: &[ValueKind::Int],
            default: || Value::Int(0),
            nullable: false,
            measure: Invalidate::Never,
            paint: Invalidate::Never,
        },
        Property {
            name: "placement",
            kinds: &[ValueKind::Placement],
            default: || Value::Placement(Placement::Cursor),
            nullable: false,
            measure: Invalidate::Never,
            paint: Invalidate::Never,
        },
        Property {
            name: "vertical_offset",
            kinds: &[ValueKind::Int],
            default: || Value::Int(0),
            nullable: false,
            measure: Invalidate::Never,
            paint: Invalidate::Never,
        },
    ];

    pub fn new() -> Self {
        Self {
            base: ControlBase::new(Self::PROPERTIES),
        }
    }
}

impl Default for Popup {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Popup {
    fn kind(&self) -> &'static str {
        "Popup"
    }

    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    /// Size of the single content region (the first child), zero without one.
    fn measure_core(
        &self,
        ctx: &mut LayoutContext<'_>,
        available_height: u16,
        available_width: u16,
    ) -> Result<Extent> {
        match ctx.children().first() {
            Some(&content) => ctx.measure_child(content, available_height, available_width),
            None => Ok(Extent::ZERO),
        }
    }

    fn render_core(
        &self,
        ctx: &mut LayoutContext<'_>,
        height: u16,
        width: u16,
    ) -> Result<Surface> {
        let mut surface = Surface::new(height, width);
        if let Some(&content) = ctx.children().first() {
            let patch = ctx.render_child(content, height, width)?;
            surface.blit(0, 0, &patch);
        }
        Ok(surface)
    }
}
