//! Stack: linear container layout.
//!
//! Lays out its children along one axis, in insertion order, with optional
//! inter-child spacing and an optional bullet marker drawn immediately
//! before each child.
//!
//! Measuring is greedy: each child is measured with the cross axis held at
//! the full available extent and the main axis unconstrained, so children
//! report their natural size and the stack sums them.

use crate::controls::primitives::{Bullet, Orientation};
use crate::controls::property::{Invalidate, Property, Value, ValueKind};
use crate::controls::{Control, ControlBase};
use crate::drawing::Style;
use crate::error::Result;
use crate::measure::display_width;
use crate::renderer::Surface;
use crate::tree::LayoutContext;
use crate::types::{Extent, UNCONSTRAINED};

/// Two string bullets are layout-equivalent iff their rendered widths match;
/// a width change shifts every downstream child. Any other change (glyph
/// variants, nulling) re-measures.
fn bullet_measure_changed(old: &Value, new: &Value) -> bool {
    match (old, new) {
        (Value::Str(old), Value::Str(new)) => display_width(old) != display_width(new),
        _ => true,
    }
}

/// A control that displays a stack of controls.
pub struct Stack {
    base: ControlBase,
}

impl Stack {
    pub const PROPERTIES: &'static [Property] = &[
        Property {
            name: "bullet",
            kinds: &[ValueKind::Bullet, ValueKind::Str],
            default: || Value::Bullet(Bullet::None),
            nullable: true,
            measure: Invalidate::When(bullet_measure_changed),
            paint: Invalidate::Always,
        },
        Property {
            name: "orientation",
            kinds: &[ValueKind::Orientation],
            default: || Value::Orientation(Orientation::Horizontal),
            nullable: false,
            measure: Invalidate::Always,
            paint: Invalidate::Always,
        },
        Property {
            name: "spacing",
            kinds: &[ValueKind::Int],
            default: || Value::Int(0),
            nullable: false,
            measure: Invalidate::Always,
            paint: Invalidate::Always,
        },
    ];

    pub fn new() -> Self {
        Self {
            base: ControlBase::new(Self::PROPERTIES),
        }
    }

    fn orientation(&self) -> Orientation {
        match self.base.value("orientation") {
            Some(Value::Orientation(orientation)) => *orientation,
            _ => Orientation::Horizontal,
        }
    }

    fn spacing(&self) -> u16 {
        let spacing = self.base.value("spacing").map_or(0, |v| v.int_or(0));
        spacing.clamp(0, u16::MAX as i64) as u16
    }

    /// The bullet text, `None` when no marker is configured.
    fn bullet(&self) -> Option<String> {
        match self.base.value("bullet") {
            Some(Value::Bullet(bullet)) if *bullet != Bullet::None => {
                Some(bullet.glyph().to_string())
            }
            Some(Value::Str(text)) if !text.is_empty() => Some(text.clone()),
            _ => None,
        }
    }

    /// Main-axis cells the bullet reserves before each child.
    fn bullet_reservation(bullet: Option<&str>, orientation: Orientation) -> u16 {
        match (bullet, orientation) {
            (Some(text), Orientation::Horizontal) => display_width(text),
            (Some(_), Orientation::Vertical) => 1,
            (None, _) => 0,
        }
    }
}

impl Default for Stack {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Stack {
    fn kind(&self) -> &'static str {
        "Stack"
    }

    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn measure_core(
        &self,
        ctx: &mut LayoutContext<'_>,
        available_height: u16,
        available_width: u16,
    ) -> Result<Extent> {
        let orientation = self.orientation();
        let spacing = self.spacing();
        let bullet = self.bullet();
        let reservation = Self::bullet_reservation(bullet.as_deref(), orientation);
        let children = ctx.children();

        let mut main: u16 = 0;
        let mut cross: u16 = 0;

        for (i, &child) in children.iter().enumerate() {
            if i > 0 {
                main = main.saturating_add(spacing);
            }
            main = main.saturating_add(reservation);

            let extent = match orientation {
                Orientation::Horizontal => {
                    ctx.measure_child(child, available_height, UNCONSTRAINED)?
                }
                Orientation::Vertical => {
                    ctx.measure_child(child, UNCONSTRAINED, available_width)?
                }
            };

            match orientation {
                Orientation::Horizontal => {
                    main = main.saturating_add(extent.width);
                    cross = cross.max(extent.height);
                }
                Orientation::Vertical => {
                    main = main.saturating_add(extent.height);
                    cross = cross.max(extent.width);
                }
            }
        }

        // The bullet occupies the cross axis too: one row beside horizontal
        // children, its display width beside vertical ones.
        if let Some(text) = &bullet {
            if !children.is_empty() {
                cross = cross.max(match orientation {
                    Orientation::Horizontal => 1,
                    Orientation::Vertical => display_width(text),
                });
            }
        }

        let cross_available = match orientation {
            Orientation::Horizontal => available_height,
            Orientation::Vertical => available_width,
        };
        if cross_available != UNCONSTRAINED {
            cross = cross.min(cross_available);
        }

        Ok(match orientation {
            Orientation::Horizontal => Extent::new(cross, main),
            Orientation::Vertical => Extent::new(main, cross),
        })
    }

    fn render_core(
        &self,
        ctx: &mut LayoutContext<'_>,
        height: u16,
        width: u16,
    ) -> Result<Surface> {
        let orientation = self.orientation();
        let spacing = self.spacing();
        let bullet = self.bullet();
        let children = ctx.children();

        let mut surface = Surface::new(height, width);
        let mut pos: u16 = 0;

        for (i, &child) in children.iter().enumerate() {
            if i > 0 {
                pos = pos.saturating_add(spacing);
            }

            if let Some(text) = &bullet {
                match orientation {
                    Orientation::Horizontal => {
                        surface.write_str(0, pos, text, None, None, Style::EMPTY);
                        pos = pos.saturating_add(display_width(text));
                    }
                    Orientation::Vertical => {
                        surface.write_str(pos, 0, text, None, None, Style::EMPTY);
                        pos = pos.saturating_add(1);
                    }
                }
            }

            // Natural size from the measure pass (cached when clean).
            let extent = match orientation {
                Orientation::Horizontal => ctx.measure_child(child, height, UNCONSTRAINED)?,
                Orientation::Vertical => ctx.measure_child(child, UNCONSTRAINED, width)?,
            };

            let (child_height, child_width) = match orientation {
                Orientation::Horizontal => (extent.height.min(height), extent.width),
                Orientation::Vertical => (extent.height, extent.width.min(width)),
            };
            let patch = ctx.render_child(child, child_height, child_width)?;

            match orientation {
                Orientation::Horizontal => {
                    surface.blit(0, pos, &patch);
                    pos = pos.saturating_add(extent.width);
                }
                Orientation::Vertical => {
                    surface.blit(pos, 0, &patch);
                    pos = pos.saturating_add(extent.height);
                }
            }
        }

        Ok(surface)
    }
}
