//! Text: styled text leaf.
//!
//! The simplest concrete control, and the usual content of stacks and
//! popups. Its `text` measure rule is a predicate: assignments that keep the
//! measured block size (line count by widest line) only dirty paint.

use crate::controls::property::{Invalidate, Property, Value, ValueKind};
use crate::controls::{Control, ControlBase};
use crate::drawing::{Color, Style};
use crate::error::Result;
use crate::measure::block_size;
use crate::renderer::Surface;
use crate::tree::LayoutContext;
use crate::types::Extent;

/// Text only re-measures when its block size changes; edits within the same
/// footprint repaint in place.
fn text_measure_changed(old: &Value, new: &Value) -> bool {
    match (old, new) {
        (Value::Str(old), Value::Str(new)) => block_size(old) != block_size(new),
        _ => true,
    }
}

/// A control that displays a block of styled text.
pub struct Text {
    base: ControlBase,
}

impl Text {
    pub const PROPERTIES: &'static [Property] = &[
        Property {
            name: "background",
            kinds: &[ValueKind::Color],
            default: || Value::None,
            nullable: true,
            measure: Invalidate::Never,
            paint: Invalidate::Always,
        },
        Property {
            name: "foreground",
            kinds: &[ValueKind::Color],
            default: || Value::None,
            nullable: true,
            measure: Invalidate::Never,
            paint: Invalidate::Always,
        },
        Property {
            name: "style",
            kinds: &[ValueKind::Style],
            default: || Value::None,
            nullable: true,
            measure: Invalidate::Never,
            paint: Invalidate::Always,
        },
        Property {
            name: "text",
            kinds: &[ValueKind::Str],
            default: || Value::Str(String::new()),
            nullable: false,
            measure: Invalidate::When(text_measure_changed),
            paint: Invalidate::Always,
        },
    ];

    pub fn new() -> Self {
        Self {
            base: ControlBase::new(Self::PROPERTIES),
        }
    }

    fn text(&self) -> &str {
        self.base
            .value("text")
            .and_then(|v| v.as_str())
            .unwrap_or("")
    }

    fn color(&self, name: &str) -> Option<Color> {
        match self.base.value(name) {
            Some(Value::Color(color)) => Some(*color),
            _ => None,
        }
    }

    fn style(&self) -> Style {
        match self.base.value("style") {
            Some(Value::Style(style)) => *style,
            _ => Style::EMPTY,
        }
    }
}

impl Default for Text {
    fn default() -> Self {
        Self::new()
    }
}

impl Control for Text {
    fn kind(&self) -> &'static str {
        "Text"
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
        available_height: u16,
        available_width: u16,
    ) -> Result<Extent> {
        let block = block_size(self.text());
        Ok(Extent::new(
            block.height.min(available_height),
            block.width.min(available_width),
        ))
    }

    fn render_core(
        &self,
        _ctx: &mut LayoutContext<'_>,
        height: u16,
        width: u16,
    ) -> Result<Surface> {
        let foreground = self.color("foreground");
        let background = self.color("background");
        let style = self.style();

        let mut surface = Surface::new(height, width);
        for (y, line) in self.text().split('\n').take(height as usize).enumerate() {
            surface.write_str(y as u16, 0, line, foreground, background, style);
        }
        Ok(surface)
    }
}
