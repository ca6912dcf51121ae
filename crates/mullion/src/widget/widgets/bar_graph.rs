//! The bar graph widget.
//!
//! A pure display widget: a filled proportion of its rectangle shows
//! `value / range`, with an optional second (minor) bar underneath for
//! trough displays. Bar graphs take no input at all; clicks fall
//! through to the enclosing form.

use std::any::Any;

use crate::geometry::Rect;
use crate::paint::PaintContext;
use crate::style::{BarOrientation, Colour, ColourRole};
use crate::widget::base::{WidgetBase, WidgetInit, WidgetKind};
use crate::widget::traits::Widget;

/// Construction parameters for a bar graph.
pub struct BarGraphInit {
    pub widget: WidgetInit,
    pub orientation: BarOrientation,
    /// Value of a full bar. Clamped to at least 1.
    pub range: u32,
    pub value: u32,
    pub minor_value: u32,
    /// Major bar colour; the palette highlight colour when `None`.
    pub colour: Option<Colour>,
    /// Minor bar colour; the palette dark colour when `None`.
    pub minor_colour: Option<Colour>,
}

impl Default for BarGraphInit {
    fn default() -> Self {
        Self {
            widget: WidgetInit::default(),
            orientation: BarOrientation::default(),
            range: 100,
            value: 0,
            minor_value: 0,
            colour: None,
            minor_colour: None,
        }
    }
}

/// A proportional value display.
pub struct BarGraph {
    base: WidgetBase,
    orientation: BarOrientation,
    range: u32,
    value: u32,
    minor_value: u32,
    colour: Option<Colour>,
    minor_colour: Option<Colour>,
}

impl BarGraph {
    /// Create a bar graph from its init parameters.
    pub fn new(init: BarGraphInit) -> Self {
        let range = init.range.max(1);
        Self {
            base: WidgetBase::new(init.widget, WidgetKind::BarGraph),
            orientation: init.orientation,
            range,
            value: init.value.min(range),
            minor_value: init.minor_value.min(range),
            colour: init.colour,
            minor_colour: init.minor_colour,
        }
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Set the major value, clamped to the range.
    pub fn set_value(&mut self, value: u32) {
        self.value = value.min(self.range);
    }

    #[inline]
    pub fn minor_value(&self) -> u32 {
        self.minor_value
    }

    /// Set the minor value, clamped to the range.
    pub fn set_minor_value(&mut self, value: u32) {
        self.minor_value = value.min(self.range);
    }

    #[inline]
    pub fn range(&self) -> u32 {
        self.range
    }

    /// Set the range (clamped to at least 1); both values are re-clamped.
    pub fn set_range(&mut self, range: u32) {
        self.range = range.max(1);
        self.value = self.value.min(self.range);
        self.minor_value = self.minor_value.min(self.range);
    }

    /// The filled portion of `rect` for `value`, following the fill
    /// orientation.
    fn fill_rect_for(&self, rect: Rect, value: u32) -> Rect {
        let fraction = |full: i32| (full as i64 * value as i64 / self.range as i64) as i32;
        match self.orientation {
            BarOrientation::Left => Rect::new(rect.x, rect.y, fraction(rect.width), rect.height),
            BarOrientation::Right => {
                let w = fraction(rect.width);
                Rect::new(rect.x + rect.width - w, rect.y, w, rect.height)
            }
            BarOrientation::Top => Rect::new(rect.x, rect.y, rect.width, fraction(rect.height)),
            BarOrientation::Bottom => {
                let h = fraction(rect.height);
                Rect::new(rect.x, rect.y + rect.height - h, rect.width, h)
            }
        }
    }
}

impl Widget for BarGraph {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn display(&self, ctx: &mut PaintContext<'_>) {
        if let Some(display) = self.base.display_fn() {
            display(self, ctx);
            return;
        }

        let rect = self.base.geometry().translated(ctx.offset);
        let major = self.colour.unwrap_or(ctx.palette.colour(ColourRole::Highlight));
        let minor = self
            .minor_colour
            .unwrap_or(ctx.palette.colour(ColourRole::Dark));
        let edge = ctx.palette.colour(ColourRole::Light);

        // Minor bar first so the major bar paints over it.
        if self.minor_value > 0 {
            let minor_rect = self.fill_rect_for(rect, self.minor_value);
            ctx.painter().fill_rect(minor_rect, minor);
        }
        if self.value > 0 {
            let major_rect = self.fill_rect_for(rect, self.value);
            ctx.painter().fill_rect(major_rect, major);
        }
        ctx.painter().draw_rect(rect, edge);
    }
}
