//! The opaque paint service and per-widget paint context.
//!
//! The toolkit does not render anything itself. The display walk hands
//! every visible widget a [`PaintContext`] wrapping a caller-supplied
//! [`Painter`]; the built-in widget painters emit nothing but rectangle
//! fills and text draws through it.

use crate::geometry::{Point, Rect};
use crate::style::{Colour, FontId, Palette};

/// Text measurement and drawing service supplied by the caller.
///
/// Measurement (`text_width`, `line_height`) must be consistent with
/// drawing: the default widget painters centre and align text using the
/// measured values.
pub trait Painter {
    /// Width in pixels of `text` rendered in `font`.
    fn text_width(&self, font: FontId, text: &str) -> i32;

    /// Line height in pixels of `font`.
    fn line_height(&self, font: FontId) -> i32;

    /// Draw `text` with its top-left corner at `pos`.
    fn draw_text(&mut self, font: FontId, text: &str, pos: Point, colour: Colour);

    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, colour: Colour);

    /// Stroke a one-pixel rectangle outline.
    fn draw_rect(&mut self, rect: Rect, colour: Colour);
}

/// Context provided during widget painting.
///
/// Carries the accumulated screen offset of the enclosing form's content
/// area and the palette the widget should style itself with (its own for
/// forms, the enclosing form's for everything else).
pub struct PaintContext<'a> {
    /// Screen offset of the enclosing form's content area. A widget
    /// draws itself at `offset + its own parent-relative position`.
    pub offset: Point,
    /// The palette to style with.
    pub palette: &'a Palette,
    painter: &'a mut dyn Painter,
}

impl<'a> PaintContext<'a> {
    /// Create a new paint context.
    pub fn new(offset: Point, palette: &'a Palette, painter: &'a mut dyn Painter) -> Self {
        Self {
            offset,
            palette,
            painter,
        }
    }

    /// Get the painter.
    #[inline]
    pub fn painter(&mut self) -> &mut dyn Painter {
        &mut *self.painter
    }
}
