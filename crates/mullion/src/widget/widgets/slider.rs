//! The slider widget.
//!
//! A draggable thumb over a fixed number of stops. Clicking anywhere on
//! the track starts a drag and snaps the thumb to the pointer; while
//! dragging, the thumb follows the pointer every run tick. The position
//! is read back by the caller through the screen; sliders do not emit
//! triggers.

use std::any::Any;

use crate::error::WidgetResult;
use crate::geometry::{Point, Rect};
use crate::paint::PaintContext;
use crate::style::{ColourRole, SliderOrientation, SliderState};
use crate::widget::base::{WidgetBase, WidgetInit, WidgetKind};
use crate::widget::events::{ClickKey, EventContext};
use crate::widget::traits::Widget;

/// Thumb size along the track axis, in pixels.
const THUMB_SIZE: i32 = 6;

/// Construction parameters for a slider.
pub struct SliderInit {
    pub widget: WidgetInit,
    pub orientation: SliderOrientation,
    /// Number of stops. Clamped to at least 1.
    pub stops: u16,
    /// Initial thumb position in stops.
    pub pos: u16,
    pub tip: String,
}

impl Default for SliderInit {
    fn default() -> Self {
        Self {
            widget: WidgetInit::default(),
            orientation: SliderOrientation::default(),
            stops: 10,
            pos: 0,
            tip: String::new(),
        }
    }
}

/// A draggable value slider.
pub struct Slider {
    base: WidgetBase,
    orientation: SliderOrientation,
    stops: u16,
    pos: u16,
    state: SliderState,
    tip: String,
}

impl Slider {
    /// Create a slider from its init parameters.
    pub fn new(init: SliderInit) -> Self {
        let stops = init.stops.max(1);
        Self {
            base: WidgetBase::new(init.widget, WidgetKind::Slider),
            orientation: init.orientation,
            stops,
            pos: init.pos.min(stops),
            state: SliderState::default(),
            tip: init.tip,
        }
    }

    /// The thumb position in stops, `0..=stops`.
    #[inline]
    pub fn pos(&self) -> u16 {
        self.pos
    }

    /// Move the thumb, clamped to the stop count.
    pub fn set_pos(&mut self, pos: u16) {
        self.pos = pos.min(self.stops);
    }

    /// The number of stops.
    #[inline]
    pub fn stops(&self) -> u16 {
        self.stops
    }

    /// The slider's runtime state word.
    #[inline]
    pub fn slider_state(&self) -> SliderState {
        self.state
    }

    /// Snap the thumb to the pointer, `mouse` in form-local coordinates.
    fn track(&mut self, mouse: Point) {
        let geometry = self.base.geometry();
        let (offset, extent) = match self.orientation {
            SliderOrientation::Horizontal => (mouse.x - geometry.x, geometry.width),
            SliderOrientation::Vertical => (mouse.y - geometry.y, geometry.height),
        };
        if extent <= 0 {
            return;
        }
        let clamped = offset.clamp(0, extent) as i64;
        // Round to the nearest stop.
        self.pos = ((clamped * self.stops as i64 + extent as i64 / 2) / extent as i64) as u16;
    }
}

impl Widget for Slider {
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

    fn clicked(&mut self, ctx: &mut EventContext<'_>, key: ClickKey) {
        if key != ClickKey::Primary || self.state.contains(SliderState::DISABLED) {
            return;
        }
        self.state.insert(SliderState::DRAG);
        self.track(ctx.mouse);
    }

    fn released(&mut self, _ctx: &mut EventContext<'_>, key: ClickKey) {
        if key == ClickKey::Primary {
            self.state.remove(SliderState::DRAG);
        }
    }

    fn run(&mut self, ctx: &mut EventContext<'_>) {
        if self.state.contains(SliderState::DRAG) {
            self.track(ctx.mouse);
        }
    }

    fn highlight(&mut self, ctx: &mut EventContext<'_>) {
        self.state.insert(SliderState::HIGHLIGHT);
        if !self.tip.is_empty() {
            let rect = self.base.geometry().translated(ctx.offset);
            ctx.tip_start(self.base.id(), &self.tip, rect);
        }
    }

    fn highlight_lost(&mut self, ctx: &mut EventContext<'_>) {
        // Off the slider also means the drag is over.
        self.state.remove(SliderState::HIGHLIGHT | SliderState::DRAG);
        if !self.tip.is_empty() {
            ctx.tip_stop(self.base.id());
        }
    }

    fn set_tip(&mut self, tip: &str) -> WidgetResult<()> {
        self.tip = tip.to_owned();
        Ok(())
    }

    fn display(&self, ctx: &mut PaintContext<'_>) {
        if let Some(display) = self.base.display_fn() {
            display(self, ctx);
            return;
        }

        let rect = self.base.geometry().translated(ctx.offset);
        let track_colour = ctx.palette.colour(ColourRole::Dark);
        let thumb_colour = if self.state.contains(SliderState::HIGHLIGHT) {
            ctx.palette.colour(ColourRole::Highlight)
        } else {
            ctx.palette.colour(ColourRole::Light)
        };

        match self.orientation {
            SliderOrientation::Horizontal => {
                let track = Rect::new(rect.x, rect.y + rect.height / 2 - 1, rect.width, 2);
                ctx.painter().fill_rect(track, track_colour);
                let travel = (rect.width - THUMB_SIZE).max(0) as i64;
                let x = rect.x + (travel * self.pos as i64 / self.stops as i64) as i32;
                let thumb = Rect::new(x, rect.y, THUMB_SIZE, rect.height);
                ctx.painter().fill_rect(thumb, thumb_colour);
            }
            SliderOrientation::Vertical => {
                let track = Rect::new(rect.x + rect.width / 2 - 1, rect.y, 2, rect.height);
                ctx.painter().fill_rect(track, track_colour);
                let travel = (rect.height - THUMB_SIZE).max(0) as i64;
                let y = rect.y + (travel * self.pos as i64 / self.stops as i64) as i32;
                let thumb = Rect::new(rect.x, y, rect.width, THUMB_SIZE);
                ctx.painter().fill_rect(thumb, thumb_colour);
            }
        }
    }
}
