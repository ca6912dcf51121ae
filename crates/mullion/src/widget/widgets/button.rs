//! The push button widget.

use std::any::Any;

use crate::error::WidgetResult;
use crate::geometry::Point;
use crate::paint::PaintContext;
use crate::style::{ButtonState, ButtonStyle, ColourRole, FontId};
use crate::widget::base::{WidgetBase, WidgetInit, WidgetKind};
use crate::widget::events::{ClickKey, EventContext};
use crate::widget::traits::Widget;

/// How many run ticks one flash phase lasts.
const FLASH_PHASE_TICKS: u32 = 8;

/// Construction parameters for a button.
pub struct ButtonInit {
    pub widget: WidgetInit,
    pub style: ButtonStyle,
    pub text: String,
    pub tip: String,
    pub font: FontId,
}

impl Default for ButtonInit {
    fn default() -> Self {
        Self {
            widget: WidgetInit::default(),
            style: ButtonStyle::default(),
            text: String::new(),
            tip: String::new(),
            font: FontId::REGULAR,
        }
    }
}

/// A clickable push button.
///
/// The press-release protocol is stateful: a press arms the button
/// (`DOWN`), and only a release while still armed emits a trigger. Moving
/// the pointer off the button fires `highlight_lost`, which disarms it,
/// so a release elsewhere never triggers.
pub struct Button {
    base: WidgetBase,
    style: ButtonStyle,
    state: ButtonState,
    text: String,
    tip: String,
    font: FontId,
    tick: u32,
}

impl Button {
    /// Create a button from its init parameters.
    pub fn new(init: ButtonInit) -> Self {
        Self {
            base: WidgetBase::new(init.widget, WidgetKind::Button),
            style: init.style,
            state: ButtonState::default(),
            text: init.text,
            tip: init.tip,
            font: init.font,
            tick: 0,
        }
    }

    /// The button's runtime state word.
    #[inline]
    pub fn button_state(&self) -> ButtonState {
        self.state
    }

    /// The label text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn accepts_key(&self, key: ClickKey) -> bool {
        match key {
            ClickKey::Primary => !self.style.contains(ButtonStyle::NO_PRIMARY),
            ClickKey::Secondary => self.style.contains(ButtonStyle::SECONDARY),
        }
    }

    /// A flashing button is skipped by the painter on alternate phases.
    fn in_flash_off_phase(&self) -> bool {
        self.state.contains(ButtonState::FLASH) && (self.tick / FLASH_PHASE_TICKS) % 2 == 1
    }
}

impl Widget for Button {
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
        if !self.accepts_key(key) {
            return;
        }
        if self
            .state
            .intersects(ButtonState::DISABLED | ButtonState::LOCKED)
        {
            return;
        }
        ctx.play_clicked_sound();
        self.state.remove(ButtonState::FLASH);
        self.state.insert(ButtonState::DOWN);
    }

    fn released(&mut self, ctx: &mut EventContext<'_>, key: ClickKey) {
        if !self.accepts_key(key) {
            return;
        }
        if self.state.contains(ButtonState::DOWN) {
            ctx.set_return(self.base.id());
            self.state.remove(ButtonState::DOWN);
        }
    }

    fn highlight(&mut self, ctx: &mut EventContext<'_>) {
        self.state.insert(ButtonState::HIGHLIGHT);
        ctx.play_highlight_sound();
        if !self.tip.is_empty() {
            let rect = self.base.geometry().translated(ctx.offset);
            ctx.tip_start(self.base.id(), &self.tip, rect);
        }
    }

    fn highlight_lost(&mut self, ctx: &mut EventContext<'_>) {
        // Losing the hover also disarms a pending click.
        self.state.remove(ButtonState::DOWN | ButtonState::HIGHLIGHT);
        if !self.tip.is_empty() {
            ctx.tip_stop(self.base.id());
        }
    }

    fn run(&mut self, _ctx: &mut EventContext<'_>) {
        self.tick = self.tick.wrapping_add(1);
    }

    fn state(&self) -> WidgetResult<u32> {
        Ok((self.state & ButtonState::PERSISTENT).bits())
    }

    fn set_state(&mut self, state: u32) -> WidgetResult<()> {
        let transient = self.state & (ButtonState::DOWN | ButtonState::HIGHLIGHT);
        self.state =
            transient | (ButtonState::from_bits_truncate(state) & ButtonState::PERSISTENT);
        Ok(())
    }

    fn string(&self) -> WidgetResult<String> {
        Ok(self.text.clone())
    }

    fn set_string(&mut self, text: &str) -> WidgetResult<()> {
        self.text = text.to_owned();
        Ok(())
    }

    fn set_tip(&mut self, tip: &str) -> WidgetResult<()> {
        self.tip = tip.to_owned();
        Ok(())
    }

    fn set_flash(&mut self, flash: bool) -> WidgetResult<()> {
        self.state.set(ButtonState::FLASH, flash);
        Ok(())
    }

    fn display(&self, ctx: &mut PaintContext<'_>) {
        if let Some(display) = self.base.display_fn() {
            display(self, ctx);
            return;
        }
        if self.in_flash_off_phase() {
            return;
        }

        let depressed = self
            .state
            .intersects(ButtonState::DOWN | ButtonState::LOCKED | ButtonState::CLICK_LOCK);
        let nudge = if depressed {
            Point::new(1, 1)
        } else {
            Point::ZERO
        };
        let rect = self.base.geometry().translated(ctx.offset + nudge);

        let background = ctx.palette.colour(ColourRole::Background);
        let edge = if depressed {
            ctx.palette.colour(ColourRole::Dark)
        } else {
            ctx.palette.colour(ColourRole::Light)
        };
        let text_colour = if self.state.contains(ButtonState::DISABLED) {
            ctx.palette.colour(ColourRole::Dark)
        } else if self.state.contains(ButtonState::HIGHLIGHT) {
            ctx.palette.colour(ColourRole::Highlight)
        } else {
            ctx.palette.colour(ColourRole::Text)
        };

        ctx.painter().fill_rect(rect, background);
        ctx.painter().draw_rect(rect, edge);

        let text_width = ctx.painter().text_width(self.font, &self.text);
        let line_height = ctx.painter().line_height(self.font);
        let x = if self.style.contains(ButtonStyle::TEXT_CENTRE) {
            rect.x + (rect.width - text_width) / 2
        } else {
            rect.x + 4
        };
        let y = rect.y + (rect.height - line_height) / 2;
        ctx.painter()
            .draw_text(self.font, &self.text, Point::new(x, y), text_colour);
    }
}
