//! The single-line edit box widget.
//!
//! Clicking an idle edit box grabs keyboard focus and starts editing;
//! the frame's queued key events are consumed in `run` while focused.
//! Losing focus (Return, a click elsewhere, focus moving to another
//! widget, or the caller replacing the text) commits the edit and
//! emits a trigger.

use std::any::Any;

use crate::error::WidgetResult;
use crate::geometry::{Point, Rect};
use crate::paint::PaintContext;
use crate::style::{ColourRole, FontId};
use crate::widget::base::{WidgetBase, WidgetInit, WidgetKind};
use crate::widget::events::{ClickKey, EventContext, KeyPress};
use crate::widget::traits::Widget;

/// How many run ticks one caret blink phase lasts.
const CARET_PHASE_TICKS: u32 = 4;

/// Construction parameters for an edit box.
pub struct EditBoxInit {
    pub widget: WidgetInit,
    pub text: String,
    pub font: FontId,
}

impl Default for EditBoxInit {
    fn default() -> Self {
        Self {
            widget: WidgetInit::default(),
            text: String::new(),
            font: FontId::REGULAR,
        }
    }
}

/// A single-line text entry field.
pub struct EditBox {
    base: WidgetBase,
    text: String,
    /// Byte index of the caret; always on a char boundary.
    cursor: usize,
    editing: bool,
    highlighted: bool,
    font: FontId,
    tick: u32,
}

impl EditBox {
    /// Create an edit box from its init parameters.
    pub fn new(init: EditBoxInit) -> Self {
        let cursor = init.text.len();
        Self {
            base: WidgetBase::new(init.widget, WidgetKind::EditBox),
            text: init.text,
            cursor,
            editing: false,
            highlighted: false,
            font: init.font,
            tick: 0,
        }
    }

    /// Whether the edit box is currently being edited.
    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// The current text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    fn prev_boundary(&self) -> usize {
        self.text[..self.cursor]
            .chars()
            .next_back()
            .map(|c| self.cursor - c.len_utf8())
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.text[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.cursor)
    }

    fn apply_key(&mut self, key: KeyPress) {
        match key {
            KeyPress::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            KeyPress::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.text.remove(prev);
                    self.cursor = prev;
                }
            }
            KeyPress::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            KeyPress::Left => self.cursor = self.prev_boundary(),
            KeyPress::Right => self.cursor = self.next_boundary(),
            KeyPress::Home => self.cursor = 0,
            KeyPress::End => self.cursor = self.text.len(),
            KeyPress::Return | KeyPress::Escape => {}
        }
    }
}

impl Widget for EditBox {
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
        if key != ClickKey::Primary || self.editing {
            return;
        }
        ctx.request_focus();
        self.editing = true;
        self.cursor = self.text.len();
    }

    fn run(&mut self, ctx: &mut EventContext<'_>) {
        self.tick = self.tick.wrapping_add(1);
        if !self.editing || !ctx.has_focus() {
            return;
        }

        // A primary press outside the box this frame ends the edit.
        if ctx.primary_pressed() && !self.base.geometry().contains_inclusive(ctx.mouse) {
            ctx.release_focus();
            return;
        }

        for &key in ctx.keys() {
            if matches!(key, KeyPress::Return | KeyPress::Escape) {
                ctx.release_focus();
                break;
            }
            self.apply_key(key);
        }
    }

    fn focus_lost(&mut self, ctx: &mut EventContext<'_>) {
        self.editing = false;
        ctx.set_return(self.base.id());
    }

    fn highlight(&mut self, _ctx: &mut EventContext<'_>) {
        self.highlighted = true;
    }

    fn highlight_lost(&mut self, _ctx: &mut EventContext<'_>) {
        self.highlighted = false;
    }

    fn string(&self) -> WidgetResult<String> {
        Ok(self.text.clone())
    }

    fn set_string(&mut self, text: &str) -> WidgetResult<()> {
        self.text = text.to_owned();
        self.cursor = self.text.len();
        Ok(())
    }

    fn display(&self, ctx: &mut PaintContext<'_>) {
        if let Some(display) = self.base.display_fn() {
            display(self, ctx);
            return;
        }

        let rect = self.base.geometry().translated(ctx.offset);
        let background = ctx.palette.colour(ColourRole::Background);
        let edge = if self.editing || self.highlighted {
            ctx.palette.colour(ColourRole::Highlight)
        } else {
            ctx.palette.colour(ColourRole::Light)
        };
        let text_colour = ctx.palette.colour(ColourRole::Text);

        ctx.painter().fill_rect(rect, background);
        ctx.painter().draw_rect(rect, edge);

        let line_height = ctx.painter().line_height(self.font);
        let text_pos = Point::new(rect.x + 3, rect.y + (rect.height - line_height) / 2);
        ctx.painter()
            .draw_text(self.font, &self.text, text_pos, text_colour);

        let caret_visible = self.editing && (self.tick / CARET_PHASE_TICKS) % 2 == 0;
        if caret_visible {
            let caret_x =
                text_pos.x + ctx.painter().text_width(self.font, &self.text[..self.cursor]);
            let caret = Rect::new(caret_x, text_pos.y, 1, line_height);
            let cursor_colour = ctx.palette.colour(ColourRole::Cursor);
            ctx.painter().fill_rect(caret, cursor_colour);
        }
    }
}
