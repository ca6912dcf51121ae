//! The form container widget.
//!
//! Forms aggregate child widgets and give them a coordinate space: a
//! child's geometry is relative to its form's content area, which is the
//! form's own rectangle shifted by the scroll origin. Forms also track
//! which direct child the pointer was last over, so the dispatch engine
//! can fire highlight transitions exactly once per change.
//!
//! A form with [`FormStyle::CLICKABLE`] doubles as a single large
//! button: it intercepts clicks before its children (which still receive
//! hover highlighting) and follows the same state protocol as
//! [`Button`](crate::widget::widgets::Button).

use std::any::Any;

use mullion_core::NodeId;

use crate::error::WidgetResult;
use crate::geometry::Point;
use crate::paint::PaintContext;
use crate::style::{ColourRole, FormState, FormStyle, Palette};
use crate::widget::base::{WidgetBase, WidgetInit, WidgetKind};
use crate::widget::events::{ClickKey, EventContext};
use crate::widget::traits::{unsupported, Widget};

/// Construction parameters for a form.
pub struct FormInit {
    pub widget: WidgetInit,
    pub style: FormStyle,
    /// Tooltip shown while a clickable form is hovered.
    pub tip: String,
}

impl Default for FormInit {
    fn default() -> Self {
        Self {
            widget: WidgetInit::default(),
            style: FormStyle::default(),
            tip: String::new(),
        }
    }
}

/// A widget that contains other widgets.
pub struct Form {
    base: WidgetBase,
    style: FormStyle,
    state: FormState,
    palette: Palette,
    scroll_origin: Point,
    disable_children: bool,
    last_highlighted: Option<NodeId>,
    tip: String,
}

impl Form {
    /// Create a form from its init parameters.
    pub fn new(init: FormInit) -> Self {
        Self {
            base: WidgetBase::new(init.widget, WidgetKind::Form),
            style: init.style,
            state: FormState::default(),
            palette: Palette::default(),
            scroll_origin: Point::ZERO,
            disable_children: false,
            last_highlighted: None,
            tip: init.tip,
        }
    }

    /// The form's construction style.
    #[inline]
    pub fn style(&self) -> FormStyle {
        self.style
    }

    /// Whether the form behaves as a single clickable control.
    #[inline]
    pub fn is_clickable(&self) -> bool {
        self.style.contains(FormStyle::CLICKABLE)
    }

    /// The scroll origin of the content area. Children are positioned
    /// relative to the form's rectangle shifted by this offset.
    #[inline]
    pub fn scroll_origin(&self) -> Point {
        self.scroll_origin
    }

    /// Scroll the content area.
    pub fn set_scroll_origin(&mut self, origin: Point) {
        self.scroll_origin = origin;
    }

    /// Whether descendants are excluded from painting.
    #[inline]
    pub fn disable_children(&self) -> bool {
        self.disable_children
    }

    /// Exclude or include descendants in painting. Input dispatch is not
    /// affected.
    pub fn set_disable_children(&mut self, disable: bool) {
        self.disable_children = disable;
    }

    /// The form's colour table.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Mutable access to the form's colour table.
    pub fn palette_mut(&mut self) -> &mut Palette {
        &mut self.palette
    }

    /// The runtime state word of a clickable form.
    #[inline]
    pub fn form_state(&self) -> FormState {
        self.state
    }

    pub(crate) fn last_highlighted(&self) -> Option<NodeId> {
        self.last_highlighted
    }

    pub(crate) fn set_last_highlighted(&mut self, child: Option<NodeId>) {
        self.last_highlighted = child;
    }

    fn accepts_key(&self, key: ClickKey) -> bool {
        match key {
            ClickKey::Primary => !self.style.contains(FormStyle::NO_PRIMARY),
            ClickKey::Secondary => self.style.contains(FormStyle::SECONDARY),
        }
    }
}

impl Widget for Form {
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
        if !self.is_clickable() || !self.accepts_key(key) {
            return;
        }
        if self.state.intersects(FormState::DISABLED | FormState::LOCKED) {
            return;
        }
        ctx.play_clicked_sound();
        self.state.remove(FormState::FLASH);
        self.state.insert(FormState::DOWN);
    }

    fn released(&mut self, ctx: &mut EventContext<'_>, key: ClickKey) {
        if !self.is_clickable() || !self.accepts_key(key) {
            return;
        }
        if self.state.contains(FormState::DOWN) {
            ctx.set_return(self.base.id());
            self.state.remove(FormState::DOWN);
        }
    }

    fn highlight(&mut self, ctx: &mut EventContext<'_>) {
        if !self.is_clickable() {
            return;
        }
        self.state.insert(FormState::HIGHLIGHT);
        ctx.play_highlight_sound();
        if !self.tip.is_empty() {
            let rect = self.base.geometry().translated(ctx.offset);
            ctx.tip_start(self.base.id(), &self.tip, rect);
        }
    }

    fn highlight_lost(&mut self, ctx: &mut EventContext<'_>) {
        if !self.is_clickable() {
            return;
        }
        self.state.remove(FormState::DOWN | FormState::HIGHLIGHT);
        if !self.tip.is_empty() {
            ctx.tip_stop(self.base.id());
        }
    }

    fn child_lost(&mut self, child: NodeId) {
        if self.last_highlighted == Some(child) {
            self.last_highlighted = None;
        }
    }

    fn state(&self) -> WidgetResult<u32> {
        if !self.is_clickable() {
            return unsupported("state", self.kind());
        }
        Ok((self.state & FormState::PERSISTENT).bits())
    }

    fn set_state(&mut self, state: u32) -> WidgetResult<()> {
        if !self.is_clickable() {
            return unsupported("set_state", self.kind());
        }
        let transient = self.state & (FormState::DOWN | FormState::HIGHLIGHT);
        self.state = transient | (FormState::from_bits_truncate(state) & FormState::PERSISTENT);
        Ok(())
    }

    fn set_tip(&mut self, tip: &str) -> WidgetResult<()> {
        if !self.is_clickable() {
            return unsupported("set_tip", self.kind());
        }
        self.tip = tip.to_owned();
        Ok(())
    }

    fn set_flash(&mut self, flash: bool) -> WidgetResult<()> {
        if !self.is_clickable() {
            return unsupported("set_flash", self.kind());
        }
        self.state.set(FormState::FLASH, flash);
        Ok(())
    }

    fn display(&self, ctx: &mut PaintContext<'_>) {
        if let Some(display) = self.base.display_fn() {
            display(self, ctx);
            return;
        }
        if self.style.contains(FormStyle::INVISIBLE) {
            return;
        }
        let rect = self.base.geometry().translated(ctx.offset);
        let background = ctx.palette.colour(ColourRole::Background);
        let edge = if self.state.intersects(FormState::DEPRESSED) {
            ctx.palette.colour(ColourRole::Dark)
        } else {
            ctx.palette.colour(ColourRole::Light)
        };
        ctx.painter().fill_rect(rect, background);
        ctx.painter().draw_rect(rect, edge);
    }
}
