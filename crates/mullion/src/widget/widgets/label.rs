//! The static text label widget.

use std::any::Any;

use crate::error::WidgetResult;
use crate::paint::PaintContext;
use crate::style::{ColourRole, FontId, LabelStyle};
use crate::widget::base::{WidgetBase, WidgetInit, WidgetKind};
use crate::widget::events::EventContext;
use crate::widget::traits::Widget;

/// Construction parameters for a label.
pub struct LabelInit {
    pub widget: WidgetInit,
    pub style: LabelStyle,
    pub text: String,
    pub tip: String,
    pub font: FontId,
}

impl Default for LabelInit {
    fn default() -> Self {
        Self {
            widget: WidgetInit::default(),
            style: LabelStyle::ALIGN_LEFT,
            text: String::new(),
            tip: String::new(),
            font: FontId::REGULAR,
        }
    }
}

/// A line of static text. Labels never consume clicks; input falls
/// through to the enclosing form. Hovering shows the tooltip, if set.
pub struct Label {
    base: WidgetBase,
    style: LabelStyle,
    text: String,
    tip: String,
    font: FontId,
}

impl Label {
    /// Create a label from its init parameters.
    pub fn new(init: LabelInit) -> Self {
        Self {
            base: WidgetBase::new(init.widget, WidgetKind::Label),
            style: init.style,
            text: init.text,
            tip: init.tip,
            font: init.font,
        }
    }

    /// The label text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the horizontal alignment, keeping other style bits.
    pub fn set_text_alignment(&mut self, align: LabelStyle) {
        self.style
            .remove(LabelStyle::ALIGN_LEFT | LabelStyle::ALIGN_CENTRE | LabelStyle::ALIGN_RIGHT);
        self.style.insert(align);
    }
}

impl Widget for Label {
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

    fn highlight(&mut self, ctx: &mut EventContext<'_>) {
        if !self.tip.is_empty() {
            let rect = self.base.geometry().translated(ctx.offset);
            ctx.tip_start(self.base.id(), &self.tip, rect);
        }
    }

    fn highlight_lost(&mut self, ctx: &mut EventContext<'_>) {
        if !self.tip.is_empty() {
            ctx.tip_stop(self.base.id());
        }
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

    fn display(&self, ctx: &mut PaintContext<'_>) {
        if let Some(display) = self.base.display_fn() {
            display(self, ctx);
            return;
        }

        let rect = self.base.geometry().translated(ctx.offset);
        let colour = ctx.palette.colour(ColourRole::Text);
        let text_width = ctx.painter().text_width(self.font, &self.text);
        let line_height = ctx.painter().line_height(self.font);

        let x = if self.style.contains(LabelStyle::ALIGN_CENTRE) {
            rect.x + (rect.width - text_width) / 2
        } else if self.style.contains(LabelStyle::ALIGN_RIGHT) {
            rect.x + rect.width - text_width
        } else {
            rect.x
        };
        let y = rect.y + (rect.height - line_height) / 2;
        ctx.painter()
            .draw_text(self.font, &self.text, crate::geometry::Point::new(x, y), colour);
    }
}
