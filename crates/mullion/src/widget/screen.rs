//! The screen: one independent UI surface.
//!
//! A [`Screen`] owns a widget tree rooted in an invisible full-viewport
//! form, plus every piece of cross-widget state a dispatch cycle needs:
//! keyboard focus, the per-frame mouse-over marker, the trigger list,
//! audio and tooltip hook registrations, and the master input gate.
//! Nothing is process-global, so any number of screens can coexist and
//! be driven independently.
//!
//! The caller drives a screen once per game tick:
//!
//! ```ignore
//! let triggers = screen.run_cycle(&input);
//! for trigger in triggers {
//!     match trigger.id {
//!         BUTTON_QUIT => quit(),
//!         BUTTON_SAVE => save(),
//!         _ => {}
//!     }
//! }
//! screen.display(&mut painter);
//! ```

use std::any::Any;

use mullion_core::{format_tree, logging::targets, NodeId, Tree};

use crate::error::{WidgetError, WidgetResult};
use crate::geometry::{Point, Rect};
use crate::paint::Painter;
use crate::style::{Colour, ColourRole, FontId, FormStyle};
use crate::widget::base::{WidgetInit, WidgetKind};
use crate::widget::dispatch::{self, WalkContext, WidgetTree};
use crate::widget::events::{
    click_key, ClickKey, FocusRequest, FrameInput, PressAction, Trigger,
};
use crate::widget::traits::{widget_cast, widget_cast_mut, Widget};
use crate::widget::widgets::{
    BarGraph, BarGraphInit, Button, ButtonInit, EditBox, EditBoxInit, Form, FormInit, Label,
    LabelInit, Slider, SliderInit,
};

/// Tooltip service supplied by the caller.
///
/// Widgets with a tip start it when the pointer moves onto them and stop
/// it when the pointer leaves; the toolkit itself never renders tips.
pub trait TipHandler {
    /// Show the tooltip for widget `id`. `rect` is the widget's screen
    /// rectangle the tip should anchor to.
    fn start(&mut self, id: u32, text: &str, font: FontId, rect: Rect);

    /// Hide the tooltip for widget `id`.
    fn stop(&mut self, id: u32);
}

/// Registered audio hooks: one callback plus the sound ids to feed it.
struct WidgetAudio {
    callback: Box<dyn FnMut(i32)>,
    highlight_id: Option<i32>,
    clicked_id: Option<i32>,
}

/// The cross-widget trackers a dispatch cycle reads and writes.
///
/// Split out of [`Screen`] so the dispatch engine can borrow it
/// alongside a mutable borrow of the tree.
pub(crate) struct ScreenState {
    pub(crate) triggers: Vec<Trigger>,
    pub(crate) mouse_over: Option<NodeId>,
    pub(crate) focus: Option<NodeId>,
    pub(crate) focus_request: Option<FocusRequest>,
    pub(crate) input_enabled: bool,
    pub(crate) last_released: Option<ClickKey>,
    pub(crate) primary_pressed: bool,
    audio: Option<WidgetAudio>,
    tip_handler: Option<Box<dyn TipHandler>>,
    tip_font: FontId,
}

impl ScreenState {
    fn new() -> Self {
        Self {
            triggers: Vec::new(),
            mouse_over: None,
            focus: None,
            focus_request: None,
            input_enabled: true,
            last_released: None,
            primary_pressed: false,
            audio: None,
            tip_handler: None,
            tip_font: FontId::REGULAR,
        }
    }

    /// Reset the per-frame trackers at the top of a cycle.
    fn begin_cycle(&mut self) {
        self.triggers.clear();
        self.mouse_over = None;
        self.last_released = None;
        self.primary_pressed = false;
    }

    /// Append a trigger, dropping repeats for the same widget within the
    /// cycle.
    pub(crate) fn push_trigger(&mut self, trigger: Trigger) {
        if self.triggers.iter().any(|t| t.node == trigger.node) {
            tracing::trace!(target: targets::DISPATCH, id = trigger.id, "duplicate trigger dropped");
            return;
        }
        self.triggers.push(trigger);
    }

    pub(crate) fn play_highlight_sound(&mut self) {
        if let Some(audio) = &mut self.audio {
            if let Some(id) = audio.highlight_id {
                (audio.callback)(id);
            }
        }
    }

    pub(crate) fn play_clicked_sound(&mut self) {
        if let Some(audio) = &mut self.audio {
            if let Some(id) = audio.clicked_id {
                (audio.callback)(id);
            }
        }
    }

    pub(crate) fn tip_start(&mut self, id: u32, text: &str, rect: Rect) {
        let font = self.tip_font;
        if let Some(handler) = &mut self.tip_handler {
            handler.start(id, text, font, rect);
        }
    }

    pub(crate) fn tip_stop(&mut self, id: u32) {
        if let Some(handler) = &mut self.tip_handler {
            handler.stop(id);
        }
    }
}

/// One independent UI surface: a widget tree plus its dispatch state.
pub struct Screen {
    tree: WidgetTree,
    root: NodeId,
    state: ScreenState,
}

impl Screen {
    /// Create a screen whose root form covers a `width` x `height`
    /// viewport.
    ///
    /// The root form has id 0, paints nothing, and cannot be removed.
    pub fn new(width: i32, height: i32) -> Self {
        let mut tree: WidgetTree = Tree::new();
        // Hit-testing is edge-inclusive, so size the root one short to
        // cover exactly the viewport.
        let root_form = Form::new(FormInit {
            widget: WidgetInit {
                id: 0,
                width: width - 1,
                height: height - 1,
                ..WidgetInit::default()
            },
            style: FormStyle::INVISIBLE,
            ..FormInit::default()
        });
        let root = tree.insert(Box::new(root_form));
        tracing::trace!(target: targets::SCREEN, width, height, "created screen");
        Self {
            tree,
            root,
            state: ScreenState::new(),
        }
    }

    /// Tree handle of the root form.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    // =========================================================================
    // The dispatch cycle
    // =========================================================================

    /// Run one dispatch cycle and return the widgets that fired.
    ///
    /// In order: the previous cycle's triggers are cleared; each queued
    /// press/release event is dispatched into the tree (skipped entirely
    /// while input is disabled); a hover-only pass updates highlight and
    /// mouse-over state from the current pointer position; every visible
    /// widget gets its `run` hook; every widget's callback is invoked.
    ///
    /// The returned slice is owned by the screen and valid until the
    /// next call.
    pub fn run_cycle(&mut self, input: &FrameInput) -> &[Trigger] {
        let root = self.root;
        let Screen { tree, state, .. } = self;
        state.begin_cycle();
        tracing::trace!(
            target: targets::DISPATCH,
            presses = input.presses.len(),
            keys = input.keys.len(),
            "dispatch cycle"
        );

        if state.input_enabled {
            for press in &input.presses {
                let Some(key) = click_key(press.button) else {
                    continue;
                };
                let pressed = press.action == PressAction::Press;
                if pressed && key == ClickKey::Primary {
                    state.primary_pressed = true;
                }
                dispatch::process_click(
                    tree,
                    state,
                    root,
                    WalkContext {
                        mouse: press.position,
                        offset: Point::ZERO,
                    },
                    Some(key),
                    pressed,
                    &input.keys,
                );
                state.last_released = Some(key);
            }
        }

        // Hover pass: highlight and mouse-over state track the pointer
        // even on an eventless frame.
        dispatch::process_click(
            tree,
            state,
            root,
            WalkContext {
                mouse: input.position,
                offset: Point::ZERO,
            },
            None,
            true,
            &input.keys,
        );

        dispatch::run_form(
            tree,
            state,
            root,
            WalkContext {
                mouse: input.position,
                offset: Point::ZERO,
            },
            &input.keys,
        );

        dispatch::run_callbacks(
            tree,
            root,
            WalkContext {
                mouse: input.position,
                offset: Point::ZERO,
            },
        );

        &self.state.triggers
    }

    /// Append a trigger record for a widget, as its own state machine
    /// does when an interaction completes.
    pub fn set_return(&mut self, node: NodeId) {
        if let Some(widget) = self.tree.get(node) {
            let id = widget.base().id();
            self.state.push_trigger(Trigger { node, id });
        }
    }

    /// Paint the visible tree through the caller's painter.
    pub fn display(&self, painter: &mut dyn Painter) {
        dispatch::display_form(&self.tree, self.root, Point::ZERO, painter);
    }

    // =========================================================================
    // Adding and removing widgets
    // =========================================================================

    /// Add a form.
    pub fn add_form(&mut self, init: FormInit) -> WidgetResult<NodeId> {
        self.add_widget(Box::new(Form::new(init)))
    }

    /// Add a button.
    pub fn add_button(&mut self, init: ButtonInit) -> WidgetResult<NodeId> {
        self.add_widget(Box::new(Button::new(init)))
    }

    /// Add a label.
    pub fn add_label(&mut self, init: LabelInit) -> WidgetResult<NodeId> {
        self.add_widget(Box::new(Label::new(init)))
    }

    /// Add an edit box.
    pub fn add_edit_box(&mut self, init: EditBoxInit) -> WidgetResult<NodeId> {
        self.add_widget(Box::new(EditBox::new(init)))
    }

    /// Add a bar graph.
    pub fn add_bar_graph(&mut self, init: BarGraphInit) -> WidgetResult<NodeId> {
        self.add_widget(Box::new(BarGraph::new(init)))
    }

    /// Add a slider.
    pub fn add_slider(&mut self, init: SliderInit) -> WidgetResult<NodeId> {
        self.add_widget(Box::new(Slider::new(init)))
    }

    /// Add an already-constructed widget (the extension point for
    /// caller-defined variants).
    ///
    /// The widget's id must be unused anywhere in the tree and its
    /// parent id must name a form (0 for the root form).
    pub fn add_widget(&mut self, widget: Box<dyn Widget>) -> WidgetResult<NodeId> {
        let id = widget.base().id();
        let parent_id = widget.base().form_id();

        if self.node_from_id(id).is_some() {
            tracing::error!(target: targets::SCREEN, id, "widget id already in use");
            return Err(WidgetError::DuplicateId(id));
        }
        let parent_key = if parent_id == 0 {
            self.root
        } else {
            self.lookup(parent_id)?
        };
        let parent_is_form = self
            .tree
            .get(parent_key)
            .is_some_and(|w| widget_cast::<Form>(w.as_ref()).is_some());
        if !parent_is_form {
            tracing::error!(target: targets::SCREEN, parent = parent_id, "parent widget is not a form");
            return Err(WidgetError::NotAForm(parent_id));
        }

        let kind = widget.kind();
        let key = self.tree.insert(widget);
        self.tree.attach(parent_key, key)?;
        tracing::trace!(target: targets::SCREEN, id, ?kind, "added widget");
        Ok(key)
    }

    /// Remove a widget and its whole subtree.
    ///
    /// Dangling screen references (focus, mouse-over) into the removed
    /// subtree are cleared first, then every remaining ancestor is told
    /// about the lost child so containers can drop stale tracking state.
    pub fn remove(&mut self, id: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        if key == self.root {
            tracing::error!(target: targets::SCREEN, "attempted to remove the root form");
            return Err(WidgetError::RemoveRoot);
        }

        let ancestors: Vec<NodeId> = self.tree.ancestors(key).collect();
        let removed = self.tree.remove(key)?;

        if self.state.focus.is_some_and(|f| removed.contains(&f)) {
            self.state.focus = None;
        }
        if self.state.mouse_over.is_some_and(|m| removed.contains(&m)) {
            self.state.mouse_over = None;
        }
        for ancestor in ancestors {
            if let Some(widget) = self.tree.get_mut(ancestor) {
                widget.child_lost(key);
            }
        }
        tracing::trace!(target: targets::SCREEN, id, count = removed.len(), "removed widget");
        Ok(())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Find a widget by id.
    pub fn get(&self, id: u32) -> Option<&dyn Widget> {
        self.node_from_id(id)
            .and_then(|key| self.tree.get(key))
            .map(|w| w.as_ref())
    }

    /// Find a widget by id, mutably.
    pub fn get_mut(&mut self, id: u32) -> Option<&mut (dyn Widget + 'static)> {
        let key = self.node_from_id(id)?;
        self.tree.get_mut(key).map(|w| w.as_mut())
    }

    /// The tree handle of a widget id, if it exists.
    pub fn node_id(&self, id: u32) -> Option<NodeId> {
        self.node_from_id(id)
    }

    /// Id of the widget the pointer was over during the last cycle.
    pub fn mouse_over_id(&self) -> Option<u32> {
        self.state
            .mouse_over
            .and_then(|key| self.tree.get(key))
            .map(|w| w.base().id())
    }

    /// The click key processed last during the previous cycle.
    pub fn last_released_key(&self) -> Option<ClickKey> {
        self.state.last_released
    }

    fn node_from_id(&self, id: u32) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(key) = stack.pop() {
            let Some(widget) = self.tree.get(key) else {
                continue;
            };
            if widget.base().id() == id {
                return Some(key);
            }
            if let Ok(children) = self.tree.children(key) {
                stack.extend(children.iter().rev().copied());
            }
        }
        None
    }

    fn lookup(&self, id: u32) -> WidgetResult<NodeId> {
        self.node_from_id(id).ok_or_else(|| {
            tracing::error!(target: targets::SCREEN, id, "no widget with this id");
            WidgetError::IdNotFound(id)
        })
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Give keyboard focus to a widget; the previous holder receives its
    /// `focus_lost` hook first.
    pub fn set_focus(&mut self, id: u32) -> WidgetResult<()> {
        let target = self.lookup(id)?;
        let Screen { tree, state, .. } = self;
        dispatch::drop_focus(tree, state, &[]);
        state.focus = Some(target);
        Ok(())
    }

    /// Drop keyboard focus, firing `focus_lost` on the holder.
    pub fn clear_focus(&mut self) {
        let Screen { tree, state, .. } = self;
        dispatch::drop_focus(tree, state, &[]);
    }

    /// Id of the widget holding keyboard focus.
    pub fn focused_id(&self) -> Option<u32> {
        self.state
            .focus
            .and_then(|key| self.tree.get(key))
            .map(|w| w.base().id())
    }

    // =========================================================================
    // Service registration
    // =========================================================================

    /// Register the audio hook and the sound ids widget transitions feed
    /// it.
    pub fn set_audio(
        &mut self,
        callback: impl FnMut(i32) + 'static,
        highlight_id: Option<i32>,
        clicked_id: Option<i32>,
    ) {
        self.state.audio = Some(WidgetAudio {
            callback: Box::new(callback),
            highlight_id,
            clicked_id,
        });
    }

    /// Register the tooltip service.
    pub fn set_tip_handler(&mut self, handler: impl TipHandler + 'static) {
        self.state.tip_handler = Some(Box::new(handler));
    }

    /// Select the font tooltips are shown in.
    pub fn set_tip_font(&mut self, font: FontId) {
        self.state.tip_font = font;
    }

    /// Gate the click phase of `run_cycle`. While disabled, queued
    /// pointer events are ignored; hover tracking and the run/callback
    /// walks still execute.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.state.input_enabled = enabled;
    }

    /// Whether the click phase is enabled.
    pub fn is_input_enabled(&self) -> bool {
        self.state.input_enabled
    }

    // =========================================================================
    // Per-widget services by id
    // =========================================================================

    /// Reveal a widget.
    pub fn show(&mut self, id: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        if let Some(widget) = self.tree.get_mut(key) {
            widget.base_mut().show();
        }
        Ok(())
    }

    /// Hide a widget: it no longer paints or takes part in hit-testing.
    pub fn hide(&mut self, id: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        if let Some(widget) = self.tree.get_mut(key) {
            widget.base_mut().hide();
        }
        Ok(())
    }

    /// A widget's parent-relative position.
    pub fn position(&self, id: u32) -> WidgetResult<Point> {
        let key = self.lookup(id)?;
        Ok(self
            .tree
            .get(key)
            .map(|w| w.base().position())
            .unwrap_or(Point::ZERO))
    }

    /// A widget's opaque integer word.
    pub fn user_word(&self, id: u32) -> WidgetResult<u32> {
        let key = self.lookup(id)?;
        Ok(self.tree.get(key).map(|w| w.base().user_word()).unwrap_or(0))
    }

    /// Replace a widget's opaque integer word.
    pub fn set_user_word(&mut self, id: u32, word: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        if let Some(widget) = self.tree.get_mut(key) {
            widget.base_mut().set_user_word(word);
        }
        Ok(())
    }

    /// A widget's opaque data attachment.
    pub fn user_data(&self, id: u32) -> WidgetResult<Option<&dyn Any>> {
        let key = self.lookup(id)?;
        Ok(self.tree.get(key).and_then(|w| w.base().user_data()))
    }

    /// Replace a widget's opaque data attachment.
    pub fn set_user_data(&mut self, id: u32, data: Option<Box<dyn Any>>) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        if let Some(widget) = self.tree.get_mut(key) {
            widget.base_mut().set_user_data(data);
        }
        Ok(())
    }

    /// A widget's text (buttons, labels, edit boxes).
    pub fn string(&self, id: u32) -> WidgetResult<String> {
        let key = self.lookup(id)?;
        match self.tree.get(key) {
            Some(widget) => widget.string(),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// Replace a widget's text.
    ///
    /// Replacing the text of the edit box that holds keyboard focus
    /// first clears focus (committing the pending edit), so no stale
    /// caret state survives the change.
    pub fn set_string(&mut self, id: u32, text: &str) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        let is_focused_edit_box = self.state.focus == Some(key)
            && self
                .tree
                .get(key)
                .is_some_and(|w| w.kind() == WidgetKind::EditBox);
        if is_focused_edit_box {
            self.clear_focus();
        }
        match self.tree.get_mut(key) {
            Some(widget) => widget.set_string(text),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// A button's or clickable form's caller-controlled state bits.
    pub fn button_state(&self, id: u32) -> WidgetResult<u32> {
        let key = self.lookup(id)?;
        match self.tree.get(key) {
            Some(widget) => widget.state(),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// Replace a button's or clickable form's caller-controlled state
    /// bits.
    pub fn set_button_state(&mut self, id: u32, state: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        match self.tree.get_mut(key) {
            Some(widget) => widget.set_state(state),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// Replace a widget's tooltip.
    pub fn set_tip(&mut self, id: u32, tip: &str) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        match self.tree.get_mut(key) {
            Some(widget) => widget.set_tip(tip),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// Start a widget flashing.
    pub fn set_flash(&mut self, id: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        match self.tree.get_mut(key) {
            Some(widget) => widget.set_flash(true),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// Stop a widget flashing.
    pub fn clear_flash(&mut self, id: u32) -> WidgetResult<()> {
        let key = self.lookup(id)?;
        match self.tree.get_mut(key) {
            Some(widget) => widget.set_flash(false),
            None => Err(WidgetError::IdNotFound(id)),
        }
    }

    /// Override one colour of a form's palette.
    pub fn set_colour(&mut self, id: u32, role: ColourRole, colour: Colour) -> WidgetResult<()> {
        self.with_cast_mut::<Form, _>(id, "set_colour", |form| {
            form.palette_mut().set_colour(role, colour);
        })
    }

    /// A slider's thumb position in stops.
    pub fn slider_pos(&self, id: u32) -> WidgetResult<u16> {
        self.with_cast::<Slider, _>(id, "slider_pos", |slider| slider.pos())
    }

    /// Move a slider's thumb.
    pub fn set_slider_pos(&mut self, id: u32, pos: u16) -> WidgetResult<()> {
        self.with_cast_mut::<Slider, _>(id, "set_slider_pos", |slider| slider.set_pos(pos))
    }

    /// Set a bar graph's major value.
    pub fn set_bar_value(&mut self, id: u32, value: u32) -> WidgetResult<()> {
        self.with_cast_mut::<BarGraph, _>(id, "set_bar_value", |bar| bar.set_value(value))
    }

    /// Set a bar graph's minor value.
    pub fn set_bar_minor_value(&mut self, id: u32, value: u32) -> WidgetResult<()> {
        self.with_cast_mut::<BarGraph, _>(id, "set_bar_minor_value", |bar| {
            bar.set_minor_value(value)
        })
    }

    /// Set a bar graph's range.
    pub fn set_bar_range(&mut self, id: u32, range: u32) -> WidgetResult<()> {
        self.with_cast_mut::<BarGraph, _>(id, "set_bar_range", |bar| bar.set_range(range))
    }

    fn with_cast<T: Widget + 'static, R>(
        &self,
        id: u32,
        op: &'static str,
        f: impl FnOnce(&T) -> R,
    ) -> WidgetResult<R> {
        let key = self.lookup(id)?;
        let Some(widget) = self.tree.get(key) else {
            return Err(WidgetError::IdNotFound(id));
        };
        let kind = widget.kind();
        match widget_cast::<T>(widget.as_ref()) {
            Some(concrete) => Ok(f(concrete)),
            None => {
                tracing::error!(target: targets::SCREEN, id, ?kind, op, "wrong widget variant");
                Err(WidgetError::Unsupported { op, kind })
            }
        }
    }

    fn with_cast_mut<T: Widget + 'static, R>(
        &mut self,
        id: u32,
        op: &'static str,
        f: impl FnOnce(&mut T) -> R,
    ) -> WidgetResult<R> {
        let key = self.lookup(id)?;
        let Some(widget) = self.tree.get_mut(key) else {
            return Err(WidgetError::IdNotFound(id));
        };
        let kind = widget.kind();
        match widget_cast_mut::<T>(widget.as_mut()) {
            Some(concrete) => Ok(f(concrete)),
            None => {
                tracing::error!(target: targets::SCREEN, id, ?kind, op, "wrong widget variant");
                Err(WidgetError::Unsupported { op, kind })
            }
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Render the widget tree as indented text for logs and failure
    /// diagnostics.
    pub fn debug_tree(&self) -> String {
        format_tree(&self.tree, self.root, |_, widget| {
            let base = widget.base();
            format!(
                "{:?} id={} at ({}, {}) {}x{}{}",
                widget.kind(),
                base.id(),
                base.position().x,
                base.position().y,
                base.width(),
                base.height(),
                if base.is_visible() { "" } else { " [hidden]" },
            )
        })
    }
}
