//! Frame input model and the context handed to widget hooks.
//!
//! The caller drains its platform event queue once per game tick into a
//! [`FrameInput`] and passes it to
//! [`Screen::run_cycle`](crate::widget::Screen::run_cycle). The dispatch
//! engine then talks to widgets through [`EventContext`], which carries
//! the form-local pointer position and grants access to the screen's
//! per-cycle services (triggers, focus, audio, tooltips).

use mullion_core::NodeId;

use crate::geometry::{Point, Rect};
use crate::widget::screen::ScreenState;

/// Physical mouse buttons as reported by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Whether a pointer event was a press or a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressAction {
    Press,
    Release,
}

/// One discrete pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MousePress {
    pub button: MouseButton,
    pub action: PressAction,
    /// Screen position at the time of the event.
    pub position: Point,
}

/// The logical click keys widgets react to.
///
/// Only two physical buttons map onto these (left -> `Primary`,
/// right -> `Secondary`); events for any other button are ignored by the
/// dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickKey {
    Primary,
    Secondary,
}

/// Map a physical button to its logical click key.
pub(crate) fn click_key(button: MouseButton) -> Option<ClickKey> {
    match button {
        MouseButton::Left => Some(ClickKey::Primary),
        MouseButton::Right => Some(ClickKey::Secondary),
        MouseButton::Middle => None,
    }
}

/// One key event for the focused edit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPress {
    /// A printable character.
    Char(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Return,
    Escape,
}

/// One frame's worth of input, drained from the platform layer.
#[derive(Default)]
pub struct FrameInput {
    /// Discrete pointer events in arrival order.
    pub presses: Vec<MousePress>,
    /// The pointer position at the end of the frame. Hover highlighting
    /// tracks this even when `presses` is empty.
    pub position: Point,
    /// Key events in arrival order, consumed by the focused edit box.
    pub keys: Vec<KeyPress>,
}

impl FrameInput {
    /// An eventless frame with the pointer at `position`.
    pub fn at(position: Point) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// A record meaning "this widget completed a user interaction this
/// cycle": a button released while hovered, a committed edit box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trigger {
    /// Tree handle of the widget that fired.
    pub node: NodeId,
    /// The widget's id.
    pub id: u32,
}

/// Positional context passed to per-widget callbacks by the callback
/// walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallbackContext {
    /// Pointer position local to the enclosing form's content area.
    pub mouse: Point,
    /// Screen offset of the enclosing form's content area.
    pub offset: Point,
}

/// A pending focus change requested from inside a widget hook.
///
/// Focus transitions must not re-enter the widget tree while a widget is
/// mutably borrowed, so hooks only *request* them; the dispatch engine
/// applies the request after the hook returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FocusRequest {
    /// Give keyboard focus to this widget.
    Grab(NodeId),
    /// Drop keyboard focus entirely.
    Release,
}

/// Context handed to widget input/run hooks during a dispatch cycle.
pub struct EventContext<'a> {
    widget: NodeId,
    /// Pointer position local to the enclosing form's content area.
    pub mouse: Point,
    /// Screen offset of the enclosing form's content area.
    pub offset: Point,
    keys: &'a [KeyPress],
    state: &'a mut ScreenState,
}

impl<'a> EventContext<'a> {
    pub(crate) fn new(
        widget: NodeId,
        mouse: Point,
        offset: Point,
        keys: &'a [KeyPress],
        state: &'a mut ScreenState,
    ) -> Self {
        Self {
            widget,
            mouse,
            offset,
            keys,
            state,
        }
    }

    /// Tree handle of the widget this context was built for.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.widget
    }

    /// The frame's key events. The returned slice borrows the frame
    /// input, not this context, so it stays usable while the context is
    /// mutated.
    #[inline]
    pub fn keys(&self) -> &'a [KeyPress] {
        self.keys
    }

    /// Whether a primary press occurred anywhere this cycle. Edit boxes
    /// use this to drop focus when the user clicks elsewhere.
    #[inline]
    pub fn primary_pressed(&self) -> bool {
        self.state.primary_pressed
    }

    /// Append a trigger record for this widget. Repeat records for the
    /// same widget within one cycle are dropped.
    pub fn set_return(&mut self, id: u32) {
        self.state.push_trigger(Trigger {
            node: self.widget,
            id,
        });
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Whether this widget currently holds keyboard focus.
    #[inline]
    pub fn has_focus(&self) -> bool {
        self.state.focus == Some(self.widget)
    }

    /// Request keyboard focus for this widget. Applied after the current
    /// hook returns; the previous holder receives `focus_lost`.
    pub fn request_focus(&mut self) {
        self.state.focus_request = Some(FocusRequest::Grab(self.widget));
    }

    /// Request that keyboard focus be dropped. Applied after the current
    /// hook returns.
    pub fn release_focus(&mut self) {
        self.state.focus_request = Some(FocusRequest::Release);
    }

    // =========================================================================
    // Audio
    // =========================================================================

    /// Play the registered highlight sound, if audio is registered.
    pub fn play_highlight_sound(&mut self) {
        self.state.play_highlight_sound();
    }

    /// Play the registered click sound, if audio is registered.
    pub fn play_clicked_sound(&mut self) {
        self.state.play_clicked_sound();
    }

    // =========================================================================
    // Tooltips
    // =========================================================================

    /// Start the tooltip for this widget. `rect` is the widget's screen
    /// rectangle the tooltip should anchor to.
    pub fn tip_start(&mut self, id: u32, text: &str, rect: Rect) {
        self.state.tip_start(id, text, rect);
    }

    /// Stop the tooltip for this widget.
    pub fn tip_stop(&mut self, id: u32) {
        self.state.tip_stop(id);
    }
}
