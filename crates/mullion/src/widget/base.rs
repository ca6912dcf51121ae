//! Widget base implementation.
//!
//! This module provides [`WidgetBase`], the common state every widget
//! variant embeds and delegates to: identity, geometry, visibility,
//! user-attached data and the caller-supplied display/callback hooks.

use std::any::Any;
use std::fmt;

use crate::geometry::{Point, Rect};
use crate::paint::PaintContext;
use crate::widget::events::CallbackContext;
use crate::widget::traits::Widget;

/// The closed set of widget variants.
///
/// `Unspecified` is reserved for caller-implemented widgets that take
/// part in the tree walks without being one of the built-in variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Form,
    Button,
    Label,
    EditBox,
    BarGraph,
    Slider,
    Unspecified,
}

/// Caller-supplied paint override.
///
/// When present, a widget's default painter is skipped entirely and the
/// override is invoked with the widget and the paint context instead.
pub type DisplayFunction = Box<dyn Fn(&dyn Widget, &mut PaintContext<'_>)>;

/// Caller-supplied per-cycle callback, invoked by the callback walk for
/// every widget regardless of visibility.
pub type WidgetCallback = Box<dyn FnMut(&mut dyn Widget, &CallbackContext)>;

/// Shared construction parameters for every widget variant.
///
/// `parent` names the form (by widget id) the new widget is attached
/// under; 0 attaches directly to the screen's root form.
pub struct WidgetInit {
    /// Unique id within the screen's tree. Id 0 belongs to the root form.
    pub id: u32,
    /// Widget id of the parent form; 0 for the root form.
    pub parent: u32,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Start hidden; reveal later through the screen.
    pub hidden: bool,
    /// Opaque integer word readable back through the screen.
    pub user_word: u32,
    /// Opaque data attachment readable back through the screen.
    pub user_data: Option<Box<dyn Any>>,
    /// Paint override replacing the variant's default painter.
    pub display: Option<DisplayFunction>,
    /// Per-cycle callback for the callback walk.
    pub callback: Option<WidgetCallback>,
}

impl Default for WidgetInit {
    fn default() -> Self {
        Self {
            id: 0,
            parent: 0,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            hidden: false,
            user_word: 0,
            user_data: None,
            display: None,
            callback: None,
        }
    }
}

/// The base state for all widgets.
///
/// Widget implementations include this as a field and delegate common
/// operations to it; the [`Widget`](crate::widget::Widget) trait's
/// defaulted accessors do so automatically.
pub struct WidgetBase {
    id: u32,
    kind: WidgetKind,
    form_id: u32,
    geometry: Rect,
    visible: bool,
    user_word: u32,
    user_data: Option<Box<dyn Any>>,
    display_fn: Option<DisplayFunction>,
    callback: Option<WidgetCallback>,
}

impl WidgetBase {
    /// Create a widget base from shared init parameters.
    pub fn new(init: WidgetInit, kind: WidgetKind) -> Self {
        Self {
            id: init.id,
            kind,
            form_id: init.parent,
            geometry: Rect::new(init.x, init.y, init.width, init.height),
            visible: !init.hidden,
            user_word: init.user_word,
            user_data: init.user_data,
            display_fn: init.display,
            callback: init.callback,
        }
    }

    /// The widget's id.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The variant tag.
    #[inline]
    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    /// The widget id of the form this widget was created under.
    #[inline]
    pub fn form_id(&self) -> u32 {
        self.form_id
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Parent-relative geometry.
    #[inline]
    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    /// Replace the parent-relative geometry.
    pub fn set_geometry(&mut self, rect: Rect) {
        self.geometry = rect;
    }

    /// Parent-relative position.
    #[inline]
    pub fn position(&self) -> Point {
        self.geometry.position()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.geometry.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.geometry.height
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    /// Whether the widget takes part in hit-testing and painting.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the widget.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the widget. Hidden widgets are skipped by every walk except
    /// the callback walk.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    // =========================================================================
    // User data
    // =========================================================================

    /// The opaque integer word.
    #[inline]
    pub fn user_word(&self) -> u32 {
        self.user_word
    }

    /// Replace the opaque integer word.
    pub fn set_user_word(&mut self, word: u32) {
        self.user_word = word;
    }

    /// The opaque data attachment, if any.
    pub fn user_data(&self) -> Option<&dyn Any> {
        self.user_data.as_deref()
    }

    /// Replace the opaque data attachment.
    pub fn set_user_data(&mut self, data: Option<Box<dyn Any>>) {
        self.user_data = data;
    }

    // =========================================================================
    // Hooks
    // =========================================================================

    /// The paint override, if any.
    pub fn display_fn(&self) -> Option<&DisplayFunction> {
        self.display_fn.as_ref()
    }

    /// Take the per-cycle callback out for invocation. The callback walk
    /// removes it, calls it with the widget itself, and restores it.
    pub(crate) fn take_callback(&mut self) -> Option<WidgetCallback> {
        self.callback.take()
    }

    /// Restore a callback taken by [`take_callback`](Self::take_callback),
    /// unless the invocation installed a replacement in the meantime.
    pub(crate) fn restore_callback(&mut self, callback: WidgetCallback) {
        if self.callback.is_none() {
            self.callback = Some(callback);
        }
    }

    /// Whether a per-cycle callback is installed.
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }
}

impl fmt::Debug for WidgetBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetBase")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("geometry", &self.geometry)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}
