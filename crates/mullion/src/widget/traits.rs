//! Core widget trait definition.
//!
//! [`Widget`] is the single entry point the tree walks use for every
//! node. Input hooks default to doing nothing, so a variant only
//! implements the interactions it actually has; the capability
//! operations (`state`, `string`, ...) default to a logged
//! [`WidgetError::Unsupported`] because calling them on the wrong
//! variant is a caller bug, not a recoverable condition.

use std::any::Any;

use mullion_core::{logging::targets, NodeId};

use crate::error::{WidgetError, WidgetResult};
use crate::paint::PaintContext;
use crate::widget::base::{WidgetBase, WidgetKind};
use crate::widget::events::{ClickKey, EventContext};

pub(crate) fn unsupported<T>(op: &'static str, kind: WidgetKind) -> WidgetResult<T> {
    tracing::error!(
        target: targets::SCREEN,
        ?kind,
        op,
        "operation not supported by this widget variant"
    );
    Err(WidgetError::Unsupported { op, kind })
}

/// The core trait for all widgets.
///
/// Implementors provide access to their embedded [`WidgetBase`] and
/// override the hooks that are meaningful for their variant. Everything
/// else comes with a sensible default:
///
/// - geometry/visibility accessors delegate to the base,
/// - input hooks (`clicked`, `released`, `highlight`, ...) are no-ops,
/// - capability operations report [`WidgetError::Unsupported`],
/// - `display` paints nothing.
///
/// # Example
///
/// ```ignore
/// struct Spinner {
///     base: WidgetBase,
///     angle: i32,
/// }
///
/// impl Widget for Spinner {
///     fn base(&self) -> &WidgetBase { &self.base }
///     fn base_mut(&mut self) -> &mut WidgetBase { &mut self.base }
///     fn as_any(&self) -> &dyn Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn Any { self }
///
///     fn run(&mut self, _ctx: &mut EventContext<'_>) {
///         self.angle = (self.angle + 4) % 360;
///     }
/// }
/// ```
pub trait Widget {
    // =========================================================================
    // Required methods
    // =========================================================================

    /// Get a reference to the widget's base.
    fn base(&self) -> &WidgetBase;

    /// Get a mutable reference to the widget's base.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Concrete-type access for [`widget_cast`].
    fn as_any(&self) -> &dyn Any;

    /// Concrete-type access for [`widget_cast_mut`].
    fn as_any_mut(&mut self) -> &mut dyn Any;

    // =========================================================================
    // Identity
    // =========================================================================

    /// The variant tag.
    fn kind(&self) -> WidgetKind {
        self.base().kind()
    }

    // =========================================================================
    // Input hooks (no-op defaults)
    // =========================================================================

    /// A click key was pressed over the widget.
    fn clicked(&mut self, _ctx: &mut EventContext<'_>, _key: ClickKey) {}

    /// A click key was released over the widget.
    fn released(&mut self, _ctx: &mut EventContext<'_>, _key: ClickKey) {}

    /// The pointer moved onto the widget.
    fn highlight(&mut self, _ctx: &mut EventContext<'_>) {}

    /// The pointer moved off the widget.
    fn highlight_lost(&mut self, _ctx: &mut EventContext<'_>) {}

    /// Once-per-cycle update, pointer activity or not.
    fn run(&mut self, _ctx: &mut EventContext<'_>) {}

    /// The widget lost keyboard focus.
    fn focus_lost(&mut self, _ctx: &mut EventContext<'_>) {}

    /// A descendant was detached or destroyed. Containers that track
    /// children by id override this to drop the stale reference; the
    /// notification reaches every ancestor of the lost widget.
    fn child_lost(&mut self, _child: NodeId) {}

    // =========================================================================
    // Capability operations (unsupported defaults)
    // =========================================================================

    /// Read the widget's state word (buttons and clickable forms).
    fn state(&self) -> WidgetResult<u32> {
        unsupported("state", self.kind())
    }

    /// Replace the caller-controlled bits of the state word.
    fn set_state(&mut self, _state: u32) -> WidgetResult<()> {
        unsupported("set_state", self.kind())
    }

    /// Read the widget's text.
    fn string(&self) -> WidgetResult<String> {
        unsupported("string", self.kind())
    }

    /// Replace the widget's text.
    fn set_string(&mut self, _text: &str) -> WidgetResult<()> {
        unsupported("set_string", self.kind())
    }

    /// Replace the widget's tooltip.
    fn set_tip(&mut self, _tip: &str) -> WidgetResult<()> {
        unsupported("set_tip", self.kind())
    }

    /// Start or stop flashing.
    fn set_flash(&mut self, _flash: bool) -> WidgetResult<()> {
        unsupported("set_flash", self.kind())
    }

    // =========================================================================
    // Painting
    // =========================================================================

    /// Paint the widget. Implementations defer to the caller-supplied
    /// display override when one is installed.
    fn display(&self, _ctx: &mut PaintContext<'_>) {}
}

/// Downcast a widget reference to its concrete type.
pub fn widget_cast<T: Widget + 'static>(widget: &dyn Widget) -> Option<&T> {
    widget.as_any().downcast_ref::<T>()
}

/// Downcast a mutable widget reference to its concrete type.
pub fn widget_cast_mut<T: Widget + 'static>(widget: &mut dyn Widget) -> Option<&mut T> {
    widget.as_any_mut().downcast_mut::<T>()
}
