//! The widget system.
//!
//! A retained tree of widgets driven one cycle per game tick:
//!
//! - [`Screen`] owns the tree, keyboard focus, the per-frame trigger
//!   list and every service registration
//! - [`Widget`] is the trait all variants implement; [`WidgetBase`] is
//!   the common state they embed
//! - [`widgets`] holds the built-in variants (forms, buttons, labels,
//!   edit boxes, bar graphs, sliders)
//!
//! # Driving a screen
//!
//! ```
//! use mullion::widget::{Screen, WidgetInit};
//! use mullion::widget::widgets::ButtonInit;
//! use mullion::{FrameInput, Point};
//!
//! let mut screen = Screen::new(800, 600);
//! screen.add_button(ButtonInit {
//!     widget: WidgetInit {
//!         id: 10,
//!         x: 10,
//!         y: 10,
//!         width: 100,
//!         height: 20,
//!         ..WidgetInit::default()
//!     },
//!     text: "Launch".into(),
//!     ..ButtonInit::default()
//! })?;
//!
//! // One eventless tick: hover state tracks the pointer anyway.
//! let triggers = screen.run_cycle(&FrameInput::at(Point::new(50, 20)));
//! assert!(triggers.is_empty());
//! # Ok::<(), mullion::WidgetError>(())
//! ```
//!
//! # Coordinate systems
//!
//! A widget's geometry is relative to its parent form's content area
//! (the form's rectangle shifted by its scroll origin). The dispatch
//! engine translates the pointer into each form's space as it recurses;
//! painting accumulates the inverse offset. Widgets never see absolute
//! coordinates except as the accumulated offset in their contexts.

mod base;
mod dispatch;
mod events;
mod screen;
#[cfg(test)]
mod tests;
mod traits;
pub mod widgets;

pub use base::{DisplayFunction, WidgetBase, WidgetCallback, WidgetInit, WidgetKind};
pub use events::{
    CallbackContext, ClickKey, EventContext, FrameInput, KeyPress, MouseButton, MousePress,
    PressAction, Trigger,
};
pub use screen::{Screen, TipHandler};
pub use traits::{widget_cast, widget_cast_mut, Widget};
