//! A retained-mode widget toolkit for frame-driven game interfaces.
//!
//! Mullion keeps a tree of widgets alive across frames and maps raw
//! pointer input onto it once per game tick. The caller owns the loop:
//! drain platform events into a [`FrameInput`], hand it to
//! [`Screen::run_cycle`](widget::Screen::run_cycle), react to the
//! returned triggers, then paint with
//! [`Screen::display`](widget::Screen::display). Rendering, tooltips and
//! audio stay on the caller's side of a trait boundary: the toolkit
//! computes *what* happened, never how it looks or sounds.
//!
//! # Crate layout
//!
//! - [`geometry`]: integer pixel points and rectangles
//! - [`style`]: colours, palettes, fonts and the per-variant style/state
//!   words
//! - [`paint`]: the [`Painter`](paint::Painter) service and paint context
//! - [`widget`]: the tree, the dispatch engine and the built-in widgets
//!
//! # A complete frame
//!
//! ```ignore
//! let mut input = FrameInput::at(platform.mouse_position());
//! for event in platform.drain_mouse_events() {
//!     input.presses.push(event.into());
//! }
//!
//! for trigger in screen.run_cycle(&input) {
//!     game.handle_widget(trigger.id);
//! }
//!
//! screen.display(&mut renderer);
//! ```

pub mod geometry;
pub mod paint;
pub mod style;
pub mod widget;

mod error;

pub use error::{WidgetError, WidgetResult};
pub use geometry::{Point, Rect};
pub use mullion_core::{NodeId, TreeError};
pub use paint::{PaintContext, Painter};
pub use style::{Colour, ColourRole, FontId, Palette};
pub use widget::{FrameInput, Screen, Trigger, Widget};
