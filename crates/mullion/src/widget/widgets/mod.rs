//! The built-in widget variants.

mod bar_graph;
mod button;
mod edit_box;
mod form;
mod label;
mod slider;

pub use bar_graph::{BarGraph, BarGraphInit};
pub use button::{Button, ButtonInit};
pub use edit_box::{EditBox, EditBoxInit};
pub use form::{Form, FormInit};
pub use label::{Label, LabelInit};
pub use slider::{Slider, SliderInit};
