//! Error types for the widget layer.

use thiserror::Error;

use crate::widget::WidgetKind;
use mullion_core::TreeError;

/// Errors raised by widget management and capability operations.
///
/// Everything here is a caller bug, not bad input: the screen logs the
/// violation at `error` level and leaves its state untouched. Lookup
/// misses (`IdNotFound`) are the one class the caller is expected to
/// check for in normal operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WidgetError {
    /// The id is already in use somewhere in the screen's tree.
    #[error("widget id {0} is already in use")]
    DuplicateId(u32),
    /// No widget with this id exists in the screen's tree.
    #[error("no widget with id {0}")]
    IdNotFound(u32),
    /// The id names a widget that is not a form.
    #[error("widget {0} is not a form")]
    NotAForm(u32),
    /// The root form cannot be removed; it lives as long as its screen.
    #[error("the root form cannot be removed")]
    RemoveRoot,
    /// The operation is not meaningful for this widget variant.
    #[error("{op} is not supported by {kind:?} widgets")]
    Unsupported {
        op: &'static str,
        kind: WidgetKind,
    },
    /// A tree shape violation surfaced through the widget layer.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// A specialized Result type for widget operations.
pub type WidgetResult<T> = std::result::Result<T, WidgetError>;
