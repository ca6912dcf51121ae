//! The per-frame tree walks.
//!
//! Four separate recursions over the widget tree, all driven from
//! [`Screen::run_cycle`](crate::widget::Screen::run_cycle) or
//! [`Screen::display`](crate::widget::Screen::display):
//!
//! 1. **Click dispatch** ([`process_click`]): maps one pointer event (or
//!    the hover-only sentinel) onto the tree. Nested forms are recursed
//!    into *before* the enclosing form examines its own children, so the
//!    deepest form under the pointer handles the event first; a bounds
//!    check then cuts the walk off for forms the pointer is outside of.
//! 2. **Run walk** ([`run_form`]): invokes `run` once per cycle on every
//!    visible widget, pointer activity or not.
//! 3. **Callback walk** ([`run_callbacks`]): invokes the caller-supplied
//!    per-widget callback for every widget regardless of visibility.
//! 4. **Display walk** ([`display_form`]): paints visible widgets,
//!    shifting the children of a held-down clickable form by one pixel.
//!
//! # Coordinate bookkeeping
//!
//! Each recursion level carries a [`WalkContext`]: the pointer position
//! local to the current form's rectangle, and the accumulated screen
//! offset of that rectangle. Entering a form's content area folds the
//! form's scroll origin into both; entering a child form folds in the
//! child's position.
//!
//! # Borrow discipline
//!
//! The tree and the screen's tracker state are borrowed separately.
//! Child lists are snapshotted before iteration and every widget call
//! re-resolves its target id, so a hook that mutates tracker state (or a
//! stale id left by a removal) can never invalidate the walk.

use mullion_core::{logging::targets, NodeId, Tree};

use crate::geometry::{Point, Rect};
use crate::paint::{PaintContext, Painter};
use crate::style::{FormState, FormStyle};
use crate::widget::events::{CallbackContext, ClickKey, EventContext, FocusRequest, KeyPress};
use crate::widget::screen::ScreenState;
use crate::widget::traits::{widget_cast, widget_cast_mut, Widget};
use crate::widget::widgets::Form;

pub(crate) type WidgetTree = Tree<Box<dyn Widget>>;

/// Pointer coordinates for one recursion level.
#[derive(Debug, Clone, Copy)]
pub(crate) struct WalkContext {
    /// Pointer position local to the current form's rectangle.
    pub mouse: Point,
    /// Screen offset of the current form's rectangle.
    pub offset: Point,
}

/// What the click walk needs to know about the form it is entering.
struct FormInfo {
    origin: Point,
    width: i32,
    height: i32,
    clickable: bool,
    last_highlighted: Option<NodeId>,
}

fn form_info(tree: &WidgetTree, key: NodeId) -> Option<FormInfo> {
    let widget = tree.get(key)?;
    let form = widget_cast::<Form>(widget.as_ref())?;
    Some(FormInfo {
        origin: form.scroll_origin(),
        width: form.base().width(),
        height: form.base().height(),
        clickable: form.is_clickable(),
        last_highlighted: form.last_highlighted(),
    })
}

/// What the walks need to know about a child before deciding to recurse
/// or dispatch.
struct ChildInfo {
    visible: bool,
    is_form: bool,
    geometry: Rect,
    position: Point,
}

fn child_info(tree: &WidgetTree, key: NodeId) -> Option<ChildInfo> {
    let widget = tree.get(key)?;
    let base = widget.base();
    Some(ChildInfo {
        visible: base.is_visible(),
        is_form: widget_cast::<Form>(widget.as_ref()).is_some(),
        geometry: base.geometry(),
        position: base.position(),
    })
}

fn children_of(tree: &WidgetTree, key: NodeId) -> Vec<NodeId> {
    tree.children(key)
        .map(<[NodeId]>::to_vec)
        .unwrap_or_default()
}

/// Resolve `target`, run `hook` on it, then apply any focus change the
/// hook requested. Dead ids are skipped silently.
fn dispatch_to(
    tree: &mut WidgetTree,
    state: &mut ScreenState,
    target: NodeId,
    ctx: WalkContext,
    keys: &[KeyPress],
    hook: impl FnOnce(&mut dyn Widget, &mut EventContext<'_>),
) {
    {
        let Some(widget) = tree.get_mut(target) else {
            return;
        };
        let mut event_ctx = EventContext::new(target, ctx.mouse, ctx.offset, keys, state);
        hook(widget.as_mut(), &mut event_ctx);
    }
    apply_focus_request(tree, state, keys);
}

fn apply_focus_request(tree: &mut WidgetTree, state: &mut ScreenState, keys: &[KeyPress]) {
    let Some(request) = state.focus_request.take() else {
        return;
    };
    match request {
        FocusRequest::Grab(target) => {
            drop_focus(tree, state, keys);
            state.focus = Some(target);
        }
        FocusRequest::Release => drop_focus(tree, state, keys),
    }
}

/// Clear keyboard focus, firing `focus_lost` on the previous holder.
pub(crate) fn drop_focus(tree: &mut WidgetTree, state: &mut ScreenState, keys: &[KeyPress]) {
    let Some(old) = state.focus.take() else {
        return;
    };
    if let Some(widget) = tree.get_mut(old) {
        let mut event_ctx = EventContext::new(old, Point::ZERO, Point::ZERO, keys, state);
        widget.as_mut().focus_lost(&mut event_ctx);
    }
    // `focus_lost` must not re-enter focus handling.
    if state.focus_request.take().is_some() {
        tracing::warn!(target: targets::DISPATCH, "focus request made during focus_lost ignored");
    }
}

/// Dispatch one pointer event into `form_key` and its subtree.
///
/// `key` is `None` for the hover-only pass that runs after the frame's
/// discrete events: it updates highlights and the mouse-over marker
/// without firing click semantics.
pub(crate) fn process_click(
    tree: &mut WidgetTree,
    state: &mut ScreenState,
    form_key: NodeId,
    ctx: WalkContext,
    key: Option<ClickKey>,
    pressed: bool,
    keys: &[KeyPress],
) {
    let Some(info) = form_info(tree, form_key) else {
        return;
    };
    let children = children_of(tree, form_key);

    // Content-area coordinates: the scroll origin shifts the local
    // pointer position and the accumulated offset in opposite directions.
    let content = WalkContext {
        mouse: ctx.mouse - info.origin,
        offset: ctx.offset + info.origin,
    };

    // Nested forms first, so the deepest form under the pointer handles
    // the event before this one considers its own children.
    for &child in &children {
        let Some(child_info) = child_info(tree, child) else {
            continue;
        };
        if !child_info.visible || !child_info.is_form {
            continue;
        }
        process_click(
            tree,
            state,
            child,
            WalkContext {
                mouse: content.mouse - child_info.position,
                offset: content.offset + child_info.position,
            },
            key,
            pressed,
            keys,
        );
    }

    // The event involves this form and its direct children only if it
    // lands inside the form's own bounds.
    if !Rect::new(0, 0, info.width, info.height).contains_inclusive(ctx.mouse) {
        return;
    }

    // Hit-test direct children in attachment order; the first visible
    // child under the pointer wins. `hit_child` drives the highlight
    // transition below; `consumed_by` decides click routing, and stays
    // empty for a clickable form so the form itself keeps the click
    // while its children still get hover updates.
    let mut hit_child: Option<NodeId> = None;
    let mut consumed_by: Option<NodeId> = None;
    for &child in &children {
        let Some(child_info) = child_info(tree, child) else {
            continue;
        };
        if !child_info.visible || !child_info.geometry.contains_inclusive(content.mouse) {
            continue;
        }

        // First hit anywhere in the whole walk owns the frame's
        // mouse-over marker.
        if state.mouse_over.is_none() {
            state.mouse_over = Some(child);
        }

        hit_child = Some(child);
        if !info.clickable {
            consumed_by = Some(child);
            if let Some(k) = key {
                dispatch_to(tree, state, child, content, keys, |widget, event_ctx| {
                    if pressed {
                        widget.clicked(event_ctx, k);
                    } else {
                        widget.released(event_ctx, k);
                    }
                });
            }
        }
        break;
    }

    // Fire the highlight transition when the hovered child changed.
    if info.last_highlighted != hit_child {
        if let Some(old) = info.last_highlighted {
            dispatch_to(tree, state, old, content, keys, |widget, event_ctx| {
                widget.highlight_lost(event_ctx);
            });
        }
        if let Some(new) = hit_child {
            dispatch_to(tree, state, new, content, keys, |widget, event_ctx| {
                widget.highlight(event_ctx);
            });
        }
        if let Some(widget) = tree.get_mut(form_key) {
            if let Some(form) = widget_cast_mut::<Form>(widget.as_mut()) {
                form.set_last_highlighted(hit_child);
            }
        }
    }

    if consumed_by.is_some() {
        return;
    }

    if state.mouse_over.is_none() {
        state.mouse_over = Some(form_key);
    }

    let Some(k) = key else {
        return;
    };
    dispatch_to(tree, state, form_key, ctx, keys, |widget, event_ctx| {
        if pressed {
            widget.clicked(event_ctx, k);
        } else {
            widget.released(event_ctx, k);
        }
    });
}

/// Invoke `run` on every visible widget of `form_key`'s subtree, the
/// form itself last.
pub(crate) fn run_form(
    tree: &mut WidgetTree,
    state: &mut ScreenState,
    form_key: NodeId,
    ctx: WalkContext,
    keys: &[KeyPress],
) {
    let Some(info) = form_info(tree, form_key) else {
        return;
    };
    let children = children_of(tree, form_key);
    let content = WalkContext {
        mouse: ctx.mouse - info.origin,
        offset: ctx.offset + info.origin,
    };

    for &child in &children {
        let Some(child_info) = child_info(tree, child) else {
            continue;
        };
        if !child_info.visible {
            continue;
        }
        if child_info.is_form {
            run_form(
                tree,
                state,
                child,
                WalkContext {
                    mouse: content.mouse - child_info.position,
                    offset: content.offset + child_info.position,
                },
                keys,
            );
        } else {
            dispatch_to(tree, state, child, content, keys, |widget, event_ctx| {
                widget.run(event_ctx);
            });
        }
    }

    dispatch_to(tree, state, form_key, ctx, keys, |widget, event_ctx| {
        widget.run(event_ctx);
    });
}

/// Invoke the caller-supplied callback on every widget of `form_key`'s
/// subtree, visible or not.
pub(crate) fn run_callbacks(tree: &mut WidgetTree, form_key: NodeId, ctx: WalkContext) {
    let Some(info) = form_info(tree, form_key) else {
        return;
    };
    let children = children_of(tree, form_key);
    let content = WalkContext {
        mouse: ctx.mouse - info.origin,
        offset: ctx.offset + info.origin,
    };

    for &child in &children {
        invoke_callback(
            tree,
            child,
            CallbackContext {
                mouse: content.mouse,
                offset: content.offset,
            },
        );
        let Some(child_info) = child_info(tree, child) else {
            continue;
        };
        if child_info.is_form {
            run_callbacks(
                tree,
                child,
                WalkContext {
                    mouse: content.mouse - child_info.position,
                    offset: content.offset + child_info.position,
                },
            );
        }
    }
}

fn invoke_callback(tree: &mut WidgetTree, target: NodeId, ctx: CallbackContext) {
    let Some(widget) = tree.get_mut(target) else {
        return;
    };
    let Some(mut callback) = widget.base_mut().take_callback() else {
        return;
    };
    callback(widget.as_mut(), &ctx);
    widget.base_mut().restore_callback(callback);
}

/// Paint `form_key` and its visible subtree.
///
/// The form paints itself with its own palette; non-form children paint
/// with the enclosing form's palette. While a clickable form is held
/// down (or locked down), its children shift by one pixel unless the
/// form opts out with [`FormStyle::NO_CLICK_MOVE`].
pub(crate) fn display_form(
    tree: &WidgetTree,
    form_key: NodeId,
    offset: Point,
    painter: &mut dyn Painter,
) {
    let Some(widget) = tree.get(form_key) else {
        return;
    };
    let Some(form) = widget_cast::<Form>(widget.as_ref()) else {
        return;
    };

    {
        let mut paint_ctx = PaintContext::new(offset, form.palette(), &mut *painter);
        form.display(&mut paint_ctx);
    }

    if form.disable_children() {
        return;
    }

    let mut child_offset = offset + form.base().position() + form.scroll_origin();
    if form.is_clickable()
        && !form.style().contains(FormStyle::NO_CLICK_MOVE)
        && form.form_state().intersects(FormState::DEPRESSED)
    {
        child_offset += Point::new(1, 1);
    }

    let Ok(children) = tree.children(form_key) else {
        return;
    };
    for &child in children {
        let Some(child_widget) = tree.get(child) else {
            continue;
        };
        if !child_widget.base().is_visible() {
            continue;
        }
        if widget_cast::<Form>(child_widget.as_ref()).is_some() {
            display_form(tree, child, child_offset, painter);
        } else {
            let mut paint_ctx = PaintContext::new(child_offset, form.palette(), &mut *painter);
            child_widget.display(&mut paint_ctx);
        }
    }
}
