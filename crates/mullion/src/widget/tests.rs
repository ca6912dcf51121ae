//! Behavioral tests for the widget system.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::error::WidgetError;
use crate::geometry::{Point, Rect};
use crate::paint::Painter;
use crate::style::{ButtonState, Colour, FontId, FormState, FormStyle};
use crate::widget::widgets::{
    BarGraphInit, Button, ButtonInit, EditBoxInit, Form, FormInit, LabelInit, SliderInit,
};
use crate::widget::{
    widget_cast, EventContext, FrameInput, KeyPress, MouseButton, MousePress, PressAction, Screen,
    TipHandler, Widget, WidgetBase, WidgetInit, WidgetKind,
};

// =============================================================================
// Fixtures
// =============================================================================

fn widget_at(id: u32, parent: u32, x: i32, y: i32, width: i32, height: i32) -> WidgetInit {
    WidgetInit {
        id,
        parent,
        x,
        y,
        width,
        height,
        ..WidgetInit::default()
    }
}

fn press_at(x: i32, y: i32) -> FrameInput {
    FrameInput {
        presses: vec![MousePress {
            button: MouseButton::Left,
            action: PressAction::Press,
            position: Point::new(x, y),
        }],
        position: Point::new(x, y),
        keys: Vec::new(),
    }
}

fn release_at(x: i32, y: i32) -> FrameInput {
    FrameInput {
        presses: vec![MousePress {
            button: MouseButton::Left,
            action: PressAction::Release,
            position: Point::new(x, y),
        }],
        position: Point::new(x, y),
        keys: Vec::new(),
    }
}

fn hover_at(x: i32, y: i32) -> FrameInput {
    FrameInput::at(Point::new(x, y))
}

/// Root screen with one full-viewport form (id 1) and one button
/// (id 10) at (10, 10, 100, 20).
fn button_screen() -> Screen {
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 800, 600),
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_button(ButtonInit {
            widget: widget_at(10, 1, 10, 10, 100, 20),
            text: "Fire".into(),
            ..ButtonInit::default()
        })
        .unwrap();
    screen
}

fn button_state_of(screen: &Screen, id: u32) -> ButtonState {
    widget_cast::<Button>(screen.get(id).unwrap())
        .unwrap()
        .button_state()
}

/// A caller-defined widget that records every hook invocation.
struct Probe {
    base: WidgetBase,
    log: Rc<RefCell<Vec<String>>>,
}

impl Probe {
    fn new(init: WidgetInit, log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            base: WidgetBase::new(init, WidgetKind::Unspecified),
            log,
        }
    }

    fn note(&self, event: &str) {
        self.log
            .borrow_mut()
            .push(format!("{}:{}", self.base.id(), event));
    }
}

impl Widget for Probe {
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

    fn clicked(&mut self, _ctx: &mut EventContext<'_>, _key: crate::widget::ClickKey) {
        self.note("clicked");
    }

    fn released(&mut self, _ctx: &mut EventContext<'_>, _key: crate::widget::ClickKey) {
        self.note("released");
    }

    fn highlight(&mut self, _ctx: &mut EventContext<'_>) {
        self.note("highlight");
    }

    fn highlight_lost(&mut self, _ctx: &mut EventContext<'_>) {
        self.note("highlight_lost");
    }
}

fn add_probe(screen: &mut Screen, init: WidgetInit, log: &Rc<RefCell<Vec<String>>>) {
    screen
        .add_widget(Box::new(Probe::new(init, Rc::clone(log))))
        .unwrap();
}

fn log_of(log: &Rc<RefCell<Vec<String>>>) -> Vec<String> {
    log.borrow().clone()
}

/// A painter with fixed metrics that records what it was asked to draw.
#[derive(Default)]
struct RecordingPainter {
    texts: Vec<(String, Point)>,
    fills: Vec<Rect>,
}

impl Painter for RecordingPainter {
    fn text_width(&self, _font: FontId, text: &str) -> i32 {
        text.len() as i32 * 8
    }

    fn line_height(&self, _font: FontId) -> i32 {
        10
    }

    fn draw_text(&mut self, _font: FontId, text: &str, pos: Point, _colour: Colour) {
        self.texts.push((text.to_owned(), pos));
    }

    fn fill_rect(&mut self, rect: Rect, _colour: Colour) {
        self.fills.push(rect);
    }

    fn draw_rect(&mut self, _rect: Rect, _colour: Colour) {}
}

#[derive(Default)]
struct RecordingTips {
    events: Rc<RefCell<Vec<(String, u32)>>>,
}

impl TipHandler for RecordingTips {
    fn start(&mut self, id: u32, _text: &str, _font: FontId, _rect: Rect) {
        self.events.borrow_mut().push(("start".into(), id));
    }

    fn stop(&mut self, id: u32) {
        self.events.borrow_mut().push(("stop".into(), id));
    }
}

// =============================================================================
// Click dispatch
// =============================================================================

#[test]
fn press_then_release_on_button_triggers_once() {
    let mut screen = button_screen();

    let triggers = screen.run_cycle(&press_at(50, 20));
    assert!(triggers.is_empty());
    assert!(button_state_of(&screen, 10).contains(ButtonState::DOWN));

    let triggers = screen.run_cycle(&release_at(50, 20));
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 10);
    assert!(!button_state_of(&screen, 10).contains(ButtonState::DOWN));
}

#[test]
fn release_off_the_button_does_not_trigger() {
    let mut screen = button_screen();

    screen.run_cycle(&press_at(50, 20));
    assert!(button_state_of(&screen, 10).contains(ButtonState::DOWN));

    // The release re-hit-tests: it lands on the form, not the button,
    // and the hover pass disarms the button.
    let triggers = screen.run_cycle(&release_at(500, 500));
    assert!(triggers.is_empty());
    assert!(!button_state_of(&screen, 10).contains(ButtonState::DOWN));
}

#[test]
fn press_and_release_within_one_cycle_triggers() {
    let mut screen = button_screen();
    let input = FrameInput {
        presses: vec![
            MousePress {
                button: MouseButton::Left,
                action: PressAction::Press,
                position: Point::new(50, 20),
            },
            MousePress {
                button: MouseButton::Left,
                action: PressAction::Release,
                position: Point::new(50, 20),
            },
        ],
        position: Point::new(50, 20),
        keys: Vec::new(),
    };
    let triggers = screen.run_cycle(&input);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 10);
}

#[test]
fn repeat_triggers_for_one_widget_are_deduplicated() {
    let mut screen = button_screen();
    // Two full click sequences in a single frame: the second completed
    // interaction is dropped by the per-cycle dedup.
    let click = |pos: Point, action: PressAction| MousePress {
        button: MouseButton::Left,
        action,
        position: pos,
    };
    let pos = Point::new(50, 20);
    let input = FrameInput {
        presses: vec![
            click(pos, PressAction::Press),
            click(pos, PressAction::Release),
            click(pos, PressAction::Press),
            click(pos, PressAction::Release),
        ],
        position: pos,
        keys: Vec::new(),
    };
    let triggers = screen.run_cycle(&input);
    assert_eq!(triggers.len(), 1);
}

#[test]
fn middle_button_events_are_ignored() {
    let mut screen = button_screen();
    let input = FrameInput {
        presses: vec![
            MousePress {
                button: MouseButton::Middle,
                action: PressAction::Press,
                position: Point::new(50, 20),
            },
            MousePress {
                button: MouseButton::Middle,
                action: PressAction::Release,
                position: Point::new(50, 20),
            },
        ],
        position: Point::new(50, 20),
        keys: Vec::new(),
    };
    let triggers = screen.run_cycle(&input);
    assert!(triggers.is_empty());
    assert!(!button_state_of(&screen, 10).contains(ButtonState::DOWN));
}

#[test]
fn secondary_clicks_need_the_secondary_style() {
    let mut screen = button_screen();
    let right_click = FrameInput {
        presses: vec![
            MousePress {
                button: MouseButton::Right,
                action: PressAction::Press,
                position: Point::new(50, 20),
            },
            MousePress {
                button: MouseButton::Right,
                action: PressAction::Release,
                position: Point::new(50, 20),
            },
        ],
        position: Point::new(50, 20),
        keys: Vec::new(),
    };
    // The default button only listens to the primary key.
    let triggers = screen.run_cycle(&right_click);
    assert!(triggers.is_empty());

    screen
        .add_button(ButtonInit {
            widget: widget_at(11, 1, 10, 40, 100, 20),
            style: crate::style::ButtonStyle::SECONDARY,
            ..ButtonInit::default()
        })
        .unwrap();
    let right_click_lower = FrameInput {
        presses: vec![
            MousePress {
                button: MouseButton::Right,
                action: PressAction::Press,
                position: Point::new(50, 50),
            },
            MousePress {
                button: MouseButton::Right,
                action: PressAction::Release,
                position: Point::new(50, 50),
            },
        ],
        position: Point::new(50, 50),
        keys: Vec::new(),
    };
    let triggers = screen.run_cycle(&right_click_lower);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 11);
}

#[test]
fn clicks_outside_a_form_never_reach_its_children() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 100, 100, 200, 200),
            ..FormInit::default()
        })
        .unwrap();
    add_probe(&mut screen, widget_at(10, 1, 10, 10, 50, 50), &log);

    screen.run_cycle(&press_at(50, 50));
    screen.run_cycle(&release_at(50, 50));
    assert!(log_of(&log).is_empty());
}

#[test]
fn sibling_forms_are_isolated() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 300, 600),
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_form(FormInit {
            widget: widget_at(2, 0, 400, 0, 300, 600),
            ..FormInit::default()
        })
        .unwrap();
    add_probe(&mut screen, widget_at(10, 1, 10, 10, 50, 50), &log);
    add_probe(&mut screen, widget_at(20, 2, 10, 10, 50, 50), &log);

    // Click inside the second form's probe.
    screen.run_cycle(&press_at(430, 30));
    screen.run_cycle(&release_at(430, 30));

    let events = log_of(&log);
    assert!(events.iter().all(|e| e.starts_with("20:")), "{events:?}");
    assert!(events.contains(&"20:clicked".to_owned()));
    assert!(events.contains(&"20:released".to_owned()));
}

#[test]
fn nested_form_children_get_form_local_coordinates() {
    // A button at (10, 10) inside a form at (200, 100): clicking at
    // screen (250, 120) must resolve to the button.
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 200, 100, 300, 200),
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_button(ButtonInit {
            widget: widget_at(10, 1, 10, 10, 100, 20),
            ..ButtonInit::default()
        })
        .unwrap();

    screen.run_cycle(&press_at(250, 120));
    let triggers = screen.run_cycle(&release_at(250, 120));
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 10);
}

#[test]
fn scroll_origin_shifts_hit_testing() {
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 300, 200),
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_button(ButtonInit {
            widget: widget_at(10, 1, 10, 100, 100, 20),
            ..ButtonInit::default()
        })
        .unwrap();

    // Scroll the content up by 80: the button now sits at screen y 20.
    let form = screen.get_mut(1).unwrap();
    crate::widget::widget_cast_mut::<Form>(form)
        .unwrap()
        .set_scroll_origin(Point::new(0, -80));

    screen.run_cycle(&press_at(50, 30));
    let triggers = screen.run_cycle(&release_at(50, 30));
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 10);

    // Its old screen position no longer hits.
    screen.run_cycle(&press_at(50, 110));
    let triggers = screen.run_cycle(&release_at(50, 110));
    assert!(triggers.is_empty());
}

// =============================================================================
// Highlight transitions
// =============================================================================

#[test]
fn hover_fires_highlight_once_per_transition() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 800, 600),
            ..FormInit::default()
        })
        .unwrap();
    add_probe(&mut screen, widget_at(10, 1, 10, 10, 100, 20), &log);

    screen.run_cycle(&hover_at(50, 20));
    assert_eq!(log_of(&log), vec!["10:highlight"]);

    // Staying put adds nothing.
    screen.run_cycle(&hover_at(50, 20));
    screen.run_cycle(&hover_at(60, 20));
    assert_eq!(log_of(&log), vec!["10:highlight"]);

    // Leaving fires the matching loss exactly once.
    screen.run_cycle(&hover_at(500, 500));
    assert_eq!(log_of(&log), vec!["10:highlight", "10:highlight_lost"]);
}

#[test]
fn highlight_moves_between_siblings_with_loss_first() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 800, 600),
            ..FormInit::default()
        })
        .unwrap();
    add_probe(&mut screen, widget_at(10, 1, 10, 10, 100, 20), &log);
    add_probe(&mut screen, widget_at(11, 1, 10, 40, 100, 20), &log);

    screen.run_cycle(&hover_at(50, 20));
    screen.run_cycle(&hover_at(50, 50));
    assert_eq!(
        log_of(&log),
        vec!["10:highlight", "10:highlight_lost", "11:highlight"]
    );

    // Never two highlights in a row for the same widget without an
    // intervening loss.
    let events = log_of(&log);
    for pair in events.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn eventless_cycles_still_track_hover() {
    let mut screen = button_screen();
    assert_eq!(screen.mouse_over_id(), None);

    screen.run_cycle(&hover_at(50, 20));
    assert_eq!(screen.mouse_over_id(), Some(10));
    assert!(button_state_of(&screen, 10).contains(ButtonState::HIGHLIGHT));

    screen.run_cycle(&hover_at(700, 500));
    assert_eq!(screen.mouse_over_id(), Some(1));
    assert!(!button_state_of(&screen, 10).contains(ButtonState::HIGHLIGHT));
}

#[test]
fn hidden_widgets_are_skipped_by_hit_testing() {
    let mut screen = button_screen();
    screen.hide(10).unwrap();

    screen.run_cycle(&press_at(50, 20));
    let triggers = screen.run_cycle(&release_at(50, 20));
    assert!(triggers.is_empty());
    assert_eq!(screen.mouse_over_id(), Some(1));

    screen.show(10).unwrap();
    screen.run_cycle(&press_at(50, 20));
    let triggers = screen.run_cycle(&release_at(50, 20));
    assert_eq!(triggers.len(), 1);
}

// =============================================================================
// Clickable forms
// =============================================================================

fn clickable_screen(log: &Rc<RefCell<Vec<String>>>) -> Screen {
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 100, 100, 200, 100),
            style: FormStyle::CLICKABLE,
            ..FormInit::default()
        })
        .unwrap();
    add_probe(&mut screen, widget_at(10, 1, 10, 10, 180, 80), log);
    screen
}

#[test]
fn clickable_form_consumes_clicks_before_children() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut screen = clickable_screen(&log);

    // Press over the child: the form takes the click.
    screen.run_cycle(&press_at(150, 150));
    let triggers = screen.run_cycle(&release_at(150, 150));
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 1);

    let events = log_of(&log);
    assert!(!events.contains(&"10:clicked".to_owned()), "{events:?}");
    assert!(!events.contains(&"10:released".to_owned()), "{events:?}");
    // The child still saw the hover.
    assert!(events.contains(&"10:highlight".to_owned()), "{events:?}");
}

#[test]
fn depressed_clickable_form_shifts_child_paint() {
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 20, 20, 100, 40),
            style: FormStyle::CLICKABLE,
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_label(LabelInit {
            widget: widget_at(10, 1, 5, 5, 80, 10),
            text: "hold".into(),
            ..LabelInit::default()
        })
        .unwrap();

    let mut painter = RecordingPainter::default();
    screen.display(&mut painter);
    assert_eq!(painter.texts[0].1, Point::new(25, 25));

    // Held down: children shift by one pixel.
    screen.run_cycle(&press_at(70, 40));
    let mut painter = RecordingPainter::default();
    screen.display(&mut painter);
    assert_eq!(painter.texts[0].1, Point::new(26, 26));

    // NO_CLICK_MOVE suppresses the shift.
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 20, 20, 100, 40),
            style: FormStyle::CLICKABLE | FormStyle::NO_CLICK_MOVE,
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_label(LabelInit {
            widget: widget_at(10, 1, 5, 5, 80, 10),
            text: "hold".into(),
            ..LabelInit::default()
        })
        .unwrap();
    screen.run_cycle(&press_at(70, 40));
    let mut painter = RecordingPainter::default();
    screen.display(&mut painter);
    assert_eq!(painter.texts[0].1, Point::new(25, 25));
}

#[test]
fn clickable_form_state_is_caller_visible() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut screen = clickable_screen(&log);
    screen
        .set_button_state(1, FormState::LOCKED.bits())
        .unwrap();
    assert_eq!(screen.button_state(1).unwrap(), FormState::LOCKED.bits());

    // A locked clickable form refuses clicks.
    screen.run_cycle(&press_at(150, 150));
    let triggers = screen.run_cycle(&release_at(150, 150));
    assert!(triggers.is_empty());
}

// =============================================================================
// Input gating
// =============================================================================

#[test]
fn disabling_input_skips_clicks_but_not_hover() {
    let mut screen = button_screen();
    screen.set_input_enabled(false);

    screen.run_cycle(&press_at(50, 20));
    let triggers = screen.run_cycle(&release_at(50, 20));
    assert!(triggers.is_empty());
    assert!(!button_state_of(&screen, 10).contains(ButtonState::DOWN));
    // Hover still tracked.
    assert_eq!(screen.mouse_over_id(), Some(10));
    assert!(button_state_of(&screen, 10).contains(ButtonState::HIGHLIGHT));

    screen.set_input_enabled(true);
    screen.run_cycle(&press_at(50, 20));
    let triggers = screen.run_cycle(&release_at(50, 20));
    assert_eq!(triggers.len(), 1);
}

#[test]
fn last_released_key_reports_the_final_event() {
    let mut screen = button_screen();
    assert_eq!(screen.last_released_key(), None);
    screen.run_cycle(&press_at(50, 20));
    assert_eq!(
        screen.last_released_key(),
        Some(crate::widget::ClickKey::Primary)
    );
    screen.run_cycle(&hover_at(50, 20));
    assert_eq!(screen.last_released_key(), None);
}

// =============================================================================
// Focus and edit boxes
// =============================================================================

fn edit_screen() -> Screen {
    let mut screen = Screen::new(800, 600);
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 800, 600),
            ..FormInit::default()
        })
        .unwrap();
    screen
        .add_edit_box(EditBoxInit {
            widget: widget_at(20, 1, 10, 40, 120, 16),
            text: "abc".into(),
            ..EditBoxInit::default()
        })
        .unwrap();
    screen
}

#[test]
fn clicking_an_edit_box_grabs_focus() {
    let mut screen = edit_screen();
    assert_eq!(screen.focused_id(), None);
    screen.run_cycle(&press_at(50, 48));
    assert_eq!(screen.focused_id(), Some(20));
}

#[test]
fn return_commits_the_edit_and_triggers() {
    let mut screen = edit_screen();
    screen.run_cycle(&press_at(50, 48));
    screen.run_cycle(&release_at(50, 48));

    let input = FrameInput {
        position: Point::new(50, 48),
        keys: vec![KeyPress::Char('d'), KeyPress::Return],
        ..FrameInput::default()
    };
    let triggers = screen.run_cycle(&input);
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 20);
    assert_eq!(screen.focused_id(), None);
    assert_eq!(screen.string(20).unwrap(), "abcd");
}

#[test]
fn clicking_elsewhere_commits_the_edit() {
    let mut screen = edit_screen();
    screen.run_cycle(&press_at(50, 48));
    screen.run_cycle(&release_at(50, 48));
    assert_eq!(screen.focused_id(), Some(20));

    let triggers = screen.run_cycle(&press_at(600, 300));
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 20);
    assert_eq!(screen.focused_id(), None);
}

#[test]
fn set_string_on_the_focused_edit_box_clears_focus_first() {
    let mut screen = edit_screen();
    screen.run_cycle(&press_at(50, 48));
    assert_eq!(screen.focused_id(), Some(20));

    screen.set_string(20, "fresh").unwrap();
    assert_eq!(screen.focused_id(), None);
    assert_eq!(screen.string(20).unwrap(), "fresh");
}

#[test]
fn deleting_the_focused_widget_clears_focus() {
    let mut screen = edit_screen();
    screen.run_cycle(&press_at(50, 48));
    assert_eq!(screen.focused_id(), Some(20));

    screen.remove(20).unwrap();
    assert_eq!(screen.focused_id(), None);
    assert!(screen.get(20).is_none());
}

#[test]
fn focus_moves_between_widgets_with_loss_first() {
    let mut screen = edit_screen();
    screen
        .add_edit_box(EditBoxInit {
            widget: widget_at(21, 1, 10, 80, 120, 16),
            ..EditBoxInit::default()
        })
        .unwrap();

    screen.run_cycle(&press_at(50, 48));
    assert_eq!(screen.focused_id(), Some(20));

    // Clicking the second box commits the first (one trigger) and moves
    // focus.
    let triggers = screen.run_cycle(&press_at(50, 88));
    assert_eq!(triggers.len(), 1);
    assert_eq!(triggers[0].id, 20);
    assert_eq!(screen.focused_id(), Some(21));
}

// =============================================================================
// Tree management
// =============================================================================

#[test]
fn duplicate_ids_are_rejected() {
    let mut screen = button_screen();
    let result = screen.add_button(ButtonInit {
        widget: widget_at(10, 1, 10, 40, 100, 20),
        ..ButtonInit::default()
    });
    assert_eq!(result.unwrap_err(), WidgetError::DuplicateId(10));
    // Id 0 belongs to the root form.
    let result = screen.add_label(LabelInit {
        widget: widget_at(0, 1, 0, 0, 10, 10),
        ..LabelInit::default()
    });
    assert_eq!(result.unwrap_err(), WidgetError::DuplicateId(0));
}

#[test]
fn widgets_must_be_parented_to_forms() {
    let mut screen = button_screen();
    let result = screen.add_label(LabelInit {
        widget: widget_at(30, 10, 0, 0, 10, 10),
        ..LabelInit::default()
    });
    assert_eq!(result.unwrap_err(), WidgetError::NotAForm(10));
}

#[test]
fn removing_a_form_removes_its_subtree() {
    let mut screen = button_screen();
    screen.remove(1).unwrap();
    assert!(screen.get(1).is_none());
    assert!(screen.get(10).is_none());
    // The ids are free again.
    screen
        .add_form(FormInit {
            widget: widget_at(1, 0, 0, 0, 100, 100),
            ..FormInit::default()
        })
        .unwrap();
}

#[test]
fn the_root_form_cannot_be_removed() {
    let mut screen = button_screen();
    assert_eq!(screen.remove(0).unwrap_err(), WidgetError::RemoveRoot);
}

#[test]
fn removing_the_hovered_child_drops_the_forms_highlight_reference() {
    let mut screen = button_screen();
    screen.run_cycle(&hover_at(50, 20));

    let button_node = screen.node_id(10).unwrap();
    let form = widget_cast::<Form>(screen.get(1).unwrap()).unwrap();
    assert_eq!(form.last_highlighted(), Some(button_node));

    screen.remove(10).unwrap();
    let form = widget_cast::<Form>(screen.get(1).unwrap()).unwrap();
    assert_eq!(form.last_highlighted(), None);
    assert_eq!(screen.mouse_over_id(), None);
}

#[test]
fn lookup_misses_are_explicit() {
    let mut screen = button_screen();
    assert!(screen.get(99).is_none());
    assert_eq!(screen.string(99).unwrap_err(), WidgetError::IdNotFound(99));
    assert_eq!(
        screen.hide(99).unwrap_err(),
        WidgetError::IdNotFound(99)
    );
}

#[test]
fn capability_operations_report_unsupported_variants() {
    let mut screen = Screen::new(800, 600);
    screen
        .add_label(LabelInit {
            widget: widget_at(30, 0, 0, 0, 100, 10),
            text: "plain".into(),
            ..LabelInit::default()
        })
        .unwrap();

    assert!(matches!(
        screen.button_state(30),
        Err(WidgetError::Unsupported { op: "state", .. })
    ));
    assert!(matches!(
        screen.slider_pos(30),
        Err(WidgetError::Unsupported { .. })
    ));
    // The supported subset works.
    assert_eq!(screen.string(30).unwrap(), "plain");
}

#[test]
fn user_data_round_trips() {
    let mut screen = button_screen();
    screen.set_user_word(10, 77).unwrap();
    assert_eq!(screen.user_word(10).unwrap(), 77);

    screen
        .set_user_data(10, Some(Box::new("payload".to_owned())))
        .unwrap();
    let data = screen.user_data(10).unwrap().unwrap();
    assert_eq!(data.downcast_ref::<String>().unwrap(), "payload");
}

// =============================================================================
// Bars and sliders
// =============================================================================

#[test]
fn bar_and_slider_helpers_address_their_variants() {
    let mut screen = Screen::new(800, 600);
    screen
        .add_bar_graph(BarGraphInit {
            widget: widget_at(40, 0, 10, 10, 200, 16),
            range: 100,
            ..BarGraphInit::default()
        })
        .unwrap();
    screen
        .add_slider(SliderInit {
            widget: widget_at(41, 0, 10, 40, 100, 8),
            stops: 10,
            ..SliderInit::default()
        })
        .unwrap();

    screen.set_bar_value(40, 60).unwrap();
    screen.set_bar_range(40, 50).unwrap();
    screen.set_slider_pos(41, 4).unwrap();
    assert_eq!(screen.slider_pos(41).unwrap(), 4);

    assert!(matches!(
        screen.set_bar_value(41, 1),
        Err(WidgetError::Unsupported { .. })
    ));
}

#[test]
fn dragging_a_slider_follows_the_pointer() {
    let mut screen = Screen::new(800, 600);
    screen
        .add_slider(SliderInit {
            widget: widget_at(41, 0, 100, 100, 100, 8),
            stops: 10,
            ..SliderInit::default()
        })
        .unwrap();

    screen.run_cycle(&press_at(100, 104));
    assert_eq!(screen.slider_pos(41).unwrap(), 0);

    // Still held: the thumb follows the pointer on later frames.
    screen.run_cycle(&hover_at(150, 104));
    assert_eq!(screen.slider_pos(41).unwrap(), 5);

    screen.run_cycle(&release_at(150, 104));
    screen.run_cycle(&hover_at(200, 104));
    assert_eq!(screen.slider_pos(41).unwrap(), 5);
}

// =============================================================================
// Services
// =============================================================================

#[test]
fn audio_hooks_fire_on_highlight_and_click() {
    let sounds = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&sounds);
    let mut screen = button_screen();
    screen.set_audio(move |id| sink.borrow_mut().push(id), Some(7), Some(8));

    screen.run_cycle(&hover_at(50, 20));
    assert_eq!(*sounds.borrow(), vec![7]);

    screen.run_cycle(&press_at(50, 20));
    assert_eq!(*sounds.borrow(), vec![7, 8]);
}

#[test]
fn tooltips_start_and_stop_with_hover() {
    let tips = RecordingTips::default();
    let events = Rc::clone(&tips.events);
    let mut screen = Screen::new(800, 600);
    screen.set_tip_handler(tips);
    screen
        .add_button(ButtonInit {
            widget: widget_at(10, 0, 10, 10, 100, 20),
            tip: "launches the thing".into(),
            ..ButtonInit::default()
        })
        .unwrap();

    screen.run_cycle(&hover_at(50, 20));
    screen.run_cycle(&hover_at(500, 500));
    assert_eq!(
        *events.borrow(),
        vec![("start".to_owned(), 10), ("stop".to_owned(), 10)]
    );
}

#[test]
fn callbacks_run_for_hidden_widgets_too() {
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let mut screen = Screen::new(800, 600);
    screen
        .add_label(LabelInit {
            widget: WidgetInit {
                callback: Some(Box::new(move |_, _| *sink.borrow_mut() += 1)),
                ..widget_at(30, 0, 0, 0, 50, 10)
            },
            ..LabelInit::default()
        })
        .unwrap();
    screen.hide(30).unwrap();

    screen.run_cycle(&hover_at(400, 300));
    assert_eq!(*count.borrow(), 1);
    screen.run_cycle(&hover_at(400, 300));
    assert_eq!(*count.borrow(), 2);
}

#[test]
fn custom_display_overrides_the_default_painter() {
    let mut screen = Screen::new(800, 600);
    screen
        .add_label(LabelInit {
            widget: WidgetInit {
                display: Some(Box::new(|widget, ctx| {
                    let pos = ctx.offset + widget.base().position();
                    ctx.painter().draw_text(
                        FontId::REGULAR,
                        "override",
                        pos,
                        Colour::WHITE,
                    );
                })),
                ..widget_at(30, 0, 40, 40, 50, 10)
            },
            text: "default".into(),
            ..LabelInit::default()
        })
        .unwrap();

    let mut painter = RecordingPainter::default();
    screen.display(&mut painter);
    assert_eq!(painter.texts.len(), 1);
    assert_eq!(painter.texts[0].0, "override");
    assert_eq!(painter.texts[0].1, Point::new(40, 40));
}

#[test]
fn debug_tree_lists_the_hierarchy() {
    let screen = button_screen();
    let dump = screen.debug_tree();
    assert!(dump.contains("Form id=0"));
    assert!(dump.contains("Form id=1"));
    assert!(dump.contains("Button id=10"));
}
