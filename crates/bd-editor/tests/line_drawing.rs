//! Integration tests: line drawing state machine (bd-editor).

use bd_core::model::*;
use bd_editor::events::Handler;
use bd_editor::tools::{DrawState, ToolKind};
use bd_editor::{BlockProps, Cursor, Session};
use pretty_assertions::assert_eq;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn draw(session: &mut Session, points: &[(f32, f32)]) {
    session.begin_line();
    let (first, rest) = points.split_first().expect("at least one point");
    session.handle_pointer_down(first.0, first.1);
    for (x, y) in rest {
        session.handle_pointer_move(*x, *y);
    }
    let last = rest.last().unwrap_or(first);
    session.handle_pointer_up(last.0, last.1);
}

#[test]
fn draw_sequence_ends_idle_with_one_line() {
    init_logger();
    let mut session = Session::default();
    draw(&mut session, &[(10.0, 20.0), (30.0, 40.0), (50.0, 60.0)]);

    assert!(!session.is_drawing_line());
    assert_eq!(session.active_tool(), ToolKind::Select);
    assert_eq!(session.cursor(), Cursor::Default);

    let lines = session.scene().ids_of(ObjectTag::Line);
    assert_eq!(lines.len(), 1);
    let line = session.scene().get(lines[0]).unwrap();
    let geom = line.line().unwrap();
    assert_eq!((geom.x1, geom.y1, geom.x2, geom.y2), (10.0, 20.0, 50.0, 60.0));
    assert!(line.selectable);
    assert!(line.evented);
    assert!(
        session
            .subscriptions()
            .is_subscribed(line.id, Handler::DashOnSelect)
    );
}

#[test]
fn begin_line_clears_selection_and_sets_crosshair() {
    init_logger();
    let mut session = Session::default();
    let props = BlockProps::defaults(session.config());
    let block = session.add_block(&props);
    assert_eq!(session.selected_ids(), &[block]);

    session.begin_line();
    assert!(session.is_drawing_line());
    assert!(session.selected_ids().is_empty());
    assert_eq!(session.cursor().as_css(), "crosshair");
}

#[test]
fn partial_line_is_inert_and_follows_pointer() {
    init_logger();
    let mut session = Session::default();
    session.begin_line();
    session.handle_pointer_down(5.0, 5.0);
    assert!(session.handle_pointer_move(80.0, 90.0));

    let id = session.scene().ids_of(ObjectTag::Line)[0];
    let line = session.scene().get(id).unwrap();
    assert!(!line.selectable);
    assert!(!line.evented);
    assert_eq!((line.line().unwrap().x2, line.line().unwrap().y2), (80.0, 90.0));
}

#[test]
fn drawing_over_a_block_does_not_drag_it() {
    init_logger();
    let mut session = Session::default();
    let props = BlockProps::defaults(session.config());
    let block = session.add_block(&props);

    draw(&mut session, &[(150.0, 130.0), (400.0, 300.0)]);

    assert_eq!(session.scene().get(block).unwrap().left, 100.0);
    assert_eq!(session.scene().ids_of(ObjectTag::Line).len(), 1);
}

#[test]
fn zero_length_line_is_accepted() {
    init_logger();
    let mut session = Session::default();
    draw(&mut session, &[(42.0, 42.0)]);

    let id = session.scene().ids_of(ObjectTag::Line)[0];
    assert_eq!(session.scene().get(id).unwrap().line().unwrap().length(), 0.0);
}

#[test]
fn selected_line_is_dashed_until_deselected() {
    init_logger();
    let mut session = Session::default();
    draw(&mut session, &[(300.0, 300.0), (400.0, 300.0)]);
    let id = session.scene().ids_of(ObjectTag::Line)[0];

    assert!(session.handle_pointer_down(350.0, 301.0));
    session.handle_pointer_up(350.0, 301.0);
    assert_eq!(session.selected_ids(), &[id]);
    assert!(session.scene().get(id).unwrap().line().unwrap().dashed);

    session.handle_pointer_down(700.0, 50.0);
    assert!(session.selected_ids().is_empty());
    assert!(!session.scene().get(id).unwrap().line().unwrap().dashed);
}

#[test]
fn dragging_a_line_moves_both_ends() {
    init_logger();
    let mut session = Session::default();
    draw(&mut session, &[(300.0, 300.0), (400.0, 300.0)]);
    let id = session.scene().ids_of(ObjectTag::Line)[0];

    session.handle_pointer_down(350.0, 300.0);
    session.handle_pointer_move(360.0, 320.0);
    session.handle_pointer_up(360.0, 320.0);

    let geom = *session.scene().get(id).unwrap().line().unwrap();
    assert_eq!((geom.x1, geom.y1, geom.x2, geom.y2), (310.0, 320.0, 410.0, 320.0));
}

#[test]
fn escape_aborts_line_in_progress() {
    init_logger();
    let mut session = Session::default();
    session.begin_line();
    session.handle_pointer_down(10.0, 10.0);
    session.handle_pointer_move(20.0, 20.0);

    assert_eq!(session.handle_key("Escape", false, false, false, false), Ok(true));
    assert!(!session.is_drawing_line());
    assert!(session.scene().ids_of(ObjectTag::Line).is_empty());
    assert_eq!(session.cursor(), Cursor::Default);

    // The release that follows is an ordinary idle release.
    session.handle_pointer_up(20.0, 20.0);
    assert!(session.scene().is_empty());
}

#[test]
fn release_before_press_returns_to_idle() {
    init_logger();
    let mut session = Session::default();
    session.begin_line();
    assert!(!session.handle_pointer_move(50.0, 50.0));
    session.handle_pointer_up(50.0, 50.0);

    assert!(!session.is_drawing_line());
    assert!(session.scene().is_empty());
}

#[test]
fn deleting_a_line_drops_its_subscription() {
    init_logger();
    let mut session = Session::default();
    draw(&mut session, &[(0.0, 100.0), (200.0, 100.0)]);
    let id = session.scene().ids_of(ObjectTag::Line)[0];

    session.handle_pointer_down(100.0, 100.0);
    assert_eq!(session.delete_selected(), vec![id]);
    assert!(!session.subscriptions().is_subscribed(id, Handler::DashOnSelect));
}

#[test]
fn line_tool_state_is_observable() {
    let mut tool = bd_editor::tools::LineTool::new(Stroke::default());
    assert_eq!(tool.state(), DrawState::Idle);
    tool.arm();
    assert_eq!(tool.state(), DrawState::Drawing { line: None });
}
