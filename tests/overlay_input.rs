use egui::{Event, Modifiers, PointerButton, Rect, TouchDeviceId, TouchId, TouchPhase, pos2, vec2};
use slide_ink::host::{DesktopHost, MessageChannel, OverlaySession};
use slide_ink::input::{InputHandler, MouseKind, TouchKind};
use slide_ink::{OverlayApp, OverlayConfig, RawInputEvent, Tool};

/// Canvas below a 40pt toolbar
fn canvas_rect() -> Rect {
    Rect::from_min_size(pos2(0.0, 40.0), vec2(100.0, 100.0))
}

fn app() -> OverlayApp {
    let session = OverlaySession::attach(vec![Box::new(DesktopHost)]);
    let mut app = OverlayApp::with_session(&OverlayConfig::default(), session, MessageChannel::new());
    app.resize_surface(canvas_rect());
    app
}

fn mouse(kind: MouseKind, x: f32, y: f32) -> RawInputEvent {
    RawInputEvent::Mouse {
        kind,
        client: pos2(x, y),
    }
}

fn touch(id: u64, phase: TouchPhase, x: f32, y: f32) -> Event {
    Event::Touch {
        device_id: TouchDeviceId(0),
        id: TouchId(id),
        phase,
        pos: pos2(x, y),
        force: None,
    }
}

fn alpha(app: &OverlayApp, x: u32, y: u32) -> u8 {
    app.engine().surface().pixel(x, y).0[3]
}

#[test]
fn test_mouse_stroke_is_surface_local() {
    let mut app = app();
    app.handle_raw_input(
        &[
            mouse(MouseKind::Down, 10.0, 90.0),
            mouse(MouseKind::Move, 90.0, 90.0),
            mouse(MouseKind::Up, 90.0, 90.0),
        ],
        canvas_rect(),
        true,
    );

    // Screen y 90 is surface y 50
    assert_eq!(alpha(&app, 50, 50), 255);
    assert_eq!(alpha(&app, 50, 90), 0);
    assert!(!app.engine().is_drawing());
}

#[test]
fn test_press_outside_surface_is_ignored() {
    let mut app = app();
    app.handle_raw_input(
        &[mouse(MouseKind::Down, 50.0, 20.0), mouse(MouseKind::Move, 50.0, 90.0)],
        canvas_rect(),
        true,
    );
    assert!(!app.engine().is_drawing());
    assert!(app.engine().surface().is_blank());
}

#[test]
fn test_press_not_allowed_while_over_toolbar() {
    let mut app = app();
    app.handle_raw_input(&[mouse(MouseKind::Down, 50.0, 90.0)], canvas_rect(), false);
    assert!(!app.engine().is_drawing());
}

#[test]
fn test_leaving_surface_ends_gesture() {
    let mut app = app();
    app.handle_raw_input(
        &[
            mouse(MouseKind::Down, 10.0, 90.0),
            mouse(MouseKind::Move, 50.0, 90.0),
            mouse(MouseKind::Move, 50.0, 10.0),
        ],
        canvas_rect(),
        true,
    );
    assert!(!app.engine().is_drawing());

    // Moving back in does not resume the stroke
    app.handle_raw_input(&[mouse(MouseKind::Move, 90.0, 120.0)], canvas_rect(), true);
    assert_eq!(alpha(&app, 80, 80), 0);
}

#[test]
fn test_toolbar_change_mid_gesture_applies_to_next_gesture() {
    let mut app = app();
    app.handle_raw_input(&[mouse(MouseKind::Down, 10.0, 90.0)], canvas_rect(), true);
    app.toolbar_mut().select_tool(Tool::Eraser);
    app.handle_raw_input(
        &[mouse(MouseKind::Move, 90.0, 90.0), mouse(MouseKind::Up, 90.0, 90.0)],
        canvas_rect(),
        true,
    );
    assert_eq!(alpha(&app, 50, 50), 255);

    app.handle_raw_input(
        &[
            mouse(MouseKind::Down, 50.0, 70.0),
            mouse(MouseKind::Move, 50.0, 110.0),
            mouse(MouseKind::Up, 50.0, 110.0),
        ],
        canvas_rect(),
        true,
    );
    assert_eq!(alpha(&app, 50, 50), 0);
}

#[test]
fn test_touch_stroke_through_handler() {
    let mut app = app();
    let mut handler = InputHandler::new();

    let events = handler.translate(&[
        touch(7, TouchPhase::Start, 10.0, 90.0),
        // egui's synthesized pointer press for the same finger
        Event::PointerButton {
            pos: pos2(10.0, 90.0),
            button: PointerButton::Primary,
            pressed: true,
            modifiers: Modifiers::NONE,
        },
        touch(7, TouchPhase::Move, 90.0, 90.0),
        touch(8, TouchPhase::Start, 50.0, 50.0),
        touch(7, TouchPhase::End, 90.0, 90.0),
    ]);
    assert_eq!(events.len(), 3);
    assert!(matches!(&events[2], RawInputEvent::Touch { kind: TouchKind::End, .. }));

    app.handle_raw_input(&events, canvas_rect(), true);
    assert_eq!(alpha(&app, 50, 50), 255);
    assert!(!app.engine().is_drawing());
}

#[test]
fn test_pointer_gone_becomes_leave() {
    let mut handler = InputHandler::new();
    let events = handler.translate(&[Event::PointerMoved(pos2(30.0, 60.0)), Event::PointerGone]);
    assert_eq!(
        events,
        vec![mouse(MouseKind::Move, 30.0, 60.0), mouse(MouseKind::Leave, 30.0, 60.0)]
    );
}
