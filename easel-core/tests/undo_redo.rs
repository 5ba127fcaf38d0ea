//! Undo/Redo Integration Tests
//!
//! Tests the history laws end to end:
//! - Background and border edits undo and redo exactly
//! - Empty history is a no-op
//! - Round-trip over arbitrary command sequences
//! - Snapshot isolation and redo invalidation

use easel_core::{
    Border, BorderPaint, Canvas, Color, Dispatcher, EditCommand, EditError, EditSession,
    EditorConfig, Fill, Gradient, History, HistoryOutcome, Opacity, ScaleMode, TextElement,
    TextStyle, Transform,
};
use proptest::prelude::*;

fn white_canvas() -> Canvas {
    Canvas::new(1080, 1080, Color::WHITE).expect("valid canvas")
}

fn session() -> EditSession {
    EditSession::new(EditorConfig::default()).expect("valid config")
}

/// Apply every command, returning how many changed the canvas.
fn run(dispatcher: &mut Dispatcher, canvas: &mut Canvas, commands: &[EditCommand]) -> usize {
    commands
        .iter()
        .filter_map(|command| dispatcher.dispatch(canvas, command).ok())
        .filter(|applied| applied.recorded)
        .count()
}

fn command_strategy() -> impl Strategy<Value = EditCommand> {
    prop_oneof![
        any::<u32>().prop_map(|rgba| EditCommand::set_background_color(Color::from_packed(rgba))),
        (0u8..=100).prop_map(|percent| EditCommand::SetBackgroundOpacity {
            opacity: Opacity::new(percent).expect("in range"),
        }),
        (0.0f32..=25.0).prop_map(|radius| EditCommand::SetBackgroundBlur { radius }),
        (10u32..=300).prop_map(|percent| EditCommand::SetBackgroundScale {
            percent,
            mode: ScaleMode::Fit,
        }),
        (0.0f32..=50.0).prop_map(|size| EditCommand::SetBorder {
            border: Border::solid(Color::BLACK, size, 100).expect("valid border"),
        }),
        (1u32..=4000, 1u32..=4000)
            .prop_map(|(width, height)| EditCommand::ResizeCanvas { width, height }),
        (-500.0f32..2000.0, -500.0f32..2000.0).prop_map(|(x, y)| EditCommand::AddElement {
            element: TextElement::new("p", TextStyle::default(), Transform::at(x, y, 100.0, 40.0))
                .into(),
        }),
        // Out-of-range values, rejected without touching history.
        (26.0f32..100.0).prop_map(|radius| EditCommand::SetBackgroundBlur { radius }),
    ]
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_background_color_undo_redo() {
    let mut session = session();
    let red = Color::parse_hex("#FF0000").expect("hex");
    assert!(session.apply(&EditCommand::set_background_color(red)).is_applied());
    assert_eq!(session.canvas().background().fill, Fill::Color(red));

    assert!(matches!(session.undo(), HistoryOutcome::Restored(_)));
    assert_eq!(session.canvas().background().fill, Fill::Color(Color::WHITE));

    assert!(matches!(session.redo(), HistoryOutcome::Restored(_)));
    assert_eq!(session.canvas().background().fill, Fill::Color(red));
}

#[test]
fn test_border_edits_undo_to_initial() {
    let mut session = session();
    let initial = session.canvas().background().border.clone();
    assert_eq!(initial.paint(), &BorderPaint::Off);

    let solid = Border::solid(Color::BLACK, 5.0, 100).expect("valid border");
    let gradient = Border::gradient(Gradient::linear(Color::RED, Color::BLUE), 5.0, 100)
        .expect("valid border");
    assert!(session.apply(&EditCommand::SetBorder { border: solid }).is_applied());
    assert!(session
        .apply(&EditCommand::SetBorder { border: gradient })
        .is_applied());

    session.undo();
    session.undo();
    assert_eq!(session.canvas().background().border, initial);
    assert!(!session.canvas().background().border.is_on());
}

#[test]
fn test_undo_on_fresh_session_is_noop() {
    let mut session = session();
    let before = session.canvas().clone();
    assert!(matches!(session.undo(), HistoryOutcome::NothingToUndo));
    assert_eq!(session.canvas(), &before);
}

#[test]
fn test_rejected_command_keeps_history() {
    let mut session = session();
    session.apply(&EditCommand::set_background_color(Color::RED));
    let undo_len = session.history().undo_len();
    assert!(session
        .apply(&EditCommand::SetBackgroundBlur { radius: 99.0 })
        .is_rejected());
    assert_eq!(session.history().undo_len(), undo_len);
}

#[test]
fn test_history_limit_drops_oldest() {
    let config = EditorConfig {
        history_limit: Some(2),
        ..EditorConfig::default()
    };
    let mut session = EditSession::new(config).expect("valid config");
    for color in [Color::RED, Color::GREEN, Color::BLUE] {
        session.apply(&EditCommand::set_background_color(color));
    }
    assert!(matches!(session.undo(), HistoryOutcome::Restored(_)));
    assert!(matches!(session.undo(), HistoryOutcome::Restored(_)));
    assert!(matches!(session.undo(), HistoryOutcome::NothingToUndo));
    assert_eq!(session.canvas().background().fill, Fill::Color(Color::RED));
}

// ============================================================================
// Validation Tests
// ============================================================================

#[test]
fn test_border_opacity_validation() {
    assert!(matches!(
        Border::solid(Color::BLACK, 5.0, 150),
        Err(EditError::InvalidProperty { .. })
    ));
    assert!(Border::solid(Color::BLACK, 5.0, 100).is_ok());
}

// ============================================================================
// History Laws
// ============================================================================

proptest! {
    #[test]
    fn prop_undo_all_then_redo_all_round_trips(
        commands in prop::collection::vec(command_strategy(), 0..24)
    ) {
        let initial = white_canvas();
        let mut canvas = initial.clone();
        let mut dispatcher = Dispatcher::default();
        let recorded = run(&mut dispatcher, &mut canvas, &commands);
        let last = canvas.clone();

        for _ in 0..recorded {
            prop_assert!(dispatcher.undo(&mut canvas).expect("no gesture").is_some());
        }
        prop_assert_eq!(&canvas, &initial);
        prop_assert!(dispatcher.undo(&mut canvas).expect("no gesture").is_none());

        for _ in 0..recorded {
            prop_assert!(dispatcher.redo(&mut canvas).expect("no gesture").is_some());
        }
        prop_assert_eq!(&canvas, &last);
    }

    #[test]
    fn prop_recorded_snapshot_is_isolated(
        commands in prop::collection::vec(command_strategy(), 1..12)
    ) {
        let original = white_canvas();
        let mut history = History::new();
        let mut canvas = original.clone();
        history.record(canvas.clone());

        let mut scratch = Dispatcher::default();
        run(&mut scratch, &mut canvas, &commands);

        let restored = history.undo(&canvas).expect("one snapshot");
        prop_assert_eq!(restored, original);
    }

    #[test]
    fn prop_new_edit_clears_redo(
        commands in prop::collection::vec(command_strategy(), 1..12),
        percent in 0u8..=100,
    ) {
        let mut canvas = white_canvas();
        let mut dispatcher = Dispatcher::default();
        let recorded = run(&mut dispatcher, &mut canvas, &commands);
        for _ in 0..recorded {
            dispatcher.undo(&mut canvas).expect("no gesture");
        }

        let edit = EditCommand::SetBackgroundOpacity {
            opacity: Opacity::new(percent).expect("in range"),
        };
        let applied = dispatcher.dispatch(&mut canvas, &edit).expect("valid edit");
        if applied.recorded {
            prop_assert!(!dispatcher.history().can_redo());
            prop_assert!(dispatcher.redo(&mut canvas).expect("no gesture").is_none());
        }
    }
}
