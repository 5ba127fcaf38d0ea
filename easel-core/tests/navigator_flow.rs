//! Option Panel Integration Tests
//!
//! Tests the panel flow from chip selection to applied edits:
//! - Background, text and image panels drive their properties
//! - Out-of-range slider values are rejected without side effects
//! - Panels follow undo and close when their element disappears

use easel_core::navigator::{ControlSettings, FlipAxis, StyleFlag};
use easel_core::{
    AnchorEdge, BorderPaint, Color, ControlInput, ControlValue, Crop, CropShape, Direction,
    EditError, EditSession, EditorConfig, ElementKind, Mode, ModeNavigator, Opacity, Outcome,
    Target,
};

fn session() -> EditSession {
    EditSession::new(EditorConfig::default()).expect("session")
}

fn selected_target(session: &EditSession) -> Target {
    Target::Element(session.selection().expect("selected"))
}

fn slider_value(session: &EditSession) -> f32 {
    match session.panel().map(ModeNavigator::value) {
        Some(ControlValue::Slider { value, .. }) => *value,
        other => panic!("expected slider, got {other:?}"),
    }
}

fn expect_rejection(outcome: Outcome) -> EditError {
    match outcome {
        Outcome::Rejected(rejection) => rejection.error,
        other => panic!("expected rejection, got {other:?}"),
    }
}

// ============================================================================
// Background Panel Tests
// ============================================================================

#[test]
fn test_background_border_flow() {
    let mut session = session();
    session
        .open_panel(ElementKind::Background, Target::Background)
        .expect("open");

    session.select_mode(&[Mode::Border]).expect("border");
    let panel = session.panel().expect("open panel");
    assert_eq!(panel.active_mode(), Some(Mode::Off));
    assert_eq!(panel.value(), &ControlValue::Toggle(false));

    session
        .select_mode(&[Mode::Border, Mode::Solid])
        .expect("solid");
    assert!(session.interact(ControlInput::Color(Color::BLACK)).is_applied());

    session.select_mode(&[Mode::Border, Mode::Size]).expect("size");
    assert!(session.interact(ControlInput::Value(12.0)).is_applied());
    assert!((slider_value(&session) - 12.0).abs() < f32::EPSILON);

    let before = session.canvas().clone();
    let error = expect_rejection(session.interact(ControlInput::Value(80.0)));
    assert!(matches!(error, EditError::InvalidProperty { .. }));
    assert_eq!(session.canvas(), &before);

    let border = &session.canvas().background().border;
    assert_eq!(border.paint(), &BorderPaint::Solid(Color::BLACK));
    assert!((border.size() - 12.0).abs() < f32::EPSILON);

    session.select_mode(&[Mode::Border, Mode::Off]).expect("off");
    assert!(session.interact(ControlInput::Activate).is_applied());
    assert!(!session.canvas().background().border.is_on());
}

#[test]
fn test_background_layer_sliders() {
    let mut session = session();
    session
        .open_panel(ElementKind::Background, Target::Background)
        .expect("open");

    session.select_mode(&[Mode::Opacity]).expect("opacity");
    assert!(session.interact(ControlInput::Value(40.0)).is_applied());
    assert_eq!(
        session.canvas().background().opacity,
        Opacity::new(40).expect("in range")
    );

    session.select_mode(&[Mode::Scale]).expect("scale");
    assert_eq!(
        session.panel().and_then(ModeNavigator::active_mode),
        Some(Mode::Amount)
    );
    assert!(session.interact(ControlInput::Value(150.0)).is_applied());
    assert_eq!(session.canvas().background().scale_percent, 150);

    session.select_mode(&[Mode::Blur]).expect("blur");
    assert!(session.interact(ControlInput::Value(30.0)).is_rejected());
    assert!(session.interact(ControlInput::Value(25.0)).is_applied());

    session.select_mode(&[Mode::Blend]).expect("blend");
    assert!(session.interact(ControlInput::Color(Color::CYAN)).is_applied());
    assert_eq!(session.canvas().background().blend, Some(Color::CYAN));
    assert!(session.interact(ControlInput::Clear).is_applied());
    assert_eq!(session.canvas().background().blend, None);
}

#[test]
fn test_wrong_input_kind_is_unsupported() {
    let mut session = session();
    session
        .open_panel(ElementKind::Background, Target::Background)
        .expect("open");
    let error = expect_rejection(session.interact(ControlInput::Value(3.0)));
    assert!(matches!(error, EditError::UnsupportedInput { .. }));
    assert_eq!(session.history().undo_len(), 0);
}

// ============================================================================
// Text Panel Tests
// ============================================================================

#[test]
fn test_text_edit_and_style_flow() {
    let mut session = session();
    session.add_text("Hello");
    let target = selected_target(&session);
    session.open_panel(ElementKind::Text, target).expect("open");

    assert!(session
        .interact(ControlInput::Text("World".to_string()))
        .is_applied());
    assert!(session
        .interact(ControlInput::Direction(Direction::Right))
        .is_applied());

    session.select_mode(&[Mode::Size]).expect("size");
    assert!(session.interact(ControlInput::Value(48.0)).is_applied());
    assert!(session.interact(ControlInput::Value(4.0)).is_rejected());

    session.select_mode(&[Mode::Style, Mode::Bold]).expect("bold");
    assert!(session.interact(ControlInput::Activate).is_applied());

    let Target::Element(id) = target else {
        panic!("element target");
    };
    let text = session
        .canvas()
        .element(id)
        .and_then(|e| e.as_text())
        .expect("text element");
    assert_eq!(text.content, "World");
    assert!((text.transform.x - 60.0).abs() < f32::EPSILON);
    assert!((text.style.size - 48.0).abs() < f32::EPSILON);
    assert!(text.style.bold);
}

#[test]
fn test_text_position_and_shadow() {
    let mut session = session();
    session.add_text("Caption");
    let target = selected_target(&session);
    session.open_panel(ElementKind::Text, target).expect("open");

    session.select_mode(&[Mode::Position]).expect("position");
    assert!(session
        .interact(ControlInput::Anchor(AnchorEdge::VerticalBottom))
        .is_applied());

    session.select_mode(&[Mode::Shadow, Mode::Blur]).expect("blur");
    assert!(session.interact(ControlInput::Value(10.0)).is_applied());

    let Target::Element(id) = target else {
        panic!("element target");
    };
    let element = session.canvas().element(id).expect("present");
    assert!((element.transform().y - 1040.0).abs() < f32::EPSILON);
    let spec = element.shadow().spec().expect("shadow on");
    assert!((spec.blur_radius() - 10.0).abs() < f32::EPSILON);
}

#[test]
fn test_custom_nudge_step() {
    let mut session = session();
    session.add_text("Nudge");
    let target = selected_target(&session);
    let settings = ControlSettings { nudge_step: 25.0 };
    let navigator = ModeNavigator::open_with(ElementKind::Text, target, session.canvas(), settings)
        .expect("open");
    let command = navigator
        .interact(session.canvas(), ControlInput::Direction(Direction::Down))
        .expect("command");
    assert!(session.apply(&command).is_applied());
    let Target::Element(id) = target else {
        panic!("element target");
    };
    let y = session.canvas().element(id).expect("present").transform().y;
    assert!((y - 75.0).abs() < f32::EPSILON);
}

// ============================================================================
// Image Panel Tests
// ============================================================================

#[test]
fn test_image_flow() {
    let mut session = session();
    session.add_image("file://photo.jpg");
    let target = selected_target(&session);
    session.open_panel(ElementKind::Image, target).expect("open");

    assert!(session
        .interact(ControlInput::Source("file://erased.png".to_string()))
        .is_applied());

    session.select_mode(&[Mode::Size]).expect("size");
    assert!(session.interact(ControlInput::Value(600.0)).is_applied());

    session.select_mode(&[Mode::Crop, Mode::Shape]).expect("shape");
    assert!(session
        .interact(ControlInput::Shape(CropShape::Circle))
        .is_applied());

    session
        .select_mode(&[Mode::Rotation, Mode::Flip])
        .expect("flip");
    assert!(session
        .interact(ControlInput::Flip(FlipAxis::Horizontal))
        .is_applied());

    let Target::Element(id) = target else {
        panic!("element target");
    };
    let image = session
        .canvas()
        .element(id)
        .and_then(|e| e.as_image())
        .expect("image element");
    assert_eq!(image.source, "file://erased.png");
    assert!((image.transform.width - 600.0).abs() < f32::EPSILON);
    assert!((image.transform.height - 600.0).abs() < f32::EPSILON);
    assert_eq!(image.crop, Crop::Shape(CropShape::Circle));
    assert!(image.transform.flipped_h);
}

#[test]
fn test_text_control_on_image_is_rejected() {
    let mut session = session();
    session.add_image("file://photo.jpg");
    let target = selected_target(&session);
    assert!(matches!(
        session.open_panel(ElementKind::Text, target),
        Err(EditError::KindMismatch { .. })
    ));
    let text_only = easel_core::Control::TextFlag(StyleFlag::Italic);
    let result = text_only.emit(
        session.canvas(),
        target,
        ControlInput::Toggle(true),
        &ControlSettings::default(),
    );
    assert!(matches!(result, Err(EditError::KindMismatch { .. })));
}

// ============================================================================
// Panel Lifecycle Tests
// ============================================================================

#[test]
fn test_panel_follows_undo_and_closes_on_removal() {
    let mut session = session();
    session.add_text("Hello");
    let target = selected_target(&session);
    session.open_panel(ElementKind::Text, target).expect("open");
    session.select_mode(&[Mode::Size]).expect("size");

    assert!(session.interact(ControlInput::Value(64.0)).is_applied());
    assert!((slider_value(&session) - 64.0).abs() < f32::EPSILON);
    session.undo();
    assert!((slider_value(&session) - 20.0).abs() < f32::EPSILON);

    let Target::Element(id) = target else {
        panic!("element target");
    };
    assert!(session.remove(id).is_applied());
    assert!(session.panel().is_none());

    let error = expect_rejection(session.interact(ControlInput::Value(30.0)));
    assert!(matches!(error, EditError::NoActivePanel));
}

#[test]
fn test_chips_describe_path() {
    let mut session = session();
    session.add_text("Chips");
    let target = selected_target(&session);
    session.open_panel(ElementKind::Text, target).expect("open");
    session
        .select_mode(&[Mode::Style, Mode::Case])
        .expect("case");
    let chips = session.panel().expect("panel").chips();
    assert_eq!(chips.len(), 2);
    assert_eq!(chips[0].modes.len(), 13);
    assert_eq!(chips[1].modes[chips[1].selected], Mode::Case);
    assert_eq!(Mode::AutoParagraph.label(), "Auto Paragraph");
}
