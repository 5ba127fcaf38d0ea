//! Hierarchical option panels.
//!
//! Each editable kind has a static tree of modes. Selecting a chip descends
//! the tree; the selected leaf is bound to a [`Control`] that reads one
//! property from the canvas and turns interactions into commands. One
//! [`ModeNavigator`] drives every kind, parameterized only by its tree.

mod control;
mod tree;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use control::{
    ranges, Control, ControlInput, ControlSettings, ControlValue, FlipAxis, RotationAxis,
    SliderRange, StyleFlag,
};
pub use tree::{tree, ModeNode};

use crate::canvas::Canvas;
use crate::change::Target;
use crate::command::EditCommand;
use crate::element::ElementKind;
use crate::error::{EditError, EditResult};

/// A node in a mode tree, shown as a chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Mode {
    Edit,
    Color,
    Gradient,
    Texture,
    Gallery,
    Camera,
    Border,
    Off,
    Size,
    Solid,
    Opacity,
    Scale,
    Amount,
    ScaleType,
    Blur,
    Blend,
    Fonts,
    Shadow,
    Angle,
    Position,
    Style,
    Alignment,
    Case,
    Bold,
    Italic,
    Underline,
    Rotation,
    Curve,
    AutoParagraph,
    LineSpace,
    LetterSpace,
    Replace,
    Erase,
    Crop,
    Aspect,
    Shape,
    RotateZ,
    RotateX,
    RotateY,
    Flip,
}

impl Mode {
    /// Chip label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Edit => "Edit",
            Self::Color => "Color",
            Self::Gradient => "Gradient",
            Self::Texture => "Texture",
            Self::Gallery => "Gallery",
            Self::Camera => "Camera",
            Self::Border => "Border",
            Self::Off => "Off",
            Self::Size => "Size",
            Self::Solid => "Solid",
            Self::Opacity => "Opacity",
            Self::Scale => "Scale",
            Self::Amount => "Amount",
            Self::ScaleType => "Scale Type",
            Self::Blur => "Blur",
            Self::Blend => "Blend",
            Self::Fonts => "Fonts",
            Self::Shadow => "Shadow",
            Self::Angle => "Angle",
            Self::Position => "Position",
            Self::Style => "Style",
            Self::Alignment => "Alignment",
            Self::Case => "Case",
            Self::Bold => "Bold",
            Self::Italic => "Italic",
            Self::Underline => "Underline",
            Self::Rotation => "Rotation",
            Self::Curve => "Curve",
            Self::AutoParagraph => "Auto Paragraph",
            Self::LineSpace => "Line Space",
            Self::LetterSpace => "Letter Space",
            Self::Replace => "Replace",
            Self::Erase => "Erase",
            Self::Crop => "Crop",
            Self::Aspect => "Aspect",
            Self::Shape => "Shape",
            Self::RotateZ => "Z",
            Self::RotateX => "X",
            Self::RotateY => "Y",
            Self::Flip => "Flip",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of chips: the siblings at one level and which is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChipRow {
    /// Modes at this level, in display order.
    pub modes: Vec<Mode>,
    /// Index of the selected mode.
    pub selected: usize,
}

/// State machine of one open option panel.
///
/// Dropped when the panel closes and rebuilt from the canvas on next open,
/// so it never holds property values of its own beyond the last read.
#[derive(Debug, Clone)]
pub struct ModeNavigator {
    kind: ElementKind,
    target: Target,
    /// Child index at each level, root first; always ends at a leaf.
    path: Vec<usize>,
    value: ControlValue,
    settings: ControlSettings,
}

impl ModeNavigator {
    /// Open the panel for `kind` on `target` at its default mode.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] or [`EditError::KindMismatch`]
    /// when `target` does not hold an element of `kind`.
    pub fn open(kind: ElementKind, target: Target, canvas: &Canvas) -> EditResult<Self> {
        Self::open_with(kind, target, canvas, ControlSettings::default())
    }

    /// Same as [`ModeNavigator::open`] with explicit control settings.
    ///
    /// # Errors
    ///
    /// See [`ModeNavigator::open`].
    pub fn open_with(
        kind: ElementKind,
        target: Target,
        canvas: &Canvas,
        settings: ControlSettings,
    ) -> EditResult<Self> {
        check_target(kind, target, canvas)?;
        let path = descend(tree(kind), Vec::new());
        let leaf = leaf_at(tree(kind), &path)?;
        let value = control_of(leaf)?.read(canvas, target)?;
        tracing::debug!(%kind, mode = %leaf.mode, "Panel opened");
        Ok(Self {
            kind,
            target,
            path,
            value,
            settings,
        })
    }

    /// Kind the panel edits.
    #[must_use]
    pub const fn kind(&self) -> ElementKind {
        self.kind
    }

    /// What the panel edits.
    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    /// Selected mode at each level, root first.
    #[must_use]
    pub fn path(&self) -> Vec<Mode> {
        let mut nodes = tree(self.kind);
        let mut modes = Vec::with_capacity(self.path.len());
        for &index in &self.path {
            let Some(node) = nodes.get(index) else {
                break;
            };
            modes.push(node.mode);
            nodes = node.children;
        }
        modes
    }

    /// The selected leaf mode.
    #[must_use]
    pub fn active_mode(&self) -> Option<Mode> {
        self.path().last().copied()
    }

    /// The control bound to the selected leaf.
    #[must_use]
    pub fn control(&self) -> Option<Control> {
        leaf_at(tree(self.kind), &self.path)
            .ok()
            .and_then(|node| node.control)
    }

    /// What the active control currently displays.
    #[must_use]
    pub const fn value(&self) -> &ControlValue {
        &self.value
    }

    /// Chip rows from the root down to the selected leaf.
    #[must_use]
    pub fn chips(&self) -> Vec<ChipRow> {
        let mut nodes = tree(self.kind);
        let mut rows = Vec::with_capacity(self.path.len());
        for &index in &self.path {
            rows.push(ChipRow {
                modes: nodes.iter().map(|n| n.mode).collect(),
                selected: index,
            });
            match nodes.get(index) {
                Some(node) => nodes = node.children,
                None => break,
            }
        }
        rows
    }

    /// Select the mode at `path` (root first), descending to its first leaf.
    ///
    /// On error the navigator is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownMode`] if `path` is empty or does not
    /// exist in this panel's tree, or the read errors of [`Control::read`].
    pub fn select(&mut self, canvas: &Canvas, path: &[Mode]) -> EditResult<()> {
        let root = tree(self.kind);
        let mut nodes = root;
        let mut indices = Vec::with_capacity(path.len() + 2);
        for mode in path {
            let index = nodes
                .iter()
                .position(|n| n.mode == *mode)
                .ok_or_else(|| unknown_mode(self.kind, path))?;
            indices.push(index);
            nodes = nodes[index].children;
        }
        if indices.is_empty() {
            return Err(unknown_mode(self.kind, path));
        }
        let indices = descend(root, indices);
        let leaf = leaf_at(root, &indices)?;
        let value = control_of(leaf)?.read(canvas, self.target)?;
        tracing::debug!(kind = %self.kind, mode = %leaf.mode, "Mode selected");
        self.path = indices;
        self.value = value;
        Ok(())
    }

    /// Turn one interaction with the active control into a command.
    ///
    /// Never modifies the canvas.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Control::emit`].
    pub fn interact(&self, canvas: &Canvas, input: ControlInput) -> EditResult<EditCommand> {
        let leaf = leaf_at(tree(self.kind), &self.path)?;
        control_of(leaf)?.emit(canvas, self.target, input, &self.settings)
    }

    /// Re-read the active control after the canvas changed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] when the target is gone.
    pub fn refresh(&mut self, canvas: &Canvas) -> EditResult<()> {
        let leaf = leaf_at(tree(self.kind), &self.path)?;
        self.value = control_of(leaf)?.read(canvas, self.target)?;
        Ok(())
    }
}

fn check_target(kind: ElementKind, target: Target, canvas: &Canvas) -> EditResult<()> {
    match (kind, target) {
        (ElementKind::Background, Target::Background) => Ok(()),
        (ElementKind::Text | ElementKind::Image, Target::Element(id)) => {
            let element = canvas.element(id).ok_or(EditError::UnknownElement(id))?;
            if element.kind() == kind {
                Ok(())
            } else {
                Err(EditError::KindMismatch {
                    id,
                    expected: kind,
                    found: element.kind(),
                })
            }
        }
        (ElementKind::Background, Target::Element(id)) => {
            let found = canvas
                .element(id)
                .map(crate::element::Element::kind)
                .ok_or(EditError::UnknownElement(id))?;
            Err(EditError::KindMismatch {
                id,
                expected: kind,
                found,
            })
        }
        (_, target) => Err(EditError::invalid(
            "target",
            format!("{kind} panel cannot edit {target:?}"),
        )),
    }
}

/// Extend `path` with first children until it ends at a leaf.
fn descend(root: &'static [ModeNode], mut path: Vec<usize>) -> Vec<usize> {
    let mut nodes = root;
    for &index in &path {
        match nodes.get(index) {
            Some(node) => nodes = node.children,
            None => return path,
        }
    }
    while !nodes.is_empty() {
        path.push(0);
        nodes = nodes[0].children;
    }
    path
}

fn leaf_at(root: &'static [ModeNode], path: &[usize]) -> EditResult<&'static ModeNode> {
    let mut nodes = root;
    let mut leaf = None;
    for &index in path {
        let node = nodes
            .get(index)
            .ok_or_else(|| EditError::UnknownMode(format!("index {index}")))?;
        nodes = node.children;
        leaf = Some(node);
    }
    leaf.ok_or_else(|| EditError::UnknownMode("empty path".to_string()))
}

fn control_of(node: &ModeNode) -> EditResult<Control> {
    node.control
        .ok_or_else(|| EditError::UnknownMode(format!("{} has no control", node.mode)))
}

fn unknown_mode(kind: ElementKind, path: &[Mode]) -> EditError {
    let joined: Vec<&str> = path.iter().map(|m| m.label()).collect();
    EditError::UnknownMode(format!("{kind}: {}", joined.join(" > ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::dispatch::apply;
    use crate::element::{ImageElement, TextElement, Transform};
    use crate::style::TextStyle;

    fn text_canvas() -> (Canvas, Target) {
        let canvas = Canvas::new(1080, 1080, Color::WHITE).expect("canvas");
        let transform = Transform::at(50.0, 50.0, 100.0, 40.0);
        let text = TextElement::new("Hi", TextStyle::default(), transform);
        let target = Target::Element(text.id);
        let add = EditCommand::AddElement {
            element: text.into(),
        };
        let (canvas, _) = apply(&canvas, &add).expect("add");
        (canvas, target)
    }

    #[test]
    fn test_open_background_defaults_to_first_leaf() {
        let canvas = Canvas::new(1080, 1080, Color::WHITE).expect("canvas");
        let nav = ModeNavigator::open(ElementKind::Background, Target::Background, &canvas)
            .expect("open");
        assert_eq!(nav.path(), vec![Mode::Edit, Mode::Color]);
        assert_eq!(nav.control(), Some(Control::BackgroundColor));
        assert_eq!(nav.value(), &ControlValue::Swatch(Some(Color::WHITE)));
    }

    #[test]
    fn test_select_descends_to_first_child() {
        let canvas = Canvas::new(1080, 1080, Color::WHITE).expect("canvas");
        let mut nav = ModeNavigator::open(ElementKind::Background, Target::Background, &canvas)
            .expect("open");
        nav.select(&canvas, &[Mode::Border]).expect("select");
        assert_eq!(nav.path(), vec![Mode::Border, Mode::Off]);
        nav.select(&canvas, &[Mode::Border, Mode::Size]).expect("select");
        assert_eq!(nav.active_mode(), Some(Mode::Size));
        let chips = nav.chips();
        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].modes[chips[0].selected], Mode::Border);
        assert_eq!(chips[1].modes[chips[1].selected], Mode::Size);
    }

    #[test]
    fn test_unknown_mode_leaves_navigator_unchanged() {
        let canvas = Canvas::new(1080, 1080, Color::WHITE).expect("canvas");
        let mut nav = ModeNavigator::open(ElementKind::Background, Target::Background, &canvas)
            .expect("open");
        let before = nav.path();
        assert!(matches!(
            nav.select(&canvas, &[Mode::Curve]),
            Err(EditError::UnknownMode(_))
        ));
        assert!(matches!(
            nav.select(&canvas, &[]),
            Err(EditError::UnknownMode(_))
        ));
        assert_eq!(nav.path(), before);
    }

    #[test]
    fn test_open_rejects_wrong_kind() {
        let (canvas, target) = text_canvas();
        assert!(matches!(
            ModeNavigator::open(ElementKind::Image, target, &canvas),
            Err(EditError::KindMismatch { .. })
        ));
        assert!(ModeNavigator::open(ElementKind::Text, target, &canvas).is_ok());
    }

    #[test]
    fn test_interact_then_refresh() {
        let (canvas, target) = text_canvas();
        let mut nav = ModeNavigator::open(ElementKind::Text, target, &canvas).expect("open");
        nav.select(&canvas, &[Mode::Size]).expect("select");
        let cmd = nav.interact(&canvas, ControlInput::Value(48.0)).expect("interact");
        let (canvas, _) = apply(&canvas, &cmd).expect("apply");
        nav.refresh(&canvas).expect("refresh");
        let ControlValue::Slider { value, .. } = nav.value() else {
            panic!("expected slider");
        };
        assert!((value - 48.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_refresh_fails_when_target_removed() {
        let (canvas, target) = text_canvas();
        let mut nav = ModeNavigator::open(ElementKind::Text, target, &canvas).expect("open");
        let Target::Element(id) = target else {
            panic!("element target");
        };
        let (canvas, _) = apply(&canvas, &EditCommand::RemoveElement { id }).expect("remove");
        assert!(matches!(
            nav.refresh(&canvas),
            Err(EditError::UnknownElement(_))
        ));
    }

    #[test]
    fn test_image_rotation_subtree() {
        let canvas = Canvas::new(1080, 1080, Color::WHITE).expect("canvas");
        let image = ImageElement::new("file://a.png", Transform::at(0.0, 0.0, 100.0, 100.0));
        let target = Target::Element(image.id);
        let add = EditCommand::AddElement {
            element: image.into(),
        };
        let (canvas, _) = apply(&canvas, &add).expect("add");
        let mut nav = ModeNavigator::open(ElementKind::Image, target, &canvas).expect("open");
        assert_eq!(nav.path(), vec![Mode::Edit, Mode::Replace]);
        nav.select(&canvas, &[Mode::Rotation]).expect("select");
        assert_eq!(nav.control(), Some(Control::Rotation(RotationAxis::Z)));
        nav.select(&canvas, &[Mode::Rotation, Mode::Flip]).expect("select");
        assert_eq!(
            nav.value(),
            &ControlValue::Flip {
                horizontal: false,
                vertical: false
            }
        );
    }
}
