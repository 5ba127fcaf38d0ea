//! Static mode trees, one per editable kind.

use super::control::{Control, RotationAxis, StyleFlag};
use super::Mode;
use crate::element::ElementKind;

/// One chip in a mode tree.
///
/// Leaves carry the control they open; branches carry children instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeNode {
    /// The chip.
    pub mode: Mode,
    /// Control opened when this chip is a selected leaf.
    pub control: Option<Control>,
    /// Sub-chips, shown once this chip is selected.
    pub children: &'static [ModeNode],
}

impl ModeNode {
    const fn leaf(mode: Mode, control: Control) -> Self {
        Self {
            mode,
            control: Some(control),
            children: &[],
        }
    }

    const fn branch(mode: Mode, children: &'static [ModeNode]) -> Self {
        Self {
            mode,
            control: None,
            children,
        }
    }

    /// Whether this chip opens a control.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

const SHADOW: &[ModeNode] = &[
    ModeNode::leaf(Mode::Off, Control::ShadowOff),
    ModeNode::leaf(Mode::Angle, Control::ShadowAngle),
    ModeNode::leaf(Mode::Blur, Control::ShadowBlur),
    ModeNode::leaf(Mode::Color, Control::ShadowColor),
    ModeNode::leaf(Mode::Opacity, Control::ShadowOpacity),
];

const BACKGROUND: &[ModeNode] = &[
    ModeNode::branch(
        Mode::Edit,
        &[
            ModeNode::leaf(Mode::Color, Control::BackgroundColor),
            ModeNode::leaf(Mode::Gradient, Control::BackgroundGradient),
            ModeNode::leaf(Mode::Texture, Control::BackgroundTexture),
            ModeNode::leaf(Mode::Gallery, Control::BackgroundImage),
            ModeNode::leaf(Mode::Camera, Control::BackgroundImage),
        ],
    ),
    ModeNode::branch(
        Mode::Border,
        &[
            ModeNode::leaf(Mode::Off, Control::BorderOff),
            ModeNode::leaf(Mode::Size, Control::BorderSize),
            ModeNode::leaf(Mode::Solid, Control::BorderSolid),
            ModeNode::leaf(Mode::Gradient, Control::BorderGradient),
            ModeNode::leaf(Mode::Texture, Control::BorderTexture),
            ModeNode::leaf(Mode::Opacity, Control::BorderOpacity),
        ],
    ),
    ModeNode::leaf(Mode::Opacity, Control::BackgroundOpacity),
    ModeNode::branch(
        Mode::Scale,
        &[
            ModeNode::leaf(Mode::Amount, Control::BackgroundScaleAmount),
            ModeNode::leaf(Mode::ScaleType, Control::BackgroundScaleType),
        ],
    ),
    ModeNode::leaf(Mode::Blur, Control::BackgroundBlur),
    ModeNode::leaf(Mode::Blend, Control::BackgroundBlend),
];

const TEXT: &[ModeNode] = &[
    ModeNode::leaf(Mode::Edit, Control::TextEdit),
    ModeNode::branch(
        Mode::Color,
        &[
            ModeNode::leaf(Mode::Solid, Control::TextColor),
            ModeNode::leaf(Mode::Gradient, Control::TextGradient),
            ModeNode::leaf(Mode::Texture, Control::TextTexture),
        ],
    ),
    ModeNode::leaf(Mode::Size, Control::TextSize),
    ModeNode::leaf(Mode::Fonts, Control::TextFont),
    ModeNode::branch(Mode::Shadow, SHADOW),
    ModeNode::leaf(Mode::Position, Control::Position),
    ModeNode::branch(
        Mode::Style,
        &[
            ModeNode::leaf(Mode::Alignment, Control::TextAlignment),
            ModeNode::leaf(Mode::Case, Control::TextCase),
            ModeNode::leaf(Mode::Bold, Control::TextFlag(StyleFlag::Bold)),
            ModeNode::leaf(Mode::Italic, Control::TextFlag(StyleFlag::Italic)),
            ModeNode::leaf(Mode::Underline, Control::TextFlag(StyleFlag::Underline)),
        ],
    ),
    ModeNode::leaf(Mode::Rotation, Control::Rotation(RotationAxis::Z)),
    ModeNode::leaf(Mode::Curve, Control::TextCurve),
    ModeNode::leaf(Mode::AutoParagraph, Control::TextParagraph),
    ModeNode::leaf(Mode::LineSpace, Control::TextLineSpacing),
    ModeNode::leaf(Mode::LetterSpace, Control::TextLetterSpacing),
    ModeNode::leaf(Mode::Opacity, Control::ElementOpacity),
];

const IMAGE: &[ModeNode] = &[
    ModeNode::branch(
        Mode::Edit,
        &[
            ModeNode::leaf(Mode::Replace, Control::ImageSource),
            ModeNode::leaf(Mode::Erase, Control::ImageSource),
        ],
    ),
    ModeNode::leaf(Mode::Size, Control::ImageSize),
    ModeNode::branch(
        Mode::Crop,
        &[
            ModeNode::leaf(Mode::Aspect, Control::CropAspect),
            ModeNode::leaf(Mode::Shape, Control::CropShape),
        ],
    ),
    ModeNode::branch(
        Mode::Color,
        &[
            ModeNode::leaf(Mode::Solid, Control::TintSolid),
            ModeNode::leaf(Mode::Gradient, Control::TintGradient),
        ],
    ),
    ModeNode::branch(Mode::Shadow, SHADOW),
    ModeNode::leaf(Mode::Position, Control::Position),
    ModeNode::branch(
        Mode::Rotation,
        &[
            ModeNode::leaf(Mode::RotateZ, Control::Rotation(RotationAxis::Z)),
            ModeNode::leaf(Mode::RotateX, Control::Rotation(RotationAxis::X)),
            ModeNode::leaf(Mode::RotateY, Control::Rotation(RotationAxis::Y)),
            ModeNode::leaf(Mode::Flip, Control::Flip),
        ],
    ),
    ModeNode::leaf(Mode::Opacity, Control::ElementOpacity),
];

/// Root chips of the panel for `kind`.
#[must_use]
pub const fn tree(kind: ElementKind) -> &'static [ModeNode] {
    match kind {
        ElementKind::Background => BACKGROUND,
        ElementKind::Text => TEXT,
        ElementKind::Image => IMAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(nodes: &'static [ModeNode], out: &mut Vec<&'static ModeNode>) {
        for node in nodes {
            if node.is_leaf() {
                out.push(node);
            } else {
                leaves(node.children, out);
            }
        }
    }

    #[test]
    fn test_every_leaf_has_a_control_and_no_branch_does() {
        for kind in [ElementKind::Background, ElementKind::Text, ElementKind::Image] {
            let mut found = Vec::new();
            leaves(tree(kind), &mut found);
            assert!(!found.is_empty());
            assert!(found.iter().all(|n| n.control.is_some()), "{kind}");
        }
        assert!(BACKGROUND[0].control.is_none());
    }

    #[test]
    fn test_sibling_modes_are_unique() {
        fn check(nodes: &'static [ModeNode]) {
            let mut seen = std::collections::HashSet::new();
            for node in nodes {
                assert!(seen.insert(node.mode), "duplicate {}", node.mode);
                check(node.children);
            }
        }
        check(BACKGROUND);
        check(TEXT);
        check(IMAGE);
    }

    #[test]
    fn test_root_order() {
        let roots: Vec<Mode> = tree(ElementKind::Image).iter().map(|n| n.mode).collect();
        assert_eq!(
            roots,
            vec![
                Mode::Edit,
                Mode::Size,
                Mode::Crop,
                Mode::Color,
                Mode::Shadow,
                Mode::Position,
                Mode::Rotation,
                Mode::Opacity
            ]
        );
    }
}
