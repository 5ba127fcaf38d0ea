//! Error types for editing operations.

use thiserror::Error;

use crate::element::{ElementId, ElementKind};

/// Result type for editing operations.
pub type EditResult<T> = Result<T, EditError>;

/// Errors that can occur while building values or applying edits.
///
/// None of these are fatal to an editing session: the worst outcome is a
/// single rejected edit with the canvas left unchanged.
#[derive(Debug, Error)]
pub enum EditError {
    /// A property value is out of range or malformed.
    #[error("Invalid {property}: {reason}")]
    InvalidProperty {
        /// Name of the offending property.
        property: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// The targeted element is not on the canvas.
    #[error("Element not found: {0}")]
    UnknownElement(ElementId),

    /// An element with this id is already on the canvas.
    #[error("Duplicate element id: {0}")]
    DuplicateElement(ElementId),

    /// The command does not apply to this kind of element.
    #[error("Element {id} is {found}, expected {expected}")]
    KindMismatch {
        /// Targeted element.
        id: ElementId,
        /// Kind the command needs.
        expected: ElementKind,
        /// Kind actually found.
        found: ElementKind,
    },

    /// Canvas dimensions must be positive.
    #[error("Invalid canvas size: {width}x{height}")]
    InvalidCanvasSize {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The navigator path does not exist in the mode tree.
    #[error("Unknown mode: {0}")]
    UnknownMode(String),

    /// A control received input it cannot turn into a command.
    #[error("Control {control} does not accept {input} input")]
    UnsupportedInput {
        /// Control that received the input.
        control: &'static str,
        /// Kind of input received.
        input: &'static str,
    },

    /// A gesture batch is already open.
    #[error("A gesture is already in progress")]
    GestureInProgress,

    /// No option panel is open.
    #[error("No panel is open")]
    NoActivePanel,

    /// Document serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EditError {
    /// Shorthand for an [`EditError::InvalidProperty`].
    pub(crate) fn invalid(property: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidProperty {
            property,
            reason: reason.into(),
        }
    }

    /// Whether this error means the panel that produced it is stale.
    #[must_use]
    pub fn is_stale_target(&self) -> bool {
        matches!(self, Self::UnknownElement(_))
    }
}
