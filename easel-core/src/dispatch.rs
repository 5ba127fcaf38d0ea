//! Command application and the history-aware dispatcher.

use crate::canvas::Canvas;
use crate::change::{ChangeSet, Target};
use crate::command::EditCommand;
use crate::element::{
    AnchorEdge, Element, ElementId, HorizontalAnchor, Transform, VerticalAnchor,
};
use crate::error::{EditError, EditResult};
use crate::gesture::clamp_position;
use crate::history::History;

/// Apply `command` to a copy of `canvas`.
///
/// The input canvas is never modified. On success the new canvas and the
/// properties that differ are returned; the change set is empty when the
/// command was a no-op.
///
/// # Errors
///
/// Returns the validation error of any carried value, or
/// [`EditError::UnknownElement`] / [`EditError::KindMismatch`] when the target
/// cannot take the command.
pub fn apply(canvas: &Canvas, command: &EditCommand) -> EditResult<(Canvas, ChangeSet)> {
    command.validate()?;
    check_target(canvas, command)?;

    let mut next = canvas.clone();
    mutate(&mut next, command)?;
    let changes = ChangeSet::between(canvas, &next);
    Ok((next, changes))
}

fn check_target(canvas: &Canvas, command: &EditCommand) -> EditResult<()> {
    if matches!(command, EditCommand::AddElement { .. }) {
        return Ok(());
    }
    let Target::Element(id) = command.target() else {
        return Ok(());
    };
    let element = canvas.element(id).ok_or(EditError::UnknownElement(id))?;
    match command.required_kind() {
        Some(expected) if element.kind() != expected => Err(EditError::KindMismatch {
            id,
            expected,
            found: element.kind(),
        }),
        _ => Ok(()),
    }
}

fn mutate(canvas: &mut Canvas, command: &EditCommand) -> EditResult<()> {
    let (width, height) = canvas.size_f32();
    match command {
        EditCommand::AddElement { element } => {
            let mut element = element.clone();
            clamp_into(element.transform_mut(), width, height);
            canvas.insert_element(element)?;
        }
        EditCommand::RemoveElement { id } => {
            canvas.remove_element(*id)?;
        }
        EditCommand::ReorderElement { id, index } => canvas.move_element(*id, *index)?,
        EditCommand::ResizeCanvas {
            width: new_width,
            height: new_height,
        } => {
            canvas.set_size(*new_width, *new_height)?;
            let (width, height) = canvas.size_f32();
            for element in canvas.elements_mut() {
                resnap(element, width, height);
            }
        }
        EditCommand::SetCanvasBorder { size, color } => canvas.set_border(*size, *color),
        EditCommand::SetBackgroundFill { fill } => canvas.background_mut().fill = fill.clone(),
        EditCommand::SetBorder { border } => canvas.background_mut().border = border.clone(),
        EditCommand::SetBackgroundOpacity { opacity } => {
            canvas.background_mut().opacity = *opacity;
        }
        EditCommand::SetBackgroundScale { percent, mode } => {
            let background = canvas.background_mut();
            background.scale_percent = *percent;
            background.scale_mode = *mode;
        }
        EditCommand::SetBackgroundBlur { radius } => {
            canvas.background_mut().blur_radius = *radius;
        }
        EditCommand::SetBackgroundBlend { color } => canvas.background_mut().blend = *color,
        EditCommand::SetTransform { id, transform } => {
            let element = element_mut(canvas, *id)?;
            let previous = *element.transform();
            let mut next = *transform;
            clamp_into(&mut next, width, height);
            let anchor = element.anchor_mut();
            if (next.x - previous.x).abs() > f32::EPSILON {
                anchor.horizontal = None;
            }
            if (next.y - previous.y).abs() > f32::EPSILON {
                anchor.vertical = None;
            }
            *element.transform_mut() = next;
        }
        EditCommand::SetOpacity { id, opacity } => {
            element_mut(canvas, *id)?.set_opacity(*opacity);
        }
        EditCommand::SetShadow { id, shadow } => element_mut(canvas, *id)?.set_shadow(*shadow),
        EditCommand::SetAnchor { id, edge } => {
            let element = element_mut(canvas, *id)?;
            let snapped = edge.resolve(*element.transform(), width, height);
            *element.transform_mut() = snapped;
            let anchor = element.anchor_mut();
            *anchor = edge.apply(*anchor);
        }
        EditCommand::SetTextContent { id, content } => {
            if let Element::Text(text) = element_mut(canvas, *id)? {
                text.content.clone_from(content);
            }
        }
        EditCommand::SetTextStyle { id, style } => {
            if let Element::Text(text) = element_mut(canvas, *id)? {
                text.style = style.clone();
            }
        }
        EditCommand::SetImageSource { id, source } => {
            if let Element::Image(image) = element_mut(canvas, *id)? {
                image.source.clone_from(source);
            }
        }
        EditCommand::SetImageTint { id, tint } => {
            if let Element::Image(image) = element_mut(canvas, *id)? {
                image.tint = tint.clone();
            }
        }
        EditCommand::SetCrop { id, crop } => {
            if let Element::Image(image) = element_mut(canvas, *id)? {
                image.crop = *crop;
            }
        }
    }
    Ok(())
}

fn element_mut(canvas: &mut Canvas, id: ElementId) -> EditResult<&mut Element> {
    canvas.element_mut(id).ok_or(EditError::UnknownElement(id))
}

fn clamp_into(transform: &mut Transform, width: f32, height: f32) {
    let (x, y) = clamp_position(
        transform.x,
        transform.y,
        transform.width,
        transform.height,
        width,
        height,
    );
    transform.x = x;
    transform.y = y;
}

/// Keep anchored edges anchored after a resize, then clamp.
fn resnap(element: &mut Element, width: f32, height: f32) {
    let anchor = element.anchor();
    let mut transform = *element.transform();
    if let Some(horizontal) = anchor.horizontal {
        let edge = match horizontal {
            HorizontalAnchor::Left => AnchorEdge::HorizontalLeft,
            HorizontalAnchor::Center => AnchorEdge::HorizontalCenter,
            HorizontalAnchor::Right => AnchorEdge::HorizontalRight,
        };
        transform = edge.resolve(transform, width, height);
    }
    if let Some(vertical) = anchor.vertical {
        let edge = match vertical {
            VerticalAnchor::Top => AnchorEdge::VerticalTop,
            VerticalAnchor::Center => AnchorEdge::VerticalCenter,
            VerticalAnchor::Bottom => AnchorEdge::VerticalBottom,
        };
        transform = edge.resolve(transform, width, height);
    }
    clamp_into(&mut transform, width, height);
    *element.transform_mut() = transform;
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    /// Properties that changed; empty for a no-op.
    pub changes: ChangeSet,
    /// Whether an undo entry was recorded.
    pub recorded: bool,
}

/// Applies commands to a canvas and keeps its undo history.
///
/// A gesture batch groups every command between [`Dispatcher::begin_gesture`]
/// and [`Dispatcher::end_gesture`] into a single undo entry.
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    history: History,
    /// Canvas as it was when the open gesture began.
    gesture: Option<Canvas>,
}

impl Dispatcher {
    /// Create a dispatcher with the given history.
    #[must_use]
    pub const fn new(history: History) -> Self {
        Self {
            history,
            gesture: None,
        }
    }

    /// The undo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        &self.history
    }

    /// Whether a gesture batch is open.
    #[must_use]
    pub const fn in_gesture(&self) -> bool {
        self.gesture.is_some()
    }

    /// Apply `command` to `canvas` in place.
    ///
    /// On error the canvas is untouched. A change outside a gesture records
    /// the prior canvas in history, which clears redo.
    ///
    /// # Errors
    ///
    /// Returns the error from [`apply`].
    pub fn dispatch(&mut self, canvas: &mut Canvas, command: &EditCommand) -> EditResult<Applied> {
        let (next, changes) = apply(canvas, command)?;
        if next == *canvas {
            tracing::debug!(command = command.label(), "Command was a no-op");
            return Ok(Applied {
                changes,
                recorded: false,
            });
        }
        let previous = std::mem::replace(canvas, next);
        let recorded = self.gesture.is_none();
        if recorded {
            self.history.record(previous);
        }
        tracing::debug!(
            command = command.label(),
            changes = changes.len(),
            recorded,
            "Command applied"
        );
        Ok(Applied { changes, recorded })
    }

    /// Open a gesture batch starting from `canvas`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GestureInProgress`] if a batch is already open.
    pub fn begin_gesture(&mut self, canvas: &Canvas) -> EditResult<()> {
        if self.gesture.is_some() {
            return Err(EditError::GestureInProgress);
        }
        self.gesture = Some(canvas.clone());
        Ok(())
    }

    /// Close the open batch, recording one undo entry if `canvas` changed.
    ///
    /// Returns the net change of the whole batch, or `None` when nothing was
    /// recorded.
    pub fn end_gesture(&mut self, canvas: &Canvas) -> Option<ChangeSet> {
        let start = self.gesture.take()?;
        if start == *canvas {
            return None;
        }
        let changes = ChangeSet::between(&start, canvas);
        self.history.record(start);
        tracing::debug!(changes = changes.len(), "Gesture recorded as one undo entry");
        Some(changes)
    }

    /// Abandon the open batch, returning the canvas it started from.
    pub fn cancel_gesture(&mut self) -> Option<Canvas> {
        self.gesture.take()
    }

    /// Restore the previous canvas.
    ///
    /// Returns the change set, or `None` when there is nothing to undo.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GestureInProgress`] while a batch is open.
    pub fn undo(&mut self, canvas: &mut Canvas) -> EditResult<Option<ChangeSet>> {
        if self.gesture.is_some() {
            return Err(EditError::GestureInProgress);
        }
        Ok(self.history.undo(canvas).map(|snapshot| {
            let changes = ChangeSet::between(canvas, &snapshot);
            *canvas = snapshot;
            changes
        }))
    }

    /// Re-apply the last undone canvas.
    ///
    /// Returns the change set, or `None` when there is nothing to redo.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GestureInProgress`] while a batch is open.
    pub fn redo(&mut self, canvas: &mut Canvas) -> EditResult<Option<ChangeSet>> {
        if self.gesture.is_some() {
            return Err(EditError::GestureInProgress);
        }
        Ok(self.history.redo(canvas).map(|snapshot| {
            let changes = ChangeSet::between(canvas, &snapshot);
            *canvas = snapshot;
            changes
        }))
    }
}
