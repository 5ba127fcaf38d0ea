//! Editing session: the boundary the surrounding application talks to.
//!
//! An [`EditSession`] owns the canvas and everything that edits it. Every UI
//! event ends up as an [`EditCommand`] passed through one dispatcher, and
//! every applied change is reported to subscribers as a [`ChangeSet`].

use std::fmt;

use crate::canvas::Canvas;
use crate::change::{ChangeSet, Target};
use crate::command::EditCommand;
use crate::config::EditorConfig;
use crate::dispatch::Dispatcher;
use crate::element::{Element, ElementId, ElementKind, ImageElement, TextElement, Transform};
use crate::error::{EditError, EditResult};
use crate::gesture::{DragOutcome, DragTracker, PointerEvent, PointerPhase};
use crate::history::History;
use crate::navigator::{ControlInput, Mode, ModeNavigator};
use crate::schema::CanvasDocument;

/// Why a request was refused.
#[derive(Debug)]
pub struct Rejection {
    /// The underlying error.
    pub error: EditError,
    /// Whether the open panel was closed because its target is gone.
    pub close_panel: bool,
}

/// Result of applying one command.
#[derive(Debug)]
pub enum Outcome {
    /// The canvas changed.
    Applied(ChangeSet),
    /// The command was valid but changed nothing.
    Unchanged,
    /// The command was refused; the canvas is untouched.
    Rejected(Rejection),
}

impl Outcome {
    /// Whether the canvas changed.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    /// Whether the command was refused.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }
}

/// Result of an undo or redo request.
#[derive(Debug)]
pub enum HistoryOutcome {
    /// A snapshot was restored.
    Restored(ChangeSet),
    /// Undo history is empty.
    NothingToUndo,
    /// Redo history is empty.
    NothingToRedo,
    /// The request was refused.
    Rejected(Rejection),
}

/// Result of one pointer event.
#[derive(Debug)]
pub enum PointerOutcome {
    /// Nothing under the pointer, or no drag in progress.
    Ignored,
    /// An element was pressed and selected.
    Pressed(ElementId),
    /// Press and release without movement.
    Tapped(ElementId),
    /// The pressed element moved during the drag.
    Dragging(ChangeSet),
    /// The drag finished; the net change is one undo entry.
    Moved(ChangeSet),
    /// The drag was abandoned and the canvas restored.
    Cancelled(ChangeSet),
}

type Listener = Box<dyn FnMut(&ChangeSet)>;

/// One canvas being edited.
pub struct EditSession {
    canvas: Canvas,
    dispatcher: Dispatcher,
    config: EditorConfig,
    selection: Option<ElementId>,
    panel: Option<ModeNavigator>,
    drag: DragTracker,
    listeners: Vec<Listener>,
}

impl fmt::Debug for EditSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("canvas", &self.canvas)
            .field("selection", &self.selection)
            .field("panel", &self.panel)
            .field("drag", &self.drag)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl EditSession {
    /// Start a session on a blank canvas described by `config`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`EditorConfig::validate`].
    pub fn new(config: EditorConfig) -> EditResult<Self> {
        config.validate()?;
        let canvas = Canvas::new(
            config.canvas_width,
            config.canvas_height,
            config.background_color,
        )?;
        Self::with_canvas(canvas, config)
    }

    /// Start a session on an existing canvas.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`EditorConfig::validate`] or
    /// [`Canvas::validate`].
    pub fn with_canvas(canvas: Canvas, config: EditorConfig) -> EditResult<Self> {
        config.validate()?;
        canvas.validate()?;
        let history = config
            .history_limit
            .map_or_else(History::new, History::with_limit);
        tracing::info!(
            width = canvas.width(),
            height = canvas.height(),
            elements = canvas.len(),
            "Editing session started"
        );
        Ok(Self {
            canvas,
            dispatcher: Dispatcher::new(history),
            config,
            selection: None,
            panel: None,
            drag: DragTracker::new(),
            listeners: Vec::new(),
        })
    }

    /// The canvas being edited.
    #[must_use]
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Session settings.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Undo history.
    #[must_use]
    pub const fn history(&self) -> &History {
        self.dispatcher.history()
    }

    /// Currently selected element.
    #[must_use]
    pub const fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// The open option panel.
    #[must_use]
    pub const fn panel(&self) -> Option<&ModeNavigator> {
        self.panel.as_ref()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    /// Call `listener` after every change to the canvas.
    pub fn subscribe(&mut self, listener: impl FnMut(&ChangeSet) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Export the canvas for a renderer.
    #[must_use]
    pub fn document(&self) -> CanvasDocument {
        CanvasDocument::from_canvas(&self.canvas)
    }

    /// Apply one command.
    ///
    /// Commands are refused with [`EditError::GestureInProgress`] while a drag
    /// is in progress.
    pub fn apply(&mut self, command: &EditCommand) -> Outcome {
        if self.drag.is_active() {
            tracing::warn!(command = command.label(), "Command rejected during drag");
            return Outcome::Rejected(Rejection {
                error: EditError::GestureInProgress,
                close_panel: false,
            });
        }
        self.dispatch(command)
    }

    fn dispatch(&mut self, command: &EditCommand) -> Outcome {
        match self.dispatcher.dispatch(&mut self.canvas, command) {
            Ok(applied) if applied.changes.is_empty() => Outcome::Unchanged,
            Ok(applied) => {
                self.changed(&applied.changes);
                Outcome::Applied(applied.changes)
            }
            Err(error) => {
                tracing::warn!(command = command.label(), %error, "Command rejected");
                Outcome::Rejected(self.reject(error, Some(command.target())))
            }
        }
    }

    /// Restore the canvas before the last recorded change.
    pub fn undo(&mut self) -> HistoryOutcome {
        match self.dispatcher.undo(&mut self.canvas) {
            Ok(Some(changes)) => {
                tracing::info!(changes = changes.len(), "Undo");
                self.changed(&changes);
                HistoryOutcome::Restored(changes)
            }
            Ok(None) => HistoryOutcome::NothingToUndo,
            Err(error) => {
                tracing::warn!(%error, "Undo rejected");
                HistoryOutcome::Rejected(self.reject(error, None))
            }
        }
    }

    /// Re-apply the last undone change.
    pub fn redo(&mut self) -> HistoryOutcome {
        match self.dispatcher.redo(&mut self.canvas) {
            Ok(Some(changes)) => {
                tracing::info!(changes = changes.len(), "Redo");
                self.changed(&changes);
                HistoryOutcome::Restored(changes)
            }
            Ok(None) => HistoryOutcome::NothingToRedo,
            Err(error) => {
                tracing::warn!(%error, "Redo rejected");
                HistoryOutcome::Rejected(self.reject(error, None))
            }
        }
    }

    /// Add a text element with the configured defaults and select it.
    pub fn add_text(&mut self, content: impl Into<String>) -> Outcome {
        let defaults = &self.config.text_defaults;
        let transform = Transform::at(defaults.x, defaults.y, defaults.width, defaults.height);
        let element = TextElement::new(content, defaults.style(), transform);
        self.add(element.into())
    }

    /// Add an image element with the configured defaults and select it.
    pub fn add_image(&mut self, source: impl Into<String>) -> Outcome {
        let defaults = self.config.image_defaults;
        let transform = Transform::at(defaults.x, defaults.y, defaults.width, defaults.height);
        self.add(ImageElement::new(source, transform).into())
    }

    fn add(&mut self, element: Element) -> Outcome {
        let id = element.id();
        let outcome = self.apply(&EditCommand::AddElement { element });
        if outcome.is_applied() {
            self.selection = Some(id);
        }
        outcome
    }

    /// Remove an element.
    pub fn remove(&mut self, id: ElementId) -> Outcome {
        self.apply(&EditCommand::RemoveElement { id })
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::UnknownElement`] if `id` is not on the canvas.
    pub fn select(&mut self, id: Option<ElementId>) -> EditResult<()> {
        if let Some(id) = id {
            if self.canvas.element(id).is_none() {
                return Err(EditError::UnknownElement(id));
            }
        }
        self.selection = id;
        Ok(())
    }

    /// Open the option panel for `kind` on `target`, replacing any open one.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`ModeNavigator::open`].
    pub fn open_panel(&mut self, kind: ElementKind, target: Target) -> EditResult<()> {
        let navigator = ModeNavigator::open_with(
            kind,
            target,
            &self.canvas,
            self.config.control_settings(),
        )?;
        self.panel = Some(navigator);
        Ok(())
    }

    /// Close the open panel. Returns whether one was open.
    pub fn close_panel(&mut self) -> bool {
        self.panel.take().is_some()
    }

    /// Select a mode in the open panel.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NoActivePanel`] or the errors of
    /// [`ModeNavigator::select`].
    pub fn select_mode(&mut self, path: &[Mode]) -> EditResult<()> {
        let panel = self.panel.as_mut().ok_or(EditError::NoActivePanel)?;
        panel.select(&self.canvas, path)
    }

    /// Send one interaction to the active control of the open panel.
    pub fn interact(&mut self, input: ControlInput) -> Outcome {
        let Some(panel) = &self.panel else {
            return Outcome::Rejected(Rejection {
                error: EditError::NoActivePanel,
                close_panel: false,
            });
        };
        let target = panel.target();
        match panel.interact(&self.canvas, input) {
            Ok(command) => self.apply(&command),
            Err(error) => {
                tracing::warn!(%error, "Panel interaction rejected");
                Outcome::Rejected(self.reject(error, Some(target)))
            }
        }
    }

    /// Handle one pointer event on the canvas.
    pub fn pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        match event.phase {
            PointerPhase::Down => self.press(event.x, event.y),
            PointerPhase::Move => self.drag_to(event.x, event.y),
            PointerPhase::Up => self.release(event.x, event.y),
            PointerPhase::Cancel => self.cancel_drag(),
        }
    }

    fn press(&mut self, x: f32, y: f32) -> PointerOutcome {
        if self.drag.is_active() {
            return PointerOutcome::Ignored;
        }
        let Some(id) = self.canvas.element_at(x, y) else {
            self.selection = None;
            return PointerOutcome::Ignored;
        };
        let Some(transform) = self.canvas.element(id).map(|e| *e.transform()) else {
            return PointerOutcome::Ignored;
        };
        if let Err(error) = self.dispatcher.begin_gesture(&self.canvas) {
            tracing::warn!(%error, "Press ignored");
            return PointerOutcome::Ignored;
        }
        self.drag.press(id, transform, x, y);
        self.selection = Some(id);
        tracing::debug!(element = %id, x, y, "Drag started");
        PointerOutcome::Pressed(id)
    }

    fn drag_to(&mut self, x: f32, y: f32) -> PointerOutcome {
        let (width, height) = self.canvas.size_f32();
        let Some(id) = self.drag.element() else {
            return PointerOutcome::Ignored;
        };
        let Some(transform) = self.drag.drag_to(x, y, width, height) else {
            return PointerOutcome::Ignored;
        };
        match self.dispatch(&EditCommand::SetTransform { id, transform }) {
            Outcome::Applied(changes) => PointerOutcome::Dragging(changes),
            Outcome::Unchanged => PointerOutcome::Ignored,
            Outcome::Rejected(_) => {
                self.cancel_drag();
                PointerOutcome::Ignored
            }
        }
    }

    fn release(&mut self, x: f32, y: f32) -> PointerOutcome {
        if !self.drag.is_active() {
            return PointerOutcome::Ignored;
        }
        self.drag_to(x, y);
        match self.drag.release() {
            Some(DragOutcome::Moved(id)) => match self.dispatcher.end_gesture(&self.canvas) {
                Some(changes) => {
                    tracing::debug!(element = %id, "Drag finished");
                    PointerOutcome::Moved(changes)
                }
                None => PointerOutcome::Tapped(id),
            },
            Some(DragOutcome::Tap(id)) => {
                // A drag back to its start point still cleared the anchor.
                self.restore_gesture_start();
                PointerOutcome::Tapped(id)
            }
            None => {
                self.dispatcher.cancel_gesture();
                PointerOutcome::Ignored
            }
        }
    }

    fn cancel_drag(&mut self) -> PointerOutcome {
        self.drag.cancel();
        let Some(changes) = self.restore_gesture_start() else {
            return PointerOutcome::Ignored;
        };
        tracing::debug!("Drag cancelled");
        PointerOutcome::Cancelled(changes)
    }

    /// Drop the open gesture and put back the canvas it started from.
    fn restore_gesture_start(&mut self) -> Option<ChangeSet> {
        let start = self.dispatcher.cancel_gesture()?;
        let changes = ChangeSet::between(&self.canvas, &start);
        self.canvas = start;
        if !changes.is_empty() {
            self.changed(&changes);
        }
        Some(changes)
    }

    /// Bring selection and panel up to date and notify subscribers.
    fn changed(&mut self, changes: &ChangeSet) {
        if let Some(id) = self.selection {
            if self.canvas.element(id).is_none() {
                self.selection = None;
            }
        }
        if let Some(panel) = &mut self.panel {
            if let Err(error) = panel.refresh(&self.canvas) {
                tracing::info!(%error, "Closing panel for removed target");
                self.panel = None;
            }
        }
        for listener in &mut self.listeners {
            listener(changes);
        }
    }

    fn reject(&mut self, error: EditError, target: Option<Target>) -> Rejection {
        let stale = error.is_stale_target()
            && target.is_some()
            && self.panel.as_ref().map(ModeNavigator::target) == target;
        if stale {
            self.panel = None;
        }
        Rejection {
            error,
            close_panel: stale,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::change::Property;
    use crate::color::Color;
    use crate::navigator::ControlValue;

    fn session() -> EditSession {
        EditSession::new(EditorConfig::default()).expect("session")
    }

    #[test]
    fn test_add_text_uses_defaults_and_selects() {
        let mut session = session();
        assert!(session.add_text("Hello").is_applied());
        let id = session.selection().expect("selected");
        let element = session.canvas().element(id).expect("present");
        assert_eq!(*element.transform(), Transform::at(50.0, 50.0, 100.0, 40.0));
        assert_eq!(element.as_text().map(|t| t.content.as_str()), Some("Hello"));
    }

    #[test]
    fn test_listeners_see_every_change() {
        let mut session = session();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        session.subscribe(move |changes| sink.borrow_mut().push(changes.clone()));

        session.apply(&EditCommand::set_background_color(Color::RED));
        session.apply(&EditCommand::set_background_color(Color::RED));
        session.undo();
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert!(seen[1].contains(Target::Background, Property::Fill));
    }

    #[test]
    fn test_undo_redo_outcomes() {
        let mut session = session();
        assert!(matches!(session.undo(), HistoryOutcome::NothingToUndo));
        assert!(matches!(session.redo(), HistoryOutcome::NothingToRedo));
        session.add_text("a");
        assert!(matches!(session.undo(), HistoryOutcome::Restored(_)));
        assert!(session.canvas().is_empty());
        assert!(session.selection().is_none());
        assert!(matches!(session.redo(), HistoryOutcome::Restored(_)));
        assert_eq!(session.canvas().len(), 1);
    }

    #[test]
    fn test_removed_target_closes_panel() {
        let mut session = session();
        session.add_text("a");
        let id = session.selection().expect("selected");
        session
            .open_panel(ElementKind::Text, Target::Element(id))
            .expect("open");
        let before = session.canvas().clone();

        let removed = session.remove(id);
        assert!(removed.is_applied());
        assert!(session.panel().is_none());
        assert!(session.selection().is_none());

        session.undo();
        session
            .open_panel(ElementKind::Text, Target::Element(id))
            .expect("reopen");
        assert_eq!(session.canvas(), &before);
        let outcome = session.apply(&EditCommand::SetImageSource {
            id: ElementId::new(),
            source: "x".to_string(),
        });
        let Outcome::Rejected(rejection) = outcome else {
            panic!("expected rejection");
        };
        assert!(!rejection.close_panel);
        assert!(session.panel().is_some());
    }

    #[test]
    fn test_interact_without_panel() {
        let mut session = session();
        let Outcome::Rejected(rejection) = session.interact(ControlInput::Activate) else {
            panic!("expected rejection");
        };
        assert!(matches!(rejection.error, EditError::NoActivePanel));
        assert!(matches!(
            session.select_mode(&[Mode::Border]),
            Err(EditError::NoActivePanel)
        ));
    }

    #[test]
    fn test_panel_refreshes_after_undo() {
        let mut session = session();
        session
            .open_panel(ElementKind::Background, Target::Background)
            .expect("open");
        assert!(session.interact(ControlInput::Color(Color::BLUE)).is_applied());
        assert_eq!(
            session.panel().map(ModeNavigator::value),
            Some(&ControlValue::Swatch(Some(Color::BLUE)))
        );
        session.undo();
        assert_eq!(
            session.panel().map(ModeNavigator::value),
            Some(&ControlValue::Swatch(Some(Color::WHITE)))
        );
    }

    #[test]
    fn test_drag_is_one_undo_entry() {
        let mut session = session();
        session.add_text("drag me");
        let id = session.selection().expect("selected");
        let undo_before = session.history().undo_len();

        assert!(matches!(
            session.pointer(PointerEvent::down(60.0, 60.0)),
            PointerOutcome::Pressed(pressed) if pressed == id
        ));
        assert!(matches!(
            session.pointer(PointerEvent::moved(160.0, 60.0)),
            PointerOutcome::Dragging(_)
        ));
        assert!(matches!(
            session.undo(),
            HistoryOutcome::Rejected(Rejection {
                error: EditError::GestureInProgress,
                ..
            })
        ));
        session.pointer(PointerEvent::moved(260.0, 160.0));
        let PointerOutcome::Moved(changes) = session.pointer(PointerEvent::up(260.0, 160.0)) else {
            panic!("expected move");
        };
        assert!(changes.contains(Target::Element(id), Property::Transform));
        assert_eq!(session.history().undo_len(), undo_before + 1);
        let moved = *session.canvas().element(id).expect("present").transform();
        assert_eq!((moved.x, moved.y), (250.0, 150.0));

        session.undo();
        let back = *session.canvas().element(id).expect("present").transform();
        assert_eq!((back.x, back.y), (50.0, 50.0));
    }

    #[test]
    fn test_tap_records_nothing() {
        let mut session = session();
        session.add_text("tap");
        let id = session.selection().expect("selected");
        let undo_before = session.history().undo_len();
        session.pointer(PointerEvent::down(60.0, 60.0));
        assert!(matches!(
            session.pointer(PointerEvent::up(60.0, 60.0)),
            PointerOutcome::Tapped(tapped) if tapped == id
        ));
        assert_eq!(session.history().undo_len(), undo_before);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_cancel_restores_start() {
        let mut session = session();
        session.add_text("cancel");
        let before = session.canvas().clone();
        session.pointer(PointerEvent::down(60.0, 60.0));
        session.pointer(PointerEvent::moved(400.0, 400.0));
        assert_ne!(session.canvas(), &before);
        let cancel = PointerEvent::new(PointerPhase::Cancel, 400.0, 400.0, 0);
        assert!(matches!(session.pointer(cancel), PointerOutcome::Cancelled(_)));
        assert_eq!(session.canvas(), &before);
        assert!(matches!(session.redo(), HistoryOutcome::NothingToRedo));
    }

    #[test]
    fn test_press_on_empty_area_clears_selection() {
        let mut session = session();
        session.add_text("a");
        assert!(session.selection().is_some());
        assert!(matches!(
            session.pointer(PointerEvent::down(900.0, 900.0)),
            PointerOutcome::Ignored
        ));
        assert!(session.selection().is_none());
        assert!(session.select(Some(ElementId::new())).is_err());
    }
}
