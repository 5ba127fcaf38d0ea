//! # Easel Core
//!
//! Editing core for a single-page visual composition canvas.
//! Holds no rendering code; hosts draw from the exported document.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │                  easel-core                   │
//! ├───────────────────────────────────────────────┤
//! │  Property model    │  Editing                 │
//! │  - Color, Opacity  │  - EditCommand           │
//! │  - Border, Shadow  │  - Dispatcher + History  │
//! │  - Text, Image     │  - ChangeSet             │
//! ├───────────────────────────────────────────────┤
//! │  Panels            │  Session                 │
//! │  - Mode trees      │  - Pointer drags         │
//! │  - Controls        │  - Change listeners      │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is an [`EditCommand`]. [`dispatch::apply`] is pure; the
//! [`Dispatcher`] adds undo/redo on top, and [`EditSession`] ties commands,
//! panels and pointer input together.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod canvas;
pub mod change;
pub mod color;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod gesture;
pub mod history;
pub mod navigator;
pub mod presets;
pub mod schema;
pub mod session;
pub mod style;
pub mod texture;

pub use canvas::Canvas;
pub use change::{Change, ChangeSet, Property, Target};
pub use color::{Color, Gradient, GradientDirection, GRADIENT_PRESETS, SWATCHES};
pub use command::EditCommand;
pub use config::{EditorConfig, ImageDefaults, TextDefaults};
pub use dispatch::{Applied, Dispatcher};
pub use element::{
    Anchor, AnchorEdge, AspectRatio, BackgroundLayer, Crop, CropShape, Element, ElementId,
    ElementKind, HorizontalAnchor, ImageElement, ImageTint, TextElement, Transform, VerticalAnchor,
};
pub use error::{EditError, EditResult};
pub use gesture::{clamp_position, DragOutcome, DragTracker, PointerEvent, PointerPhase};
pub use history::History;
pub use navigator::{Control, ControlInput, ControlValue, Mode, ModeNavigator};
pub use presets::{find_preset, CanvasPreset, PresetCategory, PRESETS};
pub use schema::{CanvasDocument, LayerDocument};
pub use session::{EditSession, HistoryOutcome, Outcome, PointerOutcome, Rejection};
pub use style::{
    Border, BorderPaint, Direction, Fill, Opacity, ScaleMode, Shadow, ShadowSpec, TextAlignment,
    TextCase, TextFill, TextStyle,
};
pub use texture::{Media, MediaQuery, TextureReference};

/// Easel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
