//! Change sets: which parts of a canvas differ between two states.
//!
//! The UI redraws from a [`ChangeSet`] instead of re-reading the whole
//! canvas. Change sets are computed structurally, so an applied command, an
//! undo and a redo all report their effects the same way.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::element::{Element, ElementId};

/// The object a command or change refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum Target {
    /// Canvas dimensions and frame.
    Canvas,
    /// The background layer.
    Background,
    /// One text or image element.
    Element(ElementId),
}

/// A mutable property of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Canvas width or height.
    Size,
    /// Canvas frame size or color.
    Frame,
    /// Background paint.
    Fill,
    /// Background border.
    Border,
    /// Background or element opacity.
    Opacity,
    /// Background scale amount or mode.
    Scale,
    /// Background blur.
    Blur,
    /// Background blend color.
    Blend,
    /// Element position, size, rotation or flip.
    Transform,
    /// Element shadow.
    Shadow,
    /// Element snap position.
    Anchor,
    /// Text content.
    Content,
    /// Text typography.
    TextStyle,
    /// Image source.
    Source,
    /// Image color overlay.
    Tint,
    /// Image crop.
    Crop,
    /// Paint order.
    Order,
    /// The element appeared.
    Added,
    /// The element disappeared.
    Removed,
}

/// One changed property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    /// What changed.
    pub target: Target,
    /// Which property of it.
    pub property: Property,
}

/// The set of properties that differ between two canvases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    /// Diff two canvases.
    #[must_use]
    pub fn between(before: &Canvas, after: &Canvas) -> Self {
        let mut set = Self::default();

        if before.width() != after.width() || before.height() != after.height() {
            set.push(Target::Canvas, Property::Size);
        }
        if before.border_size().total_cmp(&after.border_size()).is_ne()
            || before.border_color() != after.border_color()
        {
            set.push(Target::Canvas, Property::Frame);
        }

        let (old, new) = (before.background(), after.background());
        let background = [
            (old.fill != new.fill, Property::Fill),
            (old.border != new.border, Property::Border),
            (old.opacity != new.opacity, Property::Opacity),
            (
                old.scale_mode != new.scale_mode || old.scale_percent != new.scale_percent,
                Property::Scale,
            ),
            (old.blur_radius.total_cmp(&new.blur_radius).is_ne(), Property::Blur),
            (old.blend != new.blend, Property::Blend),
        ];
        for (changed, property) in background {
            if changed {
                set.push(Target::Background, property);
            }
        }

        let old_by_id: HashMap<ElementId, &Element> =
            before.elements().iter().map(|e| (e.id(), e)).collect();
        let new_by_id: HashMap<ElementId, &Element> =
            after.elements().iter().map(|e| (e.id(), e)).collect();

        for element in before.elements() {
            if !new_by_id.contains_key(&element.id()) {
                set.push(Target::Element(element.id()), Property::Removed);
            }
        }
        for element in after.elements() {
            match old_by_id.get(&element.id()) {
                None => set.push(Target::Element(element.id()), Property::Added),
                Some(previous) => set.diff_element(previous, element),
            }
        }

        // Order is compared among the elements present in both states, so an
        // add or remove alone does not report every other element as moved.
        let old_order: Vec<ElementId> = before
            .elements()
            .iter()
            .map(Element::id)
            .filter(|id| new_by_id.contains_key(id))
            .collect();
        let new_order: Vec<ElementId> = after
            .elements()
            .iter()
            .map(Element::id)
            .filter(|id| old_by_id.contains_key(id))
            .collect();
        for (old_id, new_id) in old_order.iter().zip(&new_order) {
            if old_id != new_id {
                set.push(Target::Element(*new_id), Property::Order);
            }
        }

        set
    }

    fn diff_element(&mut self, before: &Element, after: &Element) {
        let target = Target::Element(after.id());
        if before.kind() != after.kind() {
            self.push(target, Property::Removed);
            self.push(target, Property::Added);
            return;
        }
        if before.transform() != after.transform() {
            self.push(target, Property::Transform);
        }
        if before.opacity() != after.opacity() {
            self.push(target, Property::Opacity);
        }
        if before.shadow() != after.shadow() {
            self.push(target, Property::Shadow);
        }
        if before.anchor() != after.anchor() {
            self.push(target, Property::Anchor);
        }
        match (before, after) {
            (Element::Text(old), Element::Text(new)) => {
                if old.content != new.content {
                    self.push(target, Property::Content);
                }
                if old.style != new.style {
                    self.push(target, Property::TextStyle);
                }
            }
            (Element::Image(old), Element::Image(new)) => {
                if old.source != new.source {
                    self.push(target, Property::Source);
                }
                if old.tint != new.tint {
                    self.push(target, Property::Tint);
                }
                if old.crop != new.crop {
                    self.push(target, Property::Crop);
                }
            }
            _ => {}
        }
    }

    fn push(&mut self, target: Target, property: Property) {
        self.changes.push(Change { target, property });
    }

    /// Whether nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changed properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// All changes.
    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }

    /// Whether any property of `target` changed.
    #[must_use]
    pub fn touches(&self, target: Target) -> bool {
        self.changes.iter().any(|c| c.target == target)
    }

    /// Whether `property` of `target` changed.
    #[must_use]
    pub fn contains(&self, target: Target, property: Property) -> bool {
        self.changes
            .iter()
            .any(|c| c.target == target && c.property == property)
    }
}

impl<'a> IntoIterator for &'a ChangeSet {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.iter()
    }
}
