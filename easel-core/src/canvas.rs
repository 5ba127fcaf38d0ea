//! The canvas: background layer plus elements in paint order.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::element::{BackgroundLayer, Element, ElementId};
use crate::error::{EditError, EditResult};

/// A composition being edited.
///
/// Reads are public. Mutation is reserved to the dispatcher, so every change
/// to a live canvas goes through a validated [`crate::EditCommand`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    width: u32,
    height: u32,
    background: BackgroundLayer,
    /// Paint order: index 0 is drawn first.
    elements: Vec<Element>,
    #[serde(default)]
    border_size: f32,
    #[serde(default)]
    border_color: Color,
}

impl Canvas {
    /// Create an empty canvas with a solid background.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::InvalidCanvasSize`] if either dimension is zero.
    pub fn new(width: u32, height: u32, background: Color) -> EditResult<Self> {
        check_size(width, height)?;
        Ok(Self {
            width,
            height,
            background: BackgroundLayer::solid(background),
            elements: Vec::new(),
            border_size: 0.0,
            border_color: Color::BLACK,
        })
    }

    pub(crate) fn from_parts(
        width: u32,
        height: u32,
        background: BackgroundLayer,
        elements: Vec<Element>,
        border_size: f32,
        border_color: Color,
    ) -> Self {
        Self {
            width,
            height,
            background,
            elements,
            border_size,
            border_color,
        }
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Size as floating point, for layout math.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn size_f32(&self) -> (f32, f32) {
        (self.width as f32, self.height as f32)
    }

    /// The background layer.
    #[must_use]
    pub const fn background(&self) -> &BackgroundLayer {
        &self.background
    }

    /// Width of the frame drawn around the whole canvas.
    #[must_use]
    pub const fn border_size(&self) -> f32 {
        self.border_size
    }

    /// Color of the frame drawn around the whole canvas.
    #[must_use]
    pub const fn border_color(&self) -> Color {
        self.border_color
    }

    /// All elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Paint-order index of an element.
    #[must_use]
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Find the element at the given canvas coordinates.
    /// Returns the ID of the topmost (last painted) element containing the point.
    #[must_use]
    pub fn element_at(&self, x: f32, y: f32) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|e| e.contains_point(x, y))
            .map(Element::id)
    }

    /// Get the number of elements on the canvas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if the canvas has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Check dimensions, id uniqueness and every carried value.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> EditResult<()> {
        check_size(self.width, self.height)?;
        self.background.validate()?;
        if !self.border_size.is_finite() || self.border_size < 0.0 {
            return Err(EditError::invalid(
                "canvas border",
                format!("size must be >= 0, got {}", self.border_size),
            ));
        }
        let mut seen = HashSet::with_capacity(self.elements.len());
        for element in &self.elements {
            if !seen.insert(element.id()) {
                return Err(EditError::DuplicateElement(element.id()));
            }
            element.validate()?;
        }
        Ok(())
    }

    /// Serialize the canvas to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> EditResult<String> {
        serde_json::to_string(self).map_err(EditError::Serialization)
    }

    /// Deserialize and validate a canvas from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the canvas is invalid.
    pub fn from_json(json: &str) -> EditResult<Self> {
        let canvas: Self = serde_json::from_str(json)?;
        canvas.validate()?;
        Ok(canvas)
    }

    pub(crate) fn background_mut(&mut self) -> &mut BackgroundLayer {
        &mut self.background
    }

    pub(crate) fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    pub(crate) fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    /// Append on top of the paint order.
    pub(crate) fn insert_element(&mut self, element: Element) -> EditResult<()> {
        if self.element(element.id()).is_some() {
            return Err(EditError::DuplicateElement(element.id()));
        }
        self.elements.push(element);
        Ok(())
    }

    pub(crate) fn remove_element(&mut self, id: ElementId) -> EditResult<Element> {
        let index = self.index_of(id).ok_or(EditError::UnknownElement(id))?;
        Ok(self.elements.remove(index))
    }

    /// Move an element to `index` in paint order, clamped to the top.
    pub(crate) fn move_element(&mut self, id: ElementId, index: usize) -> EditResult<()> {
        let element = self.remove_element(id)?;
        let index = index.min(self.elements.len());
        self.elements.insert(index, element);
        Ok(())
    }

    pub(crate) fn set_size(&mut self, width: u32, height: u32) -> EditResult<()> {
        check_size(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    pub(crate) fn set_border(&mut self, size: f32, color: Color) {
        self.border_size = size;
        self.border_color = color;
    }
}

fn check_size(width: u32, height: u32) -> EditResult<()> {
    if width == 0 || height == 0 {
        return Err(EditError::InvalidCanvasSize { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{TextElement, Transform};
    use crate::style::TextStyle;

    fn text_at(x: f32, y: f32) -> Element {
        TextElement::new("Hello", TextStyle::default(), Transform::at(x, y, 100.0, 40.0)).into()
    }

    #[test]
    fn test_canvas_new_rejects_zero_size() {
        assert!(matches!(
            Canvas::new(0, 100, Color::WHITE),
            Err(EditError::InvalidCanvasSize { width: 0, height: 100 })
        ));
        let canvas = Canvas::new(1080, 1080, Color::WHITE).expect("valid canvas");
        assert!(canvas.is_empty());
        assert_eq!(canvas.background().fill.color(), Some(Color::WHITE));
    }

    #[test]
    fn test_canvas_insert_remove() {
        let mut canvas = Canvas::new(800, 600, Color::WHITE).expect("canvas");
        let element = text_at(10.0, 10.0);
        let id = element.id();
        canvas.insert_element(element.clone()).expect("insert");
        assert_eq!(canvas.len(), 1);
        assert!(matches!(
            canvas.insert_element(element),
            Err(EditError::DuplicateElement(_))
        ));
        canvas.remove_element(id).expect("remove");
        assert!(canvas.is_empty());
        assert!(matches!(
            canvas.remove_element(id),
            Err(EditError::UnknownElement(_))
        ));
    }

    #[test]
    fn test_canvas_element_at_prefers_topmost() {
        let mut canvas = Canvas::new(800, 600, Color::WHITE).expect("canvas");
        let bottom = text_at(0.0, 0.0);
        let top = text_at(50.0, 20.0);
        let (bottom_id, top_id) = (bottom.id(), top.id());
        canvas.insert_element(bottom).expect("insert");
        canvas.insert_element(top).expect("insert");

        assert_eq!(canvas.element_at(60.0, 30.0), Some(top_id));
        assert_eq!(canvas.element_at(10.0, 10.0), Some(bottom_id));
        assert_eq!(canvas.element_at(700.0, 500.0), None);

        canvas.move_element(top_id, 0).expect("reorder");
        assert_eq!(canvas.element_at(60.0, 30.0), Some(bottom_id));
        assert_eq!(canvas.index_of(top_id), Some(0));
    }

    #[test]
    fn test_canvas_json_round_trip() {
        let mut canvas = Canvas::new(1080, 1920, Color::BLUE).expect("canvas");
        canvas.insert_element(text_at(5.0, 5.0)).expect("insert");
        let json = canvas.to_json().expect("serialize");
        let back = Canvas::from_json(&json).expect("deserialize");
        assert_eq!(back, canvas);
    }

    #[test]
    fn test_canvas_from_json_validates() {
        let canvas = Canvas::new(100, 100, Color::WHITE).expect("canvas");
        let json = canvas.to_json().expect("serialize").replace("\"width\":100", "\"width\":0");
        assert!(matches!(
            Canvas::from_json(&json),
            Err(EditError::InvalidCanvasSize { .. })
        ));
    }
}
