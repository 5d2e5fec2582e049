//! Drawing surface traits
//!
//! Defines the interface between a face and whatever it draws onto.

use crate::geometry::{Rect, TextBounds};
use crate::paint::{Color, Paint};

/// Drawing surface errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Surface is not attached or was already released
    NotAttached,
    /// Coordinates fall outside the surface
    InvalidCoordinates,
    /// Text contained characters the backend cannot draw
    UnsupportedText,
    /// Backend-specific failure
    Backend,
}

/// Text measuring
///
/// Implementations answer with the bounds the host typeface would ink for
/// `text` at the paint's size. Measuring never fails; unknown glyphs simply
/// measure as whatever the backend would draw for them.
pub trait TextMeasure {
    /// Measure a run of text drawn with `paint`
    fn text_bounds(&self, text: &str, paint: &Paint) -> TextBounds;
}

/// Drawing surface trait
///
/// Provides a host-agnostic interface for the handful of operations a
/// digital face needs. Coordinates are surface pixels; text is drawn with
/// its baseline at `y`.
pub trait DrawSurface: TextMeasure {
    /// Flood the whole surface with a color
    fn fill(&mut self, color: Color) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DisplayError>;

    /// Draw text with its left edge at `x` and its baseline at `y`
    fn draw_text(&mut self, text: &str, x: f32, y: f32, paint: &Paint)
        -> Result<(), DisplayError>;

    /// Current clip bounds of the surface
    fn clip_bounds(&self) -> Rect;
}
