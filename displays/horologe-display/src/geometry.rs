//! Surface and text geometry

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Integer rectangle in surface pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Create a rectangle from its edges
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle anchored at the origin
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Check if the rectangle has no area
    pub const fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }
}

/// Measured extent of a run of text
///
/// `left` is the offset of the first inked pixel from the drawing origin,
/// which is not always zero for proportional typefaces.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextBounds {
    pub left: f32,
    pub width: f32,
    pub height: f32,
}

impl TextBounds {
    pub const EMPTY: Self = Self {
        left: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// X origin that centers this text horizontally within `surface_width`
    pub fn centered_x(&self, surface_width: f32) -> f32 {
        surface_width / 2.0 - self.width / 2.0 - self.left
    }
}
