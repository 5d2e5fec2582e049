//! Text style of the face elements

use core::fmt;

use horologe_display::{Color, Paint};

use crate::mode::DisplayMode;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Screen outline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SurfaceShape {
    #[default]
    Square,
    Round,
}

impl SurfaceShape {
    pub fn from_round(is_round: bool) -> Self {
        if is_round {
            SurfaceShape::Round
        } else {
            SurfaceShape::Square
        }
    }
}

/// Text elements of the face, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Element {
    Time,
    Date,
    Battery,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Element::Time => "time",
            Element::Date => "date",
            Element::Battery => "battery",
        })
    }
}

/// Style of one text element
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementStyle {
    /// Text color while interactive
    pub color: Color,
    /// Text color while ambient
    pub ambient_color: Color,
    /// Text size on square screens (px)
    pub text_size: f32,
    /// Text size on round screens (px)
    pub text_size_round: f32,
    /// Baseline position from the top of the surface (px)
    pub y_offset: f32,
}

impl ElementStyle {
    pub const fn new(color: Color, text_size: f32, text_size_round: f32, y_offset: f32) -> Self {
        Self {
            color,
            ambient_color: Color::WHITE,
            text_size,
            text_size_round,
            y_offset,
        }
    }

    pub const fn with_ambient_color(mut self, color: Color) -> Self {
        self.ambient_color = color;
        self
    }

    pub fn text_size_for(&self, shape: SurfaceShape) -> f32 {
        match shape {
            SurfaceShape::Square => self.text_size,
            SurfaceShape::Round => self.text_size_round,
        }
    }

    /// Paint for this element in the given mode and shape
    pub fn paint(&self, mode: DisplayMode, shape: SurfaceShape, anti_alias: bool) -> Paint {
        let color = match mode {
            DisplayMode::Interactive => self.color,
            DisplayMode::Ambient => self.ambient_color,
        };
        Paint::new(color, self.text_size_for(shape)).with_anti_alias(anti_alias)
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self::new(Color::WHITE, 24.0, 26.0, 0.0)
    }
}

/// Style of the whole face
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceStyle {
    /// Background fill while interactive
    pub background: Color,
    /// Background while ambient
    pub ambient_background: Color,
    pub time: ElementStyle,
    pub date: ElementStyle,
    pub battery: ElementStyle,
}

impl FaceStyle {
    pub fn element(&self, element: Element) -> &ElementStyle {
        match element {
            Element::Time => &self.time,
            Element::Date => &self.date,
            Element::Battery => &self.battery,
        }
    }

    pub fn background_for(&self, mode: DisplayMode) -> Color {
        match mode {
            DisplayMode::Interactive => self.background,
            DisplayMode::Ambient => self.ambient_background,
        }
    }
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self {
            background: Color::from_argb(0xFF, 0x10, 0x1C, 0x2C),
            ambient_background: Color::BLACK,
            time: ElementStyle::new(Color::WHITE, 48.0, 52.0, 120.0),
            date: ElementStyle::new(Color::from_argb(0xFF, 0xB0, 0xBE, 0xC5), 20.0, 22.0, 160.0)
                .with_ambient_color(Color::GRAY),
            battery: ElementStyle::new(Color::from_argb(0xFF, 0x8B, 0xC3, 0x4A), 18.0, 20.0, 200.0),
        }
    }
}
