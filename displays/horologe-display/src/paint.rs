//! Colors and text paints

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 32-bit ARGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0xFF00_0000);
    pub const WHITE: Color = Color(0xFFFF_FFFF);
    pub const GRAY: Color = Color(0xFF88_8888);

    /// Build a color from its channels
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Color((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }
}

/// How a run of text is drawn
///
/// Paints are plain values. A face never mutates a shared paint; it builds
/// the paint for each frame from its style and the current mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Paint {
    /// Text color
    pub color: Color,
    /// Text size in pixels
    pub text_size: f32,
    /// Whether glyph edges are smoothed
    pub anti_alias: bool,
}

impl Paint {
    pub const fn new(color: Color, text_size: f32) -> Self {
        Self {
            color,
            text_size,
            anti_alias: true,
        }
    }

    /// Same paint with anti-aliasing switched on or off
    pub const fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}
