//! Face configuration

use super::style::{Element, FaceStyle, SurfaceShape};
use crate::scheduler::INTERACTIVE_UPDATE_RATE_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Interactive refresh period of zero
    #[error("interactive update rate must be non-zero")]
    ZeroUpdateRate,
    /// Text size that is zero, negative or not a number
    #[error("{element} text size must be positive")]
    InvalidTextSize { element: Element },
}

/// Complete face configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    /// Refresh period while visible and interactive (ms)
    pub interactive_update_rate_ms: u32,
    pub style: FaceStyle,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            interactive_update_rate_ms: INTERACTIVE_UPDATE_RATE_MS,
            style: FaceStyle::default(),
        }
    }
}

impl FaceConfig {
    /// Check the configuration for values the face cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interactive_update_rate_ms == 0 {
            return Err(ConfigError::ZeroUpdateRate);
        }
        for element in [Element::Time, Element::Date, Element::Battery] {
            let style = self.style.element(element);
            for shape in [SurfaceShape::Square, SurfaceShape::Round] {
                // Written so NaN fails too
                if !(style.text_size_for(shape) > 0.0) {
                    return Err(ConfigError::InvalidTextSize { element });
                }
            }
        }
        Ok(())
    }
}
