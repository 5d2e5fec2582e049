//! Configuration types
//!
//! Immutable face configuration: refresh period and the text style of each
//! element. Hosts may load it from a file with the `serde` feature.

pub mod style;
pub mod types;

pub use style::{Element, ElementStyle, FaceStyle, SurfaceShape};
pub use types::{ConfigError, FaceConfig};
