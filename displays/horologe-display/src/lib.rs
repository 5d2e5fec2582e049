//! Drawing surface abstraction for Horologe watch faces
//!
//! This crate provides:
//! - `DrawSurface` trait for whatever the host draws onto (canvas, framebuffer)
//! - `TextMeasure` trait for measuring text the way the host's typeface would
//! - `Color`, `Paint` and `Rect` value types shared by faces and backends
//! - `TextCanvas`, a character-grid surface for terminals and tests
//!
//! # Architecture
//!
//! Glyph rasterization never happens here. A face produces positioned text
//! and fills, and the backend decides how to turn them into pixels. The
//! character grid backend simply snaps every text run to a cell.

#![no_std]

pub mod backend;
pub mod canvas;
pub mod geometry;
pub mod paint;

// Re-export key types
pub use backend::{DisplayError, DrawSurface, TextMeasure};
pub use canvas::{TextCanvas, CANVAS_COLS, CANVAS_ROWS};
pub use geometry::{Rect, TextBounds};
pub use paint::{Color, Paint};
