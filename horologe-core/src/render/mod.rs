//! Frame rendering
//!
//! Turns a time/battery/mode snapshot into positioned text and a background
//! fill. Stateless apart from the immutable style it is built with.

pub mod names;
pub mod renderer;

pub use names::{day_of_week, month_of_year};
pub use renderer::{
    battery_text, date_text, time_text, Background, DrawInstructions, Frame, Renderer, TextOp,
    TEXT_LEN,
};
