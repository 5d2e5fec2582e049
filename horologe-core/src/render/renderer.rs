//! Frame renderer

use core::fmt::Write;

use heapless::String;
use horologe_display::{Color, DisplayError, DrawSurface, Paint, Rect, TextMeasure};

use super::names::{day_of_week, month_of_year};
use crate::config::{Element, FaceStyle, SurfaceShape};
use crate::mode::{CapabilityFlags, DisplayMode};
use crate::snapshot::{BatterySnapshot, TimeSnapshot};

/// Maximum length of one text element
pub const TEXT_LEN: usize = 32;

/// Everything a frame depends on, captured at draw time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub time: TimeSnapshot,
    pub battery: BatterySnapshot,
    pub mode: DisplayMode,
    pub flags: CapabilityFlags,
}

/// Background of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Background {
    /// Flood the whole surface
    Clear(Color),
    /// Fill the frame bounds
    Fill(Rect, Color),
}

/// One positioned run of text
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TextOp {
    pub element: Element,
    pub text: String<TEXT_LEN>,
    /// Left edge of the text (px)
    pub x: f32,
    /// Baseline (px)
    pub y: f32,
    pub paint: Paint,
}

/// Drawing instructions for one frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DrawInstructions {
    pub background: Background,
    /// Time, date and battery, in that order
    pub texts: [TextOp; 3],
}

impl DrawInstructions {
    /// Instruction for one element
    pub fn text(&self, element: Element) -> &TextOp {
        match element {
            Element::Time => &self.texts[0],
            Element::Date => &self.texts[1],
            Element::Battery => &self.texts[2],
        }
    }

    /// Replay the instructions onto a surface
    ///
    /// Empty text runs ink nothing and are skipped. A failed step does not
    /// stop the rest of the frame; the first error is returned.
    pub fn draw<S: DrawSurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        let mut first_error = match self.background {
            Background::Clear(color) => surface.fill(color),
            Background::Fill(rect, color) => surface.fill_rect(rect, color),
        }
        .err();
        for op in self.texts.iter().filter(|op| !op.text.is_empty()) {
            if let Err(e) = surface.draw_text(&op.text, op.x, op.y, &op.paint) {
                crate::debug!("{:?} not drawn: {:?}", op.element, e);
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

/// Time as `H:MM`, H being the hour of the half-day
pub fn time_text(time: &TimeSnapshot, mode: DisplayMode) -> String<TEXT_LEN> {
    let mut text = String::new();
    // Seconds are not shown in either mode
    match mode {
        DisplayMode::Interactive | DisplayMode::Ambient => {
            let _ = write!(text, "{}:{:02}", time.hour_of_half_day(), time.minute);
        }
    }
    text
}

/// Date as `<DayName>, <MonthName> <DD>`
pub fn date_text(time: &TimeSnapshot) -> String<TEXT_LEN> {
    let mut text = String::new();
    let _ = write!(
        text,
        "{}, {} {:02}",
        day_of_week(time.day_of_week.into()),
        month_of_year(time.month.into()),
        time.day_of_month
    );
    text
}

/// Battery as `<level>%`; empty while ambient or when the level is unknown
pub fn battery_text(battery: &BatterySnapshot, mode: DisplayMode) -> String<TEXT_LEN> {
    let mut text = String::new();
    if mode == DisplayMode::Interactive {
        if let Some(percent) = battery.percent() {
            let _ = write!(text, "{}%", percent);
        }
    }
    text
}

/// Stateless face renderer
#[derive(Debug, Clone)]
pub struct Renderer {
    style: FaceStyle,
}

impl Renderer {
    pub fn new(style: FaceStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &FaceStyle {
        &self.style
    }

    /// Build the instructions for a frame drawn into `bounds`
    ///
    /// Each element is centered on its own measured width; its baseline is
    /// the fixed offset from the style.
    pub fn render<M: TextMeasure>(
        &self,
        frame: &Frame,
        bounds: Rect,
        shape: SurfaceShape,
        measure: &M,
    ) -> DrawInstructions {
        let anti_alias = !(frame.flags.low_bit_ambient && frame.mode.is_ambient());

        let background = match frame.mode {
            DisplayMode::Ambient => Background::Clear(self.style.ambient_background),
            DisplayMode::Interactive => Background::Fill(bounds, self.style.background),
        };

        let place = |element: Element, text: String<TEXT_LEN>| {
            let style = self.style.element(element);
            let paint = style.paint(frame.mode, shape, anti_alias);
            let measured = measure.text_bounds(&text, &paint);
            TextOp {
                element,
                x: bounds.left as f32 + measured.centered_x(bounds.width() as f32),
                y: bounds.top as f32 + style.y_offset,
                text,
                paint,
            }
        };

        DrawInstructions {
            background,
            texts: [
                place(Element::Time, time_text(&frame.time, frame.mode)),
                place(Element::Date, date_text(&frame.time)),
                place(
                    Element::Battery,
                    battery_text(&frame.battery, frame.mode),
                ),
            ],
        }
    }
}
