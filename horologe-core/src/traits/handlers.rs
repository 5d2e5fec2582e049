//! Handler traits a face implements
//!
//! Hosts deliver their callbacks through these instead of subclassing a
//! host engine type. All callbacks run serially on one logical thread.

use horologe_display::{DrawSurface, Rect};

use crate::events::TapType;

/// Surface lifecycle
pub trait LifecycleHandler {
    /// Surface created; collaborators are ready
    fn on_create(&mut self);

    /// Surface torn down; must release the timer and any subscription
    fn on_destroy(&mut self);
}

/// Visibility, mode and environment notifications
pub trait ModeObserver {
    fn on_visibility_changed(&mut self, visible: bool);

    fn on_ambient_mode_changed(&mut self, ambient: bool);

    fn on_properties_changed(&mut self, low_bit_ambient: bool, burn_in_protection: bool);

    /// Screen shape became known
    fn on_apply_window_insets(&mut self, is_round: bool);

    /// Host's once-per-minute tick while ambient
    fn on_time_tick(&mut self);

    /// System timezone changed
    fn on_timezone_changed(&mut self);
}

/// Tap gestures
pub trait TapHandler {
    fn on_tap_command(&mut self, tap: TapType, x: i32, y: i32, event_time: i64);
}

/// Frame drawing
pub trait Drawable {
    /// Draw the current frame onto `surface`, filling `bounds`
    fn on_draw<S: DrawSurface>(&mut self, surface: &mut S, bounds: Rect);
}
