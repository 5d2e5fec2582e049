//! Host abstraction traits
//!
//! These traits define the interface between the face logic and whatever
//! host runs it: the collaborators the face consumes (timer, clock,
//! timezone, battery, redraw) and the handler set the face implements.

pub mod handlers;
pub mod host;
pub mod timer;

pub use handlers::{Drawable, LifecycleHandler, ModeObserver, TapHandler};
pub use host::{BatterySource, Clock, Platform, RedrawSink, TimezoneSource};
pub use timer::{Timer, TimerHandle};
