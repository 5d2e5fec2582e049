//! Host event bus
//!
//! Routes asynchronous host notifications into a state update, a redraw
//! request, or both. None of these events may start or stop the refresh
//! timer; only visibility and ambient changes do that, through the mode
//! controller.

use crate::mode::CapabilityFlags;

/// Phase of a tap gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapType {
    /// Finger went down
    Start,
    /// Gesture turned into something else or was abandoned
    Cancel,
    /// Tap completed
    Complete,
}

// Host tap codes
const TAP_TYPE_TOUCH: i32 = 0;
const TAP_TYPE_TOUCH_CANCEL: i32 = 1;
const TAP_TYPE_TAP: i32 = 2;

impl TapType {
    /// Parse a host tap code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            TAP_TYPE_TOUCH => Some(TapType::Start),
            TAP_TYPE_TOUCH_CANCEL => Some(TapType::Cancel),
            TAP_TYPE_TAP => Some(TapType::Complete),
            _ => None,
        }
    }

    pub fn to_code(self) -> i32 {
        match self {
            TapType::Start => TAP_TYPE_TOUCH,
            TapType::Cancel => TAP_TYPE_TOUCH_CANCEL,
            TapType::Complete => TAP_TYPE_TAP,
        }
    }
}

/// Notifications that never touch the refresh decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// System timezone changed
    TimezoneChanged,
    /// Display capabilities reported
    PropertiesChanged(CapabilityFlags),
    /// Tap gesture phase at surface coordinates
    Tap {
        tap: TapType,
        x: i32,
        y: i32,
        event_time: i64,
    },
    /// Host's once-per-minute tick while ambient
    TimeTick,
}

/// What handling an event amounts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// New capability flags for the mode controller
    pub capabilities: Option<CapabilityFlags>,
    /// Re-read the system timezone
    pub refresh_timezone: bool,
    /// Request one redraw
    pub redraw: bool,
}

impl HostEvent {
    /// Route this event
    pub fn route(self) -> Dispatch {
        match self {
            HostEvent::TimezoneChanged => Dispatch {
                refresh_timezone: true,
                redraw: true,
                ..Dispatch::default()
            },
            HostEvent::PropertiesChanged(flags) => Dispatch {
                capabilities: Some(flags),
                ..Dispatch::default()
            },
            HostEvent::Tap { tap, .. } => Dispatch {
                // Only a finished gesture is worth a frame
                redraw: tap == TapType::Complete,
                ..Dispatch::default()
            },
            HostEvent::TimeTick => Dispatch {
                redraw: true,
                ..Dispatch::default()
            },
        }
    }

    /// Check if this event came from the user
    pub fn is_user_event(&self) -> bool {
        matches!(self, HostEvent::Tap { .. })
    }
}
