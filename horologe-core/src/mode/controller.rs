//! Mode controller
//!
//! Refresh behavior is a function of the run state alone. Capability flags
//! only ever change how a frame looks, never when it is drawn.

use super::events::ModeEvent;

/// Display power mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayMode {
    /// Full-power display, refreshed every second
    #[default]
    Interactive,
    /// Low-power display, refreshed only by the host's minute tick
    Ambient,
}

impl DisplayMode {
    pub fn from_ambient(ambient: bool) -> Self {
        if ambient {
            DisplayMode::Ambient
        } else {
            DisplayMode::Interactive
        }
    }

    pub fn is_ambient(&self) -> bool {
        matches!(self, DisplayMode::Ambient)
    }
}

/// Device display capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapabilityFlags {
    /// Ambient mode has reduced color depth; anti-aliasing must be off
    pub low_bit_ambient: bool,
    /// Static elements should avoid burning into the panel
    pub burn_in_protection: bool,
}

impl CapabilityFlags {
    pub const fn new(low_bit_ambient: bool, burn_in_protection: bool) -> Self {
        Self {
            low_bit_ambient,
            burn_in_protection,
        }
    }
}

/// Visibility and mode of the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RunState {
    pub visible: bool,
    pub mode: DisplayMode,
}

impl RunState {
    /// Whether the periodic refresh timer should be running
    ///
    /// Only a visible, interactive surface ticks.
    pub fn should_run(&self) -> bool {
        self.visible && self.mode == DisplayMode::Interactive
    }

    /// Process an event and return the next run state
    pub fn transition(self, event: ModeEvent) -> Self {
        match event {
            ModeEvent::VisibilityChanged(visible) => Self { visible, ..self },
            ModeEvent::AmbientModeChanged(ambient) => Self {
                mode: DisplayMode::from_ambient(ambient),
                ..self
            },
        }
    }
}

/// Refresh timer state derived from [`RunState::should_run`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RefreshState {
    #[default]
    Stopped,
    Running,
}

impl RefreshState {
    pub fn from_should_run(should_run: bool) -> Self {
        if should_run {
            RefreshState::Running
        } else {
            RefreshState::Stopped
        }
    }
}

/// Before/after pair produced by a mode change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeTransition {
    pub previous: RunState,
    pub current: RunState,
}

impl ModeTransition {
    /// Check if the surface went from hidden to visible
    pub fn became_visible(&self) -> bool {
        !self.previous.visible && self.current.visible
    }

    /// Check if the refresh decision flipped
    pub fn run_changed(&self) -> bool {
        self.previous.should_run() != self.current.should_run()
    }
}

/// Owner of the run state and capability flags
///
/// The surface starts hidden and interactive, so refresh starts stopped.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    state: RunState,
    flags: CapabilityFlags,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a mode event
    pub fn apply(&mut self, event: ModeEvent) -> ModeTransition {
        let previous = self.state;
        self.state = previous.transition(event);
        let transition = ModeTransition {
            previous,
            current: self.state,
        };
        if transition.run_changed() {
            crate::debug!(
                "refresh {:?} -> {:?}",
                RefreshState::from_should_run(previous.should_run()),
                RefreshState::from_should_run(self.state.should_run())
            );
        }
        transition
    }

    /// Record a visibility change
    pub fn set_visible(&mut self, visible: bool) -> ModeTransition {
        self.apply(ModeEvent::VisibilityChanged(visible))
    }

    /// Record an ambient mode change
    pub fn set_ambient(&mut self, ambient: bool) -> ModeTransition {
        self.apply(ModeEvent::AmbientModeChanged(ambient))
    }

    /// Replace the capability flags
    ///
    /// Takes effect from the next frame built.
    pub fn set_capabilities(&mut self, low_bit_ambient: bool, burn_in_protection: bool) {
        self.flags = CapabilityFlags::new(low_bit_ambient, burn_in_protection);
    }

    pub fn should_run(&self) -> bool {
        self.state.should_run()
    }

    pub fn run_state(&self) -> RunState {
        self.state
    }

    pub fn mode(&self) -> DisplayMode {
        self.state.mode
    }

    pub fn is_visible(&self) -> bool {
        self.state.visible
    }

    pub fn flags(&self) -> CapabilityFlags {
        self.flags
    }

    /// Whether text should currently be anti-aliased
    pub fn anti_alias(&self) -> bool {
        !(self.flags.low_bit_ambient && self.state.mode.is_ambient())
    }
}
