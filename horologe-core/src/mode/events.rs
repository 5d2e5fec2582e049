//! Events that change the run state

/// Host notifications that may flip the refresh decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModeEvent {
    /// Surface became visible (`true`) or hidden (`false`)
    VisibilityChanged(bool),
    /// Surface entered (`true`) or left (`false`) ambient mode
    AmbientModeChanged(bool),
}

impl ModeEvent {
    /// Check if this event concerns visibility
    pub fn is_visibility(&self) -> bool {
        matches!(self, ModeEvent::VisibilityChanged(_))
    }

    /// Check if this event shows the surface
    pub fn is_shown(&self) -> bool {
        matches!(self, ModeEvent::VisibilityChanged(true))
    }
}
