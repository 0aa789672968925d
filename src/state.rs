//! Enable/brightness state machine

/// Whether the display accepts drawing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PowerState {
    /// Brightness is zero; every draw is dropped
    Disabled,
    /// Brightness is nonzero
    Enabled,
}

impl PowerState {
    /// State implied by a brightness level
    pub const fn for_brightness(level: u8) -> Self {
        if level > 0 {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

/// Mutable runtime state owned by the display
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeState {
    brightness: u8,
    power: PowerState,
}

impl RuntimeState {
    /// Start at the configured brightness
    pub const fn new(brightness: u8) -> Self {
        Self {
            brightness,
            power: PowerState::for_brightness(brightness),
        }
    }

    /// Apply a brightness change, returning the new state
    pub fn set_brightness(&mut self, level: u8) -> PowerState {
        let next = PowerState::for_brightness(level);
        if next != self.power {
            log::debug!("power state {:?} -> {:?}", self.power, next);
        }
        self.brightness = level;
        self.power = next;
        next
    }

    /// Current brightness
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Current power state
    pub const fn power(&self) -> PowerState {
        self.power
    }

    /// Whether drawing is allowed
    pub const fn is_enabled(&self) -> bool {
        matches!(self.power, PowerState::Enabled)
    }
}
