//! USB link tracking and status LED policy.
//!
//! Blink pattern:
//! - 250 ms  : device not mounted
//! - 1000 ms : device mounted
//! - 2500 ms : bus suspended
//!
//! While the host reports Caps Lock on, the LED is held on instead.

use crate::config::{BLINK_MOUNTED_MS, BLINK_NOT_MOUNTED_MS, BLINK_SUSPENDED_MS};

/// USB device life-cycle as seen by the status LED and report task.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    #[default]
    NotMounted,
    Mounted,
    Suspended,
}

/// Folds USB configured/suspended callbacks into a [`LinkState`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LinkTracker {
    configured: bool,
    suspended: bool,
}

impl LinkTracker {
    pub const fn new() -> Self {
        Self {
            configured: false,
            suspended: false,
        }
    }

    pub fn set_configured(&mut self, configured: bool) -> LinkState {
        self.configured = configured;
        if !configured {
            self.suspended = false;
        }
        self.state()
    }

    /// Suspend or resume. On resume the link returns to mounted only if
    /// the host had configured the device.
    pub fn set_suspended(&mut self, suspended: bool) -> LinkState {
        self.suspended = suspended;
        self.state()
    }

    pub fn state(&self) -> LinkState {
        if self.suspended {
            LinkState::Suspended
        } else if self.configured {
            LinkState::Mounted
        } else {
            LinkState::NotMounted
        }
    }
}

/// What the status LED should be doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedMode {
    /// Toggle every `n` milliseconds.
    Blink(u64),
    /// Hold at a fixed level.
    Solid(bool),
}

pub fn blink_interval_ms(link: LinkState) -> u64 {
    match link {
        LinkState::NotMounted => BLINK_NOT_MOUNTED_MS,
        LinkState::Mounted => BLINK_MOUNTED_MS,
        LinkState::Suspended => BLINK_SUSPENDED_MS,
    }
}

pub fn led_mode(link: LinkState, caps_lock: bool) -> LedMode {
    if caps_lock {
        LedMode::Solid(true)
    } else {
        LedMode::Blink(blink_interval_ms(link))
    }
}

/// Reports go out only while the bus is awake.
pub fn reports_enabled(link: LinkState) -> bool {
    link != LinkState::Suspended
}
