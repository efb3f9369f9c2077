//! [`LineSampler`] over two `embedded-hal` input pins.

use embedded_hal::digital::InputPin;

use super::LineSampler;

/// PS/2 clock and data lines wired to GPIO inputs (with pull-ups).
pub struct GpioLines<C, D> {
    clock: C,
    data: D,
}

impl<C: InputPin, D: InputPin> GpioLines<C, D> {
    pub fn new(clock: C, data: D) -> Self {
        Self { clock, data }
    }
}

// A failed read counts as the idle (high) level.
impl<C: InputPin, D: InputPin> LineSampler for GpioLines<C, D> {
    fn clock_level(&mut self) -> bool {
        self.clock.is_high().unwrap_or(true)
    }

    fn data_level(&mut self) -> bool {
        self.data.is_high().unwrap_or(true)
    }
}
