//! GPIO status LED

use embedded_hal::digital::OutputPin;

use pomodesk_core::traits::StatusLed;

/// Push-pull status LED, active-high
pub struct GpioLed<P> {
    pin: P,
    /// Current logical state (true = lit)
    on: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// Create a new LED output, off
    pub fn new(pin: P) -> Self {
        let mut led = Self { pin, on: false };
        led.set_on(false);
        led
    }
}

impl<P: OutputPin> StatusLed for GpioLed<P> {
    fn set_on(&mut self, on: bool) {
        self.on = on;
        let _ = if on {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
    }

    fn is_on(&self) -> bool {
        self.on
    }
}
