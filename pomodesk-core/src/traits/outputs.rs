//! On/off output traits (status LEDs, buzzer)

/// Trait for a simple indicator LED
pub trait StatusLed {
    /// Switch the LED on or off
    fn set_on(&mut self, on: bool);

    /// Check the current logical state
    fn is_on(&self) -> bool;
}

/// Trait for the buzzer
///
/// Tone generation (the square-wave carrier) is the implementation's
/// concern; the controller only switches the tone on and off.
pub trait Buzzer {
    /// Start or stop the tone
    fn set_active(&mut self, active: bool);

    /// Check whether the tone is sounding
    fn is_active(&self) -> bool;
}
