//! Accessory outputs (buzzer, status LEDs)

pub mod buzzer;
pub mod led;

pub use buzzer::PwmBuzzer;
pub use led::GpioLed;
