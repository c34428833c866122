//! Hardware abstraction traits
//!
//! These traits define the interface between the control logic and
//! hardware-specific implementations.

pub mod display;
pub mod outputs;
pub mod sensor;

pub use display::{DisplayError, DotMatrix, TextDisplay, TextDisplayExt};
pub use outputs::{Buzzer, StatusLed};
pub use sensor::{ProximitySensor, SensorError};
