//! Ranging sensors

pub mod hcsr04;

pub use hcsr04::{EchoTimer, HcSr04};
