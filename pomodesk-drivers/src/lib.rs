//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in pomodesk-core for the timer's peripherals:
//!
//! - MAX7219 dot-matrix driver (SPI + chip select)
//! - HD44780 character LCD behind a PCF8574 I2C backpack
//! - HC-SR04 ultrasonic ranger (the hand detector)
//! - Accessories (PWM buzzer, status LEDs)
//!
//! Every driver is generic over `embedded-hal` 1.0 traits and carries
//! its own mock-based tests.

#![no_std]
#![deny(unsafe_code)]

pub mod accessory;
pub mod matrix;
pub mod sensor;
pub mod text;
