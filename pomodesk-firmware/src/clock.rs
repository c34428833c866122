//! Monotonic microsecond clock for the sensor driver

use embassy_time::Instant;
use pomodesk_drivers::sensor::EchoTimer;

/// Free-running microsecond counter backed by the embassy timer
pub struct UptimeClock;

impl EchoTimer for UptimeClock {
    fn now_us(&mut self) -> u64 {
        Instant::now().as_micros()
    }
}
