//! HC-SR04 ultrasonic ranger
//!
//! Ranges by pulsing the trigger pin for 10us and timing the echo
//! pulse. Sound covers ~58us per round-trip centimeter. A missing
//! echo is a normal reading (nothing in range), not a fault.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use pomodesk_core::traits::{ProximitySensor, SensorError};

/// Round-trip echo time per centimeter, in microseconds
const US_PER_CM: u64 = 58;

/// Give up waiting for an echo edge after this long
///
/// 30ms of round trip is ~5m, past the sensor's usable range.
const ECHO_TIMEOUT_US: u64 = 30_000;

/// Microsecond clock for timing the echo pulse
///
/// The firmware backs this with its monotonic timer.
pub trait EchoTimer {
    /// Current value of a free-running microsecond counter
    fn now_us(&mut self) -> u64;
}

/// HC-SR04 driver
pub struct HcSr04<TRIG, ECHO, D, C> {
    trig: TRIG,
    echo: ECHO,
    delay: D,
    clock: C,
}

impl<TRIG, ECHO, D, C> HcSr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: EchoTimer,
{
    pub fn new(trig: TRIG, echo: ECHO, delay: D, clock: C) -> Self {
        Self {
            trig,
            echo,
            delay,
            clock,
        }
    }

    /// Fire one ranging cycle
    ///
    /// Returns the distance in whole centimeters, or `None` when no
    /// echo came back within the timeout.
    pub fn measure_cm(&mut self) -> Result<Option<u16>, SensorError> {
        // 10us trigger pulse
        self.trig.set_low().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(2);
        self.trig.set_high().map_err(|_| SensorError::Bus)?;
        self.delay.delay_us(10);
        self.trig.set_low().map_err(|_| SensorError::Bus)?;

        // Echo pulse start, then end
        let start = match self.wait_for_level(true)? {
            Some(t) => t,
            None => return Ok(None),
        };
        let end = match self.wait_for_level(false)? {
            Some(t) => t,
            None => return Ok(None),
        };

        let cm = (end - start) / US_PER_CM;
        Ok(Some(cm.min(u16::MAX as u64) as u16))
    }

    /// Busy-wait for the echo pin to reach `level`, bounded by the timeout
    fn wait_for_level(&mut self, level: bool) -> Result<Option<u64>, SensorError> {
        let waiting_since = self.clock.now_us();
        loop {
            let now = self.clock.now_us();
            if self.echo.is_high().map_err(|_| SensorError::Bus)? == level {
                return Ok(Some(now));
            }
            if now.saturating_sub(waiting_since) > ECHO_TIMEOUT_US {
                return Ok(None);
            }
        }
    }
}

impl<TRIG, ECHO, D, C> ProximitySensor for HcSr04<TRIG, ECHO, D, C>
where
    TRIG: OutputPin,
    ECHO: InputPin,
    D: DelayNs,
    C: EchoTimer,
{
    fn distance_cm(&mut self) -> Result<Option<u16>, SensorError> {
        self.measure_cm()
    }
}
