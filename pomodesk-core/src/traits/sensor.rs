//! Proximity sensor trait

/// Errors that can occur reading the proximity sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Pin or peripheral access failure
    Bus,
}

/// Trait for a ranging sensor used as a hand detector
pub trait ProximitySensor {
    /// Measure the distance to the nearest obstacle
    ///
    /// `Ok(None)` means no echo came back: nothing in range. That is
    /// the normal "no hand present" reading, not a fault.
    fn distance_cm(&mut self) -> Result<Option<u16>, SensorError>;
}
