//! Button press classification
//!
//! The button is sampled once per tick as an active-low level. A
//! level change is accepted only after a minimum stable interval,
//! the press-start time is tracked, and the press is classified at
//! release (short) or after the hold threshold while still held
//! (long). A long press never also emits a short press.

use crate::config::TimerConfig;
use crate::session::{elapsed_ms, Millis};

/// Classified button gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Press {
    /// Pressed and released within the long-press threshold
    Short,
    /// Held past the long-press threshold
    Long,
}

/// Level-sampling press classifier
#[derive(Debug, Clone, Copy)]
pub struct ButtonMonitor {
    /// Debounced pressed level
    pressed: bool,
    /// When the current press began
    pressed_at: Millis,
    /// Last accepted level change (debounce reference)
    changed_at: Millis,
    /// Whether any level change has been accepted yet
    primed: bool,
    /// Long press already emitted for the current press
    long_fired: bool,
}

impl ButtonMonitor {
    pub const fn new() -> Self {
        Self {
            pressed: false,
            pressed_at: 0,
            changed_at: 0,
            primed: false,
            long_fired: false,
        }
    }

    /// Feed one level sample; active-low, so `is_low` means pressed
    pub fn sample(&mut self, is_low: bool, now: Millis, config: &TimerConfig) -> Option<Press> {
        if is_low != self.pressed {
            // Reject changes inside the debounce window
            if self.primed && elapsed_ms(now, self.changed_at) < config.debounce_ms {
                return None;
            }
            self.primed = true;
            self.changed_at = now;
            self.pressed = is_low;

            if is_low {
                self.pressed_at = now;
                self.long_fired = false;
                return None;
            }

            // Release: a long press already consumed this gesture
            if self.long_fired {
                return None;
            }
            return Some(Press::Short);
        }

        // Still held: classify as long once past the threshold
        if self.pressed && !self.long_fired && elapsed_ms(now, self.pressed_at) > config.long_press_ms
        {
            self.long_fired = true;
            return Some(Press::Long);
        }

        None
    }
}

impl Default for ButtonMonitor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TimerConfig {
        TimerConfig::default()
    }

    #[test]
    fn test_short_press_classified_at_release() {
        let mut button = ButtonMonitor::new();
        assert_eq!(button.sample(true, 0, &config()), None);
        assert_eq!(button.sample(true, 100, &config()), None);
        assert_eq!(button.sample(false, 200, &config()), Some(Press::Short));
    }

    #[test]
    fn test_long_press_fires_while_still_held() {
        let mut button = ButtonMonitor::new();
        assert_eq!(button.sample(true, 0, &config()), None);
        assert_eq!(button.sample(true, 2000, &config()), None);
        assert_eq!(button.sample(true, 2001, &config()), Some(Press::Long));
    }

    #[test]
    fn test_long_press_fires_only_once() {
        let mut button = ButtonMonitor::new();
        button.sample(true, 0, &config());
        assert_eq!(button.sample(true, 2500, &config()), Some(Press::Long));
        assert_eq!(button.sample(true, 3000, &config()), None);
        assert_eq!(button.sample(true, 5000, &config()), None);
    }

    #[test]
    fn test_no_short_press_after_a_long_press() {
        let mut button = ButtonMonitor::new();
        button.sample(true, 0, &config());
        assert_eq!(button.sample(true, 2500, &config()), Some(Press::Long));
        assert_eq!(button.sample(false, 3000, &config()), None);
    }

    #[test]
    fn test_bounce_on_release_is_rejected() {
        let mut button = ButtonMonitor::new();
        button.sample(true, 0, &config());
        // A 10 ms release glitch does not end the press
        assert_eq!(button.sample(false, 10, &config()), None);
        assert_eq!(button.sample(true, 20, &config()), None);
        // The press is still tracked from its original start
        assert_eq!(button.sample(true, 2001, &config()), Some(Press::Long));
    }

    #[test]
    fn test_successive_presses() {
        let mut button = ButtonMonitor::new();
        button.sample(true, 0, &config());
        assert_eq!(button.sample(false, 100, &config()), Some(Press::Short));
        button.sample(true, 500, &config());
        assert_eq!(button.sample(false, 700, &config()), Some(Press::Short));
    }
}
