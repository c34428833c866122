//! PWM buzzer
//!
//! The tone is a fixed-frequency square wave: the PWM slice is
//! configured for the carrier (about 500 Hz, a ~1ms half-period) and
//! the buzzer just switches between 50% duty and silence.

use embedded_hal::pwm::SetDutyCycle;

use pomodesk_core::traits::Buzzer;

/// Buzzer on a PWM output
pub struct PwmBuzzer<P> {
    pwm: P,
    /// Current logical state (true = sounding)
    active: bool,
}

impl<P: SetDutyCycle> PwmBuzzer<P> {
    /// Create a new buzzer, silent
    pub fn new(mut pwm: P) -> Self {
        let _ = pwm.set_duty_cycle_fully_off();
        Self { pwm, active: false }
    }
}

impl<P: SetDutyCycle> Buzzer for PwmBuzzer<P> {
    fn set_active(&mut self, active: bool) {
        self.active = active;
        let _ = if active {
            self.pwm.set_duty_cycle_percent(50)
        } else {
            self.pwm.set_duty_cycle_fully_off()
        };
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
