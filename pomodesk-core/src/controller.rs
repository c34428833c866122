//! The controller driving one poll at a time
//!
//! Owns the phase, the session clock, the display caches, and the
//! exactly-once latches, and drives every device through the core
//! traits. The firmware calls [`Controller::poll`] on a fixed tick
//! with the sampled button level, an optional sensor reading, and the
//! current millisecond counter; all former blocking pauses are
//! deadlines checked here, so input sampling never freezes.

use core::fmt::Write;

use heapless::String;

use crate::button::{ButtonMonitor, Press};
use crate::config::{TimerConfig, MATRIX_CELLS};
use crate::render;
use crate::session::{elapsed_ms, Millis, Session};
use crate::state::{Event, Phase};
use crate::traits::{Buzzer, DisplayError, DotMatrix, StatusLed, TextDisplay, TextDisplayExt};

/// Device handles the controller drives
///
/// The controller owns no hardware; the firmware moves the concrete
/// drivers in here and lends the bundle to every poll.
pub struct Devices<M, T, B, L> {
    pub matrix: M,
    pub lcd: T,
    pub buzzer: B,
    pub focus_led: L,
    pub rest_led: L,
}

/// Last-rendered values, used purely to suppress redundant writes
#[derive(Debug, Clone, Copy, Default)]
struct DisplayCache {
    /// Last progress fill count drawn on the matrix
    dots: Option<u32>,
    /// Last focus countdown second shown on the LCD
    focus_countdown: Option<u32>,
    /// Last rest countdown second shown on the LCD
    rest_countdown: Option<u32>,
}

impl DisplayCache {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Exactly-once flags for phase-entry side effects
#[derive(Debug, Clone, Copy, Default)]
struct Latches {
    focus_led: bool,
    rest_led: bool,
    matrix: bool,
}

impl Latches {
    fn any(&self) -> bool {
        self.focus_led || self.rest_led || self.matrix
    }
}

/// The main-loop brain
pub struct Controller {
    config: TimerConfig,
    phase: Phase,
    session: Session,
    button: ButtonMonitor,
    cache: DisplayCache,
    latches: Latches,
    /// When the buzzer was last switched on, while it is sounding
    buzz_started: Option<Millis>,
    /// When the stop message appeared, until its second line swaps
    stop_hint_shown: Option<Millis>,
}

impl Controller {
    pub fn new(config: TimerConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            session: Session::new(),
            button: ButtonMonitor::new(),
            cache: DisplayCache::default(),
            latches: Latches::default(),
            buzz_started: None,
            stop_hint_shown: None,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Session bookkeeping (completed periods, rest length)
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Whether this tick should bother pinging the ranger
    pub fn senses_hand(&self) -> bool {
        self.phase.senses_hand()
    }

    /// Render the power-on prompt
    pub fn start<M, T, B, L>(&mut self, devices: &mut Devices<M, T, B, L>) -> Result<(), DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        devices.lcd.print_line(0, "Press button to")?;
        devices.lcd.print_line(1, "start Pomodoro")
    }

    /// One control-loop iteration
    ///
    /// Returns the transition event that fired this tick, if any, so
    /// the caller can log it.
    pub fn poll<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        button_is_low: bool,
        distance_cm: Option<u16>,
        now: Millis,
    ) -> Result<Option<Event>, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        let mut fired = None;

        // Button gestures first; they outrank everything else this tick
        if let Some(press) = self.button.sample(button_is_low, now, &self.config) {
            fired = self.handle_press(devices, press, now)?;
        }

        // Hand detection only counts while armed for it
        if self.phase.senses_hand() {
            if let Some(d) = distance_cm {
                if d > 0 && d <= self.config.hand_threshold_cm {
                    fired = Some(self.start_focus(devices, now)?);
                }
            }
        }

        // Advance whichever phase is active
        match self.phase {
            Phase::Focusing => {
                if let Some(event) = self.drive_focus(devices, now)? {
                    fired = Some(event);
                }
            }
            Phase::Announcing => {
                if let Some(event) = self.drive_announce(devices, now)? {
                    fired = Some(event);
                }
            }
            Phase::Resting => {
                if let Some(event) = self.drive_rest(devices, now)? {
                    fired = Some(event);
                }
            }
            Phase::Stopped => self.drive_stop_hint(devices, now)?,
            Phase::Idle | Phase::AwaitingHand => {}
        }

        // Silence the buzzer once its on-time is over
        if let Some(started) = self.buzz_started {
            if elapsed_ms(now, started) >= self.config.buzz_ms {
                devices.buzzer.set_active(false);
                self.buzz_started = None;
            }
        }

        // Quiescent cleanup: nothing active, but something still latched
        if !self.phase.is_running() && self.phase != Phase::Resting && self.latches.any() {
            devices.focus_led.set_on(false);
            devices.rest_led.set_on(false);
            devices.matrix.clear()?;
            self.latches = Latches::default();
        }

        Ok(fired)
    }

    /// Apply a classified button gesture
    fn handle_press<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        press: Press,
        now: Millis,
    ) -> Result<Option<Event>, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        match press {
            Press::Short => {
                // A short press only arms the timer from a waiting phase
                if self.phase.resettable() {
                    self.phase = self.phase.transition(Event::ShortPress);
                    devices.lcd.print_line(0, "Place hand to")?;
                    devices.lcd.print_line(1, "sensor to start")?;
                    return Ok(Some(Event::ShortPress));
                }
                Ok(None)
            }
            Press::Long => {
                if self.phase == Phase::Focusing {
                    self.stop_run(devices, now)?;
                    return Ok(Some(Event::LongPress));
                }
                if self.phase.resettable() {
                    self.phase = self.phase.transition(Event::LongPress);
                    self.reset_prompt(devices)?;
                    return Ok(Some(Event::LongPress));
                }
                Ok(None)
            }
        }
    }

    /// A hand is over the sensor: begin a focus period
    fn start_focus<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<Event, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        self.phase = self.phase.transition(Event::HandDetected);
        self.session.start_focus(now);
        self.cache.reset();

        devices.focus_led.set_on(true);
        devices.rest_led.set_on(false);
        self.latches.focus_led = true;
        self.latches.rest_led = false;

        devices.matrix.clear()?;
        self.latches.matrix = true;

        devices.lcd.print_line(0, "Pomodoro started")?;
        self.show_focus_countdown(devices, self.config.focus_secs)?;

        self.buzz(&mut devices.buzzer, now);
        Ok(Event::HandDetected)
    }

    /// Advance a running focus period
    fn drive_focus<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<Option<Event>, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        let elapsed = self.session.focus_elapsed_secs(now);

        if elapsed >= self.config.focus_secs {
            return self.finish_focus(devices, now).map(Some);
        }

        // Countdown text only when the displayed second changes
        let countdown = self.config.focus_secs - elapsed;
        if self.cache.focus_countdown != Some(countdown) {
            self.show_focus_countdown(devices, countdown)?;
        }

        // Progress dots only when the fill count changes
        let dots = elapsed * MATRIX_CELLS as u32 / self.config.focus_secs;
        if self.cache.dots != Some(dots) {
            devices.matrix.clear()?;
            render::fill_cells(&mut devices.matrix, dots as usize)?;
            self.cache.dots = Some(dots);
        }

        Ok(None)
    }

    /// Focus period over: count it and hold the completion message
    fn finish_focus<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<Event, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        // The final progress frame: a completely filled grid
        if self.cache.dots != Some(MATRIX_CELLS as u32) {
            devices.matrix.clear()?;
            render::fill_cells(&mut devices.matrix, MATRIX_CELLS)?;
            self.cache.dots = Some(MATRIX_CELLS as u32);
        }

        let completed = self.session.complete_focus(now);
        self.phase = self.phase.transition(Event::FocusElapsed);

        devices.lcd.print_line(0, "Pomodoro Done")?;
        let mut line: String<20> = String::new();
        let _ = write!(line, "Pomos: {}", completed);
        devices.lcd.print_line(1, &line)?;

        self.buzz(&mut devices.buzzer, now);
        Ok(Event::FocusElapsed)
    }

    /// Hold the completion message, then swap over to the rest period
    fn drive_announce<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<Option<Event>, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        if self.session.announce_elapsed_ms(now) < self.config.announce_ms {
            return Ok(None);
        }

        self.phase = self.phase.transition(Event::AnnounceElapsed);
        self.session.start_rest(now, &self.config);

        // Rest begins: swap the indicators, blank the progress grid
        devices.rest_led.set_on(true);
        devices.focus_led.set_on(false);
        self.latches.rest_led = true;
        self.latches.focus_led = false;
        if self.latches.matrix {
            devices.matrix.clear()?;
            self.latches.matrix = false;
        }

        let rest_secs = self.session.rest_secs();
        let mut line: String<20> = String::new();
        let _ = write!(line, "Rest: {} sec", rest_secs);
        devices.lcd.print_line(0, &line)?;
        self.show_rest_countdown(devices, rest_secs)?;

        self.buzz(&mut devices.buzzer, now);
        Ok(Some(Event::AnnounceElapsed))
    }

    /// Advance a running rest period
    fn drive_rest<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<Option<Event>, DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        let elapsed = self.session.rest_elapsed_secs(now);
        let rest_secs = self.session.rest_secs();

        if elapsed >= rest_secs {
            self.buzz(&mut devices.buzzer, now);
            self.phase = self.phase.transition(Event::RestElapsed);
            self.reset_prompt(devices)?;
            return Ok(Some(Event::RestElapsed));
        }

        let remaining = rest_secs - elapsed;
        if self.cache.rest_countdown != Some(remaining) {
            self.show_rest_countdown(devices, remaining)?;
        }
        Ok(None)
    }

    /// Cancel a running focus period
    fn stop_run<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<(), DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        self.phase = self.phase.transition(Event::LongPress);
        devices.lcd.print_line(0, "Timer Stopped")?;
        devices.lcd.print_line(1, "Long press to")?;
        self.stop_hint_shown = Some(now);
        Ok(())
    }

    /// Swap in the second half of the stop message once the hold expires
    fn drive_stop_hint<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        now: Millis,
    ) -> Result<(), DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        if let Some(shown) = self.stop_hint_shown {
            if elapsed_ms(now, shown) >= self.config.announce_ms {
                devices.lcd.print_line(1, "reset Pomodoro")?;
                self.stop_hint_shown = None;
            }
        }
        Ok(())
    }

    /// Re-arm for the next hand wave: prompt, caches, blank grid
    fn reset_prompt<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
    ) -> Result<(), DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        self.cache.reset();
        devices.lcd.print_line(0, "Hold hand near")?;
        devices.lcd.print_line(1, "the sensor")?;
        devices.matrix.clear()
    }

    fn show_focus_countdown<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        countdown: u32,
    ) -> Result<(), DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        let mut line: String<20> = String::new();
        let _ = write!(line, "Focus: {} sec", countdown);
        devices.lcd.print_line(1, &line)?;
        self.cache.focus_countdown = Some(countdown);
        Ok(())
    }

    fn show_rest_countdown<M, T, B, L>(
        &mut self,
        devices: &mut Devices<M, T, B, L>,
        remaining: u32,
    ) -> Result<(), DisplayError>
    where
        M: DotMatrix,
        T: TextDisplay,
        B: Buzzer,
        L: StatusLed,
    {
        let mut line: String<20> = String::new();
        let _ = write!(line, "Remaining: {} sec", remaining);
        devices.lcd.print_line(1, &line)?;
        self.cache.rest_countdown = Some(remaining);
        Ok(())
    }

    fn buzz<B: Buzzer>(&mut self, buzzer: &mut B, now: Millis) {
        buzzer.set_active(true);
        self.buzz_started = Some(now);
    }
}
