//! State machine definition
//!
//! All display, indicator, and buzzer behavior is a function of the
//! current phase and an event.

use super::events::Event;

/// Timer phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Power-on state, waiting for the first button press
    Idle,
    /// Armed, waiting for a hand over the proximity sensor
    AwaitingHand,
    /// Focus period running, progress filling the matrix
    Focusing,
    /// Focus period complete, completion message held on screen
    Announcing,
    /// Rest period running
    Resting,
    /// Run cancelled by a long press; a fresh press is required
    Stopped,
}

impl Phase {
    /// Check if a focus run is active (including the completion hold)
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Focusing | Phase::Announcing)
    }

    /// Check if the proximity sensor should be sampled
    pub fn senses_hand(&self) -> bool {
        matches!(self, Phase::AwaitingHand)
    }

    /// Check if this phase accepts the long-press reset gesture
    pub fn resettable(&self) -> bool {
        matches!(self, Phase::Idle | Phase::AwaitingHand | Phase::Stopped)
    }

    /// Process an event and return the next phase
    ///
    /// This is the core state transition logic.
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use Phase::*;

        match (self, event) {
            // Arming: a short press from any waiting phase
            (Idle, ShortPress) => AwaitingHand,
            (Stopped, ShortPress) => AwaitingHand,
            (AwaitingHand, ShortPress) => AwaitingHand,

            // Manual reset: long press while not running and not resting
            (Idle, LongPress) => AwaitingHand,
            (AwaitingHand, LongPress) => AwaitingHand,
            (Stopped, LongPress) => AwaitingHand,

            // A hand over the sensor starts the run
            (AwaitingHand, HandDetected) => Focusing,

            // Focus -> completion hold -> rest
            (Focusing, FocusElapsed) => Announcing,
            (Announcing, AnnounceElapsed) => Resting,

            // Cancelling a run
            (Focusing, LongPress) => Stopped,

            // Rest runs out and the timer re-arms without a press
            (Resting, RestElapsed) => AwaitingHand,

            // Default: stay in current phase
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_press_arms() {
        assert_eq!(Phase::Idle.transition(Event::ShortPress), Phase::AwaitingHand);
        assert_eq!(Phase::Stopped.transition(Event::ShortPress), Phase::AwaitingHand);
    }

    #[test]
    fn test_hand_starts_focus() {
        assert_eq!(
            Phase::AwaitingHand.transition(Event::HandDetected),
            Phase::Focusing
        );
    }

    #[test]
    fn test_hand_ignored_elsewhere() {
        // Only the armed phase listens to the sensor
        for phase in [
            Phase::Idle,
            Phase::Focusing,
            Phase::Announcing,
            Phase::Resting,
            Phase::Stopped,
        ] {
            assert_eq!(phase.transition(Event::HandDetected), phase);
        }
    }

    #[test]
    fn test_full_cycle() {
        let armed = Phase::Idle.transition(Event::ShortPress);
        let focusing = armed.transition(Event::HandDetected);
        let announcing = focusing.transition(Event::FocusElapsed);
        let resting = announcing.transition(Event::AnnounceElapsed);
        let rearmed = resting.transition(Event::RestElapsed);

        assert_eq!(focusing, Phase::Focusing);
        assert_eq!(announcing, Phase::Announcing);
        assert_eq!(resting, Phase::Resting);
        // Back to waiting for a hand, no press needed
        assert_eq!(rearmed, Phase::AwaitingHand);
    }

    #[test]
    fn test_long_press_stops_run() {
        assert_eq!(Phase::Focusing.transition(Event::LongPress), Phase::Stopped);
    }

    #[test]
    fn test_long_press_resets_waiting_phases() {
        assert_eq!(Phase::Idle.transition(Event::LongPress), Phase::AwaitingHand);
        assert_eq!(
            Phase::AwaitingHand.transition(Event::LongPress),
            Phase::AwaitingHand
        );
        assert_eq!(
            Phase::Stopped.transition(Event::LongPress),
            Phase::AwaitingHand
        );
    }

    #[test]
    fn test_resting_ignores_button() {
        assert_eq!(Phase::Resting.transition(Event::ShortPress), Phase::Resting);
        assert_eq!(Phase::Resting.transition(Event::LongPress), Phase::Resting);
    }

    #[test]
    fn test_announcing_ignores_button() {
        assert_eq!(
            Phase::Announcing.transition(Event::ShortPress),
            Phase::Announcing
        );
        assert_eq!(
            Phase::Announcing.transition(Event::LongPress),
            Phase::Announcing
        );
    }

    #[test]
    fn test_sensor_gate() {
        assert!(Phase::AwaitingHand.senses_hand());
        assert!(!Phase::Idle.senses_hand());
        assert!(!Phase::Focusing.senses_hand());
        assert!(!Phase::Stopped.senses_hand());
    }

    #[test]
    fn test_running_phases() {
        assert!(Phase::Focusing.is_running());
        assert!(Phase::Announcing.is_running());
        assert!(!Phase::Resting.is_running());
        assert!(!Phase::AwaitingHand.is_running());
    }
}
