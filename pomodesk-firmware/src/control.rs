//! The control loop
//!
//! One logical thread owns every device and the controller. Once per
//! tick: sample the button level, ping the ranger if the controller
//! is armed for it, run one controller poll.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant, Ticker};

use pomodesk_core::config::TimerConfig;
use pomodesk_core::controller::{Controller, Devices};
use pomodesk_core::traits::{Buzzer, DotMatrix, ProximitySensor, StatusLed, TextDisplay};

/// Poll cadence in milliseconds
const TICK_MS: u64 = 10;

/// Run the timer forever
pub async fn run<M, T, S, B, L>(
    matrix: M,
    lcd: T,
    mut sensor: S,
    buzzer: B,
    focus_led: L,
    rest_led: L,
    button: Input<'static>,
) -> !
where
    M: DotMatrix,
    T: TextDisplay,
    S: ProximitySensor,
    B: Buzzer,
    L: StatusLed,
{
    info!("Control loop started");

    let mut devices = Devices {
        matrix,
        lcd,
        buzzer,
        focus_led,
        rest_led,
    };
    let mut controller = Controller::new(TimerConfig::default());

    if let Err(e) = controller.start(&mut devices) {
        warn!("Display write failed: {:?}", e);
    }

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));

    loop {
        ticker.next().await;

        let now_ms = Instant::now().as_millis() as u32;
        let button_low = button.is_low();

        // Ping the ranger only while the controller is armed for it
        let distance = if controller.senses_hand() {
            match sensor.distance_cm() {
                Ok(d) => d,
                Err(e) => {
                    warn!("Sensor read failed: {:?}", e);
                    None
                }
            }
        } else {
            None
        };

        match controller.poll(&mut devices, button_low, distance, now_ms) {
            Ok(Some(event)) => {
                debug!("{:?} -> {:?}", event, controller.phase());
                if controller.session().completed() > 0 {
                    trace!("Completed periods: {}", controller.session().completed());
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Display write failed: {:?}", e),
        }
    }
}
