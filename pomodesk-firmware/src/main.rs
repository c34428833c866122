//! Pomodesk - physical pomodoro timer firmware
//!
//! Main firmware binary for the Raspberry Pi Pico build: a push
//! button arms the timer, a wave over the ultrasonic sensor starts a
//! focus period, the LED matrix fills as a spiral progress bar, and
//! the 16x2 LCD carries prompts and countdowns.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Spi};
use fixed::traits::ToFixed;
use {defmt_rtt as _, panic_probe as _};

use pomodesk_drivers::accessory::{GpioLed, PwmBuzzer};
use pomodesk_drivers::matrix::Max7219;
use pomodesk_drivers::sensor::HcSr04;
use pomodesk_drivers::text::Lcd1602;

mod clock;
mod control;

use clock::UptimeClock;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Pomodesk firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // SPI0 for the MAX7219 matrix (TX only), software chip select
    let mut spi_config = spi::Config::default();
    spi_config.frequency = 2_000_000;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let matrix_cs = Output::new(p.PIN_17, Level::High);
    let mut matrix = Max7219::new(spi, matrix_cs);
    if let Err(e) = matrix.init() {
        error!("Matrix init failed: {:?}", e);
    }

    // I2C0 for the LCD backpack
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c::Config::default());
    let mut lcd = Lcd1602::new(i2c, embassy_time::Delay);
    if let Err(e) = lcd.init() {
        error!("LCD init failed: {:?}", e);
    }

    // HC-SR04 trigger/echo pair
    let trig = Output::new(p.PIN_7, Level::Low);
    let echo = Input::new(p.PIN_6, Pull::None);
    let sensor = HcSr04::new(trig, echo, embassy_time::Delay, UptimeClock);

    // Buzzer carrier: 125 MHz sys clock / 125 / 2000 = 500 Hz
    let mut pwm_config = pwm::Config::default();
    pwm_config.divider = 125.to_fixed();
    pwm_config.top = 1999;
    pwm_config.compare_b = 0;
    let pwm = Pwm::new_output_b(p.PWM_SLICE4, p.PIN_9, pwm_config);
    let (_, buzzer_out) = pwm.split();
    let buzzer = PwmBuzzer::new(buzzer_out.unwrap());

    // Status LEDs and the button (active-low, internal pull-up)
    let focus_led = GpioLed::new(Output::new(p.PIN_2, Level::Low));
    let rest_led = GpioLed::new(Output::new(p.PIN_3, Level::Low));
    let button = Input::new(p.PIN_10, Pull::Up);

    info!("Devices initialized, timer running");

    control::run(matrix, lcd, sensor, buzzer, focus_led, rest_led, button).await
}
