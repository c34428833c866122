//! 16x2 character LCD driver
//!
//! HD44780 controller in 4-bit mode behind a PCF8574 I2C expander,
//! the common "I2C backpack" module. Each byte goes out as two
//! nibbles on D4-D7 with an enable strobe; the backlight bit is held
//! high on every transfer.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use pomodesk_core::config::{LCD_COLS, LCD_ROWS};
use pomodesk_core::traits::{DisplayError, TextDisplay};

/// Default I2C address of the PCF8574 backpack
pub const DEFAULT_ADDR: u8 = 0x27;

/// PCF8574 bit assignments
const RS: u8 = 0x01; // register select: 0 = command, 1 = data
const EN: u8 = 0x04; // enable strobe
const BACKLIGHT: u8 = 0x08;

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const HOME: u8 = 0x02;
    pub const ENTRY_MODE: u8 = 0x06; // cursor moves right, no shift
    pub const DISPLAY_ON: u8 = 0x0C; // display on, cursor off
    pub const FUNCTION_SET: u8 = 0x28; // 4-bit bus, 2 lines, 5x8 font
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of each row's first column
const ROW_OFFSETS: [u8; LCD_ROWS as usize] = [0x00, 0x40];

/// 16x2 character LCD driver
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver at the default backpack address
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_addr(i2c, delay, DEFAULT_ADDR)
    }

    /// Create a driver at a specific backpack address
    pub fn with_addr(i2c: I2C, delay: D, addr: u8) -> Self {
        Self { i2c, delay, addr }
    }

    /// Run the HD44780 4-bit init dance and light the backlight
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // The controller needs >40ms after power-up
        self.delay.delay_ms(50);

        // Three 8-bit function-set knocks, then the switch to 4-bit
        self.write_nibble(0x30, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20, false)?;
        self.delay.delay_us(150);

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_ON)?;
        self.command(cmd::ENTRY_MODE)?;
        self.command(cmd::CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn command(&mut self, value: u8) -> Result<(), DisplayError> {
        self.write_byte(value, false)
    }

    fn write_byte(&mut self, value: u8, is_data: bool) -> Result<(), DisplayError> {
        self.write_nibble(value & 0xF0, is_data)?;
        self.write_nibble(value << 4, is_data)?;
        // Commands and data settle within ~37us
        self.delay.delay_us(50);
        Ok(())
    }

    /// Put one nibble on D4-D7 and strobe enable
    fn write_nibble(&mut self, nibble: u8, is_data: bool) -> Result<(), DisplayError> {
        let rs = if is_data { RS } else { 0 };
        let bits = (nibble & 0xF0) | rs | BACKLIGHT;

        self.bus_write(bits | EN)?;
        self.delay.delay_us(1);
        self.bus_write(bits)
    }

    fn bus_write(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.addr, &[bits])
            .map_err(|_| DisplayError::Bus)
    }
}

impl<I2C, D> TextDisplay for Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        // Clear is the one slow command (~1.5ms)
        self.delay.delay_ms(2);
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
        if row >= LCD_ROWS || col >= LCD_COLS {
            return Err(DisplayError::OutOfRange);
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for &b in text.as_bytes() {
            self.write_byte(b, true)?;
        }
        Ok(())
    }
}
