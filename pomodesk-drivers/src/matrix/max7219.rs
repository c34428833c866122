//! MAX7219 dot-matrix driver
//!
//! Drives a single 8x8 LED matrix over SPI with a software chip
//! select. The driver keeps a one-byte-per-row framebuffer so a
//! single cell update rewrites exactly one digit register.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;

use pomodesk_core::traits::{DisplayError, DotMatrix};

/// MAX7219 register addresses
#[allow(dead_code)]
mod reg {
    pub const NOOP: u8 = 0x00;
    /// Digit registers are 0x01..=0x08, one per matrix row
    pub const DIGIT0: u8 = 0x01;
    pub const DECODE_MODE: u8 = 0x09;
    pub const INTENSITY: u8 = 0x0A;
    pub const SCAN_LIMIT: u8 = 0x0B;
    pub const SHUTDOWN: u8 = 0x0C;
    pub const DISPLAY_TEST: u8 = 0x0F;
}

/// Default brightness (0x00..=0x0F)
const DEFAULT_INTENSITY: u8 = 0x08;

/// MAX7219 driver for one 8x8 matrix
pub struct Max7219<SPI, CS> {
    spi: SPI,
    cs: CS,
    /// One byte per row, bit 7 = column 0
    buffer: [u8; 8],
}

impl<SPI, CS> Max7219<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    /// Create a new driver; call [`init`](Self::init) before use
    pub fn new(spi: SPI, cs: CS) -> Self {
        Self {
            spi,
            cs,
            buffer: [0; 8],
        }
    }

    /// Wake the chip and set it up for raw 8x8 cell addressing
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.write_reg(reg::DISPLAY_TEST, 0x00)?;
        self.write_reg(reg::DECODE_MODE, 0x00)?; // raw bits, no BCD decode
        self.write_reg(reg::SCAN_LIMIT, 0x07)?; // scan all 8 rows
        self.write_reg(reg::INTENSITY, DEFAULT_INTENSITY)?;
        self.write_reg(reg::SHUTDOWN, 0x01)?; // leave shutdown mode
        self.clear()
    }

    /// Set the brightness (0x00..=0x0F)
    pub fn set_intensity(&mut self, level: u8) -> Result<(), DisplayError> {
        self.write_reg(reg::INTENSITY, level & 0x0F)
    }

    fn write_reg(&mut self, addr: u8, data: u8) -> Result<(), DisplayError> {
        self.cs.set_low().map_err(|_| DisplayError::Bus)?;
        let result = self.spi.write(&[addr, data]);
        // Data latches on the chip-select rising edge
        self.cs.set_high().map_err(|_| DisplayError::Bus)?;
        result.map_err(|_| DisplayError::Bus)
    }
}

impl<SPI, CS> DotMatrix for Max7219<SPI, CS>
where
    SPI: SpiBus,
    CS: OutputPin,
{
    fn set_cell(&mut self, row: u8, col: u8, lit: bool) -> Result<(), DisplayError> {
        if row >= 8 || col >= 8 {
            return Err(DisplayError::OutOfRange);
        }

        let mask = 0x80 >> col;
        if lit {
            self.buffer[row as usize] |= mask;
        } else {
            self.buffer[row as usize] &= !mask;
        }
        self.write_reg(reg::DIGIT0 + row, self.buffer[row as usize])
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer = [0; 8];
        for row in 0..8u8 {
            self.write_reg(reg::DIGIT0 + row, 0x00)?;
        }
        Ok(())
    }
}
