//! Display traits for the dot matrix and the character display

use crate::config::LCD_COLS;

/// Errors that can occur talking to a display device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus-level transfer failure (SPI/I2C)
    Bus,
    /// Position outside the device's addressable range
    OutOfRange,
}

/// Trait for the 8x8 LED dot matrix
///
/// The matrix is a plain cell grid; all pattern logic (spiral fill,
/// digit glyphs) lives in the renderer.
pub trait DotMatrix {
    /// Switch a single cell on or off
    fn set_cell(&mut self, row: u8, col: u8, lit: bool) -> Result<(), DisplayError>;

    /// Switch every cell off
    fn clear(&mut self) -> Result<(), DisplayError>;
}

/// Trait for the 16x2 character display
pub trait TextDisplay {
    /// Clear the screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the cursor
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError>;

    /// Print text at the cursor position
    fn print(&mut self, text: &str) -> Result<(), DisplayError>;
}

/// Helper trait for whole-line writes
pub trait TextDisplayExt: TextDisplay {
    /// Write a full row, padded with spaces to the right edge
    ///
    /// Padding wipes whatever a longer previous message left behind,
    /// so callers never need an explicit clear between rewrites.
    fn print_line(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let mut buf = [b' '; LCD_COLS as usize];
        let bytes = text.as_bytes();
        let len = bytes.len().min(buf.len());
        buf[..len].copy_from_slice(&bytes[..len]);

        // Safe because we only use ASCII
        let padded = core::str::from_utf8(&buf).unwrap_or(text);
        self.set_cursor(row, 0)?;
        self.print(padded)
    }
}

// Blanket implementation for all TextDisplay types
impl<T: TextDisplay> TextDisplayExt for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingDisplay {
        cursor: (u8, u8),
        line: [u8; LCD_COLS as usize],
    }

    impl RecordingDisplay {
        fn new() -> Self {
            Self {
                cursor: (0, 0),
                line: [0; LCD_COLS as usize],
            }
        }
    }

    impl TextDisplay for RecordingDisplay {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.line = [b' '; LCD_COLS as usize];
            Ok(())
        }

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), DisplayError> {
            self.cursor = (row, col);
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), DisplayError> {
            let mut col = self.cursor.1 as usize;
            for &b in text.as_bytes() {
                if col < self.line.len() {
                    self.line[col] = b;
                    col += 1;
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_print_line_pads_to_full_width() {
        let mut display = RecordingDisplay::new();
        display.print_line(0, "Focus: 7 sec").unwrap();
        assert_eq!(&display.line, b"Focus: 7 sec    ");
    }

    #[test]
    fn test_print_line_truncates_long_text() {
        let mut display = RecordingDisplay::new();
        display.print_line(1, "a message that does not fit").unwrap();
        assert_eq!(&display.line, b"a message that d");
        assert_eq!(display.cursor.0, 1);
    }
}
