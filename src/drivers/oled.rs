//! SSD1306 128x32 OLED driver for the status view
//!
//! No framebuffer: each page byte is computed on the fly from the text
//! layout while it is streamed out over I2C.

use crate::display::StatusDisplay;
use crate::error::Error;
use embedded_hal::blocking::i2c::Write;

pub const WIDTH: u8 = 128;
pub const PAGES: u8 = 4;

const CONTROL_COMMAND: u8 = 0x00;
const CONTROL_DATA: u8 = 0x40;

const CMD_DISPLAY_OFF: u8 = 0xAE;
const CMD_DISPLAY_ON: u8 = 0xAF;

const INIT_SEQUENCE: [u8; 25] = [
    CMD_DISPLAY_OFF,
    0xD5, 0x80, // clock divide
    0xA8, 0x1F, // multiplex, 32 rows
    0xD3, 0x00, // no display offset
    0x40,       // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1,       // segment remap
    0xC8,       // COM scan descending
    0xDA, 0x02, // COM pins for 128x32
    0x81, 0x8F, // contrast
    0xD9, 0xF1, // precharge
    0xDB, 0x40, // VCOMH deselect
    0xA4,       // follow RAM
    0xA6,       // non-inverted
    CMD_DISPLAY_ON,
];

/// Data bytes per I2C transfer, sized for the AVR TWI driver
const CHUNK: usize = 16;

const GLYPH_WIDTH: u8 = 5;
const GLYPH_HEIGHT: u8 = 7;
const GLYPH_ADVANCE: u8 = GLYPH_WIDTH + 1;

const LABEL_SCALE: u8 = 2;
const VALUE_SCALE: u8 = 4;

/// 5x7 column glyphs, bit 0 is the top row
fn glyph(c: u8) -> [u8; 5] {
    match c {
        b'0' => [0x3E, 0x51, 0x49, 0x45, 0x3E],
        b'1' => [0x00, 0x42, 0x7F, 0x40, 0x00],
        b'2' => [0x42, 0x61, 0x51, 0x49, 0x46],
        b'3' => [0x21, 0x41, 0x45, 0x4B, 0x31],
        b'4' => [0x18, 0x14, 0x12, 0x7F, 0x10],
        b'5' => [0x27, 0x45, 0x45, 0x45, 0x39],
        b'6' => [0x3C, 0x4A, 0x49, 0x49, 0x30],
        b'7' => [0x01, 0x71, 0x09, 0x05, 0x03],
        b'8' => [0x36, 0x49, 0x49, 0x49, 0x36],
        b'9' => [0x06, 0x49, 0x49, 0x29, 0x1E],
        b'#' => [0x14, 0x7F, 0x14, 0x7F, 0x14],
        b'%' => [0x23, 0x13, 0x08, 0x64, 0x62],
        _ => [0x00; 5],
    }
}

/// A short run of scaled text placed at a pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun {
    pub x: u8,
    pub y: u8,
    pub scale: u8,
    text: [u8; 4],
    len: u8,
}

impl TextRun {
    fn new(y: u8, scale: u8) -> Self {
        Self {
            x: 0,
            y,
            scale,
            text: [b' '; 4],
            len: 0,
        }
    }

    fn push(&mut self, c: u8) {
        if usize::from(self.len) < self.text.len() {
            self.text[usize::from(self.len)] = c;
            self.len += 1;
        }
    }

    fn push_number(&mut self, mut n: u8) {
        let mut digits = [0u8; 3];
        let mut count = 0;
        loop {
            digits[count] = b'0' + n % 10;
            count += 1;
            n /= 10;
            if n == 0 {
                break;
            }
        }
        for &d in digits[..count].iter().rev() {
            self.push(d);
        }
    }

    pub fn text(&self) -> &[u8] {
        &self.text[..usize::from(self.len)]
    }

    /// Rendered width in pixels, without trailing spacing
    pub fn width(&self) -> u8 {
        if self.len == 0 {
            0
        } else {
            (self.len * GLYPH_ADVANCE - 1) * self.scale
        }
    }

    /// Page byte contributed at column `x` of `page`
    fn column_byte(&self, page: u8, x: u8) -> u8 {
        if x < self.x || x >= self.x + self.width() {
            return 0;
        }
        let offset = (x - self.x) / self.scale;
        let index = usize::from(offset / GLYPH_ADVANCE);
        let column = offset % GLYPH_ADVANCE;
        if column >= GLYPH_WIDTH {
            return 0;
        }
        let bits = glyph(self.text[index])[usize::from(column)];

        let mut byte = 0;
        for row in 0..8u8 {
            let y = page * 8 + row;
            if y < self.y {
                continue;
            }
            let glyph_row = (y - self.y) / self.scale;
            if glyph_row < GLYPH_HEIGHT && bits & (1 << glyph_row) != 0 {
                byte |= 1 << row;
            }
        }
        byte
    }
}

/// `#k` top-left and `p%` right-aligned across the full height
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusLayout {
    pub label: TextRun,
    pub value: TextRun,
}

impl StatusLayout {
    pub fn new(channel: u8, percentage: u8) -> Self {
        let mut label = TextRun::new(0, LABEL_SCALE);
        label.push(b'#');
        label.push_number(channel);

        let mut value = TextRun::new(2, VALUE_SCALE);
        value.push_number(percentage);
        value.push(b'%');
        value.x = WIDTH - value.width();

        Self { label, value }
    }

    pub fn column_byte(&self, page: u8, x: u8) -> u8 {
        self.label.column_byte(page, x) | self.value.column_byte(page, x)
    }
}

pub struct Ssd1306<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C, E> Ssd1306<I2C>
where
    I2C: Write<Error = E>,
    Error: From<E>,
{
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Send the controller set-up; no answer means there is no display
    pub fn init(&mut self) -> Result<(), Error> {
        for &cmd in INIT_SEQUENCE.iter() {
            self.command(&[cmd]).map_err(|_| Error::DisplayNotFound)?;
        }
        Ok(())
    }

    fn command(&mut self, cmds: &[u8]) -> Result<(), Error> {
        let mut buf = [CONTROL_COMMAND; 8];
        let len = cmds.len().min(buf.len() - 1);
        buf[1..=len].copy_from_slice(&cmds[..len]);
        self.i2c.write(self.address, &buf[..=len])?;
        Ok(())
    }

    pub fn draw(&mut self, layout: &StatusLayout) -> Result<(), Error> {
        self.command(&[0x21, 0, WIDTH - 1])?;
        self.command(&[0x22, 0, PAGES - 1])?;

        let mut buf = [CONTROL_DATA; CHUNK + 1];
        for page in 0..PAGES {
            for start in (0..WIDTH).step_by(CHUNK) {
                for (i, slot) in buf[1..].iter_mut().enumerate() {
                    *slot = layout.column_byte(page, start + i as u8);
                }
                self.i2c.write(self.address, &buf)?;
            }
        }
        Ok(())
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> StatusDisplay for Ssd1306<I2C>
where
    I2C: Write<Error = E>,
    Error: From<E>,
{
    type Error = Error;

    fn set_power(&mut self, on: bool) -> Result<(), Error> {
        self.command(&[if on { CMD_DISPLAY_ON } else { CMD_DISPLAY_OFF }])
    }

    fn show(&mut self, channel: u8, percentage: u8) -> Result<(), Error> {
        self.draw(&StatusLayout::new(channel, percentage))
    }
}
