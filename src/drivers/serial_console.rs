use embedded_hal::serial::Write;
use ufmt::uWrite;

/// Text front-end for a byte-oriented serial transmitter
pub struct SerialConsole<W> {
    uart: W,
}

impl<W: Write<u8>> SerialConsole<W> {
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    pub fn write_byte(&mut self, byte: u8) -> Result<(), W::Error> {
        nb::block!(self.uart.write(byte))
    }

    pub fn write_line(&mut self, s: &str) -> Result<(), W::Error> {
        self.write_str(s)?;
        self.write_str("\r\n")
    }

    /// Wait until every queued byte has left the transmitter
    pub fn flush(&mut self) -> Result<(), W::Error> {
        nb::block!(self.uart.flush())
    }

    pub fn release(self) -> W {
        self.uart
    }
}

impl<W: Write<u8>> uWrite for SerialConsole<W> {
    type Error = W::Error;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        for byte in s.bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::serial::{Mock, Transaction};

    #[test]
    fn formatted_output_goes_out_byte_by_byte() {
        let expectations = [
            Transaction::write_many(b"12|0\n"),
            Transaction::write_many(b"ready\r\n"),
            Transaction::flush(),
        ];
        let mut console = SerialConsole::new(Mock::new(&expectations));

        ufmt::uwrite!(console, "{}|{}\n", 12u16, 0u16).unwrap();
        console.write_line("ready").unwrap();
        console.flush().unwrap();

        console.release().done();
    }

    #[test]
    fn transmit_errors_are_propagated() {
        let expectations = [
            Transaction::write(b'o'),
            Transaction::write_error(b'k', nb::Error::Other(embedded_hal_mock::MockError::Io(
                std::io::ErrorKind::BrokenPipe,
            ))),
        ];
        let mut console = SerialConsole::new(Mock::new(&expectations));

        assert!(console.write_str("ok").is_err());

        console.release().done();
    }
}
