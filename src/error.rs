//! Error types and the fatal halt state

use ufmt::{uDisplay, uWrite, Formatter};

/// TWI bus failures, named after the status code that stopped the transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    StartFailed,
    AddressNack,
    DataNack,
    ArbitrationLost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Display did not answer during initialisation
    DisplayNotFound,
    Bus(BusError),
}

impl From<BusError> for Error {
    fn from(err: BusError) -> Self {
        Error::Bus(err)
    }
}

impl BusError {
    fn as_str(&self) -> &'static str {
        match self {
            BusError::StartFailed => "start failed",
            BusError::AddressNack => "address nack",
            BusError::DataNack => "data nack",
            BusError::ArbitrationLost => "arbitration lost",
        }
    }
}

impl uDisplay for Error {
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Error::DisplayNotFound => f.write_str("display not found"),
            Error::Bus(err) => {
                f.write_str("bus: ")?;
                f.write_str(err.as_str())
            }
        }
    }
}

/// Diagnostic line sent once before halting
pub fn write_fatal<W: uWrite>(out: &mut W, err: &Error) -> Result<(), W::Error> {
    ufmt::uwrite!(out, "FATAL: {}\r\n", *err)
}

/// Half period of the alarm blink, ~2 Hz
pub const HALT_BLINK_HALF_PERIOD_MS: u16 = 250;

/// Terminal state for unrecoverable start-up failures.
///
/// Reports `err` on serial, masks interrupts and blinks the status LED
/// forever. Only reachable before the sampling loop starts.
#[cfg(target_arch = "avr")]
pub fn halt<W: uWrite>(serial: &mut W, err: Error) -> ! {
    use crate::hal::gpio::board::StatusLed;
    use crate::hal::timer::delay_ms;

    write_fatal(serial, &err).ok();
    avr_device::interrupt::disable();

    let mut led = StatusLed::new();
    loop {
        led.toggle();
        delay_ms(HALT_BLINK_HALF_PERIOD_MS);
    }
}
