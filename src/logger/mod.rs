//! Diagnostic logging over the serial console
//!
//! Log lines share the wire with the value reports, so the firmware only
//! emits them when the `debug` feature is enabled. Other builds use a silent
//! logger and the serial line carries nothing but report lines.

use crate::error::Error;
use ufmt::uWrite;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogType {
    Error = 0,
    System = 1,
    Sensor = 2,
    Debug = 3,
}

impl LogType {
    fn tag(self) -> &'static str {
        match self {
            LogType::Error => "[ERR] ",
            LogType::System => "[SYS] ",
            LogType::Sensor => "[SNS] ",
            LogType::Debug => "[DBG] ",
        }
    }
}

pub struct Logger {
    max_level: Option<LogType>,
}

impl Logger {
    pub const fn new(max_level: LogType) -> Self {
        Self {
            max_level: Some(max_level),
        }
    }

    /// Drops every entry
    pub const fn silent() -> Self {
        Self { max_level: None }
    }

    /// Level picked by the build: everything with `debug`, nothing otherwise
    pub const fn from_features() -> Self {
        if cfg!(feature = "debug") {
            Self::new(LogType::Debug)
        } else {
            Self::silent()
        }
    }

    #[inline]
    pub fn enabled(&self, log_type: LogType) -> bool {
        match self.max_level {
            Some(max_level) => log_type <= max_level,
            None => false,
        }
    }

    pub fn log_system<W: uWrite>(&self, out: &mut W, msg: &str) -> Result<(), W::Error> {
        self.log_entry(out, LogType::System, msg)
    }

    pub fn log_debug<W: uWrite>(&self, out: &mut W, msg: &str) -> Result<(), W::Error> {
        self.log_entry(out, LogType::Debug, msg)
    }

    pub fn log_error<W: uWrite>(&self, out: &mut W, err: &Error) -> Result<(), W::Error> {
        if !self.enabled(LogType::Error) {
            return Ok(());
        }
        ufmt::uwrite!(out, "{}{}\r\n", LogType::Error.tag(), *err)
    }

    /// `channel` is the 0-based index, logged 1-based like the display
    pub fn log_sensor<W: uWrite>(
        &self,
        out: &mut W,
        channel: usize,
        percentage: u8,
    ) -> Result<(), W::Error> {
        if !self.enabled(LogType::Sensor) {
            return Ok(());
        }
        ufmt::uwrite!(
            out,
            "{}#{} {}%\r\n",
            LogType::Sensor.tag(),
            channel + 1,
            percentage
        )
    }

    fn log_entry<W: uWrite>(&self, out: &mut W, log_type: LogType, msg: &str) -> Result<(), W::Error> {
        if !self.enabled(log_type) {
            return Ok(());
        }
        out.write_str(log_type.tag())?;
        out.write_str(msg)?;
        out.write_str("\r\n")
    }
}
