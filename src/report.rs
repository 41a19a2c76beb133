//! Serial report cadence and line format

use crate::channel::Channel;
use ufmt::uWrite;

/// Decides when the channel values go out over serial.
///
/// Values are sent on every change and, while nothing changes, once every
/// `threshold` unchanged cycles so a host that missed a line resyncs. The
/// first cycle after startup is always sent.
pub struct ReportScheduler {
    threshold: u32,
    unchanged_cycles: u32,
    startup_pending: bool,
}

impl ReportScheduler {
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold: if threshold == 0 { 1 } else { threshold },
            unchanged_cycles: 0,
            startup_pending: true,
        }
    }

    /// Record one sampling cycle, returns true if values should be sent
    pub fn record(&mut self, changed: bool) -> bool {
        let startup = core::mem::replace(&mut self.startup_pending, false);

        if changed {
            self.unchanged_cycles = 0;
            return true;
        }

        self.unchanged_cycles = self.unchanged_cycles.wrapping_add(1);
        startup || self.unchanged_cycles % self.threshold == 0
    }

    /// Consecutive cycles without any channel change
    #[inline]
    pub fn unchanged_cycles(&self) -> u32 {
        self.unchanged_cycles
    }
}

/// Write one `v0|v1|...|vN\n` report line
pub fn write_report<W>(out: &mut W, channels: &[Channel]) -> Result<(), W::Error>
where
    W: uWrite,
{
    for (index, channel) in channels.iter().enumerate() {
        if index > 0 {
            out.write_str("|")?;
        }
        ufmt::uwrite!(out, "{}", channel.reported_value())?;
    }
    out.write_str("\n")
}
