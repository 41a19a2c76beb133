//! Per-cycle sampling, change detection and reporting
//!
//! One call to [`Application::run_cycle`] covers the Evaluating and
//! Reporting steps of a cycle; the firmware loop owns Sleeping (wait for the
//! timer) and Sampling (fill the raw buffer).

use crate::channel::{ChannelBank, Hysteresis};
use crate::config::Thresholds;
#[cfg(feature = "display")]
use crate::display::{DisplayCommand, DisplayTimeoutPolicy, StatusDisplay};
use crate::logger::Logger;
use crate::report::{write_report, ReportScheduler};
use ufmt::uWrite;

/// What a cycle decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
    pub changed: bool,
    pub transmit: bool,
    #[cfg(feature = "display")]
    pub display: Option<DisplayCommand>,
}

/// Application state, owned by the main loop
pub struct Application<const N: usize> {
    channels: ChannelBank<N>,
    reports: ReportScheduler,
    #[cfg(feature = "display")]
    display: DisplayTimeoutPolicy,
    logger: Logger,
}

impl<const N: usize> Application<N> {
    pub const fn new(hysteresis: Hysteresis, thresholds: Thresholds, logger: Logger) -> Self {
        Self {
            channels: ChannelBank::new(hysteresis),
            reports: ReportScheduler::new(thresholds.transmission),
            #[cfg(feature = "display")]
            display: DisplayTimeoutPolicy::new(thresholds.display_timeout),
            logger,
        }
    }

    /// Run the conversion over `raw` and decide what to send
    pub fn evaluate(&mut self, raw: &[u16; N]) -> Cycle {
        let changed = self.channels.update(raw);
        let transmit = self.reports.record(changed);

        #[cfg(feature = "display")]
        let display = {
            let last = self.channels.last_changed();
            let percentage = self.channels.last_changed_channel().percentage();
            self.display
                .evaluate(changed, self.reports.unchanged_cycles(), last, percentage)
        };

        Cycle {
            changed,
            transmit,
            #[cfg(feature = "display")]
            display,
        }
    }

    /// Send the serial report for `cycle`, if any
    pub fn report<W: uWrite>(&self, cycle: &Cycle, serial: &mut W) -> Result<(), W::Error> {
        if cycle.changed {
            let last = self.channels.last_changed();
            self.logger
                .log_sensor(serial, last, self.channels.last_changed_channel().percentage())?;
        }
        if cycle.transmit {
            write_report(serial, self.channels.channels())?;
        }
        Ok(())
    }

    /// Apply the display decision for `cycle`, if any
    #[cfg(feature = "display")]
    pub fn refresh_display<D: StatusDisplay>(
        &self,
        cycle: &Cycle,
        display: &mut D,
    ) -> Result<(), D::Error> {
        match cycle.display {
            Some(command) => command.apply(display),
            None => Ok(()),
        }
    }

    /// Evaluate `raw` and send everything the cycle calls for
    pub fn run_cycle<W: uWrite>(&mut self, raw: &[u16; N], serial: &mut W) -> Result<Cycle, W::Error> {
        let cycle = self.evaluate(raw);
        self.report(&cycle, serial)?;
        #[cfg(feature = "display")]
        if cycle.display == Some(DisplayCommand::Off) {
            self.logger.log_debug(serial, "display off")?;
        }
        Ok(cycle)
    }

    #[inline]
    pub fn channels(&self) -> &ChannelBank<N> {
        &self.channels
    }

    #[inline]
    pub fn unchanged_cycles(&self) -> u32 {
        self.reports.unchanged_cycles()
    }

    #[inline]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
